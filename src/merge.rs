use std::cmp::Ordering::{self, Equal, Greater, Less};

use crate::rotate::swap_blocks;

/// Which of the two subarrays of the current pass a block originally came from. Ties
/// between the sides must resolve towards `Left` to keep the sort stable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Subarray {
    Left,
    Right,
}

impl Subarray {
    pub(crate) fn flipped(self) -> Self {
        match self {
            Subarray::Left => Subarray::Right,
            Subarray::Right => Subarray::Left,
        }
    }
}

/// Running state of a block scan: length of the not-yet-merged head block and the
/// subarray it came from. Returned by the smart merges and folded through the scan.
#[derive(Clone, Copy, Debug)]
pub(crate) struct MergeState {
    pub(crate) block_len: usize,
    pub(crate) origin: Subarray,
}

/// Classifies the block tagged by `v[current_key]` against the median key.
pub(crate) fn subarray_of<T, F: FnMut(&T, &T) -> Ordering>(
    v: &[T],
    current_key: usize,
    median_key: usize,
    cmp: &mut F,
) -> Subarray {
    if cmp(&v[current_key], &v[median_key]) == Less {
        Subarray::Left
    } else {
        Subarray::Right
    }
}

/// Merges `v[start..start + left_len]` with the run right after it, swapping merged
/// elements into the buffer that sits `buffer_len` positions below `start`. The buffer
/// contents end up shifted behind the merged output.
pub(crate) fn merge_forwards<T, F: FnMut(&T, &T) -> Ordering>(
    v: &mut [T],
    start: usize,
    left_len: usize,
    right_len: usize,
    buffer_len: usize,
    cmp: &mut F,
) {
    let mut left = start;
    let middle = start + left_len;
    let mut right = middle;
    let end = middle + right_len;
    let mut buffer = start - buffer_len;

    while right < end {
        if left == middle || cmp(&v[left], &v[right]) == Greater {
            v.swap(buffer, right);
            right += 1;
        } else {
            v.swap(buffer, left);
            left += 1;
        }
        buffer += 1;
    }

    if buffer != left {
        swap_blocks(v, buffer, left, middle - left);
    }
}

/// Backwards counterpart of [`merge_forwards`], with the buffer `buffer_len` positions
/// above the merged region. `left` and `right` are one-past cursors so the scan bottoms
/// out at `start` without ever stepping below it.
pub(crate) fn merge_backwards<T, F: FnMut(&T, &T) -> Ordering>(
    v: &mut [T],
    start: usize,
    left_len: usize,
    right_len: usize,
    buffer_len: usize,
    cmp: &mut F,
) {
    let middle = start + left_len;
    let mut left = middle;
    let mut right = middle + right_len;
    let mut buffer = right + buffer_len;

    while left > start {
        if right == middle || cmp(&v[left - 1], &v[right - 1]) == Greater {
            buffer -= 1;
            left -= 1;
            v.swap(buffer, left);
        } else {
            buffer -= 1;
            right -= 1;
            v.swap(buffer, right);
        }
    }

    if right != buffer {
        while right > middle {
            buffer -= 1;
            right -= 1;
            v.swap(buffer, right);
        }
    }
}

/// [`merge_forwards`] writing copies instead of swapping, for when the buffer holds no
/// live elements.
pub(crate) fn merge_out_of_place<T: Copy, F: FnMut(&T, &T) -> Ordering>(
    v: &mut [T],
    start: usize,
    left_len: usize,
    right_len: usize,
    buffer_len: usize,
    cmp: &mut F,
) {
    let mut left = start;
    let middle = start + left_len;
    let mut right = middle;
    let end = middle + right_len;
    let mut buffer = start - buffer_len;

    while right < end {
        if left == middle || cmp(&v[left], &v[right]) == Greater {
            v[buffer] = v[right];
            right += 1;
        } else {
            v[buffer] = v[left];
            left += 1;
        }
        buffer += 1;
    }

    if buffer != left {
        v.copy_within(left..middle, buffer);
    }
}

/// Merges the head block with the `right_len` elements after it, resolving ties by the
/// head block's origin: a `Left` head wins ties, a `Right` head loses them. Returns the
/// state for the next block in the scan; if the head block was not exhausted its leftover
/// elements are rewound behind the output and it keeps its origin.
pub(crate) fn smart_merge<T, F: FnMut(&T, &T) -> Ordering>(
    v: &mut [T],
    start: usize,
    state: MergeState,
    right_len: usize,
    buffer_len: usize,
    cmp: &mut F,
) -> MergeState {
    let mut left = start;
    let middle = start + state.block_len;
    let mut right = middle;
    let end = middle + right_len;
    let mut buffer = start - buffer_len;

    match state.origin {
        Subarray::Left => {
            while left < middle && right < end {
                if cmp(&v[left], &v[right]) <= Equal {
                    v.swap(buffer, left);
                    left += 1;
                } else {
                    v.swap(buffer, right);
                    right += 1;
                }
                buffer += 1;
            }
        }
        Subarray::Right => {
            while left < middle && right < end {
                if cmp(&v[left], &v[right]) == Less {
                    v.swap(buffer, left);
                    left += 1;
                } else {
                    v.swap(buffer, right);
                    right += 1;
                }
                buffer += 1;
            }
        }
    }

    if left < middle {
        in_place_buffer_rewind(v, left, middle, end);
        MergeState {
            block_len: middle - left,
            origin: state.origin,
        }
    } else {
        MergeState {
            block_len: end - right,
            origin: state.origin.flipped(),
        }
    }
}

/// [`smart_merge`] writing copies instead of swapping.
pub(crate) fn smart_merge_out_of_place<T: Copy, F: FnMut(&T, &T) -> Ordering>(
    v: &mut [T],
    start: usize,
    state: MergeState,
    right_len: usize,
    buffer_len: usize,
    cmp: &mut F,
) -> MergeState {
    let mut left = start;
    let middle = start + state.block_len;
    let mut right = middle;
    let end = middle + right_len;
    let mut buffer = start - buffer_len;

    match state.origin {
        Subarray::Left => {
            while left < middle && right < end {
                if cmp(&v[left], &v[right]) <= Equal {
                    v[buffer] = v[left];
                    left += 1;
                } else {
                    v[buffer] = v[right];
                    right += 1;
                }
                buffer += 1;
            }
        }
        Subarray::Right => {
            while left < middle && right < end {
                if cmp(&v[left], &v[right]) == Less {
                    v[buffer] = v[left];
                    left += 1;
                } else {
                    v[buffer] = v[right];
                    right += 1;
                }
                buffer += 1;
            }
        }
    }

    if left < middle {
        out_of_place_buffer_rewind(v, left, middle, end);
        MergeState {
            block_len: middle - left,
            origin: state.origin,
        }
    } else {
        MergeState {
            block_len: end - right,
            origin: state.origin.flipped(),
        }
    }
}

/// Moves the merged output in `v[start - buffer_len..start - buffer_len + reset_len]`
/// back up by `buffer_len`, landing the scrolled buffer in front of it again. Runs top
/// down so the overlap resolves correctly.
pub(crate) fn in_place_buffer_reset<T>(
    v: &mut [T],
    start: usize,
    reset_len: usize,
    buffer_len: usize,
) {
    for index in (start..start + reset_len).rev() {
        v.swap(index, index - buffer_len);
    }
}

/// Copy variant of [`in_place_buffer_reset`]; the buffer holds no live elements so a
/// plain overlapping copy suffices.
pub(crate) fn out_of_place_buffer_reset<T: Copy>(
    v: &mut [T],
    start: usize,
    reset_len: usize,
    buffer_len: usize,
) {
    let src = start - buffer_len;
    v.copy_within(src..src + reset_len, start);
}

/// Swaps the unmerged leftovers `v[start..left_overs]` up against `buffer`, restoring
/// the displaced buffer elements below them.
pub(crate) fn in_place_buffer_rewind<T>(
    v: &mut [T],
    start: usize,
    mut left_overs: usize,
    mut buffer: usize,
) {
    while left_overs > start {
        buffer -= 1;
        left_overs -= 1;
        v.swap(buffer, left_overs);
    }
}

/// Copy variant of [`in_place_buffer_rewind`].
pub(crate) fn out_of_place_buffer_rewind<T: Copy>(
    v: &mut [T],
    start: usize,
    left_overs: usize,
    buffer: usize,
) {
    let count = left_overs - start;
    v.copy_within(start..left_overs, buffer - count);
}
