use std::cmp::Ordering::{self, Equal, Greater, Less};

use crate::merge::{merge_backwards, merge_forwards, merge_out_of_place};
use crate::rotate::{rotate, swap_blocks};

/// Sorts adjacent pairs of `v[start..start + length]` while swapping each pair two slots
/// down, pulling the first two buffer elements up behind the scan.
pub(crate) fn pairwise_swaps<T, F: FnMut(&T, &T) -> Ordering>(
    v: &mut [T],
    start: usize,
    length: usize,
    cmp: &mut F,
) {
    let mut index = 1;
    while index < length {
        let left = start + index - 1;
        let right = start + index;

        if cmp(&v[left], &v[right]) == Greater {
            v.swap(left - 2, right);
            v.swap(right - 2, left);
        } else {
            v.swap(left - 2, left);
            v.swap(right - 2, right);
        }

        index += 2;
    }

    let left = start + index - 1;
    if left < start + length {
        v.swap(left - 2, left);
    }
}

/// Copy variant of [`pairwise_swaps`], used when the two displaced slots were saved to
/// the external buffer.
pub(crate) fn pairwise_writes<T: Copy, F: FnMut(&T, &T) -> Ordering>(
    v: &mut [T],
    start: usize,
    length: usize,
    cmp: &mut F,
) {
    let mut index = 1;
    while index < length {
        let left = start + index - 1;
        let right = start + index;

        if cmp(&v[left], &v[right]) == Greater {
            v[left - 2] = v[right];
            v[right - 2] = v[left];
        } else {
            v[left - 2] = v[left];
            v[right - 2] = v[right];
        }

        index += 2;
    }

    let left = start + index - 1;
    if left < start + length {
        v[left - 2] = v[left];
    }
}

/// Doubling bottom-up merges with the scrolling buffer, starting from runs of
/// `current_len` until they reach `buffer_len`. The buffer migrates down one run length
/// per pass; the final backwards pass parks it back above the data.
pub(crate) fn build_in_place<T, F: FnMut(&T, &T) -> Ordering>(
    v: &mut [T],
    mut start: usize,
    length: usize,
    current_len: usize,
    buffer_len: usize,
    cmp: &mut F,
) {
    let mut merge_len = current_len;
    while merge_len < buffer_len {
        let full_merge = 2 * merge_len;
        let mut merge_index = start;

        if length >= full_merge {
            let merge_end = start + length - full_merge;
            while merge_index <= merge_end {
                merge_forwards(v, merge_index, merge_len, merge_len, merge_len, cmp);
                merge_index += full_merge;
            }
        }

        let left_over = length - (merge_index - start);
        if left_over > merge_len {
            merge_forwards(
                v,
                merge_index,
                merge_len,
                left_over - merge_len,
                merge_len,
                cmp,
            );
        } else {
            rotate(v, merge_index - merge_len, merge_len, left_over);
        }

        start -= merge_len;
        merge_len = full_merge;
    }

    let full_merge = 2 * buffer_len;
    let last_block = length % full_merge;
    let last_offset = start + length - last_block;

    if last_block <= buffer_len {
        rotate(v, last_offset, last_block, buffer_len);
    } else {
        merge_backwards(
            v,
            last_offset,
            buffer_len,
            last_block - buffer_len,
            buffer_len,
            cmp,
        );
    }

    let mut merge_index = last_offset;
    while merge_index >= start + full_merge {
        merge_index -= full_merge;
        merge_backwards(v, merge_index, buffer_len, buffer_len, buffer_len, cmp);
    }
}

/// Runs the first build passes out of place: the `extern_len` elements below `start` are
/// saved into `buffer`, the passes overwrite the vacated space by copying, and once the
/// run length outgrows the external buffer the saved elements are restored above the data
/// and [`build_in_place`] takes over.
pub(crate) fn build_out_of_place<T: Copy, F: FnMut(&T, &T) -> Ordering>(
    v: &mut [T],
    buffer: &mut [T],
    mut start: usize,
    length: usize,
    buffer_len: usize,
    extern_len: usize,
    cmp: &mut F,
) {
    buffer[..extern_len].copy_from_slice(&v[start - extern_len..start]);

    pairwise_writes(v, start, length, cmp);
    start -= 2;

    let mut merge_len = 2;
    while merge_len < extern_len {
        let full_merge = 2 * merge_len;
        let mut merge_index = start;

        if length >= full_merge {
            let merge_end = start + length - full_merge;
            while merge_index <= merge_end {
                merge_out_of_place(v, merge_index, merge_len, merge_len, merge_len, cmp);
                merge_index += full_merge;
            }
        }

        let left_over = length - (merge_index - start);
        if left_over > merge_len {
            merge_out_of_place(
                v,
                merge_index,
                merge_len,
                left_over - merge_len,
                merge_len,
                cmp,
            );
        } else {
            v.copy_within(merge_index..merge_index + left_over, merge_index - merge_len);
        }

        start -= merge_len;
        merge_len = full_merge;
    }

    v[start + length..start + length + extern_len].copy_from_slice(&buffer[..extern_len]);
    build_in_place(v, start, length, merge_len, buffer_len, cmp);
}

/// Selection sort over whole blocks by their leading element, swapping the key tags at
/// `keys` in lock step and tracking where the median key ends up. Ties between leading
/// elements are broken by key order, which keeps equal blocks in subarray order.
pub(crate) fn block_select_sort<T, F: FnMut(&T, &T) -> Ordering>(
    v: &mut [T],
    keys: usize,
    start: usize,
    mut median_key: usize,
    block_count: usize,
    block_len: usize,
    cmp: &mut F,
) -> usize {
    for block in 1..block_count {
        let left = block - 1;
        let mut selected = left;

        for index in block..block_count {
            let compare = cmp(
                &v[start + (index * block_len)],
                &v[start + (selected * block_len)],
            );
            if compare == Less
                || (compare == Equal && cmp(&v[keys + index], &v[keys + selected]) == Less)
            {
                selected = index;
            }
        }

        if selected != left {
            swap_blocks(
                v,
                start + (left * block_len),
                start + (selected * block_len),
                block_len,
            );

            v.swap(keys + left, keys + selected);

            if median_key == left {
                median_key = selected;
            } else if median_key == selected {
                median_key = left;
            }
        }
    }

    median_key
}

/// How many trailing sorted blocks the final fragment still has to merge with: counts
/// back from the fragment while its first element sorts before the block ahead of it.
pub(crate) fn count_last_merge_blocks<T, F: FnMut(&T, &T) -> Ordering>(
    v: &[T],
    offset: usize,
    block_count: usize,
    block_len: usize,
    cmp: &mut F,
) -> usize {
    let mut blocks_to_merge = 0;
    let first_right_block = offset + (block_count * block_len);

    while blocks_to_merge < block_count {
        let prev_left_block = first_right_block - ((blocks_to_merge + 1) * block_len);
        if cmp(&v[first_right_block], &v[prev_left_block]) != Less {
            break;
        }
        blocks_to_merge += 1;
    }

    blocks_to_merge
}
