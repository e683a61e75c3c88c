use std::cmp::Ordering::{self, Equal, Greater, Less};

use crate::merge::{MergeState, Subarray};
use crate::rotate::rotate;
use crate::search::{binary_search_left, binary_search_right};

/// Stable merge of two adjacent runs using rotations only, no buffer. Works from
/// whichever side is shorter so the rotations stay small.
pub(crate) fn lazy_merge<T, F: FnMut(&T, &T) -> Ordering>(
    v: &mut [T],
    mut start: usize,
    mut left_len: usize,
    mut right_len: usize,
    cmp: &mut F,
) {
    if left_len < right_len {
        while left_len != 0 {
            let insert_pos = binary_search_left(v, start + left_len, right_len, &v[start], cmp);

            if insert_pos != 0 {
                rotate(v, start, left_len, insert_pos);
                start += insert_pos;
                right_len -= insert_pos;
            }

            if right_len == 0 {
                break;
            }

            start += 1;
            left_len -= 1;
            while left_len != 0 && cmp(&v[start], &v[start + left_len]) <= Equal {
                start += 1;
                left_len -= 1;
            }
        }
    } else {
        let mut end = start + left_len + right_len - 1;

        while right_len != 0 {
            let insert_pos = binary_search_right(v, start, left_len, &v[end], cmp);

            if insert_pos != left_len {
                rotate(v, start + insert_pos, left_len - insert_pos, right_len);
                end -= left_len - insert_pos;
                left_len = insert_pos;
            }

            if left_len == 0 {
                break;
            }

            let left_end = start + left_len - 1;
            end -= 1;
            right_len -= 1;
            while right_len != 0 && cmp(&v[left_end], &v[end]) <= Equal {
                end -= 1;
                right_len -= 1;
            }
        }
    }
}

/// Origin-aware [`lazy_merge`] over the head block, mirroring the tie handling of the
/// buffered smart merge. Returns the state for the next block of the scan.
pub(crate) fn smart_lazy_merge<T, F: FnMut(&T, &T) -> Ordering>(
    v: &mut [T],
    mut start: usize,
    state: MergeState,
    mut right_len: usize,
    cmp: &mut F,
) -> MergeState {
    let mut left_len = state.block_len;

    match state.origin {
        Subarray::Left => {
            if cmp(&v[start + left_len - 1], &v[start + left_len]) == Greater {
                while left_len != 0 {
                    let insert_pos =
                        binary_search_left(v, start + left_len, right_len, &v[start], cmp);

                    if insert_pos != 0 {
                        rotate(v, start, left_len, insert_pos);
                        start += insert_pos;
                        right_len -= insert_pos;
                    }

                    if right_len == 0 {
                        return MergeState {
                            block_len: left_len,
                            origin: Subarray::Left,
                        };
                    }

                    start += 1;
                    left_len -= 1;
                    while left_len != 0 && cmp(&v[start], &v[start + left_len]) <= Equal {
                        start += 1;
                        left_len -= 1;
                    }
                }
            }
        }
        Subarray::Right => {
            if cmp(&v[start + left_len - 1], &v[start + left_len]) >= Equal {
                while left_len != 0 {
                    let insert_pos =
                        binary_search_right(v, start + left_len, right_len, &v[start], cmp);

                    if insert_pos != 0 {
                        rotate(v, start, left_len, insert_pos);
                        start += insert_pos;
                        right_len -= insert_pos;
                    }

                    if right_len == 0 {
                        return MergeState {
                            block_len: left_len,
                            origin: Subarray::Right,
                        };
                    }

                    start += 1;
                    left_len -= 1;
                    while left_len != 0 && cmp(&v[start], &v[start + left_len]) == Less {
                        start += 1;
                        left_len -= 1;
                    }
                }
            }
        }
    }

    MergeState {
        block_len: right_len,
        origin: state.origin.flipped(),
    }
}

/// O(1) extra memory fallback for inputs with fewer than four distinct values: sorted
/// pairs, then doubling bottom-up [`lazy_merge`] passes.
pub(crate) fn lazy_stable_sort<T, F: FnMut(&T, &T) -> Ordering>(
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
            v.swap(left, right);
        }
        index += 2;
    }

    let mut merge_len = 2;
    while merge_len < length {
        let full_merge = 2 * merge_len;
        let mut merge_index = 0;

        // Guard against wrap-around for lengths below a full pair of runs.
        if length >= full_merge {
            let merge_end = length - full_merge;
            while merge_index <= merge_end {
                lazy_merge(v, start + merge_index, merge_len, merge_len, cmp);
                merge_index += full_merge;
            }
        }

        let left_over = length - merge_index;
        if left_over > merge_len {
            lazy_merge(v, start + merge_index, merge_len, left_over - merge_len, cmp);
        }

        merge_len = full_merge;
    }
}
