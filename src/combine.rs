use std::cmp::Ordering;

use crate::blocks::{block_select_sort, count_last_merge_blocks};
use crate::insert::insertion_sort;
use crate::lazy::{lazy_merge, smart_lazy_merge};
use crate::merge::{
    in_place_buffer_reset, merge_forwards, merge_out_of_place, out_of_place_buffer_reset,
    smart_merge, smart_merge_out_of_place, subarray_of, MergeState, Subarray,
};
use crate::rotate::swap_blocks;

/// Splits a combine pass into full two-subarray merges plus an irregular tail. A tail
/// that fits in one subarray is already in place and is dropped from the pass length.
pub(crate) fn combine_layout(mut length: usize, subarray_len: usize) -> (usize, usize, usize) {
    let merge_count = length / (2 * subarray_len);
    let mut last_subarray = length - (2 * subarray_len * merge_count);

    if last_subarray <= subarray_len {
        length -= last_subarray;
        last_subarray = 0;
    }

    (merge_count, last_subarray, length)
}

/// Merges the selection-sorted blocks at `start` with the scrolling buffer, walking the
/// key tags and folding the head-block state through each step. Blocks from the same
/// side as the head are appended by a block swap, blocks from the other side trigger a
/// smart merge. `final_left_blocks`/`final_len` describe the irregular tail fragment.
pub(crate) fn merge_blocks<T, F: FnMut(&T, &T) -> Ordering>(
    v: &mut [T],
    keys: usize,
    median_key: usize,
    start: usize,
    block_count: usize,
    block_len: usize,
    final_left_blocks: usize,
    final_len: usize,
    cmp: &mut F,
) {
    let mut state = MergeState {
        block_len,
        origin: subarray_of(v, keys, median_key, cmp),
    };
    let mut block_index = block_len;

    for key_index in 1..block_count {
        let current_block = block_index - state.block_len;
        let next_origin = subarray_of(v, keys + key_index, median_key, cmp);

        if next_origin == state.origin {
            swap_blocks(
                v,
                start + current_block - block_len,
                start + current_block,
                state.block_len,
            );
            state.block_len = block_len;
        } else {
            state = smart_merge(v, start + current_block, state, block_len, block_len, cmp);
        }

        block_index += block_len;
    }

    let mut current_block = block_index - state.block_len;

    if final_len != 0 {
        let merge_len = if state.origin == Subarray::Right {
            swap_blocks(
                v,
                start + current_block - block_len,
                start + current_block,
                state.block_len,
            );
            current_block = block_index;
            block_len * final_left_blocks
        } else {
            state.block_len + (block_len * final_left_blocks)
        };

        merge_forwards(v, start + current_block, merge_len, final_len, block_len, cmp);
    } else {
        swap_blocks(
            v,
            start + current_block,
            start + current_block - block_len,
            state.block_len,
        );
    }
}

/// [`merge_blocks`] against a dead external buffer: block moves are copies.
pub(crate) fn merge_blocks_out_of_place<T: Copy, F: FnMut(&T, &T) -> Ordering>(
    v: &mut [T],
    keys: usize,
    median_key: usize,
    start: usize,
    block_count: usize,
    block_len: usize,
    final_left_blocks: usize,
    final_len: usize,
    cmp: &mut F,
) {
    let mut state = MergeState {
        block_len,
        origin: subarray_of(v, keys, median_key, cmp),
    };
    let mut block_index = block_len;

    for key_index in 1..block_count {
        let current_block = block_index - state.block_len;
        let next_origin = subarray_of(v, keys + key_index, median_key, cmp);

        if next_origin == state.origin {
            let from = start + current_block;
            v.copy_within(from..from + state.block_len, from - block_len);
            state.block_len = block_len;
        } else {
            state = smart_merge_out_of_place(
                v,
                start + current_block,
                state,
                block_len,
                block_len,
                cmp,
            );
        }

        block_index += block_len;
    }

    let mut current_block = block_index - state.block_len;

    if final_len != 0 {
        let merge_len = if state.origin == Subarray::Right {
            let from = start + current_block;
            v.copy_within(from..from + state.block_len, from - block_len);
            current_block = block_index;
            block_len * final_left_blocks
        } else {
            state.block_len + (block_len * final_left_blocks)
        };

        merge_out_of_place(v, start + current_block, merge_len, final_len, block_len, cmp);
    } else {
        let from = start + current_block;
        v.copy_within(from..from + state.block_len, from - block_len);
    }
}

/// Rotation-only [`merge_blocks`] for passes without a usable buffer. Same key walk,
/// but same-side blocks need no movement at all.
pub(crate) fn lazy_merge_blocks<T, F: FnMut(&T, &T) -> Ordering>(
    v: &mut [T],
    keys: usize,
    median_key: usize,
    start: usize,
    block_count: usize,
    block_len: usize,
    final_left_blocks: usize,
    final_len: usize,
    cmp: &mut F,
) {
    let mut state = MergeState {
        block_len,
        origin: subarray_of(v, keys, median_key, cmp),
    };
    let mut block_index = block_len;

    for key_index in 1..block_count {
        let current_block = block_index - state.block_len;
        let next_origin = subarray_of(v, keys + key_index, median_key, cmp);

        if next_origin == state.origin {
            state.block_len = block_len;
        } else {
            state = smart_lazy_merge(v, start + current_block, state, block_len, cmp);
        }

        block_index += block_len;
    }

    let mut current_block = block_index - state.block_len;

    if final_len != 0 {
        let merge_len = if state.origin == Subarray::Right {
            current_block = block_index;
            block_len * final_left_blocks
        } else {
            state.block_len + (block_len * final_left_blocks)
        };

        lazy_merge(v, start + current_block, merge_len, final_len, cmp);
    }
}

/// One combine pass over `v[start..start + length]` without external memory: per merge,
/// sort the key tags, selection-sort the blocks, then run the buffered or lazy block
/// merge depending on whether this pass has a scrolling buffer.
#[allow(clippy::too_many_arguments)]
pub(crate) fn combine_in_place<T, F: FnMut(&T, &T) -> Ordering>(
    v: &mut [T],
    keys: usize,
    start: usize,
    length: usize,
    subarray_len: usize,
    block_len: usize,
    merge_count: usize,
    last_subarray: usize,
    scrolling_buffer: bool,
    cmp: &mut F,
) {
    let full_merge = 2 * subarray_len;

    for merge_index in 0..merge_count {
        let offset = start + (merge_index * full_merge);
        let block_count = full_merge / block_len;

        insertion_sort(v, keys, block_count, cmp);

        let median_key = subarray_len / block_len;
        let median_key =
            block_select_sort(v, keys, offset, median_key, block_count, block_len, cmp);

        if scrolling_buffer {
            merge_blocks(
                v,
                keys,
                keys + median_key,
                offset,
                block_count,
                block_len,
                0,
                0,
                cmp,
            );
        } else {
            lazy_merge_blocks(
                v,
                keys,
                keys + median_key,
                offset,
                block_count,
                block_len,
                0,
                0,
                cmp,
            );
        }
    }

    if last_subarray != 0 {
        let offset = start + (merge_count * full_merge);
        let block_count = last_subarray / block_len;

        insertion_sort(v, keys, block_count + 1, cmp);

        let median_key = subarray_len / block_len;
        let median_key =
            block_select_sort(v, keys, offset, median_key, block_count, block_len, cmp);

        let last_fragment = last_subarray - (block_count * block_len);
        let smart_merges = if last_fragment != 0 {
            count_last_merge_blocks(v, offset, block_count, block_len, cmp)
        } else {
            0
        };

        let remaining_blocks = block_count - smart_merges;

        if remaining_blocks == 0 {
            let left_len = smart_merges * block_len;
            if scrolling_buffer {
                merge_forwards(v, offset, left_len, last_fragment, block_len, cmp);
            } else {
                lazy_merge(v, offset, left_len, last_fragment, cmp);
            }
        } else if scrolling_buffer {
            merge_blocks(
                v,
                keys,
                keys + median_key,
                offset,
                remaining_blocks,
                block_len,
                smart_merges,
                last_fragment,
                cmp,
            );
        } else {
            lazy_merge_blocks(
                v,
                keys,
                keys + median_key,
                offset,
                remaining_blocks,
                block_len,
                smart_merges,
                last_fragment,
                cmp,
            );
        }
    }

    if scrolling_buffer {
        in_place_buffer_reset(v, start, length, block_len);
    }
}

/// [`combine_in_place`] with the buffer elements parked in external memory for the whole
/// pass, so every block move inside it is a copy.
#[allow(clippy::too_many_arguments)]
pub(crate) fn combine_out_of_place<T: Copy, F: FnMut(&T, &T) -> Ordering>(
    v: &mut [T],
    buffer: &mut [T],
    keys: usize,
    start: usize,
    length: usize,
    subarray_len: usize,
    block_len: usize,
    merge_count: usize,
    last_subarray: usize,
    cmp: &mut F,
) {
    buffer[..block_len].copy_from_slice(&v[start - block_len..start]);

    let full_merge = 2 * subarray_len;

    for merge_index in 0..merge_count {
        let offset = start + (merge_index * full_merge);
        let block_count = full_merge / block_len;

        insertion_sort(v, keys, block_count, cmp);

        let median_key = subarray_len / block_len;
        let median_key =
            block_select_sort(v, keys, offset, median_key, block_count, block_len, cmp);

        merge_blocks_out_of_place(
            v,
            keys,
            keys + median_key,
            offset,
            block_count,
            block_len,
            0,
            0,
            cmp,
        );
    }

    if last_subarray != 0 {
        let offset = start + (merge_count * full_merge);
        let block_count = last_subarray / block_len;

        insertion_sort(v, keys, block_count + 1, cmp);

        let median_key = subarray_len / block_len;
        let median_key =
            block_select_sort(v, keys, offset, median_key, block_count, block_len, cmp);

        let last_fragment = last_subarray - (block_count * block_len);
        let smart_merges = if last_fragment != 0 {
            count_last_merge_blocks(v, offset, block_count, block_len, cmp)
        } else {
            0
        };

        let remaining_blocks = block_count - smart_merges;

        if remaining_blocks == 0 {
            let left_len = smart_merges * block_len;
            merge_out_of_place(v, offset, left_len, last_fragment, block_len, cmp);
        } else {
            merge_blocks_out_of_place(
                v,
                keys,
                keys + median_key,
                offset,
                remaining_blocks,
                block_len,
                smart_merges,
                last_fragment,
                cmp,
            );
        }
    }

    out_of_place_buffer_reset(v, start, length, block_len);
    v[start - block_len..start].copy_from_slice(&buffer[..block_len]);
}
