use std::cmp::Ordering;

use crate::blocks::{build_in_place, build_out_of_place, pairwise_swaps};
use crate::combine::{combine_in_place, combine_layout, combine_out_of_place};
use crate::insert::insertion_sort;
use crate::keys::collect_keys;
use crate::lazy::{lazy_merge, lazy_stable_sort};

/// Buffer strategy seam between the driver and the build/combine stages.
///
/// [`NoScratch`] runs everything in place and works for any `T`: movement is compare,
/// swap and rotate only, so no element is ever duplicated. [`ExtScratch`] stages buffer
/// elements in external memory, which duplicates elements and therefore needs `T: Copy`.
pub(crate) trait Scratch<T> {
    fn build_blocks<F: FnMut(&T, &T) -> Ordering>(
        &mut self,
        v: &mut [T],
        start: usize,
        length: usize,
        buffer_len: usize,
        cmp: &mut F,
    );

    #[allow(clippy::too_many_arguments)]
    fn combine_blocks<F: FnMut(&T, &T) -> Ordering>(
        &mut self,
        v: &mut [T],
        keys: usize,
        start: usize,
        length: usize,
        subarray_len: usize,
        block_len: usize,
        scrolling_buffer: bool,
        cmp: &mut F,
    );
}

pub(crate) struct NoScratch;

impl<T> Scratch<T> for NoScratch {
    fn build_blocks<F: FnMut(&T, &T) -> Ordering>(
        &mut self,
        v: &mut [T],
        start: usize,
        length: usize,
        buffer_len: usize,
        cmp: &mut F,
    ) {
        pairwise_swaps(v, start, length, cmp);
        build_in_place(v, start - 2, length, 2, buffer_len, cmp);
    }

    fn combine_blocks<F: FnMut(&T, &T) -> Ordering>(
        &mut self,
        v: &mut [T],
        keys: usize,
        start: usize,
        length: usize,
        subarray_len: usize,
        block_len: usize,
        scrolling_buffer: bool,
        cmp: &mut F,
    ) {
        let (merge_count, last_subarray, length) = combine_layout(length, subarray_len);

        combine_in_place(
            v,
            keys,
            start,
            length,
            subarray_len,
            block_len,
            merge_count,
            last_subarray,
            scrolling_buffer,
            cmp,
        );
    }
}

pub(crate) struct ExtScratch<'a, T>(pub(crate) &'a mut [T]);

impl<T: Copy> Scratch<T> for ExtScratch<'_, T> {
    fn build_blocks<F: FnMut(&T, &T) -> Ordering>(
        &mut self,
        v: &mut [T],
        start: usize,
        length: usize,
        buffer_len: usize,
        cmp: &mut F,
    ) {
        let extern_len = if buffer_len < self.0.len() {
            buffer_len
        } else {
            // Largest power of two that fits the external buffer.
            let mut len = 1;
            while len * 2 <= self.0.len() {
                len *= 2;
            }
            len
        };

        build_out_of_place(v, self.0, start, length, buffer_len, extern_len, cmp);
    }

    fn combine_blocks<F: FnMut(&T, &T) -> Ordering>(
        &mut self,
        v: &mut [T],
        keys: usize,
        start: usize,
        length: usize,
        subarray_len: usize,
        block_len: usize,
        scrolling_buffer: bool,
        cmp: &mut F,
    ) {
        let (merge_count, last_subarray, length) = combine_layout(length, subarray_len);

        // Reduced-key passes without a scrolling buffer may run with a block length
        // larger than the key prefix; only the scrolling passes have buffer elements to
        // park externally.
        if scrolling_buffer && block_len <= self.0.len() {
            combine_out_of_place(
                v,
                self.0,
                keys,
                start,
                length,
                subarray_len,
                block_len,
                merge_count,
                last_subarray,
                cmp,
            );
        } else {
            combine_in_place(
                v,
                keys,
                start,
                length,
                subarray_len,
                block_len,
                merge_count,
                last_subarray,
                scrolling_buffer,
                cmp,
            );
        }
    }
}

/// Grows the key count for reduced-buffer passes: each doubling of the keys covers an
/// eight-fold larger block/key product.
fn calc_min_keys(num_keys: usize, mut block_keys_sum: usize) -> usize {
    let mut min_keys = 1;
    while min_keys < num_keys && block_keys_sum != 0 {
        min_keys *= 2;
        block_keys_sum /= 8;
    }
    min_keys
}

pub(crate) fn common_sort<T, F: FnMut(&T, &T) -> Ordering, S: Scratch<T>>(
    v: &mut [T],
    scratch: &mut S,
    mut cmp: F,
) {
    let length = v.len();

    if length < 16 {
        insertion_sort(v, 0, length, &mut cmp);
        return;
    }

    let mut block_len = 1;
    while block_len * block_len < length {
        block_len *= 2;
    }

    let mut key_len = ((length - 1) / block_len) + 1;
    let ideal_keys = key_len + block_len;

    let keys_found = collect_keys(v, 0, length, ideal_keys, &mut cmp);

    let ideal_buffer;
    if keys_found < ideal_keys {
        if keys_found == 1 {
            // Every element compared equal to the first one.
            return;
        }
        if keys_found < 4 {
            lazy_stable_sort(v, 0, length, &mut cmp);
            return;
        }

        // Not enough distinct values for the ideal buffer; shrink the key count to a
        // power of two and run with what we have.
        key_len = block_len;
        block_len = 0;
        ideal_buffer = false;

        while key_len > keys_found {
            key_len /= 2;
        }
    } else {
        ideal_buffer = true;
    }

    let buffer_end = block_len + key_len;
    let mut subarray_len = if ideal_buffer { block_len } else { key_len };

    scratch.build_blocks(v, buffer_end, length - buffer_end, subarray_len, &mut cmp);

    while length - buffer_end > 2 * subarray_len {
        subarray_len *= 2;

        let mut current_block_len = block_len;
        let mut scrolling_buffer = ideal_buffer;

        if !ideal_buffer {
            let half_key_len = key_len / 2;

            if half_key_len * half_key_len >= 2 * subarray_len {
                // Half the keys suffice as a scrolling buffer for this pass.
                current_block_len = half_key_len;
                scrolling_buffer = true;
            } else {
                let block_keys_sum = (subarray_len * keys_found) / 2;
                let min_keys = calc_min_keys(key_len, block_keys_sum);

                current_block_len = (2 * subarray_len) / min_keys;
            }
        }

        scratch.combine_blocks(
            v,
            0,
            buffer_end,
            length - buffer_end,
            subarray_len,
            current_block_len,
            scrolling_buffer,
            &mut cmp,
        );
    }

    insertion_sort(v, 0, buffer_end, &mut cmp);
    lazy_merge(v, 0, buffer_end, length - buffer_end, &mut cmp);
}
