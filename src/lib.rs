//! Stable block merge sort in the Grailsort family, after Andrey Astrelin's
//! implementation of the Huang/Langston block merge technique.
//!
//! The in-place entry points ([`sort`], [`sort_by`]) run in O(n log n) with O(1) extra
//! memory and work for any element type: all movement is compare, swap and rotate, no
//! element is ever duplicated. The buffered entry points trade a small allocation for
//! fewer moves and require `Copy` elements.
//!
//! A buffer of distinct elements and a set of distinct "key" values are collected at the
//! front of the slice, sorted runs are built with the buffer scrolling through the data,
//! then runs are combined pairwise per block, with the keys tagging which side each block
//! came from. Inputs with too few distinct values fall back to a rotation-based merge
//! sort, inputs with only one distinct value are already sorted once the keys have been
//! counted.

use std::cmp::Ordering;

mod blocks;
mod combine;
mod driver;
mod insert;
mod keys;
mod lazy;
mod merge;
mod rotate;
mod search;

use driver::{common_sort, ExtScratch, NoScratch};

/// Element count of the scratch allocation used by the static-buffer entry points.
pub const STATIC_EXT_BUFFER_LEN: usize = 512;

/// Sorts `v` stably with O(1) auxiliary memory.
pub fn sort<T: Ord>(v: &mut [T]) {
    common_sort(v, &mut NoScratch, |a, b| a.cmp(b));
}

/// Sorts `v` stably by `cmp` with O(1) auxiliary memory.
///
/// `cmp` must implement a total order. If it does not, the result is some unspecified
/// permutation of the input.
pub fn sort_by<T, F: FnMut(&T, &T) -> Ordering>(v: &mut [T], cmp: F) {
    common_sort(v, &mut NoScratch, cmp);
}

/// Sorts `v` stably using a fixed [`STATIC_EXT_BUFFER_LEN`]-element scratch allocation.
///
/// Stages that outgrow the scratch fall back to the in-place strategy on their own.
pub fn sort_with_static_buffer<T: Ord + Copy>(v: &mut [T]) {
    sort_by_with_static_buffer(v, |a, b| a.cmp(b));
}

/// See [`sort_with_static_buffer`].
pub fn sort_by_with_static_buffer<T: Copy, F: FnMut(&T, &T) -> Ordering>(v: &mut [T], cmp: F) {
    if v.len() < 16 {
        common_sort(v, &mut NoScratch, cmp);
        return;
    }

    let mut buffer = vec![v[0]; STATIC_EXT_BUFFER_LEN];
    common_sort(v, &mut ExtScratch(&mut buffer), cmp);
}

/// Sorts `v` stably using a scratch allocation sized to the input: the smallest power of
/// two whose square covers `v.len()`, enough for every out-of-place stage.
pub fn sort_with_dynamic_buffer<T: Ord + Copy>(v: &mut [T]) {
    sort_by_with_dynamic_buffer(v, |a, b| a.cmp(b));
}

/// See [`sort_with_dynamic_buffer`].
pub fn sort_by_with_dynamic_buffer<T: Copy, F: FnMut(&T, &T) -> Ordering>(v: &mut [T], cmp: F) {
    if v.len() < 16 {
        common_sort(v, &mut NoScratch, cmp);
        return;
    }

    let mut buffer_len = 1;
    while buffer_len * buffer_len < v.len() {
        buffer_len *= 2;
    }

    let mut buffer = vec![v[0]; buffer_len];
    common_sort(v, &mut ExtScratch(&mut buffer), cmp);
}
