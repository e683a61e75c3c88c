use std::cmp::Ordering;

use crate::rotate::{insert_backwards, rotate};
use crate::search::binary_search_exclusive;

/// Gathers up to `ideal_keys` distinct elements into a sorted prefix of
/// `v[start..start + length]` and returns how many were found.
///
/// The keys travel with the scan: whenever a new distinct element is found, the key block
/// is rotated up next to it and the element is shifted into its sorted slot. One final
/// rotation moves the whole block to the front. Relative order of the non-key elements is
/// preserved throughout.
pub(crate) fn collect_keys<T, F: FnMut(&T, &T) -> Ordering>(
    v: &mut [T],
    start: usize,
    length: usize,
    ideal_keys: usize,
    cmp: &mut F,
) -> usize {
    let mut keys_found = 1;
    let mut first_key = 0;
    let mut current_key = 1;

    while current_key < length && keys_found < ideal_keys {
        let found = binary_search_exclusive(
            v,
            start + first_key,
            keys_found,
            &v[start + current_key],
            cmp,
        );

        if let Some(insert_pos) = found {
            rotate(
                v,
                start + first_key,
                keys_found,
                current_key - (first_key + keys_found),
            );
            first_key = current_key - keys_found;

            if insert_pos != keys_found {
                insert_backwards(v, start + first_key + insert_pos, keys_found - insert_pos);
            }

            keys_found += 1;
        }

        current_key += 1;
    }

    rotate(v, start, first_key, keys_found);
    keys_found
}
