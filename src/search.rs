use std::cmp::Ordering::{self, Equal, Greater, Less};

/// Index of the first element in `v[start..start + length]` that is not less than `target`.
pub(crate) fn binary_search_left<T, F: FnMut(&T, &T) -> Ordering>(
    v: &[T],
    start: usize,
    length: usize,
    target: &T,
    cmp: &mut F,
) -> usize {
    let mut left = 0;
    let mut right = length;

    while left < right {
        let middle = left + ((right - left) / 2);
        if cmp(&v[start + middle], target) == Less {
            left = middle + 1;
        } else {
            right = middle;
        }
    }

    left
}

/// Index of the first element in `v[start..start + length]` that is greater than `target`.
pub(crate) fn binary_search_right<T, F: FnMut(&T, &T) -> Ordering>(
    v: &[T],
    start: usize,
    length: usize,
    target: &T,
    cmp: &mut F,
) -> usize {
    let mut left = 0;
    let mut right = length;

    while left < right {
        let middle = left + ((right - left) / 2);
        if cmp(&v[start + middle], target) == Greater {
            right = middle;
        } else {
            left = middle + 1;
        }
    }

    right
}

/// Like [`binary_search_left`], but returns `None` as soon as an element equal to `target`
/// is seen. Used by key collection to reject duplicates without a second probe.
pub(crate) fn binary_search_exclusive<T, F: FnMut(&T, &T) -> Ordering>(
    v: &[T],
    start: usize,
    length: usize,
    target: &T,
    cmp: &mut F,
) -> Option<usize> {
    let mut left = 0;
    let mut right = length;

    while left < right {
        let middle = left + ((right - left) / 2);
        match cmp(&v[start + middle], target) {
            Equal => return None,
            Less => left = middle + 1,
            Greater => right = middle,
        }
    }

    Some(left)
}
