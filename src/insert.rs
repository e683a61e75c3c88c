use std::cmp::Ordering::{self, Greater};

/// Stable insertion sort of `v[start..start + length]`. Small regions only, the driver
/// uses it for inputs below the block sort threshold and for the key prefix.
pub(crate) fn insertion_sort<T, F: FnMut(&T, &T) -> Ordering>(
    v: &mut [T],
    start: usize,
    length: usize,
    cmp: &mut F,
) {
    for item in 1..length {
        let mut right = start + item;

        while right > start && cmp(&v[right - 1], &v[right]) == Greater {
            v.swap(right - 1, right);
            right -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorts_region_only() {
        let mut v = [9, 5, 3, 4, 1, 0];
        insertion_sort(&mut v, 1, 4, &mut |a: &i32, b: &i32| a.cmp(b));
        assert_eq!(v, [9, 1, 3, 4, 5, 0]);
    }

    #[test]
    fn stable_on_ties() {
        let mut v = [(2, 'a'), (1, 'b'), (2, 'c'), (1, 'd')];
        insertion_sort(&mut v, 0, 4, &mut |a: &(i32, char), b: &(i32, char)| {
            a.0.cmp(&b.0)
        });
        assert_eq!(v, [(1, 'b'), (1, 'd'), (2, 'a'), (2, 'c')]);
    }

    #[test]
    fn empty_and_single() {
        let mut v: [i32; 0] = [];
        insertion_sort(&mut v, 0, 0, &mut |a: &i32, b: &i32| a.cmp(b));

        let mut v = [3];
        insertion_sort(&mut v, 0, 1, &mut |a: &i32, b: &i32| a.cmp(b));
        assert_eq!(v, [3]);
    }
}
