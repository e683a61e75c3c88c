/// Swaps the block at `a` with the equally sized block at `b`.
pub(crate) fn swap_blocks<T>(v: &mut [T], a: usize, b: usize, block_len: usize) {
    for i in 0..block_len {
        v.swap(a + i, b + i);
    }
}

/// Moves the element at `start` forwards past the `length` elements after it.
pub(crate) fn insert_forwards<T>(v: &mut [T], start: usize, length: usize) {
    for i in start..start + length {
        v.swap(i, i + 1);
    }
}

/// Moves the element at `start + length` back to `start`, shifting the rest up by one.
pub(crate) fn insert_backwards<T>(v: &mut [T], start: usize, length: usize) {
    for i in (start..start + length).rev() {
        v.swap(i, i + 1);
    }
}

/// Rotates `v[start..start + left_len + right_len]` left by `left_len` positions using
/// block swaps. Once either side is down to a single element one shift finishes the job,
/// zero-length sides are no-ops.
pub(crate) fn rotate<T>(v: &mut [T], mut start: usize, mut left_len: usize, mut right_len: usize) {
    while left_len > 1 && right_len > 1 {
        if left_len <= right_len {
            swap_blocks(v, start, start + left_len, left_len);
            start += left_len;
            right_len -= left_len;
        } else {
            swap_blocks(
                v,
                start + left_len - right_len,
                start + left_len,
                right_len,
            );
            left_len -= right_len;
        }
    }

    if left_len == 1 {
        insert_forwards(v, start, right_len);
    } else if right_len == 1 {
        insert_backwards(v, start, left_len);
    }
}
