//! Batching helper: split a slice into N roughly-equal contiguous chunks.

/// Split `items` into exactly `n_batches` contiguous slices.
///
/// Batch sizes are `ceil(len / n_batches)`; the last non-empty batch may be
/// smaller, and trailing batches are empty when `n_batches` exceeds the item
/// count. Concatenating the slices in order reconstructs `items` exactly:
/// the batches partition the input with no overlap and no gaps.
///
/// # Panics
///
/// Panics if `n_batches` is zero.
///
/// # Example
///
/// ```rust
/// use sweeprun::batched;
///
/// let items = [1, 2, 3, 4, 5];
/// let batches: Vec<&[i32]> = batched(&items, 2).collect();
/// assert_eq!(batches, vec![&[1, 2, 3][..], &[4, 5][..]]);
/// ```
pub fn batched<T>(items: &[T], n_batches: usize) -> impl Iterator<Item = &[T]> {
    assert!(n_batches > 0, "n_batches must be positive");
    let per_batch = items.len().div_ceil(n_batches);
    (0..n_batches).map(move |i| {
        let lower = (i * per_batch).min(items.len());
        let upper = ((i + 1) * per_batch).min(items.len());
        &items[lower..upper]
    })
}
