//! Slice plumbing for event vectors and variable-id lists.

/// Concatenate two slices into a freshly allocated vector.
pub fn concat<T: Copy>(a: &[T], b: &[T]) -> Vec<T> {
    let mut ab = Vec::with_capacity(a.len() + b.len());
    ab.extend_from_slice(a);
    ab.extend_from_slice(b);
    ab
}

/// Split a slice in two; `at` is the index of the first element of the
/// second part.
pub fn split<T>(slice: &[T], at: usize) -> (&[T], &[T]) {
    slice.split_at(at)
}
