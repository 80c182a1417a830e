//! Vector math shared by the embedder and the vector index

/// Euclidean length of a vector
pub fn l2_norm(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

/// Scale a vector to unit length in place
///
/// A zero vector is left untouched; it is a valid (degenerate) embedding
/// whose inner product with anything is 0.
pub fn normalize_l2(v: &mut [f32]) {
    let norm = l2_norm(v);

    if norm == 0.0 || !norm.is_finite() {
        return;
    }

    for x in v.iter_mut() {
        *x /= norm;
    }
}

/// Inner product of two vectors; equals cosine similarity for unit vectors
///
/// Returns 0.0 when the lengths differ.
pub fn inner_product(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}
