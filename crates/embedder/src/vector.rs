//! Vector math for embedding similarity.

/// Cosine similarity between two embedding vectors.
///
/// Returns `dot(a, b) / (|a| * |b|)`, in [-1, 1] for non-zero vectors.
/// A zero vector yields 0.0 rather than a division by zero.
///
/// Mismatched lengths are a programming defect, not a runtime condition:
/// debug builds assert, release builds return 0.0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(
        a.len(),
        b.len(),
        "embedding dimensions must match ({} vs {})",
        a.len(),
        b.len()
    );
    if a.len() != b.len() {
        return 0.0;
    }

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}
