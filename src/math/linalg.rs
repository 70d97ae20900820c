//! Vector helpers for flat coordinate vectors and 2D joint segments.
//!
//! Every division by a norm is guarded by an additive epsilon instead of a
//! branch, so noisy or empty input yields a finite value.

use nalgebra::Vector2;

/// Dot product of two flat vectors over their common length.
#[must_use]
#[inline]
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Euclidean norm of a flat vector.
#[must_use]
#[inline]
pub fn norm(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}

/// Cosine of two flat vectors: `a·b / (|a||b| + eps)`.
///
/// Zero vectors give `0.0`.
#[must_use]
pub fn cosine(a: &[f64], b: &[f64], eps: f64) -> f64 {
    dot(a, b) / (norm(a) * norm(b) + eps)
}

/// Euclidean distance between two flat vectors over their common length.
#[must_use]
pub fn euclidean_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}

/// Epsilon-guarded cosine of two 2D segments, clipped to `[-1, 1]`.
#[must_use]
pub fn segment_cosine(u: &Vector2<f64>, v: &Vector2<f64>, eps: f64) -> f64 {
    (u.dot(v) / (u.norm() * v.norm() + eps)).clamp(-1.0, 1.0)
}

/// Angle in radians between two 2D segments, in `[0, π]`.
///
/// A zero-length segment has no direction; the angle is reported as `0.0`.
#[must_use]
pub fn segment_angle(u: &Vector2<f64>, v: &Vector2<f64>) -> f64 {
    let (nu, nv) = (u.norm(), v.norm());
    if nu == 0.0 || nv == 0.0 {
        return 0.0;
    }
    (u.dot(v) / (nu * nv)).clamp(-1.0, 1.0).acos()
}
