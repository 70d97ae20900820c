//! Mathematical utilities for pose similarity.
//!
//! This module provides:
//! - [`linalg`]: flat-vector and 2D segment products, norms and angles
//! - [`normalize`]: per-frame centering and scale normalization

pub mod linalg;
pub mod normalize;

pub use linalg::{cosine, dot, euclidean_distance, norm, segment_angle, segment_cosine};
pub use normalize::center_and_scale;
