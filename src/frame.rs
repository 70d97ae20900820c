//! Keypoint frames: one time sample of flat 2D joint coordinates.
//!
//! A frame stores `[x0, y0, x1, y1, ...]`. A joint whose two coordinates are
//! both exactly zero was not detected; it is a sentinel, not a position at
//! the origin.

use nalgebra::Vector2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One frame of flat 2D keypoints.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct KeypointFrame {
    coords: Vec<f64>,
}

impl KeypointFrame {
    /// Wrap flat `[x0, y0, x1, y1, ...]` coordinates.
    #[must_use]
    pub fn new(coords: Vec<f64>) -> Self {
        Self { coords }
    }

    /// Build a frame from `(x, y)` points.
    #[must_use]
    pub fn from_points(points: &[[f64; 2]]) -> Self {
        Self {
            coords: points.iter().flatten().copied().collect(),
        }
    }

    /// All-zero frame with `num_joints` joints (nothing detected).
    #[must_use]
    pub fn missing(num_joints: usize) -> Self {
        Self {
            coords: vec![0.0; num_joints * 2],
        }
    }

    /// Flat coordinates.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.coords
    }

    /// Number of flat values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Number of complete 2D joints.
    #[must_use]
    pub fn num_joints(&self) -> usize {
        self.coords.len() / 2
    }

    /// Raw position of a joint, `None` if the index is outside the frame.
    ///
    /// Missing joints are returned as the zero vector.
    #[must_use]
    pub fn point(&self, joint: usize) -> Option<Vector2<f64>> {
        let i = joint * 2;
        let xy = self.coords.get(i..i + 2)?;
        Some(Vector2::new(xy[0], xy[1]))
    }

    /// Position of a detected joint; `None` if missing or out of range.
    #[must_use]
    pub fn detected(&self, joint: usize) -> Option<Vector2<f64>> {
        self.point(joint).filter(|p| !is_missing(p))
    }

    /// Whether every coordinate is exactly zero.
    #[must_use]
    pub fn is_all_missing(&self) -> bool {
        self.coords.iter().all(|&v| v == 0.0)
    }

    /// Iterate over the frame's complete 2D points.
    pub fn points(&self) -> impl Iterator<Item = Vector2<f64>> + '_ {
        self.coords
            .chunks_exact(2)
            .map(|xy| Vector2::new(xy[0], xy[1]))
    }
}

impl From<Vec<f64>> for KeypointFrame {
    fn from(coords: Vec<f64>) -> Self {
        Self::new(coords)
    }
}

impl AsRef<[f64]> for KeypointFrame {
    fn as_ref(&self) -> &[f64] {
        &self.coords
    }
}

/// Sentinel test for a single 2D point.
#[inline]
#[must_use]
pub fn is_missing(p: &Vector2<f64>) -> bool {
    p.x == 0.0 && p.y == 0.0
}
