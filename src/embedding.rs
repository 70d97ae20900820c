//! Single-frame pose descriptors.
//!
//! [`PoseEmbedder`] turns one [`KeypointFrame`] into two compact vectors:
//!
//! | Descriptor | Length (BODY_25) | Content |
//! |------------|------------------|---------|
//! | [`LimbEmbedding`] | 14 | `to - from` per limb pair, zero if a joint is missing |
//! | [`JointAngles`] | 4 | interior angle in `[0, π]` at each articulation vertex |
//!
//! An all-zero frame ("no pose detected") embeds to a zero vector of the same
//! length as any other limb embedding from the same layout.

use nalgebra::Vector2;

use crate::frame::KeypointFrame;
use crate::math::segment_angle;
use crate::skeleton::{JointTriplet, SkeletonLayout};

/// Limb-direction embedding: concatenated `(dx, dy)` per limb pair.
#[derive(Debug, Clone, PartialEq)]
pub struct LimbEmbedding {
    values: Vec<f64>,
}

impl LimbEmbedding {
    /// Flat `[dx0, dy0, dx1, dy1, ...]` values.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<f64> {
        self.values
    }

    /// Displacement of the `i`-th limb pair.
    #[must_use]
    pub fn limb(&self, i: usize) -> Option<Vector2<f64>> {
        let xy = self.values.get(i * 2..i * 2 + 2)?;
        Some(Vector2::new(xy[0], xy[1]))
    }

    #[must_use]
    pub fn dim(&self) -> usize {
        self.values.len()
    }

    /// Whether this is the "no pose detected" sentinel (all zeros).
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.values.iter().all(|&v| v == 0.0)
    }
}

/// Joint-angle vector in radians, one entry per articulation triplet.
#[derive(Debug, Clone, PartialEq)]
pub struct JointAngles {
    values: Vec<f64>,
}

impl JointAngles {
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<f64> {
        self.values
    }

    /// Angles converted to degrees.
    #[must_use]
    pub fn to_degrees(&self) -> Vec<f64> {
        self.values.iter().map(|a| a.to_degrees()).collect()
    }
}

/// Extracts limb-direction and joint-angle descriptors from single frames.
#[derive(Debug, Clone, Default)]
pub struct PoseEmbedder {
    layout: SkeletonLayout,
}

impl PoseEmbedder {
    #[must_use]
    pub fn new(layout: SkeletonLayout) -> Self {
        Self { layout }
    }

    #[must_use]
    pub const fn layout(&self) -> &SkeletonLayout {
        &self.layout
    }

    /// Output length of [`Self::embed_limb_directions`].
    #[must_use]
    pub fn limb_dim(&self) -> usize {
        self.layout.limb_embedding_dim()
    }

    /// Output length of [`Self::embed_joint_angles`].
    #[must_use]
    pub fn angle_dim(&self) -> usize {
        self.layout.articulation_triplets.len()
    }

    /// Limb-direction embedding of one frame.
    ///
    /// For each limb pair `(a, b)` the output holds `point[b] - point[a]`, or
    /// `(0, 0)` when either joint is missing or outside the frame. An all-zero
    /// frame maps to the zero sentinel of length [`Self::limb_dim`].
    #[must_use]
    pub fn embed_limb_directions(&self, frame: &KeypointFrame) -> LimbEmbedding {
        if frame.is_all_missing() {
            return LimbEmbedding {
                values: vec![0.0; self.limb_dim()],
            };
        }

        let values = self
            .layout
            .limb_pairs
            .iter()
            .flat_map(|pair| {
                let d = match (frame.detected(pair.from), frame.detected(pair.to)) {
                    (Some(a), Some(b)) => b - a,
                    _ => Vector2::zeros(),
                };
                [d.x, d.y]
            })
            .collect();

        LimbEmbedding { values }
    }

    /// Interior angle at each articulation vertex, in radians.
    ///
    /// An angle is `0.0` when a joint of its triplet is missing or either
    /// segment has zero length. A frame too short for the layout yields all
    /// zeros.
    #[must_use]
    pub fn embed_joint_angles(&self, frame: &KeypointFrame) -> JointAngles {
        let triplets = &self.layout.articulation_triplets;
        let needed = triplets.iter().map(JointTriplet::max_joint).max();

        if needed.is_some_and(|j| j >= frame.num_joints()) {
            return JointAngles {
                values: vec![0.0; triplets.len()],
            };
        }

        let values = triplets
            .iter()
            .map(|t| interior_angle(frame, t).unwrap_or(0.0))
            .collect();

        JointAngles { values }
    }
}

fn interior_angle(frame: &KeypointFrame, t: &JointTriplet) -> Option<f64> {
    let first = frame.detected(t.first)?;
    let vertex = frame.detected(t.vertex)?;
    let last = frame.detected(t.last)?;
    Some(segment_angle(&(first - vertex), &(last - vertex)))
}
