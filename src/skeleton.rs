//! Skeleton layouts: joint indices and the joint tables the embedder and the
//! similarity engine read.
//!
//! Tables are plain data carried by [`SkeletonLayout`] so alternate skeletons
//! can be plugged in without touching the scoring code.
//!
//! # BODY_25 joints used by the default tables
//!
//! | Index | Joint |
//! |-------|-------|
//! | 1 | Neck |
//! | 2 / 5 | Right / left shoulder |
//! | 3 / 6 | Right / left elbow |
//! | 4 / 7 | Right / left wrist |
//! | 8 | Mid hip |
//! | 9 / 12 | Right / left hip |
//! | 11 | Right ankle |

use crate::error::{Result, SimilarityError};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// BODY_25 joint indices.
pub mod body25 {
    pub const NOSE: usize = 0;
    pub const NECK: usize = 1;
    pub const RIGHT_SHOULDER: usize = 2;
    pub const RIGHT_ELBOW: usize = 3;
    pub const RIGHT_WRIST: usize = 4;
    pub const LEFT_SHOULDER: usize = 5;
    pub const LEFT_ELBOW: usize = 6;
    pub const LEFT_WRIST: usize = 7;
    pub const MID_HIP: usize = 8;
    pub const RIGHT_HIP: usize = 9;
    pub const RIGHT_KNEE: usize = 10;
    pub const RIGHT_ANKLE: usize = 11;
    pub const LEFT_HIP: usize = 12;
    pub const LEFT_KNEE: usize = 13;
    pub const LEFT_ANKLE: usize = 14;

    /// Number of joints in the BODY_25 layout.
    pub const NUM_JOINTS: usize = 25;
}

/// Directed limb segment `from -> to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct JointPair {
    pub from: usize,
    pub to: usize,
}

impl JointPair {
    #[must_use]
    pub const fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }
}

/// Three joints `first - vertex - last`; the angle is measured at `vertex`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct JointTriplet {
    pub first: usize,
    pub vertex: usize,
    pub last: usize,
}

impl JointTriplet {
    #[must_use]
    pub const fn new(first: usize, vertex: usize, last: usize) -> Self {
        Self {
            first,
            vertex,
            last,
        }
    }

    /// Largest joint index referenced by the triplet.
    #[must_use]
    pub fn max_joint(&self) -> usize {
        self.first.max(self.vertex).max(self.last)
    }
}

/// Joint tables for one skeleton layout.
///
/// - `limb_pairs`: segments of the limb-direction embedding.
/// - `articulation_triplets`: joints whose angles the embedder reports.
/// - `posture_triplets`: joints whose angle cosines drive angular similarity.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SkeletonLayout {
    /// Joints per frame (a frame holds `2 * num_joints` values).
    pub num_joints: usize,

    /// Limb segments, in embedding order.
    pub limb_pairs: Vec<JointPair>,

    /// Articulation angle triplets, in output order.
    pub articulation_triplets: Vec<JointTriplet>,

    /// Posture triplets for the angular metric, in output order.
    pub posture_triplets: Vec<JointTriplet>,
}

impl Default for SkeletonLayout {
    fn default() -> Self {
        Self::body25()
    }
}

impl SkeletonLayout {
    /// OpenPose BODY_25 layout.
    ///
    /// The left-side posture entries use the right wrist and the right ankle
    /// as vertices, so feedback scores stay comparable with existing
    /// recordings. Pass a custom table through
    /// [`SkeletonLayout::with_posture_triplets`] to score strictly mirrored
    /// shoulder and hip angles.
    #[must_use]
    pub fn body25() -> Self {
        use body25::*;

        Self {
            num_joints: NUM_JOINTS,
            limb_pairs: vec![
                JointPair::new(RIGHT_SHOULDER, RIGHT_ELBOW),
                JointPair::new(RIGHT_ELBOW, RIGHT_WRIST),
                JointPair::new(LEFT_SHOULDER, LEFT_ELBOW),
                JointPair::new(LEFT_ELBOW, LEFT_WRIST),
                JointPair::new(NECK, RIGHT_SHOULDER),
                JointPair::new(NECK, LEFT_SHOULDER),
                JointPair::new(NECK, MID_HIP),
            ],
            articulation_triplets: vec![
                JointTriplet::new(NECK, RIGHT_SHOULDER, RIGHT_ELBOW),
                JointTriplet::new(RIGHT_SHOULDER, RIGHT_ELBOW, RIGHT_WRIST),
                JointTriplet::new(NECK, LEFT_SHOULDER, LEFT_ELBOW),
                JointTriplet::new(LEFT_SHOULDER, LEFT_ELBOW, LEFT_WRIST),
            ],
            posture_triplets: vec![
                JointTriplet::new(RIGHT_SHOULDER, NECK, MID_HIP),
                JointTriplet::new(LEFT_SHOULDER, RIGHT_WRIST, MID_HIP),
                JointTriplet::new(RIGHT_HIP, MID_HIP, NECK),
                JointTriplet::new(LEFT_HIP, RIGHT_ANKLE, NECK),
            ],
        }
    }

    /// Number of values in one flat frame.
    #[must_use]
    pub const fn frame_len(&self) -> usize {
        self.num_joints * 2
    }

    /// Dimension of the limb-direction embedding.
    #[must_use]
    pub fn limb_embedding_dim(&self) -> usize {
        self.limb_pairs.len() * 2
    }

    /// Replace the limb pair table.
    #[must_use]
    pub fn with_limb_pairs(mut self, pairs: Vec<JointPair>) -> Self {
        self.limb_pairs = pairs;
        self
    }

    /// Replace the articulation triplet table.
    #[must_use]
    pub fn with_articulation_triplets(mut self, triplets: Vec<JointTriplet>) -> Self {
        self.articulation_triplets = triplets;
        self
    }

    /// Replace the posture triplet table.
    #[must_use]
    pub fn with_posture_triplets(mut self, triplets: Vec<JointTriplet>) -> Self {
        self.posture_triplets = triplets;
        self
    }

    /// Validate the layout.
    ///
    /// # Errors
    ///
    /// Returns an error if the layout has no joints or a table references a
    /// joint index outside `num_joints`.
    pub fn validate(&self) -> Result<()> {
        if self.num_joints == 0 {
            return Err(SimilarityError::invalid_config(
                "num_joints must be at least 1",
            ));
        }

        let n = self.num_joints;
        if let Some(pair) = self.limb_pairs.iter().find(|p| p.from >= n || p.to >= n) {
            return Err(SimilarityError::invalid_config(format!(
                "limb pair {}->{} outside {n} joints",
                pair.from, pair.to
            )));
        }

        let triplets = self
            .articulation_triplets
            .iter()
            .chain(self.posture_triplets.iter());
        for t in triplets {
            if t.max_joint() >= n {
                return Err(SimilarityError::invalid_config(format!(
                    "triplet ({}, {}, {}) outside {n} joints",
                    t.first, t.vertex, t.last
                )));
            }
        }

        Ok(())
    }
}
