//! Pose Similarity Library
//!
//! Scores how closely a live motion sequence matches a reference motion
//! sequence, given per-frame 2D skeletal keypoints (OpenPose BODY_25 by
//! default).
//!
//! # Features
//!
//! - **Pose embedding**: limb-direction vectors and joint angles per frame
//! - **Three metrics**: directional (cosine), positional (normalized
//!   Euclidean) and angular (joint-angle cosine agreement), each in `[0, 1]`
//! - **Hybrid score**: weighted combination with an observer hook
//! - **Live sessions**: rolling live buffer with feedback grades
//! - **OpenPose loading** (feature `openpose`): per-frame JSON records
//!
//! # Quick Start
//!
//! ```
//! use pose_similarity::{HybridScorer, HybridWeights, KeypointFrame};
//!
//! let coords: Vec<f64> = (0..50).map(|i| ((i * 37) % 17) as f64 + 1.0).collect();
//! let reference = vec![KeypointFrame::new(coords.clone()); 10];
//! let live = vec![KeypointFrame::new(coords); 6];
//!
//! let scorer = HybridScorer::new(HybridWeights::default())?;
//! let breakdown = scorer.score_detailed(&reference, &live)?;
//! assert_eq!(breakdown.frames, 6);
//! assert!(breakdown.hybrid > 0.99);
//! # Ok::<(), pose_similarity::SimilarityError>(())
//! ```
//!
//! # Sentinel zero
//!
//! A joint whose `x` and `y` are both `0.0` was not detected. Degenerate
//! input (missing joints, all-zero frames, empty sequences) never fails: it
//! resolves to zero vectors, zero angles or a `0.0` score.

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::cast_precision_loss)]

pub mod alignment;
pub mod config;
pub mod embedding;
pub mod error;
pub mod feedback;
pub mod frame;
pub mod hybrid;
pub mod math;
#[cfg(feature = "openpose")]
pub mod openpose;
pub mod similarity;
pub mod skeleton;
pub mod streaming;

// Re-exports for convenient access
pub use alignment::{AlignedPair, SequenceAligner, TruncateAligner};
pub use config::{HybridWeights, SimilarityConfig};
pub use embedding::{JointAngles, LimbEmbedding, PoseEmbedder};
pub use error::{Result, SimilarityError};
pub use feedback::{FeedbackGrade, FeedbackThresholds};
pub use frame::KeypointFrame;
pub use hybrid::{
    compute_hybrid_similarity, compute_hybrid_similarity_detailed, HybridScorer, ScoreBreakdown,
    ScoreObserver,
};
#[cfg(feature = "openpose")]
pub use openpose::{load_sequence, parse_keypoint_record};
pub use similarity::{compute_sequence_similarity, SimilarityEngine, SimilarityMethod};
pub use skeleton::{JointPair, JointTriplet, SkeletonLayout};
pub use streaming::LiveSession;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Joints per frame in the default BODY_25 layout.
pub const BODY25_JOINTS: usize = skeleton::body25::NUM_JOINTS;

/// Flat values per frame in the default BODY_25 layout.
pub const BODY25_FRAME_LEN: usize = BODY25_JOINTS * 2;

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn sway(n: usize) -> Vec<KeypointFrame> {
        (0..n)
            .map(|i| {
                let angle = 2.0 * PI * i as f64 / n as f64;
                let coords = (0..BODY25_JOINTS)
                    .flat_map(|j| {
                        let j = j as f64;
                        [200.0 + 12.0 * j + 6.0 * (angle + j).cos(), 300.0 + 9.0 * j]
                    })
                    .collect();
                KeypointFrame::new(coords)
            })
            .collect()
    }

    #[test]
    fn test_full_pipeline() {
        let reference = sway(30);
        let live = reference[..20].to_vec();

        let embedder = PoseEmbedder::default();
        let emb = embedder.embed_limb_directions(&live[0]);
        assert_eq!(emb.dim(), 14);
        assert_eq!(embedder.embed_joint_angles(&live[0]).as_slice().len(), 4);

        let breakdown = compute_hybrid_similarity_detailed(&reference, &live, None).unwrap();
        assert_eq!(breakdown.frames, 20);
        for m in SimilarityMethod::ALL {
            let c = breakdown.component(m);
            assert!((0.0..=1.0).contains(&c), "{m} out of range: {c}");
        }
        assert_relative_eq!(breakdown.directional, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_frame_len_constants() {
        assert_eq!(BODY25_FRAME_LEN, SkeletonLayout::body25().frame_len());
    }
}
