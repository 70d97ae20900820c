//! Hybrid scoring: one weighted score from the three similarity metrics.
//!
//! ```text
//! hybrid = w_dir * directional + w_pos * positional + w_ang * angular
//! ```
//!
//! Every score is reported to the `tracing` facade at `debug` level and to an
//! optional [`ScoreObserver`]; neither changes the returned value.
//!
//! # Example
//!
//! ```
//! use pose_similarity::{compute_hybrid_similarity, KeypointFrame};
//!
//! // 25 BODY_25 joints, 50 flat values
//! let coords: Vec<f64> = (0..50).map(|i| ((i * 37) % 17) as f64 + 1.0).collect();
//! let frame = KeypointFrame::new(coords);
//! let reference = vec![frame.clone(); 5];
//! let live = vec![frame; 8];
//!
//! let score = compute_hybrid_similarity(&reference, &live, None)?;
//! assert!((score - 1.0).abs() < 1e-3);
//! # Ok::<(), pose_similarity::SimilarityError>(())
//! ```

use std::fmt;
use std::sync::Arc;

use crate::alignment::{SequenceAligner, TruncateAligner};
use crate::config::{HybridWeights, SimilarityConfig};
use crate::error::Result;
use crate::frame::KeypointFrame;
use crate::similarity::{SimilarityEngine, SimilarityMethod};
use crate::skeleton::SkeletonLayout;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Per-metric scores behind one hybrid score.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScoreBreakdown {
    /// Directional (cosine) similarity.
    pub directional: f64,
    /// Positional (normalized Euclidean) similarity.
    pub positional: f64,
    /// Angular (joint-angle cosine) similarity.
    pub angular: f64,
    /// Weighted combination of the three.
    pub hybrid: f64,
    /// Number of aligned frames that were compared.
    pub frames: usize,
}

impl ScoreBreakdown {
    /// Score of a single metric.
    #[must_use]
    pub const fn component(&self, method: SimilarityMethod) -> f64 {
        match method {
            SimilarityMethod::Directional => self.directional,
            SimilarityMethod::Positional => self.positional,
            SimilarityMethod::Angular => self.angular,
        }
    }
}

impl fmt::Display for ScoreBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "directional {:.3}, positional {:.3}, angular {:.3}, hybrid {:.3}",
            self.directional, self.positional, self.angular, self.hybrid
        )
    }
}

/// Receives every breakdown a [`HybridScorer`] produces.
pub trait ScoreObserver: Send + Sync {
    fn on_score(&self, breakdown: &ScoreBreakdown);
}

impl<F> ScoreObserver for F
where
    F: Fn(&ScoreBreakdown) + Send + Sync,
{
    fn on_score(&self, breakdown: &ScoreBreakdown) {
        self(breakdown);
    }
}

/// Combines directional, positional and angular similarity into one score.
#[derive(Clone)]
pub struct HybridScorer {
    engine: SimilarityEngine,
    weights: HybridWeights,
    aligner: Arc<dyn SequenceAligner>,
    observer: Option<Arc<dyn ScoreObserver>>,
}

impl fmt::Debug for HybridScorer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HybridScorer")
            .field("engine", &self.engine)
            .field("weights", &self.weights)
            .field("aligner", &self.aligner)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

impl Default for HybridScorer {
    fn default() -> Self {
        Self {
            engine: SimilarityEngine::default(),
            weights: HybridWeights::default(),
            aligner: Arc::new(TruncateAligner),
            observer: None,
        }
    }
}

impl HybridScorer {
    /// Create a scorer with the given weights and the default engine.
    ///
    /// # Errors
    ///
    /// Returns an error if a weight is NaN or infinite.
    pub fn new(weights: HybridWeights) -> Result<Self> {
        weights.validate()?;
        Ok(Self {
            weights,
            ..Self::default()
        })
    }

    /// Create a scorer for a custom layout and configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the layout, configuration or weights are invalid.
    pub fn with_engine(
        layout: SkeletonLayout,
        config: SimilarityConfig,
        weights: HybridWeights,
    ) -> Result<Self> {
        weights.validate()?;
        Ok(Self {
            engine: SimilarityEngine::new(layout, config)?,
            weights,
            ..Self::default()
        })
    }

    /// Replace the alignment strategy.
    #[must_use]
    pub fn with_aligner(mut self, aligner: impl SequenceAligner + 'static) -> Self {
        self.aligner = Arc::new(aligner);
        self
    }

    /// Attach an observer notified after every score.
    #[must_use]
    pub fn with_observer(mut self, observer: impl ScoreObserver + 'static) -> Self {
        self.observer = Some(Arc::new(observer));
        self
    }

    #[must_use]
    pub const fn weights(&self) -> &HybridWeights {
        &self.weights
    }

    #[must_use]
    pub const fn engine(&self) -> &SimilarityEngine {
        &self.engine
    }

    /// Hybrid similarity of a live sequence against a reference.
    ///
    /// # Errors
    ///
    /// See [`Self::score_detailed`].
    pub fn score(&self, reference: &[KeypointFrame], live: &[KeypointFrame]) -> Result<f64> {
        Ok(self.score_detailed(reference, live)?.hybrid)
    }

    /// Hybrid similarity together with the per-metric scores.
    ///
    /// An empty sequence on either side scores `0.0` without computing any
    /// metric.
    ///
    /// # Errors
    ///
    /// Returns an error if the aligned frames do not share one even length.
    pub fn score_detailed(
        &self,
        reference: &[KeypointFrame],
        live: &[KeypointFrame],
    ) -> Result<ScoreBreakdown> {
        if reference.is_empty() || live.is_empty() {
            return Ok(ScoreBreakdown::default());
        }

        let aligned = self.aligner.align(reference, live);
        let (r, l) = (&aligned.reference[..], &aligned.live[..]);

        let directional = self.engine.similarity(r, l, SimilarityMethod::Directional)?;
        let positional = self.engine.similarity(r, l, SimilarityMethod::Positional)?;
        let angular = self.engine.similarity(r, l, SimilarityMethod::Angular)?;

        let w = &self.weights;
        let breakdown = ScoreBreakdown {
            directional,
            positional,
            angular,
            hybrid: w.directional * directional + w.positional * positional + w.angular * angular,
            frames: aligned.len(),
        };

        tracing::debug!(
            directional = breakdown.directional,
            positional = breakdown.positional,
            angular = breakdown.angular,
            hybrid = breakdown.hybrid,
            frames = breakdown.frames,
            "hybrid similarity"
        );
        if let Some(observer) = &self.observer {
            observer.on_score(&breakdown);
        }

        Ok(breakdown)
    }
}

/// Hybrid similarity with the BODY_25 layout and default configuration.
///
/// `weights` defaults to `(0.5, 0.25, 0.25)`.
///
/// # Errors
///
/// Returns an error for invalid weights or mismatched frame dimensions.
pub fn compute_hybrid_similarity(
    reference: &[KeypointFrame],
    live: &[KeypointFrame],
    weights: Option<&HybridWeights>,
) -> Result<f64> {
    Ok(compute_hybrid_similarity_detailed(reference, live, weights)?.hybrid)
}

/// Detailed variant of [`compute_hybrid_similarity`].
///
/// # Errors
///
/// Returns an error for invalid weights or mismatched frame dimensions.
pub fn compute_hybrid_similarity_detailed(
    reference: &[KeypointFrame],
    live: &[KeypointFrame],
    weights: Option<&HybridWeights>,
) -> Result<ScoreBreakdown> {
    let scorer = HybridScorer::new(weights.copied().unwrap_or_default())?;
    scorer.score_detailed(reference, live)
}
