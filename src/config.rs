//! Configuration for similarity scoring.
//!
//! [`SimilarityConfig`] holds the numeric tunables of the similarity engine
//! and [`HybridWeights`] the weighting of the three metrics in the hybrid
//! score.
//!
//! # Example
//!
//! ```
//! use pose_similarity::{HybridWeights, SimilarityConfig};
//!
//! let config = SimilarityConfig::default().with_positional_scale(5.0);
//! assert!(config.validate().is_ok());
//!
//! let weights = HybridWeights::new(2.0, 1.0, 1.0).normalized();
//! assert!((weights.sum() - 1.0).abs() < 1e-12);
//! ```

use crate::error::{Result, SimilarityError};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Numeric parameters of the similarity engine.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SimilarityConfig {
    /// Additive guard on every norm denominator.
    pub epsilon: f64,

    /// Divisor mapping mean normalized distance to positional similarity:
    /// `max(0, 1 - distance / positional_scale)`.
    /// Smaller values make the positional metric stricter.
    pub positional_scale: f64,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            epsilon: 1e-8,
            positional_scale: 10.0,
        }
    }
}

impl SimilarityConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `epsilon` or `positional_scale` is not a positive
    /// finite number.
    pub fn validate(&self) -> Result<()> {
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(SimilarityError::invalid_config(
                "epsilon must be positive and finite",
            ));
        }
        if !(self.positional_scale.is_finite() && self.positional_scale > 0.0) {
            return Err(SimilarityError::invalid_config(
                "positional_scale must be positive and finite",
            ));
        }
        Ok(())
    }

    /// Set the denominator epsilon.
    #[must_use]
    pub const fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Set the positional sensitivity divisor.
    #[must_use]
    pub const fn with_positional_scale(mut self, scale: f64) -> Self {
        self.positional_scale = scale;
        self
    }
}

/// Weights of the three metrics in the hybrid score.
///
/// Weights need not sum to 1 and may be negative; the hybrid score is
/// bounded by [`Self::sum`] when all weights are non-negative.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HybridWeights {
    /// Weight for directional (cosine) similarity.
    pub directional: f64,
    /// Weight for positional (normalized Euclidean) similarity.
    pub positional: f64,
    /// Weight for angular (joint-angle cosine) similarity.
    pub angular: f64,
}

impl Default for HybridWeights {
    fn default() -> Self {
        Self {
            directional: 0.5,
            positional: 0.25,
            angular: 0.25,
        }
    }
}

impl HybridWeights {
    #[must_use]
    pub const fn new(directional: f64, positional: f64, angular: f64) -> Self {
        Self {
            directional,
            positional,
            angular,
        }
    }

    /// Sum of the three weights.
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.directional + self.positional + self.angular
    }

    /// Rescale so the weights sum to 1.
    ///
    /// All-zero weights are returned unchanged.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let total = self.sum();
        if total == 0.0 {
            return *self;
        }
        Self::new(
            self.directional / total,
            self.positional / total,
            self.angular / total,
        )
    }

    /// Validate the weights.
    ///
    /// # Errors
    ///
    /// Returns an error if any weight is NaN or infinite.
    pub fn validate(&self) -> Result<()> {
        let named = [
            ("directional", self.directional),
            ("positional", self.positional),
            ("angular", self.angular),
        ];
        for (name, w) in named {
            if !w.is_finite() {
                return Err(SimilarityError::invalid_config(format!(
                    "{name} weight must be finite, got {w}"
                )));
            }
        }
        Ok(())
    }
}

impl From<(f64, f64, f64)> for HybridWeights {
    fn from((directional, positional, angular): (f64, f64, f64)) -> Self {
        Self::new(directional, positional, angular)
    }
}
