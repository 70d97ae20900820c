//! Sequence similarity metrics over raw keypoint frames.
//!
//! Every metric truncates both sequences to the shorter length first and
//! returns a value in `[0, 1]`:
//!
//! | Method | Compares | Mapping |
//! |--------|----------|---------|
//! | [`SimilarityMethod::Directional`] | whole sequences flattened to one vector | cosine, floored at 0 |
//! | [`SimilarityMethod::Positional`] | time-aligned frames, centered and scaled | `1 - mean_distance / scale` |
//! | [`SimilarityMethod::Angular`] | posture-cosine vectors of *all* frame pairs | mean pairwise cosine |
//!
//! The angular metric averages over the full reference × live matrix rather
//! than over time-aligned pairs only.

use std::fmt;
use std::str::FromStr;

use crate::config::SimilarityConfig;
use crate::error::{Result, SimilarityError};
use crate::frame::KeypointFrame;
use crate::math::{center_and_scale, cosine, dot, euclidean_distance, norm, segment_cosine};
use crate::skeleton::SkeletonLayout;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Similarity metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SimilarityMethod {
    /// Cosine between the flattened sequences.
    Directional,
    /// Normalized per-frame Euclidean distance.
    Positional,
    /// Cross-frame agreement of joint-angle cosines.
    Angular,
}

impl SimilarityMethod {
    /// All methods, in hybrid order.
    pub const ALL: [Self; 3] = [Self::Directional, Self::Positional, Self::Angular];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Directional => "directional",
            Self::Positional => "positional",
            Self::Angular => "angular",
        }
    }
}

impl fmt::Display for SimilarityMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SimilarityMethod {
    type Err = SimilarityError;

    /// Accepts `directional`/`cosine`, `positional`/`euclidean` and
    /// `angular`/`angle`, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "directional" | "cosine" => Ok(Self::Directional),
            "positional" | "euclidean" => Ok(Self::Positional),
            "angular" | "angle" => Ok(Self::Angular),
            _ => Err(SimilarityError::invalid_method(s)),
        }
    }
}

/// Computes sequence similarity under one metric at a time.
///
/// The engine holds only read-only configuration, so one instance can be
/// shared across threads.
#[derive(Debug, Clone, Default)]
pub struct SimilarityEngine {
    layout: SkeletonLayout,
    config: SimilarityConfig,
}

impl SimilarityEngine {
    /// Create an engine after validating the layout and configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if either fails validation.
    pub fn new(layout: SkeletonLayout, config: SimilarityConfig) -> Result<Self> {
        layout.validate()?;
        config.validate()?;
        Ok(Self { layout, config })
    }

    #[must_use]
    pub const fn layout(&self) -> &SkeletonLayout {
        &self.layout
    }

    #[must_use]
    pub const fn config(&self) -> &SimilarityConfig {
        &self.config
    }

    /// Similarity of two sequences under `method`, in `[0, 1]`.
    ///
    /// Sequences are truncated to the shorter length. An empty sequence on
    /// either side scores `0.0`.
    ///
    /// # Errors
    ///
    /// Returns [`SimilarityError::FrameDimension`] if the compared frames do
    /// not all have the same even length.
    pub fn similarity(
        &self,
        seq_a: &[KeypointFrame],
        seq_b: &[KeypointFrame],
        method: SimilarityMethod,
    ) -> Result<f64> {
        let n = seq_a.len().min(seq_b.len());
        let (a, b) = (&seq_a[..n], &seq_b[..n]);
        if n == 0 {
            return Ok(0.0);
        }
        check_frame_dims(a, b, self.layout.frame_len())?;

        let score = match method {
            SimilarityMethod::Directional => self.directional(a, b),
            SimilarityMethod::Positional => self.positional(a, b),
            SimilarityMethod::Angular => self.angular(a, b),
        };

        Ok(score.clamp(0.0, 1.0))
    }

    /// [`Self::similarity`] with the method given by name.
    ///
    /// # Errors
    ///
    /// Returns [`SimilarityError::InvalidMethod`] for an unrecognised name.
    pub fn similarity_by_name(
        &self,
        seq_a: &[KeypointFrame],
        seq_b: &[KeypointFrame],
        method: &str,
    ) -> Result<f64> {
        self.similarity(seq_a, seq_b, method.parse()?)
    }

    fn directional(&self, a: &[KeypointFrame], b: &[KeypointFrame]) -> f64 {
        let flat_a = flatten(a);
        let flat_b = flatten(b);
        cosine(&flat_a, &flat_b, self.config.epsilon).max(0.0)
    }

    fn positional(&self, a: &[KeypointFrame], b: &[KeypointFrame]) -> f64 {
        let eps = self.config.epsilon;
        let total: f64 = a
            .iter()
            .zip(b.iter())
            .map(|(fa, fb)| {
                euclidean_distance(
                    &center_and_scale(fa.as_slice(), eps),
                    &center_and_scale(fb.as_slice(), eps),
                )
            })
            .sum();
        let mean_distance = total / a.len() as f64;

        (1.0 - mean_distance / self.config.positional_scale).max(0.0)
    }

    fn angular(&self, a: &[KeypointFrame], b: &[KeypointFrame]) -> f64 {
        let eps = self.config.epsilon;
        let ref_vecs: Vec<Vec<f64>> = a.iter().map(|f| self.posture_cosines(f)).collect();
        let live_vecs: Vec<Vec<f64>> = b.iter().map(|f| self.posture_cosines(f)).collect();
        let live_norms: Vec<f64> = live_vecs.iter().map(|v| norm(v)).collect();

        let mut total = 0.0;
        for r in &ref_vecs {
            let r_norm = norm(r);
            for (l, l_norm) in live_vecs.iter().zip(live_norms.iter()) {
                total += dot(r, l) / (r_norm * l_norm + eps);
            }
        }

        let mean = total / (ref_vecs.len() * live_vecs.len()) as f64;
        mean.max(0.0)
    }

    /// Clipped cosine of the angle at each posture vertex.
    ///
    /// Raw joint positions are used: the sentinel zero is not filtered here,
    /// so a missing joint contributes its origin position. Triplets outside
    /// the frame contribute `0.0`.
    #[must_use]
    pub fn posture_cosines(&self, frame: &KeypointFrame) -> Vec<f64> {
        let eps = self.config.epsilon;
        self.layout
            .posture_triplets
            .iter()
            .map(|t| {
                match (frame.point(t.first), frame.point(t.vertex), frame.point(t.last)) {
                    (Some(first), Some(vertex), Some(last)) => {
                        segment_cosine(&(first - vertex), &(last - vertex), eps)
                    }
                    _ => 0.0,
                }
            })
            .collect()
    }
}

/// Similarity of two sequences using the BODY_25 layout and default config.
///
/// # Errors
///
/// See [`SimilarityEngine::similarity`].
pub fn compute_sequence_similarity(
    seq_a: &[KeypointFrame],
    seq_b: &[KeypointFrame],
    method: SimilarityMethod,
) -> Result<f64> {
    SimilarityEngine::default().similarity(seq_a, seq_b, method)
}

fn flatten(seq: &[KeypointFrame]) -> Vec<f64> {
    seq.iter()
        .flat_map(|f| f.as_slice().iter().copied())
        .collect()
}

/// Odd-length frames are reported against the layout's frame length.
fn check_frame_dims(a: &[KeypointFrame], b: &[KeypointFrame], layout_len: usize) -> Result<()> {
    let expected = a[0].len();
    if expected % 2 != 0 {
        return Err(SimilarityError::frame_dimension(layout_len, expected));
    }
    match a.iter().chain(b.iter()).find(|f| f.len() != expected) {
        Some(f) => Err(SimilarityError::frame_dimension(expected, f.len())),
        None => Ok(()),
    }
}
