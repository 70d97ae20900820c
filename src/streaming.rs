//! Real-time scoring of a live keypoint stream against a reference.
//!
//! [`LiveSession`] buffers incoming live frames and scores them against the
//! matching window of a fixed reference sequence.

use std::collections::VecDeque;

use crate::feedback::{FeedbackGrade, FeedbackThresholds};
use crate::frame::KeypointFrame;
use crate::hybrid::{HybridScorer, ScoreBreakdown};

/// Live frame buffer scored against a reference sequence.
///
/// The buffer keeps at most `max_frames` live frames. Frame `k` of the live
/// stream lines up with frame `k` of the reference, so once old frames are
/// evicted the session compares against a later reference window.
///
/// # Example
///
/// ```
/// use pose_similarity::{KeypointFrame, LiveSession};
///
/// let coords: Vec<f64> = (0..50).map(|i| ((i * 37) % 17) as f64 + 1.0).collect();
/// let frame = KeypointFrame::new(coords);
/// let mut session = LiveSession::new(vec![frame.clone(); 30]);
///
/// for _ in 0..5 {
///     session.push(frame.clone());
/// }
///
/// if let Some(score) = session.score() {
///     assert!(score.hybrid > 0.99);
/// }
/// ```
#[derive(Debug)]
pub struct LiveSession {
    scorer: HybridScorer,
    thresholds: FeedbackThresholds,
    reference: Vec<KeypointFrame>,

    /// Maximum live buffer size.
    max_frames: usize,

    /// Minimum live and reference frames before scoring.
    min_frames: usize,

    live: VecDeque<KeypointFrame>,

    /// Frames evicted from the front of the live buffer.
    evicted: usize,

    cached_score: Option<ScoreBreakdown>,
    cache_valid: bool,
}

impl LiveSession {
    /// Create a session with the default scorer.
    ///
    /// The live buffer holds up to as many frames as the reference.
    pub fn new(reference: Vec<KeypointFrame>) -> Self {
        let max_frames = reference.len().max(1);
        Self::with_scorer(reference, HybridScorer::default(), max_frames, 5)
    }

    /// Create a session with custom scoring and buffer parameters.
    ///
    /// # Arguments
    ///
    /// * `reference` - Reference motion sequence
    /// * `scorer` - Hybrid scorer to use
    /// * `max_frames` - Maximum live buffer size (at least 1)
    /// * `min_frames` - Minimum frames on both sides before scoring
    pub fn with_scorer(
        reference: Vec<KeypointFrame>,
        scorer: HybridScorer,
        max_frames: usize,
        min_frames: usize,
    ) -> Self {
        let max_frames = max_frames.max(1);
        Self {
            scorer,
            thresholds: FeedbackThresholds::default(),
            reference,
            max_frames,
            min_frames,
            live: VecDeque::with_capacity(max_frames),
            evicted: 0,
            cached_score: None,
            cache_valid: false,
        }
    }

    /// Replace the feedback thresholds.
    #[must_use]
    pub fn with_thresholds(mut self, thresholds: FeedbackThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Append a live frame.
    ///
    /// Frames with no detected joint are dropped.
    pub fn push(&mut self, frame: KeypointFrame) {
        if frame.is_all_missing() {
            tracing::trace!("dropping empty live frame");
            return;
        }

        self.live.push_back(frame);
        self.cache_valid = false;

        while self.live.len() > self.max_frames {
            self.live.pop_front();
            self.evicted += 1;
        }
    }

    /// Append several live frames in order.
    pub fn push_batch(&mut self, frames: impl IntoIterator<Item = KeypointFrame>) {
        for frame in frames {
            self.push(frame);
        }
    }

    /// Whether both sides hold enough frames to score.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.live.len() >= self.min_frames && self.reference.len() >= self.min_frames
    }

    /// Score the live buffer against its reference window.
    ///
    /// Returns `None` if not ready, if fewer than `min_frames` reference
    /// frames remain in the window, or if the frames cannot be compared.
    pub fn score(&mut self) -> Option<ScoreBreakdown> {
        if !self.is_ready() {
            return None;
        }
        if !self.cache_valid {
            self.recompute();
        }
        self.cached_score
    }

    /// Feedback grade for the current score.
    pub fn feedback(&mut self) -> Option<FeedbackGrade> {
        let thresholds = self.thresholds;
        self.score().map(|s| thresholds.grade(s.hybrid))
    }

    fn recompute(&mut self) {
        self.cache_valid = true;
        self.cached_score = None;

        let Some(window) = self.reference.get(self.evicted..) else {
            return;
        };
        if window.len() < self.min_frames {
            tracing::trace!(remaining = window.len(), "reference window too short");
            return;
        }

        let live: Vec<KeypointFrame> = self.live.iter().cloned().collect();
        match self.scorer.score_detailed(window, &live) {
            Ok(breakdown) => self.cached_score = Some(breakdown),
            Err(err) => tracing::warn!(error = %err, "live frames could not be scored"),
        }
    }

    /// Clear the live buffer and restart at the beginning of the reference.
    pub fn reset(&mut self) {
        self.live.clear();
        self.evicted = 0;
        self.cached_score = None;
        self.cache_valid = false;
    }

    /// Current number of live frames in the buffer.
    #[must_use]
    pub fn n_frames(&self) -> usize {
        self.live.len()
    }

    /// Reference frame index aligned with the oldest buffered live frame.
    #[must_use]
    pub const fn reference_offset(&self) -> usize {
        self.evicted
    }

    #[must_use]
    pub fn reference(&self) -> &[KeypointFrame] {
        &self.reference
    }
}
