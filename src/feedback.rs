//! Coarse feedback grades for real-time practice sessions.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Feedback shown to the person being scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FeedbackGrade {
    Perfect,
    Good,
    KeepPracticing,
    WrongPose,
}

impl FeedbackGrade {
    /// Grade a hybrid score with the default thresholds.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        FeedbackThresholds::default().grade(score)
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Perfect => "Perfect!",
            Self::Good => "Good!",
            Self::KeepPracticing => "Keep Practicing",
            Self::WrongPose => "Wrong Pose",
        }
    }
}

impl fmt::Display for FeedbackGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lower bounds (exclusive) of each grade.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FeedbackThresholds {
    pub perfect: f64,
    pub good: f64,
    pub practice: f64,
}

impl Default for FeedbackThresholds {
    fn default() -> Self {
        Self {
            perfect: 0.95,
            good: 0.85,
            practice: 0.70,
        }
    }
}

impl FeedbackThresholds {
    /// Grade a score; NaN grades as [`FeedbackGrade::WrongPose`].
    #[must_use]
    pub fn grade(&self, score: f64) -> FeedbackGrade {
        if score > self.perfect {
            FeedbackGrade::Perfect
        } else if score > self.good {
            FeedbackGrade::Good
        } else if score > self.practice {
            FeedbackGrade::KeepPracticing
        } else {
            FeedbackGrade::WrongPose
        }
    }
}
