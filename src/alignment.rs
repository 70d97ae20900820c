//! Sequence alignment strategies.
//!
//! Scoring compares a reference sequence with a live sequence frame by frame,
//! so both must first be brought to a common timeline. [`SequenceAligner`] is
//! the seam for that step; [`TruncateAligner`] is the strategy in use and
//! simply cuts both sequences to the shorter length.

use std::borrow::Cow;
use std::fmt;

use crate::frame::KeypointFrame;

/// Two sequences brought to equal length.
#[derive(Debug, Clone)]
pub struct AlignedPair<'a> {
    pub reference: Cow<'a, [KeypointFrame]>,
    pub live: Cow<'a, [KeypointFrame]>,
}

impl AlignedPair<'_> {
    /// Number of aligned frames.
    #[must_use]
    pub fn len(&self) -> usize {
        self.reference.len().min(self.live.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Strategy that maps two sequences onto one timeline of equal length.
///
/// Implementations must return sequences of equal length and must not mutate
/// their inputs; strategies that resample or warp return owned frames.
pub trait SequenceAligner: fmt::Debug + Send + Sync {
    fn align<'a>(&self, reference: &'a [KeypointFrame], live: &'a [KeypointFrame])
        -> AlignedPair<'a>;
}

/// Truncate both sequences to `min(len(reference), len(live))`.
///
/// Idempotent: aligning an already aligned pair returns it unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct TruncateAligner;

impl SequenceAligner for TruncateAligner {
    fn align<'a>(
        &self,
        reference: &'a [KeypointFrame],
        live: &'a [KeypointFrame],
    ) -> AlignedPair<'a> {
        let n = reference.len().min(live.len());
        AlignedPair {
            reference: Cow::Borrowed(&reference[..n]),
            live: Cow::Borrowed(&live[..n]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(n: usize) -> Vec<KeypointFrame> {
        (0..n)
            .map(|i| KeypointFrame::from_points(&[[i as f64, 1.0]]))
            .collect()
    }

    #[test]
    fn test_truncates_to_shorter() {
        let (a, b) = (seq(5), seq(8));
        let aligned = TruncateAligner.align(&a, &b);
        assert_eq!(aligned.reference.len(), 5);
        assert_eq!(aligned.live.len(), 5);
        assert_eq!(aligned.live[..], b[..5]);
        assert!(matches!(aligned.live, Cow::Borrowed(_)));
    }

    #[test]
    fn test_idempotent() {
        let (a, b) = (seq(7), seq(3));
        let once = TruncateAligner.align(&a, &b);
        let twice = TruncateAligner.align(&once.reference, &once.live);
        assert_eq!(once.reference, twice.reference);
        assert_eq!(once.live, twice.live);
    }

    #[test]
    fn test_empty_side() {
        let a = seq(4);
        let aligned = TruncateAligner.align(&a, &[]);
        assert!(aligned.is_empty());
        assert_eq!(aligned.reference.len(), 0);
    }
}
