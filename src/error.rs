//! Error types for pose similarity operations.
//!
//! Degenerate input (empty sequences, missing joints, zero-length limbs) is
//! never an error here: it resolves to a sentinel value instead. Errors are
//! reserved for contract violations by the caller.

use thiserror::Error;

/// Main error type for pose similarity operations.
#[derive(Error, Debug)]
pub enum SimilarityError {
    /// Unrecognised similarity method name.
    #[error("Invalid similarity method: {0:?}")]
    InvalidMethod(String),

    /// Configuration validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Frames inside one comparison do not share a valid 2D layout.
    #[error("Frame dimension mismatch: expected {expected} values, got {actual}")]
    FrameDimension { expected: usize, actual: usize },

    /// A persisted keypoint record could not be interpreted.
    #[error("Invalid keypoint record: {0}")]
    InvalidRecord(String),

    /// Filesystem error while loading keypoint records.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for pose similarity operations.
pub type Result<T> = std::result::Result<T, SimilarityError>;

impl SimilarityError {
    /// Create an invalid method error.
    #[must_use]
    pub fn invalid_method(name: impl Into<String>) -> Self {
        Self::InvalidMethod(name.into())
    }

    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a frame dimension error.
    #[must_use]
    pub const fn frame_dimension(expected: usize, actual: usize) -> Self {
        Self::FrameDimension { expected, actual }
    }

    /// Create an invalid record error.
    #[must_use]
    pub fn invalid_record(msg: impl Into<String>) -> Self {
        Self::InvalidRecord(msg.into())
    }
}
