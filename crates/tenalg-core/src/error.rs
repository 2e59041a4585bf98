//! Error types for core tensor operations
//!
//! All shape, bounds, and mismatch failures surface synchronously as
//! [`TensorError`] values; there is no retry or partial-result recovery.

use thiserror::Error;

/// Error type for tensor construction, access, and evaluation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TensorError {
    /// Shape is empty, contains a zero, or is otherwise malformed
    #[error("invalid shape {shape:?}: {reason}")]
    InvalidShape { shape: Vec<usize>, reason: String },

    /// A checked accessor received an index outside the valid range
    #[error("index {index} out of bounds for {what} of size {bound}")]
    OutOfBounds {
        what: &'static str,
        index: usize,
        bound: usize,
    },

    /// An operation required equal shapes and they were not equal
    #[error("{context}: shape mismatch between {lhs:?} and {rhs:?}")]
    ShapeMismatch {
        context: String,
        lhs: Vec<usize>,
        rhs: Vec<usize>,
    },

    /// The number of supplied indices does not equal the tensor rank
    #[error("{context}: expected {expected} indices, got {actual}")]
    RankMismatch {
        context: String,
        expected: usize,
        actual: usize,
    },
}

impl TensorError {
    pub fn invalid_shape(shape: impl Into<Vec<usize>>, reason: impl Into<String>) -> Self {
        TensorError::InvalidShape {
            shape: shape.into(),
            reason: reason.into(),
        }
    }

    pub fn out_of_bounds(what: &'static str, index: usize, bound: usize) -> Self {
        TensorError::OutOfBounds { what, index, bound }
    }

    pub fn shape_mismatch(
        context: impl Into<String>,
        lhs: impl Into<Vec<usize>>,
        rhs: impl Into<Vec<usize>>,
    ) -> Self {
        TensorError::ShapeMismatch {
            context: context.into(),
            lhs: lhs.into(),
            rhs: rhs.into(),
        }
    }

    pub fn rank_mismatch(context: impl Into<String>, expected: usize, actual: usize) -> Self {
        TensorError::RankMismatch {
            context: context.into(),
            expected,
            actual,
        }
    }
}

/// Result type alias for core tensor operations
pub type Result<T> = std::result::Result<T, TensorError>;
