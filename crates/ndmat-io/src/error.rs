//! Error types for text ingestion

use ndmat_linalg::LinalgError;
use thiserror::Error;

/// Result alias for text I/O
pub type TextResult<T> = std::result::Result<T, TextError>;

/// Errors raised while reading or writing delimited text matrices
#[derive(Error, Debug)]
pub enum TextError {
    /// A line held a different number of values than the matrix has columns
    #[error("format error on line {line}: expected {expected} values, got {got}")]
    Format {
        line: usize,
        expected: usize,
        got: usize,
    },

    /// The input ended before every row of a pre-shaped matrix was read
    #[error("input ended after {got} of {expected} rows")]
    MissingRows { expected: usize, got: usize },

    /// Underlying reader or writer failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The rows read could not be assembled into a matrix
    #[error(transparent)]
    Matrix(#[from] LinalgError),
}

impl From<ndmat_core::TensorError> for TextError {
    fn from(err: ndmat_core::TensorError) -> Self {
        TextError::Matrix(err.into())
    }
}
