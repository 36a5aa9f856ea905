//! Error types for matrix operations and the LU collaborator

use ndmat_core::TensorError;
use thiserror::Error;

/// Result alias for linear-algebra operations
pub type LinalgResult<T> = std::result::Result<T, LinalgError>;

/// Errors raised by [`Matrix`](crate::Matrix) operations and
/// [`LuFactorization`](crate::LuFactorization) implementations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LinalgError {
    /// Operation requires a square matrix
    #[error("{operation} requires a square matrix, got {rows}x{columns}")]
    NotSquare {
        operation: &'static str,
        rows: usize,
        columns: usize,
    },

    /// A zero pivot was met during factorization
    #[error("matrix is singular (zero pivot in column {column})")]
    Singular { column: usize },

    /// Operand dimensions are incompatible
    #[error("dimension mismatch in {operation}: {lhs:?} vs {rhs:?}")]
    DimensionMismatch {
        operation: &'static str,
        lhs: (usize, usize),
        rhs: (usize, usize),
    },

    /// Row or column index past the end
    #[error("{kind} index {index} out of bounds for {len} {kind}s")]
    IndexOutOfBounds {
        kind: &'static str,
        index: usize,
        len: usize,
    },

    /// Operation needs a non-empty input
    #[error("empty input to {0}")]
    EmptyInput(&'static str),

    /// Error from the underlying tensor layer
    #[error(transparent)]
    Tensor(#[from] TensorError),
}
