//! Error types for tensor construction, indexing and structural operations
//!
//! Every fallible operation in `ndmat-core` reports a [`TensorError`]. The
//! operation that detects the problem also emits a `tracing::warn!` event so
//! that callers relying on sentinel results (NaN, unchanged receiver) still
//! leave a diagnostic trail.
//!
//! # Examples
//!
//! ```
//! use ndmat_core::{Tensor, TensorError};
//!
//! let err = Tensor::<f64>::from_vec(vec![1.0, 2.0, 3.0], &[2, 2]).unwrap_err();
//! assert!(matches!(err, TensorError::LengthMismatch { expected: 4, got: 3 }));
//! ```

use thiserror::Error;

/// Result alias used throughout `ndmat-core`
pub type Result<T> = std::result::Result<T, TensorError>;

/// Errors raised by tensor, subscript and view operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TensorError {
    /// Two operands (or an operand and a receiver) disagree on shape
    #[error("shape mismatch in {operation}: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        operation: &'static str,
        expected: Vec<usize>,
        got: Vec<usize>,
    },

    /// Flat data does not fill the requested shape
    #[error("data length {got} does not match shape cardinality {expected}")]
    LengthMismatch { expected: usize, got: usize },

    /// Operand ranks disagree
    #[error("rank mismatch in {operation}: expected {expected}, got {got}")]
    RankMismatch {
        operation: &'static str,
        expected: usize,
        got: usize,
    },

    /// An axis argument does not name a dimension of the tensor
    #[error("invalid axis {axis} for tensor of rank {rank}")]
    InvalidAxis { axis: usize, rank: usize },

    /// The same axis was listed more than once
    #[error("axis {0} specified more than once")]
    DuplicateAxis(usize),

    /// A multi-index (or one of its components) lies outside the shape
    #[error("index {index:?} out of bounds for shape {shape:?}")]
    IndexOutOfBounds { index: Vec<usize>, shape: Vec<usize> },

    /// A permutation entry is out of range or repeated
    #[error("invalid permutation {permutation:?} for length {len}")]
    InvalidPermutation { permutation: Vec<usize>, len: usize },

    /// A subset edit named a location past the end of the set
    #[error("subset location {location} is invalid for a set of {len} subsets")]
    InvalidLocation { location: usize, len: usize },

    /// An operation that needs at least one element received none
    #[error("empty input to {0}")]
    EmptyInput(&'static str),
}

impl TensorError {
    /// Convenience constructor for [`TensorError::ShapeMismatch`]
    pub fn shape_mismatch(operation: &'static str, expected: &[usize], got: &[usize]) -> Self {
        Self::ShapeMismatch {
            operation,
            expected: expected.to_vec(),
            got: got.to_vec(),
        }
    }

    /// Convenience constructor for [`TensorError::IndexOutOfBounds`]
    pub fn out_of_bounds(index: &[usize], shape: &[usize]) -> Self {
        Self::IndexOutOfBounds {
            index: index.to_vec(),
            shape: shape.to_vec(),
        }
    }
}
