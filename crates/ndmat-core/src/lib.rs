//! # ndmat-core
//!
//! Core dense tensor types, index sets and subscripts for ndmat.
//!
//! This crate provides the foundational building blocks of the ndmat stack:
//!
//! - **Index spaces** ([`IndexSet`], [`CartesianProduct`], [`Subscript`]) mapping
//!   multi-indices to row-major storage offsets, with gather/scatter between
//!   index spaces of equal rank
//! - **Dense tensors** ([`Tensor`]) of any rank over any [`Element`] type
//! - **Capability layers** resolved at compile time from the element type:
//!   numeric arithmetic and reductions, complex/real statistics, real
//!   interpolation
//! - **Reference views** ([`TensorView`], [`TensorViewMut`]) reading and
//!   writing a selected subset of another tensor in place
//!
//! ## Core Principles
//!
//! ### SciRS2 Integration
//!
//! Numeric traits, complex numbers and ndarray interop all come from
//! `scirs2-core` (`scirs2_core::numeric`, `scirs2_core::num_complex`,
//! `scirs2_core::ndarray_ext`).
//!
//! ### Memory Layout
//!
//! Storage is C-contiguous (row-major): the last axis has unit stride.
//!
//! ### Errors and Diagnostics
//!
//! Validation failures (shape mismatch, bad axis, bad permutation, ...) are
//! logged through `tracing` and returned as [`TensorError`]. Indexing past
//! the end through `tensor[&index[..]]` is a contract violation and panics.
//!
//! ## Quick Start
//!
//! ```
//! use ndmat_core::Tensor;
//!
//! let mut t = Tensor::from_vec((1..=6).map(f64::from).collect(), &[2, 3]).unwrap();
//! assert_eq!(t.rank(), 2);
//!
//! // Reduce along rows (axis 0)
//! let sums = t.sum(0).unwrap();
//! assert_eq!(sums.as_slice(), &[5.0, 7.0, 9.0]);
//!
//! // Grow to 3x3, keeping the existing values
//! t.resize(&[3, 3], true).unwrap();
//! assert_eq!(t[&[1, 2][..]], 6.0);
//! assert_eq!(t[&[2, 2][..]], 0.0);
//! # Ok::<(), ndmat_core::TensorError>(())
//! ```

pub mod element;
pub mod error;
pub mod permutation;
pub mod sets;
pub mod tensor;
pub mod types;
pub mod view;

#[cfg(test)]
mod property_tests;

pub use element::{Element, ElementDisplay, NumericElement, RealElement, ScalarElement};
pub use error::{Result, TensorError};
pub use sets::{CartesianProduct, IndexSet, Subscript};
pub use tensor::{linear_interpolator, Tensor};
pub use types::{Axis, ElementCategory, Rank, Shape};
pub use view::{TensorView, TensorViewMut};

/// Complex number type used for complex tensors
pub use scirs2_core::num_complex::Complex;
