//! # ndmat-linalg
//!
//! Rank-2 matrices on top of [`ndmat_core::Tensor`].
//!
//! [`Matrix<T>`] adds the operations that only make sense with exactly two
//! axes. What is available depends on the element type, the same way it
//! does for tensors:
//!
//! - **Any element**: row/column access and insertion, augmentation,
//!   diagonal and band extraction, row/column permutation, transposition,
//!   reference views onto rows, columns or blocks
//! - **Numeric** ([`ndmat_core::NumericElement`]): reductions along a
//!   [`MatrixAxis`], identity/diagonal/Vandermonde constructors,
//!   transpose-aware multiplication ([`multiply_into`], [`TransposeMode`])
//! - **Real and complex** ([`ndmat_core::ScalarElement`]): determinant,
//!   inverse, trace and linear solves through the [`LuFactorization`]
//!   collaborator, conjugate transpose, symmetric parts, companion matrices,
//!   statistics
//! - **Real** ([`ndmat_core::RealElement`]): interpolation along rows,
//!   columns or both
//!
//! ## Error policy
//!
//! Fallible operations return [`LinalgResult`]. Operations with a natural
//! sentinel (`determinant`, `trace`, `invert`, the `*=` and `/=` operators)
//! log a `tracing` warning and return NaN or leave the receiver unchanged;
//! their `try_` counterparts surface the [`LinalgError`].
//!
//! ## Quick Start
//!
//! ```
//! use ndmat_linalg::{Matrix, MatrixAxis};
//!
//! let m: Matrix<f64> = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]])?;
//! let inv = m.try_inverse()?;
//! let eye = m.multiply(&inv)?;
//! assert!((eye[(0, 0)] - 1.0).abs() < 1e-12);
//! assert!(eye[(0, 1)].abs() < 1e-12);
//!
//! let column_sums = m.sum(MatrixAxis::Columns)?;
//! assert_eq!(column_sums.as_slice(), &[4.0, 6.0]);
//! # Ok::<(), ndmat_linalg::LinalgError>(())
//! ```

pub mod error;
pub mod lu;
pub mod matrix;
pub mod multiply;
pub mod numeric;
pub mod scalar;
pub mod structure;

#[cfg(test)]
mod property_tests;

pub use error::{LinalgError, LinalgResult};
pub use lu::{DoolittleLu, LuDecomposition, LuFactorization};
pub use matrix::Matrix;
pub use multiply::{multiply_into, TransposeMode};
pub use numeric::MatrixAxis;

pub use ndmat_core::{linear_interpolator, Complex};
