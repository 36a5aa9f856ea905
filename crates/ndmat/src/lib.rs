//! # ndmat - Generic Dense Tensors and Matrices
//!
//! This is the **meta crate** that re-exports the ndmat components for
//! convenient access.
//!
//! ## Quick Start
//!
//! ```
//! use ndmat::prelude::*;
//!
//! let m: Matrix<f64> = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]])?;
//! assert!((m.determinant() + 2.0).abs() < 1e-12);
//!
//! let inv = m.try_inverse()?;
//! assert!((inv[(1, 0)] - 1.5).abs() < 1e-12);
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Components
//!
//! ### Tensors and Index Spaces ([`core`])
//!
//! Dense N-dimensional tensors over any element type, index sets, Cartesian
//! products and subscripts, capability layers chosen by the element type,
//! and reference views onto selected elements.
//!
//! ```
//! use ndmat::core::{Subscript, Tensor};
//!
//! let mut t = Tensor::<f64>::zeros(&[3, 3]);
//! t.view_mut(Subscript::from_subsets(vec![vec![0, 2], vec![1]]))?
//!     .fill(1.0);
//! assert_eq!(t[&[2, 1][..]], 1.0);
//! assert_eq!(t.sum_all(), 2.0);
//! # Ok::<(), ndmat::core::TensorError>(())
//! ```
//!
//! ### Matrices ([`linalg`])
//!
//! Rank-2 structure operations, transpose-aware multiplication and LU-based
//! determinant, inverse and solve.
//!
//! ```
//! use ndmat::linalg::Matrix;
//!
//! let a = Matrix::from_rows(vec![vec![1.0, 2.0, 3.0]])?;
//! let gram = a.pre_multiply_transpose(&a)?;
//! assert_eq!(gram.dims(), (3, 3));
//! # Ok::<(), ndmat::linalg::LinalgError>(())
//! ```
//!
//! ### Text I/O ([`io`])
//!
//! Delimited text loading into a new matrix and extraction into an existing
//! one.
//!
//! ```
//! let m: ndmat::linalg::Matrix<i32> = ndmat::io::parse_matrix("1, 2\n3, 4")?;
//! assert_eq!(m.dims(), (2, 2));
//! # Ok::<(), ndmat::io::TextError>(())
//! ```
//!
//! ### Logging ([`logging`])
//!
//! All crates report through `tracing`. [`logging::init_logging`] installs a
//! subscriber configured from `RUST_LOG` and `NDMAT_LOG_FORMAT`.
//!
//! ## Features
//!
//! - `subscriber` (default): enable [`logging::init_logging`]
//! - `serde`: `Serialize`/`Deserialize` for tensors, matrices and index sets

#![deny(warnings)]

pub use ndmat_core as core;
pub use ndmat_io as io;
pub use ndmat_linalg as linalg;

pub mod logging;

pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! # Example
    //!
    //! ```
    //! use ndmat::prelude::*;
    //!
    //! let t = Tensor::<f64>::ones(&[2, 3, 4]);
    //! let m = Matrix::<f64>::create_identity(3);
    //! assert_eq!(t.len(), 24);
    //! assert_eq!(m.trace(), 3.0);
    //! ```

    // Core types
    pub use crate::core::{
        CartesianProduct, Complex, Element, IndexSet, NumericElement, RealElement,
        ScalarElement, Subscript, Tensor, TensorError, TensorView, TensorViewMut,
    };

    // Matrices and linear algebra
    pub use crate::linalg::{
        multiply_into, DoolittleLu, LinalgError, LuFactorization, Matrix, MatrixAxis,
        TransposeMode,
    };

    // Text I/O
    pub use crate::io::{extract, load, parse_matrix, TextError, TextOptions};
}
