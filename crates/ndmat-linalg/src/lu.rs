//! LU factorization collaborator
//!
//! Determinants, inverses and linear solves of [`Matrix`] values are
//! delegated to an implementation of [`LuFactorization`]. The default is
//! [`DoolittleLu`]: Doolittle's scheme (unit lower triangle) with partial
//! pivoting on the largest modulus in each column.
//!
//! # Singularity
//!
//! A matrix is singular when a pivot column holds only exact zeros at and
//! below the diagonal. No tolerance is applied, so nearly singular systems
//! factor successfully and produce large entries.

use ndmat_core::ScalarElement;
use scirs2_core::numeric::Zero;
use tracing::{debug, warn};

use crate::error::{LinalgError, LinalgResult};
use crate::matrix::Matrix;

/// Numerical service providing determinant, inverse and solve for square
/// matrices
pub trait LuFactorization<T: ScalarElement> {
    /// Determinant of a square matrix (zero for a singular one)
    fn determinant(&self, matrix: &Matrix<T>) -> LinalgResult<T>;

    /// Replace a square matrix with its inverse
    fn invert(&self, matrix: &mut Matrix<T>) -> LinalgResult<()>;

    /// Solve `lhs * X = rhs` and store `X` in `rhs`
    fn solve(&self, lhs: &Matrix<T>, rhs: &mut Matrix<T>) -> LinalgResult<()>;
}

/// Doolittle LU factorization with partial pivoting
#[derive(Debug, Clone, Copy, Default)]
pub struct DoolittleLu;

/// Packed `P * A = L * U` factors of a square matrix
///
/// `L` (unit diagonal, not stored) and `U` share one row-major buffer.
#[derive(Debug, Clone)]
pub struct LuDecomposition<T> {
    factors: Vec<T>,
    n: usize,
    pivots: Vec<usize>,
    odd_swaps: bool,
}

impl<T: ScalarElement> LuDecomposition<T> {
    /// Factor a square matrix
    ///
    /// # Errors
    ///
    /// [`LinalgError::NotSquare`] or [`LinalgError::Singular`].
    pub fn new(matrix: &Matrix<T>) -> LinalgResult<Self> {
        matrix.require_square("lu")?;
        let n = matrix.rows();
        let mut a = matrix.as_slice().to_vec();
        let mut pivots: Vec<usize> = (0..n).collect();
        let mut odd_swaps = false;

        for k in 0..n {
            let mut p = k;
            let mut largest = a[k * n + k].modulus();
            for i in k + 1..n {
                let candidate = a[i * n + k].modulus();
                if candidate > largest {
                    largest = candidate;
                    p = i;
                }
            }
            if largest.is_zero() {
                debug!(column = k, "zero pivot");
                return Err(LinalgError::Singular { column: k });
            }
            if p != k {
                for j in 0..n {
                    a.swap(k * n + j, p * n + j);
                }
                pivots.swap(k, p);
                odd_swaps = !odd_swaps;
            }

            let pivot = a[k * n + k];
            for i in k + 1..n {
                let factor = a[i * n + k] / pivot;
                a[i * n + k] = factor;
                for j in k + 1..n {
                    let upper = a[k * n + j];
                    a[i * n + j] -= factor * upper;
                }
            }
        }

        Ok(Self {
            factors: a,
            n,
            pivots,
            odd_swaps,
        })
    }

    /// Order of the factored matrix
    pub fn order(&self) -> usize {
        self.n
    }

    /// Product of the pivots, signed by the row-swap parity
    pub fn determinant(&self) -> T {
        let n = self.n;
        let product = (0..n).fold(T::one(), |acc, i| acc * self.factors[i * n + i]);
        if self.odd_swaps {
            -product
        } else {
            product
        }
    }

    /// Solve `A x = b` for one right-hand side, overwriting `b` with `x`
    pub fn solve_in_place(&self, b: &mut [T]) {
        let n = self.n;
        let mut x: Vec<T> = self.pivots.iter().map(|&p| b[p]).collect();
        for i in 0..n {
            for j in 0..i {
                let l = self.factors[i * n + j];
                let xj = x[j];
                x[i] -= l * xj;
            }
        }
        for i in (0..n).rev() {
            for j in i + 1..n {
                let u = self.factors[i * n + j];
                let xj = x[j];
                x[i] -= u * xj;
            }
            x[i] /= self.factors[i * n + i];
        }
        b.copy_from_slice(&x);
    }

    /// Solve `A X = B` column by column, overwriting `B`
    pub fn solve_matrix(&self, rhs: &mut Matrix<T>) -> LinalgResult<()> {
        if rhs.rows() != self.n {
            warn!(order = self.n, rhs = ?rhs.dims(), "right-hand side has the wrong row count");
            return Err(LinalgError::DimensionMismatch {
                operation: "solve",
                lhs: (self.n, self.n),
                rhs: rhs.dims(),
            });
        }
        let columns = rhs.columns();
        let mut column = vec![T::zero(); self.n];
        for j in 0..columns {
            for (i, value) in column.iter_mut().enumerate() {
                *value = rhs[(i, j)];
            }
            self.solve_in_place(&mut column);
            for (i, value) in column.iter().enumerate() {
                rhs[(i, j)] = *value;
            }
        }
        Ok(())
    }
}

impl<T: ScalarElement> LuFactorization<T> for DoolittleLu {
    fn determinant(&self, matrix: &Matrix<T>) -> LinalgResult<T> {
        match LuDecomposition::new(matrix) {
            Ok(lu) => Ok(lu.determinant()),
            Err(LinalgError::Singular { .. }) => Ok(T::zero()),
            Err(err) => Err(err),
        }
    }

    fn invert(&self, matrix: &mut Matrix<T>) -> LinalgResult<()> {
        let lu = LuDecomposition::new(matrix)?;
        let mut inverse = Matrix::create_identity(lu.order());
        lu.solve_matrix(&mut inverse)?;
        *matrix = inverse;
        Ok(())
    }

    fn solve(&self, lhs: &Matrix<T>, rhs: &mut Matrix<T>) -> LinalgResult<()> {
        LuDecomposition::new(lhs)?.solve_matrix(rhs)
    }
}
