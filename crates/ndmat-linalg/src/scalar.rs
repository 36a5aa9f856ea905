//! Operations for real and complex matrices
//!
//! Determinant, inverse and linear solves go through an
//! [`LuFactorization`] implementation ([`DoolittleLu`] unless another one is
//! passed explicitly). The plain forms (`determinant`, `trace`, `invert`,
//! `/=`) log a warning and return a sentinel when the operation is not
//! defined: NaN for scalars, an unchanged matrix otherwise. The `try_` forms
//! return the error instead.

use std::ops::{Div, DivAssign};

use ndmat_core::{RealElement, ScalarElement, Tensor};
use tracing::warn;

use crate::error::{LinalgError, LinalgResult};
use crate::lu::{DoolittleLu, LuFactorization};
use crate::matrix::Matrix;
use crate::numeric::MatrixAxis;

impl<T: ScalarElement> Matrix<T> {
    /// Determinant, or NaN (with a warning) when the matrix is not square
    ///
    /// # Examples
    ///
    /// ```
    /// use ndmat_linalg::Matrix;
    ///
    /// let m: Matrix<f64> = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
    /// assert!((m.determinant() + 2.0).abs() < 1e-12);
    /// assert!(Matrix::<f64>::new(2, 3).determinant().is_nan());
    /// ```
    pub fn determinant(&self) -> T {
        match self.try_determinant() {
            Ok(value) => value,
            Err(err) => {
                warn!(%err, "determinant is undefined");
                T::scalar_nan()
            }
        }
    }

    /// Determinant computed by [`DoolittleLu`]
    pub fn try_determinant(&self) -> LinalgResult<T> {
        self.determinant_with(&DoolittleLu)
    }

    /// Determinant computed by the given factorization
    pub fn determinant_with<L: LuFactorization<T>>(&self, solver: &L) -> LinalgResult<T> {
        solver.determinant(self)
    }

    /// Invert in place; on failure the matrix is left unchanged and a
    /// warning is logged
    pub fn invert(&mut self) {
        if let Err(err) = self.try_invert() {
            warn!(%err, "matrix could not be inverted");
        }
    }

    /// Invert in place, reporting non-square or singular input
    pub fn try_invert(&mut self) -> LinalgResult<()> {
        self.invert_with(&DoolittleLu)
    }

    /// Invert in place with the given factorization
    pub fn invert_with<L: LuFactorization<T>>(&mut self, solver: &L) -> LinalgResult<()> {
        solver.invert(self)
    }

    /// Inverse as a new matrix (a copy of `self` when inversion fails)
    pub fn inverse(&self) -> Self {
        let mut result = self.clone();
        result.invert();
        result
    }

    /// Inverse as a new matrix
    pub fn try_inverse(&self) -> LinalgResult<Self> {
        let mut result = self.clone();
        result.try_invert()?;
        Ok(result)
    }

    /// Solve `self * X = rhs` for `X`
    ///
    /// ```
    /// use ndmat_linalg::Matrix;
    ///
    /// let a = Matrix::from_rows(vec![vec![2.0, 0.0], vec![0.0, 4.0]]).unwrap();
    /// let b = Matrix::from_rows(vec![vec![2.0], vec![2.0]]).unwrap();
    /// let x = a.solve(&b).unwrap();
    /// assert_eq!(x.as_slice(), &[1.0, 0.5]);
    /// ```
    pub fn solve(&self, rhs: &Self) -> LinalgResult<Self> {
        let mut solution = rhs.clone();
        DoolittleLu.solve(self, &mut solution)?;
        Ok(solution)
    }

    /// Sum of the main diagonal, or NaN (with a warning) when the matrix is
    /// not square
    pub fn trace(&self) -> T {
        match self.try_trace() {
            Ok(value) => value,
            Err(err) => {
                warn!(%err, "trace is undefined");
                T::scalar_nan()
            }
        }
    }

    /// Sum of the main diagonal of a square matrix
    pub fn try_trace(&self) -> LinalgResult<T> {
        self.require_square("trace")?;
        Ok(self.diagonal().into_iter().fold(T::zero(), |acc, v| acc + v))
    }

    /// Transpose and conjugate in place
    pub fn conjugate_transpose(&mut self) {
        self.transpose();
        for value in self.as_mut_slice() {
            *value = value.conj();
        }
    }

    /// Conjugate transpose as a new matrix
    pub fn adjoint(&self) -> Self {
        let mut result = self.clone();
        result.conjugate_transpose();
        result
    }

    /// Symmetric part `(A + A^T) / 2` of a square matrix
    pub fn symmetric(&self) -> LinalgResult<Self> {
        self.combine_with_transpose("symmetric", |a, b| a + b)
    }

    /// Anti-symmetric part `(A - A^T) / 2` of a square matrix
    pub fn anti_symmetric(&self) -> LinalgResult<Self> {
        self.combine_with_transpose("anti_symmetric", |a, b| a - b)
    }

    fn combine_with_transpose<F>(&self, operation: &'static str, combine: F) -> LinalgResult<Self>
    where
        F: Fn(T, T) -> T,
    {
        self.require_square(operation)?;
        let two = T::one() + T::one();
        let n = self.rows();
        let mut result = self.clone();
        for i in 0..n {
            for j in 0..n {
                result[(i, j)] = combine(self[(i, j)], self[(j, i)]) / two;
            }
        }
        Ok(result)
    }

    /// Companion matrix of the polynomial
    /// `c[0] x^n + c[1] x^(n-1) + ... + c[n]`
    ///
    /// The first row holds `-c[k + 1] / c[0]` and the sub-diagonal holds
    /// ones, so the eigenvalues are the polynomial's roots.
    ///
    /// # Errors
    ///
    /// [`LinalgError::EmptyInput`] for an empty coefficient list.
    ///
    /// # Examples
    ///
    /// ```
    /// use ndmat_linalg::Matrix;
    ///
    /// // 2x^2 - 6x + 4
    /// let c = Matrix::create_companion(&[2.0, -6.0, 4.0]).unwrap();
    /// assert_eq!(c.as_slice(), &[3.0, -2.0, 1.0, 0.0]);
    /// ```
    pub fn create_companion(coefficients: &[T]) -> LinalgResult<Self> {
        let Some((&leading, rest)) = coefficients.split_first() else {
            warn!("a non-empty vector of coefficients must be supplied");
            return Err(LinalgError::EmptyInput("create_companion"));
        };
        let n = rest.len();
        let mut result = Self::new(n, n);
        for (j, &c) in rest.iter().enumerate() {
            result[(0, j)] = -(c / leading);
        }
        for i in 1..n {
            result[(i, i - 1)] = T::one();
        }
        Ok(result)
    }

    /// Arithmetic mean along `axis`
    pub fn mean(&self, axis: MatrixAxis) -> LinalgResult<Self> {
        self.statistic(axis, Tensor::mean)
    }

    /// Unbiased sample variance along `axis`
    pub fn variance(&self, axis: MatrixAxis) -> LinalgResult<Self> {
        self.statistic(axis, Tensor::variance)
    }

    /// Standard deviation along `axis`
    pub fn standard_deviation(&self, axis: MatrixAxis) -> LinalgResult<Self> {
        self.statistic(axis, Tensor::standard_deviation)
    }

    fn statistic<F>(&self, axis: MatrixAxis, reduce: F) -> LinalgResult<Self>
    where
        F: Fn(&Tensor<T>, usize) -> ndmat_core::Result<Tensor<T>>,
    {
        let reduced = match axis {
            MatrixAxis::Rows => reduce(&self.tensor, 1)?,
            MatrixAxis::Columns => reduce(&self.tensor, 0)?,
            MatrixAxis::RowsAndColumns => {
                let flat = Tensor::from_vec(self.as_slice().to_vec(), &[1, self.len()])?;
                reduce(&flat, 1)?
            }
        };
        Self::from_tensor(reduced)
    }
}

impl<T: RealElement> Matrix<T> {
    /// Interpolate every lane along `axis` at `target`
    ///
    /// `abscissas` is indexed by tensor axis: `abscissas[0]` holds one
    /// abscissa per row, `abscissas[1]` one per column. Only the entries for
    /// the interpolated axes are read. [`MatrixAxis::RowsAndColumns`]
    /// interpolates both axes at the same target.
    ///
    /// ```
    /// use ndmat_linalg::{linear_interpolator, Matrix, MatrixAxis};
    ///
    /// let m = Matrix::from_rows(vec![vec![0.0, 10.0], vec![2.0, 20.0]]).unwrap();
    /// let rows = vec![vec![0.0, 1.0]];
    /// let mid = m.interpolate(&rows, 0.5, linear_interpolator, MatrixAxis::Columns).unwrap();
    /// assert_eq!(mid.as_slice(), &[1.0, 15.0]);
    /// ```
    pub fn interpolate<F>(
        &self,
        abscissas: &[Vec<T>],
        target: T,
        interpolator: F,
        axis: MatrixAxis,
    ) -> LinalgResult<Self>
    where
        F: FnMut(T, &[T], &[T]) -> T,
    {
        let reduced = self
            .tensor
            .interpolate_axes(abscissas, &[target, target], axis.axes(), interpolator)?;
        Self::from_tensor(reduced)
    }

    /// Interpolate first along the rows at `row_target`, then along the
    /// columns at `column_target`
    pub fn interpolate_2d<F>(
        &self,
        abscissas: &[Vec<T>],
        row_target: T,
        column_target: T,
        interpolator: F,
    ) -> LinalgResult<T>
    where
        F: FnMut(T, &[T], &[T]) -> T,
    {
        let reduced =
            self.tensor
                .interpolate_axes(abscissas, &[row_target, column_target], &[0, 1], interpolator)?;
        reduced
            .first()
            .copied()
            .ok_or(LinalgError::EmptyInput("interpolate_2d"))
    }
}

impl<T: ScalarElement> DivAssign<&Matrix<T>> for Matrix<T> {
    /// `lhs /= rhs` solves `rhs * X = lhs` and stores `X` in `lhs`
    ///
    /// Incompatible or singular operands log a warning and leave `lhs`
    /// unchanged.
    fn div_assign(&mut self, rhs: &Matrix<T>) {
        if let Err(err) = DoolittleLu.solve(rhs, self) {
            warn!(%err, "matrix division failed");
        }
    }
}

impl<T: ScalarElement> Div<&Matrix<T>> for &Matrix<T> {
    type Output = Matrix<T>;

    fn div(self, rhs: &Matrix<T>) -> Matrix<T> {
        let mut result = self.clone();
        result /= rhs;
        result
    }
}
