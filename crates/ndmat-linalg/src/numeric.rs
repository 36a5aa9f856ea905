//! Numeric matrix operations: axis reductions, special matrices and
//! element-wise arithmetic

use std::fmt;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use ndmat_core::NumericElement;

use crate::error::LinalgResult;
use crate::matrix::Matrix;

/// Direction of a matrix reduction
///
/// `Rows` reduces every row to one value (an `m x n` matrix becomes
/// `m x 1`), `Columns` reduces every column (`1 x n`), and `RowsAndColumns`
/// reduces the rows first and then the resulting column (`1 x 1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MatrixAxis {
    Rows,
    Columns,
    RowsAndColumns,
}

impl MatrixAxis {
    /// Tensor axes reduced by this direction
    pub fn axes(self) -> &'static [usize] {
        match self {
            MatrixAxis::Rows => &[1],
            MatrixAxis::Columns => &[0],
            MatrixAxis::RowsAndColumns => &[1, 0],
        }
    }
}

impl fmt::Display for MatrixAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatrixAxis::Rows => write!(f, "rows"),
            MatrixAxis::Columns => write!(f, "columns"),
            MatrixAxis::RowsAndColumns => write!(f, "rows and columns"),
        }
    }
}

impl<T: NumericElement> Matrix<T> {
    /// `n x n` identity matrix
    ///
    /// ```
    /// use ndmat_linalg::Matrix;
    ///
    /// let eye = Matrix::<i32>::create_identity(2);
    /// assert_eq!(eye.as_slice(), &[1, 0, 0, 1]);
    /// ```
    pub fn create_identity(n: usize) -> Self {
        let mut result = Self::new(n, n);
        result.fill_diagonal(T::one(), T::zero());
        result
    }

    /// Square matrix with `values` on the main diagonal
    pub fn create_diagonal(values: &[T]) -> Self {
        let mut result = Self::new(values.len(), values.len());
        result.set_diagonal(values);
        result
    }

    /// Vandermonde matrix: row `i` is `[1, x_i, x_i^2, ..., x_i^(n-1)]`
    ///
    /// ```
    /// use ndmat_linalg::Matrix;
    ///
    /// let v = Matrix::create_vandermonde(&[2, 3]);
    /// assert_eq!(v.as_slice(), &[1, 2, 1, 3]);
    /// ```
    pub fn create_vandermonde(values: &[T]) -> Self {
        let n = values.len();
        let mut result = Self::new(n, n);
        for (row, &x) in result.as_mut_slice().chunks_mut(n.max(1)).zip(values) {
            let mut power = T::one();
            for (k, cell) in row.iter_mut().enumerate() {
                if k > 0 {
                    power *= x;
                }
                *cell = power;
            }
        }
        result
    }

    /// Multiply every element by `factor`
    pub fn scale(&mut self, factor: T) {
        self.tensor.scale(factor);
    }

    /// Sum along `axis`
    ///
    /// ```
    /// use ndmat_linalg::{Matrix, MatrixAxis};
    ///
    /// let m = Matrix::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
    /// assert_eq!(m.sum(MatrixAxis::Rows).unwrap().as_slice(), &[3, 7]);
    /// assert_eq!(m.sum(MatrixAxis::Rows).unwrap().dims(), (2, 1));
    /// assert_eq!(m.sum(MatrixAxis::Columns).unwrap().as_slice(), &[4, 6]);
    /// assert_eq!(m.sum(MatrixAxis::RowsAndColumns).unwrap().as_slice(), &[10]);
    /// ```
    pub fn sum(&self, axis: MatrixAxis) -> LinalgResult<Self> {
        self.reduce(axis, |lane| {
            lane.iter().fold(T::zero(), |acc, &v| acc + v)
        })
    }

    /// Product along `axis`
    pub fn product(&self, axis: MatrixAxis) -> LinalgResult<Self> {
        self.reduce(axis, |lane| {
            lane.iter().fold(T::one(), |acc, &v| acc * v)
        })
    }

    /// Apply `reducer` to every lane along `axis`
    pub fn reduce<F>(&self, axis: MatrixAxis, mut reducer: F) -> LinalgResult<Self>
    where
        F: FnMut(&[T]) -> T,
    {
        let reduced = self.tensor.reduce_axes(axis.axes(), |lane, _| reducer(lane))?;
        Self::from_tensor(reduced)
    }

    /// Try `self += rhs`, reporting a shape mismatch
    pub fn try_add_assign(&mut self, rhs: &Self) -> LinalgResult<()> {
        Ok(self.tensor.try_add_assign(&rhs.tensor)?)
    }

    /// Try `self -= rhs`, reporting a shape mismatch
    pub fn try_sub_assign(&mut self, rhs: &Self) -> LinalgResult<()> {
        Ok(self.tensor.try_sub_assign(&rhs.tensor)?)
    }
}

impl<T: NumericElement + PartialOrd> Matrix<T> {
    /// Smallest element along `axis`
    pub fn min(&self, axis: MatrixAxis) -> LinalgResult<Self> {
        self.reduce(axis, |lane| {
            lane.iter()
                .copied()
                .reduce(|a, b| if b < a { b } else { a })
                .unwrap_or_default()
        })
    }

    /// Largest element along `axis`
    pub fn max(&self, axis: MatrixAxis) -> LinalgResult<Self> {
        self.reduce(axis, |lane| {
            lane.iter()
                .copied()
                .reduce(|a, b| if b > a { b } else { a })
                .unwrap_or_default()
        })
    }
}

impl<T: NumericElement> AddAssign<&Matrix<T>> for Matrix<T> {
    fn add_assign(&mut self, rhs: &Matrix<T>) {
        self.tensor += &rhs.tensor;
    }
}

impl<T: NumericElement> SubAssign<&Matrix<T>> for Matrix<T> {
    fn sub_assign(&mut self, rhs: &Matrix<T>) {
        self.tensor -= &rhs.tensor;
    }
}

impl<T: NumericElement> MulAssign<T> for Matrix<T> {
    fn mul_assign(&mut self, factor: T) {
        self.scale(factor);
    }
}

impl<T: NumericElement> Add for &Matrix<T> {
    type Output = Matrix<T>;

    fn add(self, rhs: &Matrix<T>) -> Matrix<T> {
        let mut result = self.clone();
        result += rhs;
        result
    }
}

impl<T: NumericElement> Sub for &Matrix<T> {
    type Output = Matrix<T>;

    fn sub(self, rhs: &Matrix<T>) -> Matrix<T> {
        let mut result = self.clone();
        result -= rhs;
        result
    }
}

impl<T: NumericElement> Mul<T> for &Matrix<T> {
    type Output = Matrix<T>;

    fn mul(self, factor: T) -> Matrix<T> {
        let mut result = self.clone();
        result.scale(factor);
        result
    }
}

impl<T: NumericElement + Neg<Output = T>> Neg for &Matrix<T> {
    type Output = Matrix<T>;

    fn neg(self) -> Matrix<T> {
        Matrix {
            tensor: -&self.tensor,
        }
    }
}

impl<T: NumericElement + Neg<Output = T>> Neg for Matrix<T> {
    type Output = Matrix<T>;

    fn neg(self) -> Matrix<T> {
        Matrix {
            tensor: -self.tensor,
        }
    }
}
