//! Matrix multiplication with optional operand transposition
//!
//! Transposition is expressed by swapping the row and column strides of an
//! operand; no transposed copy is ever built. The product accumulates into
//! a local buffer which is moved into the destination once complete, so a
//! destination holding one of the operands' values is never read while it
//! is being written.

use std::ops::{Mul, MulAssign};

use ndmat_core::NumericElement;
use tracing::warn;

use crate::error::{LinalgError, LinalgResult};
use crate::matrix::Matrix;

/// Which operands of a product are used transposed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransposeMode {
    /// `lhs * rhs`
    #[default]
    None,
    /// `lhs^T * rhs`
    TransposeLhs,
    /// `lhs * rhs^T`
    TransposeRhs,
    /// `lhs^T * rhs^T`
    TransposeBoth,
}

impl TransposeMode {
    fn lhs_transposed(self) -> bool {
        matches!(self, TransposeMode::TransposeLhs | TransposeMode::TransposeBoth)
    }

    fn rhs_transposed(self) -> bool {
        matches!(self, TransposeMode::TransposeRhs | TransposeMode::TransposeBoth)
    }
}

/// Strided read access to a possibly transposed operand
struct Operand<'a, T> {
    data: &'a [T],
    rows: usize,
    columns: usize,
    row_stride: usize,
    column_stride: usize,
}

impl<'a, T: Copy> Operand<'a, T> {
    fn new(matrix: &'a Matrix<T>, transposed: bool) -> Self {
        let (rows, columns) = matrix.dims();
        if transposed {
            Self {
                data: matrix.as_slice(),
                rows: columns,
                columns: rows,
                row_stride: 1,
                column_stride: columns,
            }
        } else {
            Self {
                data: matrix.as_slice(),
                rows,
                columns,
                row_stride: columns,
                column_stride: 1,
            }
        }
    }

    #[inline]
    fn at(&self, i: usize, j: usize) -> T {
        self.data[i * self.row_stride + j * self.column_stride]
    }
}

/// Compute `op(lhs) * op(rhs)` into `result`
///
/// `result` is reshaped to the product's dimensions.
///
/// # Errors
///
/// [`LinalgError::DimensionMismatch`] when the inner dimensions of the
/// (transposed) operands differ; `result` is left unchanged.
///
/// # Examples
///
/// ```
/// use ndmat_linalg::{multiply_into, Matrix, TransposeMode};
///
/// let a = Matrix::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
/// let mut product = Matrix::empty();
/// multiply_into(&a, &a, &mut product, TransposeMode::TransposeLhs).unwrap();
/// assert_eq!(product.as_slice(), &[10, 14, 14, 20]);
/// ```
pub fn multiply_into<T: NumericElement>(
    lhs: &Matrix<T>,
    rhs: &Matrix<T>,
    result: &mut Matrix<T>,
    mode: TransposeMode,
) -> LinalgResult<()> {
    let (rows, columns, data) = product(lhs, rhs, mode)?;
    result.replace_storage(rows, columns, data);
    Ok(())
}

fn product<T: NumericElement>(
    lhs: &Matrix<T>,
    rhs: &Matrix<T>,
    mode: TransposeMode,
) -> LinalgResult<(usize, usize, Vec<T>)> {
    let a = Operand::new(lhs, mode.lhs_transposed());
    let b = Operand::new(rhs, mode.rhs_transposed());
    if a.columns != b.rows {
        warn!(
            lhs = ?(a.rows, a.columns),
            rhs = ?(b.rows, b.columns),
            ?mode,
            "incompatible dimensions for multiplication"
        );
        return Err(LinalgError::DimensionMismatch {
            operation: "multiply",
            lhs: (a.rows, a.columns),
            rhs: (b.rows, b.columns),
        });
    }

    let mut scratch = vec![T::zero(); a.rows * b.columns];
    for i in 0..a.rows {
        for k in 0..a.columns {
            let factor = a.at(i, k);
            let row = &mut scratch[i * b.columns..(i + 1) * b.columns];
            for (j, cell) in row.iter_mut().enumerate() {
                *cell += factor * b.at(k, j);
            }
        }
    }
    Ok((a.rows, b.columns, scratch))
}

impl<T: NumericElement> Matrix<T> {
    /// `self * rhs` as a new matrix
    pub fn multiply(&self, rhs: &Self) -> LinalgResult<Self> {
        let mut result = Self::empty();
        multiply_into(self, rhs, &mut result, TransposeMode::None)?;
        Ok(result)
    }

    /// `self^T * rhs` without forming the transpose
    pub fn pre_multiply_transpose(&self, rhs: &Self) -> LinalgResult<Self> {
        let mut result = Self::empty();
        multiply_into(self, rhs, &mut result, TransposeMode::TransposeLhs)?;
        Ok(result)
    }

    /// `self * rhs^T` without forming the transpose
    pub fn post_multiply_transpose(&self, rhs: &Self) -> LinalgResult<Self> {
        let mut result = Self::empty();
        multiply_into(self, rhs, &mut result, TransposeMode::TransposeRhs)?;
        Ok(result)
    }

    /// Replace `self` with `op(self) * op(rhs)`
    pub fn multiply_assign(&mut self, rhs: &Self, mode: TransposeMode) -> LinalgResult<()> {
        let (rows, columns, data) = product(self, rhs, mode)?;
        self.replace_storage(rows, columns, data);
        Ok(())
    }
}

impl<T: NumericElement> Mul for &Matrix<T> {
    type Output = Matrix<T>;

    /// Matrix product; incompatible operands log a warning and yield an
    /// empty matrix
    fn mul(self, rhs: &Matrix<T>) -> Matrix<T> {
        self.multiply(rhs).unwrap_or_default()
    }
}

impl<T: NumericElement> MulAssign<&Matrix<T>> for Matrix<T> {
    /// In-place product; incompatible operands log a warning and leave
    /// `self` unchanged
    fn mul_assign(&mut self, rhs: &Matrix<T>) {
        let _ = self.multiply_assign(rhs, TransposeMode::None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn a() -> Matrix<i64> {
        Matrix::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap()
    }

    #[test]
    fn test_multiply_shapes() {
        let b = Matrix::from_rows(vec![vec![1, 0], vec![0, 1], vec![1, 1]]).unwrap();
        let c = a().multiply(&b).unwrap();
        assert_eq!(c.dims(), (2, 2));
        assert_eq!(c.as_slice(), &[4, 5, 10, 11]);
    }

    #[test]
    fn test_transpose_modes() {
        let m = a();
        let gram = m.pre_multiply_transpose(&m).unwrap();
        assert_eq!(gram, m.transposed().multiply(&m).unwrap());

        let outer = m.post_multiply_transpose(&m).unwrap();
        assert_eq!(outer.as_slice(), &[14, 32, 32, 77]);

        let mut both = Matrix::empty();
        assert!(multiply_into(&m, &m, &mut both, TransposeMode::TransposeBoth).is_err());
        let square = Matrix::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
        multiply_into(&square, &square, &mut both, TransposeMode::TransposeBoth).unwrap();
        assert_eq!(both, square.multiply(&square).unwrap().transposed());
    }

    #[test]
    fn test_mismatch_leaves_destination() {
        let mut result = Matrix::from_elem(1, 1, 7);
        let err = multiply_into(&a(), &a(), &mut result, TransposeMode::None).unwrap_err();
        assert!(matches!(err, LinalgError::DimensionMismatch { .. }));
        assert_eq!(result.as_slice(), &[7]);
    }

    #[test]
    fn test_multiply_assign_self() {
        let mut m = Matrix::from_rows(vec![vec![1, 1], vec![0, 1]]).unwrap();
        let copy = m.clone();
        m *= &copy;
        assert_eq!(m.as_slice(), &[1, 2, 0, 1]);

        let mut row = a();
        row *= &a();
        assert_eq!(row, a());
    }

    #[test]
    fn test_transpose_mode_default() {
        assert_eq!(TransposeMode::default(), TransposeMode::None);
        assert!(TransposeMode::TransposeBoth.lhs_transposed());
        assert!(TransposeMode::TransposeBoth.rhs_transposed());
        assert!(!TransposeMode::TransposeRhs.lhs_transposed());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_transpose_mode_is_serde() {
        fn assert_serde<S: serde::Serialize + serde::de::DeserializeOwned>() {}
        assert_serde::<TransposeMode>();
        assert_serde::<crate::MatrixAxis>();
    }

    #[test]
    fn test_operator_mul() {
        let eye = Matrix::<i64>::create_identity(3);
        assert_eq!(&a() * &eye, a());
        assert!((&a() * &a()).is_empty());
    }
}
