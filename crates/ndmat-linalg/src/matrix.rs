//! The rank-2 matrix type
//!
//! [`Matrix<T>`] wraps a rank-2 [`Tensor<T>`] and adds row/column oriented
//! operations. It is either empty (no shape yet, `0x0`) or has exactly two
//! axes; storage is row-major, so element `(i, j)` lives at
//! `i * columns() + j`.

use std::fmt;
use std::ops::{Index, IndexMut};

use ndmat_core::{Element, Subscript, Tensor, TensorView, TensorViewMut};
use tracing::warn;

use crate::error::{LinalgError, LinalgResult};

/// Dense row-major matrix
///
/// # Examples
///
/// ```
/// use ndmat_linalg::Matrix;
///
/// let m = Matrix::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
/// assert_eq!((m.rows(), m.columns()), (2, 3));
/// assert_eq!(m[(1, 2)], 6);
/// assert_eq!(m.to_string(), "[1,2,3;\n 4,5,6];");
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(bound(serialize = "T: serde::Serialize")))]
#[cfg_attr(
    feature = "serde",
    serde(bound(deserialize = "T: serde::Deserialize<'de>"))
)]
pub struct Matrix<T> {
    pub(crate) tensor: Tensor<T>,
}

impl<T> Default for Matrix<T> {
    fn default() -> Self {
        Self {
            tensor: Tensor::empty(),
        }
    }
}

impl<T> Matrix<T> {
    /// An empty (`0x0`, uninitialized) matrix
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.tensor.size(0)
    }

    /// Number of columns
    pub fn columns(&self) -> usize {
        self.tensor.size(1)
    }

    /// `(rows, columns)`
    pub fn dims(&self) -> (usize, usize) {
        (self.rows(), self.columns())
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.tensor.len()
    }

    /// Whether the matrix holds no elements
    pub fn is_empty(&self) -> bool {
        self.tensor.is_empty()
    }

    /// Whether rows == columns (an empty matrix is square)
    pub fn is_square(&self) -> bool {
        self.rows() == self.columns()
    }

    /// Whether the matrix has exactly one row
    pub fn is_row_vector(&self) -> bool {
        self.rows() == 1
    }

    /// Whether the matrix has exactly one column
    pub fn is_column_vector(&self) -> bool {
        self.columns() == 1
    }

    /// Row-major storage
    pub fn as_slice(&self) -> &[T] {
        self.tensor.as_slice()
    }

    /// Mutable row-major storage
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.tensor.as_mut_slice()
    }

    /// Iterate over elements in row-major order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.tensor.iter()
    }

    /// Borrow the underlying tensor
    pub fn as_tensor(&self) -> &Tensor<T> {
        &self.tensor
    }

    /// Unwrap into the underlying tensor
    pub fn into_tensor(self) -> Tensor<T> {
        self.tensor
    }

    /// Element `(i, j)`, if in bounds
    pub fn get(&self, i: usize, j: usize) -> Option<&T> {
        if i < self.rows() && j < self.columns() {
            self.as_slice().get(i * self.columns() + j)
        } else {
            None
        }
    }

    /// Mutable element `(i, j)`, if in bounds
    pub fn get_mut(&mut self, i: usize, j: usize) -> Option<&mut T> {
        if i < self.rows() && j < self.columns() {
            let columns = self.columns();
            self.as_mut_slice().get_mut(i * columns + j)
        } else {
            None
        }
    }

    /// Exchange contents with `other` if `other` is non-empty
    pub fn swap(&mut self, other: &mut Self) -> bool {
        self.tensor.swap(&mut other.tensor)
    }

    pub(crate) fn check_row(&self, i: usize) -> LinalgResult<()> {
        if i >= self.rows() {
            warn!(row = i, rows = self.rows(), "row index out of bounds");
            return Err(LinalgError::IndexOutOfBounds {
                kind: "row",
                index: i,
                len: self.rows(),
            });
        }
        Ok(())
    }

    pub(crate) fn check_column(&self, j: usize) -> LinalgResult<()> {
        if j >= self.columns() {
            warn!(column = j, columns = self.columns(), "column index out of bounds");
            return Err(LinalgError::IndexOutOfBounds {
                kind: "column",
                index: j,
                len: self.columns(),
            });
        }
        Ok(())
    }

    pub(crate) fn require_square(&self, operation: &'static str) -> LinalgResult<()> {
        if !self.is_square() {
            warn!(operation, rows = self.rows(), columns = self.columns(), "matrix is not square");
            return Err(LinalgError::NotSquare {
                operation,
                rows: self.rows(),
                columns: self.columns(),
            });
        }
        Ok(())
    }
}

impl<T: Element> Matrix<T> {
    /// A `rows x columns` matrix filled with `T::default()`
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            tensor: Tensor::new(&[rows, columns]),
        }
    }

    /// A `rows x columns` matrix filled with `value`
    pub fn from_elem(rows: usize, columns: usize, value: T) -> Self {
        Self {
            tensor: Tensor::from_elem(&[rows, columns], value),
        }
    }

    /// Build from row-major data
    ///
    /// # Errors
    ///
    /// `data.len()` must equal `rows * columns`.
    pub fn from_vec(data: Vec<T>, rows: usize, columns: usize) -> LinalgResult<Self> {
        Ok(Self {
            tensor: Tensor::from_vec(data, &[rows, columns])?,
        })
    }

    /// Build from nested rows; the column count comes from the first row
    ///
    /// An empty outer vector gives an empty matrix. Ragged input is an
    /// error.
    pub fn from_rows(rows: Vec<Vec<T>>) -> LinalgResult<Self> {
        let Some(first) = rows.first() else {
            return Ok(Self::empty());
        };
        let columns = first.len();
        let row_count = rows.len();
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != columns) {
            warn!(row = i, expected = columns, got = row.len(), "ragged rows");
            return Err(LinalgError::DimensionMismatch {
                operation: "from_rows",
                lhs: (1, columns),
                rhs: (1, row.len()),
            });
        }
        Self::from_vec(rows.into_iter().flatten().collect(), row_count, columns)
    }

    /// Wrap a rank-2 tensor (or an uninitialized one)
    pub fn from_tensor(tensor: Tensor<T>) -> LinalgResult<Self> {
        match tensor.rank() {
            0 | 2 => Ok(Self { tensor }),
            rank => {
                warn!(rank, "matrix requires a rank-2 tensor");
                Err(ndmat_core::TensorError::RankMismatch {
                    operation: "from_tensor",
                    expected: 2,
                    got: rank,
                }
                .into())
            }
        }
    }

    /// Reallocate as `rows x columns`, discarding contents
    pub fn initialize(&mut self, rows: usize, columns: usize) {
        self.tensor.initialize(&[rows, columns]);
    }

    /// Resize, optionally keeping the overlapping top-left block
    pub fn resize(&mut self, rows: usize, columns: usize, preserve: bool) -> LinalgResult<()> {
        self.tensor.resize(&[rows, columns], preserve)?;
        Ok(())
    }

    /// Set every element to `value`
    pub fn fill(&mut self, value: T) {
        self.tensor.fill(value);
    }

    /// Replace shape and storage at once; `data.len()` must equal
    /// `rows * columns`
    pub(crate) fn replace_storage(&mut self, rows: usize, columns: usize, data: Vec<T>) {
        debug_assert_eq!(data.len(), rows * columns);
        self.tensor.initialize(&[rows, columns]);
        for (dst, src) in self.tensor.iter_mut().zip(data) {
            *dst = src;
        }
    }

    /// Read-only view onto the listed rows and columns
    pub fn view(&self, rows: Vec<usize>, columns: Vec<usize>) -> LinalgResult<TensorView<'_, T>> {
        Ok(self.tensor.view(Subscript::from_subsets(vec![rows, columns]))?)
    }

    /// Write-through view onto the listed rows and columns
    pub fn view_mut(
        &mut self,
        rows: Vec<usize>,
        columns: Vec<usize>,
    ) -> LinalgResult<TensorViewMut<'_, T>> {
        Ok(self
            .tensor
            .view_mut(Subscript::from_subsets(vec![rows, columns]))?)
    }

    /// Write-through view of row `i`
    pub fn row_view_mut(&mut self, i: usize) -> LinalgResult<TensorViewMut<'_, T>> {
        self.check_row(i)?;
        let columns = (0..self.columns()).collect();
        self.view_mut(vec![i], columns)
    }

    /// Write-through view of column `j`
    pub fn column_view_mut(&mut self, j: usize) -> LinalgResult<TensorViewMut<'_, T>> {
        self.check_column(j)?;
        let rows = (0..self.rows()).collect();
        self.view_mut(rows, vec![j])
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, (i, j): (usize, usize)) -> &T {
        match self.get(i, j) {
            Some(value) => value,
            None => panic!(
                "index ({}, {}) out of bounds for {}x{} matrix",
                i,
                j,
                self.rows(),
                self.columns()
            ),
        }
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut T {
        let (rows, columns) = self.dims();
        match self.get_mut(i, j) {
            Some(value) => value,
            None => panic!(
                "index ({}, {}) out of bounds for {}x{} matrix",
                i, j, rows, columns
            ),
        }
    }
}

impl<T: Element> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.tensor, f)
    }
}

impl<T> From<Matrix<T>> for Tensor<T> {
    fn from(matrix: Matrix<T>) -> Self {
        matrix.tensor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_matrix() {
        let m = Matrix::<f64>::empty();
        assert_eq!(m.dims(), (0, 0));
        assert!(m.is_empty());
        assert!(m.is_square());
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        let err = Matrix::from_rows(vec![vec![1, 2], vec![3]]).unwrap_err();
        assert!(matches!(err, LinalgError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_from_tensor_requires_rank_two() {
        assert!(Matrix::from_tensor(Tensor::<i32>::new(&[2, 2, 2])).is_err());
        assert!(Matrix::from_tensor(Tensor::<i32>::new(&[2, 3])).is_ok());
    }

    #[test]
    fn test_index_and_get() {
        let mut m = Matrix::from_vec(vec![1, 2, 3, 4, 5, 6], 3, 2).unwrap();
        assert_eq!(m[(2, 1)], 6);
        m[(0, 1)] = 20;
        assert_eq!(m.as_slice(), &[1, 20, 3, 4, 5, 6]);
        assert_eq!(m.get(3, 0), None);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_index_panics() {
        let m = Matrix::<i32>::new(2, 2);
        let _ = m[(0, 2)];
    }

    #[test]
    fn test_resize_preserves_block() {
        let mut m = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        m.resize(3, 3, true).unwrap();
        let expected = Matrix::from_rows(vec![
            vec![1.0, 2.0, 0.0],
            vec![3.0, 4.0, 0.0],
            vec![0.0, 0.0, 0.0],
        ])
        .unwrap();
        assert_eq!(m, expected);
    }

    #[test]
    fn test_row_and_column_views() {
        let mut m = Matrix::from_vec((0..9).collect(), 3, 3).unwrap();
        m.row_view_mut(1).unwrap().fill(-1);
        m.column_view_mut(2).unwrap().fill(7);
        assert_eq!(m.as_slice(), &[0, 1, 7, -1, -1, 7, 6, 7, 7]);
        assert!(m.row_view_mut(3).is_err());
    }
}
