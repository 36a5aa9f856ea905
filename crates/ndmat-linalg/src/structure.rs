//! Structural matrix operations
//!
//! Row/column access and insertion, concatenation, diagonal and band
//! handling, permutation and transposition. Everything here works for any
//! [`Element`] type.
//!
//! # Diagonal numbering
//!
//! Band operations number diagonals relative to the main diagonal: `0` is the
//! main diagonal, `k > 0` the k-th super-diagonal (cells with `j - i == k`)
//! and `k < 0` the |k|-th sub-diagonal.

use ndmat_core::Element;
use tracing::{debug, warn};

use crate::error::{LinalgError, LinalgResult};
use crate::matrix::Matrix;

impl<T: Element> Matrix<T> {
    /// Append the columns of `other` to the right of this matrix
    ///
    /// An empty receiver becomes a copy of `other`. An `other` without
    /// columns leaves the receiver as is, provided the row counts agree.
    ///
    /// # Errors
    ///
    /// [`LinalgError::DimensionMismatch`] when the row counts differ, even
    /// if `other` holds no elements; the receiver is left unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use ndmat_linalg::Matrix;
    ///
    /// let mut a = Matrix::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
    /// let b = Matrix::from_rows(vec![vec![5], vec![6]]).unwrap();
    /// a.augment(&b).unwrap();
    /// assert_eq!(a.as_slice(), &[1, 2, 5, 3, 4, 6]);
    /// ```
    pub fn augment(&mut self, other: &Self) -> LinalgResult<()> {
        if self.is_empty() {
            *self = other.clone();
            return Ok(());
        }
        if self.rows() != other.rows() {
            warn!(lhs = ?self.dims(), rhs = ?other.dims(), "cannot augment: row counts differ");
            return Err(LinalgError::DimensionMismatch {
                operation: "augment",
                lhs: self.dims(),
                rhs: other.dims(),
            });
        }
        if other.columns() == 0 {
            return Ok(());
        }

        let (rows, left, right) = (self.rows(), self.columns(), other.columns());
        let mut data = Vec::with_capacity(rows * (left + right));
        for i in 0..rows {
            data.extend_from_slice(&self.as_slice()[i * left..(i + 1) * left]);
            data.extend_from_slice(&other.as_slice()[i * right..(i + 1) * right]);
        }
        self.replace_storage(rows, left + right, data);
        Ok(())
    }

    /// Copy of this matrix with `other` appended column-wise
    pub fn augmented(&self, other: &Self) -> LinalgResult<Self> {
        let mut result = self.clone();
        result.augment(other)?;
        Ok(result)
    }

    /// Grow a vector-shaped matrix by one element
    ///
    /// An empty matrix or a row vector grows by one column; a column vector
    /// with more than one row grows by one row.
    ///
    /// ```
    /// use ndmat_linalg::Matrix;
    ///
    /// let mut v = Matrix::empty();
    /// v.push_value(1.0).unwrap();
    /// v.push_value(2.0).unwrap();
    /// assert_eq!(v.dims(), (1, 2));
    /// ```
    pub fn push_value(&mut self, value: T) -> LinalgResult<()> {
        let (rows, columns) = self.dims();
        let mut data = self.as_slice().to_vec();
        data.push(value);
        if self.is_empty() {
            self.replace_storage(1, 1, data);
        } else if rows == 1 {
            self.replace_storage(1, columns + 1, data);
        } else if columns == 1 {
            self.replace_storage(rows + 1, 1, data);
        } else {
            warn!(rows, columns, "push_value requires a row or column vector");
            return Err(LinalgError::DimensionMismatch {
                operation: "push_value",
                lhs: (rows, columns),
                rhs: (1, 1),
            });
        }
        Ok(())
    }

    /// Insert `values` as a new row before row `i`
    ///
    /// `i == rows()` appends. On a matrix without rows or columns the
    /// column count is taken from `values`; a `0 x c` matrix with `c > 0`
    /// still requires `c` values.
    pub fn insert_row(&mut self, i: usize, values: &[T]) -> LinalgResult<()> {
        let (rows, columns) = self.dims();
        if rows == 0 && i == 0 && (columns == 0 || values.len() == columns) {
            self.replace_storage(1, values.len(), values.to_vec());
            return Ok(());
        }
        if i > rows || values.len() != columns {
            warn!(row = i, rows, columns, len = values.len(), "row could not be inserted");
            return Err(LinalgError::DimensionMismatch {
                operation: "insert_row",
                lhs: (rows, columns),
                rhs: (1, values.len()),
            });
        }

        let mut data = Vec::with_capacity((rows + 1) * columns);
        data.extend_from_slice(&self.as_slice()[..i * columns]);
        data.extend_from_slice(values);
        data.extend_from_slice(&self.as_slice()[i * columns..]);
        self.replace_storage(rows + 1, columns, data);
        Ok(())
    }

    /// Insert `values` as a new column before column `j`
    ///
    /// `j == columns()` appends. On a matrix without rows or columns the
    /// row count is taken from `values`; an `r x 0` matrix with `r > 0`
    /// still requires `r` values.
    pub fn insert_column(&mut self, j: usize, values: &[T]) -> LinalgResult<()> {
        let (rows, columns) = self.dims();
        if columns == 0 && j == 0 && (rows == 0 || values.len() == rows) {
            self.replace_storage(values.len(), 1, values.to_vec());
            return Ok(());
        }
        if j > columns || values.len() != rows {
            warn!(column = j, rows, columns, len = values.len(), "column could not be inserted");
            return Err(LinalgError::DimensionMismatch {
                operation: "insert_column",
                lhs: (rows, columns),
                rhs: (values.len(), 1),
            });
        }

        let mut data = Vec::with_capacity(rows * (columns + 1));
        for (i, value) in values.iter().enumerate() {
            let row = &self.as_slice()[i * columns..(i + 1) * columns];
            data.extend_from_slice(&row[..j]);
            data.push(value.clone());
            data.extend_from_slice(&row[j..]);
        }
        self.replace_storage(rows, columns + 1, data);
        Ok(())
    }

    /// Copy of row `i`
    pub fn row(&self, i: usize) -> LinalgResult<Vec<T>> {
        self.check_row(i)?;
        let columns = self.columns();
        Ok(self.as_slice()[i * columns..(i + 1) * columns].to_vec())
    }

    /// Copy of column `j`
    pub fn column(&self, j: usize) -> LinalgResult<Vec<T>> {
        self.check_column(j)?;
        Ok(self
            .as_slice()
            .iter()
            .skip(j)
            .step_by(self.columns())
            .cloned()
            .collect())
    }

    /// Overwrite row `i`; `values` must have `columns()` entries
    pub fn set_row(&mut self, i: usize, values: &[T]) -> LinalgResult<()> {
        self.check_row(i)?;
        let columns = self.columns();
        if values.len() != columns {
            warn!(row = i, columns, len = values.len(), "row length mismatch");
            return Err(LinalgError::DimensionMismatch {
                operation: "set_row",
                lhs: (1, columns),
                rhs: (1, values.len()),
            });
        }
        self.as_mut_slice()[i * columns..(i + 1) * columns].clone_from_slice(values);
        Ok(())
    }

    /// Overwrite column `j`; `values` must have `rows()` entries
    pub fn set_column(&mut self, j: usize, values: &[T]) -> LinalgResult<()> {
        self.check_column(j)?;
        let (rows, columns) = self.dims();
        if values.len() != rows {
            warn!(column = j, rows, len = values.len(), "column length mismatch");
            return Err(LinalgError::DimensionMismatch {
                operation: "set_column",
                lhs: (rows, 1),
                rhs: (values.len(), 1),
            });
        }
        for (cell, value) in self.as_mut_slice().iter_mut().skip(j).step_by(columns).zip(values) {
            *cell = value.clone();
        }
        Ok(())
    }

    /// Elements `(i, i)` for `i < min(rows, columns)`
    pub fn diagonal(&self) -> Vec<T> {
        let n = self.rows().min(self.columns());
        (0..n).map(|i| self[(i, i)].clone()).collect()
    }

    /// Overwrite the leading diagonal elements; extra entries are ignored
    pub fn set_diagonal(&mut self, values: &[T]) {
        let n = self.rows().min(self.columns());
        for (i, value) in values.iter().take(n).enumerate() {
            self[(i, i)] = value.clone();
        }
    }

    /// Set the main diagonal to `diagonal` and every other cell to
    /// `off_diagonal`
    pub fn fill_diagonal(&mut self, diagonal: T, off_diagonal: T) {
        let columns = self.columns();
        for (offset, cell) in self.as_mut_slice().iter_mut().enumerate() {
            *cell = if offset / columns == offset % columns {
                diagonal.clone()
            } else {
                off_diagonal.clone()
            };
        }
    }

    /// The super-diagonal, main diagonal and sub-diagonal, in that order
    ///
    /// ```
    /// use ndmat_linalg::Matrix;
    ///
    /// let m = Matrix::from_rows(vec![vec![1, 2, 0], vec![3, 4, 5], vec![0, 6, 7]]).unwrap();
    /// let (upper, diagonal, lower) = m.tridiagonal();
    /// assert_eq!(upper, vec![2, 5]);
    /// assert_eq!(diagonal, vec![1, 4, 7]);
    /// assert_eq!(lower, vec![3, 6]);
    /// ```
    pub fn tridiagonal(&self) -> (Vec<T>, Vec<T>, Vec<T>) {
        let (rows, columns) = self.dims();
        let upper = (0..rows.min(columns.saturating_sub(1)))
            .map(|i| self[(i, i + 1)].clone())
            .collect();
        let lower = (0..rows.saturating_sub(1).min(columns))
            .map(|i| self[(i + 1, i)].clone())
            .collect();
        (upper, self.diagonal(), lower)
    }

    /// Overwrite the three central diagonals
    ///
    /// Each slice writes as many leading elements of its diagonal as it
    /// has; extra entries are ignored.
    pub fn set_tridiagonal(&mut self, upper: &[T], diagonal: &[T], lower: &[T]) {
        let (rows, columns) = self.dims();
        let n_upper = rows.min(columns.saturating_sub(1));
        for (i, value) in upper.iter().take(n_upper).enumerate() {
            self[(i, i + 1)] = value.clone();
        }
        self.set_diagonal(diagonal);
        let n_lower = rows.saturating_sub(1).min(columns);
        for (i, value) in lower.iter().take(n_lower).enumerate() {
            self[(i + 1, i)] = value.clone();
        }
    }

    /// Reset every cell outside diagonals `below ..= above` to `T::default()`
    ///
    /// The bounds are swapped when `below > above`.
    ///
    /// ```
    /// use ndmat_linalg::Matrix;
    ///
    /// let mut m = Matrix::from_vec((1..=9).collect(), 3, 3).unwrap();
    /// m.remove_outside_band(1, -1);
    /// assert_eq!(m.as_slice(), &[1, 2, 0, 4, 5, 6, 0, 8, 9]);
    /// ```
    pub fn remove_outside_band(&mut self, above: isize, below: isize) {
        let (above, below) = if below > above {
            (below, above)
        } else {
            (above, below)
        };
        let columns = self.columns();
        for (offset, cell) in self.as_mut_slice().iter_mut().enumerate() {
            let diagonal = (offset % columns) as isize - (offset / columns) as isize;
            if diagonal < below || diagonal > above {
                *cell = T::default();
            }
        }
    }

    /// Copy of the band between diagonals `below` and `above`
    pub fn band(&self, above: isize, below: isize) -> Self {
        let mut result = self.clone();
        result.remove_outside_band(above, below);
        result
    }

    /// Copy keeping diagonal `below` and everything above it
    pub fn upper_triangle(&self, below: isize) -> Self {
        let mut result = self.clone();
        result.remove_lower_triangle(below);
        result
    }

    /// Copy keeping diagonal `above` and everything below it
    pub fn lower_triangle(&self, above: isize) -> Self {
        let mut result = self.clone();
        result.remove_upper_triangle(above);
        result
    }

    /// Zero everything below diagonal `below`
    pub fn remove_lower_triangle(&mut self, below: isize) {
        let above = (self.columns() as isize - 1).max(below);
        self.remove_outside_band(above, below);
    }

    /// Zero everything above diagonal `above`
    pub fn remove_upper_triangle(&mut self, above: isize) {
        let below = (1 - self.rows() as isize).min(above);
        self.remove_outside_band(above, below);
    }

    /// Zero everything off the main diagonal
    pub fn remove_off_diagonals(&mut self) {
        self.remove_outside_band(0, 0);
    }

    /// Reorder rows so that new row `i` is old row `permutation[i]`
    ///
    /// A shorter permutation fixes the leading rows only; the remaining rows
    /// keep their relative order.
    ///
    /// # Errors
    ///
    /// Out-of-range or repeated entries; the matrix is left unchanged.
    pub fn permute_rows(&mut self, permutation: &[usize]) -> LinalgResult<()> {
        Ok(self.tensor.permute(0, permutation)?)
    }

    /// Reorder columns so that new column `j` is old column `permutation[j]`
    pub fn permute_columns(&mut self, permutation: &[usize]) -> LinalgResult<()> {
        Ok(self.tensor.permute(1, permutation)?)
    }

    /// Transpose in place
    pub fn transpose(&mut self) {
        let (rows, columns) = self.dims();
        if rows <= 1 && columns <= 1 {
            return;
        }
        let mut scratch = Vec::with_capacity(self.len());
        for j in 0..columns {
            scratch.extend(self.as_slice().iter().skip(j).step_by(columns).cloned());
        }
        debug!(rows, columns, "transpose matrix");
        self.replace_storage(columns, rows, scratch);
    }

    /// Transposed copy
    pub fn transposed(&self) -> Self {
        let mut result = self.clone();
        result.transpose();
        result
    }
}
