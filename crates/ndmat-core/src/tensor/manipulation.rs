//! Structural operations: (re)initialization, resizing, axis maps,
//! permutation and squeezing
//!
//! Every operation here preserves the storage invariant
//! `len() == product(shape())`. Validation failures are logged with
//! `tracing::warn!` and returned as [`TensorError`]s; the tensor is left
//! untouched in that case.

use tracing::{debug, warn};

use super::types::Tensor;
use crate::element::Element;
use crate::error::{Result, TensorError};
use crate::permutation::{complete_permutation, relative_permutation};
use crate::sets::Subscript;

impl<T: Element> Tensor<T> {
    /// Reallocate to a new shape, discarding the previous contents
    ///
    /// Every cell of the result holds `T::default()`. Passing an empty shape
    /// returns the tensor to the uninitialized state.
    ///
    /// # Examples
    ///
    /// ```
    /// use ndmat_core::Tensor;
    ///
    /// let mut tensor = Tensor::from_vec(vec![1, 2, 3, 4], &[2, 2]).unwrap();
    /// tensor.initialize(&[3]);
    /// assert_eq!(tensor.as_slice(), &[0, 0, 0]);
    /// ```
    pub fn initialize(&mut self, shape: &[usize]) {
        debug!(from = ?self.shape(), to = ?shape, "initialize tensor");
        *self = Self::new(shape);
    }

    /// Resize to a new shape
    ///
    /// With `preserve == false` this is [`Tensor::initialize`], except that
    /// resizing to the current shape is a no-op. With `preserve == true`, the
    /// overlapping hyper-rectangle (per axis `min(old, new)`) keeps its values
    /// at the same multi-indices and every new cell holds `T::default()`.
    ///
    /// # Errors
    ///
    /// Preserving resize between two different non-zero ranks fails with
    /// [`TensorError::RankMismatch`] and leaves the tensor unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use ndmat_core::Tensor;
    ///
    /// let mut tensor = Tensor::from_vec(vec![1, 2, 3, 4], &[2, 2]).unwrap();
    /// tensor.resize(&[3, 3], true).unwrap();
    /// assert_eq!(tensor.as_slice(), &[1, 2, 0, 3, 4, 0, 0, 0, 0]);
    /// ```
    pub fn resize(&mut self, shape: &[usize], preserve: bool) -> Result<()> {
        if shape == self.shape() {
            return Ok(());
        }
        if !preserve || !self.is_initialized() || shape.is_empty() {
            self.initialize(shape);
            return Ok(());
        }
        if shape.len() != self.rank() {
            warn!(from = ?self.shape(), to = ?shape, "preserving resize cannot change rank");
            return Err(TensorError::RankMismatch {
                operation: "resize",
                expected: self.rank(),
                got: shape.len(),
            });
        }

        let overlap: Vec<usize> = self
            .shape()
            .iter()
            .zip(shape)
            .map(|(&old, &new)| old.min(new))
            .collect();
        let selector = Subscript::generate(&overlap);
        let kept = self.subscript.gather(&self.data, &selector, T::clone)?;

        let mut resized = Self::new(shape);
        resized
            .subscript
            .scatter(&kept, &mut resized.data, &selector, T::clone)?;
        debug!(from = ?self.shape(), to = ?shape, kept = kept.len(), "resize tensor");
        *self = resized;
        Ok(())
    }

    /// Reinitialize to `shape` and fill every cell with `value`
    pub fn resize_with_value(&mut self, value: T, shape: &[usize]) {
        self.initialize(shape);
        self.fill(value);
    }

    /// Set every element to `value`
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    /// Overwrite the storage from a row-major slice of the same length
    pub fn assign_slice(&mut self, values: &[T]) -> Result<()> {
        if values.len() != self.data.len() {
            warn!(expected = self.data.len(), got = values.len(), "assign length mismatch");
            return Err(TensorError::LengthMismatch {
                expected: self.data.len(),
                got: values.len(),
            });
        }
        self.data.clone_from_slice(values);
        Ok(())
    }

    /// Reorder the elements along one axis
    ///
    /// After the call, position `i` along `axis` holds what was at position
    /// `permutation[i]`. Only the first `min(size(axis), permutation.len())`
    /// entries are used; positions the prefix leaves unmentioned receive the
    /// remaining elements in their original order.
    ///
    /// # Errors
    ///
    /// An invalid axis, an entry at or beyond the axis size, or a repeated
    /// entry is logged and reported; the tensor is left unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use ndmat_core::Tensor;
    ///
    /// let mut tensor = Tensor::from_vec(vec![1, 2, 3, 4, 5, 6], &[2, 3]).unwrap();
    /// tensor.permute(1, &[2, 0, 1]).unwrap();
    /// assert_eq!(tensor.as_slice(), &[3, 1, 2, 6, 4, 5]);
    /// ```
    pub fn permute(&mut self, axis: usize, permutation: &[usize]) -> Result<()> {
        self.check_axis(axis, "permute")?;
        let size = self.shape()[axis];
        let full = complete_permutation(permutation, size)?;
        let relative = relative_permutation(&full);
        if relative.iter().enumerate().all(|(i, &r)| i == r) {
            return Ok(());
        }

        let stride = self.subscript.strides()[axis];
        for start in self.subscript.lane_starts(axis)? {
            for (i, &r) in relative.iter().enumerate() {
                if i != r {
                    self.data.swap(start + i * stride, start + r * stride);
                }
            }
        }
        Ok(())
    }

    /// Remove size-one axes until the rank reaches `max(min_rank, 2)`
    ///
    /// Axes are removed in ascending order. Element order is unchanged and
    /// no axis of size other than one is ever removed, so the result may keep
    /// a higher rank than requested.
    ///
    /// # Examples
    ///
    /// ```
    /// use ndmat_core::Tensor;
    ///
    /// let tensor = Tensor::<f64>::new(&[1, 3, 1, 4]);
    /// assert_eq!(tensor.squeeze(2).shape(), &[3, 4]);
    /// assert_eq!(tensor.squeeze(3).shape(), &[3, 1, 4]);
    /// ```
    pub fn squeeze(&self, min_rank: usize) -> Self {
        let target = min_rank.max(2);
        let mut shape = self.dimensions();
        while shape.len() > target {
            match shape.iter().position(|&n| n == 1) {
                Some(axis) => {
                    shape.remove(axis);
                }
                None => break,
            }
        }
        Self::from_parts(&shape, self.data.clone())
    }

    /// Reduce the listed axes one after another, keeping each reduced axis
    /// with size one
    ///
    /// For every lane along an axis, `reducer(lane, axis)` receives the lane's
    /// values in index order and returns the value stored at index zero of
    /// the collapsed axis. Axes are processed in the order given.
    ///
    /// # Errors
    ///
    /// [`TensorError::InvalidAxis`] for an axis at or beyond the rank and
    /// [`TensorError::DuplicateAxis`] for a repeated axis.
    pub fn reduce_axes<F>(&self, axes: &[usize], mut reducer: F) -> Result<Self>
    where
        F: FnMut(&[T], usize) -> T,
    {
        for (i, &axis) in axes.iter().enumerate() {
            self.check_axis(axis, "map")?;
            if axes[..i].contains(&axis) {
                warn!(axis, "axis listed more than once");
                return Err(TensorError::DuplicateAxis(axis));
            }
        }

        let mut reduced = self.clone();
        for &axis in axes {
            reduced = reduced.reduce_axis(axis, &mut reducer)?;
        }
        Ok(reduced)
    }

    /// Reduce the listed axes and squeeze the result
    ///
    /// Equivalent to [`Tensor::reduce_axes`] followed by
    /// `squeeze(rank - axes.len())`, so the result never drops below rank 2.
    ///
    /// # Examples
    ///
    /// ```
    /// use ndmat_core::Tensor;
    ///
    /// let tensor = Tensor::from_vec((1..=24).collect::<Vec<i64>>(), &[2, 3, 4]).unwrap();
    /// let sums = tensor.map(&[1], |lane, _| lane.iter().sum()).unwrap();
    /// assert_eq!(sums.shape(), &[2, 4]);
    /// assert_eq!(sums.as_slice()[0], 1 + 5 + 9);
    /// ```
    pub fn map<F>(&self, axes: &[usize], reducer: F) -> Result<Self>
    where
        F: FnMut(&[T], usize) -> T,
    {
        let reduced = self.reduce_axes(axes, reducer)?;
        Ok(reduced.squeeze(self.rank().saturating_sub(axes.len())))
    }

    /// Single-axis form of [`Tensor::map`]
    pub fn map_axis<F>(&self, axis: usize, mut reducer: F) -> Result<Self>
    where
        F: FnMut(&[T]) -> T,
    {
        self.map(&[axis], |lane, _| reducer(lane))
    }

    fn reduce_axis<F>(&self, axis: usize, reducer: &mut F) -> Result<Self>
    where
        F: FnMut(&[T], usize) -> T,
    {
        let size = self.shape()[axis];
        let stride = self.subscript.strides()[axis];
        let mut shape = self.dimensions();
        shape[axis] = 1;

        let starts = if size == 0 {
            vec![0; shape.iter().product()]
        } else {
            self.subscript.lane_starts(axis)?
        };

        let mut lane = Vec::with_capacity(size);
        let data = starts
            .into_iter()
            .map(|start| {
                lane.clear();
                lane.extend((0..size).map(|j| self.data[start + j * stride].clone()));
                reducer(&lane, axis)
            })
            .collect();
        Ok(Self::from_parts(&shape, data))
    }

    pub(crate) fn check_axis(&self, axis: usize, operation: &'static str) -> Result<()> {
        if axis >= self.rank() {
            warn!(operation, axis, rank = self.rank(), "invalid axis");
            return Err(TensorError::InvalidAxis {
                axis,
                rank: self.rank(),
            });
        }
        Ok(())
    }
}
