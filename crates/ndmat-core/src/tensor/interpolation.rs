//! Multi-axis interpolation for real tensors
//!
//! Interpolation is an axis map: every lane along an interpolated axis is
//! replaced by a single interpolant computed from the lane's values (the
//! ordinates), the axis' known abscissas and the requested target abscissa.
//! Any function with the signature of [`linear_interpolator`] can be used.

use tracing::warn;

use super::types::Tensor;
use crate::element::RealElement;
use crate::error::{Result, TensorError};

impl<T: RealElement> Tensor<T> {
    /// Interpolate along axes `0 .. min(rank, targets.len())`, in ascending
    /// order
    ///
    /// `abscissas[k]` lists the known abscissas of axis `k` (one per index
    /// along that axis) and `targets[k]` the abscissa to interpolate at.
    /// The interpolator is called as `interpolator(target, abscissas, ordinates)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ndmat_core::{linear_interpolator, Tensor};
    ///
    /// // f(x, y) = x + 10 y sampled at x in {0, 1}, y in {0, 1}
    /// let t = Tensor::<f64>::from_vec(vec![0.0, 10.0, 1.0, 11.0], &[2, 2]).unwrap();
    /// let xs = vec![vec![0.0, 1.0], vec![0.0, 1.0]];
    /// let v = t.interpolate(&xs, &[0.5, 0.25], linear_interpolator).unwrap();
    /// assert!((v.as_slice()[0] - 3.0).abs() < 1e-12);
    /// ```
    pub fn interpolate<F>(&self, abscissas: &[Vec<T>], targets: &[T], interpolator: F) -> Result<Self>
    where
        F: FnMut(T, &[T], &[T]) -> T,
    {
        let axes: Vec<usize> = (0..self.rank().min(targets.len())).collect();
        self.interpolate_axes(abscissas, targets, &axes, interpolator)
    }

    /// Interpolate along an explicit list of axes, in the order given
    ///
    /// `abscissas` and `targets` are indexed by axis number.
    ///
    /// # Errors
    ///
    /// Besides the axis errors of [`Tensor::map`], a missing abscissa vector
    /// or target, or an abscissa vector whose length differs from the axis
    /// size, is a [`TensorError::ShapeMismatch`].
    pub fn interpolate_axes<F>(
        &self,
        abscissas: &[Vec<T>],
        targets: &[T],
        axes: &[usize],
        mut interpolator: F,
    ) -> Result<Self>
    where
        F: FnMut(T, &[T], &[T]) -> T,
    {
        for &axis in axes {
            self.check_axis(axis, "interpolate")?;
            let known = abscissas.get(axis).map_or(0, Vec::len);
            if known != self.size(axis) || axis >= targets.len() {
                warn!(axis, size = self.size(axis), known, "abscissas do not match axis");
                return Err(TensorError::shape_mismatch(
                    "interpolate",
                    &[self.size(axis)],
                    &[known],
                ));
            }
        }
        self.map(axes, |ordinates, axis| {
            interpolator(targets[axis], abscissas[axis].as_slice(), ordinates)
        })
    }
}

/// Piecewise-linear interpolation with constant extrapolation
///
/// `abscissas` must be sorted ascending and have the same length as
/// `ordinates`; otherwise (or when both are empty) the result is NaN.
///
/// ```
/// use ndmat_core::linear_interpolator;
///
/// let xs = [0.0, 1.0, 3.0];
/// let ys = [0.0, 2.0, 6.0];
/// assert_eq!(linear_interpolator(2.0, &xs, &ys), 4.0);
/// assert_eq!(linear_interpolator(-1.0, &xs, &ys), 0.0);
/// assert_eq!(linear_interpolator(9.0, &xs, &ys), 6.0);
/// ```
pub fn linear_interpolator<T: RealElement>(target: T, abscissas: &[T], ordinates: &[T]) -> T {
    if abscissas.is_empty() || abscissas.len() != ordinates.len() {
        return T::nan();
    }
    let last = abscissas.len() - 1;
    if target <= abscissas[0] {
        return ordinates[0];
    }
    if target >= abscissas[last] {
        return ordinates[last];
    }
    let upper = abscissas.partition_point(|&x| x <= target).min(last);
    let lower = upper - 1;
    let span = abscissas[upper] - abscissas[lower];
    if span == T::zero() {
        return ordinates[lower];
    }
    let weight = (target - abscissas[lower]) / span;
    ordinates[lower] + weight * (ordinates[upper] - ordinates[lower])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpolate_single_axis() {
        // rows sampled at y = 0, 2
        let t = Tensor::from_vec(vec![0.0, 1.0, 4.0, 5.0], &[2, 2]).unwrap();
        let xs = vec![vec![0.0, 2.0]];
        let r = t.interpolate(&xs, &[1.0], linear_interpolator).unwrap();
        assert_eq!(r.shape(), &[1, 2]);
        assert_eq!(r.as_slice(), &[2.0, 3.0]);
    }

    #[test]
    fn test_interpolate_explicit_axis() {
        let t = Tensor::from_vec(vec![0.0, 1.0, 4.0, 5.0], &[2, 2]).unwrap();
        let xs = vec![vec![], vec![0.0, 1.0]];
        let r = t
            .interpolate_axes(&xs, &[0.0, 0.5], &[1], linear_interpolator)
            .unwrap();
        assert_eq!(r.shape(), &[2, 1]);
        assert_eq!(r.as_slice(), &[0.5, 4.5]);
    }

    #[test]
    fn test_interpolate_rank_three() {
        let t = Tensor::from_vec((0..8).map(f64::from).collect(), &[2, 2, 2]).unwrap();
        let xs = vec![vec![0.0, 1.0]; 3];
        let r = t
            .interpolate(&xs, &[0.5, 0.5, 0.5], linear_interpolator)
            .unwrap();
        assert_eq!(r.len(), 1);
        assert!((r.as_slice()[0] - 3.5).abs() < 1e-12);
    }

    #[test]
    fn test_abscissa_length_mismatch() {
        let t = Tensor::<f64>::zeros(&[3, 2]);
        let xs = vec![vec![0.0, 1.0]];
        assert!(t.interpolate(&xs, &[0.5], linear_interpolator).is_err());
    }

    #[test]
    fn test_linear_interpolator_degenerate() {
        assert!(linear_interpolator(1.0f64, &[], &[]).is_nan());
        assert_eq!(linear_interpolator(1.0f64, &[1.0], &[7.0]), 7.0);
        assert_eq!(linear_interpolator(0.5f64, &[0.0, 0.0, 1.0], &[1.0, 2.0, 3.0]), 2.5);
    }
}
