//! Statistical reductions for real and complex tensors
//!
//! All reductions operate along a single axis and follow [`Tensor::map`]
//! for the shape of the result.
//!
//! # Variance of complex data
//!
//! For complex elements the variance is `Σ (x - μ)·conj(x - μ) / (n - 1)`,
//! i.e. the mean squared modulus of the deviations. It is real valued and
//! returned embedded in the complex type.

use super::types::Tensor;
use crate::element::ScalarElement;
use crate::error::Result;

impl<T: ScalarElement> Tensor<T> {
    /// Arithmetic mean along an axis
    ///
    /// An empty lane yields NaN.
    ///
    /// # Examples
    ///
    /// ```
    /// use ndmat_core::Tensor;
    ///
    /// let t = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
    /// let means = t.mean(1).unwrap();
    /// assert_eq!(means.as_slice(), &[2.0, 5.0]);
    /// ```
    pub fn mean(&self, axis: usize) -> Result<Self> {
        self.map_axis(axis, lane_mean)
    }

    /// Unbiased sample variance along an axis
    ///
    /// Lanes with fewer than two elements yield NaN.
    ///
    /// # Examples
    ///
    /// ```
    /// use ndmat_core::Tensor;
    ///
    /// let t = Tensor::<f64>::from_vec(vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0], &[1, 8]).unwrap();
    /// let var = t.variance(1).unwrap();
    /// assert!((var.as_slice()[0] - 32.0 / 7.0).abs() < 1e-12);
    /// ```
    pub fn variance(&self, axis: usize) -> Result<Self> {
        self.map_axis(axis, lane_variance)
    }

    /// Square root of the unbiased variance along an axis
    pub fn standard_deviation(&self, axis: usize) -> Result<Self> {
        self.map_axis(axis, |lane| lane_variance(lane).scalar_sqrt())
    }

    /// Element-wise complex conjugate (a copy for real tensors)
    pub fn conj(&self) -> Self {
        self.map_elements(|&v| v.conj())
    }

    /// Whether any element is NaN
    pub fn has_nan(&self) -> bool {
        self.data.iter().any(|&v| v.is_nan_scalar())
    }
}

fn lane_mean<T: ScalarElement>(lane: &[T]) -> T {
    if lane.is_empty() {
        return T::scalar_nan();
    }
    let sum = lane.iter().fold(T::zero(), |acc, &v| acc + v);
    sum / T::from_count(lane.len())
}

fn lane_variance<T: ScalarElement>(lane: &[T]) -> T {
    if lane.len() < 2 {
        return T::scalar_nan();
    }
    let mean = lane_mean(lane);
    let squares = lane.iter().fold(T::zero(), |acc, &v| {
        let deviation = v - mean;
        acc + deviation * deviation.conj()
    });
    squares / T::from_count(lane.len() - 1)
}

#[cfg(test)]
mod tests {
    use crate::Tensor;
    use scirs2_core::num_complex::Complex;

    #[test]
    fn test_mean_along_rows_and_columns() {
        let t = Tensor::from_vec(vec![1.0, 2.0, 3.0, 5.0], &[2, 2]).unwrap();
        assert_eq!(t.mean(0).unwrap().as_slice(), &[2.0, 3.5]);
        assert_eq!(t.mean(0).unwrap().shape(), &[1, 2]);
        assert_eq!(t.mean(1).unwrap().as_slice(), &[1.5, 4.0]);
    }

    #[test]
    fn test_std_is_sqrt_variance() {
        let t = Tensor::from_vec(vec![1.0f64, 3.0, 5.0], &[3, 1]).unwrap();
        let var = t.variance(0).unwrap();
        let std = t.standard_deviation(0).unwrap();
        assert_eq!(var.as_slice(), &[4.0]);
        assert_eq!(std.as_slice(), &[2.0]);
    }

    #[test]
    fn test_single_sample_variance_is_nan() {
        let t = Tensor::from_vec(vec![1.0f32, 2.0], &[1, 2]).unwrap();
        assert!(t.variance(0).unwrap().has_nan());
    }

    #[test]
    fn test_complex_variance_uses_modulus() {
        let t = Tensor::from_vec(
            vec![Complex::new(1.0, 1.0), Complex::new(-1.0, -1.0)],
            &[2, 1],
        )
        .unwrap();
        let mean = t.mean(0).unwrap();
        assert_eq!(mean.as_slice(), &[Complex::new(0.0, 0.0)]);
        // deviations have |d|^2 = 2, so variance = (2 + 2) / 1
        let var = t.variance(0).unwrap();
        assert_eq!(var.as_slice(), &[Complex::new(4.0, 0.0)]);
    }

    #[test]
    fn test_conj() {
        let t = Tensor::from_vec(vec![Complex::new(1.0f64, -2.0)], &[1, 1]).unwrap();
        assert_eq!(t.conj().as_slice(), &[Complex::new(1.0, 2.0)]);
    }
}
