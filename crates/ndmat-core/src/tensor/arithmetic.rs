//! Element-wise arithmetic and axis reductions for numeric tensors
//!
//! The fallible `try_*` methods report shape problems as errors. The
//! operator impls (`+=`, `-=`, `+`, `-`) delegate to them; on a mismatch they
//! log the problem and leave the receiver unchanged instead of panicking.

use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use tracing::warn;

use super::types::Tensor;
use crate::element::NumericElement;
use crate::error::{Result, TensorError};

impl<T: NumericElement> Tensor<T> {
    /// Add `rhs` element-wise into `self`
    ///
    /// An uninitialized receiver first adopts the shape of `rhs` (so the
    /// result equals `rhs`).
    ///
    /// # Errors
    ///
    /// [`TensorError::ShapeMismatch`] if the shapes differ; `self` is
    /// unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use ndmat_core::Tensor;
    ///
    /// let mut a = Tensor::from_vec(vec![1, 2, 3, 4], &[2, 2]).unwrap();
    /// let b = Tensor::from_vec(vec![10, 20, 30, 40], &[2, 2]).unwrap();
    /// a.try_add_assign(&b).unwrap();
    /// assert_eq!(a.as_slice(), &[11, 22, 33, 44]);
    /// ```
    pub fn try_add_assign(&mut self, rhs: &Self) -> Result<()> {
        self.zip_assign(rhs, "add", |a, b| *a += b)
    }

    /// Subtract `rhs` element-wise from `self`
    ///
    /// Same shape rules as [`Tensor::try_add_assign`].
    pub fn try_sub_assign(&mut self, rhs: &Self) -> Result<()> {
        self.zip_assign(rhs, "subtract", |a, b| *a -= b)
    }

    /// Multiply every element by `factor`
    pub fn scale(&mut self, factor: T) {
        for value in &mut self.data {
            *value *= factor;
        }
    }

    /// Sum along one axis (see [`Tensor::map`] for the result shape)
    pub fn sum(&self, axis: usize) -> Result<Self> {
        self.map_axis(axis, |lane| lane.iter().fold(T::zero(), |acc, &v| acc + v))
    }

    /// Product along one axis
    pub fn product(&self, axis: usize) -> Result<Self> {
        self.map_axis(axis, |lane| lane.iter().fold(T::one(), |acc, &v| acc * v))
    }

    /// Sum of every element
    pub fn sum_all(&self) -> T {
        self.data.iter().fold(T::zero(), |acc, &v| acc + v)
    }

    /// Product of every element
    pub fn product_all(&self) -> T {
        self.data.iter().fold(T::one(), |acc, &v| acc * v)
    }

    fn zip_assign<F>(&mut self, rhs: &Self, operation: &'static str, mut op: F) -> Result<()>
    where
        F: FnMut(&mut T, T),
    {
        if !self.is_initialized() {
            self.initialize(rhs.shape());
        }
        if self.shape() != rhs.shape() {
            warn!(operation, lhs = ?self.shape(), rhs = ?rhs.shape(), "shape mismatch");
            return Err(TensorError::shape_mismatch(
                operation,
                self.shape(),
                rhs.shape(),
            ));
        }
        for (a, &b) in self.data.iter_mut().zip(rhs.data.iter()) {
            op(a, b);
        }
        Ok(())
    }
}

impl<T: NumericElement + PartialOrd> Tensor<T> {
    /// Minimum along one axis
    ///
    /// Comparisons involving NaN are false, so a NaN never replaces the
    /// running minimum.
    pub fn min(&self, axis: usize) -> Result<Self> {
        self.map_axis(axis, |lane| extreme(lane, |a, b| a < b))
    }

    /// Maximum along one axis
    pub fn max(&self, axis: usize) -> Result<Self> {
        self.map_axis(axis, |lane| extreme(lane, |a, b| a > b))
    }
}

fn extreme<T: NumericElement>(lane: &[T], better: impl Fn(&T, &T) -> bool) -> T {
    let mut values = lane.iter();
    let first = match values.next() {
        Some(&v) => v,
        None => return T::default(),
    };
    values.fold(first, |best, &v| if better(&v, &best) { v } else { best })
}

impl<T: NumericElement> AddAssign<&Tensor<T>> for Tensor<T> {
    fn add_assign(&mut self, rhs: &Tensor<T>) {
        // mismatch already logged; receiver left as is
        let _ = self.try_add_assign(rhs);
    }
}

impl<T: NumericElement> SubAssign<&Tensor<T>> for Tensor<T> {
    fn sub_assign(&mut self, rhs: &Tensor<T>) {
        let _ = self.try_sub_assign(rhs);
    }
}

impl<T: NumericElement> MulAssign<T> for Tensor<T> {
    fn mul_assign(&mut self, factor: T) {
        self.scale(factor);
    }
}

impl<T: NumericElement> Add for &Tensor<T> {
    type Output = Tensor<T>;

    fn add(self, rhs: &Tensor<T>) -> Tensor<T> {
        let mut sum = self.clone();
        sum += rhs;
        sum
    }
}

impl<T: NumericElement> Sub for &Tensor<T> {
    type Output = Tensor<T>;

    fn sub(self, rhs: &Tensor<T>) -> Tensor<T> {
        let mut difference = self.clone();
        difference -= rhs;
        difference
    }
}

impl<T: NumericElement> Mul<T> for &Tensor<T> {
    type Output = Tensor<T>;

    fn mul(self, factor: T) -> Tensor<T> {
        let mut scaled = self.clone();
        scaled.scale(factor);
        scaled
    }
}

impl<T: NumericElement + Neg<Output = T>> Neg for Tensor<T> {
    type Output = Tensor<T>;

    fn neg(mut self) -> Tensor<T> {
        for value in &mut self.data {
            *value = -*value;
        }
        self
    }
}

impl<T: NumericElement + Neg<Output = T>> Neg for &Tensor<T> {
    type Output = Tensor<T>;

    fn neg(self) -> Tensor<T> {
        -self.clone()
    }
}
