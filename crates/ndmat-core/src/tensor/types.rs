//! Dense tensor type definition and basic operations
//!
//! This module defines the core `Tensor<T>` type together with its
//! constructors, accessors and ndarray interop. Structural, arithmetic and
//! statistical operations live in sibling modules.

use scirs2_core::ndarray_ext::{Array, IxDyn};
use tracing::warn;

use crate::element::{Element, NumericElement};
use crate::error::{Result, TensorError};
use crate::sets::Subscript;
use crate::types::{ElementCategory, Shape};

/// Dense N-dimensional tensor with row-major storage
///
/// The tensor owns a flat `Vec<T>` laid out according to its [`Subscript`]
/// (last axis fastest). The rank and the sizes along each axis are run-time
/// values; the element category is fixed at compile time by `T`.
///
/// # Invariants
///
/// `len() == shape().iter().product()` after every operation that
/// completes, whether it succeeded or reported an error. A tensor of rank
/// zero holds no data and is considered uninitialized.
///
/// # Examples
///
/// ```
/// use ndmat_core::Tensor;
///
/// let tensor = Tensor::<f64>::new(&[2, 3, 4]);
/// assert_eq!(tensor.shape(), &[2, 3, 4]);
/// assert_eq!(tensor.rank(), 3);
/// assert_eq!(tensor.len(), 24);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(bound(serialize = "T: serde::Serialize")))]
#[cfg_attr(
    feature = "serde",
    serde(bound(deserialize = "T: serde::Deserialize<'de>"))
)]
pub struct Tensor<T> {
    pub(crate) shape: Shape,
    pub(crate) subscript: Subscript,
    pub(crate) data: Vec<T>,
}

impl<T> Default for Tensor<T> {
    fn default() -> Self {
        Self {
            shape: Shape::new(),
            subscript: Subscript::default(),
            data: Vec::new(),
        }
    }
}

impl<T> Tensor<T> {
    /// Create an uninitialized (rank zero, empty) tensor
    pub fn empty() -> Self {
        Self::default()
    }

    /// Assemble a tensor from a shape and matching storage
    pub(crate) fn from_parts(shape: &[usize], data: Vec<T>) -> Self {
        debug_assert_eq!(
            data.len(),
            if shape.is_empty() {
                0
            } else {
                shape.iter().product::<usize>()
            }
        );
        Self {
            shape: Shape::from_slice(shape),
            subscript: Subscript::generate(shape),
            data,
        }
    }

    /// Create a tensor from a vector with given shape
    ///
    /// # Arguments
    ///
    /// * `vec` - Flattened data in row-major order
    /// * `shape` - Target shape
    ///
    /// # Returns
    ///
    /// A tensor with the specified shape, or an error if the data length is
    /// not the product of the shape
    ///
    /// # Examples
    ///
    /// ```
    /// use ndmat_core::Tensor;
    ///
    /// let tensor = Tensor::from_vec(vec![1, 2, 3, 4, 5, 6], &[2, 3]).unwrap();
    /// assert_eq!(tensor[&[1, 0][..]], 4);
    /// ```
    pub fn from_vec(vec: Vec<T>, shape: &[usize]) -> Result<Self> {
        let expected = if shape.is_empty() {
            0
        } else {
            shape.iter().product()
        };
        if vec.len() != expected {
            warn!(?shape, expected, got = vec.len(), "from_vec length mismatch");
            return Err(TensorError::LengthMismatch {
                expected,
                got: vec.len(),
            });
        }
        Ok(Self::from_parts(shape, vec))
    }

    /// Number of dimensions
    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    /// Size along every axis
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Size along every axis, as an owned vector
    pub fn dimensions(&self) -> Vec<usize> {
        self.shape.to_vec()
    }

    /// Size along one axis (0 for an axis the tensor does not have)
    pub fn size(&self, axis: usize) -> usize {
        self.shape.get(axis).copied().unwrap_or(0)
    }

    /// Total number of elements
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the tensor holds no elements
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Whether the tensor has been given a shape
    pub fn is_initialized(&self) -> bool {
        !self.shape.is_empty()
    }

    /// The index space describing the storage layout
    pub fn subscript(&self) -> &Subscript {
        &self.subscript
    }

    /// Whether both tensors have the same shape
    pub fn same_shape<U>(&self, other: &Tensor<U>) -> bool {
        self.shape == other.shape
    }

    /// Flat storage in row-major order
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Mutable flat storage in row-major order
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Iterate over elements in row-major order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Iterate mutably over elements in row-major order
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.data.iter_mut()
    }

    /// Consume the tensor, returning its storage
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// First element in storage order
    pub fn first(&self) -> Option<&T> {
        self.data.first()
    }

    /// Exchange contents with `other` if `other` has been initialized
    ///
    /// Returns whether the exchange happened.
    pub fn swap(&mut self, other: &mut Self) -> bool {
        if !other.is_initialized() {
            return false;
        }
        std::mem::swap(self, other);
        true
    }

    /// Apply `f` to every element, producing a tensor of the same shape
    pub fn map_elements<U, F>(&self, f: F) -> Tensor<U>
    where
        F: FnMut(&T) -> U,
    {
        Tensor {
            shape: self.shape.clone(),
            subscript: self.subscript.clone(),
            data: self.data.iter().map(f).collect(),
        }
    }

    /// Convert every element into another element type
    ///
    /// ```
    /// use ndmat_core::Tensor;
    /// use scirs2_core::num_complex::Complex;
    ///
    /// let real = Tensor::from_vec(vec![1.0f64, 2.0], &[1, 2]).unwrap();
    /// let complex: Tensor<Complex<f64>> = real.convert();
    /// assert_eq!(complex.as_slice()[1], Complex::new(2.0, 0.0));
    /// ```
    pub fn convert<U>(&self) -> Tensor<U>
    where
        T: Clone,
        U: From<T>,
    {
        self.map_elements(|v| U::from(v.clone()))
    }
}

impl<T: Element> Tensor<T> {
    /// Create a tensor of the given shape filled with `T::default()`
    ///
    /// An empty shape yields an uninitialized tensor.
    pub fn new(shape: &[usize]) -> Self {
        let len = if shape.is_empty() {
            0
        } else {
            shape.iter().product()
        };
        Self::from_parts(shape, vec![T::default(); len])
    }

    /// Create a tensor filled with a value
    ///
    /// # Examples
    ///
    /// ```
    /// use ndmat_core::Tensor;
    ///
    /// let tensor = Tensor::from_elem(&[2, 2], 'x');
    /// assert!(tensor.iter().all(|&c| c == 'x'));
    /// ```
    pub fn from_elem(shape: &[usize], value: T) -> Self {
        let mut tensor = Self::new(shape);
        tensor.data.fill(value);
        tensor
    }

    /// Create a default-filled tensor shaped like an index space
    pub fn with_subscript(subscript: &Subscript) -> Self {
        Self::new(&subscript.dimensions())
    }

    /// Element category of this instantiation
    pub fn category(&self) -> ElementCategory {
        T::CATEGORY
    }

    /// Create a tensor from an ndarray array
    ///
    /// A zero-dimensional array becomes a rank-1 tensor of shape `[1]`
    /// holding its single element.
    ///
    /// # Examples
    ///
    /// ```
    /// use scirs2_core::ndarray_ext::Array;
    /// use ndmat_core::Tensor;
    ///
    /// let arr = Array::<f64, _>::zeros(vec![2, 3]);
    /// let tensor = Tensor::from_array(&arr);
    /// assert_eq!(tensor.shape(), &[2, 3]);
    /// ```
    pub fn from_array(array: &Array<T, IxDyn>) -> Self {
        let data: Vec<T> = array.iter().cloned().collect();
        if array.ndim() == 0 {
            return Self::from_parts(&[1], data);
        }
        Self::from_parts(array.shape(), data)
    }

    /// Copy the tensor into an ndarray array of the same shape
    pub fn to_array(&self) -> Result<Array<T, IxDyn>> {
        Array::from_shape_vec(IxDyn(&self.shape), self.data.clone()).map_err(|_| {
            TensorError::LengthMismatch {
                expected: self.subscript.cardinality(),
                got: self.data.len(),
            }
        })
    }
}

impl<T: NumericElement> Tensor<T> {
    /// Create a tensor filled with zeros
    pub fn zeros(shape: &[usize]) -> Self {
        Self::from_elem(shape, T::zero())
    }

    /// Create a tensor filled with ones
    pub fn ones(shape: &[usize]) -> Self {
        Self::from_elem(shape, T::one())
    }
}
