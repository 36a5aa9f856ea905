//! Integer index spaces: tuple/offset conversion and gather/scatter
//!
//! A [`Subscript`] is a [`CartesianProduct`] over `usize`. Two flavours are
//! used throughout the crate:
//!
//! - **generated** subscripts, whose subset `k` is `{0, 1, ..., size_k - 1}`.
//!   These describe the storage layout of a tensor.
//! - **selector** subscripts, whose subsets list arbitrary owner indices.
//!   These pick a sub-block of a tensor for views and for gather/scatter.
//!
//! # Examples
//!
//! ```
//! use ndmat_core::Subscript;
//!
//! let owner = Subscript::generate(&[3, 4]);
//! assert_eq!(owner.to_index(&[2, 1]), 9);
//! assert_eq!(owner.index_of(9), Some(vec![2, 1]));
//!
//! // Pick rows {0, 2} and columns {1, 3}
//! let selector = Subscript::from_subsets(vec![vec![0, 2], vec![1, 3]]);
//! let data: Vec<i32> = (0..12).collect();
//! let picked = owner.gather(&data, &selector, |&v| v).unwrap();
//! assert_eq!(picked, vec![1, 3, 9, 11]);
//! ```

use tracing::warn;

use crate::error::{Result, TensorError};
use crate::sets::CartesianProduct;

/// Index space over `usize` subsets
pub type Subscript = CartesianProduct<usize>;

impl CartesianProduct<usize> {
    /// Generate the full index space of a shape
    ///
    /// An empty shape yields the empty subscript (rank 0, cardinality 0).
    pub fn generate(dims: &[usize]) -> Self {
        Self::new(dims.iter().map(|&n| (0..n).collect()).collect())
    }

    /// [`generate`](Self::generate), rejecting a shape with no axes
    pub fn try_generate(dims: &[usize]) -> Result<Self> {
        if dims.is_empty() {
            warn!("cannot generate an index space without axes");
            return Err(TensorError::EmptyInput("generate"));
        }
        Ok(Self::generate(dims))
    }

    /// Build a selector subscript from explicit per-dimension index lists
    pub fn from_subsets(subsets: Vec<Vec<usize>>) -> Self {
        Self::new(subsets)
    }

    /// Size of each dimension
    pub fn dimensions(&self) -> Vec<usize> {
        self.cardinalities()
    }

    /// Size of a single dimension (0 if the dimension does not exist)
    pub fn size(&self, axis: usize) -> usize {
        self.set.cardinality_of(axis).unwrap_or(0)
    }

    /// Flat offset of a tuple: `Σ tuple[k] * stride[k]`
    ///
    /// The tuple is interpreted positionally and is not bounds-checked; use
    /// [`Subscript::checked_index`] when the input is untrusted.
    pub fn to_index(&self, tuple: &[usize]) -> usize {
        tuple
            .iter()
            .zip(self.strides.iter())
            .map(|(&i, &stride)| i * stride)
            .sum()
    }

    /// Flat offset of a tuple, validated against the dimensions
    pub fn checked_index(&self, tuple: &[usize]) -> Result<usize> {
        let dims = self.dimensions();
        if tuple.len() != dims.len() || tuple.iter().zip(&dims).any(|(&i, &n)| i >= n) {
            return Err(TensorError::out_of_bounds(tuple, &dims));
        }
        Ok(self.to_index(tuple))
    }

    /// Positional tuple for a flat offset (inverse of [`Subscript::to_index`])
    pub fn index_of(&self, offset: usize) -> Option<Vec<usize>> {
        if offset >= self.cardinality {
            return None;
        }
        let mut remainder = offset;
        Some(
            self.strides
                .iter()
                .map(|&stride| {
                    let position = remainder / stride;
                    remainder %= stride;
                    position
                })
                .collect(),
        )
    }

    /// Whether this subscript is the generated index space of its own
    /// dimensions
    pub fn is_generated(&self) -> bool {
        self.set
            .iter()
            .all(|subset| subset.iter().enumerate().all(|(i, &v)| i == v))
    }

    /// Storage offsets, in this subscript's layout, of every position the
    /// selector picks (in the selector's row-major order)
    ///
    /// # Errors
    ///
    /// * [`TensorError::RankMismatch`] if the ranks differ
    /// * [`TensorError::IndexOutOfBounds`] if a selector index exceeds the
    ///   matching dimension
    pub fn offsets(&self, selector: &Subscript) -> Result<Vec<usize>> {
        self.validate_selector(selector)?;

        let mut offsets = Vec::with_capacity(selector.cardinality);
        for linear in 0..selector.cardinality {
            let mut remainder = linear;
            let mut offset = 0;
            for ((subset, &selector_stride), &stride) in selector
                .set
                .iter()
                .zip(selector.strides.iter())
                .zip(self.strides.iter())
            {
                let position = remainder / selector_stride;
                remainder %= selector_stride;
                offset += subset[position] * stride;
            }
            offsets.push(offset);
        }
        Ok(offsets)
    }

    /// Gather the selected elements of `source` (laid out by `self`),
    /// transforming each one
    ///
    /// Element `i` of the result is `transform(source[offset_i])`, where
    /// `offset_i` is the storage offset of the selector's `i`-th tuple.
    pub fn gather<T, U, F>(&self, source: &[T], selector: &Subscript, mut transform: F) -> Result<Vec<U>>
    where
        F: FnMut(&T) -> U,
    {
        self.check_storage(source.len(), "gather")?;
        let offsets = self.offsets(selector)?;
        Ok(offsets.into_iter().map(|k| transform(&source[k])).collect())
    }

    /// Scatter `values` into the selected positions of `destination`
    /// (laid out by `self`), transforming each one
    ///
    /// `values` must hold exactly one element per selected position; on any
    /// error `destination` is left untouched.
    pub fn scatter<T, U, F>(
        &self,
        values: &[U],
        destination: &mut [T],
        selector: &Subscript,
        mut transform: F,
    ) -> Result<()>
    where
        F: FnMut(&U) -> T,
    {
        self.check_storage(destination.len(), "scatter")?;
        if values.len() != selector.cardinality {
            warn!(
                expected = selector.cardinality,
                got = values.len(),
                "scatter source does not match selector cardinality"
            );
            return Err(TensorError::LengthMismatch {
                expected: selector.cardinality,
                got: values.len(),
            });
        }
        let offsets = self.offsets(selector)?;
        for (value, k) in values.iter().zip(offsets) {
            destination[k] = transform(value);
        }
        Ok(())
    }

    /// Storage offset of the first element of every lane along `axis`
    ///
    /// A lane is the run of elements obtained by varying only `axis`;
    /// consecutive elements of a lane are `strides()[axis]` apart.
    pub fn lane_starts(&self, axis: usize) -> Result<Vec<usize>> {
        if axis >= self.rank() {
            return Err(TensorError::InvalidAxis {
                axis,
                rank: self.rank(),
            });
        }
        let mut dims = self.dimensions();
        if dims[axis] == 0 {
            return Ok(Vec::new());
        }
        dims[axis] = 1;
        self.offsets(&Subscript::generate(&dims))
    }

    fn validate_selector(&self, selector: &Subscript) -> Result<()> {
        if selector.rank() != self.rank() {
            warn!(
                expected = self.rank(),
                got = selector.rank(),
                "selector rank does not match index space"
            );
            return Err(TensorError::RankMismatch {
                operation: "select",
                expected: self.rank(),
                got: selector.rank(),
            });
        }
        let dims = self.dimensions();
        for (subset, &n) in selector.set.iter().zip(&dims) {
            if let Some(&bad) = subset.iter().find(|&&i| i >= n) {
                warn!(index = bad, size = n, "selector index out of bounds");
                return Err(TensorError::out_of_bounds(&[bad], &dims));
            }
        }
        Ok(())
    }

    fn check_storage(&self, len: usize, operation: &'static str) -> Result<()> {
        if len != self.cardinality {
            warn!(operation, expected = self.cardinality, got = len, "storage length mismatch");
            return Err(TensorError::LengthMismatch {
                expected: self.cardinality,
                got: len,
            });
        }
        Ok(())
    }
}
