//! Cartesian products of index subsets with row-major stride bookkeeping

use std::fmt;

use crate::error::Result;
use crate::sets::IndexSet;
use crate::types::Shape;

/// The Cartesian product of an ordered [`IndexSet`]
///
/// Alongside the subsets it maintains a row-major stride vector and the
/// product cardinality, both recomputed after every successful structural
/// edit:
///
/// * `stride[rank - 1] == 1`
/// * `stride[k] == stride[k + 1] * |subset[k + 1]|`
/// * `cardinality == Π |subset[k]|` (zero for a product with no subsets)
///
/// # Examples
///
/// ```
/// use ndmat_core::CartesianProduct;
///
/// let product = CartesianProduct::new(vec![vec!['a', 'b'], vec!['x', 'y', 'z']]);
/// assert_eq!(product.cardinality(), 6);
/// assert_eq!(product.strides(), &[3, 1]);
/// assert_eq!(product.tuple(4), Some(vec!['b', 'y']));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CartesianProduct<T> {
    pub(crate) set: IndexSet<T>,
    pub(crate) strides: Shape,
    pub(crate) cardinality: usize,
}

impl<T> Default for CartesianProduct<T> {
    fn default() -> Self {
        Self {
            set: IndexSet::default(),
            strides: Shape::new(),
            cardinality: 0,
        }
    }
}

impl<T> CartesianProduct<T> {
    /// Create a product from a list of subsets
    pub fn new(subsets: Vec<Vec<T>>) -> Self {
        Self::from_set(IndexSet::from_subsets(subsets))
    }

    /// Create a product from an existing [`IndexSet`]
    pub fn from_set(set: IndexSet<T>) -> Self {
        let mut product = Self {
            set,
            strides: Shape::new(),
            cardinality: 0,
        };
        product.recompute();
        product
    }

    /// Number of subsets (the rank of the index space)
    pub fn rank(&self) -> usize {
        self.set.len()
    }

    /// Total number of tuples in the product
    pub fn cardinality(&self) -> usize {
        self.cardinality
    }

    /// Size of every subset
    pub fn cardinalities(&self) -> Vec<usize> {
        self.set.cardinalities()
    }

    /// Row-major stride of every dimension
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// Underlying subsets
    pub fn set(&self) -> &IndexSet<T> {
        &self.set
    }

    /// Borrow the subset of one dimension
    pub fn subset(&self, location: usize) -> Option<&[T]> {
        self.set.subset(location)
    }

    /// Append a subset as the new last dimension
    pub fn push_subset(&mut self, subset: Vec<T>) {
        self.set.push_subset(subset);
        self.recompute();
    }

    /// Insert a subset before `location`
    pub fn insert_subset(&mut self, location: usize, subset: Vec<T>) -> Result<()> {
        self.set.insert_subset(location, subset)?;
        self.recompute();
        Ok(())
    }

    /// Remove up to `count` subsets starting at `location`
    pub fn remove_subsets(&mut self, location: usize, count: usize) -> Result<()> {
        self.set.remove_subsets(location, count)?;
        self.recompute();
        Ok(())
    }

    /// Replace the subset at `location`
    pub fn replace_subset(&mut self, location: usize, subset: Vec<T>) -> Result<()> {
        self.set.replace_subset(location, subset)?;
        self.recompute();
        Ok(())
    }

    fn recompute(&mut self) {
        let sizes = self.set.cardinalities();
        let mut strides: Shape = sizes.iter().map(|_| 1).collect();
        for k in (0..sizes.len().saturating_sub(1)).rev() {
            strides[k] = strides[k + 1] * sizes[k + 1];
        }
        self.cardinality = if sizes.is_empty() {
            0
        } else {
            sizes.iter().product()
        };
        self.strides = strides;
    }
}

impl<T: Clone> CartesianProduct<T> {
    /// Change the rank, appending copies of `subset` as new last dimensions
    /// or dropping trailing ones
    pub fn resize_subsets(&mut self, rank: usize, subset: Vec<T>) {
        self.set.resize(rank, subset);
        self.recompute();
    }

    /// The tuple at a linear position of the product
    ///
    /// Returns `None` when `linear` is not below the cardinality.
    pub fn tuple(&self, linear: usize) -> Option<Vec<T>> {
        if linear >= self.cardinality {
            return None;
        }
        let mut remainder = linear;
        let tuple = self
            .set
            .iter()
            .zip(self.strides.iter())
            .map(|(subset, &stride)| {
                let position = remainder / stride;
                remainder %= stride;
                subset[position].clone()
            })
            .collect();
        Some(tuple)
    }

    /// The tuple at a linear position, with its components reordered so that
    /// component `i` is taken from dimension `permutation[i]`
    ///
    /// Returns `None` if `linear` is out of range or the permutation names a
    /// dimension that does not exist.
    pub fn tuple_permuted(&self, linear: usize, permutation: &[usize]) -> Option<Vec<T>> {
        let tuple = self.tuple(linear)?;
        permutation
            .iter()
            .map(|&dimension| tuple.get(dimension).cloned())
            .collect()
    }

    /// Every tuple of the product, in row-major order
    pub fn tuples(&self) -> Vec<Vec<T>> {
        (0..self.cardinality).filter_map(|i| self.tuple(i)).collect()
    }
}

impl<T: fmt::Display> fmt::Display for CartesianProduct<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.set)
    }
}
