//! Reference tensors: non-owning views onto a subset of another tensor
//!
//! A view is an owner borrow plus a selector [`Subscript`] naming, per axis,
//! which owner indices take part. Storage offsets are recomputed from the
//! selector and the owner's strides whenever an element is addressed, so no
//! raw addresses are ever held. The borrow checker ties the view to the
//! owner: the owner cannot be resized (or even read, for a mutable view)
//! while the view is alive.
//!
//! # Examples
//!
//! ```
//! use ndmat_core::{Subscript, Tensor};
//!
//! let mut owner = Tensor::from_vec((0..9).collect::<Vec<i32>>(), &[3, 3]).unwrap();
//! let corners = Subscript::from_subsets(vec![vec![0, 2], vec![0, 2]]);
//!
//! let view = owner.view(corners.clone()).unwrap();
//! assert_eq!(view.to_tensor().as_slice(), &[0, 2, 6, 8]);
//!
//! let mut view = owner.view_mut(corners).unwrap();
//! view.fill(-1);
//! assert_eq!(owner.as_slice(), &[-1, 1, -1, 3, 4, 5, -1, 7, -1]);
//! ```

use std::fmt;
use std::ops::Index;

use tracing::warn;

use crate::element::Element;
use crate::error::{Result, TensorError};
use crate::sets::Subscript;
use crate::tensor::Tensor;

/// Read-only view onto selected elements of a tensor
pub struct TensorView<'a, T> {
    owner: &'a Tensor<T>,
    selector: Subscript,
}

/// Write-through view onto selected elements of a tensor
pub struct TensorViewMut<'a, T> {
    owner: &'a mut Tensor<T>,
    selector: Subscript,
}

fn owner_offset(owner: &Subscript, selector: &Subscript, index: &[usize]) -> Option<usize> {
    if index.len() != selector.rank() {
        return None;
    }
    let mut offset = 0;
    for (k, (&i, &stride)) in index.iter().zip(owner.strides()).enumerate() {
        offset += selector.subset(k)?.get(i)? * stride;
    }
    Some(offset)
}

fn check_selector<T>(owner: &Tensor<T>, selector: &Subscript) -> Result<()> {
    // Validates rank and bounds; the offsets themselves are recomputed on use.
    owner.subscript().offsets(selector).map(|_| ())
}

impl<'a, T: Element> TensorView<'a, T> {
    /// Create a view of `owner` restricted to the indices in `selector`
    ///
    /// # Errors
    ///
    /// The selector must have the owner's rank and only name indices inside
    /// the owner's shape.
    pub fn new(owner: &'a Tensor<T>, selector: Subscript) -> Result<Self> {
        check_selector(owner, &selector)?;
        Ok(Self { owner, selector })
    }

    /// Shape of the view (the size of every selector subset)
    pub fn shape(&self) -> Vec<usize> {
        self.selector.dimensions()
    }

    /// Number of axes
    pub fn rank(&self) -> usize {
        self.selector.rank()
    }

    /// Number of selected elements
    pub fn len(&self) -> usize {
        self.selector.cardinality()
    }

    /// Whether the view selects nothing
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The selector describing which owner indices are visible
    pub fn selector(&self) -> &Subscript {
        &self.selector
    }

    /// Element at a view-relative multi-index
    pub fn get(&self, index: &[usize]) -> Option<&T> {
        let offset = owner_offset(self.owner.subscript(), &self.selector, index)?;
        self.owner.as_slice().get(offset)
    }

    /// Iterate over the selected elements in the view's row-major order
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        let data = self.owner.as_slice();
        self.owner
            .subscript()
            .offsets(&self.selector)
            .unwrap_or_default()
            .into_iter()
            .map(move |k| &data[k])
    }

    /// Copy the selected elements into a new tensor
    pub fn to_tensor(&self) -> Tensor<T> {
        let data = self.iter().cloned().collect();
        Tensor::from_parts(&self.shape(), data)
    }
}

impl<'a, T: Element> TensorViewMut<'a, T> {
    /// Create a mutable view of `owner` restricted to the indices in
    /// `selector`
    pub fn new(owner: &'a mut Tensor<T>, selector: Subscript) -> Result<Self> {
        check_selector(owner, &selector)?;
        Ok(Self { owner, selector })
    }

    /// Shape of the view
    pub fn shape(&self) -> Vec<usize> {
        self.selector.dimensions()
    }

    /// Number of selected elements
    pub fn len(&self) -> usize {
        self.selector.cardinality()
    }

    /// Whether the view selects nothing
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The selector describing which owner indices are visible
    pub fn selector(&self) -> &Subscript {
        &self.selector
    }

    /// Element at a view-relative multi-index
    pub fn get(&self, index: &[usize]) -> Option<&T> {
        let offset = owner_offset(self.owner.subscript(), &self.selector, index)?;
        self.owner.as_slice().get(offset)
    }

    /// Mutable element at a view-relative multi-index; writes go straight to
    /// the owner
    pub fn get_mut(&mut self, index: &[usize]) -> Option<&mut T> {
        let offset = owner_offset(self.owner.subscript(), &self.selector, index)?;
        self.owner.as_mut_slice().get_mut(offset)
    }

    /// Reborrow as a read-only view
    pub fn as_view(&self) -> TensorView<'_, T> {
        TensorView {
            owner: &*self.owner,
            selector: self.selector.clone(),
        }
    }

    /// Copy the selected elements into a new tensor
    pub fn to_tensor(&self) -> Tensor<T> {
        self.as_view().to_tensor()
    }

    /// Set every selected owner element to `value`
    pub fn fill(&mut self, value: T) {
        for k in self.offsets() {
            self.owner.data[k] = value.clone();
        }
    }

    /// Copy `values` through to the owner, element by element
    ///
    /// # Errors
    ///
    /// [`TensorError::ShapeMismatch`] if `values` does not have the view's
    /// shape; the owner is not modified.
    pub fn assign(&mut self, values: &Tensor<T>) -> Result<()> {
        let shape = self.shape();
        if values.shape() != shape.as_slice() {
            warn!(view = ?shape, values = ?values.shape(), "view assignment shape mismatch");
            return Err(TensorError::shape_mismatch(
                "view assign",
                &shape,
                values.shape(),
            ));
        }
        let owner = &mut *self.owner;
        owner
            .subscript
            .scatter(values.as_slice(), &mut owner.data, &self.selector, T::clone)
    }

    fn offsets(&self) -> Vec<usize> {
        self.owner
            .subscript()
            .offsets(&self.selector)
            .unwrap_or_default()
    }
}

impl<T: Element> Index<&[usize]> for TensorView<'_, T> {
    type Output = T;

    fn index(&self, index: &[usize]) -> &T {
        match self.get(index) {
            Some(value) => value,
            None => panic!(
                "index {:?} out of bounds for view of shape {:?}",
                index,
                self.shape()
            ),
        }
    }
}

impl<T: Element> fmt::Display for TensorView<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_tensor(), f)
    }
}

impl<T: Element> Tensor<T> {
    /// Read-only view of the elements selected by `selector`
    pub fn view(&self, selector: Subscript) -> Result<TensorView<'_, T>> {
        TensorView::new(self, selector)
    }

    /// Write-through view of the elements selected by `selector`
    pub fn view_mut(&mut self, selector: Subscript) -> Result<TensorViewMut<'_, T>> {
        TensorViewMut::new(self, selector)
    }
}
