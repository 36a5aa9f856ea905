//! Element access by multi-index

use std::ops::{Index, IndexMut};

use tracing::warn;

use super::types::Tensor;
use crate::error::Result;

impl<T> Tensor<T> {
    /// Get an element by index without panicking
    ///
    /// # Arguments
    ///
    /// * `index` - Multi-dimensional index
    ///
    /// # Returns
    ///
    /// Some reference to the element if the index is valid, None otherwise
    ///
    /// # Examples
    ///
    /// ```
    /// use ndmat_core::Tensor;
    ///
    /// let tensor = Tensor::<f64>::from_vec(vec![1.0, 2.0, 3.0, 4.0], &[2, 2]).unwrap();
    /// assert_eq!(tensor.get(&[0, 1]), Some(&2.0));
    /// assert_eq!(tensor.get(&[5, 5]), None);
    /// ```
    pub fn get(&self, index: &[usize]) -> Option<&T> {
        let offset = self.subscript.checked_index(index).ok()?;
        self.data.get(offset)
    }

    /// Get a mutable reference to an element by index without panicking
    pub fn get_mut(&mut self, index: &[usize]) -> Option<&mut T> {
        let offset = self.subscript.checked_index(index).ok()?;
        self.data.get_mut(offset)
    }

    /// Get an element by index, reporting an out-of-bounds index as an error
    pub fn get_checked(&self, index: &[usize]) -> Result<&T> {
        match self.subscript.checked_index(index) {
            Ok(offset) => Ok(&self.data[offset]),
            Err(err) => {
                warn!(?index, shape = ?self.shape(), "index out of bounds");
                Err(err)
            }
        }
    }

    /// Mutable counterpart of [`Tensor::get_checked`]
    pub fn get_checked_mut(&mut self, index: &[usize]) -> Result<&mut T> {
        match self.subscript.checked_index(index) {
            Ok(offset) => Ok(&mut self.data[offset]),
            Err(err) => {
                warn!(?index, shape = ?self.shape(), "index out of bounds");
                Err(err)
            }
        }
    }

    /// Flat storage offset of a multi-index, if it is in bounds
    pub fn offset_of(&self, index: &[usize]) -> Option<usize> {
        self.subscript.checked_index(index).ok()
    }

    /// Multi-index of a flat storage offset, if it is in bounds
    pub fn index_of(&self, offset: usize) -> Option<Vec<usize>> {
        self.subscript.index_of(offset)
    }
}

impl<T> Index<&[usize]> for Tensor<T> {
    type Output = T;

    fn index(&self, index: &[usize]) -> &Self::Output {
        match self.subscript.checked_index(index) {
            Ok(offset) => &self.data[offset],
            Err(_) => panic!(
                "index {:?} out of bounds for tensor of shape {:?}",
                index,
                self.shape()
            ),
        }
    }
}

impl<T> IndexMut<&[usize]> for Tensor<T> {
    fn index_mut(&mut self, index: &[usize]) -> &mut Self::Output {
        match self.subscript.checked_index(index) {
            Ok(offset) => &mut self.data[offset],
            Err(_) => panic!(
                "index {:?} out of bounds for tensor of shape {:?}",
                index,
                self.shape
            ),
        }
    }
}

impl<T> Index<usize> for Tensor<T> {
    type Output = T;

    fn index(&self, offset: usize) -> &Self::Output {
        match self.data.get(offset) {
            Some(value) => value,
            None => panic!("offset {} out of bounds for {} elements", offset, self.data.len()),
        }
    }
}

impl<T> IndexMut<usize> for Tensor<T> {
    fn index_mut(&mut self, offset: usize) -> &mut Self::Output {
        let len = self.data.len();
        match self.data.get_mut(offset) {
            Some(value) => value,
            None => panic!("offset {} out of bounds for {} elements", offset, len),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::Tensor;

    #[test]
    fn test_index_row_major() {
        let tensor = Tensor::from_vec((0..24).collect::<Vec<i32>>(), &[2, 3, 4]).unwrap();
        assert_eq!(tensor[&[0, 0, 1][..]], 1);
        assert_eq!(tensor[&[0, 1, 0][..]], 4);
        assert_eq!(tensor[&[1, 0, 0][..]], 12);
        assert_eq!(tensor.offset_of(&[1, 2, 3]), Some(23));
        assert_eq!(tensor.index_of(23), Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_get_mut_and_checked() {
        let mut tensor = Tensor::<f64>::new(&[2, 2]);
        *tensor.get_mut(&[1, 0]).unwrap() = 3.5;
        assert_eq!(tensor.get_checked(&[1, 0]), Ok(&3.5));
        assert!(tensor.get_checked(&[2, 0]).is_err());
        assert!(tensor.get(&[0]).is_none());
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_index_out_of_bounds_panics() {
        let tensor = Tensor::<i32>::new(&[2, 2]);
        let _ = tensor[&[0, 2][..]];
    }

    #[test]
    fn test_linear_index() {
        let mut tensor = Tensor::from_vec(vec![1, 2, 3, 4], &[2, 2]).unwrap();
        tensor[3] = 9;
        assert_eq!(tensor[1], 2);
        assert_eq!(tensor[&[1, 1][..]], 9);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_linear_index_out_of_bounds() {
        let tensor = Tensor::<f64>::new(&[2, 2]);
        let _value = tensor[4];
    }
}
