//! Ordered collections of per-dimension index subsets

use std::fmt;

use tracing::warn;

use crate::error::{Result, TensorError};

/// An ordered collection of subsets, one per dimension
///
/// Each subset is a plain `Vec<T>` of the values that dimension may take.
/// Edits that name a location past the end of the collection fail with
/// [`TensorError::InvalidLocation`] and leave the set untouched.
///
/// # Examples
///
/// ```
/// use ndmat_core::IndexSet;
///
/// let mut set = IndexSet::from_subsets(vec![vec![0, 1], vec![0, 1, 2]]);
/// assert_eq!(set.cardinalities(), vec![2, 3]);
///
/// set.replace_subset(1, vec![7]).unwrap();
/// assert_eq!(set.subset(1), Some(&[7][..]));
/// assert!(set.replace_subset(5, vec![1]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndexSet<T> {
    subsets: Vec<Vec<T>>,
}

impl<T> Default for IndexSet<T> {
    fn default() -> Self {
        Self {
            subsets: Vec::new(),
        }
    }
}

impl<T> IndexSet<T> {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a set from a list of subsets
    pub fn from_subsets(subsets: Vec<Vec<T>>) -> Self {
        Self { subsets }
    }

    /// Create a set holding a single subset
    pub fn from_subset(subset: Vec<T>) -> Self {
        Self {
            subsets: vec![subset],
        }
    }

    /// Build a subset by repeatedly applying `next`, starting from `start`,
    /// for as long as `test` accepts the current value
    ///
    /// ```
    /// use ndmat_core::IndexSet;
    ///
    /// let evens = IndexSet::generate(0usize, |&i| i < 10, |&i| i + 2);
    /// assert_eq!(evens, vec![0, 2, 4, 6, 8]);
    /// ```
    pub fn generate<F, G>(start: T, mut test: F, mut next: G) -> Vec<T>
    where
        F: FnMut(&T) -> bool,
        G: FnMut(&T) -> T,
    {
        let mut subset = Vec::new();
        let mut value = start;
        while test(&value) {
            let following = next(&value);
            subset.push(value);
            value = following;
        }
        subset
    }

    /// Number of subsets (one per dimension)
    pub fn len(&self) -> usize {
        self.subsets.len()
    }

    /// Whether the set holds no subsets
    pub fn is_empty(&self) -> bool {
        self.subsets.is_empty()
    }

    /// Size of every subset, in order
    pub fn cardinalities(&self) -> Vec<usize> {
        self.subsets.iter().map(Vec::len).collect()
    }

    /// Size of one subset, if it exists
    pub fn cardinality_of(&self, location: usize) -> Option<usize> {
        self.subsets.get(location).map(Vec::len)
    }

    /// Borrow one subset
    pub fn subset(&self, location: usize) -> Option<&[T]> {
        self.subsets.get(location).map(Vec::as_slice)
    }

    /// Borrow all subsets
    pub fn subsets(&self) -> &[Vec<T>] {
        &self.subsets
    }

    /// Iterate over the subsets
    pub fn iter(&self) -> std::slice::Iter<'_, Vec<T>> {
        self.subsets.iter()
    }

    /// Append a subset after the last one
    pub fn push_subset(&mut self, subset: Vec<T>) {
        self.subsets.push(subset);
    }

    /// Insert a subset before `location` (`location == len()` appends)
    pub fn insert_subset(&mut self, location: usize, subset: Vec<T>) -> Result<()> {
        self.check_location(location, self.subsets.len() + 1, "insert_subset")?;
        self.subsets.insert(location, subset);
        Ok(())
    }

    /// Remove up to `count` subsets starting at `location`
    ///
    /// The count is clamped to the number of subsets that remain past
    /// `location`.
    pub fn remove_subsets(&mut self, location: usize, count: usize) -> Result<()> {
        self.check_location(location, self.subsets.len(), "remove_subsets")?;
        let end = location + count.min(self.subsets.len() - location);
        self.subsets.drain(location..end);
        Ok(())
    }

    /// Replace the subset at `location`
    pub fn replace_subset(&mut self, location: usize, subset: Vec<T>) -> Result<()> {
        self.check_location(location, self.subsets.len(), "replace_subset")?;
        self.subsets[location] = subset;
        Ok(())
    }

    /// Consume the set, returning its subsets
    pub fn into_subsets(self) -> Vec<Vec<T>> {
        self.subsets
    }

    fn check_location(&self, location: usize, bound: usize, operation: &str) -> Result<()> {
        if location >= bound {
            warn!(
                operation,
                location,
                len = self.subsets.len(),
                "invalid subset location"
            );
            return Err(TensorError::InvalidLocation {
                location,
                len: self.subsets.len(),
            });
        }
        Ok(())
    }
}

impl<T: Clone> IndexSet<T> {
    /// Truncate to `len` subsets, or append copies of `subset` up to `len`
    pub fn resize(&mut self, len: usize, subset: Vec<T>) {
        self.subsets.resize(len, subset);
    }
}

impl<'a, T> IntoIterator for &'a IndexSet<T> {
    type Item = &'a Vec<T>;
    type IntoIter = std::slice::Iter<'a, Vec<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.subsets.iter()
    }
}

impl<T: fmt::Display> fmt::Display for IndexSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, subset) in self.subsets.iter().enumerate() {
            if i != 0 {
                writeln!(f)?;
            }
            f.write_str("{")?;
            for (j, value) in subset.iter().enumerate() {
                if j != 0 {
                    f.write_str(",")?;
                }
                write!(f, "{}", value)?;
            }
            f.write_str("}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_stops_on_test() {
        let subset = IndexSet::generate(3i32, |&v| v > 0, |&v| v - 1);
        assert_eq!(subset, vec![3, 2, 1]);

        let empty: Vec<usize> = IndexSet::generate(5usize, |&v| v < 5, |&v| v + 1);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_insert_and_remove() {
        let mut set = IndexSet::from_subset(vec![0usize, 1]);
        set.insert_subset(0, vec![9]).unwrap();
        set.insert_subset(2, vec![4, 5, 6]).unwrap();
        assert_eq!(set.cardinalities(), vec![1, 2, 3]);

        set.remove_subsets(1, 10).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.subset(0), Some(&[9][..]));
    }

    #[test]
    fn test_invalid_location_leaves_set_untouched() {
        let mut set = IndexSet::from_subsets(vec![vec![1usize], vec![2]]);
        let before = set.clone();

        assert!(set.insert_subset(3, vec![0]).is_err());
        assert!(set.remove_subsets(2, 1).is_err());
        assert!(set.replace_subset(2, vec![0]).is_err());
        assert_eq!(set, before);
    }

    #[test]
    fn test_display() {
        let set = IndexSet::from_subsets(vec![vec![0, 1], vec![2]]);
        assert_eq!(set.to_string(), "{0,1}\n{2}");
    }
}
