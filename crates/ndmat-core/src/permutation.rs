//! Permutation vectors and their relative (swap-sequence) form
//!
//! A permutation `p` of length `n` reorders a sequence so that the new
//! element at position `i` is the old element at position `p[i]`:
//! `seq'[i] = seq[p[i]]`.
//!
//! Applying a permutation in place is done with its *relative* form `r`:
//! performing `swap(seq[i], seq[r[i]])` for `i = 0, 1, ..., n - 1`, in that
//! order, produces exactly `seq'`. Each step assumes positions `0..i` are
//! already final and picks, among the remaining positions, the one currently
//! holding the element that belongs at `i`.
//!
//! # Examples
//!
//! ```
//! use ndmat_core::permutation::{apply_permutation, relative_permutation};
//!
//! let mut seq = vec!['a', 'b', 'c'];
//! apply_permutation(&mut seq, &[2, 0, 1]).unwrap();
//! assert_eq!(seq, vec!['c', 'a', 'b']);
//!
//! assert_eq!(relative_permutation(&[2, 0, 1]), vec![2, 2, 2]);
//! ```

use tracing::warn;

use crate::error::{Result, TensorError};

/// Check that `permutation` lists distinct indices below `len`
pub fn validate_permutation(permutation: &[usize], len: usize) -> Result<()> {
    let mut seen = vec![false; len];
    for &p in permutation {
        if p >= len || seen[p] {
            warn!(?permutation, len, "invalid permutation");
            return Err(TensorError::InvalidPermutation {
                permutation: permutation.to_vec(),
                len,
            });
        }
        seen[p] = true;
    }
    Ok(())
}

/// Extend a (possibly partial) permutation prefix to a full permutation of
/// `0..len`
///
/// The prefix is validated; indices it does not mention fill the remaining
/// positions in ascending order. Entries beyond `len` are ignored.
///
/// ```
/// use ndmat_core::permutation::complete_permutation;
///
/// assert_eq!(complete_permutation(&[2], 4).unwrap(), vec![2, 0, 1, 3]);
/// assert!(complete_permutation(&[0, 0], 3).is_err());
/// ```
pub fn complete_permutation(prefix: &[usize], len: usize) -> Result<Vec<usize>> {
    let prefix = &prefix[..prefix.len().min(len)];
    validate_permutation(prefix, len)?;

    let mut used = vec![false; len];
    for &p in prefix {
        used[p] = true;
    }
    let mut full = prefix.to_vec();
    full.extend((0..len).filter(|&i| !used[i]));
    Ok(full)
}

/// Relative form of a permutation (see the module documentation)
///
/// The input is assumed to be a valid permutation of `0..permutation.len()`.
pub fn relative_permutation(permutation: &[usize]) -> Vec<usize> {
    let n = permutation.len();
    // Position j (for j >= i) records which original element currently sits there.
    let mut current: Vec<usize> = (0..n).collect();
    let mut relative = vec![0; n];
    for i in 0..n {
        let j = (i..n).find(|&j| current[j] == permutation[i]).unwrap_or(i);
        current[j] = current[i];
        current[i] = permutation[i];
        relative[i] = j;
    }
    relative
}

/// Inverse of a permutation: `inverse[p[i]] == i`
pub fn inverse_permutation(permutation: &[usize]) -> Vec<usize> {
    let mut inverse = vec![0; permutation.len()];
    for (i, &p) in permutation.iter().enumerate() {
        inverse[p] = i;
    }
    inverse
}

/// Reorder `seq` in place so that `seq'[i] = seq[permutation[i]]`
///
/// A permutation shorter than the sequence only fixes the leading positions;
/// see [`complete_permutation`].
pub fn apply_permutation<T>(seq: &mut [T], permutation: &[usize]) -> Result<()> {
    let full = complete_permutation(permutation, seq.len())?;
    for (i, r) in relative_permutation(&full).into_iter().enumerate() {
        if r != i {
            seq.swap(i, r);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_is_noop() {
        let mut seq = vec![1, 2, 3, 4];
        apply_permutation(&mut seq, &[0, 1, 2, 3]).unwrap();
        assert_eq!(seq, vec![1, 2, 3, 4]);
        assert_eq!(relative_permutation(&[0, 1, 2, 3]), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_gather_semantics() {
        let mut seq = vec![10, 20, 30, 40];
        apply_permutation(&mut seq, &[3, 1, 0, 2]).unwrap();
        assert_eq!(seq, vec![40, 20, 10, 30]);
    }

    #[test]
    fn test_inverse_restores() {
        let perm = vec![2, 4, 0, 3, 1];
        let original: Vec<i32> = (0..5).collect();
        let mut seq = original.clone();
        apply_permutation(&mut seq, &perm).unwrap();
        apply_permutation(&mut seq, &inverse_permutation(&perm)).unwrap();
        assert_eq!(seq, original);
    }

    #[test]
    fn test_invalid_permutation_leaves_sequence() {
        let mut seq = vec![1, 2, 3];
        assert!(apply_permutation(&mut seq, &[0, 3, 1]).is_err());
        assert!(apply_permutation(&mut seq, &[1, 1, 0]).is_err());
        assert_eq!(seq, vec![1, 2, 3]);
    }

    #[test]
    fn test_partial_prefix() {
        let mut seq = vec!['a', 'b', 'c', 'd'];
        apply_permutation(&mut seq, &[3, 2]).unwrap();
        assert_eq!(seq, vec!['d', 'c', 'a', 'b']);
    }
}
