//! Property-based tests for subscripts and tensor operations
//!
//! This module uses proptest to check the addressing and structural
//! invariants across randomly generated shapes.

#[cfg(test)]
mod tests {
    use crate::permutation::{apply_permutation, inverse_permutation};
    use crate::{Subscript, Tensor};
    use proptest::prelude::*;

    // Strategy for generating valid tensor shapes (1-4D, small sizes)
    fn shape_strategy() -> impl Strategy<Value = Vec<usize>> {
        prop::collection::vec(1usize..6, 1..=4)
    }

    fn counting_tensor(shape: &[usize]) -> Tensor<i64> {
        let len: usize = shape.iter().product();
        Tensor::from_vec((0..len as i64).collect(), shape).unwrap()
    }

    // Strategy for a permutation of 0..n
    fn permutation_strategy(n: usize) -> impl Strategy<Value = Vec<usize>> {
        Just((0..n).collect::<Vec<_>>()).prop_shuffle()
    }

    #[test]
    fn test_proptest_smoke() {
        let tensor = Tensor::<f64>::new(&[2, 3]);
        assert_eq!(tensor.shape(), &[2, 3]);
    }

    proptest! {
        #[test]
        fn prop_index_round_trip(shape in shape_strategy()) {
            let subscript = Subscript::generate(&shape);
            prop_assert_eq!(subscript.cardinality(), shape.iter().product::<usize>());
            for offset in 0..subscript.cardinality() {
                let tuple = subscript.index_of(offset).unwrap();
                prop_assert!(tuple.iter().zip(&shape).all(|(&i, &n)| i < n));
                prop_assert_eq!(subscript.to_index(&tuple), offset);
            }
        }

        #[test]
        fn prop_resize_round_trip_preserves_overlap(
            shape in shape_strategy(),
            grow in prop::collection::vec(0usize..3, 4),
            shrink in prop::collection::vec(0usize..3, 4),
        ) {
            let original = counting_tensor(&shape);
            let other: Vec<usize> = shape
                .iter()
                .enumerate()
                .map(|(k, &n)| (n + grow[k]).saturating_sub(shrink[k]).max(1))
                .collect();

            let mut resized = original.clone();
            resized.resize(&other, true).unwrap();
            prop_assert_eq!(resized.shape(), other.as_slice());

            for offset in 0..resized.len() {
                let index = resized.index_of(offset).unwrap();
                let inside = index.iter().zip(&shape).all(|(&i, &n)| i < n);
                let expected = if inside { original[&index[..]] } else { 0 };
                prop_assert_eq!(resized.as_slice()[offset], expected);
            }

            resized.resize(&shape, true).unwrap();
            for offset in 0..original.len() {
                let index = original.index_of(offset).unwrap();
                let kept = index.iter().zip(&other).all(|(&i, &n)| i < n);
                let expected = if kept { original.as_slice()[offset] } else { 0 };
                prop_assert_eq!(resized.as_slice()[offset], expected);
            }
        }

        #[test]
        fn prop_permute_identity_is_noop(shape in shape_strategy(), axis_seed in 0usize..4) {
            let axis = axis_seed % shape.len();
            let mut tensor = counting_tensor(&shape);
            let identity: Vec<usize> = (0..shape[axis]).collect();
            tensor.permute(axis, &identity).unwrap();
            prop_assert_eq!(tensor, counting_tensor(&shape));
        }

        #[test]
        fn prop_permute_then_inverse_restores(
            (shape, axis, perm) in shape_strategy()
                .prop_flat_map(|shape| {
                    let rank = shape.len();
                    (Just(shape), 0..rank)
                })
                .prop_flat_map(|(shape, axis)| {
                    let n = shape[axis];
                    (Just(shape), Just(axis), permutation_strategy(n))
                })
        ) {
            let original = counting_tensor(&shape);
            let mut tensor = original.clone();
            tensor.permute(axis, &perm).unwrap();

            for offset in 0..tensor.len() {
                let mut index = tensor.index_of(offset).unwrap();
                index[axis] = perm[index[axis]];
                prop_assert_eq!(tensor.as_slice()[offset], original[&index[..]]);
            }

            tensor.permute(axis, &inverse_permutation(&perm)).unwrap();
            prop_assert_eq!(tensor, original);
        }

        #[test]
        fn prop_apply_permutation_gathers(perm in (1usize..8).prop_flat_map(permutation_strategy)) {
            let original: Vec<usize> = (100..100 + perm.len()).collect();
            let mut seq = original.clone();
            apply_permutation(&mut seq, &perm).unwrap();
            for (i, &p) in perm.iter().enumerate() {
                prop_assert_eq!(seq[i], original[p]);
            }
        }

        #[test]
        fn prop_squeeze_preserves_values(shape in prop::collection::vec(1usize..4, 1..=5), min_rank in 0usize..5) {
            let tensor = counting_tensor(&shape);
            let squeezed = tensor.squeeze(min_rank);
            let target = min_rank.max(2);

            prop_assert_eq!(squeezed.as_slice(), tensor.as_slice());
            prop_assert!(squeezed.rank() <= shape.len());
            prop_assert!(squeezed.rank() >= target.min(shape.len()));
            let ones = shape.iter().filter(|&&n| n == 1).count();
            let expected_rank = shape.len().saturating_sub(ones).max(target).min(shape.len());
            prop_assert_eq!(squeezed.rank(), expected_rank);
        }

        #[test]
        fn prop_sum_matches_total(shape in shape_strategy(), axis_seed in 0usize..4) {
            let axis = axis_seed % shape.len();
            let tensor = counting_tensor(&shape);
            let reduced = tensor.sum(axis).unwrap();
            prop_assert_eq!(reduced.sum_all(), tensor.sum_all());
            prop_assert_eq!(reduced.len(), tensor.len() / shape[axis]);
        }
    }
}
