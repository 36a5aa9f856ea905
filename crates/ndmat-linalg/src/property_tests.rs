//! Property-based tests for matrix algebra
//!
//! Uses proptest to check LU-based operations and the transpose-aware
//! product against straightforward reference computations.

#[cfg(test)]
mod tests {
    use crate::{multiply_into, Matrix, TransposeMode};
    use proptest::prelude::*;

    // Strategy for small matrix dimensions
    fn dims_strategy() -> impl Strategy<Value = (usize, usize)> {
        (1usize..5, 1usize..5)
    }

    fn matrix_strategy(rows: usize, columns: usize) -> impl Strategy<Value = Matrix<f64>> {
        prop::collection::vec(-10.0f64..10.0, rows * columns)
            .prop_map(move |data| Matrix::from_vec(data, rows, columns).unwrap())
    }

    // Diagonally dominant square matrices are always invertible
    fn invertible_strategy() -> impl Strategy<Value = Matrix<f64>> {
        (1usize..6).prop_flat_map(|n| {
            matrix_strategy(n, n).prop_map(move |mut m| {
                for i in 0..n {
                    let row_sum: f64 = m.row(i).unwrap().iter().map(|v| v.abs()).sum();
                    m[(i, i)] = row_sum + 1.0;
                }
                m
            })
        })
    }

    fn assert_close(a: &Matrix<f64>, b: &Matrix<f64>, eps: f64) -> Result<(), TestCaseError> {
        prop_assert_eq!(a.dims(), b.dims());
        for (x, y) in a.iter().zip(b.iter()) {
            prop_assert!((x - y).abs() < eps, "{} vs {}", x, y);
        }
        Ok(())
    }

    #[test]
    fn test_proptest_smoke() {
        let m = Matrix::<f64>::create_identity(3);
        assert_eq!(m.determinant(), 1.0);
    }

    proptest! {
        #[test]
        fn prop_identity_determinant_is_one(n in 1usize..8) {
            let eye = Matrix::<f64>::create_identity(n);
            prop_assert!((eye.determinant() - 1.0).abs() < 1e-12);
        }

        #[test]
        fn prop_inverse_times_matrix_is_identity(m in invertible_strategy()) {
            let inv = m.try_inverse().unwrap();
            let product = inv.multiply(&m).unwrap();
            assert_close(&product, &Matrix::create_identity(m.rows()), 1e-8)?;
        }

        #[test]
        fn prop_transpose_modes_match_explicit(
            (a, b, mode) in (dims_strategy(), 1usize..5)
                .prop_flat_map(|((m, k), n)| (matrix_strategy(m, k), matrix_strategy(k, n)))
                .prop_flat_map(|(a, b)| {
                    let mode = prop_oneof![
                        Just(TransposeMode::None),
                        Just(TransposeMode::TransposeLhs),
                        Just(TransposeMode::TransposeRhs),
                        Just(TransposeMode::TransposeBoth),
                    ];
                    (Just(a), Just(b), mode)
                })
        ) {
            let expected = a.multiply(&b).unwrap();

            // Pre-transpose the operands so that op(lhs) * op(rhs) == a * b
            let lhs = match mode {
                TransposeMode::TransposeLhs | TransposeMode::TransposeBoth => a.transposed(),
                _ => a.clone(),
            };
            let rhs = match mode {
                TransposeMode::TransposeRhs | TransposeMode::TransposeBoth => b.transposed(),
                _ => b.clone(),
            };
            let mut result = Matrix::empty();
            multiply_into(&lhs, &rhs, &mut result, mode).unwrap();
            assert_close(&result, &expected, 1e-9)?;
        }

        #[test]
        fn prop_transpose_twice_is_identity((rows, columns) in dims_strategy()) {
            let m = Matrix::from_vec((0..rows * columns).collect::<Vec<_>>(), rows, columns).unwrap();
            let t = m.transposed();
            prop_assert_eq!(t.dims(), (columns, rows));
            for i in 0..rows {
                for j in 0..columns {
                    prop_assert_eq!(t[(j, i)], m[(i, j)]);
                }
            }
            prop_assert_eq!(t.transposed(), m);
        }

        #[test]
        fn prop_band_splits_matrix(
            m in dims_strategy().prop_flat_map(|(r, c)| matrix_strategy(r, c)),
            k in -3isize..3,
        ) {
            // Upper triangle from diagonal k plus lower triangle up to k - 1 is the whole matrix
            let upper = m.upper_triangle(k);
            let lower = m.lower_triangle(k - 1);
            prop_assert_eq!(&upper + &lower, m);
        }
    }
}
