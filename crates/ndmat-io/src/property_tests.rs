//! Property-based tests for text round trips
//!
//! Uses proptest to write matrices with random delimiter choices and check
//! that loading recovers them exactly.

#[cfg(test)]
mod tests {
    use crate::{extract, load, parse_matrix, write_delimited, TextOptions};
    use ndmat_linalg::Matrix;
    use proptest::prelude::*;

    // Strategy for small integer matrices
    fn matrix_strategy() -> impl Strategy<Value = Matrix<i64>> {
        (1usize..6, 1usize..6).prop_flat_map(|(rows, columns)| {
            prop::collection::vec(-1000i64..1000, rows * columns)
                .prop_map(move |data| Matrix::from_vec(data, rows, columns).unwrap())
        })
    }

    fn render(matrix: &Matrix<i64>, field: &str, line: &str) -> String {
        let mut text = String::new();
        for i in 0..matrix.rows() {
            let row: Vec<String> = matrix.row(i).unwrap().iter().map(|v| v.to_string()).collect();
            text.push_str(&row.join(field));
            text.push_str(line);
        }
        text
    }

    #[test]
    fn test_proptest_smoke() {
        let m: Matrix<i64> = parse_matrix("1 2\n3 4").unwrap();
        assert_eq!(m.dims(), (2, 2));
    }

    proptest! {
        #[test]
        fn prop_load_recovers_rendered_text(
            m in matrix_strategy(),
            field in prop_oneof![Just(" "), Just("\t"), Just(","), Just(" , "), Just("  ")],
            line in prop_oneof![Just("\n"), Just("\r\n"), Just("\r"), Just("\n\n")],
        ) {
            let text = render(&m, field, line);
            let loaded: Matrix<i64> = load(text.as_bytes()).unwrap();
            prop_assert_eq!(loaded, m);
        }

        #[test]
        fn prop_write_then_load(m in matrix_strategy()) {
            let mut output = Vec::new();
            write_delimited(&m, &mut output, &TextOptions::default()).unwrap();
            let loaded: Matrix<i64> = load(output.as_slice()).unwrap();
            prop_assert_eq!(loaded, m);
        }

        #[test]
        fn prop_extract_fills_preshaped(m in matrix_strategy()) {
            let text = render(&m, ",", ";");
            let mut target = Matrix::new(m.rows(), m.columns());
            extract(&mut target, &mut text.as_bytes()).unwrap();
            prop_assert_eq!(target, m);
        }
    }
}
