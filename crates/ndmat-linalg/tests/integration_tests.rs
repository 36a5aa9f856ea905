//! Integration tests for ndmat-linalg
//!
//! These tests verify end-to-end functionality and cross-module interactions.

use std::fmt;
use std::sync::{Arc, Mutex};

use ndmat_linalg::{
    multiply_into, Complex, DoolittleLu, LinalgError, LuDecomposition, LuFactorization, Matrix,
    MatrixAxis, TransposeMode,
};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-10
}

#[test]
fn test_two_by_two_determinant_and_inverse() {
    let m = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
    assert!(close(m.determinant(), -2.0));

    let inv = m.inverse();
    let expected = [-2.0, 1.0, 1.5, -0.5];
    for (got, want) in inv.iter().zip(expected) {
        assert!(close(*got, want), "{got} != {want}");
    }
}

#[test]
fn test_non_square_determinant_is_nan() {
    let m = Matrix::<f64>::new(2, 3);
    assert!(m.determinant().is_nan());
    assert!(m.trace().is_nan());
    assert!(matches!(
        m.try_determinant(),
        Err(LinalgError::NotSquare { rows: 2, columns: 3, .. })
    ));
}

#[test]
fn test_permute_rows_swaps() {
    let mut m = Matrix::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
    m.permute_rows(&[1, 0]).unwrap();
    assert_eq!(m, Matrix::from_rows(vec![vec![3, 4], vec![1, 2]]).unwrap());
}

#[test]
fn test_vandermonde_rows_are_powers() {
    let xs = [1.0, 2.0, 3.0];
    let v = Matrix::create_vandermonde(&xs);
    for (i, &x) in xs.iter().enumerate() {
        assert_eq!(v.row(i).unwrap(), vec![1.0, x, x * x]);
    }
    // det of a Vandermonde matrix is the product of pairwise differences
    assert!(close(v.determinant(), (2.0 - 1.0) * (3.0 - 1.0) * (3.0 - 2.0)));
}

#[test]
fn test_complex_conjugate_transpose() {
    let mut m = Matrix::from_rows(vec![vec![
        Complex::new(1.0, 2.0),
        Complex::new(3.0, -4.0),
        Complex::new(0.0, 1.0),
    ]])
    .unwrap();
    m.conjugate_transpose();
    assert_eq!(m.dims(), (3, 1));
    assert_eq!(
        m.as_slice(),
        &[
            Complex::new(1.0, -2.0),
            Complex::new(3.0, 4.0),
            Complex::new(0.0, -1.0)
        ]
    );
    assert_eq!(m.to_string(), "[1 - j2;\n 3 + j4;\n 0 - j1];");
}

#[test]
fn test_custom_solver_through_trait() {
    // A collaborator that only knows diagonal matrices
    struct DiagonalOnly;

    impl LuFactorization<f64> for DiagonalOnly {
        fn determinant(&self, matrix: &Matrix<f64>) -> Result<f64, LinalgError> {
            Ok(matrix.diagonal().iter().product())
        }

        fn invert(&self, matrix: &mut Matrix<f64>) -> Result<(), LinalgError> {
            let inverted: Vec<f64> = matrix.diagonal().iter().map(|d| 1.0 / d).collect();
            matrix.set_diagonal(&inverted);
            Ok(())
        }

        fn solve(&self, lhs: &Matrix<f64>, rhs: &mut Matrix<f64>) -> Result<(), LinalgError> {
            DoolittleLu.solve(lhs, rhs)
        }
    }

    let mut m = Matrix::create_diagonal(&[2.0, 4.0]);
    assert_eq!(m.determinant_with(&DiagonalOnly).unwrap(), 8.0);
    m.invert_with(&DiagonalOnly).unwrap();
    assert_eq!(m.diagonal(), vec![0.5, 0.25]);
}

#[test]
fn test_solve_multiple_right_hand_sides() {
    let a = Matrix::from_rows(vec![
        vec![2.0, 1.0, 0.0],
        vec![1.0, 3.0, 1.0],
        vec![0.0, 1.0, 4.0],
    ])
    .unwrap();
    let x = Matrix::from_rows(vec![vec![1.0, -1.0], vec![2.0, 0.5], vec![-3.0, 2.0]]).unwrap();
    let b = a.multiply(&x).unwrap();

    let lu = LuDecomposition::new(&a).unwrap();
    let mut solved = b.clone();
    lu.solve_matrix(&mut solved).unwrap();
    for (got, want) in solved.iter().zip(x.iter()) {
        assert!(close(*got, *want));
    }
    assert!(close(lu.determinant(), a.determinant()));
}

#[test]
fn test_multiply_into_reuses_destination() {
    let a = Matrix::from_rows(vec![vec![1, 2], vec![3, 4], vec![5, 6]]).unwrap();
    let mut result = Matrix::from_elem(7, 7, 0);

    multiply_into(&a, &a, &mut result, TransposeMode::TransposeLhs).unwrap();
    assert_eq!(result.dims(), (2, 2));
    assert_eq!(result.as_slice(), &[35, 44, 44, 56]);

    multiply_into(&a, &a, &mut result, TransposeMode::TransposeRhs).unwrap();
    assert_eq!(result.dims(), (3, 3));
    assert_eq!(result.row(0).unwrap(), vec![5, 11, 17]);
}

#[test]
fn test_block_view_round_trip() {
    let mut m = Matrix::<i32>::new(4, 4);
    let block = Matrix::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();

    m.view_mut(vec![1, 2], vec![2, 3])
        .unwrap()
        .assign(block.as_tensor())
        .unwrap();
    assert_eq!(m.sum(MatrixAxis::RowsAndColumns).unwrap().as_slice(), &[10]);
    assert_eq!(m[(2, 3)], 4);

    let view = m.view(vec![1, 2], vec![2, 3]).unwrap();
    assert_eq!(&view.to_tensor(), block.as_tensor());

    // Mismatched assignment leaves the owner intact
    let before = m.clone();
    assert!(m
        .view_mut(vec![0], vec![0, 1])
        .unwrap()
        .assign(block.as_tensor())
        .is_err());
    assert_eq!(m, before);
}

#[test]
fn test_companion_trace_matches_root_sum() {
    // (x - 1)(x - 2)(x - 3) = x^3 - 6x^2 + 11x - 6
    let c = Matrix::create_companion(&[1.0, -6.0, 11.0, -6.0]).unwrap();
    assert!(close(c.trace(), 6.0));
    assert!(close(c.determinant(), 6.0));
}

/// Collects the message of every WARN event seen while installed
#[derive(Clone, Default)]
struct WarningLog(Arc<Mutex<Vec<String>>>);

struct MessageVisitor<'a>(&'a mut String);

impl Visit for MessageVisitor<'_> {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            *self.0 = format!("{value:?}");
        }
    }
}

impl<S: Subscriber> Layer<S> for WarningLog {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::WARN {
            let mut message = String::new();
            event.record(&mut MessageVisitor(&mut message));
            self.0.lock().unwrap().push(message);
        }
    }
}

fn warnings_during(f: impl FnOnce()) -> Vec<String> {
    let log = WarningLog::default();
    let subscriber = tracing_subscriber::registry().with(log.clone());
    tracing::subscriber::with_default(subscriber, f);
    let messages = log.0.lock().unwrap().clone();
    messages
}

#[test]
fn test_non_square_determinant_logs_warning() {
    let m = Matrix::<f64>::new(2, 3);
    let mut det = 0.0;
    let warnings = warnings_during(|| det = m.determinant());
    assert!(det.is_nan());
    assert!(warnings.iter().any(|w| w == "determinant is undefined"), "{warnings:?}");
    assert!(warnings.iter().any(|w| w == "matrix is not square"), "{warnings:?}");

    let mut trace = 0.0;
    let warnings = warnings_during(|| trace = m.trace());
    assert!(trace.is_nan());
    assert!(warnings.iter().any(|w| w == "trace is undefined"), "{warnings:?}");
}

#[test]
fn test_valid_determinant_is_silent() {
    let m = Matrix::from_rows(vec![vec![2.0, 0.0], vec![0.0, 3.0]]).unwrap();
    let mut det = 0.0;
    let warnings = warnings_during(|| det = m.determinant());
    assert!(close(det, 6.0));
    assert!(warnings.is_empty(), "{warnings:?}");
}

#[test]
fn test_add_assign_mismatch_logs_warning() {
    let mut m = Matrix::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
    let other = Matrix::from_elem(2, 3, 1);
    let before = m.clone();
    let warnings = warnings_during(|| m += &other);
    assert_eq!(m, before);
    assert_eq!(warnings, vec!["shape mismatch".to_string()]);

    let warnings = warnings_during(|| m -= &other);
    assert_eq!(m, before);
    assert_eq!(warnings.len(), 1);
}

#[test]
fn test_mul_assign_mismatch_logs_warning() {
    let mut m = Matrix::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
    let other = m.clone();
    let before = m.clone();
    let warnings = warnings_during(|| m *= &other);
    assert_eq!(m, before);
    assert_eq!(
        warnings,
        vec!["incompatible dimensions for multiplication".to_string()]
    );
}
