//! End-to-end tests across the ndmat crates

use anyhow::Result;
use ndmat::logging::{init_logging, LoggingConfig, LoggingFormat};
use ndmat::prelude::*;

#[test]
fn test_load_and_solve() -> Result<()> {
    let system: Matrix<f64> = parse_matrix("4 1 0\n1 3 1\n0 1 2\n")?;
    let rhs: Matrix<f64> = parse_matrix("5\n5\n3\n")?;

    let x = system.solve(&rhs)?;
    assert_eq!(x.dims(), (3, 1));
    for (value, expected) in x.iter().zip([1.0, 1.0, 1.0]) {
        assert!((value - expected).abs() < 1e-12);
    }

    let residual = &system.multiply(&x)? - &rhs;
    assert!(residual.iter().all(|r| r.abs() < 1e-12));
    Ok(())
}

#[test]
fn test_tensor_slice_into_matrix() -> Result<()> {
    let t = Tensor::from_vec((0..24).map(f64::from).collect(), &[2, 3, 4])?;

    // First 3x4 slab of the cube
    let slab = t.view(Subscript::from_subsets(vec![vec![0], vec![0, 1, 2], vec![0, 1, 2, 3]]))?;
    let m = Matrix::from_tensor(slab.to_tensor().squeeze(2))?;

    assert_eq!(m.dims(), (3, 4));
    assert_eq!(m[(2, 3)], 11.0);
    assert_eq!(m.sum(MatrixAxis::RowsAndColumns)?.as_slice(), &[66.0]);
    Ok(())
}

#[test]
fn test_complex_round_trip_through_inverse() -> Result<()> {
    let m = Matrix::from_rows(vec![
        vec![Complex::new(2.0, 1.0), Complex::new(0.0, 0.0)],
        vec![Complex::new(1.0, 0.0), Complex::new(0.0, -1.0)],
    ])?;
    let product = m.multiply(&m.try_inverse()?)?;
    let identity = Matrix::<Complex<f64>>::create_identity(2);
    for (a, b) in product.iter().zip(identity.iter()) {
        assert!((a - b).norm() < 1e-12);
    }
    Ok(())
}

#[test]
fn test_logging_initializes_once() {
    let config = LoggingConfig {
        format: LoggingFormat::Compact,
        filter: "warn".to_string(),
        ..LoggingConfig::default()
    };
    assert!(init_logging(config.clone()).is_ok());
    assert!(init_logging(config).is_err());

    // Sentinel paths warn through the installed subscriber
    let m = Matrix::<f64>::new(2, 3);
    assert!(m.determinant().is_nan());
}
