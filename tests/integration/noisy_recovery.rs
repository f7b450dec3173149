//! Recovery of known coefficients from noiseless and seeded noisy samples

use crate::test_helpers::{linspace, noisy_samples, slice_approx_eq};
use curvefit_rs::{create_model, fit};

#[test]
fn test_noiseless_recovery_all_linear_families() {
    let x = linspace(0.2, 2.5, 12);

    let mut poly = create_model("Polynomial").unwrap();
    poly.set_property("degree", 4).unwrap();
    let truth = [0.5, -1.25, 3.0, 0.0, -0.75];
    let y: Vec<f64> = x
        .iter()
        .map(|&xi| poly.evaluate_with_coefficients(xi, &truth).unwrap())
        .collect();
    let result = fit(poly.as_ref(), &x, &y).unwrap();
    assert!(slice_approx_eq(&result.values(), &truth, 1e-6));

    for family in ["Sin", "Cos"] {
        let mut model = create_model(family).unwrap();
        model.set_property("exponent", 2).unwrap();
        let y: Vec<f64> = x
            .iter()
            .map(|&xi| model.evaluate_with_coefficients(xi, &[-0.4]).unwrap())
            .collect();
        let result = fit(model.as_ref(), &x, &y).unwrap();
        assert!(slice_approx_eq(&result.values(), &[-0.4], 1e-12));
    }
}

#[test]
fn test_noisy_quadratic_recovery() {
    let model = create_model("Polynomial").unwrap();
    let x = linspace(-5.0, 5.0, 200);
    let y = noisy_samples(&x, |x| 4.0 - 0.5 * x + 0.25 * x * x, 0.1, 42);

    let result = fit(model.as_ref(), &x, &y).unwrap();
    assert!(slice_approx_eq(&result.values(), &[4.0, -0.5, 0.25], 0.05));

    // Cost estimates the noise variance
    assert!((result.cost - 0.01).abs() < 0.005);
}

#[test]
fn test_many_samples_symbolic_path() {
    use curvefit_rs::{fit_with_config, FitConfig, SolveMethod};

    let model = create_model("Sin").unwrap();
    let x = linspace(0.0, 10.0, 2000);
    let y = noisy_samples(&x, |x| 3.0 * x.sin(), 0.2, 5);

    let config = FitConfig::default().with_method(SolveMethod::Symbolic);
    let result = fit_with_config(model.as_ref(), &x, &y, &config).unwrap();
    assert!((result.get("a0").unwrap() - 3.0).abs() < 0.05);
}
