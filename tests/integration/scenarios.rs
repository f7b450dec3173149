//! Worked fits with hand-checkable answers

use crate::test_helpers::{approx_eq, slice_approx_eq};
use curvefit_rs::{create_model, fit, fit_with_config, FitConfig, SolveMethod};
use std::f64::consts::PI;

#[test]
fn test_quadratic_through_four_points() {
    let model = create_model("Polynomial").unwrap();
    let x = [0.0, 1.0, 2.0, 3.0];
    let y: Vec<f64> = x.iter().map(|x| 1.0 + 2.0 * x + 0.5 * x * x).collect();

    for method in [SolveMethod::DesignMatrix, SolveMethod::Symbolic] {
        let config = FitConfig::default().with_method(method);
        let result = fit_with_config(model.as_ref(), &x, &y, &config).unwrap();

        assert_eq!(result.names(), vec!["a0", "a1", "a2"]);
        assert!(slice_approx_eq(&result.values(), &[1.0, 2.0, 0.5], 1e-9));
        assert!(result.cost < 1e-18);
        assert_eq!(result.method, method);
    }
}

#[test]
fn test_sine_amplitude() {
    let model = create_model("Sin").unwrap();
    let result = fit(model.as_ref(), &[0.0, PI / 2.0, PI], &[0.0, 2.0, 0.0]).unwrap();

    assert_eq!(result.names(), vec!["a0"]);
    assert!(approx_eq(result.get("a0").unwrap(), 2.0, 1e-12));
}

#[test]
fn test_cosine_with_squared_argument() {
    let mut model = create_model("cosine").unwrap();
    model.set_property("exponent", 2).unwrap();

    let x = [0.0, 0.5, 1.0, 1.5];
    let y: Vec<f64> = x.iter().map(|x: &f64| -3.0 * (x * x).cos()).collect();
    let result = fit(model.as_ref(), &x, &y).unwrap();
    assert!(approx_eq(result.get("a0").unwrap(), -3.0, 1e-12));
}

#[test]
fn test_constant_is_sample_mean() {
    let mut model = create_model("Polynomial").unwrap();
    model.set_property("degree", 0).unwrap();

    let y = [2.0, 4.0, 9.0];
    let result = fit(model.as_ref(), &[1.0, 2.0, 3.0], &y).unwrap();
    assert!(approx_eq(result.get("a0").unwrap(), 5.0, 1e-12));

    // (1/(n-1)) * Σ (5 - y_i)^2 = (9 + 1 + 16) / 2
    assert!(approx_eq(result.cost, 13.0, 1e-12));
}

#[test]
fn test_line_through_two_points() {
    let mut model = create_model("Polynomial").unwrap();
    model.set_property("degree", 1).unwrap();

    let result = fit(model.as_ref(), &[-1.0, 3.0], &[4.0, -4.0]).unwrap();
    assert!(slice_approx_eq(&result.values(), &[2.0, -2.0], 1e-12));
    assert!(slice_approx_eq(&result.residuals, &[0.0, 0.0], 1e-12));
}

#[test]
fn test_overdetermined_least_squares() {
    // Best line through (0,0), (1,1), (2,1), (3,3)
    let mut model = create_model("Polynomial").unwrap();
    model.set_property("degree", 1).unwrap();

    let result = fit(model.as_ref(), &[0.0, 1.0, 2.0, 3.0], &[0.0, 1.0, 1.0, 3.0]).unwrap();
    assert!(approx_eq(result.get("a1").unwrap(), 0.9, 1e-12));
    assert!(approx_eq(result.get("a0").unwrap(), -0.1, 1e-12));

    let residual_sum: f64 = result.residuals.iter().sum();
    assert!(residual_sum.abs() < 1e-12);
}

#[test]
fn test_refit_after_degree_change() {
    let mut model = create_model("Polynomial").unwrap();
    let x = [0.0, 1.0, 2.0, 3.0, 4.0];
    let y: Vec<f64> = x.iter().map(|x: &f64| x.powi(3) - x).collect();

    let quadratic = fit(model.as_ref(), &x, &y).unwrap();
    assert!(quadratic.cost > 0.1);

    model.set_property("degree", 3).unwrap();
    let cubic = fit(model.as_ref(), &x, &y).unwrap();
    assert!(slice_approx_eq(&cubic.values(), &[0.0, -1.0, 0.0, 1.0], 1e-9));
}
