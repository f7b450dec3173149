//! Design-matrix and symbolic assembly produce the same fit

use crate::test_helpers::{linspace, noisy_samples};
use curvefit_rs::{create_model, fit_with_config, FitConfig, FitResult, Model, SolveMethod};

fn fit_both(model: &dyn Model, x: &[f64], y: &[f64]) -> (FitResult, FitResult) {
    let design = FitConfig::default().with_method(SolveMethod::DesignMatrix);
    let symbolic = FitConfig::default().with_method(SolveMethod::Symbolic);
    (
        fit_with_config(model, x, y, &design).unwrap(),
        fit_with_config(model, x, y, &symbolic).unwrap(),
    )
}

fn assert_same_fit(design: &FitResult, symbolic: &FitResult) {
    assert_eq!(design.names(), symbolic.names());
    for (d, s) in design.values().iter().zip(symbolic.values()) {
        let scale = d.abs().max(1.0);
        assert!(
            (d - s).abs() < 1e-8 * scale,
            "design {} vs symbolic {}",
            d,
            s
        );
    }
    assert!((design.cost - symbolic.cost).abs() < 1e-8 * design.cost.max(1.0));
}

#[test]
fn test_polynomials_of_several_degrees() {
    let x = linspace(-2.0, 2.0, 25);
    let y = noisy_samples(&x, |x| 0.3 - x + 0.8 * x.powi(3), 0.2, 7);

    for degree in 0..=4 {
        let mut model = create_model("Polynomial").unwrap();
        model.set_property("degree", degree).unwrap();
        let (design, symbolic) = fit_both(model.as_ref(), &x, &y);
        assert_same_fit(&design, &symbolic);
    }
}

#[test]
fn test_periodic_models() {
    let x = linspace(0.1, 3.0, 30);

    for family in ["Sin", "Cos"] {
        for exponent in 1..=3 {
            let mut model = create_model(family).unwrap();
            model.set_property("exponent", exponent).unwrap();
            let y = noisy_samples(&x, |x| 1.7 * x.powi(exponent as i32).sin(), 0.1, 11);

            let (design, symbolic) = fit_both(model.as_ref(), &x, &y);
            assert_same_fit(&design, &symbolic);
        }
    }
}

#[test]
fn test_symbolic_objective_matches_reported_cost() {
    use curvefit_rs::parameters::SimpleContext;
    use curvefit_rs::{FitProblem, SampleSet};

    let model = create_model("Polynomial").unwrap();
    let x = linspace(0.0, 1.0, 6);
    let y = noisy_samples(&x, |x| 2.0 * x, 0.05, 3);
    let (design, _) = fit_both(model.as_ref(), &x, &y);

    let samples = SampleSet::from_slices(&x, &y).unwrap();
    let problem = FitProblem::new(model.as_ref(), samples);
    let objective = problem.objective().unwrap();

    let mut context = SimpleContext::new();
    for coefficient in &design.coefficients {
        context.set_variable(&coefficient.name, coefficient.value);
    }
    let value = objective.evaluate(&context).unwrap();
    assert!((value - design.cost).abs() < 1e-12);
}
