//! Fit every linear model family to noisy samples and print the results.
//!
//! Run with `RUST_LOG=debug` to see the solver's log output.

use curvefit_rs::{available_models, create_model, fit, restore_model, Model, ModelSnapshot};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("Curve fitting example");
    println!("=====================\n");

    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let noise = Normal::new(0.0, 0.05)?;

    let x: Vec<f64> = (0..40).map(|i| 0.1 + i as f64 * 0.075).collect();

    for kind in available_models() {
        let mut model = create_model(kind.name())?;
        if !kind.is_linear() {
            println!("{}: {} is not linear in its coefficients, skipped\n", kind, model.formula_string());
            continue;
        }

        // Generate data from known coefficients, then forget them
        let truth: Vec<f64> = (0..model.coefficient_count())
            .map(|i| 1.5 - 0.5 * i as f64)
            .collect();
        let y: Vec<f64> = x
            .iter()
            .map(|&xi| model.evaluate_with_coefficients(xi, &truth).map(|v| v + noise.sample(&mut rng)))
            .collect::<Result<_, _>>()?;

        let result = fit(model.as_ref(), &x, &y)?;
        println!("{}: {}", kind, model.formula_string());
        println!("true coefficients: {:?}", truth);
        println!("{}\n", result);

        result.apply_to(model.as_mut())?;
        let json = model.snapshot().to_json()?;
        let restored = restore_model(&ModelSnapshot::from_json(&json)?)?;
        println!("saved model:\n{}\n", json);
        println!(
            "restored model at x = 1: {:.6}\n",
            restored.evaluate(1.0)
        );
    }

    Ok(())
}
