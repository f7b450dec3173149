//! # curvefit-rs
//!
//! `curvefit-rs` fits curve models to sampled `(x, y)` data by least squares.
//! Models that are linear in their coefficients are solved exactly through
//! the normal equations, assembled either from the design matrix or by
//! symbolic differentiation of the objective.
//!
//! The library provides:
//! - Four model families: polynomial, power law, sine and cosine
//! - Integer structural properties (degree, exponent) and named coefficients
//! - An expression engine that parses, differentiates and simplifies formulas
//! - Serializable models, fit configurations and fit results
//!
//! ## Basic Usage
//!
//! ```
//! use curvefit_rs::{create_model, fit};
//!
//! let model = create_model("Polynomial").unwrap();
//! let x = [0.0, 1.0, 2.0, 3.0];
//! let y = [1.0, 3.5, 7.0, 11.5];
//!
//! let result = fit(model.as_ref(), &x, &y).unwrap();
//! assert!((result.get("a2").unwrap() - 0.5).abs() < 1e-9);
//! ```

// Public modules
pub mod error;
pub mod fit;
pub mod model;
pub mod models;
pub mod parameters;
pub mod problem;
pub mod solver;
pub mod utils;

// Re-exports for convenience
pub use error::{FitError, Result};
pub use fit::{fit, fit_problem, fit_with_config, FitConfig, FitResult, FittedCoefficient};
pub use model::{Model, ModelSnapshot};
pub use models::{available_models, create_model, restore_model, ModelKind};
pub use problem::{FitProblem, SampleSet};
pub use solver::{NormalEquations, SolveMethod};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
