//! Fitting entry points, configuration and results.
//!
//! [`fit`] runs one least-squares fit of a model against samples and returns
//! a [`FitResult`] mapping each coefficient name to its fitted value. The
//! model itself is never modified; use [`FitResult::apply_to`] to copy the
//! fitted values back.
//!
//! Each call is independent and holds no shared state, so a host that
//! launches several fits concurrently decides which result to keep.

use crate::error::{FitError, Result};
use crate::model::Model;
use crate::problem::{FitProblem, SampleSet};
use crate::solver::{NormalEquations, SolveMethod};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Configuration options for a fit run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitConfig {
    /// How the normal equations are assembled. Default: DesignMatrix
    pub method: SolveMethod,

    /// Singular values at or below this are treated as zero.
    /// Default: None, meaning `k · ε · σ_max`
    pub rank_tolerance: Option<f64>,

    /// Condition number above which a warning is logged. Default: 1e12
    pub condition_warning: f64,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            method: SolveMethod::default(),
            rank_tolerance: None,
            condition_warning: 1e12,
        }
    }
}

impl FitConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_method(mut self, method: SolveMethod) -> Self {
        self.method = method;
        self
    }

    pub fn with_rank_tolerance(mut self, tolerance: f64) -> Self {
        self.rank_tolerance = Some(tolerance);
        self
    }

    pub fn with_condition_warning(mut self, threshold: f64) -> Self {
        self.condition_warning = threshold;
        self
    }

    /// Serialize to a JSON string
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// One fitted coefficient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedCoefficient {
    pub name: String,
    pub value: f64,
}

/// Outcome of a successful fit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    /// Family of the fitted model
    pub model: String,

    /// Fitted values in coefficient-name order
    pub coefficients: Vec<FittedCoefficient>,

    /// Objective value `(1/(n-1)) * Σ r_i^2` at the solution
    pub cost: f64,

    /// Residuals `f(x_i) - y_i` at the solution
    pub residuals: Vec<f64>,

    /// How the normal equations were assembled
    pub method: SolveMethod,

    /// Condition number of the normal matrix
    pub condition_number: f64,
}

impl FitResult {
    /// Fitted value of a coefficient
    pub fn get(&self, name: &str) -> Option<f64> {
        self.coefficients
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.value)
    }

    pub fn names(&self) -> Vec<&str> {
        self.coefficients.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.coefficients.iter().map(|c| c.value).collect()
    }

    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }

    pub fn to_map(&self) -> HashMap<String, f64> {
        self.coefficients
            .iter()
            .map(|c| (c.name.clone(), c.value))
            .collect()
    }

    /// Copy the fitted values into `model`'s coefficients.
    ///
    /// Every fitted name must exist on the model.
    pub fn apply_to<M: Model + ?Sized>(&self, model: &mut M) -> Result<()> {
        if model.coefficient_count() != self.len() {
            return Err(FitError::CoefficientCountMismatch {
                expected: model.coefficient_count(),
                got: self.len(),
            });
        }
        for coefficient in &self.coefficients {
            model.set_coefficient(&coefficient.name, coefficient.value)?;
        }
        Ok(())
    }

    /// Evaluate `model` at `x` using the fitted values
    pub fn fitted_values<M: Model + ?Sized>(&self, model: &M, x: &[f64]) -> Result<Vec<f64>> {
        let values = self.values();
        x.iter()
            .map(|xi| model.evaluate_with_coefficients(*xi, &values))
            .collect()
    }

    /// Serialize to a JSON string
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for FitResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Fit result for {} ({}):", self.model, self.method)?;
        for coefficient in &self.coefficients {
            writeln!(f, "  {} = {}", coefficient.name, coefficient.value)?;
        }
        writeln!(f, "  cost: {:e}", self.cost)?;
        write!(f, "  condition number: {:e}", self.condition_number)
    }
}

/// Fit `model` to the samples `(x_i, y_i)` with the default configuration.
///
/// # Errors
///
/// * [`FitError::SampleLengthMismatch`], [`FitError::InsufficientSamples`] or
///   [`FitError::NonFiniteSample`] when the samples are rejected
/// * [`FitError::SingularSystem`] when the normal equations have no unique
///   solution, including for models that are not linear in their coefficients
pub fn fit<M: Model + ?Sized>(model: &M, x: &[f64], y: &[f64]) -> Result<FitResult> {
    fit_with_config(model, x, y, &FitConfig::default())
}

/// Fit `model` to the samples `(x_i, y_i)` with an explicit configuration.
pub fn fit_with_config<M: Model + ?Sized>(
    model: &M,
    x: &[f64],
    y: &[f64],
    config: &FitConfig,
) -> Result<FitResult> {
    let samples = SampleSet::from_slices(x, y)?;
    fit_problem(&FitProblem::new(model, samples), config)
}

/// Solve an already constructed [`FitProblem`].
pub fn fit_problem<M: Model + ?Sized>(
    problem: &FitProblem<'_, M>,
    config: &FitConfig,
) -> Result<FitResult> {
    let model = problem.model();
    debug!(
        "fitting {} = {} to {} samples ({})",
        model.name(),
        model.formula_string(),
        problem.ndata(),
        config.method
    );

    let equations = NormalEquations::assemble(problem, config.method)?;
    let solution = equations.solve(config.rank_tolerance)?;
    if solution.condition_number > config.condition_warning {
        warn!(
            "normal matrix for {} is ill-conditioned (condition number {:e})",
            model.name(),
            solution.condition_number
        );
    }

    let values = solution.coefficients.to_vec();
    let residuals = problem.residuals(&values)?;
    let cost = residuals.dot(&residuals) / (problem.ndata() - 1) as f64;
    debug!(
        "fit of {} finished: {:?}, cost {:e}",
        model.name(),
        values,
        cost
    );

    let coefficients: Vec<FittedCoefficient> = model
        .coefficient_names()
        .iter()
        .zip(values)
        .map(|(name, value)| FittedCoefficient {
            name: name.clone(),
            value,
        })
        .collect();

    Ok(FitResult {
        model: model.name().to_string(),
        coefficients,
        cost,
        residuals: residuals.to_vec(),
        method: config.method,
        condition_number: solution.condition_number,
    })
}
