//! Built-in curve families.
//!
//! This module provides the four families a fit can be run against and the
//! name-based factory used to create them:
//!
//! | family       | formula             | properties       | linear |
//! |--------------|---------------------|------------------|--------|
//! | `Polynomial` | `a0 + a1*x + ...`   | `degree` (2)     | yes    |
//! | `Power`      | `a*x^b`             | none             | no     |
//! | `Sin`        | `a0*sin(x^p)`       | `exponent` (1)   | yes    |
//! | `Cos`        | `a0*cos(x^p)`       | `exponent` (1)   | yes    |
//!
//! Family names are matched case-insensitively; `Sine` and `Cosine` are
//! accepted as aliases.

use crate::error::{FitError, Result};
use crate::model::{Model, ModelSnapshot};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

mod periodic;
mod polynomial;
mod power;

// Re-export the models
pub use periodic::{PeriodicModel, Wave};
pub use polynomial::PolynomialModel;
pub use power::PowerModel;

/// The available curve families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelKind {
    Polynomial,
    Power,
    Sine,
    Cosine,
}

impl ModelKind {
    /// Every family, in the order they are listed to users
    pub const ALL: [ModelKind; 4] = [
        ModelKind::Polynomial,
        ModelKind::Power,
        ModelKind::Sine,
        ModelKind::Cosine,
    ];

    /// Display name of the family
    pub fn name(self) -> &'static str {
        match self {
            ModelKind::Polynomial => "Polynomial",
            ModelKind::Power => "Power",
            ModelKind::Sine => "Sin",
            ModelKind::Cosine => "Cos",
        }
    }

    /// Whether the family is linear in its coefficients and can be fit
    pub fn is_linear(self) -> bool {
        !matches!(self, ModelKind::Power)
    }

    /// A fresh model of this family with default properties and coefficients
    pub fn create(self) -> Box<dyn Model> {
        match self {
            ModelKind::Polynomial => Box::new(PolynomialModel::new()),
            ModelKind::Power => Box::new(PowerModel::new()),
            ModelKind::Sine => Box::new(PeriodicModel::sine()),
            ModelKind::Cosine => Box::new(PeriodicModel::cosine()),
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ModelKind {
    type Err = FitError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "polynomial" => Ok(ModelKind::Polynomial),
            "power" => Ok(ModelKind::Power),
            "sin" | "sine" => Ok(ModelKind::Sine),
            "cos" | "cosine" => Ok(ModelKind::Cosine),
            _ => Err(FitError::UnknownModel(s.to_string())),
        }
    }
}

/// Create a model from its family name
///
/// # Arguments
///
/// * `family` - A family name such as `"Polynomial"` or `"sin"`
///
/// # Returns
///
/// * A model with default properties and every coefficient at 1, or
///   [`FitError::UnknownModel`]
pub fn create_model(family: &str) -> Result<Box<dyn Model>> {
    Ok(family.parse::<ModelKind>()?.create())
}

/// The families [`create_model`] understands
pub fn available_models() -> &'static [ModelKind] {
    &ModelKind::ALL
}

/// Rebuild a model from a [`ModelSnapshot`]
///
/// Properties are applied first, then the saved coefficients, which must
/// match the coefficient names the properties imply.
pub fn restore_model(snapshot: &ModelSnapshot) -> Result<Box<dyn Model>> {
    let mut model = snapshot.family.create();
    for (name, value) in &snapshot.properties {
        model.set_property(name, *value)?;
    }

    model.replace_coefficients(snapshot.coefficients.clone())?;
    Ok(model)
}

/// Create a polynomial model of the given degree
pub fn polynomial_model(degree: i64) -> Result<PolynomialModel> {
    PolynomialModel::with_degree(degree)
}

/// Create a sine model `a0*sin(x^exponent)`
pub fn sine_model(exponent: i64) -> Result<PeriodicModel> {
    PeriodicModel::with_exponent(Wave::Sin, exponent)
}

/// Create a cosine model `a0*cos(x^exponent)`
pub fn cosine_model(exponent: i64) -> Result<PeriodicModel> {
    PeriodicModel::with_exponent(Wave::Cos, exponent)
}
