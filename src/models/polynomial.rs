//! Polynomial model of configurable degree.

use crate::error::Result;
use crate::model::sealed::{Internal, ModelState};
use crate::model::Model;
use crate::models::ModelKind;
use crate::parameters::{Coefficients, Properties, PropertySpec};

const PROPERTIES: &[PropertySpec] = &[PropertySpec::new(
    "degree",
    2,
    0,
    99,
    "highest power of x",
)];

/// A polynomial model of arbitrary degree
///
/// The polynomial function is defined as:
///
/// f(x) = a0 + a1*x + a2*x^2 + ... + ad*x^d
///
/// where `d` is the `degree` property, so there are `d + 1` coefficients.
///
/// `degree` is the highest power of `x`, not the number of terms: a degree
/// of 2 is the quadratic `a0 + a1*x + a2*x^2` with three coefficients, and
/// a degree of 0 is the constant `a0`. Counting terms instead would make
/// degree 2 the straight line `a0 + a1*x`.
#[derive(Debug, Clone)]
pub struct PolynomialModel {
    properties: Properties,
    coefficients: Coefficients,
}

impl PolynomialModel {
    /// A quadratic with every coefficient at 1
    pub fn new() -> Self {
        let properties = Properties::from_specs(ModelKind::Polynomial.name(), PROPERTIES);
        let mut model = Self {
            properties,
            coefficients: Coefficients::new(),
        };
        model.coefficients = model.default_coefficients();
        model
    }

    /// A polynomial of the given degree with every coefficient at 1
    pub fn with_degree(degree: i64) -> Result<Self> {
        let mut model = Self::new();
        model.set_property("degree", degree)?;
        Ok(model)
    }

    pub fn degree(&self) -> usize {
        self.properties.get("degree").map_or(0, |d| d as usize)
    }
}

impl Default for PolynomialModel {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelState for PolynomialModel {
    fn properties_mut(&mut self, _: Internal) -> &mut Properties {
        &mut self.properties
    }

    fn coefficients_mut(&mut self, _: Internal) -> &mut Coefficients {
        &mut self.coefficients
    }
}

impl Model for PolynomialModel {
    fn kind(&self) -> ModelKind {
        ModelKind::Polynomial
    }

    fn properties(&self) -> &Properties {
        &self.properties
    }

    fn coefficients(&self) -> &Coefficients {
        &self.coefficients
    }

    fn default_coefficients(&self) -> Coefficients {
        Coefficients::indexed("a", self.degree() + 1, 1.0)
    }

    fn value_at(&self, x: f64, coefs: &[f64]) -> f64 {
        // Horner's scheme, highest power first
        coefs.iter().rev().fold(0.0, |acc, c| acc * x + c)
    }

    fn formula_string(&self) -> String {
        (0..=self.degree())
            .map(|i| match i {
                0 => "a0".to_string(),
                1 => "a1*x".to_string(),
                _ => format!("a{}*x^{}", i, i),
            })
            .collect::<Vec<_>>()
            .join(" + ")
    }

    fn basis(&self, x: f64, out: &mut [f64]) -> Result<()> {
        let mut x_power = 1.0;
        for value in out.iter_mut() {
            *value = x_power;
            x_power *= x;
        }
        Ok(())
    }

    fn clone_box(&self) -> Box<dyn Model> {
        Box::new(self.clone())
    }
}
