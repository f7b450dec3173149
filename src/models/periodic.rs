//! Sine and cosine models `a0*sin(x^p)` and `a0*cos(x^p)`.

use crate::error::Result;
use crate::model::sealed::{Internal, ModelState};
use crate::model::Model;
use crate::models::ModelKind;
use crate::parameters::{Coefficients, Properties, PropertySpec};

const PROPERTIES: &[PropertySpec] = &[PropertySpec::new(
    "exponent",
    1,
    0,
    99,
    "power of x inside the wave function",
)];

/// The wave function applied to `x^p`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wave {
    Sin,
    Cos,
}

impl Wave {
    pub fn apply(self, value: f64) -> f64 {
        match self {
            Wave::Sin => value.sin(),
            Wave::Cos => value.cos(),
        }
    }

    /// Function name in formula text
    pub fn function(self) -> &'static str {
        match self {
            Wave::Sin => "sin",
            Wave::Cos => "cos",
        }
    }
}

/// A single-amplitude periodic model
///
/// f(x) = a0 * wave(x^p)
///
/// where `wave` is sine or cosine and `p` is the `exponent` property.
#[derive(Debug, Clone)]
pub struct PeriodicModel {
    wave: Wave,
    properties: Properties,
    coefficients: Coefficients,
}

impl PeriodicModel {
    pub fn new(wave: Wave) -> Self {
        let kind = match wave {
            Wave::Sin => ModelKind::Sine,
            Wave::Cos => ModelKind::Cosine,
        };
        Self {
            wave,
            properties: Properties::from_specs(kind.name(), PROPERTIES),
            coefficients: Coefficients::indexed("a", 1, 1.0),
        }
    }

    pub fn sine() -> Self {
        Self::new(Wave::Sin)
    }

    pub fn cosine() -> Self {
        Self::new(Wave::Cos)
    }

    pub fn with_exponent(wave: Wave, exponent: i64) -> Result<Self> {
        let mut model = Self::new(wave);
        model.set_property("exponent", exponent)?;
        Ok(model)
    }

    pub fn wave(&self) -> Wave {
        self.wave
    }

    pub fn exponent(&self) -> i32 {
        self.properties.get("exponent").map_or(1, |p| p as i32)
    }

    fn argument(&self, x: f64) -> f64 {
        x.powi(self.exponent())
    }
}

impl ModelState for PeriodicModel {
    fn properties_mut(&mut self, _: Internal) -> &mut Properties {
        &mut self.properties
    }

    fn coefficients_mut(&mut self, _: Internal) -> &mut Coefficients {
        &mut self.coefficients
    }
}

impl Model for PeriodicModel {
    fn kind(&self) -> ModelKind {
        match self.wave {
            Wave::Sin => ModelKind::Sine,
            Wave::Cos => ModelKind::Cosine,
        }
    }

    fn properties(&self) -> &Properties {
        &self.properties
    }

    fn coefficients(&self) -> &Coefficients {
        &self.coefficients
    }

    fn default_coefficients(&self) -> Coefficients {
        Coefficients::indexed("a", 1, 1.0)
    }

    fn value_at(&self, x: f64, coefs: &[f64]) -> f64 {
        coefs[0] * self.wave.apply(self.argument(x))
    }

    fn formula_string(&self) -> String {
        format!("a0*{}(x^{})", self.wave.function(), self.exponent())
    }

    fn basis(&self, x: f64, out: &mut [f64]) -> Result<()> {
        out[0] = self.wave.apply(self.argument(x));
        Ok(())
    }

    fn clone_box(&self) -> Box<dyn Model> {
        Box::new(self.clone())
    }
}
