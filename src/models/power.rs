//! Power-law model `a*x^b`.

use crate::error::{FitError, Result};
use crate::model::sealed::{Internal, ModelState};
use crate::model::Model;
use crate::models::ModelKind;
use crate::parameters::{Coefficients, Properties};

/// A power-law model
///
/// f(x) = a * x^b
///
/// The exponent `b` enters non-linearly, so the model can be built,
/// evaluated and serialized but a fit against it fails with
/// [`FitError::SingularSystem`].
#[derive(Debug, Clone)]
pub struct PowerModel {
    properties: Properties,
    coefficients: Coefficients,
}

impl PowerModel {
    pub fn new() -> Self {
        Self {
            properties: Properties::from_specs(ModelKind::Power.name(), &[]),
            coefficients: Coefficients::from_fixed(&["a", "b"], 1.0),
        }
    }
}

impl Default for PowerModel {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelState for PowerModel {
    fn properties_mut(&mut self, _: Internal) -> &mut Properties {
        &mut self.properties
    }

    fn coefficients_mut(&mut self, _: Internal) -> &mut Coefficients {
        &mut self.coefficients
    }
}

impl Model for PowerModel {
    fn kind(&self) -> ModelKind {
        ModelKind::Power
    }

    fn properties(&self) -> &Properties {
        &self.properties
    }

    fn coefficients(&self) -> &Coefficients {
        &self.coefficients
    }

    fn default_coefficients(&self) -> Coefficients {
        Self::new().coefficients
    }

    fn value_at(&self, x: f64, coefs: &[f64]) -> f64 {
        coefs[0] * x.powf(coefs[1])
    }

    fn formula_string(&self) -> String {
        "a*x^b".to_string()
    }

    fn basis(&self, _x: f64, _out: &mut [f64]) -> Result<()> {
        Err(FitError::SingularSystem(
            "Power is not linear in coefficient 'b'".to_string(),
        ))
    }

    fn is_linear(&self) -> bool {
        false
    }

    fn clone_box(&self) -> Box<dyn Model> {
        Box::new(self.clone())
    }
}
