//! Model trait shared by every curve family.
//!
//! A model is a function `f(x; a_0..a_k)` described by a family, integer
//! structural properties, and ordered named coefficients. This module defines
//! the [`Model`] trait with the operations every family supports, and the
//! [`ModelSnapshot`] used to save and restore a configured model.

use crate::error::{FitError, Result};
use crate::models::ModelKind;
use crate::parameters::{Coefficients, Properties, PropertySpec};
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub(crate) mod sealed {
    use crate::parameters::{Coefficients, Properties};

    /// Witness that a mutable state access comes from inside the crate.
    #[derive(Debug, Clone, Copy)]
    pub struct Internal(pub(crate) ());

    /// Raw mutable access to a model's state.
    ///
    /// Writing properties or coefficients directly can leave the two out of
    /// step, so only [`Model`](super::Model)'s provided methods use it.
    pub trait ModelState {
        fn properties_mut(&mut self, _: Internal) -> &mut Properties;

        fn coefficients_mut(&mut self, _: Internal) -> &mut Coefficients;
    }
}

use sealed::{Internal, ModelState};

/// A trait representing a curve model that can be fit to data.
///
/// Implementations provide the pointwise function, its formula text, and the
/// basis values used to assemble the design matrix. Everything else,
/// including property handling, coefficient access and bulk evaluation, comes
/// from the provided methods.
///
/// Changing a property through [`Model::set_property`] rebuilds the
/// coefficient list from [`Model::default_coefficients`], discarding previous
/// values. Setting a property to its current value keeps the coefficients.
///
/// The trait is sealed. Properties and coefficients are only writable through
/// `set_property`, `set_coefficient` and `replace_coefficients`, which keep
/// the coefficient names in step with the properties:
///
/// ```compile_fail
/// use curvefit_rs::create_model;
///
/// let mut model = create_model("Polynomial").unwrap();
/// model.properties_mut().set("degree", 4).unwrap();
/// ```
pub trait Model: ModelState + Send + Sync {
    /// The family this model belongs to.
    fn kind(&self) -> ModelKind;

    /// Returns a reference to the model's structural properties.
    fn properties(&self) -> &Properties;

    /// Returns a reference to the model's coefficients.
    fn coefficients(&self) -> &Coefficients;

    /// The coefficient list implied by the current properties, every value at
    /// its default.
    fn default_coefficients(&self) -> Coefficients;

    /// Evaluates the function at `x` with an explicit coefficient vector.
    ///
    /// `coefs` is in coefficient-name order and must have the model's
    /// coefficient count; use [`Model::evaluate_with_coefficients`] for a
    /// checked call.
    fn value_at(&self, x: f64, coefs: &[f64]) -> f64;

    /// Formula text in the expression syntax of
    /// [`Expression`](crate::parameters::Expression), using `x` and the
    /// coefficient names as variables.
    fn formula_string(&self) -> String;

    /// Writes the basis values `∂f/∂a_j` at `x` into `out`.
    ///
    /// Only meaningful for models linear in their coefficients; other models
    /// return [`FitError::SingularSystem`].
    fn basis(&self, x: f64, out: &mut [f64]) -> Result<()>;

    /// Whether `f` is a linear combination of its coefficients.
    fn is_linear(&self) -> bool {
        true
    }

    /// Clone into a boxed trait object.
    fn clone_box(&self) -> Box<dyn Model>;

    /// The family's display name.
    fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Declared structural properties with defaults and ranges.
    fn property_specs(&self) -> &'static [PropertySpec] {
        self.properties().specs()
    }

    fn get_property(&self, name: &str) -> Result<i64> {
        Ok(self.properties().get(name)?)
    }

    /// Sets a structural property.
    ///
    /// A changed value resets every coefficient to its default; the new
    /// coefficient list may differ in length.
    fn set_property(&mut self, name: &str, value: i64) -> Result<()> {
        if self.properties_mut(Internal(())).set(name, value)? {
            let fresh = self.default_coefficients();
            *self.coefficients_mut(Internal(())) = fresh;
        }
        Ok(())
    }

    fn coefficient_names(&self) -> &[String] {
        self.coefficients().names()
    }

    fn coefficient_count(&self) -> usize {
        self.coefficients().len()
    }

    fn get_coefficient(&self, name: &str) -> Result<f64> {
        self.coefficients()
            .get(name)
            .ok_or_else(|| FitError::UnknownCoefficient(name.to_string()))
    }

    fn set_coefficient(&mut self, name: &str, value: f64) -> Result<()> {
        Ok(self.coefficients_mut(Internal(())).set(name, value)?)
    }

    /// Replaces every coefficient at once.
    ///
    /// `coefficients` must carry exactly the names the current properties
    /// imply, in the same order; otherwise [`FitError::InvalidModel`] is
    /// returned and the model is left unchanged.
    fn replace_coefficients(&mut self, coefficients: Coefficients) -> Result<()> {
        let expected = self.default_coefficients();
        if coefficients.names() != expected.names() {
            return Err(FitError::InvalidModel(format!(
                "coefficients {:?} do not match {} coefficients {:?}",
                coefficients.names(),
                self.name(),
                expected.names()
            )));
        }
        *self.coefficients_mut(Internal(())) = coefficients;
        Ok(())
    }

    /// Evaluates the function at `x` with the current coefficients.
    fn evaluate(&self, x: f64) -> f64 {
        self.value_at(x, self.coefficients().values())
    }

    /// Evaluates the function at `x` with a caller-supplied coefficient vector.
    fn evaluate_with_coefficients(&self, x: f64, coefs: &[f64]) -> Result<f64> {
        let expected = self.coefficient_count();
        if coefs.len() != expected {
            return Err(FitError::CoefficientCountMismatch {
                expected,
                got: coefs.len(),
            });
        }
        Ok(self.value_at(x, coefs))
    }

    /// Evaluates the model at every x value using the current coefficients.
    fn eval(&self, x: &Array1<f64>) -> Array1<f64> {
        x.mapv(|xi| self.evaluate(xi))
    }

    /// Calculates the residuals `f(x_i) - y_i` using the current coefficients.
    fn residuals(&self, x: &Array1<f64>, y: &Array1<f64>) -> Result<Array1<f64>> {
        if x.len() != y.len() {
            return Err(FitError::SampleLengthMismatch {
                x_len: x.len(),
                y_len: y.len(),
            });
        }
        Ok(self.eval(x) - y)
    }

    /// Captures family, properties and coefficients.
    fn snapshot(&self) -> ModelSnapshot {
        ModelSnapshot {
            family: self.kind(),
            properties: self
                .properties()
                .iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
            coefficients: self.coefficients().clone(),
        }
    }
}

impl Clone for Box<dyn Model> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

impl fmt::Debug for dyn Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("family", &self.name())
            .field("properties", &self.properties().iter().collect::<Vec<_>>())
            .field("coefficients", self.coefficients())
            .finish()
    }
}

/// Serializable state of a configured model.
///
/// Restored with [`restore_model`](crate::models::restore_model).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSnapshot {
    pub family: ModelKind,
    pub properties: BTreeMap<String, i64>,
    pub coefficients: Coefficients,
}

impl ModelSnapshot {
    /// Serialize to a JSON string
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
