//! Ordered, uniquely named coefficient values
//!
//! This module provides the [`Coefficients`] collection used by every model.
//! The order of the names is the order of the normal-equation unknowns.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when working with coefficients and properties
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    #[error("Coefficient '{name}' not found")]
    UnknownCoefficient { name: String },

    #[error("Property '{name}' is not declared by model {model}")]
    UnknownProperty { name: String, model: String },

    #[error("Value {value} for '{name}' is outside {min}..={max}")]
    OutOfRange {
        name: String,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("Expected {expected} values, got {got}")]
    LengthMismatch { expected: usize, got: usize },

    #[error("Name '{name}' is declared twice")]
    DuplicateName { name: String },
}

/// A single named coefficient, the serialized form of one entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coefficient {
    pub name: String,
    pub value: f64,
}

/// Named coefficient values in declaration order.
///
/// Serializes as a list of `{ "name": ..., "value": ... }` entries;
/// deserializing a list with a repeated name fails.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(into = "Vec<Coefficient>", try_from = "Vec<Coefficient>")]
pub struct Coefficients {
    names: Vec<String>,
    values: Vec<f64>,
}

impl Coefficients {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// `count` coefficients named `{prefix}0`, `{prefix}1`, ... all set to `value`
    pub fn indexed(prefix: &str, count: usize, value: f64) -> Self {
        Self {
            names: (0..count).map(|i| format!("{}{}", prefix, i)).collect(),
            values: vec![value; count],
        }
    }

    /// Coefficients with built-in names, all set to `value`.
    ///
    /// The names must be distinct; untrusted names go through
    /// [`Coefficients::with_names`].
    pub(crate) fn from_fixed(names: &[&str], value: f64) -> Self {
        debug_assert!(
            names.iter().enumerate().all(|(i, n)| !names[..i].contains(n)),
            "duplicate coefficient name in {:?}",
            names
        );
        Self {
            names: names.iter().map(|n| n.to_string()).collect(),
            values: vec![value; names.len()],
        }
    }

    /// Build from a list of names, all set to `value`
    pub fn with_names<I, S>(names: I, value: f64) -> Result<Self, ParameterError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut coefs = Self::new();
        for name in names {
            coefs.add(name, value)?;
        }
        Ok(coefs)
    }

    /// Append a coefficient
    pub fn add<S: Into<String>>(&mut self, name: S, value: f64) -> Result<(), ParameterError> {
        let name = name.into();
        if self.index_of(&name).is_some() {
            return Err(ParameterError::DuplicateName { name });
        }
        self.names.push(name);
        self.values.push(value);
        Ok(())
    }

    /// Position of `name` in declaration order
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.index_of(name).map(|i| self.values[i])
    }

    pub fn set(&mut self, name: &str, value: f64) -> Result<(), ParameterError> {
        match self.index_of(name) {
            Some(i) => {
                self.values[i] = value;
                Ok(())
            }
            None => Err(ParameterError::UnknownCoefficient {
                name: name.to_string(),
            }),
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Overwrite all values at once, in declaration order
    pub fn set_values(&mut self, values: &[f64]) -> Result<(), ParameterError> {
        if values.len() != self.values.len() {
            return Err(ParameterError::LengthMismatch {
                expected: self.values.len(),
                got: values.len(),
            });
        }
        self.values.copy_from_slice(values);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterate over `(name, value)` pairs in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }

    /// Serialize to a JSON string
    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize from a JSON string
    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl From<Coefficients> for Vec<Coefficient> {
    fn from(coefs: Coefficients) -> Self {
        coefs
            .names
            .into_iter()
            .zip(coefs.values)
            .map(|(name, value)| Coefficient { name, value })
            .collect()
    }
}

impl TryFrom<Vec<Coefficient>> for Coefficients {
    type Error = ParameterError;

    fn try_from(entries: Vec<Coefficient>) -> Result<Self, Self::Error> {
        let mut coefs = Coefficients::new();
        for entry in entries {
            coefs.add(entry.name, entry.value)?;
        }
        Ok(coefs)
    }
}
