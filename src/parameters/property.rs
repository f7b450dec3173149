//! Integer structural properties of a model
//!
//! A property decides the shape of a model rather than a fitted value, for
//! example the degree of a polynomial. Each model declares a static list of
//! [`PropertySpec`]s; [`Properties`] holds the current values.

use crate::parameters::coefficients::ParameterError;

/// Declaration of one structural property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertySpec {
    pub name: &'static str,
    pub default: i64,
    pub min: i64,
    pub max: i64,
    pub description: &'static str,
}

impl PropertySpec {
    pub const fn new(
        name: &'static str,
        default: i64,
        min: i64,
        max: i64,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            default,
            min,
            max,
            description,
        }
    }

    /// Whether `value` lies in the declared range
    pub fn contains(&self, value: i64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    fn check(&self, value: i64) -> Result<i64, ParameterError> {
        if self.contains(value) {
            Ok(value)
        } else {
            Err(ParameterError::OutOfRange {
                name: self.name.to_string(),
                value,
                min: self.min,
                max: self.max,
            })
        }
    }
}

/// Current property values of one model instance.
#[derive(Debug, Clone, PartialEq)]
pub struct Properties {
    model: &'static str,
    specs: &'static [PropertySpec],
    values: Vec<i64>,
}

impl Properties {
    /// All properties at their declared defaults
    pub fn from_specs(model: &'static str, specs: &'static [PropertySpec]) -> Self {
        Self {
            model,
            specs,
            values: specs.iter().map(|spec| spec.default).collect(),
        }
    }

    fn index_of(&self, name: &str) -> Result<usize, ParameterError> {
        self.specs
            .iter()
            .position(|spec| spec.name == name)
            .ok_or_else(|| ParameterError::UnknownProperty {
                name: name.to_string(),
                model: self.model.to_string(),
            })
    }

    pub fn get(&self, name: &str) -> Result<i64, ParameterError> {
        Ok(self.values[self.index_of(name)?])
    }

    /// Set a property, returning whether its value changed.
    pub fn set(&mut self, name: &str, value: i64) -> Result<bool, ParameterError> {
        let index = self.index_of(name)?;
        let value = self.specs[index].check(value)?;
        let changed = self.values[index] != value;
        self.values[index] = value;
        Ok(changed)
    }

    pub fn specs(&self) -> &'static [PropertySpec] {
        self.specs
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, i64)> + '_ {
        self.specs
            .iter()
            .map(|spec| spec.name)
            .zip(self.values.iter().copied())
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}
