use crate::parameters::{ExpressionError, ParameterError};
use thiserror::Error;

/// Error types for the curvefit-rs library.
#[derive(Error, Debug)]
pub enum FitError {
    /// The requested model family does not exist.
    #[error("Unknown model family: {0}")]
    UnknownModel(String),

    /// The structural property is not declared by the model.
    #[error("Unknown property '{name}' for model {model}")]
    UnknownProperty { name: String, model: String },

    /// The coefficient name is not among the model's coefficient names.
    #[error("Unknown coefficient: {0}")]
    UnknownCoefficient(String),

    /// A structural property was set outside its declared range.
    #[error("Invalid value {value} for property '{name}': expected {min}..={max}")]
    InvalidPropertyValue {
        name: String,
        value: i64,
        min: i64,
        max: i64,
    },

    /// An external coefficient vector has the wrong length.
    #[error("Coefficient count mismatch: expected {expected}, got {got}")]
    CoefficientCountMismatch { expected: usize, got: usize },

    /// Fewer than two samples were supplied.
    #[error("At least 2 samples are required, got {0}")]
    InsufficientSamples(usize),

    /// The x and y sequences differ in length.
    #[error("Sample length mismatch: {x_len} x values, {y_len} y values")]
    SampleLengthMismatch { x_len: usize, y_len: usize },

    /// A sample value is NaN or infinite.
    #[error("Sample {index} is not finite")]
    NonFiniteSample { index: usize },

    /// The normal equations cannot be solved.
    #[error("Singular system: {0}")]
    SingularSystem(String),

    /// A model declared an inconsistent schema.
    #[error("Invalid model definition: {0}")]
    InvalidModel(String),

    /// Error while parsing, evaluating or differentiating an expression.
    #[error("Expression error: {0}")]
    Expression(#[from] ExpressionError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FitError {
    /// Unknown model family, property or coefficient name.
    pub fn is_name_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownModel(_) | Self::UnknownProperty { .. } | Self::UnknownCoefficient(_)
        )
    }

    /// Sample set rejected before any computation ran.
    pub fn is_domain_error(&self) -> bool {
        matches!(
            self,
            Self::InsufficientSamples(_)
                | Self::SampleLengthMismatch { .. }
                | Self::NonFiniteSample { .. }
        )
    }

    /// The fit run failed while solving the normal equations.
    pub fn is_singular(&self) -> bool {
        matches!(self, Self::SingularSystem(_))
    }
}

impl From<ParameterError> for FitError {
    fn from(err: ParameterError) -> Self {
        match err {
            ParameterError::UnknownCoefficient { name } => FitError::UnknownCoefficient(name),
            ParameterError::UnknownProperty { name, model } => {
                FitError::UnknownProperty { name, model }
            }
            ParameterError::OutOfRange {
                name,
                value,
                min,
                max,
            } => FitError::InvalidPropertyValue {
                name,
                value,
                min,
                max,
            },
            ParameterError::LengthMismatch { expected, got } => {
                FitError::CoefficientCountMismatch { expected, got }
            }
            ParameterError::DuplicateName { name } => {
                FitError::InvalidModel(format!("coefficient '{}' is declared twice", name))
            }
        }
    }
}

/// Result type alias for curvefit-rs operations.
pub type Result<T> = std::result::Result<T, FitError>;
