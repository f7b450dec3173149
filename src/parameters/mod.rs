//! # Coefficients, Properties and Expressions
//!
//! Every model carries two kinds of named values:
//!
//! - **Coefficients** ([`Coefficients`]): the real numbers a fit estimates.
//!   Names are unique and keep their declaration order.
//! - **Properties** ([`Properties`]): integer structural settings, such as a
//!   polynomial's degree, that decide which coefficients exist.
//!
//! The [`Expression`] engine parses model formulas and builds the symbolic
//! least-squares objective.
//!
//! ## Example Usage
//!
//! ```rust
//! use curvefit_rs::parameters::Coefficients;
//!
//! let mut coefs = Coefficients::indexed("a", 3, 1.0);
//! coefs.set("a1", 2.5).unwrap();
//!
//! assert_eq!(coefs.values(), &[1.0, 2.5, 1.0]);
//! assert!(coefs.set("a3", 0.0).is_err());
//! ```

pub mod coefficients;
pub mod expression;
pub mod property;

// Re-export key types
pub use coefficients::{Coefficient, Coefficients, ParameterError};
pub use expression::{
    AffineForm, BinaryOp, EvaluationContext, Expression, ExpressionError, SimpleContext, UnaryOp,
};
pub use property::{Properties, PropertySpec};
