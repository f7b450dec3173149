//! Tests for coefficients, properties and the expression engine

pub mod coefficients_tests;
pub mod expression_tests;
