//! Integration tests for the curvefit-rs library
//!
//! These tests run complete fits through the public API rather than
//! exercising individual components.

// Worked fits with known answers
pub mod scenarios;

// Design-matrix and symbolic assembly agree
pub mod equivalence;

// Recovery of known coefficients from seeded noisy data
pub mod noisy_recovery;
