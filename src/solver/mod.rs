//! Normal-equation assembly and solution.
//!
//! Both assembly paths produce the `k × k` system `A·c = b` whose solution
//! minimizes the least-squares objective of a [`FitProblem`]:
//!
//! - [`design`]: `A = BᵀB`, `b = Bᵀy` from the design matrix `B`.
//! - [`symbolic`]: row `j` is the affine form of `∂S/∂a_j = 0`, where `S` is
//!   the symbolic objective.
//!
//! The two systems differ by the positive factor `2/(n-1)` and give the same
//! coefficients.

pub mod design;
pub mod symbolic;

use crate::error::{FitError, Result};
use crate::model::Model;
use crate::problem::FitProblem;
use crate::utils::{nalgebra_vec_to_ndarray, ndarray_to_nalgebra, ndarray_vec_to_nalgebra};
use log::trace;
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How the normal equations are assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SolveMethod {
    /// `BᵀB·c = Bᵀy` from the design matrix
    #[default]
    DesignMatrix,

    /// Symbolic differentiation of the objective
    Symbolic,
}

impl fmt::Display for SolveMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveMethod::DesignMatrix => write!(f, "design matrix"),
            SolveMethod::Symbolic => write!(f, "symbolic"),
        }
    }
}

/// A square linear system `matrix · c = rhs`.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalEquations {
    pub matrix: Array2<f64>,
    pub rhs: Array1<f64>,
}

/// The solution of a [`NormalEquations`] system.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub coefficients: Array1<f64>,

    /// Ratio of the largest to the smallest singular value of the matrix
    pub condition_number: f64,
}

impl NormalEquations {
    /// Assemble the system for `problem` with the chosen method
    pub fn assemble<M: Model + ?Sized>(
        problem: &FitProblem<'_, M>,
        method: SolveMethod,
    ) -> Result<Self> {
        let equations = match method {
            SolveMethod::DesignMatrix => design::assemble(problem)?,
            SolveMethod::Symbolic => symbolic::assemble(problem)?,
        };
        trace!(
            "assembled {}x{} normal equations ({})",
            equations.dimension(),
            equations.dimension(),
            method
        );
        Ok(equations)
    }

    /// Number of unknowns
    pub fn dimension(&self) -> usize {
        self.rhs.len()
    }

    /// Solve the system.
    ///
    /// The matrix is rejected as singular when it contains non-finite entries
    /// or when its smallest singular value is not above `rank_tolerance`. The
    /// default tolerance is `k · ε · σ_max`.
    pub fn solve(&self, rank_tolerance: Option<f64>) -> Result<Solution> {
        let k = self.dimension();
        if self.matrix.shape() != [k, k] {
            return Err(FitError::SingularSystem(format!(
                "matrix shape {:?} does not match {} unknowns",
                self.matrix.shape(),
                k
            )));
        }
        if k == 0 {
            return Err(FitError::SingularSystem("model has no coefficients".to_string()));
        }
        if self.matrix.iter().chain(self.rhs.iter()).any(|v| !v.is_finite()) {
            return Err(FitError::SingularSystem(
                "normal equations contain non-finite entries".to_string(),
            ));
        }

        let matrix = ndarray_to_nalgebra(&self.matrix);
        let rhs = ndarray_vec_to_nalgebra(&self.rhs);

        let singular_values = matrix.clone().singular_values();
        let sigma_max = singular_values.max();
        let sigma_min = singular_values.min();
        let tolerance = rank_tolerance.unwrap_or(k as f64 * f64::EPSILON * sigma_max);
        trace!(
            "singular values range {:e}..{:e}, tolerance {:e}",
            sigma_min,
            sigma_max,
            tolerance
        );

        if sigma_max == 0.0 || sigma_min <= tolerance {
            let rank = singular_values.iter().filter(|s| **s > tolerance).count();
            return Err(FitError::SingularSystem(format!(
                "matrix has rank {}, expected {}",
                rank, k
            )));
        }

        let solution = matrix.lu().solve(&rhs).ok_or_else(|| {
            FitError::SingularSystem("LU decomposition found a zero pivot".to_string())
        })?;
        if solution.iter().any(|v| !v.is_finite()) {
            return Err(FitError::SingularSystem(
                "solution contains non-finite values".to_string(),
            ));
        }

        Ok(Solution {
            coefficients: nalgebra_vec_to_ndarray(&solution),
            condition_number: sigma_max / sigma_min,
        })
    }
}
