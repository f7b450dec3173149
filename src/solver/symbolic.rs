//! Normal equations by symbolic differentiation of the objective.
//!
//! For each coefficient `a_j` the objective is differentiated, simplified and
//! read as `constant + Σ terms[m] * a_m`. Setting the derivative to zero gives
//! row `j` of the system with `rhs[j] = -constant`.

use super::NormalEquations;
use crate::error::{FitError, Result};
use crate::model::Model;
use crate::parameters::ExpressionError;
use crate::problem::FitProblem;
use log::trace;
use ndarray::{Array1, Array2};

pub fn assemble<M: Model + ?Sized>(problem: &FitProblem<'_, M>) -> Result<NormalEquations> {
    let objective = problem.objective()?.simplify();
    let symbols = problem.model().coefficient_names().to_vec();
    let k = symbols.len();

    let mut matrix = Array2::zeros((k, k));
    let mut rhs = Array1::zeros(k);

    for (row, symbol) in symbols.iter().enumerate() {
        let derivative = objective.derivative(symbol)?;
        trace!("dS/d{} has {} variables", symbol, derivative.variables().len());

        let form = derivative.affine_form(&symbols).map_err(|err| match err {
            ExpressionError::NotAffine { message } => FitError::SingularSystem(format!(
                "objective of {} is not quadratic in '{}': {}",
                problem.model().name(),
                symbol,
                message
            )),
            other => FitError::from(other),
        })?;

        for (col, value) in form.terms.iter().enumerate() {
            matrix[[row, col]] = *value;
        }
        rhs[row] = -form.constant;
    }

    Ok(NormalEquations { matrix, rhs })
}
