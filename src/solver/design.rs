//! Normal equations from the design matrix.

use super::NormalEquations;
use crate::error::{FitError, Result};
use crate::model::Model;
use crate::problem::FitProblem;

/// Build `BᵀB·c = Bᵀy`.
///
/// Fails with [`FitError::SingularSystem`] for models that are not linear in
/// their coefficients or whose basis is not finite at some sample.
pub fn assemble<M: Model + ?Sized>(problem: &FitProblem<'_, M>) -> Result<NormalEquations> {
    let model = problem.model();
    if !model.is_linear() {
        return Err(FitError::SingularSystem(format!(
            "{} is not linear in its coefficients",
            model.name()
        )));
    }

    let design = problem.design_matrix()?;
    if let Some(row) = design
        .rows()
        .into_iter()
        .position(|row| row.iter().any(|v| !v.is_finite()))
    {
        return Err(FitError::SingularSystem(format!(
            "basis of {} is not finite at sample {}",
            model.name(),
            row
        )));
    }

    let transposed = design.t();
    Ok(NormalEquations {
        matrix: transposed.dot(&design),
        rhs: transposed.dot(problem.samples().y()),
    })
}
