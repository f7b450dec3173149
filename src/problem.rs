//! Sample sets and least-squares fit problems.
//!
//! A [`FitProblem`] pairs a model with validated samples and exposes the two
//! views the solvers need: the symbolic objective
//! `(1/(n-1)) * Σ (f(x_i) - y_i)^2` as an [`Expression`], and the design
//! matrix `B[i, j] = ∂f/∂a_j (x_i)`.

use crate::error::{FitError, Result};
use crate::model::Model;
use crate::parameters::{BinaryOp, Expression};
use ndarray::{Array1, Array2};

/// Validated `(x, y)` samples.
///
/// Construction rejects mismatched lengths, fewer than two samples, and
/// non-finite values.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSet {
    x: Array1<f64>,
    y: Array1<f64>,
}

impl SampleSet {
    pub fn new(x: Array1<f64>, y: Array1<f64>) -> Result<Self> {
        if x.len() != y.len() {
            return Err(FitError::SampleLengthMismatch {
                x_len: x.len(),
                y_len: y.len(),
            });
        }
        if x.len() < 2 {
            return Err(FitError::InsufficientSamples(x.len()));
        }
        if let Some(index) = x
            .iter()
            .zip(y.iter())
            .position(|(xi, yi)| !xi.is_finite() || !yi.is_finite())
        {
            return Err(FitError::NonFiniteSample { index });
        }

        Ok(Self { x, y })
    }

    pub fn from_slices(x: &[f64], y: &[f64]) -> Result<Self> {
        Self::new(Array1::from(x.to_vec()), Array1::from(y.to_vec()))
    }

    pub fn x(&self) -> &Array1<f64> {
        &self.x
    }

    pub fn y(&self) -> &Array1<f64> {
        &self.y
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }
}

/// A model paired with the samples it is fit against.
///
/// The model is borrowed immutably; fitting never changes it.
pub struct FitProblem<'a, M: Model + ?Sized> {
    model: &'a M,
    samples: SampleSet,
}

impl<'a, M: Model + ?Sized> FitProblem<'a, M> {
    pub fn new(model: &'a M, samples: SampleSet) -> Self {
        Self { model, samples }
    }

    pub fn model(&self) -> &M {
        self.model
    }

    pub fn samples(&self) -> &SampleSet {
        &self.samples
    }

    /// Number of samples
    pub fn ndata(&self) -> usize {
        self.samples.len()
    }

    /// Number of unknown coefficients
    pub fn ncoefs(&self) -> usize {
        self.model.coefficient_count()
    }

    /// The symbolic objective `(1/(n-1)) * Σ (f(x_i) - y_i)^2`.
    ///
    /// Each sample's x value is substituted into the parsed formula, leaving the
    /// coefficient names as the only variables.
    pub fn objective(&self) -> Result<Expression> {
        let formula = Expression::parse(&self.model.formula_string())?;

        let terms = self
            .samples
            .iter()
            .map(|(x, y)| {
                let residual =
                    Expression::binary(BinaryOp::Sub, formula.substitute("x", x), Expression::Number(y));
                Expression::binary(BinaryOp::Pow, residual, Expression::Number(2.0))
            })
            .collect();
        let sum = Expression::sum(terms).ok_or(FitError::InsufficientSamples(0))?;

        let scale = Expression::binary(
            BinaryOp::Div,
            Expression::Number(1.0),
            Expression::Number((self.ndata() - 1) as f64),
        );
        Ok(Expression::binary(BinaryOp::Mul, scale, sum))
    }

    /// The objective rendered as text
    pub fn objective_string(&self) -> Result<String> {
        Ok(self.objective()?.to_string())
    }

    /// Residuals `f(x_i) - y_i` for a coefficient vector
    pub fn residuals(&self, coefs: &[f64]) -> Result<Array1<f64>> {
        let expected = self.ncoefs();
        if coefs.len() != expected {
            return Err(FitError::CoefficientCountMismatch {
                expected,
                got: coefs.len(),
            });
        }

        let predicted = self.samples.x().mapv(|x| self.model.value_at(x, coefs));
        Ok(predicted - self.samples.y())
    }

    /// The numeric value of the objective for a coefficient vector
    pub fn cost(&self, coefs: &[f64]) -> Result<f64> {
        let residuals = self.residuals(coefs)?;
        Ok(residuals.dot(&residuals) / (self.ndata() - 1) as f64)
    }

    /// The `n × k` matrix of basis values at every sample
    pub fn design_matrix(&self) -> Result<Array2<f64>> {
        let k = self.ncoefs();
        let mut design = Array2::zeros((self.ndata(), k));
        let mut row = vec![0.0; k];

        for (i, &x) in self.samples.x().iter().enumerate() {
            self.model.basis(x, &mut row)?;
            for (j, value) in row.iter().enumerate() {
                design[[i, j]] = *value;
            }
        }

        Ok(design)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PolynomialModel, PowerModel};
    use crate::parameters::SimpleContext;
    use approx::assert_relative_eq;

    fn samples() -> SampleSet {
        SampleSet::from_slices(&[0.0, 1.0, 2.0], &[1.0, 2.0, 5.0]).unwrap()
    }

    #[test]
    fn test_sample_validation() {
        assert!(matches!(
            SampleSet::from_slices(&[1.0, 2.0], &[1.0]),
            Err(FitError::SampleLengthMismatch { x_len: 2, y_len: 1 })
        ));
        assert!(matches!(
            SampleSet::from_slices(&[1.0], &[1.0]),
            Err(FitError::InsufficientSamples(1))
        ));
        assert!(matches!(
            SampleSet::from_slices(&[1.0, f64::NAN], &[1.0, 2.0]),
            Err(FitError::NonFiniteSample { index: 1 })
        ));
    }

    #[test]
    fn test_objective_matches_cost() {
        let model = PolynomialModel::new();
        let problem = FitProblem::new(&model, samples());
        let objective = problem.objective().unwrap();
        assert_eq!(
            objective.variables(),
            vec!["a0".to_string(), "a1".to_string(), "a2".to_string()]
        );

        let coefs = [0.5, -1.0, 2.0];
        let mut context = SimpleContext::new();
        for (name, value) in ["a0", "a1", "a2"].iter().zip(coefs) {
            context.set_variable(name, value);
        }
        assert_relative_eq!(
            objective.evaluate(&context).unwrap(),
            problem.cost(&coefs).unwrap(),
            epsilon = 1e-12
        );

        // 1 + x^2 passes through every sample
        assert_relative_eq!(problem.cost(&[1.0, 0.0, 1.0]).unwrap(), 0.0);
    }

    #[test]
    fn test_objective_string_reparses() {
        let model = PolynomialModel::with_degree(1).unwrap();
        let problem = FitProblem::new(&model, samples());
        let text = problem.objective_string().unwrap();
        assert!(text.starts_with("1/2*"));
        assert!(Expression::parse(&text).is_ok());
    }

    #[test]
    fn test_design_matrix() {
        let model = PolynomialModel::new();
        let problem = FitProblem::new(&model, samples());
        let design = problem.design_matrix().unwrap();
        assert_eq!(design.shape(), &[3, 3]);
        assert_eq!(design.row(2).to_vec(), vec![1.0, 2.0, 4.0]);

        let power = PowerModel::new();
        let problem = FitProblem::new(&power, samples());
        assert!(problem.design_matrix().unwrap_err().is_singular());
    }
}
