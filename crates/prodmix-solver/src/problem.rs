use thiserror::Error;

/// A dense linear program over nonnegative variables
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct LpProblem {
    /// Variable names, one per column
    pub variables: Vec<String>,
    pub objective: Objective,
    pub constraints: Vec<Constraint>,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct Objective {
    /// Coefficients for each variable
    pub coefficients: Vec<f64>,
    /// Whether to minimize or maximize
    pub minimize: bool,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct Constraint {
    /// Name/label for the constraint (for diagnostics)
    pub name: String,
    /// Coefficients for each variable
    pub coefficients: Vec<f64>,
    pub op: ConstraintOp,
    /// Right-hand side value
    pub rhs: f64,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintOp {
    /// Less than or equal (<=)
    Le,
    /// Greater than or equal (>=)
    Ge,
    /// Equal (=)
    Eq,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProblemError {
    #[error("Problem has no variables")]
    NoVariables,
    #[error("Objective has {found} coefficients, expected {expected}")]
    ObjectiveLength { expected: usize, found: usize },
    #[error("Constraint '{name}' has {found} coefficients, expected {expected}")]
    ConstraintLength {
        name: String,
        expected: usize,
        found: usize,
    },
    #[error("Non-finite number in {0}")]
    NonFinite(String),
}

impl LpProblem {
    pub fn new(variables: Vec<String>) -> Self {
        let n = variables.len();
        Self {
            variables,
            objective: Objective {
                coefficients: vec![0.0; n],
                minimize: true,
            },
            constraints: Vec::new(),
        }
    }

    pub fn set_objective(&mut self, coefficients: Vec<f64>, minimize: bool) {
        self.objective = Objective { coefficients, minimize };
    }

    pub fn add_constraint(&mut self, name: impl Into<String>, coefficients: Vec<f64>, op: ConstraintOp, rhs: f64) {
        self.constraints.push(Constraint {
            name: name.into(),
            coefficients,
            op,
            rhs,
        });
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Objective coefficients in minimization form (negated when maximizing)
    pub fn minimization_objective(&self) -> Vec<f64> {
        if self.objective.minimize {
            self.objective.coefficients.clone()
        } else {
            self.objective.coefficients.iter().map(|c| -c).collect()
        }
    }

    /// Value of each constraint's left-hand side at `values`
    pub fn activities(&self, values: &[f64]) -> Vec<f64> {
        self.constraints
            .iter()
            .map(|c| c.coefficients.iter().zip(values).map(|(a, x)| a * x).sum())
            .collect()
    }

    /// Check dimensions and that every number is finite
    pub fn validate(&self) -> Result<(), ProblemError> {
        let n = self.num_variables();
        if n == 0 {
            return Err(ProblemError::NoVariables);
        }
        if self.objective.coefficients.len() != n {
            return Err(ProblemError::ObjectiveLength {
                expected: n,
                found: self.objective.coefficients.len(),
            });
        }
        if self.objective.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(ProblemError::NonFinite("objective".to_string()));
        }

        for c in &self.constraints {
            if c.coefficients.len() != n {
                return Err(ProblemError::ConstraintLength {
                    name: c.name.clone(),
                    expected: n,
                    found: c.coefficients.len(),
                });
            }
            if !c.rhs.is_finite() || c.coefficients.iter().any(|a| !a.is_finite()) {
                return Err(ProblemError::NonFinite(format!("constraint '{}'", c.name)));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_vars() -> LpProblem {
        LpProblem::new(vec!["x".to_string(), "y".to_string()])
    }

    #[test]
    fn test_minimization_objective_negates_max() {
        let mut problem = two_vars();
        problem.set_objective(vec![5000.0, 4000.0], false);
        assert_eq!(problem.minimization_objective(), vec![-5000.0, -4000.0]);

        problem.set_objective(vec![1.0, 2.0], true);
        assert_eq!(problem.minimization_objective(), vec![1.0, 2.0]);
    }

    #[test]
    fn test_activities() {
        let mut problem = two_vars();
        problem.add_constraint("a", vec![1.0, 2.0], ConstraintOp::Le, 10.0);
        problem.add_constraint("b", vec![3.0, 0.0], ConstraintOp::Le, 10.0);

        assert_eq!(problem.activities(&[2.0, 1.5]), vec![5.0, 6.0]);
    }

    #[test]
    fn test_validate_rejects_bad_shapes() {
        let mut problem = two_vars();
        problem.set_objective(vec![1.0], false);
        assert_eq!(
            problem.validate(),
            Err(ProblemError::ObjectiveLength { expected: 2, found: 1 })
        );

        problem.set_objective(vec![1.0, 1.0], false);
        problem.add_constraint("row", vec![1.0, 1.0, 1.0], ConstraintOp::Le, 1.0);
        assert!(matches!(
            problem.validate(),
            Err(ProblemError::ConstraintLength { expected: 2, found: 3, .. })
        ));
    }

    #[test]
    fn test_validate_rejects_non_finite() {
        let mut problem = two_vars();
        problem.set_objective(vec![1.0, 1.0], false);
        problem.add_constraint("time", vec![f64::INFINITY, 1.0], ConstraintOp::Le, 8.0);
        assert_eq!(
            problem.validate(),
            Err(ProblemError::NonFinite("constraint 'time'".to_string()))
        );

        assert_eq!(LpProblem::new(Vec::new()).validate(), Err(ProblemError::NoVariables));
    }
}
