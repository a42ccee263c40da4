/// The result of solving an LP problem
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct Solution {
    pub status: SolutionStatus,
    /// Optimal values for each variable (empty unless optimal)
    pub values: Vec<f64>,
    /// Objective value in the problem's own sense
    pub objective_value: f64,
    /// Unused capacity of each constraint, `rhs - lhs` for `<=` rows
    pub slacks: Vec<f64>,
    /// Pivots performed across both phases
    pub iterations: usize,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolutionStatus {
    /// An optimal solution was found
    Optimal,
    /// The problem is infeasible (no solution exists)
    Infeasible,
    /// The problem is unbounded
    Unbounded,
    /// The iteration limit was hit before reaching optimality
    IterationLimit,
}

impl SolutionStatus {
    pub fn is_optimal(self) -> bool {
        self == SolutionStatus::Optimal
    }
}

impl std::fmt::Display for SolutionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SolutionStatus::Optimal => "optimal",
            SolutionStatus::Infeasible => "infeasible",
            SolutionStatus::Unbounded => "unbounded",
            SolutionStatus::IterationLimit => "iteration limit reached",
        };
        f.write_str(s)
    }
}

impl Solution {
    pub fn infeasible(iterations: usize) -> Self {
        Self::failed(SolutionStatus::Infeasible, f64::INFINITY, iterations)
    }

    pub fn unbounded(iterations: usize) -> Self {
        Self::failed(SolutionStatus::Unbounded, f64::NEG_INFINITY, iterations)
    }

    pub fn iteration_limit(iterations: usize) -> Self {
        Self::failed(SolutionStatus::IterationLimit, f64::NAN, iterations)
    }

    fn failed(status: SolutionStatus, objective_value: f64, iterations: usize) -> Self {
        Self {
            status,
            values: Vec::new(),
            objective_value,
            slacks: Vec::new(),
            iterations,
        }
    }
}
