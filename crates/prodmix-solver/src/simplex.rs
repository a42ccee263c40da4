use tracing::{debug, trace};

use crate::problem::{ConstraintOp, LpProblem, ProblemError};
use crate::solution::{Solution, SolutionStatus};

/// Simplex solver for linear programming problems
#[derive(Debug, Clone)]
pub struct Solver {
    /// Maximum pivots (across both phases) before giving up
    max_iterations: usize,
    /// Tolerance for floating point comparisons
    tolerance: f64,
}

impl Default for Solver {
    fn default() -> Self {
        Self {
            max_iterations: 10000,
            tolerance: 1e-9,
        }
    }
}

impl Solver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.tolerance = tol;
        self
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Solve the LP problem using the two-phase simplex method.
    ///
    /// Every variable is implicitly bounded below by zero. Malformed problems
    /// are rejected before any pivoting; infeasible, unbounded and
    /// non-converging problems come back as a non-optimal [`Solution`].
    pub fn solve(&self, problem: &LpProblem) -> Result<Solution, ProblemError> {
        problem.validate()?;

        let mut tableau = self.build_tableau(problem);
        let mut iterations = 0;

        // Phase 1: find an initial basic feasible solution
        if tableau.n_artificial > 0 {
            debug!(artificials = tableau.n_artificial, "simplex phase 1");
            match self.phase1(&mut tableau, &mut iterations) {
                SimplexResult::Optimal => {}
                SimplexResult::IterationLimit => return Ok(Solution::iteration_limit(iterations)),
                SimplexResult::Unbounded | SimplexResult::Infeasible => {
                    return Ok(Solution::infeasible(iterations));
                }
            }
        }

        // Phase 2: optimize the real objective
        debug!(rows = tableau.data.len() - 1, "simplex phase 2");
        match self.phase2(&mut tableau, &mut iterations) {
            SimplexResult::Optimal => {}
            SimplexResult::Unbounded => return Ok(Solution::unbounded(iterations)),
            SimplexResult::Infeasible => return Ok(Solution::infeasible(iterations)),
            SimplexResult::IterationLimit => return Ok(Solution::iteration_limit(iterations)),
        }

        let solution = self.extract_solution(&tableau, problem, iterations);
        debug!(
            objective = solution.objective_value,
            iterations, "simplex reached optimum"
        );
        Ok(solution)
    }

    fn build_tableau(&self, problem: &LpProblem) -> Tableau {
        let n_vars = problem.num_variables();
        let n_constraints = problem.num_constraints();

        // Count slack and artificial variables needed
        let mut n_slack = 0;
        let mut n_artificial = 0;

        for c in &problem.constraints {
            let op = effective_op(c.op, c.rhs < 0.0);
            match op {
                ConstraintOp::Le => n_slack += 1,
                ConstraintOp::Ge => {
                    n_slack += 1; // surplus
                    n_artificial += 1;
                }
                ConstraintOp::Eq => n_artificial += 1,
            }
        }

        let total_cols = n_vars + n_slack + n_artificial + 1; // +1 for RHS
        let total_rows = n_constraints + 1; // +1 for objective

        let mut tableau = Tableau {
            data: vec![vec![0.0; total_cols]; total_rows],
            basic_vars: vec![0; n_constraints],
            n_vars,
            n_slack,
            n_artificial,
        };

        let mut slack_idx = n_vars;
        let mut artificial_idx = n_vars + n_slack;

        for (i, c) in problem.constraints.iter().enumerate() {
            // Keep the RHS nonnegative; flipping the row flips the operator too
            let flip = c.rhs < 0.0;
            let sign = if flip { -1.0 } else { 1.0 };
            for (j, &coef) in c.coefficients.iter().enumerate() {
                tableau.data[i][j] = sign * coef;
            }
            tableau.data[i][total_cols - 1] = sign * c.rhs;

            match effective_op(c.op, flip) {
                ConstraintOp::Le => {
                    tableau.data[i][slack_idx] = 1.0;
                    tableau.basic_vars[i] = slack_idx;
                    slack_idx += 1;
                }
                ConstraintOp::Ge => {
                    tableau.data[i][slack_idx] = -1.0; // surplus
                    slack_idx += 1;
                    tableau.data[i][artificial_idx] = 1.0;
                    tableau.basic_vars[i] = artificial_idx;
                    artificial_idx += 1;
                }
                ConstraintOp::Eq => {
                    tableau.data[i][artificial_idx] = 1.0;
                    tableau.basic_vars[i] = artificial_idx;
                    artificial_idx += 1;
                }
            }
        }

        // Objective row (last row). The tableau maximizes, so a minimization
        // objective is stored negated. Positive entries are improving columns.
        let obj_row = n_constraints;
        for (j, &coef) in problem.objective.coefficients.iter().enumerate() {
            tableau.data[obj_row][j] = if problem.objective.minimize { -coef } else { coef };
        }

        tableau
    }

    fn phase1(&self, tableau: &mut Tableau, iterations: &mut usize) -> SimplexResult {
        let n_constraints = tableau.data.len() - 1;
        let n_cols = tableau.data[0].len();
        let art_start = tableau.n_vars + tableau.n_slack;

        let orig_obj = tableau.data[n_constraints].clone();

        // Maximize -sum(artificials)
        for j in 0..n_cols {
            tableau.data[n_constraints][j] = 0.0;
        }
        for j in art_start..(art_start + tableau.n_artificial) {
            tableau.data[n_constraints][j] = -1.0;
        }

        // Price out the basic artificials
        for i in 0..n_constraints {
            if tableau.basic_vars[i] >= art_start {
                for j in 0..n_cols {
                    tableau.data[n_constraints][j] += tableau.data[i][j];
                }
            }
        }

        match self.iterate(tableau, n_cols - 1, iterations) {
            // Phase 1 is bounded above by zero, so this only signals numeric trouble
            SimplexResult::Unbounded => return SimplexResult::Infeasible,
            SimplexResult::IterationLimit => return SimplexResult::IterationLimit,
            SimplexResult::Optimal | SimplexResult::Infeasible => {}
        }

        let rhs_col = n_cols - 1;
        for i in 0..n_constraints {
            if tableau.basic_vars[i] >= art_start && tableau.data[i][rhs_col].abs() > self.tolerance {
                return SimplexResult::Infeasible;
            }
        }

        // Artificials left basic at zero would let phase 2 move them off zero.
        // Swap each for any real column with a nonzero entry in its row; a row
        // with none is redundant and stays put.
        for i in 0..n_constraints {
            if tableau.basic_vars[i] < art_start {
                continue;
            }
            if let Some(j) = (0..art_start).find(|&j| tableau.data[i][j].abs() > self.tolerance) {
                trace!(row = i, col = j, "driving degenerate artificial out of basis");
                self.pivot(tableau, i, j);
            }
        }

        // Restore the original objective and price out the current basis
        tableau.data[n_constraints] = orig_obj;
        for i in 0..n_constraints {
            let basic = tableau.basic_vars[i];
            let ratio = tableau.data[n_constraints][basic];
            if ratio.abs() > self.tolerance {
                for j in 0..n_cols {
                    tableau.data[n_constraints][j] -= ratio * tableau.data[i][j];
                }
            }
        }

        SimplexResult::Optimal
    }

    fn phase2(&self, tableau: &mut Tableau, iterations: &mut usize) -> SimplexResult {
        // Artificial columns never re-enter
        let exclude_from = tableau.n_vars + tableau.n_slack;
        self.iterate(tableau, exclude_from, iterations)
    }

    /// Pivot until no column below `n_candidates` improves the objective.
    ///
    /// Starts with Dantzig's rule and falls back to Bland's rule once a
    /// degenerate pivot is seen, which rules out cycling.
    fn iterate(&self, tableau: &mut Tableau, n_candidates: usize, iterations: &mut usize) -> SimplexResult {
        let mut rule = PivotRule::Dantzig;
        loop {
            let Some(pivot_col) = self.find_pivot_column(tableau, n_candidates, rule) else {
                return SimplexResult::Optimal;
            };
            let Some(pivot_row) = self.find_pivot_row(tableau, pivot_col, rule) else {
                return SimplexResult::Unbounded;
            };
            if *iterations >= self.max_iterations {
                return SimplexResult::IterationLimit;
            }

            let rhs_col = tableau.data[0].len() - 1;
            if tableau.data[pivot_row][rhs_col].abs() <= self.tolerance && rule == PivotRule::Dantzig {
                trace!("degenerate pivot, switching to Bland's rule");
                rule = PivotRule::Bland;
            }

            trace!(row = pivot_row, col = pivot_col, "pivot");
            self.pivot(tableau, pivot_row, pivot_col);
            *iterations += 1;
        }
    }

    fn find_pivot_column(&self, tableau: &Tableau, n_candidates: usize, rule: PivotRule) -> Option<usize> {
        let obj = &tableau.data[tableau.data.len() - 1];

        match rule {
            PivotRule::Bland => (0..n_candidates).find(|&j| obj[j] > self.tolerance),
            PivotRule::Dantzig => {
                // Most positive reduced cost
                let mut max_val = self.tolerance;
                let mut max_col = None;
                for j in 0..n_candidates {
                    if obj[j] > max_val {
                        max_val = obj[j];
                        max_col = Some(j);
                    }
                }
                max_col
            }
        }
    }

    fn find_pivot_row(&self, tableau: &Tableau, col: usize, rule: PivotRule) -> Option<usize> {
        let n_constraints = tableau.data.len() - 1;
        let rhs_col = tableau.data[0].len() - 1;

        let mut min_ratio = f64::INFINITY;
        let mut min_row: Option<usize> = None;

        for i in 0..n_constraints {
            let val = tableau.data[i][col];
            if val <= self.tolerance {
                continue;
            }
            let ratio = (tableau.data[i][rhs_col] / val).max(0.0);
            let better = match min_row {
                None => true,
                Some(_) if ratio < min_ratio - self.tolerance => true,
                // Tie: Bland's rule takes the smallest basic index
                Some(r) if ratio <= min_ratio + self.tolerance => {
                    rule == PivotRule::Bland && tableau.basic_vars[i] < tableau.basic_vars[r]
                }
                Some(_) => false,
            };
            if better {
                min_ratio = ratio;
                min_row = Some(i);
            }
        }

        min_row
    }

    fn pivot(&self, tableau: &mut Tableau, row: usize, col: usize) {
        let n_rows = tableau.data.len();
        let n_cols = tableau.data[0].len();

        tableau.basic_vars[row] = col;

        let pivot_val = tableau.data[row][col];
        for j in 0..n_cols {
            tableau.data[row][j] /= pivot_val;
        }

        for i in 0..n_rows {
            if i != row {
                let factor = tableau.data[i][col];
                if factor == 0.0 {
                    continue;
                }
                for j in 0..n_cols {
                    tableau.data[i][j] -= factor * tableau.data[row][j];
                }
            }
        }
    }

    fn extract_solution(&self, tableau: &Tableau, problem: &LpProblem, iterations: usize) -> Solution {
        let n_vars = problem.num_variables();
        let rhs_col = tableau.data[0].len() - 1;

        let mut values = vec![0.0; n_vars];
        for (i, &basic) in tableau.basic_vars.iter().enumerate() {
            if basic < n_vars {
                values[basic] = tableau.data[i][rhs_col];
            }
        }

        let objective_value = problem
            .objective
            .coefficients
            .iter()
            .zip(&values)
            .map(|(c, x)| c * x)
            .sum();

        let slacks = problem
            .constraints
            .iter()
            .zip(problem.activities(&values))
            .map(|(c, lhs)| c.rhs - lhs)
            .collect();

        Solution {
            status: SolutionStatus::Optimal,
            values,
            objective_value,
            slacks,
            iterations,
        }
    }
}

/// Operator after a row has been multiplied by -1
fn effective_op(op: ConstraintOp, flipped: bool) -> ConstraintOp {
    match (op, flipped) {
        (ConstraintOp::Le, true) => ConstraintOp::Ge,
        (ConstraintOp::Ge, true) => ConstraintOp::Le,
        (op, _) => op,
    }
}

struct Tableau {
    data: Vec<Vec<f64>>,
    basic_vars: Vec<usize>,
    n_vars: usize,
    n_slack: usize,
    n_artificial: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PivotRule {
    Dantzig,
    Bland,
}

enum SimplexResult {
    Optimal,
    Unbounded,
    Infeasible,
    IterationLimit,
}
