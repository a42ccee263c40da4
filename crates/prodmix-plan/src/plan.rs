use prodmix_solver::Solver;
use tracing::{info, warn};

use crate::builder::{build_problem, validate_products};
use crate::error::PlanError;
use crate::product::{Product, ResourceBudget};

/// Relative tolerance for deciding that a resource is used up
const BINDING_TOLERANCE: f64 = 1e-6;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Time,
    Material,
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Resource::Time => f.write_str("time"),
            Resource::Material => f.write_str("material"),
        }
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ProductQuantity {
    pub name: String,
    pub quantity: f64,
}

/// Optimal production mix for one set of products and budgets
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ProductionPlan {
    /// One entry per product, in input order
    pub quantities: Vec<ProductQuantity>,
    pub total_profit: f64,
    pub leftover_time: f64,
    pub leftover_material: f64,
    /// Resources with no capacity left at the optimum
    pub binding: Vec<Resource>,
}

impl ProductionPlan {
    pub fn values(&self) -> Vec<f64> {
        self.quantities.iter().map(|q| q.quantity).collect()
    }

    /// The optimum as a point in the plane, for two-product plans
    pub fn optimum_point(&self) -> Option<(f64, f64)> {
        match self.quantities.as_slice() {
            [a, b] => Some((a.quantity, b.quantity)),
            _ => None,
        }
    }

    pub fn is_binding(&self, resource: Resource) -> bool {
        self.binding.contains(&resource)
    }
}

/// Solve for the profit-maximizing mix with the default solver settings
pub fn solve(products: &[Product], budget: &ResourceBudget) -> Result<ProductionPlan, PlanError> {
    solve_with(&Solver::new(), products, budget)
}

/// Solve for the profit-maximizing mix.
///
/// Runs exactly one solver call. Anything short of an optimal solution is
/// reported as [`PlanError::NoOptimalSolution`] with no partial quantities.
pub fn solve_with(solver: &Solver, products: &[Product], budget: &ResourceBudget) -> Result<ProductionPlan, PlanError> {
    validate_products(products)?;

    let problem = build_problem(products, budget);
    let solution = solver.solve(&problem)?;

    if !solution.status.is_optimal() {
        warn!(status = %solution.status, iterations = solution.iterations, "no optimal production plan");
        return Err(PlanError::NoOptimalSolution(solution.status));
    }

    // Basic variables can come back as -0.0 or tiny negatives
    let values: Vec<f64> = solution.values.iter().map(|v| v.max(0.0)).collect();

    let total_profit = products
        .iter()
        .zip(&values)
        .map(|(p, x)| p.profit_per_unit() * x)
        .sum();
    let used_time: f64 = products.iter().zip(&values).map(|(p, x)| p.time_per_unit() * x).sum();
    let used_material: f64 = products
        .iter()
        .zip(&values)
        .map(|(p, x)| p.material_per_unit() * x)
        .sum();

    let leftover_time = leftover(budget.total_time(), used_time);
    let leftover_material = leftover(budget.total_material(), used_material);

    let mut binding = Vec::new();
    if is_exhausted(budget.total_time(), leftover_time) {
        binding.push(Resource::Time);
    }
    if is_exhausted(budget.total_material(), leftover_material) {
        binding.push(Resource::Material);
    }

    let plan = ProductionPlan {
        quantities: products
            .iter()
            .zip(values)
            .map(|(p, quantity)| ProductQuantity {
                name: p.name().to_string(),
                quantity,
            })
            .collect(),
        total_profit,
        leftover_time,
        leftover_material,
        binding,
    };

    info!(
        total_profit = plan.total_profit,
        leftover_material = plan.leftover_material,
        iterations = solution.iterations,
        "solved production plan"
    );
    Ok(plan)
}

/// Remaining capacity, snapping solver round-off below zero back to zero
fn leftover(total: f64, used: f64) -> f64 {
    let remaining = total - used;
    if remaining < 0.0 && -remaining <= BINDING_TOLERANCE * total.max(1.0) {
        0.0
    } else {
        remaining
    }
}

fn is_exhausted(total: f64, remaining: f64) -> bool {
    remaining <= BINDING_TOLERANCE * total.max(1.0)
}
