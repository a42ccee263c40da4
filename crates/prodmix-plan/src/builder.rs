use prodmix_solver::{ConstraintOp, LpProblem};
use tracing::debug;

use crate::error::PlanError;
use crate::product::{MAX_PRODUCTS, MIN_PRODUCTS, Product, ResourceBudget};

pub const TIME_CONSTRAINT: &str = "time";
pub const MATERIAL_CONSTRAINT: &str = "material";

pub fn validate_products(products: &[Product]) -> Result<(), PlanError> {
    check_product_count(products.len())
}

pub(crate) fn check_product_count(found: usize) -> Result<(), PlanError> {
    if (MIN_PRODUCTS..=MAX_PRODUCTS).contains(&found) {
        Ok(())
    } else {
        Err(PlanError::ProductCount {
            min: MIN_PRODUCTS,
            max: MAX_PRODUCTS,
            found,
        })
    }
}

/// Build the profit-maximizing LP for `products` under `budget`.
///
/// Column `i` is the quantity of `products[i]`. Row 0 is the time budget and
/// row 1 the material budget; variables are nonnegative with no upper bound.
pub fn build_problem(products: &[Product], budget: &ResourceBudget) -> LpProblem {
    let mut problem = LpProblem::new(products.iter().map(|p| p.name().to_string()).collect());

    problem.set_objective(products.iter().map(Product::profit_per_unit).collect(), false);
    problem.add_constraint(
        TIME_CONSTRAINT,
        products.iter().map(Product::time_per_unit).collect(),
        ConstraintOp::Le,
        budget.total_time(),
    );
    problem.add_constraint(
        MATERIAL_CONSTRAINT,
        products.iter().map(Product::material_per_unit).collect(),
        ConstraintOp::Le,
        budget.total_material(),
    );

    debug!(
        products = products.len(),
        total_time = budget.total_time(),
        total_material = budget.total_material(),
        "built production LP"
    );
    problem
}

#[cfg(test)]
mod tests {
    use super::*;

    fn products() -> Vec<Product> {
        vec![
            Product::with_throughput("A", 5000.0, 360.0, 2.0).unwrap(),
            Product::with_throughput("B", 4000.0, 180.0, 3.0).unwrap(),
        ]
    }

    #[test]
    fn test_build_problem_layout() {
        let budget = ResourceBudget::new(8.0, 10000.0).unwrap();
        let problem = build_problem(&products(), &budget);

        assert_eq!(problem.variables, vec!["A".to_string(), "B".to_string()]);
        assert!(!problem.objective.minimize);
        assert_eq!(problem.objective.coefficients, vec![5000.0, 4000.0]);
        assert_eq!(problem.minimization_objective(), vec![-5000.0, -4000.0]);

        assert_eq!(problem.num_constraints(), 2);
        let time = &problem.constraints[0];
        assert_eq!(time.name, TIME_CONSTRAINT);
        assert_eq!(time.op, ConstraintOp::Le);
        assert_eq!(time.rhs, 8.0);
        assert_eq!(time.coefficients, vec![1.0 / 360.0, 1.0 / 180.0]);

        let material = &problem.constraints[1];
        assert_eq!(material.name, MATERIAL_CONSTRAINT);
        assert_eq!(material.rhs, 10000.0);
        assert_eq!(material.coefficients, vec![2.0, 3.0]);

        assert!(problem.validate().is_ok());
    }

    #[test]
    fn test_product_count_bounds() {
        let one = vec![Product::with_time("A", 1.0, 1.0, 1.0).unwrap()];
        assert_eq!(
            validate_products(&one),
            Err(PlanError::ProductCount { min: 2, max: 10, found: 1 })
        );

        let eleven: Vec<Product> = (0..11)
            .map(|i| Product::with_time(format!("P{i}"), 1.0, 1.0, 1.0).unwrap())
            .collect();
        assert!(validate_products(&eleven).is_err());
        assert!(validate_products(&eleven[..10]).is_ok());
        assert!(validate_products(&products()).is_ok());
    }
}
