use prodmix_solver::{ProblemError, SolutionStatus};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanError {
    #[error("Product name must not be empty")]
    EmptyName,
    #[error("Throughput of {product} must be a positive number of units per hour, got {value}")]
    InvalidThroughput { product: String, value: f64 },
    #[error("Invalid {field} for {product}: {value}")]
    InvalidCoefficient {
        product: String,
        field: &'static str,
        value: f64,
    },
    #[error("Total {resource} must be a nonnegative number, got {value}")]
    InvalidBudget { resource: &'static str, value: f64 },
    #[error("Expected between {min} and {max} products, got {found}")]
    ProductCount { min: usize, max: usize, found: usize },
    #[error("Feasible region needs at least 2 samples, got {0}")]
    InvalidSamples(usize),
    #[error("Visualization is only available for 2 products (got {0})")]
    RegionNeedsTwoProducts(usize),
    #[error(transparent)]
    Problem(#[from] ProblemError),
    #[error("No optimal solution found ({0}). Check your inputs.")]
    NoOptimalSolution(SolutionStatus),
}
