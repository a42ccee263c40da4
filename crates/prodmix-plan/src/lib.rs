pub mod builder;
pub mod error;
pub mod format;
pub mod plan;
pub mod product;
pub mod region;
pub mod scenario;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use builder::{MATERIAL_CONSTRAINT, TIME_CONSTRAINT, build_problem, validate_products};
pub use error::PlanError;
pub use format::{REGION_NOTICE, format_currency, format_quantity, render_plan};
pub use plan::{ProductQuantity, ProductionPlan, Resource, solve, solve_with};
pub use product::{MAX_PRODUCTS, MIN_PRODUCTS, Product, ResourceBudget, TimeInput, default_name};
pub use region::{DEFAULT_SAMPLES, FeasibleRegion, RegionSample, Visualization};
pub use scenario::{ProductSpec, Scenario};
