use crate::builder::check_product_count;
use crate::error::PlanError;
use crate::product::{Product, ResourceBudget, TimeInput, default_name};

pub const DEFAULT_PROFIT: f64 = 5000.0;
pub const DEFAULT_THROUGHPUT: f64 = 360.0;
pub const DEFAULT_MATERIAL: f64 = 2.0;
pub const DEFAULT_TOTAL_TIME: f64 = 8.0;
pub const DEFAULT_TOTAL_MATERIAL: f64 = 10000.0;

/// Unvalidated product fields as entered in a form
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ProductSpec {
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: Option<String>,
    pub profit: f64,
    pub time: TimeInput,
    pub material: f64,
}

impl Default for ProductSpec {
    fn default() -> Self {
        Self {
            name: None,
            profit: DEFAULT_PROFIT,
            time: TimeInput::Throughput(DEFAULT_THROUGHPUT),
            material: DEFAULT_MATERIAL,
        }
    }
}

/// Everything one solve request needs, before validation
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub products: Vec<ProductSpec>,
    pub total_time: f64,
    pub total_material: f64,
}

impl Scenario {
    /// `count` default products with the default budgets
    pub fn with_defaults(count: usize) -> Self {
        Self {
            products: vec![ProductSpec::default(); count],
            total_time: DEFAULT_TOTAL_TIME,
            total_material: DEFAULT_TOTAL_MATERIAL,
        }
    }

    /// Validate every field and build the solver inputs.
    ///
    /// Unnamed products get their positional default name.
    pub fn resolve(&self) -> Result<(Vec<Product>, ResourceBudget), PlanError> {
        check_product_count(self.products.len())?;

        let products = self
            .products
            .iter()
            .enumerate()
            .map(|(i, spec)| {
                let name = spec.name.clone().unwrap_or_else(|| default_name(i));
                Product::new(name, spec.profit, spec.time, spec.material)
            })
            .collect::<Result<Vec<_>, _>>()?;
        let budget = ResourceBudget::new(self.total_time, self.total_material)?;

        Ok((products, budget))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_resolve() {
        let (products, budget) = Scenario::with_defaults(3).resolve().unwrap();

        assert_eq!(products.len(), 3);
        assert_eq!(products[0].name(), "Product A");
        assert_eq!(products[2].name(), "Product C");
        assert_eq!(products[1].profit_per_unit(), 5000.0);
        assert!((products[1].time_per_unit() - 1.0 / 360.0).abs() < 1e-15);
        assert_eq!(budget.total_time(), 8.0);
        assert_eq!(budget.total_material(), 10000.0);
    }

    #[test]
    fn test_named_and_per_unit_products() {
        let scenario = Scenario {
            products: vec![
                ProductSpec {
                    name: Some("Bolts".to_string()),
                    profit: 2.0,
                    time: TimeInput::PerUnit(0.1),
                    material: 0.5,
                },
                ProductSpec::default(),
            ],
            total_time: 1.0,
            total_material: 1.0,
        };

        let (products, _) = scenario.resolve().unwrap();
        assert_eq!(products[0].name(), "Bolts");
        assert_eq!(products[0].time_per_unit(), 0.1);
        assert_eq!(products[1].name(), "Product B");
    }

    #[test]
    fn test_resolve_propagates_validation_errors() {
        let mut scenario = Scenario::with_defaults(2);
        scenario.products[1].time = TimeInput::Throughput(0.0);
        assert!(matches!(scenario.resolve(), Err(PlanError::InvalidThroughput { .. })));

        let mut scenario = Scenario::with_defaults(2);
        scenario.total_material = -5.0;
        assert!(matches!(
            scenario.resolve(),
            Err(PlanError::InvalidBudget { resource: "material", .. })
        ));

        assert!(matches!(
            Scenario::with_defaults(11).resolve(),
            Err(PlanError::ProductCount { found: 11, .. })
        ));
    }
}
