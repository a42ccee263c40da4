//! Feasible region of a two-product plan, sampled for plotting.
//!
//! With `x1` on the horizontal axis, each budget `a1*x1 + a2*x2 <= total`
//! becomes the boundary line `x2 = (total - a1*x1) / a2`. The feasible
//! region is everything under both lines inside the nonnegative quadrant.

use crate::error::PlanError;
use crate::format::REGION_NOTICE;
use crate::plan::ProductionPlan;
use crate::product::{Product, ResourceBudget};

pub const DEFAULT_SAMPLES: usize = 50;

/// Smallest right edge of the sampled `x1` range
const MIN_X_EXTENT: f64 = 20.0;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct RegionSample {
    pub x1: f64,
    /// `None` when the second product uses no time, so time never limits `x2`
    pub time_bound: Option<f64>,
    /// `None` when the second product uses no material
    pub material_bound: Option<f64>,
    /// Upper edge of the feasible region, `max(0, min(bounds))`; `None` if unbounded
    pub envelope: Option<f64>,
}

impl RegionSample {
    pub fn is_shaded(&self) -> bool {
        self.envelope.is_none_or(|e| e > 0.0)
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct FeasibleRegion {
    pub x_label: String,
    pub y_label: String,
    pub x_max: f64,
    pub samples: Vec<RegionSample>,
    /// Solver optimum `(x1, x2)`
    pub optimum: (f64, f64),
}

impl FeasibleRegion {
    pub fn compute(
        products: &[Product],
        budget: &ResourceBudget,
        plan: &ProductionPlan,
        samples: usize,
    ) -> Result<Self, PlanError> {
        let [first, second] = products else {
            return Err(PlanError::RegionNeedsTwoProducts(products.len()));
        };
        let optimum = plan
            .optimum_point()
            .ok_or(PlanError::RegionNeedsTwoProducts(plan.quantities.len()))?;
        if samples < 2 {
            return Err(PlanError::InvalidSamples(samples));
        }

        let x_max = [
            intercept(budget.total_time(), first.time_per_unit()),
            intercept(budget.total_material(), first.material_per_unit()),
        ]
        .into_iter()
        .flatten()
        .fold(MIN_X_EXTENT, f64::max);

        let samples = linspace(0.0, x_max, samples)
            .into_iter()
            .map(|x1| {
                let time_bound = boundary(budget.total_time(), first.time_per_unit(), second.time_per_unit(), x1);
                let material_bound = boundary(
                    budget.total_material(),
                    first.material_per_unit(),
                    second.material_per_unit(),
                    x1,
                );
                let envelope = [time_bound, material_bound]
                    .into_iter()
                    .flatten()
                    .reduce(f64::min)
                    .map(|v| v.max(0.0));
                RegionSample {
                    x1,
                    time_bound,
                    material_bound,
                    envelope,
                }
            })
            .collect();

        Ok(Self {
            x_label: first.name().to_string(),
            y_label: second.name().to_string(),
            x_max,
            samples,
            optimum,
        })
    }

    /// Height that fits every finite boundary, the envelope and the optimum
    pub fn y_max(&self) -> f64 {
        self.samples
            .iter()
            .flat_map(|s| [s.time_bound, s.material_bound, s.envelope])
            .flatten()
            .chain([self.optimum.1, 1.0])
            .fold(0.0, f64::max)
    }
}

/// What a front-end shows under the plan: the region for two products,
/// otherwise a notice
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Visualization {
    pub region: Option<FeasibleRegion>,
    pub notice: Option<String>,
}

impl Visualization {
    pub fn for_plan(
        products: &[Product],
        budget: &ResourceBudget,
        plan: &ProductionPlan,
        samples: usize,
    ) -> Result<Self, PlanError> {
        if products.len() == 2 {
            Ok(Self {
                region: Some(FeasibleRegion::compute(products, budget, plan, samples)?),
                notice: None,
            })
        } else {
            Ok(Self {
                region: None,
                notice: Some(REGION_NOTICE.to_string()),
            })
        }
    }
}

/// Where `a * x = total` crosses the axis; `None` for a zero coefficient or
/// when the quotient overflows
fn intercept(total: f64, a: f64) -> Option<f64> {
    let x = total / a;
    (a != 0.0 && x.is_finite()).then_some(x)
}

fn boundary(total: f64, a1: f64, a2: f64, x1: f64) -> Option<f64> {
    (a2 != 0.0).then(|| (total - a1 * x1) / a2)
}

/// `n` evenly spaced points from `start` to `end` inclusive
fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    let step = (end - start) / (n - 1) as f64;
    (0..n)
        .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::solve;

    fn scenario() -> (Vec<Product>, ResourceBudget) {
        (
            vec![
                Product::with_throughput("Chairs", 5000.0, 360.0, 2.0).unwrap(),
                Product::with_throughput("Tables", 4000.0, 180.0, 2.0).unwrap(),
            ],
            ResourceBudget::new(8.0, 10000.0).unwrap(),
        )
    }

    #[test]
    fn test_region_shape() {
        let (products, budget) = scenario();
        let plan = solve(&products, &budget).unwrap();

        let region = FeasibleRegion::compute(&products, &budget, &plan, DEFAULT_SAMPLES).unwrap();

        assert_eq!(region.x_label, "Chairs");
        assert_eq!(region.y_label, "Tables");
        assert_eq!(region.samples.len(), 50);
        // max(8 * 360, 10000 / 2, 20)
        assert!((region.x_max - 5000.0).abs() < 1e-9);
        assert_eq!(region.samples[0].x1, 0.0);
        assert_eq!(region.samples[49].x1, region.x_max);

        let origin = &region.samples[0];
        assert!((origin.time_bound.unwrap() - 1440.0).abs() < 1e-6);
        assert!((origin.material_bound.unwrap() - 5000.0).abs() < 1e-6);
        assert!((origin.envelope.unwrap() - 1440.0).abs() < 1e-6);
        assert!(origin.is_shaded());

        // Past x1 = 2880 the time line is negative and the envelope is clipped
        let last = &region.samples[49];
        assert!(last.time_bound.unwrap() < 0.0);
        assert_eq!(last.envelope, Some(0.0));
        assert!(!last.is_shaded());

        let (x1, x2) = region.optimum;
        assert!((x1 - 2880.0).abs() < 1e-6);
        assert!(x2.abs() < 1e-6);
    }

    #[test]
    fn test_envelope_is_pointwise_min() {
        let (products, budget) = scenario();
        let plan = solve(&products, &budget).unwrap();
        let region = FeasibleRegion::compute(&products, &budget, &plan, 11).unwrap();

        for s in &region.samples {
            let expected = s.time_bound.unwrap().min(s.material_bound.unwrap()).max(0.0);
            assert_eq!(s.envelope, Some(expected));
        }
    }

    #[test]
    fn test_zero_coefficient_on_second_product_is_non_binding() {
        let products = vec![
            Product::with_time("A", 3.0, 1.0, 1.0).unwrap(),
            Product::with_time("B", 1.0, 1.0, 0.0).unwrap(),
        ];
        let budget = ResourceBudget::new(4.0, 2.0).unwrap();
        let plan = solve(&products, &budget).unwrap();

        let region = FeasibleRegion::compute(&products, &budget, &plan, 5).unwrap();

        for s in &region.samples {
            assert_eq!(s.material_bound, None);
            let time = s.time_bound.unwrap();
            assert_eq!(s.envelope, Some(time.max(0.0)));
        }
    }

    #[test]
    fn test_small_budgets_use_minimum_extent() {
        let products = vec![
            Product::with_time("A", 1.0, 1.0, 0.0).unwrap(),
            Product::with_time("B", 1.0, 1.0, 1.0).unwrap(),
        ];
        let budget = ResourceBudget::new(2.0, 3.0).unwrap();
        let plan = solve(&products, &budget).unwrap();

        let region = FeasibleRegion::compute(&products, &budget, &plan, 2).unwrap();

        // Time intercept is 2, material intercept is undefined
        assert_eq!(region.x_max, 20.0);
        assert_eq!(region.samples.len(), 2);
        assert!(region.y_max() >= 3.0);
    }

    #[test]
    fn test_overflowing_intercept_falls_back() {
        // 1 / 1e-310 overflows; the range must come from the time term or the floor
        let products = vec![
            Product::with_time("A", 1.0, 1.0, 1e-310).unwrap(),
            Product::with_time("B", 1.0, 1.0, 1.0).unwrap(),
        ];
        let budget = ResourceBudget::new(8.0, 1.0).unwrap();
        let plan = solve(&products, &budget).unwrap();

        let region = FeasibleRegion::compute(&products, &budget, &plan, DEFAULT_SAMPLES).unwrap();

        assert_eq!(region.x_max, 20.0);
        assert!(region.samples.iter().all(|s| s.x1.is_finite()));
        let origin = &region.samples[0];
        assert_eq!(origin.x1, 0.0);
        assert_eq!(origin.envelope, Some(1.0));
        assert!(origin.is_shaded());
    }

    #[test]
    fn test_visualization_for_two_products() {
        let (products, budget) = scenario();
        let plan = solve(&products, &budget).unwrap();

        let view = Visualization::for_plan(&products, &budget, &plan, DEFAULT_SAMPLES).unwrap();

        assert!(view.notice.is_none());
        assert_eq!(view.region.unwrap().samples.len(), DEFAULT_SAMPLES);
    }

    #[test]
    fn test_visualization_notice_for_three_products() {
        let products = vec![
            Product::with_throughput("A", 5000.0, 360.0, 2.0).unwrap(),
            Product::with_throughput("B", 4000.0, 180.0, 2.0).unwrap(),
            Product::with_throughput("C", 3000.0, 120.0, 1.0).unwrap(),
        ];
        let budget = ResourceBudget::new(8.0, 10000.0).unwrap();
        let plan = solve(&products, &budget).unwrap();

        let view = Visualization::for_plan(&products, &budget, &plan, DEFAULT_SAMPLES).unwrap();

        assert_eq!(view.region, None);
        assert_eq!(view.notice.as_deref(), Some(REGION_NOTICE));
    }

    #[test]
    fn test_requires_two_products() {
        let products = vec![
            Product::with_time("A", 1.0, 1.0, 1.0).unwrap(),
            Product::with_time("B", 1.0, 1.0, 1.0).unwrap(),
            Product::with_time("C", 1.0, 1.0, 1.0).unwrap(),
        ];
        let budget = ResourceBudget::new(1.0, 1.0).unwrap();
        let plan = solve(&products, &budget).unwrap();

        assert_eq!(
            FeasibleRegion::compute(&products, &budget, &plan, DEFAULT_SAMPLES),
            Err(PlanError::RegionNeedsTwoProducts(3))
        );
    }

    #[test]
    fn test_rejects_single_sample() {
        let (products, budget) = scenario();
        let plan = solve(&products, &budget).unwrap();

        assert_eq!(
            FeasibleRegion::compute(&products, &budget, &plan, 1),
            Err(PlanError::InvalidSamples(1))
        );
    }

    #[test]
    fn test_linspace_endpoints() {
        assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(linspace(0.0, 3.0, 2), vec![0.0, 3.0]);
    }
}
