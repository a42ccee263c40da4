//! WASM bindings for prodmix
//!
//! This module provides JavaScript-friendly APIs for the interactive
//! planning form. Inputs are [`Scenario`] objects; outputs are plain objects.

use wasm_bindgen::prelude::*;

use crate::format::{format_currency, format_quantity};
use crate::plan::{ProductionPlan, solve as solve_plan};
use crate::region::{DEFAULT_SAMPLES, FeasibleRegion, Visualization};
use crate::scenario::Scenario;

/// Solve a scenario and return the plan, the region (two products only) and
/// preformatted display strings
#[wasm_bindgen]
pub fn solve(input: JsValue, currency: Option<String>, samples: Option<usize>) -> Result<JsValue, JsValue> {
    let scenario: Scenario = serde_wasm_bindgen::from_value(input).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let (products, budget) = scenario.resolve().map_err(|e| JsValue::from_str(&e.to_string()))?;

    let result = match solve_plan(&products, &budget) {
        Ok(plan) => {
            let view = Visualization::for_plan(&products, &budget, &plan, samples.unwrap_or(DEFAULT_SAMPLES))
                .map_err(|e| JsValue::from_str(&e.to_string()))?;
            let display = DisplayResult::new(&plan, currency.as_deref().unwrap_or("Rp"));
            SolveResult {
                status: "optimal".to_string(),
                error: None,
                notice: view.notice,
                plan: Some(plan),
                display: Some(display),
                region: view.region,
            }
        }
        Err(e) => SolveResult {
            status: "failed".to_string(),
            error: Some(e.to_string()),
            notice: None,
            plan: None,
            display: None,
            region: None,
        },
    };

    serde_wasm_bindgen::to_value(&result).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Solve a scenario and return only what the chart needs: `{ region, notice }`
#[wasm_bindgen]
pub fn feasible_region(input: JsValue, samples: Option<usize>) -> Result<JsValue, JsValue> {
    let scenario: Scenario = serde_wasm_bindgen::from_value(input).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let (products, budget) = scenario.resolve().map_err(|e| JsValue::from_str(&e.to_string()))?;
    let plan = solve_plan(&products, &budget).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let view = Visualization::for_plan(&products, &budget, &plan, samples.unwrap_or(DEFAULT_SAMPLES))
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    serde_wasm_bindgen::to_value(&view).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Validate a scenario without solving; returns the error message or null
#[wasm_bindgen]
pub fn validate(input: JsValue) -> JsValue {
    let message = match serde_wasm_bindgen::from_value::<Scenario>(input) {
        Ok(scenario) => scenario.resolve().err().map(|e| e.to_string()),
        Err(e) => Some(e.to_string()),
    };
    match message {
        Some(m) => JsValue::from_str(&m),
        None => JsValue::NULL,
    }
}

/// `count` default products with the default budgets, for a fresh form
#[wasm_bindgen]
pub fn default_scenario(count: usize) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&Scenario::with_defaults(count)).map_err(|e| JsValue::from_str(&e.to_string()))
}

#[derive(serde::Serialize)]
struct SolveResult {
    status: String,
    error: Option<String>,
    notice: Option<String>,
    plan: Option<ProductionPlan>,
    display: Option<DisplayResult>,
    region: Option<FeasibleRegion>,
}

#[derive(serde::Serialize)]
struct DisplayResult {
    quantities: Vec<String>,
    total_profit: String,
    leftover_material: String,
}

impl DisplayResult {
    fn new(plan: &ProductionPlan, currency: &str) -> Self {
        Self {
            quantities: plan.quantities.iter().map(|q| format_quantity(q.quantity)).collect(),
            total_profit: format_currency(currency, plan.total_profit),
            leftover_material: format_quantity(plan.leftover_material),
        }
    }
}
