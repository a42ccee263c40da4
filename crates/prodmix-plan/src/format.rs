use std::fmt::Write;

use crate::plan::ProductionPlan;

pub const REGION_NOTICE: &str = "Visualization is only available for 2 products.";

pub fn format_quantity(value: f64) -> String {
    format!("{:.2}", value)
}

/// Whole currency units with thousands separators, e.g. `Rp 14,400,000`.
/// Halves round away from zero.
pub fn format_currency(symbol: &str, value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded < 0.0 { "-" } else { "" };
    if symbol.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{symbol} {sign}{grouped}")
    }
}

/// Human-readable summary of a plan, one line per fact
pub fn render_plan(plan: &ProductionPlan, currency: &str) -> String {
    let mut out = String::new();
    for q in &plan.quantities {
        let _ = writeln!(out, "{}: {} units", q.name, format_quantity(q.quantity));
    }
    let _ = writeln!(out, "Maximum total profit: {}", format_currency(currency, plan.total_profit));
    let _ = writeln!(out, "Leftover material: {}", format_quantity(plan.leftover_material));
    out
}
