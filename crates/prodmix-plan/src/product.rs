use crate::error::PlanError;

pub const MIN_PRODUCTS: usize = 2;
pub const MAX_PRODUCTS: usize = 10;

/// How the time a product takes is supplied
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimeInput {
    /// Hours needed for one unit
    PerUnit(f64),
    /// Units produced per hour
    Throughput(f64),
}

/// A product competing for the shared time and material budgets.
///
/// Fields are private so every `Product` has passed validation: profit and
/// material are finite and nonnegative, time per unit is finite and strictly
/// positive.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    name: String,
    profit_per_unit: f64,
    time_per_unit: f64,
    material_per_unit: f64,
}

impl Product {
    pub fn new(name: impl Into<String>, profit: f64, time: TimeInput, material: f64) -> Result<Self, PlanError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(PlanError::EmptyName);
        }

        check_nonnegative(&name, "profit per unit", profit)?;
        check_nonnegative(&name, "material per unit", material)?;

        let time_per_unit = match time {
            TimeInput::PerUnit(hours) => {
                if !hours.is_finite() || hours <= 0.0 {
                    return Err(PlanError::InvalidCoefficient {
                        product: name,
                        field: "time per unit",
                        value: hours,
                    });
                }
                hours
            }
            TimeInput::Throughput(rate) => {
                // A subnormal rate is positive but its reciprocal overflows
                let hours = 1.0 / rate;
                if !rate.is_finite() || rate <= 0.0 || !hours.is_finite() {
                    return Err(PlanError::InvalidThroughput { product: name, value: rate });
                }
                hours
            }
        };

        Ok(Self {
            name,
            profit_per_unit: profit,
            time_per_unit,
            material_per_unit: material,
        })
    }

    pub fn with_time(name: impl Into<String>, profit: f64, hours_per_unit: f64, material: f64) -> Result<Self, PlanError> {
        Self::new(name, profit, TimeInput::PerUnit(hours_per_unit), material)
    }

    pub fn with_throughput(name: impl Into<String>, profit: f64, units_per_hour: f64, material: f64) -> Result<Self, PlanError> {
        Self::new(name, profit, TimeInput::Throughput(units_per_hour), material)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn profit_per_unit(&self) -> f64 {
        self.profit_per_unit
    }

    pub fn time_per_unit(&self) -> f64 {
        self.time_per_unit
    }

    pub fn material_per_unit(&self) -> f64 {
        self.material_per_unit
    }
}

fn check_nonnegative(product: &str, field: &'static str, value: f64) -> Result<(), PlanError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(PlanError::InvalidCoefficient {
            product: product.to_string(),
            field,
            value,
        })
    }
}

/// Total time and material available for one planning run
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResourceBudget {
    total_time: f64,
    total_material: f64,
}

impl ResourceBudget {
    pub fn new(total_time: f64, total_material: f64) -> Result<Self, PlanError> {
        for (resource, value) in [("time", total_time), ("material", total_material)] {
            if !value.is_finite() || value < 0.0 {
                return Err(PlanError::InvalidBudget { resource, value });
            }
        }
        Ok(Self {
            total_time,
            total_material,
        })
    }

    pub fn total_time(&self) -> f64 {
        self.total_time
    }

    pub fn total_material(&self) -> f64 {
        self.total_material
    }
}

/// Placeholder name for the product at `index`: "Product A", "Product B", ...
pub fn default_name(index: usize) -> String {
    match u8::try_from(index).ok().filter(|i| *i < 26) {
        Some(i) => format!("Product {}", (b'A' + i) as char),
        None => format!("Product {}", index + 1),
    }
}
