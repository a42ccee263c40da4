mod chart;
mod logging;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use prodmix_plan::{
    DEFAULT_SAMPLES, ProductSpec, ProductionPlan, Scenario, TimeInput, Visualization, format_quantity, render_plan,
};
use prodmix_plan::scenario::{DEFAULT_TOTAL_MATERIAL, DEFAULT_TOTAL_TIME};
use tracing::debug;

#[derive(Parser)]
#[command(name = "prodmix")]
#[command(about = "Profit-maximizing production mix under time and material budgets", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve for the optimal production mix
    Solve {
        #[command(flatten)]
        input: InputArgs,
        /// Currency symbol for the total profit
        #[arg(long, default_value = "Rp")]
        currency: String,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Pretty)]
        format: Format,
        /// Write a PNG chart of the feasible region (two products only)
        #[arg(long = "chart", value_name = "PATH")]
        chart_path: Option<PathBuf>,
        /// Number of points sampled along the first product's axis
        #[arg(long, default_value_t = DEFAULT_SAMPLES)]
        samples: usize,
    },
    /// Validate the inputs without solving
    Check {
        #[command(flatten)]
        input: InputArgs,
    },
}

#[derive(clap::Args)]
struct InputArgs {
    /// Product as NAME:PROFIT:RATE:MATERIAL (repeat for each product)
    #[arg(short, long = "product", value_parser = parse_product)]
    products: Vec<ProductArg>,
    /// Read RATE as hours per unit instead of units per hour
    #[arg(long)]
    time_per_unit: bool,
    /// Number of default products when no --product is given
    #[arg(short = 'n', long, default_value_t = 2)]
    count: usize,
    /// Hours available
    #[arg(long, default_value_t = DEFAULT_TOTAL_TIME)]
    total_time: f64,
    /// Material available
    #[arg(long, default_value_t = DEFAULT_TOTAL_MATERIAL)]
    total_material: f64,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Pretty,
    Json,
}

#[derive(Debug, Clone)]
struct ProductArg {
    name: String,
    profit: f64,
    rate: f64,
    material: f64,
}

fn parse_product(s: &str) -> Result<ProductArg, String> {
    let parts: Vec<&str> = s.split(':').collect();
    let [name, profit, rate, material] = parts.as_slice() else {
        return Err(format!("expected NAME:PROFIT:RATE:MATERIAL, got '{}'", s));
    };
    let number = |field: &str, value: &str| {
        value
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid {} '{}': {}", field, value, e))
    };
    Ok(ProductArg {
        name: name.to_string(),
        profit: number("profit", profit)?,
        rate: number("rate", rate)?,
        material: number("material", material)?,
    })
}

impl InputArgs {
    fn scenario(&self) -> Scenario {
        if self.products.is_empty() {
            let mut scenario = Scenario::with_defaults(self.count);
            scenario.total_time = self.total_time;
            scenario.total_material = self.total_material;
            return scenario;
        }

        let products = self
            .products
            .iter()
            .map(|p| ProductSpec {
                name: Some(p.name.clone()),
                profit: p.profit,
                time: if self.time_per_unit {
                    TimeInput::PerUnit(p.rate)
                } else {
                    TimeInput::Throughput(p.rate)
                },
                material: p.material,
            })
            .collect();

        Scenario {
            products,
            total_time: self.total_time,
            total_material: self.total_material,
        }
    }
}

#[derive(serde::Serialize)]
struct JsonOutput<'a> {
    plan: &'a ProductionPlan,
    #[serde(flatten)]
    view: &'a Visualization,
}

fn main() {
    logging::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            input,
            currency,
            format,
            chart_path,
            samples,
        } => {
            let (products, budget) = match input.scenario().resolve() {
                Ok(resolved) => resolved,
                Err(e) => {
                    eprintln!("Input error: {}", e);
                    std::process::exit(1);
                }
            };
            debug!(products = products.len(), "resolved scenario");

            let plan = match prodmix_plan::solve(&products, &budget) {
                Ok(plan) => plan,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            };

            let view = match Visualization::for_plan(&products, &budget, &plan, samples) {
                Ok(view) => view,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            };

            match format {
                Format::Json => {
                    let output = JsonOutput { plan: &plan, view: &view };
                    match serde_json::to_string_pretty(&output) {
                        Ok(json) => println!("{}", json),
                        Err(e) => {
                            eprintln!("Error serializing output: {}", e);
                            std::process::exit(1);
                        }
                    }
                }
                Format::Pretty => {
                    println!("Optimization result");
                    print!("{}", render_plan(&plan, &currency));
                    if !plan.binding.is_empty() {
                        let names: Vec<String> = plan.binding.iter().map(|r| r.to_string()).collect();
                        println!("Binding resources: {}", names.join(", "));
                    }
                    println!("Leftover time: {}", format_quantity(plan.leftover_time));
                    println!();
                    if let Some(notice) = &view.notice {
                        println!("{}", notice);
                    }
                }
            }

            match (chart_path, &view.region) {
                (Some(path), Some(region)) => {
                    if let Err(e) = chart::render(region, &path) {
                        eprintln!("Error writing chart: {}", e);
                        std::process::exit(1);
                    }
                    eprintln!("Feasible region chart saved to {}", path.display());
                    eprintln!("  x axis: {}, y axis: {}", region.x_label, region.y_label);
                    eprintln!("  blue line: time constraint");
                    eprintln!("  orange line: material constraint");
                    eprintln!("  magenta area: feasible region");
                    eprintln!("  red dot: optimal solution");
                }
                (Some(_), None) => eprintln!("Chart skipped: {}", view.notice.as_deref().unwrap_or_default()),
                (None, _) => {}
            }
        }
        Commands::Check { input } => match input.scenario().resolve() {
            Ok((products, budget)) => {
                println!("✓ inputs are valid");
                println!("  {} products", products.len());
                for p in &products {
                    println!(
                        "  {:20} profit {:>10.2}  time {:>10.6} h/unit  material {:>8.2}",
                        p.name(),
                        p.profit_per_unit(),
                        p.time_per_unit(),
                        p.material_per_unit()
                    );
                }
                println!("  total time {}, total material {}", budget.total_time(), budget.total_material());
            }
            Err(e) => {
                eprintln!("✗ invalid inputs:");
                eprintln!("  {}", e);
                std::process::exit(1);
            }
        },
    }
}
