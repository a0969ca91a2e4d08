//! Heating Comparison CLI
//!
//! Runs the three-scenario heat pump vs district heating comparison and
//! prints the headline figures. Parameters come from the defaults, an
//! optional parameter file, and command-line overrides, in that order.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use heating_comparison::parameters::{load_inputs, ComparisonInputs, DEFAULT_PARAMETERS_PATH, MIN_SCOP};
use heating_comparison::report::{self, ComparisonReport, FeeTable};
use heating_comparison::ScenarioRunner;

#[derive(Debug, Parser)]
#[command(name = "heating_comparison", version, about = "Ground-source heat pump vs district heating over 50 years")]
struct Cli {
    /// Parameter file: JSON, or CSV with `parameter,value` rows
    #[arg(long, value_name = "FILE")]
    params: Option<PathBuf>,

    /// Heat demand of scenario A (MWh/y)
    #[arg(long)]
    consumption_a: Option<f64>,

    /// Heat demand of scenario B (MWh/y)
    #[arg(long)]
    consumption_b: Option<f64>,

    /// Heat demand of scenario C (MWh/y)
    #[arg(long)]
    consumption_c: Option<f64>,

    /// Heat pump SCOP (at least 1.0)
    #[arg(long, value_parser = parse_scop)]
    scop: Option<f64>,

    /// Electricity price (€/kWh)
    #[arg(long)]
    electricity_price: Option<f64>,

    /// Electricity price growth (%/y)
    #[arg(long)]
    electricity_inflation: Option<f64>,

    /// Investment (€)
    #[arg(long)]
    investment: Option<f64>,

    /// Investment loan term (years)
    #[arg(long, value_parser = clap::value_parser!(u32).range(5..=40))]
    loan_term: Option<u32>,

    /// Interest rate (%/y)
    #[arg(long)]
    interest_rate: Option<f64>,

    /// Years between refurbishments
    #[arg(long, value_parser = clap::value_parser!(u32).range(5..=30))]
    refurbishment_interval: Option<u32>,

    /// Cost of one refurbishment (€)
    #[arg(long)]
    refurbishment_cost: Option<f64>,

    /// Refurbishment loan term (years)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=30))]
    refurbishment_term: Option<u32>,

    /// Monthly fixed cost (€)
    #[arg(long)]
    monthly_fixed_cost: Option<f64>,

    /// District heating price (€/MWh)
    #[arg(long)]
    district_heating_price: Option<f64>,

    /// District heating price growth (%/y)
    #[arg(long)]
    district_heating_inflation: Option<f64>,

    /// Paying floor area (m²)
    #[arg(long)]
    floor_area: Option<f64>,

    /// Write annual series of every scenario to this CSV file
    #[arg(long, value_name = "FILE")]
    series_csv: Option<PathBuf>,

    /// Write the monthly €/m² fee table to this CSV file
    #[arg(long, value_name = "FILE")]
    fee_table_csv: Option<PathBuf>,

    /// Write the full report to this JSON file
    #[arg(long, value_name = "FILE")]
    report_json: Option<PathBuf>,

    /// Print the report as JSON instead of tables
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn apply_overrides(&self, inputs: &mut ComparisonInputs) {
        let set = |target: &mut f64, value: Option<f64>| {
            if let Some(v) = value {
                *target = v;
            }
        };
        set(&mut inputs.consumption_mwh[0], self.consumption_a);
        set(&mut inputs.consumption_mwh[1], self.consumption_b);
        set(&mut inputs.consumption_mwh[2], self.consumption_c);
        set(&mut inputs.scop, self.scop);
        set(&mut inputs.electricity.unit_price, self.electricity_price);
        set(&mut inputs.electricity.inflation_pct, self.electricity_inflation);
        set(&mut inputs.financial.investment, self.investment);
        set(&mut inputs.financial.interest_rate_pct, self.interest_rate);
        set(&mut inputs.financial.refurbishment_amount, self.refurbishment_cost);
        set(&mut inputs.financial.monthly_fixed_cost, self.monthly_fixed_cost);
        set(&mut inputs.district_heating.unit_price, self.district_heating_price);
        set(&mut inputs.district_heating.inflation_pct, self.district_heating_inflation);
        set(&mut inputs.floor_area_m2, self.floor_area);

        if let Some(years) = self.loan_term {
            inputs.financial.loan_term_years = years;
        }
        if let Some(years) = self.refurbishment_interval {
            inputs.financial.refurbishment_interval_years = years;
        }
        if let Some(years) = self.refurbishment_term {
            inputs.financial.refurbishment_term_years = years;
        }
    }
}

fn parse_scop(value: &str) -> std::result::Result<f64, String> {
    let scop: f64 = value.parse().map_err(|e| format!("{e}"))?;
    if scop >= MIN_SCOP {
        Ok(scop)
    } else {
        Err(format!("SCOP must be at least {MIN_SCOP}"))
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    // Fall back to the default parameter file when it exists
    let params_path = cli.params.clone().or_else(|| {
        let default = PathBuf::from(DEFAULT_PARAMETERS_PATH);
        default.exists().then_some(default)
    });

    let mut inputs = match &params_path {
        Some(path) => load_inputs(path)
            .with_context(|| format!("Failed to load parameters from {}", path.display()))?,
        None => ComparisonInputs::default(),
    };
    cli.apply_overrides(&mut inputs);

    let runner = ScenarioRunner::new(inputs).context("Invalid parameters")?;
    let result = runner.run();
    let report = ComparisonReport::new(&result);

    if let Some(path) = &cli.series_csv {
        let file = File::create(path).with_context(|| format!("Unable to create {}", path.display()))?;
        report::write_series_csv(BufWriter::new(file), &result)?;
        info!("annual series written to {}", path.display());
    }

    if let Some(path) = &cli.fee_table_csv {
        let file = File::create(path).with_context(|| format!("Unable to create {}", path.display()))?;
        report::write_fee_table_csv(BufWriter::new(file), &report.fee_table)?;
        info!("fee table written to {}", path.display());
    }

    if let Some(path) = &cli.report_json {
        std::fs::write(path, report.to_json()?)
            .with_context(|| format!("Unable to write {}", path.display()))?;
        info!("report written to {}", path.display());
    }

    if cli.json {
        println!("{}", report.to_json()?);
        return Ok(());
    }

    print_report(&report, &result);
    Ok(())
}

fn print_report(report: &ComparisonReport, result: &heating_comparison::ComparisonResult) {
    println!("Heat pump vs district heating");
    println!("=============================\n");

    println!("Parameters:");
    for row in &report.parameters {
        println!("  {:<34} {:>12}", row.label, row.value);
    }
    println!();

    // Annual costs at the fee-table years
    let header: Vec<String> = result
        .scenarios
        .iter()
        .map(|s| {
            let label = &s.scenario.label;
            format!("{:>14} {:>14}", format!("Heat pump {label}"), format!("District {label}"))
        })
        .collect();
    println!("{:>5} {}", "Year", header.join(" "));
    println!("{}", "-".repeat(5 + 30 * result.scenarios.len()));
    for row in &report.fee_table.rows {
        let cells: Vec<String> = result
            .scenarios
            .iter()
            .map(|s| {
                format!(
                    "{:>14.0} {:>14.0}",
                    s.heat_pump_costs.year(row.year).unwrap_or_default(),
                    s.district_heating_costs.year(row.year).unwrap_or_default()
                )
            })
            .collect();
        println!("{:>5} {}", row.year, cells.join(" "));
    }
    println!();

    println!("Monthly fees (€/m²/month, every 5 years):");
    print_fee_table(&report.fee_table);
    println!();

    println!("Payback:");
    for summary in &report.scenarios {
        println!("  Scenario {}: {}", summary.label, summary.payback_text);
    }
    println!("\nInvestment loan share: {:.0} €/m²", report.loan_share_per_m2);
}

fn print_fee_table(table: &FeeTable) {
    let headers = table.headers();
    println!("{}", headers.iter().map(|h| format!("{h:>20}")).collect::<String>());
    for record in table.records() {
        println!("{}", record.iter().map(|c| format!("{c:>20}")).collect::<String>());
    }
}
