//! Report assembly: parameter table, fee table, CSV and JSON outputs
//!
//! Rendering (charts, PDF) is left to the caller. This module only shapes
//! the numbers the comparison produced.

mod fee_table;

pub use fee_table::{FeeTable, FeeTableRow, ScenarioFees, FEE_TABLE_INTERVAL_YEARS};

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::parameters::ComparisonInputs;
use crate::projection::PaybackOutcome;
use crate::scenario::ComparisonResult;

/// One labelled input for the report's parameter table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterRow {
    pub label: String,
    pub value: String,
}

/// The 16 inputs as labelled rows, in form order
pub fn parameter_table(inputs: &ComparisonInputs) -> Vec<ParameterRow> {
    let financial = &inputs.financial;
    let rows: [(&str, String); 16] = [
        ("Consumption A (MWh/y)", inputs.consumption_mwh[0].to_string()),
        ("Consumption B (MWh/y)", inputs.consumption_mwh[1].to_string()),
        ("Consumption C (MWh/y)", inputs.consumption_mwh[2].to_string()),
        ("SCOP", inputs.scop.to_string()),
        ("Electricity price (€/kWh)", inputs.electricity.unit_price.to_string()),
        ("Electricity inflation (%/y)", inputs.electricity.inflation_pct.to_string()),
        ("Investment (€)", financial.investment.to_string()),
        ("Loan term (y)", financial.loan_term_years.to_string()),
        ("Interest rate (%/y)", financial.interest_rate_pct.to_string()),
        ("Refurbishment interval (y)", financial.refurbishment_interval_years.to_string()),
        ("Refurbishment cost (€)", financial.refurbishment_amount.to_string()),
        ("Refurbishment loan term (y)", financial.refurbishment_term_years.to_string()),
        ("Monthly fixed cost (€)", financial.monthly_fixed_cost.to_string()),
        ("District heating price (€/MWh)", inputs.district_heating.unit_price.to_string()),
        ("District heating inflation (%/y)", inputs.district_heating.inflation_pct.to_string()),
        ("Paying floor area (m²)", inputs.floor_area_m2.to_string()),
    ];

    rows.into_iter()
        .map(|(label, value)| ParameterRow {
            label: label.to_string(),
            value,
        })
        .collect()
}

/// Headline figures of one scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioSummary {
    pub label: String,
    pub heat_demand_mwh: f64,
    pub electricity_kwh: f64,
    pub heat_pump_total: f64,
    /// Interest paid on the investment and refurbishment loans
    pub heat_pump_interest: f64,
    /// Electricity bought over the horizon (€)
    pub heat_pump_energy: f64,
    pub district_heating_total: f64,
    pub total_savings: f64,
    pub payback: PaybackOutcome,
    /// Payback wording for display
    pub payback_text: String,
}

/// Everything a presentation layer needs to render the comparison
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub generated_at: DateTime<Utc>,
    pub parameters: Vec<ParameterRow>,
    /// Investment loan share per paying square metre (€/m²)
    pub loan_share_per_m2: f64,
    pub scenarios: Vec<ScenarioSummary>,
    pub fee_table: FeeTable,
}

impl ComparisonReport {
    pub fn new(result: &ComparisonResult) -> Self {
        let scenarios = result
            .scenarios
            .iter()
            .map(|s| {
                let heat_pump = s.heat_pump.summary();
                ScenarioSummary {
                    label: s.scenario.label.clone(),
                    heat_demand_mwh: s.scenario.heat_demand_mwh,
                    electricity_kwh: s.scenario.primary_consumption,
                    heat_pump_total: heat_pump.total_cost,
                    heat_pump_interest: heat_pump.total_primary_interest
                        + heat_pump.total_refurbishment_interest,
                    heat_pump_energy: heat_pump.total_energy,
                    district_heating_total: s.district_heating_costs.total(),
                    total_savings: s.cumulative_savings.values().last().copied().unwrap_or_default(),
                    payback: s.payback,
                    payback_text: s.payback.to_string(),
                }
            })
            .collect();

        Self {
            generated_at: Utc::now(),
            parameters: parameter_table(&result.inputs),
            loan_share_per_m2: result.inputs.loan_share_per_m2(),
            scenarios,
            fee_table: FeeTable::from_result(result),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Write the annual series of every scenario as CSV, one row per
/// scenario and year
pub fn write_series_csv<W: Write>(writer: W, result: &ComparisonResult) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record([
        "Scenario",
        "Year",
        "HeatPump",
        "Financing",
        "Heating",
        "DistrictHeating",
        "CumulativeSavings",
    ])?;

    for s in &result.scenarios {
        let columns = s
            .heat_pump_costs
            .iter()
            .zip(s.breakdown.financing.iter())
            .zip(s.breakdown.heating.iter())
            .zip(s.district_heating_costs.iter())
            .zip(s.cumulative_savings.iter());

        for (idx, ((((total, financing), heating), district), savings)) in columns.enumerate() {
            csv_writer.write_record([
                s.scenario.label.clone(),
                (idx + 1).to_string(),
                format!("{total:.2}"),
                format!("{financing:.2}"),
                format!("{heating:.2}"),
                format!("{district:.2}"),
                format!("{savings:.2}"),
            ])?;
        }
    }

    csv_writer.flush()?;
    Ok(())
}

/// Write the fee table as CSV
pub fn write_fee_table_csv<W: Write>(writer: W, table: &FeeTable) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(table.headers())?;
    for record in table.records() {
        csv_writer.write_record(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write the parameter table as CSV
pub fn write_parameter_csv<W: Write>(writer: W, inputs: &ComparisonInputs) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(["Parameter", "Value"])?;
    for row in parameter_table(inputs) {
        csv_writer.write_record([row.label, row.value])?;
    }
    csv_writer.flush()?;
    Ok(())
}
