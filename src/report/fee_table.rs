//! Monthly fee table per paying square metre

use serde::{Deserialize, Serialize};

use crate::scenario::{ComparisonResult, ScenarioResult};

/// Years between table rows
pub const FEE_TABLE_INTERVAL_YEARS: u32 = 5;

/// Monthly €/m² figures of one scenario in one year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioFees {
    pub label: String,
    /// Investment loan share of the heat-pump fee
    pub financing: f64,
    /// Running-cost share of the heat-pump fee
    pub heating: f64,
    pub district_heating: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeTableRow {
    pub year: u32,
    pub scenarios: Vec<ScenarioFees>,
}

/// Fees sampled every few years
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeeTable {
    pub rows: Vec<FeeTableRow>,
}

impl FeeTable {
    /// Sample the comparison every `interval` years (5, 10, … with the
    /// default), converting annual costs to €/m² per month. An interval of
    /// zero samples every year.
    pub fn build(result: &ComparisonResult, interval: u32) -> Self {
        let interval = interval.max(1);
        let floor_area = result.inputs.floor_area_m2;
        let horizon = result
            .scenarios
            .first()
            .map(|s| s.heat_pump_costs.len() as u32)
            .unwrap_or(0);

        let rows = (interval..=horizon)
            .step_by(interval as usize)
            .map(|year| FeeTableRow {
                year,
                scenarios: result
                    .scenarios
                    .iter()
                    .map(|s| scenario_fees(s, year, floor_area))
                    .collect(),
            })
            .collect();

        Self { rows }
    }

    /// Table with the default 5-year spacing
    pub fn from_result(result: &ComparisonResult) -> Self {
        Self::build(result, FEE_TABLE_INTERVAL_YEARS)
    }

    /// Column headers in the order [`FeeTable::records`] writes them
    pub fn headers(&self) -> Vec<String> {
        let mut headers = vec!["Year".to_string()];
        if let Some(first) = self.rows.first() {
            for fees in &first.scenarios {
                headers.push(format!("Financing {}", fees.label));
                headers.push(format!("Heating {}", fees.label));
                headers.push(format!("District heating {}", fees.label));
            }
        }
        headers
    }

    /// Rows formatted to two decimals
    pub fn records(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| {
                let mut record = vec![row.year.to_string()];
                for fees in &row.scenarios {
                    record.push(format!("{:.2}", fees.financing));
                    record.push(format!("{:.2}", fees.heating));
                    record.push(format!("{:.2}", fees.district_heating));
                }
                record
            })
            .collect()
    }
}

fn scenario_fees(result: &ScenarioResult, year: u32, floor_area: f64) -> ScenarioFees {
    let per_m2_month = |annual: Option<f64>| annual.unwrap_or_default() / floor_area / 12.0;

    ScenarioFees {
        label: result.scenario.label.clone(),
        financing: per_m2_month(result.breakdown.financing.year(year)),
        heating: per_m2_month(result.breakdown.heating.year(year)),
        district_heating: per_m2_month(result.district_heating_costs.year(year)),
    }
}
