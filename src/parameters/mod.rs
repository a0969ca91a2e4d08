//! Input parameter snapshots for a comparison run
//!
//! Every projection reads from an immutable copy of these structs. Nothing in
//! the engine holds on to caller state between runs.

pub mod loader;

pub use loader::{load_inputs, load_inputs_csv, load_inputs_json, DEFAULT_PARAMETERS_PATH};

use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// Number of consumption scenarios compared side by side
pub const SCENARIO_COUNT: usize = 3;

/// Lowest SCOP accepted; below it the heat pump would use more energy than it delivers
pub const MIN_SCOP: f64 = 1.0;

/// Scenario labels, in input order
pub const SCENARIO_LABELS: [&str; SCENARIO_COUNT] = ["A", "B", "C"];

/// Loan and running-cost parameters shared by every scenario
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancialParameters {
    /// Principal of the investment loan (€)
    pub investment: f64,

    /// Repayment period of the investment loan (years)
    pub loan_term_years: u32,

    /// Annual interest on outstanding balances, investment and refurbishment alike (%)
    pub interest_rate_pct: f64,

    /// Years between refurbishments; the first one falls in year 1 + interval
    pub refurbishment_interval_years: u32,

    /// Principal of each refurbishment loan (€)
    pub refurbishment_amount: f64,

    /// Repayment period of each refurbishment loan (years)
    pub refurbishment_term_years: u32,

    /// Recurring monthly charge (€/month)
    pub monthly_fixed_cost: f64,
}

impl FinancialParameters {
    /// Fixed cost per year
    pub fn annual_fixed_cost(&self) -> f64 {
        self.monthly_fixed_cost * 12.0
    }

    /// Interest rate as a decimal
    pub fn interest_rate(&self) -> f64 {
        self.interest_rate_pct / 100.0
    }

    /// Whether a new refurbishment loan originates in `year`.
    /// Year 1 never triggers, whatever the interval.
    pub fn refurbishment_due(&self, year: u32) -> bool {
        year > 1 && (year - 1) % self.refurbishment_interval_years == 0
    }

    pub fn validate(&self) -> Result<(), InputError> {
        non_negative("investment", self.investment)?;
        at_least_one_year("loan_term_years", self.loan_term_years)?;
        non_negative("interest_rate_pct", self.interest_rate_pct)?;
        at_least_one_year("refurbishment_interval_years", self.refurbishment_interval_years)?;
        non_negative("refurbishment_amount", self.refurbishment_amount)?;
        at_least_one_year("refurbishment_term_years", self.refurbishment_term_years)?;
        non_negative("monthly_fixed_cost", self.monthly_fixed_cost)?;
        Ok(())
    }
}

impl Default for FinancialParameters {
    fn default() -> Self {
        Self {
            investment: 650_000.0,
            loan_term_years: 20,
            interest_rate_pct: 3.0,
            refurbishment_interval_years: 15,
            refurbishment_amount: 20_000.0,
            refurbishment_term_years: 10,
            monthly_fixed_cost: 100.0,
        }
    }
}

/// Price of the energy the heat pump consumes (electricity)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnergyParameters {
    /// Price per consumed unit in year 1 (€/kWh)
    pub unit_price: f64,

    /// Annual price growth (%)
    pub inflation_pct: f64,
}

impl EnergyParameters {
    /// Multiplier applied to the unit price at the end of each year
    pub fn growth_factor(&self) -> f64 {
        1.0 + self.inflation_pct / 100.0
    }

    pub fn validate(&self) -> Result<(), InputError> {
        non_negative("electricity unit_price", self.unit_price)?;
        non_negative("electricity inflation_pct", self.inflation_pct)
    }
}

impl Default for EnergyParameters {
    fn default() -> Self {
        Self {
            unit_price: 0.12,
            inflation_pct: 2.0,
        }
    }
}

/// Price of the reference heat source (district heating)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceParameters {
    /// Price per consumed unit in year 1 (€/MWh)
    pub unit_price: f64,

    /// Annual price growth (%)
    pub inflation_pct: f64,
}

impl ReferenceParameters {
    pub fn growth_factor(&self) -> f64 {
        1.0 + self.inflation_pct / 100.0
    }

    pub fn validate(&self) -> Result<(), InputError> {
        non_negative("district heating unit_price", self.unit_price)?;
        non_negative("district heating inflation_pct", self.inflation_pct)
    }
}

impl Default for ReferenceParameters {
    fn default() -> Self {
        Self {
            unit_price: 100.0,
            inflation_pct: 2.0,
        }
    }
}

/// One consumption scenario, with the consumption of each system in its own
/// price unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub label: String,

    /// Annual heat demand (MWh)
    pub heat_demand_mwh: f64,

    /// Heat pump electricity input per year (kWh)
    pub primary_consumption: f64,

    /// District heating purchased per year (MWh)
    pub reference_consumption: f64,
}

impl Scenario {
    /// Derive both consumptions from a heat demand.
    ///
    /// The heat pump draws `MWh × 1000 / scop` kWh of electricity; district
    /// heating delivers the demand directly.
    pub fn from_heat_demand(label: impl Into<String>, heat_demand_mwh: f64, scop: f64) -> Self {
        Self {
            label: label.into(),
            heat_demand_mwh,
            primary_consumption: heat_demand_mwh * 1000.0 / scop,
            reference_consumption: heat_demand_mwh,
        }
    }
}

/// Complete parameter snapshot for one comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonInputs {
    /// Heat demand of scenarios A, B and C (MWh/year)
    pub consumption_mwh: [f64; SCENARIO_COUNT],

    /// Seasonal coefficient of performance of the heat pump
    pub scop: f64,

    pub electricity: EnergyParameters,

    pub financial: FinancialParameters,

    pub district_heating: ReferenceParameters,

    /// Floor area paying the monthly fees (m²)
    pub floor_area_m2: f64,
}

impl Default for ComparisonInputs {
    fn default() -> Self {
        Self {
            consumption_mwh: [700.0, 850.0, 1000.0],
            scop: 3.5,
            electricity: EnergyParameters::default(),
            financial: FinancialParameters::default(),
            district_heating: ReferenceParameters::default(),
            floor_area_m2: 1000.0,
        }
    }
}

impl ComparisonInputs {
    /// Reject snapshots the engine cannot project meaningfully
    pub fn validate(&self) -> Result<(), InputError> {
        const NAMES: [&str; SCENARIO_COUNT] = ["consumption A", "consumption B", "consumption C"];
        for (&name, &mwh) in NAMES.iter().zip(&self.consumption_mwh) {
            non_negative(name, mwh)?;
        }
        at_least("scop", self.scop, MIN_SCOP)?;
        self.electricity.validate()?;
        self.financial.validate()?;
        self.district_heating.validate()?;
        positive("floor_area_m2", self.floor_area_m2)?;
        Ok(())
    }

    /// The three scenarios, labelled A..C
    pub fn scenarios(&self) -> Vec<Scenario> {
        SCENARIO_LABELS
            .iter()
            .zip(&self.consumption_mwh)
            .map(|(label, &mwh)| Scenario::from_heat_demand(*label, mwh, self.scop))
            .collect()
    }

    /// Investment loan share per paying square metre (€/m²)
    pub fn loan_share_per_m2(&self) -> f64 {
        self.financial.investment / self.floor_area_m2
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<(), InputError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(InputError::Negative { name, value })
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), InputError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(InputError::NotPositive { name, value })
    }
}

fn at_least(name: &'static str, value: f64, min: f64) -> Result<(), InputError> {
    if value.is_finite() && value >= min {
        Ok(())
    } else {
        Err(InputError::BelowMinimum { name, value, min })
    }
}

fn at_least_one_year(name: &'static str, years: u32) -> Result<(), InputError> {
    if years >= 1 {
        Ok(())
    } else {
        Err(InputError::ZeroYears { name })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults_are_valid() {
        assert!(ComparisonInputs::default().validate().is_ok());
    }

    #[test]
    fn test_heat_pump_consumption_from_scop() {
        let scenario = Scenario::from_heat_demand("A", 700.0, 3.5);
        assert_relative_eq!(scenario.primary_consumption, 200_000.0, epsilon = 1e-9);
        assert_relative_eq!(scenario.reference_consumption, 700.0);
    }

    #[test]
    fn test_scenarios_keep_input_order() {
        let scenarios = ComparisonInputs::default().scenarios();
        let labels: Vec<_> = scenarios.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, ["A", "B", "C"]);
        assert_relative_eq!(scenarios[2].heat_demand_mwh, 1000.0);
    }

    #[test]
    fn test_refurbishment_never_due_in_year_one() {
        let params = FinancialParameters {
            refurbishment_interval_years: 1,
            ..Default::default()
        };
        assert!(!params.refurbishment_due(1));
        assert!(params.refurbishment_due(2));
        assert!(params.refurbishment_due(3));
    }

    #[test]
    fn test_refurbishment_schedule() {
        let params = FinancialParameters::default();
        let due: Vec<u32> = (1..=50).filter(|&y| params.refurbishment_due(y)).collect();
        assert_eq!(due, vec![16, 31, 46]);
    }

    #[test]
    fn test_zero_term_rejected() {
        let mut inputs = ComparisonInputs::default();
        inputs.financial.loan_term_years = 0;
        assert_eq!(
            inputs.validate(),
            Err(InputError::ZeroYears { name: "loan_term_years" })
        );
    }

    #[test]
    fn test_negative_and_non_finite_rejected() {
        let mut inputs = ComparisonInputs::default();
        inputs.electricity.unit_price = -0.1;
        assert!(matches!(inputs.validate(), Err(InputError::Negative { .. })));

        let mut inputs = ComparisonInputs::default();
        inputs.financial.investment = f64::NAN;
        assert!(matches!(inputs.validate(), Err(InputError::Negative { .. })));
    }

    #[test]
    fn test_scop_below_one_and_zero_floor_area_rejected() {
        let mut inputs = ComparisonInputs::default();
        inputs.scop = 0.5;
        assert_eq!(
            inputs.validate(),
            Err(InputError::BelowMinimum { name: "scop", value: 0.5, min: 1.0 })
        );

        inputs.scop = 1.0;
        assert!(inputs.validate().is_ok());

        inputs.scop = 0.0;
        assert!(matches!(inputs.validate(), Err(InputError::BelowMinimum { name: "scop", .. })));

        let mut inputs = ComparisonInputs::default();
        inputs.floor_area_m2 = 0.0;
        assert!(matches!(
            inputs.validate(),
            Err(InputError::NotPositive { name: "floor_area_m2", .. })
        ));
    }

    #[test]
    fn test_loan_share_per_m2() {
        assert_relative_eq!(ComparisonInputs::default().loan_share_per_m2(), 650.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let inputs: ComparisonInputs =
            serde_json::from_str(r#"{"scop": 4.0, "financial": {"investment": 500000}}"#).unwrap();
        assert_relative_eq!(inputs.scop, 4.0);
        assert_relative_eq!(inputs.financial.investment, 500_000.0);
        assert_eq!(inputs.financial.loan_term_years, 20);
        assert_relative_eq!(inputs.district_heating.unit_price, 100.0);
    }
}
