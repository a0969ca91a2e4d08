//! Scenario runner for the three-way consumption comparison
//!
//! Validates the parameter snapshot once, then projects every scenario
//! independently. Scenarios share no state, so they run on the rayon pool
//! and are collected back in input order.

use log::{debug, info};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::InputError;
use crate::parameters::{ComparisonInputs, Scenario};
use crate::projection::{
    cumulative_savings, payback_year, AmortizationProjector, CostSeries, DecomposedSeries,
    PaybackOutcome, ProjectionResult, ReferenceCostProjector, HORIZON_YEARS,
};

/// Everything projected for one consumption scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario: Scenario,

    /// Per-year heat-pump breakdown
    pub heat_pump: ProjectionResult,

    /// Heat-pump total annual cost
    pub heat_pump_costs: CostSeries,

    /// Heat-pump cost split into financing and heating
    pub breakdown: DecomposedSeries,

    /// District-heating annual cost
    pub district_heating_costs: CostSeries,

    /// Cumulative savings of the heat pump over district heating
    pub cumulative_savings: CostSeries,

    pub payback: PaybackOutcome,
}

/// Results of all scenarios for one parameter snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub inputs: ComparisonInputs,
    pub scenarios: Vec<ScenarioResult>,
}

impl ComparisonResult {
    /// Look up a scenario by label
    pub fn scenario(&self, label: &str) -> Option<&ScenarioResult> {
        self.scenarios.iter().find(|s| s.scenario.label == label)
    }
}

/// Runs the comparison for a validated parameter snapshot
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    inputs: ComparisonInputs,
    heat_pump: AmortizationProjector,
    district_heating: ReferenceCostProjector,
}

impl ScenarioRunner {
    /// Create a runner, rejecting inputs the engine cannot project
    pub fn new(inputs: ComparisonInputs) -> Result<Self, InputError> {
        inputs.validate()?;
        Ok(Self {
            heat_pump: AmortizationProjector::new(inputs.financial, inputs.electricity),
            district_heating: ReferenceCostProjector::new(inputs.district_heating),
            inputs,
        })
    }

    /// Runner over the default parameters
    pub fn with_defaults() -> Self {
        let inputs = ComparisonInputs::default();
        Self {
            heat_pump: AmortizationProjector::new(inputs.financial, inputs.electricity),
            district_heating: ReferenceCostProjector::new(inputs.district_heating),
            inputs,
        }
    }

    pub fn inputs(&self) -> &ComparisonInputs {
        &self.inputs
    }

    /// Project a single scenario
    pub fn run_scenario(&self, scenario: &Scenario) -> ScenarioResult {
        let heat_pump = self.heat_pump.project_detailed(scenario.primary_consumption);
        let heat_pump_costs = heat_pump.totals();
        let breakdown = heat_pump.decomposed();
        let district_heating_costs = self.district_heating.project(scenario.reference_consumption);

        let investment = self.inputs.financial.investment;
        let payback = PaybackOutcome {
            year: payback_year(investment, &district_heating_costs, &heat_pump_costs),
            horizon_years: HORIZON_YEARS,
        };

        debug!(
            "scenario {}: {:.1} MWh heat, {:.0} kWh electricity, year-1 cost {:.2} vs {:.2}, payback: {}",
            scenario.label,
            scenario.heat_demand_mwh,
            scenario.primary_consumption,
            heat_pump_costs.year(1).unwrap_or_default(),
            district_heating_costs.year(1).unwrap_or_default(),
            payback,
        );

        ScenarioResult {
            scenario: scenario.clone(),
            cumulative_savings: cumulative_savings(&district_heating_costs, &heat_pump_costs),
            heat_pump,
            heat_pump_costs,
            breakdown,
            district_heating_costs,
            payback,
        }
    }

    /// Project every scenario in parallel
    pub fn run(&self) -> ComparisonResult {
        let scenarios: Vec<ScenarioResult> = self
            .inputs
            .scenarios()
            .par_iter()
            .map(|scenario| self.run_scenario(scenario))
            .collect();
        self.finish(scenarios)
    }

    /// Project every scenario on the calling thread
    pub fn run_sequential(&self) -> ComparisonResult {
        let scenarios: Vec<ScenarioResult> = self
            .inputs
            .scenarios()
            .iter()
            .map(|scenario| self.run_scenario(scenario))
            .collect();
        self.finish(scenarios)
    }

    fn finish(&self, scenarios: Vec<ScenarioResult>) -> ComparisonResult {
        info!(
            "projected {} scenarios over {} years",
            scenarios.len(),
            HORIZON_YEARS
        );
        ComparisonResult {
            inputs: self.inputs.clone(),
            scenarios,
        }
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::with_defaults()
    }
}
