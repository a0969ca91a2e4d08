//! Year-by-year heat-pump cost projection

use log::trace;

use super::cashflows::{CostSeries, DecomposedSeries, ProjectionResult, YearBreakdown};
use super::state::ProjectionState;
use crate::parameters::{EnergyParameters, FinancialParameters};

/// Length of every projection (years)
pub const HORIZON_YEARS: u32 = 50;

/// Projects the annual cost of the heat-pump option: investment loan,
/// refurbishment loans, energy and fixed costs
#[derive(Debug, Clone)]
pub struct AmortizationProjector {
    financial: FinancialParameters,
    energy: EnergyParameters,
    horizon_years: u32,
}

impl AmortizationProjector {
    /// Create a projector over the standard 50-year horizon
    pub fn new(financial: FinancialParameters, energy: EnergyParameters) -> Self {
        Self {
            financial,
            energy,
            horizon_years: HORIZON_YEARS,
        }
    }

    /// Override the horizon
    pub fn with_horizon(mut self, horizon_years: u32) -> Self {
        self.horizon_years = horizon_years;
        self
    }

    /// Total annual cost for a given annual energy consumption
    pub fn project(&self, annual_consumption: f64) -> CostSeries {
        self.project_detailed(annual_consumption).totals()
    }

    /// Financing and heating components for a given annual energy consumption
    pub fn project_decomposed(&self, annual_consumption: f64) -> DecomposedSeries {
        self.project_detailed(annual_consumption).decomposed()
    }

    /// Full per-year breakdown
    pub fn project_detailed(&self, annual_consumption: f64) -> ProjectionResult {
        let mut result = ProjectionResult::new();
        let mut state = ProjectionState::initial(&self.financial, &self.energy);

        for _year in 1..=self.horizon_years {
            state.advance_year();
            let row = self.calculate_year(&mut state, annual_consumption);
            result.add_row(row);
        }

        result
    }

    /// Advance the loans one year and record what that year cost.
    /// The energy price is inflated only after it has been billed.
    fn calculate_year(&self, state: &mut ProjectionState, annual_consumption: f64) -> YearBreakdown {
        let rate = self.financial.interest_rate();
        let mut row = YearBreakdown {
            year: state.year,
            unit_price: state.unit_price,
            ..Default::default()
        };

        // Investment loan
        let primary = state.primary_loan.amortize_year(rate);
        row.primary_repayment = primary.repayment;
        row.primary_interest = primary.interest;
        row.primary_balance = state.primary_loan.outstanding_balance;

        row.energy = state.unit_price * annual_consumption;

        // A loan originated this year is charged this year
        if state.originate_refurbishment(&self.financial) {
            trace!("year {}: refurbishment loan originated", state.year);
        }
        row.active_refurbishment_loans = state.refurbishment_loans.len();
        let refurbishment = state.amortize_refurbishments(rate);
        row.refurbishment_repayment = refurbishment.repayment;
        row.refurbishment_interest = refurbishment.interest;

        row.fixed = self.financial.annual_fixed_cost();

        state.inflate_price(&self.energy);

        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameters::Scenario;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn default_projector() -> AmortizationProjector {
        AmortizationProjector::new(FinancialParameters::default(), EnergyParameters::default())
    }

    fn scenario_a_consumption() -> f64 {
        Scenario::from_heat_demand("A", 700.0, 3.5).primary_consumption
    }

    #[test]
    fn test_projection_runs_fifty_years() {
        let series = default_projector().project(scenario_a_consumption());
        assert_eq!(series.len(), 50);
    }

    #[test]
    fn test_year_one_cost_for_default_scenario() {
        let series = default_projector().project(scenario_a_consumption());
        // 32500 repayment + 19500 interest + 24000 electricity + 1200 fixed
        assert_relative_eq!(series.year(1).unwrap(), 77_200.0, epsilon = 1e-6);
    }

    #[test]
    fn test_year_two_cost_for_default_scenario() {
        let series = default_projector().project(scenario_a_consumption());
        // Interest on 617500, electricity at 0.1224 €/kWh
        let expected = 32_500.0 + 18_525.0 + 24_480.0 + 1_200.0;
        assert_relative_eq!(series.year(2).unwrap(), expected, epsilon = 1e-6);
    }

    #[test]
    fn test_primary_loan_stops_after_term() {
        let result = default_projector().project_detailed(scenario_a_consumption());

        for row in &result.rows {
            if row.year > 20 {
                assert_eq!(row.primary_repayment, 0.0);
                assert_eq!(row.primary_interest, 0.0);
                assert_eq!(row.financing(), 0.0);
            } else {
                assert_relative_eq!(row.primary_repayment, 32_500.0);
            }
        }
        assert_eq!(result.rows[19].primary_balance, 0.0);
    }

    #[test]
    fn test_primary_loan_fully_amortized() {
        let financial = FinancialParameters {
            investment: 123_456.78,
            loan_term_years: 17,
            ..Default::default()
        };
        let projector = AmortizationProjector::new(financial, EnergyParameters::default());
        let repaid: f64 = projector
            .project_detailed(1000.0)
            .rows
            .iter()
            .map(|r| r.primary_repayment)
            .sum();

        assert_relative_eq!(repaid, 123_456.78, epsilon = 1e-6);
    }

    #[test]
    fn test_interest_declines_linearly() {
        let result = default_projector().project_detailed(0.0);
        // Balance drops by 32500 each year, so interest drops by 975
        for pair in result.rows[..20].windows(2) {
            assert_relative_eq!(pair[0].primary_interest - pair[1].primary_interest, 975.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_refurbishment_schedule_and_duration() {
        let financial = FinancialParameters {
            refurbishment_interval_years: 15,
            refurbishment_term_years: 10,
            refurbishment_amount: 20_000.0,
            ..Default::default()
        };
        let projector = AmortizationProjector::new(financial, EnergyParameters::default());
        let result = projector.project_detailed(0.0);

        let paying_years: Vec<u32> = result
            .rows
            .iter()
            .filter(|r| r.refurbishment_repayment > 0.0)
            .map(|r| r.year)
            .collect();
        // Loans from years 16, 31 and 46; the last one is cut off by the horizon
        let expected: Vec<u32> = (16..=25).chain(31..=40).chain(46..=50).collect();
        assert_eq!(paying_years, expected);

        for row in &result.rows {
            if row.refurbishment_repayment > 0.0 {
                assert_relative_eq!(row.refurbishment_repayment, 2_000.0);
            }
        }
        // First refurbishment year: interest on the full 20000 at 3%
        assert_relative_eq!(result.rows[15].refurbishment_interest, 600.0, epsilon = 1e-9);
    }

    #[test]
    fn test_overlapping_refurbishment_loans() {
        let financial = FinancialParameters {
            refurbishment_interval_years: 5,
            refurbishment_term_years: 12,
            refurbishment_amount: 12_000.0,
            ..Default::default()
        };
        let projector = AmortizationProjector::new(financial, EnergyParameters::default());
        let result = projector.project_detailed(0.0);

        // Loans from years 6, 11 and 16 all run in year 16
        let row = &result.rows[15];
        assert_eq!(row.active_refurbishment_loans, 3);
        assert_relative_eq!(row.refurbishment_repayment, 3_000.0);

        // The year-6 loan's last payment is in year 17
        assert_eq!(result.rows[16].active_refurbishment_loans, 3);
        assert_eq!(result.rows[17].active_refurbishment_loans, 2);
    }

    #[test]
    fn test_interval_of_one_starts_in_year_two() {
        let financial = FinancialParameters {
            refurbishment_interval_years: 1,
            refurbishment_term_years: 1,
            refurbishment_amount: 1_000.0,
            ..Default::default()
        };
        let projector = AmortizationProjector::new(financial, EnergyParameters::default());
        let result = projector.project_detailed(0.0);

        assert_eq!(result.rows[0].refurbishment_repayment, 0.0);
        for row in &result.rows[1..] {
            assert_relative_eq!(row.refurbishment_repayment, 1_000.0);
        }
    }

    #[test]
    fn test_decomposed_sums_to_total() {
        let financial = FinancialParameters {
            investment: 400_000.0,
            loan_term_years: 33,
            interest_rate_pct: 4.7,
            refurbishment_interval_years: 7,
            refurbishment_amount: 35_000.0,
            refurbishment_term_years: 9,
            monthly_fixed_cost: 80.0,
        };
        let energy = EnergyParameters {
            unit_price: 0.2,
            inflation_pct: 3.3,
        };
        let projector = AmortizationProjector::new(financial, energy);
        let total = projector.project(150_000.0);
        let decomposed = projector.project_decomposed(150_000.0);

        assert_eq!(decomposed.financing.len(), 50);
        for (year, (sum, expected)) in decomposed.total().iter().zip(total.iter()).enumerate() {
            assert_abs_diff_eq!(sum, expected, epsilon = 1e-9);
            let f = decomposed.financing.values()[year];
            assert!(f >= 0.0);
        }
    }

    #[test]
    fn test_energy_price_inflates_after_billing() {
        let result = default_projector().project_detailed(1000.0);
        assert_relative_eq!(result.rows[0].unit_price, 0.12);
        assert_relative_eq!(result.rows[1].unit_price, 0.1224, epsilon = 1e-12);
        assert_relative_eq!(result.rows[0].energy, 120.0, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_investment_costs_nothing_to_finance() {
        let financial = FinancialParameters {
            investment: 0.0,
            ..Default::default()
        };
        let projector = AmortizationProjector::new(financial, EnergyParameters::default());
        let decomposed = projector.project_decomposed(1000.0);
        assert!(decomposed.financing.iter().all(|f| f == 0.0));
    }

    #[test]
    fn test_custom_horizon() {
        let series = default_projector().with_horizon(10).project(1000.0);
        assert_eq!(series.len(), 10);
    }

    #[test]
    fn test_summary_totals_over_horizon() {
        let summary = default_projector().project_detailed(200_000.0).summary();

        assert_eq!(summary.total_years, 50);
        // 3% on the 20 opening balances of 650000, 617500, ..., 32500
        assert_relative_eq!(summary.total_primary_interest, 0.03 * 32_500.0 * 210.0, epsilon = 1e-6);
        // Two full 10-year loans and the first five years of the one from year 46
        assert_relative_eq!(summary.total_refurbishment_interest, 3_300.0 + 3_300.0 + 2_400.0, epsilon = 1e-6);
        assert_relative_eq!(summary.total_refurbishment_repayment, 2.0 * 20_000.0 + 5.0 * 2_000.0, epsilon = 1e-6);
        assert_relative_eq!(summary.total_fixed, 60_000.0, epsilon = 1e-9);
        assert_relative_eq!(summary.final_unit_price, 0.12 * 1.02_f64.powi(49), max_relative = 1e-12);
        assert_relative_eq!(
            summary.total_cost,
            default_projector().project(200_000.0).total(),
            max_relative = 1e-12
        );
    }
}
