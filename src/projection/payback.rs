//! Simple payback of the heat-pump investment
//!
//! Savings are the reference cost minus the heat-pump cost, summed year by
//! year. No discounting is applied.

use super::cashflows::CostSeries;

/// Cumulative savings of the heat pump over the reference, by year.
/// Series of unequal length are compared over the shorter one.
pub fn cumulative_savings(reference: &CostSeries, primary: &CostSeries) -> CostSeries {
    let annual: CostSeries = reference
        .iter()
        .zip(primary.iter())
        .map(|(reference, primary)| reference - primary)
        .collect();
    annual.cumulative()
}

/// First year (1-indexed) in which cumulative savings reach `investment`.
///
/// Reaching the investment exactly counts. `None` means the investment is not
/// paid back within the horizon, which is a valid outcome rather than an
/// error.
pub fn payback_year(investment: f64, reference: &CostSeries, primary: &CostSeries) -> Option<u32> {
    cumulative_savings(reference, primary)
        .iter()
        .position(|saved| saved >= investment)
        .map(|idx| idx as u32 + 1)
}

/// Payback result with its display wording
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PaybackOutcome {
    pub year: Option<u32>,
    pub horizon_years: u32,
}

impl PaybackOutcome {
    pub fn is_paid_back(&self) -> bool {
        self.year.is_some()
    }
}

impl std::fmt::Display for PaybackOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.year {
            Some(1) => write!(f, "1 year"),
            Some(year) => write!(f, "{year} years"),
            None => write!(f, "no payback within {} years", self.horizon_years),
        }
    }
}
