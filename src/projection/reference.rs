//! District-heating reference cost projection

use super::cashflows::CostSeries;
use super::engine::HORIZON_YEARS;
use crate::parameters::ReferenceParameters;

/// Projects the annual cost of the reference heat source: consumption at an
/// inflating unit price, nothing else
#[derive(Debug, Clone)]
pub struct ReferenceCostProjector {
    params: ReferenceParameters,
    horizon_years: u32,
}

impl ReferenceCostProjector {
    pub fn new(params: ReferenceParameters) -> Self {
        Self {
            params,
            horizon_years: HORIZON_YEARS,
        }
    }

    /// Convenience constructor from a bare price and inflation rate
    pub fn from_price(unit_price: f64, inflation_pct: f64) -> Self {
        Self::new(ReferenceParameters {
            unit_price,
            inflation_pct,
        })
    }

    pub fn with_horizon(mut self, horizon_years: u32) -> Self {
        self.horizon_years = horizon_years;
        self
    }

    /// Annual cost series; year 1 is billed at the starting price
    pub fn project(&self, annual_consumption: f64) -> CostSeries {
        let growth = self.params.growth_factor();
        let mut price = self.params.unit_price;

        (0..self.horizon_years)
            .map(|_| {
                let cost = price * annual_consumption;
                price *= growth;
                cost
            })
            .collect()
    }
}
