//! Output structures for cost projections

use serde::{Deserialize, Serialize};

/// Cost components of the heat-pump option for one year
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct YearBreakdown {
    /// Projection year (1-indexed)
    pub year: u32,

    /// Energy price used this year
    pub unit_price: f64,

    // Investment loan
    pub primary_repayment: f64,
    pub primary_interest: f64,
    /// Balance left after this year's repayment
    pub primary_balance: f64,

    // Running costs
    pub energy: f64,
    pub refurbishment_repayment: f64,
    pub refurbishment_interest: f64,
    /// Refurbishment loans that were charged this year
    pub active_refurbishment_loans: usize,
    pub fixed: f64,
}

impl YearBreakdown {
    /// Effective annual cost of the heat pump
    pub fn total(&self) -> f64 {
        self.financing() + self.heating()
    }

    /// Investment loan repayment and interest
    pub fn financing(&self) -> f64 {
        self.primary_repayment + self.primary_interest
    }

    /// Everything except the investment loan. Refurbishment loans are billed
    /// with the heating fee, not the financing fee.
    pub fn heating(&self) -> f64 {
        self.energy + self.refurbishment_repayment + self.refurbishment_interest + self.fixed
    }
}

/// Annual cost totals addressed by projection year (1-indexed)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CostSeries(Vec<f64>);

impl CostSeries {
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    /// Number of projected years
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Cost in `year` (1-indexed)
    pub fn year(&self, year: u32) -> Option<f64> {
        let idx = (year as usize).checked_sub(1)?;
        self.0.get(idx).copied()
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().copied()
    }

    /// Sum over the whole horizon
    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Running sum, year by year
    pub fn cumulative(&self) -> CostSeries {
        let mut running = 0.0;
        self.0
            .iter()
            .map(|cost| {
                running += cost;
                running
            })
            .collect()
    }
}

impl FromIterator<f64> for CostSeries {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Heat-pump costs split into the two monthly fee components
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecomposedSeries {
    /// Investment loan repayment and interest
    pub financing: CostSeries,

    /// Energy, refurbishment loans and fixed costs
    pub heating: CostSeries,
}

impl DecomposedSeries {
    /// Element-wise sum of both components
    pub fn total(&self) -> CostSeries {
        self.financing
            .iter()
            .zip(self.heating.iter())
            .map(|(financing, heating)| financing + heating)
            .collect()
    }
}

/// Complete heat-pump projection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Per-year breakdown rows
    pub rows: Vec<YearBreakdown>,
}

impl ProjectionResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_row(&mut self, row: YearBreakdown) {
        self.rows.push(row);
    }

    /// Total annual cost series
    pub fn totals(&self) -> CostSeries {
        self.rows.iter().map(YearBreakdown::total).collect()
    }

    /// Financing and heating series
    pub fn decomposed(&self) -> DecomposedSeries {
        DecomposedSeries {
            financing: self.rows.iter().map(YearBreakdown::financing).collect(),
            heating: self.rows.iter().map(YearBreakdown::heating).collect(),
        }
    }

    /// Get summary statistics
    pub fn summary(&self) -> ProjectionSummary {
        let sum = |f: fn(&YearBreakdown) -> f64| self.rows.iter().map(f).sum::<f64>();

        ProjectionSummary {
            total_years: self.rows.len() as u32,
            total_cost: sum(YearBreakdown::total),
            total_primary_interest: sum(|r| r.primary_interest),
            total_refurbishment_interest: sum(|r| r.refurbishment_interest),
            total_refurbishment_repayment: sum(|r| r.refurbishment_repayment),
            total_energy: sum(|r| r.energy),
            total_fixed: sum(|r| r.fixed),
            final_unit_price: self.rows.last().map(|r| r.unit_price).unwrap_or(0.0),
        }
    }
}

/// Horizon totals of a heat-pump projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub total_years: u32,
    pub total_cost: f64,
    pub total_primary_interest: f64,
    pub total_refurbishment_interest: f64,
    pub total_refurbishment_repayment: f64,
    pub total_energy: f64,
    pub total_fixed: f64,
    pub final_unit_price: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_series_is_one_indexed() {
        let series = CostSeries::new(vec![10.0, 20.0, 30.0]);
        assert_eq!(series.year(0), None);
        assert_eq!(series.year(1), Some(10.0));
        assert_eq!(series.year(3), Some(30.0));
        assert_eq!(series.year(4), None);
    }

    #[test]
    fn test_cumulative() {
        let series = CostSeries::new(vec![1.0, 2.0, 3.5]);
        assert_eq!(series.cumulative().values(), &[1.0, 3.0, 6.5]);
        assert_relative_eq!(series.total(), 6.5);
    }

    #[test]
    fn test_breakdown_split() {
        let row = YearBreakdown {
            year: 1,
            primary_repayment: 100.0,
            primary_interest: 10.0,
            energy: 50.0,
            refurbishment_repayment: 5.0,
            refurbishment_interest: 1.0,
            fixed: 12.0,
            ..Default::default()
        };
        assert_relative_eq!(row.financing(), 110.0);
        assert_relative_eq!(row.heating(), 68.0);
        assert_relative_eq!(row.total(), 178.0);
    }

    #[test]
    fn test_series_serializes_as_plain_array() {
        let json = serde_json::to_string(&CostSeries::new(vec![1.5, 2.0])).unwrap();
        assert_eq!(json, "[1.5,2.0]");
    }
}
