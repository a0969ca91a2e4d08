//! Cost projections for the heat pump and the district-heating reference

mod state;
mod engine;
mod cashflows;
mod reference;
mod payback;

pub use state::{Loan, LoanPayment, ProjectionState};
pub use engine::{AmortizationProjector, HORIZON_YEARS};
pub use cashflows::{CostSeries, DecomposedSeries, ProjectionResult, ProjectionSummary, YearBreakdown};
pub use reference::ReferenceCostProjector;
pub use payback::{cumulative_savings, payback_year, PaybackOutcome};
