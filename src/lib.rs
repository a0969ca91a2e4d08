//! Heating Comparison - 50-year cost comparison of a ground-source heat pump against district heating
//!
//! This library provides:
//! - Linear amortization of the investment loan and recurring refurbishment loans
//! - Heat-pump and district-heating annual cost projections with price inflation
//! - Simple payback analysis
//! - Three-scenario comparison runs and report tables

pub mod error;
pub mod parameters;
pub mod projection;
pub mod report;
pub mod scenario;

// Re-export commonly used types
pub use error::{Error, InputError};
pub use parameters::{ComparisonInputs, EnergyParameters, FinancialParameters, ReferenceParameters, Scenario};
pub use projection::{AmortizationProjector, CostSeries, DecomposedSeries, ReferenceCostProjector, payback_year};
pub use report::{ComparisonReport, FeeTable};
pub use scenario::{ComparisonResult, ScenarioResult, ScenarioRunner};
