//! Parameter file loading
//!
//! Two formats are accepted: a JSON document shaped like [`ComparisonInputs`]
//! (missing fields fall back to defaults), or a two-column `parameter,value`
//! CSV whose rows override the defaults one by one.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::ComparisonInputs;
use crate::error::{InputError, Result};

/// Default parameter file looked up by the CLI
pub const DEFAULT_PARAMETERS_PATH: &str = "data/parameters.csv";

/// Parameter names understood in CSV files, in report order
pub const PARAMETER_NAMES: [&str; 16] = [
    "consumption_a_mwh",
    "consumption_b_mwh",
    "consumption_c_mwh",
    "scop",
    "electricity_price",
    "electricity_inflation_pct",
    "investment",
    "loan_term_years",
    "interest_rate_pct",
    "refurbishment_interval_years",
    "refurbishment_amount",
    "refurbishment_term_years",
    "monthly_fixed_cost",
    "district_heating_price",
    "district_heating_inflation_pct",
    "floor_area_m2",
];

/// Load inputs from a `.json` or `.csv` file, chosen by extension
pub fn load_inputs<P: AsRef<Path>>(path: P) -> Result<ComparisonInputs> {
    let path = path.as_ref();
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        load_inputs_json(path)
    } else {
        load_inputs_csv(path)
    }
}

/// Load inputs from a JSON file
pub fn load_inputs_json<P: AsRef<Path>>(path: P) -> Result<ComparisonInputs> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(file)?)
}

/// Load inputs from a `parameter,value` CSV file
pub fn load_inputs_csv<P: AsRef<Path>>(path: P) -> Result<ComparisonInputs> {
    let file = File::open(path)?;
    load_inputs_csv_from_reader(file)
}

/// Load inputs from any reader holding `parameter,value` CSV rows
pub fn load_inputs_csv_from_reader<R: Read>(reader: R) -> Result<ComparisonInputs> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader);
    let mut inputs = ComparisonInputs::default();

    for result in csv_reader.records() {
        let record = result?;
        let name = record.get(0).unwrap_or_default();
        let value = record.get(1).unwrap_or_default();
        inputs.set_parameter(name, value)?;
    }

    Ok(inputs)
}

impl ComparisonInputs {
    /// Override a single parameter by its CSV name
    pub fn set_parameter(&mut self, name: &str, value: &str) -> std::result::Result<(), InputError> {
        match name {
            "consumption_a_mwh" => self.consumption_mwh[0] = parse(name, value)?,
            "consumption_b_mwh" => self.consumption_mwh[1] = parse(name, value)?,
            "consumption_c_mwh" => self.consumption_mwh[2] = parse(name, value)?,
            "scop" => self.scop = parse(name, value)?,
            "electricity_price" => self.electricity.unit_price = parse(name, value)?,
            "electricity_inflation_pct" => self.electricity.inflation_pct = parse(name, value)?,
            "investment" => self.financial.investment = parse(name, value)?,
            "loan_term_years" => self.financial.loan_term_years = parse(name, value)?,
            "interest_rate_pct" => self.financial.interest_rate_pct = parse(name, value)?,
            "refurbishment_interval_years" => {
                self.financial.refurbishment_interval_years = parse(name, value)?
            }
            "refurbishment_amount" => self.financial.refurbishment_amount = parse(name, value)?,
            "refurbishment_term_years" => {
                self.financial.refurbishment_term_years = parse(name, value)?
            }
            "monthly_fixed_cost" => self.financial.monthly_fixed_cost = parse(name, value)?,
            "district_heating_price" => self.district_heating.unit_price = parse(name, value)?,
            "district_heating_inflation_pct" => {
                self.district_heating.inflation_pct = parse(name, value)?
            }
            "floor_area_m2" => self.floor_area_m2 = parse(name, value)?,
            other => return Err(InputError::UnknownParameter(other.to_string())),
        }
        Ok(())
    }
}

fn parse<T: std::str::FromStr>(name: &str, value: &str) -> std::result::Result<T, InputError> {
    value.parse().map_err(|_| InputError::InvalidValue {
        name: name.to_string(),
        value: value.to_string(),
    })
}
