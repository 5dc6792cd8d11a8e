//! CSV-based tax table loader
//!
//! Loads a tax year from `brackets.csv` and `filing_parameters.csv` in a directory.

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use log::info;
use serde::Deserialize;

use super::tables::{Bracket, FilingParameters, FilingStatus, PayrollParameters, TaxTables};
use crate::error::TableError;

/// Raw row of brackets.csv
#[derive(Debug, Deserialize)]
struct BracketRow {
    filing_status: String,
    lower_bound: f64,
    upper_bound: Option<f64>,
    rate_percent: f64,
}

/// Raw row of filing_parameters.csv
#[derive(Debug, Deserialize)]
struct FilingRow {
    filing_status: String,
    standard_deduction: f64,
    additional_medicare_threshold: f64,
}

/// Load bracket rows grouped by filing status
pub fn load_brackets(path: &Path) -> Result<HashMap<FilingStatus, Vec<Bracket>>, TableError> {
    let file = File::open(path.join("brackets.csv"))?;
    let mut reader = csv::Reader::from_reader(file);

    let mut brackets: HashMap<FilingStatus, Vec<Bracket>> = HashMap::new();
    for result in reader.deserialize() {
        let row: BracketRow = result?;
        let status: FilingStatus = row.filing_status.parse()?;
        brackets.entry(status).or_default().push(Bracket {
            lower_bound: row.lower_bound,
            upper_bound: row.upper_bound,
            rate_percent: row.rate_percent,
        });
    }

    Ok(brackets)
}

/// Load standard deductions and surtax thresholds by filing status
pub fn load_filing_parameters(
    path: &Path,
) -> Result<HashMap<FilingStatus, FilingParameters>, TableError> {
    let file = File::open(path.join("filing_parameters.csv"))?;
    let mut reader = csv::Reader::from_reader(file);

    let mut params = HashMap::new();
    for result in reader.deserialize() {
        let row: FilingRow = result?;
        let status: FilingStatus = row.filing_status.parse()?;
        params.insert(
            status,
            FilingParameters {
                standard_deduction: row.standard_deduction,
                additional_medicare_threshold: row.additional_medicare_threshold,
            },
        );
    }

    Ok(params)
}

impl TaxTables {
    /// Load tables from CSV files in a directory, keeping default payroll parameters
    pub fn load_from(path: &Path) -> Result<Self, TableError> {
        let brackets = load_brackets(path)?;
        let filing = load_filing_parameters(path)?;
        let tables = TaxTables::new(brackets, filing, PayrollParameters::default())?;
        info!("Loaded tax tables from {}", path.display());
        Ok(tables)
    }
}
