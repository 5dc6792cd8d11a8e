//! Federal bracket tables, standard deductions and payroll parameters

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::TableError;

/// Filing status of the taxpayer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilingStatus {
    Single,
    MarriedJoint,
    MarriedSeparate,
    HeadOfHousehold,
}

impl FilingStatus {
    pub const ALL: [FilingStatus; 4] = [
        FilingStatus::Single,
        FilingStatus::MarriedJoint,
        FilingStatus::MarriedSeparate,
        FilingStatus::HeadOfHousehold,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilingStatus::Single => "single",
            FilingStatus::MarriedJoint => "married_joint",
            FilingStatus::MarriedSeparate => "married_separate",
            FilingStatus::HeadOfHousehold => "head_of_household",
        }
    }
}

impl fmt::Display for FilingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilingStatus {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "single" => Ok(FilingStatus::Single),
            "married_joint" | "mfj" => Ok(FilingStatus::MarriedJoint),
            "married_separate" | "mfs" => Ok(FilingStatus::MarriedSeparate),
            "head_of_household" | "hoh" => Ok(FilingStatus::HeadOfHousehold),
            _ => Err(TableError::UnknownFilingStatus(s.to_string())),
        }
    }
}

/// One marginal bracket
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bracket {
    pub lower_bound: f64,
    /// None for the top bracket
    pub upper_bound: Option<f64>,
    pub rate_percent: f64,
}

impl Bracket {
    fn new(lower_bound: f64, upper_bound: Option<f64>, rate_percent: f64) -> Self {
        Self {
            lower_bound,
            upper_bound,
            rate_percent,
        }
    }
}

/// Status-dependent parameters outside the bracket table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilingParameters {
    pub standard_deduction: f64,
    /// Wages above this pay the additional Medicare surtax
    pub additional_medicare_threshold: f64,
}

/// Payroll (FICA) parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PayrollParameters {
    pub social_security_rate_percent: f64,
    pub social_security_wage_base: f64,
    pub medicare_rate_percent: f64,
    pub additional_medicare_rate_percent: f64,
}

impl Default for PayrollParameters {
    fn default() -> Self {
        Self {
            social_security_rate_percent: 6.2,
            social_security_wage_base: 168_600.0,
            medicare_rate_percent: 1.45,
            additional_medicare_rate_percent: 0.9,
        }
    }
}

/// Container for all tax year parameters
#[derive(Debug, Clone)]
pub struct TaxTables {
    brackets: HashMap<FilingStatus, Vec<Bracket>>,
    filing: HashMap<FilingStatus, FilingParameters>,
    pub payroll: PayrollParameters,
}

impl TaxTables {
    /// Build tables after checking every status has contiguous brackets
    pub fn new(
        brackets: HashMap<FilingStatus, Vec<Bracket>>,
        filing: HashMap<FilingStatus, FilingParameters>,
        payroll: PayrollParameters,
    ) -> Result<Self, TableError> {
        let mut brackets = brackets;
        for status in FilingStatus::ALL {
            let table = brackets
                .get_mut(&status)
                .ok_or_else(|| TableError::MissingBrackets(status.to_string()))?;
            table.sort_by(|a, b| a.lower_bound.total_cmp(&b.lower_bound));
            check_contiguous(status, table)?;
            if !filing.contains_key(&status) {
                return Err(TableError::MissingParameters(status.to_string()));
            }
        }

        Ok(Self {
            brackets,
            filing,
            payroll,
        })
    }

    /// 2024 federal tables
    pub fn default_2024() -> Self {
        let mut brackets = HashMap::new();
        brackets.insert(
            FilingStatus::Single,
            ladder(&[11_600.0, 47_150.0, 100_525.0, 191_950.0, 243_725.0, 609_350.0]),
        );
        brackets.insert(
            FilingStatus::MarriedJoint,
            ladder(&[23_200.0, 94_300.0, 201_050.0, 383_900.0, 487_450.0, 731_200.0]),
        );
        brackets.insert(
            FilingStatus::MarriedSeparate,
            ladder(&[11_600.0, 47_150.0, 100_525.0, 191_950.0, 243_725.0, 365_600.0]),
        );
        brackets.insert(
            FilingStatus::HeadOfHousehold,
            ladder(&[16_550.0, 63_100.0, 100_500.0, 191_950.0, 243_700.0, 609_350.0]),
        );

        let mut filing = HashMap::new();
        filing.insert(FilingStatus::Single, filing_params(14_600.0, 200_000.0));
        filing.insert(FilingStatus::MarriedJoint, filing_params(29_200.0, 250_000.0));
        filing.insert(FilingStatus::MarriedSeparate, filing_params(14_600.0, 125_000.0));
        filing.insert(FilingStatus::HeadOfHousehold, filing_params(21_900.0, 200_000.0));

        Self {
            brackets,
            filing,
            payroll: PayrollParameters::default(),
        }
    }

    /// Ordered brackets for a filing status
    pub fn brackets(&self, status: FilingStatus) -> &[Bracket] {
        self.brackets.get(&status).map(|b| b.as_slice()).unwrap_or(&[])
    }

    pub fn standard_deduction(&self, status: FilingStatus) -> f64 {
        self.filing
            .get(&status)
            .map(|p| p.standard_deduction)
            .unwrap_or(0.0)
    }

    pub fn additional_medicare_threshold(&self, status: FilingStatus) -> f64 {
        self.filing
            .get(&status)
            .map(|p| p.additional_medicare_threshold)
            .unwrap_or(f64::INFINITY)
    }
}

impl Default for TaxTables {
    fn default() -> Self {
        Self::default_2024()
    }
}

/// Federal marginal rates shared by every 2024 table
const RATES_2024: [f64; 7] = [10.0, 12.0, 22.0, 24.0, 32.0, 35.0, 37.0];

fn ladder(upper_bounds: &[f64; 6]) -> Vec<Bracket> {
    let mut lower = 0.0;
    let mut brackets = Vec::with_capacity(RATES_2024.len());
    for (i, &rate) in RATES_2024.iter().enumerate() {
        let upper = upper_bounds.get(i).copied();
        brackets.push(Bracket::new(lower, upper, rate));
        lower = upper.unwrap_or(lower);
    }
    brackets
}

fn filing_params(standard_deduction: f64, additional_medicare_threshold: f64) -> FilingParameters {
    FilingParameters {
        standard_deduction,
        additional_medicare_threshold,
    }
}

/// Brackets must start at zero, chain upper to lower, and only the last may be open
fn check_contiguous(status: FilingStatus, table: &[Bracket]) -> Result<(), TableError> {
    if table.is_empty() {
        return Err(TableError::MissingBrackets(status.to_string()));
    }
    let mut expected_lower = 0.0;
    for (i, bracket) in table.iter().enumerate() {
        if bracket.lower_bound != expected_lower {
            return Err(TableError::NonContiguous {
                status: status.to_string(),
                bound: bracket.lower_bound,
            });
        }
        match bracket.upper_bound {
            Some(_) if i + 1 == table.len() => {
                return Err(TableError::BoundedTop(status.to_string()))
            }
            Some(upper) if upper > bracket.lower_bound => expected_lower = upper,
            Some(upper) => {
                return Err(TableError::NonContiguous {
                    status: status.to_string(),
                    bound: upper,
                })
            }
            None if i + 1 == table.len() => {}
            None => return Err(TableError::UnboundedBeforeTop(status.to_string())),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tables_are_contiguous() {
        let tables = TaxTables::default_2024();
        for status in FilingStatus::ALL {
            let table = tables.brackets(status);
            assert_eq!(table.len(), 7);
            assert!(check_contiguous(status, table).is_ok());
            assert_eq!(table.last().unwrap().upper_bound, None);
        }
    }

    #[test]
    fn test_rebuild_default_tables() {
        let defaults = TaxTables::default_2024();
        let rebuilt = TaxTables::new(
            defaults.brackets.clone(),
            defaults.filing.clone(),
            defaults.payroll,
        )
        .unwrap();
        assert_eq!(rebuilt.standard_deduction(FilingStatus::HeadOfHousehold), 21_900.0);
    }

    #[test]
    fn test_gap_rejected() {
        let table = vec![
            Bracket::new(0.0, Some(10_000.0), 10.0),
            Bracket::new(12_000.0, None, 20.0),
        ];
        assert!(matches!(
            check_contiguous(FilingStatus::Single, &table),
            Err(TableError::NonContiguous { .. })
        ));
    }

    #[test]
    fn test_open_bracket_must_be_last() {
        let table = vec![
            Bracket::new(0.0, None, 10.0),
            Bracket::new(10_000.0, None, 20.0),
        ];
        assert!(matches!(
            check_contiguous(FilingStatus::Single, &table),
            Err(TableError::UnboundedBeforeTop(_))
        ));
    }

    #[test]
    fn test_top_bracket_must_be_open() {
        let table = vec![
            Bracket::new(0.0, Some(10_000.0), 10.0),
            Bracket::new(10_000.0, Some(50_000.0), 20.0),
        ];
        assert!(matches!(
            check_contiguous(FilingStatus::Single, &table),
            Err(TableError::BoundedTop(_))
        ));
        assert!(matches!(
            check_contiguous(FilingStatus::Single, &[]),
            Err(TableError::MissingBrackets(_))
        ));
    }

    #[test]
    fn test_parse_filing_status() {
        assert_eq!("head-of-household".parse::<FilingStatus>().unwrap(), FilingStatus::HeadOfHousehold);
        assert_eq!("MFJ".parse::<FilingStatus>().unwrap(), FilingStatus::MarriedJoint);
        assert!("widowed".parse::<FilingStatus>().is_err());
    }
}
