//! Calculator defaults passed explicitly into each invocation
//!
//! The surrounding application seeds its forms with default values. Here they
//! are a plain value, loadable from JSON, that callers merge with whatever the
//! user supplied.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::frequency::CompoundingFrequency;
use crate::tax::FilingStatus;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoanDefaults {
    pub principal: f64,
    pub annual_rate_percent: f64,
    pub term_months: u32,
}

impl Default for LoanDefaults {
    fn default() -> Self {
        Self {
            principal: 100_000.0,
            annual_rate_percent: 10.0,
            term_months: 12,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MortgageDefaults {
    pub home_price: f64,
    pub down_payment_percent: f64,
    pub annual_rate_percent: f64,
    pub term_years: u32,
    pub property_tax_annual: f64,
    pub insurance_annual: f64,
    pub hoa_monthly: f64,
    pub pmi_rate_percent: f64,
}

impl Default for MortgageDefaults {
    fn default() -> Self {
        Self {
            home_price: 400_000.0,
            down_payment_percent: 20.0,
            annual_rate_percent: 6.5,
            term_years: 30,
            property_tax_annual: 4_800.0,
            insurance_annual: 1_200.0,
            hoa_monthly: 0.0,
            pmi_rate_percent: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthDefaults {
    pub principal: f64,
    pub annual_rate_percent: f64,
    pub years: u32,
    pub frequency: CompoundingFrequency,
    pub monthly_contribution: f64,
    pub deposit_tenure_months: u32,
}

impl Default for GrowthDefaults {
    fn default() -> Self {
        Self {
            principal: 10_000.0,
            annual_rate_percent: 8.0,
            years: 10,
            frequency: CompoundingFrequency::Annually,
            monthly_contribution: 5_000.0,
            deposit_tenure_months: 60,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxDefaults {
    pub gross_income: f64,
    pub filing_status: FilingStatus,
    pub state_tax_rate_percent: f64,
}

impl Default for TaxDefaults {
    fn default() -> Self {
        Self {
            gross_income: 75_000.0,
            filing_status: FilingStatus::Single,
            state_tax_rate_percent: 5.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetirementDefaults {
    pub current_age: u32,
    pub retirement_age: u32,
    pub current_savings: f64,
    pub monthly_contribution: f64,
    pub expected_return_percent: f64,
    pub inflation_percent: f64,
    pub desired_monthly_income: f64,
}

impl Default for RetirementDefaults {
    fn default() -> Self {
        Self {
            current_age: 30,
            retirement_age: 65,
            current_savings: 50_000.0,
            monthly_contribution: 1_000.0,
            expected_return_percent: 8.0,
            inflation_percent: 3.0,
            desired_monthly_income: 5_000.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayoffDefaults {
    pub balance: f64,
    pub annual_rate_percent: f64,
    pub minimum_payment: f64,
    pub extra_payment: f64,
}

impl Default for PayoffDefaults {
    fn default() -> Self {
        Self {
            balance: 10_000.0,
            annual_rate_percent: 18.0,
            minimum_payment: 250.0,
            extra_payment: 100.0,
        }
    }
}

/// Default inputs for every calculator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorDefaults {
    pub loan: LoanDefaults,
    pub mortgage: MortgageDefaults,
    pub growth: GrowthDefaults,
    pub tax: TaxDefaults,
    pub retirement: RetirementDefaults,
    pub payoff: PayoffDefaults,
}

impl CalculatorDefaults {
    /// Load defaults from a JSON file; missing keys keep their built-in values
    pub fn from_json_path(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override() {
        let defaults = CalculatorDefaults::from_json_str(
            r#"{ "loan": { "principal": 25000 }, "tax": { "filing_status": "married_joint" } }"#,
        )
        .unwrap();

        assert_eq!(defaults.loan.principal, 25_000.0);
        assert_eq!(defaults.loan.term_months, 12);
        assert_eq!(defaults.tax.filing_status, FilingStatus::MarriedJoint);
        assert_eq!(defaults.retirement, RetirementDefaults::default());
    }

    #[test]
    fn test_empty_object_is_default() {
        let defaults = CalculatorDefaults::from_json_str("{}").unwrap();
        assert_eq!(defaults, CalculatorDefaults::default());
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            CalculatorDefaults::from_json_str("{ loan: 1 }"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("defaults.json");
        fs::write(&path, r#"{ "growth": { "frequency": "quarterly" } }"#).unwrap();

        let defaults = CalculatorDefaults::from_json_path(&path).unwrap();
        assert_eq!(defaults.growth.frequency, CompoundingFrequency::Quarterly);
    }
}
