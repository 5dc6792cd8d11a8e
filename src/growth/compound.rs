//! Lump-sum compounding: compound interest and fixed deposits

use log::debug;
use serde::{Deserialize, Serialize};

use super::{GrowthPeriod, MAX_GROWTH_YEARS};
use crate::error::{check, ValidationError};
use crate::frequency::CompoundingFrequency;
use crate::rounding::{percent_to_decimal, round2};

/// Value of a lump sum after `years` of compounding
pub fn compound_value(
    principal: f64,
    annual_rate: f64,
    frequency: CompoundingFrequency,
    years: f64,
) -> f64 {
    let n = frequency.periods_per_year() as f64;
    principal * (1.0 + annual_rate / n).powf(n * years)
}

/// Value of a lump sum under simple interest
pub fn simple_value(principal: f64, annual_rate: f64, years: f64) -> f64 {
    principal + principal * annual_rate * years
}

/// Inputs for a compound interest projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundInput {
    pub principal: f64,
    pub annual_rate_percent: f64,
    pub years: u32,
    #[serde(default)]
    pub frequency: CompoundingFrequency,
}

impl CompoundInput {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check::amount("principal", self.principal)?;
        check::rate("annual_rate_percent", self.annual_rate_percent, 100.0)?;
        check::periods("years", self.years, MAX_GROWTH_YEARS)
    }
}

/// Result of a lump-sum projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundResult {
    pub principal: f64,
    pub final_amount: f64,
    pub total_interest: f64,
    pub breakdown: Vec<GrowthPeriod>,
}

/// Project a lump sum with periodic compounding
///
/// Each breakdown row is evaluated from the closed form at its year boundary,
/// so rows never inherit rounding from the row before.
pub fn compound_interest(input: &CompoundInput) -> CompoundResult {
    let rate = percent_to_decimal(input.annual_rate_percent);

    let breakdown: Vec<GrowthPeriod> = (1..=input.years)
        .map(|year| {
            let value = compound_value(input.principal, rate, input.frequency, year as f64);
            GrowthPeriod::lump_sum(year, input.principal, value)
        })
        .collect();

    let final_amount = compound_value(input.principal, rate, input.frequency, input.years as f64);
    debug!(
        "compounded {:.2} at {}% {} for {} years: {:.2}",
        input.principal, input.annual_rate_percent, input.frequency, input.years, final_amount
    );

    CompoundResult {
        principal: round2(input.principal),
        final_amount: round2(final_amount),
        total_interest: round2(final_amount - input.principal),
        breakdown,
    }
}

/// Inputs for a fixed deposit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedDepositInput {
    pub principal: f64,
    pub annual_rate_percent: f64,
    pub tenure_months: u32,
    #[serde(default = "default_fd_frequency")]
    pub frequency: CompoundingFrequency,
}

fn default_fd_frequency() -> CompoundingFrequency {
    CompoundingFrequency::Quarterly
}

impl FixedDepositInput {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check::amount("principal", self.principal)?;
        check::rate("annual_rate_percent", self.annual_rate_percent, 100.0)?;
        check::periods(
            "tenure_months",
            self.tenure_months,
            MAX_GROWTH_YEARS * 12,
        )
    }
}

/// Fixed deposit maturity with the simple-interest comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedDepositResult {
    pub principal: f64,
    pub maturity_amount: f64,
    pub interest_earned: f64,

    /// Maturity under simple interest for the same rate and tenure
    pub simple_maturity_amount: f64,
    pub simple_interest_earned: f64,

    /// Extra earned by compounding over simple interest
    pub compounding_benefit: f64,

    /// Rows at each year boundary, plus the final partial year if any
    pub breakdown: Vec<GrowthPeriod>,
}

/// Project a fixed deposit
pub fn fixed_deposit(input: &FixedDepositInput) -> FixedDepositResult {
    let rate = percent_to_decimal(input.annual_rate_percent);
    let years = input.tenure_months as f64 / 12.0;

    let mut boundaries: Vec<u32> = (12..=input.tenure_months).step_by(12).collect();
    if input.tenure_months % 12 != 0 {
        boundaries.push(input.tenure_months);
    }

    let breakdown = boundaries
        .iter()
        .enumerate()
        .map(|(idx, &months)| {
            let value = compound_value(input.principal, rate, input.frequency, months as f64 / 12.0);
            GrowthPeriod::lump_sum(idx as u32 + 1, input.principal, value)
        })
        .collect();

    let maturity = compound_value(input.principal, rate, input.frequency, years);
    let simple = simple_value(input.principal, rate, years);

    FixedDepositResult {
        principal: round2(input.principal),
        maturity_amount: round2(maturity),
        interest_earned: round2(maturity - input.principal),
        simple_maturity_amount: round2(simple),
        simple_interest_earned: round2(simple - input.principal),
        compounding_benefit: round2(maturity - simple),
        breakdown,
    }
}
