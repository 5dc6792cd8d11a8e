//! Systematic periodic investment (annuity-due) projections

use log::debug;
use serde::{Deserialize, Serialize};

use super::{GrowthPeriod, MAX_GROWTH_YEARS};
use crate::error::{check, ValidationError};
use crate::rounding::{monthly_rate, round2};

/// Future value of `periods` contributions made at the start of each period
pub fn annuity_due_value(contribution: f64, periodic_rate: f64, periods: u32) -> f64 {
    if periodic_rate == 0.0 {
        return contribution * periods as f64;
    }
    let growth = (1.0 + periodic_rate).powi(periods as i32);
    contribution * (growth - 1.0) / periodic_rate * (1.0 + periodic_rate)
}

/// Inputs for a monthly investment plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodicInvestmentInput {
    pub monthly_contribution: f64,
    pub annual_rate_percent: f64,
    pub years: u32,
}

impl PeriodicInvestmentInput {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check::amount("monthly_contribution", self.monthly_contribution)?;
        check::rate("annual_rate_percent", self.annual_rate_percent, 100.0)?;
        check::periods("years", self.years, MAX_GROWTH_YEARS)
    }
}

/// Result of a periodic investment projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodicInvestmentResult {
    pub total_invested: f64,
    pub maturity_value: f64,
    pub estimated_returns: f64,
    pub breakdown: Vec<GrowthPeriod>,
}

/// Project a monthly investment plan
pub fn periodic_investment(input: &PeriodicInvestmentInput) -> PeriodicInvestmentResult {
    let rate = monthly_rate(input.annual_rate_percent);
    let yearly_contribution = input.monthly_contribution * 12.0;

    let breakdown: Vec<GrowthPeriod> = (1..=input.years)
        .map(|year| {
            let months = year.saturating_mul(12);
            let value = annuity_due_value(input.monthly_contribution, rate, months);
            GrowthPeriod::contributions(
                year,
                yearly_contribution,
                yearly_contribution * year as f64,
                value,
            )
        })
        .collect();

    let months = input.years.saturating_mul(12);
    let maturity = annuity_due_value(input.monthly_contribution, rate, months);
    let invested = input.monthly_contribution * months as f64;
    debug!(
        "periodic investment of {:.2}/month for {} months: {:.2}",
        input.monthly_contribution, months, maturity
    );

    PeriodicInvestmentResult {
        total_invested: round2(invested),
        maturity_value: round2(maturity),
        estimated_returns: round2(maturity - invested),
        breakdown,
    }
}
