//! Growth projection engine: compound interest, fixed deposits and periodic investment

mod compound;
mod periodic;

pub use compound::{
    compound_interest, compound_value, fixed_deposit, simple_value, CompoundInput,
    CompoundResult, FixedDepositInput, FixedDepositResult,
};
pub use periodic::{
    annuity_due_value, periodic_investment, PeriodicInvestmentInput, PeriodicInvestmentResult,
};

use serde::{Deserialize, Serialize};

use crate::rounding::round2;

/// Longest growth horizon accepted by `validate`, in years
pub const MAX_GROWTH_YEARS: u32 = 100;

/// One year boundary of a growth projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthPeriod {
    /// Year index (1-indexed)
    pub year: u32,

    /// New money added during this year
    pub contribution: f64,

    /// Cumulative money invested
    pub invested: f64,

    /// Cumulative returns (value - invested)
    pub returns: f64,

    /// Value at the end of the year
    pub value: f64,
}

impl GrowthPeriod {
    fn lump_sum(year: u32, principal: f64, value: f64) -> Self {
        let contribution = if year == 1 { principal } else { 0.0 };
        Self::contributions(year, contribution, principal, value)
    }

    fn contributions(year: u32, contribution: f64, invested: f64, value: f64) -> Self {
        Self {
            year,
            contribution: round2(contribution),
            invested: round2(invested),
            returns: round2(value - invested),
            value: round2(value),
        }
    }
}
