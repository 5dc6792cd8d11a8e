//! Level-payment loan and EMI schedules

use chrono::{Months, NaiveDate};
use log::debug;
use serde::{Deserialize, Serialize};

use super::schedule::{PeriodEntry, ScheduleResult};
use super::stepping::{level_payment, Amortizer, PaymentPolicy};
use crate::error::{check, ValidationError};
use crate::rounding::monthly_rate;

/// Longest loan term accepted by `validate`
pub const MAX_TERM_MONTHS: u32 = 600;

/// Inputs for a fixed-payment loan (also used for EMI)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanInput {
    pub principal: f64,
    pub annual_rate_percent: f64,
    pub term_months: u32,
    /// Due date of the first payment
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
}

impl LoanInput {
    pub fn new(principal: f64, annual_rate_percent: f64, term_months: u32) -> Self {
        Self {
            principal,
            annual_rate_percent,
            term_months,
            start_date: None,
        }
    }

    /// Loan with a term quoted in years
    pub fn from_years(principal: f64, annual_rate_percent: f64, term_years: u32) -> Self {
        Self::new(principal, annual_rate_percent, term_years.saturating_mul(12))
    }

    pub fn starting(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        check::amount("principal", self.principal)?;
        check::rate("annual_rate_percent", self.annual_rate_percent, 100.0)?;
        check::periods("term_months", self.term_months, MAX_TERM_MONTHS)
    }
}

/// Due date of a 1-indexed period
pub(crate) fn due_date(start: Option<NaiveDate>, period: u32) -> Option<NaiveDate> {
    start.and_then(|d| d.checked_add_months(Months::new(period - 1)))
}

/// Monthly payment for a loan
pub fn monthly_payment(input: &LoanInput) -> f64 {
    level_payment(
        input.principal,
        monthly_rate(input.annual_rate_percent),
        input.term_months,
    )
}

/// Generate the full level-payment schedule
pub fn amortize(input: &LoanInput) -> ScheduleResult {
    let rate = monthly_rate(input.annual_rate_percent);
    let payment = level_payment(input.principal, rate, input.term_months);

    let entries: Vec<PeriodEntry> = Amortizer::with_term(
        input.principal,
        rate,
        PaymentPolicy::Level { payment },
        input.term_months,
    )
    .map(|step| PeriodEntry {
        period: step.period,
        payment_date: due_date(input.start_date, step.period),
        payment: step.payment,
        principal: step.principal,
        interest: step.interest,
        balance: step.balance,
    })
    .collect();

    let result = ScheduleResult::from_entries(payment, entries);
    debug!(
        "amortized {:.2} over {} months: payment {:.2}, interest {:.2}",
        input.principal, input.term_months, payment, result.total_interest
    );
    result
}
