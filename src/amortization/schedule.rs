//! Schedule output structures for amortization runs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::rounding::round2;

/// A single row of an amortization schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodEntry {
    /// Period index (1-indexed, contiguous)
    pub period: u32,

    /// Calendar due date, when the input carried a start date
    pub payment_date: Option<NaiveDate>,

    /// Amount paid this period (principal + interest)
    pub payment: f64,
    pub principal: f64,
    pub interest: f64,

    /// Balance after this period's payment
    pub balance: f64,
}

/// Complete amortization result
///
/// Entries keep full precision so they can be summed and charted without
/// accumulating rounding error; totals are rounded to cents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleResult {
    /// Scheduled level payment per period
    pub periodic_payment: f64,

    pub total_paid: f64,
    pub total_interest: f64,
    pub total_principal: f64,
    pub final_balance: f64,

    /// Per-period rows
    pub entries: Vec<PeriodEntry>,
}

impl ScheduleResult {
    /// Build totals from the rows
    pub fn from_entries(periodic_payment: f64, entries: Vec<PeriodEntry>) -> Self {
        let total_paid: f64 = entries.iter().map(|e| e.payment).sum();
        let total_interest: f64 = entries.iter().map(|e| e.interest).sum();
        let total_principal: f64 = entries.iter().map(|e| e.principal).sum();
        let final_balance = entries.last().map(|e| e.balance).unwrap_or(0.0);

        Self {
            periodic_payment,
            total_paid: round2(total_paid),
            total_interest: round2(total_interest),
            total_principal: round2(total_principal),
            final_balance: round2(final_balance),
            entries,
        }
    }

    /// Number of periods in the schedule
    pub fn periods(&self) -> u32 {
        self.entries.len() as u32
    }

    /// Interest as a share of everything paid, in percent
    pub fn interest_share_percent(&self) -> f64 {
        if self.total_paid <= 0.0 {
            0.0
        } else {
            round2(self.total_interest / self.total_paid * 100.0)
        }
    }

    /// Roll monthly rows up into 12-period years
    pub fn yearly_summary(&self) -> Vec<YearSummary> {
        self.entries
            .chunks(12)
            .enumerate()
            .map(|(idx, chunk)| YearSummary {
                year: idx as u32 + 1,
                payment: round2(chunk.iter().map(|e| e.payment).sum()),
                principal: round2(chunk.iter().map(|e| e.principal).sum()),
                interest: round2(chunk.iter().map(|e| e.interest).sum()),
                closing_balance: round2(chunk.last().map(|e| e.balance).unwrap_or(0.0)),
            })
            .collect()
    }
}

/// Per-year totals of a monthly schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearSummary {
    pub year: u32,
    pub payment: f64,
    pub principal: f64,
    pub interest: f64,
    pub closing_balance: f64,
}
