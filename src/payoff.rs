//! Payoff acceleration comparator
//!
//! Runs the same balance twice through the shared [`Amortizer`]: once paying
//! only the minimum, once paying minimum + extra, and reports what the extra
//! payment saves.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::amortization::{Amortizer, PaymentPolicy, PeriodEntry};
use crate::error::{check, ValidationError};
use crate::rounding::{monthly_rate, round2};

/// Simulations stop after 50 years even if the balance is not paid off
pub const MAX_PAYOFF_MONTHS: u32 = 600;

/// Credit-style rates above this are rejected
pub const MAX_CREDIT_RATE_PERCENT: f64 = 30.0;

/// Inputs for a payoff comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoffInput {
    pub balance: f64,
    pub annual_rate_percent: f64,
    pub minimum_payment: f64,
    #[serde(default)]
    pub extra_payment: f64,
}

impl PayoffInput {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check::amount("balance", self.balance)?;
        check::rate("annual_rate_percent", self.annual_rate_percent, MAX_CREDIT_RATE_PERCENT)?;
        check::amount("minimum_payment", self.minimum_payment)?;
        check::amount("extra_payment", self.extra_payment)
    }
}

/// Outcome of one payment policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoffSimulation {
    pub monthly_payment: f64,
    pub months: u32,
    pub total_interest: f64,
    pub total_paid: f64,
    /// False when the horizon was reached with a balance outstanding
    pub paid_off: bool,
    pub remaining_balance: f64,
    pub schedule: Vec<PeriodEntry>,
}

/// Side-by-side comparison of minimum-only and accelerated payoff
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoffComparison {
    pub minimum_only: PayoffSimulation,
    pub accelerated: PayoffSimulation,
    pub months_saved: u32,
    pub interest_saved: f64,
}

/// One schedule row tagged with the strategy that produced it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayoffRow {
    pub strategy: &'static str,
    pub period: u32,
    pub payment: f64,
    pub principal: f64,
    pub interest: f64,
    pub balance: f64,
}

impl PayoffComparison {
    /// Both schedules as flat rows, minimum-only first
    pub fn rows(&self) -> Vec<PayoffRow> {
        [
            ("minimum_only", &self.minimum_only),
            ("accelerated", &self.accelerated),
        ]
        .into_iter()
        .flat_map(|(strategy, sim)| {
            sim.schedule.iter().map(move |e| PayoffRow {
                strategy,
                period: e.period,
                payment: e.payment,
                principal: e.principal,
                interest: e.interest,
                balance: e.balance,
            })
        })
        .collect()
    }
}

/// Simulate paying down a balance under a payment policy
pub fn simulate_payoff(balance: f64, annual_rate_percent: f64, policy: PaymentPolicy) -> PayoffSimulation {
    let rate = monthly_rate(annual_rate_percent);
    let mut amortizer = Amortizer::until_paid(balance, rate, policy);

    let schedule: Vec<PeriodEntry> = amortizer
        .by_ref()
        .take(MAX_PAYOFF_MONTHS as usize)
        .map(|step| PeriodEntry {
            period: step.period,
            payment_date: None,
            payment: step.payment,
            principal: step.principal,
            interest: step.interest,
            balance: step.balance,
        })
        .collect();

    let remaining = amortizer.balance();
    let paid_off = remaining <= 0.0;
    if !paid_off {
        warn!(
            "balance {:.2} not paid off within {} months at {:.2}/month",
            balance,
            MAX_PAYOFF_MONTHS,
            policy.amount()
        );
    }

    let total_interest: f64 = schedule.iter().map(|e| e.interest).sum();
    let total_paid: f64 = schedule.iter().map(|e| e.payment).sum();

    PayoffSimulation {
        monthly_payment: round2(policy.amount()),
        months: schedule.len() as u32,
        total_interest: round2(total_interest),
        total_paid: round2(total_paid),
        paid_off,
        remaining_balance: round2(remaining.max(0.0)),
        schedule,
    }
}

/// Compare minimum-only payments against minimum + extra
pub fn compare_payoff(input: &PayoffInput) -> PayoffComparison {
    let minimum_only = simulate_payoff(
        input.balance,
        input.annual_rate_percent,
        PaymentPolicy::Level {
            payment: input.minimum_payment,
        },
    );
    let accelerated = simulate_payoff(
        input.balance,
        input.annual_rate_percent,
        PaymentPolicy::Accelerated {
            minimum: input.minimum_payment,
            extra: input.extra_payment,
        },
    );

    let months_saved = minimum_only.months.saturating_sub(accelerated.months);
    let interest_saved = (minimum_only.total_interest - accelerated.total_interest).max(0.0);
    debug!(
        "payoff of {:.2}: {} vs {} months, interest saved {:.2}",
        input.balance, minimum_only.months, accelerated.months, interest_saved
    );

    PayoffComparison {
        minimum_only,
        accelerated,
        months_saved,
        interest_saved: round2(interest_saved),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn input(extra_payment: f64) -> PayoffInput {
        PayoffInput {
            balance: 10_000.0,
            annual_rate_percent: 18.0,
            minimum_payment: 250.0,
            extra_payment,
        }
    }

    #[test]
    fn test_extra_payment_saves_time_and_interest() {
        let result = compare_payoff(&input(100.0));

        assert!(result.minimum_only.paid_off);
        assert!(result.accelerated.paid_off);
        assert!(result.months_saved > 0);
        assert!(result.interest_saved > 0.0);
        assert_eq!(
            result.months_saved,
            result.minimum_only.months - result.accelerated.months
        );
    }

    #[test]
    fn test_no_extra_saves_nothing() {
        let result = compare_payoff(&input(0.0));
        assert_eq!(result.months_saved, 0);
        assert_eq!(result.interest_saved, 0.0);
    }

    #[test]
    fn test_savings_never_negative() {
        for &extra in &[0.0, 0.01, 5.0, 50.0, 1_000.0, 20_000.0] {
            let result = compare_payoff(&input(extra));
            assert!(result.interest_saved >= 0.0);
            assert!(result.accelerated.months <= result.minimum_only.months);
        }
    }

    #[test]
    fn test_final_payment_never_overshoots() {
        let result = compare_payoff(&input(100.0));
        for sim in [&result.minimum_only, &result.accelerated] {
            let last = sim.schedule.last().unwrap();
            assert_eq!(last.balance, 0.0);
            assert!(last.payment <= sim.monthly_payment + 1e-9);
            let principal: f64 = sim.schedule.iter().map(|e| e.principal).sum();
            assert_abs_diff_eq!(principal, 10_000.0, epsilon = 0.01);
        }
    }

    #[test]
    fn test_payment_below_interest_hits_cap() {
        // 18% on 10,000 accrues 150/month; 100/month never amortizes
        let result = compare_payoff(&PayoffInput {
            balance: 10_000.0,
            annual_rate_percent: 18.0,
            minimum_payment: 100.0,
            extra_payment: 100.0,
        });

        assert!(!result.minimum_only.paid_off);
        assert_eq!(result.minimum_only.months, MAX_PAYOFF_MONTHS);
        assert!(result.minimum_only.remaining_balance > 10_000.0);

        assert!(result.accelerated.paid_off);
        assert!(result.months_saved > 0);
        assert!(result.interest_saved > 0.0);
    }

    #[test]
    fn test_zero_rate_payoff() {
        let result = compare_payoff(&PayoffInput {
            balance: 1_200.0,
            annual_rate_percent: 0.0,
            minimum_payment: 100.0,
            extra_payment: 50.0,
        });
        assert_eq!(result.minimum_only.months, 12);
        assert_eq!(result.accelerated.months, 8);
        assert_eq!(result.minimum_only.total_interest, 0.0);
        assert_eq!(result.months_saved, 4);
    }

    #[test]
    fn test_rows_cover_both_strategies() {
        let result = compare_payoff(&input(100.0));
        let rows = result.rows();

        let minimum = rows.iter().filter(|r| r.strategy == "minimum_only").count();
        let accelerated = rows.iter().filter(|r| r.strategy == "accelerated").count();
        assert_eq!(minimum as u32, result.minimum_only.months);
        assert_eq!(accelerated as u32, result.accelerated.months);
        assert_eq!(rows[0].strategy, "minimum_only");
        assert_eq!(rows[0].period, 1);
        assert_eq!(rows.last().unwrap().balance, 0.0);
    }

    #[test]
    fn test_validate_credit_rate_cap() {
        let mut bad = input(0.0);
        bad.annual_rate_percent = 35.0;
        assert!(bad.validate().is_err());
        assert!(input(50.0).validate().is_ok());
    }
}
