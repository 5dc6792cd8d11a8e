//! Shared amortization stepping used by loan, mortgage and payoff calculators
//!
//! Every schedule in the crate is driven by [`Amortizer`], so interest accrual,
//! principal clamping and final-period drift handling behave identically across
//! calculators.

use serde::{Deserialize, Serialize};

/// How much is paid each period
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PaymentPolicy {
    /// Fixed level payment
    Level { payment: f64 },
    /// Minimum payment plus a voluntary extra amount
    Accelerated { minimum: f64, extra: f64 },
}

impl PaymentPolicy {
    /// Total amount offered each period
    pub fn amount(&self) -> f64 {
        match self {
            PaymentPolicy::Level { payment } => *payment,
            PaymentPolicy::Accelerated { minimum, extra } => minimum + extra,
        }
    }
}

/// Result of a single period
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmortizationStep {
    /// Period index (1-indexed)
    pub period: u32,
    pub payment: f64,
    pub principal: f64,
    pub interest: f64,
    /// Balance after the payment
    pub balance: f64,
}

/// Level payment for a fully amortizing schedule
///
/// Falls back to straight-line division when the rate is zero.
pub fn level_payment(principal: f64, periodic_rate: f64, periods: u32) -> f64 {
    if periods == 0 {
        return principal;
    }
    if periodic_rate == 0.0 {
        return principal / periods as f64;
    }
    let growth = (1.0 + periodic_rate).powi(periods as i32);
    principal * periodic_rate * growth / (growth - 1.0)
}

/// Iterator over amortization periods
///
/// With a term, yields exactly `term` periods and the last one retires whatever
/// balance is left. Without a term, yields until the balance reaches zero; pair
/// it with `take` to bound non-amortizing payments.
#[derive(Debug, Clone)]
pub struct Amortizer {
    balance: f64,
    periodic_rate: f64,
    payment: f64,
    period: u32,
    term: Option<u32>,
}

impl Amortizer {
    /// Schedule that runs for a fixed number of periods
    pub fn with_term(principal: f64, periodic_rate: f64, policy: PaymentPolicy, term: u32) -> Self {
        Self {
            balance: principal,
            periodic_rate,
            payment: policy.amount(),
            period: 0,
            term: Some(term),
        }
    }

    /// Schedule that runs until the balance is paid off
    pub fn until_paid(principal: f64, periodic_rate: f64, policy: PaymentPolicy) -> Self {
        Self {
            balance: principal,
            periodic_rate,
            payment: policy.amount(),
            period: 0,
            term: None,
        }
    }

    /// Outstanding balance
    pub fn balance(&self) -> f64 {
        self.balance
    }
}

impl Iterator for Amortizer {
    type Item = AmortizationStep;

    fn next(&mut self) -> Option<Self::Item> {
        match self.term {
            Some(term) if self.period >= term => return None,
            None if self.balance <= 0.0 => return None,
            _ => {}
        }

        self.period += 1;
        let interest = self.balance * self.periodic_rate;
        let final_period = self.term == Some(self.period);

        // Final termed period absorbs floating drift so the schedule closes at zero
        let principal = if final_period {
            self.balance
        } else {
            (self.payment - interest).min(self.balance)
        };

        self.balance = if final_period { 0.0 } else { self.balance - principal };

        Some(AmortizationStep {
            period: self.period,
            payment: principal + interest,
            principal,
            interest,
            balance: self.balance,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_level_payment_annuity() {
        let payment = level_payment(100_000.0, 0.10 / 12.0, 12);
        assert_abs_diff_eq!(payment, 8791.59, epsilon = 0.005);
    }

    #[test]
    fn test_level_payment_zero_rate() {
        assert_eq!(level_payment(1200.0, 0.0, 12), 100.0);
    }

    #[test]
    fn test_termed_schedule_closes_at_zero() {
        let payment = level_payment(10_000.0, 0.005, 36);
        let steps: Vec<_> =
            Amortizer::with_term(10_000.0, 0.005, PaymentPolicy::Level { payment }, 36).collect();

        assert_eq!(steps.len(), 36);
        assert_eq!(steps.last().unwrap().balance, 0.0);
        let principal: f64 = steps.iter().map(|s| s.principal).sum();
        assert_abs_diff_eq!(principal, 10_000.0, epsilon = 0.01);
    }

    #[test]
    fn test_until_paid_clamps_last_payment() {
        let policy = PaymentPolicy::Accelerated { minimum: 300.0, extra: 100.0 };
        let steps: Vec<_> = Amortizer::until_paid(1_000.0, 0.0, policy).collect();

        assert_eq!(steps.len(), 3);
        assert_eq!(steps[2].payment, 200.0);
        assert_eq!(steps[2].balance, 0.0);
    }

    #[test]
    fn test_non_amortizing_payment_grows_balance() {
        let policy = PaymentPolicy::Level { payment: 5.0 };
        let mut amortizer = Amortizer::until_paid(1_000.0, 0.01, policy);
        let steps: Vec<_> = amortizer.by_ref().take(10).collect();

        assert_eq!(steps.len(), 10);
        assert!(amortizer.balance() > 1_000.0);
    }

    #[test]
    fn test_zero_principal_termed() {
        let steps: Vec<_> =
            Amortizer::with_term(0.0, 0.01, PaymentPolicy::Level { payment: 0.0 }, 3).collect();
        assert_eq!(steps.len(), 3);
        assert!(steps.iter().all(|s| s.payment == 0.0 && s.balance == 0.0));
    }
}
