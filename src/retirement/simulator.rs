//! Accumulation and decumulation simulation

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::{check, ValidationError};
use crate::rounding::{monthly_rate, round2};

/// Decumulation stops after 40 years even if the corpus is not exhausted
pub const MAX_DRAWDOWN_MONTHS: u32 = 40 * 12;

/// Oldest retirement age accepted by `validate`
pub const MAX_AGE: u32 = 120;

/// Inputs for a retirement projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetirementInput {
    pub current_age: u32,
    pub retirement_age: u32,
    pub current_savings: f64,
    pub monthly_contribution: f64,
    /// Expected annual return, used in both phases
    pub expected_return_percent: f64,
    pub inflation_percent: f64,
    /// Desired monthly income in today's money
    pub desired_monthly_income: f64,
}

impl RetirementInput {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.retirement_age > MAX_AGE {
            return Err(ValidationError::AgeOutOfRange {
                field: "retirement_age",
                value: self.retirement_age,
                max: MAX_AGE,
            });
        }
        if self.retirement_age <= self.current_age {
            return Err(ValidationError::RetirementBeforeCurrentAge {
                current_age: self.current_age,
                retirement_age: self.retirement_age,
            });
        }
        check::amount("current_savings", self.current_savings)?;
        check::amount("monthly_contribution", self.monthly_contribution)?;
        check::rate("expected_return_percent", self.expected_return_percent, 100.0)?;
        check::rate("inflation_percent", self.inflation_percent, 100.0)?;
        check::amount("desired_monthly_income", self.desired_monthly_income)
    }

    pub fn years_to_retirement(&self) -> u32 {
        self.retirement_age.saturating_sub(self.current_age)
    }
}

/// Corpus at the end of an accumulation year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccumulationYear {
    pub year: u32,
    /// Age at the end of the year
    pub age: u32,
    /// Cumulative contributions including starting savings
    pub contributions: f64,
    pub corpus: f64,
    pub gains: f64,
}

/// Withdrawals and balance for a drawdown year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawdownYear {
    pub year: u32,
    pub age: u32,
    /// Amount actually withdrawn during the year
    pub withdrawals: f64,
    pub ending_balance: f64,
}

/// How the decumulation phase ended
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DrawdownOutcome {
    /// Corpus exhausted after `months` of withdrawals
    Depleted { months: u32, age: u32 },
    /// Corpus outlasted the modeled horizon
    Sustained { months: u32, remaining_balance: f64 },
}

impl DrawdownOutcome {
    pub fn depletion_age(&self) -> Option<u32> {
        match self {
            DrawdownOutcome::Depleted { age, .. } => Some(*age),
            DrawdownOutcome::Sustained { .. } => None,
        }
    }
}

/// Complete retirement projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetirementResult {
    pub years_to_retirement: u32,
    pub retirement_corpus: f64,
    pub total_contributions: f64,
    pub investment_gains: f64,

    /// Desired income restated in money of the retirement date
    pub monthly_income_at_retirement: f64,

    /// Corpus that would fund the withdrawals for the whole horizon
    pub required_corpus: f64,
    pub shortfall: f64,

    pub outcome: DrawdownOutcome,

    pub accumulation: Vec<AccumulationYear>,
    pub drawdown: Vec<DrawdownYear>,
}

/// Present value of `months` end-of-month withdrawals growing at `growth` per month
fn growing_annuity_pv(first_payment: f64, rate: f64, growth: f64, months: u32) -> f64 {
    if (rate - growth).abs() < 1e-12 {
        return first_payment * months as f64 / (1.0 + rate);
    }
    let ratio = (1.0 + growth) / (1.0 + rate);
    first_payment / (rate - growth) * (1.0 - ratio.powi(months as i32))
}

/// Run both phases of the retirement projection
pub fn simulate(input: &RetirementInput) -> RetirementResult {
    let rate = monthly_rate(input.expected_return_percent);
    let inflation = monthly_rate(input.inflation_percent);
    let years = input.years_to_retirement();

    // Accumulation: contribute each month, then compound into the next
    let mut corpus = input.current_savings;
    let mut contributed = input.current_savings;
    let mut accumulation = Vec::with_capacity(years as usize);
    for year in 1..=years {
        for _ in 0..12 {
            corpus = corpus * (1.0 + rate) + input.monthly_contribution;
        }
        contributed += input.monthly_contribution * 12.0;
        accumulation.push(AccumulationYear {
            year,
            age: input.current_age.saturating_add(year),
            contributions: round2(contributed),
            corpus: round2(corpus),
            gains: round2(corpus - contributed),
        });
    }

    let income_at_retirement =
        input.desired_monthly_income * (1.0 + inflation).powi(years.saturating_mul(12) as i32);

    // Decumulation at the same expected return
    let mut balance = corpus;
    let mut withdrawal = income_at_retirement;
    let mut month: u32 = 0;
    let mut year_withdrawals = 0.0;
    let mut drawdown = Vec::new();
    while balance > 0.0 && month < MAX_DRAWDOWN_MONTHS {
        let available = balance * (1.0 + rate);
        year_withdrawals += withdrawal.min(available);
        balance = available - withdrawal;
        withdrawal *= 1.0 + inflation;
        month += 1;

        if month % 12 == 0 || balance <= 0.0 {
            let year = month.div_ceil(12);
            drawdown.push(DrawdownYear {
                year,
                age: input.retirement_age.saturating_add(year),
                withdrawals: round2(year_withdrawals),
                ending_balance: round2(balance.max(0.0)),
            });
            year_withdrawals = 0.0;
        }
    }

    let outcome = if balance <= 0.0 {
        DrawdownOutcome::Depleted {
            months: month,
            age: input.retirement_age.saturating_add(month / 12),
        }
    } else {
        info!(
            "corpus outlasts the {}-month drawdown horizon with {:.2} remaining",
            MAX_DRAWDOWN_MONTHS, balance
        );
        DrawdownOutcome::Sustained {
            months: month,
            remaining_balance: round2(balance),
        }
    };

    let required = growing_annuity_pv(income_at_retirement, rate, inflation, MAX_DRAWDOWN_MONTHS);
    debug!(
        "retirement at {}: corpus {:.2}, required {:.2}, outcome {:?}",
        input.retirement_age, corpus, required, outcome
    );

    RetirementResult {
        years_to_retirement: years,
        retirement_corpus: round2(corpus),
        total_contributions: round2(contributed),
        investment_gains: round2(corpus - contributed),
        monthly_income_at_retirement: round2(income_at_retirement),
        required_corpus: round2(required),
        shortfall: round2((required - corpus).max(0.0)),
        outcome,
        accumulation,
        drawdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn scenario() -> RetirementInput {
        RetirementInput {
            current_age: 30,
            retirement_age: 65,
            current_savings: 50_000.0,
            monthly_contribution: 1_000.0,
            expected_return_percent: 8.0,
            inflation_percent: 3.0,
            desired_monthly_income: 5_000.0,
        }
    }

    #[test]
    fn test_retirement_scenario() {
        let result = simulate(&scenario());

        assert_eq!(result.years_to_retirement, 35);
        assert_eq!(result.total_contributions, 470_000.0);
        assert!(result.retirement_corpus > result.total_contributions);
        assert_abs_diff_eq!(
            result.investment_gains,
            result.retirement_corpus - result.total_contributions,
            epsilon = 0.011
        );
        assert_eq!(result.accumulation.len(), 35);
        assert_eq!(result.accumulation.last().unwrap().age, 65);
        assert_eq!(result.accumulation.last().unwrap().corpus, result.retirement_corpus);
    }

    #[test]
    fn test_contribution_then_growth_ordering() {
        let result = simulate(&RetirementInput {
            current_age: 40,
            retirement_age: 41,
            current_savings: 0.0,
            monthly_contribution: 100.0,
            expected_return_percent: 12.0,
            inflation_percent: 0.0,
            desired_monthly_income: 0.0,
        });

        // First contribution is added after the first month's growth, so it compounds 11 times
        let expected: f64 = (0..12).map(|k| 100.0 * 1.01_f64.powi(k)).sum();
        assert_abs_diff_eq!(result.retirement_corpus, expected, epsilon = 0.005);
    }

    #[test]
    fn test_income_inflated_to_retirement() {
        let result = simulate(&scenario());
        let expected = 5_000.0 * (1.0 + 0.03 / 12.0_f64).powi(420);
        assert_abs_diff_eq!(result.monthly_income_at_retirement, expected, epsilon = 0.005);
    }

    #[test]
    fn test_depletion_without_growth() {
        let result = simulate(&RetirementInput {
            current_age: 60,
            retirement_age: 61,
            current_savings: 0.0,
            monthly_contribution: 1_000.0,
            expected_return_percent: 0.0,
            inflation_percent: 0.0,
            desired_monthly_income: 1_000.0,
        });

        assert_eq!(result.retirement_corpus, 12_000.0);
        assert_eq!(result.outcome, DrawdownOutcome::Depleted { months: 12, age: 62 });
        assert_eq!(result.outcome.depletion_age(), Some(62));
        assert_eq!(result.drawdown.len(), 1);
        assert_eq!(result.drawdown[0].withdrawals, 12_000.0);
        assert_eq!(result.shortfall, 480_000.0 - 12_000.0);
    }

    #[test]
    fn test_horizon_cap_reports_sustained() {
        let result = simulate(&RetirementInput {
            current_age: 30,
            retirement_age: 60,
            current_savings: 1_000_000.0,
            monthly_contribution: 0.0,
            expected_return_percent: 6.0,
            inflation_percent: 0.0,
            desired_monthly_income: 100.0,
        });

        match result.outcome {
            DrawdownOutcome::Sustained { months, remaining_balance } => {
                assert_eq!(months, MAX_DRAWDOWN_MONTHS);
                assert!(remaining_balance > 0.0);
            }
            other => panic!("expected sustained outcome, got {:?}", other),
        }
        assert_eq!(result.outcome.depletion_age(), None);
        assert_eq!(result.drawdown.len(), 40);
        assert_eq!(result.shortfall, 0.0);
    }

    #[test]
    fn test_early_depletion_age() {
        let result = simulate(&RetirementInput {
            current_age: 55,
            retirement_age: 60,
            current_savings: 100_000.0,
            monthly_contribution: 500.0,
            expected_return_percent: 5.0,
            inflation_percent: 2.5,
            desired_monthly_income: 3_000.0,
        });

        let age = result.outcome.depletion_age().expect("corpus should deplete");
        assert!(age >= 60 && age < 60 + 40);
        assert!(result.shortfall > 0.0);
        assert_eq!(result.drawdown.last().unwrap().ending_balance, 0.0);
    }

    #[test]
    fn test_required_corpus_funds_horizon() {
        let rate = 0.005;
        let growth = 0.002;
        let pv = growing_annuity_pv(1_000.0, rate, growth, 120);

        let mut balance = pv;
        let mut withdrawal = 1_000.0;
        for _ in 0..120 {
            balance = balance * (1.0 + rate) - withdrawal;
            withdrawal *= 1.0 + growth;
        }
        assert_abs_diff_eq!(balance, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_validate_ages() {
        let mut input = scenario();
        input.retirement_age = 30;
        assert!(matches!(
            input.validate(),
            Err(ValidationError::RetirementBeforeCurrentAge { .. })
        ));
        assert!(scenario().validate().is_ok());
    }

    #[test]
    fn test_validate_age_ceiling() {
        let mut input = scenario();
        input.retirement_age = MAX_AGE;
        assert!(input.validate().is_ok());

        input.current_age = 0;
        input.retirement_age = u32::MAX;
        assert_eq!(
            input.validate(),
            Err(ValidationError::AgeOutOfRange {
                field: "retirement_age",
                value: u32::MAX,
                max: MAX_AGE,
            })
        );
    }
}
