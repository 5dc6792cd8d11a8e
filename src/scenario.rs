//! Scenario runner for batch calculations
//!
//! Holds tax tables once, then fans independent calculator invocations out
//! across threads. Results come back in input order.

use rayon::prelude::*;

use crate::amortization::{amortize, LoanInput, ScheduleResult};
use crate::payoff::{compare_payoff, PayoffComparison, PayoffInput};
use crate::tax::{evaluate, TaxInput, TaxResult, TaxTables};

/// Runs many independent scenarios in parallel
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new();
/// let sweep = runner.loan_rate_sweep(&LoanInput::from_years(300_000.0, 6.0, 30), &[5.0, 6.0, 7.0]);
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    tax_tables: TaxTables,
}

impl ScenarioRunner {
    /// Create runner with the built-in tax tables
    pub fn new() -> Self {
        Self {
            tax_tables: TaxTables::default_2024(),
        }
    }

    /// Create runner with pre-built tax tables
    pub fn with_tax_tables(tax_tables: TaxTables) -> Self {
        Self { tax_tables }
    }

    /// Amortize the same loan at each annual rate
    pub fn loan_rate_sweep(&self, base: &LoanInput, rates_percent: &[f64]) -> Vec<ScheduleResult> {
        rates_percent
            .par_iter()
            .map(|&rate| {
                let input = LoanInput {
                    annual_rate_percent: rate,
                    ..base.clone()
                };
                amortize(&input)
            })
            .collect()
    }

    /// Compare payoff for each extra payment amount
    pub fn payoff_extra_sweep(&self, base: &PayoffInput, extras: &[f64]) -> Vec<PayoffComparison> {
        extras
            .par_iter()
            .map(|&extra| {
                let input = PayoffInput {
                    extra_payment: extra,
                    ..base.clone()
                };
                compare_payoff(&input)
            })
            .collect()
    }

    /// Evaluate many tax inputs against the runner's tables
    pub fn tax_batch(&self, inputs: &[TaxInput]) -> Vec<TaxResult> {
        inputs
            .par_iter()
            .map(|input| evaluate(input, &self.tax_tables))
            .collect()
    }

    pub fn tax_tables(&self) -> &TaxTables {
        &self.tax_tables
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}
