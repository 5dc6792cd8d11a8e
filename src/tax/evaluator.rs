//! Progressive federal tax, payroll tax and flat state tax

use log::debug;
use serde::{Deserialize, Serialize};

use super::tables::{FilingStatus, TaxTables};
use crate::error::{check, ValidationError};
use crate::rounding::{percent_to_decimal, round2};

/// Inputs for an annual tax estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxInput {
    pub gross_income: f64,
    pub filing_status: FilingStatus,
    #[serde(default)]
    pub itemized_deductions: f64,
    #[serde(default)]
    pub credits: f64,
    /// Flat state rate applied to gross income
    #[serde(default)]
    pub state_tax_rate_percent: f64,
}

impl TaxInput {
    pub fn new(gross_income: f64, filing_status: FilingStatus) -> Self {
        Self {
            gross_income,
            filing_status,
            itemized_deductions: 0.0,
            credits: 0.0,
            state_tax_rate_percent: 0.0,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        check::amount("gross_income", self.gross_income)?;
        check::amount("itemized_deductions", self.itemized_deductions)?;
        check::amount("credits", self.credits)?;
        check::rate("state_tax_rate_percent", self.state_tax_rate_percent, 100.0)
    }
}

/// Tax owed within one bracket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxBracketRow {
    pub rate_percent: f64,
    pub lower_bound: f64,
    pub upper_bound: Option<f64>,
    /// Slice of taxable income falling in this bracket
    pub taxed_amount: f64,
    pub tax: f64,
}

/// Complete tax estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxResult {
    pub gross_income: f64,
    pub filing_status: FilingStatus,

    /// Deduction actually applied
    pub deduction: f64,
    pub itemized: bool,
    pub taxable_income: f64,

    pub brackets: Vec<TaxBracketRow>,
    pub federal_tax_before_credits: f64,
    pub credits_applied: f64,
    pub federal_tax: f64,

    pub state_tax: f64,

    pub social_security_tax: f64,
    pub medicare_tax: f64,
    pub additional_medicare_tax: f64,
    pub payroll_tax: f64,

    pub total_tax: f64,
    pub take_home_pay: f64,
    pub monthly_take_home: f64,

    /// Total tax over gross income
    pub effective_rate_percent: f64,
    /// Rate of the highest bracket reached
    pub marginal_rate_percent: f64,
}

/// Walk the bracket table and tax each slice of taxable income
pub fn bracket_breakdown(
    taxable_income: f64,
    status: FilingStatus,
    tables: &TaxTables,
) -> Vec<TaxBracketRow> {
    tables
        .brackets(status)
        .iter()
        .take_while(|b| b.lower_bound < taxable_income)
        .map(|b| {
            let top = b.upper_bound.map_or(taxable_income, |u| u.min(taxable_income));
            let taxed_amount = top - b.lower_bound;
            TaxBracketRow {
                rate_percent: b.rate_percent,
                lower_bound: b.lower_bound,
                upper_bound: b.upper_bound,
                taxed_amount: round2(taxed_amount),
                tax: round2(taxed_amount * percent_to_decimal(b.rate_percent)),
            }
        })
        .collect()
}

/// Estimate annual taxes and take-home pay
pub fn evaluate(input: &TaxInput, tables: &TaxTables) -> TaxResult {
    let gross = input.gross_income;
    let status = input.filing_status;

    let standard = tables.standard_deduction(status);
    let itemized = input.itemized_deductions > standard;
    let deduction = input.itemized_deductions.max(standard);
    let taxable_income = (gross - deduction).max(0.0);

    let brackets = bracket_breakdown(taxable_income, status, tables);
    let federal_before_credits: f64 = brackets.iter().map(|b| b.tax).sum();
    let marginal_rate_percent = brackets.last().map(|b| b.rate_percent).unwrap_or(0.0);

    // Credits are non-refundable
    let federal_tax = (federal_before_credits - input.credits).max(0.0);
    let credits_applied = federal_before_credits - federal_tax;

    let payroll = &tables.payroll;
    let social_security = percent_to_decimal(payroll.social_security_rate_percent)
        * gross.min(payroll.social_security_wage_base);
    let medicare = percent_to_decimal(payroll.medicare_rate_percent) * gross;
    let surtax_base = (gross - tables.additional_medicare_threshold(status)).max(0.0);
    let additional_medicare =
        percent_to_decimal(payroll.additional_medicare_rate_percent) * surtax_base;
    let payroll_tax = social_security + medicare + additional_medicare;

    let state_tax = percent_to_decimal(input.state_tax_rate_percent) * gross;

    let total_tax = federal_tax + state_tax + payroll_tax;
    let take_home = gross - total_tax;
    let effective_rate_percent = if gross > 0.0 { total_tax / gross * 100.0 } else { 0.0 };

    debug!(
        "tax for {:.2} ({}): taxable {:.2}, federal {:.2}, total {:.2}",
        gross, status, taxable_income, federal_tax, total_tax
    );

    TaxResult {
        gross_income: round2(gross),
        filing_status: status,
        deduction: round2(deduction),
        itemized,
        taxable_income: round2(taxable_income),
        brackets,
        federal_tax_before_credits: round2(federal_before_credits),
        credits_applied: round2(credits_applied),
        federal_tax: round2(federal_tax),
        state_tax: round2(state_tax),
        social_security_tax: round2(social_security),
        medicare_tax: round2(medicare),
        additional_medicare_tax: round2(additional_medicare),
        payroll_tax: round2(payroll_tax),
        total_tax: round2(total_tax),
        take_home_pay: round2(take_home),
        monthly_take_home: round2(take_home / 12.0),
        effective_rate_percent: round2(effective_rate_percent),
        marginal_rate_percent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn tables() -> TaxTables {
        TaxTables::default_2024()
    }

    #[test]
    fn test_single_scenario() {
        let result = evaluate(&TaxInput::new(75_000.0, FilingStatus::Single), &tables());

        assert_eq!(result.taxable_income, 60_400.0);
        assert_abs_diff_eq!(result.federal_tax, 8_341.0, epsilon = 0.01);
        assert_eq!(result.marginal_rate_percent, 22.0);
        assert!(!result.itemized);
        assert_eq!(result.brackets.len(), 3);
    }

    #[test]
    fn test_bracket_additivity() {
        for status in FilingStatus::ALL {
            for &income in &[0.0, 9_000.0, 48_321.55, 250_000.0, 1_250_000.0] {
                let result = evaluate(&TaxInput::new(income, status), &tables());
                let sum: f64 = result.brackets.iter().map(|b| b.tax).sum();
                assert_abs_diff_eq!(sum, result.federal_tax_before_credits, epsilon = 0.005);

                let slices: f64 = result.brackets.iter().map(|b| b.taxed_amount).sum();
                assert_abs_diff_eq!(slices, result.taxable_income, epsilon = 0.01);
            }
        }
    }

    #[test]
    fn test_credits_reduce_tax_down_to_zero() {
        let base = evaluate(&TaxInput::new(75_000.0, FilingStatus::Single), &tables());

        let mut with_credit = TaxInput::new(75_000.0, FilingStatus::Single);
        with_credit.credits = 2_000.0;
        let credited = evaluate(&with_credit, &tables());
        assert_abs_diff_eq!(base.federal_tax - credited.federal_tax, 2_000.0, epsilon = 0.005);

        with_credit.credits = 50_000.0;
        let floored = evaluate(&with_credit, &tables());
        assert_eq!(floored.federal_tax, 0.0);
        assert_eq!(floored.credits_applied, base.federal_tax_before_credits);
    }

    #[test]
    fn test_itemized_never_below_standard() {
        let mut input = TaxInput::new(75_000.0, FilingStatus::Single);
        input.itemized_deductions = 5_000.0;
        let result = evaluate(&input, &tables());
        assert_eq!(result.deduction, 14_600.0);
        assert!(!result.itemized);

        input.itemized_deductions = 20_000.0;
        let result = evaluate(&input, &tables());
        assert_eq!(result.deduction, 20_000.0);
        assert!(result.itemized);
        assert_eq!(result.taxable_income, 55_000.0);
    }

    #[test]
    fn test_income_below_deduction() {
        let result = evaluate(&TaxInput::new(10_000.0, FilingStatus::MarriedJoint), &tables());
        assert_eq!(result.taxable_income, 0.0);
        assert!(result.brackets.is_empty());
        assert_eq!(result.federal_tax, 0.0);
        assert_eq!(result.marginal_rate_percent, 0.0);
    }

    #[test]
    fn test_payroll_caps_and_surtax() {
        let result = evaluate(&TaxInput::new(300_000.0, FilingStatus::Single), &tables());

        assert_abs_diff_eq!(result.social_security_tax, 168_600.0 * 0.062, epsilon = 0.005);
        assert_abs_diff_eq!(result.medicare_tax, 4_350.0, epsilon = 0.005);
        assert_abs_diff_eq!(result.additional_medicare_tax, 900.0, epsilon = 0.005);

        let joint = evaluate(&TaxInput::new(240_000.0, FilingStatus::MarriedJoint), &tables());
        assert_eq!(joint.additional_medicare_tax, 0.0);
    }

    #[test]
    fn test_state_tax_and_take_home() {
        let mut input = TaxInput::new(100_000.0, FilingStatus::HeadOfHousehold);
        input.state_tax_rate_percent = 5.0;
        let result = evaluate(&input, &tables());

        assert_abs_diff_eq!(result.state_tax, 5_000.0, epsilon = 0.005);
        assert_abs_diff_eq!(
            result.take_home_pay,
            100_000.0 - result.total_tax,
            epsilon = 0.01
        );
        assert_abs_diff_eq!(
            result.effective_rate_percent,
            result.total_tax / 1_000.0,
            epsilon = 0.01
        );
    }

    #[test]
    fn test_zero_income() {
        let result = evaluate(&TaxInput::new(0.0, FilingStatus::Single), &tables());
        assert_eq!(result.total_tax, 0.0);
        assert_eq!(result.effective_rate_percent, 0.0);
    }
}
