//! Mortgage schedules with escrow items and mortgage insurance

use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};

use super::loan::due_date;
use super::stepping::{level_payment, Amortizer, PaymentPolicy};
use crate::error::{check, ValidationError};
use crate::rounding::{monthly_rate, percent_to_decimal, round2};

/// LTV above which mortgage insurance is charged
pub const PMI_LTV_THRESHOLD: f64 = 0.80;

/// Down payment fraction below which mortgage insurance is required
pub const PMI_DOWN_PAYMENT_THRESHOLD: f64 = 0.20;

/// Longest mortgage term accepted by `validate`
pub const MAX_TERM_YEARS: u32 = 50;

/// Inputs for a mortgage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageInput {
    pub home_price: f64,
    pub down_payment: f64,
    pub annual_rate_percent: f64,
    pub term_years: u32,

    /// Annual property tax
    #[serde(default)]
    pub property_tax_annual: f64,

    /// Annual homeowner's insurance
    #[serde(default)]
    pub insurance_annual: f64,

    /// Flat monthly HOA dues
    #[serde(default)]
    pub hoa_monthly: f64,

    /// Annual mortgage insurance rate, as a percent of the original loan amount
    #[serde(default)]
    pub pmi_rate_percent: f64,

    #[serde(default)]
    pub start_date: Option<NaiveDate>,
}

impl MortgageInput {
    pub fn loan_amount(&self) -> f64 {
        (self.home_price - self.down_payment).max(0.0)
    }

    pub fn down_payment_fraction(&self) -> f64 {
        if self.home_price <= 0.0 {
            1.0
        } else {
            self.down_payment / self.home_price
        }
    }

    /// Mortgage insurance is required at origination below 20% down
    pub fn pmi_required(&self) -> bool {
        self.down_payment_fraction() < PMI_DOWN_PAYMENT_THRESHOLD
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        check::amount("home_price", self.home_price)?;
        check::amount("down_payment", self.down_payment)?;
        if self.down_payment > self.home_price {
            return Err(ValidationError::DownPaymentExceedsPrice {
                down_payment: self.down_payment,
                home_price: self.home_price,
            });
        }
        check::rate("annual_rate_percent", self.annual_rate_percent, 100.0)?;
        check::periods("term_years", self.term_years, MAX_TERM_YEARS)?;
        check::amount("property_tax_annual", self.property_tax_annual)?;
        check::amount("insurance_annual", self.insurance_annual)?;
        check::amount("hoa_monthly", self.hoa_monthly)?;
        check::rate("pmi_rate_percent", self.pmi_rate_percent, 100.0)
    }
}

/// One month of a mortgage schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgagePeriod {
    pub period: u32,
    pub payment_date: Option<NaiveDate>,

    /// Principal and interest
    pub payment: f64,
    pub principal: f64,
    pub interest: f64,

    /// Property tax, insurance and HOA
    pub escrow: f64,
    pub pmi: f64,

    /// Everything due this month
    pub total_payment: f64,

    pub balance: f64,

    /// Ending balance over home price
    pub ltv: f64,
}

/// Full mortgage result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageResult {
    pub loan_amount: f64,
    pub down_payment_percent: f64,

    /// Principal and interest payment
    pub monthly_payment: f64,
    pub monthly_property_tax: f64,
    pub monthly_insurance: f64,
    pub monthly_hoa: f64,

    /// Mortgage insurance charged in the first month
    pub initial_monthly_pmi: f64,

    /// Everything due in the first month
    pub total_monthly_payment: f64,

    pub pmi_required: bool,

    /// First period with no mortgage insurance charge
    pub pmi_drop_off_period: Option<u32>,

    pub total_interest: f64,
    pub total_pmi: f64,
    pub total_escrow: f64,

    /// Down payment plus every payment made
    pub total_cost: f64,

    pub schedule: Vec<MortgagePeriod>,
}

/// Generate a mortgage schedule with escrow and mortgage insurance
pub fn mortgage(input: &MortgageInput) -> MortgageResult {
    let loan_amount = input.loan_amount();
    let rate = monthly_rate(input.annual_rate_percent);
    let months = input.term_years.saturating_mul(12);
    let payment = level_payment(loan_amount, rate, months);

    let monthly_property_tax = input.property_tax_annual / 12.0;
    let monthly_insurance = input.insurance_annual / 12.0;
    let escrow = monthly_property_tax + monthly_insurance + input.hoa_monthly;

    let pmi_required = input.pmi_required();
    let pmi_charge = if pmi_required {
        loan_amount * percent_to_decimal(input.pmi_rate_percent) / 12.0
    } else {
        0.0
    };

    let mut pmi_active = pmi_required;
    let schedule: Vec<MortgagePeriod> =
        Amortizer::with_term(loan_amount, rate, PaymentPolicy::Level { payment }, months)
            .map(|step| {
                let ltv = if input.home_price > 0.0 {
                    step.balance / input.home_price
                } else {
                    0.0
                };
                // Once LTV reaches the threshold the insurance is cancelled for good
                if ltv <= PMI_LTV_THRESHOLD {
                    pmi_active = false;
                }
                let pmi = if pmi_active { pmi_charge } else { 0.0 };

                MortgagePeriod {
                    period: step.period,
                    payment_date: due_date(input.start_date, step.period),
                    payment: step.payment,
                    principal: step.principal,
                    interest: step.interest,
                    escrow,
                    pmi,
                    total_payment: step.payment + escrow + pmi,
                    balance: step.balance,
                    ltv,
                }
            })
            .collect();

    let pmi_drop_off_period = if pmi_required {
        schedule
            .iter()
            .find(|p| p.ltv <= PMI_LTV_THRESHOLD)
            .map(|p| p.period)
    } else {
        None
    };

    let total_interest: f64 = schedule.iter().map(|p| p.interest).sum();
    let total_pmi: f64 = schedule.iter().map(|p| p.pmi).sum();
    let total_escrow: f64 = schedule.iter().map(|p| p.escrow).sum();
    let total_paid: f64 = schedule.iter().map(|p| p.total_payment).sum();
    let initial_monthly_pmi = schedule.first().map(|p| p.pmi).unwrap_or(0.0);

    debug!(
        "mortgage {:.2} over {} years: P&I {:.2}, PMI required {}, drop-off {:?}",
        loan_amount, input.term_years, payment, pmi_required, pmi_drop_off_period
    );

    MortgageResult {
        loan_amount: round2(loan_amount),
        down_payment_percent: round2(input.down_payment_fraction() * 100.0),
        monthly_payment: round2(payment),
        monthly_property_tax: round2(monthly_property_tax),
        monthly_insurance: round2(monthly_insurance),
        monthly_hoa: round2(input.hoa_monthly),
        initial_monthly_pmi: round2(initial_monthly_pmi),
        total_monthly_payment: round2(payment + escrow + initial_monthly_pmi),
        pmi_required,
        pmi_drop_off_period,
        total_interest: round2(total_interest),
        total_pmi: round2(total_pmi),
        total_escrow: round2(total_escrow),
        total_cost: round2(input.down_payment + total_paid),
        schedule,
    }
}
