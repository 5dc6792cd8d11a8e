//! Amortization engine for loans, EMIs and mortgages

mod schedule;
mod stepping;
mod loan;
mod mortgage;

pub use schedule::{PeriodEntry, ScheduleResult, YearSummary};
pub use stepping::{level_payment, AmortizationStep, Amortizer, PaymentPolicy};
pub use loan::{amortize, monthly_payment, LoanInput, MAX_TERM_MONTHS};
pub use mortgage::{
    mortgage, MortgageInput, MortgagePeriod, MortgageResult, MAX_TERM_YEARS,
    PMI_DOWN_PAYMENT_THRESHOLD, PMI_LTV_THRESHOLD,
};
