//! Financial projection engine - deterministic calculators for personal finance
//!
//! This library provides:
//! - Loan, EMI and mortgage amortization (escrow, mortgage insurance drop-off)
//! - Compound interest, fixed deposit and periodic investment growth
//! - Progressive federal tax with payroll and flat state tax
//! - Two-phase retirement accumulation/decumulation simulation
//! - Minimum vs. accelerated payoff comparison
//! - APR/APY conversion
//!
//! Every calculator is a pure function: inputs in, schedule and summary out.

pub mod amortization;
pub mod config;
pub mod error;
pub mod frequency;
pub mod growth;
pub mod payoff;
pub mod rates;
pub mod retirement;
pub mod rounding;
pub mod scenario;
pub mod tax;

// Re-export commonly used types
pub use amortization::{amortize, mortgage, LoanInput, MortgageInput, PeriodEntry, ScheduleResult};
pub use config::CalculatorDefaults;
pub use error::{ConfigError, TableError, ValidationError};
pub use frequency::CompoundingFrequency;
pub use growth::{compound_interest, fixed_deposit, periodic_investment};
pub use payoff::{compare_payoff, PayoffComparison, PayoffInput};
pub use rates::{apr_to_apy, apy_to_apr, RateConversionResult};
pub use retirement::{simulate, RetirementInput, RetirementResult};
pub use scenario::ScenarioRunner;
pub use tax::{evaluate, FilingStatus, TaxBracketRow, TaxInput, TaxResult, TaxTables};
