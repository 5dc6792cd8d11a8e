//! Retirement lifecycle simulator
//!
//! Two phases run back to back:
//! 1. **Accumulation**: monthly contributions with monthly compounding until retirement
//! 2. **Decumulation**: inflation-growing monthly withdrawals from the corpus, which
//!    keeps earning the same expected return, until it is exhausted or the 40-year
//!    horizon is reached

mod simulator;

pub use simulator::{
    simulate, AccumulationYear, DrawdownOutcome, DrawdownYear, RetirementInput,
    RetirementResult, MAX_AGE, MAX_DRAWDOWN_MONTHS,
};
