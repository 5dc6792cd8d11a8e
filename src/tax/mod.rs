//! Tax bracket evaluator with payroll and flat state tax

mod tables;
mod evaluator;
pub mod loader;

pub use tables::{Bracket, FilingParameters, FilingStatus, PayrollParameters, TaxTables};
pub use evaluator::{bracket_breakdown, evaluate, TaxBracketRow, TaxInput, TaxResult};
