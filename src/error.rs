//! Error types for input validation and table loading

use thiserror::Error;

/// Rejection of a calculator input before it reaches an engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },

    #[error("{field} must not be negative (got {value})")]
    NegativeAmount { field: &'static str, value: f64 },

    #[error("{field} must be between 0 and {max}% (got {value})")]
    RateOutOfRange {
        field: &'static str,
        value: f64,
        max: f64,
    },

    #[error("{field} must be at least one period")]
    ZeroDuration { field: &'static str },

    #[error("{field} must be at most {max} (got {value})")]
    DurationTooLong {
        field: &'static str,
        value: u32,
        max: u32,
    },

    #[error("retirement age {retirement_age} must be greater than current age {current_age}")]
    RetirementBeforeCurrentAge {
        current_age: u32,
        retirement_age: u32,
    },

    #[error("{field} must be at most {max} (got {value})")]
    AgeOutOfRange {
        field: &'static str,
        value: u32,
        max: u32,
    },

    #[error("down payment {down_payment} exceeds home price {home_price}")]
    DownPaymentExceedsPrice { down_payment: f64, home_price: f64 },
}

/// Failure while loading or checking a tax table
#[derive(Debug, Error)]
pub enum TableError {
    #[error("failed to read tax table: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed tax table row: {0}")]
    Csv(#[from] csv::Error),

    #[error("unknown filing status '{0}'")]
    UnknownFilingStatus(String),

    #[error("no brackets defined for {0}")]
    MissingBrackets(String),

    #[error("no filing parameters defined for {0}")]
    MissingParameters(String),

    #[error("brackets for {status} are not contiguous at {bound}")]
    NonContiguous { status: String, bound: f64 },

    #[error("only the top bracket for {0} may be unbounded")]
    UnboundedBeforeTop(String),

    #[error("top bracket for {0} must be unbounded")]
    BoundedTop(String),
}

/// Failure while loading a calculator defaults file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read defaults file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid defaults file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Field-level checks shared by every input's `validate()`
pub(crate) mod check {
    use super::ValidationError;

    pub fn amount(field: &'static str, value: f64) -> Result<(), ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::NonFinite { field });
        }
        if value < 0.0 {
            return Err(ValidationError::NegativeAmount { field, value });
        }
        Ok(())
    }

    pub fn rate(field: &'static str, value: f64, max: f64) -> Result<(), ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::NonFinite { field });
        }
        if !(0.0..=max).contains(&value) {
            return Err(ValidationError::RateOutOfRange { field, value, max });
        }
        Ok(())
    }

    pub fn periods(field: &'static str, value: u32, max: u32) -> Result<(), ValidationError> {
        if value == 0 {
            return Err(ValidationError::ZeroDuration { field });
        }
        if value > max {
            return Err(ValidationError::DurationTooLong { field, value, max });
        }
        Ok(())
    }
}
