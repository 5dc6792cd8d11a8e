//! Shared rounding helpers

/// Tolerance used when comparing currency amounts (one cent)
pub const CURRENCY_EPSILON: f64 = 0.01;

/// Round a currency amount to 2 decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Convert a percentage (e.g. 8.0) to a decimal rate (0.08)
pub fn percent_to_decimal(percent: f64) -> f64 {
    percent / 100.0
}

/// Monthly periodic rate for an annual percentage
pub fn monthly_rate(annual_rate_percent: f64) -> f64 {
    percent_to_decimal(annual_rate_percent) / 12.0
}
