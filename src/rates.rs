//! APR / APY conversion

use serde::{Deserialize, Serialize};

use crate::error::{check, ValidationError};
use crate::frequency::CompoundingFrequency;
use crate::rounding::percent_to_decimal;

/// Direction of a conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionDirection {
    AprToApy,
    ApyToApr,
}

/// Inputs for a rate conversion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateConversionInput {
    pub rate_percent: f64,
    pub direction: ConversionDirection,
    #[serde(default)]
    pub frequency: CompoundingFrequency,
}

impl RateConversionInput {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check::rate("rate_percent", self.rate_percent, 100.0)
    }
}

/// Converted rate with a human-readable description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateConversionResult {
    pub rate_percent: f64,
    pub description: String,
}

/// Effective annual rate for a nominal rate compounded `frequency` times a year
pub fn apr_to_apy(apr_percent: f64, frequency: CompoundingFrequency) -> RateConversionResult {
    let n = frequency.periods_per_year() as f64;
    let apr = percent_to_decimal(apr_percent);
    let apy_percent = ((1.0 + apr / n).powf(n) - 1.0) * 100.0;

    RateConversionResult {
        rate_percent: apy_percent,
        description: format!(
            "{:.2}% APR compounded {} is {:.4}% APY",
            apr_percent, frequency, apy_percent
        ),
    }
}

/// Nominal annual rate that yields the given effective rate
pub fn apy_to_apr(apy_percent: f64, frequency: CompoundingFrequency) -> RateConversionResult {
    let n = frequency.periods_per_year() as f64;
    let apy = percent_to_decimal(apy_percent);
    let apr_percent = n * ((1.0 + apy).powf(1.0 / n) - 1.0) * 100.0;

    RateConversionResult {
        rate_percent: apr_percent,
        description: format!(
            "{:.2}% APY is {:.4}% APR compounded {}",
            apy_percent, apr_percent, frequency
        ),
    }
}

/// Run a conversion in the requested direction
pub fn convert(input: &RateConversionInput) -> RateConversionResult {
    match input.direction {
        ConversionDirection::AprToApy => apr_to_apy(input.rate_percent, input.frequency),
        ConversionDirection::ApyToApr => apy_to_apr(input.rate_percent, input.frequency),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_monthly_apy() {
        let result = apr_to_apy(12.0, CompoundingFrequency::Monthly);
        assert_abs_diff_eq!(result.rate_percent, 12.682503, epsilon = 1e-6);
        assert_eq!(result.description, "12.00% APR compounded monthly is 12.6825% APY");
    }

    #[test]
    fn test_annual_compounding_is_identity() {
        let result = apr_to_apy(5.0, CompoundingFrequency::Annually);
        assert_abs_diff_eq!(result.rate_percent, 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_apy_increases_with_frequency() {
        let apys: Vec<f64> = CompoundingFrequency::ALL
            .iter()
            .map(|&f| apr_to_apy(6.0, f).rate_percent)
            .collect();
        for pair in apys.windows(2) {
            assert!(pair[1] > pair[0], "{:?}", apys);
        }
    }

    #[test]
    fn test_round_trip() {
        for &frequency in &CompoundingFrequency::ALL {
            for &apr in &[0.0, 0.5, 4.25, 19.99, 100.0] {
                let apy = apr_to_apy(apr, frequency).rate_percent;
                let back = apy_to_apr(apy, frequency).rate_percent;
                assert_abs_diff_eq!(back, apr, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_convert_dispatch() {
        let input = RateConversionInput {
            rate_percent: 5.0,
            direction: ConversionDirection::ApyToApr,
            frequency: CompoundingFrequency::Quarterly,
        };
        let result = convert(&input);
        assert!(result.rate_percent < 5.0);
        assert!(result.description.contains("APR compounded quarterly"));
    }

    #[test]
    fn test_validate_rate_range() {
        let mut input = RateConversionInput {
            rate_percent: 100.0,
            direction: ConversionDirection::AprToApy,
            frequency: CompoundingFrequency::Daily,
        };
        assert!(input.validate().is_ok());

        input.rate_percent = 100.01;
        assert_eq!(
            input.validate(),
            Err(ValidationError::RateOutOfRange {
                field: "rate_percent",
                value: 100.01,
                max: 100.0,
            })
        );

        input.rate_percent = -0.5;
        assert!(input.validate().is_err());

        input.rate_percent = f64::INFINITY;
        assert_eq!(
            input.validate(),
            Err(ValidationError::NonFinite { field: "rate_percent" })
        );
    }
}
