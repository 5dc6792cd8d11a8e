//! Compounding frequencies shared by the growth engine and rate converter

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How often interest is compounded within a year
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompoundingFrequency {
    Daily,
    #[default]
    Monthly,
    Quarterly,
    SemiAnnually,
    Annually,
}

impl CompoundingFrequency {
    /// All variants ordered from least to most frequent
    pub const ALL: [CompoundingFrequency; 5] = [
        CompoundingFrequency::Annually,
        CompoundingFrequency::SemiAnnually,
        CompoundingFrequency::Quarterly,
        CompoundingFrequency::Monthly,
        CompoundingFrequency::Daily,
    ];

    /// Compounding periods per year
    pub fn periods_per_year(&self) -> u32 {
        match self {
            CompoundingFrequency::Daily => 365,
            CompoundingFrequency::Monthly => 12,
            CompoundingFrequency::Quarterly => 4,
            CompoundingFrequency::SemiAnnually => 2,
            CompoundingFrequency::Annually => 1,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            CompoundingFrequency::Daily => "daily",
            CompoundingFrequency::Monthly => "monthly",
            CompoundingFrequency::Quarterly => "quarterly",
            CompoundingFrequency::SemiAnnually => "semi-annually",
            CompoundingFrequency::Annually => "annually",
        }
    }
}

impl fmt::Display for CompoundingFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CompoundingFrequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "daily" => Ok(CompoundingFrequency::Daily),
            "monthly" => Ok(CompoundingFrequency::Monthly),
            "quarterly" => Ok(CompoundingFrequency::Quarterly),
            "semi-annually" | "semiannually" => Ok(CompoundingFrequency::SemiAnnually),
            "annually" | "yearly" => Ok(CompoundingFrequency::Annually),
            other => Err(format!("Unknown compounding frequency: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_periods_per_year() {
        let periods: Vec<u32> = CompoundingFrequency::ALL
            .iter()
            .map(|f| f.periods_per_year())
            .collect();
        assert_eq!(periods, vec![1, 2, 4, 12, 365]);
    }

    #[test]
    fn test_parse() {
        assert_eq!("semi_annually".parse(), Ok(CompoundingFrequency::SemiAnnually));
        assert_eq!("Yearly".parse(), Ok(CompoundingFrequency::Annually));
        assert!("weekly".parse::<CompoundingFrequency>().is_err());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&CompoundingFrequency::SemiAnnually).unwrap();
        assert_eq!(json, "\"semi_annually\"");
    }

    #[test]
    fn test_default_is_monthly() {
        assert_eq!(CompoundingFrequency::default(), CompoundingFrequency::Monthly);
    }
}
