use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The sampling frequency of a price series.
///
/// The serialized form is the provider code (`1d`, `1wk`, `1mo`, `3mo`), which is
/// also the label shown to users in the summary table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Interval {
    #[default]
    #[serde(rename = "1d")]
    Daily,
    #[serde(rename = "1wk")]
    Weekly,
    #[serde(rename = "1mo")]
    Monthly,
    #[serde(rename = "3mo")]
    Quarterly,
}

impl Interval {
    pub const ALL: [Self; 4] = [Self::Daily, Self::Weekly, Self::Monthly, Self::Quarterly];

    /// Returns the provider code for this interval.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Interval::Daily => "1d",
            Interval::Weekly => "1wk",
            Interval::Monthly => "1mo",
            Interval::Quarterly => "3mo",
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interval {
    type Err = CoreError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "1d" | "daily" => Ok(Interval::Daily),
            "1wk" | "weekly" => Ok(Interval::Weekly),
            "1mo" | "monthly" => Ok(Interval::Monthly),
            "3mo" | "quarterly" => Ok(Interval::Quarterly),
            other => Err(CoreError::InvalidInput(
                "interval".to_string(),
                format!("'{}' is not one of 1d, 1wk, 1mo, 3mo", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_provider_codes_and_names() {
        assert_eq!(Interval::from_str("1wk").unwrap(), Interval::Weekly);
        assert_eq!(Interval::from_str(" Quarterly ").unwrap(), Interval::Quarterly);
    }

    #[test]
    fn rejects_unsupported_interval() {
        let err = Interval::from_str("1h").unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(..)));
    }

    #[test]
    fn display_matches_serialized_code() {
        for interval in Interval::ALL {
            assert_eq!(interval.to_string(), interval.as_str());
            assert_eq!(Interval::from_str(interval.as_str()).unwrap(), interval);
        }
    }
}
