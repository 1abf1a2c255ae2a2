//! Partition scheme configuration
//!
//! A calibration model is configured with exactly one partition scheme and
//! the parameter that belongs to it. [`PartitionConfig`] carries both, so a
//! mismatched pair cannot be represented once constructed.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Name of a partitioning strategy, without its parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartitionScheme {
    /// Equal number of samples per bin
    Mass,
    /// Equal probability range per bin
    Width,
    /// Target number of bins
    Count,
}

impl PartitionScheme {
    /// Scheme name as accepted by [`FromStr`]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Mass => "mass",
            Self::Width => "width",
            Self::Count => "count",
        }
    }

    /// Keyword of the parameter this scheme requires
    pub fn parameter_name(&self) -> &'static str {
        match self {
            Self::Mass => "partition_size",
            Self::Width => "width",
            Self::Count => "partition_num",
        }
    }
}

impl FromStr for PartitionScheme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mass" => Ok(Self::Mass),
            "width" => Ok(Self::Width),
            "count" => Ok(Self::Count),
            _ => Err(Error::unknown_scheme(s)),
        }
    }
}

impl fmt::Display for PartitionScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const KNOWN_PARAMETERS: [&str; 3] = ["partition_size", "width", "partition_num"];

/// A partition scheme together with its parameter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "scheme", rename_all = "lowercase")]
pub enum PartitionConfig {
    /// `partition_size` consecutive samples per bin (last bin may be smaller)
    Mass { partition_size: usize },
    /// Bins of `width` in probability space, anchored at the minimum probability
    Width { width: f64 },
    /// About `partition_num` bins of equal size
    Count { partition_num: usize },
}

impl PartitionConfig {
    /// Equal-mass partitioning with `partition_size` samples per bin
    pub fn mass(partition_size: usize) -> Result<Self> {
        let config = Self::Mass { partition_size };
        config.validate()?;
        Ok(config)
    }

    /// Equal-width partitioning with bins of `width`
    pub fn width(width: f64) -> Result<Self> {
        let config = Self::Width { width };
        config.validate()?;
        Ok(config)
    }

    /// Fixed-count partitioning into about `partition_num` bins
    pub fn count(partition_num: usize) -> Result<Self> {
        let config = Self::Count { partition_num };
        config.validate()?;
        Ok(config)
    }

    /// Check the parameter is positive (and finite, for widths)
    ///
    /// Values obtained through `Deserialize` are unchecked until this is called.
    pub fn validate(&self) -> Result<()> {
        match *self {
            Self::Mass { partition_size: 0 } => Err(Error::non_positive("partition_size", 0.0)),
            Self::Count { partition_num: 0 } => Err(Error::non_positive("partition_num", 0.0)),
            Self::Width { width } if !(width.is_finite() && width > 0.0) => {
                Err(Error::non_positive("width", width))
            }
            _ => Ok(()),
        }
    }

    /// The scheme this configuration selects
    pub fn scheme(&self) -> PartitionScheme {
        match self {
            Self::Mass { .. } => PartitionScheme::Mass,
            Self::Width { .. } => PartitionScheme::Width,
            Self::Count { .. } => PartitionScheme::Count,
        }
    }

    /// Scheme name (`mass`, `width` or `count`)
    pub fn scheme_name(&self) -> &'static str {
        self.scheme().name()
    }

    /// Build a configuration from a scheme name and keyword parameters
    ///
    /// Accepted keywords are `partition_size`, `width` and `partition_num`;
    /// exactly the one matching `scheme` must be present.
    ///
    /// ```rust
    /// use calibration_core::PartitionConfig;
    ///
    /// let config = PartitionConfig::from_params("mass", &[("partition_size", 50.0)]).unwrap();
    /// assert_eq!(config, PartitionConfig::Mass { partition_size: 50 });
    ///
    /// assert!(PartitionConfig::from_params("mass", &[("width", 0.1)]).is_err());
    /// assert!(PartitionConfig::from_params("quantile", &[]).is_err());
    /// ```
    pub fn from_params(scheme: &str, params: &[(&str, f64)]) -> Result<Self> {
        let scheme: PartitionScheme = scheme.parse()?;
        let expected = scheme.parameter_name();

        let mut value = None;
        for &(key, v) in params {
            if !KNOWN_PARAMETERS.contains(&key) {
                return Err(Error::unknown_parameter(key));
            }
            if key != expected {
                return Err(Error::Configuration(format!(
                    "Parameter '{key}' does not apply to partition scheme '{scheme}' (expected '{expected}')"
                )));
            }
            if value.replace(v).is_some() {
                return Err(Error::Configuration(format!(
                    "Parameter '{key}' given more than once"
                )));
            }
        }

        let value = value.ok_or_else(|| Error::missing_parameter(scheme.name(), expected))?;
        match scheme {
            PartitionScheme::Mass => Self::mass(integral(expected, value)?),
            PartitionScheme::Width => Self::width(value),
            PartitionScheme::Count => Self::count(integral(expected, value)?),
        }
    }
}

impl fmt::Display for PartitionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mass { partition_size } => write!(f, "mass(partition_size={partition_size})"),
            Self::Width { width } => write!(f, "width(width={width})"),
            Self::Count { partition_num } => write!(f, "count(partition_num={partition_num})"),
        }
    }
}

fn integral(parameter: &str, value: f64) -> Result<usize> {
    if !(value.is_finite() && value > 0.0) {
        return Err(Error::non_positive(parameter, value));
    }
    if value.fract() != 0.0 || value > usize::MAX as f64 {
        return Err(Error::Configuration(format!(
            "{parameter} must be a positive integer, got {value}"
        )));
    }
    Ok(value as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_validate() {
        assert!(PartitionConfig::mass(10).is_ok());
        assert!(PartitionConfig::count(5).is_ok());
        assert!(PartitionConfig::width(0.1).is_ok());

        assert!(matches!(PartitionConfig::mass(0), Err(Error::Configuration(_))));
        assert!(matches!(PartitionConfig::count(0), Err(Error::Configuration(_))));
        assert!(matches!(PartitionConfig::width(0.0), Err(Error::Configuration(_))));
        assert!(matches!(PartitionConfig::width(-0.5), Err(Error::Configuration(_))));
        assert!(matches!(PartitionConfig::width(f64::NAN), Err(Error::Configuration(_))));
    }

    #[test]
    fn test_scheme_parsing() {
        assert_eq!("mass".parse::<PartitionScheme>().unwrap(), PartitionScheme::Mass);
        assert_eq!(" Width ".parse::<PartitionScheme>().unwrap(), PartitionScheme::Width);
        assert_eq!("count".parse::<PartitionScheme>().unwrap(), PartitionScheme::Count);
        assert!("equal-impression".parse::<PartitionScheme>().is_err());
    }

    #[test]
    fn test_from_params() {
        let config = PartitionConfig::from_params("width", &[("width", 0.25)]).unwrap();
        assert_eq!(config, PartitionConfig::Width { width: 0.25 });
        assert_eq!(config.scheme(), PartitionScheme::Width);

        let config = PartitionConfig::from_params("count", &[("partition_num", 4.0)]).unwrap();
        assert_eq!(config, PartitionConfig::Count { partition_num: 4 });
    }

    #[test]
    fn test_from_params_rejects_bad_keywords() {
        let err = PartitionConfig::from_params("mass", &[("bins", 3.0)]).unwrap_err();
        assert!(err.to_string().contains("Invalid parameter 'bins'"));

        let err = PartitionConfig::from_params("count", &[("partition_size", 3.0)]).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));

        let err = PartitionConfig::from_params("mass", &[]).unwrap_err();
        assert!(err.to_string().contains("requires parameter 'partition_size'"));

        let err = PartitionConfig::from_params(
            "mass",
            &[("partition_size", 3.0), ("partition_size", 4.0)],
        )
        .unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_from_params_rejects_bad_values() {
        assert!(PartitionConfig::from_params("mass", &[("partition_size", 0.0)]).is_err());
        assert!(PartitionConfig::from_params("mass", &[("partition_size", -2.0)]).is_err());
        assert!(PartitionConfig::from_params("mass", &[("partition_size", 2.5)]).is_err());
        assert!(PartitionConfig::from_params("width", &[("width", 0.0)]).is_err());
    }

    #[test]
    fn test_serde_round_trip_and_validation() {
        let json = r#"{"scheme":"mass","partition_size":25}"#;
        let config: PartitionConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config, PartitionConfig::Mass { partition_size: 25 });
        assert_eq!(serde_json::to_string(&config).unwrap(), json);

        let unchecked: PartitionConfig =
            serde_json::from_str(r#"{"scheme":"width","width":-1.0}"#).unwrap();
        assert!(unchecked.validate().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            PartitionConfig::Count { partition_num: 3 }.to_string(),
            "count(partition_num=3)"
        );
        assert_eq!(PartitionConfig::Width { width: 0.5 }.scheme_name(), "width");
    }
}
