//! Construction of calibrators by method name

use crate::{HistogramBinningCalibrator, IsotonicRegressionCalibrator};
use calibration_core::{Calibrator, Error, PartitionConfig, Result};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Calibration methods implemented by this crate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CalibrationMethod {
    /// Per-bin positive rate, no monotonicity constraint
    HistogramBinning,
    /// Per-bin positive rate pooled into a non-decreasing step function
    IsotonicRegression,
}

impl CalibrationMethod {
    /// Canonical method name
    pub fn name(&self) -> &'static str {
        match self {
            Self::HistogramBinning => "histogram_binning",
            Self::IsotonicRegression => "isotonic_regression",
        }
    }

    /// Whether fitted values are guaranteed non-decreasing
    pub fn is_monotone(&self) -> bool {
        matches!(self, Self::IsotonicRegression)
    }

    /// Create an unfitted calibrator for `config`
    pub fn build(self, config: PartitionConfig) -> Result<Box<dyn Calibrator>> {
        debug!(method = self.name(), monotone = self.is_monotone(), %config, "building calibrator");
        Ok(match self {
            Self::HistogramBinning => Box::new(HistogramBinningCalibrator::new(config)?),
            Self::IsotonicRegression => Box::new(IsotonicRegressionCalibrator::new(config)?),
        })
    }
}

impl FromStr for CalibrationMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "histogram" | "histogram_binning" => Ok(Self::HistogramBinning),
            "isotonic" | "isotonic_regression" => Ok(Self::IsotonicRegression),
            _ => Err(Error::Configuration(format!(
                "Unknown calibration method '{s}': expected histogram_binning or isotonic_regression"
            ))),
        }
    }
}

impl fmt::Display for CalibrationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
