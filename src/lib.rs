//! Monotone probability calibration
//!
//! Learns a mapping from raw model scores to calibrated probabilities and
//! measures how far scores are from calibrated.
//!
//! - [`calibration_core`]: errors, samples, partition configuration, the
//!   [`Calibrator`](calibration_core::Calibrator) trait
//! - [`calibration_binning`]: partitioning, bin statistics, monotonic smoothing,
//!   predecessor lookup
//! - [`calibration_models`]: histogram-binning and isotonic-regression
//!   calibrators, lookup tables
//! - [`calibration_metrics`]: expected calibration error and reliability reports
//!
//! ```rust
//! use monotone_calibration::prelude::*;
//!
//! let probs = [0.1, 0.2, 0.3, 0.8, 0.9, 0.95];
//! let labels = [0, 0, 0, 1, 1, 1];
//! let config = PartitionConfig::mass(2).unwrap();
//!
//! let mut model = IsotonicRegressionCalibrator::new(config).unwrap();
//! model.fit(&probs, &labels).unwrap();
//! assert_eq!(model.predict(&[0.05, 0.35, 1.0]).unwrap(), vec![0.0, 0.5, 1.0]);
//!
//! let before = ece(&probs, &labels, &config).unwrap();
//! assert!(before > 0.0);
//! ```

pub use calibration_binning;
pub use calibration_core;
pub use calibration_metrics;
pub use calibration_models;

/// Commonly used types and functions
pub mod prelude {
    pub use calibration_core::{Calibrator, Error, PartitionConfig, PartitionScheme, Result, Sample};
    pub use calibration_metrics::{ece, ece_with_params, reliability_report, ReliabilityReport};
    pub use calibration_models::{
        CalibrationMethod, HistogramBinningCalibrator, IsotonicRegressionCalibrator, LookupTable,
    };
}
