//! Histogram-binning and isotonic-regression probability calibrators
//!
//! Both calibrators run the same pipeline: validate `(probs, labels)`,
//! partition the samples, aggregate per-bin statistics and tabulate each
//! bin's lower bound against its positive rate. The isotonic calibrator pools
//! adjacent bins first so its table is non-decreasing.
//!
//! Predictions use the rightmost threshold strictly below the query; queries
//! at or below the first threshold take the first bin's value.
//!
//! # Examples
//!
//! ```rust
//! use calibration_core::{Calibrator, PartitionConfig};
//! use calibration_models::{CalibrationMethod, LookupTable};
//!
//! let config = PartitionConfig::from_params("count", &[("partition_num", 3.0)]).unwrap();
//! let mut model = CalibrationMethod::IsotonicRegression.build(config).unwrap();
//! model
//!     .fit(&[0.1, 0.2, 0.4, 0.5, 0.8, 0.9], &[0, 1, 0, 0, 1, 1])
//!     .unwrap();
//!
//! let calibrated = model.predict(&[0.15, 0.45, 0.85]).unwrap();
//! assert!(calibrated.windows(2).all(|w| w[0] <= w[1]));
//!
//! // Tables travel as JSON or two-column CSV
//! let table = LookupTable::new(vec![0.1, 0.8], vec![0.25, 1.0]).unwrap();
//! let restored = LookupTable::from_json(&table.to_json().unwrap()).unwrap();
//! assert_eq!(restored.predict(&[0.9]).unwrap(), vec![1.0]);
//! ```

pub mod factory;
pub mod histogram_binning;
pub mod isotonic;
mod pipeline;
pub mod table;

// Re-export main types
pub use factory::CalibrationMethod;
pub use histogram_binning::HistogramBinningCalibrator;
pub use isotonic::IsotonicRegressionCalibrator;
pub use table::LookupTable;

pub use calibration_core::{Calibrator, Error, PartitionConfig, Result};
