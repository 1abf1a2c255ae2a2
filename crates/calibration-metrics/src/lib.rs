//! Calibration quality metrics
//!
//! [`ece`] scores a fixed `(probs, labels)` set against itself using the
//! same partition schemes as the calibrators; [`reliability_report`] keeps the
//! per-bin rows behind the number.
//!
//! ```rust
//! use calibration_core::PartitionConfig;
//! use calibration_metrics::reliability_report;
//!
//! let report = reliability_report(
//!     &[0.1, 0.2, 0.3, 0.8, 0.9, 0.95],
//!     &[0, 0, 0, 1, 1, 1],
//!     &PartitionConfig::mass(2).unwrap(),
//! )
//! .unwrap();
//! assert_eq!(report.bins.len(), 3);
//! assert!(report.ece <= report.mce);
//! ```

pub mod ece;

pub use ece::{ece, ece_with_params, reliability_report, ReliabilityBin, ReliabilityReport};
pub use calibration_core::{Error, Result};
