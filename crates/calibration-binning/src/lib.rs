//! Binning engine for probability calibration
//!
//! This crate turns a labelled sample set into ordered bins and back into
//! lookups:
//!
//! - [`Partitioner`]: stable sort by probability, then equal-mass,
//!   equal-width or fixed-count partition ids
//! - [`Bin`]: per-partition samples with bounds, mean probability and
//!   mean label
//! - [`monotonic_smoothing`]: pooled-adjacent-violators merge of bins
//! - [`strict_predecessor`]: binary search over ascending bin thresholds
//!
//! # Example
//!
//! ```rust
//! use calibration_binning::{build_bins, monotonic_smoothing, Partitioner};
//! use calibration_core::{samples_from, PartitionConfig};
//!
//! let samples = samples_from(&[0.1, 0.2, 0.3, 0.8, 0.9, 0.95], &[0, 1, 0, 0, 1, 1]).unwrap();
//! let partitioner = Partitioner::new(PartitionConfig::mass(2).unwrap()).unwrap();
//! let partition = partitioner.partition(&samples).unwrap();
//!
//! let bins = build_bins(&partition).unwrap();
//! let scores: Vec<f64> = bins.iter().filter_map(|b| b.calibrated_score()).collect();
//! assert_eq!(scores, vec![0.5, 0.0, 1.0]);
//!
//! let smoothed = monotonic_smoothing(bins).unwrap();
//! assert_eq!(smoothed.len(), 2);
//! ```

pub mod bin;
pub mod lookup;
pub mod partition;
pub mod smoothing;

// Re-export main types and functions
pub use bin::{build_bins, compute_all_statistics, Bin, BinStatistics};
pub use lookup::{bin_index, strict_predecessor};
pub use partition::{partition, Partition, Partitioner};
pub use smoothing::{is_non_decreasing, monotonic_smoothing};

pub use calibration_core::{Error, Result};
