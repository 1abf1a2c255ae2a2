//! Core traits and types for probability calibration
//!
//! This crate holds the pieces shared by every calibration crate:
//!
//! - [`Error`] / [`Result`]: the error taxonomy (validation, configuration,
//!   empty bins, unfitted models)
//! - [`Sample`] and [`validate_inputs`]: the labelled-probability input model
//! - [`PartitionConfig`]: the partition scheme with its parameter
//! - [`Calibrator`]: the `fit`/`predict` seam all calibrators implement

pub mod config;
pub mod error;
pub mod sample;
pub mod traits;

// Re-export core types
pub use config::{PartitionConfig, PartitionScheme};
pub use error::{Error, Result};
pub use sample::{check_probability, samples_from, validate_inputs, validate_probabilities, Sample};
pub use traits::Calibrator;
