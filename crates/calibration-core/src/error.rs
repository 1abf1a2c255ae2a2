//! Error types for probability calibration
//!
//! Provides a unified error type for all calibration crates.

use thiserror::Error;

/// Core error type for calibration operations
#[derive(Error, Debug)]
pub enum Error {
    /// Input arrays are malformed (length, domain or emptiness)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Partition scheme or one of its parameters is unusable
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A partition id ended up with no samples when statistics were requested
    #[error("Empty bin: partition {partition_id} received no samples")]
    EmptyBin { partition_id: usize },

    /// The model was queried before `fit` succeeded
    #[error("Model not fitted: call fit() before {operation}")]
    NotFitted { operation: &'static str },

    /// Fitted table could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// IO error (for file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

// Helper functions for common error patterns

impl Error {
    /// Create an error for empty input
    pub fn empty_input(array: &str) -> Self {
        Self::Validation(format!("{array} array must contain at least 1 element"))
    }

    /// Create an error for probs/labels length mismatch
    pub fn size_mismatch(probs: usize, labels: usize) -> Self {
        Self::Validation(format!(
            "Size mismatch: probs array contains {probs} elements, labels array contains {labels} elements"
        ))
    }

    /// Create an error for a probability outside [0, 1]
    pub fn probability_out_of_range(array: &str, index: usize, value: f64) -> Self {
        Self::Validation(format!(
            "{array}[{index}] = {value} is out of bounds: expected a value in [0, 1]"
        ))
    }

    /// Create an error for a label outside {0, 1}
    pub fn invalid_label(array: &str, index: usize, value: u8) -> Self {
        Self::Validation(format!(
            "{array}[{index}] = {value} is not a binary label: expected 0 or 1"
        ))
    }

    /// Create an error for a non-positive scheme parameter
    pub fn non_positive(parameter: &str, value: f64) -> Self {
        Self::Configuration(format!("{parameter} must be positive, got {value}"))
    }

    /// Create an error for an unrecognised scheme name
    pub fn unknown_scheme(name: &str) -> Self {
        Self::Configuration(format!(
            "Unknown partition scheme '{name}': valid schemes are mass, width and count"
        ))
    }

    /// Create an error for an unrecognised keyword parameter
    pub fn unknown_parameter(name: &str) -> Self {
        Self::Configuration(format!(
            "Invalid parameter '{name}': expected one of partition_size, width, partition_num"
        ))
    }

    /// Create an error for a scheme whose parameter was not supplied
    pub fn missing_parameter(scheme: &str, parameter: &str) -> Self {
        Self::Configuration(format!(
            "Partition scheme '{scheme}' requires parameter '{parameter}'"
        ))
    }
}
