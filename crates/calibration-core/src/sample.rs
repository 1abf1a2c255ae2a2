//! Labelled probability samples and input validation

use crate::{Error, Result};

/// A single (uncalibrated probability, binary label) observation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Uncalibrated score in [0, 1]
    pub probability: f64,
    /// Outcome, 0 or 1
    pub label: u8,
}

impl Sample {
    /// Create a new sample without validation
    pub fn new(probability: f64, label: u8) -> Self {
        Self { probability, label }
    }

    /// Label as a float, for averaging
    pub fn label_f64(&self) -> f64 {
        f64::from(self.label)
    }
}

/// Check that `value` is a finite probability in [0, 1]
pub fn check_probability(array: &str, index: usize, value: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        // NaN fails the range check too
        return Err(Error::probability_out_of_range(array, index, value));
    }
    Ok(())
}

/// Check that every query probability lies in [0, 1]
pub fn validate_probabilities(array: &str, probs: &[f64]) -> Result<()> {
    probs
        .iter()
        .enumerate()
        .try_for_each(|(i, &p)| check_probability(array, i, p))
}

/// Validate a training set eagerly, before any partitioning work
///
/// Fails with [`Error::Validation`] on a length mismatch, empty input,
/// a probability outside [0, 1] or a label outside {0, 1}.
pub fn validate_inputs(probs: &[f64], labels: &[u8]) -> Result<()> {
    if probs.len() != labels.len() {
        return Err(Error::size_mismatch(probs.len(), labels.len()));
    }
    if probs.is_empty() {
        return Err(Error::empty_input("probs"));
    }

    validate_probabilities("probs", probs)?;

    if let Some((i, &label)) = labels.iter().enumerate().find(|(_, &l)| l > 1) {
        return Err(Error::invalid_label("labels", i, label));
    }

    Ok(())
}

/// Validate and zip parallel arrays into samples, preserving input order
pub fn samples_from(probs: &[f64], labels: &[u8]) -> Result<Vec<Sample>> {
    validate_inputs(probs, labels)?;
    Ok(probs
        .iter()
        .zip(labels)
        .map(|(&p, &l)| Sample::new(p, l))
        .collect())
}
