//! Expected calibration error
//!
//! The evaluation set is partitioned with the same machinery the calibrators
//! use. Every bin contributes the absolute gap between its accuracy (mean
//! label) and its confidence (mean probability), weighted by its share of the
//! samples.

use calibration_binning::{build_bins, Bin, Partitioner};
use calibration_core::{Error, PartitionConfig, Result};
use serde::Serialize;
use std::fmt;
use tracing::{debug, instrument};

/// One row of a reliability diagram
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReliabilityBin {
    /// Smallest probability in the bin
    pub low_prob: f64,
    /// Largest probability in the bin
    pub high_prob: f64,
    /// Number of samples
    pub count: usize,
    /// Mean probability
    pub confidence: f64,
    /// Fraction of positive labels
    pub accuracy: f64,
    /// `|accuracy - confidence|`
    pub gap: f64,
}

/// Per-bin calibration summary of an evaluation set
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReliabilityReport {
    pub bins: Vec<ReliabilityBin>,
    /// Sample-weighted mean gap
    pub ece: f64,
    /// Largest gap of any bin
    pub mce: f64,
    pub total: usize,
}

impl ReliabilityReport {
    fn from_bins(bins: &[Bin]) -> Result<Self> {
        let rows = bins
            .iter()
            .map(|bin| {
                let stats = bin
                    .statistics()
                    .ok_or(Error::EmptyBin { partition_id: bin.id() })?;
                Ok(ReliabilityBin {
                    low_prob: stats.low_prob,
                    high_prob: stats.high_prob,
                    count: stats.count,
                    confidence: stats.avg_prob,
                    accuracy: stats.calibrated_score,
                    gap: stats.gap(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let total: usize = rows.iter().map(|r| r.count).sum();
        let ece = rows
            .iter()
            .map(|r| r.count as f64 / total as f64 * r.gap)
            .sum();
        let mce = rows.iter().map(|r| r.gap).fold(0.0, f64::max);

        Ok(Self {
            bins: rows,
            ece,
            mce,
            total,
        })
    }
}

impl fmt::Display for ReliabilityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>14} {:>7} {:>10} {:>8} {:>6}",
            "range", "count", "confidence", "accuracy", "gap"
        )?;
        for row in &self.bins {
            writeln!(
                f,
                "[{:.3}, {:.3}] {:>7} {:>10.3} {:>8.3} {:>6.3}",
                row.low_prob, row.high_prob, row.count, row.confidence, row.accuracy, row.gap
            )?;
        }
        write!(f, "ECE = {:.4}, MCE = {:.4} over {} samples", self.ece, self.mce, self.total)
    }
}

/// Reliability rows, ECE and MCE of `(probs, labels)` under `config`
#[instrument(skip_all, fields(scheme = %config, n = probs.len()))]
pub fn reliability_report(
    probs: &[f64],
    labels: &[u8],
    config: &PartitionConfig,
) -> Result<ReliabilityReport> {
    let partition = Partitioner::new(*config)?.partition_inputs(probs, labels)?;
    let bins = build_bins(&partition)?;
    let report = ReliabilityReport::from_bins(&bins)?;
    debug!(bins = report.bins.len(), ece = report.ece, mce = report.mce, "evaluated calibration");
    Ok(report)
}

/// Expected calibration error, in [0, 1]
///
/// # Example
///
/// ```rust
/// use calibration_core::PartitionConfig;
/// use calibration_metrics::ece;
///
/// // one bin: confidence 0.5, accuracy 0.75
/// let e = ece(&[0.4, 0.5, 0.5, 0.6], &[1, 1, 0, 1], &PartitionConfig::count(1).unwrap()).unwrap();
/// assert!((e - 0.25).abs() < 1e-12);
/// ```
pub fn ece(probs: &[f64], labels: &[u8], config: &PartitionConfig) -> Result<f64> {
    reliability_report(probs, labels, config).map(|report| report.ece)
}

/// [`ece`] with the scheme given by name and keyword parameters
pub fn ece_with_params(
    probs: &[f64],
    labels: &[u8],
    scheme: &str,
    params: &[(&str, f64)],
) -> Result<f64> {
    let config = PartitionConfig::from_params(scheme, params)?;
    ece(probs, labels, &config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_hand_computed_ece() {
        // bins {0.1,0.2}: conf 0.15 acc 0.0; {0.3,0.8}: conf 0.55 acc 0.5; {0.9,0.95}: conf 0.925 acc 1.0
        let probs = [0.1, 0.2, 0.3, 0.8, 0.9, 0.95];
        let labels = [0, 0, 0, 1, 1, 1];
        let report = reliability_report(&probs, &labels, &PartitionConfig::mass(2).unwrap()).unwrap();

        assert_eq!(report.bins.len(), 3);
        assert_eq!(report.total, 6);
        assert_relative_eq!(report.bins[0].gap, 0.15, epsilon = 1e-12);
        assert_relative_eq!(report.bins[1].gap, 0.05, epsilon = 1e-12);
        assert_relative_eq!(report.bins[2].gap, 0.075, epsilon = 1e-12);
        assert_relative_eq!(report.ece, (0.15 + 0.05 + 0.075) / 3.0, epsilon = 1e-12);
        assert_relative_eq!(report.mce, 0.15, epsilon = 1e-12);
    }

    #[test]
    fn test_weights_by_bin_size() {
        let probs = [0.2, 0.2, 0.2, 0.9];
        let labels = [0, 0, 1, 1];

        let e = ece(&probs, &labels, &PartitionConfig::mass(3).unwrap()).unwrap();
        // bin 1: conf 0.2 acc 1/3 (gap 2/15), bin 2: conf 0.9 acc 1 (gap 0.1)
        assert_relative_eq!(e, 0.75 * (2.0 / 15.0) + 0.25 * 0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_perfectly_calibrated_is_zero() {
        // each bin's mean label equals its mean probability
        let probs = [0.25, 0.25, 0.25, 0.25, 0.75, 0.75, 0.75, 0.75];
        let labels = [1, 0, 0, 0, 1, 1, 1, 0];
        let report = reliability_report(&probs, &labels, &PartitionConfig::mass(4).unwrap()).unwrap();
        assert_eq!(report.bins.len(), 2);
        assert_relative_eq!(report.ece, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_worst_case_is_one() {
        let e = ece(&[0.0, 1.0], &[1, 0], &PartitionConfig::mass(1).unwrap()).unwrap();
        assert_relative_eq!(e, 1.0);
    }

    #[test]
    fn test_keyword_form() {
        let probs = [0.1, 0.2, 0.3, 0.8, 0.9, 0.95];
        let labels = [0, 0, 0, 1, 1, 1];
        let by_params = ece_with_params(&probs, &labels, "count", &[("partition_num", 3.0)]).unwrap();
        let by_config = ece(&probs, &labels, &PartitionConfig::count(3).unwrap()).unwrap();
        assert_eq!(by_params, by_config);

        assert!(matches!(
            ece_with_params(&probs, &labels, "count", &[("width", 0.1)]),
            Err(Error::Configuration(_))
        ));
        assert!(matches!(
            ece_with_params(&probs, &labels, "quantile", &[]),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn test_rejects_invalid_input() {
        let config = PartitionConfig::mass(2).unwrap();
        assert!(matches!(ece(&[], &[], &config), Err(Error::Validation(_))));
        assert!(matches!(ece(&[0.1, 0.2], &[0], &config), Err(Error::Validation(_))));
        assert!(matches!(ece(&[1.2], &[0], &config), Err(Error::Validation(_))));
        assert!(matches!(ece(&[0.5], &[3], &config), Err(Error::Validation(_))));
    }

    #[test]
    fn test_report_serializes_rows() {
        let report = reliability_report(&[0.2, 0.8], &[0, 1], &PartitionConfig::mass(1).unwrap()).unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["total"], 2);
        assert_eq!(json["bins"].as_array().unwrap().len(), 2);
        let first = &json["bins"][0];
        assert_eq!(first["count"], 1);
        assert_eq!(first["low_prob"], 0.2);
        assert_eq!(first["confidence"], 0.2);
        assert_eq!(first["accuracy"], 0.0);
        assert_relative_eq!(json["ece"].as_f64().unwrap(), report.ece);
        assert_relative_eq!(json["mce"].as_f64().unwrap(), 0.2, epsilon = 1e-12);
    }

    #[test]
    fn test_report_display() {
        let report = reliability_report(&[0.2, 0.8], &[0, 1], &PartitionConfig::mass(1).unwrap()).unwrap();
        let text = report.to_string();
        assert!(text.starts_with("         range"));
        assert!(text.ends_with("ECE = 0.2000, MCE = 0.2000 over 2 samples"));
    }
}
