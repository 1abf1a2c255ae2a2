//! Histogram-binning calibrator
//!
//! Each bin's calibrated value is the observed positive rate of its training
//! samples. No smoothing is applied, so the fitted values follow the observed
//! frequencies even where they decrease with probability.

use crate::pipeline::{self, Fitted};
use crate::table::LookupTable;
use calibration_binning::Bin;
use calibration_core::{Calibrator, PartitionConfig, Result};
use tracing::{debug, instrument};

/// Calibrates by looking up the positive rate of the matching bin
///
/// # Example
///
/// ```rust
/// use calibration_core::PartitionConfig;
/// use calibration_models::HistogramBinningCalibrator;
///
/// let mut model = HistogramBinningCalibrator::new(PartitionConfig::mass(2).unwrap()).unwrap();
/// model
///     .fit(&[0.1, 0.2, 0.3, 0.8, 0.9, 0.95], &[0, 0, 0, 1, 1, 1])
///     .unwrap();
///
/// let (thresholds, values) = model.get_model().unwrap();
/// assert_eq!(thresholds, &[0.1, 0.3, 0.9]);
/// assert_eq!(values, &[0.0, 0.5, 1.0]);
/// assert_eq!(model.predict(&[0.05, 0.35, 1.0]).unwrap(), vec![0.0, 0.5, 1.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBinningCalibrator {
    config: PartitionConfig,
    fitted: Option<Fitted>,
}

impl HistogramBinningCalibrator {
    /// Create an unfitted calibrator
    pub fn new(config: PartitionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            fitted: None,
        })
    }

    /// Create an unfitted calibrator from a scheme name and keyword parameters
    pub fn from_params(scheme: &str, params: &[(&str, f64)]) -> Result<Self> {
        Self::new(PartitionConfig::from_params(scheme, params)?)
    }

    /// The partition configuration
    pub fn config(&self) -> &PartitionConfig {
        &self.config
    }

    /// Learn per-bin positive rates
    ///
    /// Inputs are validated before any work; on error the previous fit is kept.
    #[instrument(skip_all, fields(scheme = %self.config, n = probs.len()))]
    pub fn fit(&mut self, probs: &[f64], labels: &[u8]) -> Result<()> {
        let bins = pipeline::fit_bins(&self.config, probs, labels)?;
        let fitted = Fitted::from_bins(bins)?;
        debug!(bins = fitted.table.len(), "fitted histogram binning");
        self.fitted = Some(fitted);
        Ok(())
    }

    /// Calibrated value for each probability
    pub fn predict(&self, probs: &[f64]) -> Result<Vec<f64>> {
        pipeline::require(&self.fitted, "predict")?.table.predict(probs)
    }

    /// The fitted `(thresholds, values)` pair
    pub fn get_model(&self) -> Result<(&[f64], &[f64])> {
        let table = &pipeline::require(&self.fitted, "get_model")?.table;
        Ok((table.thresholds(), table.values()))
    }

    /// The fitted lookup table
    pub fn lookup_table(&self) -> Result<&LookupTable> {
        Ok(&pipeline::require(&self.fitted, "lookup_table")?.table)
    }

    /// Bins from the last fit, in ascending probability order
    pub fn bins(&self) -> &[Bin] {
        match &self.fitted {
            Some(fitted) => &fitted.bins,
            None => &[],
        }
    }

    /// Whether `fit` has succeeded
    pub fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }
}

impl Calibrator for HistogramBinningCalibrator {
    fn fit(&mut self, probs: &[f64], labels: &[u8]) -> Result<()> {
        HistogramBinningCalibrator::fit(self, probs, labels)
    }

    fn predict(&self, probs: &[f64]) -> Result<Vec<f64>> {
        HistogramBinningCalibrator::predict(self, probs)
    }

    fn name(&self) -> &'static str {
        "histogram_binning"
    }

    fn is_fitted(&self) -> bool {
        HistogramBinningCalibrator::is_fitted(self)
    }
}
