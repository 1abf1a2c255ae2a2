//! Isotonic-regression calibrator
//!
//! Fits bins exactly like histogram binning, then pools adjacent bins whose
//! scores decrease. The fitted values are non-decreasing in probability, so
//! predictions are monotone as well.

use crate::pipeline::{self, Fitted};
use crate::table::LookupTable;
use calibration_binning::{monotonic_smoothing, Bin};
use calibration_core::{Calibrator, PartitionConfig, Result};
use tracing::{debug, instrument};

/// Monotone calibrator based on pooled adjacent violators over bins
///
/// # Example
///
/// ```rust
/// use calibration_core::PartitionConfig;
/// use calibration_models::IsotonicRegressionCalibrator;
///
/// let mut model = IsotonicRegressionCalibrator::new(PartitionConfig::mass(2).unwrap()).unwrap();
/// model.fit(&[0.1, 0.2, 0.3, 0.4, 0.7, 0.9], &[1, 0, 0, 0, 1, 1]).unwrap();
///
/// // bins score 0.5, 0.0, 1.0: the first two are pooled
/// let (thresholds, values) = model.get_model().unwrap();
/// assert_eq!(thresholds, &[0.1, 0.7]);
/// assert_eq!(values, &[0.25, 1.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct IsotonicRegressionCalibrator {
    config: PartitionConfig,
    fitted: Option<Fitted>,
}

impl IsotonicRegressionCalibrator {
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

    /// Learn bin scores, then enforce monotonicity
    ///
    /// Inputs are validated before any work; on error the previous fit is kept.
    #[instrument(skip_all, fields(scheme = %self.config, n = probs.len()))]
    pub fn fit(&mut self, probs: &[f64], labels: &[u8]) -> Result<()> {
        let bins = pipeline::fit_bins(&self.config, probs, labels)?;
        let raw_bins = bins.len();
        let blocks = monotonic_smoothing(bins)?;
        let fitted = Fitted::from_bins(blocks)?;
        debug!(raw_bins, blocks = fitted.table.len(), "fitted isotonic regression");
        self.fitted = Some(fitted);
        Ok(())
    }

    /// Calibrated value for each probability; non-decreasing in the input
    pub fn predict(&self, probs: &[f64]) -> Result<Vec<f64>> {
        pipeline::require(&self.fitted, "predict")?.table.predict(probs)
    }

    /// The fitted `(thresholds, values)` pair; `values` is non-decreasing
    pub fn get_model(&self) -> Result<(&[f64], &[f64])> {
        let table = &pipeline::require(&self.fitted, "get_model")?.table;
        Ok((table.thresholds(), table.values()))
    }

    /// The fitted lookup table
    pub fn lookup_table(&self) -> Result<&LookupTable> {
        Ok(&pipeline::require(&self.fitted, "lookup_table")?.table)
    }

    /// Merged blocks from the last fit
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

impl Calibrator for IsotonicRegressionCalibrator {
    fn fit(&mut self, probs: &[f64], labels: &[u8]) -> Result<()> {
        IsotonicRegressionCalibrator::fit(self, probs, labels)
    }

    fn predict(&self, probs: &[f64]) -> Result<Vec<f64>> {
        IsotonicRegressionCalibrator::predict(self, probs)
    }

    fn name(&self) -> &'static str {
        "isotonic_regression"
    }

    fn is_fitted(&self) -> bool {
        IsotonicRegressionCalibrator::is_fitted(self)
    }
}
