//! Core traits for probability calibrators
//!
//! Every calibrator, whether it learns a binned lookup table or delegates to
//! an external optimizer, is driven through the same two calls: `fit` on a
//! labelled training set, then `predict` on fresh scores.

use crate::Result;

/// A learned mapping from raw probabilities to calibrated probabilities
///
/// # Example
///
/// ```rust
/// use calibration_core::{Calibrator, Error, Result, validate_inputs};
///
/// /// Predicts the training base rate for every query
/// #[derive(Default)]
/// struct BaseRate {
///     rate: Option<f64>,
/// }
///
/// impl Calibrator for BaseRate {
///     fn fit(&mut self, probs: &[f64], labels: &[u8]) -> Result<()> {
///         validate_inputs(probs, labels)?;
///         let positives = labels.iter().map(|&l| f64::from(l)).sum::<f64>();
///         self.rate = Some(positives / labels.len() as f64);
///         Ok(())
///     }
///
///     fn predict(&self, probs: &[f64]) -> Result<Vec<f64>> {
///         let rate = self.rate.ok_or(Error::NotFitted { operation: "predict" })?;
///         Ok(vec![rate; probs.len()])
///     }
///
///     fn name(&self) -> &'static str {
///         "base_rate"
///     }
///
///     fn is_fitted(&self) -> bool {
///         self.rate.is_some()
///     }
/// }
///
/// let mut model = BaseRate::default();
/// model.fit(&[0.2, 0.7], &[0, 1]).unwrap();
/// assert_eq!(model.predict(&[0.9]).unwrap(), vec![0.5]);
/// ```
pub trait Calibrator {
    /// Learn the mapping from `probs` and their binary `labels`
    ///
    /// On error the previously fitted state (if any) is left untouched.
    fn fit(&mut self, probs: &[f64], labels: &[u8]) -> Result<()>;

    /// Map each raw probability to its calibrated value
    fn predict(&self, probs: &[f64]) -> Result<Vec<f64>>;

    /// Short identifier of the method
    fn name(&self) -> &'static str;

    /// Whether `fit` has completed successfully
    fn is_fitted(&self) -> bool;
}

impl<C: Calibrator + ?Sized> Calibrator for Box<C> {
    fn fit(&mut self, probs: &[f64], labels: &[u8]) -> Result<()> {
        (**self).fit(probs, labels)
    }

    fn predict(&self, probs: &[f64]) -> Result<Vec<f64>> {
        (**self).predict(probs)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn is_fitted(&self) -> bool {
        (**self).is_fitted()
    }
}
