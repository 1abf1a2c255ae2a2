//! Calibration bins and their aggregate statistics

use crate::partition::Partition;
use calibration_core::{Error, Result, Sample};
use std::fmt;
use tracing::debug;

/// Aggregate statistics of one bin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinStatistics {
    /// Smallest probability in the bin
    pub low_prob: f64,
    /// Largest probability in the bin
    pub high_prob: f64,
    /// Mean probability (the bin's confidence)
    pub avg_prob: f64,
    /// Fraction of positive labels (the bin's estimate of P(label = 1))
    pub calibrated_score: f64,
    /// Number of samples aggregated
    pub count: usize,
}

impl BinStatistics {
    fn from_samples(samples: &[Sample]) -> Option<Self> {
        let first = samples.first()?;
        let mut low_prob = first.probability;
        let mut high_prob = first.probability;
        let mut prob_sum = 0.0;
        let mut label_sum = 0.0;

        for s in samples {
            low_prob = low_prob.min(s.probability);
            high_prob = high_prob.max(s.probability);
            prob_sum += s.probability;
            label_sum += s.label_f64();
        }

        let n = samples.len() as f64;
        Some(Self {
            low_prob,
            high_prob,
            avg_prob: prob_sum / n,
            calibrated_score: label_sum / n,
            count: samples.len(),
        })
    }

    /// Statistics of the union of two disjoint sample sets
    ///
    /// Means are weighted by sample count and bounds are widened to cover both.
    pub fn combine(&self, other: &Self) -> Self {
        let count = self.count + other.count;
        let w_self = self.count as f64 / count as f64;
        let w_other = other.count as f64 / count as f64;
        Self {
            low_prob: self.low_prob.min(other.low_prob),
            high_prob: self.high_prob.max(other.high_prob),
            avg_prob: w_self * self.avg_prob + w_other * other.avg_prob,
            calibrated_score: w_self * self.calibrated_score + w_other * other.calibrated_score,
            count,
        }
    }

    /// Absolute gap between observed accuracy and mean confidence
    pub fn gap(&self) -> f64 {
        (self.calibrated_score - self.avg_prob).abs()
    }
}

impl fmt::Display for BinStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:.3}, {:.3}]: n={}, avg_prob={:.3}, score={:.3}",
            self.low_prob, self.high_prob, self.count, self.avg_prob, self.calibrated_score
        )
    }
}

/// Samples sharing one partition id
///
/// Statistics are only available after [`compute_statistics`](Bin::compute_statistics);
/// adding a sample invalidates them again.
#[derive(Debug, Clone, PartialEq)]
pub struct Bin {
    id: usize,
    samples: Vec<Sample>,
    stats: Option<BinStatistics>,
}

impl Bin {
    /// Create an empty bin for partition `id`
    pub fn new(id: usize) -> Self {
        Self {
            id,
            samples: Vec::new(),
            stats: None,
        }
    }

    /// Partition id this bin was created for
    pub fn id(&self) -> usize {
        self.id
    }

    /// Samples in insertion order
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if the bin has no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Append a sample; statistics are not recomputed
    pub fn add_sample(&mut self, probability: f64, label: u8) {
        self.samples.push(Sample::new(probability, label));
        self.stats = None;
    }

    /// Compute bounds, mean probability and mean label
    pub fn compute_statistics(&mut self) -> Result<&BinStatistics> {
        let stats = BinStatistics::from_samples(&self.samples)
            .ok_or(Error::EmptyBin { partition_id: self.id })?;
        Ok(self.stats.insert(stats))
    }

    /// Statistics from the last [`compute_statistics`](Bin::compute_statistics), if still valid
    pub fn statistics(&self) -> Option<&BinStatistics> {
        self.stats.as_ref()
    }

    /// Calibrated score, if statistics are valid
    pub fn calibrated_score(&self) -> Option<f64> {
        self.stats.map(|s| s.calibrated_score)
    }

    /// Absorb `other`'s samples and refresh statistics
    ///
    /// `other` is consumed, so its samples are owned by `self` alone afterwards.
    pub fn merge(&mut self, other: Bin) -> Result<()> {
        let combined = match (self.stats, other.stats) {
            (Some(a), Some(b)) => Some(a.combine(&b)),
            _ => None,
        };
        self.samples.extend(other.samples);
        match combined {
            Some(stats) => self.stats = Some(stats),
            None => {
                self.compute_statistics()?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Bin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.stats {
            Some(stats) => write!(f, "Bin({}) {}", self.id, stats),
            None => write!(f, "Bin({}) n={} (statistics pending)", self.id, self.len()),
        }
    }
}

/// Build one bin per partition id, in id order, with statistics computed
pub fn build_bins(partition: &Partition) -> Result<Vec<Bin>> {
    let probs = partition.probabilities();
    let labels = partition.labels();
    let mut bins: Vec<Bin> = partition
        .ranges()
        .into_iter()
        .enumerate()
        .map(|(id, range)| {
            let mut bin = Bin::new(id);
            for i in range {
                bin.add_sample(probs[i], labels[i]);
            }
            bin
        })
        .collect();
    compute_all_statistics(&mut bins)?;
    debug!(bins = bins.len(), "computed bin statistics");
    Ok(bins)
}

/// Compute statistics for every bin
///
/// With the `parallel` feature each bin is handled by one rayon worker; the
/// call returns only after all bins are done.
#[cfg(feature = "parallel")]
pub fn compute_all_statistics(bins: &mut [Bin]) -> Result<()> {
    use rayon::prelude::*;
    bins.par_iter_mut()
        .try_for_each(|bin| bin.compute_statistics().map(|_| ()))
}

/// Compute statistics for every bin
#[cfg(not(feature = "parallel"))]
pub fn compute_all_statistics(bins: &mut [Bin]) -> Result<()> {
    bins.iter_mut()
        .try_for_each(|bin| bin.compute_statistics().map(|_| ()))
}
