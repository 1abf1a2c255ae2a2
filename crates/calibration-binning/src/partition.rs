//! Sample partitioning strategies
//!
//! The partitioner sorts samples by probability (stable, so ties keep their
//! input order) and assigns each sorted position a partition id. Ids are
//! non-decreasing along the sorted order and form the dense range
//! `0..num_partitions`, so every id owns at least one sample.

use calibration_core::{check_probability, samples_from, Error, PartitionConfig, Result, Sample};
use std::ops::Range;
use tracing::{debug, instrument};

/// Samples sorted by probability together with their partition ids
#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    probabilities: Vec<f64>,
    labels: Vec<u8>,
    partition_ids: Vec<usize>,
    num_partitions: usize,
}

impl Partition {
    /// Probabilities in ascending order
    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    /// Labels, aligned with [`probabilities`](Self::probabilities)
    pub fn labels(&self) -> &[u8] {
        &self.labels
    }

    /// Partition id of each sorted sample
    pub fn partition_ids(&self) -> &[usize] {
        &self.partition_ids
    }

    /// Number of distinct partition ids
    pub fn num_partitions(&self) -> usize {
        self.num_partitions
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.probabilities.len()
    }

    /// Check if the partition holds no samples
    pub fn is_empty(&self) -> bool {
        self.probabilities.is_empty()
    }

    /// Sorted samples paired with their partition id
    pub fn iter(&self) -> impl Iterator<Item = (Sample, usize)> + '_ {
        self.probabilities
            .iter()
            .zip(&self.labels)
            .zip(&self.partition_ids)
            .map(|((&p, &l), &id)| (Sample::new(p, l), id))
    }

    /// Index range of the sorted samples belonging to each partition id
    pub fn ranges(&self) -> Vec<Range<usize>> {
        let mut ranges = Vec::with_capacity(self.num_partitions);
        let mut start = 0;
        for i in 1..=self.partition_ids.len() {
            if i == self.partition_ids.len() || self.partition_ids[i] != self.partition_ids[start] {
                ranges.push(start..i);
                start = i;
            }
        }
        ranges
    }
}

/// Splits samples into contiguous groups under one [`PartitionConfig`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Partitioner {
    config: PartitionConfig,
}

impl Partitioner {
    /// Create a partitioner, rejecting non-positive parameters
    pub fn new(config: PartitionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The active configuration
    pub fn config(&self) -> &PartitionConfig {
        &self.config
    }

    /// Sort `samples` by probability and assign partition ids
    pub fn partition(&self, samples: &[Sample]) -> Result<Partition> {
        if samples.is_empty() {
            return Err(Error::empty_input("samples"));
        }
        for (i, s) in samples.iter().enumerate() {
            check_probability("samples", i, s.probability)?;
            if s.label > 1 {
                return Err(Error::invalid_label("samples", i, s.label));
            }
        }
        Ok(self.assign_ids(samples.to_vec()))
    }

    /// Validate parallel `(probs, labels)` arrays once and partition them
    pub fn partition_inputs(&self, probs: &[f64], labels: &[u8]) -> Result<Partition> {
        let samples = samples_from(probs, labels)?;
        Ok(self.assign_ids(samples))
    }

    #[instrument(skip_all, fields(scheme = self.config.scheme_name(), n = sorted.len()))]
    fn assign_ids(&self, mut sorted: Vec<Sample>) -> Partition {
        sorted.sort_by(|a, b| a.probability.total_cmp(&b.probability));

        let n = sorted.len();
        let partition_ids: Vec<usize> = match self.config {
            PartitionConfig::Mass { partition_size } => (0..n).map(|i| i / partition_size).collect(),
            PartitionConfig::Count { partition_num } => {
                let chunk = n.div_ceil(partition_num);
                (0..n).map(|i| i / chunk).collect()
            }
            PartitionConfig::Width { width } => width_ids(&sorted, width),
        };
        let num_partitions = partition_ids.last().map_or(0, |&id| id + 1);

        debug!(num_partitions, "partitioned samples");

        let (probabilities, labels): (Vec<f64>, Vec<u8>) =
            sorted.iter().map(|s| (s.probability, s.label)).unzip();
        Partition {
            probabilities,
            labels,
            partition_ids,
            num_partitions,
        }
    }
}

/// Convenience wrapper: validate `config` and partition `samples` with it
pub fn partition(samples: &[Sample], config: PartitionConfig) -> Result<Partition> {
    Partitioner::new(config)?.partition(samples)
}

// Slot k covers [min + k*width, min + (k+1)*width); the final slot is closed
// so the maximum never spills past it. Empty slots are skipped when
// numbering, keeping ids dense.
fn width_ids(sorted: &[Sample], width: f64) -> Vec<usize> {
    let min = sorted[0].probability;
    let max = sorted[sorted.len() - 1].probability;
    let slots = ((max - min) / width).ceil() as usize;
    let last_slot = slots.max(1) - 1;

    let mut ids = Vec::with_capacity(sorted.len());
    let mut dense = 0;
    let mut prev_slot = None;
    for s in sorted {
        let slot = (((s.probability - min) / width).floor() as usize).min(last_slot);
        if prev_slot.is_some_and(|p| p != slot) {
            dense += 1;
        }
        prev_slot = Some(slot);
        ids.push(dense);
    }
    ids
}
