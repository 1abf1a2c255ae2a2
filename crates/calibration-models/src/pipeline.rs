//! Shared fit pipeline: validate, partition, bin, tabulate

use crate::table::LookupTable;
use calibration_binning::{build_bins, Bin, Partitioner};
use calibration_core::{Error, PartitionConfig, Result};

/// State produced by a successful fit
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Fitted {
    pub(crate) bins: Vec<Bin>,
    pub(crate) table: LookupTable,
}

impl Fitted {
    pub(crate) fn from_bins(bins: Vec<Bin>) -> Result<Self> {
        let table = table_from_bins(&bins)?;
        Ok(Self { bins, table })
    }
}

/// Validate inputs, partition them and compute statistics for every bin
pub(crate) fn fit_bins(config: &PartitionConfig, probs: &[f64], labels: &[u8]) -> Result<Vec<Bin>> {
    let partition = Partitioner::new(*config)?.partition_inputs(probs, labels)?;
    build_bins(&partition)
}

/// Thresholds are bin lower bounds, values are calibrated scores, in bin order
pub(crate) fn table_from_bins(bins: &[Bin]) -> Result<LookupTable> {
    let mut thresholds = Vec::with_capacity(bins.len());
    let mut values = Vec::with_capacity(bins.len());
    for bin in bins {
        let stats = bin
            .statistics()
            .ok_or(Error::EmptyBin { partition_id: bin.id() })?;
        thresholds.push(stats.low_prob);
        values.push(stats.calibrated_score);
    }
    LookupTable::new(thresholds, values)
}

pub(crate) fn require<'a>(fitted: &'a Option<Fitted>, operation: &'static str) -> Result<&'a Fitted> {
    fitted.as_ref().ok_or(Error::NotFitted { operation })
}
