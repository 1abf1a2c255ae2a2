//! Monotonic smoothing of bin scores (pooled adjacent violators)
//!
//! Bins are folded left to right onto a stack of blocks. A new bin absorbs
//! every block on top of the stack whose score is strictly greater than its
//! own, then is pushed. Read bottom to top, block scores are non-decreasing
//! after every push. Each bin is pushed once and every merge removes a block,
//! so the pass is linear in the number of bins.

use crate::bin::Bin;
use calibration_core::{Error, Result};
use tracing::{debug, instrument, trace};

/// Merge adjacent bins until calibrated scores are non-decreasing
///
/// `bins` must be in ascending probability order. Merged scores are
/// sample-weighted means, so the output is the isotonic fit of the bin
/// scores. Bins without statistics get them computed first.
#[instrument(skip_all, fields(bins = bins.len()))]
pub fn monotonic_smoothing(bins: Vec<Bin>) -> Result<Vec<Bin>> {
    let input = bins.len();

    let blocks = bins
        .into_iter()
        .try_fold(Vec::with_capacity(input), |mut stack: Vec<Bin>, bin| {
            let mut current = bin;
            let mut score = scored(&mut current)?;

            while stack
                .last()
                .and_then(Bin::calibrated_score)
                .is_some_and(|top| top > score)
            {
                let Some(mut top) = stack.pop() else { break };
                trace!(top = top.id(), current = current.id(), "pooling violators");
                top.merge(current)?;
                current = top;
                score = scored(&mut current)?;
            }

            stack.push(current);
            Ok::<_, Error>(stack)
        })?;

    debug!(input, output = blocks.len(), "smoothed bins");
    Ok(blocks)
}

/// Check that `values` never decreases
pub fn is_non_decreasing(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] <= w[1])
}

fn scored(bin: &mut Bin) -> Result<f64> {
    match bin.calibrated_score() {
        Some(score) => Ok(score),
        None => Ok(bin.compute_statistics()?.calibrated_score),
    }
}
