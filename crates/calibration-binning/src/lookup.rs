//! Predecessor lookup over ascending bin thresholds

/// Index of the rightmost threshold strictly less than `x`
///
/// Returns `None` when `x` is less than or equal to every threshold (or
/// `thresholds` is empty). `thresholds` must be sorted ascending; runs in
/// O(log k).
///
/// ```rust
/// use calibration_binning::strict_predecessor;
///
/// let thresholds = [0.1, 0.3, 0.9];
/// assert_eq!(strict_predecessor(0.35, &thresholds), Some(1));
/// assert_eq!(strict_predecessor(0.3, &thresholds), Some(0));
/// assert_eq!(strict_predecessor(0.1, &thresholds), None);
/// ```
pub fn strict_predecessor(x: f64, thresholds: &[f64]) -> Option<usize> {
    thresholds.partition_point(|&t| t < x).checked_sub(1)
}

/// Bin index used at prediction time
///
/// Queries at or below the first threshold clamp to bin 0.
pub fn bin_index(x: f64, thresholds: &[f64]) -> usize {
    strict_predecessor(x, thresholds).unwrap_or(0)
}
