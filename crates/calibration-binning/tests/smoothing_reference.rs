//! Monotonic smoothing checked against a brute-force isotonic fit

use calibration_binning::{build_bins, monotonic_smoothing, partition, Bin};
use calibration_core::{PartitionConfig, Sample};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Weighted isotonic fit by repeated passes: merge the first violating pair
/// until none is left. Quadratic, but obviously correct.
fn reference_fit(mut blocks: Vec<(f64, f64)>) -> Vec<(f64, f64)> {
    while let Some(i) = blocks.windows(2).position(|w| w[0].0 > w[1].0) {
        let (a, wa) = blocks[i];
        let (b, wb) = blocks[i + 1];
        blocks[i] = ((a * wa + b * wb) / (wa + wb), wa + wb);
        blocks.remove(i + 1);
    }
    blocks
}

fn random_samples(rng: &mut ChaCha8Rng, n: usize) -> Vec<Sample> {
    (0..n)
        .map(|_| {
            let p: f64 = rng.gen();
            // noisy but increasing truth produces plenty of violators
            let truth = 0.3 + 0.4 * p;
            Sample::new(p, u8::from(rng.gen::<f64>() < truth))
        })
        .collect()
}

fn block_summary(bins: &[Bin]) -> Vec<(f64, f64)> {
    bins.iter()
        .map(|b| (b.calibrated_score().unwrap(), b.len() as f64))
        .collect()
}

// Block boundaries between equal scores are not unique, the fitted value of
// every sample is
fn per_sample(blocks: &[(f64, f64)]) -> Vec<f64> {
    blocks
        .iter()
        .flat_map(|&(score, weight)| std::iter::repeat(score).take(weight as usize))
        .collect()
}

#[test]
fn test_matches_reference_isotonic_fit() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    for round in 0..50 {
        let n = rng.gen_range(10..400);
        let samples = random_samples(&mut rng, n);
        let config = PartitionConfig::Mass {
            partition_size: rng.gen_range(1..20),
        };

        let bins = build_bins(&partition(&samples, config).unwrap()).unwrap();
        let expected = reference_fit(block_summary(&bins));
        let smoothed = monotonic_smoothing(bins).unwrap();
        let actual = per_sample(&block_summary(&smoothed));
        let expected = per_sample(&expected);

        assert_eq!(actual.len(), n, "round {round}");
        assert_eq!(expected.len(), n, "round {round}");
        for (fitted, reference) in actual.iter().zip(&expected) {
            assert!((fitted - reference).abs() < 1e-9, "round {round}: {fitted} vs {reference}");
        }
    }
}
