//! Shared utilities for integration tests

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rand_distr::Beta;

/// Scores from a Beta(2, 2) model whose true positive rate is `distort(score)`
pub fn synthetic_scores(n: usize, seed: u64, distort: impl Fn(f64) -> f64) -> (Vec<f64>, Vec<u8>) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let beta = Beta::new(2.0, 2.0).unwrap();

    let mut probs = Vec::with_capacity(n);
    let mut labels = Vec::with_capacity(n);
    for _ in 0..n {
        let p: f64 = beta.sample(&mut rng);
        let truth = distort(p).clamp(0.0, 1.0);
        probs.push(p);
        labels.push(u8::from(rng.gen::<f64>() < truth));
    }
    (probs, labels)
}

/// An overconfident model: true rate is pulled towards 0.5
pub fn overconfident(n: usize, seed: u64) -> (Vec<f64>, Vec<u8>) {
    synthetic_scores(n, seed, |p| 0.5 + 0.5 * (p - 0.5))
}
