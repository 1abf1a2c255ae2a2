//! Fits both calibrators on synthetic overconfident scores and saves the
//! isotonic lookup table as JSON and CSV.
//!
//! Run with: RUST_LOG=debug cargo run -p calibration-models --example calibrate_scores

use anyhow::Result;
use calibration_models::{
    CalibrationMethod, Calibrator, IsotonicRegressionCalibrator, LookupTable, PartitionConfig,
};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rand_distr::Beta;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let beta = Beta::new(0.7, 0.7)?;
    let (probs, labels): (Vec<f64>, Vec<u8>) = (0..5_000)
        .map(|_| {
            let p: f64 = beta.sample(&mut rng);
            // the model claims p, the world delivers a flatter rate
            let label = u8::from(rng.gen::<f64>() < 0.2 + 0.6 * p);
            (p, label)
        })
        .unzip();

    let config = PartitionConfig::count(10)?;
    for method in [CalibrationMethod::HistogramBinning, CalibrationMethod::IsotonicRegression] {
        let mut model = method.build(config)?;
        model.fit(&probs, &labels)?;

        println!("=== {} ({}) ===", model.name(), config);
        let queries = [0.05, 0.25, 0.5, 0.75, 0.95];
        let calibrated = model.predict(&queries)?;
        for (q, c) in queries.iter().zip(&calibrated) {
            println!("  {q:.2} -> {c:.3}");
        }
    }

    let mut isotonic = IsotonicRegressionCalibrator::new(config)?;
    isotonic.fit(&probs, &labels)?;
    let table = isotonic.lookup_table()?;

    println!("\n=== Isotonic table ===");
    for bin in isotonic.bins() {
        println!("  {bin}");
    }

    let dir = std::env::temp_dir();
    let json_path = dir.join("isotonic_table.json");
    std::fs::write(&json_path, table.to_json()?)?;
    let csv_path = dir.join("isotonic_table.csv");
    table.write_csv(std::fs::File::create(&csv_path)?)?;

    let reloaded = LookupTable::read_csv(std::fs::File::open(&csv_path)?)?;
    assert_eq!(&reloaded, table);
    println!("\nSaved {} rows to {} and {}", table.len(), json_path.display(), csv_path.display());

    Ok(())
}
