//! Property tests for fitted calibrators

use calibration_binning::strict_predecessor;
use calibration_models::{HistogramBinningCalibrator, IsotonicRegressionCalibrator, PartitionConfig};
use proptest::prelude::*;

fn training_set() -> impl Strategy<Value = (Vec<f64>, Vec<u8>)> {
    prop::collection::vec((0.0f64..=1.0, 0u8..=1), 1..150)
        .prop_map(|pairs: Vec<(f64, u8)>| pairs.into_iter().unzip::<f64, u8, Vec<f64>, Vec<u8>>())
}

fn config_strategy() -> impl Strategy<Value = PartitionConfig> {
    prop_oneof![
        (1usize..25).prop_map(|partition_size| PartitionConfig::Mass { partition_size }),
        (1usize..25).prop_map(|partition_num| PartitionConfig::Count { partition_num }),
        (0.02f64..0.5).prop_map(|width| PartitionConfig::Width { width }),
    ]
}

proptest! {
    #[test]
    fn prop_isotonic_values_non_decreasing(
        (probs, labels) in training_set(),
        config in config_strategy(),
    ) {
        let mut model = IsotonicRegressionCalibrator::new(config).unwrap();
        model.fit(&probs, &labels).unwrap();
        let (thresholds, values) = model.get_model().unwrap();
        prop_assert_eq!(thresholds.len(), values.len());
        prop_assert!(values.windows(2).all(|w| w[0] <= w[1]));
        prop_assert!(thresholds.windows(2).all(|w| w[0] <= w[1]));
    }

    // predict([q]) == values[i] for the rightmost T[i] < q, else values[0]
    #[test]
    fn prop_lookup_consistency(
        (probs, labels) in training_set(),
        config in config_strategy(),
        queries in prop::collection::vec(0.0f64..=1.0, 0..40),
    ) {
        let mut model = HistogramBinningCalibrator::new(config).unwrap();
        model.fit(&probs, &labels).unwrap();
        let (thresholds, values) = model.get_model().unwrap();

        let predictions = model.predict(&queries).unwrap();
        prop_assert_eq!(predictions.len(), queries.len());
        for (&q, &pred) in queries.iter().zip(&predictions) {
            let expected = match thresholds.iter().rposition(|&t| t < q) {
                Some(i) => values[i],
                None => values[0],
            };
            prop_assert_eq!(pred, expected);
            prop_assert_eq!(strict_predecessor(q, thresholds), thresholds.iter().rposition(|&t| t < q));
            prop_assert!((0.0..=1.0).contains(&pred));
        }

        // training probabilities replay deterministically
        prop_assert_eq!(model.predict(&probs).unwrap(), model.predict(&probs).unwrap());
    }

    #[test]
    fn prop_isotonic_predictions_monotone(
        (probs, labels) in training_set(),
        config in config_strategy(),
        mut queries in prop::collection::vec(0.0f64..=1.0, 1..60),
    ) {
        let mut model = IsotonicRegressionCalibrator::new(config).unwrap();
        model.fit(&probs, &labels).unwrap();
        queries.sort_by(f64::total_cmp);
        let predictions = model.predict(&queries).unwrap();
        prop_assert!(predictions.windows(2).all(|w| w[0] <= w[1]));
    }

    // Sample-weighted mean of the table equals the training base rate
    #[test]
    fn prop_isotonic_preserves_base_rate(
        (probs, labels) in training_set(),
        config in config_strategy(),
    ) {
        let mut model = IsotonicRegressionCalibrator::new(config).unwrap();
        model.fit(&probs, &labels).unwrap();
        let weighted: f64 = model
            .bins()
            .iter()
            .map(|b| b.calibrated_score().unwrap() * b.len() as f64)
            .sum();
        let positives = labels.iter().filter(|&&l| l == 1).count() as f64;
        prop_assert!((weighted - positives).abs() < 1e-6);
    }
}
