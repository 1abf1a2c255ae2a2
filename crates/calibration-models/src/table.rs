//! Fitted lookup table: the transferable state of a binning calibrator
//!
//! A table is two parallel columns, ascending `thresholds` (bin lower
//! bounds) and the calibrated `values` for those bins. It serializes to JSON
//! through serde or to a two-column `threshold,value` CSV file, and is
//! re-validated whenever it is loaded.

use calibration_binning::bin_index;
use calibration_core::{validate_probabilities, Error, Result};
use serde::{Deserialize, Serialize};
use std::io;

/// Ordered (threshold, calibrated value) table used at prediction time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTable")]
pub struct LookupTable {
    thresholds: Vec<f64>,
    values: Vec<f64>,
}

#[derive(Deserialize)]
struct RawTable {
    thresholds: Vec<f64>,
    values: Vec<f64>,
}

impl TryFrom<RawTable> for LookupTable {
    type Error = Error;

    fn try_from(raw: RawTable) -> Result<Self> {
        Self::new(raw.thresholds, raw.values)
    }
}

#[derive(Serialize, Deserialize)]
struct Row {
    threshold: f64,
    value: f64,
}

impl LookupTable {
    /// Create a table, checking lengths, ordering and value ranges
    pub fn new(thresholds: Vec<f64>, values: Vec<f64>) -> Result<Self> {
        if thresholds.is_empty() {
            return Err(Error::empty_input("thresholds"));
        }
        if thresholds.len() != values.len() {
            return Err(Error::Validation(format!(
                "Size mismatch: thresholds contains {} elements, values contains {} elements",
                thresholds.len(),
                values.len()
            )));
        }
        validate_probabilities("thresholds", &thresholds)?;
        validate_probabilities("values", &values)?;
        if let Some(i) = thresholds.windows(2).position(|w| w[1] < w[0]) {
            return Err(Error::Validation(format!(
                "thresholds must be ascending: thresholds[{}] = {} < thresholds[{}] = {}",
                i + 1,
                thresholds[i + 1],
                i,
                thresholds[i]
            )));
        }
        Ok(Self { thresholds, values })
    }

    /// Ascending bin lower bounds
    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    /// Calibrated value of each bin
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.thresholds.len()
    }

    /// Always false for a constructed table
    pub fn is_empty(&self) -> bool {
        self.thresholds.is_empty()
    }

    /// Check if calibrated values never decrease with the threshold
    pub fn is_monotone(&self) -> bool {
        calibration_binning::is_non_decreasing(&self.values)
    }

    /// Calibrated value for one probability
    ///
    /// Uses the rightmost threshold strictly below `probability`, or the
    /// first row when there is none.
    pub fn predict_one(&self, probability: f64) -> f64 {
        self.values[bin_index(probability, &self.thresholds)]
    }

    /// Calibrated values for a batch of probabilities in [0, 1]
    pub fn predict(&self, probs: &[f64]) -> Result<Vec<f64>> {
        validate_probabilities("query probs", probs)?;
        Ok(probs.iter().map(|&p| self.predict_one(p)).collect())
    }

    /// Encode as a JSON object with `thresholds` and `values` arrays
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Decode and validate a table produced by [`to_json`](Self::to_json)
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Write the table as `threshold,value` CSV rows with a header
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for (&threshold, &value) in self.thresholds.iter().zip(&self.values) {
            csv_writer
                .serialize(Row { threshold, value })
                .map_err(|e| Error::Serialization(e.to_string()))?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Read and validate a table written by [`write_csv`](Self::write_csv)
    pub fn read_csv<R: io::Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut thresholds = Vec::new();
        let mut values = Vec::new();
        for row in csv_reader.deserialize::<Row>() {
            let row = row.map_err(|e| Error::Serialization(e.to_string()))?;
            thresholds.push(row.threshold);
            values.push(row.value);
        }
        Self::new(thresholds, values)
    }
}
