//! Summarized measurement for one (workload, variant, phase) triple

use crate::error::{AnalysisError, Result};
use serde::{Deserialize, Serialize};

/// Relative slack allowed when checking `min <= mean <= max`, absorbing float
/// error in computed summaries
const MEAN_RANGE_SLACK: f64 = 1e-9;

/// Immutable summary statistics of repeated execution-time samples
///
/// `error` is the half-width of the confidence interval at `confidence_level`,
/// so the interval is `[mean - error, mean + error]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeasurementRecord {
    mean: f64,
    error: f64,
    min: f64,
    max: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    median: Option<f64>,
    sample_size: u64,
    confidence_level: String,
}

impl MeasurementRecord {
    /// Create a validated record
    ///
    /// Fails with [`AnalysisError::MalformedRecord`] if any value is NaN or
    /// infinite, `min > max`, the mean lies outside `[min, max]` or is
    /// negative, `error < 0` or `sample_size <= 0`.
    ///
    /// # Example
    /// ```
    /// use benchmatrix::record::MeasurementRecord;
    ///
    /// let record = MeasurementRecord::new(100.0, 5.0, 95.0, 105.0, 30, "95%").unwrap();
    /// assert_eq!(record.interval(), (95.0, 105.0));
    /// assert!(MeasurementRecord::new(100.0, -1.0, 95.0, 105.0, 30, "95%").is_err());
    /// ```
    pub fn new(
        mean: f64,
        error: f64,
        min: f64,
        max: f64,
        sample_size: i64,
        confidence_level: impl Into<String>,
    ) -> Result<Self> {
        for (name, value) in [("mean", mean), ("error", error), ("min", min), ("max", max)] {
            if value.is_nan() {
                return Err(AnalysisError::malformed(format!("{} is NaN", name)));
            }
            if !value.is_finite() {
                return Err(AnalysisError::malformed(format!("{} is infinite", name)));
            }
        }

        if min > max {
            return Err(AnalysisError::malformed(format!(
                "min ({}) is greater than max ({})",
                min, max
            )));
        }

        let slack = MEAN_RANGE_SLACK * mean.abs().max(1.0);
        if mean < min - slack || mean > max + slack {
            return Err(AnalysisError::malformed(format!(
                "mean ({}) lies outside [min, max] = [{}, {}]",
                mean, min, max
            )));
        }

        // Execution times; a negative baseline would invert the guide band
        if mean < 0.0 {
            return Err(AnalysisError::malformed(format!(
                "mean must be non-negative, got {}",
                mean
            )));
        }

        if error < 0.0 {
            return Err(AnalysisError::malformed(format!(
                "error must be non-negative, got {}",
                error
            )));
        }

        if sample_size <= 0 {
            return Err(AnalysisError::malformed(format!(
                "sample size must be positive, got {}",
                sample_size
            )));
        }

        Ok(Self {
            mean,
            error,
            min,
            max,
            median: None,
            sample_size: sample_size as u64,
            confidence_level: confidence_level.into(),
        })
    }

    /// Attach the sample median (reported, never compared)
    pub fn with_median(mut self, median: f64) -> Self {
        self.median = Some(median);
        self
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn error(&self) -> f64 {
        self.error
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn median(&self) -> Option<f64> {
        self.median
    }

    pub fn sample_size(&self) -> u64 {
        self.sample_size
    }

    pub fn confidence_level(&self) -> &str {
        &self.confidence_level
    }

    /// Confidence interval as `(lower, upper)`
    pub fn interval(&self) -> (f64, f64) {
        (self.mean - self.error, self.mean + self.error)
    }
}

/// On-disk shape of one `[WORKLOAD.VARIANT.PHASE]` table
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawRecord {
    pub size: i64,
    pub mean: f64,
    #[serde(default)]
    pub median: Option<f64>,
    pub max: f64,
    pub min: f64,
    pub confidence_level: String,
    pub error: f64,
}

impl TryFrom<RawRecord> for MeasurementRecord {
    type Error = AnalysisError;

    fn try_from(raw: RawRecord) -> Result<Self> {
        let record = MeasurementRecord::new(
            raw.mean,
            raw.error,
            raw.min,
            raw.max,
            raw.size,
            raw.confidence_level,
        )?;
        Ok(match raw.median {
            Some(median) => record.with_median(median),
            None => record,
        })
    }
}
