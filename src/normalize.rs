//! Baseline normalization for error-bar charts
//!
//! Every variant's mean, error, min and max are divided by the baseline
//! variant's mean for the same (workload, phase), so the baseline sits at 1.0
//! and a value of 1.3 reads as "30% slower than baseline".

use crate::error::{AnalysisError, Result};
use crate::results::{ResultsTable, VariantOrder};
use serde::Serialize;

/// One variant's statistics on the normalized scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NormalizedPoint {
    pub mean: f64,
    pub error: f64,
    pub min: f64,
    pub max: f64,
}

/// Normalized statistics of all variants for one (workload, phase)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedSeries {
    pub workload: String,
    pub phase: String,
    pub baseline: String,
    /// Variant labels, same order as `points`
    pub variants: Vec<String>,
    pub points: Vec<NormalizedPoint>,
    /// `1 + baseline.error / baseline.mean`
    pub upper_guide: f64,
    /// `1 - baseline.error / baseline.mean`
    pub lower_guide: f64,
    /// Baseline's confidence level, used for titling
    pub confidence_level: String,
    /// Baseline's sample size, used for titling
    pub sample_size: u64,
}

impl NormalizedSeries {
    /// Point for a variant, if it is on the axis
    pub fn point(&self, variant: &str) -> Option<&NormalizedPoint> {
        self.variants
            .iter()
            .position(|v| v == variant)
            .map(|i| &self.points[i])
    }

    /// Whether a variant's normalized mean lies inside the baseline band
    pub fn within_baseline_band(&self, variant: &str) -> Option<bool> {
        self.point(variant)
            .map(|p| p.mean >= self.lower_guide && p.mean <= self.upper_guide)
    }
}

/// Normalize `workload`/`phase` against `baseline`, in axis order
///
/// # Example
/// ```
/// use benchmatrix::normalize::normalize;
/// use benchmatrix::record::MeasurementRecord;
/// use benchmatrix::results::{ResultKey, ResultsTable, VariantOrder};
///
/// let mut table = ResultsTable::new();
/// table.insert(
///     ResultKey::new("X", "A", "STEADY_STATE"),
///     MeasurementRecord::new(100.0, 5.0, 95.0, 105.0, 30, "95%").unwrap(),
/// );
/// table.insert(
///     ResultKey::new("X", "B", "STEADY_STATE"),
///     MeasurementRecord::new(130.0, 5.0, 125.0, 135.0, 30, "95%").unwrap(),
/// );
/// let order = VariantOrder::new(["A", "B"]).unwrap();
///
/// let series = normalize(&table, "X", "STEADY_STATE", &order, "A").unwrap();
/// assert_eq!(series.points[0].mean, 1.0);
/// assert!((series.points[1].mean - 1.3).abs() < 1e-12);
/// assert!((series.upper_guide - 1.05).abs() < 1e-12);
/// ```
pub fn normalize(
    table: &ResultsTable,
    workload: &str,
    phase: &str,
    order: &VariantOrder,
    baseline: &str,
) -> Result<NormalizedSeries> {
    if order.index_of(baseline).is_none() {
        return Err(AnalysisError::UnknownVariant(baseline.to_string()));
    }

    let base_record = table.get(workload, baseline, phase)?;
    let base = base_record.mean();
    if base == 0.0 {
        return Err(AnalysisError::DivisionByZeroBaseline {
            workload: workload.to_string(),
            variant: baseline.to_string(),
            phase: phase.to_string(),
        });
    }

    let points = order
        .iter()
        .map(|variant| {
            table.get(workload, variant, phase).map(|r| NormalizedPoint {
                mean: r.mean() / base,
                error: r.error() / base,
                min: r.min() / base,
                max: r.max() / base,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let relative_error = base_record.error() / base;

    Ok(NormalizedSeries {
        workload: workload.to_string(),
        phase: phase.to_string(),
        baseline: baseline.to_string(),
        variants: order.labels().to_vec(),
        points,
        upper_guide: 1.0 + relative_error,
        lower_guide: 1.0 - relative_error,
        confidence_level: base_record.confidence_level().to_string(),
        sample_size: base_record.sample_size(),
    })
}
