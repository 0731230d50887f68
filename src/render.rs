//! Rendering sink interface
//!
//! The analysis produces two kinds of artifacts: verdict heatmaps (one per
//! workload and phase plus one total per phase) and normalized error-bar
//! charts. Output formats implement [`RenderSink`] and receive artifacts
//! already titled and named, so every format labels them the same way.

use crate::comparison::{ComparisonMatrix, TotalMatrix};
use crate::normalize::NormalizedSeries;
use anyhow::Result;
use serde::Serialize;

/// Workload name used for the per-phase total matrix
pub const TOTAL_WORKLOAD: &str = "TOTAL";

/// `<workload>_<phase>_heatmap`
pub fn heatmap_name(workload: &str, phase: &str) -> String {
    format!("{}_{}_heatmap", workload, phase)
}

/// `<workload>_<phase>`
pub fn chart_name(workload: &str, phase: &str) -> String {
    format!("{}_{}", workload, phase)
}

/// Escape text for HTML and SVG markup, attributes included
pub(crate) fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// A square verdict matrix ready for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapArtifact {
    pub name: String,
    pub title: String,
    pub workload: String,
    pub phase: String,
    /// Axis labels, rows and columns alike
    pub labels: Vec<String>,
    /// `values[row][column]`, row variant compared to column variant
    pub values: Vec<Vec<i64>>,
    pub confidence_level: String,
    pub is_total: bool,
    /// False for a total that is missing workloads
    pub valid: bool,
    /// Workloads missing from an incomplete total
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing_workloads: Vec<String>,
    /// Variants by total score, best first; totals only
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ranking: Vec<(String, i64)>,
}

impl HeatmapArtifact {
    pub fn from_matrix(matrix: &ComparisonMatrix) -> Self {
        Self {
            name: heatmap_name(matrix.workload(), matrix.phase()),
            title: format!(
                "{} {}\n{} confidence level",
                matrix.workload(),
                matrix.phase(),
                matrix.confidence_level()
            ),
            workload: matrix.workload().to_string(),
            phase: matrix.phase().to_string(),
            labels: matrix.order().labels().to_vec(),
            values: matrix.values(),
            confidence_level: matrix.confidence_level().to_string(),
            is_total: false,
            valid: true,
            missing_workloads: Vec::new(),
            ranking: Vec::new(),
        }
    }

    pub fn from_total(total: &TotalMatrix) -> Self {
        let confidence_level = total.confidence_level().unwrap_or("unknown").to_string();
        let mut title = format!(
            "{} {}\n{} confidence level",
            TOTAL_WORKLOAD,
            total.phase(),
            confidence_level
        );
        if !total.is_complete() {
            title.push_str(&format!(
                "\nINCOMPLETE: missing {}",
                total.failed_workloads().join(", ")
            ));
        }

        Self {
            name: heatmap_name(TOTAL_WORKLOAD, total.phase()),
            title,
            workload: TOTAL_WORKLOAD.to_string(),
            phase: total.phase().to_string(),
            labels: total.order().labels().to_vec(),
            values: total.values().to_vec(),
            confidence_level,
            is_total: true,
            valid: total.is_complete(),
            missing_workloads: total.failed_workloads().to_vec(),
            ranking: total.ranking(),
        }
    }

    /// Largest absolute cell value, at least 1
    pub fn max_magnitude(&self) -> i64 {
        self.values
            .iter()
            .flatten()
            .map(|v| v.abs())
            .max()
            .unwrap_or(0)
            .max(1)
    }
}

/// A normalized series ready for an error-bar chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartArtifact {
    pub name: String,
    pub title: String,
    pub series: NormalizedSeries,
}

impl ChartArtifact {
    pub fn from_series(series: &NormalizedSeries) -> Self {
        Self {
            name: chart_name(&series.workload, &series.phase),
            title: format!(
                "{} {} at {} confidence level\nSample size: {}",
                series.workload, series.phase, series.confidence_level, series.sample_size
            ),
            series: series.clone(),
        }
    }
}

/// Consumer of rendered artifacts
pub trait RenderSink {
    /// Accept one verdict matrix
    fn heatmap(&mut self, artifact: &HeatmapArtifact) -> Result<()>;

    /// Accept one normalized series
    fn chart(&mut self, artifact: &ChartArtifact) -> Result<()>;

    /// Complete the output and return the document (or a summary of what
    /// was written)
    fn finish(&mut self) -> Result<String>;
}
