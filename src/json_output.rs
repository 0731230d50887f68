//! JSON output format for comparison results
//!
//! One document holding every heatmap and chart, for downstream tooling.

use crate::render::{ChartArtifact, HeatmapArtifact, RenderSink};
use serde::Serialize;

/// Summary statistics
#[derive(Debug, Clone, Default, Serialize)]
pub struct JsonSummary {
    pub heatmaps: usize,
    pub charts: usize,
    /// Names of total heatmaps missing at least one workload
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub incomplete_totals: Vec<String>,
}

/// Root JSON output structure
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput {
    /// Format version identifier
    pub version: String,
    /// Format name
    pub format: String,
    pub heatmaps: Vec<HeatmapArtifact>,
    pub charts: Vec<ChartArtifact>,
    pub summary: JsonSummary,
}

impl JsonOutput {
    /// Create a new JSON output structure
    pub fn new() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            format: "benchmatrix-json-v1".to_string(),
            heatmaps: Vec::new(),
            charts: Vec::new(),
            summary: JsonSummary::default(),
        }
    }

    /// Serialize to a pretty-printed JSON string
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderSink for JsonOutput {
    fn heatmap(&mut self, artifact: &HeatmapArtifact) -> anyhow::Result<()> {
        self.summary.heatmaps += 1;
        if !artifact.valid {
            self.summary.incomplete_totals.push(artifact.name.clone());
        }
        self.heatmaps.push(artifact.clone());
        Ok(())
    }

    fn chart(&mut self, artifact: &ChartArtifact) -> anyhow::Result<()> {
        self.summary.charts += 1;
        self.charts.push(artifact.clone());
        Ok(())
    }

    fn finish(&mut self) -> anyhow::Result<String> {
        self.to_json()
    }
}
