//! Plain-text terminal output
//!
//! Heatmaps print as aligned verdict grids, charts as tables of normalized
//! statistics. `pretty_print_record` renders a single measurement the way
//! the results files are usually inspected by hand.

use crate::record::MeasurementRecord;
use crate::render::{ChartArtifact, HeatmapArtifact, RenderSink};
use crate::results::{phase_display_name, ResultKey};
use anyhow::Result;
use std::fmt::Write as _;

const RULE: &str = "*****************************************************************";

/// Text output formatter
#[derive(Debug, Default)]
pub struct TextOutput {
    buffer: String,
}

impl TextOutput {
    pub fn new() -> Self {
        Self::default()
    }

    fn push_title(&mut self, title: &str) {
        for line in title.lines() {
            self.buffer.push_str(line);
            self.buffer.push('\n');
        }
    }
}

impl RenderSink for TextOutput {
    fn heatmap(&mut self, artifact: &HeatmapArtifact) -> Result<()> {
        self.push_title(&artifact.title);

        let value_width = artifact
            .values
            .iter()
            .flatten()
            .map(|v| format!("{:+}", v).len())
            .max()
            .unwrap_or(1);
        let label_width = artifact.labels.iter().map(String::len).max().unwrap_or(0);
        let cell_width = label_width.max(value_width);

        write!(self.buffer, "{:label_width$}", "")?;
        for label in &artifact.labels {
            write!(self.buffer, "  {:>cell_width$}", label)?;
        }
        self.buffer.push('\n');

        for (label, row) in artifact.labels.iter().zip(&artifact.values) {
            write!(self.buffer, "{:<label_width$}", label)?;
            for value in row {
                let cell = if *value == 0 {
                    "0".to_string()
                } else {
                    format!("{:+}", value)
                };
                write!(self.buffer, "  {:>cell_width$}", cell)?;
            }
            self.buffer.push('\n');
        }

        if !artifact.valid {
            self.buffer.push_str("(invalid: total is missing workloads)\n");
        }
        if !artifact.ranking.is_empty() {
            let entries: Vec<String> = artifact
                .ranking
                .iter()
                .map(|(variant, score)| format!("{} ({:+})", variant, score))
                .collect();
            writeln!(self.buffer, "Ranking: {}", entries.join(", "))?;
        }
        self.buffer.push('\n');
        Ok(())
    }

    fn chart(&mut self, artifact: &ChartArtifact) -> Result<()> {
        let series = &artifact.series;
        self.push_title(&artifact.title);

        let width = series.variants.iter().map(String::len).max().unwrap_or(0);
        writeln!(
            self.buffer,
            "{:<width$}  {:>8}  {:>8}  {:>8}  {:>8}",
            "variant", "mean", "error", "min", "max"
        )?;
        for (variant, point) in series.variants.iter().zip(&series.points) {
            let marker = if *variant == series.baseline { " (baseline)" } else { "" };
            writeln!(
                self.buffer,
                "{:<width$}  {:>8.3}  {:>8.3}  {:>8.3}  {:>8.3}{}",
                variant, point.mean, point.error, point.min, point.max, marker
            )?;
        }
        writeln!(
            self.buffer,
            "baseline band: {:.3} .. {:.3}\n",
            series.lower_guide, series.upper_guide
        )?;
        Ok(())
    }

    fn finish(&mut self) -> Result<String> {
        Ok(std::mem::take(&mut self.buffer))
    }
}

/// Labeled dump of one measurement record
///
/// ```
/// use benchmatrix::record::MeasurementRecord;
/// use benchmatrix::results::ResultKey;
/// use benchmatrix::text_output::pretty_print_record;
///
/// let record = MeasurementRecord::new(100.0, 5.0, 95.0, 105.0, 30, "95%").unwrap();
/// let text = pretty_print_record(&ResultKey::new("H2", "OPENJDK_8", "STARTUP"), &record);
/// assert!(text.contains("Confidence interval lower : 95.0000"));
/// ```
pub fn pretty_print_record(key: &ResultKey, record: &MeasurementRecord) -> String {
    let (lower, upper) = record.interval();
    let median = record
        .median()
        .map(|m| format!("{:.4}", m))
        .unwrap_or_else(|| "n/a".to_string());

    let mut out = String::new();
    let mut line = |name: &str, value: String| {
        out.push_str(&format!("{:>30} : {}\n", name, value));
    };

    line("Workload", key.workload.clone());
    line("Variant", key.variant.clone());
    line("Phase", phase_display_name(&key.phase).to_string());
    line("Sample size", record.sample_size().to_string());
    line("Mean", format!("{:.4}", record.mean()));
    line("Median", median);
    line("Max", format!("{:.4}", record.max()));
    line("Min", format!("{:.4}", record.min()));
    line(
        &format!("Margin of error ({})", record.confidence_level()),
        format!("{:.4}", record.error()),
    );
    line("Confidence interval lower", format!("{:.4}", lower));
    line("Confidence interval upper", format!("{:.4}", upper));

    format!("{}\n{}{}\n", RULE, out, RULE)
}
