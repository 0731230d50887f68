//! CSV output format for comparison results
//!
//! Heatmaps and charts share one long-format table so a spreadsheet can
//! filter by `kind`. Heatmap rows carry `value`; chart rows carry the
//! normalized statistics and leave `value` empty.

use crate::render::{ChartArtifact, HeatmapArtifact, RenderSink};
use anyhow::Result;

const HEADER: &str = "artifact,kind,row,column,value,mean,error,min,max";

/// CSV output formatter
#[derive(Debug, Default)]
pub struct CsvOutput {
    rows: Vec<String>,
}

impl CsvOutput {
    /// Create a new CSV output formatter
    pub fn new() -> Self {
        Self::default()
    }

    /// Escape CSV field (handle commas, quotes, newlines)
    fn escape_field(field: &str) -> String {
        if field.contains(',') || field.contains('"') || field.contains('\n') {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }

    fn push_row(&mut self, fields: &[&str]) {
        let row: Vec<String> = fields.iter().map(|f| Self::escape_field(f)).collect();
        self.rows.push(row.join(","));
    }

    /// Generate the complete CSV output
    pub fn to_csv(&self) -> String {
        let mut output = String::with_capacity(HEADER.len() + 1 + self.rows.len() * 48);
        output.push_str(HEADER);
        output.push('\n');
        for row in &self.rows {
            output.push_str(row);
            output.push('\n');
        }
        output
    }
}

impl RenderSink for CsvOutput {
    fn heatmap(&mut self, artifact: &HeatmapArtifact) -> Result<()> {
        let kind = match (artifact.is_total, artifact.valid) {
            (false, _) => "heatmap",
            (true, true) => "total",
            (true, false) => "total_incomplete",
        };
        for (row_label, row) in artifact.labels.iter().zip(&artifact.values) {
            for (column_label, value) in artifact.labels.iter().zip(row) {
                let value = value.to_string();
                self.push_row(&[
                    artifact.name.as_str(),
                    kind,
                    row_label.as_str(),
                    column_label.as_str(),
                    value.as_str(),
                    "",
                    "",
                    "",
                    "",
                ]);
            }
        }
        Ok(())
    }

    fn chart(&mut self, artifact: &ChartArtifact) -> Result<()> {
        let series = &artifact.series;
        for (variant, point) in series.variants.iter().zip(&series.points) {
            let stats =
                [point.mean, point.error, point.min, point.max].map(|v| format!("{:.6}", v));
            self.push_row(&[
                artifact.name.as_str(),
                "chart",
                variant.as_str(),
                series.baseline.as_str(),
                "",
                stats[0].as_str(),
                stats[1].as_str(),
                stats[2].as_str(),
                stats[3].as_str(),
            ]);
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<String> {
        Ok(self.to_csv())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparison::{build_matrix, TotalMatrix};
    use crate::normalize::normalize;
    use crate::record::MeasurementRecord;
    use crate::results::{ResultKey, ResultsTable, VariantOrder};

    fn fixture() -> (ResultsTable, VariantOrder) {
        let mut table = ResultsTable::new();
        table.insert(
            ResultKey::new("XALAN", "A", "STARTUP"),
            MeasurementRecord::new(50.0, 1.0, 45.0, 55.0, 10, "99%").unwrap(),
        );
        table.insert(
            ResultKey::new("XALAN", "B", "STARTUP"),
            MeasurementRecord::new(100.0, 2.0, 90.0, 110.0, 10, "99%").unwrap(),
        );
        (table, VariantOrder::new(["A", "B"]).unwrap())
    }

    #[test]
    fn test_csv_empty_has_header() {
        assert_eq!(CsvOutput::new().to_csv(), format!("{}\n", HEADER));
    }

    #[test]
    fn test_csv_escape_field_simple() {
        assert_eq!(CsvOutput::escape_field("simple"), "simple");
    }

    #[test]
    fn test_csv_escape_field_with_comma() {
        assert_eq!(CsvOutput::escape_field("a, b"), "\"a, b\"");
    }

    #[test]
    fn test_csv_escape_field_with_quote() {
        assert_eq!(CsvOutput::escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_csv_heatmap_rows() {
        let (table, order) = fixture();
        let matrix = build_matrix(&table, "XALAN", "STARTUP", &order).unwrap();

        let mut output = CsvOutput::new();
        output.heatmap(&HeatmapArtifact::from_matrix(&matrix)).unwrap();
        let csv = output.finish().unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[1], "XALAN_STARTUP_heatmap,heatmap,A,A,0,,,,");
        assert_eq!(lines[2], "XALAN_STARTUP_heatmap,heatmap,A,B,1,,,,");
        assert_eq!(lines[3], "XALAN_STARTUP_heatmap,heatmap,B,A,-1,,,,");
    }

    #[test]
    fn test_csv_incomplete_total_kind() {
        let (table, order) = fixture();
        let matrix = build_matrix(&table, "XALAN", "STARTUP", &order).unwrap();
        let mut total = TotalMatrix::from_matrices("STARTUP", &order, [&matrix]).unwrap();
        total.mark_failed("AVRORA");

        let mut output = CsvOutput::new();
        output.heatmap(&HeatmapArtifact::from_total(&total)).unwrap();
        assert!(output
            .to_csv()
            .contains("TOTAL_STARTUP_heatmap,total_incomplete,A,B,1"));
    }

    #[test]
    fn test_csv_chart_rows() {
        let (table, order) = fixture();
        let series = normalize(&table, "XALAN", "STARTUP", &order, "A").unwrap();

        let mut output = CsvOutput::new();
        output.chart(&ChartArtifact::from_series(&series)).unwrap();
        let csv = output.to_csv();

        assert!(csv.contains("XALAN_STARTUP,chart,A,A,,1.000000,0.020000,0.900000,1.100000"));
        assert!(csv.contains("XALAN_STARTUP,chart,B,A,,2.000000,0.040000,1.800000,2.200000"));
    }
}
