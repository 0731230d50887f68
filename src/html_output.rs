//! HTML report with embedded heatmaps and charts
//!
//! A single self-contained document: inline CSS, one section per phase, and
//! every artifact drawn as inline SVG under an anchor named after it.

use crate::render::{escape_html, ChartArtifact, HeatmapArtifact, RenderSink};
use crate::svg_output::{chart_svg, heatmap_svg};
use anyhow::Result;

/// HTML output formatter
#[derive(Debug)]
pub struct HtmlOutput {
    title: String,
    /// (phase, rendered section body) in arrival order
    sections: Vec<(String, String)>,
    heatmaps: usize,
    charts: usize,
}

impl HtmlOutput {
    /// Create a new HTML output formatter
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            sections: Vec::new(),
            heatmaps: 0,
            charts: 0,
        }
    }

    /// Generate embedded CSS styles
    fn generate_styles() -> &'static str {
        r#"
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            margin: 20px;
            background-color: #f5f5f5;
        }
        h1, h2 {
            color: #333;
        }
        .artifact {
            display: inline-block;
            vertical-align: top;
            background-color: white;
            box-shadow: 0 1px 3px rgba(0,0,0,0.1);
            margin: 0 20px 20px 0;
            padding: 10px;
        }
        .artifact h3 {
            font-family: monospace;
            font-size: 0.9em;
            color: #0066cc;
            margin: 0 0 6px 0;
        }
        .invalid {
            border: 2px dashed #cc0000;
        }
        .warning {
            color: #cc0000;
            font-weight: bold;
        }
        .legend span {
            display: inline-block;
            padding: 2px 8px;
            margin-right: 6px;
            color: white;
        }
        .footer {
            margin-top: 20px;
            font-size: 0.8em;
            color: #888;
            text-align: center;
        }
        "#
    }

    fn section(&mut self, phase: &str) -> &mut String {
        if self.sections.last().map(|(p, _)| p.as_str()) != Some(phase) {
            self.sections.push((phase.to_string(), String::new()));
        }
        let last = self.sections.len() - 1;
        &mut self.sections[last].1
    }

    fn artifact_block(name: &str, svg: &str, invalid: bool) -> String {
        let class = if invalid { "artifact invalid" } else { "artifact" };
        format!(
            "    <div class=\"{}\" id=\"{}\">\n        <h3>{}</h3>\n{}    </div>\n",
            class,
            escape_html(name),
            escape_html(name),
            svg
        )
    }

    /// Generate the complete HTML document
    pub fn to_html(&self) -> String {
        let mut html = String::new();

        html.push_str("<!DOCTYPE html>\n");
        html.push_str("<html lang=\"en\">\n");

        html.push_str("<head>\n");
        html.push_str("    <meta charset=\"UTF-8\">\n");
        html.push_str(
            "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
        );
        html.push_str(&format!(
            "    <title>{}</title>\n",
            escape_html(&self.title)
        ));
        html.push_str("    <style>");
        html.push_str(Self::generate_styles());
        html.push_str("</style>\n");
        html.push_str("</head>\n");

        html.push_str("<body>\n");
        html.push_str(&format!("    <h1>{}</h1>\n", escape_html(&self.title)));
        html.push_str("    <p class=\"legend\">Row variant compared to column variant: ");
        html.push_str("<span style=\"background:#3b4cc0\">+1 faster</span>");
        html.push_str("<span style=\"background:#b40426\">-1 slower</span>");
        html.push_str("<span style=\"background:#aaaaaa\">0 inconclusive</span></p>\n");

        for (phase, body) in &self.sections {
            html.push_str(&format!("    <h2>{}</h2>\n", escape_html(phase)));
            html.push_str(body);
        }

        html.push_str("    <div class=\"footer\">\n");
        html.push_str(&format!(
            "        Generated by benchmatrix {}: {} heatmaps, {} charts\n",
            env!("CARGO_PKG_VERSION"),
            self.heatmaps,
            self.charts
        ));
        html.push_str("    </div>\n");

        html.push_str("</body>\n");
        html.push_str("</html>\n");

        html
    }
}

impl RenderSink for HtmlOutput {
    fn heatmap(&mut self, artifact: &HeatmapArtifact) -> Result<()> {
        let mut block =
            Self::artifact_block(&artifact.name, &heatmap_svg(artifact), !artifact.valid);
        if !artifact.valid {
            block.push_str(&format!(
                "    <p class=\"warning\">Total is incomplete, missing: {}</p>\n",
                escape_html(&artifact.missing_workloads.join(", "))
            ));
        }
        self.section(&artifact.phase).push_str(&block);
        self.heatmaps += 1;
        Ok(())
    }

    fn chart(&mut self, artifact: &ChartArtifact) -> Result<()> {
        let block = Self::artifact_block(&artifact.name, &chart_svg(artifact), false);
        self.section(&artifact.series.phase).push_str(&block);
        self.charts += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<String> {
        Ok(self.to_html())
    }
}
