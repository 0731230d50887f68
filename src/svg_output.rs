//! SVG rendering of heatmaps and normalized error-bar charts
//!
//! The drawing functions return standalone `<svg>` documents; the HTML report
//! embeds them inline and [`SvgOutput`] writes one file per artifact, named
//! `<artifact>.svg`.

use crate::render::{escape_html, ChartArtifact, HeatmapArtifact, RenderSink};
use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

const CELL: f64 = 44.0;
const LABEL_MARGIN: f64 = 130.0;
const TITLE_HEIGHT: f64 = 56.0;

const CHART_HEIGHT: f64 = 320.0;
const CHART_SLOT: f64 = 72.0;
const CHART_LEFT: f64 = 70.0;
const CHART_BOTTOM: f64 = 130.0;

/// Grey for zero, blending to blue (row better) or red (row worse)
fn cell_color(value: i64, max_magnitude: i64) -> String {
    let t = (value as f64 / max_magnitude as f64).clamp(-1.0, 1.0);
    let grey = (221.0, 221.0, 221.0);
    let target = if t >= 0.0 {
        (59.0, 76.0, 192.0)
    } else {
        (180.0, 4.0, 38.0)
    };
    let w = t.abs();
    let mix = |a: f64, b: f64| (a + (b - a) * w).round() as u8;
    format!(
        "#{:02x}{:02x}{:02x}",
        mix(grey.0, target.0),
        mix(grey.1, target.1),
        mix(grey.2, target.2)
    )
}

fn title_lines(svg: &mut String, title: &str, x: f64) {
    for (i, line) in title.lines().enumerate() {
        let _ = writeln!(
            svg,
            r#"  <text x="{x:.1}" y="{:.1}" text-anchor="middle" class="title">{}</text>"#,
            18.0 + i as f64 * 16.0,
            escape_html(line)
        );
    }
}

/// Draw a verdict matrix as a labeled grid
///
/// Column labels run along the top, rotated; each cell shows its value.
pub fn heatmap_svg(artifact: &HeatmapArtifact) -> String {
    let n = artifact.labels.len() as f64;
    let width = LABEL_MARGIN + n * CELL + 20.0;
    let top = TITLE_HEIGHT + LABEL_MARGIN;
    let height = top + n * CELL + 20.0;
    let max = artifact.max_magnitude();

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width:.0}" height="{height:.0}" viewBox="0 0 {width:.0} {height:.0}" font-family="sans-serif" font-size="11">"#
    );
    svg.push_str("  <style>.title { font-size: 13px; font-weight: bold; }</style>\n");
    title_lines(&mut svg, &artifact.title, width / 2.0);

    for (j, label) in artifact.labels.iter().enumerate() {
        let x = LABEL_MARGIN + (j as f64 + 0.5) * CELL;
        let _ = writeln!(
            svg,
            r#"  <text x="{x:.1}" y="{:.1}" transform="rotate(-45 {x:.1} {:.1})">{}</text>"#,
            top - 6.0,
            top - 6.0,
            escape_html(label)
        );
    }

    for (i, row) in artifact.values.iter().enumerate() {
        let y = top + i as f64 * CELL;
        let _ = writeln!(
            svg,
            r#"  <text x="{:.1}" y="{:.1}" text-anchor="end">{}</text>"#,
            LABEL_MARGIN - 6.0,
            y + CELL / 2.0 + 4.0,
            escape_html(&artifact.labels[i])
        );
        for (j, &value) in row.iter().enumerate() {
            let x = LABEL_MARGIN + j as f64 * CELL;
            let _ = writeln!(
                svg,
                r#"  <rect x="{x:.1}" y="{y:.1}" width="{CELL:.1}" height="{CELL:.1}" fill="{}" stroke="white"/>"#,
                cell_color(value, max)
            );
            let _ = writeln!(
                svg,
                r#"  <text x="{:.1}" y="{:.1}" text-anchor="middle" fill="white">{}</text>"#,
                x + CELL / 2.0,
                y + CELL / 2.0 + 4.0,
                value
            );
        }
    }

    if !artifact.valid {
        let _ = writeln!(
            svg,
            r#"  <rect x="{LABEL_MARGIN:.1}" y="{top:.1}" width="{:.1}" height="{:.1}" fill="none" stroke="black" stroke-dasharray="6 4" stroke-width="2"/>"#,
            n * CELL,
            n * CELL
        );
    }

    svg.push_str("</svg>\n");
    svg
}

/// Draw a normalized series as an error-bar chart
///
/// Dotted vertical lines span min..max, bars span mean ± error, and two dotted
/// horizontal guides mark the baseline's own uncertainty band.
pub fn chart_svg(artifact: &ChartArtifact) -> String {
    let series = &artifact.series;
    let n = series.points.len();
    let plot_width = (n as f64 + 1.0) * CHART_SLOT;
    let width = CHART_LEFT + plot_width + 20.0;
    let height = TITLE_HEIGHT + CHART_HEIGHT + CHART_BOTTOM;

    let (mut lo, mut hi) = (series.lower_guide, series.upper_guide);
    for p in &series.points {
        lo = lo.min(p.min).min(p.mean - p.error);
        hi = hi.max(p.max).max(p.mean + p.error);
    }
    let pad = ((hi - lo) * 0.08).max(0.01);
    let (lo, hi) = (lo - pad, hi + pad);

    let px = |slot: f64| CHART_LEFT + slot * CHART_SLOT;
    let py = |v: f64| TITLE_HEIGHT + CHART_HEIGHT * (hi - v) / (hi - lo);
    let bottom = TITLE_HEIGHT + CHART_HEIGHT;

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width:.0}" height="{height:.0}" viewBox="0 0 {width:.0} {height:.0}" font-family="sans-serif" font-size="11">"#
    );
    svg.push_str("  <style>.title { font-size: 13px; font-weight: bold; }</style>\n");
    title_lines(&mut svg, &artifact.title, width / 2.0);

    // Axes
    let _ = writeln!(
        svg,
        r#"  <line x1="{CHART_LEFT:.1}" y1="{TITLE_HEIGHT:.1}" x2="{CHART_LEFT:.1}" y2="{bottom:.1}" stroke="black"/>"#
    );
    let _ = writeln!(
        svg,
        r#"  <line x1="{CHART_LEFT:.1}" y1="{bottom:.1}" x2="{:.1}" y2="{bottom:.1}" stroke="black"/>"#,
        CHART_LEFT + plot_width
    );
    for k in 0..=4 {
        let v = lo + (hi - lo) * k as f64 / 4.0;
        let _ = writeln!(
            svg,
            r#"  <text x="{:.1}" y="{:.1}" text-anchor="end">{:.3}</text>"#,
            CHART_LEFT - 6.0,
            py(v) + 4.0,
            v
        );
    }
    let mid = TITLE_HEIGHT + CHART_HEIGHT / 2.0;
    let _ = writeln!(
        svg,
        r#"  <text x="16" y="{mid:.1}" text-anchor="middle" transform="rotate(-90 16 {mid:.1})">Normalized execution time</text>"#
    );

    // Baseline band
    for guide in [series.upper_guide, series.lower_guide] {
        let _ = writeln!(
            svg,
            r#"  <line x1="{CHART_LEFT:.1}" y1="{y:.1}" x2="{:.1}" y2="{y:.1}" stroke="black" stroke-dasharray="2 3"/>"#,
            CHART_LEFT + plot_width,
            y = py(guide)
        );
    }

    for (i, (label, p)) in series.variants.iter().zip(&series.points).enumerate() {
        let x = px(i as f64 + 1.0);
        let _ = writeln!(
            svg,
            r#"  <line x1="{x:.1}" y1="{:.1}" x2="{x:.1}" y2="{:.1}" stroke="darkgrey" stroke-dasharray="2 3"/>"#,
            py(p.min),
            py(p.max)
        );
        let (top, low) = (py(p.mean + p.error), py(p.mean - p.error));
        let _ = writeln!(
            svg,
            r#"  <line x1="{x:.1}" y1="{top:.1}" x2="{x:.1}" y2="{low:.1}" stroke="black" stroke-width="2"/>"#
        );
        for cap in [top, low] {
            let _ = writeln!(
                svg,
                r#"  <line x1="{:.1}" y1="{cap:.1}" x2="{:.1}" y2="{cap:.1}" stroke="black" stroke-width="2"/>"#,
                x - 5.0,
                x + 5.0
            );
        }
        let _ = writeln!(
            svg,
            r#"  <rect x="{:.1}" y="{:.1}" width="5" height="5" fill="black"/>"#,
            x - 2.5,
            py(p.mean) - 2.5
        );
        let _ = writeln!(
            svg,
            r#"  <text x="{:.1}" y="{:.1}">{:.3}</text>"#,
            x + 8.0,
            py(p.mean) - 6.0,
            p.mean
        );
        let _ = writeln!(
            svg,
            r#"  <text x="{x:.1}" y="{:.1}" text-anchor="end" transform="rotate(-90 {x:.1} {:.1})">{}</text>"#,
            bottom + 8.0,
            bottom + 8.0,
            escape_html(label)
        );
    }

    svg.push_str("</svg>\n");
    svg
}

/// Writes each artifact to `<dir>/<name>.svg`
#[derive(Debug)]
pub struct SvgOutput {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl SvgOutput {
    /// Create the sink, creating `dir` if needed
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
        Ok(Self {
            dir,
            written: Vec::new(),
        })
    }

    fn write(&mut self, name: &str, svg: &str) -> Result<()> {
        let path = self.dir.join(format!("{}.svg", name));
        std::fs::write(&path, svg).with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::debug!("Wrote {}", path.display());
        self.written.push(path);
        Ok(())
    }

    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl RenderSink for SvgOutput {
    fn heatmap(&mut self, artifact: &HeatmapArtifact) -> Result<()> {
        self.write(&artifact.name, &heatmap_svg(artifact))
    }

    fn chart(&mut self, artifact: &ChartArtifact) -> Result<()> {
        self.write(&artifact.name, &chart_svg(artifact))
    }

    fn finish(&mut self) -> Result<String> {
        let mut summary = String::new();
        for path in &self.written {
            let _ = writeln!(summary, "{}", path.display());
        }
        Ok(summary)
    }
}
