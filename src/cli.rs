//! CLI argument parsing for benchmatrix

use crate::comparison::LabelPolicy;
use crate::config::AnalysisConfig;
use crate::report::ReportOptions;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for comparison results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// Self-contained HTML report with inline SVG
    Html,
    /// JSON format for machine parsing
    Json,
    /// CSV format for spreadsheet analysis
    Csv,
    /// One SVG file per heatmap and chart (requires --output DIR)
    Svg,
}

#[derive(Parser, Debug)]
#[command(name = "benchmatrix")]
#[command(version)]
#[command(
    about = "Compare benchmark variants by confidence-interval overlap",
    long_about = None
)]
pub struct Cli {
    /// Results file: one TOML table per [WORKLOAD.VARIANT.PHASE]
    #[arg(value_name = "RESULTS")]
    pub results: PathBuf,

    /// Analysis configuration file (TOML)
    #[arg(short = 'C', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Start from the DaCapo JVM comparison preset instead of discovery
    #[arg(long = "dacapo", conflicts_with = "config")]
    pub dacapo: bool,

    /// Output format
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Output file, or directory for --format svg (default: stdout)
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Variant every chart is normalized against
    #[arg(short = 'b', long = "baseline", value_name = "VARIANT")]
    pub baseline: Option<String>,

    /// Variant order for matrix axes and charts (comma separated)
    #[arg(long = "variants", value_name = "LIST", value_delimiter = ',')]
    pub variants: Option<Vec<String>>,

    /// Workloads to analyze (comma separated)
    #[arg(long = "workloads", value_name = "LIST", value_delimiter = ',')]
    pub workloads: Option<Vec<String>>,

    /// Phases to analyze (comma separated)
    #[arg(long = "phases", value_name = "LIST", value_delimiter = ',')]
    pub phases: Option<Vec<String>>,

    /// Fail when variants of one workload disagree on their confidence level
    #[arg(long = "strict-labels")]
    pub strict_labels: bool,

    /// Skip failing workloads and flag the affected totals as incomplete
    #[arg(short = 'k', long = "keep-going")]
    pub keep_going: bool,

    /// Produce only verdict matrices
    #[arg(long = "matrices-only", conflicts_with = "charts_only")]
    pub matrices_only: bool,

    /// Produce only normalized charts
    #[arg(long = "charts-only")]
    pub charts_only: bool,

    /// Print every parsed record before the analysis
    #[arg(long = "print-records")]
    pub print_records: bool,

    /// Enable debug tracing output to stderr
    #[arg(long = "debug")]
    pub debug: bool,
}

impl Cli {
    /// Overlay command-line settings on a file or preset configuration
    pub fn apply_overrides(&self, config: &mut AnalysisConfig) {
        if let Some(variants) = &self.variants {
            config.variants = variants.clone();
        }
        if let Some(workloads) = &self.workloads {
            config.workloads = workloads.clone();
        }
        if let Some(phases) = &self.phases {
            config.phases = phases.clone();
        }
        if let Some(baseline) = &self.baseline {
            config.baseline = Some(baseline.clone());
        }
        if self.strict_labels {
            config.label_policy = LabelPolicy::Strict;
        }
        if self.keep_going {
            config.keep_going = true;
        }
    }

    pub fn report_options(&self) -> ReportOptions {
        ReportOptions {
            matrices: !self.charts_only,
            charts: !self.matrices_only,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_results_path() {
        let cli = Cli::parse_from(["benchmatrix", "results.toml"]);
        assert_eq!(cli.results, PathBuf::from("results.toml"));
        assert_eq!(cli.format, OutputFormat::Text);
        assert!(cli.config.is_none());
        assert!(!cli.debug);
    }

    #[test]
    fn test_cli_requires_results() {
        assert!(Cli::try_parse_from(["benchmatrix"]).is_err());
    }

    #[test]
    fn test_cli_format_flag() {
        let cli = Cli::parse_from(["benchmatrix", "--format", "html", "r.toml"]);
        assert_eq!(cli.format, OutputFormat::Html);
        assert!(Cli::try_parse_from(["benchmatrix", "--format", "pdf", "r.toml"]).is_err());
    }

    #[test]
    fn test_cli_lists_split_on_comma() {
        let cli = Cli::parse_from([
            "benchmatrix",
            "--variants",
            "OPENJDK_8,GRAALVM_CE_8",
            "--phases",
            "STARTUP",
            "r.toml",
        ]);
        assert_eq!(
            cli.variants,
            Some(vec!["OPENJDK_8".to_string(), "GRAALVM_CE_8".to_string()])
        );
        assert_eq!(cli.phases, Some(vec!["STARTUP".to_string()]));
        assert!(cli.workloads.is_none());
    }

    #[test]
    fn test_cli_only_flags_conflict() {
        let result =
            Cli::try_parse_from(["benchmatrix", "--matrices-only", "--charts-only", "r.toml"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_dacapo_conflicts_with_config() {
        let result = Cli::try_parse_from(["benchmatrix", "--dacapo", "-C", "c.toml", "r.toml"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_report_options() {
        let cli = Cli::parse_from(["benchmatrix", "r.toml"]);
        assert_eq!(cli.report_options(), ReportOptions::default());

        let cli = Cli::parse_from(["benchmatrix", "--charts-only", "r.toml"]);
        assert!(!cli.report_options().matrices);
        assert!(cli.report_options().charts);
    }

    #[test]
    fn test_overrides_replace_config_values() {
        let cli = Cli::parse_from([
            "benchmatrix",
            "--baseline",
            "GRAALVM_EE_11",
            "--workloads",
            "H2",
            "--strict-labels",
            "-k",
            "r.toml",
        ]);
        let mut config = AnalysisConfig::dacapo();
        cli.apply_overrides(&mut config);

        assert_eq!(config.baseline.as_deref(), Some("GRAALVM_EE_11"));
        assert_eq!(config.workloads, vec!["H2"]);
        assert_eq!(config.variants.len(), 8);
        assert_eq!(config.label_policy, LabelPolicy::Strict);
        assert!(config.keep_going);
    }

    #[test]
    fn test_absent_flags_keep_config_values() {
        let cli = Cli::parse_from(["benchmatrix", "r.toml"]);
        let mut config = AnalysisConfig {
            keep_going: true,
            ..AnalysisConfig::dacapo()
        };
        cli.apply_overrides(&mut config);
        assert_eq!(config, AnalysisConfig {
            keep_going: true,
            ..AnalysisConfig::dacapo()
        });
    }
}
