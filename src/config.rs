//! Analysis configuration
//!
//! Fixes which variants, workloads and phases are analyzed, in which order,
//! and against which baseline. Lists left empty are discovered from the
//! results table in sorted order.
//!
//! # Example benchmatrix.toml
//!
//! ```toml
//! variants = ["OPENJDK_8", "GRAALVM_CE_8", "OPENJDK_11", "GRAALVM_CE_11"]
//! workloads = ["AVRORA", "H2", "SUNFLOW"]
//! phases = ["STARTUP", "STEADY_STATE"]
//! baseline = "OPENJDK_8"
//! label_policy = "strict"
//! keep_going = true
//! ```

use crate::comparison::LabelPolicy;
use crate::error::{AnalysisError, Result as AnalysisResult};
use crate::results::{ResultsTable, VariantOrder};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Configuration for one analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Variant order shared by every matrix axis and chart
    pub variants: Vec<String>,

    /// Workloads to analyze, in output order
    pub workloads: Vec<String>,

    /// Measurement phases, e.g. `STARTUP` and `STEADY_STATE`
    pub phases: Vec<String>,

    /// Normalization target; defaults to the first variant
    pub baseline: Option<String>,

    /// Handling of variants that disagree on their confidence level
    pub label_policy: LabelPolicy,

    /// Skip failing workloads instead of aborting the phase
    ///
    /// A phase with a skipped workload still gets a total matrix, flagged
    /// as incomplete.
    pub keep_going: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            variants: Vec::new(),
            workloads: Vec::new(),
            phases: Vec::new(),
            baseline: None,
            label_policy: LabelPolicy::Warn,
            keep_going: false,
        }
    }
}

impl AnalysisConfig {
    /// DaCapo 9.12 workloads across OpenJDK, Oracle JDK and GraalVM 8/11
    pub fn dacapo() -> Self {
        let strings = |items: &[&str]| -> Vec<String> {
            items.iter().map(|s| s.to_string()).collect()
        };
        Self {
            variants: strings(&[
                "OPENJDK_8",
                "ORACLEJDK_8",
                "GRAALVM_CE_8",
                "GRAALVM_EE_8",
                "OPENJDK_11",
                "ORACLEJDK_11",
                "GRAALVM_CE_11",
                "GRAALVM_EE_11",
            ]),
            workloads: strings(&[
                "AVRORA",
                "FOP",
                "H2",
                "JYTHON",
                "LUINDEX",
                "LUSEARCH_FIX",
                "PMD",
                "SUNFLOW",
                "TRADEBEANS",
                "XALAN",
            ]),
            phases: strings(&["STARTUP", "STEADY_STATE"]),
            baseline: Some("OPENJDK_8".to_string()),
            ..Self::default()
        }
    }

    /// Load configuration from a TOML file
    ///
    /// ```no_run
    /// use benchmatrix::config::AnalysisConfig;
    ///
    /// # fn main() -> anyhow::Result<()> {
    /// let config = AnalysisConfig::from_file("benchmatrix.toml")?;
    /// println!("{} variants", config.variants.len());
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Self::from_toml_str(&content)
    }

    /// Load configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML")
    }

    /// Validate configuration
    pub fn validate(&self) -> std::result::Result<(), String> {
        for (name, list) in [
            ("variants", &self.variants),
            ("workloads", &self.workloads),
            ("phases", &self.phases),
        ] {
            if let Some(empty) = list.iter().find(|s| s.trim().is_empty()) {
                return Err(format!("{} contains an empty name: {:?}", name, empty));
            }
            let mut sorted = list.clone();
            sorted.sort();
            if let Some(pair) = sorted.windows(2).find(|w| w[0] == w[1]) {
                return Err(format!("{} lists {} more than once", name, pair[0]));
            }
        }

        if let (Some(baseline), false) = (&self.baseline, self.variants.is_empty()) {
            if !self.variants.contains(baseline) {
                return Err(format!(
                    "baseline {} is not one of the configured variants",
                    baseline
                ));
            }
        }

        Ok(())
    }

    /// Fill unset lists from `table` and fix the baseline
    pub fn resolve(&self, table: &ResultsTable) -> AnalysisResult<AnalysisPlan> {
        self.validate().map_err(AnalysisError::InvalidConfig)?;

        let or_discovered = |configured: &Vec<String>, discovered: Vec<String>| {
            if configured.is_empty() {
                discovered
            } else {
                configured.clone()
            }
        };

        let order = VariantOrder::new(or_discovered(&self.variants, table.variants()))?;
        let workloads = or_discovered(&self.workloads, table.workloads());
        let phases = or_discovered(&self.phases, table.phases());

        if workloads.is_empty() || phases.is_empty() {
            return Err(AnalysisError::InvalidConfig(
                "no workloads or phases to analyze".to_string(),
            ));
        }

        let baseline = match &self.baseline {
            Some(b) if order.index_of(b).is_none() => {
                return Err(AnalysisError::UnknownVariant(b.clone()));
            }
            Some(b) => b.clone(),
            // VariantOrder is never empty
            None => order.labels()[0].clone(),
        };

        Ok(AnalysisPlan {
            order,
            workloads,
            phases,
            baseline,
            label_policy: self.label_policy,
            keep_going: self.keep_going,
        })
    }
}

/// Fully resolved run parameters
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisPlan {
    pub order: VariantOrder,
    pub workloads: Vec<String>,
    pub phases: Vec<String>,
    pub baseline: String,
    pub label_policy: LabelPolicy,
    pub keep_going: bool,
}
