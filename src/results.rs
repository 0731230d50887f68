//! Typed results table keyed by (workload, variant, phase)
//!
//! Results files are TOML documents with one table per measurement:
//!
//! ```toml
//! [H2.OPENJDK_8.STARTUP]
//! size = 50
//! mean = 4312.5
//! median = 4301.0
//! max = 4620.0
//! min = 4188.0
//! confidence_level = "95%"
//! error = 21.3
//! ```

use crate::error::{AnalysisError, Result};
use crate::record::{MeasurementRecord, RawRecord};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// Composite lookup key for a single measurement
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResultKey {
    pub workload: String,
    pub variant: String,
    pub phase: String,
}

impl ResultKey {
    pub fn new(
        workload: impl Into<String>,
        variant: impl Into<String>,
        phase: impl Into<String>,
    ) -> Self {
        Self {
            workload: workload.into(),
            variant: variant.into(),
            phase: phase.into(),
        }
    }
}

impl std::fmt::Display for ResultKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.workload, self.variant, self.phase)
    }
}

/// Human-readable name of a phase identifier
///
/// `STARTUP` and `STEADY_STATE` have fixed names; anything else is shown as is.
pub fn phase_display_name(phase: &str) -> &str {
    match phase {
        "STARTUP" => "Startup",
        "STEADY_STATE" => "Steady state",
        other => other,
    }
}

type RawTable = BTreeMap<String, BTreeMap<String, BTreeMap<String, RawRecord>>>;

/// All summarized measurements of one benchmark campaign
#[derive(Debug, Clone, Default)]
pub struct ResultsTable {
    records: BTreeMap<ResultKey, MeasurementRecord>,
}

impl ResultsTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a results table from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let raw: RawTable = toml::from_str(&content).map_err(|source| AnalysisError::Parse {
            path: Some(path.to_path_buf()),
            source,
        })?;
        Self::from_raw(raw)
    }

    /// Parse a results table from a TOML string
    ///
    /// # Example
    /// ```
    /// use benchmatrix::results::ResultsTable;
    ///
    /// let table = ResultsTable::from_toml_str(r#"
    ///     [FOP.OPENJDK_11.STEADY_STATE]
    ///     size = 40
    ///     mean = 310.0
    ///     max = 340.0
    ///     min = 301.0
    ///     confidence_level = "95%"
    ///     error = 2.5
    /// "#).unwrap();
    ///
    /// let record = table.get("FOP", "OPENJDK_11", "STEADY_STATE").unwrap();
    /// assert_eq!(record.mean(), 310.0);
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let raw: RawTable = toml::from_str(content)
            .map_err(|source| AnalysisError::Parse { path: None, source })?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawTable) -> Result<Self> {
        let mut table = Self::new();
        for (workload, variants) in raw {
            for (variant, phases) in variants {
                for (phase, raw_record) in phases {
                    let key = ResultKey::new(workload.clone(), variant.clone(), phase);
                    let record = MeasurementRecord::try_from(raw_record)
                        .map_err(|e| e.with_key(key.to_string()))?;
                    table.insert(key, record);
                }
            }
        }
        tracing::debug!("Loaded {} measurement records", table.len());
        Ok(table)
    }

    /// Insert or replace a record
    pub fn insert(&mut self, key: ResultKey, record: MeasurementRecord) {
        self.records.insert(key, record);
    }

    /// Look up the record for one (workload, variant, phase)
    ///
    /// Fails with [`AnalysisError::MissingVariantData`] when absent.
    pub fn get(&self, workload: &str, variant: &str, phase: &str) -> Result<&MeasurementRecord> {
        // BTreeMap lookups need an owned key
        let key = ResultKey::new(workload, variant, phase);
        self.records
            .get(&key)
            .ok_or_else(|| AnalysisError::MissingVariantData {
                workload: workload.to_string(),
                variant: variant.to_string(),
                phase: phase.to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ResultKey, &MeasurementRecord)> {
        self.records.iter()
    }

    /// Distinct workload names, sorted
    pub fn workloads(&self) -> Vec<String> {
        self.distinct(|k| &k.workload)
    }

    /// Distinct variant names, sorted
    pub fn variants(&self) -> Vec<String> {
        self.distinct(|k| &k.variant)
    }

    /// Distinct phase names, sorted
    pub fn phases(&self) -> Vec<String> {
        self.distinct(|k| &k.phase)
    }

    fn distinct<F>(&self, field: F) -> Vec<String>
    where
        F: Fn(&ResultKey) -> &String,
    {
        self.records
            .keys()
            .map(field)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .cloned()
            .collect()
    }
}

/// Explicit, shared ordering of variants along both matrix axes
///
/// Every matrix and series built for a phase is indexed by the same order, so
/// row/column `i` always refers to the same variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantOrder {
    labels: Vec<String>,
}

impl VariantOrder {
    /// Create an order from distinct, non-empty labels
    pub fn new<I, S>(labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.is_empty() {
            return Err(AnalysisError::InvalidConfig(
                "variant order must not be empty".to_string(),
            ));
        }

        let mut seen = BTreeSet::new();
        for label in &labels {
            if !seen.insert(label.as_str()) {
                return Err(AnalysisError::InvalidConfig(format!(
                    "variant {} appears more than once",
                    label
                )));
            }
        }

        Ok(Self { labels })
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    /// Position of a variant on the axes
    pub fn index_of(&self, variant: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == variant)
    }
}
