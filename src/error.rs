//! Error types for benchmark result analysis
//!
//! Every failure here is a data-integrity problem, not a transient one: there
//! is no retry path, and no caller may substitute a default record for a
//! missing or malformed one.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while validating, comparing or normalizing measurements
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Malformed record{}: {reason}", key.as_ref().map(|k| format!(" [{}]", k)).unwrap_or_default())]
    MalformedRecord {
        /// `workload.variant.phase` when known
        key: Option<String>,
        reason: String,
    },

    #[error("Missing data for variant {variant} in workload {workload}, phase {phase}")]
    MissingVariantData {
        workload: String,
        variant: String,
        phase: String,
    },

    #[error("Baseline {variant} has a zero mean in workload {workload}, phase {phase}")]
    DivisionByZeroBaseline {
        workload: String,
        variant: String,
        phase: String,
    },

    #[error("Matrix axes do not line up: expected {expected:?}, found {found:?}")]
    AxisMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("Cannot combine phase {found} into a total for phase {expected}")]
    PhaseMismatch { expected: String, found: String },

    #[error(
        "Variant {variant} reports {found}, expected {expected} in workload {workload}, phase {phase}"
    )]
    InconsistentLabels {
        workload: String,
        variant: String,
        phase: String,
        expected: String,
        found: String,
    },

    #[error("Unknown variant: {0}")]
    UnknownVariant(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to parse {}: {source}", path.as_ref().map(|p| p.display().to_string()).unwrap_or_else(|| "input".to_string()))]
    Parse {
        path: Option<PathBuf>,
        #[source]
        source: toml::de::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AnalysisError {
    /// Build a `MalformedRecord` error without key context
    pub fn malformed(reason: impl Into<String>) -> Self {
        AnalysisError::MalformedRecord {
            key: None,
            reason: reason.into(),
        }
    }

    /// Attach a `workload.variant.phase` key to a `MalformedRecord` error
    pub fn with_key(self, key: impl Into<String>) -> Self {
        match self {
            AnalysisError::MalformedRecord { reason, .. } => AnalysisError::MalformedRecord {
                key: Some(key.into()),
                reason,
            },
            other => other,
        }
    }
}

/// Result type for analysis operations
pub type Result<T> = std::result::Result<T, AnalysisError>;
