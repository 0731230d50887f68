// Confidence-level uniformity across the variants of one (workload, phase)
//
// Matrix and chart titles quote a single confidence level. Records of a
// (workload, phase) are expected to agree on it; this check makes the
// precondition visible instead of silently picking one label.

use crate::error::{AnalysisError, Result};
use crate::results::{ResultsTable, VariantOrder};
use serde::{Deserialize, Serialize};

/// What to do when variants disagree on their confidence level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelPolicy {
    /// Log a warning and keep going
    #[default]
    Warn,
    /// Fail with `InconsistentLabels`
    Strict,
}

/// Check that every variant reports the same confidence level
///
/// Sample sizes legitimately differ between variants (steady-state sample
/// counts depend on warmup convergence), so they are only logged.
pub fn check_uniform_labels(
    table: &ResultsTable,
    workload: &str,
    phase: &str,
    order: &VariantOrder,
    policy: LabelPolicy,
) -> Result<()> {
    let records = order
        .iter()
        .map(|variant| table.get(workload, variant, phase).map(|r| (variant, r)))
        .collect::<Result<Vec<_>>>()?;

    let Some((_, first)) = records.first() else {
        return Ok(());
    };
    let expected = first.confidence_level();

    for (variant, record) in &records {
        if record.confidence_level() != expected {
            match policy {
                LabelPolicy::Strict => {
                    return Err(AnalysisError::InconsistentLabels {
                        workload: workload.to_string(),
                        variant: variant.to_string(),
                        phase: phase.to_string(),
                        expected: expected.to_string(),
                        found: record.confidence_level().to_string(),
                    });
                }
                LabelPolicy::Warn => {
                    tracing::warn!(
                        "{} {}: {} reports {} confidence, titles use {}",
                        workload,
                        phase,
                        variant,
                        record.confidence_level(),
                        expected
                    );
                }
            }
        }

        if record.sample_size() != first.sample_size() {
            tracing::debug!(
                "{} {}: {} has {} samples, first variant has {}",
                workload,
                phase,
                variant,
                record.sample_size(),
                first.sample_size()
            );
        }
    }

    Ok(())
}
