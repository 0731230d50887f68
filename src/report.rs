//! Full analysis pass over every phase and workload
//!
//! For each phase, builds one comparison matrix per workload, folds them into
//! the phase total and normalizes each workload against the baseline. With
//! `keep_going`, a failing workload is recorded and skipped; its phase total
//! is then flagged incomplete.

use crate::comparison::{build_matrix, check_uniform_labels, ComparisonMatrix, TotalMatrix};
use crate::config::AnalysisPlan;
use crate::error::{AnalysisError, Result};
use crate::normalize::{normalize, NormalizedSeries};
use crate::render::{ChartArtifact, HeatmapArtifact, RenderSink};
use crate::results::ResultsTable;
use serde::Serialize;

/// Which outputs to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    pub matrices: bool,
    pub charts: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            matrices: true,
            charts: true,
        }
    }
}

/// Stage at which a workload failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureStage {
    Matrix,
    Chart,
}

impl std::fmt::Display for FailureStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureStage::Matrix => write!(f, "matrix"),
            FailureStage::Chart => write!(f, "chart"),
        }
    }
}

/// A workload skipped under `keep_going`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkloadFailure {
    pub workload: String,
    pub phase: String,
    pub stage: FailureStage,
    pub message: String,
}

/// Results of one phase
#[derive(Debug, Clone, Serialize)]
pub struct PhaseReport {
    pub phase: String,
    pub matrices: Vec<ComparisonMatrix>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<TotalMatrix>,
    pub charts: Vec<NormalizedSeries>,
    pub failures: Vec<WorkloadFailure>,
}

/// Results of a whole run
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub baseline: String,
    pub variants: Vec<String>,
    pub phases: Vec<PhaseReport>,
}

impl Report {
    /// Run the analysis described by `plan` over `table`
    pub fn build(
        table: &ResultsTable,
        plan: &AnalysisPlan,
        options: ReportOptions,
    ) -> Result<Self> {
        let phases = plan
            .phases
            .iter()
            .map(|phase| build_phase(table, plan, phase, options))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            baseline: plan.baseline.clone(),
            variants: plan.order.labels().to_vec(),
            phases,
        })
    }

    /// Feed every artifact to `sink`, phase by phase
    pub fn render(&self, sink: &mut dyn RenderSink) -> anyhow::Result<()> {
        for phase in &self.phases {
            for matrix in &phase.matrices {
                sink.heatmap(&HeatmapArtifact::from_matrix(matrix))?;
            }
            if let Some(total) = &phase.total {
                sink.heatmap(&HeatmapArtifact::from_total(total))?;
            }
            for series in &phase.charts {
                sink.chart(&ChartArtifact::from_series(series))?;
            }
        }
        Ok(())
    }

    /// Every workload of every phase succeeded
    pub fn is_complete(&self) -> bool {
        self.phases.iter().all(|p| p.failures.is_empty())
    }

    pub fn failures(&self) -> impl Iterator<Item = &WorkloadFailure> {
        self.phases.iter().flat_map(|p| p.failures.iter())
    }
}

fn build_phase(
    table: &ResultsTable,
    plan: &AnalysisPlan,
    phase: &str,
    options: ReportOptions,
) -> Result<PhaseReport> {
    let mut matrices = Vec::new();
    let mut charts = Vec::new();
    let mut failures = Vec::new();

    for workload in &plan.workloads {
        if options.matrices {
            let matrix =
                check_uniform_labels(table, workload, phase, &plan.order, plan.label_policy)
                    .and_then(|_| build_matrix(table, workload, phase, &plan.order));
            match matrix {
                Ok(matrix) => matrices.push(matrix),
                Err(e) => {
                    let failure = skip_or_abort(plan, workload, phase, FailureStage::Matrix, e)?;
                    failures.push(failure);
                }
            }
        }

        if options.charts {
            match normalize(table, workload, phase, &plan.order, &plan.baseline) {
                Ok(series) => charts.push(series),
                Err(e) => {
                    let failure = skip_or_abort(plan, workload, phase, FailureStage::Chart, e)?;
                    failures.push(failure);
                }
            }
        }
    }

    let total = if options.matrices {
        let mut total = TotalMatrix::from_matrices(phase, &plan.order, &matrices)?;
        for failure in failures.iter().filter(|f| f.stage == FailureStage::Matrix) {
            total.mark_failed(failure.workload.clone());
        }
        Some(total)
    } else {
        None
    };

    tracing::info!(
        "Phase {}: {} matrices, {} charts, {} failures",
        phase,
        matrices.len(),
        charts.len(),
        failures.len()
    );

    Ok(PhaseReport {
        phase: phase.to_string(),
        matrices,
        total,
        charts,
        failures,
    })
}

fn skip_or_abort(
    plan: &AnalysisPlan,
    workload: &str,
    phase: &str,
    stage: FailureStage,
    error: AnalysisError,
) -> Result<WorkloadFailure> {
    if !plan.keep_going {
        return Err(error);
    }

    tracing::warn!("Skipping {} {} ({}): {}", workload, phase, stage, error);
    Ok(WorkloadFailure {
        workload: workload.to_string(),
        phase: phase.to_string(),
        stage,
        message: error.to_string(),
    })
}
