// Comparison matrices per (workload, phase) and their per-phase total
//
// The total is an explicit reduction over per-workload matrices rather than
// state carried through the workload loop, so it can be tested on its own and
// partial totals can be merged.

use crate::comparison::comparator::{compare, Verdict};
use crate::error::{AnalysisError, Result};
use crate::results::{ResultsTable, VariantOrder};
use serde::Serialize;

/// Verdicts of every variant against every other for one workload and phase
///
/// `cells[i][j]` is row variant `i` compared to column variant `j`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonMatrix {
    workload: String,
    phase: String,
    #[serde(rename = "variants", serialize_with = "serialize_order")]
    order: VariantOrder,
    cells: Vec<Vec<Verdict>>,
    confidence_level: String,
}

fn serialize_order<S: serde::Serializer>(
    order: &VariantOrder,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    order.labels().serialize(serializer)
}

impl ComparisonMatrix {
    pub fn workload(&self) -> &str {
        &self.workload
    }

    pub fn phase(&self) -> &str {
        &self.phase
    }

    pub fn order(&self) -> &VariantOrder {
        &self.order
    }

    /// Confidence level shared by the constituent records
    pub fn confidence_level(&self) -> &str {
        &self.confidence_level
    }

    pub fn size(&self) -> usize {
        self.cells.len()
    }

    pub fn cell(&self, row: usize, column: usize) -> Verdict {
        self.cells[row][column]
    }

    pub fn rows(&self) -> &[Vec<Verdict>] {
        &self.cells
    }

    /// Cells in signed form
    pub fn values(&self) -> Vec<Vec<i64>> {
        self.cells
            .iter()
            .map(|row| row.iter().map(|&v| i64::from(v)).collect())
            .collect()
    }

    /// Net wins of a row variant (wins minus losses)
    pub fn row_score(&self, row: usize) -> i64 {
        self.cells[row].iter().map(|&v| i64::from(v)).sum()
    }
}

/// Build the verdict matrix of `workload` and `phase` over `order`
///
/// Every record is looked up before any comparison, so a missing variant
/// aborts the whole matrix instead of leaving a partially filled one.
///
/// # Example
/// ```
/// use benchmatrix::comparison::build_matrix;
/// use benchmatrix::record::MeasurementRecord;
/// use benchmatrix::results::{ResultKey, ResultsTable, VariantOrder};
///
/// let mut table = ResultsTable::new();
/// table.insert(
///     ResultKey::new("X", "A", "STEADY_STATE"),
///     MeasurementRecord::new(100.0, 5.0, 95.0, 105.0, 30, "95%").unwrap(),
/// );
/// table.insert(
///     ResultKey::new("X", "B", "STEADY_STATE"),
///     MeasurementRecord::new(130.0, 5.0, 125.0, 135.0, 30, "95%").unwrap(),
/// );
///
/// let order = VariantOrder::new(["A", "B"]).unwrap();
/// let matrix = build_matrix(&table, "X", "STEADY_STATE", &order).unwrap();
/// assert_eq!(matrix.values(), vec![vec![0, 1], vec![-1, 0]]);
/// ```
pub fn build_matrix(
    table: &ResultsTable,
    workload: &str,
    phase: &str,
    order: &VariantOrder,
) -> Result<ComparisonMatrix> {
    let records = order
        .iter()
        .map(|variant| table.get(workload, variant, phase))
        .collect::<Result<Vec<_>>>()?;

    let cells: Vec<Vec<Verdict>> = records
        .iter()
        .map(|row| records.iter().map(|column| compare(row, column)).collect())
        .collect();

    // All records of a phase share one confidence level; take the first.
    let confidence_level = records
        .first()
        .map(|r| r.confidence_level().to_string())
        .unwrap_or_default();

    tracing::debug!(
        "Built {}x{} matrix for {} {} ({} confidence)",
        cells.len(),
        cells.len(),
        workload,
        phase,
        confidence_level
    );

    Ok(ComparisonMatrix {
        workload: workload.to_string(),
        phase: phase.to_string(),
        order: order.clone(),
        cells,
        confidence_level,
    })
}

/// Sum of comparison matrices over the workloads of one phase
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TotalMatrix {
    phase: String,
    #[serde(rename = "variants", serialize_with = "serialize_order")]
    order: VariantOrder,
    cells: Vec<Vec<i64>>,
    workloads: Vec<String>,
    failed_workloads: Vec<String>,
    confidence_level: Option<String>,
}

impl TotalMatrix {
    /// Zero-filled total for `phase`
    pub fn new(phase: impl Into<String>, order: &VariantOrder) -> Self {
        let n = order.len();
        Self {
            phase: phase.into(),
            order: order.clone(),
            cells: vec![vec![0; n]; n],
            workloads: Vec::new(),
            failed_workloads: Vec::new(),
            confidence_level: None,
        }
    }

    /// Fold a sequence of matrices into a fresh total
    pub fn from_matrices<'a, I>(
        phase: impl Into<String>,
        order: &VariantOrder,
        matrices: I,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = &'a ComparisonMatrix>,
    {
        matrices
            .into_iter()
            .try_fold(Self::new(phase, order), |mut total, matrix| {
                total.accumulate(matrix)?;
                Ok(total)
            })
    }

    /// Add one workload's verdicts cell by cell
    pub fn accumulate(&mut self, matrix: &ComparisonMatrix) -> Result<()> {
        self.check_compatible(&matrix.phase, &matrix.order)?;

        for (total_row, row) in self.cells.iter_mut().zip(&matrix.cells) {
            for (total_cell, &verdict) in total_row.iter_mut().zip(row) {
                *total_cell += i64::from(verdict);
            }
        }

        self.workloads.push(matrix.workload.clone());
        self.confidence_level = Some(matrix.confidence_level.clone());
        Ok(())
    }

    /// Combine a partial total computed over a disjoint set of workloads
    pub fn merge(&mut self, other: &TotalMatrix) -> Result<()> {
        self.check_compatible(&other.phase, &other.order)?;

        for (row, other_row) in self.cells.iter_mut().zip(&other.cells) {
            for (cell, other_cell) in row.iter_mut().zip(other_row) {
                *cell += other_cell;
            }
        }

        self.workloads.extend(other.workloads.iter().cloned());
        self.failed_workloads
            .extend(other.failed_workloads.iter().cloned());
        if other.confidence_level.is_some() {
            self.confidence_level = other.confidence_level.clone();
        }
        Ok(())
    }

    /// Record a workload whose matrix could not be built
    ///
    /// The total no longer covers every workload and must not be presented
    /// as a valid ranking.
    pub fn mark_failed(&mut self, workload: impl Into<String>) {
        self.failed_workloads.push(workload.into());
    }

    pub fn is_complete(&self) -> bool {
        self.failed_workloads.is_empty()
    }

    pub fn failed_workloads(&self) -> &[String] {
        &self.failed_workloads
    }

    /// Workloads that contributed, in accumulation order
    pub fn workloads(&self) -> &[String] {
        &self.workloads
    }

    pub fn phase(&self) -> &str {
        &self.phase
    }

    pub fn order(&self) -> &VariantOrder {
        &self.order
    }

    pub fn confidence_level(&self) -> Option<&str> {
        self.confidence_level.as_deref()
    }

    pub fn cell(&self, row: usize, column: usize) -> i64 {
        self.cells[row][column]
    }

    pub fn values(&self) -> &[Vec<i64>] {
        &self.cells
    }

    pub fn row_score(&self, row: usize) -> i64 {
        self.cells[row].iter().sum()
    }

    /// Variants sorted by net score, best first; ties keep axis order
    pub fn ranking(&self) -> Vec<(String, i64)> {
        let mut ranking: Vec<(String, i64)> = self
            .order
            .iter()
            .enumerate()
            .map(|(i, v)| (v.to_string(), self.row_score(i)))
            .collect();
        ranking.sort_by(|a, b| b.1.cmp(&a.1));
        ranking
    }

    fn check_compatible(&self, phase: &str, order: &VariantOrder) -> Result<()> {
        if self.phase != phase {
            return Err(AnalysisError::PhaseMismatch {
                expected: self.phase.clone(),
                found: phase.to_string(),
            });
        }
        if &self.order != order {
            return Err(AnalysisError::AxisMismatch {
                expected: self.order.labels().to_vec(),
                found: order.labels().to_vec(),
            });
        }
        Ok(())
    }
}
