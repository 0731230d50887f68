// Pairwise comparison of runtime variants with confidence-interval overlap
//
// A variant is declared faster than another only when the two reported
// confidence intervals `[mean - error, mean + error]` are fully disjoint.
// Any overlap yields an inconclusive verdict, so uncertainty never produces
// a winner.
//
// Verdicts for every ordered pair of variants form a comparison matrix per
// (workload, phase). Summing those matrices over all workloads of a phase
// gives the total matrix, an overall ranking of the variants for that phase.
//
// Lower execution time is better: `Better` means the row variant beats the
// column variant.

mod comparator;
mod labels;
mod matrix;

pub use comparator::{compare, Verdict};
pub use labels::{check_uniform_labels, LabelPolicy};
pub use matrix::{build_matrix, ComparisonMatrix, TotalMatrix};
