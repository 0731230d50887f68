//! Comprehensive property-based tests for pre-commit hook
//!
//! Covers the comparison and normalization laws with proptest. Designed to
//! run in a few seconds as a pre-commit quality gate.
//!
//! Core properties tested:
//! 1. Comparator symmetry and reflexivity
//! 2. Non-overlapping intervals always give a conclusive verdict
//! 3. Overlapping intervals are always inconclusive
//! 4. Matrix diagonal is zero and the matrix is anti-symmetric
//! 5. Phase totals are the cell-wise sum of workload matrices
//! 6. Baseline normalizes to exactly 1.0
//! 7. Scaling every measurement leaves verdicts and normalized values unchanged

use benchmatrix::comparison::{build_matrix, compare, ComparisonMatrix, TotalMatrix, Verdict};
use benchmatrix::normalize::normalize;
use benchmatrix::record::MeasurementRecord;
use benchmatrix::results::{ResultKey, ResultsTable, VariantOrder};
use proptest::prelude::*;

const PHASE: &str = "STARTUP";

// Means stay above the largest combined error so shifted means remain non-negative
fn record_strategy() -> impl Strategy<Value = MeasurementRecord> {
    (200.0f64..10_000.0, 0.0f64..100.0, 0.0f64..500.0, 1i64..200).prop_map(
        |(mean, error, spread, size)| {
            MeasurementRecord::new(mean, error, mean - spread, mean + spread, size, "95%").unwrap()
        },
    )
}

fn scaled(record: &MeasurementRecord, k: f64) -> MeasurementRecord {
    MeasurementRecord::new(
        record.mean() * k,
        record.error() * k,
        record.min() * k,
        record.max() * k,
        record.sample_size() as i64,
        record.confidence_level(),
    )
    .unwrap()
}

fn order(n: usize) -> VariantOrder {
    VariantOrder::new((0..n).map(|i| format!("V{}", i))).unwrap()
}

/// `records[w][v]` becomes workload `W<w>`, variant `V<v>`
fn table(records: &[Vec<MeasurementRecord>]) -> ResultsTable {
    let mut table = ResultsTable::new();
    for (w, row) in records.iter().enumerate() {
        for (v, record) in row.iter().enumerate() {
            table.insert(
                ResultKey::new(format!("W{}", w), format!("V{}", v), PHASE),
                record.clone(),
            );
        }
    }
    table
}

/// Workloads x variants grid of records, every workload with the same variant count
fn campaign_strategy() -> impl Strategy<Value = Vec<Vec<MeasurementRecord>>> {
    (2usize..6, 1usize..5).prop_flat_map(|(variants, workloads)| {
        prop::collection::vec(
            prop::collection::vec(record_strategy(), variants),
            workloads,
        )
    })
}

fn matrices(records: &[Vec<MeasurementRecord>]) -> (VariantOrder, Vec<ComparisonMatrix>) {
    let table = table(records);
    let order = order(records[0].len());
    let matrices = (0..records.len())
        .map(|w| build_matrix(&table, &format!("W{}", w), PHASE, &order).unwrap())
        .collect();
    (order, matrices)
}

// Comparator laws
proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_compare_symmetric(a in record_strategy(), b in record_strategy()) {
        // Property: swapping the arguments negates the verdict
        prop_assert_eq!(compare(&a, &b), -compare(&b, &a));
    }

    #[test]
    fn prop_compare_reflexive(a in record_strategy()) {
        prop_assert_eq!(compare(&a, &a), Verdict::Inconclusive);
    }

    #[test]
    fn prop_disjoint_intervals_conclusive(
        a in record_strategy(),
        b_error in 0.0f64..100.0,
        gap in 0.01f64..100.0,
    ) {
        // b's interval starts `gap` above a's upper bound
        let (_, upper) = a.interval();
        let b_mean = upper + b_error + gap;
        let b = MeasurementRecord::new(b_mean, b_error, b_mean - 1.0, b_mean + 1.0, 10, "95%")
            .unwrap();

        prop_assert_eq!(compare(&a, &b), Verdict::Better);
        prop_assert_eq!(compare(&b, &a), Verdict::Worse);
    }

    #[test]
    fn prop_overlapping_intervals_inconclusive(
        a in record_strategy(),
        b_error in 0.0f64..100.0,
        t in -0.99f64..0.99,
    ) {
        // Means closer than the sum of half-widths always overlap
        let b_mean = a.mean() + t * (a.error() + b_error);
        let b = MeasurementRecord::new(b_mean, b_error, b_mean - 1.0, b_mean + 1.0, 10, "95%")
            .unwrap();

        prop_assert_eq!(compare(&a, &b), Verdict::Inconclusive);
        prop_assert_eq!(compare(&b, &a), Verdict::Inconclusive);
    }
}

// Matrix and total laws
proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_matrix_diagonal_zero_and_antisymmetric(records in campaign_strategy()) {
        let (_, matrices) = matrices(&records);

        for matrix in &matrices {
            let n = matrix.size();
            for i in 0..n {
                prop_assert_eq!(matrix.cell(i, i), Verdict::Inconclusive);
                for j in 0..n {
                    prop_assert_eq!(matrix.cell(i, j), -matrix.cell(j, i));
                }
            }
        }
    }

    #[test]
    fn prop_total_is_cellwise_sum(records in campaign_strategy()) {
        let (order, matrices) = matrices(&records);
        let total = TotalMatrix::from_matrices(PHASE, &order, &matrices).unwrap();

        let n = order.len();
        for i in 0..n {
            for j in 0..n {
                let expected: i64 = matrices.iter().map(|m| i64::from(m.cell(i, j))).sum();
                prop_assert_eq!(total.cell(i, j), expected);
            }
        }
        prop_assert!(total.is_complete());
        prop_assert_eq!(total.workloads().len(), matrices.len());
    }

    #[test]
    fn prop_merged_partial_totals_match_full_fold(
        records in campaign_strategy(),
        split in 0usize..5,
    ) {
        let (order, matrices) = matrices(&records);
        let split = split.min(matrices.len());

        let full = TotalMatrix::from_matrices(PHASE, &order, &matrices).unwrap();
        let mut left = TotalMatrix::from_matrices(PHASE, &order, &matrices[..split]).unwrap();
        let right = TotalMatrix::from_matrices(PHASE, &order, &matrices[split..]).unwrap();
        left.merge(&right).unwrap();

        prop_assert_eq!(left.values(), full.values());
    }

    #[test]
    fn prop_row_scores_sum_to_zero(records in campaign_strategy()) {
        let (order, matrices) = matrices(&records);
        let total = TotalMatrix::from_matrices(PHASE, &order, &matrices).unwrap();

        let sum: i64 = (0..order.len()).map(|i| total.row_score(i)).sum();
        prop_assert_eq!(sum, 0);
    }
}

// Normalization laws
proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_baseline_normalizes_to_one(
        records in prop::collection::vec(record_strategy(), 2..6),
        baseline in 0usize..6,
    ) {
        let baseline = format!("V{}", baseline % records.len());
        let table = table(&[records.clone()]);
        let order = order(records.len());

        let series = normalize(&table, "W0", PHASE, &order, &baseline).unwrap();
        let point = series.point(&baseline).unwrap();

        prop_assert_eq!(point.mean, 1.0);
        prop_assert_eq!(series.within_baseline_band(&baseline), Some(true));
        prop_assert!(series.lower_guide <= 1.0 && series.upper_guide >= 1.0);
    }

    #[test]
    fn prop_scale_invariance(
        records in prop::collection::vec(record_strategy(), 2..6),
        exponent in -4i32..11,
    ) {
        // Powers of two scale exactly, so verdicts cannot flip on rounding
        let k = 2f64.powi(exponent);
        let scaled_records: Vec<_> = records.iter().map(|r| scaled(r, k)).collect();
        let order = order(records.len());
        let original = table(&[records.clone()]);
        let rescaled = table(&[scaled_records]);

        let m1 = build_matrix(&original, "W0", PHASE, &order).unwrap();
        let m2 = build_matrix(&rescaled, "W0", PHASE, &order).unwrap();
        prop_assert_eq!(m1.values(), m2.values());

        let s1 = normalize(&original, "W0", PHASE, &order, "V0").unwrap();
        let s2 = normalize(&rescaled, "W0", PHASE, &order, "V0").unwrap();
        for (p1, p2) in s1.points.iter().zip(&s2.points) {
            prop_assert!((p1.mean - p2.mean).abs() <= 1e-12 * p1.mean.abs().max(1.0));
            prop_assert!((p1.error - p2.error).abs() <= 1e-12 * p1.error.abs().max(1.0));
        }
        prop_assert!((s1.upper_guide - s2.upper_guide).abs() < 1e-12);
    }
}

// Concrete two-variant scenario
#[test]
fn test_two_variant_scenario() {
    let a = MeasurementRecord::new(100.0, 5.0, 90.0, 110.0, 30, "95%").unwrap();
    let b = MeasurementRecord::new(130.0, 5.0, 120.0, 140.0, 30, "95%").unwrap();
    let table = table(&[vec![a, b]]);
    let order = order(2);

    let matrix = build_matrix(&table, "W0", PHASE, &order).unwrap();
    assert_eq!(matrix.values(), vec![vec![0, 1], vec![-1, 0]]);

    let series = normalize(&table, "W0", PHASE, &order, "V0").unwrap();
    assert!((series.points[1].mean - 1.3).abs() < 1e-12);
    // Error is scaled by the baseline mean, not the variant's own mean
    assert!((series.points[1].error - 0.05).abs() < 1e-12);
    assert!((series.upper_guide - 1.05).abs() < 1e-12);
    assert!((series.lower_guide - 0.95).abs() < 1e-12);
}
