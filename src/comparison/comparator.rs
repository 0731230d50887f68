// Confidence-interval overlap test between two summarized measurements

use crate::record::MeasurementRecord;
use serde::{Serialize, Serializer};
use std::ops::Neg;

/// Outcome of comparing one variant's measurement against another's
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// First is significantly faster (its interval lies entirely below)
    Better,
    /// First is significantly slower (its interval lies entirely above)
    Worse,
    /// Intervals overlap, no conclusion can be drawn
    Inconclusive,
}

impl Verdict {
    /// Signed form: +1 better, -1 worse, 0 inconclusive
    pub fn value(self) -> i8 {
        match self {
            Verdict::Better => 1,
            Verdict::Worse => -1,
            Verdict::Inconclusive => 0,
        }
    }

    pub fn from_value(value: i8) -> Option<Self> {
        match value {
            1 => Some(Verdict::Better),
            -1 => Some(Verdict::Worse),
            0 => Some(Verdict::Inconclusive),
            _ => None,
        }
    }
}

impl Neg for Verdict {
    type Output = Verdict;

    fn neg(self) -> Verdict {
        match self {
            Verdict::Better => Verdict::Worse,
            Verdict::Worse => Verdict::Better,
            Verdict::Inconclusive => Verdict::Inconclusive,
        }
    }
}

impl From<Verdict> for i64 {
    fn from(verdict: Verdict) -> i64 {
        i64::from(verdict.value())
    }
}

impl Serialize for Verdict {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i8(self.value())
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// Compare `first` against `second`, lower execution time being better
///
/// # Example
/// ```
/// use benchmatrix::comparison::{compare, Verdict};
/// use benchmatrix::record::MeasurementRecord;
///
/// let a = MeasurementRecord::new(100.0, 5.0, 95.0, 105.0, 20, "95%").unwrap();
/// let b = MeasurementRecord::new(130.0, 5.0, 125.0, 135.0, 20, "95%").unwrap();
///
/// assert_eq!(compare(&a, &b), Verdict::Better);   // 105 < 125
/// assert_eq!(compare(&b, &a), Verdict::Worse);
/// assert_eq!(compare(&a, &a), Verdict::Inconclusive);
/// ```
pub fn compare(first: &MeasurementRecord, second: &MeasurementRecord) -> Verdict {
    if first == second {
        return Verdict::Inconclusive;
    }

    let (first_lower, first_upper) = first.interval();
    let (second_lower, second_upper) = second.interval();

    if first_upper < second_lower {
        Verdict::Better
    } else if first_lower > second_upper {
        Verdict::Worse
    } else {
        Verdict::Inconclusive
    }
}
