//! Report output
//!
//! A [`RunSummary`] collects everything one run produced; [`text`] prints it
//! for humans and [`json`] serializes it.

pub mod json;
pub mod text;

use crate::config::Config;
use crate::coordinator::SumReport;
use crate::worker::AccumulatorMode;
use std::time::Duration;

/// Relative tolerance when checking a floating-point sum against the oracle
///
/// Summation order differs between the chunked and the sequential sum, so
/// `Precise` results may differ in the last bits.
pub const RELATIVE_TOLERANCE: f64 = 1e-9;

/// Outcome of checking the parallel total against the sequential sum
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Verification {
    pub expected: f64,
    pub actual: f64,
    pub matches: bool,
    pub elapsed: Duration,
}

impl Verification {
    /// Compare `actual` to `expected`
    ///
    /// `Truncating` totals are integers and compared exactly, so `expected`
    /// must come from the same chunk plan as `actual`.
    pub fn new(actual: f64, expected: f64, mode: AccumulatorMode, elapsed: Duration) -> Self {
        let matches = match mode {
            AccumulatorMode::Truncating => actual == expected,
            AccumulatorMode::Precise => {
                (actual - expected).abs() <= RELATIVE_TOLERANCE * expected.abs().max(1.0)
            }
        };
        Self {
            expected,
            actual,
            matches,
            elapsed,
        }
    }

    pub fn difference(&self) -> f64 {
        self.actual - self.expected
    }
}

/// Everything reported for one run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub config: Config,
    pub rows: usize,
    pub cols: usize,
    pub report: SumReport,
    /// Time spent generating the matrix
    pub generate_elapsed: Duration,
    /// Time spent in the parallel sum
    pub sum_elapsed: Duration,
    pub verification: Option<Verification>,
}

impl RunSummary {
    pub fn elements(&self) -> usize {
        self.rows * self.cols
    }

    /// Whether verification, if requested, passed
    pub fn verified(&self) -> bool {
        self.verification.map_or(true, |v| v.matches)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinator::{MultiThreadedSum, SequentialSum, SumOptions};
    use crate::matrix::Matrix;

    #[test]
    fn test_verification_precise_tolerance() {
        let v = Verification::new(1e12 + 1e-4, 1e12, AccumulatorMode::Precise, Duration::ZERO);
        assert!(v.matches);

        let v = Verification::new(10.5, 10.0, AccumulatorMode::Precise, Duration::ZERO);
        assert!(!v.matches);
        assert_eq!(v.difference(), 0.5);
    }

    #[test]
    fn test_verification_truncating_exact() {
        let v = Verification::new(3.0, 3.0, AccumulatorMode::Truncating, Duration::ZERO);
        assert!(v.matches);
        let v = Verification::new(2.0, 3.0, AccumulatorMode::Truncating, Duration::ZERO);
        assert!(!v.matches);
    }

    #[test]
    fn test_verification_truncating_mixed_signs() {
        let m = Matrix::from_rows(vec![vec![-1.0, 0.5]]).unwrap();
        let options = SumOptions {
            accumulator: AccumulatorMode::Truncating,
            ..Default::default()
        };
        let report = MultiThreadedSum::with_options(2, options)
            .unwrap()
            .sum_detailed(&m)
            .unwrap();
        let oracle = SequentialSum::with_accumulator(AccumulatorMode::Truncating);

        let expected = oracle.sum_planned(&m, &report.plan);
        let v = Verification::new(report.total, expected, AccumulatorMode::Truncating, Duration::ZERO);
        assert_eq!(report.total, -1.0);
        assert!(v.matches);
    }

    #[test]
    fn test_summary_verified() {
        let summary = test_support::summary(true);
        assert_eq!(summary.elements(), 3);
        assert!(summary.verified());

        let unverified = test_support::summary(false);
        assert!(unverified.verified());
    }
}
