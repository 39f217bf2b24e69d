//! Per-case comparators. Every checker walks its table in order and stops
//! at the first failing case; there is no aggregation.

pub mod exact;
pub mod format;
pub mod tolerance;

use std::fmt;

use serde::Serialize;
use thiserror::Error;

pub use exact::{ExactEq, check_exact};
pub use format::{PrintfCase, RegionCheck, ScanfCase, check_printf, check_scanf, check_scanf_stream};
pub use tolerance::{ToleranceChecker, ordered_bits, ulp_distance};

/// What kind of comparison rejected a case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Exact comparison of values or bit patterns.
    Mismatch,
    /// ULP distance above the threshold.
    Tolerance,
    /// `printf` return value differs from the produced length.
    Count,
    /// Produced text differs from the expected text.
    Content,
    /// `scanf` return value differs from the expected count.
    ScanResult,
    /// Destination region content differs.
    Region,
    /// Result disagrees with an independent routine.
    CrossCheck,
    /// The routine reported a usage error instead of a result.
    Error,
}

impl FailureKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FailureKind::Mismatch => "mismatch",
            FailureKind::Tolerance => "tolerance",
            FailureKind::Count => "count",
            FailureKind::Content => "content",
            FailureKind::ScanResult => "scan_result",
            FailureKind::Region => "region",
            FailureKind::CrossCheck => "cross_check",
            FailureKind::Error => "error",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The first failing case of a suite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("case {index} ({kind}): expected {expected}, got {actual} [code {code}]")]
pub struct CaseFailure {
    /// Failure code before the exit policy is applied.
    pub code: i32,
    /// 1-based position in the table.
    pub index: usize,
    pub kind: FailureKind,
    pub expected: String,
    pub actual: String,
}

impl CaseFailure {
    #[must_use]
    pub fn new(
        code: i32,
        index: usize,
        kind: FailureKind,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            code,
            index,
            kind,
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// A failure whose code is its index.
    #[must_use]
    pub fn at(
        index: usize,
        kind: FailureKind,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::new(index_code(index), index, kind, expected, actual)
    }

    /// The stderr line a host run prints before exiting.
    #[must_use]
    pub fn diagnostic(&self) -> String {
        format!(
            "t[{}]:  {} (expected {})",
            self.index.saturating_sub(1),
            self.actual,
            self.expected
        )
    }
}

/// Summary of a fully passing table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CheckPass {
    pub cases: usize,
}

pub type CheckResult = Result<CheckPass, CaseFailure>;

pub(crate) fn index_code(index: usize) -> i32 {
    i32::try_from(index).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_code_defaults_to_index() {
        let f = CaseFailure::at(7, FailureKind::Mismatch, "0x1", "0x2");
        assert_eq!(f.code, 7);
        assert_eq!(f.diagnostic(), "t[6]:  0x2 (expected 0x1)");
    }

    #[test]
    fn failure_serializes_kind_in_snake_case() {
        let f = CaseFailure::new(1003, 3, FailureKind::ScanResult, "1", "0");
        let v = serde_json::to_value(&f).unwrap();
        assert_eq!(v["kind"], "scan_result");
        assert_eq!(v["code"], 1003);
        assert!(f.to_string().contains("case 3 (scan_result)"));
    }
}
