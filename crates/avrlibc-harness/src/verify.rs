//! Fixture verification against the reference routines.

use avrlibc_fixture_exec::{execute_fixture_case, parse_bits};
use serde::{Deserialize, Serialize};

use crate::check::ulp_distance;
use crate::diff::render_diff;
use crate::error::HarnessError;
use crate::fixtures::{FixtureCase, FixtureSet};

/// Result of verifying a single fixture case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationResult {
    pub case_name: String,
    pub function: String,
    pub passed: bool,
    pub expected: String,
    /// Output of the reference routine.
    pub actual: String,
    /// Distance to the expected bit pattern, for tolerance cases.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ulp_distance: Option<u32>,
    /// Diff if the case failed.
    pub diff: Option<String>,
}

/// Aggregate verification summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub results: Vec<VerificationResult>,
}

impl VerificationSummary {
    /// Build a summary from a list of results.
    #[must_use]
    pub fn from_results(results: Vec<VerificationResult>) -> Self {
        let total = results.len();
        let passed = results.iter().filter(|r| r.passed).count();
        let failed = total - passed;
        Self {
            total,
            passed,
            failed,
            results,
        }
    }

    /// Returns true if all cases passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// 1-based position of the first failing case.
    #[must_use]
    pub fn first_failure(&self) -> Option<usize> {
        self.results.iter().position(|r| !r.passed).map(|i| i + 1)
    }
}

/// Run one case through the fixture-exec adapter and compare.
pub fn verify_case(case: &FixtureCase) -> Result<VerificationResult, HarnessError> {
    let run = execute_fixture_case(&case.function, &case.inputs).map_err(|source| {
        HarnessError::Exec {
            case: case.name.clone(),
            source,
        }
    })?;

    let distance = match (case.tolerance_ulp, run.bits, parse_bits(&case.expected_output)) {
        (Some(_), Some(actual), Some(expected)) => Some(ulp_distance(actual, expected)),
        _ => None,
    };
    let passed = match (case.tolerance_ulp, distance) {
        (Some(max), Some(d)) => d <= max,
        _ => run.output == case.expected_output,
    };

    Ok(VerificationResult {
        case_name: case.name.clone(),
        function: case.function.clone(),
        passed,
        diff: (!passed).then(|| render_diff(&case.expected_output, &run.output)),
        expected: case.expected_output.clone(),
        actual: run.output,
        ulp_distance: distance,
    })
}

/// Verify every case of `set`, in order.
pub fn verify_set(set: &FixtureSet) -> Result<VerificationSummary, HarnessError> {
    let results = set
        .cases
        .iter()
        .map(verify_case)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(VerificationSummary::from_results(results))
}
