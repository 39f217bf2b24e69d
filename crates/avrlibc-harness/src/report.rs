//! Report generation for fixture verification.

use serde::{Deserialize, Serialize};

use crate::verify::VerificationSummary;

/// A conformance report over one or more fixture sets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConformanceReport {
    pub title: String,
    /// Target profile (`host` or `avr`).
    pub target: String,
    /// Timestamp (UTC).
    pub timestamp: String,
    pub summary: VerificationSummary,
}

impl ConformanceReport {
    /// Render the report as markdown.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("# {}\n\n", self.title));
        out.push_str(&format!("- Target: {}\n", self.target));
        out.push_str(&format!("- Timestamp: {}\n", self.timestamp));
        out.push_str(&format!("- Total: {}\n", self.summary.total));
        out.push_str(&format!("- Passed: {}\n", self.summary.passed));
        out.push_str(&format!("- Failed: {}\n\n", self.summary.failed));

        out.push_str("| # | Case | Function | Status |\n");
        out.push_str("|---|------|----------|--------|\n");
        for (i, r) in self.summary.results.iter().enumerate() {
            let status = match (r.passed, r.ulp_distance) {
                (true, Some(d)) if d > 0 => format!("PASS ({d} ulp)"),
                (true, _) => "PASS".to_string(),
                (false, _) => "FAIL".to_string(),
            };
            out.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                i + 1,
                r.case_name,
                r.function,
                status
            ));
        }

        let failures: Vec<_> = self.summary.results.iter().filter(|r| !r.passed).collect();
        if !failures.is_empty() {
            out.push_str("\n## Failures\n");
            for r in failures {
                out.push_str(&format!("\n### {}\n\n```diff\n", r.case_name));
                out.push_str(r.diff.as_deref().unwrap_or_default());
                out.push_str("```\n");
            }
        }
        out
    }

    /// Render the report as JSON.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verify::VerificationResult;

    fn result(name: &str, passed: bool, ulp: Option<u32>) -> VerificationResult {
        VerificationResult {
            case_name: name.to_string(),
            function: "sin".to_string(),
            passed,
            expected: "0x3f000000".to_string(),
            actual: "0x3f000001".to_string(),
            ulp_distance: ulp,
            diff: (!passed).then(|| "--- expected\n+++ actual\n".to_string()),
        }
    }

    #[test]
    fn markdown_lists_cases_and_failures() {
        let report = ConformanceReport {
            title: "sin fixtures".to_string(),
            target: "host".to_string(),
            timestamp: "2026-01-01T00:00:00.000Z".to_string(),
            summary: VerificationSummary::from_results(vec![
                result("near", true, Some(1)),
                result("far", false, Some(9)),
            ]),
        };
        let md = report.to_markdown();
        assert!(md.starts_with("# sin fixtures\n"));
        assert!(md.contains("| 1 | near | sin | PASS (1 ulp) |"));
        assert!(md.contains("| 2 | far | sin | FAIL |"));
        assert!(md.contains("### far"));

        let json: serde_json::Value = serde_json::from_str(&report.to_json()).unwrap();
        assert_eq!(json["summary"]["failed"], 1);
    }
}
