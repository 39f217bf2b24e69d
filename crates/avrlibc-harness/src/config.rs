//! Run configuration: target profile and log destination.

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Environment variable selecting the target profile.
pub const TARGET_ENV: &str = "AVRLIBC_TARGET";
/// Environment variable naming the JSONL log file.
pub const LOG_ENV: &str = "AVRLIBC_HARNESS_LOG";

/// Where the suites are considered to run.
///
/// On `avr` there is no console and the exit status is passed through
/// unmodified, so diagnostics are suppressed and host-only exit folding
/// is skipped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    #[default]
    Host,
    Avr,
}

impl Target {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Target::Host => "host",
            Target::Avr => "avr",
        }
    }

    /// Whether human-readable diagnostics go to stderr.
    #[must_use]
    pub fn diagnostics(self) -> bool {
        self == Target::Host
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HarnessConfig {
    pub target: Target,
    pub log_path: Option<PathBuf>,
}

impl HarnessConfig {
    #[must_use]
    pub fn new(target: Target) -> Self {
        Self {
            target,
            log_path: None,
        }
    }

    #[must_use]
    pub fn with_log(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_path = Some(path.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_is_default_and_prints_diagnostics() {
        let cfg = HarnessConfig::default();
        assert_eq!(cfg.target, Target::Host);
        assert!(cfg.target.diagnostics());
        assert!(!Target::Avr.diagnostics());
    }

    #[test]
    fn target_parses_from_cli_value() {
        assert_eq!(Target::from_str("avr", true), Ok(Target::Avr));
        assert_eq!(Target::from_str("HOST", true), Ok(Target::Host));
        assert!(Target::from_str("arm", true).is_err());
    }

    #[test]
    fn target_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Target::Avr).unwrap(), "\"avr\"");
        let cfg = HarnessConfig::new(Target::Avr).with_log("run.jsonl");
        assert_eq!(cfg.log_path.as_deref(), Some(std::path::Path::new("run.jsonl")));
    }
}
