//! Suite runner.
//!
//! Runs suites in order against one implementation, folds each failure
//! code through the suite's exit policy and logs `suite_start`,
//! `case_fail` and `suite_end` events. `run_all` stops at the first
//! failing suite.

use std::time::Instant;

use serde_json::json;

use crate::check::CheckResult;
use crate::config::HarnessConfig;
use crate::error::HarnessError;
use crate::exit_code::{ExitPolicy, status_byte};
use crate::routines::Routines;
use crate::structured_log::{LogEmitter, LogEntry, LogLevel, Outcome};
use crate::suites::Suite;

/// Result of one suite run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteOutcome {
    pub suite: &'static str,
    pub result: CheckResult,
    /// Policy in effect for the configured target.
    pub policy: ExitPolicy,
    /// 0 on success, otherwise the folded failure code.
    pub exit_code: i32,
    pub duration_ms: u64,
}

impl SuiteOutcome {
    #[must_use]
    pub fn passed(&self) -> bool {
        self.result.is_ok()
    }

    /// Exit status byte as a host process would report it.
    #[must_use]
    pub fn process_status(&self) -> u8 {
        status_byte(self.exit_code)
    }
}

pub struct SuiteRunner<'a> {
    routines: &'a dyn Routines,
    config: HarnessConfig,
    emitter: Option<LogEmitter>,
}

impl<'a> SuiteRunner<'a> {
    #[must_use]
    pub fn new(routines: &'a dyn Routines, config: HarnessConfig) -> Self {
        Self {
            routines,
            config,
            emitter: None,
        }
    }

    #[must_use]
    pub fn with_emitter(mut self, emitter: LogEmitter) -> Self {
        self.emitter = Some(emitter);
        self
    }

    #[must_use]
    pub fn emitter(&self) -> Option<&LogEmitter> {
        self.emitter.as_ref()
    }

    pub fn run(&mut self, suite: &Suite) -> Result<SuiteOutcome, HarnessError> {
        self.log(suite, LogLevel::Info, "suite_start", |e| e)?;

        let started = Instant::now();
        let result = (suite.run)(self.routines);
        let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        let policy = suite.policy.for_target(self.config.target);
        let exit_code = match &result {
            Ok(_) => 0,
            Err(failure) => policy.fold(failure.code),
        };

        if let Err(failure) = &result {
            if self.config.target.diagnostics() {
                eprintln!("{}: {}", suite.name, failure.diagnostic());
            }
            self.log(suite, LogLevel::Error, "case_fail", |e| {
                e.with_case(failure.index)
                    .with_outcome(Outcome::Fail)
                    .with_exit_code(exit_code)
                    .with_details(json!({
                        "code": failure.code,
                        "kind": failure.kind,
                        "expected": failure.expected,
                        "actual": failure.actual,
                    }))
            })?;
        }

        let outcome = if result.is_ok() {
            Outcome::Pass
        } else {
            Outcome::Fail
        };
        let cases = result.as_ref().ok().map(|p| p.cases);
        self.log(suite, LogLevel::Info, "suite_end", |e| {
            e.with_outcome(outcome)
                .with_exit_code(exit_code)
                .with_duration_ms(duration_ms)
                .with_details(json!({ "policy": policy, "cases": cases }))
        })?;

        Ok(SuiteOutcome {
            suite: suite.name,
            result,
            policy,
            exit_code,
            duration_ms,
        })
    }

    /// Run `suites` in order; the last outcome is the first failure, if any.
    pub fn run_all(&mut self, suites: &[Suite]) -> Result<Vec<SuiteOutcome>, HarnessError> {
        let mut outcomes = Vec::with_capacity(suites.len());
        for suite in suites {
            let outcome = self.run(suite)?;
            let failed = !outcome.passed();
            outcomes.push(outcome);
            if failed {
                break;
            }
        }
        Ok(outcomes)
    }

    /// Flush the log, if any.
    pub fn finish(&mut self) -> Result<(), HarnessError> {
        match &mut self.emitter {
            Some(emitter) => emitter.flush().map_err(HarnessError::Log),
            None => Ok(()),
        }
    }

    fn log<F>(&mut self, suite: &Suite, level: LogLevel, event: &str, build: F) -> Result<(), HarnessError>
    where
        F: FnOnce(LogEntry) -> LogEntry,
    {
        let Some(emitter) = self.emitter.as_mut() else {
            return Ok(());
        };
        let entry = build(emitter.entry(suite.name, level, event).with_symbol(suite.symbol));
        emitter.emit_entry(&entry).map_err(HarnessError::Log)
    }
}
