//! Table-driven conformance harness for avr-libc routines.
//!
//! This crate provides:
//! - Checkers: exact-match, ULP tolerance and printf/scanf round-trip
//! - Built-in suites: one per self-checking test program, run in order
//! - Exit policies: folding a failure code into the host exit status
//! - Fixture verify: compare serialized JSON fixtures against the reference routines
//! - Report generation: human-readable + machine-readable conformance reports
//! - Structured JSONL logging with an artifact index

#![forbid(unsafe_code)]

pub mod check;
pub mod config;
pub mod diff;
pub mod error;
pub mod exit_code;
pub mod fixtures;
pub mod report;
pub mod routines;
pub mod runner;
pub mod structured_log;
pub mod suites;
pub mod table;
pub mod verify;

pub use check::{CaseFailure, CheckPass, CheckResult, FailureKind};
pub use config::{HarnessConfig, Target};
pub use error::HarnessError;
pub use exit_code::ExitPolicy;
pub use fixtures::{FixtureCase, FixtureSet};
pub use report::ConformanceReport;
pub use routines::{Reference, Routines};
pub use runner::{SuiteOutcome, SuiteRunner};
pub use suites::Suite;
pub use table::TestCase;
pub use verify::VerificationResult;
