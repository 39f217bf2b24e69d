//! CLI entrypoint for the avr-libc conformance harness.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use avrlibc_harness::config::{LOG_ENV, TARGET_ENV};
use avrlibc_harness::exit_code::ExitPolicy;
use avrlibc_harness::fixtures::load_fixtures;
use avrlibc_harness::structured_log::{ArtifactIndex, LogEmitter, now_utc};
use avrlibc_harness::verify::{VerificationSummary, verify_set};
use avrlibc_harness::{
    ConformanceReport, HarnessConfig, HarnessError, Reference, SuiteRunner, Target, suites,
};
use clap::{Parser, Subcommand};

/// Conformance tooling for avr-libc routines.
#[derive(Debug, Parser)]
#[command(name = "avrlibc-harness")]
#[command(about = "Table-driven conformance harness for avr-libc")]
struct Cli {
    /// Target profile: `avr` passes exit codes through and stays quiet.
    #[arg(long, global = true, value_enum, env = TARGET_ENV, default_value = "host")]
    target: Target,
    /// Write structured JSONL events to this file.
    #[arg(long, global = true, env = LOG_ENV)]
    log: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List built-in suites.
    List,
    /// Run one suite and exit with its code.
    Run {
        #[arg(long)]
        suite: String,
    },
    /// Run every suite in order, stopping at the first failure.
    RunAll,
    /// Write a suite's table as a JSON fixture set.
    Export {
        #[arg(long)]
        suite: String,
        /// Output path for the fixture JSON.
        #[arg(long)]
        output: PathBuf,
    },
    /// Verify JSON fixtures against the reference routines.
    Verify {
        /// Fixture file, or a directory of `*.json` fixtures.
        #[arg(long)]
        fixture: PathBuf,
        /// Output report path (markdown); JSON and artifact index are written beside it.
        #[arg(long)]
        report: Option<PathBuf>,
    },
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut config = HarnessConfig::new(cli.target);
    if let Some(path) = cli.log {
        config = config.with_log(path);
    }

    let status = match cli.command {
        Command::List => {
            for suite in suites::all() {
                let export = if suite.exportable() { " [export]" } else { "" };
                println!("{:<22} {:<20} {}{export}", suite.name, suite.symbol, suite.description);
            }
            0
        }
        Command::Run { suite } => {
            let suite = suites::find(&suite).ok_or(HarnessError::UnknownSuite(suite))?;
            let mut runner = runner(&config)?;
            let outcome = runner.run(suite)?;
            runner.finish()?;
            outcome.process_status()
        }
        Command::RunAll => {
            let mut runner = runner(&config)?;
            let outcomes = runner.run_all(suites::all())?;
            runner.finish()?;
            let passed = outcomes.iter().filter(|o| o.passed()).count();
            if config.target.diagnostics() {
                eprintln!("{passed}/{} suites passed", suites::all().len());
            }
            outcomes.last().map_or(0, |o| o.process_status())
        }
        Command::Export { suite, output } => {
            let found = suites::find(&suite).ok_or_else(|| HarnessError::UnknownSuite(suite.clone()))?;
            let export = found.export.ok_or(HarnessError::NotExportable(suite))?;
            let set = export();
            std::fs::write(&output, set.to_json()?).map_err(|e| io_error(&output, e))?;
            eprintln!("Wrote {} cases to {}", set.cases.len(), output.display());
            0
        }
        Command::Verify { fixture, report } => verify(&config, &fixture, report.as_deref())?,
    };

    Ok(ExitCode::from(status))
}

fn runner(config: &HarnessConfig) -> Result<SuiteRunner<'static>, HarnessError> {
    let runner = SuiteRunner::new(&Reference, config.clone());
    match &config.log_path {
        Some(path) => {
            let emitter = LogEmitter::to_file(path, &run_id(config.target), config.target.as_str())
                .map_err(|e| io_error(path, e))?;
            Ok(runner.with_emitter(emitter))
        }
        None => Ok(runner),
    }
}

fn run_id(target: Target) -> String {
    format!("{}-{}", target.as_str(), std::process::id())
}

fn io_error(path: &Path, source: std::io::Error) -> HarnessError {
    HarnessError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn verify(config: &HarnessConfig, fixture: &Path, report: Option<&Path>) -> Result<u8, HarnessError> {
    eprintln!("Verifying fixtures in {}", fixture.display());
    let mut results = Vec::new();
    for (path, set) in load_fixtures(fixture)? {
        let summary = verify_set(&set)?;
        eprintln!(
            "  {}: {}/{} passed",
            path.display(),
            summary.passed,
            summary.total
        );
        results.extend(summary.results);
    }

    let report_doc = ConformanceReport {
        title: String::from("avr-libc Conformance Report"),
        target: config.target.as_str().to_string(),
        timestamp: now_utc(),
        summary: VerificationSummary::from_results(results),
    };
    eprintln!(
        "Verification complete: total={}, passed={}, failed={}",
        report_doc.summary.total, report_doc.summary.passed, report_doc.summary.failed
    );

    if let Some(md_path) = report {
        let markdown = report_doc.to_markdown();
        let json = report_doc.to_json();
        let json_path = md_path.with_extension("json");
        let index_path = md_path.with_extension("artifacts.json");
        std::fs::write(md_path, &markdown).map_err(|e| io_error(md_path, e))?;
        std::fs::write(&json_path, &json).map_err(|e| io_error(&json_path, e))?;

        let mut index = ArtifactIndex::new(run_id(config.target));
        index
            .add_bytes(md_path.display().to_string(), "report_markdown", markdown.as_bytes())
            .add_bytes(json_path.display().to_string(), "report_json", json.as_bytes());
        std::fs::write(&index_path, index.to_json()?).map_err(|e| io_error(&index_path, e))?;
        eprintln!("Wrote {}, {} and {}", md_path.display(), json_path.display(), index_path.display());
    }

    let policy = ExitPolicy::Index.for_target(config.target);
    Ok(match report_doc.summary.first_failure() {
        None => 0,
        Some(index) => policy.process_status(i32::try_from(index).unwrap_or(i32::MAX)),
    })
}
