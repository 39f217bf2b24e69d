//! Structured JSONL logging for suite runs and fixture verification.
//!
//! Provides:
//! - [`LogEntry`]: one JSONL record with required + optional fields.
//! - [`ArtifactIndex`]: links a run to its report files with SHA-256 integrity.
//! - [`LogEmitter`]: writes JSONL lines to a file or an in-memory buffer.
//! - [`validate_log_line`]: validates a single JSONL line against the schema.
//! - [`validate_log_file`]: validates an entire JSONL file.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::io::Write;
use std::path::Path;

// ---------------------------------------------------------------------------
// Log entry
// ---------------------------------------------------------------------------

/// Severity level for log entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

/// Suite or case outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Pass,
    Fail,
    Error,
}

const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const OUTCOMES: [&str; 3] = ["pass", "fail", "error"];
const TARGETS: [&str; 2] = ["host", "avr"];

/// Canonical structured log entry.
///
/// Required fields: `timestamp`, `trace_id`, `level`, `event`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    // Required
    pub timestamp: String,
    pub trace_id: String,
    pub level: LogLevel,
    pub event: String,

    // Optional
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suite: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// Routine under test (`addsf3`, `sprintf_P`, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    /// 1-based table position of the case the entry is about.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact_refs: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl LogEntry {
    /// Create a new log entry with required fields only.
    #[must_use]
    pub fn new(trace_id: impl Into<String>, level: LogLevel, event: impl Into<String>) -> Self {
        Self {
            timestamp: now_utc(),
            trace_id: trace_id.into(),
            level,
            event: event.into(),
            suite: None,
            target: None,
            symbol: None,
            case_index: None,
            outcome: None,
            exit_code: None,
            duration_ms: None,
            artifact_refs: None,
            details: None,
        }
    }

    #[must_use]
    pub fn with_suite(mut self, suite: impl Into<String>) -> Self {
        self.suite = Some(suite.into());
        self
    }

    #[must_use]
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    #[must_use]
    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    #[must_use]
    pub fn with_case(mut self, index: usize) -> Self {
        self.case_index = Some(index);
        self
    }

    #[must_use]
    pub fn with_outcome(mut self, outcome: Outcome) -> Self {
        self.outcome = Some(outcome);
        self
    }

    #[must_use]
    pub fn with_exit_code(mut self, exit_code: i32) -> Self {
        self.exit_code = Some(exit_code);
        self
    }

    #[must_use]
    pub fn with_duration_ms(mut self, ms: u64) -> Self {
        self.duration_ms = Some(ms);
        self
    }

    /// Add artifact references.
    #[must_use]
    pub fn with_artifacts(mut self, refs: Vec<String>) -> Self {
        self.artifact_refs = Some(refs);
        self
    }

    /// Set free-form details.
    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Serialize to a single JSONL line (no trailing newline).
    pub fn to_jsonl(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

// ---------------------------------------------------------------------------
// Artifact index
// ---------------------------------------------------------------------------

/// A single artifact entry in the index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactEntry {
    pub path: String,
    pub kind: String,
    pub sha256: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Artifact index linking a run to the files it produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactIndex {
    pub index_version: u32,
    pub run_id: String,
    pub generated_utc: String,
    pub artifacts: Vec<ArtifactEntry>,
}

impl ArtifactIndex {
    #[must_use]
    pub fn new(run_id: impl Into<String>) -> Self {
        Self {
            index_version: 1,
            run_id: run_id.into(),
            generated_utc: now_utc(),
            artifacts: Vec::new(),
        }
    }

    /// Record `contents` as the artifact at `path`, hashing it.
    pub fn add_bytes(
        &mut self,
        path: impl Into<String>,
        kind: impl Into<String>,
        contents: &[u8],
    ) -> &mut Self {
        self.artifacts.push(ArtifactEntry {
            path: path.into(),
            kind: kind.into(),
            sha256: sha256_hex(contents),
            size_bytes: Some(contents.len() as u64),
            description: None,
        });
        self
    }

    /// Hash a file already on disk and record it.
    pub fn add_file(&mut self, path: &Path, kind: impl Into<String>) -> std::io::Result<&mut Self> {
        let contents = std::fs::read(path)?;
        Ok(self.add_bytes(path.display().to_string(), kind, &contents))
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Lowercase hex SHA-256 digest.
#[must_use]
pub fn sha256_hex(data: &[u8]) -> String {
    Sha256::digest(data)
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

// ---------------------------------------------------------------------------
// Log emitter
// ---------------------------------------------------------------------------

enum Sink {
    File(std::io::BufWriter<std::fs::File>),
    Buffer(Vec<u8>),
}

impl Sink {
    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Sink::File(w) => w,
            Sink::Buffer(b) => b,
        }
    }
}

/// Writes structured JSONL log entries to a file or an in-memory buffer.
pub struct LogEmitter {
    sink: Sink,
    seq: u64,
    run_id: String,
    target: String,
}

impl LogEmitter {
    /// Create an emitter that writes to a file.
    pub fn to_file(path: &Path, run_id: &str, target: &str) -> std::io::Result<Self> {
        let file = std::fs::File::create(path)?;
        Ok(Self::with_sink(
            Sink::File(std::io::BufWriter::new(file)),
            run_id,
            target,
        ))
    }

    /// Create an emitter that writes to a Vec<u8> buffer (for testing).
    #[must_use]
    pub fn to_buffer(run_id: &str, target: &str) -> Self {
        Self::with_sink(Sink::Buffer(Vec::new()), run_id, target)
    }

    fn with_sink(sink: Sink, run_id: &str, target: &str) -> Self {
        Self {
            sink,
            seq: 0,
            run_id: run_id.to_string(),
            target: target.to_string(),
        }
    }

    #[must_use]
    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Generate the next trace ID under `scope` (a suite name or `verify`).
    fn next_trace_id(&mut self, scope: &str) -> String {
        self.seq += 1;
        format!("{}::{}::{:03}", scope, self.run_id, self.seq)
    }

    /// Start an entry with the next trace ID for `suite`.
    #[must_use]
    pub fn entry(&mut self, suite: &str, level: LogLevel, event: &str) -> LogEntry {
        let trace_id = self.next_trace_id(suite);
        LogEntry::new(trace_id, level, event)
            .with_suite(suite)
            .with_target(self.target.clone())
    }

    /// Emit a bare event for `suite`.
    pub fn emit(&mut self, suite: &str, level: LogLevel, event: &str) -> std::io::Result<LogEntry> {
        let entry = self.entry(suite, level, event);
        self.emit_entry(&entry)?;
        Ok(entry)
    }

    /// Emit a fully-populated log entry.
    pub fn emit_entry(&mut self, entry: &LogEntry) -> std::io::Result<()> {
        let line = entry.to_jsonl().map_err(std::io::Error::other)?;
        writeln!(self.sink.writer(), "{line}")
    }

    /// Lines written so far, when buffering.
    #[must_use]
    pub fn buffered(&self) -> Option<&str> {
        match &self.sink {
            Sink::Buffer(b) => std::str::from_utf8(b).ok(),
            Sink::File(_) => None,
        }
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> std::io::Result<()> {
        self.sink.writer().flush()
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validation error for a log line.
#[derive(Debug)]
pub struct LogValidationError {
    pub line_number: usize,
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for LogValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "line {}: field '{}': {}",
            self.line_number, self.field, self.message
        )
    }
}

fn check_enum(
    obj: &serde_json::Map<String, serde_json::Value>,
    field: &str,
    allowed: &[&str],
    line_number: usize,
    errors: &mut Vec<LogValidationError>,
) {
    if let Some(value) = obj.get(field).and_then(|v| v.as_str())
        && !allowed.contains(&value)
    {
        errors.push(LogValidationError {
            line_number,
            field: field.to_string(),
            message: format!("invalid {field}: '{value}'"),
        });
    }
}

/// Validate a single JSONL line against the schema.
pub fn validate_log_line(
    line: &str,
    line_number: usize,
) -> Result<LogEntry, Vec<LogValidationError>> {
    let mut errors = Vec::new();

    let value: serde_json::Value = match serde_json::from_str(line) {
        Ok(v) => v,
        Err(e) => {
            errors.push(LogValidationError {
                line_number,
                field: "<json>".to_string(),
                message: format!("invalid JSON: {e}"),
            });
            return Err(errors);
        }
    };

    let Some(obj) = value.as_object() else {
        errors.push(LogValidationError {
            line_number,
            field: "<root>".to_string(),
            message: "expected JSON object".to_string(),
        });
        return Err(errors);
    };

    for field in ["timestamp", "trace_id", "level", "event"] {
        if !obj.contains_key(field) {
            errors.push(LogValidationError {
                line_number,
                field: field.to_string(),
                message: "required field missing".to_string(),
            });
        }
    }

    check_enum(obj, "level", &LEVELS, line_number, &mut errors);
    check_enum(obj, "outcome", &OUTCOMES, line_number, &mut errors);
    check_enum(obj, "target", &TARGETS, line_number, &mut errors);

    // case_fail events must say which case and with which code.
    if obj.get("event").and_then(|v| v.as_str()) == Some("case_fail") {
        for field in ["case_index", "exit_code"] {
            if !obj.get(field).is_some_and(serde_json::Value::is_number) {
                errors.push(LogValidationError {
                    line_number,
                    field: field.to_string(),
                    message: "case_fail events must carry a numeric value".to_string(),
                });
            }
        }
    }

    if let Some(trace_id) = obj.get("trace_id").and_then(|v| v.as_str())
        && trace_id.split("::").count() != 3
    {
        errors.push(LogValidationError {
            line_number,
            field: "trace_id".to_string(),
            message: format!("trace_id should follow <suite>::<run_id>::<seq> format, got: '{trace_id}'"),
        });
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    serde_json::from_value::<LogEntry>(value).map_err(|e| {
        vec![LogValidationError {
            line_number,
            field: "<deserialization>".to_string(),
            message: format!("failed to deserialize: {e}"),
        }]
    })
}

/// Validate an entire JSONL file.
///
/// Returns the total line count and any validation errors found.
pub fn validate_log_file(path: &Path) -> Result<(usize, Vec<LogValidationError>), std::io::Error> {
    let content = std::fs::read_to_string(path)?;
    Ok(validate_log_text(&content))
}

/// Validate JSONL held in memory.
#[must_use]
pub fn validate_log_text(content: &str) -> (usize, Vec<LogValidationError>) {
    let mut all_errors = Vec::new();
    let mut line_count = 0;

    for (i, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        line_count += 1;
        if let Err(errs) = validate_log_line(line, i + 1) {
            all_errors.extend(errs);
        }
    }

    (line_count, all_errors)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Wall-clock timestamp in RFC 3339 shape.
pub fn now_utc() -> String {
    let duration = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default();
    let secs = duration.as_secs();
    let millis = duration.subsec_millis();
    // Approximate calendar fields; ordering and time of day are exact.
    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}Z",
        1970 + secs / 31_557_600,
        (secs % 31_557_600) / 2_629_800 + 1,
        (secs % 2_629_800) / 86400 + 1,
        (secs % 86400) / 3600,
        (secs % 3600) / 60,
        secs % 60,
        millis,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_entry_serializes_required_fields() {
        let entry = LogEntry::new("fplib-add-inf::run-1::001", LogLevel::Info, "suite_start");
        let json = entry.to_jsonl().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(parsed["timestamp"].is_string());
        assert_eq!(parsed["trace_id"], "fplib-add-inf::run-1::001");
        assert_eq!(parsed["level"], "info");
        assert_eq!(parsed["event"], "suite_start");
        assert!(parsed.get("suite").is_none());
        assert!(parsed.get("case_index").is_none());
    }

    #[test]
    fn log_entry_with_optional_fields() {
        let entry = LogEntry::new("math-sin-500::run-1::002", LogLevel::Error, "case_fail")
            .with_suite("math-sin-500")
            .with_target("host")
            .with_symbol("sin")
            .with_case(17)
            .with_outcome(Outcome::Fail)
            .with_exit_code(17)
            .with_duration_ms(3)
            .with_artifacts(vec!["report.md".to_string()])
            .with_details(serde_json::json!({"expected": "0x3f000000"}));
        let parsed: serde_json::Value = serde_json::from_str(&entry.to_jsonl().unwrap()).unwrap();
        assert_eq!(parsed["suite"], "math-sin-500");
        assert_eq!(parsed["symbol"], "sin");
        assert_eq!(parsed["case_index"], 17);
        assert_eq!(parsed["outcome"], "fail");
        assert_eq!(parsed["exit_code"], 17);
        assert_eq!(parsed["artifact_refs"][0], "report.md");
        assert_eq!(parsed["details"]["expected"], "0x3f000000");
    }

    #[test]
    fn emitter_numbers_trace_ids_per_run() {
        let mut emitter = LogEmitter::to_buffer("run-7", "host");
        let a = emitter.emit("scanf-c", LogLevel::Info, "suite_start").unwrap();
        let b = emitter.emit("scanf-d", LogLevel::Info, "suite_start").unwrap();
        assert_eq!(a.trace_id, "scanf-c::run-7::001");
        assert_eq!(b.trace_id, "scanf-d::run-7::002");
        let text = emitter.buffered().unwrap();
        assert_eq!(text.lines().count(), 2);
        let (count, errors) = validate_log_text(text);
        assert_eq!(count, 2);
        assert!(errors.is_empty(), "{errors:?}");
    }

    #[test]
    fn validation_rejects_missing_and_bad_fields() {
        let errs = validate_log_line(r#"{"trace_id":"a::b::1","level":"loud","event":"x"}"#, 4)
            .unwrap_err();
        let fields: Vec<&str> = errs.iter().map(|e| e.field.as_str()).collect();
        assert!(fields.contains(&"timestamp"));
        assert!(fields.contains(&"level"));
        assert_eq!(errs[0].line_number, 4);

        let errs = validate_log_line(
            r#"{"timestamp":"t","trace_id":"nope","level":"info","event":"case_fail"}"#,
            1,
        )
        .unwrap_err();
        let fields: Vec<&str> = errs.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["case_index", "exit_code", "trace_id"]);

        assert!(validate_log_line("not json", 1).is_err());
        assert!(validate_log_line("[1]", 1).is_err());
    }

    #[test]
    fn artifact_index_hashes_contents() {
        let mut index = ArtifactIndex::new("run-1");
        index.add_bytes("report.md", "report", b"abc");
        let entry = &index.artifacts[0];
        assert_eq!(
            entry.sha256,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(entry.size_bytes, Some(3));
        let json: serde_json::Value = serde_json::from_str(&index.to_json().unwrap()).unwrap();
        assert_eq!(json["index_version"], 1);
        assert_eq!(json["artifacts"][0]["kind"], "report");
    }
}
