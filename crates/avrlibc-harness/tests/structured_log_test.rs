// Integration tests for the JSONL run log against tests/conformance/log_schema.json.

use std::path::{Path, PathBuf};

use avrlibc_harness::structured_log::{LogEmitter, validate_log_file, validate_log_text};
use avrlibc_harness::{HarnessConfig, Reference, Routines, SuiteRunner, Target, suites};

fn repo_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .to_path_buf()
}

fn schema() -> serde_json::Value {
    let path = repo_root().join("tests/conformance/log_schema.json");
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e));
    serde_json::from_str(&content).unwrap()
}

fn names(v: &serde_json::Value) -> Vec<String> {
    v.as_array()
        .unwrap()
        .iter()
        .map(|s| s.as_str().unwrap().to_string())
        .collect()
}

struct NoNul;

impl Routines for NoNul {
    fn fscanf(
        &self,
        _stream: &mut dyn avrlibc_core::stdio::ByteSource,
        _fmt: &[u8],
        _args: &mut [&mut [u8]],
    ) -> Result<i32, avrlibc_core::stdio::ScanError> {
        Ok(avrlibc_core::EOF)
    }
}

#[test]
fn run_log_matches_schema() {
    let schema = schema();
    let required = names(&schema["required_fields"]);
    let case_fail = names(&schema["events"]["case_fail"]);

    let mut runner = SuiteRunner::new(&NoNul, HarnessConfig::new(Target::Host))
        .with_emitter(LogEmitter::to_buffer("it", "host"));
    let outcomes = runner.run_all(suites::all()).unwrap();
    assert_eq!(outcomes.last().unwrap().suite, "scanf-nul");

    let log = runner.emitter().unwrap().buffered().unwrap().to_string();
    let (lines, errors) = validate_log_text(&log);
    assert!(errors.is_empty(), "{errors:?}");
    assert_eq!(lines, 2 * outcomes.len() + 1);

    for line in log.lines() {
        let v: serde_json::Value = serde_json::from_str(line).unwrap();
        for field in &required {
            assert!(v.get(field).is_some(), "missing {field} in {line}");
        }
        if v["event"] == "case_fail" {
            for field in &case_fail {
                assert!(v.get(field).is_some(), "missing {field} in {line}");
            }
            assert_eq!(v["details"]["kind"], "scan_result");
        }
    }
}

#[test]
fn file_log_validates() {
    let path = std::env::temp_dir().join(format!("avrlibc-harness-{}.jsonl", std::process::id()));
    let emitter = LogEmitter::to_file(&path, "file", "avr").unwrap();
    let mut runner = SuiteRunner::new(&Reference, HarnessConfig::new(Target::Avr).with_log(&path))
        .with_emitter(emitter);
    runner.run(suites::find("progmem-zero-array").unwrap()).unwrap();
    runner.finish().unwrap();

    let (lines, errors) = validate_log_file(&path).unwrap();
    assert_eq!((lines, errors.len()), (2, 0));
    let _ = std::fs::remove_file(&path);
}
