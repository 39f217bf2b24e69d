//! Serialized fixture sets.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::HarnessError;

/// A single fixture test case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureCase {
    /// Case identifier.
    pub name: String,
    /// Routine being tested, as the fixture-exec adapter names it.
    pub function: String,
    /// Input parameters. Floats are hex bit-pattern strings.
    pub inputs: serde_json::Value,
    /// Expected output (serialized as string for comparison).
    pub expected_output: String,
    /// Accept float results within this many ULP of `expected_output`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tolerance_ulp: Option<u32>,
}

/// A collection of fixture cases for one routine family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureSet {
    /// Schema version.
    pub version: String,
    /// Routine family name.
    pub family: String,
    /// UTC timestamp of capture or export.
    pub captured_at: String,
    pub cases: Vec<FixtureCase>,
}

impl FixtureSet {
    pub const VERSION: &'static str = "1";

    #[must_use]
    pub fn new(family: impl Into<String>, cases: Vec<FixtureCase>) -> Self {
        Self {
            version: Self::VERSION.to_string(),
            family: family.into(),
            captured_at: crate::structured_log::now_utc(),
            cases,
        }
    }

    /// Load fixture set from JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize fixture set to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load fixture set from a file path.
    pub fn from_file(path: &Path) -> Result<Self, HarnessError> {
        let content = std::fs::read_to_string(path).map_err(|e| HarnessError::io(path, e))?;
        Self::from_json(&content).map_err(|source| HarnessError::Json {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Load one fixture file, or every `*.json` file of a directory in name
/// order.
pub fn load_fixtures(path: &Path) -> Result<Vec<(PathBuf, FixtureSet)>, HarnessError> {
    let files = if path.is_dir() {
        let mut files: Vec<PathBuf> = std::fs::read_dir(path)
            .map_err(|e| HarnessError::io(path, e))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
            .collect();
        files.sort();
        files
    } else {
        vec![path.to_path_buf()]
    };
    if files.is_empty() {
        return Err(HarnessError::NoFixtures(path.to_path_buf()));
    }
    files
        .into_iter()
        .map(|file| FixtureSet::from_file(&file).map(|set| (file, set)))
        .collect()
}
