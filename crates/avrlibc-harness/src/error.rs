//! Infrastructure errors. Case mismatches are [`CaseFailure`](crate::CaseFailure), not errors.

use std::path::PathBuf;

use avrlibc_fixture_exec::ExecError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid fixture JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("log write failed: {0}")]
    Log(#[source] std::io::Error),
    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("unknown suite '{0}' (see `list`)")]
    UnknownSuite(String),
    #[error("suite '{0}' has no exportable fixture table")]
    NotExportable(String),
    #[error("no fixture files found under {0}")]
    NoFixtures(PathBuf),
    #[error("fixture case '{case}': {source}")]
    Exec {
        case: String,
        #[source]
        source: ExecError,
    },
}

impl HarnessError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
