//! Error handling module for jsxsnap.
//!
//! Two layers of errors exist: [`JsxSnapError`] for failures that stop the
//! whole invocation (bad configuration, missing fixtures directory), and
//! [`FixtureError`] for failures scoped to a single fixture. A fixture error
//! is recorded in the run summary and never aborts the remaining fixtures.

use std::path::PathBuf;

use thiserror::Error;

use crate::backend::BackendError;

/// Main error type for the jsxsnap application.
#[derive(Error, Debug)]
pub enum JsxSnapError {
    /// Error when the harness configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error when input validation fails.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Error when a command execution fails.
    #[error("Command execution failed: {0}")]
    CommandExecution(String),

    /// Error when IO operations fail.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error when JSON serialization/deserialization fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A fixture-scoped error surfaced outside of a run (e.g. `resolve`).
    #[error(transparent)]
    Fixture(#[from] FixtureError),
}

/// Errors scoped to a single fixture.
#[derive(Error, Debug)]
pub enum FixtureError {
    /// No `input.<ext>` file exists in the fixture directory.
    #[error("no input file found in {}", .dir.display())]
    MissingInputFile { dir: PathBuf },

    /// More than one `input.<ext>` file exists in the fixture directory.
    #[error("multiple input files found in {}: {}", .dir.display(), .candidates.join(", "))]
    AmbiguousInputFile {
        dir: PathBuf,
        candidates: Vec<String>,
    },

    /// An override document exists but is not valid JSON.
    #[error("failed to parse {}: {source}", .path.display())]
    InvalidDocument {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Assert mode found no snapshot to compare against.
    #[error("no output file found at {}", .path.display())]
    MissingSnapshot { path: PathBuf },

    /// The compiler backend rejected the input or configuration.
    #[error("compiler backend failed: {0}")]
    Compiler(#[from] BackendError),

    /// Produced output differs from the stored snapshot.
    #[error("output does not match snapshot at {}", .path.display())]
    SnapshotMismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    /// Reading or writing fixture files failed.
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FixtureError {
    /// Wrap an IO error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias using JsxSnapError.
pub type Result<T> = std::result::Result<T, JsxSnapError>;
