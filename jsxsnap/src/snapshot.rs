//! Snapshot reconciliation.
//!
//! In [`Mode::Assert`] the produced output must equal the stored snapshot
//! byte for byte. In [`Mode::Record`] the snapshot is overwritten with the
//! produced output.

use std::fmt;
use std::path::Path;

use tracing::warn;

use crate::config::UPDATE_ENV_VAR;
use crate::error::FixtureError;

/// Whether a run records snapshots or asserts against them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Compare produced output to the stored snapshot.
    #[default]
    Assert,
    /// Write produced output as the new snapshot.
    Record,
}

impl Mode {
    /// Record mode only when `UPDATE` is exactly `true`.
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value {
            Some("true") => Self::Record,
            _ => Self::Assert,
        }
    }

    /// Read the mode from the process environment.
    pub fn from_env() -> Self {
        Self::from_env_value(std::env::var(UPDATE_ENV_VAR).ok().as_deref())
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Assert => f.write_str("assert"),
            Self::Record => f.write_str("record"),
        }
    }
}

/// What reconciliation did for a passing fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciled {
    /// Output matched the stored snapshot.
    Matched,
    /// Snapshot was written.
    Recorded,
}

/// Reconcile `produced` against the snapshot at `path`.
pub fn reconcile(mode: Mode, path: &Path, produced: &str) -> Result<Reconciled, FixtureError> {
    match mode {
        Mode::Record => {
            warn!(path = %path.display(), "writing snapshot");
            std::fs::write(path, produced).map_err(|e| FixtureError::io(path, e))?;
            Ok(Reconciled::Recorded)
        }
        Mode::Assert => {
            if !path.is_file() {
                return Err(FixtureError::MissingSnapshot {
                    path: path.to_path_buf(),
                });
            }
            // A snapshot that is not valid UTF-8 can never match and is
            // reported as a mismatch, not as a read failure.
            let expected = std::fs::read(path).map_err(|e| FixtureError::io(path, e))?;
            if expected == produced.as_bytes() {
                Ok(Reconciled::Matched)
            } else {
                Err(FixtureError::SnapshotMismatch {
                    path: path.to_path_buf(),
                    expected: String::from_utf8_lossy(&expected).into_owned(),
                    actual: produced.to_string(),
                })
            }
        }
    }
}

/// First point where two texts diverge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirstDifference {
    /// 1-based line number.
    pub line: usize,
    pub expected: Option<String>,
    pub actual: Option<String>,
}

impl FirstDifference {
    /// Locate the first differing line, or `None` if the texts are equal.
    ///
    /// Lines are split on `\n` only, so `\r` and trailing whitespace show up
    /// in the excerpts.
    pub fn find(expected: &str, actual: &str) -> Option<Self> {
        if expected == actual {
            return None;
        }

        let mut expected_lines = expected.split('\n');
        let mut actual_lines = actual.split('\n');
        let mut line = 1;
        loop {
            match (expected_lines.next(), actual_lines.next()) {
                (Some(e), Some(a)) if e == a => line += 1,
                (e, a) => {
                    return Some(Self {
                        line,
                        expected: e.map(str::to_string),
                        actual: a.map(str::to_string),
                    })
                }
            }
        }
    }
}

impl fmt::Display for FirstDifference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "first difference at line {}:", self.line)?;
        match &self.expected {
            Some(line) => writeln!(f, "  expected: {:?}", line)?,
            None => writeln!(f, "  expected: <end of file>")?,
        }
        match &self.actual {
            Some(line) => write!(f, "  actual:   {:?}", line),
            None => write!(f, "  actual:   <end of file>"),
        }
    }
}
