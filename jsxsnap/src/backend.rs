//! Compiler backend seam.
//!
//! The harness never parses or emits code itself. A [`CompilerBackend`]
//! takes an input file and a resolved configuration and returns the produced
//! source text. [`CommandBackend`] drives an external compiler CLI (swc by
//! default) and is what the binary uses.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;
use tracing::debug;

use crate::config::BackendConfig;
use crate::resolver::ResolvedConfig;

/// Placeholder replaced by the input file path in backend arguments.
pub const INPUT_PLACEHOLDER: &str = "{input}";

/// Placeholder replaced by the configuration file path in backend arguments.
pub const CONFIG_PLACEHOLDER: &str = "{config}";

/// Errors raised by a compiler backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The backend process could not be started.
    #[error("failed to spawn `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The backend ran and reported a failure.
    #[error("`{program}` exited with {status}:\n{stderr}")]
    Failed {
        program: String,
        status: String,
        stderr: String,
    },

    /// The backend produced output that is not UTF-8.
    #[error("`{program}` produced non UTF-8 output")]
    InvalidOutput { program: String },

    /// Preparing the backend invocation failed.
    #[error("failed to prepare backend invocation: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration could not be serialized for the backend.
    #[error("failed to serialize configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Transforms a single source file with a given configuration.
#[cfg_attr(test, mockall::automock)]
pub trait CompilerBackend {
    /// Transform the file at `input` and return the produced source text.
    fn transform_file(&self, input: &Path, config: &ResolvedConfig) -> Result<String, BackendError>;
}

/// Backend that shells out to a compiler CLI.
///
/// The resolved configuration is written to a temporary JSON file for the
/// duration of the call; the produced source is read from stdout.
#[derive(Debug, Clone)]
pub struct CommandBackend {
    program: String,
    args: Vec<String>,
}

impl CommandBackend {
    /// Create a backend running `program` with `args` (placeholders allowed).
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Build a backend from the `[backend]` configuration section.
    pub fn from_config(config: &BackendConfig) -> Self {
        Self::new(config.program.clone(), config.args.clone())
    }

    /// The program this backend runs.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments with placeholders substituted.
    pub fn expand_args(&self, input: &Path, config_path: &Path) -> Vec<String> {
        let input = input.display().to_string();
        let config_path = config_path.display().to_string();
        self.args
            .iter()
            .map(|arg| {
                arg.replace(INPUT_PLACEHOLDER, &input)
                    .replace(CONFIG_PLACEHOLDER, &config_path)
            })
            .collect()
    }

    fn write_config(config: &ResolvedConfig) -> Result<tempfile::NamedTempFile, BackendError> {
        let mut file = tempfile::Builder::new()
            .prefix("jsxsnap-")
            .suffix(".json")
            .tempfile()?;
        file.write_all(config.to_json_pretty()?.as_bytes())?;
        file.flush()?;
        Ok(file)
    }
}

impl CompilerBackend for CommandBackend {
    fn transform_file(&self, input: &Path, config: &ResolvedConfig) -> Result<String, BackendError> {
        let config_file = Self::write_config(config)?;
        let config_path: PathBuf = config_file.path().to_path_buf();
        let args = self.expand_args(input, &config_path);

        debug!(program = %self.program, ?args, "invoking compiler backend");

        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .map_err(|source| BackendError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(BackendError::Failed {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        String::from_utf8(output.stdout).map_err(|_| BackendError::InvalidOutput {
            program: self.program.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::Resolver;
    use tempfile::TempDir;

    fn config() -> ResolvedConfig {
        Resolver::new("/work/plugin.wasm").resolve(".jsx", None, None)
    }

    #[test]
    fn test_expand_args_substitutes_placeholders() {
        let backend = CommandBackend::new(
            "npx",
            vec![
                "swc".to_string(),
                "{input}".to_string(),
                "--config-file={config}".to_string(),
            ],
        );
        let args = backend.expand_args(Path::new("a/input.js"), Path::new("/tmp/c.json"));
        assert_eq!(args, ["swc", "a/input.js", "--config-file=/tmp/c.json"]);
    }

    #[test]
    fn test_spawn_failure_is_reported() {
        let backend = CommandBackend::new("jsxsnap-no-such-program", vec![]);
        let result = backend.transform_file(Path::new("input.js"), &config());
        assert!(matches!(result, Err(BackendError::Spawn { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_stdout_is_produced_output() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("input.jsx");
        std::fs::write(&input, "const a = <div />;\n").unwrap();

        let backend = CommandBackend::new("cat", vec!["{input}".to_string()]);
        let output = backend.transform_file(&input, &config()).unwrap();
        assert_eq!(output, "const a = <div />;\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_config_file_holds_resolved_config() {
        let backend = CommandBackend::new("cat", vec!["{config}".to_string()]);
        let output = backend.transform_file(Path::new("unused"), &config()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(&parsed, config().as_value());
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit_surfaces_stderr() {
        let backend = CommandBackend::new(
            "sh",
            vec!["-c".to_string(), "echo 'Syntax Error' >&2; exit 3".to_string()],
        );
        match backend.transform_file(Path::new("input.js"), &config()) {
            Err(BackendError::Failed { stderr, .. }) => {
                assert_eq!(stderr, "Syntax Error\n");
            }
            other => panic!("Expected Failed error, got {:?}", other),
        }
    }
}
