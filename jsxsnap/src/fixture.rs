//! Fixture discovery and loading.
//!
//! A fixture is a directory holding:
//! - `input.<ext>`: the source to transform (exactly one)
//! - `.swcrc`: optional compiler configuration override (JSON)
//! - `config.json`: optional plugin configuration payload (JSON)
//! - `output.js`: the recorded snapshot
//!
//! Discovery only lists directories. Everything that can fail for one
//! fixture happens in [`Fixture::load`], so the caller can scope the failure.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{FixtureError, JsxSnapError, Result};

/// Base name of the input file, without extension.
pub const INPUT_STEM: &str = "input";

/// Host compiler configuration override.
pub const HOST_CONFIG_FILE: &str = ".swcrc";

/// Plugin configuration payload.
pub const PLUGIN_CONFIG_FILE: &str = "config.json";

/// Snapshot file name.
pub const SNAPSHOT_FILE: &str = "output.js";

/// A fixture directory found on disk, not yet loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureDir {
    /// Directory name, used as the test case name.
    pub name: String,
    /// Directory path.
    pub path: PathBuf,
}

/// A loaded fixture.
#[derive(Debug, Clone)]
pub struct Fixture {
    pub name: String,
    pub dir: PathBuf,
    pub input_path: PathBuf,
    /// Input extension including the leading dot, e.g. `.tsx`.
    pub extension: String,
    pub host_override: Option<Value>,
    pub plugin_config: Option<Value>,
    pub snapshot_path: PathBuf,
}

/// List fixture directories under `root`, sorted by name.
pub fn discover(root: &Path) -> Result<Vec<FixtureDir>> {
    if !root.is_dir() {
        return Err(JsxSnapError::Validation(format!(
            "Fixtures directory does not exist: {}",
            root.display()
        )));
    }

    let mut fixtures = Vec::new();
    for entry in std::fs::read_dir(root)? {
        let path = entry?.path();
        if !path.is_dir() {
            continue;
        }
        if let Some(name) = path.file_name() {
            fixtures.push(FixtureDir {
                name: name.to_string_lossy().into_owned(),
                path,
            });
        }
    }

    fixtures.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(fixtures)
}

impl Fixture {
    /// Load the fixture in `dir`.
    pub fn load(dir: &FixtureDir) -> std::result::Result<Self, FixtureError> {
        let input_path = find_input(&dir.path)?;
        let extension = input_path
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();

        Ok(Self {
            name: dir.name.clone(),
            dir: dir.path.clone(),
            input_path,
            extension,
            host_override: read_optional_json(&dir.path.join(HOST_CONFIG_FILE))?,
            plugin_config: read_optional_json(&dir.path.join(PLUGIN_CONFIG_FILE))?,
            snapshot_path: dir.path.join(SNAPSHOT_FILE),
        })
    }
}

/// Find the unique file whose name without extension is `input`.
fn find_input(dir: &Path) -> std::result::Result<PathBuf, FixtureError> {
    let entries = std::fs::read_dir(dir).map_err(|e| FixtureError::io(dir, e))?;

    let mut candidates = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| FixtureError::io(dir, e))?.path();
        if path.is_file() && path.file_stem().is_some_and(|stem| stem == INPUT_STEM) {
            candidates.push(path);
        }
    }
    candidates.sort();

    match candidates.len() {
        0 => Err(FixtureError::MissingInputFile {
            dir: dir.to_path_buf(),
        }),
        1 => Ok(candidates.remove(0)),
        _ => Err(FixtureError::AmbiguousInputFile {
            dir: dir.to_path_buf(),
            candidates: candidates
                .iter()
                .filter_map(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned())
                .collect(),
        }),
    }
}

fn read_optional_json(path: &Path) -> std::result::Result<Option<Value>, FixtureError> {
    if !path.is_file() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path).map_err(|e| FixtureError::io(path, e))?;
    serde_json::from_str(&content)
        .map(Some)
        .map_err(|source| FixtureError::InvalidDocument {
            path: path.to_path_buf(),
            source,
        })
}
