//! Common types and utilities for jsxsnap commands.

use std::path::{Path, PathBuf};

use jsxsnap::config::Config;
use jsxsnap::error::{JsxSnapError, Result};
use jsxsnap::fixture::FixtureDir;

// ============================================================================
// Fixture Lookup
// ============================================================================

/// Fixtures directory: the CLI flag wins over the configuration file.
pub fn fixtures_dir(arg: Option<&Path>, config: &Config) -> PathBuf {
    arg.map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(&config.fixtures_dir))
}

/// Look up a single fixture directory by name.
pub fn fixture_by_name(root: &Path, name: &str) -> Result<FixtureDir> {
    let path = root.join(name);
    if !path.is_dir() {
        return Err(JsxSnapError::Validation(format!(
            "{} {}",
            error_messages::FIXTURE_NOT_FOUND,
            path.display()
        )));
    }
    Ok(FixtureDir {
        name: name.to_string(),
        path,
    })
}

// ============================================================================
// Error Messages
// ============================================================================

/// Standard error message templates.
pub mod error_messages {
    /// Error when a named fixture does not exist.
    pub const FIXTURE_NOT_FOUND: &str = "Fixture not found:";

    /// Error when fixtures failed.
    pub const FIXTURES_FAILED: &str = "fixture(s) failed";

    /// Error when the plugin location cannot be resolved.
    pub const NO_PLUGIN_PATH: &str = "Cannot determine plugin path:";
}

// ============================================================================
// Output Messages
// ============================================================================

/// Standard output message prefixes.
pub mod output_messages {
    /// Fixture passed.
    pub const PASS: &str = "✅";

    /// Fixture snapshot written.
    pub const RECORDED: &str = "📝";

    /// Fixture failed.
    pub const FAIL: &str = "❌";

    /// Summary line.
    pub const SUMMARY: &str = "📊";
}
