//! Resolve command implementation.
//!
//! Prints the compiler configuration a fixture would be transformed with,
//! without invoking the backend.

use std::path::PathBuf;

use jsxsnap::config::Config;
use jsxsnap::error::{JsxSnapError, Result};
use jsxsnap::fixture::Fixture;
use jsxsnap::resolver::{ResolvedConfig, Resolver};

use crate::commands::common::{self, error_messages};
use crate::commands::traits::Command;

/// Arguments for the resolve command.
#[derive(Debug, Clone, Default)]
pub struct ResolveArgs {
    /// Fixture name.
    pub fixture: String,
    /// Fixtures directory (default: from config).
    pub fixtures: Option<PathBuf>,
}

/// Resolve command handler.
pub struct ResolveCommand {
    args: ResolveArgs,
    config: Config,
}

impl ResolveCommand {
    /// Use `config` instead of the default configuration.
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    fn resolve(&self) -> Result<ResolvedConfig> {
        let root = common::fixtures_dir(self.args.fixtures.as_deref(), &self.config);
        let dir = common::fixture_by_name(&root, &self.args.fixture)?;
        let fixture = Fixture::load(&dir)?;

        let resolver = Resolver::from_current_dir(&self.config.plugin_file).map_err(|e| {
            JsxSnapError::Config(format!("{} {}", error_messages::NO_PLUGIN_PATH, e))
        })?;

        Ok(resolver.resolve(
            &fixture.extension,
            fixture.host_override.as_ref(),
            fixture.plugin_config.as_ref(),
        ))
    }
}

impl Command for ResolveCommand {
    type Args = ResolveArgs;
    type Output = ResolvedConfig;

    fn new(args: Self::Args) -> Self {
        Self {
            args,
            config: Config::default(),
        }
    }

    fn execute(&self) -> Result<Self::Output> {
        let resolved = self.resolve()?;
        println!("{}", resolved.to_json_pretty()?);
        Ok(resolved)
    }

    fn name() -> &'static str {
        "resolve"
    }
}

/// Print the resolved configuration for one fixture.
pub fn run_resolve(args: ResolveArgs, config: Config) -> Result<()> {
    ResolveCommand::new(args).with_config(config).execute()?;
    Ok(())
}
