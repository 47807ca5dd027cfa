//! List command implementation.

use std::path::PathBuf;

use jsxsnap::config::Config;
use jsxsnap::error::Result;
use jsxsnap::fixture::discover;

use crate::commands::common;
use crate::commands::traits::Command;

/// Arguments for the list command.
#[derive(Debug, Clone, Default)]
pub struct ListArgs {
    /// Fixtures directory (default: from config).
    pub fixtures: Option<PathBuf>,
}

/// List command handler.
pub struct ListCommand {
    args: ListArgs,
    config: Config,
}

impl ListCommand {
    /// Use `config` instead of the default configuration.
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }
}

impl Command for ListCommand {
    type Args = ListArgs;
    type Output = Vec<String>;

    fn new(args: Self::Args) -> Self {
        Self {
            args,
            config: Config::default(),
        }
    }

    fn execute(&self) -> Result<Self::Output> {
        let root = common::fixtures_dir(self.args.fixtures.as_deref(), &self.config);
        let names: Vec<String> = discover(&root)?.into_iter().map(|f| f.name).collect();
        for name in &names {
            println!("{}", name);
        }
        Ok(names)
    }

    fn name() -> &'static str {
        "list"
    }
}

/// Print the discovered fixture names.
pub fn run_list(args: ListArgs, config: Config) -> Result<()> {
    ListCommand::new(args).with_config(config).execute()?;
    Ok(())
}
