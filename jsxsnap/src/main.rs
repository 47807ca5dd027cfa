//! jsxsnap CLI - snapshot runner for the import-jsx-pragma swc plugin.
//!
//! Parses arguments with clap, initializes logging, loads the harness
//! configuration and dispatches to the selected subcommand.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{run_fixtures, run_list, run_resolve, ListArgs, ResolveArgs, RunArgs};
use jsxsnap::config::Config;
use jsxsnap::error::{JsxSnapError, Result};
use jsxsnap::snapshot::Mode;

/// jsxsnap - fixture snapshot runner for swc plugin transforms
#[derive(Parser, Debug)]
#[command(name = "jsxsnap")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Fixture snapshot runner for swc plugin transforms", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, env = "JSXSNAP_VERBOSE")]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "JSXSNAP_CONFIG")]
    config: Option<PathBuf>,

    /// Disable color output
    #[arg(long, global = true, env = "JSXSNAP_NO_COLOR")]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands for the jsxsnap CLI.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run fixtures against their snapshots
    ///
    /// Transforms every fixture input and compares the result with the
    /// fixture's output.js, or rewrites output.js with --update (or
    /// UPDATE=true in the environment).
    Run(RunCommand),

    /// List discovered fixtures
    List(ListCommand),

    /// Print the resolved compiler configuration for a fixture
    Resolve(ResolveCommand),
}

/// Arguments for the run subcommand.
#[derive(Parser, Debug)]
struct RunCommand {
    /// Fixtures directory (default: from config)
    #[arg(short, long)]
    fixtures: Option<PathBuf>,

    /// Record snapshots instead of comparing against them
    #[arg(short, long)]
    update: bool,

    /// Only run fixtures whose name contains this string
    #[arg(long)]
    filter: Option<String>,
}

/// Arguments for the list subcommand.
#[derive(Parser, Debug)]
struct ListCommand {
    /// Fixtures directory (default: from config)
    #[arg(short, long)]
    fixtures: Option<PathBuf>,
}

/// Arguments for the resolve subcommand.
#[derive(Parser, Debug)]
struct ResolveCommand {
    /// Fixture name
    fixture: String,

    /// Fixtures directory (default: from config)
    #[arg(short, long)]
    fixtures: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.no_color)?;

    let config = load_config(cli.config.as_deref())?;

    execute_command(cli.command, cli.verbose, config)
}

/// Initialize the logging system.
fn init_logging(verbose: bool, no_color: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    let subscriber = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(!no_color)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .try_init()
        .map_err(|e| JsxSnapError::Config(format!("Failed to initialize logging: {}", e)))?;

    Ok(())
}

/// Load configuration from file or use defaults.
fn load_config(config_path: Option<&std::path::Path>) -> Result<Config> {
    match config_path {
        Some(path) => Config::load_from_path(path),
        None => Config::load(),
    }
}

/// Record mode when requested on the command line or via `UPDATE=true`.
fn select_mode(update: bool) -> Mode {
    if update {
        Mode::Record
    } else {
        Mode::from_env()
    }
}

/// Execute the selected command.
fn execute_command(command: Commands, verbose: bool, config: Config) -> Result<()> {
    match command {
        Commands::Run(args) => execute_run(args, verbose, config),
        Commands::List(args) => run_list(
            ListArgs {
                fixtures: args.fixtures,
            },
            config,
        ),
        Commands::Resolve(args) => run_resolve(
            ResolveArgs {
                fixture: args.fixture,
                fixtures: args.fixtures,
            },
            config,
        ),
    }
}

/// Execute the run command.
fn execute_run(args: RunCommand, verbose: bool, config: Config) -> Result<()> {
    let run_args = RunArgs {
        verbose,
        fixtures: args.fixtures,
        filter: args.filter,
        mode: select_mode(args.update),
    };
    run_fixtures(run_args, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_run() {
        let cli = Cli::parse_from(["jsxsnap", "run"]);
        if let Commands::Run(args) = cli.command {
            assert!(!args.update);
            assert!(args.fixtures.is_none());
            assert!(args.filter.is_none());
        } else {
            panic!("Expected Run command");
        }
    }

    #[test]
    fn test_cli_parse_run_with_update() {
        let cli = Cli::parse_from(["jsxsnap", "run", "--update"]);
        if let Commands::Run(args) = cli.command {
            assert!(args.update);
        } else {
            panic!("Expected Run command");
        }
    }

    #[test]
    fn test_cli_parse_run_with_fixtures_and_filter() {
        let cli = Cli::parse_from([
            "jsxsnap",
            "run",
            "--fixtures",
            "test/fixtures",
            "--filter",
            "fragment",
        ]);
        if let Commands::Run(args) = cli.command {
            assert_eq!(args.fixtures, Some(PathBuf::from("test/fixtures")));
            assert_eq!(args.filter, Some("fragment".to_string()));
        } else {
            panic!("Expected Run command");
        }
    }

    #[test]
    fn test_cli_parse_list() {
        let cli = Cli::parse_from(["jsxsnap", "list", "-f", "fixtures"]);
        if let Commands::List(args) = cli.command {
            assert_eq!(args.fixtures, Some(PathBuf::from("fixtures")));
        } else {
            panic!("Expected List command");
        }
    }

    #[test]
    fn test_cli_parse_resolve() {
        let cli = Cli::parse_from(["jsxsnap", "resolve", "tsx_element"]);
        if let Commands::Resolve(args) = cli.command {
            assert_eq!(args.fixture, "tsx_element");
        } else {
            panic!("Expected Resolve command");
        }
    }

    #[test]
    fn test_cli_parse_global_flags() {
        let cli = Cli::parse_from([
            "jsxsnap",
            "--verbose",
            "--no-color",
            "--config",
            "/path/to/jsxsnap.toml",
            "list",
        ]);
        assert!(cli.verbose);
        assert!(cli.no_color);
        assert_eq!(cli.config, Some(PathBuf::from("/path/to/jsxsnap.toml")));
    }

    #[test]
    fn test_select_mode_update_flag_wins() {
        assert_eq!(select_mode(true), Mode::Record);
    }
}
