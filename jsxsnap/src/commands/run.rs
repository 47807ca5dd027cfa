//! Run command implementation.
//!
//! Runs every fixture (or those matching a filter) through the configured
//! compiler backend and reconciles the output with each fixture's snapshot.

use std::path::PathBuf;

use tracing::debug;

use jsxsnap::backend::CommandBackend;
use jsxsnap::config::Config;
use jsxsnap::error::{FixtureError, JsxSnapError, Result};
use jsxsnap::fixture::{discover, FixtureDir};
use jsxsnap::resolver::Resolver;
use jsxsnap::runner::{FixtureOutcome, RunSummary, Runner};
use jsxsnap::snapshot::{FirstDifference, Mode, Reconciled};

use crate::commands::common::{self, error_messages, output_messages};
use crate::commands::traits::Command;

/// Arguments for the run command.
#[derive(Debug, Clone, Default)]
pub struct RunArgs {
    /// Enable verbose output.
    pub verbose: bool,
    /// Fixtures directory (default: from config).
    pub fixtures: Option<PathBuf>,
    /// Only run fixtures whose name contains this string.
    pub filter: Option<String>,
    /// Record or assert, decided once at start-up.
    pub mode: Mode,
}

/// Run command handler.
pub struct RunCommand {
    args: RunArgs,
    config: Config,
}

impl RunCommand {
    /// Use `config` instead of the default configuration.
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Discover fixtures and apply the name filter.
    fn select_fixtures(&self) -> Result<Vec<FixtureDir>> {
        let root = common::fixtures_dir(self.args.fixtures.as_deref(), &self.config);
        let fixtures = discover(&root)?;
        Ok(match &self.args.filter {
            Some(filter) => fixtures
                .into_iter()
                .filter(|f| f.name.contains(filter.as_str()))
                .collect(),
            None => fixtures,
        })
    }

    fn build_runner(&self) -> Result<Runner<CommandBackend>> {
        let resolver = Resolver::from_current_dir(&self.config.plugin_file).map_err(|e| {
            JsxSnapError::Config(format!("{} {}", error_messages::NO_PLUGIN_PATH, e))
        })?;
        debug!(plugin = %resolver.plugin_path().display(), "plugin location");

        let backend = CommandBackend::from_config(&self.config.backend);
        Ok(Runner::new(resolver, backend, self.args.mode))
    }

    fn report(&self, summary: &RunSummary) {
        for outcome in &summary.outcomes {
            report_outcome(outcome);
        }

        for outcome in summary.failures() {
            if let Err(err) = &outcome.result {
                report_failure_details(&outcome.name, err);
            }
        }

        println!(
            "{} Fixtures: {} passed, {} failed ({} mode) in {:.2}s",
            output_messages::SUMMARY,
            summary.passed(),
            summary.failed(),
            self.args.mode,
            summary.elapsed.as_secs_f64()
        );
    }
}

fn report_outcome(outcome: &FixtureOutcome) {
    match &outcome.result {
        Ok(Reconciled::Matched) => println!("{} {}", output_messages::PASS, outcome.name),
        Ok(Reconciled::Recorded) => {
            println!("{} {} (recorded)", output_messages::RECORDED, outcome.name)
        }
        Err(err) => println!("{} {}: {}", output_messages::FAIL, outcome.name, err),
    }
}

fn report_failure_details(name: &str, err: &FixtureError) {
    if let FixtureError::SnapshotMismatch {
        path,
        expected,
        actual,
    } = err
    {
        println!();
        println!("---- {} ----", name);
        println!("--- expected ({})", path.display());
        println!("{}", expected);
        println!("+++ actual");
        println!("{}", actual);
        if let Some(diff) = FirstDifference::find(expected, actual) {
            println!("{}", diff);
        }
    }
}

/// Fail the invocation when any fixture failed.
fn check_for_failures(summary: &RunSummary) -> Result<()> {
    if !summary.is_success() {
        return Err(JsxSnapError::CommandExecution(format!(
            "{} {}",
            summary.failed(),
            error_messages::FIXTURES_FAILED
        )));
    }
    Ok(())
}

impl Command for RunCommand {
    type Args = RunArgs;
    type Output = RunSummary;

    fn new(args: Self::Args) -> Self {
        Self {
            args,
            config: Config::default(),
        }
    }

    fn execute(&self) -> Result<Self::Output> {
        debug!(command = Self::name(), verbose = self.args.verbose, "executing");
        let fixtures = self.select_fixtures()?;
        let runner = self.build_runner()?;
        let summary = runner.run_all(&fixtures);
        self.report(&summary);
        Ok(summary)
    }

    fn name() -> &'static str {
        "run"
    }
}

/// Run the fixtures and fail if any of them failed.
pub fn run_fixtures(args: RunArgs, config: Config) -> Result<()> {
    let command = RunCommand::new(args).with_config(config);
    let summary = command.execute()?;
    check_for_failures(&summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsxsnap::config::BackendConfig;
    use std::path::Path;
    use tempfile::TempDir;

    fn cat_config() -> Config {
        Config {
            backend: BackendConfig {
                program: "cat".to_string(),
                args: vec!["{input}".to_string()],
            },
            ..Config::default()
        }
    }

    fn write_fixture(root: &Path, name: &str, files: &[(&str, &str)]) {
        let dir = root.join(name);
        std::fs::create_dir_all(&dir).unwrap();
        for (file, content) in files {
            std::fs::write(dir.join(file), content).unwrap();
        }
    }

    fn args(root: &Path, mode: Mode) -> RunArgs {
        RunArgs {
            fixtures: Some(root.to_path_buf()),
            mode,
            ..RunArgs::default()
        }
    }

    #[test]
    fn test_run_command_name() {
        assert_eq!(<RunCommand as Command>::name(), "run");
    }

    #[test]
    fn test_select_fixtures_applies_filter() {
        let root = TempDir::new().unwrap();
        write_fixture(root.path(), "fragment", &[]);
        write_fixture(root.path(), "element", &[]);
        write_fixture(root.path(), "fragment_nested", &[]);

        let command = RunCommand::new(RunArgs {
            filter: Some("fragment".to_string()),
            ..args(root.path(), Mode::Assert)
        });
        let names: Vec<String> = command
            .select_fixtures()
            .unwrap()
            .into_iter()
            .map(|f| f.name)
            .collect();
        assert_eq!(names, ["fragment", "fragment_nested"]);
    }

    #[test]
    fn test_missing_fixtures_dir_is_error() {
        let command = RunCommand::new(args(Path::new("/nonexistent/fixtures"), Mode::Assert));
        assert!(matches!(command.execute(), Err(JsxSnapError::Validation(_))));
    }

    #[test]
    fn test_check_for_failures() {
        assert!(check_for_failures(&RunSummary::default()).is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_run_fixtures_record_then_assert() {
        let root = TempDir::new().unwrap();
        write_fixture(root.path(), "element", &[("input.jsx", "<div />;\n")]);

        run_fixtures(args(root.path(), Mode::Record), cat_config()).unwrap();
        assert_eq!(
            std::fs::read_to_string(root.path().join("element/output.js")).unwrap(),
            "<div />;\n"
        );

        run_fixtures(args(root.path(), Mode::Assert), cat_config()).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_run_fixtures_reports_failure_count() {
        let root = TempDir::new().unwrap();
        write_fixture(root.path(), "missing", &[("input.js", "a;\n")]);
        write_fixture(
            root.path(),
            "matching",
            &[("input.js", "b;\n"), ("output.js", "b;\n")],
        );

        let result = run_fixtures(args(root.path(), Mode::Assert), cat_config());
        match result {
            Err(JsxSnapError::CommandExecution(msg)) => assert_eq!(msg, "1 fixture(s) failed"),
            other => panic!("Expected CommandExecution error, got {:?}", other),
        }
    }
}
