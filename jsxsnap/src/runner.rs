//! Fixture runner.
//!
//! Runs each fixture through load → resolve → transform → reconcile and
//! collects one [`FixtureOutcome`] per fixture. A failing fixture is recorded
//! and the run moves on to the next one.

use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::backend::CompilerBackend;
use crate::error::FixtureError;
use crate::fixture::{Fixture, FixtureDir};
use crate::resolver::Resolver;
use crate::snapshot::{self, Mode, Reconciled};

/// Result of running a single fixture.
#[derive(Debug)]
pub struct FixtureOutcome {
    pub name: String,
    pub result: Result<Reconciled, FixtureError>,
}

impl FixtureOutcome {
    pub fn passed(&self) -> bool {
        self.result.is_ok()
    }
}

/// Results of a whole run, in execution order.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub outcomes: Vec<FixtureOutcome>,
    pub elapsed: Duration,
}

impl RunSummary {
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.passed()
    }

    /// Outcomes of the failing fixtures.
    pub fn failures(&self) -> impl Iterator<Item = &FixtureOutcome> {
        self.outcomes.iter().filter(|o| !o.passed())
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }
}

/// Drives fixtures through a compiler backend.
pub struct Runner<B> {
    resolver: Resolver,
    backend: B,
    mode: Mode,
}

impl<B: CompilerBackend> Runner<B> {
    /// Create a runner. `mode` is fixed for every fixture it runs.
    pub fn new(resolver: Resolver, backend: B, mode: Mode) -> Self {
        Self {
            resolver,
            backend,
            mode,
        }
    }

    /// Run every fixture in order.
    pub fn run_all(&self, fixtures: &[FixtureDir]) -> RunSummary {
        let start = Instant::now();
        info!(count = fixtures.len(), mode = %self.mode, "running fixtures");

        let outcomes = fixtures.iter().map(|dir| self.run_fixture(dir)).collect();

        RunSummary {
            outcomes,
            elapsed: start.elapsed(),
        }
    }

    /// Run one fixture, capturing any failure in the outcome.
    pub fn run_fixture(&self, dir: &FixtureDir) -> FixtureOutcome {
        let result = self.reconcile_fixture(dir);
        match &result {
            Ok(Reconciled::Matched) => info!(fixture = %dir.name, "ok"),
            Ok(Reconciled::Recorded) => info!(fixture = %dir.name, "recorded"),
            Err(err) => debug!(fixture = %dir.name, "{}", err),
        }
        FixtureOutcome {
            name: dir.name.clone(),
            result,
        }
    }

    fn reconcile_fixture(&self, dir: &FixtureDir) -> Result<Reconciled, FixtureError> {
        let fixture = Fixture::load(dir)?;
        let config = self.resolver.resolve(
            &fixture.extension,
            fixture.host_override.as_ref(),
            fixture.plugin_config.as_ref(),
        );
        debug!(fixture = %fixture.name, config = %config.as_value(), "resolved configuration");

        let produced = self.backend.transform_file(&fixture.input_path, &config)?;
        snapshot::reconcile(self.mode, &fixture.snapshot_path, &produced)
    }
}
