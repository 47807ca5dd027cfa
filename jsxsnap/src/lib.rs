//! jsxsnap - snapshot runner for the import-jsx-pragma swc plugin.
//!
//! Every fixture directory holds an `input.<ext>` source file, optional
//! `.swcrc` and `config.json` overrides, and an `output.js` snapshot. For
//! each fixture the runner resolves a compiler configuration, transforms the
//! input through a [`backend::CompilerBackend`], and either records the
//! produced code or asserts it is byte-identical to the snapshot.
//!
//! ```no_run
//! use jsxsnap::backend::CommandBackend;
//! use jsxsnap::config::Config;
//! use jsxsnap::fixture::discover;
//! use jsxsnap::resolver::Resolver;
//! use jsxsnap::runner::Runner;
//! use jsxsnap::snapshot::Mode;
//!
//! # fn main() -> jsxsnap::error::Result<()> {
//! let config = Config::default();
//! let fixtures = discover(config.fixtures_dir.as_ref())?;
//! let runner = Runner::new(
//!     Resolver::from_current_dir(&config.plugin_file)?,
//!     CommandBackend::from_config(&config.backend),
//!     Mode::from_env(),
//! );
//! let summary = runner.run_all(&fixtures);
//! assert!(summary.is_success());
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod config;
pub mod error;
pub mod fixture;
pub mod resolver;
pub mod runner;
pub mod snapshot;

pub use error::{FixtureError, JsxSnapError, Result};
pub use resolver::{ResolvedConfig, Resolver};
pub use runner::{RunSummary, Runner};
pub use snapshot::Mode;
