//! Command modules for the jsxsnap CLI.
//!
//! Each subcommand is implemented in its own file following the same
//! pattern: an args struct, a command struct implementing
//! [`traits::Command`], and a `run_*` entry point used by `main`.

pub mod common;
pub mod traits;

pub mod list;
pub mod resolve;
pub mod run;

pub use list::{run_list, ListArgs};
pub use resolve::{run_resolve, ResolveArgs};
pub use run::{run_fixtures, RunArgs};
