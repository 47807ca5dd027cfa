//! Command trait for the jsxsnap CLI.
//!
//! Every subcommand implements [`Command`] so dispatch in `main` stays
//! uniform: build from arguments, execute, report.

use jsxsnap::error::Result;

/// Standard command trait that all jsxsnap commands implement.
///
/// # Type Parameters
/// * `Args` - The arguments type for this command
/// * `Output` - The output type returned by this command
pub trait Command {
    /// The arguments type for this command.
    type Args;

    /// The output type returned by this command.
    type Output;

    /// Create a new command instance with the given arguments.
    fn new(args: Self::Args) -> Self;

    /// Execute the command.
    fn execute(&self) -> Result<Self::Output>;

    /// Get the command name.
    fn name() -> &'static str;
}
