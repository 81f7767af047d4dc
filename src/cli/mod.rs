//! CLI module for the executive registry
//!
//! Parses flags/environment into a `ServerConfig` and runs the server.

mod args;
mod commands;
mod errors;

pub use args::Cli;
pub use commands::{build_config, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};

/// Parse the process arguments and run the server
pub fn run() -> CliResult<()> {
    run_command(Cli::parse_args())
}
