// CLI module
// Command-line arguments, logging setup and the interactive menu loop

mod args;
mod logging;
pub mod shell;

pub use args::CliArgs;
pub use logging::configure_logging;
pub use shell::Shell;

use clap::Parser;

/// Parse command-line arguments using clap
///
/// If parsing fails (unknown flag, bad log level) or `--help` is given, clap
/// prints the message and exits the process.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}
