use log::{LevelFilter, SetLoggerError};
use simple_logger::SimpleLogger;

/// Install the stderr logger
///
/// `level` comes from `--log-level`; a `RUST_LOG` environment variable takes
/// precedence when set. Log output goes to stderr so it never mixes with the
/// interactive menu on stdout.
pub fn configure_logging(level: LevelFilter) -> Result<(), SetLoggerError> {
    SimpleLogger::new().with_level(level).env().init()
}
