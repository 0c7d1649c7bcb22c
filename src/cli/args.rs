use crate::io::{StoreConfig, DEFAULT_ACCOUNTS_FILE, DEFAULT_LOG_PREFIX};
use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;

/// Interactive ATM over flat-file bank accounts
#[derive(Parser, Debug)]
#[command(name = "atm")]
#[command(about = "Interactive ATM simulator backed by flat-file accounts", long_about = None)]
pub struct CliArgs {
    /// Directory holding the master file and per-account log files
    #[arg(
        long = "data-dir",
        value_name = "DIR",
        default_value = ".",
        help = "Directory for account files (created if missing)"
    )]
    pub data_dir: PathBuf,

    /// Master file name inside the data directory
    #[arg(
        long = "accounts-file",
        value_name = "NAME",
        default_value = DEFAULT_ACCOUNTS_FILE,
        help = "Name of the master accounts file"
    )]
    pub accounts_file: String,

    /// Prefix of per-account log file names
    #[arg(
        long = "log-prefix",
        value_name = "PREFIX",
        default_value = DEFAULT_LOG_PREFIX,
        help = "Prefix for transaction log files (<PREFIX><account>.txt)"
    )]
    pub log_prefix: String,

    /// Diagnostic log level, written to stderr
    #[arg(
        long = "log-level",
        value_name = "LEVEL",
        default_value = "warn",
        help = "Log level: off, error, warn, info, debug or trace (RUST_LOG overrides)"
    )]
    pub log_level: LevelFilter,
}

impl CliArgs {
    /// Create a StoreConfig from CLI arguments
    pub fn to_store_config(&self) -> StoreConfig {
        StoreConfig {
            data_dir: self.data_dir.clone(),
            accounts_file: self.accounts_file.clone(),
            log_prefix: self.log_prefix.clone(),
        }
    }
}
