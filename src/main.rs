//! Rust ATM Simulator CLI
//!
//! Interactive ATM over flat-file bank accounts.
//!
//! # Usage
//!
//! ```bash
//! cargo run
//! cargo run -- --data-dir ./bank
//! cargo run -- --data-dir ./bank --log-level info
//! ```
//!
//! The program loads every account from the data directory, then runs the
//! menu on stdin/stdout until Exit is chosen or input ends. Diagnostics go to
//! stderr.
//!
//! # Exit Codes
//!
//! - 0: Normal termination via Exit (or end of input)
//! - 1: Error (logger setup failed, account files unreadable or unwritable)

use rust_atm_simulator::cli::{self, CliArgs, Shell};
use rust_atm_simulator::{AtmError, FlatFileStore, SessionManager};
use std::io;
use std::process;

fn main() {
    let args = cli::parse_args();

    if let Err(e) = cli::configure_logging(args.log_level) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    if let Err(e) = run(&args) {
        log::error!("{}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Load the accounts and run the interactive menu
fn run(args: &CliArgs) -> Result<(), AtmError> {
    let store = FlatFileStore::open(args.to_store_config())?;
    log::debug!("Using data directory {}", store.data_dir().display());

    let mut atm = SessionManager::open(store)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut shell = Shell::new(stdin.lock(), stdout.lock());
    shell.run(&mut atm)
}
