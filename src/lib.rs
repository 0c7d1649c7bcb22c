//! Rust ATM Simulator Library
//! # Overview
//!
//! This library implements a single-user ATM over bank accounts persisted as
//! flat text files: account creation, PIN login, balance inquiry, deposits,
//! withdrawals and transaction history.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (AccountRecord, AccountNumber, Pin, AtmError)
//! - [`core`] - Business logic components:
//!   - [`core::session`] - Login state and account operations (`SessionManager`)
//!   - [`core::traits`] - The `AccountStore` persistence abstraction
//! - [`io`] - Flat-file persistence (master file and per-account logs)
//! - [`cli`] - Argument parsing, logging setup and the interactive menu
//!
//! # Session States
//!
//! - **LoggedOut**: only account creation and login are available
//! - **LoggedIn**: balance, deposit, withdrawal, history and logout operate on
//!   the logged-in account
//!
//! # Persistence
//!
//! Every state-changing operation rewrites the master file and appends new
//! transaction log lines to the per-account log files.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod types;

pub use self::core::{AccountStore, Accounts, SessionManager, SessionState};
pub use self::io::{FlatFileStore, StoreConfig};
pub use types::{AccountNumber, AccountRecord, AtmError, Pin, TransactionKind};
