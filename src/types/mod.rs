//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: The account record and its log file handling
//! - `amount`: Currency amount parsing and validation
//! - `credentials`: Account number and PIN types
//! - `transaction`: Transaction log entry formatting
//! - `error`: Error types for the ATM simulator

pub mod account;
pub mod amount;
pub mod credentials;
pub mod error;
pub mod transaction;

pub use account::AccountRecord;
pub use credentials::{AccountNumber, Pin};
pub use error::AtmError;
pub use transaction::{format_entry, TransactionKind, TIMESTAMP_FORMAT};
