//! Core traits for account persistence
//!
//! The session manager only talks to storage through [`AccountStore`], which
//! lets the flat-file store be swapped for an in-memory one in tests.

use crate::types::{AccountNumber, AccountRecord, AtmError};
use std::collections::BTreeMap;

/// The full in-memory account set, keyed and ordered by account number
pub type Accounts = BTreeMap<AccountNumber, AccountRecord>;

/// Trait for loading and saving the complete account set
pub trait AccountStore {
    /// Load every account together with its transaction log
    fn load_all(&self) -> Result<Accounts, AtmError>;

    /// Persist every account
    ///
    /// Implementations must record which log entries they have written (see
    /// [`AccountRecord::mark_persisted`]) so that later saves only add new ones.
    fn save_all(&self, accounts: &mut Accounts) -> Result<(), AtmError>;
}
