//! Flat-file account store
//!
//! Persists accounts as plain text inside a data directory:
//!
//! ```text
//! <data_dir>/accounts.txt        master file, one `number pin balance` line per account
//! <data_dir>/account_1234.txt    transaction log for account 1234, one entry per line
//! ```
//!
//! The master file is rewritten from scratch on every save; log files are only
//! ever appended to. There is no atomicity guarantee: a crash in the middle of
//! a save can leave a truncated master file behind.

use crate::core::traits::{AccountStore, Accounts};
use crate::io::master_format::{read_master, write_master};
use crate::types::{AccountNumber, AtmError};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind};
use std::path::{Path, PathBuf};

/// Default master file name
pub const DEFAULT_ACCOUNTS_FILE: &str = "accounts.txt";

/// Default prefix of per-account log files
pub const DEFAULT_LOG_PREFIX: &str = "account_";

/// Where the flat-file store keeps its files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Directory holding the master file and the log files
    pub data_dir: PathBuf,

    /// File name of the master file inside `data_dir`
    pub accounts_file: String,

    /// Prefix for log file names; the account number and `.txt` are appended
    pub log_prefix: String,
}

impl StoreConfig {
    /// Default file names inside the given directory
    pub fn in_dir(data_dir: impl Into<PathBuf>) -> Self {
        StoreConfig {
            data_dir: data_dir.into(),
            ..StoreConfig::default()
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            data_dir: PathBuf::from("."),
            accounts_file: DEFAULT_ACCOUNTS_FILE.to_string(),
            log_prefix: DEFAULT_LOG_PREFIX.to_string(),
        }
    }
}

/// Account store backed by a master file and one log file per account
#[derive(Debug, Clone)]
pub struct FlatFileStore {
    config: StoreConfig,
}

impl FlatFileStore {
    /// Create a store over an existing directory
    pub fn new(config: StoreConfig) -> Self {
        FlatFileStore { config }
    }

    /// Create a store, creating the data directory if it does not exist
    ///
    /// # Errors
    ///
    /// Returns `AtmError::IoError` if the directory cannot be created.
    pub fn open(config: StoreConfig) -> Result<Self, AtmError> {
        fs::create_dir_all(&config.data_dir)?;
        Ok(FlatFileStore::new(config))
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn data_dir(&self) -> &Path {
        &self.config.data_dir
    }

    /// Path of the master file
    pub fn master_path(&self) -> PathBuf {
        self.config.data_dir.join(&self.config.accounts_file)
    }

    /// Path of an account's log file: prefix + account number + `.txt`
    pub fn log_path(&self, account_number: &AccountNumber) -> PathBuf {
        self.config
            .data_dir
            .join(format!("{}{}.txt", self.config.log_prefix, account_number))
    }
}

impl AccountStore for FlatFileStore {
    /// Load the master file and every account's log
    ///
    /// A missing master file means no accounts yet. Duplicate account numbers
    /// keep the first occurrence.
    fn load_all(&self) -> Result<Accounts, AtmError> {
        let master_path = self.master_path();
        let file = match File::open(&master_path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!(
                    "No master file at {}, starting with no accounts",
                    master_path.display()
                );
                return Ok(Accounts::new());
            }
            Err(e) => return Err(e.into()),
        };

        let mut accounts = Accounts::new();

        for mut account in read_master(BufReader::new(file))? {
            let account_number = account.account_number().clone();
            if accounts.contains_key(&account_number) {
                log::warn!(
                    "Skipping duplicate entry for account {} in {}",
                    account_number,
                    master_path.display()
                );
                continue;
            }

            account.load_log(&self.log_path(&account_number))?;
            accounts.insert(account_number, account);
        }

        log::debug!(
            "Loaded {} accounts from {}",
            accounts.len(),
            master_path.display()
        );
        Ok(accounts)
    }

    /// Rewrite the master file and append unsaved log entries
    fn save_all(&self, accounts: &mut Accounts) -> Result<(), AtmError> {
        let master_path = self.master_path();
        let file = File::create(&master_path)?;
        write_master(accounts.values(), BufWriter::new(file))?;

        for account in accounts.values_mut() {
            let log_path = self.log_path(account.account_number());
            account.save_log(&log_path)?;
        }

        log::debug!(
            "Saved {} accounts to {}",
            accounts.len(),
            master_path.display()
        );
        Ok(())
    }
}
