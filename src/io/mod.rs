//! I/O module
//!
//! Handles the on-disk account files.
//!
//! # Components
//!
//! - `master_format` - Master file format handling (record conversion, reading, writing)
//! - `flat_file` - The flat-file implementation of `AccountStore`

pub mod flat_file;
pub mod master_format;

pub use flat_file::{FlatFileStore, StoreConfig, DEFAULT_ACCOUNTS_FILE, DEFAULT_LOG_PREFIX};
pub use master_format::{convert_master_record, read_master, write_master, MasterRecord};
