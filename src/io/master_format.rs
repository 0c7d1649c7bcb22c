//! Master file format handling
//!
//! The master file holds one line per account with three whitespace-separated
//! fields: `accountNumber pin balance`. This module centralizes the format:
//! - MasterRecord structure for (de)serialization
//! - Conversion from master records to account records
//! - Reading and writing whole master files
//!
//! Reading is tolerant: malformed lines are logged and skipped.

use crate::types::amount::parse_balance;
use crate::types::{AccountNumber, AccountRecord, AtmError, Pin};
use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

const FIELD_COUNT: usize = 3;

/// Raw master file line
///
/// Fields are kept as strings; validation happens in [`convert_master_record`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MasterRecord {
    pub account_number: String,
    pub pin: String,
    pub balance: String,
}

impl From<&AccountRecord> for MasterRecord {
    fn from(account: &AccountRecord) -> Self {
        MasterRecord {
            account_number: account.account_number().to_string(),
            pin: account.pin().as_str().to_string(),
            balance: format!("{:.2}", account.balance()),
        }
    }
}

/// Convert a MasterRecord to an AccountRecord with an empty log
///
/// # Errors
///
/// Returns an error if the account number or PIN is not four digits, or if
/// the balance is not a non-negative decimal with at most two decimal places.
/// Such a balance could not be written back unchanged.
pub fn convert_master_record(record: MasterRecord) -> Result<AccountRecord, AtmError> {
    let account_number = AccountNumber::parse(&record.account_number)?;
    let pin = Pin::parse(&record.pin)?;
    let balance = parse_balance(&record.balance)?;

    AccountRecord::new(account_number, pin, balance)
}

/// Read every well-formed account from a master file
///
/// Fields may be separated by any run of spaces or tabs. Quotes have no special
/// meaning. Lines with the wrong number of fields or invalid values are skipped
/// with a warning.
///
/// # Errors
///
/// Only an underlying I/O failure is returned; format problems never are.
pub fn read_master<R: Read>(input: R) -> Result<Vec<AccountRecord>, AtmError> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b' ')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All)
        .from_reader(input);

    let mut accounts = Vec::new();

    for result in reader.records() {
        let raw = match result {
            Ok(raw) => raw,
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                log::warn!("Skipping unreadable master line: {}", e);
                continue;
            }
        };
        let line = raw.position().map(|pos| pos.line()).unwrap_or_default();

        // Consecutive spaces produce empty fields, tabs stay inside a field
        let fields: StringRecord = raw.iter().flat_map(str::split_whitespace).collect();
        if fields.is_empty() {
            continue;
        }
        if fields.len() != FIELD_COUNT {
            log::warn!(
                "Skipping master line {}: expected {} fields, found {}",
                line,
                FIELD_COUNT,
                fields.len()
            );
            continue;
        }

        let record = match fields.deserialize::<MasterRecord>(None) {
            Ok(record) => record,
            Err(e) => {
                log::warn!("Skipping master line {}: {}", line, e);
                continue;
            }
        };

        match convert_master_record(record) {
            Ok(account) => accounts.push(account),
            Err(e) => log::warn!("Skipping master line {}: {}", line, e),
        }
    }

    Ok(accounts)
}

/// Write all accounts as master file lines
///
/// Balances are written with two decimal places.
pub fn write_master<'a, I, W>(accounts: I, output: W) -> Result<(), AtmError>
where
    I: IntoIterator<Item = &'a AccountRecord>,
    W: Write,
{
    let mut writer = WriterBuilder::new()
        .delimiter(b' ')
        .has_headers(false)
        .from_writer(output);

    for account in accounts {
        writer.serialize(MasterRecord::from(account))?;
    }

    writer.flush()?;
    Ok(())
}
