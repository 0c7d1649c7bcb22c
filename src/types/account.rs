//! Account record for the ATM simulator
//!
//! This module defines the AccountRecord structure: the credentials, balance and
//! append-only transaction log of a single bank account, together with the
//! operations that mutate it and the per-account log file handling.

use super::amount::{ensure_balance, ensure_positive};
use super::credentials::{AccountNumber, Pin};
use super::error::AtmError;
use super::transaction::{format_entry, TransactionKind};
use chrono::{Local, NaiveDateTime};
use rust_decimal::Decimal;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, ErrorKind, Write};
use std::path::Path;

/// A single bank account
///
/// The account number and PIN never change after construction. The balance is
/// never negative and the transaction log only grows.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountRecord {
    account_number: AccountNumber,
    pin: Pin,
    balance: Decimal,
    transaction_log: Vec<String>,

    /// Number of leading log entries already written to the log file
    ///
    /// `save_log` only appends entries past this cursor, so repeated saves
    /// never duplicate lines on disk.
    persisted: usize,
}

impl AccountRecord {
    /// Create a new account with an empty transaction log
    ///
    /// # Arguments
    ///
    /// * `account_number` - Validated account number
    /// * `pin` - Validated PIN
    /// * `balance` - Opening balance
    ///
    /// # Errors
    ///
    /// Returns `AtmError::InvalidAmount` if the balance is negative or has more
    /// than two decimal places.
    pub fn new(
        account_number: AccountNumber,
        pin: Pin,
        balance: Decimal,
    ) -> Result<Self, AtmError> {
        ensure_balance(balance)?;

        Ok(AccountRecord {
            account_number,
            pin,
            balance,
            transaction_log: Vec::new(),
            persisted: 0,
        })
    }

    pub fn account_number(&self) -> &AccountNumber {
        &self.account_number
    }

    pub fn pin(&self) -> &Pin {
        &self.pin
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// All log entries, oldest first
    pub fn transaction_log(&self) -> &[String] {
        &self.transaction_log
    }

    /// Log entries that have not been written to the log file yet
    pub fn unsaved_entries(&self) -> &[String] {
        &self.transaction_log[self.persisted..]
    }

    /// Record that every current log entry is persisted
    pub fn mark_persisted(&mut self) {
        self.persisted = self.transaction_log.len();
    }

    /// Plaintext PIN comparison
    pub fn pin_matches(&self, pin: &str) -> bool {
        self.pin.as_str() == pin
    }

    /// Deposit funds, timestamped with the current local time
    ///
    /// See [`AccountRecord::deposit_at`].
    pub fn deposit(&mut self, amount: Decimal) -> Result<Decimal, AtmError> {
        self.deposit_at(amount, Local::now().naive_local())
    }

    /// Deposit funds into the account
    ///
    /// Increases the balance by `amount` and appends one log entry carrying the
    /// amount, the new balance and `timestamp`.
    ///
    /// # Returns
    ///
    /// * `Ok(Decimal)` - The balance after the deposit
    /// * `Err(AtmError)` - If `amount` is not a positive whole number of cents
    ///   or the addition would overflow; nothing is changed
    pub fn deposit_at(
        &mut self,
        amount: Decimal,
        timestamp: NaiveDateTime,
    ) -> Result<Decimal, AtmError> {
        ensure_positive(amount)?;

        let new_balance = self
            .balance
            .checked_add(amount)
            .ok_or_else(|| AtmError::arithmetic_overflow("deposit", self.account_number.as_str()))?;

        self.balance = new_balance;
        self.transaction_log.push(format_entry(
            TransactionKind::Deposit,
            amount,
            new_balance,
            timestamp,
        ));

        Ok(new_balance)
    }

    /// Withdraw funds, timestamped with the current local time
    ///
    /// See [`AccountRecord::withdraw_at`].
    pub fn withdraw(&mut self, amount: Decimal) -> Result<Decimal, AtmError> {
        self.withdraw_at(amount, Local::now().naive_local())
    }

    /// Withdraw funds from the account
    ///
    /// # Returns
    ///
    /// * `Ok(Decimal)` - The balance after the withdrawal
    /// * `Err(AtmError::InsufficientFunds)` - If `amount` exceeds the balance;
    ///   the balance and log are left untouched
    /// * `Err(AtmError::InvalidAmount)` - If `amount` is not a positive whole
    ///   number of cents
    pub fn withdraw_at(
        &mut self,
        amount: Decimal,
        timestamp: NaiveDateTime,
    ) -> Result<Decimal, AtmError> {
        ensure_positive(amount)?;

        if amount > self.balance {
            return Err(AtmError::insufficient_funds(
                self.account_number.as_str(),
                self.balance,
                amount,
            ));
        }

        let new_balance = self
            .balance
            .checked_sub(amount)
            .ok_or_else(|| AtmError::arithmetic_overflow("withdrawal", self.account_number.as_str()))?;

        self.balance = new_balance;
        self.transaction_log.push(format_entry(
            TransactionKind::Withdrawal,
            amount,
            new_balance,
            timestamp,
        ));

        Ok(new_balance)
    }

    /// Replace the in-memory log with the contents of a log file
    ///
    /// Clears any prior entries first. A missing file leaves the log empty.
    /// Lines that are not valid UTF-8 are kept with the bad bytes replaced.
    /// Every loaded entry counts as persisted.
    ///
    /// # Errors
    ///
    /// Returns `AtmError::IoError` if the file exists but cannot be read.
    pub fn load_log(&mut self, source: &Path) -> Result<(), AtmError> {
        self.transaction_log.clear();
        self.persisted = 0;

        let file = match File::open(source) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e.into()),
        };

        for (index, line) in BufReader::new(file).split(b'\n').enumerate() {
            let mut bytes = line?;
            if bytes.last() == Some(&b'\r') {
                bytes.pop();
            }

            let entry = match String::from_utf8(bytes) {
                Ok(entry) => entry,
                Err(e) => {
                    log::warn!(
                        "Log file {} line {} is not valid UTF-8",
                        source.display(),
                        index + 1
                    );
                    String::from_utf8_lossy(e.as_bytes()).into_owned()
                }
            };
            self.transaction_log.push(entry);
        }
        self.mark_persisted();

        Ok(())
    }

    /// Append unsaved log entries to a log file
    ///
    /// Creates the file if needed. Entries already persisted are skipped, so
    /// calling this repeatedly never duplicates lines.
    ///
    /// # Errors
    ///
    /// Returns `AtmError::IoError` if the file cannot be opened or written.
    pub fn save_log(&mut self, destination: &Path) -> Result<(), AtmError> {
        if self.unsaved_entries().is_empty() {
            return Ok(());
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(destination)?;
        let mut writer = BufWriter::new(file);

        for entry in self.unsaved_entries() {
            writeln!(writer, "{}", entry)?;
        }
        writer.flush()?;

        self.mark_persisted();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rstest::rstest;
    use std::fs;
    use tempfile::TempDir;

    fn timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn account(balance: Decimal) -> AccountRecord {
        AccountRecord::new(
            AccountNumber::parse("1234").unwrap(),
            Pin::parse("0000").unwrap(),
            balance,
        )
        .unwrap()
    }

    #[test]
    fn test_new_account_has_empty_log() {
        let account = account(Decimal::new(100, 0));

        assert_eq!(account.account_number().as_str(), "1234");
        assert_eq!(account.balance(), Decimal::new(100, 0));
        assert!(account.transaction_log().is_empty());
        assert!(account.unsaved_entries().is_empty());
    }

    #[rstest]
    #[case::negative(Decimal::new(-1, 2), "must not be negative")]
    #[case::sub_cent(Decimal::new(10005, 3), "at most 2 decimal places allowed")]
    fn test_new_rejects_invalid_balance(#[case] balance: Decimal, #[case] reason: &str) {
        let result = AccountRecord::new(
            AccountNumber::parse("1234").unwrap(),
            Pin::parse("0000").unwrap(),
            balance,
        );

        assert_eq!(
            result,
            Err(AtmError::invalid_amount(&balance.to_string(), reason))
        );
    }

    #[test]
    fn test_deposit_increases_balance_and_logs_once() {
        let mut account = account(Decimal::new(100, 0));

        let balance = account.deposit_at(Decimal::new(50, 0), timestamp()).unwrap();

        assert_eq!(balance, Decimal::new(150, 0));
        assert_eq!(account.balance(), Decimal::new(150, 0));
        assert_eq!(
            account.transaction_log(),
            ["Deposit: +50.00 | Balance: 150.00 | 2026-10-19 12:00:00"]
        );
    }

    #[test]
    fn test_deposit_overflow_leaves_account_untouched() {
        let mut account = account(Decimal::MAX);

        let result = account.deposit_at(Decimal::ONE, timestamp());

        assert_eq!(
            result,
            Err(AtmError::arithmetic_overflow("deposit", "1234"))
        );
        assert_eq!(account.balance(), Decimal::MAX);
        assert!(account.transaction_log().is_empty());
    }

    #[rstest]
    #[case::zero(Decimal::ZERO)]
    #[case::sub_cent(Decimal::new(1, 3))]
    fn test_invalid_amounts_change_nothing(#[case] amount: Decimal) {
        let mut account = account(Decimal::new(100, 0));

        assert!(matches!(
            account.deposit_at(amount, timestamp()),
            Err(AtmError::InvalidAmount { .. })
        ));
        assert!(matches!(
            account.withdraw_at(amount, timestamp()),
            Err(AtmError::InvalidAmount { .. })
        ));
        assert_eq!(account.balance(), Decimal::new(100, 0));
        assert!(account.transaction_log().is_empty());
    }

    #[test]
    fn test_withdraw_exact_balance_reaches_zero() {
        let mut account = account(Decimal::new(15000, 2));

        let balance = account.withdraw_at(Decimal::new(150, 0), timestamp()).unwrap();

        assert_eq!(balance, Decimal::ZERO);
        assert_eq!(
            account.transaction_log(),
            ["Withdrawal: -150.00 | Balance: 0.00 | 2026-10-19 12:00:00"]
        );
    }

    #[test]
    fn test_withdraw_insufficient_funds_changes_nothing() {
        let mut account = account(Decimal::new(150, 0));

        let result = account.withdraw_at(Decimal::new(200, 0), timestamp());

        assert_eq!(
            result,
            Err(AtmError::insufficient_funds(
                "1234",
                Decimal::new(150, 0),
                Decimal::new(200, 0)
            ))
        );
        assert_eq!(account.balance(), Decimal::new(150, 0));
        assert!(account.transaction_log().is_empty());
    }

    #[test]
    fn test_pin_matches() {
        let account = account(Decimal::ZERO);
        assert!(account.pin_matches("0000"));
        assert!(!account.pin_matches("0001"));
    }

    #[test]
    fn test_load_log_missing_file_yields_empty_log() {
        let dir = TempDir::new().unwrap();
        let mut account = account(Decimal::ZERO);
        account.deposit_at(Decimal::ONE, timestamp()).unwrap();

        account.load_log(&dir.path().join("missing.txt")).unwrap();

        assert!(account.transaction_log().is_empty());
    }

    #[test]
    fn test_load_log_replaces_entries_and_marks_them_persisted() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("account_1234.txt");
        fs::write(&path, "first line\nsecond line\n").unwrap();

        let mut account = account(Decimal::ZERO);
        account.deposit_at(Decimal::ONE, timestamp()).unwrap();
        account.load_log(&path).unwrap();

        assert_eq!(account.transaction_log(), ["first line", "second line"]);
        assert!(account.unsaved_entries().is_empty());
    }

    #[test]
    fn test_load_log_keeps_lines_with_invalid_utf8() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("account_1234.txt");
        fs::write(&path, b"good line\r\nbad \xff\xfe line\nlast line\n").unwrap();

        let mut account = account(Decimal::ZERO);
        account.load_log(&path).unwrap();

        assert_eq!(
            account.transaction_log(),
            ["good line", "bad \u{FFFD}\u{FFFD} line", "last line"]
        );
        assert!(account.unsaved_entries().is_empty());
    }

    #[test]
    fn test_save_log_appends_only_new_entries() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("account_1234.txt");

        let mut account = account(Decimal::new(100, 0));
        account.deposit_at(Decimal::new(50, 0), timestamp()).unwrap();
        account.save_log(&path).unwrap();

        // Second save with nothing new must not duplicate the first line
        account.save_log(&path).unwrap();

        account.withdraw_at(Decimal::new(25, 0), timestamp()).unwrap();
        account.save_log(&path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            "Deposit: +50.00 | Balance: 150.00 | 2026-10-19 12:00:00\n\
             Withdrawal: -25.00 | Balance: 125.00 | 2026-10-19 12:00:00\n"
        );
    }

    #[test]
    fn test_save_after_load_does_not_duplicate() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("account_1234.txt");
        fs::write(&path, "old entry\n").unwrap();

        let mut account = account(Decimal::ZERO);
        account.load_log(&path).unwrap();
        account.save_log(&path).unwrap();
        account.save_log(&path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "old entry\n");
    }

    #[test]
    fn test_save_log_without_entries_creates_no_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("account_1234.txt");

        let mut account = account(Decimal::ZERO);
        account.save_log(&path).unwrap();

        assert!(!path.exists());
    }
}
