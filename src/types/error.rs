//! Error types for the ATM simulator
//!
//! This module defines all error types that can occur while driving an ATM session.
//! Errors are designed to be descriptive and user-friendly for CLI output.
//!
//! # Error Categories
//!
//! - **Validation Errors**: Malformed account number, PIN or amount
//! - **Session Errors**: Duplicate account, failed login, no active session
//! - **Balance Errors**: Insufficient funds, arithmetic overflow
//! - **Storage Errors**: I/O failures and unreadable persisted data

use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the ATM simulator
///
/// Every variant except the storage ones is recoverable: the operation is
/// rejected, the message is surfaced to the user and the session stays in
/// the state it was in before the call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AtmError {
    /// Account number is not exactly four digits
    #[error("Invalid account number '{input}': must be exactly 4 digits")]
    InvalidAccountNumber {
        /// The rejected input
        input: String,
    },

    /// PIN is not exactly four digits
    ///
    /// The rejected value is deliberately not carried in the error.
    #[error("Invalid PIN: must be exactly 4 digits")]
    InvalidPin,

    /// Amount is malformed, negative, zero where a positive value is
    /// required, or has more than two decimal places
    #[error("Invalid amount '{amount}': {reason}")]
    InvalidAmount {
        /// The rejected amount as entered
        amount: String,
        /// Why the amount was rejected
        reason: String,
    },

    /// An account with this number already exists
    #[error("Account number {account} already exists")]
    DuplicateAccount {
        /// The account number that is already taken
        account: String,
    },

    /// No account matches the given number and PIN
    ///
    /// Does not reveal which of the two fields was wrong.
    #[error("Invalid account number or PIN")]
    AuthenticationFailure,

    /// Withdrawal exceeds the current balance
    #[error("Insufficient funds for account {account}: balance {balance:.2}, requested {requested:.2}")]
    InsufficientFunds {
        /// Account number
        account: String,
        /// Balance at the time of the request
        balance: Decimal,
        /// Requested withdrawal amount
        requested: Decimal,
    },

    /// Balance, deposit, withdrawal or history requested while logged out
    #[error("No active session: please log in first")]
    NoActiveSession,

    /// Arithmetic overflow would occur
    #[error("Arithmetic overflow in {operation} for account {account}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
        /// Account number
        account: String,
    },

    /// I/O error occurred while reading or writing the persisted files
    ///
    /// This is a fatal error.
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// The master file could not be read or written as records
    ///
    /// This is a fatal error.
    #[error("Storage format error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the error
        message: String,
    },
}

impl From<std::io::Error> for AtmError {
    fn from(error: std::io::Error) -> Self {
        AtmError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for AtmError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());
        let message = error.to_string();

        match error.into_kind() {
            csv::ErrorKind::Io(inner) => inner.into(),
            _ => AtmError::ParseError { line, message },
        }
    }
}

impl AtmError {
    /// Whether the error leaves the persisted state in an unknown condition
    ///
    /// Only storage failures are fatal; the shell recovers from everything else.
    pub fn is_fatal(&self) -> bool {
        matches!(self, AtmError::IoError { .. } | AtmError::ParseError { .. })
    }

    /// Create an InvalidAccountNumber error
    pub fn invalid_account_number(input: &str) -> Self {
        AtmError::InvalidAccountNumber {
            input: input.to_string(),
        }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: &str, reason: &str) -> Self {
        AtmError::InvalidAmount {
            amount: amount.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create a DuplicateAccount error
    pub fn duplicate_account(account: &str) -> Self {
        AtmError::DuplicateAccount {
            account: account.to_string(),
        }
    }

    /// Create an InsufficientFunds error
    pub fn insufficient_funds(account: &str, balance: Decimal, requested: Decimal) -> Self {
        AtmError::InsufficientFunds {
            account: account.to_string(),
            balance,
            requested,
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str, account: &str) -> Self {
        AtmError::ArithmeticOverflow {
            operation: operation.to_string(),
            account: account.to_string(),
        }
    }
}
