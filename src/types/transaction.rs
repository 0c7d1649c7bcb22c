//! Transaction log entries
//!
//! Each deposit or withdrawal appends one human-readable line to the account's
//! transaction log, e.g.
//!
//! ```text
//! Deposit: +50.00 | Balance: 150.00 | 2026-10-19 09:15:02
//! Withdrawal: -20.00 | Balance: 130.00 | 2026-10-19 09:16:40
//! ```
//!
//! Lines loaded back from disk are kept verbatim; they are never re-parsed.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use std::fmt;

/// Timestamp layout used in log entries
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Operations that produce a log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    /// Credit funds to the account
    Deposit,

    /// Debit funds from the account
    Withdrawal,
}

impl TransactionKind {
    fn sign(self) -> char {
        match self {
            TransactionKind::Deposit => '+',
            TransactionKind::Withdrawal => '-',
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionKind::Deposit => f.write_str("Deposit"),
            TransactionKind::Withdrawal => f.write_str("Withdrawal"),
        }
    }
}

/// Render a single transaction log line
///
/// # Arguments
///
/// * `kind` - Deposit or withdrawal
/// * `amount` - The (positive) amount moved
/// * `balance` - Balance after the operation
/// * `timestamp` - Local time of the operation
pub fn format_entry(
    kind: TransactionKind,
    amount: Decimal,
    balance: Decimal,
    timestamp: NaiveDateTime,
) -> String {
    format!(
        "{}: {}{:.2} | Balance: {:.2} | {}",
        kind,
        kind.sign(),
        amount,
        balance,
        timestamp.format(TIMESTAMP_FORMAT)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rstest::rstest;

    fn timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(9, 5, 7)
            .unwrap()
    }

    #[rstest]
    #[case::deposit(
        TransactionKind::Deposit,
        Decimal::new(50, 0),
        Decimal::new(15000, 2),
        "Deposit: +50.00 | Balance: 150.00 | 2026-10-19 09:05:07"
    )]
    #[case::withdrawal(
        TransactionKind::Withdrawal,
        Decimal::new(1999, 2),
        Decimal::new(1, 2),
        "Withdrawal: -19.99 | Balance: 0.01 | 2026-10-19 09:05:07"
    )]
    #[case::withdrawal_to_zero(
        TransactionKind::Withdrawal,
        Decimal::new(150, 0),
        Decimal::ZERO,
        "Withdrawal: -150.00 | Balance: 0.00 | 2026-10-19 09:05:07"
    )]
    fn test_format_entry(
        #[case] kind: TransactionKind,
        #[case] amount: Decimal,
        #[case] balance: Decimal,
        #[case] expected: &str,
    ) {
        assert_eq!(format_entry(kind, amount, balance, timestamp()), expected);
    }
}
