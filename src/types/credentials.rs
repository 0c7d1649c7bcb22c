//! Account number and PIN types
//!
//! Both are exactly four ASCII digits. They are kept as strings so that leading
//! zeros survive (`0042` is a valid account number).

use super::error::AtmError;
use std::fmt;
use std::str::FromStr;

const CREDENTIAL_LEN: usize = 4;

fn is_four_digits(input: &str) -> bool {
    input.len() == CREDENTIAL_LEN && input.bytes().all(|b| b.is_ascii_digit())
}

/// Four-digit account number, unique across the store
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccountNumber(String);

impl AccountNumber {
    /// Validate and wrap an account number
    ///
    /// # Errors
    ///
    /// Returns `AtmError::InvalidAccountNumber` unless the input is exactly
    /// four ASCII digits.
    pub fn parse(input: &str) -> Result<Self, AtmError> {
        if is_four_digits(input) {
            Ok(AccountNumber(input.to_string()))
        } else {
            Err(AtmError::invalid_account_number(input))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for AccountNumber {
    type Err = AtmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AccountNumber::parse(s)
    }
}

impl fmt::Display for AccountNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Four-digit PIN, stored and compared in plaintext
#[derive(Clone, PartialEq, Eq)]
pub struct Pin(String);

impl Pin {
    /// Validate and wrap a PIN
    ///
    /// # Errors
    ///
    /// Returns `AtmError::InvalidPin` unless the input is exactly four ASCII digits.
    pub fn parse(input: &str) -> Result<Self, AtmError> {
        if is_four_digits(input) {
            Ok(Pin(input.to_string()))
        } else {
            Err(AtmError::InvalidPin)
        }
    }

    /// The plaintext PIN, as written to the master file
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Pin {
    type Err = AtmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pin::parse(s)
    }
}

// Keeps PINs out of log output.
impl fmt::Debug for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Pin(****)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1234")]
    #[case("0000")]
    #[case("0042")]
    fn test_account_number_accepts_four_digits(#[case] input: &str) {
        let number = AccountNumber::parse(input).unwrap();
        assert_eq!(number.as_str(), input);
        assert_eq!(number.to_string(), input);
    }

    #[rstest]
    #[case::too_short("123")]
    #[case::too_long("12345")]
    #[case::letters("12a4")]
    #[case::empty("")]
    #[case::sign("-123")]
    #[case::unicode_digits("١٢٣٤")]
    fn test_account_number_rejects_malformed(#[case] input: &str) {
        assert_eq!(
            AccountNumber::parse(input),
            Err(AtmError::invalid_account_number(input))
        );
    }

    #[rstest]
    #[case::too_short("999")]
    #[case::letters("abcd")]
    #[case::spaces("12 4")]
    fn test_pin_rejects_malformed(#[case] input: &str) {
        assert_eq!(Pin::parse(input), Err(AtmError::InvalidPin));
    }

    #[test]
    fn test_pin_debug_is_masked() {
        let pin = Pin::parse("4321").unwrap();
        assert_eq!(format!("{:?}", pin), "Pin(****)");
        assert_eq!(pin.as_str(), "4321");
    }

    #[test]
    fn test_account_numbers_order_lexically() {
        let mut numbers: Vec<AccountNumber> = ["9000", "0042", "1234"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        numbers.sort();

        let ordered: Vec<&str> = numbers.iter().map(AccountNumber::as_str).collect();
        assert_eq!(ordered, vec!["0042", "1234", "9000"]);
    }
}
