//! Currency amount parsing
//!
//! Amounts are `Decimal` values with at most two decimal places. Balances may be
//! zero, transaction amounts must be strictly positive.

use super::error::AtmError;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Maximum number of decimal places accepted for an amount
pub const CURRENCY_SCALE: u32 = 2;

fn parse_decimal(input: &str) -> Result<Decimal, AtmError> {
    let trimmed = input.trim();
    let amount = Decimal::from_str(trimmed)
        .map_err(|_| AtmError::invalid_amount(trimmed, "not a number"))?;
    check_scale(amount, trimmed)?;
    Ok(amount)
}

// `10.50` and `10.500` are both fine, `10.005` is not
fn check_scale(amount: Decimal, shown: &str) -> Result<(), AtmError> {
    if amount.normalize().scale() > CURRENCY_SCALE {
        return Err(AtmError::invalid_amount(
            shown,
            "at most 2 decimal places allowed",
        ));
    }
    Ok(())
}

/// Parse an opening balance (zero allowed)
///
/// # Errors
///
/// Returns `AtmError::InvalidAmount` if the input is not a decimal number,
/// is negative or has more than two decimal places.
pub fn parse_balance(input: &str) -> Result<Decimal, AtmError> {
    let amount = parse_decimal(input)?;
    ensure_balance(amount)?;
    Ok(amount)
}

/// Parse a deposit or withdrawal amount (strictly positive)
///
/// # Errors
///
/// Returns `AtmError::InvalidAmount` if the input is not a decimal number,
/// is zero or negative, or has more than two decimal places.
pub fn parse_amount(input: &str) -> Result<Decimal, AtmError> {
    let amount = parse_decimal(input)?;
    ensure_positive(amount)?;
    Ok(amount)
}

/// Reject negative balances and balances finer than a cent
pub fn ensure_balance(balance: Decimal) -> Result<(), AtmError> {
    if balance < Decimal::ZERO {
        return Err(AtmError::invalid_amount(
            &balance.to_string(),
            "must not be negative",
        ));
    }
    check_scale(balance, &balance.to_string())
}

/// Reject zero, negative and sub-cent transaction amounts
pub fn ensure_positive(amount: Decimal) -> Result<(), AtmError> {
    if amount <= Decimal::ZERO {
        return Err(AtmError::invalid_amount(
            &amount.to_string(),
            "must be greater than zero",
        ));
    }
    check_scale(amount, &amount.to_string())
}
