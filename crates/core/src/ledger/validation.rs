//! Parsing of raw text input from the presentation layer.
//!
//! Malformed text is a validation failure, never a panic.

use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

/// Most fractional digits an amount may carry.
pub const MAX_FRACTION_DIGITS: usize = 28;

/// Input validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Text is not a number.
    #[error("{field} must be a number, got '{input}'")]
    Malformed {
        /// Which input was rejected.
        field: &'static str,
        /// The raw text.
        input: String,
    },

    /// More fractional digits than a `Decimal` can hold.
    #[error("{field} has more than 28 decimal places, got '{input}'")]
    TooPrecise {
        /// Which input was rejected.
        field: &'static str,
        /// The raw text.
        input: String,
    },

    /// Recording the amount would push an account figure out of range.
    #[error("{field} of {value} is too large for this account")]
    Overflow {
        /// Which input was rejected.
        field: &'static str,
        /// The parsed value.
        value: Decimal,
    },

    /// Amount is zero or negative.
    #[error("{field} must be positive, got {value}")]
    NotPositive {
        /// Which input was rejected.
        field: &'static str,
        /// The parsed value.
        value: Decimal,
    },
}

/// Parses a strictly positive decimal amount.
///
/// # Errors
///
/// Returns `ValidationError::Malformed` for non-numeric text (exponents such
/// as `1e3` included), `ValidationError::TooPrecise` for more than
/// `MAX_FRACTION_DIGITS` decimal places and `ValidationError::NotPositive`
/// for zero or negative values.
pub fn parse_amount(field: &'static str, raw: &str) -> Result<Decimal, ValidationError> {
    let text = raw.trim();
    let fraction = text.split_once('.').map_or("", |(_, fraction)| fraction);
    if fraction.len() > MAX_FRACTION_DIGITS && fraction.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::TooPrecise {
            field,
            input: raw.to_string(),
        });
    }

    let value = Decimal::from_str(text).map_err(|_| ValidationError::Malformed {
        field,
        input: raw.to_string(),
    })?;

    if value <= Decimal::ZERO {
        return Err(ValidationError::NotPositive { field, value });
    }

    Ok(value)
}

/// Parses a PIN by numeric value, so `"0042"` and `"42"` are the same PIN.
///
/// Returns `None` for anything that is not a non-negative integer.
#[must_use]
pub fn parse_pin(raw: &str) -> Option<u32> {
    raw.trim().parse().ok()
}
