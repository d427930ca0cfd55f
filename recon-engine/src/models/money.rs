//! Money parsing for collaborator-supplied numeric fields.
//!
//! Upstream queries deliver amounts as strings that may carry a currency
//! symbol and thousands separators. All monetary math uses `Decimal`; binary
//! floating point is never involved.

use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("invalid money value '{raw}'")]
pub struct MoneyParseError {
    pub raw: String,
}

/// Parse a monetary amount, tolerating a leading currency symbol and comma
/// separators.
pub fn parse_money(raw: &str) -> Result<Decimal, MoneyParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(MoneyParseError {
            raw: raw.to_string(),
        });
    }

    let (sign, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", trimmed),
    };
    let unsigned = unsigned
        .strip_prefix('$')
        .or_else(|| unsigned.strip_prefix('₹'))
        .unwrap_or(unsigned);
    let cleaned = format!("{}{}", sign, unsigned.replace(',', ""));

    Decimal::from_str(&cleaned).map_err(|_| MoneyParseError {
        raw: raw.to_string(),
    })
}

/// Parse a monetary amount, coercing anything unparseable to zero.
///
/// Used when decoding collaborator rows: one bad field must not blank a
/// dashboard, so amounts zero-default and the caller logs the coercion.
pub fn parse_money_lenient(raw: &str) -> Decimal {
    parse_money(raw).unwrap_or(Decimal::ZERO)
}
