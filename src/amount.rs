//! Decimal amounts as the backend sends them.
//!
//! Money crosses the API boundary as plain decimal text (`"-12.34"`), never as
//! a JSON float. This module is the only place that text turns into numbers:
//! [`parse_amount`] gives an `f64` for display and chart magnitudes, and
//! [`parse_decimal`] gives an exact [`Decimal`] for anything that adds amounts
//! together.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    #[error("Unparsable decimal amount: {raw:?}")]
    Unparsable { raw: String },

    #[error("Decimal overflow while summing amounts")]
    Overflow,
}

/// A decimal amount exactly as transmitted by the backend.
///
/// Any string is a valid `MoneyString`; whether it holds a usable number is
/// only known after parsing. Negative values are outflows, positive inflows.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MoneyString(String);

impl MoneyString {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Finite `f64` value, or `None` when the text is not a plain decimal.
    pub fn parse(&self) -> Option<f64> {
        parse_amount(&self.0)
    }

    pub fn to_decimal(&self) -> Result<Decimal, AmountError> {
        parse_decimal(&self.0)
    }
}

impl From<&str> for MoneyString {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl From<String> for MoneyString {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl fmt::Display for MoneyString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Optional sign, digits with an optional point. No grouping, no exponent.
fn wire_format() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)$").expect("static regex compiles")
    })
}

fn plain_decimal(raw: &str) -> Option<&str> {
    let trimmed = raw.trim_matches(|c: char| c.is_ascii_whitespace());
    wire_format().is_match(trimmed).then_some(trimmed)
}

/// Parse a backend decimal string for display or charting.
///
/// Returns `None` for empty input, free text, grouped or exponent notation,
/// `NaN`/`Infinity` tokens, and values too large to be finite.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let text = plain_decimal(raw)?;
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a backend decimal string exactly.
pub fn parse_decimal(raw: &str) -> Result<Decimal, AmountError> {
    let unparsable = || AmountError::Unparsable {
        raw: raw.to_string(),
    };
    let text = plain_decimal(raw).ok_or_else(unparsable)?;

    let (negative, digits) = match text.as_bytes()[0] {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };
    let mut normalized = String::with_capacity(digits.len() + 2);
    if negative {
        normalized.push('-');
    }
    if digits.starts_with('.') {
        normalized.push('0');
    }
    normalized.push_str(digits.strip_suffix('.').unwrap_or(digits));

    Decimal::from_str(&normalized).map_err(|_| unparsable())
}

/// Exact sum of a run of money strings. Fails on the first unparsable entry.
pub fn sum_decimals<'a, I>(amounts: I) -> Result<Decimal, AmountError>
where
    I: IntoIterator<Item = &'a MoneyString>,
{
    amounts.into_iter().try_fold(Decimal::ZERO, |acc, amount| {
        acc.checked_add(amount.to_decimal()?)
            .ok_or(AmountError::Overflow)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_decimals() {
        assert_eq!(parse_amount("-12.34"), Some(-12.34));
        assert_eq!(parse_amount("1000.00"), Some(1000.0));
        assert_eq!(parse_amount("0"), Some(0.0));
        assert_eq!(parse_amount("+5"), Some(5.0));
        assert_eq!(parse_amount(".5"), Some(0.5));
        assert_eq!(parse_amount("7."), Some(7.0));
        assert_eq!(parse_amount("  42.10 "), Some(42.1));
    }

    #[test]
    fn test_parse_rejects_non_numbers() {
        for raw in ["", " ", "abc", "NaN", "nan", "Infinity", "-Infinity", "inf", "-", "."] {
            assert_eq!(parse_amount(raw), None, "accepted {raw:?}");
        }
    }

    #[test]
    fn test_parse_rejects_formatted_numbers() {
        for raw in ["1,000.00", "1.000,00", "1e3", "0x10", "€12", "12 EUR", "1 000"] {
            assert_eq!(parse_amount(raw), None, "accepted {raw:?}");
        }
    }

    #[test]
    fn test_parse_rejects_overflowing_values() {
        let huge = format!("1{}", "0".repeat(400));
        assert_eq!(parse_amount(&huge), None);
    }

    #[test]
    fn test_parse_decimal_is_exact() {
        assert_eq!(parse_decimal("-12.34").unwrap(), Decimal::new(-1234, 2));
        assert_eq!(parse_decimal("+.5").unwrap(), Decimal::new(5, 1));
        assert_eq!(parse_decimal("7.").unwrap(), Decimal::new(7, 0));
        assert_eq!(parse_decimal("-.25").unwrap(), Decimal::new(-25, 2));
    }

    #[test]
    fn test_parse_decimal_reports_raw_input() {
        let err = parse_decimal("abc").unwrap_err();
        assert_eq!(err, AmountError::Unparsable { raw: "abc".to_string() });
        assert!(err.to_string().contains("\"abc\""));
    }

    #[test]
    fn test_sum_decimals_avoids_float_drift() {
        let amounts: Vec<MoneyString> = ["0.10", "0.20", "-0.30"].into_iter().map(Into::into).collect();
        assert_eq!(sum_decimals(&amounts).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_sum_decimals_stops_on_bad_entry() {
        let amounts: Vec<MoneyString> = ["1.00", "oops"].into_iter().map(Into::into).collect();
        assert!(matches!(sum_decimals(&amounts), Err(AmountError::Unparsable { .. })));
    }

    #[test]
    fn test_money_string_is_transparent_in_json() {
        let m: MoneyString = serde_json::from_str("\"-3.50\"").unwrap();
        assert_eq!(m.as_str(), "-3.50");
        assert_eq!(m.parse(), Some(-3.5));
        assert_eq!(serde_json::to_string(&m).unwrap(), "\"-3.50\"");
    }
}
