//! Lenient parsing of user-entered amounts.
//!
//! Form and file input may contain thousands separators in either western
//! (`1,200,000`) or Indian (`12,00,000`) grouping, a leading rupee sign, or
//! nothing at all. Anything that still fails to parse counts as zero.

use std::fmt;

use rust_decimal::Decimal;
use serde::Deserializer;
use serde::de::{self, Visitor};
use thiserror::Error;
use tracing::warn;

/// Error returned when a string cannot be parsed as a [`Decimal`].
#[derive(Debug, Error)]
#[error("invalid amount '{input}': {source}")]
pub struct ParseDecimalError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Trims whitespace and drops `,` separators and a leading `₹`.
fn normalize_amount(s: &str) -> String {
    let trimmed = s.trim();
    let trimmed = trimmed
        .strip_prefix('₹')
        .or_else(|| trimmed.strip_prefix("Rs."))
        .unwrap_or(trimmed);
    trimmed.trim().replace(',', "")
}

/// Parses an amount, treating empty input as zero.
///
/// ```
/// use rust_decimal_macros::dec;
/// use itax_data::parse_decimal;
///
/// assert_eq!(parse_decimal("12,00,000").unwrap(), dec!(1200000));
/// assert_eq!(parse_decimal("₹ 1,50,000.50").unwrap(), dec!(150000.50));
/// assert_eq!(parse_decimal("").unwrap(), dec!(0));
/// assert!(parse_decimal("twelve").is_err());
/// ```
pub fn parse_decimal(s: &str) -> Result<Decimal, ParseDecimalError> {
    let normalized = normalize_amount(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|source| ParseDecimalError {
        input: s.to_string(),
        source,
    })
}

/// Parses an amount, falling back to zero for unparsable or negative input.
pub fn parse_decimal_or_zero(s: &str) -> Decimal {
    match parse_decimal(s) {
        Ok(value) if value < Decimal::ZERO => {
            warn!(input = %s, "negative amount; using zero");
            Decimal::ZERO
        }
        Ok(value) => value,
        Err(e) => {
            warn!(input = %s, "{e}; using zero");
            Decimal::ZERO
        }
    }
}

/// Parses a yes/no flag. Unrecognised text is `false`.
pub fn parse_flag(s: &str) -> bool {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => true,
        "false" | "no" | "n" | "0" | "" => false,
        other => {
            warn!(input = %other, "unrecognised flag; using false");
            false
        }
    }
}

struct AmountVisitor;

impl Visitor<'_> for AmountVisitor {
    type Value = Decimal;

    fn expecting(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str("an amount as a number or string")
    }

    fn visit_str<E: de::Error>(
        self,
        v: &str,
    ) -> Result<Decimal, E> {
        Ok(parse_decimal_or_zero(v))
    }

    fn visit_i64<E: de::Error>(
        self,
        v: i64,
    ) -> Result<Decimal, E> {
        Ok(parse_decimal_or_zero(&v.to_string()))
    }

    fn visit_u64<E: de::Error>(
        self,
        v: u64,
    ) -> Result<Decimal, E> {
        Ok(Decimal::from(v))
    }

    // Display of an f64 is its shortest round-trip form, so 0.1 stays 0.1.
    fn visit_f64<E: de::Error>(
        self,
        v: f64,
    ) -> Result<Decimal, E> {
        Ok(parse_decimal_or_zero(&v.to_string()))
    }

    fn visit_bool<E: de::Error>(
        self,
        v: bool,
    ) -> Result<Decimal, E> {
        warn!(input = v, "boolean where an amount was expected; using zero");
        Ok(Decimal::ZERO)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Decimal, E> {
        Ok(Decimal::ZERO)
    }
}

/// Serde `deserialize_with` helper for amounts.
///
/// Accepts numbers or strings; anything unparsable becomes zero.
pub fn deserialize_amount<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(AmountVisitor)
}

struct FlagVisitor;

impl Visitor<'_> for FlagVisitor {
    type Value = bool;

    fn expecting(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str("a yes/no flag")
    }

    fn visit_bool<E: de::Error>(
        self,
        v: bool,
    ) -> Result<bool, E> {
        Ok(v)
    }

    fn visit_i64<E: de::Error>(
        self,
        v: i64,
    ) -> Result<bool, E> {
        Ok(v != 0)
    }

    fn visit_u64<E: de::Error>(
        self,
        v: u64,
    ) -> Result<bool, E> {
        Ok(v != 0)
    }

    fn visit_str<E: de::Error>(
        self,
        v: &str,
    ) -> Result<bool, E> {
        Ok(parse_flag(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<bool, E> {
        Ok(false)
    }
}

/// Serde `deserialize_with` helper for yes/no flags.
pub fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(FlagVisitor)
}
