//! Monetary and day-count normalization.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Parses operator-entered text into a non-negative amount.
///
/// Empty, non-numeric and negative input all normalize to zero; input is
/// never rejected. Plain decimals and scientific notation are accepted.
///
/// # Examples
///
/// ```
/// use payslip_engine::format::parse_amount;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_amount("1250.50"), Decimal::new(125050, 2));
/// assert_eq!(parse_amount(" 42 "), Decimal::new(42, 0));
/// assert_eq!(parse_amount("abc"), Decimal::ZERO);
/// assert_eq!(parse_amount(""), Decimal::ZERO);
/// ```
pub fn parse_amount(raw: &str) -> Decimal {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Decimal::ZERO;
    }

    let parsed = Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .unwrap_or(Decimal::ZERO);

    normalize_amount(parsed)
}

/// Clamps an amount to the non-negative domain of the salary components.
pub fn normalize_amount(value: Decimal) -> Decimal {
    if value.is_sign_negative() {
        Decimal::ZERO
    } else {
        value
    }
}

/// Rounds a monetary value to two decimal places, midpoints away from zero.
pub fn round_money(value: Decimal) -> Decimal {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    // -0.00 would otherwise render with a sign
    if rounded.is_zero() {
        Decimal::ZERO
    } else {
        rounded
    }
}

/// Renders a monetary value with exactly two decimal places.
///
/// # Examples
///
/// ```
/// use payslip_engine::format::format_money;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_money(Decimal::new(30000, 0)), "30000.00");
/// assert_eq!(format_money(Decimal::new(12345, 3)), "12.35");
/// assert_eq!(format_money(Decimal::new(-5, 1)), "-0.50");
/// ```
pub fn format_money(value: Decimal) -> String {
    format!("{:.2}", round_money(value))
}

/// Parses an attendance counter, treating anything that is not a
/// non-negative integer as zero.
pub fn parse_count(raw: &str) -> u32 {
    raw.trim().parse::<u32>().unwrap_or(0)
}

/// Renders a day count: whole numbers without decimals, fractional counts
/// with one decimal place.
///
/// # Examples
///
/// ```
/// use payslip_engine::format::format_days;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_days(Decimal::new(22, 0)), "22");
/// assert_eq!(format_days(Decimal::new(225, 1)), "22.5");
/// ```
pub fn format_days(days: Decimal) -> String {
    if days.fract().is_zero() {
        days.trunc().normalize().to_string()
    } else {
        format!("{:.1}", days.round_dp(1))
    }
}

/// Deserializes a salary amount from a number, numeric string, or null.
pub(crate) fn deserialize_amount<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(number)) => parse_amount(&number.to_string()),
        Some(Value::String(text)) => parse_amount(&text),
        _ => Decimal::ZERO,
    })
}

/// Deserializes an attendance counter from a number, numeric string, or null.
pub(crate) fn deserialize_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(number)) => number
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(0),
        Some(Value::String(text)) => parse_count(&text),
        _ => 0,
    })
}

/// Deserializes an optional text field. Empty strings become `None`;
/// numbers are kept as their textual form.
pub(crate) fn deserialize_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(text)) if !text.is_empty() => Some(text),
        Some(Value::Number(number)) => Some(number.to_string()),
        _ => None,
    })
}
