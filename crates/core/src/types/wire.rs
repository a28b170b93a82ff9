//! Lenient JSON helpers for campaign payloads.
//!
//! The frontend and the Google Ads REST API both send numeric fields either
//! as JSON numbers or as numeric strings (`"4.65"`, `"45230"`). These helpers
//! accept both shapes and reject anything that is not a finite number.

use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

/// A JSON value that is either a number or a string holding one.
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(serde_json::Number),
    Text(String),
}

fn parse_f64<E: serde::de::Error>(value: NumberOrString) -> Result<f64, E> {
    let parsed = match value {
        NumberOrString::Number(n) => n
            .as_f64()
            .ok_or_else(|| E::custom(format!("number out of range: {n}")))?,
        NumberOrString::Text(s) => {
            let trimmed = s.trim();
            // Matches the frontend's `parseFloat(x || 0)` for blank values
            if trimmed.is_empty() {
                return Ok(0.0);
            }
            trimmed
                .parse::<f64>()
                .map_err(|_| E::custom(format!("invalid number: {s:?}")))?
        }
    };

    if parsed.is_finite() {
        Ok(parsed)
    } else {
        Err(E::custom("number must be finite"))
    }
}

/// Deserialize an optional `f64` from a number, a numeric string, or `null`.
///
/// # Errors
///
/// Returns an error for non-numeric strings and non-finite values.
pub fn opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<NumberOrString>::deserialize(deserializer)?
        .map(parse_f64)
        .transpose()
}

/// Deserialize an optional non-negative `f64` (amounts, conversions, rates).
///
/// # Errors
///
/// Returns the errors of [`opt_f64`], and an error for negative values.
pub fn opt_non_negative_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match opt_f64(deserializer)? {
        Some(value) if value < 0.0 => Err(D::Error::custom(format!(
            "expected non-negative number, got {value}"
        ))),
        other => Ok(other),
    }
}

/// Deserialize an optional non-negative integer counter.
///
/// Fractional values are rejected; Google Ads reports counters as
/// integer strings.
///
/// # Errors
///
/// Returns an error for negative, fractional, or non-numeric values.
pub fn opt_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(value) = Option::<NumberOrString>::deserialize(deserializer)? else {
        return Ok(None);
    };

    match value {
        NumberOrString::Number(n) => n
            .as_u64()
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("expected non-negative integer, got {n}"))),
        NumberOrString::Text(s) if s.trim().is_empty() => Ok(Some(0)),
        NumberOrString::Text(s) => s
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("invalid counter: {s:?}"))),
    }
}

/// Deserialize an optional identifier given as a string or a number.
///
/// # Errors
///
/// Returns an error if the value is neither a string nor a number.
pub fn opt_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<NumberOrString>::deserialize(deserializer)?.map(|value| match value {
            NumberOrString::Number(n) => n.to_string(),
            NumberOrString::Text(s) => s,
        }),
    )
}

/// Round to two decimal places for presentation.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Serialize an `f64` rounded to two decimal places.
///
/// # Errors
///
/// Propagates serializer errors.
#[allow(clippy::trivially_copy_pass_by_ref)] // serde's serialize_with signature
pub fn serialize_rounded<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_f64(round2(*value))
}
