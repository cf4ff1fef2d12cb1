//! Forgiving field decoders for spreadsheet-backed payloads.
//!
//! Blank cells arrive as `null` or `""`, some numbers arrive as strings.
//! All of those decode to a number; anything else is a decode error.

use serde::de::{self, Deserialize, Deserializer};
use serde_json::Value;

fn number(value: Option<Value>) -> Result<f64, String> {
    match value {
        None | Some(Value::Null) => Ok(0.0),
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| format!("number out of range: {}", n)),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            let trimmed = trimmed.strip_suffix('%').unwrap_or(trimmed).trim_end();
            if trimmed.is_empty() {
                return Ok(0.0);
            }
            trimmed
                .parse::<f64>()
                .map_err(|_| format!("expected a number, got \"{}\"", s))
        }
        Some(other) => Err(format!("expected a number, got {}", other)),
    }
}

/// Decodes a percentage (any finite number).
pub(super) fn percent<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = number(Option::<Value>::deserialize(deserializer)?).map_err(de::Error::custom)?;
    if !value.is_finite() {
        return Err(de::Error::custom("percentage must be finite"));
    }
    Ok(value)
}

/// Decodes a whole count. Integral floats like `5.0` are accepted.
pub(super) fn count<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = number(Option::<Value>::deserialize(deserializer)?).map_err(de::Error::custom)?;
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(de::Error::custom(format!(
            "expected a whole number, got {}",
            value
        )));
    }
    // `i64::MAX as f64` rounds up to 2^63, which is already out of range.
    if value < i64::MIN as f64 || value >= i64::MAX as f64 {
        return Err(de::Error::custom(format!("count out of range: {}", value)));
    }
    Ok(value as i64)
}

/// Decodes a label; numbers are turned into their text form.
pub(super) fn label<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.trim().to_string()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(other) => Err(de::Error::custom(format!(
            "expected a branch name, got {}",
            other
        ))),
    }
}
