//! Conversion of raw secret text into typed values.

use crate::core::constants::TRUTHY_VALUES;
use crate::core::types::{SecretType, SecretValue};
use crate::error::{Result, SecretError};

/// Coerce a raw secret string into the declared type.
///
/// # Errors
///
/// Returns `SecretError::Parse` if the value is not a valid integer or JSON
/// document. String, boolean and list coercion never fail.
pub fn coerce(name: &str, raw: &str, kind: SecretType) -> Result<SecretValue> {
    let value = match kind {
        SecretType::String => SecretValue::String(raw.to_string()),
        SecretType::Bool => SecretValue::Bool(parse_bool(raw)),
        SecretType::Int => {
            let parsed = raw.trim().parse::<i64>().map_err(|e| SecretError::Parse {
                name: name.to_string(),
                kind: kind.as_str(),
                reason: e.to_string(),
            })?;
            SecretValue::Int(parsed)
        }
        SecretType::List => SecretValue::List(parse_list(raw)),
        SecretType::Json => {
            let parsed = serde_json::from_str(raw).map_err(|e| SecretError::Parse {
                name: name.to_string(),
                kind: kind.as_str(),
                reason: e.to_string(),
            })?;
            SecretValue::Json(parsed)
        }
    };

    Ok(value)
}

fn parse_bool(raw: &str) -> bool {
    let lowered = raw.to_lowercase();
    TRUTHY_VALUES.contains(&lowered.as_str())
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}
