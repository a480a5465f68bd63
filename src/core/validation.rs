//! Validation of secret names and resolved values.
//!
//! The `valid_*` functions are pure and total: they return a verdict and never
//! fail or touch the filesystem.

use std::fmt;

use crate::core::constants::{
    CACHE_URL_SCHEMES, DATABASE_URL_SCHEMES, DEFAULT_KEY_MIN_LENGTH, INSECURE_KEY_PATTERNS,
    PRODUCTION_KEY_MIN_LENGTH,
};
use crate::core::environment::Environment;
use crate::error::{ConfigError, Result};

/// Why a secret key was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyWeakness {
    Empty,
    TooShort { min: usize, actual: usize },
    InsecurePattern(&'static str),
}

impl fmt::Display for KeyWeakness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("key is empty"),
            Self::TooShort { min, actual } => write!(
                f,
                "must be at least {} characters (actual: {})",
                min, actual
            ),
            Self::InsecurePattern(pattern) => {
                write!(f, "contains insecure pattern '{}'", pattern)
            }
        }
    }
}

/// Minimum secret key length for an environment.
pub fn min_key_length(environment: Environment) -> usize {
    match environment {
        Environment::Production => PRODUCTION_KEY_MIN_LENGTH,
        Environment::Development | Environment::Staging => DEFAULT_KEY_MIN_LENGTH,
    }
}

/// First known-insecure pattern contained in `value`, ignoring case.
pub fn insecure_pattern(value: &str) -> Option<&'static str> {
    let lowered = value.to_lowercase();
    INSECURE_KEY_PATTERNS
        .iter()
        .copied()
        .find(|pattern| lowered.contains(pattern))
}

/// Check a secret key against the length and denylist rules.
///
/// # Errors
///
/// Returns the first [`KeyWeakness`] found.
pub fn check_secret_key(value: &str, environment: Environment) -> std::result::Result<(), KeyWeakness> {
    if value.is_empty() {
        return Err(KeyWeakness::Empty);
    }

    let min = min_key_length(environment);
    let actual = value.chars().count();
    if actual < min {
        return Err(KeyWeakness::TooShort { min, actual });
    }

    if let Some(pattern) = insecure_pattern(value) {
        return Err(KeyWeakness::InsecurePattern(pattern));
    }

    Ok(())
}

/// Whether `value` is strong enough to be the application secret key.
pub fn valid_secret_key(value: &str, environment: Environment) -> bool {
    check_secret_key(value, environment).is_ok()
}

/// Whether `value` is a database URL with an accepted scheme.
pub fn valid_database_url(value: &str) -> bool {
    has_scheme(value, DATABASE_URL_SCHEMES)
}

/// Whether `value` is a cache or broker URL with an accepted scheme.
pub fn valid_cache_url(value: &str) -> bool {
    has_scheme(value, CACHE_URL_SCHEMES)
}

fn has_scheme(value: &str, schemes: &[&str]) -> bool {
    !value.is_empty() && schemes.iter().any(|scheme| value.starts_with(scheme))
}

/// Validate a secret name.
///
/// Secret names must be valid environment variable names:
/// - Only A-Z, a-z, 0-9, and underscore
/// - Cannot start with a digit
/// - Cannot be empty
///
/// # Errors
///
/// Returns `ConfigError::InvalidName` if the name is invalid.
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(ConfigError::InvalidName {
            name: String::new(),
            reason: "name is empty".to_string(),
        }
        .into());
    }

    if let Some(first_char) = name.chars().next() {
        if first_char.is_ascii_digit() {
            return Err(ConfigError::InvalidName {
                name: name.to_string(),
                reason: "cannot start with a digit".to_string(),
            }
            .into());
        }
    }

    for (i, ch) in name.chars().enumerate() {
        if !ch.is_ascii_alphanumeric() && ch != '_' {
            return Err(ConfigError::InvalidName {
                name: name.to_string(),
                reason: format!(
                    "invalid character '{}' at position {}. Only letters, digits, and underscore are allowed",
                    ch,
                    i + 1
                ),
            }
            .into());
        }
    }

    Ok(())
}

/// Permission bits of a file or directory (Unix only).
///
/// # Errors
///
/// Returns an I/O error if the path cannot be stat'ed.
#[cfg(unix)]
pub fn file_mode(path: &std::path::Path) -> Result<u32> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = std::fs::metadata(path)?;
    Ok(metadata.permissions().mode() & 0o777)
}
