//! Error types for secretgate.
//!
//! Errors are grouped by concern: secret resolution failures live in
//! [`SecretError`], programmer and configuration mistakes in [`ConfigError`].

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Secret(#[from] SecretError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("secrets audit failed with {0} error(s)")]
    AuditFailed(usize),
}

/// Failures while resolving a single secret.
#[derive(Error, Debug)]
pub enum SecretError {
    /// No source produced a value for a required secret.
    #[error("required secret '{name}' not found in:\n{}", format_attempted(.attempted))]
    NotFound { name: String, attempted: Vec<String> },

    /// The raw value could not be coerced to the declared type.
    #[error("secret '{name}' is not a valid {kind}: {reason}")]
    Parse {
        name: String,
        kind: &'static str,
        reason: String,
    },

    /// The caller-supplied validator rejected the value.
    #[error("secret '{name}' failed validation")]
    Validation { name: String },

    /// An existing secret file could not be read.
    #[error("failed to read secret '{name}' from {}: {source}", .path.display())]
    Read {
        name: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Configuration and usage errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("unknown secret type '{0}' (expected one of: string, bool, int, list, json)")]
    UnknownSecretType(String),

    #[error("invalid secret name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("invalid config file: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("SECRET_KEY is too weak for {environment}: {reason}")]
    WeakSecretKey {
        environment: String,
        reason: String,
    },

    #[error("{field} has an unsupported scheme (expected {expected})")]
    InvalidUrl {
        field: &'static str,
        expected: &'static str,
    },
}

fn format_attempted(attempted: &[String]) -> String {
    attempted
        .iter()
        .map(|location| format!("  - {}", location))
        .collect::<Vec<_>>()
        .join("\n")
}

pub type Result<T> = std::result::Result<T, Error>;
