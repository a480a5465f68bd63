//! Secret type tags and typed secret values.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Declared target type of a secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SecretType {
    /// Raw text, unchanged.
    #[default]
    String,
    /// `true` for "true", "1", "yes", "on" (any case), `false` otherwise.
    Bool,
    /// Base-10 signed integer.
    Int,
    /// Comma-separated list, trimmed, empty items dropped.
    List,
    /// Any JSON value.
    Json,
}

impl SecretType {
    /// Name used in error messages and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::List => "list",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for SecretType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SecretType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "string" | "str" => Ok(Self::String),
            "bool" | "boolean" => Ok(Self::Bool),
            "int" | "integer" => Ok(Self::Int),
            "list" => Ok(Self::List),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::UnknownSecretType(s.to_string())),
        }
    }
}

/// A resolved, coerced secret.
#[derive(Clone, PartialEq)]
pub enum SecretValue {
    String(String),
    Bool(bool),
    Int(i64),
    List(Vec<String>),
    Json(serde_json::Value),
}

impl SecretValue {
    /// The type tag this value was coerced to.
    pub fn kind(&self) -> SecretType {
        match self {
            Self::String(_) => SecretType::String,
            Self::Bool(_) => SecretType::Bool,
            Self::Int(_) => SecretType::Int,
            Self::List(_) => SecretType::List,
            Self::Json(_) => SecretType::Json,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Json(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_string(self) -> Option<String> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn into_list(self) -> Option<Vec<String>> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Render the value for printing on stdout.
    ///
    /// Unlike `Debug`, this exposes string contents.
    pub fn reveal(&self) -> String {
        match self {
            Self::String(s) => s.clone(),
            Self::Bool(b) => b.to_string(),
            Self::Int(i) => i.to_string(),
            Self::List(items) => items.join(","),
            Self::Json(v) => v.to_string(),
        }
    }
}

// String-like contents stay out of logs and panic messages.
impl fmt::Debug for SecretValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(_) => f.write_str("String([redacted])"),
            Self::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Self::Int(i) => f.debug_tuple("Int").field(i).finish(),
            Self::List(items) => write!(f, "List([{} redacted])", items.len()),
            Self::Json(_) => f.write_str("Json([redacted])"),
        }
    }
}
