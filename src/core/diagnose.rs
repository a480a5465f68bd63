//! Environment load-order diagnostic.
//!
//! Shows what the watched variables look like before and after the `.env`
//! file is applied, and whether the default settings module would take over.
//! Useful when the settings module in `.env` appears to be ignored.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::core::constants::{DEFAULT_SETTINGS_MODULE, SETTINGS_MODULE_VAR};
use crate::core::dotenv::DotEnv;
use crate::core::env::EnvSnapshot;
use crate::core::environment::Environment;
use crate::error::Result;

/// Variables reported by the diagnostic. None of them are secrets.
pub const WATCHED_VARS: &[&str] = &[SETTINGS_MODULE_VAR, "DEBUG", "ALLOWED_HOSTS"];

/// Value of a watched variable at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VarState {
    pub name: &'static str,
    pub value: Option<String>,
}

/// Result of the load-order diagnostic.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnosis {
    pub env_file: PathBuf,
    pub env_file_exists: bool,
    pub before: Vec<VarState>,
    /// `.env` lines that set a watched variable, as `KEY=value`
    pub env_file_lines: Vec<String>,
    pub after: Vec<VarState>,
    /// True when the settings module is unset even after loading `.env`
    pub default_applied: bool,
    pub settings_module: String,
    pub environment: Environment,
}

/// Run the diagnostic against `process` with the dotenv file at `env_file`.
///
/// # Errors
///
/// Returns an I/O error if `env_file` exists but cannot be read.
pub fn run(env_file: &Path, process: &EnvSnapshot) -> Result<Diagnosis> {
    let before = watched(process);
    let dotenv = DotEnv::load_optional(env_file)?;

    let env_file_lines: Vec<String> = dotenv
        .as_ref()
        .map(|dotenv| {
            dotenv
                .entries()
                .iter()
                .filter(|(key, _)| WATCHED_VARS.contains(&key.as_str()))
                .map(|(key, value)| format!("{}={}", key, value))
                .collect()
        })
        .unwrap_or_default();

    let loaded = match &dotenv {
        Some(dotenv) => process.overlay(dotenv),
        None => process.clone(),
    };
    let after = watched(&loaded);

    let default_applied = !loaded.contains(SETTINGS_MODULE_VAR);
    let effective = loaded.with_default(SETTINGS_MODULE_VAR, DEFAULT_SETTINGS_MODULE);
    let settings_module = effective
        .get(SETTINGS_MODULE_VAR)
        .unwrap_or(DEFAULT_SETTINGS_MODULE)
        .to_string();
    let environment = Environment::classify(&settings_module);

    Ok(Diagnosis {
        env_file: env_file.to_path_buf(),
        env_file_exists: dotenv.is_some(),
        before,
        env_file_lines,
        after,
        default_applied,
        settings_module,
        environment,
    })
}

fn watched(env: &EnvSnapshot) -> Vec<VarState> {
    WATCHED_VARS
        .iter()
        .copied()
        .map(|name| VarState {
            name,
            value: env.get(name).map(String::from),
        })
        .collect()
}
