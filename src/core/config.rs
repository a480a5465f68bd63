//! Project configuration.
//!
//! Handles reading the optional `secretgate.toml` file. Every field has a
//! default, so a project without the file behaves like the stock layout.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::constants;
use crate::error::{ConfigError, Result};

/// Project configuration stored in `secretgate.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Where secrets and the .env file live
    #[serde(default)]
    pub paths: Paths,
    /// Secrets checked by `secretgate audit`
    #[serde(default)]
    pub audit: AuditConfig,
}

/// Source locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Paths {
    /// Directory of orchestrator-mounted secret files
    #[serde(default = "default_orchestrator_dir")]
    pub orchestrator_dir: PathBuf,
    /// Project-local secrets directory, relative to the project root
    #[serde(default = "default_local_dir")]
    pub local_dir: PathBuf,
    /// Dotenv file, relative to the project root
    #[serde(default = "default_env_file")]
    pub env_file: PathBuf,
}

impl Default for Paths {
    fn default() -> Self {
        Self {
            orchestrator_dir: default_orchestrator_dir(),
            local_dir: default_local_dir(),
            env_file: default_env_file(),
        }
    }
}

fn default_orchestrator_dir() -> PathBuf {
    PathBuf::from(constants::ORCHESTRATOR_SECRETS_DIR)
}

fn default_local_dir() -> PathBuf {
    PathBuf::from(constants::LOCAL_SECRETS_DIR)
}

fn default_env_file() -> PathBuf {
    PathBuf::from(constants::ENV_FILE)
}

/// Audit manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuditConfig {
    #[serde(default = "default_audited_secrets")]
    pub secrets: Vec<AuditedSecret>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            secrets: default_audited_secrets(),
        }
    }
}

/// A secret file expected in the local secrets directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuditedSecret {
    /// File name inside the secrets directory
    pub file: String,
    /// Human description shown in the report
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_min_length")]
    pub min_length: usize,
    #[serde(default = "default_max_length")]
    pub max_length: usize,
    /// Reject known-insecure patterns
    #[serde(default)]
    pub check_denylist: bool,
}

fn default_min_length() -> usize {
    1
}

fn default_max_length() -> usize {
    100
}

fn default_audited_secrets() -> Vec<AuditedSecret> {
    vec![
        AuditedSecret {
            file: "secret_key.txt".to_string(),
            description: "Application SECRET_KEY".to_string(),
            min_length: constants::DEFAULT_KEY_MIN_LENGTH,
            max_length: 100,
            check_denylist: true,
        },
        AuditedSecret {
            file: "db_password.txt".to_string(),
            description: "PostgreSQL password".to_string(),
            min_length: 1,
            max_length: 100,
            check_denylist: false,
        },
    ]
}

impl Config {
    /// Path to the configuration file under `root`
    pub fn config_path(root: &Path) -> PathBuf {
        root.join(constants::CONFIG_FILE)
    }

    /// Load `secretgate.toml` from `root`, or defaults if it does not exist
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadFile` if the file exists but cannot be read,
    /// or `ConfigError::Parse` if the TOML is malformed.
    pub fn load(root: &Path) -> Result<Self> {
        let path = Self::config_path(root);
        debug!(path = %path.display(), "loading config");

        if !path.exists() {
            debug!("no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&path).map_err(ConfigError::ReadFile)?;
        let config: Self = toml::from_str(&contents).map_err(ConfigError::Parse)?;

        debug!(
            audited = config.audit.secrets.len(),
            "config loaded"
        );

        Ok(config)
    }

    /// Local secrets directory resolved against `root`
    pub fn local_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.paths.local_dir)
    }

    /// Dotenv file resolved against `root`
    pub fn env_file(&self, root: &Path) -> PathBuf {
        root.join(&self.paths.env_file)
    }
}
