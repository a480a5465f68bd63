//! Deployment environment classification.

use std::fmt;

use serde::Serialize;
use tracing::{debug, warn};

use crate::core::constants::{DEFAULT_SETTINGS_MODULE, SETTINGS_MODULE_VAR};
use crate::core::env::EnvSnapshot;

/// Deployment environment, used to pick validation thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Staging,
    Production,
}

impl Environment {
    /// Classify a settings module path such as `config.settings.production`.
    ///
    /// Matching is case-insensitive and checks `production`, then `staging`,
    /// then `development`/`dev`. Anything else is development.
    pub fn classify(settings_module: &str) -> Self {
        let module = settings_module.to_lowercase();

        let environment = if module.contains("production") {
            Self::Production
        } else if module.contains("staging") {
            Self::Staging
        } else if module.contains("development") || module.contains("dev") {
            Self::Development
        } else {
            warn!(
                settings_module,
                "could not detect environment from settings module, using development"
            );
            Self::Development
        };

        debug!(settings_module, %environment, "classified environment");
        environment
    }

    /// Classify from the settings module variable in a snapshot.
    ///
    /// An unset variable falls back to the default development module.
    pub fn from_snapshot(env: &EnvSnapshot) -> Self {
        Self::classify(settings_module(env))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Staging => "staging",
            Self::Production => "production",
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The settings module named by the snapshot, or the development default.
pub fn settings_module(env: &EnvSnapshot) -> &str {
    env.get(SETTINGS_MODULE_VAR)
        .unwrap_or(DEFAULT_SETTINGS_MODULE)
}
