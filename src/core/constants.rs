//! Constants used throughout secretgate.
//!
//! Centralizes magic strings and thresholds.

/// Directory where container orchestrators mount secret files.
pub const ORCHESTRATOR_SECRETS_DIR: &str = "/run/secrets";

/// Project-local secrets directory, relative to the project root.
pub const LOCAL_SECRETS_DIR: &str = "secrets";

/// Extension of files in the project-local secrets directory.
pub const LOCAL_SECRET_EXT: &str = "txt";

/// Suffix of the environment variable pointing at a secret file.
pub const FILE_POINTER_SUFFIX: &str = "_FILE";

/// Environment variables file name (.env).
pub const ENV_FILE: &str = ".env";

/// Optional project configuration file name.
pub const CONFIG_FILE: &str = "secretgate.toml";

/// Variable naming the settings module, used to classify the environment.
pub const SETTINGS_MODULE_VAR: &str = "DJANGO_SETTINGS_MODULE";

/// Settings module assumed when none is configured.
pub const DEFAULT_SETTINGS_MODULE: &str = "config.settings.development";

/// Log filter variable for the binary.
pub const LOG_ENV_VAR: &str = "SECRETGATE_LOG";

/// Set to `json` for machine-readable logs.
pub const LOG_FORMAT_VAR: &str = "SECRETGATE_LOG_FORMAT";

/// Lower-cased values coerced to boolean `true`.
pub const TRUTHY_VALUES: &[&str] = &["true", "1", "yes", "on"];

/// Minimum secret key length in production.
pub const PRODUCTION_KEY_MIN_LENGTH: usize = 50;

/// Minimum secret key length in development and staging.
pub const DEFAULT_KEY_MIN_LENGTH: usize = 30;

/// Known-insecure substrings rejected in secret keys (matched case-insensitively).
pub const INSECURE_KEY_PATTERNS: &[&str] = &[
    "django-insecure-",
    "change-me",
    "changeme",
    "your-secret-key",
    "yoursecretkey",
    "secret",
    "password",
    "12345",
];

/// Accepted database URL schemes.
pub const DATABASE_URL_SCHEMES: &[&str] = &["postgresql://", "postgres://", "sqlite://"];

/// Accepted cache and broker URL schemes (plain and TLS).
pub const CACHE_URL_SCHEMES: &[&str] = &["redis://", "rediss://"];

/// Gitignore entry that must exclude the local secrets directory.
pub const GITIGNORE_SECRETS_ENTRY: &str = "secrets/";

/// Expected mode of the local secrets directory.
pub const SECRETS_DIR_MODE: u32 = 0o700;

/// Accepted modes of individual secret files.
pub const SECRET_FILE_MODES: &[u32] = &[0o600, 0o400];
