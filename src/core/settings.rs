//! Application settings bootstrap.
//!
//! Resolves every value the web application needs at startup and refuses to
//! continue when a secret is missing or too weak.

use std::fmt;

use serde::Serialize;
use tracing::{debug, error, info};

use crate::core::environment::Environment;
use crate::core::resolver::{Resolver, Secret};
use crate::core::types::{SecretType, SecretValue};
use crate::core::validation::{check_secret_key, valid_cache_url, valid_database_url};
use crate::error::{ConfigError, Result, SecretError};

const REDACTED: &str = "********";

/// Database connection settings.
#[derive(Clone, Serialize)]
pub struct Database {
    /// Full connection URL, when configured
    #[serde(serialize_with = "redact_option")]
    pub url: Option<String>,
    pub name: String,
    pub user: String,
    #[serde(serialize_with = "redact")]
    pub password: String,
    pub host: String,
    pub port: i64,
    /// Seconds to keep connections open
    pub conn_max_age: i64,
}

/// Settings resolved at application startup.
#[derive(Clone, Serialize)]
pub struct Settings {
    pub environment: Environment,
    #[serde(serialize_with = "redact")]
    pub secret_key: String,
    pub debug: bool,
    pub allowed_hosts: Vec<String>,
    pub cors_allowed_origins: Vec<String>,
    /// Accept any origin. Only ever true in development.
    pub cors_allow_all: bool,
    pub secure_ssl_redirect: bool,
    pub database: Database,
    #[serde(serialize_with = "redact")]
    pub cache_url: String,
    #[serde(serialize_with = "redact")]
    pub broker_url: String,
    pub log_level: String,
}

impl Settings {
    /// Resolve all settings for `environment`.
    ///
    /// # Errors
    ///
    /// Returns the first fatal resolution error. A weak `SECRET_KEY` is
    /// reported as `ConfigError::WeakSecretKey` naming the reason, and a bad
    /// cache, broker or database URL as `ConfigError::InvalidUrl`.
    pub fn load(resolver: &Resolver, environment: Environment) -> Result<Self> {
        info!(%environment, "loading settings");

        let secret_key = secret_key(resolver, environment)?;

        let debug = bool_setting(resolver, "DEBUG", false)?;

        let default_hosts = if environment == Environment::Development {
            "*"
        } else {
            "localhost,127.0.0.1"
        };
        let allowed_hosts = list_setting(resolver, "ALLOWED_HOSTS", default_hosts)?;
        let cors_allowed_origins = list_setting(resolver, "CORS_ALLOWED_ORIGINS", "")?;
        let secure_ssl_redirect =
            bool_setting(resolver, "SECURE_SSL_REDIRECT", environment.is_production())?;

        let database = Database {
            url: url_setting(
                resolver,
                "DATABASE_URL",
                None,
                valid_database_url,
                "postgresql://, postgres:// or sqlite://",
            )?,
            name: string_setting(resolver, "DATABASE_NAME", "10code_intranet")?,
            user: string_setting(resolver, "DATABASE_USER", "postgres")?,
            password: string_setting(resolver, "DATABASE_PASSWORD", "postgres")?,
            host: string_setting(resolver, "DATABASE_HOST", "localhost")?,
            port: int_setting(resolver, "DATABASE_PORT", 5432)?,
            conn_max_age: int_setting(resolver, "DATABASE_CONN_MAX_AGE", 60)?,
        };

        let cache_url = url_setting(
            resolver,
            "REDIS_URL",
            Some("redis://localhost:6379/0"),
            valid_cache_url,
            "redis:// or rediss://",
        )?
        .unwrap_or_default();
        let broker_url = url_setting(
            resolver,
            "CELERY_BROKER_URL",
            Some("redis://localhost:6379/1"),
            valid_cache_url,
            "redis:// or rediss://",
        )?
        .unwrap_or_default();

        let log_level = string_setting(resolver, "LOG_LEVEL", "INFO")?;

        let settings = Self {
            environment,
            secret_key,
            debug,
            allowed_hosts,
            cors_allowed_origins,
            cors_allow_all: environment == Environment::Development,
            secure_ssl_redirect,
            database,
            cache_url,
            broker_url,
            log_level,
        };
        debug!(debug = settings.debug, hosts = settings.allowed_hosts.len(), "settings loaded");

        Ok(settings)
    }

    /// Label/value pairs for display, with secrets redacted.
    pub fn summary(&self) -> Vec<(&'static str, String)> {
        vec![
            ("environment", self.environment.to_string()),
            ("secret key", format!("{} ({} chars)", REDACTED, self.secret_key.chars().count())),
            ("debug", self.debug.to_string()),
            ("allowed hosts", self.allowed_hosts.join(", ")),
            ("cors origins", display_list(&self.cors_allowed_origins)),
            ("cors allow all", self.cors_allow_all.to_string()),
            ("ssl redirect", self.secure_ssl_redirect.to_string()),
            (
                "database",
                format!(
                    "{}@{}:{}/{}",
                    self.database.user, self.database.host, self.database.port, self.database.name
                ),
            ),
            (
                "database url",
                match self.database.url {
                    Some(_) => REDACTED.to_string(),
                    None => "(not set)".to_string(),
                },
            ),
            ("conn max age", format!("{}s", self.database.conn_max_age)),
            ("cache", REDACTED.to_string()),
            ("broker", REDACTED.to_string()),
            ("log level", self.log_level.clone()),
        ]
    }
}

impl fmt::Debug for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Database")
            .field("url", &self.url.as_ref().map(|_| REDACTED))
            .field("name", &self.name)
            .field("user", &self.user)
            .field("password", &REDACTED)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("conn_max_age", &self.conn_max_age)
            .finish()
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.summary()).finish()
    }
}

fn secret_key(resolver: &Resolver, environment: Environment) -> Result<String> {
    let key = resolver
        .resolve(&Secret::new("SECRET_KEY").required())?
        .and_then(SecretValue::into_string)
        .unwrap_or_default();

    if let Err(weakness) = check_secret_key(&key, environment) {
        error!(%environment, reason = %weakness, "SECRET_KEY rejected");
        return Err(ConfigError::WeakSecretKey {
            environment: environment.to_string(),
            reason: weakness.to_string(),
        }
        .into());
    }

    Ok(key)
}

fn string_setting(resolver: &Resolver, name: &str, default: &str) -> Result<String> {
    let value = resolver.resolve(&Secret::new(name).with_default(default))?;
    Ok(value
        .and_then(SecretValue::into_string)
        .unwrap_or_else(|| default.to_string()))
}

fn bool_setting(resolver: &Resolver, name: &str, default: bool) -> Result<bool> {
    let value = resolver.resolve(&Secret::new(name).kind(SecretType::Bool).with_default(default))?;
    Ok(value.and_then(|v| v.as_bool()).unwrap_or(default))
}

fn int_setting(resolver: &Resolver, name: &str, default: i64) -> Result<i64> {
    let value = resolver.resolve(&Secret::new(name).kind(SecretType::Int).with_default(default))?;
    Ok(value.and_then(|v| v.as_int()).unwrap_or(default))
}

fn list_setting(resolver: &Resolver, name: &str, default: &str) -> Result<Vec<String>> {
    let value = resolver.resolve(&Secret::new(name).kind(SecretType::List).with_default(default))?;
    Ok(value.and_then(SecretValue::into_list).unwrap_or_default())
}

fn url_setting(
    resolver: &Resolver,
    name: &'static str,
    default: Option<&str>,
    check: fn(&str) -> bool,
    expected: &'static str,
) -> Result<Option<String>> {
    let mut secret = Secret::new(name).validate(move |v| v.as_str().is_some_and(check));
    if let Some(default) = default {
        secret = secret.with_default(default);
    }

    match resolver.resolve(&secret) {
        Ok(value) => Ok(value.and_then(SecretValue::into_string)),
        Err(crate::error::Error::Secret(SecretError::Validation { .. })) => {
            error!(setting = name, "unsupported URL scheme");
            Err(ConfigError::InvalidUrl {
                field: name,
                expected,
            }
            .into())
        }
        Err(e) => Err(e),
    }
}

fn display_list(items: &[String]) -> String {
    if items.is_empty() {
        "(none)".to_string()
    } else {
        items.join(", ")
    }
}

fn redact<S: serde::Serializer>(_: &str, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(REDACTED)
}

fn redact_option<S: serde::Serializer>(
    value: &Option<String>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    match value {
        Some(_) => serializer.serialize_str(REDACTED),
        None => serializer.serialize_none(),
    }
}
