//! Secretgate - resolve and validate application secrets before startup.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use secretgate::cli::output;
use secretgate::cli::{execute, Cli};
use secretgate::core::constants::{LOG_ENV_VAR, LOG_FORMAT_VAR};
use secretgate::error::{ConfigError, Error, SecretError};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("secretgate=debug")
        } else {
            EnvFilter::new("secretgate=warn")
        }
    });

    let json = std::env::var(LOG_FORMAT_VAR).is_ok_and(|format| format == "json");

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| fmt::layer().json().with_writer(std::io::stderr)))
        .with((!json).then(|| {
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time()
        }))
        .init();

    if let Err(e) = execute(cli) {
        let error_msg = e.to_string();
        let suggestion = match &e {
            Error::Secret(SecretError::NotFound { .. }) => {
                Some("create the secret file or export the environment variable")
            }
            Error::Secret(SecretError::Read { .. }) => {
                Some("check the file permissions (chmod 600)")
            }
            Error::Config(ConfigError::WeakSecretKey { .. }) => {
                Some("generate a random key of at least 50 characters")
            }
            Error::Config(ConfigError::UnknownSecretType(_)) => {
                Some("use one of: string, bool, int, list, json")
            }
            _ => None,
        };

        output::error(&error_msg);
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
