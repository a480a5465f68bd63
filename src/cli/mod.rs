//! Command-line interface.

pub mod audit;
pub mod check;
pub mod completions;
pub mod diagnose;
pub mod env;
pub mod get;
pub mod output;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::debug;

use crate::core::config::Config;
use crate::core::dotenv::DotEnv;
use crate::core::env::EnvSnapshot;
use crate::core::resolver::Resolver;
use crate::error::Result;

/// Secretgate - resolve and validate application secrets before startup.
#[derive(Parser)]
#[command(
    name = "secretgate",
    about = "Resolve and validate application secrets before startup",
    version
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Project root containing .env, secrets/ and secretgate.toml
    #[arg(long, global = true, env = "SECRETGATE_ROOT", default_value = ".")]
    pub root: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Resolve a single secret and print its value
    Get {
        /// Secret name (e.g., SECRET_KEY)
        name: String,
        /// Type to coerce to: string, bool, int, list, json
        #[arg(short = 't', long = "type", default_value = "string")]
        kind: String,
        /// Value used when no source has the secret
        #[arg(short, long)]
        default: Option<String>,
        /// Fail when no source has the secret
        #[arg(short, long)]
        required: bool,
    },

    /// Load and validate all application settings
    Check {
        /// Output the redacted settings as JSON
        #[arg(long)]
        json: bool,
    },

    /// Audit the secrets directory, permissions and .gitignore
    Audit,

    /// Show how .env loading affects the settings module
    Diagnose {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the detected deployment environment
    Env,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Shared state for commands operating on a project.
#[derive(Debug)]
pub struct Context {
    pub root: PathBuf,
    pub config: Config,
    process: EnvSnapshot,
}

impl Context {
    /// Load the project config under `root` and capture the process environment.
    ///
    /// # Errors
    ///
    /// Returns error if `secretgate.toml` exists but is invalid.
    pub fn load(root: &Path) -> Result<Self> {
        let config = Config::load(root)?;
        Ok(Self {
            root: root.to_path_buf(),
            config,
            process: EnvSnapshot::from_process(),
        })
    }

    /// The process environment as captured at startup, without `.env`.
    pub fn process_env(&self) -> &EnvSnapshot {
        &self.process
    }

    pub fn env_file(&self) -> PathBuf {
        self.config.env_file(&self.root)
    }

    /// The process environment with `.env` applied underneath it.
    ///
    /// # Errors
    ///
    /// Returns error if the `.env` file exists but cannot be read.
    pub fn snapshot(&self) -> Result<EnvSnapshot> {
        let snapshot = match DotEnv::load_optional(self.env_file())? {
            Some(dotenv) => self.process.overlay(&dotenv),
            None => self.process.clone(),
        };
        debug!(vars = snapshot.len(), "environment captured");
        Ok(snapshot)
    }

    /// A resolver over [`snapshot`](Self::snapshot) using the configured directories.
    ///
    /// # Errors
    ///
    /// Returns error if the `.env` file exists but cannot be read.
    pub fn resolver(&self) -> Result<Resolver> {
        Ok(Resolver::from_config(
            self.snapshot()?,
            &self.config,
            &self.root,
        ))
    }
}

/// Execute a command.
pub fn execute(cli: Cli) -> Result<()> {
    use Command::*;

    if let Completions { shell } = cli.command {
        return completions::execute(shell);
    }

    let ctx = Context::load(&cli.root)?;

    match cli.command {
        Get {
            name,
            kind,
            default,
            required,
        } => get::execute(&ctx, &name, &kind, default, required),
        Check { json } => check::execute(&ctx, json),
        Audit => audit::execute(&ctx),
        Diagnose { json } => diagnose::execute(&ctx, json),
        Env => env::execute(&ctx),
        Completions { .. } => Ok(()),
    }
}
