//! Secretgate - resolve and validate application secrets before startup.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── get           # Resolve one secret
//! │   ├── check         # Load and validate all settings
//! │   ├── audit         # Audit the secrets directory
//! │   ├── diagnose      # .env load-order diagnostic
//! │   ├── env           # Print the detected environment
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── resolver      # Source precedence and resolution
//!     ├── coerce        # Type coercion of raw values
//!     ├── types         # Type tags and typed values
//!     ├── validation    # Secret key and URL validators
//!     ├── environment   # Deployment environment classification
//!     ├── env           # Read-only environment snapshots
//!     ├── dotenv        # .env parsing
//!     ├── settings      # Application settings bootstrap
//!     ├── audit         # Secrets directory audit
//!     ├── diagnose      # Load-order diagnostic
//!     └── config        # secretgate.toml
//! ```
//!
//! # Resolution order
//!
//! 1. `/run/secrets/<name>` (orchestrator-mounted file)
//! 2. the file named by `<NAME>_FILE`
//! 3. `secrets/<name>.txt`, when a local directory is configured
//! 4. the `<NAME>` environment variable
//! 5. the caller's default
//!
//! ```no_run
//! use secretgate::core::env::EnvSnapshot;
//! use secretgate::core::environment::Environment;
//! use secretgate::core::resolver::Resolver;
//! use secretgate::core::settings::Settings;
//!
//! # fn main() -> secretgate::error::Result<()> {
//! let env = EnvSnapshot::from_process();
//! let environment = Environment::from_snapshot(&env);
//! let settings = Settings::load(&Resolver::new(env), environment)?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod core;
pub mod error;
