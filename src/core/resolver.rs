//! Secret resolution.
//!
//! A secret is looked up in a fixed order and the first readable source wins:
//!
//! 1. `{orchestrator_dir}/{name}` (lower-cased name, e.g. `/run/secrets/secret_key`)
//! 2. the file named by the `{NAME}_FILE` environment variable
//! 3. `{local_dir}/{name}.txt`, when a local secrets directory is configured
//! 4. the `{NAME}` environment variable
//! 5. the caller's default
//!
//! File contents are trimmed. The raw text is then coerced to the declared
//! [`SecretType`] and passed through the optional validator.

use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use zeroize::Zeroizing;

use crate::core::coerce::coerce;
use crate::core::config::Config;
use crate::core::constants::{FILE_POINTER_SUFFIX, LOCAL_SECRET_EXT, ORCHESTRATOR_SECRETS_DIR};
use crate::core::env::EnvSnapshot;
use crate::core::types::{SecretType, SecretValue};
use crate::core::validation::validate_name;
use crate::error::{Result, SecretError};

/// Predicate applied to a coerced secret. Returning `false` rejects it.
pub type Validator<'a> = Box<dyn Fn(&SecretValue) -> bool + 'a>;

/// A request for one secret.
///
/// ```
/// use secretgate::core::resolver::Secret;
/// use secretgate::core::types::SecretType;
///
/// let port = Secret::new("DATABASE_PORT")
///     .kind(SecretType::Int)
///     .with_default(5432);
/// ```
pub struct Secret<'a> {
    name: String,
    default: Option<String>,
    kind: SecretType,
    required: bool,
    validator: Option<Validator<'a>>,
}

impl<'a> Secret<'a> {
    /// An optional string secret with no default.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: None,
            kind: SecretType::String,
            required: false,
            validator: None,
        }
    }

    /// Value used when no source has the secret, before coercion.
    pub fn with_default(mut self, default: impl ToString) -> Self {
        self.default = Some(default.to_string());
        self
    }

    pub fn kind(mut self, kind: SecretType) -> Self {
        self.kind = kind;
        self
    }

    /// Fail instead of returning `None` when no source has the secret.
    ///
    /// Also makes read errors on existing secret files fatal.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn validate(mut self, validator: impl Fn(&SecretValue) -> bool + 'a) -> Self {
        self.validator = Some(Box::new(validator));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_required(&self) -> bool {
        self.required
    }
}

impl fmt::Debug for Secret<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secret")
            .field("name", &self.name)
            .field("has_default", &self.default.is_some())
            .field("kind", &self.kind)
            .field("required", &self.required)
            .field("has_validator", &self.validator.is_some())
            .finish()
    }
}

/// Where a secret's raw value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    OrchestratorFile(PathBuf),
    FilePointer { var: String, path: PathBuf },
    LocalFile(PathBuf),
    EnvVar(String),
    Default,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OrchestratorFile(path) => write!(f, "orchestrator file {}", path.display()),
            Self::FilePointer { var, path } => write!(f, "${} -> {}", var, path.display()),
            Self::LocalFile(path) => write!(f, "local file {}", path.display()),
            Self::EnvVar(var) => write!(f, "environment variable ${}", var),
            Self::Default => f.write_str("default value"),
        }
    }
}

/// A resolved secret together with its source.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    pub value: SecretValue,
    pub source: Source,
}

/// Resolves secrets against an injected environment snapshot.
#[derive(Debug, Clone)]
pub struct Resolver {
    env: EnvSnapshot,
    orchestrator_dir: PathBuf,
    local_dir: Option<PathBuf>,
}

impl Resolver {
    /// Resolver using `/run/secrets` and no local secrets directory.
    pub fn new(env: EnvSnapshot) -> Self {
        Self {
            env,
            orchestrator_dir: PathBuf::from(ORCHESTRATOR_SECRETS_DIR),
            local_dir: None,
        }
    }

    /// Resolver using the directories from a project config rooted at `root`.
    pub fn from_config(env: EnvSnapshot, config: &Config, root: &Path) -> Self {
        Self::new(env)
            .with_orchestrator_dir(&config.paths.orchestrator_dir)
            .with_local_dir(config.local_dir(root))
    }

    pub fn with_orchestrator_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.orchestrator_dir = dir.into();
        self
    }

    pub fn with_local_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.local_dir = Some(dir.into());
        self
    }

    pub fn env(&self) -> &EnvSnapshot {
        &self.env
    }

    /// Resolve a secret to its coerced value.
    ///
    /// Returns `Ok(None)` when the secret is optional and absent everywhere.
    ///
    /// # Errors
    ///
    /// - `ConfigError::InvalidName` if the name is not an environment variable name
    /// - `SecretError::NotFound` if a required secret is absent everywhere
    /// - `SecretError::Read` if a required secret's file exists but cannot be read
    /// - `SecretError::Parse` if the value cannot be coerced
    /// - `SecretError::Validation` if the validator rejects the value
    pub fn resolve(&self, secret: &Secret<'_>) -> Result<Option<SecretValue>> {
        Ok(self.resolve_with_source(secret)?.map(|r| r.value))
    }

    /// Like [`resolve`](Self::resolve), also reporting which source was used.
    ///
    /// # Errors
    ///
    /// Same as [`resolve`](Self::resolve).
    pub fn resolve_with_source(&self, secret: &Secret<'_>) -> Result<Option<Resolved>> {
        let name = secret.name.as_str();
        validate_name(name)?;

        let (source, raw) = match self.lookup(name, secret.required)? {
            Some(found) => found,
            None => match &secret.default {
                Some(default) => (Source::Default, Zeroizing::new(default.clone())),
                None if secret.required => {
                    return Err(SecretError::NotFound {
                        name: name.to_string(),
                        attempted: self.attempted(name),
                    }
                    .into());
                }
                None => {
                    warn!(secret = name, "secret not found, leaving unset");
                    return Ok(None);
                }
            },
        };
        info!(secret = name, source = %source, "secret loaded");

        let value = coerce(name, &raw, secret.kind)?;

        if let Some(validator) = &secret.validator {
            if !validator(&value) {
                return Err(SecretError::Validation {
                    name: name.to_string(),
                }
                .into());
            }
        }

        match &value {
            SecretValue::Bool(_) | SecretValue::Int(_) => {
                debug!(secret = name, value = %value.reveal(), "secret coerced");
            }
            _ => debug!(secret = name, kind = %value.kind(), "secret coerced"),
        }

        Ok(Some(Resolved { value, source }))
    }

    /// An optional string secret.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid names.
    pub fn read(&self, name: &str) -> Result<Option<String>> {
        Ok(self
            .resolve(&Secret::new(name))?
            .and_then(SecretValue::into_string))
    }

    /// A required string secret.
    ///
    /// # Errors
    ///
    /// Returns `SecretError::NotFound` if no source has the secret.
    pub fn require(&self, name: &str) -> Result<String> {
        let value = self.resolve(&Secret::new(name).required())?;
        value
            .and_then(SecretValue::into_string)
            .ok_or_else(|| {
                SecretError::NotFound {
                    name: name.to_string(),
                    attempted: self.attempted(name),
                }
                .into()
            })
    }

    /// Human-readable list of every location tried for `name`.
    pub fn attempted(&self, name: &str) -> Vec<String> {
        let pointer = pointer_var(name);
        let mut attempted = vec![format!(
            "orchestrator secret file: {}",
            self.orchestrator_path(name).display()
        )];

        match self.env.get(&pointer) {
            Some(target) => attempted.push(format!("file pointer: ${} -> {}", pointer, target)),
            None => attempted.push(format!("file pointer: ${} (unset)", pointer)),
        }

        if let Some(path) = self.local_path(name) {
            attempted.push(format!("local secret file: {}", path.display()));
        }

        attempted.push(format!("environment variable: ${}", name));
        attempted
    }

    fn orchestrator_path(&self, name: &str) -> PathBuf {
        self.orchestrator_dir.join(name.to_lowercase())
    }

    fn local_path(&self, name: &str) -> Option<PathBuf> {
        self.local_dir.as_ref().map(|dir| {
            dir.join(format!("{}.{}", name.to_lowercase(), LOCAL_SECRET_EXT))
        })
    }

    fn lookup(&self, name: &str, required: bool) -> Result<Option<(Source, Zeroizing<String>)>> {
        let orchestrator = self.orchestrator_path(name);
        if let Some(raw) = read_secret_file(name, &orchestrator, required)? {
            return Ok(Some((Source::OrchestratorFile(orchestrator), raw)));
        }

        let pointer = pointer_var(name);
        if let Some(target) = self.env.get(&pointer) {
            let path = PathBuf::from(target);
            match read_secret_file(name, &path, required)? {
                Some(raw) => {
                    return Ok(Some((Source::FilePointer { var: pointer, path }, raw)));
                }
                None if matches!(path.try_exists(), Ok(false)) => {
                    warn!(
                        secret = name,
                        var = %pointer,
                        path = %path.display(),
                        "file pointer names a missing file"
                    );
                }
                None => {}
            }
        }

        if let Some(local) = self.local_path(name) {
            if let Some(raw) = read_secret_file(name, &local, required)? {
                return Ok(Some((Source::LocalFile(local), raw)));
            }
        }

        if let Some(value) = self.env.get(name) {
            return Ok(Some((
                Source::EnvVar(name.to_string()),
                Zeroizing::new(value.to_string()),
            )));
        }

        Ok(None)
    }
}

fn pointer_var(name: &str) -> String {
    format!("{}{}", name, FILE_POINTER_SUFFIX)
}

/// Read and trim a secret file.
///
/// A missing file is `None`. Any other read failure is a warning and
/// `None`, or an error when the secret is required.
fn read_secret_file(name: &str, path: &Path, required: bool) -> Result<Option<Zeroizing<String>>> {
    match std::fs::read_to_string(path) {
        Ok(contents) => {
            let contents = Zeroizing::new(contents);
            Ok(Some(Zeroizing::new(contents.trim().to_string())))
        }
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) if required => Err(SecretError::Read {
            name: name.to_string(),
            path: path.to_path_buf(),
            source,
        }
        .into()),
        Err(err) => {
            warn!(
                secret = name,
                path = %path.display(),
                error = %err,
                "failed to read secret file, trying next source"
            );
            Ok(None)
        }
    }
}
