//! Secrets directory audit.
//!
//! Checks the on-disk secrets layout of a project: directory and file
//! permissions, file contents, the presence of `.env`, and whether the
//! secrets directory is excluded from version control.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::config::{AuditedSecret, Config};
use crate::core::constants::{GITIGNORE_SECRETS_ENTRY, SECRETS_DIR_MODE, SECRET_FILE_MODES};
use crate::core::validation::insecure_pattern;

/// Severity level for audit findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// The check passed.
    Pass,
    /// Not fatal, but should be fixed.
    Warning,
    /// Must be fixed before deploying.
    Error,
}

/// A single audit result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    /// What was checked (a file name or directory).
    pub subject: String,
    pub message: String,
    pub severity: Severity,
    /// Command that fixes the problem, if there is one.
    pub fix: Option<String>,
}

impl Finding {
    fn pass(subject: &str, message: impl Into<String>) -> Self {
        Self::new(subject, message, Severity::Pass)
    }

    fn warning(subject: &str, message: impl Into<String>) -> Self {
        Self::new(subject, message, Severity::Warning)
    }

    fn error(subject: &str, message: impl Into<String>) -> Self {
        Self::new(subject, message, Severity::Error)
    }

    fn new(subject: &str, message: impl Into<String>, severity: Severity) -> Self {
        Self {
            subject: subject.to_string(),
            message: message.into(),
            severity,
            fix: None,
        }
    }

    fn with_fix(mut self, fix: impl Into<String>) -> Self {
        self.fix = Some(fix.into());
        self
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}: {}", self.severity, self.subject, self.message)
    }
}

/// Outcome of an audit run.
#[derive(Debug, Clone, Default)]
pub struct Report {
    pub secrets_dir: PathBuf,
    pub findings: Vec<Finding>,
}

impl Report {
    /// True when no finding is an error. Warnings do not fail the audit.
    pub fn passed(&self) -> bool {
        self.errors().next().is_none()
    }

    pub fn errors(&self) -> impl Iterator<Item = &Finding> {
        self.with_severity(Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Finding> {
        self.with_severity(Severity::Warning)
    }

    fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(move |f| f.severity == severity)
    }
}

/// Audit the secrets layout of the project at `root`.
pub fn run(root: &Path, config: &Config) -> Report {
    let secrets_dir = config.local_dir(root);
    let dir_label = format!("{}/", config.paths.local_dir.display());
    let mut report = Report {
        secrets_dir: secrets_dir.clone(),
        findings: Vec::new(),
    };

    debug!(dir = %secrets_dir.display(), "auditing secrets directory");

    if !secrets_dir.is_dir() {
        report.findings.push(
            Finding::error(&dir_label, "directory does not exist").with_fix(format!(
                "mkdir {0} && chmod 700 {0}",
                config.paths.local_dir.display()
            )),
        );
        return report;
    }
    report
        .findings
        .push(Finding::pass(&dir_label, "directory exists"));

    #[cfg(unix)]
    report.findings.extend(check_mode(
        &secrets_dir,
        &dir_label,
        &[SECRETS_DIR_MODE],
    ));

    for secret in &config.audit.secrets {
        report
            .findings
            .extend(check_secret(&secrets_dir, &config.paths.local_dir, secret));
    }

    report.findings.push(check_env_file(&config.env_file(root)));
    report.findings.push(check_gitignore(root));

    debug!(
        findings = report.findings.len(),
        passed = report.passed(),
        "audit complete"
    );

    report
}

fn check_secret(dir: &Path, dir_name: &Path, secret: &AuditedSecret) -> Vec<Finding> {
    let subject = secret.file.as_str();
    let path = dir.join(&secret.file);
    let mut findings = Vec::new();

    if !path.is_file() {
        findings.push(Finding::error(subject, "file does not exist"));
        return findings;
    }
    if secret.description.is_empty() {
        findings.push(Finding::pass(subject, "file exists"));
    } else {
        findings.push(Finding::pass(
            subject,
            format!("file exists ({})", secret.description),
        ));
    }

    #[cfg(unix)]
    findings.extend(
        check_mode(&path, subject, SECRET_FILE_MODES).map(|f| {
            if f.severity == Severity::Warning {
                f.with_fix(format!("chmod 600 {}", dir_name.join(subject).display()))
            } else {
                f
            }
        }),
    );
    #[cfg(not(unix))]
    let _ = dir_name;

    let content = match std::fs::read_to_string(&path) {
        Ok(content) => zeroize::Zeroizing::new(content),
        Err(e) => {
            findings.push(Finding::error(subject, format!("cannot read file: {}", e)));
            return findings;
        }
    };
    let content = content.trim();

    if content.is_empty() {
        findings.push(Finding::error(subject, "file is empty"));
        return findings;
    }

    let length = content.chars().count();
    if length < secret.min_length {
        findings.push(Finding::error(
            subject,
            format!(
                "content too short (min: {}, actual: {})",
                secret.min_length, length
            ),
        ));
        return findings;
    }

    if length > secret.max_length {
        findings.push(Finding::warning(
            subject,
            format!(
                "content longer than recommended (max: {}, actual: {})",
                secret.max_length, length
            ),
        ));
    } else {
        findings.push(Finding::pass(
            subject,
            format!("length ok ({} characters)", length),
        ));
    }

    if secret.check_denylist {
        match insecure_pattern(content) {
            Some(pattern) => findings.push(Finding::error(
                subject,
                format!("contains insecure pattern '{}'", pattern),
            )),
            None => findings.push(Finding::pass(subject, "no insecure patterns")),
        }
    }

    findings
}

#[cfg(unix)]
fn check_mode(path: &Path, subject: &str, accepted: &[u32]) -> Option<Finding> {
    use crate::core::validation::file_mode;

    let expected = accepted
        .iter()
        .map(|mode| format!("{:o}", mode))
        .collect::<Vec<_>>()
        .join(" or ");

    let finding = match file_mode(path) {
        Ok(mode) if accepted.contains(&mode) => {
            Finding::pass(subject, format!("permissions {:o}", mode))
        }
        Ok(mode) => Finding::warning(
            subject,
            format!("permissions should be {} (actual: {:o})", expected, mode),
        )
        .with_fix(format!("chmod {:o} {}", accepted[0], path.display())),
        Err(e) => Finding::warning(subject, format!("could not check permissions: {}", e)),
    };

    Some(finding)
}

fn check_env_file(path: &Path) -> Finding {
    let subject = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| ".env".to_string());

    if path.exists() {
        Finding::pass(&subject, "file exists")
    } else {
        Finding::warning(&subject, "file does not exist (optional but recommended)")
    }
}

fn check_gitignore(root: &Path) -> Finding {
    let path = root.join(".gitignore");
    let subject = ".gitignore";

    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(_) => return Finding::warning(subject, "file not found"),
    };

    if content.contains(GITIGNORE_SECRETS_ENTRY) {
        Finding::pass(subject, format!("{} is ignored", GITIGNORE_SECRETS_ENTRY))
    } else {
        Finding::error(
            subject,
            format!(
                "{} is NOT ignored, secrets may be committed",
                GITIGNORE_SECRETS_ENTRY
            ),
        )
        .with_fix(format!("echo '{}' >> .gitignore", GITIGNORE_SECRETS_ENTRY))
    }
}
