//! Test support utilities for secretgate integration tests.
//!
//! Provides reusable project setup and helper commands.

#![allow(dead_code)]

pub mod assertions;
pub mod commands;
pub mod fixtures;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test project with isolated temp directories.
///
/// Each test gets its own project dir and its own stand-in for the
/// orchestrator secrets directory, wired together by a `secretgate.toml`.
/// No process-global state is mutated, child processes use `.current_dir()`
/// and a cleared environment so tests can safely run in parallel.
pub struct Test {
    /// Temporary directory for the test project
    pub dir: TempDir,
    /// Stand-in for `/run/secrets`
    pub orchestrator: TempDir,
}

impl Test {
    /// Create a new project with only a `secretgate.toml`.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let orchestrator = TempDir::new().expect("failed to create orchestrator dir");

        let config = format!(
            "[paths]\norchestrator_dir = '{}'\n",
            orchestrator.path().display()
        );
        fs::write(dir.path().join("secretgate.toml"), config).expect("failed to write config");

        Self { dir, orchestrator }
    }

    /// Create a project whose secrets layout passes the audit.
    pub fn secured() -> Self {
        let t = Self::new();
        t.local_secret("secret_key.txt", STRONG_KEY);
        t.local_secret("db_password.txt", "pg-password");
        t.write(".env", "DEBUG=false\n");
        t.write(".gitignore", ".env\nsecrets/\n");
        t
    }

    /// Path inside the project.
    pub fn path(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    /// Write a file inside the project.
    pub fn write(&self, rel: &str, contents: &str) -> PathBuf {
        let path = self.path(rel);
        fs::write(&path, contents).expect("failed to write project file");
        path
    }

    /// Write an orchestrator secret file.
    pub fn orchestrator_secret(&self, file: &str, contents: &str) -> PathBuf {
        let path = self.orchestrator.path().join(file);
        fs::write(&path, contents).expect("failed to write orchestrator secret");
        path
    }

    /// Write a file under `secrets/` with permissions 600, creating the
    /// directory with permissions 700.
    pub fn local_secret(&self, file: &str, contents: &str) -> PathBuf {
        let dir = self.path("secrets");
        fs::create_dir_all(&dir).expect("failed to create secrets dir");
        let path = dir.join(file);
        fs::write(&path, contents).expect("failed to write local secret");
        set_mode(&dir, 0o700);
        set_mode(&path, 0o600);
        path
    }
}

/// Set unix permissions; a no-op elsewhere.
pub fn set_mode(path: &Path, mode: u32) {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(mode))
            .expect("failed to set permissions");
    }
    #[cfg(not(unix))]
    {
        let _ = (path, mode);
    }
}
