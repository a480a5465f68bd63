//! Read-only environment snapshots.
//!
//! The resolver never consults the live process environment. Callers capture
//! a snapshot once at startup (or build one from pairs in tests) and inject it.

use std::collections::BTreeMap;

use crate::core::dotenv::DotEnv;

/// An immutable view of environment variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    vars: BTreeMap<String, String>,
}

impl EnvSnapshot {
    /// Capture the current process environment.
    ///
    /// Variables whose name or value is not valid unicode are skipped.
    pub fn from_process() -> Self {
        Self {
            vars: std::env::vars_os()
                .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
                .collect(),
        }
    }

    /// Build a snapshot from explicit pairs.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Return a new snapshot with `.env` entries added.
    ///
    /// Variables already present are kept: the real environment always wins
    /// over the file.
    pub fn overlay(&self, dotenv: &DotEnv) -> Self {
        let mut vars = self.vars.clone();
        for (key, value) in dotenv.entries() {
            vars.entry(key.clone()).or_insert_with(|| value.clone());
        }
        Self { vars }
    }

    /// Return a new snapshot with `key` set only if it is absent.
    pub fn with_default(&self, key: &str, value: &str) -> Self {
        let mut vars = self.vars.clone();
        vars.entry(key.to_string())
            .or_insert_with(|| value.to_string());
        Self { vars }
    }
}
