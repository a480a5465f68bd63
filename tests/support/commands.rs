//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create a secretgate command for this project.
    ///
    /// Returns a Command configured with:
    /// - an empty environment apart from NO_COLOR
    /// - current directory set to the test project directory
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("secretgate").expect("failed to find secretgate binary");
        cmd.env_clear();
        cmd.env("NO_COLOR", "1");
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Run a command with extra environment variables.
    pub fn run(&self, args: &[&str], vars: &[(&str, &str)]) -> Output {
        let mut cmd = self.cmd();
        cmd.args(args);
        for (k, v) in vars {
            cmd.env(k, v);
        }
        cmd.output().expect("failed to run secretgate")
    }

    /// Shortcut for `secretgate get <name>`.
    pub fn get(&self, name: &str, vars: &[(&str, &str)]) -> Output {
        self.run(&["get", name], vars)
    }

    /// Shortcut for `secretgate check`.
    pub fn check(&self, vars: &[(&str, &str)]) -> Output {
        self.run(&["check"], vars)
    }

    /// Shortcut for `secretgate audit`.
    pub fn audit(&self) -> Output {
        self.run(&["audit"], &[])
    }

    /// Shortcut for `secretgate diagnose`.
    pub fn diagnose(&self, vars: &[(&str, &str)]) -> Output {
        self.run(&["diagnose"], vars)
    }

    /// Shortcut for `secretgate env`.
    pub fn env(&self, vars: &[(&str, &str)]) -> Output {
        self.run(&["env"], vars)
    }
}
