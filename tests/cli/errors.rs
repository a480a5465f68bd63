//! Error handling and usage tests.

use crate::support::*;
use predicates::prelude::*;

#[test]
fn test_unknown_type_fails() {
    let t = Test::new();

    let output = t.run(&["get", "DEBUG", "--type", "float"], &[("DEBUG", "1")]);

    assert_failure(&output);
    assert_stderr_contains(&output, "unknown secret type 'float'");
    assert_stderr_contains(&output, "use one of");
}

#[test]
fn test_invalid_name_fails() {
    let t = Test::new();

    let output = t.get("API-TOKEN", &[]);

    assert_failure(&output);
    assert_stderr_contains(&output, "invalid secret name");
}

#[test]
fn test_invalid_config_file_fails() {
    let t = Test::new();
    t.write("secretgate.toml", "[paths]\nunknown = 1\n");

    let output = t.env(&[]);

    assert_failure(&output);
    assert_stderr_contains(&output, "invalid config file");
}

#[test]
fn test_missing_pointer_target_falls_through() {
    let t = Test::new();

    let output = t.get(
        "API_TOKEN",
        &[
            ("API_TOKEN_FILE", "/nonexistent/secretgate/api_token"),
            ("API_TOKEN", "from-env"),
        ],
    );

    assert_success(&output);
    assert_eq!(stdout(&output).trim(), "from-env");
    assert_stderr_contains(&output, "missing file");
}

#[cfg(unix)]
#[test]
fn test_unreadable_required_secret_fails() {
    let t = Test::new();
    // A directory where a file is expected cannot be read as a string.
    std::fs::create_dir(t.orchestrator.path().join("api_token")).unwrap();

    let output = t.run(&["get", "API_TOKEN", "--required"], &[("API_TOKEN", "x")]);

    assert_failure(&output);
    assert_stderr_contains(&output, "failed to read secret 'API_TOKEN'");
}

#[cfg(unix)]
#[test]
fn test_unreadable_optional_secret_falls_through() {
    let t = Test::new();
    std::fs::create_dir(t.orchestrator.path().join("api_token")).unwrap();

    let output = t.get("API_TOKEN", &[("API_TOKEN", "from-env")]);

    assert_success(&output);
    assert_eq!(stdout(&output).trim(), "from-env");
}

#[test]
fn test_no_subcommand_shows_usage() {
    let t = Test::new();

    t.cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_completions_bash() {
    let t = Test::new();

    t.cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("secretgate"));
}
