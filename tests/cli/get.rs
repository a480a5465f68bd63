//! Tests for `secretgate get` command.

use crate::support::*;

#[test]
fn test_get_from_env_var() {
    let t = Test::new();

    let output = t.get("API_TOKEN", &[("API_TOKEN", "from-env")]);

    assert_success(&output);
    assert_eq!(stdout(&output).trim(), "from-env");
}

#[test]
fn test_orchestrator_file_wins_over_env() {
    let t = Test::new();
    t.orchestrator_secret("secret_key", "  from-orchestrator\n");

    let output = t.get("SECRET_KEY", &[("SECRET_KEY", "from-env")]);

    assert_success(&output);
    assert_eq!(stdout(&output).trim(), "from-orchestrator");
}

#[test]
fn test_file_pointer_wins_over_env() {
    let t = Test::new();
    let pointed = t.write("db_password", "from-pointer\n");
    let pointed = pointed.to_string_lossy().to_string();

    let output = t.get(
        "DATABASE_PASSWORD",
        &[
            ("DATABASE_PASSWORD_FILE", pointed.as_str()),
            ("DATABASE_PASSWORD", "from-env"),
        ],
    );

    assert_success(&output);
    assert_eq!(stdout(&output).trim(), "from-pointer");
}

#[test]
fn test_local_secrets_dir_used_before_env() {
    let t = Test::new();
    t.local_secret("api_token.txt", "from-local");

    let output = t.get("API_TOKEN", &[("API_TOKEN", "from-env")]);

    assert_success(&output);
    assert_eq!(stdout(&output).trim(), "from-local");
}

#[test]
fn test_dotenv_fills_missing_vars() {
    let t = Test::new();
    t.write(".env", "API_TOKEN=from-dotenv\n");

    let output = t.get("API_TOKEN", &[]);

    assert_success(&output);
    assert_eq!(stdout(&output).trim(), "from-dotenv");
}

#[test]
fn test_process_env_wins_over_dotenv() {
    let t = Test::new();
    t.write(".env", "API_TOKEN=from-dotenv\n");

    let output = t.get("API_TOKEN", &[("API_TOKEN", "from-process")]);

    assert_success(&output);
    assert_eq!(stdout(&output).trim(), "from-process");
}

#[test]
fn test_get_default_when_absent() {
    let t = Test::new();

    let output = t.run(&["get", "LOG_LEVEL", "--default", "INFO"], &[]);

    assert_success(&output);
    assert_eq!(stdout(&output).trim(), "INFO");
}

#[test]
fn test_get_optional_absent_prints_nothing() {
    let t = Test::new();

    let output = t.get("SENTRY_DSN", &[]);

    assert_success(&output);
    assert!(stdout(&output).trim().is_empty());
}

#[test]
fn test_get_bool() {
    let t = Test::new();

    let output = t.run(&["get", "DEBUG", "--type", "bool"], &[("DEBUG", "Yes")]);
    assert_success(&output);
    assert_eq!(stdout(&output).trim(), "true");

    let output = t.run(&["get", "DEBUG", "--type", "bool"], &[("DEBUG", "enabled")]);
    assert_success(&output);
    assert_eq!(stdout(&output).trim(), "false");
}

#[test]
fn test_get_list_drops_empty_items() {
    let t = Test::new();

    let output = t.run(
        &["get", "ALLOWED_HOSTS", "-t", "list"],
        &[("ALLOWED_HOSTS", "a.example.com, ,b.example.com,")],
    );

    assert_success(&output);
    assert_eq!(stdout(&output).trim(), "a.example.com,b.example.com");
}

#[test]
fn test_get_int_parse_failure() {
    let t = Test::new();

    let output = t.run(
        &["get", "DATABASE_PORT", "-t", "int"],
        &[("DATABASE_PORT", "not-a-port")],
    );

    assert_failure(&output);
    assert_stderr_contains(&output, "DATABASE_PORT");
    assert_stderr_contains(&output, "not a valid int");
}

#[test]
fn test_get_required_missing_lists_locations() {
    let t = Test::new();

    let output = t.run(&["get", "API_TOKEN", "--required"], &[]);

    assert_failure(&output);
    assert_stderr_contains(&output, "required secret 'API_TOKEN' not found");
    assert_stderr_contains(&output, "api_token");
    assert_stderr_contains(&output, "$API_TOKEN_FILE");
    assert_stderr_contains(&output, "api_token.txt");
    assert_stderr_contains(&output, "environment variable: $API_TOKEN");
}

#[test]
fn test_get_empty_env_var_is_present() {
    let t = Test::new();

    let output = t.run(&["get", "API_TOKEN", "--required"], &[("API_TOKEN", "")]);

    assert_success(&output);
    assert!(stdout(&output).trim().is_empty());
}
