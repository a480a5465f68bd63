//! Tests for `secretgate env` command.

use crate::support::*;

#[test]
fn test_env_production() {
    let t = Test::new();

    let output = t.env(&[("DJANGO_SETTINGS_MODULE", PRODUCTION_MODULE)]);

    assert_success(&output);
    assert_eq!(stdout(&output).trim(), "production");
}

#[test]
fn test_env_production_wins_over_dev() {
    let t = Test::new();

    let output = t.env(&[("DJANGO_SETTINGS_MODULE", "devops.settings.production")]);

    assert_success(&output);
    assert_eq!(stdout(&output).trim(), "production");
}

#[test]
fn test_env_unset_defaults_to_development() {
    let t = Test::new();

    let output = t.env(&[]);

    assert_success(&output);
    assert_eq!(stdout(&output).trim(), "development");
    assert_stderr_contains(&output, "settings module not set");
}

#[test]
fn test_env_from_dotenv() {
    let t = Test::new();
    t.write(".env", "export DJANGO_SETTINGS_MODULE=\"config.settings.staging\"\n");

    let output = t.env(&[]);

    assert_success(&output);
    assert_eq!(stdout(&output).trim(), "staging");
}

#[test]
fn test_env_unknown_module_warns() {
    let t = Test::new();

    let output = t.env(&[("DJANGO_SETTINGS_MODULE", "config.settings.qa")]);

    assert_success(&output);
    assert_eq!(stdout(&output).trim(), "development");
    assert_stderr_contains(&output, "could not detect environment");
}
