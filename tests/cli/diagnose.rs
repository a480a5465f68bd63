//! Tests for `secretgate diagnose` command.

use crate::support::*;

#[test]
fn test_diagnose_reports_env_file_module() {
    let t = Test::new();
    t.write(
        ".env",
        "DJANGO_SETTINGS_MODULE=config.settings.production\nSECRET_KEY=do-not-print\n",
    );

    let output = t.diagnose(&[]);

    assert_success(&output);
    assert_stdout_contains(&output, "Before loading .env");
    assert_stdout_contains(&output, "NOT SET");
    assert_stdout_contains(&output, "DJANGO_SETTINGS_MODULE=config.settings.production");
    assert_stdout_contains(&output, "the default is not applied");
    assert_output_excludes(&output, "do-not-print");
}

#[test]
fn test_diagnose_default_applied() {
    let t = Test::new();

    let output = t.diagnose(&[]);

    assert_success(&output);
    assert_stdout_contains(&output, "the default config.settings.development applies");
}

#[test]
fn test_diagnose_json() {
    let t = Test::new();
    t.write(".env", "DEBUG=true\n");

    let output = t.run(
        &["diagnose", "--json"],
        &[("DJANGO_SETTINGS_MODULE", "config.settings.staging")],
    );

    assert_success(&output);
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["env_file_exists"], true);
    assert_eq!(json["default_applied"], false);
    assert_eq!(json["environment"], "staging");
    assert_eq!(json["env_file_lines"][0], "DEBUG=true");
}
