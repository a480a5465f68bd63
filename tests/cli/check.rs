//! Tests for `secretgate check` command.

use crate::support::*;

#[test]
fn test_check_development_defaults() {
    let t = Test::new();

    let output = t.check(&[("SECRET_KEY", STRONG_KEY)]);

    assert_success(&output);
    assert_stdout_contains(&output, "configuration valid for development");
    assert_stdout_contains(&output, "5432");
    assert_output_excludes(&output, STRONG_KEY);
}

#[test]
fn test_check_missing_secret_key_fails() {
    let t = Test::new();

    let output = t.check(&[]);

    assert_failure(&output);
    assert_stderr_contains(&output, "required secret 'SECRET_KEY' not found");
}

#[test]
fn test_check_production_rejects_short_key() {
    let t = Test::new();
    let key = &STRONG_KEY[..40];

    let output = t.check(&[
        ("DJANGO_SETTINGS_MODULE", PRODUCTION_MODULE),
        ("SECRET_KEY", key),
    ]);

    assert_failure(&output);
    assert_stderr_contains(&output, "too weak for production");
    assert_output_excludes(&output, key);
}

#[test]
fn test_check_development_accepts_shorter_key() {
    let t = Test::new();

    let output = t.check(&[
        ("DJANGO_SETTINGS_MODULE", DEVELOPMENT_MODULE),
        ("SECRET_KEY", &STRONG_KEY[..40]),
    ]);

    assert_success(&output);
}

#[test]
fn test_check_rejects_insecure_key_in_production() {
    let t = Test::new();

    let output = t.check(&[
        ("DJANGO_SETTINGS_MODULE", PRODUCTION_MODULE),
        ("SECRET_KEY", INSECURE_KEY),
    ]);

    assert_failure(&output);
    assert_stderr_contains(&output, "django-insecure");
}

#[test]
fn test_check_secret_key_from_orchestrator() {
    let t = Test::new();
    t.orchestrator_secret("secret_key", STRONG_KEY);

    let output = t.check(&[("DJANGO_SETTINGS_MODULE", PRODUCTION_MODULE)]);

    assert_success(&output);
    assert_stdout_contains(&output, "configuration valid for production");
}

#[test]
fn test_check_rejects_bad_cache_url() {
    let t = Test::new();

    let output = t.check(&[
        ("SECRET_KEY", STRONG_KEY),
        ("REDIS_URL", "http://localhost:6379"),
    ]);

    assert_failure(&output);
    assert_stderr_contains(&output, "REDIS_URL");
    assert_stderr_contains(&output, "redis://");
}

#[test]
fn test_check_rejects_bad_database_url() {
    let t = Test::new();

    let output = t.check(&[
        ("SECRET_KEY", STRONG_KEY),
        ("DATABASE_URL", "mysql://root@localhost/app"),
    ]);

    assert_failure(&output);
    assert_stderr_contains(&output, "DATABASE_URL");
}

#[test]
fn test_check_json_redacts_secrets() {
    let t = Test::new();

    let output = t.run(
        &["check", "--json"],
        &[
            ("SECRET_KEY", STRONG_KEY),
            ("DATABASE_PASSWORD", "hunter2-password"),
            ("ALLOWED_HOSTS", "app.example.com,api.example.com"),
        ],
    );

    assert_success(&output);
    let out = stdout(&output);
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["environment"], "development");
    assert_eq!(json["allowed_hosts"][1], "api.example.com");
    assert_eq!(json["database"]["port"], 5432);
    assert!(!out.contains(STRONG_KEY));
    assert!(!out.contains("hunter2-password"));
}
