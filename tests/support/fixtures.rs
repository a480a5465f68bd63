//! Test fixtures and constants.

/// A 50-character key with no insecure patterns.
pub const STRONG_KEY: &str = "q8Zr!vN3m@Lx7Tk#pW2yHc9Fd$Gj4Bs6Ue^Ra1Yo5Ki0Mn&Vtz";

/// Long enough for production but on the denylist.
pub const INSECURE_KEY: &str = "django-insecure-xxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx";

/// Settings module values.
pub const PRODUCTION_MODULE: &str = "config.settings.production";
pub const DEVELOPMENT_MODULE: &str = "config.settings.development";
