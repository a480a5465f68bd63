//! Check command.
//!
//! Runs the same settings bootstrap the application runs at startup and
//! reports whether it would be allowed to start.

use crate::cli::{output, Context};
use crate::core::environment::Environment;
use crate::core::settings::Settings;
use crate::error::Result;

/// Load all settings and print a redacted summary.
pub fn execute(ctx: &Context, json: bool) -> Result<()> {
    let resolver = ctx.resolver()?;
    let environment = Environment::from_snapshot(resolver.env());
    let settings = Settings::load(&resolver, environment)?;

    if json {
        let rendered = serde_json::to_string_pretty(&settings)?;
        println!("{}", rendered);
        return Ok(());
    }

    output::section("Settings");
    for (label, value) in settings.summary() {
        output::kv(&format!("{:<14}", format!("{}:", label)), value);
    }
    println!();
    output::success(&format!("configuration valid for {}", environment));

    Ok(())
}
