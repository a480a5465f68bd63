//! Diagnose command.
//!
//! Explains in which order the environment is assembled, to debug a
//! settings module from `.env` that seems to be ignored.

use crate::cli::{output, Context};
use crate::core::constants::SETTINGS_MODULE_VAR;
use crate::core::diagnose::{self, VarState};
use crate::error::Result;

/// Print the load-order diagnostic.
pub fn execute(ctx: &Context, json: bool) -> Result<()> {
    let diagnosis = diagnose::run(&ctx.env_file(), ctx.process_env())?;

    if json {
        let rendered = serde_json::to_string_pretty(&diagnosis)?;
        println!("{}", rendered);
        return Ok(());
    }

    output::section("1. Before loading .env");
    print_vars(&diagnosis.before);

    output::section("2. Dotenv file");
    output::kv("path:  ", diagnosis.env_file.display());
    output::kv("exists:", diagnosis.env_file_exists);
    if diagnosis.env_file_lines.is_empty() {
        output::dimmed("  no watched variables set in .env");
    } else {
        for line in &diagnosis.env_file_lines {
            output::list_item(line);
        }
    }

    output::section("3. After loading .env");
    print_vars(&diagnosis.after);

    output::section("4. Settings module");
    if diagnosis.default_applied {
        output::warn(&format!(
            "{} is not set, the default {} applies",
            SETTINGS_MODULE_VAR, diagnosis.settings_module
        ));
    } else {
        output::success(&format!(
            "{} = {} (the default is not applied)",
            SETTINGS_MODULE_VAR, diagnosis.settings_module
        ));
    }
    output::kv("environment:", diagnosis.environment);

    Ok(())
}

fn print_vars(vars: &[VarState]) {
    for var in vars {
        output::kv(
            &format!("{:<24}", var.name),
            var.value.as_deref().unwrap_or("NOT SET"),
        );
    }
}
