//! Env command.

use crate::cli::{output, Context};
use crate::core::constants::SETTINGS_MODULE_VAR;
use crate::core::environment::{self, Environment};
use crate::error::Result;

/// Print the environment classified from the settings module.
pub fn execute(ctx: &Context) -> Result<()> {
    let snapshot = ctx.snapshot()?;
    let module = environment::settings_module(&snapshot);
    let environment = Environment::from_snapshot(&snapshot);

    println!("{}", environment);
    if !snapshot.contains(SETTINGS_MODULE_VAR) {
        output::hint(&format!("settings module not set, assuming {}", module));
    }

    Ok(())
}
