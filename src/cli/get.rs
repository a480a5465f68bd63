//! Get command.
//!
//! Resolves one secret through the full source chain and prints it.

use crate::cli::Context;
use crate::core::resolver::Secret;
use crate::core::types::SecretType;
use crate::error::Result;

/// Resolve `name` and print its value to stdout.
///
/// Prints nothing and succeeds when an optional secret is absent.
pub fn execute(
    ctx: &Context,
    name: &str,
    kind: &str,
    default: Option<String>,
    required: bool,
) -> Result<()> {
    let kind: SecretType = kind.parse()?;

    let mut secret = Secret::new(name).kind(kind);
    if let Some(default) = default {
        secret = secret.with_default(default);
    }
    if required {
        secret = secret.required();
    }

    let resolver = ctx.resolver()?;
    if let Some(resolved) = resolver.resolve_with_source(&secret)? {
        tracing::debug!(secret = name, source = %resolved.source, "resolved");
        println!("{}", resolved.value.reveal());
    }

    Ok(())
}
