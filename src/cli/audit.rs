//! Audit the project's secrets directory.

use crate::cli::{output, Context};
use crate::core::audit::{self, Severity};
use crate::error::{Error, Result};

/// Run the secrets audit and print a report.
///
/// Fails when any check reports an error; warnings alone do not fail.
pub fn execute(ctx: &Context) -> Result<()> {
    let report = audit::run(&ctx.root, &ctx.config);

    output::section("Secrets Audit");
    output::kv("directory:", report.secrets_dir.display());
    println!();

    let mut subject = "";
    for finding in &report.findings {
        if finding.subject != subject {
            subject = finding.subject.as_str();
            output::header(subject);
        }

        let line = format!("  {}", finding.message);
        match finding.severity {
            Severity::Pass => output::success(&line),
            Severity::Warning => output::warn(&line),
            Severity::Error => output::fail(&line),
        }
        if let Some(fix) = &finding.fix {
            output::dimmed(&format!("    fix: {}", output::cmd(fix)));
        }
    }

    let errors = report.errors().count();
    let warnings = report.warnings().count();

    output::section("Summary");
    if errors == 0 && warnings == 0 {
        output::success("all checks passed");
    } else if errors == 0 {
        output::success(&format!(
            "valid with {} warning{}",
            warnings,
            output::plural(warnings)
        ));
    } else {
        output::fail(&format!(
            "{} error{}, {} warning{}",
            errors,
            output::plural(errors),
            warnings,
            output::plural(warnings)
        ));
        return Err(Error::AuditFailed(errors));
    }

    Ok(())
}
