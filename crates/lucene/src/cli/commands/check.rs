//! Implementation of `lucene check`.

use std::process::ExitCode;

use lucene_config::{ConfigWarning, discover_config_files};

use crate::cli::{
    context::CommandContext,
    output::{dim, header, success, warning},
};

/// Exit codes for `lucene check`.
mod exit_codes {
    use std::process::ExitCode;

    /// Configuration is valid with no warnings.
    pub const OK: ExitCode = ExitCode::SUCCESS;
    /// Configuration has warnings but is usable.
    pub const WARNINGS: ExitCode = ExitCode::FAILURE;
}

/// Validates configuration and reports warnings.
pub fn run() -> ExitCode {
    let ctx = match CommandContext::load() {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    let config_files = discover_config_files(&ctx.cwd);

    if config_files.is_empty() {
        println!("{}", dim("No configuration files found."));
        println!();
        println!("Run 'lucene init' to create a configuration file.");
        return exit_codes::OK;
    }

    println!("{}", header("Config files (highest precedence first):"));
    for path in &config_files {
        println!("  {}", path.display());
    }
    println!();

    println!("{}", header("Fields:"));
    if ctx.config.fields.is_empty() {
        println!("  {}", dim("(none defined)"));
    } else {
        for field in &ctx.config.fields {
            println!(
                "  {} {}",
                field.key,
                dim(&format!("({} values)", field.values.len()))
            );
        }
    }
    println!();

    let warnings = ctx.config.validate();
    if warnings.is_empty() {
        println!("{}", success("No issues found."));
        return exit_codes::OK;
    }

    println!("{}", warning(&format!("Warnings ({}):", warnings.len())));
    for w in &warnings {
        println!("  - {w}");
    }
    println!();

    print_hints(&warnings);

    exit_codes::WARNINGS
}

/// Prints hints for resolving common warnings.
fn print_hints(warnings: &[ConfigWarning]) {
    let mut hints: Vec<&str> = warnings
        .iter()
        .map(|w| match w {
            ConfigWarning::NoFieldsDefined => "Add [[field]] tables with a key and values.",
            ConfigWarning::EmptyKey => "Give every [[field]] a non-empty key.",
            ConfigWarning::KeyNotIdentifier { .. } => {
                "Field keys may only use letters, digits and underscores."
            }
            ConfigWarning::NoValues { .. } => {
                "Add values to fields so they can be offered after the separator."
            }
            ConfigWarning::DuplicateValue { .. } => "Remove repeated values from fields.",
        })
        .collect();

    hints.sort_unstable();
    hints.dedup();

    println!("Hints:");
    for hint in hints {
        println!("  - {hint}");
    }
}
