//! Implementation of `lucene init`.

use std::{fs, process::ExitCode};

use lucene_config::{CONFIG_FILENAME, local_template};
use lucene_highlight::Highlighter;

use crate::cli::{args::InitCommand, context::CommandContext, output::header};

/// Writes a starter `.lucene.toml` into the current directory.
pub fn run(cmd: &InitCommand) -> ExitCode {
    let ctx = match CommandContext::load_cwd_only() {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    let config_path = ctx.cwd.join(CONFIG_FILENAME);

    if config_path.exists() && !cmd.force {
        eprintln!(
            "error: configuration file already exists: {}",
            config_path.display()
        );
        eprintln!("use --force to overwrite");
        return ExitCode::FAILURE;
    }

    let template = local_template();
    if let Err(e) = fs::write(&config_path, &template) {
        eprintln!("error: failed to write {}: {e}", config_path.display());
        return ExitCode::FAILURE;
    }

    println!("Created {}", config_path.display());
    println!();
    println!("{}", header("Configuration written:"));
    print!("{}", Highlighter::new().highlight_toml(&template));

    ExitCode::SUCCESS
}
