//! Implementation of `lucene schema`.

use std::process::ExitCode;

use lucene_highlight::Highlighter;

use crate::cli::context::CommandContext;

/// Shows the effective field schema and editor settings as TOML.
pub fn run() -> ExitCode {
    let ctx = match CommandContext::load() {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    match ctx.config.schema_to_toml() {
        Ok(toml) => {
            print!("{}", Highlighter::new().highlight_toml(&toml));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
