//! Shared context for running CLI commands.

use std::{
    env,
    path::{Path, PathBuf},
    process::ExitCode,
};

use lucene_config::Config;

/// Command execution context built once per CLI invocation.
pub struct CommandContext {
    /// Current working directory.
    pub cwd: PathBuf,
    /// Loaded configuration (may be default if no config files found).
    pub config: Config,
}

impl CommandContext {
    /// Loads the current directory and configuration.
    pub fn load() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        let config = load_config_or_failure(&cwd)?;
        Ok(Self { cwd, config })
    }

    /// Loads only the current directory, skipping configuration parsing.
    ///
    /// Used by `init`, which should work even when an existing config file is invalid.
    pub fn load_cwd_only() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        Ok(Self {
            cwd,
            config: Config::default(),
        })
    }
}

/// Returns the current working directory or exits with a consistent error.
fn current_dir_or_failure() -> Result<PathBuf, ExitCode> {
    env::current_dir().map_err(|e| {
        eprintln!("error: could not determine current directory: {e}");
        ExitCode::FAILURE
    })
}

/// Loads configuration from the provided directory or exits with an error.
fn load_config_or_failure(cwd: &Path) -> Result<Config, ExitCode> {
    Config::load(cwd).map_err(|e| {
        eprintln!("error: failed to load configuration: {e}");
        ExitCode::FAILURE
    })
}

/// Resolves the cursor for `query`, defaulting to its end.
///
/// Fails when the offset is past the end or inside a multi-byte character.
pub fn resolve_cursor(query: &str, cursor: Option<usize>) -> Result<usize, ExitCode> {
    let cursor = cursor.unwrap_or(query.len());
    if cursor > query.len() {
        eprintln!(
            "error: cursor {cursor} is past the end of the query ({} bytes)",
            query.len()
        );
        return Err(ExitCode::FAILURE);
    }
    if !query.is_char_boundary(cursor) {
        eprintln!("error: cursor {cursor} is inside a multi-byte character");
        return Err(ExitCode::FAILURE);
    }
    Ok(cursor)
}
