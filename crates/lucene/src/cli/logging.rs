//! Diagnostic logging setup.

use std::io;

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Maps the `-v` count to a log level: warnings by default, `-v` debug, `-vv` trace.
fn level_for(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Installs the global subscriber, writing to stderr without timestamps or targets.
///
/// `RUST_LOG` overrides the level chosen by `-v`.
pub fn init(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for(verbose).as_str()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
