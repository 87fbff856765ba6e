//! Command implementations and dispatch.

pub mod check;
pub mod complete;
pub mod context;
pub mod highlight;
pub mod init;
pub mod schema;
pub mod tokenize;

use std::process::ExitCode;

use super::args::Commands;

/// Dispatches to the selected subcommand.
pub fn run(command: Commands) -> ExitCode {
    match command {
        Commands::Tokenize(cmd) => tokenize::run(&cmd),
        Commands::Context(cmd) => context::run(&cmd),
        Commands::Complete(cmd) => complete::run(&cmd),
        Commands::Highlight(cmd) => highlight::run(&cmd),
        Commands::Schema => schema::run(),
        Commands::Check => check::run(),
        Commands::Init(cmd) => init::run(&cmd),
    }
}
