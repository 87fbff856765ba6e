//! Clap argument definitions for the `lucene` CLI.

use clap::{Args, Parser, Subcommand};

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "lucene")]
#[command(about = "Inspect Lucene query tokens, cursor context and completions")]
pub struct Cli {
    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short = 'v', long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// A query and an optional cursor inside it.
#[derive(Args, Debug, Clone)]
pub struct QueryArgs {
    /// Query text
    pub query: String,

    /// Cursor byte offset [default: end of query]
    #[arg(short = 'c', long)]
    pub cursor: Option<usize>,
}

/// Shared output mode flag.
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct JsonArgs {
    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `lucene tokenize`.
#[derive(Args, Debug, Clone)]
pub struct TokenizeCommand {
    /// Query text
    pub query: String,

    #[command(flatten)]
    /// Output formatting flags.
    pub output: JsonArgs,
}

/// Arguments for `lucene context`.
#[derive(Args, Debug, Clone)]
pub struct ContextCommand {
    #[command(flatten)]
    /// Query and cursor.
    pub query: QueryArgs,

    #[command(flatten)]
    /// Output formatting flags.
    pub output: JsonArgs,
}

/// Arguments for `lucene complete`.
#[derive(Args, Debug, Clone)]
pub struct CompleteCommand {
    #[command(flatten)]
    /// Query and cursor.
    pub query: QueryArgs,

    /// Word being typed [default: the word before the cursor]
    #[arg(short = 'w', long)]
    pub word: Option<String>,

    /// Leave out the built-in snippets regardless of configuration
    #[arg(long)]
    pub no_snippets: bool,

    #[command(flatten)]
    /// Output formatting flags.
    pub output: JsonArgs,
}

/// Arguments for `lucene highlight`.
#[derive(Args, Debug, Clone)]
pub struct HighlightCommand {
    /// Query text
    pub query: String,

    #[command(flatten)]
    /// Output formatting flags.
    pub output: JsonArgs,
}

/// Arguments for `lucene init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Supported `lucene` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Split a query into labeled tokens
    Tokenize(TokenizeCommand),

    /// Show what the cursor position is inside of
    Context(ContextCommand),

    /// List completions at the cursor
    Complete(CompleteCommand),

    /// Print a query with syntax colors
    Highlight(HighlightCommand),

    /// Show the effective field schema
    Schema,

    /// Validate configuration and diagnose issues
    Check,

    /// Initialize configuration in current directory
    Init(InitCommand),
}
