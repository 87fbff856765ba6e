//! Implementation of `lucene tokenize`.

use std::process::ExitCode;

use lucene_query::tokenize;

use crate::cli::{
    args::TokenizeCommand,
    output::{dim, print_json, token_table},
};

/// Prints the tokens of a query.
pub fn run(cmd: &TokenizeCommand) -> ExitCode {
    let tokens = tokenize(&cmd.query);

    if cmd.output.json {
        return print_json(&tokens);
    }

    if tokens.is_empty() {
        println!("{}", dim("No tokens."));
    } else {
        println!("{}", token_table(&tokens));
    }
    ExitCode::SUCCESS
}
