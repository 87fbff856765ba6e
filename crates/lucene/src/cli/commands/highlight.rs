//! Implementation of `lucene highlight`.

use std::process::ExitCode;

use lucene_highlight::render_query;
use lucene_query::highlight;
use serde::Serialize;

use crate::cli::{args::HighlightCommand, output::print_json};

/// JSON output for one highlighted span.
#[derive(Serialize)]
struct JsonSpan<'a> {
    /// Dotted scope name.
    scope: &'static str,
    /// Text covered by the span.
    text: &'a str,
    /// Byte offset of the first character.
    start: usize,
    /// Byte offset one past the last character.
    end: usize,
}

/// Prints a query with syntax colors, or its scopes as JSON.
pub fn run(cmd: &HighlightCommand) -> ExitCode {
    let query = &cmd.query;

    if cmd.output.json {
        let spans: Vec<JsonSpan<'_>> = highlight(query)
            .into_iter()
            .map(|s| JsonSpan {
                scope: s.scope.name(),
                text: &query[s.start..s.end],
                start: s.start,
                end: s.end,
            })
            .collect();
        return print_json(&spans);
    }

    println!("{}", render_query(query));
    ExitCode::SUCCESS
}
