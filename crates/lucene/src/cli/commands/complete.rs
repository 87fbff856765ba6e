//! Implementation of `lucene complete`.

use std::process::ExitCode;

use lucene_editor::{CompletionProvider, Position};
use tracing::debug;

use crate::cli::{
    args::CompleteCommand,
    context::{CommandContext, resolve_cursor},
    output::{completion_table, dim, print_json},
};

/// Lists completions at the cursor, using the configured field schema.
pub fn run(cmd: &CompleteCommand) -> ExitCode {
    let ctx = match CommandContext::load() {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    let query = &cmd.query.query;
    let cursor = match resolve_cursor(query, cmd.query.cursor) {
        Ok(cursor) => cursor,
        Err(code) => return code,
    };

    let snippets = ctx.config.editor.snippets && !cmd.no_snippets;
    debug!(
        fields = ctx.config.fields.len(),
        snippets, cursor, "completing"
    );
    let provider = CompletionProvider::new(ctx.config.fields).with_snippets(snippets);
    let position = Position::at_offset(query, cursor);
    let items = match &cmd.word {
        Some(word) => provider.provide_for_word(query, position, word),
        None => provider.provide(query, position),
    };

    if cmd.output.json {
        return print_json(&items);
    }

    if items.is_empty() {
        println!("{}", dim("No completions."));
    } else {
        println!("{}", completion_table(&items));
    }
    ExitCode::SUCCESS
}
