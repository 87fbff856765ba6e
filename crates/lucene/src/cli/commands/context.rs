//! Implementation of `lucene context`.

use std::process::ExitCode;

use lucene_query::{FieldContext, QueryContext, extract_field_context, parse_query_context};
use serde::Serialize;

use crate::cli::{
    args::ContextCommand,
    context::resolve_cursor,
    output::{dim, flag, header, print_json},
};

/// JSON output for `lucene context`.
#[derive(Serialize)]
struct JsonContext<'a> {
    /// Cursor byte offset used.
    cursor: usize,
    /// Token-based classification.
    context: &'a QueryContext,
    /// Field information from the text before the cursor.
    field: &'a FieldContext,
}

/// Prints what the cursor is inside of.
pub fn run(cmd: &ContextCommand) -> ExitCode {
    let query = &cmd.query.query;
    let cursor = match resolve_cursor(query, cmd.query.cursor) {
        Ok(cursor) => cursor,
        Err(code) => return code,
    };

    let context = parse_query_context(query, cursor);
    let field = extract_field_context(&query[..cursor]);

    if cmd.output.json {
        return print_json(&JsonContext {
            cursor,
            context: &context,
            field: &field,
        });
    }

    println!("{}", header(&format!("Cursor at byte {cursor}")));
    println!("  in field:         {}", flag(context.is_in_field));
    println!("  in value:         {}", flag(context.is_in_value));
    println!("  in range:         {}", flag(context.is_in_range));
    println!("  in group:         {}", flag(context.is_in_group));
    println!();
    println!("{}", header("Text before cursor"));
    match &field.field_name {
        Some(name) => println!("  field:            {name}"),
        None => println!("  field:            {}", dim("(none)")),
    }
    println!("  partial value:    {}", field.current_value);
    println!("  after colon:      {}", flag(field.is_after_colon));
    println!("  after comparison: {}", flag(field.is_after_comparison));

    ExitCode::SUCCESS
}
