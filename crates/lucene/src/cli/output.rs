//! Rendering and JSON serialization for CLI output.

use std::process::ExitCode;

use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};
use lucene_editor::CompletionItem;
pub use lucene_highlight::{dim, header, success, warning};
use lucene_query::Token;
use serde::Serialize;

/// Prints `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize output: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Creates a table with the shared preset and header row.
fn table(headers: Vec<&str>) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(headers);
    table
}

/// Renders tokens as a kind/text/span table.
pub fn token_table(tokens: &[Token]) -> Table {
    let mut table = table(vec!["Kind", "Text", "Start", "End"]);
    for token in tokens {
        table.add_row(vec![
            Cell::new(format!("{:?}", token.kind)),
            Cell::new(&token.text),
            Cell::new(token.start),
            Cell::new(token.end),
        ]);
    }
    table
}

/// Renders completion items as a label/kind/insert/detail table.
pub fn completion_table(items: &[CompletionItem]) -> Table {
    let mut table = table(vec!["Label", "Kind", "Insert", "Detail"]);
    for item in items {
        table.add_row(vec![
            Cell::new(&item.label),
            Cell::new(format!("{:?}", item.kind)),
            Cell::new(&item.insert_text),
            Cell::new(item.documentation.as_deref().unwrap_or_default()),
        ]);
    }
    table
}

/// Formats a yes/no flag, dimming negatives.
pub fn flag(value: bool) -> String {
    if value {
        success("yes")
    } else {
        dim("no")
    }
}

#[cfg(test)]
mod tests {
    use lucene_query::tokenize;

    use super::*;

    #[test]
    fn token_table_has_row_per_token() {
        let rendered = token_table(&tokenize("title:test")).to_string();
        assert!(rendered.contains("Field"));
        assert!(rendered.contains("title"));
        assert!(rendered.contains("Value"));
        assert_eq!(token_table(&tokenize("a b")).row_iter().count(), 2);
    }

    #[test]
    fn flag_formatting() {
        assert!(flag(true).contains("yes"));
        assert!(flag(false).contains("no"));
    }
}
