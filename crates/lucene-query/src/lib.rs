//! Lucene query tokenizing, cursor context and completions.
//!
//! This crate understands just enough Lucene syntax to drive editor assistance:
//!
//! - **Fields**: `title:guide`, `score>=5` - a name followed by `:` or a comparison
//! - **Phrases**: `"error handling"` - quoted values with backslash escapes
//! - **Ranges**: `[1 TO 5]`, `{a TO b}` - inclusive and exclusive bounds
//! - **Groups**: `(a OR b)` - nested parentheses
//! - **Operators**: `AND`, `OR`, `NOT`, `TO`, `&&`, `||`, `!`, `+`, `-`
//!
//! Nothing here fails: every input, however incomplete, produces tokens, a context and
//! a (possibly empty) list of suggestions.
//!
//! # Example
//!
//! ```
//! use lucene_query::{FieldSchema, SuggestionKind, generate_completions, parse_query_context};
//!
//! let schema = vec![FieldSchema::new("status", ["active", "archived"])];
//! let text = "status:a";
//! let context = parse_query_context(text, text.len());
//! let items = generate_completions(text, "a", &context, Some(schema.as_slice()));
//! assert_eq!(items.len(), 2);
//! assert!(items.iter().all(|s| s.kind == SuggestionKind::Value));
//! ```

#![warn(missing_docs)]

mod completion;
mod context;
mod highlight;
mod lexer;
mod schema;

pub use completion::{DEFAULT_FIELDS, Suggestion, SuggestionKind, generate_completions};
pub use context::{
    FieldContext, QueryContext, SyntaxNode, classify, extract_field_context, parse_query_context,
};
pub use highlight::{ESCAPABLE, HighlightSpan, Scope, highlight};
pub use lexer::{BRACKETS, Bracket, KEYWORDS, OPERATORS, Token, TokenKind, tokenize};
pub use schema::{FieldSchema, find_field};
