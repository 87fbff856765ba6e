//! Cursor context inference.
//!
//! Two independent views of "where is the cursor":
//!
//! - [`classify`] looks at the token stream and reports whether the cursor sits in a
//!   field name, a value, a range, or a group.
//! - [`extract_field_context`] inspects the raw text before the cursor, which still works
//!   when the text is too incomplete for the tokenizer to label it.

use serde::Serialize;

use crate::lexer::{Token, TokenKind, tokenize};

/// A node of a query syntax tree.
///
/// Reserved for tree-based context; [`classify`] is purely token driven and never
/// produces one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyntaxNode {
    /// What the node represents.
    pub kind: TokenKind,
    /// Source text covered by the node.
    pub text: String,
    /// Byte offset of the first character.
    pub start: usize,
    /// Byte offset one past the last character.
    pub end: usize,
    /// Nested nodes.
    pub children: Vec<Self>,
}

/// Where the cursor sits relative to the token stream.
///
/// The flags are independent of each other. Field and value come from the token under the
/// cursor; range and group membership consider every token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueryContext {
    /// Node under the cursor. Always `None`.
    pub current_node: Option<SyntaxNode>,
    /// Parent of the node under the cursor. Always `None`.
    pub parent_node: Option<SyntaxNode>,
    /// The token under the cursor is a field name.
    pub is_in_field: bool,
    /// The token under the cursor is a value.
    pub is_in_value: bool,
    /// Some range token spans the cursor.
    pub is_in_range: bool,
    /// Some group token spans the cursor.
    pub is_in_group: bool,
}

/// Field information recovered from the text immediately before the cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldContext {
    /// Identifier before the nearest trailing separator, if the text ends in
    /// `field<sep>partial`.
    pub field_name: Option<String>,
    /// The partial value typed after the separator.
    pub current_value: String,
    /// Text ends exactly with `identifier:`.
    pub is_after_colon: bool,
    /// Text ends exactly with `identifier` followed by `>=`, `<=`, `>`, `<` or `=`.
    pub is_after_comparison: bool,
}

/// Comparison operators, longest first.
const COMPARISONS: [&str; 5] = [">=", "<=", ">", "<", "="];

/// Classifies the cursor position against a token stream.
///
/// A cursor on a token boundary counts as inside that token. Offsets past the end of the
/// text simply match nothing.
pub fn classify(tokens: &[Token], cursor: usize) -> QueryContext {
    let kind = tokens.iter().find(|t| t.contains(cursor)).map(|t| t.kind);

    QueryContext {
        current_node: None,
        parent_node: None,
        is_in_field: kind == Some(TokenKind::Field),
        is_in_value: kind == Some(TokenKind::Value),
        is_in_range: spans_cursor(tokens, TokenKind::Range, cursor),
        is_in_group: spans_cursor(tokens, TokenKind::Group, cursor),
    }
}

/// Tokenizes `query` and classifies `cursor` against the result.
pub fn parse_query_context(query: &str, cursor: usize) -> QueryContext {
    classify(&tokenize(query), cursor)
}

/// Returns true if any token of `kind` contains `cursor`.
fn spans_cursor(tokens: &[Token], kind: TokenKind, cursor: usize) -> bool {
    tokens.iter().any(|t| t.kind == kind && t.contains(cursor))
}

/// Extracts field context from the text before the cursor.
///
/// Matches `word`, `separator run`, `optional word` anchored at the end of the text, where
/// word characters are ASCII alphanumerics and `_`, and separators are `:`, `>`, `<` and
/// `=`. Anything else yields an empty context.
pub fn extract_field_context(text_before_cursor: &str) -> FieldContext {
    let bytes = text_before_cursor.as_bytes();

    let value_start = run_start(bytes, bytes.len(), is_word_byte);
    let separator_start = run_start(bytes, value_start, is_separator_byte);
    let field_start = run_start(bytes, separator_start, is_word_byte);
    let matched = separator_start < value_start && field_start < separator_start;

    let (field_name, current_value) = if matched {
        (
            Some(text_before_cursor[field_start..separator_start].to_string()),
            text_before_cursor[value_start..].to_string(),
        )
    } else {
        (None, String::new())
    };

    FieldContext {
        field_name,
        current_value,
        is_after_colon: word_then_suffix(bytes, ":"),
        is_after_comparison: COMPARISONS.iter().any(|op| word_then_suffix(bytes, op)),
    }
}

/// Word characters for field extraction.
fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Separator characters for field extraction.
fn is_separator_byte(b: u8) -> bool {
    matches!(b, b':' | b'>' | b'<' | b'=')
}

/// Walks backwards from `end` while `pred` holds and returns where the run starts.
fn run_start(bytes: &[u8], end: usize, pred: fn(u8) -> bool) -> usize {
    let mut start = end;
    while start > 0 && pred(bytes[start - 1]) {
        start -= 1;
    }
    start
}

/// Returns true if `bytes` ends with `suffix` directly preceded by a word character.
fn word_then_suffix(bytes: &[u8], suffix: &str) -> bool {
    bytes.len() > suffix.len()
        && bytes.ends_with(suffix.as_bytes())
        && is_word_byte(bytes[bytes.len() - suffix.len() - 1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_context() {
        let ctx = parse_query_context("title:test", 5);
        assert!(ctx.is_in_field);
        assert!(!ctx.is_in_value);
    }

    #[test]
    fn value_context() {
        let ctx = parse_query_context("title:test", 8);
        assert!(!ctx.is_in_field);
        assert!(ctx.is_in_value);
    }

    #[test]
    fn cursor_at_start() {
        assert!(parse_query_context("title:test", 0).is_in_field);
    }

    #[test]
    fn cursor_at_end() {
        assert!(parse_query_context("title:test", 10).is_in_value);
    }

    #[test]
    fn range_context() {
        let ctx = parse_query_context("date:[2023-01-01 TO 2023-12-31]", 15);
        assert!(ctx.is_in_range);
        assert!(!ctx.is_in_field);
        assert!(!ctx.is_in_value);
    }

    #[test]
    fn range_boundaries_are_inclusive() {
        let query = "date:[1 TO 2]";
        assert!(parse_query_context(query, 5).is_in_range);
        assert!(parse_query_context(query, query.len()).is_in_range);
        assert!(!parse_query_context(query, 3).is_in_range);
    }

    #[test]
    fn group_context() {
        let ctx = parse_query_context("(title:test OR content:test)", 10);
        assert!(ctx.is_in_group);
        assert!(!ctx.is_in_range);
    }

    #[test]
    fn group_and_range_at_shared_boundary() {
        let query = "(a)[1 TO 2]";
        let ctx = parse_query_context(query, 3);
        assert!(ctx.is_in_group);
        assert!(ctx.is_in_range);

        assert!(!parse_query_context(query, 2).is_in_range);
        assert!(!parse_query_context(query, 4).is_in_group);
    }

    #[test]
    fn whitespace_has_no_token() {
        let ctx = parse_query_context("a   b", 2);
        assert!(!ctx.is_in_field);
        assert!(!ctx.is_in_value);
    }

    #[test]
    fn empty_query() {
        let ctx = parse_query_context("", 0);
        assert_eq!(ctx, QueryContext::default());
        assert!(ctx.current_node.is_none());
        assert!(ctx.parent_node.is_none());
    }

    #[test]
    fn cursor_past_end() {
        assert_eq!(parse_query_context("title:x", 99), QueryContext::default());
    }

    #[test]
    fn classify_uses_given_tokens() {
        let tokens = tokenize("(a) [1 TO 2]");
        let ctx = classify(&tokens, 3);
        assert!(ctx.is_in_group);
        assert!(!ctx.is_in_range);
        let ctx = classify(&tokens, 4);
        assert!(ctx.is_in_range);
    }

    #[test]
    fn after_colon() {
        let ctx = extract_field_context("status:");
        assert_eq!(ctx.field_name.as_deref(), Some("status"));
        assert_eq!(ctx.current_value, "");
        assert!(ctx.is_after_colon);
        assert!(!ctx.is_after_comparison);
    }

    #[test]
    fn after_comparison() {
        for (text, field) in [
            ("score>", "score"),
            ("score>=", "score"),
            ("date<", "date"),
            ("date<=", "date"),
            ("status=", "status"),
        ] {
            let ctx = extract_field_context(text);
            assert_eq!(ctx.field_name.as_deref(), Some(field), "{text}");
            assert!(ctx.is_after_comparison, "{text}");
            assert!(!ctx.is_after_colon, "{text}");
        }
    }

    #[test]
    fn partial_value() {
        let ctx = extract_field_context("title:test");
        assert_eq!(ctx.field_name.as_deref(), Some("title"));
        assert_eq!(ctx.current_value, "test");
        assert!(!ctx.is_after_colon);
        assert!(!ctx.is_after_comparison);
    }

    #[test]
    fn nearest_field_wins() {
        let ctx = extract_field_context("a:b AND status:ac");
        assert_eq!(ctx.field_name.as_deref(), Some("status"));
        assert_eq!(ctx.current_value, "ac");
    }

    #[test]
    fn no_field() {
        for text in ["just some text", "", "title:test ", ":x"] {
            let ctx = extract_field_context(text);
            assert_eq!(ctx.field_name, None, "{text}");
            assert_eq!(ctx.current_value, "", "{text}");
            assert!(!ctx.is_after_colon, "{text}");
            assert!(!ctx.is_after_comparison, "{text}");
        }
    }

    #[test]
    fn mixed_separator_run() {
        let ctx = extract_field_context("a>:");
        assert_eq!(ctx.field_name.as_deref(), Some("a"));
        assert!(!ctx.is_after_colon);
        assert!(!ctx.is_after_comparison);
    }

    #[test]
    fn colon_and_comparison_are_exclusive() {
        for text in ["a:", "a>", "a>=", "a=", "a:=", "a=:", "x", "a<:", "::", "a:b"] {
            let ctx = extract_field_context(text);
            assert!(!(ctx.is_after_colon && ctx.is_after_comparison), "{text}");
        }
    }

    #[test]
    fn non_ascii_before_field() {
        let ctx = extract_field_context("é status:p");
        assert_eq!(ctx.field_name.as_deref(), Some("status"));
        assert_eq!(ctx.current_value, "p");
    }
}
