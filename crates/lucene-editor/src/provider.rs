//! Completion provider.
//!
//! Wraps [`generate_completions`] for an editor: works out the cursor offset, the text and
//! word before the cursor and the span a suggestion replaces, then converts suggestions to
//! editor completion items and appends the built-in snippets, escape helpers and
//! wildcards.

use lucene_query::{
    ESCAPABLE, FieldSchema, Suggestion, SuggestionKind, extract_field_context,
    generate_completions, parse_query_context,
};
use serde::Serialize;
use tracing::trace;

use crate::position::{Position, TextRange, text_before_position, word_until_position};

/// Snippets offered outside ranges: label, insert text, documentation.
const SNIPPETS: [(&str, &str, &str); 8] = [
    (
        "fuzzy search",
        "${1:term}~${2:distance}",
        "Fuzzy search with optional edit distance",
    ),
    (
        "proximity search",
        "\"${1:phrase}\"~${2:distance}",
        "Proximity search - words within specified distance",
    ),
    (
        "boost query",
        "${1:term}^${2:boost}",
        "Boost query - increase relevance score",
    ),
    (
        "range inclusive",
        "[${1:start} TO ${2:end}]",
        "Inclusive range query",
    ),
    (
        "range exclusive",
        "{${1:start} TO ${2:end}}",
        "Exclusive range query",
    ),
    (
        "range from value",
        "[${1:start} TO *]",
        "Range from value to infinity",
    ),
    (
        "range to value",
        "[* TO ${1:end}]",
        "Range from negative infinity to value",
    ),
    ("regex", "/${1:pattern}/", "Regular expression search"),
];

/// Wildcards offered at the start of a term: character and documentation.
const WILDCARDS: [(char, &str); 2] = [
    ('*', "Wildcard - matches any sequence of characters"),
    ('?', "Wildcard - matches any single character"),
];

/// Editor-side category of a completion item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionItemKind {
    /// Field name.
    Field,
    /// Operator.
    Operator,
    /// Field value.
    Value,
    /// Keyword.
    Keyword,
    /// Snippet with placeholders.
    Snippet,
    /// Literal text, such as an escaped special character.
    Text,
}

impl From<SuggestionKind> for CompletionItemKind {
    fn from(kind: SuggestionKind) -> Self {
        match kind {
            SuggestionKind::Field => Self::Field,
            SuggestionKind::Operator => Self::Operator,
            SuggestionKind::Value => Self::Value,
            SuggestionKind::Keyword => Self::Keyword,
            SuggestionKind::Snippet => Self::Snippet,
        }
    }
}

/// A completion item ready to hand to an editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionItem {
    /// Display string.
    pub label: String,
    /// Category shown by the editor.
    pub kind: CompletionItemKind,
    /// Text inserted on accept.
    pub insert_text: String,
    /// Expand `${n:placeholder}` tab stops in `insert_text`.
    pub insert_as_snippet: bool,
    /// Human-readable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
    /// Sort key overriding label order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_text: Option<String>,
    /// Span replaced on accept.
    pub range: TextRange,
}

impl CompletionItem {
    /// Converts a core suggestion, replacing `range`.
    fn from_suggestion(suggestion: Suggestion, range: TextRange) -> Self {
        Self {
            insert_as_snippet: suggestion.is_snippet(),
            label: suggestion.label,
            kind: suggestion.kind.into(),
            insert_text: suggestion.insert_text,
            documentation: suggestion.documentation,
            sort_text: suggestion.sort_text,
            range,
        }
    }

    /// Builds one of the built-in snippets.
    fn snippet(label: &str, insert_text: &str, documentation: &str, range: TextRange) -> Self {
        Self {
            label: label.to_string(),
            kind: CompletionItemKind::Snippet,
            insert_text: insert_text.to_string(),
            insert_as_snippet: true,
            documentation: Some(documentation.to_string()),
            sort_text: None,
            range,
        }
    }

    /// Builds the helper inserting a backslash-escaped `special` character.
    fn escape(special: char, range: TextRange) -> Self {
        let escaped = format!("\\{special}");
        Self {
            label: escaped.clone(),
            kind: CompletionItemKind::Text,
            insert_text: escaped,
            insert_as_snippet: false,
            documentation: Some(format!("Escaped literal '{special}'")),
            sort_text: None,
            range,
        }
    }

    /// Builds the helper inserting a wildcard.
    fn wildcard(wildcard: char, documentation: &str, range: TextRange) -> Self {
        Self {
            label: wildcard.to_string(),
            kind: CompletionItemKind::Operator,
            insert_text: wildcard.to_string(),
            insert_as_snippet: false,
            documentation: Some(documentation.to_string()),
            sort_text: None,
            range,
        }
    }
}

/// Produces completion items for query documents against a fixed schema.
#[derive(Debug, Clone)]
pub struct CompletionProvider {
    /// Fields offered as names and whose values are offered after a separator.
    schema: Vec<FieldSchema>,
    /// Whether to append the built-in snippets.
    snippets: bool,
}

impl CompletionProvider {
    /// Creates a provider for `schema` with snippets enabled.
    pub fn new(schema: Vec<FieldSchema>) -> Self {
        Self {
            schema,
            snippets: true,
        }
    }

    /// Enables or disables the built-in snippets.
    #[must_use]
    pub fn with_snippets(mut self, snippets: bool) -> Self {
        self.snippets = snippets;
        self
    }

    /// The schema this provider completes against.
    pub fn schema(&self) -> &[FieldSchema] {
        &self.schema
    }

    /// Characters that should open the completion list when typed.
    pub fn trigger_characters() -> Vec<char> {
        [':', ' ']
            .into_iter()
            .chain('a'..='z')
            .chain('A'..='Z')
            .chain('0'..='9')
            .chain(['_', '-', '.'])
            .collect()
    }

    /// Computes completion items for `position` in `document`.
    pub fn provide(&self, document: &str, position: Position) -> Vec<CompletionItem> {
        let (word, _) = word_until_position(document, position);
        self.provide_for_word(document, position, word)
    }

    /// Computes completion items for `position`, treating `word` as the word being typed.
    ///
    /// `word` should end at the cursor; it decides both filtering and the replaced span.
    pub fn provide_for_word(
        &self,
        document: &str,
        position: Position,
        word: &str,
    ) -> Vec<CompletionItem> {
        let offset = position.offset_in(document);
        let context = parse_query_context(document, offset);
        let text_before = text_before_position(document, position);
        let cursor = Position::new(position.line, text_before.chars().count());
        let range = replacement_range(text_before, cursor, word);

        let schema = (!self.schema.is_empty()).then_some(self.schema.as_slice());
        let mut items: Vec<CompletionItem> =
            generate_completions(text_before, word, &context, schema)
                .into_iter()
                .map(|s| CompletionItem::from_suggestion(s, range))
                .collect();

        if !context.is_in_range {
            if self.snippets {
                items.extend(
                    SNIPPETS.iter().map(|(label, insert, doc)| {
                        CompletionItem::snippet(label, insert, doc, range)
                    }),
                );
            }
            if word.is_empty() {
                items.extend(helpers(range));
            }
        }

        trace!(
            offset,
            word,
            in_range = context.is_in_range,
            items = items.len(),
            "provided completions"
        );
        items
    }
}

impl Default for CompletionProvider {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

/// Escape helpers for every special character, then the wildcards.
///
/// Offered only where a new term starts, so they never crowd out a filtered word.
fn helpers(range: TextRange) -> impl Iterator<Item = CompletionItem> {
    ESCAPABLE
        .chars()
        .map(move |special| CompletionItem::escape(special, range))
        .chain(
            WILDCARDS
                .iter()
                .map(move |(wildcard, doc)| CompletionItem::wildcard(*wildcard, doc, range)),
        )
}

/// The span a completion replaces, ending at `cursor`.
///
/// After `field<sep>` the partial value is replaced even where the word stops short of it;
/// otherwise the word is replaced.
fn replacement_range(text_before: &str, cursor: Position, word: &str) -> TextRange {
    let word_start = cursor.column.saturating_sub(word.chars().count());
    let field = extract_field_context(text_before);
    let start_column = if field.field_name.is_some() {
        let value_chars = field.current_value.chars().count();
        word_start.min(cursor.column.saturating_sub(value_chars))
    } else {
        word_start
    };

    TextRange {
        start: Position::new(cursor.line, start_column),
        end: cursor,
    }
}
