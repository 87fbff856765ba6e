//! Completion suggestions.
//!
//! Turns the text before the cursor, the word being typed and the cursor context into an
//! ordered list of suggestions. Rules, in order:
//!
//! 1. Inside a range, `TO` and `*` come first.
//! 2. After `field:` or `field<op>` with a schema entry for `field`, its values are
//!    offered. Outside a range nothing else is.
//! 3. At the start of the query, after a boolean operator, or while typing a bare word,
//!    field names are offered.
//! 4. Outside a range, the operator table closes the list.
//!
//! Suggestions keep the order of their source lists. Consumers sort by
//! [`Suggestion::sort_text`] if they want to.

use serde::Serialize;

use crate::{
    context::{QueryContext, extract_field_context},
    schema::{FieldSchema, find_field},
};

/// Field names offered even without a schema.
pub const DEFAULT_FIELDS: [&str; 12] = [
    "title",
    "author",
    "content",
    "text",
    "date",
    "category",
    "status",
    "priority",
    "score",
    "name",
    "description",
    "tags",
];

/// Operators offered outside ranges, with their descriptions.
const OPERATOR_TABLE: [(&str, &str); 13] = [
    ("AND", "Boolean AND operator"),
    ("OR", "Boolean OR operator"),
    ("NOT", "Boolean NOT operator"),
    ("&&", "Boolean AND operator (alternative)"),
    ("||", "Boolean OR operator (alternative)"),
    ("!", "Boolean NOT operator (alternative)"),
    ("+", "Required term"),
    ("-", "Prohibited term"),
    (">", "Greater than comparison"),
    (">=", "Greater than or equal comparison"),
    ("<", "Less than comparison"),
    ("<=", "Less than or equal comparison"),
    ("=", "Exact equality comparison"),
];

/// Symbolic operators after which a new clause starts.
const CLAUSE_SYMBOLS: [&str; 5] = ["&&", "||", "!", "+", "-"];

/// Keyword operators after which a new clause starts.
const CLAUSE_KEYWORDS: [&str; 3] = ["AND", "OR", "NOT"];

/// Number of schema values previewed in field documentation.
const PREVIEW_VALUES: usize = 3;

/// What a suggestion inserts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    /// A field name followed by `:`.
    Field,
    /// A boolean, prefix or comparison operator.
    Operator,
    /// A literal value from the schema.
    Value,
    /// A reserved word such as `TO`.
    Keyword,
    /// Insert text containing tab-stop placeholders.
    Snippet,
}

/// A single completion candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    /// Display string.
    pub label: String,
    /// Text inserted on accept.
    pub insert_text: String,
    /// Category of the suggestion.
    pub kind: SuggestionKind,
    /// Human-readable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
    /// Sort key overriding label order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_text: Option<String>,
}

impl Suggestion {
    /// Creates a suggestion without documentation or sort key.
    pub fn new(
        label: impl Into<String>,
        insert_text: impl Into<String>,
        kind: SuggestionKind,
    ) -> Self {
        Self {
            label: label.into(),
            insert_text: insert_text.into(),
            kind,
            documentation: None,
            sort_text: None,
        }
    }

    /// Sets the documentation string.
    pub fn with_documentation(mut self, documentation: impl Into<String>) -> Self {
        self.documentation = Some(documentation.into());
        self
    }

    /// Sets the sort key.
    pub fn with_sort_text(mut self, sort_text: impl Into<String>) -> Self {
        self.sort_text = Some(sort_text.into());
        self
    }

    /// Returns true if the insert text should be expanded as a snippet.
    pub fn is_snippet(&self) -> bool {
        self.kind == SuggestionKind::Snippet
    }
}

/// Generates completion suggestions for the cursor position.
///
/// `text_before_cursor` is the text preceding the cursor (normally on the current line),
/// `current_word` the word being typed, and `context` the token-based classification of the
/// cursor. A missing or empty schema still yields the default field names.
pub fn generate_completions(
    text_before_cursor: &str,
    current_word: &str,
    context: &QueryContext,
    schema: Option<&[FieldSchema]>,
) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();
    let field_context = extract_field_context(text_before_cursor);
    let in_range = context.is_in_range;

    if in_range {
        suggestions.extend(range_keywords());
    }

    let after_separator = field_context.is_after_colon
        || field_context.is_after_comparison
        || field_context.field_name.is_some();

    if after_separator
        && let Some(schema) = schema
        && let Some(field) = field_context
            .field_name
            .as_deref()
            .and_then(|name| find_field(schema, name))
    {
        suggestions.extend(field_values(field, &field_context.current_value));
        if !in_range {
            return suggestions;
        }
    }

    let typing_field = !field_context.is_after_colon
        && !field_context.is_after_comparison
        && !in_range
        && !current_word.is_empty();
    let at_start = text_before_cursor.trim().is_empty() || is_after_operator(text_before_cursor);

    if (at_start || typing_field) && !in_range {
        let filter = typing_field.then_some(current_word);
        suggestions.extend(field_names(schema.unwrap_or_default(), filter));
    }

    if !in_range {
        suggestions.extend(operators());
    }

    suggestions
}

/// Suggestions offered first inside a range.
fn range_keywords() -> [Suggestion; 2] {
    [
        Suggestion::new("TO", "TO ", SuggestionKind::Keyword)
            .with_documentation("Range query separator"),
        Suggestion::new("*", "*", SuggestionKind::Operator)
            .with_documentation("Unbounded range wildcard"),
    ]
}

/// Schema values of `field` that start with `partial`, ignoring case.
fn field_values(field: &FieldSchema, partial: &str) -> Vec<Suggestion> {
    field
        .values
        .iter()
        .filter(|value| starts_with_ignore_case(value, partial))
        .map(|value| {
            Suggestion::new(value.as_str(), value.as_str(), SuggestionKind::Value)
                .with_documentation(format!("{} field value", field.key))
        })
        .collect()
}

/// Default and schema field names, deduplicated, optionally filtered by prefix.
fn field_names(schema: &[FieldSchema], filter: Option<&str>) -> Vec<Suggestion> {
    let mut names: Vec<&str> = Vec::new();
    for name in DEFAULT_FIELDS
        .iter()
        .copied()
        .chain(schema.iter().map(|f| f.key.as_str()))
    {
        if !names.contains(&name) {
            names.push(name);
        }
    }

    names
        .into_iter()
        .filter(|name| filter.is_none_or(|prefix| starts_with_ignore_case(name, prefix)))
        .map(|name| field_name_suggestion(name, find_field(schema, name)))
        .collect()
}

/// Builds the suggestion for one field name.
///
/// Schema-backed fields sort ahead of the defaults and preview their values.
fn field_name_suggestion(name: &str, field: Option<&FieldSchema>) -> Suggestion {
    let suggestion = Suggestion::new(name, format!("{name}:"), SuggestionKind::Field);
    match field {
        Some(field) => suggestion
            .with_documentation(format!(
                "Custom field: {name}{}",
                field.value_preview(PREVIEW_VALUES)
            ))
            .with_sort_text(format!("0{name}")),
        None => suggestion
            .with_documentation(format!("Search in {name} field"))
            .with_sort_text(format!("1{name}")),
    }
}

/// The operator table, each inserted with a trailing space.
fn operators() -> impl Iterator<Item = Suggestion> {
    OPERATOR_TABLE.iter().map(|(label, doc)| {
        Suggestion::new(*label, format!("{label} "), SuggestionKind::Operator)
            .with_documentation(*doc)
    })
}

/// Returns true if the text ends with a clause-starting operator, ignoring trailing
/// whitespace. Keywords only count when they start at a word boundary.
fn is_after_operator(text: &str) -> bool {
    let trimmed = text.trim_end();

    if CLAUSE_SYMBOLS.iter().any(|op| trimmed.ends_with(op)) {
        return true;
    }

    CLAUSE_KEYWORDS.iter().any(|kw| {
        trimmed
            .strip_suffix(kw)
            .is_some_and(|rest| !rest.ends_with(|c: char| c.is_ascii_alphanumeric() || c == '_'))
    })
}

/// Case-insensitive prefix test.
fn starts_with_ignore_case(candidate: &str, prefix: &str) -> bool {
    candidate.to_lowercase().starts_with(&prefix.to_lowercase())
}
