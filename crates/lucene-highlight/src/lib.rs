//! Terminal highlighting for Lucene queries and configuration.
//!
//! Queries are colored from the scopes produced by [`lucene_query::highlight`];
//! configuration TOML goes through a syntect highlighter. Also provides styled helpers for
//! headers and status messages.

#![warn(missing_docs)]

use lucene_query::{Scope, highlight};
use syntect::{
    easy::HighlightLines,
    highlighting::Style,
    parsing::SyntaxSet,
    util::{LinesWithEndings, as_24_bit_terminal_escaped},
};
use two_face::{
    syntax::extra_newlines as extra_syntaxes,
    theme::{EmbeddedLazyThemeSet, EmbeddedThemeName, extra as extra_themes},
};

/// A syntax highlighter for configuration files.
pub struct Highlighter {
    /// The syntax set containing language definitions (including TOML).
    syntax_set: SyntaxSet,
    /// The theme set containing color themes.
    theme_set: EmbeddedLazyThemeSet,
    /// The theme to use.
    theme: EmbeddedThemeName,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter {
    /// Creates a new highlighter with the default theme (Dracula).
    pub fn new() -> Self {
        Self {
            syntax_set: extra_syntaxes(),
            theme_set: extra_themes(),
            theme: EmbeddedThemeName::Dracula,
        }
    }

    /// Highlights TOML content for terminal output.
    ///
    /// Falls back to plain text if TOML syntax is unavailable.
    pub fn highlight_toml(&self, content: &str) -> String {
        let syntax = self
            .syntax_set
            .find_syntax_by_extension("toml")
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let theme = self.theme_set.get(self.theme);
        let mut highlighter = HighlightLines::new(syntax, theme);

        let mut output = String::new();
        for line in LinesWithEndings::from(content) {
            let ranges: Vec<(Style, &str)> = highlighter
                .highlight_line(line, &self.syntax_set)
                .unwrap_or_else(|_| vec![(Style::default(), line)]);
            output.push_str(&as_24_bit_terminal_escaped(&ranges[..], false));
        }
        output.push_str(colors::RESET);
        output
    }
}

/// ANSI color codes for terminal output.
pub mod colors {
    /// Bold text.
    pub const BOLD: &str = "\x1b[1m";
    /// Cyan text (for headers and field names).
    pub const CYAN: &str = "\x1b[36m";
    /// Green text (for success and phrases).
    pub const GREEN: &str = "\x1b[32m";
    /// Yellow text (for warnings and modifiers).
    pub const YELLOW: &str = "\x1b[33m";
    /// Red text (for errors and regular expressions).
    pub const RED: &str = "\x1b[31m";
    /// Blue text (for numbers and dates).
    pub const BLUE: &str = "\x1b[34m";
    /// Magenta text (for keywords).
    pub const MAGENTA: &str = "\x1b[35m";
    /// Dim/gray text (for less important info).
    pub const DIM: &str = "\x1b[2m";
    /// Reset all formatting.
    pub const RESET: &str = "\x1b[0m";
}

/// ANSI style for a query scope. Empty for plain terms.
pub fn scope_style(scope: Scope) -> &'static str {
    match scope {
        Scope::Field | Scope::QuotedField => colors::CYAN,
        Scope::Colon | Scope::Comparison => colors::DIM,
        Scope::Keyword | Scope::RangeKeyword => colors::MAGENTA,
        Scope::Operator
        | Scope::Fuzzy
        | Scope::Boost
        | Scope::Wildcard
        | Scope::RangeWildcard => colors::YELLOW,
        Scope::Phrase | Scope::ProximityPhrase | Scope::Escape => colors::GREEN,
        Scope::SquareBracket | Scope::CurlyBracket | Scope::Parenthesis => colors::BOLD,
        Scope::Number | Scope::Date => colors::BLUE,
        Scope::Regexp => colors::RED,
        Scope::Identifier | Scope::Text => "",
    }
}

/// Renders a query with ANSI colors. Whitespace is copied through unchanged.
pub fn render_query(query: &str) -> String {
    let mut output = String::with_capacity(query.len() * 2);
    let mut last = 0;

    for span in highlight(query) {
        output.push_str(&query[last..span.start]);
        let text = &query[span.start..span.end];
        match scope_style(span.scope) {
            "" => output.push_str(text),
            style => {
                output.push_str(style);
                output.push_str(text);
                output.push_str(colors::RESET);
            }
        }
        last = span.end;
    }

    output.push_str(&query[last..]);
    output
}

/// Formats a header with bold cyan styling.
pub fn header(text: &str) -> String {
    format!("{}{}{}{}", colors::BOLD, colors::CYAN, text, colors::RESET)
}

/// Formats text as dimmed/less important.
pub fn dim(text: &str) -> String {
    format!("{}{}{}", colors::DIM, text, colors::RESET)
}

/// Formats text as a success message (green).
pub fn success(text: &str) -> String {
    format!("{}{}{}", colors::GREEN, text, colors::RESET)
}

/// Formats text as a warning (yellow).
pub fn warning(text: &str) -> String {
    format!("{}{}{}", colors::YELLOW, text, colors::RESET)
}
