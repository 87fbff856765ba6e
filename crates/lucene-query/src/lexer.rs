//! Query tokenizer.
//!
//! Converts query text into a flat stream of labeled spans for cursor-context analysis.
//! Unlike a parser front end this never fails: text that matches no rule is skipped one
//! character at a time, so half-typed queries still produce useful tokens.

use serde::Serialize;

use crate::highlight::Scope;

/// Reserved words of the query language.
pub const KEYWORDS: [&str; 4] = ["AND", "OR", "NOT", "TO"];

/// Operator spellings understood by the query language.
pub const OPERATORS: [&str; 14] = [
    "+", "-", "~", "^", "?", "*", "&&", "||", "!", ">", ">=", "<", "<=", "=",
];

/// A bracket pair together with the highlight scope of its delimiters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bracket {
    /// Opening character.
    pub open: char,
    /// Closing character.
    pub close: char,
    /// Scope used when highlighting either delimiter.
    pub scope: Scope,
    /// Delimits a range rather than a group.
    pub range: bool,
}

impl Bracket {
    /// Returns the bracket pair opened by `b`, if any.
    pub fn opened_by(b: u8) -> Option<&'static Self> {
        BRACKETS.iter().find(|bracket| bracket.open == char::from(b))
    }

    /// Returns true if `b` closes this pair.
    pub fn is_closed_by(&self, b: u8) -> bool {
        self.close == char::from(b)
    }
}

/// Bracket pairs of the query language: groups, inclusive ranges, exclusive ranges.
pub const BRACKETS: [Bracket; 3] = [
    Bracket {
        open: '(',
        close: ')',
        scope: Scope::Parenthesis,
        range: false,
    },
    Bracket {
        open: '[',
        close: ']',
        scope: Scope::SquareBracket,
        range: true,
    },
    Bracket {
        open: '{',
        close: '}',
        scope: Scope::CurlyBracket,
        range: true,
    },
];

/// Classification of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// A field name preceding a separator (`title` in `title:rust`).
    Field,
    /// Separators, boolean operators and keywords.
    Operator,
    /// Bare words and quoted phrases.
    Value,
    /// A complete `[a TO b]` or `{a TO b}` span.
    Range,
    /// A complete parenthesized span.
    Group,
}

/// A labeled span of query text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    /// What the span was recognized as.
    pub kind: TokenKind,
    /// The exact text of the span.
    pub text: String,
    /// Byte offset of the first character.
    pub start: usize,
    /// Byte offset one past the last character.
    pub end: usize,
}

impl Token {
    /// Returns true if `offset` lies within the token, counting both boundaries.
    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset <= self.end
    }
}

/// A matcher inspects the input at a byte position and returns the token kind and end
/// offset of the span it recognizes there.
type Matcher = fn(&str, usize) -> Option<(TokenKind, usize)>;

/// Matchers in priority order. The first one to succeed claims the position.
const MATCHERS: [Matcher; 7] = [
    match_range,
    match_group,
    match_quoted,
    match_field,
    match_compound_operator,
    match_single_operator,
    match_word,
];

/// Characters that may follow a field name.
const FIELD_SEPARATORS: &[u8] = b":><=";

/// Single-character operators and delimiters.
const SINGLE_OPERATORS: &[u8] = b"+-!&|><=~^:";

/// Two-character operators, matched before their one-character prefixes.
const COMPOUND_OPERATORS: [&str; 4] = ["&&", "||", ">=", "<="];

/// Tokenizes a query string.
struct Lexer<'a> {
    /// The original input string.
    input: &'a str,
    /// Current byte position in input.
    position: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    fn new(input: &'a str) -> Self {
        Self { input, position: 0 }
    }

    /// Tokenizes the entire input.
    fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        while let Some(token) = self.next_token() {
            tokens.push(token);
        }

        tokens
    }

    /// Returns the next token, or None if at end of input.
    fn next_token(&mut self) -> Option<Token> {
        loop {
            let ch = self.input[self.position..].chars().next()?;

            if ch.is_whitespace() {
                self.position += ch.len_utf8();
                continue;
            }

            let matched = MATCHERS
                .iter()
                .find_map(|matcher| matcher(self.input, self.position));

            match matched {
                Some((kind, end)) => {
                    let token = Token {
                        kind,
                        text: self.input[self.position..end].to_string(),
                        start: self.position,
                        end,
                    };
                    self.position = end;
                    return Some(token);
                }
                // Nothing claims this character; skip it
                None => self.position += ch.len_utf8(),
            }
        }
    }
}

/// Returns true for bytes that may appear in field names and bare words.
fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'_' | b'.' | b'-')
}

/// Returns the end of the run of word bytes starting at `pos`.
fn word_end(bytes: &[u8], pos: usize) -> usize {
    pos + bytes[pos..].iter().take_while(|&&b| is_word_byte(b)).count()
}

/// Returns the offset just past the closing quote of a phrase opening at `pos`.
///
/// Backslash escapes the following character. Returns None for unterminated phrases.
pub fn quoted_end(bytes: &[u8], pos: usize) -> Option<usize> {
    let mut i = pos + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => return Some(i + 1),
            _ => i += 1,
        }
    }
    None
}

/// Matches `[...]` or `{...}` up to the first closer of the same kind.
fn match_range(input: &str, pos: usize) -> Option<(TokenKind, usize)> {
    let bytes = input.as_bytes();
    let bracket = Bracket::opened_by(bytes[pos]).filter(|bracket| bracket.range)?;
    let offset = bytes[pos + 1..]
        .iter()
        .position(|&b| bracket.is_closed_by(b))?;
    Some((TokenKind::Range, pos + offset + 2))
}

/// Matches a parenthesized span up to its balancing `)`.
fn match_group(input: &str, pos: usize) -> Option<(TokenKind, usize)> {
    let bytes = input.as_bytes();
    if bytes[pos] != b'(' {
        return None;
    }

    let mut depth = 0usize;
    let mut i = pos;
    while i < bytes.len() {
        match bytes[i] {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Some((TokenKind::Group, i + 1));
                }
            }
            b'"' => {
                // Parentheses inside a closed phrase don't count
                if let Some(end) = quoted_end(bytes, i) {
                    i = end;
                    continue;
                }
            }
            b'\\' => {
                i += 2;
                continue;
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// Matches a quoted phrase, quotes included.
fn match_quoted(input: &str, pos: usize) -> Option<(TokenKind, usize)> {
    let bytes = input.as_bytes();
    if bytes[pos] != b'"' {
        return None;
    }
    quoted_end(bytes, pos).map(|end| (TokenKind::Value, end))
}

/// Matches an identifier that is immediately followed by a field separator.
fn match_field(input: &str, pos: usize) -> Option<(TokenKind, usize)> {
    let bytes = input.as_bytes();
    if !(bytes[pos].is_ascii_alphabetic() || bytes[pos] == b'_') {
        return None;
    }
    let end = word_end(bytes, pos);
    let next = bytes.get(end)?;
    FIELD_SEPARATORS
        .contains(next)
        .then_some((TokenKind::Field, end))
}

/// Matches `&&`, `||`, `>=` and `<=`.
fn match_compound_operator(input: &str, pos: usize) -> Option<(TokenKind, usize)> {
    let rest = &input[pos..];
    COMPOUND_OPERATORS
        .iter()
        .any(|op| rest.starts_with(op))
        .then_some((TokenKind::Operator, pos + 2))
}

/// Matches a single operator or delimiter character.
fn match_single_operator(input: &str, pos: usize) -> Option<(TokenKind, usize)> {
    SINGLE_OPERATORS
        .contains(&input.as_bytes()[pos])
        .then_some((TokenKind::Operator, pos + 1))
}

/// Matches a bare word, classifying keywords as operators.
fn match_word(input: &str, pos: usize) -> Option<(TokenKind, usize)> {
    let end = word_end(input.as_bytes(), pos);
    if end == pos {
        return None;
    }

    let word = &input[pos..end];
    let kind = if KEYWORDS.iter().any(|kw| word.eq_ignore_ascii_case(kw)) {
        TokenKind::Operator
    } else {
        TokenKind::Value
    };
    Some((kind, end))
}

/// Tokenizes a query string.
///
/// Never fails: unbalanced brackets and unterminated quotes fall through to simpler
/// token kinds, and characters no rule accepts are skipped.
pub fn tokenize(input: &str) -> Vec<Token> {
    Lexer::new(input).tokenize()
}
