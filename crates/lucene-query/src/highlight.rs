//! Syntax highlighting scopes.
//!
//! A finer-grained scan than [`tokenize`](crate::tokenize) that labels every
//! non-whitespace character with a highlighting scope: numbers, dates, fuzzy and boost
//! suffixes, wildcards, escapes, regular expressions. Ranges are scanned in a separate
//! state so that `TO`, `*` and the bounds get range-specific scopes.
//!
//! Rules are tried in order at each position and the first match wins. Lookahead and
//! lookbehind conditions are plain byte comparisons.

use serde::Serialize;

use crate::lexer::{Bracket, quoted_end};

/// Highlighting scope of a span. Serializes as the dotted editor token name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Scope {
    /// `/pattern/`
    #[serde(rename = "regexp")]
    Regexp,
    /// Field name before a separator.
    #[serde(rename = "field")]
    Field,
    /// Quoted field name before a separator.
    #[serde(rename = "field.quoted")]
    QuotedField,
    /// The `:` field separator.
    #[serde(rename = "delimiter.colon")]
    Colon,
    /// `>=`, `<=`, `>`, `<`, `=`.
    #[serde(rename = "operator.comparison")]
    Comparison,
    /// `AND`, `OR`, `NOT`, `&&`, `||`, `!`.
    #[serde(rename = "keyword")]
    Keyword,
    /// `TO`.
    #[serde(rename = "keyword.range")]
    RangeKeyword,
    /// Required and prohibited prefixes `+` and `-`.
    #[serde(rename = "operator")]
    Operator,
    /// `"phrase"~N`.
    #[serde(rename = "string.proximity")]
    ProximityPhrase,
    /// `"phrase"`.
    #[serde(rename = "string")]
    Phrase,
    /// A backslash-escaped special character.
    #[serde(rename = "string.escape")]
    Escape,
    /// `[` or `]`.
    #[serde(rename = "delimiter.square")]
    SquareBracket,
    /// `{` or `}`.
    #[serde(rename = "delimiter.curly")]
    CurlyBracket,
    /// `(` or `)`.
    #[serde(rename = "delimiter.parenthesis")]
    Parenthesis,
    /// `*` as an open range bound.
    #[serde(rename = "operator.wildcard.range")]
    RangeWildcard,
    /// `~` with optional similarity.
    #[serde(rename = "operator.fuzzy")]
    Fuzzy,
    /// `^` with optional factor.
    #[serde(rename = "operator.boost")]
    Boost,
    /// `*` or `?` inside a term.
    #[serde(rename = "operator.wildcard")]
    Wildcard,
    /// Integer, decimal or scientific number.
    #[serde(rename = "number")]
    Number,
    /// ISO or slash-separated date.
    #[serde(rename = "date")]
    Date,
    /// A bare term.
    #[serde(rename = "identifier")]
    Identifier,
    /// Anything else.
    #[serde(rename = "text")]
    Text,
}

impl Scope {
    /// Returns the dotted editor token name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Regexp => "regexp",
            Self::Field => "field",
            Self::QuotedField => "field.quoted",
            Self::Colon => "delimiter.colon",
            Self::Comparison => "operator.comparison",
            Self::Keyword => "keyword",
            Self::RangeKeyword => "keyword.range",
            Self::Operator => "operator",
            Self::ProximityPhrase => "string.proximity",
            Self::Phrase => "string",
            Self::Escape => "string.escape",
            Self::SquareBracket => "delimiter.square",
            Self::CurlyBracket => "delimiter.curly",
            Self::Parenthesis => "delimiter.parenthesis",
            Self::RangeWildcard => "operator.wildcard.range",
            Self::Fuzzy => "operator.fuzzy",
            Self::Boost => "operator.boost",
            Self::Wildcard => "operator.wildcard",
            Self::Number => "number",
            Self::Date => "date",
            Self::Identifier => "identifier",
            Self::Text => "text",
        }
    }
}

/// A highlighted span of query text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HighlightSpan {
    /// Scope of the span.
    pub scope: Scope,
    /// Byte offset of the first character.
    pub start: usize,
    /// Byte offset one past the last character.
    pub end: usize,
}

/// Characters that may be backslash-escaped.
pub const ESCAPABLE: &str = "\\+!(){}[]^\"~*?:|&/-";

/// Characters that may follow a field name.
const FIELD_SEPARATORS: &[u8] = b":><=";

/// Scans a query into highlight spans.
struct Scanner<'a> {
    /// Input as bytes. All rules match ASCII, so offsets stay on char boundaries.
    bytes: &'a [u8],
    /// The original input string.
    input: &'a str,
    /// Current byte position in input.
    position: usize,
    /// The range being scanned, if any.
    range: Option<&'static Bracket>,
}

impl<'a> Scanner<'a> {
    /// Creates a scanner in the root state.
    fn new(input: &'a str) -> Self {
        Self {
            bytes: input.as_bytes(),
            input,
            position: 0,
            range: None,
        }
    }

    /// Scans the entire input.
    fn scan(mut self) -> Vec<HighlightSpan> {
        let mut spans = Vec::new();

        while let Some(ch) = self.input[self.position..].chars().next() {
            if ch.is_whitespace() {
                self.position += ch.len_utf8();
                continue;
            }

            let (scope, end) = match self.range {
                Some(range) => self.range_rule(range),
                None => self.root_rule(),
            }
            .unwrap_or((Scope::Text, self.position + ch.len_utf8()));

            spans.push(HighlightSpan {
                scope,
                start: self.position,
                end,
            });
            self.position = end;
        }

        spans
    }

    /// Applies the root-state rules at the current position.
    fn root_rule(&mut self) -> Option<(Scope, usize)> {
        let b = self.bytes;
        let pos = self.position;

        if let Some(end) = regex_literal(b, pos) {
            return Some((Scope::Regexp, end));
        }
        if let Some(end) = quoted_field(b, pos) {
            return Some((Scope::QuotedField, end));
        }
        if let Some(end) = identifier(b, pos)
            && b.get(end).is_some_and(|c| FIELD_SEPARATORS.contains(c))
        {
            return Some((Scope::Field, end));
        }

        match b[pos] {
            b':' => return Some((Scope::Colon, pos + 1)),
            b'>' | b'<' if b.get(pos + 1) == Some(&b'=') => {
                return Some((Scope::Comparison, pos + 2));
            }
            b'>' | b'<' | b'=' => return Some((Scope::Comparison, pos + 1)),
            _ => {}
        }

        if let Some(end) = ["AND", "OR", "NOT"]
            .iter()
            .find_map(|kw| keyword_at(b, pos, kw))
        {
            return Some((Scope::Keyword, end));
        }
        if b[pos..].starts_with(b"&&") || b[pos..].starts_with(b"||") {
            return Some((Scope::Keyword, pos + 2));
        }
        if b[pos] == b'!' && followed_by_non_space(b, pos) {
            return Some((Scope::Keyword, pos + 1));
        }
        if let Some(end) = keyword_at(b, pos, "TO") {
            return Some((Scope::RangeKeyword, end));
        }
        if matches!(b[pos], b'+' | b'-') && followed_by_non_space(b, pos) {
            return Some((Scope::Operator, pos + 1));
        }

        if b[pos] == b'"'
            && let Some(end) = quoted_end(b, pos)
        {
            return Some(match proximity_suffix(b, end) {
                Some(end) => (Scope::ProximityPhrase, end),
                None => (Scope::Phrase, end),
            });
        }

        if let Some(bracket) = Bracket::opened_by(b[pos]) {
            if bracket.range {
                self.range = Some(bracket);
            }
            return Some((bracket.scope, pos + 1));
        }

        match b[pos] {
            b'*' if is_open_range_bound(b, pos) => return Some((Scope::RangeWildcard, pos + 1)),
            b'~' => return Some((Scope::Fuzzy, decimal_suffix(b, pos + 1))),
            b'^' => return Some((Scope::Boost, decimal_suffix(b, pos + 1))),
            b'*' | b'?' => return Some((Scope::Wildcard, pos + 1)),
            b')' => return Some((Scope::Parenthesis, pos + 1)),
            _ => {}
        }

        if let Some(end) = date(b, pos) {
            return Some((Scope::Date, end));
        }
        if let Some(end) = number(b, pos) {
            return Some((Scope::Number, end));
        }
        if b[pos] == b'\\'
            && b.get(pos + 1).is_some_and(|c| ESCAPABLE.as_bytes().contains(c))
        {
            return Some((Scope::Escape, pos + 2));
        }
        identifier(b, pos).map(|end| (Scope::Identifier, end))
    }

    /// Applies the range-state rules at the current position.
    fn range_rule(&mut self, range: &Bracket) -> Option<(Scope, usize)> {
        let b = self.bytes;
        let pos = self.position;

        if range.is_closed_by(b[pos]) {
            self.range = None;
            return Some((range.scope, pos + 1));
        }
        if let Some(end) = keyword_at(b, pos, "TO") {
            return Some((Scope::RangeKeyword, end));
        }
        if b[pos] == b'*' {
            return Some((Scope::RangeWildcard, pos + 1));
        }
        if let Some(end) = date(b, pos) {
            return Some((Scope::Date, end));
        }
        if let Some(end) = number(b, pos) {
            return Some((Scope::Number, end));
        }
        identifier(b, pos).map(|end| (Scope::Identifier, end))
    }
}

/// Returns true for identifier continuation bytes.
fn is_identifier_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'_' | b'.' | b'-')
}

/// Returns true for bytes that count as word characters at keyword boundaries.
fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Counts ASCII digits starting at `pos`.
fn digit_count(b: &[u8], pos: usize) -> usize {
    b.get(pos..)
        .map_or(0, |rest| rest.iter().take_while(|c| c.is_ascii_digit()).count())
}

/// Matches exactly `n` digits at `pos`.
fn digits(b: &[u8], pos: usize, n: usize) -> Option<usize> {
    (digit_count(b, pos) >= n).then_some(pos + n)
}

/// Matches the byte `c` at `pos`.
fn byte(b: &[u8], pos: usize, c: u8) -> Option<usize> {
    (b.get(pos) == Some(&c)).then_some(pos + 1)
}

/// Returns true if the byte after `pos` exists and is not whitespace.
fn followed_by_non_space(b: &[u8], pos: usize) -> bool {
    b.get(pos + 1).is_some_and(|c| !c.is_ascii_whitespace())
}

/// Matches `[A-Za-z_][A-Za-z0-9_.-]*`.
fn identifier(b: &[u8], pos: usize) -> Option<usize> {
    if !(b[pos].is_ascii_alphabetic() || b[pos] == b'_') {
        return None;
    }
    Some(pos + 1 + b[pos + 1..].iter().take_while(|&&c| is_identifier_byte(c)).count())
}

/// Matches `keyword` at `pos` when it stands as a whole word.
fn keyword_at(b: &[u8], pos: usize, keyword: &str) -> Option<usize> {
    let end = pos + keyword.len();
    let standalone = b[pos..].starts_with(keyword.as_bytes())
        && (pos == 0 || !is_word_byte(b[pos - 1]))
        && b.get(end).is_none_or(|&c| !is_word_byte(c));
    standalone.then_some(end)
}

/// Matches `/pattern/` with backslash escapes.
fn regex_literal(b: &[u8], pos: usize) -> Option<usize> {
    if b[pos] != b'/' {
        return None;
    }
    let mut i = pos + 1;
    while i < b.len() {
        match b[i] {
            b'\\' if i + 1 < b.len() => i += 2,
            b'\\' => return None,
            b'/' => return Some(i + 1),
            _ => i += 1,
        }
    }
    None
}

/// Matches a non-empty quoted field name directly followed by a separator.
fn quoted_field(b: &[u8], pos: usize) -> Option<usize> {
    if b[pos] != b'"' {
        return None;
    }
    let close = pos + 2 + b.get(pos + 1..)?.iter().skip(1).position(|&c| c == b'"')?;
    if b[pos + 1] == b'"' {
        return None;
    }
    b.get(close + 1)
        .is_some_and(|c| FIELD_SEPARATORS.contains(c))
        .then_some(close + 1)
}

/// Matches `~` followed by at least one digit, directly after a phrase.
fn proximity_suffix(b: &[u8], pos: usize) -> Option<usize> {
    let start = byte(b, pos, b'~')?;
    let count = digit_count(b, start);
    (count > 0).then_some(start + count)
}

/// Consumes `\d*\.?\d*` and returns where it stops.
fn decimal_suffix(b: &[u8], pos: usize) -> usize {
    let mut i = pos + digit_count(b, pos);
    if let Some(next) = byte(b, i, b'.') {
        i = next;
    }
    i + digit_count(b, i)
}

/// Returns true if the `*` at `pos` is an open range bound.
///
/// That is the case when whitespace and then `TO`, `]` or `}` follow, or when it comes
/// after `[`, `{` or `TO` and some whitespace.
fn is_open_range_bound(b: &[u8], pos: usize) -> bool {
    let after = pos + 1;
    let gap = b[after..].iter().take_while(|c| c.is_ascii_whitespace()).count();
    if gap > 0 {
        let rest = &b[after + gap..];
        if rest.starts_with(b"TO") || rest.starts_with(b"]") || rest.starts_with(b"}") {
            return true;
        }
    }

    let before = &b[..pos];
    let gap = before
        .iter()
        .rev()
        .take_while(|c| c.is_ascii_whitespace())
        .count();
    if gap == 0 {
        return false;
    }
    let before = &before[..before.len() - gap];
    before.ends_with(b"[") || before.ends_with(b"{") || before.ends_with(b"TO")
}

/// Matches `-?\d+\.?\d*([eE][+-]?\d+)?`.
fn number(b: &[u8], pos: usize) -> Option<usize> {
    let start = byte(b, pos, b'-').unwrap_or(pos);
    let count = digit_count(b, start);
    if count == 0 {
        return None;
    }
    let mut i = start + count;
    if let Some(next) = byte(b, i, b'.') {
        i = next + digit_count(b, next);
    }
    Some(exponent(b, i).unwrap_or(i))
}

/// Matches `[eE][+-]?\d+`.
fn exponent(b: &[u8], pos: usize) -> Option<usize> {
    let mut i = byte(b, pos, b'e').or_else(|| byte(b, pos, b'E'))?;
    if let Some(next) = byte(b, i, b'+').or_else(|| byte(b, i, b'-')) {
        i = next;
    }
    let count = digit_count(b, i);
    (count > 0).then_some(i + count)
}

/// Matches `YYYY-MM-DD` with optional time, `DD/MM/YYYY` or `YYYY/MM/DD`.
fn date(b: &[u8], pos: usize) -> Option<usize> {
    iso_date(b, pos)
        .or_else(|| slashed_date(b, pos, [2, 2, 4]))
        .or_else(|| slashed_date(b, pos, [4, 2, 2]))
}

/// Matches `YYYY-MM-DD` and an optional `Thh:mm:ss` suffix.
fn iso_date(b: &[u8], pos: usize) -> Option<usize> {
    let i = digits(b, pos, 4)?;
    let i = byte(b, i, b'-')?;
    let i = digits(b, i, 2)?;
    let i = byte(b, i, b'-')?;
    let i = digits(b, i, 2)?;
    Some(iso_time(b, i).unwrap_or(i))
}

/// Matches `Thh:mm:ss`, optional `.fff`, optional zone.
fn iso_time(b: &[u8], pos: usize) -> Option<usize> {
    let i = byte(b, pos, b'T')?;
    let i = digits(b, i, 2)?;
    let i = byte(b, i, b':')?;
    let i = digits(b, i, 2)?;
    let i = byte(b, i, b':')?;
    let mut i = digits(b, i, 2)?;
    if let Some(next) = byte(b, i, b'.').and_then(|j| digits(b, j, 3)) {
        i = next;
    }
    Some(zone(b, i).unwrap_or(i))
}

/// Matches `Z` or `[+-]hh:mm`.
fn zone(b: &[u8], pos: usize) -> Option<usize> {
    if let Some(end) = byte(b, pos, b'Z') {
        return Some(end);
    }
    let i = byte(b, pos, b'+').or_else(|| byte(b, pos, b'-'))?;
    let i = digits(b, i, 2)?;
    let i = byte(b, i, b':')?;
    digits(b, i, 2)
}

/// Matches three digit groups of the given widths separated by `/`.
fn slashed_date(b: &[u8], pos: usize, widths: [usize; 3]) -> Option<usize> {
    let i = digits(b, pos, widths[0])?;
    let i = byte(b, i, b'/')?;
    let i = digits(b, i, widths[1])?;
    let i = byte(b, i, b'/')?;
    digits(b, i, widths[2])
}

/// Labels every non-whitespace character of `input` with a highlighting scope.
pub fn highlight(input: &str) -> Vec<HighlightSpan> {
    Scanner::new(input).scan()
}
