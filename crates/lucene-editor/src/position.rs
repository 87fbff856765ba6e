//! Line/column positions and their mapping onto byte offsets.
//!
//! Editors address text by zero-based line and character column, while the query core works
//! on byte offsets. Lines are separated by `\n`.

use serde::Serialize;

/// A zero-based line and character column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    /// Line index.
    pub line: usize,
    /// Column, counted in characters.
    pub column: usize,
}

/// A span between two positions on the same or different lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct TextRange {
    /// Inclusive start.
    pub start: Position,
    /// Exclusive end.
    pub end: Position,
}

impl Position {
    /// Creates a position.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Maps a byte offset in `text` to a position.
    ///
    /// Offsets past the end clamp to the end of the text; offsets inside a multi-byte
    /// character count that character as preceding the position.
    pub fn at_offset(text: &str, offset: usize) -> Self {
        let offset = offset.min(text.len());
        let before = &text.as_bytes()[..offset];
        let line = before.iter().filter(|&&b| b == b'\n').count();
        let line_start = before
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(0, |i| i + 1);
        let column = text[line_start..]
            .char_indices()
            .take_while(|(i, _)| line_start + i < offset)
            .count();
        Self { line, column }
    }

    /// Maps this position to a byte offset in `text`.
    ///
    /// Lines past the end clamp to the end of the text, columns past the end of a line clamp
    /// to the end of that line.
    pub fn offset_in(self, text: &str) -> usize {
        let Some(line_start) = line_start(text, self.line) else {
            return text.len();
        };
        let line = line_text(text, line_start);
        line_start + column_to_byte(line, self.column)
    }
}

/// Byte offset of the start of line `line`, if the text has that many lines.
fn line_start(text: &str, line: usize) -> Option<usize> {
    if line == 0 {
        return Some(0);
    }
    text.match_indices('\n').nth(line - 1).map(|(i, _)| i + 1)
}

/// The text of the line starting at `start`, without its terminator.
fn line_text(text: &str, start: usize) -> &str {
    let rest = &text[start..];
    rest.find('\n').map_or(rest, |end| &rest[..end])
}

/// Byte index of character column `column` in `line`, clamped to the line length.
fn column_to_byte(line: &str, column: usize) -> usize {
    line.char_indices().nth(column).map_or(line.len(), |(i, _)| i)
}

/// Returns the text of `position`'s line up to the position.
pub fn text_before_position(text: &str, position: Position) -> &str {
    let Some(start) = line_start(text, position.line) else {
        return "";
    };
    let line = line_text(text, start);
    &line[..column_to_byte(line, position.column)]
}

/// Characters that end a word, besides whitespace.
const WORD_SEPARATORS: &str = "`~!@#$%^&*()-=+[{]}\\|;:'\",.<>/?";

/// The word ending at `position` and the column it starts at.
///
/// A word is a run of characters that are neither whitespace nor punctuation. The result
/// is empty when the character before the position ends a word.
pub fn word_until_position(text: &str, position: Position) -> (&str, usize) {
    let before = text_before_position(text, position);
    let start = before
        .char_indices()
        .rev()
        .take_while(|&(_, c)| !c.is_whitespace() && !WORD_SEPARATORS.contains(c))
        .last()
        .map_or(before.len(), |(i, _)| i);
    let word = &before[start..];
    (word, position.column.min(before.chars().count()) - word.chars().count())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_round_trip_single_line() {
        let text = "title:test";
        for offset in 0..=text.len() {
            let pos = Position::at_offset(text, offset);
            assert_eq!(pos, Position::new(0, offset));
            assert_eq!(pos.offset_in(text), offset);
        }
    }

    #[test]
    fn multi_line_offsets() {
        let text = "a AND\nstatus:x";
        assert_eq!(Position::at_offset(text, 6), Position::new(1, 0));
        assert_eq!(Position::new(1, 7).offset_in(text), 13);
        assert_eq!(Position::new(0, 5).offset_in(text), 5);
    }

    #[test]
    fn columns_count_characters() {
        let text = "é:x";
        assert_eq!(Position::new(0, 1).offset_in(text), 2);
        assert_eq!(Position::at_offset(text, 3), Position::new(0, 2));
    }

    #[test]
    fn clamping() {
        let text = "ab\ncd";
        assert_eq!(Position::new(0, 99).offset_in(text), 2);
        assert_eq!(Position::new(9, 0).offset_in(text), text.len());
        assert_eq!(Position::at_offset(text, 99), Position::new(1, 2));
    }

    #[test]
    fn text_before() {
        let text = "a\nstatus:ac rest";
        assert_eq!(text_before_position(text, Position::new(1, 9)), "status:ac");
        assert_eq!(text_before_position(text, Position::new(5, 0)), "");
    }

    #[test]
    fn word_until() {
        let text = "title:tes";
        assert_eq!(word_until_position(text, Position::new(0, 9)), ("tes", 6));
        assert_eq!(word_until_position(text, Position::new(0, 6)), ("", 6));
        assert_eq!(word_until_position(text, Position::new(0, 3)), ("tit", 0));
        assert_eq!(word_until_position("a  ", Position::new(0, 3)), ("", 3));
    }

    #[test]
    fn word_until_non_ascii() {
        assert_eq!(word_until_position("x:ém", Position::new(0, 4)), ("ém", 2));
    }
}
