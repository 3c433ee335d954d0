//! Text range and position types for source location tracking.
//!
//! Byte offsets are the primary currency. `SourcePosition` adds the
//! human-facing line and column, where the column counts characters (not
//! bytes) from the start of the line.

use serde::Serialize;
use std::fmt;

/// A position in source text, measured as a byte offset from the start.
pub type TextPos = u32;

/// A half-open byte range `[pos, end)` covered by a token or node.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Serialize)]
pub struct TextRange {
    pub pos: TextPos,
    pub end: TextPos,
}

impl TextRange {
    #[inline]
    pub fn new(pos: TextPos, end: TextPos) -> Self {
        Self { pos, end }
    }
}

impl fmt::Debug for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.pos, self.end)
    }
}

/// A fully resolved source location.
///
/// `line` and `column` are 1-based; `offset` is the 0-based byte offset.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize)]
pub struct SourcePosition {
    pub line: u32,
    pub column: u32,
    pub offset: TextPos,
}

impl SourcePosition {
    /// The first character of a source buffer.
    pub const START: SourcePosition = SourcePosition {
        line: 1,
        column: 1,
        offset: 0,
    };

    #[inline]
    pub const fn new(line: u32, column: u32, offset: TextPos) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }
}

impl Default for SourcePosition {
    fn default() -> Self {
        Self::START
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Returns the byte length of the line terminator starting at `bytes[0]`,
/// or 0 when there is none. `\r\n` counts as a single terminator.
#[inline]
pub fn line_terminator_len(bytes: &[u8]) -> usize {
    match bytes {
        [b'\r', b'\n', ..] => 2,
        [b'\r', ..] | [b'\n', ..] => 1,
        // U+2028 LINE SEPARATOR and U+2029 PARAGRAPH SEPARATOR
        [0xE2, 0x80, 0xA8, ..] | [0xE2, 0x80, 0xA9, ..] => 3,
        _ => 0,
    }
}

/// Maps byte offsets to line/column pairs for a source buffer.
#[derive(Debug, Clone)]
pub struct LineMap {
    /// Byte offsets of the start of each line.
    line_starts: Vec<TextPos>,
}

impl LineMap {
    pub fn new(text: &str) -> Self {
        let bytes = text.as_bytes();
        let mut line_starts = vec![0u32];
        let mut i = 0;
        while i < bytes.len() {
            let len = line_terminator_len(&bytes[i..]);
            if len > 0 {
                i += len;
                line_starts.push(i as u32);
            } else {
                i += 1;
            }
        }
        Self { line_starts }
    }

    /// The 0-based line index containing `pos`.
    pub fn line_of(&self, pos: TextPos) -> usize {
        match self.line_starts.binary_search(&pos) {
            Ok(line) => line,
            Err(line) => line - 1,
        }
    }

    #[inline]
    pub fn line_start(&self, line: usize) -> TextPos {
        self.line_starts[line]
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Resolve a byte offset of `text` (the buffer this map was built from).
    pub fn position_of(&self, text: &str, pos: TextPos) -> SourcePosition {
        let line = self.line_of(pos);
        let start = self.line_starts[line] as usize;
        let end = (pos as usize).min(text.len());
        let column = text.get(start..end).map_or(end - start, |s| s.chars().count());
        SourcePosition::new(line as u32 + 1, column as u32 + 1, pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_range_debug() {
        assert_eq!(format!("{:?}", TextRange::new(4, 9)), "4..9");
    }

    #[test]
    fn test_line_map_terminators() {
        let text = "a\nb\r\nc\rd\u{2028}e";
        let map = LineMap::new(text);
        assert_eq!(map.line_count(), 5);
        assert_eq!(map.line_of(0), 0);
        assert_eq!(map.line_of(2), 1);
        assert_eq!(map.line_of(5), 2);
        assert_eq!(map.line_of(7), 3);
        assert_eq!(map.position_of(text, 5), SourcePosition::new(3, 1, 5));
    }

    #[test]
    fn test_columns_count_characters() {
        let text = "é + x";
        let map = LineMap::new(text);
        // 'é' is two bytes; 'x' sits at byte 5 but is the fifth character.
        assert_eq!(map.position_of(text, 5), SourcePosition::new(1, 5, 5));
    }

    #[test]
    fn test_crlf_is_one_terminator() {
        assert_eq!(line_terminator_len(b"\r\nx"), 2);
        assert_eq!(line_terminator_len(b"\rx"), 1);
        assert_eq!(line_terminator_len(b"x\n"), 0);
        assert_eq!(line_terminator_len("\u{2029}".as_bytes()), 3);
    }
}
