//! Character classification used by the scanner.

use unicode_xid::UnicodeXID;

pub const ZWNJ: char = '\u{200C}';
pub const ZWJ: char = '\u{200D}';
pub const BOM: char = '\u{FEFF}';

/// Whitespace that does not end a line.
#[inline]
pub fn is_white_space(ch: char) -> bool {
    matches!(
        ch,
        ' ' | '\t'
            | '\u{000B}' // vertical tab
            | '\u{000C}' // form feed
            | '\u{00A0}' // no-break space
            | '\u{1680}' // ogham space mark
            | '\u{2000}'..='\u{200A}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | BOM
    )
}

#[inline]
pub fn is_identifier_start(ch: char) -> bool {
    if ch.is_ascii() {
        ch.is_ascii_alphabetic() || ch == '_' || ch == '$'
    } else {
        ch.is_xid_start()
    }
}

#[inline]
pub fn is_identifier_part(ch: char) -> bool {
    if ch.is_ascii() {
        ch.is_ascii_alphanumeric() || ch == '_' || ch == '$'
    } else {
        ch.is_xid_continue() || ch == ZWNJ || ch == ZWJ
    }
}

/// Width in bytes of the UTF-8 sequence introduced by `lead`.
#[inline]
pub fn utf8_width(lead: u8) -> usize {
    match lead {
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => 1,
    }
}

/// Offset of the first line terminator in `bytes`, if any.
pub fn find_line_terminator(bytes: &[u8]) -> Option<usize> {
    let mut from = 0;
    while let Some(found) = memchr::memchr3(b'\n', b'\r', 0xE2, &bytes[from..]) {
        let at = from + found;
        if bytes[at] != 0xE2 || quill_core::text::line_terminator_len(&bytes[at..]) > 0 {
            return Some(at);
        }
        from = at + 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_classes() {
        assert!(is_identifier_start('$'));
        assert!(is_identifier_start('é'));
        assert!(!is_identifier_start('1'));
        assert!(is_identifier_part('1'));
        assert!(is_identifier_part(ZWJ));
        assert!(!is_identifier_part('-'));
    }

    #[test]
    fn test_find_line_terminator() {
        assert_eq!(find_line_terminator(b"abc\ndef"), Some(3));
        assert_eq!(find_line_terminator("a\u{2028}b".as_bytes()), Some(1));
        // U+2026 shares the lead byte with the separators
        assert_eq!(find_line_terminator("a\u{2026}b".as_bytes()), None);
        assert_eq!(find_line_terminator(b"no terminator"), None);
    }

    #[test]
    fn test_white_space() {
        assert!(is_white_space('\u{3000}'));
        assert!(!is_white_space('\n'));
    }
}
