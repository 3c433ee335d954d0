//! The scanner.
//!
//! Converts source text into tokens, one per call to [`Scanner::scan`].
//! Keywords, operators, punctuators and escapes come from the [`Grammar`]
//! passed in; the scanner itself only knows the structural rules
//! (trivia, literals, identifiers). Scanning stops at the first error.

use crate::char_codes::*;
use crate::token::{TemplateSubstitution, TemplateValue, Token, TokenValue};
use log::trace;
use memchr::memmem;
use quill_ast::syntax_kind::{LiteralWord, Punctuator, TokenKind};
use quill_core::text::{line_terminator_len, SourcePosition, TextPos};
use quill_diagnostics::{LexError, LexErrorKind};
use quill_grammar::{Grammar, SymbolKind, WordKind};

/// Scan all of `source`. The last token is always `EndOfInput`.
pub fn scan(source: &str, grammar: &Grammar) -> Result<Vec<Token>, LexError> {
    Scanner::new(source, grammar).collect()
}

type Scanned = Result<(TokenKind, usize, TokenValue), LexError>;

/// A lazy scanner over a source buffer.
pub struct Scanner<'s, 'g> {
    text: &'s str,
    grammar: &'g Grammar,
    /// Byte index into `text` of the next unscanned character.
    pos: usize,
    /// Resolved position of `pos`.
    position: SourcePosition,
    /// Absolute offset of `text[0]`.
    origin: TextPos,
    /// A line terminator was skipped since the last token.
    preceded_by_line_terminator: bool,
    finished: bool,
}

impl<'s, 'g> Scanner<'s, 'g> {
    pub fn new(text: &'s str, grammar: &'g Grammar) -> Self {
        Self::new_at(text, grammar, SourcePosition::START)
    }

    /// Create a scanner over a fragment whose first character sits at
    /// `origin` in some enclosing buffer. Reported positions are absolute.
    pub fn new_at(text: &'s str, grammar: &'g Grammar, origin: SourcePosition) -> Self {
        Self {
            text,
            grammar,
            pos: 0,
            position: origin,
            origin: origin.offset,
            preceded_by_line_terminator: false,
            finished: false,
        }
    }

    /// Position of the next unscanned character.
    #[inline]
    pub fn position(&self) -> SourcePosition {
        self.position
    }

    /// Scan the next token. Once the end is reached every further call
    /// returns another `EndOfInput` token.
    pub fn scan(&mut self) -> Result<Token, LexError> {
        self.skip_trivia()?;

        let start = self.pos;
        let position = self.position;
        let preceded_by_line_terminator = std::mem::take(&mut self.preceded_by_line_terminator);

        let Some(ch) = self.char_at(start) else {
            return Ok(Token {
                kind: TokenKind::EndOfInput,
                lexeme: String::new(),
                value: TokenValue::None,
                position,
                end: position.offset,
                preceded_by_line_terminator,
            });
        };

        let (kind, end, value) = match ch {
            '"' | '\'' => {
                let (end, value) = self.scan_string(start, ch)?;
                (TokenKind::StringLiteral, end, TokenValue::String(value))
            }
            '`' => {
                let (end, value) = self.scan_template(start)?;
                (TokenKind::TemplateLiteral, end, TokenValue::Template(value))
            }
            '0'..='9' => self.scan_number(start)?,
            '.' if self.byte_at(start + 1).is_some_and(|b| b.is_ascii_digit()) => {
                self.scan_number(start)?
            }
            '\\' => self.scan_identifier(start)?,
            c if is_identifier_start(c) => self.scan_identifier(start)?,
            _ => self.scan_symbol(start)?,
        };

        let text = self.text;
        self.advance_to(end);
        let token = Token {
            kind,
            lexeme: text[start..end].to_string(),
            value,
            position,
            end: self.position.offset,
            preceded_by_line_terminator,
        };
        trace!("scanned {} {:?} at {}", token.kind, token.lexeme, token.position);
        Ok(token)
    }

    // ========================================================================
    // Position bookkeeping
    // ========================================================================

    #[inline]
    fn char_at(&self, index: usize) -> Option<char> {
        self.text.get(index..)?.chars().next()
    }

    #[inline]
    fn byte_at(&self, index: usize) -> Option<u8> {
        self.text.as_bytes().get(index).copied()
    }

    /// Resolve `to` by walking forward from a known position.
    fn walk_position(&self, mut index: usize, mut position: SourcePosition, to: usize) -> SourcePosition {
        let bytes = self.text.as_bytes();
        while index < to {
            let terminator = line_terminator_len(&bytes[index..]);
            if terminator > 0 {
                index += terminator;
                position.line += 1;
                position.column = 1;
            } else {
                index += utf8_width(bytes[index]);
                position.column += 1;
            }
        }
        position.offset = self.origin + to as TextPos;
        position
    }

    fn position_at(&self, index: usize) -> SourcePosition {
        self.walk_position(self.pos, self.position, index)
    }

    fn advance_to(&mut self, to: usize) {
        self.position = self.walk_position(self.pos, self.position, to);
        self.pos = to;
    }

    fn error_at(&self, index: usize, kind: LexErrorKind) -> LexError {
        LexError::new(kind, self.position_at(index))
    }

    // ========================================================================
    // Trivia
    // ========================================================================

    fn skip_trivia(&mut self) -> Result<(), LexError> {
        let text = self.text;
        let bytes = text.as_bytes();
        loop {
            let Some(&b) = bytes.get(self.pos) else {
                return Ok(());
            };

            let terminator = line_terminator_len(&bytes[self.pos..]);
            if terminator > 0 {
                self.preceded_by_line_terminator = true;
                self.advance_to(self.pos + terminator);
                continue;
            }

            match (b, bytes.get(self.pos + 1)) {
                (b'/', Some(b'/')) => {
                    let body = self.pos + 2;
                    let end = find_line_terminator(&bytes[body..]).map_or(bytes.len(), |n| body + n);
                    self.advance_to(end);
                }
                (b'/', Some(b'*')) => {
                    let body = self.pos + 2;
                    let Some(close) = memmem::find(&bytes[body..], b"*/") else {
                        return Err(LexError::new(LexErrorKind::UnterminatedComment, self.position));
                    };
                    if find_line_terminator(&bytes[body..body + close]).is_some() {
                        self.preceded_by_line_terminator = true;
                    }
                    self.advance_to(body + close + 2);
                }
                _ => match self.char_at(self.pos) {
                    Some(ch) if is_white_space(ch) => self.advance_to(self.pos + ch.len_utf8()),
                    _ => return Ok(()),
                },
            }
        }
    }

    // ========================================================================
    // Identifiers and keywords
    // ========================================================================

    fn scan_identifier(&self, start: usize) -> Scanned {
        let mut index = start;
        let mut name = String::new();
        loop {
            let valid: fn(char) -> bool = if index == start {
                is_identifier_start
            } else {
                is_identifier_part
            };
            match self.char_at(index) {
                Some('\\') => {
                    let (ch, next) = self.scan_unicode_escape(index)?;
                    if !valid(ch) {
                        return Err(self.error_at(index, LexErrorKind::InvalidIdentifierEscape(ch)));
                    }
                    name.push(ch);
                    index = next;
                }
                Some(ch) if valid(ch) => {
                    name.push(ch);
                    index += ch.len_utf8();
                }
                _ => break,
            }
        }

        let (kind, value) = match self.grammar.word(&name) {
            Some(WordKind::Keyword(keyword)) => (TokenKind::Keyword(keyword), TokenValue::None),
            Some(WordKind::Literal(LiteralWord::True)) => (TokenKind::BooleanLiteral, TokenValue::Boolean(true)),
            Some(WordKind::Literal(LiteralWord::False)) => (TokenKind::BooleanLiteral, TokenValue::Boolean(false)),
            Some(WordKind::Literal(LiteralWord::Null)) => (TokenKind::NullLiteral, TokenValue::None),
            Some(WordKind::Literal(LiteralWord::Undefined)) => (TokenKind::UndefinedLiteral, TokenValue::None),
            None => (TokenKind::Identifier, TokenValue::Identifier(name)),
        };
        Ok((kind, index, value))
    }

    // ========================================================================
    // Numbers
    // ========================================================================

    fn scan_number(&self, start: usize) -> Scanned {
        let bytes = self.text.as_bytes();
        let mut digits = String::new();

        let radix = match (bytes[start], bytes.get(start + 1)) {
            (b'0', Some(b'x' | b'X')) => 16,
            (b'0', Some(b'o' | b'O')) => 8,
            (b'0', Some(b'b' | b'B')) => 2,
            _ => 10,
        };

        let (end, value) = if radix != 10 {
            let end = self.scan_digits(start + 2, radix, &mut digits)?;
            if digits.is_empty() {
                return Err(self.error_at(
                    start,
                    LexErrorKind::InvalidNumericLiteral("digits expected after the radix prefix"),
                ));
            }
            let value = digits.chars().fold(0.0, |acc: f64, c| {
                acc * f64::from(radix) + f64::from(c.to_digit(radix).unwrap_or(0))
            });
            (end, value)
        } else {
            if bytes[start] == b'0' && matches!(bytes.get(start + 1), Some(b'0'..=b'9' | b'_')) {
                return Err(self.error_at(
                    start,
                    LexErrorKind::InvalidNumericLiteral("leading zeros are not allowed"),
                ));
            }
            let mut end = start;
            if bytes[start] != b'.' {
                end = self.scan_digits(start, 10, &mut digits)?;
            }
            if bytes.get(end) == Some(&b'.') {
                digits.push('.');
                end = self.scan_digits(end + 1, 10, &mut digits)?;
            }
            if matches!(bytes.get(end), Some(b'e' | b'E')) {
                digits.push('e');
                end += 1;
                if let Some(&sign @ (b'+' | b'-')) = bytes.get(end) {
                    digits.push(char::from(sign));
                    end += 1;
                }
                let exponent_start = digits.len();
                end = self.scan_digits(end, 10, &mut digits)?;
                if digits.len() == exponent_start {
                    return Err(self.error_at(
                        start,
                        LexErrorKind::InvalidNumericLiteral("exponent has no digits"),
                    ));
                }
            }
            let value = digits.parse::<f64>().map_err(|_| {
                self.error_at(start, LexErrorKind::InvalidNumericLiteral("malformed number"))
            })?;
            (end, value)
        };

        match self.char_at(end) {
            Some('n') => Err(self.error_at(
                end,
                LexErrorKind::InvalidNumericLiteral("bigint literals are not supported"),
            )),
            Some(c) if c.is_ascii_digit() => Err(self.error_at(
                end,
                LexErrorKind::InvalidNumericLiteral("digit out of range for the radix"),
            )),
            Some(c) if c == '\\' || is_identifier_start(c) => {
                Err(self.error_at(start, LexErrorKind::IdentifierStartsWithDigit))
            }
            _ => Ok((TokenKind::NumberLiteral, end, TokenValue::Number(value))),
        }
    }

    /// Scan digits of `radix` starting at `index`, allowing single `_`
    /// separators between digits. Digits are appended to `out`.
    fn scan_digits(&self, mut index: usize, radix: u32, out: &mut String) -> Result<usize, LexError> {
        let bytes = self.text.as_bytes();
        let is_digit = |b: u8| char::from(b).is_digit(radix);
        let mut after_digit = false;
        while let Some(&b) = bytes.get(index) {
            if is_digit(b) {
                out.push(char::from(b));
                after_digit = true;
            } else if b == b'_' {
                let before_digit = bytes.get(index + 1).is_some_and(|&n| is_digit(n));
                if !after_digit || !before_digit {
                    return Err(self.error_at(
                        index,
                        LexErrorKind::InvalidNumericLiteral("numeric separators are only allowed between digits"),
                    ));
                }
                after_digit = false;
            } else {
                break;
            }
            index += 1;
        }
        Ok(index)
    }

    // ========================================================================
    // Strings, templates and escapes
    // ========================================================================

    /// Scan a quoted string. Returns the index past the closing quote and
    /// the decoded contents.
    fn scan_string(&self, start: usize, quote: char) -> Result<(usize, String), LexError> {
        let bytes = self.text.as_bytes();
        let mut index = start + 1;
        let mut value = String::new();
        loop {
            let Some(ch) = self.char_at(index) else {
                return Err(self.error_at(start, LexErrorKind::UnterminatedString));
            };
            if ch == quote {
                return Ok((index + 1, value));
            }
            if ch == '\\' {
                index = self.scan_escape(index, &mut value)?;
                continue;
            }
            if line_terminator_len(&bytes[index..]) > 0 {
                return Err(self.error_at(start, LexErrorKind::UnterminatedString));
            }
            value.push(ch);
            index += ch.len_utf8();
        }
    }

    /// Scan a template literal as a single token. Substitutions are kept
    /// as raw source with their absolute positions.
    fn scan_template(&self, start: usize) -> Result<(usize, TemplateValue), LexError> {
        let bytes = self.text.as_bytes();
        let mut index = start + 1;
        let mut cooked = String::new();
        let mut segments = Vec::new();
        let mut substitutions = Vec::new();
        let mut last = (self.pos, self.position);
        loop {
            let Some(ch) = self.char_at(index) else {
                return Err(self.error_at(start, LexErrorKind::UnterminatedTemplate));
            };
            match ch {
                '`' => {
                    segments.push(cooked);
                    return Ok((
                        index + 1,
                        TemplateValue {
                            segments,
                            substitutions,
                        },
                    ));
                }
                '\\' => index = self.scan_escape(index, &mut cooked)?,
                '$' if bytes.get(index + 1) == Some(&b'{') => {
                    let body = index + 2;
                    let close = self.skip_substitution(body, start)?;
                    let position = self.walk_position(last.0, last.1, body);
                    last = (body, position);
                    segments.push(std::mem::take(&mut cooked));
                    substitutions.push(TemplateSubstitution {
                        source: self.text[body..close].to_string(),
                        position,
                    });
                    index = close + 1;
                }
                '\r' => {
                    cooked.push('\n');
                    index += line_terminator_len(&bytes[index..]);
                }
                _ => {
                    cooked.push(ch);
                    index += ch.len_utf8();
                }
            }
        }
    }

    /// Find the `}` closing a substitution body that starts at `index`.
    /// Braces, quoted strings, nested templates and comments are balanced.
    fn skip_substitution(&self, mut index: usize, template_start: usize) -> Result<usize, LexError> {
        let bytes = self.text.as_bytes();
        let mut depth = 0usize;
        loop {
            let Some(ch) = self.char_at(index) else {
                return Err(self.error_at(template_start, LexErrorKind::UnterminatedTemplate));
            };
            match ch {
                '{' => {
                    depth += 1;
                    index += 1;
                }
                '}' if depth == 0 => return Ok(index),
                '}' => {
                    depth -= 1;
                    index += 1;
                }
                '"' | '\'' => index = self.scan_string(index, ch)?.0,
                '`' => index = self.scan_template(index)?.0,
                '/' if bytes.get(index + 1) == Some(&b'/') => {
                    let body = index + 2;
                    index = find_line_terminator(&bytes[body..]).map_or(bytes.len(), |n| body + n);
                }
                '/' if bytes.get(index + 1) == Some(&b'*') => {
                    let body = index + 2;
                    let Some(close) = memmem::find(&bytes[body..], b"*/") else {
                        return Err(self.error_at(index, LexErrorKind::UnterminatedComment));
                    };
                    index = body + close + 2;
                }
                _ => index += ch.len_utf8(),
            }
        }
    }

    /// Decode the escape whose backslash is at `index`, appending the result
    /// to `out`. Returns the index past the escape.
    fn scan_escape(&self, index: usize, out: &mut String) -> Result<usize, LexError> {
        let bytes = self.text.as_bytes();
        let Some(ch) = self.char_at(index + 1) else {
            // The enclosing literal reports itself as unterminated.
            return Ok(index + 1);
        };

        let continuation = line_terminator_len(&bytes[index + 1..]);
        if continuation > 0 {
            return Ok(index + 1 + continuation);
        }

        match ch {
            'u' => {
                let (decoded, next) = self.scan_unicode_escape(index)?;
                out.push(decoded);
                Ok(next)
            }
            'x' => {
                let decoded = self
                    .text
                    .get(index + 2..index + 4)
                    .filter(|hex| hex.bytes().all(|b| b.is_ascii_hexdigit()))
                    .and_then(|hex| u8::from_str_radix(hex, 16).ok())
                    .ok_or_else(|| {
                        let end = (index + 4).min(self.text.len());
                        let sequence = self.text.get(index..end).unwrap_or("\\x").to_string();
                        self.error_at(index, LexErrorKind::InvalidEscape(sequence))
                    })?;
                out.push(char::from(decoded));
                Ok(index + 4)
            }
            '0' if self.byte_at(index + 2).is_some_and(|b| b.is_ascii_digit()) => {
                let sequence = self.text[index..index + 3].to_string();
                Err(self.error_at(index, LexErrorKind::InvalidEscape(sequence)))
            }
            _ => match self.grammar.escape(ch) {
                Some(decoded) => {
                    out.push(decoded);
                    Ok(index + 1 + ch.len_utf8())
                }
                None => Err(self.error_at(index, LexErrorKind::InvalidEscape(format!("\\{ch}")))),
            },
        }
    }

    /// Decode `\uXXXX` or `\u{X...}` with the backslash at `index`. A
    /// surrogate pair written as two escapes decodes to one character.
    fn scan_unicode_escape(&self, index: usize) -> Result<(char, usize), LexError> {
        let bytes = self.text.as_bytes();
        let invalid = || self.error_at(index, LexErrorKind::InvalidUnicodeEscape);
        if bytes.get(index + 1) != Some(&b'u') {
            return Err(invalid());
        }

        let mut end = index + 2;
        let code = if bytes.get(end) == Some(&b'{') {
            let digits = end + 1;
            end = digits;
            while bytes.get(end).is_some_and(u8::is_ascii_hexdigit) {
                end += 1;
            }
            if end == digits || end - digits > 6 || bytes.get(end) != Some(&b'}') {
                return Err(invalid());
            }
            let code = u32::from_str_radix(&self.text[digits..end], 16).map_err(|_| invalid())?;
            end += 1;
            code
        } else {
            let code = self.hex4(end).ok_or_else(invalid)?;
            end += 4;
            if (0xD800..0xDC00).contains(&code) && self.text.get(end..end + 2) == Some("\\u") {
                match self.hex4(end + 2).filter(|low| (0xDC00..0xE000).contains(low)) {
                    Some(low) => {
                        end += 6;
                        0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00)
                    }
                    None => code,
                }
            } else {
                code
            }
        };

        char::from_u32(code).map(|ch| (ch, end)).ok_or_else(invalid)
    }

    /// Exactly four hex digits at `index`.
    fn hex4(&self, index: usize) -> Option<u32> {
        self.text
            .get(index..index + 4)
            .filter(|hex| hex.bytes().all(|b| b.is_ascii_hexdigit()))
            .and_then(|hex| u32::from_str_radix(hex, 16).ok())
    }

    // ========================================================================
    // Operators and punctuators
    // ========================================================================

    /// Longest match against the symbol table.
    fn scan_symbol(&self, start: usize) -> Scanned {
        let rest = &self.text[start..];
        let longest = self.grammar.max_symbol_len().min(rest.len());
        for len in (1..=longest).rev() {
            let Some(candidate) = rest.get(..len) else {
                continue;
            };
            let Some(kind) = self.grammar.symbol(candidate) else {
                continue;
            };
            // `a?.5:b` is a conditional, not an optional chain.
            if kind == SymbolKind::Punctuator(Punctuator::QuestionDot)
                && rest.as_bytes().get(len).is_some_and(u8::is_ascii_digit)
            {
                continue;
            }
            return Ok((kind.token_kind(), start + len, TokenValue::None));
        }

        let ch = rest.chars().next().unwrap_or('\0');
        Err(self.error_at(start, LexErrorKind::InvalidCharacter(ch)))
    }
}

impl Iterator for Scanner<'_, '_> {
    type Item = Result<Token, LexError>;

    /// Yields every token up to and including `EndOfInput`, or up to and
    /// including the first error.
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let result = self.scan();
        match &result {
            Ok(token) if token.kind != TokenKind::EndOfInput => {}
            _ => self.finished = true,
        }
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_ast::syntax_kind::{Keyword, Operator};

    fn kinds(source: &str) -> Vec<TokenKind> {
        let grammar = Grammar::standard();
        scan(source, &grammar)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    fn first(source: &str) -> Token {
        let grammar = Grammar::standard();
        Scanner::scan(&mut Scanner::new(source, &grammar)).unwrap()
    }

    fn error(source: &str) -> LexError {
        let grammar = Grammar::standard();
        scan(source, &grammar).unwrap_err()
    }

    #[test]
    fn test_scan_simple_tokens() {
        assert_eq!(
            kinds("( ) [ ] { } , ;"),
            vec![
                TokenKind::Punctuator(Punctuator::OpenParen),
                TokenKind::Punctuator(Punctuator::CloseParen),
                TokenKind::Punctuator(Punctuator::OpenBracket),
                TokenKind::Punctuator(Punctuator::CloseBracket),
                TokenKind::Punctuator(Punctuator::OpenBrace),
                TokenKind::Punctuator(Punctuator::CloseBrace),
                TokenKind::Punctuator(Punctuator::Comma),
                TokenKind::Punctuator(Punctuator::Semicolon),
                TokenKind::EndOfInput,
            ]
        );
    }

    #[test]
    fn test_longest_match() {
        assert_eq!(
            kinds("a>>>=b"),
            vec![
                TokenKind::Identifier,
                TokenKind::Operator(Operator::GreaterThanGreaterThanGreaterThanEquals),
                TokenKind::Identifier,
                TokenKind::EndOfInput,
            ]
        );
        assert_eq!(first("===").kind, TokenKind::Operator(Operator::EqualsEqualsEquals));
    }

    #[test]
    fn test_question_dot_before_digit() {
        assert_eq!(
            kinds("a?.5:b"),
            vec![
                TokenKind::Identifier,
                TokenKind::Punctuator(Punctuator::Question),
                TokenKind::NumberLiteral,
                TokenKind::Punctuator(Punctuator::Colon),
                TokenKind::Identifier,
                TokenKind::EndOfInput,
            ]
        );
    }

    #[test]
    fn test_keyword_escape() {
        let token = first("\\u0069f");
        assert_eq!(token.kind, TokenKind::Keyword(Keyword::If));
        assert_eq!(token.lexeme, "\\u0069f");
    }

    #[test]
    fn test_number_values() {
        assert_eq!(first("0x1F").value, TokenValue::Number(31.0));
        assert_eq!(first("0b101").value, TokenValue::Number(5.0));
        assert_eq!(first("0o17").value, TokenValue::Number(15.0));
        assert_eq!(first("1_000.5").value, TokenValue::Number(1000.5));
        assert_eq!(first(".5e1").value, TokenValue::Number(5.0));
        assert_eq!(first("0").value, TokenValue::Number(0.0));
    }

    #[test]
    fn test_number_errors() {
        assert!(matches!(error("017").kind, LexErrorKind::InvalidNumericLiteral(_)));
        assert!(matches!(error("10n").kind, LexErrorKind::InvalidNumericLiteral(_)));
        assert!(matches!(error("1__0").kind, LexErrorKind::InvalidNumericLiteral(_)));
        assert!(matches!(error("1_").kind, LexErrorKind::InvalidNumericLiteral(_)));
        assert!(matches!(error("0x").kind, LexErrorKind::InvalidNumericLiteral(_)));
        assert!(matches!(error("0b12").kind, LexErrorKind::InvalidNumericLiteral(_)));
        assert!(matches!(error("1e+").kind, LexErrorKind::InvalidNumericLiteral(_)));
        assert_eq!(error("3abc").kind, LexErrorKind::IdentifierStartsWithDigit);
    }

    #[test]
    fn test_string_escapes() {
        assert_eq!(
            first(r#""a\tbA\u{1F600}\x41\0""#).value,
            TokenValue::String("a\tbA\u{1F600}A\0".to_string())
        );
        assert_eq!(
            first(r#"'😀'"#).value,
            TokenValue::String("\u{1F600}".to_string())
        );
        assert_eq!(first("'a\\\nb'").value, TokenValue::String("ab".to_string()));
    }

    #[test]
    fn test_escape_errors() {
        assert_eq!(error(r#""\q""#).kind, LexErrorKind::InvalidEscape("\\q".to_string()));
        assert_eq!(error(r#""\01""#).kind, LexErrorKind::InvalidEscape("\\01".to_string()));
        assert_eq!(error(r#""\u12""#).kind, LexErrorKind::InvalidUnicodeEscape);
        assert_eq!(error(r#""\u{110000}""#).kind, LexErrorKind::InvalidUnicodeEscape);
        assert!(matches!(error(r#""\xZ1""#).kind, LexErrorKind::InvalidEscape(_)));
    }

    #[test]
    fn test_positions_track_lines_and_columns() {
        let grammar = Grammar::standard();
        let tokens = scan("a\r\n  béta\u{2028}c", &grammar).unwrap();
        assert_eq!(tokens[0].position, SourcePosition::new(1, 1, 0));
        assert_eq!(tokens[1].position, SourcePosition::new(2, 3, 5));
        assert_eq!(tokens[2].position, SourcePosition::new(3, 1, 13));
        assert!(tokens[2].preceded_by_line_terminator);
    }

    #[test]
    fn test_new_at_rebases_positions() {
        let grammar = Grammar::standard();
        let mut scanner = Scanner::new_at("x + y", &grammar, SourcePosition::new(4, 10, 100));
        assert_eq!(Scanner::scan(&mut scanner).unwrap().position, SourcePosition::new(4, 10, 100));
        let plus = Scanner::scan(&mut scanner).unwrap();
        assert_eq!(plus.position, SourcePosition::new(4, 12, 102));
        assert_eq!(plus.end, 103);
    }

    #[test]
    fn test_end_of_input_repeats() {
        let grammar = Grammar::standard();
        let mut scanner = Scanner::new("", &grammar);
        assert_eq!(Scanner::scan(&mut scanner).unwrap().kind, TokenKind::EndOfInput);
        assert_eq!(Scanner::scan(&mut scanner).unwrap().kind, TokenKind::EndOfInput);
    }
}
