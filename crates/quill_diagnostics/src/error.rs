//! Scanner and parser error types.

use crate::{messages, Diagnostic, DiagnosticMessage};
use quill_core::text::SourcePosition;
use thiserror::Error;

/// Why scanning failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    #[error("invalid character {0:?}")]
    InvalidCharacter(char),
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unterminated block comment")]
    UnterminatedComment,
    #[error("unterminated template literal")]
    UnterminatedTemplate,
    #[error("invalid escape sequence `{0}`")]
    InvalidEscape(String),
    #[error("invalid unicode escape sequence")]
    InvalidUnicodeEscape,
    #[error("escaped character {0:?} is not valid in an identifier")]
    InvalidIdentifierEscape(char),
    #[error("invalid numeric literal: {0}")]
    InvalidNumericLiteral(&'static str),
    #[error("identifier cannot start with digit")]
    IdentifierStartsWithDigit,
}

impl LexErrorKind {
    pub fn message(&self) -> &'static DiagnosticMessage {
        match self {
            LexErrorKind::InvalidCharacter(_) => &messages::INVALID_CHARACTER,
            LexErrorKind::UnterminatedString => &messages::UNTERMINATED_STRING_LITERAL,
            LexErrorKind::UnterminatedComment => &messages::ASTERISK_SLASH_EXPECTED,
            LexErrorKind::UnterminatedTemplate => &messages::UNTERMINATED_TEMPLATE_LITERAL,
            LexErrorKind::InvalidEscape(_) => &messages::INVALID_ESCAPE_SEQUENCE,
            LexErrorKind::InvalidUnicodeEscape => &messages::INVALID_UNICODE_ESCAPE_SEQUENCE,
            LexErrorKind::InvalidIdentifierEscape(_) => &messages::INVALID_IDENTIFIER_ESCAPE,
            LexErrorKind::InvalidNumericLiteral(_) => &messages::INVALID_NUMERIC_LITERAL,
            LexErrorKind::IdentifierStartsWithDigit => &messages::IDENTIFIER_STARTS_WITH_DIGIT,
        }
    }

    fn message_args(&self) -> Vec<String> {
        match self {
            LexErrorKind::InvalidCharacter(ch) | LexErrorKind::InvalidIdentifierEscape(ch) => {
                vec![ch.to_string()]
            }
            LexErrorKind::InvalidEscape(sequence) => vec![sequence.clone()],
            LexErrorKind::InvalidNumericLiteral(reason) => vec![reason.to_string()],
            _ => Vec::new(),
        }
    }
}

/// A scanning failure. Scanning stops at the first one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at {position}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub position: SourcePosition,
}

impl LexError {
    pub fn new(kind: LexErrorKind, position: SourcePosition) -> Self {
        Self { kind, position }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let args = self.kind.message_args();
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        Diagnostic::at(self.position, self.kind.message(), &args)
    }
}

/// Why parsing failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("unexpected token `{found}`")]
    UnexpectedToken { found: String },
    #[error("missing operand")]
    MissingOperand,
    #[error("`{open}` at {open_position} is never closed")]
    UnmatchedDelimiter {
        open: &'static str,
        close: &'static str,
        open_position: SourcePosition,
    },
    #[error("invalid assignment target")]
    InvalidAssignmentTarget,
    #[error("spread is not allowed here")]
    UnexpectedSpread,
    #[error("rest parameter must be last")]
    RestParameterMustBeLast,
    #[error("trailing comma not allowed")]
    TrailingComma,
    #[error("expression nested deeper than {limit} levels")]
    NestingTooDeep { limit: u32 },
}

impl ParseErrorKind {
    pub fn message(&self) -> &'static DiagnosticMessage {
        match self {
            ParseErrorKind::UnexpectedToken { .. } => &messages::UNEXPECTED_TOKEN,
            ParseErrorKind::MissingOperand => &messages::EXPRESSION_EXPECTED,
            ParseErrorKind::UnmatchedDelimiter { .. } => &messages::UNMATCHED_DELIMITER,
            ParseErrorKind::InvalidAssignmentTarget => &messages::INVALID_ASSIGNMENT_TARGET,
            ParseErrorKind::UnexpectedSpread => &messages::UNEXPECTED_SPREAD,
            ParseErrorKind::RestParameterMustBeLast => &messages::REST_PARAMETER_MUST_BE_LAST,
            ParseErrorKind::TrailingComma => &messages::TRAILING_COMMA_NOT_ALLOWED,
            ParseErrorKind::NestingTooDeep { .. } => &messages::NESTING_TOO_DEEP,
        }
    }
}

/// A parsing failure, located at the offending token.
///
/// `expected` names the construct the parser was looking for, e.g.
/// `"expression"` or `"')'"`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at {position}; expected {expected}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub position: SourcePosition,
    pub expected: &'static str,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, position: SourcePosition, expected: &'static str) -> Self {
        Self {
            kind,
            position,
            expected,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let message = self.kind.message();
        match &self.kind {
            ParseErrorKind::UnexpectedToken { found } => {
                Diagnostic::at(self.position, message, &[found.as_str(), self.expected])
            }
            ParseErrorKind::UnmatchedDelimiter {
                open,
                close,
                open_position,
            } => {
                let at = open_position.to_string();
                Diagnostic::at(self.position, message, &[*close, *open, at.as_str()])
            }
            ParseErrorKind::NestingTooDeep { limit } => {
                let limit = limit.to_string();
                Diagnostic::at(self.position, message, &[limit.as_str()])
            }
            _ => Diagnostic::at(self.position, message, &[]),
        }
    }
}

/// Either stage failing, for callers that scan and parse in one go.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl SyntaxError {
    pub fn position(&self) -> SourcePosition {
        match self {
            SyntaxError::Lex(e) => e.position,
            SyntaxError::Parse(e) => e.position,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            SyntaxError::Lex(e) => e.to_diagnostic(),
            SyntaxError::Parse(e) => e.to_diagnostic(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lex_error_display() {
        let err = LexError::new(LexErrorKind::UnterminatedString, SourcePosition::new(1, 5, 4));
        assert_eq!(err.to_string(), "unterminated string literal at 1:5");
        assert_eq!(err.to_diagnostic().code, 1002);
    }

    #[test]
    fn test_parse_error_diagnostic_args() {
        let err = ParseError::new(
            ParseErrorKind::UnexpectedToken { found: "]".to_string() },
            SourcePosition::new(1, 3, 2),
            "expression",
        );
        let diag = err.to_diagnostic();
        assert_eq!(diag.message_text, "Unexpected token ']'; expression expected.");
        assert_eq!(diag.position, Some(SourcePosition::new(1, 3, 2)));
    }

    #[test]
    fn test_unmatched_delimiter_message() {
        let err = ParseError::new(
            ParseErrorKind::UnmatchedDelimiter {
                open: "(",
                close: ")",
                open_position: SourcePosition::new(1, 1, 0),
            },
            SourcePosition::new(1, 4, 3),
            "')'",
        );
        assert_eq!(
            err.to_diagnostic().message_text,
            "')' expected to match the '(' at 1:1."
        );
    }

    #[test]
    fn test_syntax_error_from() {
        let lex = LexError::new(LexErrorKind::UnterminatedComment, SourcePosition::START);
        let err: SyntaxError = lex.clone().into();
        assert_eq!(err.position(), SourcePosition::START);
        assert_eq!(err, SyntaxError::Lex(lex));
    }
}
