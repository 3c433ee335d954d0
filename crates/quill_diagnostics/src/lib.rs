//! quill_diagnostics: Error types and diagnostic messages.
//!
//! Scanning and parsing stop at the first error. The error types in
//! [`error`] carry the precise source position; every error kind maps onto a
//! numbered [`DiagnosticMessage`] so front ends can render a uniform
//! [`Diagnostic`].

pub mod error;

pub use error::{LexError, LexErrorKind, ParseError, ParseErrorKind, SyntaxError};

use quill_core::text::SourcePosition;
use std::fmt;

/// A diagnostic message template with a code. Every message is an error.
#[derive(Debug, Clone)]
pub struct DiagnosticMessage {
    /// The diagnostic code (1000-1099 scanner, 1100-1199 parser).
    pub code: u32,
    /// The message template. May contain `{0}`, `{1}`, ... placeholders.
    pub message: &'static str,
}

/// A realized diagnostic with location information and resolved message text.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// The file the diagnostic belongs to, if any.
    pub file: Option<String>,
    pub position: Option<SourcePosition>,
    pub message_text: String,
    pub code: u32,
}

impl Diagnostic {
    /// Create a diagnostic without location info.
    pub fn new(message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            file: None,
            position: None,
            message_text: format_message(message.message, args),
            code: message.code,
        }
    }

    /// Create a diagnostic anchored at a source position.
    pub fn at(position: SourcePosition, message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            position: Some(position),
            ..Self::new(message, args)
        }
    }

    /// Attach a file name.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref file) = self.file {
            write!(f, "{}", file)?;
            if let Some(position) = self.position {
                write!(f, ":{}", position)?;
            }
            write!(f, ": ")?;
        } else if let Some(position) = self.position {
            write!(f, "{}: ", position)?;
        }
        write!(f, "error QL{}: {}", self.code, self.message_text)
    }
}

/// Replace `{0}`, `{1}`, etc. in a message template with arguments.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{}}}", i), arg);
    }
    result
}

// ============================================================================
// Diagnostic Messages
// ============================================================================

pub mod messages {
    use super::*;

    macro_rules! diag {
        ($code:expr, $msg:expr) => {
            DiagnosticMessage { code: $code, message: $msg }
        };
    }

    // ========================================================================
    // Scanner errors (1000-1099)
    // ========================================================================
    pub const INVALID_CHARACTER: DiagnosticMessage = diag!(1001, "Invalid character '{0}'.");
    pub const UNTERMINATED_STRING_LITERAL: DiagnosticMessage = diag!(1002, "Unterminated string literal.");
    pub const ASTERISK_SLASH_EXPECTED: DiagnosticMessage = diag!(1003, "'*/' expected.");
    pub const UNTERMINATED_TEMPLATE_LITERAL: DiagnosticMessage = diag!(1004, "Unterminated template literal.");
    pub const INVALID_ESCAPE_SEQUENCE: DiagnosticMessage = diag!(1005, "Invalid escape sequence '{0}'.");
    pub const INVALID_UNICODE_ESCAPE_SEQUENCE: DiagnosticMessage = diag!(1006, "Invalid Unicode escape sequence.");
    pub const INVALID_IDENTIFIER_ESCAPE: DiagnosticMessage = diag!(1007, "Escaped character '{0}' is not valid in an identifier.");
    pub const INVALID_NUMERIC_LITERAL: DiagnosticMessage = diag!(1008, "Invalid numeric literal: {0}.");
    pub const IDENTIFIER_STARTS_WITH_DIGIT: DiagnosticMessage = diag!(1009, "An identifier or keyword cannot immediately follow a numeric literal.");

    // ========================================================================
    // Parser errors (1100-1199)
    // ========================================================================
    pub const UNEXPECTED_TOKEN: DiagnosticMessage = diag!(1100, "Unexpected token '{0}'; {1} expected.");
    pub const EXPRESSION_EXPECTED: DiagnosticMessage = diag!(1101, "Expression expected.");
    pub const UNMATCHED_DELIMITER: DiagnosticMessage = diag!(1102, "'{0}' expected to match the '{1}' at {2}.");
    pub const INVALID_ASSIGNMENT_TARGET: DiagnosticMessage = diag!(1103, "Invalid left-hand side in assignment.");
    pub const UNEXPECTED_SPREAD: DiagnosticMessage = diag!(1104, "Spread syntax is only allowed in array literals and argument lists.");
    pub const REST_PARAMETER_MUST_BE_LAST: DiagnosticMessage = diag!(1105, "A rest parameter must be last in a parameter list.");
    pub const TRAILING_COMMA_NOT_ALLOWED: DiagnosticMessage = diag!(1106, "Trailing comma not allowed.");
    pub const NESTING_TOO_DEEP: DiagnosticMessage = diag!(1107, "Expression nesting exceeds the maximum depth of {0}.");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_message() {
        let msg = format_message("'{0}' expected to match the '{1}' at {2}.", &[")", "(", "1:4"]);
        assert_eq!(msg, "')' expected to match the '(' at 1:4.");
    }

    #[test]
    fn test_format_message_no_args() {
        assert_eq!(format_message("Expression expected.", &[]), "Expression expected.");
    }

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic::at(
            SourcePosition::new(2, 7, 14),
            &messages::INVALID_CHARACTER,
            &["#"],
        )
        .with_file("input.js");
        let display = diag.to_string();
        assert_eq!(display, "input.js:2:7: error QL1001: Invalid character '#'.");
    }

    #[test]
    fn test_diagnostic_without_location() {
        let diag = Diagnostic::new(&messages::EXPRESSION_EXPECTED, &[]);
        assert!(diag.file.is_none());
        assert!(diag.position.is_none());
        assert_eq!(diag.code, 1101);
        assert_eq!(diag.to_string(), "error QL1101: Expression expected.");
    }
}
