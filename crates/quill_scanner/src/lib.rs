//! quill_scanner: Lexer for the quill expression language.
//!
//! Produces tokens from source text with support for:
//! - Table-driven keywords, operators, punctuators and escapes
//! - Decimal, hex, octal and binary numbers with `_` separators
//! - Template literals as single tokens with raw substitution spans
//! - Unicode identifiers and `\u` escapes inside identifiers
//! - Line-terminator hints for automatic semicolon insertion

mod char_codes;
mod scanner;
mod token;

pub use scanner::{scan, Scanner};
pub use token::{TemplateSubstitution, TemplateValue, Token, TokenValue};
