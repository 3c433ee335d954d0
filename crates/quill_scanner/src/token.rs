//! Tokens produced by the scanner.

use quill_ast::syntax_kind::{Keyword, Operator, Punctuator, TokenKind};
use quill_core::text::{SourcePosition, TextPos, TextRange};
use serde::Serialize;

/// One lexical unit. Tokens are never mutated after scanning.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub kind: TokenKind,
    /// The source text of the token, exactly as written.
    pub lexeme: String,
    /// Decoded value for identifiers and literals.
    pub value: TokenValue,
    /// Position of the first character.
    pub position: SourcePosition,
    /// Byte offset just past the last character.
    pub end: TextPos,
    /// A line terminator (possibly inside a comment) separates this token
    /// from the previous one.
    pub preceded_by_line_terminator: bool,
}

impl Token {
    #[inline]
    pub fn start(&self) -> TextPos {
        self.position.offset
    }

    #[inline]
    pub fn range(&self) -> TextRange {
        TextRange::new(self.position.offset, self.end)
    }

    #[inline]
    pub fn is_punctuator(&self, p: Punctuator) -> bool {
        self.kind.is_punctuator(p)
    }

    #[inline]
    pub fn is_operator(&self, op: Operator) -> bool {
        self.kind.is_operator(op)
    }

    #[inline]
    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.kind.is_keyword(keyword)
    }

    /// The decoded name of an identifier token.
    pub fn identifier_name(&self) -> Option<&str> {
        match (&self.kind, &self.value) {
            (TokenKind::Identifier, TokenValue::Identifier(name)) => Some(name),
            _ => None,
        }
    }

    /// Whether this is the identifier `name` (after escape decoding).
    pub fn is_contextual(&self, name: &str) -> bool {
        self.identifier_name() == Some(name)
    }
}

/// The decoded payload of a token.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum TokenValue {
    /// Keywords, punctuators, operators, `null`, `undefined` and end of input.
    None,
    /// The identifier with Unicode escapes applied.
    Identifier(String),
    Number(f64),
    /// The string contents with escapes applied.
    String(String),
    Boolean(bool),
    Template(TemplateValue),
}

/// A template literal, split around its `${...}` substitutions.
///
/// `segments` always has exactly one more entry than `substitutions`;
/// segment `i` precedes substitution `i`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateValue {
    /// Text segments with escapes applied and line terminators normalized
    /// to `\n`.
    pub segments: Vec<String>,
    pub substitutions: Vec<TemplateSubstitution>,
}

impl TemplateValue {
    /// The cooked text with each substitution written back as `${...}`.
    pub fn display_text(&self) -> String {
        let mut text = String::new();
        for (i, segment) in self.segments.iter().enumerate() {
            text.push_str(segment);
            if let Some(sub) = self.substitutions.get(i) {
                text.push_str("${");
                text.push_str(&sub.source);
                text.push('}');
            }
        }
        text
    }
}

/// The unparsed source of one `${...}` substitution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateSubstitution {
    /// Text between `${` and the matching `}`.
    pub source: String,
    /// Absolute position of the first character after `${`.
    pub position: SourcePosition,
}
