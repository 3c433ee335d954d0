//! quill_grammar: The table-driven part of the language definition.
//!
//! A [`Grammar`] bundles the keyword table, the operator/punctuator table,
//! the escape table and the binary precedence table. It is immutable once
//! built and is handed to the scanner and the parser explicitly, so two
//! grammar variants can be used side by side. [`GrammarConfig`] describes
//! adjustments to the standard grammar and is read from JSON.

mod config;
pub mod precedence;

pub use config::{EntryChanges, GrammarConfig, PrecedenceChanges};
pub use precedence::{Associativity, BinaryBinding, OperatorPrecedence};

use quill_ast::syntax_kind::{Keyword, LiteralWord, Operator, Punctuator, TokenKind};
use rustc_hash::FxHashMap;
use std::path::Path;
use thiserror::Error;

/// What a word maps to in the keyword table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WordKind {
    Keyword(Keyword),
    Literal(LiteralWord),
}

impl WordKind {
    pub fn from_text(text: &str) -> Option<WordKind> {
        Keyword::from_text(text)
            .map(WordKind::Keyword)
            .or_else(|| LiteralWord::from_text(text).map(WordKind::Literal))
    }

    pub fn text(self) -> &'static str {
        match self {
            WordKind::Keyword(k) => k.text(),
            WordKind::Literal(l) => l.text(),
        }
    }
}

/// What a symbol lexeme maps to in the operator/punctuator table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Punctuator(Punctuator),
    Operator(Operator),
}

impl SymbolKind {
    pub fn from_text(text: &str) -> Option<SymbolKind> {
        Punctuator::from_text(text)
            .map(SymbolKind::Punctuator)
            .or_else(|| Operator::from_text(text).map(SymbolKind::Operator))
    }

    pub fn token_kind(self) -> TokenKind {
        match self {
            SymbolKind::Punctuator(p) => TokenKind::Punctuator(p),
            SymbolKind::Operator(op) => TokenKind::Operator(op),
        }
    }
}

#[derive(Debug, Error)]
pub enum GrammarError {
    #[error("unknown keyword target `{0}`")]
    UnknownKeyword(String),
    #[error("unknown operator or punctuator target `{0}`")]
    UnknownSymbol(String),
    #[error("`{0}` is not a binary operator")]
    NotBinaryOperator(String),
    #[error("precedence level {0:?} cannot be assigned to a binary operator")]
    InvalidPrecedenceLevel(OperatorPrecedence),
    #[error("escape `{0}` must map a single character to a single character")]
    InvalidEscape(String),
    #[error("invalid lexeme `{0}`")]
    InvalidLexeme(String),
    #[error("invalid grammar file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("cannot read grammar file: {0}")]
    Io(#[from] std::io::Error),
}

/// The complete set of lexical and operator tables.
#[derive(Debug, Clone)]
pub struct Grammar {
    keywords: FxHashMap<Box<str>, WordKind>,
    symbols: FxHashMap<Box<str>, SymbolKind>,
    /// Length in bytes of the longest symbol lexeme.
    max_symbol_len: usize,
    escapes: FxHashMap<char, char>,
    binary: FxHashMap<TokenKind, BinaryBinding>,
}

/// Single-character escapes of the standard grammar. `\u`, `\x` and line
/// continuations are structural and handled by the scanner.
const STANDARD_ESCAPES: &[(char, char)] = &[
    ('n', '\n'),
    ('t', '\t'),
    ('r', '\r'),
    ('b', '\u{0008}'),
    ('f', '\u{000C}'),
    ('v', '\u{000B}'),
    ('0', '\0'),
    ('"', '"'),
    ('\'', '\''),
    ('\\', '\\'),
    ('`', '`'),
    ('$', '$'),
];

impl Grammar {
    /// The reference grammar.
    pub fn standard() -> Self {
        use OperatorPrecedence as P;

        let mut keywords = FxHashMap::default();
        for keyword in Keyword::ALL {
            keywords.insert(Box::from(keyword.text()), WordKind::Keyword(*keyword));
        }
        for word in LiteralWord::ALL {
            keywords.insert(Box::from(word.text()), WordKind::Literal(*word));
        }

        let mut symbols = FxHashMap::default();
        for p in Punctuator::ALL {
            symbols.insert(Box::from(p.text()), SymbolKind::Punctuator(*p));
        }
        for op in Operator::ALL {
            symbols.insert(Box::from(op.text()), SymbolKind::Operator(*op));
        }

        let escapes = STANDARD_ESCAPES.iter().copied().collect();

        let binary_table: &[(TokenKind, BinaryBinding)] = &[
            (TokenKind::Operator(Operator::QuestionQuestion), BinaryBinding::left(P::NullishCoalescing)),
            (TokenKind::Operator(Operator::BarBar), BinaryBinding::left(P::LogicalOr)),
            (TokenKind::Operator(Operator::AmpersandAmpersand), BinaryBinding::left(P::LogicalAnd)),
            (TokenKind::Operator(Operator::Bar), BinaryBinding::left(P::BitwiseOr)),
            (TokenKind::Operator(Operator::Caret), BinaryBinding::left(P::BitwiseXor)),
            (TokenKind::Operator(Operator::Ampersand), BinaryBinding::left(P::BitwiseAnd)),
            (TokenKind::Operator(Operator::EqualsEquals), BinaryBinding::left(P::Equality)),
            (TokenKind::Operator(Operator::ExclamationEquals), BinaryBinding::left(P::Equality)),
            (TokenKind::Operator(Operator::EqualsEqualsEquals), BinaryBinding::left(P::Equality)),
            (TokenKind::Operator(Operator::ExclamationEqualsEquals), BinaryBinding::left(P::Equality)),
            (TokenKind::Operator(Operator::LessThan), BinaryBinding::left(P::Relational)),
            (TokenKind::Operator(Operator::GreaterThan), BinaryBinding::left(P::Relational)),
            (TokenKind::Operator(Operator::LessThanEquals), BinaryBinding::left(P::Relational)),
            (TokenKind::Operator(Operator::GreaterThanEquals), BinaryBinding::left(P::Relational)),
            (TokenKind::Keyword(Keyword::InstanceOf), BinaryBinding::left(P::Relational)),
            (TokenKind::Keyword(Keyword::In), BinaryBinding::left(P::Relational)),
            (TokenKind::Operator(Operator::LessThanLessThan), BinaryBinding::left(P::Shift)),
            (TokenKind::Operator(Operator::GreaterThanGreaterThan), BinaryBinding::left(P::Shift)),
            (TokenKind::Operator(Operator::GreaterThanGreaterThanGreaterThan), BinaryBinding::left(P::Shift)),
            (TokenKind::Operator(Operator::Plus), BinaryBinding::left(P::Additive)),
            (TokenKind::Operator(Operator::Minus), BinaryBinding::left(P::Additive)),
            (TokenKind::Operator(Operator::Asterisk), BinaryBinding::left(P::Multiplicative)),
            (TokenKind::Operator(Operator::Slash), BinaryBinding::left(P::Multiplicative)),
            (TokenKind::Operator(Operator::Percent), BinaryBinding::left(P::Multiplicative)),
            (TokenKind::Operator(Operator::AsteriskAsterisk), BinaryBinding::right(P::Exponentiation)),
        ];
        let binary = binary_table.iter().copied().collect();

        let mut grammar = Self {
            keywords,
            symbols,
            max_symbol_len: 0,
            escapes,
            binary,
        };
        grammar.recompute_max_symbol_len();
        grammar
    }

    /// The standard grammar with `config` applied on top.
    pub fn from_config(config: &GrammarConfig) -> Result<Self, GrammarError> {
        let mut grammar = Self::standard();
        config.apply(&mut grammar)?;
        Ok(grammar)
    }

    pub fn from_json_str(json: &str) -> Result<Self, GrammarError> {
        let config: GrammarConfig = serde_json::from_str(json)?;
        Self::from_config(&config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, GrammarError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    // ========================================================================
    // Lookups
    // ========================================================================

    #[inline]
    pub fn word(&self, text: &str) -> Option<WordKind> {
        self.keywords.get(text).copied()
    }

    #[inline]
    pub fn symbol(&self, lexeme: &str) -> Option<SymbolKind> {
        self.symbols.get(lexeme).copied()
    }

    #[inline]
    pub fn max_symbol_len(&self) -> usize {
        self.max_symbol_len
    }

    #[inline]
    pub fn escape(&self, ch: char) -> Option<char> {
        self.escapes.get(&ch).copied()
    }

    /// Binding of an infix token, or `None` if it is not a binary operator
    /// in this grammar.
    #[inline]
    pub fn binary_binding(&self, kind: TokenKind) -> Option<BinaryBinding> {
        self.binary.get(&kind).copied()
    }

    // ========================================================================
    // Mutation (used while applying a config)
    // ========================================================================

    pub(crate) fn insert_word(&mut self, text: &str, kind: WordKind) {
        self.keywords.insert(Box::from(text), kind);
    }

    pub(crate) fn remove_word(&mut self, text: &str) {
        self.keywords.remove(text);
    }

    pub(crate) fn insert_symbol(&mut self, lexeme: &str, kind: SymbolKind) {
        self.symbols.insert(Box::from(lexeme), kind);
        self.max_symbol_len = self.max_symbol_len.max(lexeme.len());
    }

    pub(crate) fn remove_symbol(&mut self, lexeme: &str) {
        self.symbols.remove(lexeme);
        self.recompute_max_symbol_len();
    }

    pub(crate) fn insert_escape(&mut self, escape: char, value: char) {
        self.escapes.insert(escape, value);
    }

    pub(crate) fn remove_escape(&mut self, escape: char) {
        self.escapes.remove(&escape);
    }

    pub(crate) fn set_binding(&mut self, kind: TokenKind, binding: BinaryBinding) {
        self.binary.insert(kind, binding);
    }

    pub(crate) fn remove_binding(&mut self, kind: TokenKind) {
        self.binary.remove(&kind);
    }

    fn recompute_max_symbol_len(&mut self) {
        self.max_symbol_len = self.symbols.keys().map(|k| k.len()).max().unwrap_or(0);
    }
}

impl Default for Grammar {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_words() {
        let grammar = Grammar::standard();
        assert_eq!(grammar.word("class"), Some(WordKind::Keyword(Keyword::Class)));
        assert_eq!(grammar.word("null"), Some(WordKind::Literal(LiteralWord::Null)));
        assert_eq!(grammar.word("classX"), None);
    }

    #[test]
    fn test_standard_symbols() {
        let grammar = Grammar::standard();
        assert_eq!(grammar.max_symbol_len(), 4);
        assert_eq!(grammar.symbol("?."), Some(SymbolKind::Punctuator(Punctuator::QuestionDot)));
        assert_eq!(grammar.symbol("==="), Some(SymbolKind::Operator(Operator::EqualsEqualsEquals)));
        assert_eq!(grammar.symbol("++"), None);
    }

    #[test]
    fn test_standard_bindings() {
        let grammar = Grammar::standard();
        let pow = grammar.binary_binding(TokenKind::Operator(Operator::AsteriskAsterisk)).unwrap();
        assert_eq!(pow.associativity, Associativity::Right);
        let add = grammar.binary_binding(TokenKind::Operator(Operator::Plus)).unwrap();
        let mul = grammar.binary_binding(TokenKind::Operator(Operator::Asterisk)).unwrap();
        assert!(add.level < mul.level);
        assert!(grammar.binary_binding(TokenKind::Operator(Operator::Equals)).is_none());
    }

    #[test]
    fn test_escape_table() {
        let grammar = Grammar::standard();
        assert_eq!(grammar.escape('n'), Some('\n'));
        assert_eq!(grammar.escape('q'), None);
    }
}
