//! JSON-described adjustments to the standard grammar.
//!
//! ```json
//! {
//!   "keywords":   { "add": { "fn": "function" }, "remove": ["undefined"] },
//!   "symbols":    { "add": { "<>": "!=" }, "remove": ["**"] },
//!   "escapes":    { "add": { "e": "\u001b" } },
//!   "precedence": { "set": { "??": { "level": "logicalAnd" } }, "remove": ["in"] }
//! }
//! ```
//!
//! Additions map a new lexeme onto an existing keyword, literal word,
//! operator or punctuator, named by its standard lexeme. Removals are
//! applied before additions.

use crate::precedence::BinaryBinding;
use crate::{Grammar, GrammarError, SymbolKind, WordKind};
use quill_ast::syntax_kind::{InfixOperator, Keyword, Operator, TokenKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GrammarConfig {
    #[serde(default)]
    pub keywords: EntryChanges,
    #[serde(default)]
    pub symbols: EntryChanges,
    #[serde(default)]
    pub escapes: EntryChanges,
    #[serde(default)]
    pub precedence: PrecedenceChanges,
}

/// Additions (`lexeme -> target`) and removals for one table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EntryChanges {
    #[serde(default)]
    pub add: BTreeMap<String, String>,
    #[serde(default)]
    pub remove: Vec<String>,
}

/// Binary precedence overrides, keyed by the operator's standard lexeme.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PrecedenceChanges {
    #[serde(default)]
    pub set: BTreeMap<String, BinaryBinding>,
    #[serde(default)]
    pub remove: Vec<String>,
}

impl GrammarConfig {
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
            && self.symbols.is_empty()
            && self.escapes.is_empty()
            && self.precedence.set.is_empty()
            && self.precedence.remove.is_empty()
    }

    pub(crate) fn apply(&self, grammar: &mut Grammar) -> Result<(), GrammarError> {
        for word in &self.keywords.remove {
            grammar.remove_word(word);
        }
        for (lexeme, target) in &self.keywords.add {
            check_word_lexeme(lexeme)?;
            let kind = WordKind::from_text(target)
                .ok_or_else(|| GrammarError::UnknownKeyword(target.clone()))?;
            grammar.insert_word(lexeme, kind);
        }

        for lexeme in &self.symbols.remove {
            grammar.remove_symbol(lexeme);
        }
        for (lexeme, target) in &self.symbols.add {
            check_symbol_lexeme(lexeme)?;
            let kind = SymbolKind::from_text(target)
                .ok_or_else(|| GrammarError::UnknownSymbol(target.clone()))?;
            grammar.insert_symbol(lexeme, kind);
        }

        for escape in &self.escapes.remove {
            grammar.remove_escape(single_char(escape)?);
        }
        for (escape, value) in &self.escapes.add {
            let escape_char = single_char(escape)?;
            if matches!(escape_char, 'u' | 'x') {
                return Err(GrammarError::InvalidEscape(escape.clone()));
            }
            grammar.insert_escape(escape_char, single_char(value)?);
        }

        for lexeme in &self.precedence.remove {
            grammar.remove_binding(binary_token(lexeme)?);
        }
        for (lexeme, binding) in &self.precedence.set {
            if !binding.level.is_binary_level() {
                return Err(GrammarError::InvalidPrecedenceLevel(binding.level));
            }
            grammar.set_binding(binary_token(lexeme)?, *binding);
        }

        Ok(())
    }
}

impl EntryChanges {
    pub fn is_empty(&self) -> bool {
        self.add.is_empty() && self.remove.is_empty()
    }
}

fn check_word_lexeme(lexeme: &str) -> Result<(), GrammarError> {
    let mut chars = lexeme.chars();
    let valid = chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$');
    if valid {
        Ok(())
    } else {
        Err(GrammarError::InvalidLexeme(lexeme.to_string()))
    }
}

fn check_symbol_lexeme(lexeme: &str) -> Result<(), GrammarError> {
    let valid = !lexeme.is_empty()
        && lexeme
            .chars()
            .all(|c| c.is_ascii_punctuation() && !matches!(c, '"' | '\'' | '`' | '\\'));
    if valid {
        Ok(())
    } else {
        Err(GrammarError::InvalidLexeme(lexeme.to_string()))
    }
}

fn single_char(text: &str) -> Result<char, GrammarError> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(GrammarError::InvalidEscape(text.to_string())),
    }
}

/// Resolve the standard lexeme of a binary operator to its token kind.
fn binary_token(lexeme: &str) -> Result<TokenKind, GrammarError> {
    let kind = Operator::from_text(lexeme)
        .map(TokenKind::Operator)
        .or_else(|| Keyword::from_text(lexeme).map(TokenKind::Keyword))
        .ok_or_else(|| GrammarError::UnknownSymbol(lexeme.to_string()))?;
    match InfixOperator::from_token(kind) {
        Some(_) => Ok(kind),
        None => Err(GrammarError::NotBinaryOperator(lexeme.to_string())),
    }
}
