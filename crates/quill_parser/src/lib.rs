//! quill_parser: Precedence-climbing parser for expressions.
//!
//! Consumes the token list produced by `quill_scanner` and builds an
//! arena-allocated expression tree. Parsing stops at the first error.

mod parser;
mod precedence;
mod template;

pub use parser::Parser;
pub use template::{parse_template, parse_template_with, TemplateLiteral};

use bumpalo::Bump;
use quill_ast::node::Expression;
use quill_core::intern::SymbolInterner;
use quill_diagnostics::{ParseError, SyntaxError};
use quill_grammar::Grammar;
use quill_scanner::{scan, Token};

/// Parse one expression from the front of `tokens`.
///
/// Returns the tree and the tokens that follow it. The remainder always
/// includes the end-of-input token when `tokens` has one.
pub fn parse_expression<'a, 't>(
    arena: &'a Bump,
    tokens: &'t [Token],
    grammar: &Grammar,
) -> Result<(&'a Expression<'a>, &'t [Token]), ParseError> {
    let mut parser = Parser::new(arena, tokens, grammar);
    let expression = parser.parse_expression()?;
    let consumed = parser.consumed();
    Ok((expression, &tokens[consumed..]))
}

/// Scan and parse `source`, which must hold exactly one expression.
pub fn parse_source<'a>(
    arena: &'a Bump,
    source: &str,
    grammar: &Grammar,
) -> Result<&'a Expression<'a>, SyntaxError> {
    parse_source_with(arena, source, grammar, &SymbolInterner::new())
}

/// Like [`parse_source`], interning identifiers into `interner`.
pub fn parse_source_with<'a>(
    arena: &'a Bump,
    source: &str,
    grammar: &Grammar,
    interner: &SymbolInterner,
) -> Result<&'a Expression<'a>, SyntaxError> {
    let tokens = scan(source, grammar)?;
    let mut parser = Parser::new(arena, &tokens, grammar).with_interner(interner.clone());
    let expression = parser.parse_expression()?;
    parser.expect_end()?;
    Ok(expression)
}
