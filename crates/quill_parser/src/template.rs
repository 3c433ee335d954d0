//! Parsing the substitutions of a template literal.
//!
//! The scanner keeps each `${...}` as unparsed source together with its
//! absolute position. Parsing a substitution scans that source again from
//! the recorded position, so errors inside it point into the enclosing
//! text.

use bumpalo::Bump;
use log::trace;
use quill_ast::node::Expression;
use quill_core::intern::SymbolInterner;
use quill_core::text::TextRange;
use quill_diagnostics::{ParseError, ParseErrorKind, SyntaxError};
use quill_grammar::Grammar;
use quill_scanner::{Scanner, Token, TokenValue};

use crate::parser::{alloc_vec_in, Parser};

/// A template literal with its substitutions parsed.
#[derive(Debug)]
pub struct TemplateLiteral<'a> {
    pub range: TextRange,
    /// Cooked text segments; always one more than `expressions`.
    pub segments: &'a [&'a str],
    pub expressions: &'a [&'a Expression<'a>],
}

/// Parse every substitution of the template literal `token`.
pub fn parse_template<'a>(
    arena: &'a Bump,
    token: &Token,
    grammar: &Grammar,
) -> Result<TemplateLiteral<'a>, SyntaxError> {
    parse_template_with(arena, token, grammar, &SymbolInterner::new())
}

/// Like [`parse_template`], interning identifiers into `interner`.
pub fn parse_template_with<'a>(
    arena: &'a Bump,
    token: &Token,
    grammar: &Grammar,
    interner: &SymbolInterner,
) -> Result<TemplateLiteral<'a>, SyntaxError> {
    let TokenValue::Template(template) = &token.value else {
        let found = token.lexeme.clone();
        return Err(ParseError::new(
            ParseErrorKind::UnexpectedToken { found },
            token.position,
            "template literal",
        )
        .into());
    };

    let segments: Vec<&'a str> = template
        .segments
        .iter()
        .map(|segment| &*arena.alloc_str(segment))
        .collect();

    let mut expressions = Vec::with_capacity(template.substitutions.len());
    for substitution in &template.substitutions {
        trace!("parsing template substitution at {}", substitution.position);
        let tokens = Scanner::new_at(&substitution.source, grammar, substitution.position)
            .collect::<Result<Vec<_>, _>>()?;
        let mut parser = Parser::new(arena, &tokens, grammar).with_interner(interner.clone());
        let expression = parser.parse_expression()?;
        parser.expect_end()?;
        expressions.push(expression);
    }

    Ok(TemplateLiteral {
        range: token.range(),
        segments: alloc_vec_in(arena, segments),
        expressions: alloc_vec_in(arena, expressions),
    })
}
