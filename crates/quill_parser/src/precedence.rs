//! Operator lookup for the precedence-climbing loop.

use quill_ast::syntax_kind::{InfixOperator, Keyword, Operator, TokenKind, UnaryOperator};
use quill_grammar::{BinaryBinding, Grammar};

/// The binding and tree operator of `kind`, if the grammar treats it as an
/// infix operator.
pub fn binary_operator(grammar: &Grammar, kind: TokenKind) -> Option<(BinaryBinding, InfixOperator)> {
    let binding = grammar.binary_binding(kind)?;
    let operator = InfixOperator::from_token(kind)?;
    Some((binding, operator))
}

/// Prefix operators other than `await`, which has its own node.
pub fn unary_operator(kind: TokenKind) -> Option<UnaryOperator> {
    match kind {
        TokenKind::Operator(Operator::Exclamation) => Some(UnaryOperator::Not),
        TokenKind::Operator(Operator::Plus) => Some(UnaryOperator::Plus),
        TokenKind::Operator(Operator::Minus) => Some(UnaryOperator::Minus),
        TokenKind::Operator(Operator::Tilde) => Some(UnaryOperator::BitwiseNot),
        TokenKind::Keyword(Keyword::TypeOf) => Some(UnaryOperator::TypeOf),
        TokenKind::Keyword(Keyword::Void) => Some(UnaryOperator::Void),
        TokenKind::Keyword(Keyword::Delete) => Some(UnaryOperator::Delete),
        _ => None,
    }
}
