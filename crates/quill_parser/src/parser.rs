//! The expression parser.
//!
//! Binary operators are parsed by precedence climbing over the table held
//! in the [`Grammar`]; everything else is recursive descent. Nodes are
//! allocated in a bump arena and the first error ends the parse.

use bumpalo::Bump;
use log::{debug, trace};
use quill_ast::node::*;
use quill_ast::syntax_kind::{AssignmentOperator, InfixOperator, Keyword, Punctuator, TokenKind};
use quill_core::intern::SymbolInterner;
use quill_core::text::{line_terminator_len, SourcePosition, TextPos, TextRange};
use quill_diagnostics::{ParseError, ParseErrorKind};
use quill_grammar::{Grammar, OperatorPrecedence};
use quill_scanner::{Token, TokenValue};

use crate::precedence::{binary_operator, unary_operator};

/// Maximum parser recursion depth. Every delimited construct and every
/// nested operand counts, so 200 allows about 100 levels of brackets.
const MAX_RECURSION_DEPTH: u32 = 200;

/// Deepest tree handed out. Printing and visiting recurse once per level,
/// and long operator or access chains deepen the tree without recursing
/// in the parser.
const MAX_TREE_DEPTH: u32 = 500;

type PResult<T> = Result<T, ParseError>;

/// Returned by the cursor once the token slice is exhausted.
static END_OF_INPUT: Token = Token {
    kind: TokenKind::EndOfInput,
    lexeme: String::new(),
    value: TokenValue::None,
    position: SourcePosition::START,
    end: 0,
    preceded_by_line_terminator: false,
};

/// Move a Vec into the arena as a slice.
pub(crate) fn alloc_vec_in<T>(arena: &Bump, vec: Vec<T>) -> &[T] {
    if vec.is_empty() {
        return &[];
    }
    arena.alloc_slice_fill_iter(vec)
}

/// An opening delimiter, remembered until its partner is found.
struct Open {
    punctuator: Punctuator,
    position: SourcePosition,
}

/// Parameter tokens collected while looking ahead for `=>`.
struct ParameterTokens<'t> {
    rest: Option<&'t Token>,
    name: &'t Token,
}

pub struct Parser<'a, 't> {
    arena: &'a Bump,
    tokens: &'t [Token],
    grammar: &'t Grammar,
    cursor: usize,
    /// End offset of the last consumed token.
    prev_end: TextPos,
    /// Where errors are reported once the slice runs out.
    end_position: SourcePosition,
    interner: SymbolInterner,
    /// Tracks recursion depth to prevent stack overflow on deeply nested input.
    recursion_depth: u32,
}

impl<'a, 't> Parser<'a, 't> {
    pub fn new(arena: &'a Bump, tokens: &'t [Token], grammar: &'t Grammar) -> Self {
        let end_position = match tokens.last() {
            Some(last) if last.kind == TokenKind::EndOfInput => last.position,
            Some(last) => position_after(last),
            None => SourcePosition::START,
        };
        Self {
            arena,
            tokens,
            grammar,
            cursor: 0,
            prev_end: tokens.first().map_or(0, Token::start),
            end_position,
            interner: SymbolInterner::new(),
            recursion_depth: 0,
        }
    }

    /// Intern identifiers into a shared table instead of a private one.
    pub fn with_interner(mut self, interner: SymbolInterner) -> Self {
        self.interner = interner;
        self
    }

    pub fn interner(&self) -> &SymbolInterner {
        &self.interner
    }

    /// Number of tokens consumed so far.
    pub fn consumed(&self) -> usize {
        self.cursor
    }

    /// The tokens not yet consumed.
    pub fn remaining(&self) -> &'t [Token] {
        &self.tokens[self.cursor..]
    }

    // ========================================================================
    // Entry points
    // ========================================================================

    /// Parse a comma expression starting at the current token.
    pub fn parse_expression(&mut self) -> PResult<&'a Expression<'a>> {
        debug!("parsing expression at {}", self.position());
        let expr = self.parse_sequence_expression()?;
        debug!("parsed {} ending at offset {}", expr.kind_name(), self.prev_end);
        self.check_tree_depth(&expr)?;
        Ok(self.alloc(expr))
    }

    /// Fail unless every token up to the end of input has been consumed.
    pub fn expect_end(&self) -> PResult<()> {
        if self.kind() == TokenKind::EndOfInput {
            Ok(())
        } else {
            Err(self.unexpected("end of input"))
        }
    }

    // ========================================================================
    // Token access
    // ========================================================================

    #[inline]
    fn current(&self) -> &'t Token {
        self.peek(0)
    }

    #[inline]
    fn peek(&self, n: usize) -> &'t Token {
        self.tokens.get(self.cursor + n).unwrap_or(&END_OF_INPUT)
    }

    #[inline]
    fn kind(&self) -> TokenKind {
        self.current().kind
    }

    #[inline]
    fn at(&self, p: Punctuator) -> bool {
        self.kind().is_punctuator(p)
    }

    fn position(&self) -> SourcePosition {
        match self.tokens.get(self.cursor) {
            Some(token) => token.position,
            None => self.end_position,
        }
    }

    #[inline]
    fn start(&self) -> TextPos {
        self.position().offset
    }

    /// Consume the current token. The end-of-input token is never consumed.
    fn advance(&mut self) -> &'t Token {
        let token = self.current();
        if token.kind != TokenKind::EndOfInput {
            self.cursor += 1;
            self.prev_end = token.end;
        }
        token
    }

    fn eat(&mut self, p: Punctuator) -> bool {
        if self.at(p) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn open(&mut self, punctuator: Punctuator) -> Open {
        let position = self.position();
        self.advance();
        Open {
            punctuator,
            position,
        }
    }

    fn checkpoint(&self) -> (usize, TextPos) {
        (self.cursor, self.prev_end)
    }

    fn rewind(&mut self, (cursor, prev_end): (usize, TextPos)) {
        self.cursor = cursor;
        self.prev_end = prev_end;
    }

    #[inline]
    fn range_from(&self, start: TextPos) -> TextRange {
        TextRange::new(start, self.prev_end)
    }

    #[inline]
    fn alloc(&self, expr: Expression<'a>) -> &'a Expression<'a> {
        self.arena.alloc(expr)
    }

    fn enter(&mut self) -> PResult<()> {
        self.recursion_depth += 1;
        if self.recursion_depth > MAX_RECURSION_DEPTH {
            return Err(self.error(
                ParseErrorKind::NestingTooDeep {
                    limit: MAX_RECURSION_DEPTH,
                },
                "a shallower expression",
            ));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.recursion_depth -= 1;
    }

    /// Run `parse` one recursion level deeper.
    fn nested<T>(&mut self, parse: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<T> {
        self.enter()?;
        let result = parse(self);
        self.leave();
        result
    }

    fn check_tree_depth(&self, expr: &Expression<'a>) -> PResult<()> {
        let depth = expr.depth();
        if depth <= MAX_TREE_DEPTH {
            return Ok(());
        }
        trace!("tree depth {} over the limit", depth);
        Err(ParseError::new(
            ParseErrorKind::NestingTooDeep { limit: MAX_TREE_DEPTH },
            self.position_of_offset(expr.range().pos),
            "a shallower expression",
        ))
    }

    /// Position of the token starting at `offset`.
    fn position_of_offset(&self, offset: TextPos) -> SourcePosition {
        let index = self.tokens.partition_point(|token| token.start() < offset);
        match self.tokens.get(index) {
            Some(token) if token.start() == offset => token.position,
            _ => self.end_position,
        }
    }

    // ========================================================================
    // Errors
    // ========================================================================

    fn error(&self, kind: ParseErrorKind, expected: &'static str) -> ParseError {
        ParseError::new(kind, self.position(), expected)
    }

    fn unexpected(&self, expected: &'static str) -> ParseError {
        let token = self.current();
        let found = if token.kind == TokenKind::EndOfInput {
            "end of input".to_string()
        } else {
            token.lexeme.clone()
        };
        self.error(ParseErrorKind::UnexpectedToken { found }, expected)
    }

    /// An operand was required but the current token cannot start one.
    fn expression_expected(&self) -> ParseError {
        let kind = self.kind();
        let missing = matches!(kind, TokenKind::EndOfInput | TokenKind::Operator(_))
            || ends_list(kind)
            || matches!(
                kind,
                TokenKind::Punctuator(
                    Punctuator::Comma
                        | Punctuator::Question
                        | Punctuator::Arrow
                        | Punctuator::Dot
                        | Punctuator::QuestionDot
                )
            );
        if missing {
            self.error(ParseErrorKind::MissingOperand, "expression")
        } else {
            self.unexpected("expression")
        }
    }

    fn unmatched(&self, open: &Open, close: Punctuator) -> ParseError {
        self.error(
            ParseErrorKind::UnmatchedDelimiter {
                open: open.punctuator.text(),
                close: close.text(),
                open_position: open.position,
            },
            quoted(close),
        )
    }

    fn expect_closing(&mut self, open: &Open, close: Punctuator) -> PResult<()> {
        if self.eat(close) {
            Ok(())
        } else if self.kind() == TokenKind::EndOfInput {
            Err(self.unmatched(open, close))
        } else {
            Err(self.unexpected(quoted(close)))
        }
    }

    /// Inside a delimited list: fail if the input ends before `close`.
    fn check_unclosed(&self, open: &Open, close: Punctuator) -> PResult<()> {
        if self.kind() == TokenKind::EndOfInput {
            Err(self.unmatched(open, close))
        } else {
            Ok(())
        }
    }

    /// Between list elements: a comma, unless the list closes here.
    fn expect_separator(&mut self, open: &Open, close: Punctuator, expected: &'static str) -> PResult<()> {
        if self.at(close) || self.eat(Punctuator::Comma) {
            Ok(())
        } else if self.kind() == TokenKind::EndOfInput {
            Err(self.unmatched(open, close))
        } else {
            Err(self.unexpected(expected))
        }
    }

    // ========================================================================
    // Comma, assignment and conditional
    // ========================================================================

    fn parse_sequence_expression(&mut self) -> PResult<Expression<'a>> {
        let start = self.start();
        let first = self.parse_assignment_expression()?;
        if !self.at(Punctuator::Comma) {
            return Ok(first);
        }
        let mut expressions = vec![first];
        while self.at(Punctuator::Comma) {
            if ends_list(self.peek(1).kind) {
                return Err(self.error(ParseErrorKind::TrailingComma, "expression"));
            }
            self.advance();
            expressions.push(self.parse_assignment_expression()?);
        }
        Ok(Expression::Sequence(SequenceExpression {
            range: self.range_from(start),
            expressions: alloc_vec_in(self.arena, expressions),
        }))
    }

    fn parse_assignment_expression(&mut self) -> PResult<Expression<'a>> {
        self.nested(Self::parse_assignment_expression_worker)
    }

    fn parse_assignment_expression_worker(&mut self) -> PResult<Expression<'a>> {
        if let Some(arrow) = self.try_parse_arrow_function()? {
            return Ok(arrow);
        }

        let start = self.start();
        let target_position = self.position();
        let target = self.parse_conditional_expression()?;

        // Parse optimistically, then check the left side once an
        // assignment operator shows up.
        let TokenKind::Operator(op) = self.kind() else {
            return Ok(target);
        };
        let Some(operator) = AssignmentOperator::from_operator(op) else {
            return Ok(target);
        };
        if !target.is_assignment_target() {
            return Err(ParseError::new(
                ParseErrorKind::InvalidAssignmentTarget,
                target_position,
                "identifier or member access",
            ));
        }
        self.advance();
        let value = self.parse_assignment_expression()?;
        let target = self.alloc(target);
        let value = self.alloc(value);
        Ok(Expression::Assignment(AssignmentExpression {
            range: self.range_from(start),
            operator,
            target,
            value,
        }))
    }

    fn parse_conditional_expression(&mut self) -> PResult<Expression<'a>> {
        let start = self.start();
        let test = self.parse_binary_expression(OperatorPrecedence::NullishCoalescing)?;
        if !self.eat(Punctuator::Question) {
            return Ok(test);
        }
        let consequent = self.parse_assignment_expression()?;
        if !self.eat(Punctuator::Colon) {
            return Err(self.unexpected("':'"));
        }
        let alternate = self.parse_assignment_expression()?;
        let test = self.alloc(test);
        let consequent = self.alloc(consequent);
        let alternate = self.alloc(alternate);
        Ok(Expression::Conditional(ConditionalExpression {
            range: self.range_from(start),
            test,
            consequent,
            alternate,
        }))
    }

    // ========================================================================
    // Binary and unary operators
    // ========================================================================

    /// Parse operators binding at least as tightly as `min_level`.
    fn parse_binary_expression(&mut self, min_level: OperatorPrecedence) -> PResult<Expression<'a>> {
        let start = self.start();
        let mut left = self.parse_unary_expression()?;

        while let Some((binding, operator)) = binary_operator(self.grammar, self.kind()) {
            if binding.level < min_level {
                break;
            }
            self.advance();

            let right = self.nested(|parser| parser.parse_binary_expression(binding.operand_level()))?;
            let right = self.alloc(right);

            let left_node = self.alloc(left);
            let range = self.range_from(start);
            left = match operator {
                InfixOperator::Binary(operator) => Expression::Binary(BinaryExpression {
                    range,
                    operator,
                    left: left_node,
                    right,
                }),
                InfixOperator::Logical(operator) => Expression::Logical(LogicalExpression {
                    range,
                    operator,
                    left: left_node,
                    right,
                }),
            };
        }

        Ok(left)
    }

    fn parse_unary_expression(&mut self) -> PResult<Expression<'a>> {
        let kind = self.kind();
        let operator = unary_operator(kind);
        if operator.is_none() && !kind.is_keyword(Keyword::Await) {
            return self.parse_left_hand_side_expression();
        }

        let start = self.start();
        self.advance();
        let operand = self.nested(Self::parse_unary_expression)?;
        let operand = self.alloc(operand);
        let range = self.range_from(start);
        Ok(match operator {
            Some(operator) => Expression::Unary(UnaryExpression {
                range,
                operator,
                operand,
            }),
            None => Expression::Await(AwaitExpression { range, operand }),
        })
    }

    // ========================================================================
    // Member access, calls and `new`
    // ========================================================================

    fn parse_left_hand_side_expression(&mut self) -> PResult<Expression<'a>> {
        let start = self.start();
        let mut expr = if self.kind().is_keyword(Keyword::New) {
            self.parse_new_expression()?
        } else {
            self.parse_primary_expression()?
        };

        let mut in_optional_chain = false;
        loop {
            expr = match self.kind() {
                TokenKind::Punctuator(Punctuator::Dot) => {
                    self.advance();
                    let name = self.parse_property_name()?;
                    self.finish_member(start, expr, MemberProperty::Named(name), false)
                }
                TokenKind::Punctuator(Punctuator::OpenBracket) => {
                    let property = self.parse_bracketed_expression()?;
                    self.finish_member(start, expr, MemberProperty::Computed(property), false)
                }
                TokenKind::Punctuator(Punctuator::OpenParen) => {
                    let arguments = self.parse_arguments()?;
                    self.finish_call(start, expr, arguments, false)
                }
                TokenKind::Punctuator(Punctuator::QuestionDot) => {
                    self.advance();
                    in_optional_chain = true;
                    match self.kind() {
                        TokenKind::Punctuator(Punctuator::OpenBracket) => {
                            let property = self.parse_bracketed_expression()?;
                            self.finish_member(start, expr, MemberProperty::Computed(property), true)
                        }
                        TokenKind::Punctuator(Punctuator::OpenParen) => {
                            let arguments = self.parse_arguments()?;
                            self.finish_call(start, expr, arguments, true)
                        }
                        _ => {
                            let name = self.parse_property_name()?;
                            self.finish_member(start, expr, MemberProperty::Named(name), true)
                        }
                    }
                }
                _ => break,
            };
        }

        if in_optional_chain {
            let expression = self.alloc(expr);
            expr = Expression::OptionalChain(OptionalChain {
                range: self.range_from(start),
                expression,
            });
        }
        Ok(expr)
    }

    fn finish_member(
        &self,
        start: TextPos,
        object: Expression<'a>,
        property: MemberProperty<'a>,
        optional: bool,
    ) -> Expression<'a> {
        Expression::Member(MemberExpression {
            range: self.range_from(start),
            object: self.alloc(object),
            property,
            optional,
        })
    }

    fn finish_call(
        &self,
        start: TextPos,
        callee: Expression<'a>,
        arguments: &'a [Argument<'a>],
        optional: bool,
    ) -> Expression<'a> {
        Expression::Call(CallExpression {
            range: self.range_from(start),
            callee: self.alloc(callee),
            arguments,
            optional,
        })
    }

    /// `new Callee`, `new Callee(args)`. The callee may carry `.name` and
    /// `[expr]` accesses but no calls, so `new a.b(c)` applies `c` to `a.b`.
    fn parse_new_expression(&mut self) -> PResult<Expression<'a>> {
        self.nested(Self::parse_new_expression_worker)
    }

    fn parse_new_expression_worker(&mut self) -> PResult<Expression<'a>> {
        let start = self.start();
        self.advance();

        let callee_start = self.start();
        let mut callee = if self.kind().is_keyword(Keyword::New) {
            self.parse_new_expression()?
        } else {
            self.parse_primary_expression()?
        };
        loop {
            callee = match self.kind() {
                TokenKind::Punctuator(Punctuator::Dot) => {
                    self.advance();
                    let name = self.parse_property_name()?;
                    self.finish_member(callee_start, callee, MemberProperty::Named(name), false)
                }
                TokenKind::Punctuator(Punctuator::OpenBracket) => {
                    let property = self.parse_bracketed_expression()?;
                    self.finish_member(callee_start, callee, MemberProperty::Computed(property), false)
                }
                _ => break,
            };
        }

        let arguments = if self.at(Punctuator::OpenParen) {
            self.parse_arguments()?
        } else {
            &[]
        };
        let callee = self.alloc(callee);
        Ok(Expression::New(NewExpression {
            range: self.range_from(start),
            callee,
            arguments,
        }))
    }

    /// The name after `.` or `?.`. Reserved words are allowed here.
    fn parse_property_name(&mut self) -> PResult<Identifier<'a>> {
        let token = self.current();
        match property_name(token) {
            Some(name) => {
                self.advance();
                Ok(self.make_identifier(token, name))
            }
            None => Err(self.unexpected("property name")),
        }
    }

    /// `[expr]`, as a computed member or object key.
    fn parse_bracketed_expression(&mut self) -> PResult<&'a Expression<'a>> {
        self.nested(Self::parse_bracketed_expression_worker)
    }

    fn parse_bracketed_expression_worker(&mut self) -> PResult<&'a Expression<'a>> {
        let open = self.open(Punctuator::OpenBracket);
        self.check_unclosed(&open, Punctuator::CloseBracket)?;
        let expression = self.parse_sequence_expression()?;
        self.expect_closing(&open, Punctuator::CloseBracket)?;
        Ok(self.alloc(expression))
    }

    fn parse_arguments(&mut self) -> PResult<&'a [Argument<'a>]> {
        self.nested(Self::parse_arguments_worker)
    }

    fn parse_arguments_worker(&mut self) -> PResult<&'a [Argument<'a>]> {
        let open = self.open(Punctuator::OpenParen);
        let mut arguments = Vec::new();
        while !self.eat(Punctuator::CloseParen) {
            self.check_unclosed(&open, Punctuator::CloseParen)?;
            arguments.push(self.parse_argument()?);
            self.expect_separator(&open, Punctuator::CloseParen, "',' or ')'")?;
        }
        Ok(alloc_vec_in(self.arena, arguments))
    }

    /// An argument or array element, optionally spread.
    fn parse_argument(&mut self) -> PResult<Argument<'a>> {
        let start = self.start();
        let spread = self.eat(Punctuator::DotDotDot);
        let expression = self.parse_assignment_expression()?;
        Ok(Argument {
            range: self.range_from(start),
            spread,
            expression: self.alloc(expression),
        })
    }

    // ========================================================================
    // Primary expressions
    // ========================================================================

    fn parse_primary_expression(&mut self) -> PResult<Expression<'a>> {
        let token = self.current();
        match token.kind {
            kind if kind.is_literal() => {
                self.advance();
                Ok(Expression::Literal(self.make_literal(token)))
            }
            TokenKind::Identifier => {
                self.advance();
                let name = token.identifier_name().unwrap_or(&token.lexeme);
                Ok(Expression::Identifier(self.make_identifier(token, name)))
            }
            TokenKind::Keyword(Keyword::This) => {
                self.advance();
                Ok(Expression::This(ThisExpression { range: token.range() }))
            }
            TokenKind::Punctuator(Punctuator::OpenParen) => self.nested(Self::parse_parenthesized_expression),
            TokenKind::Punctuator(Punctuator::OpenBracket) => self.nested(Self::parse_array_literal),
            TokenKind::Punctuator(Punctuator::OpenBrace) => self.nested(Self::parse_object_literal),
            TokenKind::Punctuator(Punctuator::DotDotDot) => {
                Err(self.error(ParseErrorKind::UnexpectedSpread, "expression"))
            }
            _ => Err(self.expression_expected()),
        }
    }

    fn parse_parenthesized_expression(&mut self) -> PResult<Expression<'a>> {
        let start = self.start();
        let open = self.open(Punctuator::OpenParen);
        self.check_unclosed(&open, Punctuator::CloseParen)?;
        let expression = self.parse_sequence_expression()?;
        self.expect_closing(&open, Punctuator::CloseParen)?;
        let expression = self.alloc(expression);
        Ok(Expression::Paren(ParenthesizedExpression {
            range: self.range_from(start),
            expression,
        }))
    }

    fn parse_array_literal(&mut self) -> PResult<Expression<'a>> {
        let start = self.start();
        let open = self.open(Punctuator::OpenBracket);
        let mut elements = Vec::new();
        while !self.eat(Punctuator::CloseBracket) {
            self.check_unclosed(&open, Punctuator::CloseBracket)?;
            if self.at(Punctuator::Comma) {
                // holes are not supported
                return Err(self.unexpected("array element"));
            }
            elements.push(self.parse_argument()?);
            self.expect_separator(&open, Punctuator::CloseBracket, "',' or ']'")?;
        }
        Ok(Expression::Array(ArrayLiteral {
            range: self.range_from(start),
            elements: alloc_vec_in(self.arena, elements),
        }))
    }

    fn parse_object_literal(&mut self) -> PResult<Expression<'a>> {
        let start = self.start();
        let open = self.open(Punctuator::OpenBrace);
        let mut properties = Vec::new();
        while !self.eat(Punctuator::CloseBrace) {
            self.check_unclosed(&open, Punctuator::CloseBrace)?;
            properties.push(self.parse_property()?);
            self.expect_separator(&open, Punctuator::CloseBrace, "',' or '}'")?;
        }
        Ok(Expression::Object(ObjectLiteral {
            range: self.range_from(start),
            properties: alloc_vec_in(self.arena, properties),
        }))
    }

    fn parse_property(&mut self) -> PResult<Property<'a>> {
        let start = self.start();
        let token = self.current();
        let key = match token.kind {
            TokenKind::Punctuator(Punctuator::DotDotDot) => {
                return Err(self.error(ParseErrorKind::UnexpectedSpread, "property"));
            }
            TokenKind::Punctuator(Punctuator::OpenBracket) => {
                PropertyKey::Computed(self.parse_bracketed_expression()?)
            }
            TokenKind::NumberLiteral | TokenKind::StringLiteral => {
                self.advance();
                PropertyKey::Literal(self.make_literal(token))
            }
            _ => match property_name(token) {
                Some(name) => {
                    self.advance();
                    PropertyKey::Identifier(self.make_identifier(token, name))
                }
                None => return Err(self.unexpected("property name")),
            },
        };

        let value = if self.eat(Punctuator::Colon) {
            let value = self.parse_assignment_expression()?;
            Some(self.alloc(value))
        } else if token.kind == TokenKind::Identifier {
            // shorthand `{ name }`
            None
        } else {
            return Err(self.unexpected("':'"));
        };

        Ok(Property {
            range: self.range_from(start),
            key,
            value,
        })
    }

    // ========================================================================
    // Arrow functions
    // ========================================================================

    /// Recognize an arrow function at the start of an assignment expression.
    ///
    /// Returns `None` with the cursor untouched when the tokens ahead do not
    /// form an arrow head, so the caller can parse them as a plain
    /// expression (`(a, b)` stays a parenthesized sequence and `async(x)`
    /// stays a call).
    fn try_parse_arrow_function(&mut self) -> PResult<Option<Expression<'a>>> {
        let start = self.start();
        let first = self.current();
        let second = self.peek(1);

        if first.kind == TokenKind::Identifier && is_arrow(second) {
            let parameters = self.parse_shorthand_parameter();
            return self.finish_arrow(start, false, parameters, true).map(Some);
        }

        let is_async = first.is_contextual("async") && !second.preceded_by_line_terminator;
        if is_async && second.kind == TokenKind::Identifier && is_arrow(self.peek(2)) {
            self.advance();
            let parameters = self.parse_shorthand_parameter();
            return self.finish_arrow(start, true, parameters, true).map(Some);
        }

        let list_starts_at = if is_async && second.is_punctuator(Punctuator::OpenParen) {
            1
        } else if first.is_punctuator(Punctuator::OpenParen) {
            0
        } else {
            return Ok(None);
        };

        let checkpoint = self.checkpoint();
        trace!("trying arrow parameters at {}", self.peek(list_starts_at).position);
        for _ in 0..list_starts_at {
            self.advance();
        }
        match self.try_parse_parameter_list()? {
            Some(parameters) => self.finish_arrow(start, list_starts_at == 1, parameters, false).map(Some),
            None => {
                trace!("no arrow head at {}; rewinding", first.position);
                self.rewind(checkpoint);
                Ok(None)
            }
        }
    }

    fn parse_shorthand_parameter(&mut self) -> &'a [Parameter<'a>] {
        let token = self.advance();
        let name = token.identifier_name().unwrap_or(&token.lexeme);
        let parameter = Parameter {
            range: token.range(),
            name: self.make_identifier(token, name),
            rest: false,
        };
        alloc_vec_in(self.arena, vec![parameter])
    }

    /// Read `( a, b, ...rest )` when it is followed by `=>`.
    ///
    /// Returns `None` when the tokens are not a parameter list; the caller
    /// rewinds. A misplaced rest parameter is only an error once the `=>`
    /// has confirmed the arrow.
    fn try_parse_parameter_list(&mut self) -> PResult<Option<&'a [Parameter<'a>]>> {
        self.advance();
        let mut collected: Vec<ParameterTokens<'t>> = Vec::new();
        let mut trailing_comma = false;
        loop {
            if self.eat(Punctuator::CloseParen) {
                break;
            }
            let rest = if self.at(Punctuator::DotDotDot) {
                Some(self.advance())
            } else {
                None
            };
            if self.kind() != TokenKind::Identifier {
                return Ok(None);
            }
            let name = self.advance();
            collected.push(ParameterTokens { rest, name });
            if self.eat(Punctuator::Comma) {
                trailing_comma = self.at(Punctuator::CloseParen);
            } else if self.eat(Punctuator::CloseParen) {
                break;
            } else {
                return Ok(None);
            }
        }
        if !is_arrow(self.current()) {
            return Ok(None);
        }

        let last = collected.len().saturating_sub(1);
        for (i, parameter) in collected.iter().enumerate() {
            if let Some(rest) = parameter.rest {
                if i != last || trailing_comma {
                    return Err(ParseError::new(
                        ParseErrorKind::RestParameterMustBeLast,
                        rest.position,
                        "')'",
                    ));
                }
            }
        }

        let parameters = collected
            .iter()
            .map(|parameter| {
                let first = parameter.rest.unwrap_or(parameter.name);
                let name = parameter.name.identifier_name().unwrap_or(&parameter.name.lexeme);
                Parameter {
                    range: TextRange::new(first.start(), parameter.name.end),
                    name: self.make_identifier(parameter.name, name),
                    rest: parameter.rest.is_some(),
                }
            })
            .collect::<Vec<_>>();
        Ok(Some(alloc_vec_in(self.arena, parameters)))
    }

    fn finish_arrow(
        &mut self,
        start: TextPos,
        is_async: bool,
        parameters: &'a [Parameter<'a>],
        shorthand: bool,
    ) -> PResult<Expression<'a>> {
        self.advance();
        let body = if self.at(Punctuator::OpenBrace) {
            ArrowBody::Block(self.parse_block_placeholder()?)
        } else {
            let body = self.parse_assignment_expression()?;
            ArrowBody::Expression(self.alloc(body))
        };
        Ok(Expression::Arrow(ArrowFunction {
            range: self.range_from(start),
            is_async,
            parameters,
            body,
            shorthand,
        }))
    }

    /// Skip a balanced `{ ... }` body, keeping its lexemes joined by spaces.
    fn parse_block_placeholder(&mut self) -> PResult<BlockPlaceholder<'a>> {
        let start = self.start();
        let open = self.open(Punctuator::OpenBrace);
        let mut text = String::from("{");
        let mut depth = 0u32;
        loop {
            let token = self.current();
            match token.kind {
                TokenKind::EndOfInput => return Err(self.unmatched(&open, Punctuator::CloseBrace)),
                TokenKind::Punctuator(Punctuator::OpenBrace) => depth += 1,
                TokenKind::Punctuator(Punctuator::CloseBrace) if depth == 0 => {
                    self.advance();
                    text.push_str(" }");
                    break;
                }
                TokenKind::Punctuator(Punctuator::CloseBrace) => depth -= 1,
                _ => {}
            }
            text.push(' ');
            text.push_str(&token.lexeme);
            self.advance();
        }
        Ok(BlockPlaceholder {
            range: self.range_from(start),
            text: self.arena.alloc_str(&text),
        })
    }

    // ========================================================================
    // Leaves
    // ========================================================================

    fn make_identifier(&self, token: &Token, name: &str) -> Identifier<'a> {
        Identifier {
            range: token.range(),
            name: self.arena.alloc_str(name),
            symbol: self.interner.intern(name),
        }
    }

    fn make_literal(&self, token: &Token) -> Literal<'a> {
        let value = match (&token.kind, &token.value) {
            (TokenKind::TemplateLiteral, _) => {
                let body = template_body(&token.lexeme);
                LiteralValue::Template(self.arena.alloc_str(body))
            }
            (_, TokenValue::Number(n)) => LiteralValue::Number(*n),
            (_, TokenValue::String(s)) => LiteralValue::String(self.arena.alloc_str(s)),
            (_, TokenValue::Boolean(b)) => LiteralValue::Boolean(*b),
            (TokenKind::NullLiteral, _) => LiteralValue::Null,
            _ => LiteralValue::Undefined,
        };
        Literal {
            range: token.range(),
            value,
            raw: self.arena.alloc_str(&token.lexeme),
        }
    }
}

/// Tokens after which a dangling comma counts as a trailing comma.
fn ends_list(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::EndOfInput
            | TokenKind::Punctuator(
                Punctuator::CloseParen
                    | Punctuator::CloseBracket
                    | Punctuator::CloseBrace
                    | Punctuator::Semicolon
                    | Punctuator::Colon
            )
    )
}

/// `=>` on the same line as the parameters.
fn is_arrow(token: &Token) -> bool {
    token.is_punctuator(Punctuator::Arrow) && !token.preceded_by_line_terminator
}

/// Names usable after `.` and as object keys: identifiers, reserved words
/// and the literal words.
fn property_name(token: &Token) -> Option<&str> {
    match token.kind {
        TokenKind::Identifier => token.identifier_name(),
        TokenKind::Keyword(keyword) if token.lexeme.contains('\\') => Some(keyword.text()),
        TokenKind::Keyword(_)
        | TokenKind::BooleanLiteral
        | TokenKind::NullLiteral
        | TokenKind::UndefinedLiteral => Some(&token.lexeme),
        _ => None,
    }
}

/// The position just past `token`, following line breaks inside it.
fn position_after(token: &Token) -> SourcePosition {
    let mut position = token.position;
    let bytes = token.lexeme.as_bytes();
    let mut index = 0;
    while index < bytes.len() {
        let terminator = line_terminator_len(&bytes[index..]);
        if terminator > 0 {
            index += terminator;
            position.line += 1;
            position.column = 1;
        } else {
            // skip UTF-8 continuation bytes
            index += 1;
            while bytes.get(index).is_some_and(|b| b & 0xC0 == 0x80) {
                index += 1;
            }
            position.column += 1;
        }
    }
    position.offset = token.end;
    position
}

fn template_body(lexeme: &str) -> &str {
    lexeme
        .strip_prefix('`')
        .and_then(|rest| rest.strip_suffix('`'))
        .unwrap_or(lexeme)
}

fn quoted(close: Punctuator) -> &'static str {
    match close {
        Punctuator::CloseParen => "')'",
        Punctuator::CloseBracket => "']'",
        Punctuator::CloseBrace => "'}'",
        _ => "closing delimiter",
    }
}
