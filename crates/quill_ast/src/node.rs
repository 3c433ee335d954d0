//! Expression tree node definitions.
//!
//! Every node records the byte range it covers. Children are arena
//! references; a node never shares a child with another node.

use crate::syntax_kind::{AssignmentOperator, BinaryOperator, LogicalOperator, UnaryOperator};
use quill_core::intern::Symbol;
use quill_core::text::TextRange;

/// A list of nodes, allocated in the arena.
pub type NodeList<'a, T> = &'a [T];

// ============================================================================
// Expression
// ============================================================================

#[derive(Debug)]
pub enum Expression<'a> {
    Literal(Literal<'a>),
    Identifier(Identifier<'a>),
    This(ThisExpression),
    Array(ArrayLiteral<'a>),
    Object(ObjectLiteral<'a>),
    Paren(ParenthesizedExpression<'a>),
    Member(MemberExpression<'a>),
    Call(CallExpression<'a>),
    New(NewExpression<'a>),
    OptionalChain(OptionalChain<'a>),
    Unary(UnaryExpression<'a>),
    Await(AwaitExpression<'a>),
    Binary(BinaryExpression<'a>),
    Logical(LogicalExpression<'a>),
    Conditional(ConditionalExpression<'a>),
    Assignment(AssignmentExpression<'a>),
    Arrow(ArrowFunction<'a>),
    Sequence(SequenceExpression<'a>),
}

impl<'a> Expression<'a> {
    pub fn range(&self) -> TextRange {
        match self {
            Expression::Literal(n) => n.range,
            Expression::Identifier(n) => n.range,
            Expression::This(n) => n.range,
            Expression::Array(n) => n.range,
            Expression::Object(n) => n.range,
            Expression::Paren(n) => n.range,
            Expression::Member(n) => n.range,
            Expression::Call(n) => n.range,
            Expression::New(n) => n.range,
            Expression::OptionalChain(n) => n.range,
            Expression::Unary(n) => n.range,
            Expression::Await(n) => n.range,
            Expression::Binary(n) => n.range,
            Expression::Logical(n) => n.range,
            Expression::Conditional(n) => n.range,
            Expression::Assignment(n) => n.range,
            Expression::Arrow(n) => n.range,
            Expression::Sequence(n) => n.range,
        }
    }

    /// Short name of the node kind, as used by tree dumps.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expression::Literal(_) => "literal",
            Expression::Identifier(_) => "identifier",
            Expression::This(_) => "this",
            Expression::Array(_) => "array",
            Expression::Object(_) => "object",
            Expression::Paren(_) => "paren",
            Expression::Member(_) => "member",
            Expression::Call(_) => "call",
            Expression::New(_) => "new",
            Expression::OptionalChain(_) => "optional-chain",
            Expression::Unary(_) => "unary",
            Expression::Await(_) => "await",
            Expression::Binary(_) => "binary",
            Expression::Logical(_) => "logical",
            Expression::Conditional(_) => "conditional",
            Expression::Assignment(_) => "assignment",
            Expression::Arrow(_) => "arrow",
            Expression::Sequence(_) => "sequence",
        }
    }

    /// Whether this expression may appear on the left of an assignment:
    /// an identifier or a non-optional member access, possibly parenthesized.
    pub fn is_assignment_target(&self) -> bool {
        match self.skip_parens() {
            Expression::Identifier(_) => true,
            Expression::Member(member) => !member.optional,
            _ => false,
        }
    }

    /// Strip any number of grouping parentheses.
    pub fn skip_parens(&self) -> &Expression<'a> {
        let mut expr = self;
        while let Expression::Paren(paren) = expr {
            expr = paren.expression;
        }
        expr
    }

    /// Call `f` on each direct child expression, in source order.
    ///
    /// Property keys and names are not expressions unless computed.
    pub fn for_each_child<'s>(&'s self, mut f: impl FnMut(&'s Expression<'a>)) {
        match self {
            Expression::Literal(_) | Expression::Identifier(_) | Expression::This(_) => {}
            Expression::Array(n) => n.elements.iter().for_each(|e| f(e.expression)),
            Expression::Object(n) => {
                for property in n.properties.iter() {
                    if let PropertyKey::Computed(key) = &property.key {
                        f(*key);
                    }
                    if let Some(value) = property.value {
                        f(value);
                    }
                }
            }
            Expression::Paren(n) => f(n.expression),
            Expression::Member(n) => {
                f(n.object);
                if let MemberProperty::Computed(property) = &n.property {
                    f(*property);
                }
            }
            Expression::Call(n) => {
                f(n.callee);
                n.arguments.iter().for_each(|a| f(a.expression));
            }
            Expression::New(n) => {
                f(n.callee);
                n.arguments.iter().for_each(|a| f(a.expression));
            }
            Expression::OptionalChain(n) => f(n.expression),
            Expression::Unary(n) => f(n.operand),
            Expression::Await(n) => f(n.operand),
            Expression::Binary(n) => {
                f(n.left);
                f(n.right);
            }
            Expression::Logical(n) => {
                f(n.left);
                f(n.right);
            }
            Expression::Conditional(n) => {
                f(n.test);
                f(n.consequent);
                f(n.alternate);
            }
            Expression::Assignment(n) => {
                f(n.target);
                f(n.value);
            }
            Expression::Arrow(n) => {
                if let ArrowBody::Expression(body) = &n.body {
                    f(*body);
                }
            }
            Expression::Sequence(n) => {
                for expr in n.expressions.iter() {
                    f(expr);
                }
            }
        }
    }

    /// Number of nodes on the longest path from this node to a leaf.
    ///
    /// Walks with an explicit stack, so it is safe on trees of any depth.
    pub fn depth(&self) -> u32 {
        let mut deepest = 0;
        let mut stack = vec![(self, 1u32)];
        while let Some((expr, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            expr.for_each_child(|child| stack.push((child, depth + 1)));
        }
        deepest
    }
}

// ============================================================================
// Primary expressions
// ============================================================================

#[derive(Debug)]
pub struct Literal<'a> {
    pub range: TextRange,
    pub value: LiteralValue<'a>,
    /// The source lexeme, kept so printing is lossless.
    pub raw: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LiteralValue<'a> {
    Number(f64),
    /// Decoded string contents.
    String(&'a str),
    /// Template text between the backticks; substitutions are left opaque.
    Template(&'a str),
    Boolean(bool),
    Null,
    Undefined,
}

#[derive(Debug)]
pub struct Identifier<'a> {
    pub range: TextRange,
    /// Decoded name (Unicode escapes already applied).
    pub name: &'a str,
    pub symbol: Symbol,
}

#[derive(Debug)]
pub struct ThisExpression {
    pub range: TextRange,
}

/// An element of an array literal or an argument of a call / `new`.
#[derive(Debug)]
pub struct Argument<'a> {
    pub range: TextRange,
    pub spread: bool,
    pub expression: &'a Expression<'a>,
}

#[derive(Debug)]
pub struct ArrayLiteral<'a> {
    pub range: TextRange,
    pub elements: NodeList<'a, Argument<'a>>,
}

#[derive(Debug)]
pub struct ObjectLiteral<'a> {
    pub range: TextRange,
    pub properties: NodeList<'a, Property<'a>>,
}

#[derive(Debug)]
pub struct Property<'a> {
    pub range: TextRange,
    pub key: PropertyKey<'a>,
    /// `None` for shorthand properties (`{ name }`).
    pub value: Option<&'a Expression<'a>>,
}

#[derive(Debug)]
pub enum PropertyKey<'a> {
    Identifier(Identifier<'a>),
    /// A string or number key; the literal keeps its raw lexeme.
    Literal(Literal<'a>),
    Computed(&'a Expression<'a>),
}

/// Explicit grouping, kept so that printing reproduces the source shape.
#[derive(Debug)]
pub struct ParenthesizedExpression<'a> {
    pub range: TextRange,
    pub expression: &'a Expression<'a>,
}

// ============================================================================
// Member access, calls and `new`
// ============================================================================

#[derive(Debug)]
pub struct MemberExpression<'a> {
    pub range: TextRange,
    pub object: &'a Expression<'a>,
    pub property: MemberProperty<'a>,
    /// This link was written with `?.`.
    pub optional: bool,
}

#[derive(Debug)]
pub enum MemberProperty<'a> {
    /// `object.name`
    Named(Identifier<'a>),
    /// `object[expr]`
    Computed(&'a Expression<'a>),
}

#[derive(Debug)]
pub struct CallExpression<'a> {
    pub range: TextRange,
    pub callee: &'a Expression<'a>,
    pub arguments: NodeList<'a, Argument<'a>>,
    /// This link was written with `?.`.
    pub optional: bool,
}

#[derive(Debug)]
pub struct NewExpression<'a> {
    pub range: TextRange,
    pub callee: &'a Expression<'a>,
    /// Empty both for `new C()` and for `new C`.
    pub arguments: NodeList<'a, Argument<'a>>,
}

/// An access chain containing at least one `?.` link.
///
/// The wrapper marks how far a short-circuit reaches: when an optional link
/// finds a nullish base, everything up to this node is skipped.
#[derive(Debug)]
pub struct OptionalChain<'a> {
    pub range: TextRange,
    pub expression: &'a Expression<'a>,
}

impl<'a> OptionalChain<'a> {
    /// The first link of the chain written with `?.` (the innermost one in
    /// the tree), where short-circuiting can begin.
    pub fn chain_start(&self) -> Option<&'a Expression<'a>> {
        let mut start = None;
        let mut expr = self.expression;
        loop {
            match expr {
                Expression::Member(member) => {
                    if member.optional {
                        start = Some(expr);
                    }
                    expr = member.object;
                }
                Expression::Call(call) => {
                    if call.optional {
                        start = Some(expr);
                    }
                    expr = call.callee;
                }
                _ => return start,
            }
        }
    }
}

// ============================================================================
// Operators
// ============================================================================

#[derive(Debug)]
pub struct UnaryExpression<'a> {
    pub range: TextRange,
    pub operator: UnaryOperator,
    pub operand: &'a Expression<'a>,
}

#[derive(Debug)]
pub struct AwaitExpression<'a> {
    pub range: TextRange,
    pub operand: &'a Expression<'a>,
}

#[derive(Debug)]
pub struct BinaryExpression<'a> {
    pub range: TextRange,
    pub operator: BinaryOperator,
    pub left: &'a Expression<'a>,
    pub right: &'a Expression<'a>,
}

/// `&&`, `||` and `??`. Kept apart from [`BinaryExpression`] because the
/// right operand is conditionally evaluated.
#[derive(Debug)]
pub struct LogicalExpression<'a> {
    pub range: TextRange,
    pub operator: LogicalOperator,
    pub left: &'a Expression<'a>,
    pub right: &'a Expression<'a>,
}

#[derive(Debug)]
pub struct ConditionalExpression<'a> {
    pub range: TextRange,
    pub test: &'a Expression<'a>,
    pub consequent: &'a Expression<'a>,
    pub alternate: &'a Expression<'a>,
}

#[derive(Debug)]
pub struct AssignmentExpression<'a> {
    pub range: TextRange,
    pub operator: AssignmentOperator,
    /// Always satisfies [`Expression::is_assignment_target`].
    pub target: &'a Expression<'a>,
    pub value: &'a Expression<'a>,
}

#[derive(Debug)]
pub struct SequenceExpression<'a> {
    pub range: TextRange,
    /// Two or more expressions; the value is the last one.
    pub expressions: NodeList<'a, Expression<'a>>,
}

// ============================================================================
// Arrow functions
// ============================================================================

#[derive(Debug)]
pub struct ArrowFunction<'a> {
    pub range: TextRange,
    pub is_async: bool,
    pub parameters: NodeList<'a, Parameter<'a>>,
    pub body: ArrowBody<'a>,
    /// `x => x` rather than `(x) => x`.
    pub shorthand: bool,
}

#[derive(Debug)]
pub struct Parameter<'a> {
    pub range: TextRange,
    pub name: Identifier<'a>,
    /// `...name`; only ever the last parameter.
    pub rest: bool,
}

#[derive(Debug)]
pub enum ArrowBody<'a> {
    Expression(&'a Expression<'a>),
    Block(BlockPlaceholder<'a>),
}

/// A `{ ... }` function body. Statements are outside this crate's grammar,
/// so the body is kept as its token lexemes joined by single spaces.
#[derive(Debug)]
pub struct BlockPlaceholder<'a> {
    pub range: TextRange,
    pub text: &'a str,
}
