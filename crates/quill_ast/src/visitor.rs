//! Read-only traversal of the expression tree.
//!
//! Implement [`ExpressionVisitor`] and override the hooks you need; the
//! default implementations walk into children in source order.

use crate::node::*;

pub trait ExpressionVisitor<'a> {
    fn visit_expression(&mut self, expr: &'a Expression<'a>) {
        walk_expression(self, expr);
    }

    fn visit_identifier(&mut self, _node: &'a Identifier<'a>) {}

    fn visit_literal(&mut self, _node: &'a Literal<'a>) {}

    fn visit_argument(&mut self, node: &'a Argument<'a>) {
        self.visit_expression(node.expression);
    }

    fn visit_property(&mut self, node: &'a Property<'a>) {
        match &node.key {
            PropertyKey::Identifier(id) => self.visit_identifier(id),
            PropertyKey::Literal(lit) => self.visit_literal(lit),
            PropertyKey::Computed(expr) => self.visit_expression(expr),
        }
        if let Some(value) = node.value {
            self.visit_expression(value);
        }
    }

    fn visit_parameter(&mut self, node: &'a Parameter<'a>) {
        self.visit_identifier(&node.name);
    }

    fn visit_block_placeholder(&mut self, _node: &'a BlockPlaceholder<'a>) {}
}

/// Visit the direct children of `expr`.
pub fn walk_expression<'a, V: ExpressionVisitor<'a> + ?Sized>(visitor: &mut V, expr: &'a Expression<'a>) {
    match expr {
        Expression::Literal(n) => visitor.visit_literal(n),
        Expression::Identifier(n) => visitor.visit_identifier(n),
        Expression::This(_) => {}
        Expression::Array(n) => {
            for element in n.elements.iter() {
                visitor.visit_argument(element);
            }
        }
        Expression::Object(n) => {
            for property in n.properties.iter() {
                visitor.visit_property(property);
            }
        }
        Expression::Paren(n) => visitor.visit_expression(n.expression),
        Expression::Member(n) => {
            visitor.visit_expression(n.object);
            match &n.property {
                MemberProperty::Named(id) => visitor.visit_identifier(id),
                MemberProperty::Computed(expr) => visitor.visit_expression(expr),
            }
        }
        Expression::Call(n) => {
            visitor.visit_expression(n.callee);
            for arg in n.arguments.iter() {
                visitor.visit_argument(arg);
            }
        }
        Expression::New(n) => {
            visitor.visit_expression(n.callee);
            for arg in n.arguments.iter() {
                visitor.visit_argument(arg);
            }
        }
        Expression::OptionalChain(n) => visitor.visit_expression(n.expression),
        Expression::Unary(n) => visitor.visit_expression(n.operand),
        Expression::Await(n) => visitor.visit_expression(n.operand),
        Expression::Binary(n) => {
            visitor.visit_expression(n.left);
            visitor.visit_expression(n.right);
        }
        Expression::Logical(n) => {
            visitor.visit_expression(n.left);
            visitor.visit_expression(n.right);
        }
        Expression::Conditional(n) => {
            visitor.visit_expression(n.test);
            visitor.visit_expression(n.consequent);
            visitor.visit_expression(n.alternate);
        }
        Expression::Assignment(n) => {
            visitor.visit_expression(n.target);
            visitor.visit_expression(n.value);
        }
        Expression::Arrow(n) => {
            for param in n.parameters.iter() {
                visitor.visit_parameter(param);
            }
            match &n.body {
                ArrowBody::Expression(body) => visitor.visit_expression(body),
                ArrowBody::Block(block) => visitor.visit_block_placeholder(block),
            }
        }
        Expression::Sequence(n) => {
            for expr in n.expressions.iter() {
                visitor.visit_expression(expr);
            }
        }
    }
}
