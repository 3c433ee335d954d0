//! quill_printer: Expression tree to text.
//!
//! [`Printer`] writes a tree back out as source text. Trees built by the
//! parser keep their grouping parentheses as explicit nodes, so the printer
//! never adds parentheses of its own: printing and re-parsing yields the
//! same tree. [`dump_expression`] renders the tree shape as an S-expression.

mod dump;

pub use dump::dump_expression;

use quill_ast::node::*;
use quill_ast::syntax_kind::{BinaryOperator, UnaryOperator};

/// Options for the printer.
#[derive(Debug, Clone, Default)]
pub struct PrinterOptions {
    /// Drop the spaces around symbolic operators and after commas.
    pub compact: bool,
}

/// The printer converts expression trees to text.
#[derive(Debug, Default)]
pub struct Printer {
    output: String,
    options: PrinterOptions,
}

/// Print `expr` with the default options.
pub fn print_expression(expr: &Expression<'_>) -> String {
    Printer::new().print(expr)
}

impl Printer {
    pub fn new() -> Self {
        Self::with_options(PrinterOptions::default())
    }

    pub fn with_options(options: PrinterOptions) -> Self {
        Self {
            output: String::with_capacity(256),
            options,
        }
    }

    /// Print an expression to a string.
    pub fn print(&mut self, expr: &Expression<'_>) -> String {
        self.output.clear();
        self.print_expression(expr);
        std::mem::take(&mut self.output)
    }

    // ========================================================================
    // Expression printing
    // ========================================================================

    fn print_expression(&mut self, expr: &Expression<'_>) {
        match expr {
            Expression::Literal(n) => self.write(n.raw),
            Expression::Identifier(n) => self.write(n.name),
            Expression::This(_) => self.write("this"),
            Expression::Array(n) => {
                self.write("[");
                self.print_arguments(n.elements);
                self.write("]");
            }
            Expression::Object(n) => self.print_object_literal(n),
            Expression::Paren(n) => {
                self.write("(");
                self.print_expression(n.expression);
                self.write(")");
            }
            Expression::Member(n) => {
                self.print_expression(n.object);
                if needs_space_before_dot(n.object) && !n.optional {
                    // `1.x` would scan as the number `1.`
                    self.write(" ");
                }
                match &n.property {
                    MemberProperty::Named(name) => {
                        self.write(if n.optional { "?." } else { "." });
                        self.write(name.name);
                    }
                    MemberProperty::Computed(property) => {
                        if n.optional {
                            self.write("?.");
                        }
                        self.write("[");
                        self.print_expression(property);
                        self.write("]");
                    }
                }
            }
            Expression::Call(n) => {
                self.print_expression(n.callee);
                if n.optional {
                    self.write("?.");
                }
                self.write("(");
                self.print_arguments(n.arguments);
                self.write(")");
            }
            Expression::New(n) => {
                self.write("new ");
                self.print_expression(n.callee);
                self.write("(");
                self.print_arguments(n.arguments);
                self.write(")");
            }
            Expression::OptionalChain(n) => self.print_expression(n.expression),
            Expression::Unary(n) => {
                self.write(n.operator.text());
                if n.operator.is_keyword() || repeats_sign(n.operator, n.operand) {
                    self.write(" ");
                }
                self.print_expression(n.operand);
            }
            Expression::Await(n) => {
                self.write("await ");
                self.print_expression(n.operand);
            }
            Expression::Binary(n) => {
                self.print_expression(n.left);
                let spaced = !self.options.compact
                    || matches!(n.operator, BinaryOperator::In | BinaryOperator::InstanceOf)
                    || binary_sign_clash(n.operator, n.right);
                self.write_operator(n.operator.text(), spaced);
                self.print_expression(n.right);
            }
            Expression::Logical(n) => {
                self.print_expression(n.left);
                self.write_operator(n.operator.text(), !self.options.compact);
                self.print_expression(n.right);
            }
            Expression::Conditional(n) => {
                self.print_expression(n.test);
                self.write_operator("?", !self.options.compact);
                self.print_expression(n.consequent);
                self.write_operator(":", !self.options.compact);
                self.print_expression(n.alternate);
            }
            Expression::Assignment(n) => {
                self.print_expression(n.target);
                self.write_operator(n.operator.text(), !self.options.compact);
                self.print_expression(n.value);
            }
            Expression::Arrow(n) => self.print_arrow_function(n),
            Expression::Sequence(n) => {
                for (i, expr) in n.expressions.iter().enumerate() {
                    if i > 0 {
                        self.write_comma();
                    }
                    self.print_expression(expr);
                }
            }
        }
    }

    fn print_arguments(&mut self, arguments: &[Argument<'_>]) {
        for (i, argument) in arguments.iter().enumerate() {
            if i > 0 {
                self.write_comma();
            }
            if argument.spread {
                self.write("...");
            }
            self.print_expression(argument.expression);
        }
    }

    fn print_object_literal(&mut self, object: &ObjectLiteral<'_>) {
        self.write("{");
        for (i, property) in object.properties.iter().enumerate() {
            if i > 0 {
                self.write_comma();
            }
            match &property.key {
                PropertyKey::Identifier(name) => self.write(name.name),
                PropertyKey::Literal(literal) => self.write(literal.raw),
                PropertyKey::Computed(key) => {
                    self.write("[");
                    self.print_expression(key);
                    self.write("]");
                }
            }
            if let Some(value) = property.value {
                self.write(if self.options.compact { ":" } else { ": " });
                self.print_expression(value);
            }
        }
        self.write("}");
    }

    fn print_arrow_function(&mut self, arrow: &ArrowFunction<'_>) {
        if arrow.is_async {
            self.write("async ");
        }
        match arrow.parameters {
            [parameter] if arrow.shorthand && !parameter.rest => self.write(parameter.name.name),
            parameters => {
                self.write("(");
                for (i, parameter) in parameters.iter().enumerate() {
                    if i > 0 {
                        self.write_comma();
                    }
                    if parameter.rest {
                        self.write("...");
                    }
                    self.write(parameter.name.name);
                }
                self.write(")");
            }
        }
        self.write_operator("=>", !self.options.compact);
        match &arrow.body {
            ArrowBody::Expression(body) => self.print_expression(body),
            ArrowBody::Block(block) => self.write(block.text),
        }
    }

    // ========================================================================
    // Output helpers
    // ========================================================================

    fn write(&mut self, s: &str) {
        self.output.push_str(s);
    }

    fn write_operator(&mut self, operator: &str, spaced: bool) {
        if spaced {
            self.output.push(' ');
            self.output.push_str(operator);
            self.output.push(' ');
        } else {
            self.output.push_str(operator);
        }
    }

    fn write_comma(&mut self) {
        self.write(if self.options.compact { "," } else { ", " });
    }
}

/// A decimal integer literal followed directly by `.` would absorb the dot.
fn needs_space_before_dot(object: &Expression<'_>) -> bool {
    match object {
        Expression::Literal(literal) => {
            matches!(literal.value, LiteralValue::Number(_))
                && literal.raw.bytes().all(|b| b.is_ascii_digit() || b == b'_')
        }
        _ => false,
    }
}

/// `- -x` must not be printed as `--x`.
fn repeats_sign(operator: UnaryOperator, operand: &Expression<'_>) -> bool {
    matches!(operator, UnaryOperator::Plus | UnaryOperator::Minus)
        && matches!(operand, Expression::Unary(inner) if inner.operator == operator)
}

/// `a - -b` must keep its spaces even in compact output.
fn binary_sign_clash(operator: BinaryOperator, right: &Expression<'_>) -> bool {
    let sign = match operator {
        BinaryOperator::Add => UnaryOperator::Plus,
        BinaryOperator::Subtract => UnaryOperator::Minus,
        _ => return false,
    };
    matches!(right, Expression::Unary(inner) if inner.operator == sign)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_core::text::TextRange;

    fn number(raw: &str, value: f64) -> Literal<'_> {
        Literal {
            range: TextRange::new(0, raw.len() as u32),
            value: LiteralValue::Number(value),
            raw,
        }
    }

    #[test]
    fn test_write_operator() {
        let mut printer = Printer::new();
        printer.write("a");
        printer.write_operator("+", true);
        printer.write("b");
        printer.write_operator("*", false);
        printer.write("c");
        assert_eq!(printer.output, "a + b*c");
    }

    #[test]
    fn test_integer_literal_needs_space_before_dot() {
        assert!(needs_space_before_dot(&Expression::Literal(number("1_000", 1000.0))));
        assert!(!needs_space_before_dot(&Expression::Literal(number("1.5", 1.5))));
        assert!(!needs_space_before_dot(&Expression::Literal(number("0x1F", 31.0))));
        assert!(!needs_space_before_dot(&Expression::Literal(number("1e3", 1000.0))));
    }

    #[test]
    fn test_hand_built_tree_is_printed_as_is() {
        let one = Expression::Literal(number("1", 1.0));
        let two = Expression::Literal(number("2", 2.0));
        let sum = Expression::Binary(BinaryExpression {
            range: TextRange::new(0, 5),
            operator: BinaryOperator::Add,
            left: &one,
            right: &two,
        });
        let negated = Expression::Unary(UnaryExpression {
            range: TextRange::new(0, 6),
            operator: UnaryOperator::Minus,
            operand: &sum,
        });
        // no parentheses are invented for trees the parser did not build
        assert_eq!(print_expression(&negated), "-1 + 2");
    }
}
