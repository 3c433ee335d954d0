//! S-expression rendering of the tree shape.
//!
//! Every operator node is written as `(op child...)`, so grouping decided
//! by precedence is visible: `2 + 3 * 4` dumps as `(+ 2 (* 3 4))`.
//! Grouping parentheses from the source appear as `(paren ...)`.

use quill_ast::node::*;

/// Render `expr` as an S-expression.
pub fn dump_expression(expr: &Expression<'_>) -> String {
    let mut out = String::new();
    dump(expr, &mut out);
    out
}

fn dump(expr: &Expression<'_>, out: &mut String) {
    match expr {
        Expression::Literal(n) => out.push_str(n.raw),
        Expression::Identifier(n) => out.push_str(n.name),
        Expression::This(_) => out.push_str("this"),
        Expression::Array(n) => {
            out.push('[');
            dump_arguments(n.elements, out);
            out.push(']');
        }
        Expression::Object(n) => {
            out.push('{');
            for (i, property) in n.properties.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                match &property.key {
                    PropertyKey::Identifier(name) => out.push_str(name.name),
                    PropertyKey::Literal(literal) => out.push_str(literal.raw),
                    PropertyKey::Computed(key) => {
                        out.push('[');
                        dump(key, out);
                        out.push(']');
                    }
                }
                if let Some(value) = property.value {
                    out.push_str(": ");
                    dump(value, out);
                }
            }
            out.push('}');
        }
        Expression::Paren(n) => node(out, "paren", &[n.expression]),
        Expression::Member(n) => match &n.property {
            MemberProperty::Named(name) => {
                out.push_str(if n.optional { "(?. " } else { "(. " });
                dump(n.object, out);
                out.push(' ');
                out.push_str(name.name);
                out.push(')');
            }
            MemberProperty::Computed(property) => {
                let op = if n.optional { "?.[]" } else { "[]" };
                node(out, op, &[n.object, *property]);
            }
        },
        Expression::Call(n) => {
            out.push_str(if n.optional { "(?.call " } else { "(call " });
            dump(n.callee, out);
            if !n.arguments.is_empty() {
                out.push(' ');
                dump_arguments(n.arguments, out);
            }
            out.push(')');
        }
        Expression::New(n) => {
            out.push_str("(new ");
            dump(n.callee, out);
            if !n.arguments.is_empty() {
                out.push(' ');
                dump_arguments(n.arguments, out);
            }
            out.push(')');
        }
        Expression::OptionalChain(n) => node(out, "chain", &[n.expression]),
        Expression::Unary(n) => node(out, n.operator.text(), &[n.operand]),
        Expression::Await(n) => node(out, "await", &[n.operand]),
        Expression::Binary(n) => node(out, n.operator.text(), &[n.left, n.right]),
        Expression::Logical(n) => node(out, n.operator.text(), &[n.left, n.right]),
        Expression::Conditional(n) => node(out, "?", &[n.test, n.consequent, n.alternate]),
        Expression::Assignment(n) => node(out, n.operator.text(), &[n.target, n.value]),
        Expression::Arrow(n) => {
            out.push_str(if n.is_async { "(async=> (" } else { "(=> (" });
            for (i, parameter) in n.parameters.iter().enumerate() {
                if i > 0 {
                    out.push(' ');
                }
                if parameter.rest {
                    out.push_str("...");
                }
                out.push_str(parameter.name.name);
            }
            out.push_str(") ");
            match &n.body {
                ArrowBody::Expression(body) => dump(body, out),
                ArrowBody::Block(block) => out.push_str(block.text),
            }
            out.push(')');
        }
        Expression::Sequence(n) => {
            out.push_str("(,");
            for expr in n.expressions.iter() {
                out.push(' ');
                dump(expr, out);
            }
            out.push(')');
        }
    }
}

fn node(out: &mut String, head: &str, children: &[&Expression<'_>]) {
    out.push('(');
    out.push_str(head);
    for child in children {
        out.push(' ');
        dump(child, out);
    }
    out.push(')');
}

fn dump_arguments(arguments: &[Argument<'_>], out: &mut String) {
    for (i, argument) in arguments.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        if argument.spread {
            out.push_str("...");
        }
        dump(argument.expression, out);
    }
}
