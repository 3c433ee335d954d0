//! Parser integration tests.
//!
//! Trees are compared through a compact S-expression rendering so that
//! grouping is visible at a glance.

use bumpalo::Bump;
use quill_ast::node::*;
use quill_ast::ExpressionVisitor;
use quill_core::intern::SymbolInterner;
use quill_core::text::{SourcePosition, TextRange};
use quill_diagnostics::{ParseError, ParseErrorKind, SyntaxError};
use quill_grammar::Grammar;
use quill_parser::{parse_expression, parse_source, parse_source_with, parse_template};
use quill_scanner::scan;

fn sexp(expr: &Expression<'_>) -> String {
    match expr {
        Expression::Literal(lit) => lit.raw.to_string(),
        Expression::Identifier(id) => id.name.to_string(),
        Expression::This(_) => "this".to_string(),
        Expression::Array(array) => format!("[{}]", arguments(array.elements)),
        Expression::Object(object) => {
            let properties: Vec<String> = object
                .properties
                .iter()
                .map(|p| {
                    let key = match &p.key {
                        PropertyKey::Identifier(id) => id.name.to_string(),
                        PropertyKey::Literal(lit) => lit.raw.to_string(),
                        PropertyKey::Computed(e) => format!("[{}]", sexp(e)),
                    };
                    match p.value {
                        Some(value) => format!("{}: {}", key, sexp(value)),
                        None => key,
                    }
                })
                .collect();
            format!("{{{}}}", properties.join(", "))
        }
        Expression::Paren(paren) => format!("(paren {})", sexp(paren.expression)),
        Expression::Member(member) => {
            match &member.property {
                MemberProperty::Named(id) => {
                    let op = if member.optional { "?." } else { "." };
                    format!("({} {} {})", op, sexp(member.object), id.name)
                }
                MemberProperty::Computed(e) => {
                    let op = if member.optional { "?.[]" } else { "[]" };
                    format!("({} {} {})", op, sexp(member.object), sexp(e))
                }
            }
        }
        Expression::Call(call) => {
            let op = if call.optional { "?.call" } else { "call" };
            let mut out = format!("({} {}", op, sexp(call.callee));
            if !call.arguments.is_empty() {
                out.push(' ');
                out.push_str(&arguments(call.arguments));
            }
            out.push(')');
            out
        }
        Expression::New(new) => {
            let mut out = format!("(new {}", sexp(new.callee));
            if !new.arguments.is_empty() {
                out.push(' ');
                out.push_str(&arguments(new.arguments));
            }
            out.push(')');
            out
        }
        Expression::OptionalChain(chain) => format!("(chain {})", sexp(chain.expression)),
        Expression::Unary(unary) => format!("({} {})", unary.operator, sexp(unary.operand)),
        Expression::Await(a) => format!("(await {})", sexp(a.operand)),
        Expression::Binary(b) => format!("({} {} {})", b.operator, sexp(b.left), sexp(b.right)),
        Expression::Logical(l) => format!("({} {} {})", l.operator, sexp(l.left), sexp(l.right)),
        Expression::Conditional(c) => format!(
            "(? {} {} {})",
            sexp(c.test),
            sexp(c.consequent),
            sexp(c.alternate)
        ),
        Expression::Assignment(a) => format!("({} {} {})", a.operator, sexp(a.target), sexp(a.value)),
        Expression::Arrow(arrow) => {
            let params: Vec<String> = arrow
                .parameters
                .iter()
                .map(|p| {
                    if p.rest {
                        format!("...{}", p.name.name)
                    } else {
                        p.name.name.to_string()
                    }
                })
                .collect();
            let body = match &arrow.body {
                ArrowBody::Expression(e) => sexp(e),
                ArrowBody::Block(block) => block.text.to_string(),
            };
            let op = if arrow.is_async { "async=>" } else { "=>" };
            format!("({} ({}) {})", op, params.join(" "), body)
        }
        Expression::Sequence(seq) => {
            let parts: Vec<String> = seq.expressions.iter().map(sexp).collect();
            format!("(, {})", parts.join(" "))
        }
    }
}

fn arguments(args: &[Argument<'_>]) -> String {
    args.iter()
        .map(|a| {
            if a.spread {
                format!("...{}", sexp(a.expression))
            } else {
                sexp(a.expression)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Helper: parse `source` with the standard grammar and render the tree.
fn parse(source: &str) -> String {
    let arena = Bump::new();
    let grammar = Grammar::standard();
    match parse_source(&arena, source, &grammar) {
        Ok(expr) => sexp(expr),
        Err(err) => panic!("failed to parse {:?}: {}", source, err),
    }
}

fn parse_error(source: &str) -> ParseError {
    let arena = Bump::new();
    let grammar = Grammar::standard();
    match parse_source(&arena, source, &grammar) {
        Ok(expr) => panic!("{:?} parsed as {}", source, sexp(expr)),
        Err(SyntaxError::Parse(err)) => err,
        Err(SyntaxError::Lex(err)) => panic!("{:?} failed to scan: {}", source, err),
    }
}

fn assert_parses(source: &str, expected: &str) {
    assert_eq!(parse(source), expected, "source: {}", source);
}

// ============================================================================
// Precedence and associativity
// ============================================================================

#[test]
fn test_multiplication_binds_tighter() {
    assert_parses("2 + 3 * 4", "(+ 2 (* 3 4))");
    assert_parses("2 * 3 + 4", "(+ (* 2 3) 4)");
}

#[test]
fn test_left_associative() {
    assert_parses("1 - 2 - 3", "(- (- 1 2) 3)");
    assert_parses("a / b * c", "(* (/ a b) c)");
}

#[test]
fn test_exponent_is_right_associative() {
    assert_parses("2 ** 3 ** 2", "(** 2 (** 3 2))");
}

#[test]
fn test_logical_levels() {
    assert_parses("a || b && c", "(|| a (&& b c))");
    assert_parses("a ?? b || c", "(?? a (|| b c))");
    assert_parses("a | b ^ c & d", "(| a (^ b (& c d)))");
}

#[test]
fn test_comparison_levels() {
    assert_parses("a < b == c > d", "(== (< a b) (> c d))");
    assert_parses("a in b instanceof C", "(instanceof (in a b) C)");
    assert_parses("a << 1 < b >>> 2", "(< (<< a 1) (>>> b 2))");
}

#[test]
fn test_unary_operators() {
    assert_parses("!a && b", "(&& (! a) b)");
    assert_parses("typeof x === 'string'", "(=== (typeof x) 'string')");
    assert_parses("- -x", "(- (- x))");
    assert_parses("void 0", "(void 0)");
    assert_parses("delete a.b", "(delete (. a b))");
    assert_parses("~a * 2", "(* (~ a) 2)");
}

#[test]
fn test_await() {
    assert_parses("await fetch(url)", "(await (call fetch url))");
    assert_parses("await a + b", "(+ (await a) b)");
}

#[test]
fn test_parentheses_override_precedence() {
    assert_parses("(2 + 3) * 4", "(* (paren (+ 2 3)) 4)");
}

#[test]
fn test_conditional() {
    assert_parses("a ? b : c", "(? a b c)");
    assert_parses("a ? b : c ? d : e", "(? a b (? c d e))");
    assert_parses("a || b ? c = 1 : d", "(? (|| a b) (= c 1) d)");
}

#[test]
fn test_assignment() {
    assert_parses("a = b = c", "(= a (= b c))");
    assert_parses("x += 1", "(+= x 1)");
    assert_parses("a.b[c] ??= d", "(??= ([] (. a b) c) d)");
    assert_parses("(a) = 1", "(= (paren a) 1)");
}

#[test]
fn test_sequence() {
    assert_parses("a, b, c", "(, a b c)");
    assert_parses("(a = 1, b)", "(paren (, (= a 1) b))");
}

// ============================================================================
// Member access, calls and `new`
// ============================================================================

#[test]
fn test_member_and_calls() {
    assert_parses("a.b.c", "(. (. a b) c)");
    assert_parses("a[0][1]", "([] ([] a 0) 1)");
    assert_parses("f(1, ...args)(2)", "(call (call f 1 ...args) 2)");
    assert_parses("f()", "(call f)");
    assert_parses("f(a,)", "(call f a)");
    assert_parses("obj.method(x).prop", "(. (call (. obj method) x) prop)");
}

#[test]
fn test_reserved_words_as_property_names() {
    assert_parses("a.if.class", "(. (. a if) class)");
    assert_parses("a.null", "(. a null)");
}

#[test]
fn test_new() {
    assert_parses("new Foo", "(new Foo)");
    assert_parses("new Foo(1, 2)", "(new Foo 1 2)");
    assert_parses("new a.b.C()", "(new (. (. a b) C))");
    assert_parses("new Foo(1).bar", "(. (new Foo 1) bar)");
    assert_parses("new new X()()", "(new (new X))");
}

#[test]
fn test_optional_chain() {
    assert_parses("user?.address?.city", "(chain (?. (?. user address) city))");
    assert_parses("a?.b.c", "(chain (. (?. a b) c))");
    assert_parses("a?.[0]", "(chain (?.[] a 0))");
    assert_parses("f?.(x)", "(chain (?.call f x))");
    assert_parses("a?.b ?? c", "(?? (chain (?. a b)) c)");
}

#[test]
fn test_optional_chain_start() {
    let arena = Bump::new();
    let grammar = Grammar::standard();
    let expr = parse_source(&arena, "user?.address?.city", &grammar).unwrap();
    let Expression::OptionalChain(chain) = expr else {
        panic!("expected optional chain, got {}", expr.kind_name());
    };
    let start = chain.chain_start().unwrap();
    assert_eq!(sexp(start), "(?. user address)");
    assert_eq!(start.range(), TextRange::new(0, 13));
}

// ============================================================================
// Literals
// ============================================================================

#[test]
fn test_array_and_object_literals() {
    assert_parses("[1, 'two', ...rest]", "[1 'two' ...rest]");
    assert_parses("[]", "[]");
    assert_parses("[a,]", "[a]");
    assert_parses(
        "{a: 1, b, 'c': 2, [d]: 3, if: 4, 5: e,}",
        "{a: 1, b, 'c': 2, [d]: 3, if: 4, 5: e}",
    );
    assert_parses("{}", "{}");
}

#[test]
fn test_literal_values() {
    let arena = Bump::new();
    let grammar = Grammar::standard();
    let expr = parse_source(&arena, "[0x1F, 'a\\nb', `t${x}`, true, null, undefined, this]", &grammar)
        .unwrap();
    let Expression::Array(array) = expr else {
        panic!("expected array");
    };
    let values: Vec<Option<LiteralValue<'_>>> = array
        .elements
        .iter()
        .map(|e| match e.expression {
            Expression::Literal(lit) => Some(lit.value),
            _ => None,
        })
        .collect();
    assert_eq!(
        values,
        vec![
            Some(LiteralValue::Number(31.0)),
            Some(LiteralValue::String("a\nb")),
            Some(LiteralValue::Template("t${x}")),
            Some(LiteralValue::Boolean(true)),
            Some(LiteralValue::Null),
            Some(LiteralValue::Undefined),
            None,
        ]
    );
}

// ============================================================================
// Arrow functions
// ============================================================================

#[test]
fn test_arrow_functions() {
    assert_parses("x => x * 2", "(=> (x) (* x 2))");
    assert_parses("(a, b) => a + b", "(=> (a b) (+ a b))");
    assert_parses("() => 42", "(=> () 42)");
    assert_parses("(a,) => a", "(=> (a) a)");
    assert_parses("(...rest) => rest", "(=> (...rest) rest)");
    assert_parses("(a, ...rest) => rest", "(=> (a ...rest) rest)");
    assert_parses("a => b => c", "(=> (a) (=> (b) c))");
    assert_parses("f(x => x, y)", "(call f (=> (x) x) y)");
}

#[test]
fn test_async_arrows() {
    assert_parses("async x => await x", "(async=> (x) (await x))");
    assert_parses("async (a, b) => a", "(async=> (a b) a)");
    assert_parses("async(x)", "(call async x)");
    assert_parses("async => 1", "(=> (async) 1)");
}

#[test]
fn test_arrow_shapes() {
    let arena = Bump::new();
    let grammar = Grammar::standard();
    let expr = parse_source(&arena, "x => x", &grammar).unwrap();
    let Expression::Arrow(arrow) = expr else {
        panic!("expected arrow");
    };
    assert!(arrow.shorthand);
    assert!(!arrow.is_async);

    let expr = parse_source(&arena, "(x) => x", &grammar).unwrap();
    let Expression::Arrow(arrow) = expr else {
        panic!("expected arrow");
    };
    assert!(!arrow.shorthand);
    assert_eq!(arrow.range, TextRange::new(0, 8));
}

#[test]
fn test_arrow_block_body() {
    assert_parses("(x) => { return x; }", "(=> (x) { return x ; })");
    assert_parses("() => {}", "(=> () { })");
    assert_parses("x => { if (x) { y(); } }", "(=> (x) { if ( x ) { y ( ) ; } })");
}

#[test]
fn test_parenthesized_expression_is_not_an_arrow() {
    assert_parses("(a, b)", "(paren (, a b))");
    assert_parses("(a)(b)", "(call (paren a) b)");
    assert_parses("(a + b) * c", "(* (paren (+ a b)) c)");
}

#[test]
fn test_arrow_needs_same_line() {
    let err = parse_error("(a)\n=> a");
    assert_eq!(err.kind, ParseErrorKind::UnexpectedToken { found: "=>".to_string() });
    assert_eq!(err.expected, "end of input");
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_invalid_assignment_target() {
    let err = parse_error("5 = 3");
    assert_eq!(err.kind, ParseErrorKind::InvalidAssignmentTarget);
    assert_eq!(err.position, SourcePosition::new(1, 1, 0));

    let err = parse_error("x + 1 = 2");
    assert_eq!(err.kind, ParseErrorKind::InvalidAssignmentTarget);

    let err = parse_error("a?.b = 1");
    assert_eq!(err.kind, ParseErrorKind::InvalidAssignmentTarget);
}

#[test]
fn test_parenthesized_assignment_target() {
    assert_parses("((a.b)) = 1", "(= (paren (paren (. a b))) 1)");
    assert_eq!(parse_error("((a?.b)) = 1").kind, ParseErrorKind::InvalidAssignmentTarget);
    assert_eq!(parse_error("(a + b) = 1").kind, ParseErrorKind::InvalidAssignmentTarget);
}

#[test]
fn test_missing_operand() {
    let err = parse_error("a + ");
    assert_eq!(err.kind, ParseErrorKind::MissingOperand);
    assert_eq!(err.position, SourcePosition::new(1, 5, 4));

    assert_eq!(parse_error("").kind, ParseErrorKind::MissingOperand);
    assert_eq!(parse_error("a * / b").kind, ParseErrorKind::MissingOperand);
    assert_eq!(parse_error("()").kind, ParseErrorKind::MissingOperand);
    assert_eq!(parse_error("f(,)").kind, ParseErrorKind::MissingOperand);
}

#[test]
fn test_unmatched_delimiters() {
    let err = parse_error("(1 + 2");
    assert_eq!(
        err.kind,
        ParseErrorKind::UnmatchedDelimiter {
            open: "(",
            close: ")",
            open_position: SourcePosition::new(1, 1, 0),
        }
    );
    assert_eq!(err.position, SourcePosition::new(1, 7, 6));

    let err = parse_error("x + [1, 2");
    assert!(matches!(
        err.kind,
        ParseErrorKind::UnmatchedDelimiter { open: "[", open_position, .. }
            if open_position == SourcePosition::new(1, 5, 4)
    ));

    assert!(matches!(
        parse_error("f(a").kind,
        ParseErrorKind::UnmatchedDelimiter { close: ")", .. }
    ));
    assert!(matches!(
        parse_error("{a: 1").kind,
        ParseErrorKind::UnmatchedDelimiter { close: "}", .. }
    ));
    assert!(matches!(
        parse_error("x => { y").kind,
        ParseErrorKind::UnmatchedDelimiter { close: "}", .. }
    ));
}

#[test]
fn test_unexpected_token() {
    let err = parse_error("f(a b)");
    assert_eq!(err.kind, ParseErrorKind::UnexpectedToken { found: "b".to_string() });
    assert_eq!(err.expected, "',' or ')'");
    assert_eq!(err.position, SourcePosition::new(1, 5, 4));

    let err = parse_error("a b");
    assert_eq!(err.expected, "end of input");

    let err = parse_error("a ? b");
    assert_eq!(
        err.kind,
        ParseErrorKind::UnexpectedToken { found: "end of input".to_string() }
    );
    assert_eq!(err.expected, "':'");

    let err = parse_error("[1, , 2]");
    assert_eq!(err.expected, "array element");

    let err = parse_error("{1}");
    assert_eq!(err.expected, "':'");

    let err = parse_error("if");
    assert_eq!(err.kind, ParseErrorKind::UnexpectedToken { found: "if".to_string() });
}

#[test]
fn test_spread_errors() {
    let err = parse_error("...a");
    assert_eq!(err.kind, ParseErrorKind::UnexpectedSpread);

    let err = parse_error("{...a}");
    assert_eq!(err.kind, ParseErrorKind::UnexpectedSpread);
    assert_eq!(err.position, SourcePosition::new(1, 2, 1));

    assert_eq!(parse_error("a + ...b").kind, ParseErrorKind::UnexpectedSpread);
}

#[test]
fn test_rest_parameter_must_be_last() {
    let err = parse_error("(...a, b) => a");
    assert_eq!(err.kind, ParseErrorKind::RestParameterMustBeLast);
    assert_eq!(err.position, SourcePosition::new(1, 2, 1));

    let err = parse_error("(...a,) => a");
    assert_eq!(err.kind, ParseErrorKind::RestParameterMustBeLast);
}

#[test]
fn test_trailing_comma() {
    let err = parse_error("a, ");
    assert_eq!(err.kind, ParseErrorKind::TrailingComma);
    assert_eq!(err.position, SourcePosition::new(1, 2, 1));

    assert_eq!(parse_error("(a, )").kind, ParseErrorKind::TrailingComma);
}

/// `levels` copies of `open` and `close` around `leaf`.
fn nest(open: &str, leaf: &str, close: &str, levels: usize) -> String {
    format!("{}{}{}", open.repeat(levels), leaf, close.repeat(levels))
}

/// Run `f` on a thread with the default 2 MiB stack of spawned threads.
fn on_default_stack<R: Send + 'static>(f: impl FnOnce() -> R + Send + 'static) -> R {
    std::thread::Builder::new()
        .stack_size(2 * 1024 * 1024)
        .spawn(f)
        .unwrap()
        .join()
        .unwrap()
}

#[test]
fn test_nesting_too_deep() {
    let source = format!("{}x", "!".repeat(1000));
    let err = parse_error(&source);
    assert_eq!(err.kind, ParseErrorKind::NestingTooDeep { limit: 200 });

    let nested = nest("(", "x", ")", 40);
    assert!(parse(&nested).starts_with("(paren (paren"));
}

#[test]
fn test_bracket_nesting_limit_fits_default_stack() {
    on_default_stack(|| {
        let grammar = Grammar::standard();
        let shapes = [("(", ")"), ("[", "]"), ("{a: ", "}"), ("f(", ")"), ("a[", "]")];
        for (open, close) in shapes {
            let arena = Bump::new();
            let deepest = nest(open, "x", close, 99);
            let expr = parse_source(&arena, &deepest, &grammar)
                .unwrap_or_else(|err| panic!("{}...: {}", open, err));
            assert_eq!(expr.depth(), 100, "{}", open);

            let err = parse_source(&arena, &nest(open, "x", close, 100), &grammar).unwrap_err();
            assert!(
                matches!(
                    err,
                    SyntaxError::Parse(ParseError {
                        kind: ParseErrorKind::NestingTooDeep { limit: 200 },
                        ..
                    })
                ),
                "{}...: {}",
                open,
                err
            );
        }
    });
}

#[test]
fn test_long_chains_are_bounded() {
    let arena = Bump::new();
    let grammar = Grammar::standard();

    let sum = vec!["a"; 500].join(" + ");
    assert_eq!(parse_source(&arena, &sum, &grammar).unwrap().depth(), 500);
    let members = format!("a{}", ".b".repeat(499));
    assert_eq!(parse_source(&arena, &members, &grammar).unwrap().depth(), 500);

    let too_long = [
        vec!["a"; 50_000].join(" + "),
        vec!["a"; 501].join(" && "),
        format!("a{}", ".b".repeat(500)),
        format!("f{}", "()".repeat(600)),
        format!("x = {}", vec!["a"; 600].join(" - ")),
    ];
    for source in &too_long {
        let err = parse_source(&arena, source, &grammar).unwrap_err();
        assert_eq!(
            err,
            SyntaxError::Parse(ParseError::new(
                ParseErrorKind::NestingTooDeep { limit: 500 },
                SourcePosition::new(1, 1, 0),
                "a shallower expression",
            )),
            "{}...",
            &source[..10]
        );
    }
}

#[test]
fn test_expression_depth() {
    let arena = Bump::new();
    let grammar = Grammar::standard();
    let depth = |source: &str| parse_source(&arena, source, &grammar).unwrap().depth();
    assert_eq!(depth("x"), 1);
    assert_eq!(depth("a + b * c"), 3);
    assert_eq!(depth("f(a, [b, {k: c + d}])"), 5);
    assert_eq!(depth("o[k].m?.(n)"), 5);
    assert_eq!(depth("(a) => { deep }"), 1);
}

#[test]
fn test_lex_errors_pass_through() {
    let arena = Bump::new();
    let grammar = Grammar::standard();
    let err = parse_source(&arena, "a + 'abc", &grammar).unwrap_err();
    assert!(matches!(err, SyntaxError::Lex(_)));
    assert_eq!(err.position(), SourcePosition::new(1, 5, 4));
}

// ============================================================================
// Entry points
// ============================================================================

#[test]
fn test_parse_expression_returns_remaining_tokens() {
    let arena = Bump::new();
    let grammar = Grammar::standard();
    let tokens = scan("a + b; c", &grammar).unwrap();
    let (expr, rest) = parse_expression(&arena, &tokens, &grammar).unwrap();
    assert_eq!(sexp(expr), "(+ a b)");
    let lexemes: Vec<&str> = rest.iter().map(|t| t.lexeme.as_str()).collect();
    assert_eq!(lexemes, vec![";", "c", ""]);
}

#[test]
fn test_node_ranges() {
    let arena = Bump::new();
    let grammar = Grammar::standard();
    let expr = parse_source(&arena, "  foo.bar(1) + 2", &grammar).unwrap();
    assert_eq!(expr.range(), TextRange::new(2, 16));
    let Expression::Binary(binary) = expr else {
        panic!("expected binary");
    };
    assert_eq!(binary.left.range(), TextRange::new(2, 12));
    assert_eq!(binary.right.range(), TextRange::new(15, 16));
}

#[test]
fn test_shared_interner() {
    let arena = Bump::new();
    let grammar = Grammar::standard();
    let interner = SymbolInterner::new();
    let first = parse_source_with(&arena, "value", &grammar, &interner).unwrap();
    let second = parse_source_with(&arena, "\\u0076alue + 1", &grammar, &interner).unwrap();
    let (Expression::Identifier(a), Expression::Binary(b)) = (first, second) else {
        panic!("unexpected shapes");
    };
    let Expression::Identifier(c) = b.left else {
        panic!("expected identifier");
    };
    assert_eq!(a.symbol, c.symbol);
    assert_eq!(c.name, "value");
    assert_eq!(interner.resolve(a.symbol), "value");
}

// ============================================================================
// Template substitutions
// ============================================================================

#[test]
fn test_parse_template_substitutions() {
    let arena = Bump::new();
    let grammar = Grammar::standard();
    let tokens = scan("`a${x + 1}b${y.z}`", &grammar).unwrap();
    let template = parse_template(&arena, &tokens[0], &grammar).unwrap();
    assert_eq!(template.segments, &["a", "b", ""]);
    let parts: Vec<String> = template.expressions.iter().map(|e| sexp(e)).collect();
    assert_eq!(parts, vec!["(+ x 1)", "(. y z)"]);
    // substitution nodes carry absolute offsets
    assert_eq!(template.expressions[0].range(), TextRange::new(3, 8));
}

#[test]
fn test_template_substitution_error_position() {
    let arena = Bump::new();
    let grammar = Grammar::standard();
    let tokens = scan("`abc ${1 +}`", &grammar).unwrap();
    let err = parse_template(&arena, &tokens[0], &grammar).unwrap_err();
    let SyntaxError::Parse(err) = err else {
        panic!("expected parse error");
    };
    assert_eq!(err.kind, ParseErrorKind::MissingOperand);
    assert_eq!(err.position, SourcePosition::new(1, 11, 10));
}

#[test]
fn test_parse_template_rejects_other_tokens() {
    let arena = Bump::new();
    let grammar = Grammar::standard();
    let tokens = scan("'plain'", &grammar).unwrap();
    assert!(parse_template(&arena, &tokens[0], &grammar).is_err());
}

// ============================================================================
// Grammar variants
// ============================================================================

#[test]
fn test_precedence_from_grammar() {
    let arena = Bump::new();
    let grammar = Grammar::from_json_str(
        r#"{ "precedence": { "set": { "**": { "level": "additive" } } } }"#,
    )
    .unwrap();
    let expr = parse_source(&arena, "2 ** 3 ** 2 * 4", &grammar).unwrap();
    assert_eq!(sexp(expr), "(** (** 2 3) (* 2 4))");
}

#[test]
fn test_removed_operator_is_not_infix() {
    let arena = Bump::new();
    let grammar = Grammar::from_json_str(r#"{ "precedence": { "remove": ["in"] } }"#).unwrap();
    let err = parse_source(&arena, "a in b", &grammar).unwrap_err();
    assert!(matches!(
        err,
        SyntaxError::Parse(ParseError { kind: ParseErrorKind::UnexpectedToken { .. }, .. })
    ));
}

#[test]
fn test_keyword_alias_in_expressions() {
    let arena = Bump::new();
    let grammar = Grammar::from_json_str(r#"{ "keywords": { "add": { "kind": "typeof" } } }"#).unwrap();
    let expr = parse_source(&arena, "kind x", &grammar).unwrap();
    assert_eq!(sexp(expr), "(typeof x)");
}

// ============================================================================
// Visitor
// ============================================================================

#[derive(Default)]
struct NameCollector {
    identifiers: Vec<String>,
    literals: usize,
    blocks: usize,
}

impl<'a> ExpressionVisitor<'a> for NameCollector {
    fn visit_identifier(&mut self, node: &'a Identifier<'a>) {
        self.identifiers.push(node.name.to_string());
    }

    fn visit_literal(&mut self, _node: &'a Literal<'a>) {
        self.literals += 1;
    }

    fn visit_block_placeholder(&mut self, _node: &'a BlockPlaceholder<'a>) {
        self.blocks += 1;
    }
}

#[test]
fn test_visitor_walks_in_source_order() {
    let arena = Bump::new();
    let grammar = Grammar::standard();
    let expr = parse_source(
        &arena,
        "a.b(c, ...d) ? {e, f: 1, [g]: h} : (i, j) => [k, 2]",
        &grammar,
    )
    .unwrap();
    let mut collector = NameCollector::default();
    collector.visit_expression(expr);
    assert_eq!(
        collector.identifiers,
        ["a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k"]
    );
    assert_eq!(collector.literals, 2);
    assert_eq!(collector.blocks, 0);
}

#[test]
fn test_visitor_walks_deepest_tree_on_default_stack() {
    let identifiers = on_default_stack(|| {
        let arena = Bump::new();
        let grammar = Grammar::standard();
        let sum = vec!["a"; 500].join(" + ");
        let expr = parse_source(&arena, &sum, &grammar).unwrap();
        let mut collector = NameCollector::default();
        collector.visit_expression(expr);
        collector.identifiers.len()
    });
    assert_eq!(identifiers, 500);
}

#[test]
fn test_visitor_sees_block_bodies() {
    let arena = Bump::new();
    let grammar = Grammar::standard();
    let expr = parse_source(&arena, "f(() => { x }, y => y)", &grammar).unwrap();
    let mut collector = NameCollector::default();
    collector.visit_expression(expr);
    assert_eq!(collector.identifiers, ["f", "y", "y"]);
    assert_eq!(collector.blocks, 1);
}
