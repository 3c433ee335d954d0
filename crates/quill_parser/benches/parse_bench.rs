use bumpalo::Bump;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use quill_grammar::Grammar;
use quill_parser::{parse_expression, parse_source};
use quill_scanner::scan;

// A long expression mixing every precedence level, calls, chains and arrows
const EXPRESSION_SOURCE: &str = r#"
users
    .filter(user => user?.profile?.age >= 18 && !user.banned)
    .map(async (user, index) => ({
        id: user.id,
        name: `${user.first} ${user.last}`,
        score: (user.points * 2 + index ** 2) / total - penalty % 7,
        tags: [...user.tags, 'active', typeof user.role === 'string' ? user.role : "guest"],
        [computed + key]: new Date(user.created).getTime() >>> 0,
        fallback: user.nickname ?? user.first ?? null,
    }))
    .reduce((acc, entry) => { acc.push(entry); return acc; }, [])
    .length > limit || (count = 0, flag |= 0x10, await settle(queue))
"#;

fn bench_parse_expression(c: &mut Criterion) {
    let grammar = Grammar::standard();
    c.bench_function("parse_expression_mixed", |b| {
        b.iter(|| {
            let arena = Bump::new();
            let expr = parse_source(&arena, black_box(EXPRESSION_SOURCE), &grammar);
            black_box(expr.is_ok());
        });
    });
}

fn bench_parse_tokens_only(c: &mut Criterion) {
    let grammar = Grammar::standard();
    let tokens = scan(EXPRESSION_SOURCE, &grammar).expect("benchmark source scans");
    c.bench_function("parse_pre_scanned_tokens", |b| {
        b.iter(|| {
            let arena = Bump::new();
            let parsed = parse_expression(&arena, black_box(&tokens), &grammar);
            black_box(parsed.is_ok());
        });
    });
}

fn bench_deep_binary_chain(c: &mut Criterion) {
    let grammar = Grammar::standard();
    let source = (0..400).map(|i| format!("x{}", i)).collect::<Vec<_>>().join(" + ");
    c.bench_function("parse_long_binary_chain", |b| {
        b.iter(|| {
            let arena = Bump::new();
            let expr = parse_source(&arena, black_box(&source), &grammar);
            black_box(expr.is_ok());
        });
    });
}

criterion_group!(benches, bench_parse_expression, bench_parse_tokens_only, bench_deep_binary_chain);
criterion_main!(benches);
