//! quill: scan, parse and print expressions from the command line.
//!
//! Usage:
//!   quill scan  [FILE | -e EXPR] [--json] [--grammar FILE]
//!   quill parse [FILE | -e EXPR] [--json] [--grammar FILE]
//!   quill print [FILE | -e EXPR] [--compact] [--grammar FILE]
//!
//! Without FILE or `-e` the source is read from standard input.

use clap::{Args, Parser as ClapParser, Subcommand};
use log::debug;
use miette::{LabeledSpan, MietteDiagnostic, NamedSource, Report};
use quill_diagnostics::{ParseErrorKind, SyntaxError};
use quill_grammar::Grammar;
use quill_printer::{dump_expression, Printer, PrinterOptions};
use std::io::Read;
use std::process;

#[derive(ClapParser, Debug)]
#[command(name = "quill", version, about = "Scan, parse and print JavaScript-style expressions")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log parser activity (same as RUST_LOG=debug).
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the token sequence.
    Scan {
        #[command(flatten)]
        input: Input,
        /// Emit tokens as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Print the expression tree as an S-expression.
    Parse {
        #[command(flatten)]
        input: Input,
        /// Emit the tree summary as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Parse and print the expression back as source text.
    Print {
        #[command(flatten)]
        input: Input,
        /// Drop optional spaces.
        #[arg(long)]
        compact: bool,
    },
}

#[derive(Args, Debug)]
struct Input {
    /// Source file to read. `-` reads standard input.
    #[arg(value_name = "FILE", conflicts_with = "expr")]
    file: Option<String>,

    /// Expression given on the command line.
    #[arg(short = 'e', long = "expr", value_name = "EXPR")]
    expr: Option<String>,

    /// JSON file adjusting the standard grammar.
    #[arg(long, value_name = "FILE")]
    grammar: Option<String>,
}

/// Source text together with the name used in diagnostics.
struct Source {
    name: String,
    text: String,
}

fn main() {
    let cli = Cli::parse();
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    let exit_code = match &cli.command {
        Command::Scan { input, json } => run_scan(input, *json),
        Command::Parse { input, json } => run_parse(input, *json),
        Command::Print { input, compact } => run_print(input, *compact),
    };
    process::exit(exit_code);
}

fn run_scan(input: &Input, json: bool) -> i32 {
    let Some((source, grammar)) = load(input) else {
        return 1;
    };
    let tokens = match quill_scanner::scan(&source.text, &grammar) {
        Ok(tokens) => tokens,
        Err(err) => {
            report_syntax_error(&source, &err.into());
            return 2;
        }
    };

    if json {
        match serde_json::to_string_pretty(&tokens) {
            Ok(text) => println!("{}", text),
            Err(err) => {
                print_error(&format!("failed to serialize tokens: {}", err));
                return 1;
            }
        }
    } else {
        for token in &tokens {
            let marker = if token.preceded_by_line_terminator { "\u{21b5}" } else { "" };
            println!("{}\t{}\t{:?}{}", token.position, token.kind, token.lexeme, marker);
        }
    }
    0
}

fn run_parse(input: &Input, json: bool) -> i32 {
    let Some((source, grammar)) = load(input) else {
        return 1;
    };
    let arena = bumpalo::Bump::new();
    let expr = match quill_parser::parse_source(&arena, &source.text, &grammar) {
        Ok(expr) => expr,
        Err(err) => {
            report_syntax_error(&source, &err);
            return 2;
        }
    };

    let tree = dump_expression(expr);
    if json {
        let range = expr.range();
        let summary = serde_json::json!({
            "kind": expr.kind_name(),
            "range": [range.pos, range.end],
            "tree": tree,
        });
        println!("{}", summary);
    } else {
        println!("{}", tree);
    }
    0
}

fn run_print(input: &Input, compact: bool) -> i32 {
    let Some((source, grammar)) = load(input) else {
        return 1;
    };
    let arena = bumpalo::Bump::new();
    match quill_parser::parse_source(&arena, &source.text, &grammar) {
        Ok(expr) => {
            let mut printer = Printer::with_options(PrinterOptions { compact });
            println!("{}", printer.print(expr));
            0
        }
        Err(err) => {
            report_syntax_error(&source, &err);
            2
        }
    }
}

/// Read the source and the grammar, reporting failures.
fn load(input: &Input) -> Option<(Source, Grammar)> {
    let grammar = match &input.grammar {
        Some(path) => match Grammar::load(path) {
            Ok(grammar) => {
                debug!("loaded grammar from {}", path);
                grammar
            }
            Err(err) => {
                print_error(&format!("failed to load grammar '{}': {}", path, err));
                return None;
            }
        },
        None => Grammar::standard(),
    };

    let source = match (&input.expr, input.file.as_deref()) {
        (Some(expr), _) => Source {
            name: "<expr>".to_string(),
            text: expr.clone(),
        },
        (None, Some(path)) if path != "-" => match std::fs::read_to_string(path) {
            Ok(text) => Source {
                name: path.to_string(),
                text,
            },
            Err(err) => {
                print_error(&format!("failed to read '{}': {}", path, err));
                return None;
            }
        },
        (None, _) => {
            let mut text = String::new();
            if let Err(err) = std::io::stdin().read_to_string(&mut text) {
                print_error(&format!("failed to read standard input: {}", err));
                return None;
            }
            Source {
                name: "<stdin>".to_string(),
                text,
            }
        }
    };

    Some((source, grammar))
}

/// Render a scanning or parsing failure with the offending source span.
fn report_syntax_error(source: &Source, err: &SyntaxError) {
    let diagnostic = err.to_diagnostic();
    let position = err.position();

    let mut labels = vec![LabeledSpan::at_offset(position.offset as usize, "here")];
    if let SyntaxError::Parse(parse_error) = err {
        if let ParseErrorKind::UnmatchedDelimiter {
            open, open_position, ..
        } = &parse_error.kind
        {
            labels.push(LabeledSpan::at_offset(
                open_position.offset as usize,
                format!("`{}` opened here", open),
            ));
        }
    }

    let report = Report::new(
        MietteDiagnostic::new(diagnostic.message_text)
            .with_code(format!("QL{}", diagnostic.code))
            .with_labels(labels),
    )
    .with_source_code(NamedSource::new(source.name.clone(), source.text.clone()));
    eprintln!("{:?}", report);
}

fn print_error(msg: &str) {
    eprintln!("error: {}", msg);
}
