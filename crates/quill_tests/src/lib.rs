//! quill_tests: Helpers for the workspace conformance suite.
//!
//! The suite itself lives in `tests/conformance_tests.rs` at the workspace
//! root; this crate hosts it and provides the checks it runs.

use bumpalo::Bump;
use quill_diagnostics::SyntaxError;
use quill_grammar::Grammar;
use quill_parser::parse_source;
use quill_printer::{dump_expression, print_expression};

/// What happened to one source string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Parsed; holds the S-expression dump.
    Parsed(String),
    Failed(SyntaxError),
}

/// Scan and parse `source`.
pub fn parse_outcome(source: &str, grammar: &Grammar) -> Outcome {
    let arena = Bump::new();
    match parse_source(&arena, source, grammar) {
        Ok(expr) => Outcome::Parsed(dump_expression(expr)),
        Err(err) => Outcome::Failed(err),
    }
}

/// A source whose printed form does not parse back to the same tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundTripMismatch {
    pub printed: String,
    pub original: String,
    pub reparsed: Result<String, SyntaxError>,
}

/// Parse `source`, print it and parse the printed text again.
pub fn check_round_trip(source: &str, grammar: &Grammar) -> Result<(), RoundTripMismatch> {
    let arena = Bump::new();
    let Ok(first) = parse_source(&arena, source, grammar) else {
        // only valid input takes part in the round trip
        return Ok(());
    };
    let original = dump_expression(first);
    let printed = print_expression(first);
    let reparsed = parse_source(&arena, &printed, grammar).map(dump_expression);
    if reparsed.as_ref() == Ok(&original) {
        Ok(())
    } else {
        Err(RoundTripMismatch {
            printed,
            original,
            reparsed,
        })
    }
}
