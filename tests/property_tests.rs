//! Property-based tests for the Oluś syntax frontend
//!
//! These tests use proptest to verify invariants across many randomly
//! generated inputs, catching edge cases that hand-written tests might miss.

use olus::lexer::{self, TokenKind};
use olus::{DiagnosticKind, ParseConfig, parse, parse_with_config};
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

/// Identifiers, operator symbols and numbers.
fn atom_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z][a-z0-9_]{0,5}",
        "[0-9]{1,4}",
        prop::sample::select(vec!["+", "-", "=", "≤", "→", "*"]).prop_map(String::from),
    ]
}

/// Possibly nested strings. Content may hold anything but quotes.
fn string_strategy() -> impl Strategy<Value = String> {
    let leaf = "[a-z :()]{0,6}".prop_map(|text| format!("“{}”", text));
    leaf.prop_recursive(3, 8, 2, |inner| {
        ("[a-z ]{0,3}", inner, "[a-z ]{0,3}").prop_map(|(before, nested, after)| format!("“{}{}{}”", before, nested, after))
    })
}

/// Expressions: atoms, strings and groups holding calls or procedures.
fn expression_strategy() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![4 => atom_strategy(), 1 => string_strategy()];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 1..4).prop_map(|items| format!("({})", items.join(" "))),
            (prop::collection::vec(inner.clone(), 0..3), prop::collection::vec(inner, 0..3))
                .prop_map(|(head, body)| format!("({}: {})", head.join(" "), body.join(" "))),
        ]
    })
}

/// One statement: a call, or a procedure with an optional inline call.
fn statement_strategy() -> impl Strategy<Value = String> {
    (
        prop::collection::vec(expression_strategy(), 1..5),
        prop::option::of(prop::collection::vec(expression_strategy(), 0..4)),
    )
        .prop_map(|(head, body)| match body {
            None => format!("{}\n", head.join(" ")),
            Some(body) => format!("{}: {}\n", head.join(" "), body.join(" ")),
        })
}

fn program_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(statement_strategy(), 0..6).prop_map(|statements| statements.concat())
}

/// Lines of plain words and colons at random indentation.
fn indented_lines_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec((0usize..12, "[a-z:]{0,5}"), 0..12).prop_map(|lines| {
        lines
            .into_iter()
            .map(|(indent, text)| format!("{}{}\n", " ".repeat(indent), text))
            .collect()
    })
}

fn without_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    /// Property: valid flat-mode input parses without diagnostics and the tree's leaves spell the source
    #[test]
    fn flat_valid_input_is_clean_and_lossless(source in program_strategy()) {
        let parse = parse_with_config(&source, &ParseConfig::flat()).expect("within resource bounds");
        prop_assert!(parse.diagnostics.is_empty(), "unexpected diagnostics: {:?}", parse.diagnostics);

        let leaves: String = parse.tree.tokens().map(|token| parse.tree.text(token.span)).collect();
        prop_assert_eq!(without_whitespace(&leaves), without_whitespace(&source));
    }

    /// Property: traversing a tree twice yields the same node sequence
    #[test]
    fn traversal_is_repeatable(source in "\\PC{0,120}") {
        if let Ok(parse) = parse(&source) {
            let first: Vec<_> = parse.tree.preorder().map(|node| (node.id(), node.kind(), node.span())).collect();
            let second: Vec<_> = parse.tree.preorder().map(|node| (node.id(), node.kind(), node.span())).collect();
            prop_assert_eq!(first.len(), parse.tree.node_count());
            prop_assert_eq!(first, second);
        }
    }

    /// Property: arbitrary input never panics, and leaves stay in source order
    #[test]
    fn arbitrary_input_yields_ordered_leaves(source in "\\PC{0,200}") {
        if let Ok(parse) = parse(&source) {
            let mut end = 0;
            for token in parse.tree.tokens() {
                prop_assert!(token.span.start >= end);
                end = token.span.end;
            }
            prop_assert!(end <= source.len());
        }
    }

    /// Property: INDENT and DEDENT balance, and every indentation error leaves exactly one sentinel
    #[test]
    fn indentation_tokens_balance(source in indented_lines_strategy()) {
        let lexed = lexer::lex(&source);
        let count = |kind| lexed.tokens.iter().filter(|token| token.kind == kind).count();
        prop_assert_eq!(count(TokenKind::Indent), count(TokenKind::Dedent));

        let indentation_errors = lexed
            .diagnostics
            .iter()
            .filter(|diagnostic| diagnostic.kind == DiagnosticKind::IndentationError)
            .count();
        prop_assert_eq!(count(TokenKind::ErrorSentinel), indentation_errors);
        prop_assert_eq!(lexed.tokens.last().map(|token| token.kind), Some(TokenKind::EndOfFile));
    }

    /// Property: flat mode never produces layout tokens other than NEWLINE
    #[test]
    fn flat_mode_has_no_indentation(source in indented_lines_strategy()) {
        let lexed = lexer::lex_with_config(&source, &ParseConfig::flat());
        prop_assert!(lexed.tokens.iter().all(|token| !matches!(token.kind, TokenKind::Indent | TokenKind::Dedent)));
        prop_assert!(lexed.diagnostics.is_empty());
    }
}
