#![forbid(unsafe_code)]
//! Oluś syntax tools
//!
//! Oluś is a small language built from procedures and calls, with indentation-based blocks and nestable “strings”.
//! This crate bundles the syntax frontend ([`olus_syntax`]: scanner, parser, syntax tree, queries) with the `olus`
//! command-line driver.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **Malformed input** is never a panic: it becomes diagnostics and error nodes in the tree.

pub mod cli;

pub use olus_syntax::{config, diagnostics, lexer, parser, query, tree};

pub use olus_syntax::{Diagnostic, DiagnosticKind, Parse, ParseConfig, ParseError, Severity, parse, parse_with_config};
