//! Syntax frontend for the Oluś language: scanner, parser, syntax tree, diagnostics.
//!
//! This crate is dependency-light and intended for reuse by any tooling that needs the concrete syntax of Oluś
//! source (formatters, highlighters, interpreters).
//!
//! ## Notes
//! - This crate is "syntax-only": it does no name resolution and no evaluation.
//! - Parsing never fails on malformed input. Syntax slips become error-marked nodes plus [`Diagnostic`]s; only a
//!   configured resource bound can abort a parse (see [`ParseError`]).
//!
//! ## Examples
//! ```rust
//! use olus_syntax::{parse, tree::NodeKind};
//!
//! let parse = parse("greet name: print name\n").unwrap();
//! assert!(parse.diagnostics.is_empty());
//! let procedures = parse.tree.preorder().filter(|n| n.kind() == NodeKind::Procedure).count();
//! assert_eq!(procedures, 1);
//! ```

pub mod config;
pub mod diagnostics;
pub mod lexer;
pub mod parser;
pub mod query;
pub mod token_helpers;
pub mod tree;

pub use config::ParseConfig;
pub use diagnostics::{Diagnostic, DiagnosticKind, ParseError, Severity};
pub use parser::{Parse, parse, parse_with_config};
pub use tree::{Span, SyntaxNode, Tree};
