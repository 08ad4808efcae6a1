//! Parser for the Oluś language
//!
//! Converts a token stream into a concrete syntax tree. Every token the lexer produced ends up in the tree, so the
//! source text can be recovered from the tree's leaves.
//!
//! Grammar:
//!
//! ```text
//! source_file := statement*
//! statement   := expression+ (':' expression*)? NEWLINE
//!              | expression* ':' block
//! block       := NEWLINE INDENT statement* DEDENT
//! expression  := identifier | group | string | number
//! group       := '(' expression* (':' expression*)? ')'
//! ```
//!
//! A statement is read as a flat list of expressions first and becomes a procedure only when a top-level `:` follows
//! it, so the call/procedure ambiguity is resolved without backtracking.
//!
//! ## Examples
//!
//! ```rust
//! use olus_syntax::{parser, tree::NodeKind};
//!
//! let parse = parser::parse("fact n return:\n  is_zero n (: return 1) (: recurse)\n").unwrap();
//! assert!(!parse.has_errors());
//! let root = parse.tree.root();
//! let statement = root.child_nodes().next().unwrap();
//! let procedure = statement.child_nodes().next().unwrap();
//! assert_eq!(procedure.kind(), NodeKind::Procedure);
//! assert_eq!(procedure.head().count(), 3);
//! assert_eq!(procedure.body().map(|b| b.kind()), Some(NodeKind::Block));
//! ```

use crate::config::ParseConfig;
use crate::diagnostics::{Diagnostic, ParseError, Resource, errors};
use crate::lexer::{Lexed, Lexer, Token, TokenKind};
use crate::tree::{Child, Field, NodeKind, Span, SyntaxNode, Tree};

// NOTE: The parser lives in one Rust module split over several files with `include!`,
// so the chunks call each other's private methods directly.

include!("parser/core.rs");
include!("parser/helpers.rs");
include!("parser/stmts.rs");
include!("parser/expr.rs");
include!("parser/api.rs");
include!("parser/tests.rs");
