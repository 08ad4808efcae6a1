//! Token types for the Oluś lexer.
//!
//! Tokens carry no payload: their text is the source slice at [`Token::span`]. This keeps tokens `Copy` and the
//! syntax tree lossless.

use crate::tree::{Location, Span};

// ============================================================================
// TOKEN TYPES
// ============================================================================

/// Kind of token produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // ========== Literals ==========
    Identifier,
    Number,

    // ========== Punctuation ==========
    Colon,      // :
    ParenOpen,  // (
    ParenClose, // )

    // ========== Strings ==========
    StringOpen,    // “
    StringClose,   // ”
    StringContent, // text between quotes

    // ========== Layout ==========
    Newline,
    Indent,
    Dedent,

    // ========== Special ==========
    /// Stand-in for malformed input; the matching diagnostic is already recorded.
    ErrorSentinel,
    EndOfFile,
}

/// A token with its kind and source position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub start: Location,
    pub end: Location,
}

impl Token {
    /// Construct a new token.
    pub fn new(kind: TokenKind, span: Span, start: Location, end: Location) -> Self {
        Self { kind, span, start, end }
    }

    /// The source text this token covers.
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        source.get(self.span.range()).unwrap_or("")
    }
}
