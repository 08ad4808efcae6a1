//! Lexer for the Oluś language
//!
//! Handles tokenization including:
//! - Identifiers (`XID_Start XID_Continue*`, or a single Pattern_Syntax symbol such as `+`)
//! - Integer literals
//! - Nested strings delimited by “ and ”
//! - Indentation-based blocks (INDENT/DEDENT tokens)
//!
//! The lexer is lazy: [`Lexer`] is an [`Iterator`] over tokens. Diagnostics are collected on the side and every
//! problem also leaves an [`TokenKind::ErrorSentinel`] in the stream so the parser can keep going.
//!
//! ## Module Structure
//!
//! - `tokens` - Token types (TokenKind, Token)
//! - `strings` - String scanning with nesting
//! - `indent` - INDENT/DEDENT handling

mod indent;
mod strings;
pub mod tokens;

pub use tokens::{Token, TokenKind};

use std::collections::VecDeque;
use std::iter::Peekable;
use std::str::CharIndices;

use crate::config::ParseConfig;
use crate::diagnostics::{Diagnostic, errors};
use crate::tree::{Location, Span};

// ============================================================================
// LEXER STATE
// ----------------------------------------------------------------------------
// Lexer state diagram (simplified):
//
// [Start of line] → measure indentation → [Inside code]
//                                              ↓
//                                             see '“' → [string_depth++] → scan until depth 0
//                                              ↓
//                                             see line break → NEWLINE, [Start of line]
// ============================================================================

/// Start position of a token being scanned.
#[derive(Debug, Clone, Copy)]
struct Mark {
    offset: usize,
    location: Location,
}

/// Lexer for Oluś source code.
///
/// Converts source text into a stream of tokens, handling:
/// - Identifiers, numbers and punctuation
/// - Nested string literals
/// - Indentation (INDENT/DEDENT tokens), when enabled
///
/// A line break always ends the line, even inside an open `(`. An unclosed group is then reported on its own line
/// instead of swallowing the rest of the file.
pub struct Lexer<'a> {
    source: &'a str,
    chars: Peekable<CharIndices<'a>>,
    current_pos: usize,
    location: Location,
    with_indentation: bool,
    tab_width: usize,
    /// Indentation widths of the enclosing blocks, innermost last. Always starts with `0`.
    indent_stack: Vec<usize>,
    /// Tokens scanned but not yet handed out
    pending: VecDeque<Token>,
    at_line_start: bool,
    /// Whether the current line produced a non-layout token
    line_has_content: bool,
    /// Nesting depth of the string being scanned
    string_depth: usize,
    /// Offset of the outermost open quote
    string_start: usize,
    finished: bool,
    diagnostics: Vec<Diagnostic>,
}

/// Result of lexing a whole source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexed {
    /// Always ends with an `EndOfFile` token.
    pub tokens: Vec<Token>,
    pub diagnostics: Vec<Diagnostic>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer with the default configuration.
    pub fn new(source: &'a str) -> Self {
        Self::with_config(source, &ParseConfig::default())
    }

    pub fn with_config(source: &'a str, config: &ParseConfig) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            current_pos: 0,
            location: Location::default(),
            with_indentation: config.with_indentation,
            tab_width: config.tab_width,
            indent_stack: vec![0],
            pending: VecDeque::new(),
            at_line_start: true,
            line_has_content: false,
            string_depth: 0,
            string_start: 0,
            finished: false,
            diagnostics: Vec::new(),
        }
    }

    /// Diagnostics reported for the tokens handed out so far.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Tokenize the entire source code.
    ///
    /// The token stream always ends with an `EndOfFile` token.
    pub fn tokenize(mut self) -> Lexed {
        let tokens = self.by_ref().collect();
        Lexed {
            tokens,
            diagnostics: self.diagnostics,
        }
    }

    // ========================================================================
    // Core character handling
    // ========================================================================

    fn is_at_end(&mut self) -> bool {
        self.chars.peek().is_none()
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn advance(&mut self) -> Option<char> {
        let (pos, c) = self.chars.next()?;
        self.current_pos = pos + c.len_utf8();
        // CR LF counts as one line break, attributed to the LF
        if is_line_break(c) && !(c == '\r' && self.peek() == Some('\n')) {
            self.location = Location::new(self.location.line + 1, 1);
        } else {
            self.location.column += 1;
        }
        Some(c)
    }

    fn mark(&self) -> Mark {
        Mark {
            offset: self.current_pos,
            location: self.location,
        }
    }

    fn span_from(&self, from: Mark) -> Span {
        Span::new(from.offset, self.current_pos)
    }

    fn emit(&mut self, kind: TokenKind, from: Mark) {
        if !kind.is_layout() {
            self.line_has_content = true;
        }
        let token = Token::new(kind, self.span_from(from), from.location, self.location);
        self.pending.push_back(token);
    }

    /// Emit a zero-width token at the current position.
    fn emit_empty(&mut self, kind: TokenKind) {
        let here = self.mark();
        self.emit(kind, here);
    }

    // ========================================================================
    // Main scanning dispatch
    // ========================================================================

    fn scan_token(&mut self) {
        if self.string_depth > 0 {
            self.scan_string_part();
            return;
        }

        if self.at_line_start && self.with_indentation {
            self.handle_indentation();
            return;
        }
        self.at_line_start = false;

        // Skip whitespace (but not line breaks)
        while self.peek().is_some_and(is_inline_whitespace) {
            self.advance();
        }

        let from = self.mark();
        let Some(c) = self.advance() else {
            self.finish();
            return;
        };

        match c {
            _ if is_line_break(c) => self.scan_newline(from),
            ':' => self.emit(TokenKind::Colon, from),
            // Unmatched parentheses are the parser's concern
            '(' => self.emit(TokenKind::ParenOpen, from),
            ')' => self.emit(TokenKind::ParenClose, from),
            '“' => self.open_string(from),
            '0'..='9' => self.scan_number(from),
            _ if unicode_ident::is_xid_start(c) => self.scan_identifier(from),
            _ if is_symbol(c) => self.emit(TokenKind::Identifier, from),
            _ => self.scan_unexpected(from),
        }
    }

    fn scan_newline(&mut self, from: Mark) {
        while self.peek().is_some_and(is_line_break) {
            self.advance();
        }
        // Lines without content do not end a statement
        if self.line_has_content {
            self.emit(TokenKind::Newline, from);
            self.line_has_content = false;
        }
        self.at_line_start = true;
    }

    fn scan_number(&mut self, from: Mark) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
        self.emit(TokenKind::Number, from);
    }

    fn scan_identifier(&mut self, from: Mark) {
        while self.peek().is_some_and(unicode_ident::is_xid_continue) {
            self.advance();
        }
        self.emit(TokenKind::Identifier, from);
    }

    /// Consume a run of characters that start no token and report it once.
    fn scan_unexpected(&mut self, from: Mark) {
        while self
            .peek()
            .is_some_and(|c| !starts_token(c) && !is_pattern_white_space(c))
        {
            self.advance();
        }
        let span = self.span_from(from);
        let text = &self.source[span.range()];
        self.diagnostics.push(errors::unexpected_character(text, span));
        self.emit(TokenKind::ErrorSentinel, from);
    }

    fn finish(&mut self) {
        // The last statement may lack a line break
        if self.line_has_content {
            self.emit_empty(TokenKind::Newline);
            self.line_has_content = false;
        }

        // Emit remaining dedents at EOF
        while self.indent_stack.len() > 1 {
            self.indent_stack.pop();
            self.emit_empty(TokenKind::Dedent);
        }

        self.emit_empty(TokenKind::EndOfFile);
        self.finished = true;
        tracing::debug!(
            bytes = self.source.len(),
            diagnostics = self.diagnostics.len(),
            "lexing finished"
        );
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Some(token);
            }
            if self.finished {
                return None;
            }
            self.scan_token();
        }
    }
}

// ============================================================================
// Helper functions
// ============================================================================

/// Line breaks according to UAX31-R3a1.
pub fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\u{000a}' | '\u{000b}' | '\u{000c}' | '\u{000d}' | '\u{0085}' | '\u{2028}' | '\u{2029}'
    )
}

/// Unicode `Pattern_White_Space`.
pub fn is_pattern_white_space(c: char) -> bool {
    unic_ucd_ident::is_pattern_whitespace(c)
}

fn is_inline_whitespace(c: char) -> bool {
    is_pattern_white_space(c) && !is_line_break(c)
}

/// Unicode `Pattern_Syntax`: the characters reserved for operators and punctuation.
pub fn is_pattern_syntax(c: char) -> bool {
    unic_ucd_ident::is_pattern_syntax(c)
}

/// A single-character operator name such as `+` or `≤`.
fn is_symbol(c: char) -> bool {
    is_pattern_syntax(c) && !matches!(c, ':' | '(' | ')' | '“' | '”')
}

fn starts_token(c: char) -> bool {
    c.is_ascii_digit() || unicode_ident::is_xid_start(c) || is_pattern_syntax(c) || is_line_break(c)
}

/// Convenience function to lex a source string with the default configuration.
///
/// This is a shorthand for `Lexer::new(source).tokenize()`.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn lex(source: &str) -> Lexed {
    Lexer::new(source).tokenize()
}

/// Lex with an explicit configuration.
#[tracing::instrument(skip_all, fields(source_len = source.len(), with_indentation = config.with_indentation))]
pub fn lex_with_config(source: &str, config: &ParseConfig) -> Lexed {
    Lexer::with_config(source, config).tokenize()
}

// ============================================================================
// TESTS
// ============================================================================
