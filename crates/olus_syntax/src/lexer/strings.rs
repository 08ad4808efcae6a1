//! String scanning for the Oluś lexer
//!
//! Strings open with “ and close with ”, and nest: every “ inside a string opens a nested string that needs its own
//! ”. There are no escapes. The lexer hands out one token per call, so the nesting depth lives on the [`Lexer`]
//! between calls and the content of a string is split into `StringContent` runs around the nested quotes.

use super::tokens::TokenKind;
use super::{Lexer, Mark};
use crate::diagnostics::errors;
use crate::tree::Span;

impl<'a> Lexer<'a> {
    /// Called after consuming the outermost “.
    pub(super) fn open_string(&mut self, from: Mark) {
        self.string_depth = 1;
        self.string_start = from.offset;
        self.emit(TokenKind::StringOpen, from);
    }

    pub(super) fn scan_string_part(&mut self) {
        let from = self.mark();
        match self.peek() {
            None => {
                self.diagnostics.push(errors::unterminated_string(Span::new(
                    self.string_start,
                    self.current_pos,
                )));
                self.string_depth = 0;
                self.emit_empty(TokenKind::ErrorSentinel);
            }
            Some('“') => {
                self.advance();
                self.string_depth += 1;
                self.emit(TokenKind::StringOpen, from);
            }
            Some('”') => {
                self.advance();
                self.string_depth -= 1;
                self.emit(TokenKind::StringClose, from);
            }
            Some(_) => {
                // Content is opaque: line breaks, colons and parentheses are all text here
                while let Some(c) = self.peek() {
                    if c == '“' || c == '”' {
                        break;
                    }
                    self.advance();
                }
                self.emit(TokenKind::StringContent, from);
            }
        }
    }
}
