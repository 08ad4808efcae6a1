//! Indentation handling for the Oluś lexer
//!
//! Implements Python-style INDENT/DEDENT tokens. Blank lines never affect indentation, and a dedent to a width that
//! matches no enclosing block is reported and then treated as a new level so INDENT/DEDENT stay balanced.

use super::tokens::{Token, TokenKind};
use super::{Lexer, Mark, is_inline_whitespace, is_line_break};
use crate::diagnostics::{errors, warnings};
use crate::tree::Span;

impl<'a> Lexer<'a> {
    pub(super) fn handle_indentation(&mut self) {
        let from = self.mark();
        let mut width = 0;
        let mut saw_space = false;
        let mut saw_tab = false;

        // Count leading spaces/tabs
        while let Some(c) = self.peek() {
            match c {
                ' ' => {
                    width += 1;
                    saw_space = true;
                }
                '\t' => {
                    width += self.tab_width;
                    saw_tab = true;
                }
                _ if is_inline_whitespace(c) => width += 1,
                _ => break,
            }
            self.advance();
        }

        // Blank line - skip, stay at line start
        if self.peek().is_some_and(is_line_break) {
            while self.peek().is_some_and(is_line_break) {
                self.advance();
            }
            return;
        }

        self.at_line_start = false;

        // At end of file? `finish` closes the open blocks.
        if self.is_at_end() {
            return;
        }

        let whitespace = self.span_from(from);
        if saw_space && saw_tab {
            self.diagnostics.push(warnings::mixed_indentation(whitespace));
        }

        let current = self.indent_stack.last().copied().unwrap_or(0);
        if width > current {
            self.indent_stack.push(width);
            self.emit(TokenKind::Indent, from);
        } else if width < current {
            self.dedent_to(width, from);
        }

        tracing::trace!(width, depth = self.indent_stack.len() - 1, "line indentation");
    }

    fn dedent_to(&mut self, width: usize, from: Mark) {
        // Count how many levels we leave BEFORE modifying the stack
        let len = self.indent_stack.len();
        let deeper = self
            .indent_stack
            .iter()
            .rev()
            .take_while(|&&level| level > width)
            .count();
        let landing = self.indent_stack.get(len - 1 - deeper).copied().unwrap_or(0);

        if landing == width {
            self.indent_stack.truncate(len - deeper);
            for _ in 0..deeper {
                self.emit_at(TokenKind::Dedent, from);
            }
            return;
        }

        // No enclosing block has this width. Keep the innermost popped level open at the observed width.
        self.indent_stack.truncate(len - deeper + 1);
        if let Some(last) = self.indent_stack.last_mut() {
            *last = width;
        }
        for _ in 1..deeper {
            self.emit_at(TokenKind::Dedent, from);
        }

        let whitespace = self.span_from(from);
        self.diagnostics
            .push(errors::inconsistent_indentation(landing, width, whitespace));
        self.emit(TokenKind::ErrorSentinel, from);
    }

    /// Zero-width token at the start of the line.
    fn emit_at(&mut self, kind: TokenKind, at: Mark) {
        let token = Token::new(kind, Span::empty(at.offset), at.location, at.location);
        self.pending.push_back(token);
    }
}
