//! Small helper APIs for working with `Token` / `TokenKind`.
//!
//! These helpers exist to reduce repetitive `matches!(...)` at call sites in the lexer and parser.

use crate::lexer::{Token, TokenKind};

impl TokenKind {
    /// Return `true` if this token is line structure rather than content.
    pub fn is_layout(&self) -> bool {
        matches!(self, TokenKind::Newline | TokenKind::Indent | TokenKind::Dedent)
    }

    /// Return `true` if an expression can start with this token.
    pub fn starts_expression(&self) -> bool {
        matches!(
            self,
            TokenKind::Identifier
                | TokenKind::Number
                | TokenKind::ParenOpen
                | TokenKind::StringOpen
                | TokenKind::ErrorSentinel
        )
    }

    /// Return `true` if a statement may end before this token.
    pub fn ends_statement(&self) -> bool {
        matches!(self, TokenKind::Newline | TokenKind::Dedent | TokenKind::EndOfFile)
    }

    /// Human readable name for diagnostics.
    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::Identifier => "identifier",
            TokenKind::Number => "number",
            TokenKind::Colon => "`:`",
            TokenKind::ParenOpen => "`(`",
            TokenKind::ParenClose => "`)`",
            TokenKind::StringOpen => "`“`",
            TokenKind::StringClose => "`”`",
            TokenKind::StringContent => "string content",
            TokenKind::Newline => "end of line",
            TokenKind::Indent => "indentation",
            TokenKind::Dedent => "dedent",
            TokenKind::ErrorSentinel => "invalid input",
            TokenKind::EndOfFile => "end of input",
        }
    }
}

impl Token {
    /// Convenience wrapper for `self.kind.describe()`.
    pub fn describe(&self) -> &'static str {
        self.kind.describe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_kinds() {
        assert!(TokenKind::Newline.is_layout());
        assert!(TokenKind::Indent.is_layout());
        assert!(TokenKind::Dedent.is_layout());
        assert!(!TokenKind::Colon.is_layout());
        assert!(!TokenKind::EndOfFile.is_layout());
    }

    #[test]
    fn test_expression_starts() {
        assert!(TokenKind::Identifier.starts_expression());
        assert!(TokenKind::StringOpen.starts_expression());
        assert!(!TokenKind::Colon.starts_expression());
        assert!(!TokenKind::ParenClose.starts_expression());
    }
}
