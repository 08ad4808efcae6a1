// Parser core types and entrypoint.
//
// This chunk defines the [`Parser`] type and its top-level `parse()` entrypoint, and the [`Parse`] result handed to
// callers.
//
// ## Notes
// - This file is `include!`'d into `crate::parser`, so every chunk shares the private
//   `Parser` methods defined in the others.

/// Result of a successful parse: a complete tree plus everything that was reported along the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parse {
    pub tree: Tree,
    /// Scanner and parser diagnostics, ordered by source position.
    pub diagnostics: Vec<Diagnostic>,
}

impl Parse {
    /// Return `true` if any error-severity diagnostic was reported.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    /// Error-severity diagnostics only.
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_error())
    }
}

/// Parser state.
///
/// ## Notes
/// - The parser is single-pass and never fails on malformed input: it records a diagnostic, wraps what it could not
///   use in an `Error` node, and resumes at the next statement boundary.
/// - The only hard failure is a configured resource bound (`max_nodes`, `max_depth`).
pub struct Parser<'a> {
    tokens: &'a [Token],
    /// Returned by `peek` past the end, so a stream without `EndOfFile` cannot run the parser off the slice.
    eof: Token,
    pos: usize,
    config: &'a ParseConfig,
    diagnostics: Vec<Diagnostic>,
    node_count: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Create a new parser for a token stream.
    ///
    /// ## Parameters
    /// - `tokens`: Token stream produced by [`crate::lexer`], ending in `EndOfFile`.
    /// - `config`: Resource bounds and dialect.
    pub fn new(tokens: &'a [Token], config: &'a ParseConfig) -> Self {
        let eof = match tokens.last() {
            Some(last) if last.kind == TokenKind::EndOfFile => *last,
            Some(last) => Token::new(TokenKind::EndOfFile, Span::empty(last.span.end), last.end, last.end),
            None => Token::new(TokenKind::EndOfFile, Span::empty(0), Default::default(), Default::default()),
        };
        Self {
            tokens,
            eof,
            pos: 0,
            config,
            diagnostics: Vec::new(),
            node_count: 0,
            depth: 0,
        }
    }

    /// Parse the entire token stream into a `SourceFile` node.
    ///
    /// ## Errors
    /// Returns [`ParseError::ResourceExceeded`] if the tree would exceed `max_nodes` or `max_depth`. Syntax errors
    /// are returned alongside the tree instead.
    pub fn parse(mut self) -> Result<(SyntaxNode, Vec<Diagnostic>), ParseError> {
        let children = self.statements(false)?;
        // The source file covers the whole input, leading blank lines and trailing whitespace included
        let span = Span::new(0, self.eof.span.end);
        self.count_node()?;
        let root = SyntaxNode::with_span(NodeKind::SourceFile, children, span);
        Ok((root, self.diagnostics))
    }
}
