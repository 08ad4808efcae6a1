/// Token-stream helpers, node construction and error recovery.
///
/// This chunk contains the low-level primitives used throughout parsing:
/// - Peeking/consuming tokens (`peek`, `bump`)
/// - Statement boundaries (`at_statement_end`)
/// - Node construction under the configured resource bounds (`node`, `enter`)
/// - Error recovery (`recover`)
impl<'a> Parser<'a> {
    // ========================================================================
    // Helpers
    // ========================================================================

    /// Return the current token without consuming it.
    fn peek(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&self.eof)
    }

    /// Return the token after the current token without consuming it.
    fn peek_next(&self) -> &Token {
        self.tokens.get(self.pos + 1).unwrap_or(&self.eof)
    }

    /// Return `true` if the current token is [`TokenKind::EndOfFile`].
    fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::EndOfFile
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    /// Consume the current token and return it. `EndOfFile` is never consumed.
    fn bump(&mut self) -> Token {
        let token = *self.peek();
        if !self.is_at_end() {
            self.pos += 1;
        }
        token
    }

    /// Consume the current token if it has the given kind.
    fn eat(&mut self, kind: TokenKind) -> Option<Token> {
        if self.check(kind) { Some(self.bump()) } else { None }
    }

    /// Return `true` at a token a statement may end before.
    fn at_statement_end(&self) -> bool {
        self.peek().kind.ends_statement()
    }

    /// Return `true` if a `Newline INDENT` pair follows, i.e. a procedure body block starts here.
    fn opens_block(&self) -> bool {
        self.config.with_indentation
            && self.check(TokenKind::Newline)
            && self.peek_next().kind == TokenKind::Indent
    }

    // ========================================================================
    // Node construction
    // ========================================================================

    fn count_node(&mut self) -> Result<(), ParseError> {
        self.node_count += 1;
        match self.config.max_nodes {
            Some(limit) if self.node_count > limit => Err(ParseError::ResourceExceeded {
                resource: Resource::Nodes,
                limit,
                offset: self.peek().span.start,
            }),
            _ => Ok(()),
        }
    }

    /// Build a node, counting it against `max_nodes`.
    fn node(&mut self, kind: NodeKind, children: Vec<Child>) -> Result<SyntaxNode, ParseError> {
        self.count_node()?;
        Ok(SyntaxNode::new(kind, children, self.peek().span.start))
    }

    /// Node wrapping a single token.
    fn leaf(&mut self, kind: NodeKind) -> Result<SyntaxNode, ParseError> {
        let token = self.bump();
        self.node(kind, vec![Child::token(None, token)])
    }

    /// Enter a nested construct, counting it against `max_depth`.
    fn enter(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > self.config.max_depth {
            return Err(ParseError::ResourceExceeded {
                resource: Resource::Depth,
                limit: self.config.max_depth,
                offset: self.peek().span.start,
            });
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    // ========================================================================
    // Diagnostics and recovery
    // ========================================================================

    fn error(&mut self, diagnostic: Diagnostic) {
        tracing::trace!(span = %diagnostic.span, "syntax error: {}", diagnostic.message);
        self.diagnostics.push(diagnostic);
    }

    /// Report the current token as unexpected.
    fn unexpected(&mut self, expected: &str) {
        let found = self.peek();
        let diagnostic = errors::unexpected_token(found.describe(), expected, found.span);
        self.error(diagnostic);
    }

    /// Skip tokens up to the next statement boundary (or a `)` when `until_close` is set) and wrap them in an `Error`
    /// node. The caller reports the diagnostic.
    fn recover(&mut self, until_close: bool) -> Result<SyntaxNode, ParseError> {
        let mut children = Vec::new();
        while !self.at_statement_end() && !(until_close && self.check(TokenKind::ParenClose)) {
            children.push(Child::token(None, self.bump()));
        }
        self.node(NodeKind::Error, children)
    }
}
