/// Statement parsing.
///
/// This chunk parses statements, procedure heads and indented blocks, including the call/procedure
/// reclassification and recovery for stray indentation and dedents.
impl<'a> Parser<'a> {
    // ========================================================================
    // Statements
    // ========================================================================

    /// Parse statements until the end of input, or until the `Dedent` closing the current block.
    fn statements(&mut self, in_block: bool) -> Result<Vec<Child>, ParseError> {
        let mut children = Vec::new();
        loop {
            match self.peek().kind {
                TokenKind::EndOfFile => break,
                TokenKind::Dedent if in_block => break,
                TokenKind::Dedent => {
                    // Not produced by a balanced token stream, but parsers get fed all sorts of streams
                    self.unexpected("statement");
                    let dedent = self.bump();
                    let error = self.node(NodeKind::Error, vec![Child::token(None, dedent)])?;
                    children.push(Child::node(None, error));
                }
                _ => {
                    let statement = self.statement()?;
                    children.push(Child::node(None, statement));
                }
            }
        }
        Ok(children)
    }

    /// Parse one statement.
    ///
    /// Returns a `Statement` node, or an `Error` node for a stray indented block. A scanner error sentinel is an
    /// ordinary `Error` expression of the statement it appears in, so each source line still yields one statement.
    fn statement(&mut self) -> Result<SyntaxNode, ParseError> {
        if self.check(TokenKind::Indent) {
            return self.unexpected_block();
        }

        let mut children = Vec::new();
        let (body, ended_with_block) = self.call_or_procedure(false)?;
        if !body.children().is_empty() {
            children.push(Child::node(None, body));
        }

        // The block's DEDENT already ended the statement
        if ended_with_block {
            return self.node(NodeKind::Statement, children);
        }

        if !self.at_statement_end() {
            self.unexpected("end of statement");
            let error = self.recover(false)?;
            children.push(Child::node(None, error));
        }
        if let Some(newline) = self.eat(TokenKind::Newline) {
            children.push(Child::token(None, newline));
        }
        self.node(NodeKind::Statement, children)
    }

    /// Parse a flat expression list and reclassify it as a procedure head if a `:` follows.
    ///
    /// Returns the `Call` or `Procedure` node and whether it ended with an indented block. Inside a group, blocks
    /// cannot open and an empty head is allowed.
    fn call_or_procedure(&mut self, in_group: bool) -> Result<(SyntaxNode, bool), ParseError> {
        let head = self.expressions()?;
        let Some(colon) = self.eat(TokenKind::Colon) else {
            return Ok((self.node(NodeKind::Call, head)?, false));
        };

        if head.is_empty() && !in_group {
            self.error(errors::missing_procedure_name(colon.span));
        }

        let mut children: Vec<Child> = head.into_iter().map(|child| child.with_field(Field::Head)).collect();
        children.push(Child::token(None, colon));

        if !in_group && self.opens_block() {
            let block = self.block()?;
            children.push(Child::node(Some(Field::Body), block));
            return Ok((self.node(NodeKind::Procedure, children)?, true));
        }

        let body = self.expressions()?;
        if !body.is_empty() {
            let call = self.node(NodeKind::Call, body)?;
            children.push(Child::node(Some(Field::Body), call));
        }
        Ok((self.node(NodeKind::Procedure, children)?, false))
    }

    // ========================================================================
    // Blocks
    // ========================================================================

    /// `block := NEWLINE INDENT statement* DEDENT`
    fn block(&mut self) -> Result<SyntaxNode, ParseError> {
        self.enter()?;
        let mut children = vec![Child::token(None, self.bump()), Child::token(None, self.bump())];
        children.extend(self.statements(true)?);
        children.push(self.close_block());
        self.leave();
        self.node(NodeKind::Block, children)
    }

    /// An indented block where none can start. Its statements are parsed normally, inside an `Error` node.
    fn unexpected_block(&mut self) -> Result<SyntaxNode, ParseError> {
        let indent = self.bump();
        self.error(errors::unexpected_indentation(indent.span));
        self.enter()?;
        let mut children = vec![Child::token(None, indent)];
        children.extend(self.statements(true)?);
        children.push(self.close_block());
        self.leave();
        self.node(NodeKind::Error, children)
    }

    fn close_block(&mut self) -> Child {
        match self.eat(TokenKind::Dedent) {
            Some(dedent) => Child::token(None, dedent),
            // The lexer closes every block before EndOfFile
            None => Child::missing(None, TokenKind::Dedent, self.peek().span.start),
        }
    }
}
