/// Expression parsing.
///
/// Expressions are atoms: identifiers, numbers, parenthesized groups and strings. There are no operators; a symbol
/// such as `+` is an identifier like any other.
impl<'a> Parser<'a> {
    /// Parse expressions for as long as the current token can start one.
    fn expressions(&mut self) -> Result<Vec<Child>, ParseError> {
        let mut items = Vec::new();
        while self.peek().kind.starts_expression() {
            let expression = self.expression()?;
            items.push(Child::node(None, expression));
        }
        Ok(items)
    }

    fn expression(&mut self) -> Result<SyntaxNode, ParseError> {
        match self.peek().kind {
            TokenKind::Identifier => self.leaf(NodeKind::Identifier),
            TokenKind::Number => self.leaf(NodeKind::Number),
            TokenKind::ParenOpen => self.group(),
            TokenKind::StringOpen => self.string(),
            // ErrorSentinel: already reported by the lexer
            _ => self.leaf(NodeKind::Error),
        }
    }

    /// `group := '(' expression* (':' expression*)? ')'`
    ///
    /// The contents are classified exactly like a statement and attached as the group's `body`.
    fn group(&mut self) -> Result<SyntaxNode, ParseError> {
        self.enter()?;
        let open = self.bump();
        let mut children = vec![Child::token(Some(Field::Open), open)];

        let (body, _) = self.call_or_procedure(true)?;
        if !body.children().is_empty() {
            children.push(Child::node(Some(Field::Body), body));
        }

        if !self.check(TokenKind::ParenClose) && !self.at_statement_end() {
            // Something like a second `:` inside the group
            self.unexpected("`)`");
            let error = self.recover(true)?;
            children.push(Child::node(None, error));
        }

        match self.eat(TokenKind::ParenClose) {
            Some(close) => children.push(Child::token(Some(Field::Close), close)),
            None => {
                let found = self.peek();
                let at = found.span.start;
                let diagnostic = errors::unclosed_group(found.describe(), open.span, Span::empty(at));
                self.error(diagnostic);
                children.push(Child::missing(Some(Field::Close), TokenKind::ParenClose, at));
            }
        }

        self.leave();
        self.node(NodeKind::Group, children)
    }

    /// String literal: `“`, then content runs and nested strings, then `”`.
    fn string(&mut self) -> Result<SyntaxNode, ParseError> {
        self.enter()?;
        let open = self.bump();
        let mut children = vec![Child::token(Some(Field::Open), open)];

        loop {
            match self.peek().kind {
                TokenKind::StringContent => children.push(Child::token(None, self.bump())),
                TokenKind::StringOpen => {
                    let nested = self.string()?;
                    children.push(Child::node(None, nested));
                }
                TokenKind::StringClose => {
                    children.push(Child::token(Some(Field::Close), self.bump()));
                    break;
                }
                TokenKind::ErrorSentinel => {
                    // Unterminated: the lexer reported it and ended the string
                    children.push(Child::token(None, self.bump()));
                    break;
                }
                _ => {
                    // The lexer never ends a string any other way
                    let at = self.peek().span.start;
                    children.push(Child::missing(Some(Field::Close), TokenKind::StringClose, at));
                    break;
                }
            }
        }

        self.leave();
        self.node(NodeKind::StringLiteral, children)
    }
}
