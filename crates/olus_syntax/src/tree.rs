//! Concrete syntax tree for Oluś
//!
//! The tree is lossless: every token the scanner produced (layout tokens included) is a leaf, so the source text of
//! any node can be recovered from its span. Nodes own their children; there are no parent pointers. Use
//! [`Tree::parents`] for upward navigation.

use std::fmt::{self, Write as _};

use crate::lexer::{Token, TokenKind, is_line_break};

/// Source location span (byte offsets)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Zero-width span at `offset`.
    pub fn empty(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn range(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// One-based line and column. Columns count Unicode scalar values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl Location {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

// ============================================================================
// Node kinds and fields
// ============================================================================

/// Kind of a syntax node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    SourceFile,
    Statement,
    /// Head expressions, `:`, and an optional body (inline call or block)
    Procedure,
    Call,
    Group,
    StringLiteral,
    Identifier,
    Number,
    /// Indented statements forming a procedure body
    Block,
    /// Skipped tokens or a scanner error sentinel
    Error,
}

impl NodeKind {
    pub const ALL: [NodeKind; 10] = [
        NodeKind::SourceFile,
        NodeKind::Statement,
        NodeKind::Procedure,
        NodeKind::Call,
        NodeKind::Group,
        NodeKind::StringLiteral,
        NodeKind::Identifier,
        NodeKind::Number,
        NodeKind::Block,
        NodeKind::Error,
    ];

    /// Stable name used in tree dumps and query patterns.
    pub fn name(self) -> &'static str {
        match self {
            NodeKind::SourceFile => "source_file",
            NodeKind::Statement => "statement",
            NodeKind::Procedure => "procedure",
            NodeKind::Call => "call",
            NodeKind::Group => "group",
            NodeKind::StringLiteral => "string",
            NodeKind::Identifier => "identifier",
            NodeKind::Number => "number",
            NodeKind::Block => "block",
            NodeKind::Error => "error",
        }
    }

    pub fn from_name(name: &str) -> Option<NodeKind> {
        NodeKind::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Role of a child within its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Expressions before a procedure's `:`
    Head,
    /// A procedure's inline call or block, or the contents of a group
    Body,
    /// Opening `(` or `“`
    Open,
    /// Closing `)` or `”`
    Close,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Head, Field::Body, Field::Open, Field::Close];

    pub fn name(self) -> &'static str {
        match self {
            Field::Head => "head",
            Field::Body => "body",
            Field::Open => "open",
            Field::Close => "close",
        }
    }

    pub fn from_name(name: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|field| field.name() == name)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Elements
// ============================================================================

/// A token the parser expected but did not find.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Missing {
    pub kind: TokenKind,
    pub offset: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxElement {
    Node(SyntaxNode),
    Token(Token),
    Missing(Missing),
}

impl SyntaxElement {
    pub fn span(&self) -> Span {
        match self {
            SyntaxElement::Node(node) => node.span,
            SyntaxElement::Token(token) => token.span,
            SyntaxElement::Missing(missing) => Span::empty(missing.offset),
        }
    }

    pub fn as_node(&self) -> Option<&SyntaxNode> {
        match self {
            SyntaxElement::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_token(&self) -> Option<&Token> {
        match self {
            SyntaxElement::Token(token) => Some(token),
            _ => None,
        }
    }
}

/// A child element together with its field label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Child {
    pub field: Option<Field>,
    pub element: SyntaxElement,
}

impl Child {
    pub fn node(field: Option<Field>, node: SyntaxNode) -> Self {
        Self {
            field,
            element: SyntaxElement::Node(node),
        }
    }

    pub fn token(field: Option<Field>, token: Token) -> Self {
        Self {
            field,
            element: SyntaxElement::Token(token),
        }
    }

    pub fn missing(field: Option<Field>, kind: TokenKind, offset: usize) -> Self {
        Self {
            field,
            element: SyntaxElement::Missing(Missing { kind, offset }),
        }
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.field = Some(field);
        self
    }
}

/// Pre-order index of a node within its tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// An interior node of the syntax tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxNode {
    kind: NodeKind,
    span: Span,
    id: NodeId,
    children: Vec<Child>,
}

impl SyntaxNode {
    /// Build a node whose span covers its children. `offset` positions a node without children.
    pub fn new(kind: NodeKind, children: Vec<Child>, offset: usize) -> Self {
        let span = children
            .iter()
            .map(|child| child.element.span())
            .reduce(Span::merge)
            .unwrap_or(Span::empty(offset));
        Self::with_span(kind, children, span)
    }

    pub fn with_span(kind: NodeKind, children: Vec<Child>, span: Span) -> Self {
        Self {
            kind,
            span,
            id: NodeId(0),
            children,
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn span(&self) -> Span {
        self.span
    }

    /// Pre-order id, assigned when the node becomes part of a [`Tree`].
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn children(&self) -> &[Child] {
        &self.children
    }

    pub fn child_nodes(&self) -> impl Iterator<Item = &SyntaxNode> {
        self.children.iter().filter_map(|child| child.element.as_node())
    }

    pub fn child_tokens(&self) -> impl Iterator<Item = &Token> {
        self.children.iter().filter_map(|child| child.element.as_token())
    }

    /// Children carrying the given field label.
    pub fn children_by_field(&self, field: Field) -> impl Iterator<Item = &SyntaxElement> {
        self.children
            .iter()
            .filter(move |child| child.field == Some(field))
            .map(|child| &child.element)
    }

    pub fn child_by_field(&self, field: Field) -> Option<&SyntaxElement> {
        self.children_by_field(field).next()
    }

    /// Head expressions of a procedure.
    pub fn head(&self) -> impl Iterator<Item = &SyntaxNode> {
        self.children_by_field(Field::Head)
            .filter_map(SyntaxElement::as_node)
    }

    /// Inline call or block of a procedure, inner call or procedure of a group.
    pub fn body(&self) -> Option<&SyntaxNode> {
        self.child_by_field(Field::Body).and_then(SyntaxElement::as_node)
    }

    /// True if this node or any descendant is an error node or holds a missing token.
    pub fn has_errors(&self) -> bool {
        self.kind == NodeKind::Error
            || self.children.iter().any(|child| match &child.element {
                SyntaxElement::Node(node) => node.has_errors(),
                SyntaxElement::Token(token) => token.kind == TokenKind::ErrorSentinel,
                SyntaxElement::Missing(_) => true,
            })
    }

    fn number(&mut self, next: &mut usize) {
        self.id = NodeId(*next);
        *next += 1;
        for child in &mut self.children {
            if let SyntaxElement::Node(node) = &mut child.element {
                node.number(next);
            }
        }
    }
}

// ============================================================================
// Tree
// ============================================================================

/// Line start table for offset → line/column conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let mut starts = vec![0];
        let mut chars = source.char_indices().peekable();
        while let Some((i, c)) = chars.next() {
            if !is_line_break(c) {
                continue;
            }
            // CR LF is a single break
            if c == '\r' && matches!(chars.peek(), Some((_, '\n'))) {
                continue;
            }
            starts.push(i + c.len_utf8());
        }
        Self { starts }
    }

    pub fn line_count(&self) -> usize {
        self.starts.len()
    }

    /// Location of a byte offset. Offsets past the end clamp to the end of `source`.
    pub fn location(&self, source: &str, offset: usize) -> Location {
        let mut offset = offset.min(source.len());
        while !source.is_char_boundary(offset) {
            offset -= 1;
        }
        let line = self.starts.partition_point(|&start| start <= offset) - 1;
        let column = source[self.starts[line]..offset].chars().count() + 1;
        Location::new(line + 1, column)
    }
}

/// A parsed source file. Immutable; every traversal over it is repeatable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    source: String,
    root: SyntaxNode,
    lines: LineIndex,
    node_count: usize,
}

impl Tree {
    pub fn new(source: &str, mut root: SyntaxNode) -> Self {
        let mut node_count = 0;
        root.number(&mut node_count);
        Self {
            source: source.to_string(),
            root,
            lines: LineIndex::new(source),
            node_count,
        }
    }

    pub fn root(&self) -> &SyntaxNode {
        &self.root
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Source text of a span, empty if the span does not fall on char boundaries.
    pub fn text(&self, span: Span) -> &str {
        self.source.get(span.range()).unwrap_or("")
    }

    pub fn node_text(&self, node: &SyntaxNode) -> &str {
        self.text(node.span())
    }

    pub fn location(&self, offset: usize) -> Location {
        self.lines.location(&self.source, offset)
    }

    /// Line/column range of a span.
    pub fn line_range(&self, span: Span) -> (Location, Location) {
        (self.location(span.start), self.location(span.end))
    }

    /// Depth-first pre-order walk with parent and field context.
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: vec![Visit {
                node: &self.root,
                parent: None,
                field: None,
                depth: 0,
            }],
        }
    }

    /// Depth-first pre-order sequence of nodes.
    pub fn preorder(&self) -> impl Iterator<Item = &SyntaxNode> {
        self.walk().map(|visit| visit.node)
    }

    /// Leaf tokens in source order.
    pub fn tokens(&self) -> Tokens<'_> {
        Tokens {
            stack: vec![self.root.children.iter()],
        }
    }

    pub fn parents(&self) -> ParentIndex<'_> {
        ParentIndex::new(self)
    }

    /// Indented dump of the tree, one element per line.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.dump_node(&mut out, &self.root, None, 0);
        out
    }

    fn dump_node(&self, out: &mut String, node: &SyntaxNode, field: Option<Field>, depth: usize) {
        let _ = write!(out, "{:indent$}", "", indent = depth * 2);
        if let Some(field) = field {
            let _ = write!(out, "{}: ", field);
        }
        let _ = writeln!(out, "{}@{}", node.kind, node.span);
        for child in &node.children {
            match &child.element {
                SyntaxElement::Node(inner) => self.dump_node(out, inner, child.field, depth + 1),
                SyntaxElement::Token(token) => {
                    let _ = write!(out, "{:indent$}", "", indent = (depth + 1) * 2);
                    if let Some(field) = child.field {
                        let _ = write!(out, "{}: ", field);
                    }
                    let _ = writeln!(out, "{:?}@{} {:?}", token.kind, token.span, self.text(token.span));
                }
                SyntaxElement::Missing(missing) => {
                    let _ = write!(out, "{:indent$}", "", indent = (depth + 1) * 2);
                    if let Some(field) = child.field {
                        let _ = write!(out, "{}: ", field);
                    }
                    let _ = writeln!(out, "MISSING {:?}@{}", missing.kind, missing.offset);
                }
            }
        }
    }
}

// ============================================================================
// Traversal
// ============================================================================

/// A node reached during a [`Walk`].
#[derive(Debug, Clone, Copy)]
pub struct Visit<'a> {
    pub node: &'a SyntaxNode,
    pub parent: Option<&'a SyntaxNode>,
    pub field: Option<Field>,
    pub depth: usize,
}

/// Lazy pre-order traversal.
#[derive(Debug, Clone)]
pub struct Walk<'a> {
    stack: Vec<Visit<'a>>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = Visit<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let visit = self.stack.pop()?;
        for child in visit.node.children.iter().rev() {
            if let SyntaxElement::Node(node) = &child.element {
                self.stack.push(Visit {
                    node,
                    parent: Some(visit.node),
                    field: child.field,
                    depth: visit.depth + 1,
                });
            }
        }
        Some(visit)
    }
}

/// Lazy in-order iteration over leaf tokens.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    stack: Vec<std::slice::Iter<'a, Child>>,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = &'a Token;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let iter = self.stack.last_mut()?;
            match iter.next() {
                None => {
                    self.stack.pop();
                }
                Some(child) => match &child.element {
                    SyntaxElement::Token(token) => return Some(token),
                    SyntaxElement::Node(node) => self.stack.push(node.children.iter()),
                    SyntaxElement::Missing(_) => {}
                },
            }
        }
    }
}

/// Upward navigation, built on demand from a pre-order walk.
#[derive(Debug, Clone)]
pub struct ParentIndex<'a> {
    nodes: Vec<&'a SyntaxNode>,
    parents: Vec<Option<NodeId>>,
}

impl<'a> ParentIndex<'a> {
    fn new(tree: &'a Tree) -> Self {
        let mut nodes = Vec::with_capacity(tree.node_count);
        let mut parents = Vec::with_capacity(tree.node_count);
        for visit in tree.walk() {
            nodes.push(visit.node);
            parents.push(visit.parent.map(SyntaxNode::id));
        }
        Self { nodes, parents }
    }

    pub fn node(&self, id: NodeId) -> Option<&'a SyntaxNode> {
        self.nodes.get(id.0).copied()
    }

    pub fn parent(&self, id: NodeId) -> Option<&'a SyntaxNode> {
        let parent = (*self.parents.get(id.0)?)?;
        self.node(parent)
    }

    /// Parents from the immediate one up to the root.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = &'a SyntaxNode> + '_ {
        std::iter::successors(self.parent(id), move |node| self.parent(node.id()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_merge() {
        let span = Span::new(4, 6).merge(Span::new(1, 5));
        assert_eq!(span, Span::new(1, 6));
        assert_eq!(span.len(), 5);
        assert!(Span::empty(3).is_empty());
    }

    #[test]
    fn test_line_index() {
        let source = "ab\ncd\r\nefg\u{2028}h";
        let index = LineIndex::new(source);
        assert_eq!(index.line_count(), 4);
        assert_eq!(index.location(source, 0), Location::new(1, 1));
        assert_eq!(index.location(source, 4), Location::new(2, 2));
        assert_eq!(index.location(source, 7), Location::new(3, 1));
        assert_eq!(index.location(source, source.len()), Location::new(4, 2));
    }

    #[test]
    fn test_line_index_counts_chars_not_bytes() {
        let source = "Oluś x";
        let index = LineIndex::new(source);
        // 'ś' is two bytes
        assert_eq!(index.location(source, 6), Location::new(1, 6));
    }

    #[test]
    fn test_node_kind_names_roundtrip() {
        for kind in NodeKind::ALL {
            assert_eq!(NodeKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(NodeKind::from_name("lambda"), None);
    }

    #[test]
    fn test_field_names_roundtrip() {
        for field in Field::ALL {
            assert_eq!(Field::from_name(field.name()), Some(field));
        }
    }

    #[test]
    fn test_node_span_covers_children() {
        let token = |kind, start, end| Token::new(kind, Span::new(start, end), Location::default(), Location::default());
        let node = SyntaxNode::new(
            NodeKind::Call,
            vec![
                Child::token(None, token(TokenKind::Identifier, 2, 5)),
                Child::token(None, token(TokenKind::Identifier, 6, 9)),
            ],
            0,
        );
        assert_eq!(node.span(), Span::new(2, 9));

        let empty = SyntaxNode::new(NodeKind::Call, Vec::new(), 7);
        assert_eq!(empty.span(), Span::empty(7));
    }
}
