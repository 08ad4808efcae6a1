//! Structural queries over a [`Tree`]
//!
//! A [`Pattern`] selects nodes by their kind, the field they occupy in their parent, and the parent's kind. Patterns
//! have a small textual form:
//!
//! | Pattern                 | Selects                                           |
//! |-------------------------|---------------------------------------------------|
//! | `*`                     | every node                                        |
//! | `procedure`             | nodes of kind `procedure`                         |
//! | `procedure.head`        | nodes in the `head` field of a `procedure`        |
//! | `group.body:procedure`  | `procedure` nodes in the `body` field of a `group`|
//!
//! `*` may stand for any kind or field, e.g. `*.body:call` or `procedure.*:identifier`.
//!
//! ## Examples
//! ```rust
//! use olus_syntax::{parse, query::Pattern};
//!
//! let parse = parse("fact n return:\n  mul n m return\n").unwrap();
//! let pattern: Pattern = "procedure.head".parse().unwrap();
//! let names: Vec<&str> = parse.tree.select(&pattern).map(|n| parse.tree.node_text(n)).collect();
//! assert_eq!(names, vec!["fact", "n", "return"]);
//! ```

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::tree::{Field, NodeKind, SyntaxNode, Tree, Visit, Walk};

/// Node selector. Unset parts match anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Pattern {
    pub kind: Option<NodeKind>,
    pub field: Option<Field>,
    pub parent: Option<NodeKind>,
}

impl Pattern {
    /// Pattern matching every node.
    pub fn any() -> Self {
        Self::default()
    }

    /// Pattern matching nodes of one kind.
    pub fn kind(kind: NodeKind) -> Self {
        Self {
            kind: Some(kind),
            ..Self::default()
        }
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.field = Some(field);
        self
    }

    pub fn with_parent(mut self, parent: NodeKind) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_kind(mut self, kind: NodeKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Test a node reached by a walk against this pattern.
    pub fn matches(&self, visit: &Visit<'_>) -> bool {
        self.kind.is_none_or(|kind| visit.node.kind() == kind)
            && self.field.is_none_or(|field| visit.field == Some(field))
            && self
                .parent
                .is_none_or(|parent| visit.parent.map(SyntaxNode::kind) == Some(parent))
    }
}

/// Malformed textual pattern
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("unknown node kind `{0}`")]
    UnknownKind(String),
    #[error("unknown field `{0}`")]
    UnknownField(String),
    #[error("malformed pattern `{0}`: expected `kind`, `parent.field` or `parent.field:kind`")]
    Malformed(String),
}

fn parse_kind(name: &str) -> Result<Option<NodeKind>, QueryError> {
    match name {
        "*" => Ok(None),
        _ => NodeKind::from_name(name)
            .map(Some)
            .ok_or_else(|| QueryError::UnknownKind(name.to_string())),
    }
}

impl FromStr for Pattern {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let malformed = || QueryError::Malformed(text.to_string());
        if text.is_empty() {
            return Err(malformed());
        }

        let (path, kind) = match text.split_once(':') {
            Some((path, kind)) => (path, Some(kind)),
            None => (text, None),
        };

        match (path.split_once('.'), kind) {
            // `kind`
            (None, None) => Ok(Pattern {
                kind: parse_kind(path)?,
                ..Pattern::default()
            }),
            // `kind:kind` says nothing sensible
            (None, Some(_)) => Err(malformed()),
            // `parent.field` or `parent.field:kind`
            (Some((parent, field)), kind) => {
                if parent.is_empty() || field.is_empty() || kind.is_some_and(str::is_empty) {
                    return Err(malformed());
                }
                let field = match field {
                    "*" => None,
                    _ => Some(Field::from_name(field).ok_or_else(|| QueryError::UnknownField(field.to_string()))?),
                };
                Ok(Pattern {
                    kind: match kind {
                        Some(kind) => parse_kind(kind)?,
                        None => None,
                    },
                    field,
                    parent: parse_kind(parent)?,
                })
            }
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = |kind: Option<NodeKind>| kind.map_or("*", NodeKind::name);
        match self.field {
            None if self.parent.is_none() => write!(f, "{}", name(self.kind)),
            None => write!(f, "{}.*:{}", name(self.parent), name(self.kind)),
            Some(field) => {
                write!(f, "{}.{}", name(self.parent), field)?;
                if let Some(kind) = self.kind {
                    write!(f, ":{}", kind)?;
                }
                Ok(())
            }
        }
    }
}

/// Lazy iterator over the nodes matching a [`Pattern`], in pre-order.
#[derive(Debug, Clone)]
pub struct Matches<'a> {
    walk: Walk<'a>,
    pattern: Pattern,
}

impl<'a> Iterator for Matches<'a> {
    type Item = &'a SyntaxNode;

    fn next(&mut self) -> Option<Self::Item> {
        let pattern = self.pattern;
        self.walk.by_ref().find(|visit| pattern.matches(visit)).map(|visit| visit.node)
    }
}

impl Tree {
    /// Select the nodes matching `pattern`, in pre-order.
    pub fn select(&self, pattern: &Pattern) -> Matches<'_> {
        Matches {
            walk: self.walk(),
            pattern: *pattern,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    fn select<'t>(tree: &'t Tree, pattern: &str) -> Vec<&'t str> {
        let pattern: Pattern = pattern.parse().expect("valid pattern");
        tree.select(&pattern).map(|node| tree.node_text(node)).collect()
    }

    #[test]
    fn test_parse_textual_forms() {
        assert_eq!("*".parse::<Pattern>(), Ok(Pattern::any()));
        assert_eq!("call".parse::<Pattern>(), Ok(Pattern::kind(NodeKind::Call)));
        assert_eq!(
            "procedure.head".parse::<Pattern>(),
            Ok(Pattern::any().with_parent(NodeKind::Procedure).with_field(Field::Head))
        );
        assert_eq!(
            "group.body:procedure".parse::<Pattern>(),
            Ok(Pattern::kind(NodeKind::Procedure)
                .with_parent(NodeKind::Group)
                .with_field(Field::Body))
        );
        assert_eq!(
            "*.body:call".parse::<Pattern>(),
            Ok(Pattern::kind(NodeKind::Call).with_field(Field::Body))
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "lambda".parse::<Pattern>(),
            Err(QueryError::UnknownKind("lambda".to_string()))
        );
        assert_eq!(
            "procedure.name".parse::<Pattern>(),
            Err(QueryError::UnknownField("name".to_string()))
        );
        assert!(matches!("".parse::<Pattern>(), Err(QueryError::Malformed(_))));
        assert!(matches!("call:call".parse::<Pattern>(), Err(QueryError::Malformed(_))));
        assert!(matches!("procedure.".parse::<Pattern>(), Err(QueryError::Malformed(_))));
    }

    #[test]
    fn test_display_roundtrip() {
        for text in ["*", "string", "procedure.head", "group.body:procedure", "*.open", "procedure.*:identifier"] {
            let pattern: Pattern = text.parse().expect("valid pattern");
            assert_eq!(pattern.to_string(), text);
        }
    }

    #[test]
    fn test_select_by_kind() {
        let parse = parse("print “hi” (f “x”)\n").expect("parse");
        assert_eq!(select(&parse.tree, "string"), vec!["“hi”", "“x”"]);
    }

    #[test]
    fn test_select_by_parent_and_field() {
        let parse = parse("fact n return:\n  is_zero n (: return 1) (: f)\n").expect("parse");
        assert_eq!(select(&parse.tree, "procedure.head"), vec!["fact", "n", "return"]);
        assert_eq!(select(&parse.tree, "group.body:procedure"), vec![": return 1", ": f"]);
        assert_eq!(select(&parse.tree, "procedure.body:call"), vec!["return 1", "f"]);
        assert_eq!(select(&parse.tree, "procedure.body:block").len(), 1);
    }

    #[test]
    fn test_select_is_lazy_and_repeatable() {
        let parse = parse("a b c\n").expect("parse");
        let pattern = Pattern::kind(NodeKind::Identifier);
        assert_eq!(parse.tree.select(&pattern).next().map(SyntaxNode::kind), Some(NodeKind::Identifier));
        let first: Vec<_> = parse.tree.select(&pattern).map(SyntaxNode::id).collect();
        let second: Vec<_> = parse.tree.select(&pattern).map(SyntaxNode::id).collect();
        assert_eq!(first.len(), 3);
        assert_eq!(first, second);
    }
}
