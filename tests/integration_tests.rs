//! Integration tests for the Oluś syntax frontend

use std::fs;
use std::path::Path;

use olus::tree::{Field, Location, NodeKind, SyntaxNode};
use olus::{DiagnosticKind, Parse, ParseConfig, parse, parse_with_config};

/// Helper to parse every `.olus` fixture in a directory.
fn fixtures(dir: &str) -> Vec<(String, String)> {
    let fixtures_dir = Path::new(dir);
    if !fixtures_dir.exists() {
        return Vec::new(); // Skip if fixtures not present
    }

    let mut sources = Vec::new();
    for entry in fs::read_dir(fixtures_dir).unwrap() {
        let path = entry.unwrap().path();
        if path.extension().map(|e| e == "olus").unwrap_or(false) {
            let source = fs::read_to_string(&path).unwrap();
            sources.push((path.display().to_string(), source));
        }
    }
    sources
}

fn body_of(parse: &Parse, statement: usize) -> &SyntaxNode {
    parse
        .tree
        .root()
        .child_nodes()
        .nth(statement)
        .and_then(|s| s.child_nodes().next())
        .expect("statement with a body")
}

/// Test that all valid fixtures parse cleanly in both dialects
#[test]
fn test_valid_fixtures() {
    for (path, source) in fixtures("tests/fixtures/valid") {
        for config in [ParseConfig::default(), ParseConfig::flat()] {
            let parse = parse_with_config(&source, &config).unwrap();
            assert!(
                parse.diagnostics.is_empty(),
                "Expected {} to parse cleanly (indentation: {}), got: {:?}",
                path,
                config.with_indentation,
                parse.diagnostics
            );
        }
    }
}

/// Test that invalid fixtures produce errors but still yield a tree
#[test]
fn test_invalid_fixtures() {
    for (path, source) in fixtures("tests/fixtures/invalid") {
        let parse = parse(&source).unwrap();
        assert!(parse.has_errors(), "Expected {} to report an error", path);
        assert!(parse.tree.root().has_errors(), "Expected {} to contain an error-marked node", path);
    }
}

#[test]
fn test_call_versus_procedure() {
    let parse = parse("foo bar\nfoo bar:\nfoo bar: baz\n").unwrap();
    assert!(parse.diagnostics.is_empty());

    let call = body_of(&parse, 0);
    assert_eq!(call.kind(), NodeKind::Call);
    assert_eq!(call.child_nodes().count(), 2);

    let header = body_of(&parse, 1);
    assert_eq!(header.kind(), NodeKind::Procedure);
    assert_eq!(header.head().count(), 2);
    assert!(header.body().is_none());

    let inline = body_of(&parse, 2);
    assert_eq!(inline.kind(), NodeKind::Procedure);
    assert_eq!(inline.head().count(), 2);
    let body = inline.body().unwrap();
    assert_eq!(body.kind(), NodeKind::Call);
    assert_eq!(parse.tree.node_text(body), "baz");
}

#[test]
fn test_nested_string_tree() {
    let parse = parse("“a“b”c”\n").unwrap();
    insta::assert_snapshot!(parse.tree.dump(), @r#"
    source_file@0..16
      statement@0..16
        call@0..15
          string@0..15
            open: StringOpen@0..3 "“"
            StringContent@3..4 "a"
            string@4..11
              open: StringOpen@4..7 "“"
              StringContent@7..8 "b"
              close: StringClose@8..11 "”"
            StringContent@11..12 "c"
            close: StringClose@12..15 "”"
        Newline@15..16 "\n"
    "#);
}

#[test]
fn test_unmatched_paren_tree() {
    let parse = parse("f (a").unwrap();
    assert_eq!(parse.diagnostics.len(), 1);
    assert_eq!(parse.diagnostics[0].kind, DiagnosticKind::UnexpectedToken);
    insta::assert_snapshot!(parse.tree.dump(), @r#"
    source_file@0..4
      statement@0..4
        call@0..4
          identifier@0..1
            Identifier@0..1 "f"
          group@2..4
            open: ParenOpen@2..3 "("
            body: call@3..4
              identifier@3..4
                Identifier@3..4 "a"
            close: MISSING ParenClose@4
        Newline@4..4 ""
    "#);
}

#[test]
fn test_inconsistent_dedent_tree() {
    let parse = parse("a:\n    b\n  c\n").unwrap();
    assert_eq!(parse.diagnostics.len(), 1);
    assert_eq!(parse.diagnostics[0].kind, DiagnosticKind::IndentationError);
    assert_eq!(
        parse.diagnostics[0].message,
        "Inconsistent indentation: expected 0 columns, got 2"
    );
    insta::assert_snapshot!(parse.tree.dump(), @r#"
    source_file@0..13
      statement@0..13
        procedure@0..13
          head: identifier@0..1
            Identifier@0..1 "a"
          Colon@1..2 ":"
          body: block@2..13
            Newline@2..3 "\n"
            Indent@3..7 "    "
            statement@7..9
              call@7..8
                identifier@7..8
                  Identifier@7..8 "b"
              Newline@8..9 "\n"
            statement@9..13
              call@9..12
                error@9..11
                  ErrorSentinel@9..11 "  "
                identifier@11..12
                  Identifier@11..12 "c"
              Newline@12..13 "\n"
            Dedent@13..13 ""
    "#);
}

#[test]
fn test_parent_index_and_locations() {
    let source = "outer:\n  inner (x: y)\n";
    let parse = parse(source).unwrap();
    let parents = parse.tree.parents();

    let x = parse
        .tree
        .preorder()
        .find(|node| node.kind() == NodeKind::Identifier && parse.tree.node_text(node) == "x")
        .unwrap();
    let ancestors: Vec<NodeKind> = parents.ancestors(x.id()).map(SyntaxNode::kind).collect();
    assert_eq!(
        ancestors,
        vec![
            NodeKind::Procedure,
            NodeKind::Group,
            NodeKind::Call,
            NodeKind::Statement,
            NodeKind::Block,
            NodeKind::Procedure,
            NodeKind::Statement,
            NodeKind::SourceFile,
        ]
    );

    let (start, end) = parse.tree.line_range(x.span());
    assert_eq!(start, Location::new(2, 10));
    assert_eq!(end, Location::new(2, 11));
}

#[test]
fn test_walk_reports_fields() {
    let parse = parse("f x: g\n").unwrap();
    let fields: Vec<(NodeKind, Option<Field>)> = parse
        .tree
        .walk()
        .filter(|visit| visit.parent.map(SyntaxNode::kind) == Some(NodeKind::Procedure))
        .map(|visit| (visit.node.kind(), visit.field))
        .collect();
    assert_eq!(
        fields,
        vec![
            (NodeKind::Identifier, Some(Field::Head)),
            (NodeKind::Identifier, Some(Field::Head)),
            (NodeKind::Call, Some(Field::Body)),
        ]
    );
}

#[test]
fn test_query_over_fixture() {
    let source = fs::read_to_string("tests/fixtures/valid/factorial.olus").unwrap();
    let parse = parse(&source).unwrap();
    let pattern = "group.body:procedure".parse().unwrap();
    let heads: Vec<Vec<&str>> = parse
        .tree
        .select(&pattern)
        .map(|procedure| procedure.head().map(|n| parse.tree.node_text(n)).collect())
        .collect();
    assert_eq!(heads, vec![vec![], vec![], vec!["m"], vec!["f"], vec!["r"]]);
}

#[test]
fn test_rendered_report_mentions_message() {
    let source = "print “oops\n";
    let parse = parse(source).unwrap();
    let report = parse.diagnostics[0].to_report("oops.olus", source);
    let rendered = format!("{:?}", report);
    assert!(rendered.contains("Unterminated string"), "got: {}", rendered);
}
