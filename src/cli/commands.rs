//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.
//!
//! Rendering is kept apart from I/O: the `render_*` functions turn a source string into the text a command prints.

use std::fmt::Write as _;
use std::fs;

use olus_syntax::lexer::{self, Token};
use olus_syntax::query::Pattern;
use olus_syntax::tree::{SyntaxElement, SyntaxNode, Tree};
use olus_syntax::{Diagnostic, Parse, ParseConfig};
use serde_json::{Value, json};

use super::{CliError, CliResult, ExitCode};

/// Maximum source file size (100 MB)
///
/// Files larger than this are rejected to prevent out-of-memory conditions
/// during parsing.
const MAX_SOURCE_SIZE: u64 = 100 * 1024 * 1024;

/// Read a source file, rejecting files over [`MAX_SOURCE_SIZE`].
pub fn read_source(file_path: &str) -> CliResult<String> {
    // Check file size before reading
    let metadata =
        fs::metadata(file_path).map_err(|e| CliError::failure(format!("Cannot access file '{}': {}", file_path, e)))?;

    if metadata.len() > MAX_SOURCE_SIZE {
        return Err(CliError::failure(format!(
            "Source file '{}' is too large ({} bytes, max {} bytes)",
            file_path,
            metadata.len(),
            MAX_SOURCE_SIZE
        )));
    }

    fs::read_to_string(file_path).map_err(|e| CliError::failure(format!("Error reading file '{}': {}", file_path, e)))
}

fn parse_source(source: &str, config: &ParseConfig) -> CliResult<Parse> {
    olus_syntax::parse_with_config(source, config).map_err(|e| CliError::failure(format!("Error: {}", e)))
}

/// Print diagnostics as rendered reports on stderr and pick the exit code.
fn report(file_path: &str, source: &str, diagnostics: &[Diagnostic]) -> ExitCode {
    for diagnostic in diagnostics {
        eprintln!("{:?}", diagnostic.to_report(file_path, source));
    }
    if diagnostics.iter().any(Diagnostic::is_error) {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

// ============================================================================
// Commands
// ============================================================================

/// Tokenize and display tokens.
pub fn lex_file(file_path: &str, config: &ParseConfig) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    let lexed = lexer::lex_with_config(&source, config);
    print!("{}", render_tokens(&source, &lexed.tokens));
    Ok(report(file_path, &source, &lexed.diagnostics))
}

/// Parse and display the syntax tree.
pub fn parse_file(file_path: &str, config: &ParseConfig, json: bool) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    let parse = parse_source(&source, config)?;

    if json {
        let value = parse_to_json(&parse);
        let text = serde_json::to_string_pretty(&value)
            .map_err(|e| CliError::failure(format!("Error serializing tree: {}", e)))?;
        println!("{}", text);
        return Ok(if parse.has_errors() {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        });
    }

    print!("{}", parse.tree.dump());
    Ok(report(file_path, &source, &parse.diagnostics))
}

/// Check a file for syntax errors.
pub fn check_file(file_path: &str, config: &ParseConfig) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    let parse = parse_source(&source, config)?;
    let exit_code = report(file_path, &source, &parse.diagnostics);
    if exit_code == ExitCode::SUCCESS {
        println!("✓ No syntax errors");
    }
    Ok(exit_code)
}

/// Print the nodes matching a query pattern.
pub fn query_file(file_path: &str, pattern: &str, config: &ParseConfig) -> CliResult<ExitCode> {
    let pattern: Pattern = pattern
        .parse()
        .map_err(|e| CliError::failure(format!("Error: {}", e)))?;
    let source = read_source(file_path)?;
    let parse = parse_source(&source, config)?;
    print!("{}", render_matches(&parse.tree, &pattern));
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// Rendering
// ============================================================================

/// One token per line: kind, byte span, start location and text.
pub fn render_tokens(source: &str, tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        let _ = writeln!(
            out,
            "{:?}@{} {} {:?}",
            token.kind,
            token.span,
            token.start,
            token.text(source)
        );
    }
    out
}

/// One match per line: location, kind and text.
pub fn render_matches(tree: &Tree, pattern: &Pattern) -> String {
    let mut out = String::new();
    for node in tree.select(pattern) {
        let _ = writeln!(
            out,
            "{} {} {:?}",
            tree.location(node.span().start),
            node.kind(),
            tree.node_text(node)
        );
    }
    out
}

/// The tree and its diagnostics as a JSON document.
pub fn parse_to_json(parse: &Parse) -> Value {
    let diagnostics: Vec<Value> = parse
        .diagnostics
        .iter()
        .map(|diagnostic| {
            json!({
                "severity": diagnostic.severity.to_string(),
                "code": diagnostic.kind.code(),
                "message": diagnostic.message,
                "span": [diagnostic.span.start, diagnostic.span.end],
                "location": parse.tree.location(diagnostic.span.start).to_string(),
            })
        })
        .collect();
    json!({
        "tree": node_to_json(&parse.tree, parse.tree.root()),
        "diagnostics": diagnostics,
    })
}

fn node_to_json(tree: &Tree, node: &SyntaxNode) -> Value {
    let children: Vec<Value> = node
        .children()
        .iter()
        .map(|child| {
            let mut value = match &child.element {
                SyntaxElement::Node(inner) => node_to_json(tree, inner),
                SyntaxElement::Token(token) => json!({
                    "token": format!("{:?}", token.kind),
                    "span": [token.span.start, token.span.end],
                    "text": tree.text(token.span),
                }),
                SyntaxElement::Missing(missing) => json!({
                    "missing": format!("{:?}", missing.kind),
                    "offset": missing.offset,
                }),
            };
            if let (Some(field), Value::Object(map)) = (child.field, &mut value) {
                map.insert("field".to_string(), Value::String(field.to_string()));
            }
            value
        })
        .collect();
    json!({
        "kind": node.kind().name(),
        "span": [node.span().start, node.span().end],
        "children": children,
    })
}
