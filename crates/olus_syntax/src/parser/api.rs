/// Parse source text into a [`Parse`] with the default configuration.
///
/// This is the main public entrypoint for parsing: it runs the lexer and the parser and merges their diagnostics.
///
/// ## Errors
/// Returns [`ParseError`] only when a configured resource bound is exceeded. Malformed input still yields a tree.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn parse(source: &str) -> Result<Parse, ParseError> {
    parse_with_config(source, &ParseConfig::default())
}

/// Parse source text with an explicit configuration.
///
/// ## Errors
/// Returns [`ParseError::ResourceExceeded`] if the tree would exceed `config.max_nodes` or `config.max_depth`.
#[tracing::instrument(skip_all, fields(source_len = source.len(), with_indentation = config.with_indentation))]
pub fn parse_with_config(source: &str, config: &ParseConfig) -> Result<Parse, ParseError> {
    let Lexed { tokens, mut diagnostics } = Lexer::with_config(source, config).tokenize();
    let (root, parse_diagnostics) = Parser::new(&tokens, config).parse()?;

    diagnostics.extend(parse_diagnostics);
    diagnostics.sort_by_key(|diagnostic| diagnostic.span.start);

    let tree = Tree::new(source, root);
    tracing::debug!(
        tokens = tokens.len(),
        nodes = tree.node_count(),
        diagnostics = diagnostics.len(),
        "parsed source"
    );
    Ok(Parse { tree, diagnostics })
}
