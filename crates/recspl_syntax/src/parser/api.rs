// Public entrypoints.

/// Built-in grammar and its FIRST sets, built on first use and shared by every parse.
static RECSPL_TABLES: Lazy<(Grammar, FirstSets)> = Lazy::new(|| {
    let grammar = Grammar::recspl();
    let firsts =
        FirstSets::compute(&grammar).expect("INVARIANT: FIRST sets of the built-in RecSPL grammar converge");
    (grammar, firsts)
});

/// The shared RecSPL grammar and FIRST sets.
pub fn recspl_tables() -> (&'static Grammar, &'static FirstSets) {
    let (grammar, firsts) = &*RECSPL_TABLES;
    (grammar, firsts)
}

/// Parse a token stream as a RecSPL program.
///
/// This is the main public entrypoint for parsing.
///
/// ## Parameters
/// - `tokens`: Token stream produced by `recspl_syntax::lexer`.
///
/// ## Errors
/// Returns a [`ParseError`] if the tokens do not form a complete program.
#[tracing::instrument(skip_all, fields(token_count = tokens.len()))]
pub fn parse(tokens: &[Token]) -> Result<SyntaxTree, ParseError> {
    let (grammar, firsts) = recspl_tables();
    Parser::new(grammar, firsts, tokens, ParseConfig::default()).parse()
}

/// Parse a token stream against an arbitrary grammar.
#[tracing::instrument(skip_all, fields(token_count = tokens.len(), rules = grammar.len()))]
pub fn parse_with(
    grammar: &Grammar,
    firsts: &FirstSets,
    tokens: &[Token],
    config: ParseConfig,
) -> Result<SyntaxTree, ParseError> {
    Parser::new(grammar, firsts, tokens, config).parse()
}
