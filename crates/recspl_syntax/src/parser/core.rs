// Parser core types and entrypoints.
//
// This chunk defines [`ParseConfig`], [`ParseOutcome`] and the [`Parser`] type with its top-level
// `parse()`/`parse_prefix()` entrypoints.
//
// ## Notes
// - This file is `include!`'d into `crate::parser` to keep all parser methods in a
//   single module while avoiding a single “god file”.

/// Default limit on nested nonterminal expansions.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Per-parse settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseConfig {
    /// Nonterminal to derive; `None` means the grammar's first rule.
    pub start_symbol: Option<String>,
    /// Maximum nesting of nonterminal expansions before the parse fails with
    /// [`SyntaxErrorKind::NestingTooDeep`]. Bounds native stack usage.
    ///
    /// A production's final nonterminal does not count: it is derived in a loop at its parent's level.
    /// Right-recursive lists (statements, declarations, functions) can therefore be any length, and the
    /// limit tracks how deeply the program nests, e.g. a branch inside a loop inside a function.
    pub max_depth: usize,
    /// Whether tokens left over after a complete derivation are an error.
    pub require_full_input: bool,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            start_symbol: None,
            max_depth: DEFAULT_MAX_DEPTH,
            require_full_input: true,
        }
    }
}

impl ParseConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_start_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.start_symbol = Some(symbol.into());
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Stop after the start symbol is derived, leaving trailing tokens unconsumed.
    pub fn allow_trailing_input(mut self) -> Self {
        self.require_full_input = false;
        self
    }
}

/// A successful derivation of the start symbol over a prefix of the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOutcome {
    pub tree: SyntaxTree,
    /// Number of tokens the derivation consumed.
    pub consumed: usize,
}

/// Parser state for one token stream.
///
/// ## Notes
/// - Grammar and FIRST sets are borrowed read-only; everything mutable (cursor, node arena, failure
///   bookkeeping, depth) belongs to this value, so independent parses never share state.
/// - Failure is fatal: there is no error recovery after the start symbol fails.
pub struct Parser<'a> {
    grammar: &'a Grammar,
    firsts: &'a FirstSets,
    tokens: &'a [Token],
    /// Canonical grammar terminal of every token, precomputed once.
    lookahead: Vec<Terminal>,
    config: ParseConfig,
    pos: usize,
    depth: usize,
    builder: TreeBuilder,
    furthest: Furthest,
}

impl<'a> Parser<'a> {
    /// Create a parser for `tokens`.
    ///
    /// ## Parameters
    /// - `grammar`: rule table to interpret.
    /// - `firsts`: FIRST sets computed from that same grammar.
    /// - `tokens`: token stream produced by `recspl_syntax::lexer`.
    pub fn new(grammar: &'a Grammar, firsts: &'a FirstSets, tokens: &'a [Token], config: ParseConfig) -> Self {
        Self {
            grammar,
            firsts,
            tokens,
            lookahead: tokens.iter().map(Token::terminal).collect(),
            config,
            pos: 0,
            depth: 0,
            builder: TreeBuilder::default(),
            furthest: Furthest::default(),
        }
    }

    /// Derive the start symbol from the whole token stream.
    ///
    /// ## Errors
    /// - [`ParseError::Syntax`] if no derivation exists, or one exists but tokens remain after it and
    ///   [`ParseConfig::require_full_input`] is set.
    /// - [`ParseError::Grammar`] if the start symbol or a referenced nonterminal is not a rule.
    pub fn parse(mut self) -> Result<SyntaxTree, ParseError> {
        let root = self.derive_start()?;
        if self.config.require_full_input && self.pos < self.tokens.len() {
            return Err(self.trailing_input_error().into());
        }
        Ok(self.builder.finish(root))
    }

    /// Derive the start symbol from a prefix of the token stream, never failing on leftover tokens.
    pub fn parse_prefix(mut self) -> Result<ParseOutcome, ParseError> {
        let root = self.derive_start()?;
        let consumed = self.pos;
        Ok(ParseOutcome {
            tree: self.builder.finish(root),
            consumed,
        })
    }

    fn derive_start(&mut self) -> Result<NodeId, ParseError> {
        let start = match &self.config.start_symbol {
            Some(name) => name.clone(),
            None => self.grammar.start().to_string(),
        };
        if !self.grammar.contains(&start) {
            return Err(GrammarError::UnknownStartSymbol { name: start }.into());
        }

        tracing::debug!(start = %start, tokens = self.tokens.len(), "parsing");
        match self.attempt(&Symbol::Nonterminal(start), None)? {
            Some(root) => Ok(root),
            None => Err(self.failure_error().into()),
        }
    }
}
