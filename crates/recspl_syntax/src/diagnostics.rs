//! Error types for the RecSPL frontend.
//!
//! Four failure families, each fatal to the pass that raises it:
//! - [`LexicalError`]: a word matched no token class. Raised before any parsing starts.
//! - [`SyntaxError`]: no grammar alternative accepts the input at some point, or input remains after a
//!   complete derivation of the start symbol.
//! - [`DocumentError`]: a saved token-stream document could not be read back.
//! - [`GrammarError`]: the grammar table itself is inconsistent (undefined nonterminal, FIRST sets that do
//!   not converge, malformed grammar text). Not expected with the built-in grammar.
//!
//! All of them implement [`miette::Diagnostic`] and carry a source span when one is known, so the CLI can
//! render them against the input file.

use std::fmt;

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use crate::lexer::{Span, Token};

// ============================================================================
// Lexical errors
// ============================================================================

/// A word that matches no token class.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("lexical error: unrecognized token `{word}`")]
#[diagnostic(
    code(recspl::lex::unrecognized_token),
    help("variables are `V_name`, functions `F_name`, text is `\"Capitalized\"` (2-8 letters), numbers are decimal")
)]
pub struct LexicalError {
    pub word: String,
    #[label("no token class matches this word")]
    pub span: Option<SourceSpan>,
}

impl LexicalError {
    pub fn new(word: impl Into<String>, span: Option<Span>) -> Self {
        Self {
            word: word.into(),
            span: span.map(Into::into),
        }
    }
}

// ============================================================================
// Document errors
// ============================================================================

/// An XML document (such as a saved token stream) that could not be read back.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("malformed document at byte {offset}: {message}")]
#[diagnostic(code(recspl::document::malformed))]
pub struct DocumentError {
    pub message: String,
    pub offset: usize,
    #[label("here")]
    pub span: SourceSpan,
}

impl DocumentError {
    pub fn new(message: impl Into<String>, offset: usize) -> Self {
        Self {
            message: message.into(),
            offset,
            span: SourceSpan::from((offset, 0)),
        }
    }
}

// ============================================================================
// Syntax errors
// ============================================================================

/// What went wrong at the reported position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxErrorKind {
    /// A token no alternative accepts.
    UnexpectedToken,
    /// The input ended while a derivation still needed tokens.
    UnexpectedEnd,
    /// The start symbol was fully derived but tokens remain.
    TrailingInput,
    /// Nonterminal nesting exceeded [`ParseConfig::max_depth`](crate::parser::ParseConfig::max_depth).
    NestingTooDeep,
}

impl fmt::Display for SyntaxErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SyntaxErrorKind::UnexpectedToken => "unexpected token",
            SyntaxErrorKind::UnexpectedEnd => "unexpected end of input",
            SyntaxErrorKind::TrailingInput => "unconsumed input after a complete program",
            SyntaxErrorKind::NestingTooDeep => "nesting exceeds the depth limit",
        };
        f.write_str(text)
    }
}

/// A fatal parse failure at a token-stream position.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("syntax error: {kind} {}", describe_site(.position, .token, .expected))]
#[diagnostic(code(recspl::parse::syntax_error))]
pub struct SyntaxError {
    pub kind: SyntaxErrorKind,
    /// 0-based index into the token stream.
    pub position: usize,
    /// Offending token; `None` at end of input.
    pub token: Option<Token>,
    /// Canonical terminals that would have been accepted at `position`.
    pub expected: Vec<String>,
    #[label("{kind}")]
    pub span: Option<SourceSpan>,
    #[help]
    pub help: Option<String>,
}

impl SyntaxError {
    pub fn new(kind: SyntaxErrorKind, position: usize, token: Option<Token>, expected: Vec<String>) -> Self {
        let span = token.as_ref().map(|t| t.span.into());
        Self {
            kind,
            position,
            token,
            expected,
            span,
            help: None,
        }
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Offending token's lexeme, if there is one.
    pub fn lexeme(&self) -> Option<&str> {
        self.token.as_ref().map(|t| t.lexeme.as_str())
    }
}

fn describe_site(position: &usize, token: &Option<Token>, expected: &[String]) -> String {
    let mut out = match token {
        Some(token) => format!("{token} at position {position}"),
        None => format!("at position {position}"),
    };
    if !expected.is_empty() {
        let list: Vec<String> = expected.iter().map(|e| format!("`{e}`")).collect();
        out.push_str(&format!("; expected {}", list.join(", ")));
    }
    out
}

// ============================================================================
// Grammar errors
// ============================================================================

/// Internal-consistency failures of a grammar table.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum GrammarError {
    #[error("grammar references undefined nonterminal `{name}` in rule `{rule}`")]
    #[diagnostic(code(recspl::grammar::undefined_nonterminal))]
    UndefinedNonterminal { name: String, rule: String },

    #[error("start symbol `{name}` is not a rule of the grammar")]
    #[diagnostic(code(recspl::grammar::unknown_start_symbol))]
    UnknownStartSymbol { name: String },

    #[error("FIRST sets did not reach a fixed point within {passes} passes")]
    #[diagnostic(code(recspl::grammar::first_sets_diverged))]
    FirstSetsDiverged { passes: usize },

    #[error("grammar has no rules")]
    #[diagnostic(code(recspl::grammar::empty))]
    EmptyGrammar,

    #[error("grammar text line {line}: {message}")]
    #[diagnostic(code(recspl::grammar::malformed))]
    Malformed { line: usize, message: String },
}

// ============================================================================
// Umbrella errors
// ============================================================================

/// Failure of [`crate::parser::Parser::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ParseError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(#[from] SyntaxError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Grammar(#[from] GrammarError),
}

impl ParseError {
    /// The syntax error, if this is one.
    pub fn as_syntax(&self) -> Option<&SyntaxError> {
        match self {
            ParseError::Syntax(e) => Some(e),
            ParseError::Grammar(_) => None,
        }
    }
}

/// Failure of the whole `lex → parse` pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum FrontendError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Lexical(#[from] LexicalError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(#[from] SyntaxError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Grammar(#[from] GrammarError),
}

impl From<ParseError> for FrontendError {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::Syntax(e) => FrontendError::Syntax(e),
            ParseError::Grammar(e) => FrontendError::Grammar(e),
        }
    }
}
