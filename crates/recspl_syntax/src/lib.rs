//! Syntax frontend for RecSPL: token classifier, grammar table, FIRST sets, parser, syntax tree.
//!
//! The pipeline is `lex → parse → serialize`:
//! - [`lexer`] turns whitespace-delimited words into classified [`lexer::Token`]s.
//! - [`grammar`] holds the declarative rule table the parser interprets.
//! - [`first`] computes FIRST sets once per grammar; the parser uses them to prune alternatives.
//! - [`parser`] is a backtracking recursive-descent engine driven by the grammar table.
//! - [`tree`] is the identified syntax tree plus its XML/JSON document forms.
//!
//! ## Notes
//! - This crate is “syntax-only”: no file IO and no process concerns. The CLI owns those.
//! - [`grammar::Grammar`] and [`first::FirstSets`] are read-only after construction and can be shared by
//!   any number of concurrent parses. All other state is local to one [`parser::Parser`].
//!
//! ## Examples
//! ```rust
//! use recspl_syntax::{lexer, parser};
//!
//! let tokens = lexer::lex("main begin skip ; end").unwrap();
//! let tree = parser::parse(&tokens).unwrap();
//! assert_eq!(tree.root().symbol, "PROG");
//! assert_eq!(tree.children(tree.root_id()).len(), 4);
//! ```

pub mod diagnostics;
pub mod first;
pub mod grammar;
pub mod lexer;
pub mod parser;
pub mod token_helpers;
pub mod tree;
mod xml;

pub use diagnostics::{
    DocumentError, FrontendError, GrammarError, LexicalError, ParseError, SyntaxError, SyntaxErrorKind,
};
pub use first::{FirstItem, FirstSets};
pub use grammar::{Grammar, Production, Symbol, Terminal};
pub use lexer::{Span, Token, TokenClass};
pub use parser::{ParseConfig, ParseOutcome, Parser};
pub use tree::{Node, NodeId, NodeKind, SyntaxTree};

/// Classify and parse `source` against the built-in RecSPL grammar.
///
/// ## Errors
/// - [`FrontendError::Lexical`] if a word matches no token class (nothing is parsed).
/// - [`FrontendError::Syntax`] if the token stream is not a RecSPL program.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn compile(source: &str) -> Result<SyntaxTree, FrontendError> {
    let tokens = lexer::lex(source)?;
    Ok(parser::parse(&tokens)?)
}
