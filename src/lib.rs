#![forbid(unsafe_code)]
//! RecSPL compiler front end
//!
//! RecSPL is a small imperative teaching language. This crate ties together the token classifier, the
//! FIRST-set guided backtracking parser and the syntax tree serializers from `recspl_syntax`, and hosts the
//! `recspl` command-line tool.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **True invariants**: If a panic represents a front-end bug (logic error), use `.expect("INVARIANT: reason")`
//!   with a clear explanation.
//!
//! ## Examples
//!
//! ```rust
//! let tree = recspl::compile("main begin skip ; end").unwrap();
//! assert_eq!(tree.root().symbol, "PROG");
//! assert!(tree.to_xml().starts_with("<SYNTREE>"));
//! ```

pub mod cli;

/// The syntax front end, re-exported from `recspl_syntax`.
pub mod frontend {
    pub use recspl_syntax::{diagnostics, first, grammar, lexer, parser, tree};
}

pub use frontend::diagnostics;
pub use frontend::first;
pub use frontend::grammar;
pub use frontend::lexer;
pub use frontend::parser;
pub use frontend::tree;

/// Language vocabulary (reserved words, terminal classes), re-exported from `recspl_core`.
pub use recspl_core::lang;

pub use recspl_syntax::compile;
pub use recspl_syntax::{FrontendError, GrammarError, LexicalError, ParseError, SyntaxError, SyntaxErrorKind};
pub use recspl_syntax::{ParseConfig, SyntaxTree};
