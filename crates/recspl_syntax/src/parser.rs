//! Backtracking recursive-descent parser driven by a [`Grammar`] table.
//!
//! The engine never hard-codes a rule. For a nonterminal it tries the declared alternatives in order,
//! skips those whose first symbol cannot start with the current token (using [`FirstSets`]), and on a
//! mismatch restores the token cursor and the node arena to the checkpoint taken before the alternative.
//! The first alternative that matches completely wins; alternatives are never revisited once a
//! nonterminal has succeeded.
//!
//! ## Examples
//!
//! ```rust
//! use recspl_syntax::{lexer, parser};
//!
//! let tokens = lexer::lex("main begin halt ; end").unwrap();
//! let tree = parser::parse(&tokens).unwrap();
//! assert_eq!(tree.frontier(tree.root_id()), vec!["main", "begin", "halt", ";", "end"]);
//! ```

use std::collections::BTreeSet;

use once_cell::sync::Lazy;

use crate::diagnostics::{GrammarError, ParseError, SyntaxError, SyntaxErrorKind};
use crate::first::{FirstItem, FirstSets};
use crate::grammar::{Grammar, Production, Symbol, Terminal};
use crate::lexer::Token;
use crate::tree::{Node, NodeId, NodeKind, SyntaxTree};

// NOTE: This module is split across multiple files using `include!` to keep all parser
// methods in the same Rust module (preserving privacy + call patterns) while avoiding
// a single large source file.

include!("parser/core.rs");
include!("parser/builder.rs");
include!("parser/helpers.rs");
include!("parser/engine.rs");
include!("parser/api.rs");
include!("parser/tests.rs");
