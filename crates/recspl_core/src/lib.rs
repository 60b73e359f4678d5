//! Canonical language vocabulary for the RecSPL front end.
//!
//! This crate is intentionally small and dependency-free. It is the single source of truth for the
//! spellings the token classifier recognises as reserved, and for the abstract terminal classes the
//! grammar refers to instead of concrete identifiers and literals.
//!
//! ## Notes
//!
//! - This is a “vocabulary” crate: **no IO**, no global state, and no parser types.
//! - The lexer/parser own syntax; this crate only answers “is this spelling reserved?” and “what is the
//!   canonical name of this terminal class?”.

pub mod lang;

pub use lang::reserved::{self, ReservedCategory, ReservedId};
pub use lang::terminals::{self, TerminalClass};
