//! Define the reserved-word vocabulary for RecSPL.
//!
//! This module is the single source of truth for reserved spellings: a stable identifier
//! ([`ReservedId`]) plus a const metadata table ([`RESERVED`]) that records canonical spellings,
//! categories and provenance.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**. RecSPL has no aliases.
//! - Punctuation (`(`, `,`, `;`, ...) is reserved too: the classifier treats it exactly like a keyword,
//!   and the grammar matches it by exact spelling.
//!
//! ## Examples
//! ```rust
//! use recspl_core::lang::reserved::{self, ReservedId};
//!
//! assert_eq!(reserved::from_str("skip"), Some(ReservedId::Skip));
//! assert_eq!(reserved::from_str("Skip"), None);
//! assert_eq!(reserved::as_str(ReservedId::LParen), "(");
//! ```

use super::registry::{Since, Stability};

/// Stable identifier for every reserved spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ReservedId {
    // Program structure
    Main,
    Begin,
    End,
    If,
    Then,
    Else,
    Call,
    Return,
    LBrace,
    RBrace,

    // Commands
    Halt,
    Print,
    Skip,
    Input,
    Output,

    // Types
    Num,
    Text,
    Void,

    // Operators
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    Grt,
    And,
    Or,
    Not,
    Sqrt,

    // Punctuation
    Assign,
    Less,
    LParen,
    RParen,
    Comma,
    Semicolon,
}

/// High-level grouping for documentation and tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReservedCategory {
    Structure,
    Command,
    Type,
    Operator,
    Punctuation,
}

/// Metadata for a reserved spelling.
#[derive(Debug, Clone, Copy)]
pub struct ReservedInfo {
    pub id: ReservedId,
    pub canonical: &'static str,
    pub category: ReservedCategory,
    pub since: Since,
    pub stability: Stability,
}

/// Registry of all reserved spellings.
///
/// ## Notes
/// - The ordering is not semantically meaningful, but is grouped for readability.
pub const RESERVED: &[ReservedInfo] = &[
    // Program structure
    info(ReservedId::Main, "main", ReservedCategory::Structure),
    info(ReservedId::Begin, "begin", ReservedCategory::Structure),
    info(ReservedId::End, "end", ReservedCategory::Structure),
    info(ReservedId::If, "if", ReservedCategory::Structure),
    info(ReservedId::Then, "then", ReservedCategory::Structure),
    info(ReservedId::Else, "else", ReservedCategory::Structure),
    unused(ReservedId::Call, "call", ReservedCategory::Structure),
    info(ReservedId::Return, "return", ReservedCategory::Structure),
    info(ReservedId::LBrace, "{", ReservedCategory::Structure),
    info(ReservedId::RBrace, "}", ReservedCategory::Structure),
    // Commands
    info(ReservedId::Halt, "halt", ReservedCategory::Command),
    info(ReservedId::Print, "print", ReservedCategory::Command),
    info(ReservedId::Skip, "skip", ReservedCategory::Command),
    info(ReservedId::Input, "input", ReservedCategory::Command),
    unused(ReservedId::Output, "output", ReservedCategory::Command),
    // Types
    info(ReservedId::Num, "num", ReservedCategory::Type),
    info(ReservedId::Text, "text", ReservedCategory::Type),
    info(ReservedId::Void, "void", ReservedCategory::Type),
    // Operators
    info(ReservedId::Add, "add", ReservedCategory::Operator),
    info(ReservedId::Sub, "sub", ReservedCategory::Operator),
    info(ReservedId::Mul, "mul", ReservedCategory::Operator),
    info(ReservedId::Div, "div", ReservedCategory::Operator),
    info(ReservedId::Eq, "eq", ReservedCategory::Operator),
    info(ReservedId::Grt, "grt", ReservedCategory::Operator),
    info(ReservedId::And, "and", ReservedCategory::Operator),
    info(ReservedId::Or, "or", ReservedCategory::Operator),
    info(ReservedId::Not, "not", ReservedCategory::Operator),
    info(ReservedId::Sqrt, "sqrt", ReservedCategory::Operator),
    // Punctuation
    info(ReservedId::Assign, "=", ReservedCategory::Punctuation),
    info(ReservedId::Less, "<", ReservedCategory::Punctuation),
    info(ReservedId::LParen, "(", ReservedCategory::Punctuation),
    info(ReservedId::RParen, ")", ReservedCategory::Punctuation),
    info(ReservedId::Comma, ",", ReservedCategory::Punctuation),
    info(ReservedId::Semicolon, ";", ReservedCategory::Punctuation),
];

/// Return the canonical spelling for a reserved id.
pub fn as_str(id: ReservedId) -> &'static str {
    info_for(id).canonical
}

/// Return the category of a reserved id.
pub fn category(id: ReservedId) -> ReservedCategory {
    info_for(id).category
}

/// Return the full registry entry for a reserved id.
///
/// ## Panics
/// - Never in practice: every [`ReservedId`] has an entry, which the guardrail tests enforce.
pub fn info_for(id: ReservedId) -> &'static ReservedInfo {
    RESERVED
        .iter()
        .find(|r| r.id == id)
        .expect("INVARIANT: every ReservedId has a RESERVED entry")
}

/// Resolve a spelling to its reserved id (case-sensitive).
pub fn from_str(s: &str) -> Option<ReservedId> {
    RESERVED.iter().find(|r| r.canonical == s).map(|r| r.id)
}

/// Return `true` if `s` is a reserved spelling.
pub fn is_reserved(s: &str) -> bool {
    from_str(s).is_some()
}

// --- helpers -----------------------------------------------------------------

const fn info(id: ReservedId, canonical: &'static str, category: ReservedCategory) -> ReservedInfo {
    ReservedInfo {
        id,
        canonical,
        category,
        since: Since(1, 0),
        stability: Stability::Stable,
    }
}

const fn unused(id: ReservedId, canonical: &'static str, category: ReservedCategory) -> ReservedInfo {
    ReservedInfo {
        stability: Stability::Unused,
        ..info(id, canonical, category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert_eq!(from_str("main"), Some(ReservedId::Main));
        assert_eq!(from_str("MAIN"), None);
        assert_eq!(from_str("Main"), None);
    }

    #[test]
    fn test_punctuation_is_reserved() {
        for p in ["=", "<", "(", ")", "{", "}", ",", ";"] {
            assert!(is_reserved(p), "{p:?} should be reserved");
        }
        assert!(!is_reserved(">"));
    }

    #[test]
    fn test_unused_entries_are_marked() {
        assert_eq!(info_for(ReservedId::Output).stability, Stability::Unused);
        assert_eq!(info_for(ReservedId::Return).stability, Stability::Stable);
        assert_eq!(category(ReservedId::Grt), ReservedCategory::Operator);
    }
}
