//! Shareable metadata for `recspl_core::lang` registries.
//!
//! ## Notes
//! - These types are `Copy` so registries can live in `const` tables.
//! - Metadata is meant for tooling/docs/diagnostics; enforcement of syntax rules lives in the
//!   lexer/parser.

/// Describe the lifecycle status of a vocabulary item.
///
/// ## Examples
/// ```rust
/// use recspl_core::lang::registry::Stability;
///
/// let s = Stability::Stable;
/// assert_eq!(format!("{s:?}"), "Stable");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stability {
    /// Part of the teaching language as published.
    Stable,
    /// Reserved by the classifier but not produced by any grammar rule yet.
    Unused,
}

/// Identify the language version a vocabulary item is available since.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Since(pub u16, pub u16);

impl std::fmt::Display for Since {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.0, self.1)
    }
}
