//! Abstract terminal classes.
//!
//! Grammar rules never mention a concrete variable name, function name or literal. They refer to one of
//! these classes instead, and the parser maps every non-reserved token onto its class before comparing.
//!
//! ## Examples
//! ```rust
//! use recspl_core::lang::terminals::{self, TerminalClass};
//!
//! assert_eq!(terminals::from_str("VNAME"), Some(TerminalClass::Vname));
//! assert_eq!(TerminalClass::Const.as_str(), "CONST");
//! ```

use std::fmt;

/// A terminal that stands for a whole class of tokens rather than one spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TerminalClass {
    /// Any `V_...` variable token.
    Vname,
    /// Any `F_...` function token.
    Fname,
    /// Any number or quoted text literal.
    Const,
}

/// All terminal classes, in canonical order.
pub const TERMINAL_CLASSES: &[TerminalClass] = &[TerminalClass::Vname, TerminalClass::Fname, TerminalClass::Const];

impl TerminalClass {
    /// Canonical spelling as used in grammar rules.
    pub const fn as_str(self) -> &'static str {
        match self {
            TerminalClass::Vname => "VNAME",
            TerminalClass::Fname => "FNAME",
            TerminalClass::Const => "CONST",
        }
    }
}

impl fmt::Display for TerminalClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve a grammar spelling to a terminal class.
pub fn from_str(s: &str) -> Option<TerminalClass> {
    TERMINAL_CLASSES.iter().copied().find(|c| c.as_str() == s)
}
