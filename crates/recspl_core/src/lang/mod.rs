//! RecSPL language vocabulary registries.
//!
//! Callers work with **stable IDs** (`ReservedId`, `TerminalClass`) and look up spellings/metadata via
//! registry tables, instead of scattering string comparisons across the lexer and parser.
//!
//! ## Notes
//! - Registries are intentionally **pure**: no token types, no IO, no side effects.
//! - The grammar table still compares literal terminals by spelling; the registry is what decides which
//!   spellings can ever reach it as `Reserved` tokens.
//!
//! ## Examples
//! ```rust
//! use recspl_core::lang::reserved::{self, ReservedId};
//!
//! assert_eq!(reserved::from_str("begin"), Some(ReservedId::Begin));
//! assert_eq!(reserved::as_str(ReservedId::Semicolon), ";");
//! ```

pub mod registry;
pub mod reserved;
pub mod terminals;
