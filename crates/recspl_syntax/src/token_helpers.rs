//! Small helper APIs for mapping a [`Token`] onto grammar terminals.
//!
//! A reserved token is its own terminal (matched by spelling). Every other token stands for its abstract
//! class: variables are `VNAME`, functions `FNAME`, numbers and text `CONST`.

use recspl_core::lang::terminals::TerminalClass;

use crate::grammar::Terminal;
use crate::lexer::{Token, TokenClass};

impl TokenClass {
    /// Abstract terminal class for non-reserved tokens.
    pub fn terminal_class(self) -> Option<TerminalClass> {
        match self {
            TokenClass::Variable => Some(TerminalClass::Vname),
            TokenClass::Function => Some(TerminalClass::Fname),
            TokenClass::Number | TokenClass::Text => Some(TerminalClass::Const),
            TokenClass::Reserved => None,
        }
    }
}

impl Token {
    /// Canonical grammar terminal for this token.
    pub fn terminal(&self) -> Terminal {
        match self.class.terminal_class() {
            Some(class) => Terminal::Class(class),
            None => Terminal::Literal(self.lexeme.clone()),
        }
    }

    /// Return `true` if this token is an instance of `terminal`, without allocating.
    pub fn matches(&self, terminal: &Terminal) -> bool {
        match (terminal, self.class.terminal_class()) {
            (Terminal::Class(want), Some(have)) => *want == have,
            (Terminal::Literal(spelling), None) => *spelling == self.lexeme,
            _ => false,
        }
    }
}
