//! Token types for the RecSPL classifier.
//!
//! ## Notes
//! - Tokens are immutable once produced. The parser only ever holds a read-only cursor into a slice of
//!   them, and token order is the derivation order.
//! - `span` is optional metadata for diagnostics. Token streams loaded from JSON may omit it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Byte-offset span into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(self) -> bool {
        self.len() == 0
    }
}

impl From<Span> for miette::SourceSpan {
    fn from(span: Span) -> Self {
        (span.start, span.len()).into()
    }
}

/// Class assigned to a word by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenClass {
    Variable,
    Function,
    Text,
    Number,
    Reserved,
}

impl TokenClass {
    /// Tag used for this class in the token-stream XML document.
    pub fn xml_tag(self) -> &'static str {
        match self {
            TokenClass::Variable => "V",
            TokenClass::Function => "F",
            TokenClass::Text => "T",
            TokenClass::Number => "N",
            TokenClass::Reserved => "reserved_keyword",
        }
    }

    /// Class written as `tag` in the token-stream XML document.
    pub fn from_xml_tag(tag: &str) -> Option<Self> {
        [
            TokenClass::Variable,
            TokenClass::Function,
            TokenClass::Text,
            TokenClass::Number,
            TokenClass::Reserved,
        ]
        .into_iter()
        .find(|class| class.xml_tag() == tag)
    }
}

impl fmt::Display for TokenClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenClass::Variable => "variable",
            TokenClass::Function => "function",
            TokenClass::Text => "text",
            TokenClass::Number => "number",
            TokenClass::Reserved => "reserved word",
        };
        f.write_str(name)
    }
}

/// A classified word.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    /// Sequence number, starting at 1.
    pub id: u32,
    pub class: TokenClass,
    pub lexeme: String,
    #[serde(default)]
    pub span: Span,
}

impl Token {
    /// Construct a new token.
    pub fn new(id: u32, class: TokenClass, lexeme: impl Into<String>, span: Span) -> Self {
        Self {
            id,
            class,
            lexeme: lexeme.into(),
            span,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}` (token {}, {})", self.lexeme, self.id, self.class)
    }
}
