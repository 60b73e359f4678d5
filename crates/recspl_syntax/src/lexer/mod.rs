//! Token classifier for RecSPL.
//!
//! Source text is split on whitespace; every word is then classified independently, trying the token
//! classes in fixed priority order:
//! 1. Variable: `V_[a-z][a-z0-9]*`
//! 2. Function: `F_[a-z][a-z0-9]*`
//! 3. Text: `"[A-Z][a-z]{1,7}"` (quotes included in the lexeme)
//! 4. Number: `-?[0-9]+(\.[0-9]+)?`
//! 5. Reserved: any spelling in `recspl_core::lang::reserved`
//!
//! A word that matches none of them is a [`LexicalError`] and stops tokenization.
//!
//! ## Module Structure
//!
//! - `tokens` - Token types (Token, TokenClass, Span)
//! - `xml` - Token-stream XML document

pub mod tokens;
pub mod xml;

pub use tokens::{Span, Token, TokenClass};

use once_cell::sync::Lazy;
use recspl_core::lang::reserved;
use regex::Regex;

use crate::diagnostics::LexicalError;

// ============================================================================
// Token-class patterns
// ============================================================================

/// Anchored patterns for the non-reserved classes, in priority order.
static PATTERNS: Lazy<[(TokenClass, Regex); 4]> = Lazy::new(|| {
    [
        (TokenClass::Variable, anchored(r"V_[a-z][a-z0-9]*")),
        (TokenClass::Function, anchored(r"F_[a-z][a-z0-9]*")),
        (TokenClass::Text, anchored(r#""[A-Z][a-z]{1,7}""#)),
        (TokenClass::Number, anchored(r"-?[0-9]+(\.[0-9]+)?")),
    ]
});

fn anchored(pattern: &str) -> Regex {
    Regex::new(&format!("^(?:{pattern})$")).expect("INVARIANT: token-class patterns are valid regexes")
}

/// Classify a single word, or `None` if no token class accepts it.
pub fn classify_word(word: &str) -> Option<TokenClass> {
    PATTERNS
        .iter()
        .find(|(_, re)| re.is_match(word))
        .map(|(class, _)| *class)
        .or_else(|| reserved::is_reserved(word).then_some(TokenClass::Reserved))
}

// ============================================================================
// Classifier
// ============================================================================

/// Stateful classifier that hands out token ids.
///
/// ## Notes
/// - Ids start at 1 and increase by one per successfully classified word, independent of class.
/// - A rejected word does not consume an id.
#[derive(Debug, Clone)]
pub struct Classifier {
    next_id: u32,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier {
    pub fn new() -> Self {
        Self { next_id: 1 }
    }

    /// Classify `word`, which the caller found at `span` in the source.
    ///
    /// ## Errors
    /// Returns a [`LexicalError`] naming the word if no token class matches.
    pub fn classify(&mut self, word: &str, span: Span) -> Result<Token, LexicalError> {
        let class = classify_word(word).ok_or_else(|| LexicalError::new(word, Some(span)))?;
        let token = Token::new(self.next_id, class, word, span);
        self.next_id += 1;
        Ok(token)
    }

    /// Id the next classified word will receive.
    pub fn next_id(&self) -> u32 {
        self.next_id
    }
}

/// Split `source` into whitespace-delimited words with their byte spans.
fn words(source: &str) -> impl Iterator<Item = (&str, Span)> {
    let mut rest = source.char_indices().peekable();
    std::iter::from_fn(move || {
        while rest.next_if(|(_, c)| c.is_whitespace()).is_some() {}
        let (start, _) = *rest.peek()?;
        let mut end = start;
        while let Some((i, c)) = rest.next_if(|(_, c)| !c.is_whitespace()) {
            end = i + c.len_utf8();
        }
        Some((&source[start..end], Span::new(start, end)))
    })
}

/// Tokenize a whole source text.
///
/// ## Errors
/// Returns the first [`LexicalError`]; no tokens are returned in that case.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn lex(source: &str) -> Result<Vec<Token>, LexicalError> {
    let mut classifier = Classifier::new();
    let tokens = words(source)
        .map(|(word, span)| classifier.classify(word, span))
        .collect::<Result<Vec<_>, _>>()?;
    tracing::debug!(tokens = tokens.len(), "classified source");
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classes(source: &str) -> Vec<TokenClass> {
        lex(source).unwrap().into_iter().map(|t| t.class).collect()
    }

    #[test]
    fn test_priority_order() {
        assert_eq!(classify_word("V_abc1"), Some(TokenClass::Variable));
        assert_eq!(classify_word("F_go"), Some(TokenClass::Function));
        assert_eq!(classify_word("\"Hello\""), Some(TokenClass::Text));
        assert_eq!(classify_word("-12.50"), Some(TokenClass::Number));
        assert_eq!(classify_word("begin"), Some(TokenClass::Reserved));
        assert_eq!(classify_word(";"), Some(TokenClass::Reserved));
    }

    #[test]
    fn test_patterns_are_anchored() {
        assert_eq!(classify_word("V_a;"), None);
        assert_eq!(classify_word("xV_a"), None);
        assert_eq!(classify_word("V_"), None);
        assert_eq!(classify_word("V_Abc"), None);
        assert_eq!(classify_word("1."), None);
        assert_eq!(classify_word("\"hello\""), None);
        assert_eq!(classify_word("\"Abcdefghi\""), None);
        assert_eq!(classify_word("\"A\""), None);
    }

    #[test]
    fn test_ids_are_sequential_from_one() {
        let tokens = lex("main begin skip ; end").unwrap();
        let ids: Vec<u32> = tokens.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_words_span_lines_and_tabs() {
        let source = "main\n\tbegin  skip ;\r\nend\n";
        let tokens = lex(source).unwrap();
        assert_eq!(tokens.len(), 5);
        assert_eq!(tokens[1].span, Span::new(6, 11));
        assert_eq!(&source[tokens[4].span.start..tokens[4].span.end], "end");
        assert_eq!(
            classes(source),
            vec![TokenClass::Reserved; 5],
        );
    }

    #[test]
    fn test_lexical_error_names_word() {
        let err = lex("main begin ### end").unwrap_err();
        assert_eq!(err.word, "###");
        assert_eq!(err.span, Some(Span::new(11, 14).into()));
    }

    #[test]
    fn test_rejected_word_does_not_consume_id() {
        let mut classifier = Classifier::new();
        classifier.classify("main", Span::default()).unwrap();
        assert!(classifier.classify("@", Span::default()).is_err());
        let next = classifier.classify("begin", Span::default()).unwrap();
        assert_eq!(next.id, 2);
        assert_eq!(classifier.next_id(), 3);
    }

    #[test]
    fn test_empty_source_yields_no_tokens() {
        assert!(lex("").unwrap().is_empty());
        assert!(lex(" \n\t ").unwrap().is_empty());
    }
}
