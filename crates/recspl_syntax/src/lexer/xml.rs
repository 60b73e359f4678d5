//! Token-stream XML document.
//!
//! Layout: a `<TOKENSTREAM>` root with one `<TOK>` per token holding `<ID>`, `<CLASS>` and `<WORD>`.
//! Classes use the short tags from [`TokenClass::xml_tag`](super::TokenClass::xml_tag).
//!
//! [`read_token_stream`] reads such a document back, so a saved `lex` result can be parsed later.

use super::{classify_word, Span, Token, TokenClass};
use crate::diagnostics::DocumentError;
use crate::xml::{XmlEvent, XmlReader, XmlWriter};

/// Render a token stream as XML.
pub fn write_token_stream(tokens: &[Token]) -> String {
    let mut w = XmlWriter::new();
    w.open("TOKENSTREAM");
    for token in tokens {
        w.open("TOK");
        w.element("ID", token.id);
        w.element("CLASS", token.class.xml_tag());
        w.element("WORD", &token.lexeme);
        w.close("TOK");
    }
    w.close("TOKENSTREAM");
    w.finish()
}

/// Read a `<TOKENSTREAM>` document.
///
/// `<ID>`, `<CLASS>` and `<WORD>` may appear in any order inside a `<TOK>`. Every word must belong to
/// the class it is filed under. Source spans are not part of the document, so tokens come back with
/// an empty span.
///
/// ## Errors
/// [`DocumentError`] for malformed XML, a missing or unknown field, or a word its class rejects.
pub fn read_token_stream(xml: &str) -> Result<Vec<Token>, DocumentError> {
    let mut reader = XmlReader::new(xml);
    reader.expect_open("TOKENSTREAM")?;

    let mut tokens = Vec::new();
    loop {
        match reader.require()? {
            XmlEvent::Open(tag) if tag == "TOK" => tokens.push(read_token(&mut reader)?),
            XmlEvent::Close(tag) if tag == "TOKENSTREAM" => break,
            other => return Err(reader.error(format!("expected <TOK> or </TOKENSTREAM>, found {other}"))),
        }
    }
    if let Some(extra) = reader.next_event()? {
        return Err(reader.error(format!("unexpected {extra} after </TOKENSTREAM>")));
    }

    tracing::debug!(tokens = tokens.len(), "token stream read");
    Ok(tokens)
}

fn read_token(reader: &mut XmlReader<'_>) -> Result<Token, DocumentError> {
    let start = reader.offset();
    let (mut id, mut class, mut word) = (None, None, None);
    loop {
        match reader.require()? {
            XmlEvent::Open(tag) => {
                let text = reader.text_until_close(&tag)?;
                match tag.as_str() {
                    "ID" => match text.parse::<u32>() {
                        Ok(n) => id = Some(n),
                        Err(_) => return Err(reader.error(format!("`{text}` is not a token id"))),
                    },
                    "CLASS" => match TokenClass::from_xml_tag(&text) {
                        Some(c) => class = Some(c),
                        None => return Err(reader.error(format!("unknown token class `{text}`"))),
                    },
                    "WORD" => word = Some(text),
                    _ => return Err(reader.error(format!("unexpected <{tag}> in <TOK>"))),
                }
            }
            XmlEvent::Close(tag) if tag == "TOK" => break,
            other => return Err(reader.error(format!("expected a token field or </TOK>, found {other}"))),
        }
    }

    let (Some(id), Some(class), Some(word)) = (id, class, word) else {
        return Err(DocumentError::new("<TOK> needs <ID>, <CLASS> and <WORD>", start));
    };
    if classify_word(&word) != Some(class) {
        return Err(DocumentError::new(format!("`{word}` is not a valid {class} token"), start));
    }
    Ok(Token::new(id, class, word, Span::default()))
}
