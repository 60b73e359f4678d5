//! Minimal XML support for the token-stream and syntax-tree documents.
//!
//! The writer emits one element per line, indented with tabs. The reader accepts the element-only
//! subset those documents use: tags without attributes, text bodies, declarations and comments.
//! Whitespace between elements is ignored and text bodies are trimmed.

use std::fmt;

use crate::diagnostics::DocumentError;

/// Escape text content for an XML element body.
pub(crate) fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

#[derive(Debug, Default)]
pub(crate) struct XmlWriter {
    out: String,
    depth: usize,
}

impl XmlWriter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn open(&mut self, tag: &str) {
        self.indent();
        self.out.push('<');
        self.out.push_str(tag);
        self.out.push_str(">\n");
        self.depth += 1;
    }

    pub(crate) fn close(&mut self, tag: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.indent();
        self.out.push_str("</");
        self.out.push_str(tag);
        self.out.push_str(">\n");
    }

    /// Write `<tag>text</tag>` on one line, escaping `text`.
    pub(crate) fn element(&mut self, tag: &str, text: impl std::fmt::Display) {
        self.indent();
        self.out.push_str(&format!("<{tag}>{}</{tag}>\n", escape_text(&text.to_string())));
    }

    pub(crate) fn finish(self) -> String {
        self.out
    }

    fn indent(&mut self) {
        for _ in 0..self.depth {
            self.out.push('\t');
        }
    }
}

/// Undo [`escape_text`], plus the two quote entities other writers produce.
pub(crate) fn unescape_text(text: &str) -> Result<String, String> {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp..];
        let Some(semi) = after.find(';') else {
            return Err(format!("unterminated entity in `{text}`"));
        };
        let c = match &after[..=semi] {
            "&amp;" => '&',
            "&lt;" => '<',
            "&gt;" => '>',
            "&quot;" => '"',
            "&apos;" => '\'',
            other => return Err(format!("unknown entity `{other}`")),
        };
        out.push(c);
        rest = &after[semi + 1..];
    }
    out.push_str(rest);
    Ok(out)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum XmlEvent {
    Open(String),
    Close(String),
    Text(String),
}

impl fmt::Display for XmlEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            XmlEvent::Open(tag) => write!(f, "<{tag}>"),
            XmlEvent::Close(tag) => write!(f, "</{tag}>"),
            XmlEvent::Text(text) => write!(f, "text `{text}`"),
        }
    }
}

/// Pull reader over an element-only document.
#[derive(Debug)]
pub(crate) struct XmlReader<'s> {
    src: &'s str,
    pos: usize,
    /// Close event owed by a self-closing tag.
    pending: Option<XmlEvent>,
}

impl<'s> XmlReader<'s> {
    pub(crate) fn new(src: &'s str) -> Self {
        Self {
            src,
            pos: 0,
            pending: None,
        }
    }

    /// Byte offset of the next unread character.
    pub(crate) fn offset(&self) -> usize {
        self.pos
    }

    pub(crate) fn error(&self, message: impl Into<String>) -> DocumentError {
        DocumentError::new(message, self.pos)
    }

    /// Next event, or `None` at the end of the document.
    pub(crate) fn next_event(&mut self) -> Result<Option<XmlEvent>, DocumentError> {
        if let Some(event) = self.pending.take() {
            return Ok(Some(event));
        }
        loop {
            let rest = &self.src[self.pos..];
            if rest.is_empty() {
                return Ok(None);
            }
            if rest.starts_with("<?") {
                self.skip_past("?>")?;
                continue;
            }
            if rest.starts_with("<!--") {
                self.skip_past("-->")?;
                continue;
            }
            if rest.starts_with('<') {
                return self.tag().map(Some);
            }

            let end = rest.find('<').unwrap_or(rest.len());
            let raw = rest[..end].trim();
            if raw.is_empty() {
                self.pos += end;
                continue;
            }
            let text = unescape_text(raw).map_err(|message| self.error(message))?;
            self.pos += end;
            return Ok(Some(XmlEvent::Text(text)));
        }
    }

    /// Next event, treating the end of the document as an error.
    pub(crate) fn require(&mut self) -> Result<XmlEvent, DocumentError> {
        self.next_event()?.ok_or_else(|| self.error("unexpected end of document"))
    }

    pub(crate) fn expect_open(&mut self, tag: &str) -> Result<(), DocumentError> {
        match self.require()? {
            XmlEvent::Open(found) if found == tag => Ok(()),
            other => Err(self.error(format!("expected <{tag}>, found {other}"))),
        }
    }

    /// Text body of an element whose open tag was just read, up to and including `</tag>`.
    pub(crate) fn text_until_close(&mut self, tag: &str) -> Result<String, DocumentError> {
        let mut text = String::new();
        loop {
            match self.require()? {
                XmlEvent::Text(t) => text.push_str(&t),
                XmlEvent::Close(found) if found == tag => return Ok(text),
                other => return Err(self.error(format!("expected text or </{tag}>, found {other}"))),
            }
        }
    }

    fn tag(&mut self) -> Result<XmlEvent, DocumentError> {
        let rest = &self.src[self.pos..];
        let Some(end) = rest.find('>') else {
            return Err(self.error("unterminated tag"));
        };
        let inner = rest[1..end].trim();
        let (closing, name, self_closing) = match (inner.strip_prefix('/'), inner.strip_suffix('/')) {
            (Some(name), _) => (true, name.trim(), false),
            (None, Some(name)) => (false, name.trim(), true),
            (None, None) => (false, inner, false),
        };
        if name.is_empty() {
            return Err(self.error("empty tag name"));
        }
        if name.contains(char::is_whitespace) {
            return Err(self.error(format!("attributes are not supported in <{name}>")));
        }
        let name = name.to_string();
        self.pos += end + 1;

        if closing {
            return Ok(XmlEvent::Close(name));
        }
        if self_closing {
            self.pending = Some(XmlEvent::Close(name.clone()));
        }
        Ok(XmlEvent::Open(name))
    }

    fn skip_past(&mut self, terminator: &str) -> Result<(), DocumentError> {
        match self.src[self.pos..].find(terminator) {
            Some(at) => {
                self.pos += at + terminator.len();
                Ok(())
            }
            None => Err(self.error(format!("missing `{terminator}`"))),
        }
    }
}
