//! Text form of a grammar.
//!
//! ```text
//! # comment
//! PROG    ::= main GLOBVARS ALGO FUNCTIONS
//! INSTRUC ::= COMMAND ; INSTRUC
//!           | ε
//! ```
//!
//! Symbols are whitespace-separated. A line whose first non-blank character is `|` continues the previous
//! rule. `ε` (or nothing at all between two bars) is the empty alternative.

use std::collections::HashSet;

use super::EPSILON;
use crate::diagnostics::GrammarError;

type RawRule = (String, Vec<Vec<String>>);

pub(super) fn parse_rules(source: &str) -> Result<Vec<RawRule>, GrammarError> {
    let mut rules: Vec<RawRule> = Vec::new();
    let mut seen = HashSet::new();

    for (idx, raw) in source.lines().enumerate() {
        let line_no = idx + 1;
        let line = strip_comment(raw).trim();
        if line.is_empty() {
            continue;
        }

        if let Some(rest) = line.strip_prefix('|') {
            let Some((_, alts)) = rules.last_mut() else {
                return Err(malformed(line_no, "continuation line before any rule"));
            };
            alts.extend(split_alternatives(rest));
            continue;
        }

        let Some((lhs, rhs)) = line.split_once("::=") else {
            return Err(malformed(line_no, "expected `NAME ::= symbols`"));
        };
        let name = lhs.trim();
        if name.is_empty() || name.split_whitespace().count() != 1 {
            return Err(malformed(line_no, "rule name must be a single word"));
        }
        if !seen.insert(name.to_string()) {
            return Err(malformed(line_no, &format!("rule `{name}` is declared twice")));
        }
        rules.push((name.to_string(), split_alternatives(rhs)));
    }

    Ok(rules)
}

fn split_alternatives(rhs: &str) -> Vec<Vec<String>> {
    let mut alts = vec![Vec::new()];
    for word in rhs.split_whitespace() {
        match word {
            "|" => alts.push(Vec::new()),
            w if w == EPSILON => {}
            w => {
                if let Some(current) = alts.last_mut() {
                    current.push(w.to_string());
                }
            }
        }
    }
    alts
}

// `#` only starts a comment at a word boundary, so a literal like `a#b` survives.
fn strip_comment(line: &str) -> &str {
    let mut prev_blank = true;
    for (i, c) in line.char_indices() {
        if c == '#' && prev_blank {
            return &line[..i];
        }
        prev_blank = c.is_whitespace();
    }
    line
}

fn malformed(line: usize, message: &str) -> GrammarError {
    GrammarError::Malformed {
        line,
        message: message.to_string(),
    }
}
