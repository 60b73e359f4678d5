//! Declarative grammar table.
//!
//! A [`Grammar`] maps each nonterminal to an ordered list of alternative [`Production`]s. The parser
//! interprets this table directly; nothing is generated from it.
//!
//! Symbol resolution follows one rule: a name is a [`Symbol::Nonterminal`] iff it is a rule of the grammar.
//! Otherwise it is a terminal, either one of the abstract classes `VNAME`/`FNAME`/`CONST` or a literal
//! spelling compared against reserved tokens.
//!
//! ## Notes
//! - Declaration order of rules and of alternatives is semantically load-bearing: the parser tries
//!   alternatives in exactly this order and the first full match wins.
//! - An empty production denotes a nullable (epsilon) alternative.
//! - The table is read-only after construction.

mod recspl;
mod text;

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use recspl_core::lang::terminals::{self, TerminalClass};
use serde::Serialize;

use crate::diagnostics::GrammarError;

pub use recspl::RECSPL_RULES;

/// Spelling used for the empty alternative in grammar text and FIRST-set listings.
pub const EPSILON: &str = "ε";

// ============================================================================
// Symbols
// ============================================================================

/// A terminal symbol.
///
/// Serializes as its grammar spelling (`"VNAME"`, `"begin"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Terminal {
    /// A keyword or punctuation spelling, matched against reserved tokens.
    Literal(String),
    /// An abstract token class.
    Class(TerminalClass),
}

impl Terminal {
    /// Resolve a non-rule grammar name to a terminal.
    pub fn from_name(name: &str) -> Self {
        match terminals::from_str(name) {
            Some(class) => Terminal::Class(class),
            None => Terminal::Literal(name.to_string()),
        }
    }
}

impl Serialize for Terminal {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Terminal::Literal(s) => f.write_str(s),
            Terminal::Class(c) => f.write_str(c.as_str()),
        }
    }
}

/// A grammar symbol inside a production.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Symbol {
    Terminal(Terminal),
    Nonterminal(String),
}

impl Symbol {
    pub fn name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Terminal(t) => fmt::Display::fmt(t, f),
            Symbol::Nonterminal(n) => f.write_str(n),
        }
    }
}

/// One right-hand-side alternative.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Production {
    symbols: Vec<Symbol>,
}

impl Production {
    pub fn new(symbols: Vec<Symbol>) -> Self {
        Self { symbols }
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn first(&self) -> Option<&Symbol> {
        self.symbols.first()
    }

    /// `true` for the epsilon alternative.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.symbols.is_empty() {
            return f.write_str(EPSILON);
        }
        let parts: Vec<String> = self.symbols.iter().map(Symbol::name).collect();
        f.write_str(&parts.join(" "))
    }
}

/// A nonterminal with its alternatives, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub name: String,
    pub productions: Vec<Production>,
}

// ============================================================================
// Grammar
// ============================================================================

/// Read-only grammar table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
    rules: Vec<Rule>,
    index: HashMap<String, usize>,
}

impl Grammar {
    /// Build a grammar from `(name, alternatives)` pairs.
    ///
    /// The first rule is the default start symbol.
    ///
    /// ## Errors
    /// - [`GrammarError::EmptyGrammar`] for an empty rule list.
    /// - [`GrammarError::Malformed`] if a rule name is declared twice.
    /// - [`GrammarError::UndefinedNonterminal`] if a production mentions a nonterminal-shaped name (all
    ///   uppercase) that is neither a rule nor a terminal class.
    pub fn from_rules(rules: &[(&str, &[&[&str]])]) -> Result<Self, GrammarError> {
        let names: Vec<(String, Vec<Vec<String>>)> = rules
            .iter()
            .map(|(name, alts)| {
                let alts = alts
                    .iter()
                    .map(|alt| alt.iter().map(|s| s.to_string()).collect())
                    .collect();
                (name.to_string(), alts)
            })
            .collect();
        Self::from_names(names)
    }

    /// The built-in RecSPL grammar.
    pub fn recspl() -> Self {
        Self::from_rules(RECSPL_RULES).expect("INVARIANT: the built-in RecSPL grammar is well-formed")
    }

    /// Load a grammar from its text form (see [`Grammar::to_text`]).
    ///
    /// ```text
    /// # comment
    /// GLOBVARS ::= VTYP VNAME , GLOBVARS
    ///            | ε
    /// ```
    ///
    /// ## Errors
    /// [`GrammarError::Malformed`] with the offending line number, or any error of [`Grammar::from_rules`].
    pub fn parse_text(source: &str) -> Result<Self, GrammarError> {
        Self::from_names(text::parse_rules(source)?)
    }

    pub(crate) fn from_names(rules: Vec<(String, Vec<Vec<String>>)>) -> Result<Self, GrammarError> {
        if rules.is_empty() {
            return Err(GrammarError::EmptyGrammar);
        }

        let mut index = HashMap::with_capacity(rules.len());
        for (i, (name, _)) in rules.iter().enumerate() {
            if index.insert(name.clone(), i).is_some() {
                return Err(GrammarError::Malformed {
                    line: 0,
                    message: format!("rule `{name}` is declared twice"),
                });
            }
        }

        let rules = rules
            .into_iter()
            .map(|(name, alts)| {
                let productions = alts
                    .into_iter()
                    .map(|alt| {
                        let symbols = alt
                            .into_iter()
                            .map(|s| {
                                if index.contains_key(&s) {
                                    Symbol::Nonterminal(s)
                                } else {
                                    Symbol::Terminal(Terminal::from_name(&s))
                                }
                            })
                            .collect();
                        Production::new(symbols)
                    })
                    .collect();
                Rule { name, productions }
            })
            .collect();

        let grammar = Self { rules, index };
        grammar.validate()?;
        Ok(grammar)
    }

    /// Check that no production refers to an undefined nonterminal.
    ///
    /// Since resolution turns every unknown name into a literal terminal, “undefined” means a literal whose
    /// spelling looks like a nonterminal: two or more characters, all uppercase ASCII letters.
    pub fn validate(&self) -> Result<(), GrammarError> {
        for rule in &self.rules {
            for production in &rule.productions {
                for symbol in production.symbols() {
                    match symbol {
                        Symbol::Terminal(Terminal::Literal(s)) if looks_like_nonterminal(s) => {
                            return Err(GrammarError::UndefinedNonterminal {
                                name: s.clone(),
                                rule: rule.name.clone(),
                            });
                        }
                        Symbol::Nonterminal(n) if !self.contains(n) => {
                            return Err(GrammarError::UndefinedNonterminal {
                                name: n.clone(),
                                rule: rule.name.clone(),
                            });
                        }
                        _ => {}
                    }
                }
            }
        }
        Ok(())
    }

    /// Alternatives of `nonterminal`, in declaration order.
    ///
    /// ## Errors
    /// [`GrammarError::UndefinedNonterminal`] if there is no such rule.
    pub fn productions_of(&self, nonterminal: &str) -> Result<&[Production], GrammarError> {
        self.rule(nonterminal)
            .map(|r| r.productions.as_slice())
            .ok_or_else(|| GrammarError::UndefinedNonterminal {
                name: nonterminal.to_string(),
                rule: String::from("<lookup>"),
            })
    }

    /// `true` iff `nonterminal` has an empty alternative.
    ///
    /// This is the direct, table-level notion. Transitive nullability lives in
    /// [`FirstSets::is_nullable`](crate::first::FirstSets::is_nullable).
    pub fn is_nullable(&self, nonterminal: &str) -> bool {
        self.rule(nonterminal)
            .is_some_and(|r| r.productions.iter().any(Production::is_empty))
    }

    pub fn contains(&self, nonterminal: &str) -> bool {
        self.index.contains_key(nonterminal)
    }

    pub fn rule(&self, nonterminal: &str) -> Option<&Rule> {
        self.index.get(nonterminal).map(|&i| &self.rules[i])
    }

    /// Rules in declaration order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Nonterminal names in declaration order.
    pub fn nonterminals(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.name.as_str())
    }

    /// Default start symbol: the first declared rule.
    pub fn start(&self) -> &str {
        &self.rules[0].name
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Total number of symbol occurrences across all productions.
    pub fn symbol_count(&self) -> usize {
        self.rules
            .iter()
            .flat_map(|r| r.productions.iter())
            .map(Production::len)
            .sum()
    }

    /// Every distinct terminal mentioned by some production.
    pub fn terminals(&self) -> BTreeSet<&Terminal> {
        self.rules
            .iter()
            .flat_map(|r| r.productions.iter())
            .flat_map(|p| p.symbols().iter())
            .filter_map(|s| match s {
                Symbol::Terminal(t) => Some(t),
                Symbol::Nonterminal(_) => None,
            })
            .collect()
    }

    /// Render the grammar in the text form accepted by [`Grammar::parse_text`].
    pub fn to_text(&self) -> String {
        let width = self.rules.iter().map(|r| r.name.len()).max().unwrap_or(0);
        let mut out = String::new();
        for rule in &self.rules {
            for (i, production) in rule.productions.iter().enumerate() {
                if i == 0 {
                    out.push_str(&format!("{:<width$} ::= {production}\n", rule.name));
                } else {
                    out.push_str(&format!("{:<width$}   | {production}\n", ""));
                }
            }
        }
        out
    }
}

fn looks_like_nonterminal(s: &str) -> bool {
    s.len() > 1 && s.chars().all(|c| c.is_ascii_uppercase())
}
