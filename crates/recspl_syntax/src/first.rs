//! FIRST-set computation.
//!
//! For every nonterminal `A`, `FIRST(A)` is the set of terminals that can begin a derivation of `A`, plus
//! [`FirstItem::Epsilon`] when `A` can derive the empty sequence. The parser consults these sets to skip
//! alternatives that cannot start with the current token.
//!
//! The sets are the least fixed point of the usual equations, computed by repeated passes over the grammar
//! until a pass adds nothing. Sets only grow and are bounded by the finite terminal alphabet, so the loop
//! terminates; the pass bound below turns a broken implementation into an error instead of a hang.
//!
//! A leading nullable nonterminal contributes its terminals but not its ε: a sequence's FIRST gains ε only
//! when every symbol in it is nullable. That is the standard definition and is used on purpose.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Serialize;

use crate::diagnostics::GrammarError;
use crate::grammar::{EPSILON, Grammar, Symbol, Terminal};

/// One member of a FIRST set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FirstItem {
    Terminal(Terminal),
    /// The nonterminal can derive the empty sequence.
    Epsilon,
}

impl fmt::Display for FirstItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FirstItem::Terminal(t) => fmt::Display::fmt(t, f),
            FirstItem::Epsilon => f.write_str(EPSILON),
        }
    }
}

impl Serialize for FirstItem {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// FIRST sets of every nonterminal of one grammar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FirstSets {
    sets: BTreeMap<String, BTreeSet<FirstItem>>,
    #[serde(skip)]
    order: Vec<String>,
    #[serde(skip)]
    iterations: usize,
}

impl FirstSets {
    /// Compute the FIRST sets of `grammar`.
    ///
    /// ## Errors
    /// [`GrammarError::FirstSetsDiverged`] if no fixed point is reached within
    /// `nonterminals × (terminals + 1) + 1` passes.
    #[tracing::instrument(skip_all, fields(rules = grammar.len()))]
    pub fn compute(grammar: &Grammar) -> Result<Self, GrammarError> {
        let order: Vec<String> = grammar.nonterminals().map(str::to_string).collect();
        let mut sets: BTreeMap<String, BTreeSet<FirstItem>> =
            order.iter().map(|name| (name.clone(), BTreeSet::new())).collect();

        let bound = grammar.len() * (grammar.terminals().len() + 1) + 1;
        let mut passes = 0;

        loop {
            if passes == bound {
                return Err(GrammarError::FirstSetsDiverged { passes });
            }
            passes += 1;

            let mut changed = false;
            for rule in grammar.rules() {
                for production in &rule.productions {
                    let items = sequence_first(&sets, production.symbols());
                    let Some(target) = sets.get_mut(&rule.name) else {
                        continue;
                    };
                    for item in items {
                        changed |= target.insert(item);
                    }
                }
            }

            if !changed {
                break;
            }
        }

        tracing::debug!(passes, nonterminals = order.len(), "FIRST sets reached a fixed point");
        Ok(Self {
            sets,
            order,
            iterations: passes,
        })
    }

    /// FIRST set of `nonterminal`, or `None` if it is not a rule of the grammar.
    pub fn first_of(&self, nonterminal: &str) -> Option<&BTreeSet<FirstItem>> {
        self.sets.get(nonterminal)
    }

    /// `true` iff `terminal` can begin a derivation of `nonterminal`.
    pub fn contains(&self, nonterminal: &str, terminal: &Terminal) -> bool {
        self.sets
            .get(nonterminal)
            .is_some_and(|set| set.iter().any(|item| matches!(item, FirstItem::Terminal(t) if t == terminal)))
    }

    /// `true` iff `nonterminal` can derive the empty sequence, directly or through other nonterminals.
    pub fn is_nullable(&self, nonterminal: &str) -> bool {
        self.sets
            .get(nonterminal)
            .is_some_and(|set| set.contains(&FirstItem::Epsilon))
    }

    /// Number of passes the fixed point took, including the final pass that changed nothing.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// FIRST of a symbol sequence. Contains [`FirstItem::Epsilon`] iff every symbol is nullable.
    pub fn first_of_sequence(&self, symbols: &[Symbol]) -> BTreeSet<FirstItem> {
        sequence_first(&self.sets, symbols)
    }

    /// `(nonterminal, set)` pairs in grammar declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<FirstItem>)> {
        self.order
            .iter()
            .filter_map(|name| self.sets.get(name).map(|set| (name.as_str(), set)))
    }
}

impl fmt::Display for FirstSets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.order.iter().map(String::len).max().unwrap_or(0);
        for (name, set) in self.iter() {
            let items: Vec<String> = set.iter().map(ToString::to_string).collect();
            writeln!(f, "{name:<width$}  {{ {} }}", items.join(", "))?;
        }
        Ok(())
    }
}

fn sequence_first(sets: &BTreeMap<String, BTreeSet<FirstItem>>, symbols: &[Symbol]) -> BTreeSet<FirstItem> {
    let mut out = BTreeSet::new();
    for symbol in symbols {
        match symbol {
            Symbol::Terminal(t) => {
                out.insert(FirstItem::Terminal(t.clone()));
                return out;
            }
            Symbol::Nonterminal(name) => {
                let Some(first) = sets.get(name) else {
                    return out;
                };
                out.extend(first.iter().filter(|i| **i != FirstItem::Epsilon).cloned());
                if !first.contains(&FirstItem::Epsilon) {
                    return out;
                }
            }
        }
    }
    out.insert(FirstItem::Epsilon);
    out
}
