// Grammar interpretation.
//
// `attempt` matches one symbol at the cursor. `Ok(Some(id))` means the symbol matched and produced node
// `id`; `Ok(None)` is an ordinary mismatch that the caller may recover from by trying a sibling
// alternative; `Err(_)` is fatal and unwinds the whole parse.
//
// On `Ok(None)` the cursor and the arena are exactly as they were on entry.

/// Outcome of trying one rule's alternatives.
enum Step<'g> {
    Matched(NodeId),
    /// Alternative `alternative` matched up to its final nonterminal `next`, which still has to be
    /// derived under the opened node `id`.
    Tail {
        id: NodeId,
        alternative: usize,
        cp: Checkpoint,
        next: &'g str,
    },
    Failed,
}

/// An alternative waiting on its final nonterminal.
struct TailFrame<'n> {
    name: &'n str,
    parent: Option<NodeId>,
    alternative: usize,
    cp: Checkpoint,
    id: NodeId,
}

impl<'a> Parser<'a> {
    fn attempt<'s>(&mut self, symbol: &'s Symbol, parent: Option<NodeId>) -> Result<Option<NodeId>, ParseError>
    where
        'a: 's,
    {
        match symbol {
            Symbol::Terminal(terminal) => Ok(self.match_terminal(terminal, parent)),
            Symbol::Nonterminal(name) => {
                if self.depth >= self.config.max_depth {
                    return Err(self.nesting_error().into());
                }
                self.depth += 1;
                let result = self.expand(name, parent);
                self.depth -= 1;
                result
            }
        }
    }

    fn match_terminal(&mut self, terminal: &Terminal, parent: Option<NodeId>) -> Option<NodeId> {
        let tokens = self.tokens;
        let Some(token) = tokens.get(self.pos).filter(|t| t.matches(terminal)) else {
            self.expect_at_cursor([terminal]);
            return None;
        };
        let id = self.builder.leaf(&token.lexeme, parent);
        self.pos += 1;
        Some(id)
    }

    /// Derive `name` at the cursor.
    ///
    /// When an alternative ends in a nonterminal, that nonterminal is derived by this loop rather than by
    /// a nested call, so `INSTRUC ::= COMMAND ; INSTRUC` runs in constant stack and depth however long
    /// the list is. `chain` holds the alternatives still waiting on their final nonterminal, outermost
    /// first. If a final nonterminal fails, the alternative that was waiting on it is rolled back and its
    /// rule resumes with the next alternative, exactly as the nested call would have.
    fn expand<'n>(&mut self, name: &'n str, parent: Option<NodeId>) -> Result<Option<NodeId>, ParseError>
    where
        'a: 'n,
    {
        let mut chain: Vec<TailFrame<'n>> = Vec::new();
        let (mut name, mut parent, mut from) = (name, parent, 0);

        loop {
            match self.expand_from(name, parent, from)? {
                Step::Matched(mut id) => {
                    while let Some(frame) = chain.pop() {
                        self.builder.commit(frame.id);
                        id = frame.id;
                    }
                    return Ok(Some(id));
                }
                Step::Tail { id, alternative, cp, next } => {
                    // Only an alternative made of nullable prefixes can chain without consuming input.
                    if chain.len() >= self.tokens.len() + self.config.max_depth {
                        return Err(self.nesting_error().into());
                    }
                    chain.push(TailFrame {
                        name,
                        parent,
                        alternative,
                        cp,
                        id,
                    });
                    (name, parent, from) = (next, Some(id), 0);
                }
                Step::Failed => {
                    let Some(frame) = chain.pop() else {
                        return Ok(None);
                    };
                    tracing::trace!(
                        nonterminal = frame.name,
                        alternative = frame.alternative,
                        restore = frame.cp.pos,
                        "backtracking"
                    );
                    self.rollback(frame.cp);
                    (name, parent, from) = (frame.name, frame.parent, frame.alternative + 1);
                }
            }
        }
    }

    /// Try the alternatives of `name` in declaration order, starting at index `from`.
    fn expand_from(&mut self, name: &str, parent: Option<NodeId>, from: usize) -> Result<Step<'a>, ParseError> {
        let grammar: &'a Grammar = self.grammar;
        let productions = grammar.productions_of(name)?;

        for (index, production) in productions.iter().enumerate().skip(from) {
            if production.is_empty() {
                // Epsilon: an explicit childless node, no input consumed.
                let id = self.builder.open(name, parent);
                self.builder.commit(id);
                tracing::debug!(nonterminal = name, pos = self.pos, "epsilon derivation");
                return Ok(Step::Matched(id));
            }

            if !self.may_start(production) {
                tracing::trace!(nonterminal = name, alternative = index, pos = self.pos, "pruned");
                continue;
            }

            tracing::trace!(nonterminal = name, alternative = index, pos = self.pos, "trying");
            let cp = self.checkpoint();
            match self.match_prefix(name, production, parent)? {
                Some((id, None)) => return Ok(Step::Matched(id)),
                Some((id, Some(next))) => {
                    return Ok(Step::Tail {
                        id,
                        alternative: index,
                        cp,
                        next,
                    });
                }
                None => {}
            }
            tracing::trace!(nonterminal = name, alternative = index, restore = cp.pos, "backtracking");
            self.rollback(cp);
        }

        Ok(Step::Failed)
    }

    /// Open a node for `name` and match `production` under it, except for a final nonterminal.
    ///
    /// Returns the node and that final nonterminal, if any. A production without one is committed here.
    /// On failure the caller rolls back; nothing is undone here.
    fn match_prefix(
        &mut self,
        name: &str,
        production: &'a Production,
        parent: Option<NodeId>,
    ) -> Result<Option<(NodeId, Option<&'a str>)>, ParseError> {
        let id = self.builder.open(name, parent);
        let (prefix, tail) = match production.symbols().split_last() {
            Some((Symbol::Nonterminal(next), prefix)) => (prefix, Some(next.as_str())),
            _ => (production.symbols(), None),
        };
        for symbol in prefix {
            if self.attempt(symbol, Some(id))?.is_none() {
                return Ok(None);
            }
        }
        if tail.is_none() {
            self.builder.commit(id);
        }
        Ok(Some((id, tail)))
    }

    /// FIRST-set prefix check for a non-empty alternative.
    ///
    /// A leading terminal must equal the current token's terminal. A leading nonterminal must have the
    /// current terminal in its FIRST set, unless it is nullable, in which case the alternative may still
    /// start with whatever follows it.
    fn may_start(&mut self, production: &Production) -> bool {
        let Some(first) = production.first() else {
            return true;
        };
        match first {
            Symbol::Terminal(t) => {
                if self.peek() == Some(t) {
                    return true;
                }
                self.expect_at_cursor([t]);
                false
            }
            Symbol::Nonterminal(b) => {
                let firsts = self.firsts;
                let starts = self.peek().is_some_and(|t| firsts.contains(b, t));
                if starts || firsts.is_nullable(b) {
                    return true;
                }
                if let Some(set) = firsts.first_of(b) {
                    self.expect_at_cursor(set.iter().filter_map(|item| match item {
                        FirstItem::Terminal(t) => Some(t),
                        FirstItem::Epsilon => None,
                    }));
                }
                false
            }
        }
    }
}
