// Cursor, checkpoint and failure-reporting helpers.
//
// Every terminal mismatch, including one detected while pruning an alternative, is recorded against
// its token position. Only the furthest position is kept: when the start symbol finally fails, that is
// where the input stopped making sense, and the recorded terminals are what would have been accepted
// there.

/// Furthest failure seen so far.
#[derive(Debug, Default)]
struct Furthest {
    pos: usize,
    expected: BTreeSet<Terminal>,
}

impl Furthest {
    fn record<'t>(&mut self, pos: usize, terminals: impl IntoIterator<Item = &'t Terminal>) {
        if pos < self.pos {
            return;
        }
        if pos > self.pos {
            self.pos = pos;
            self.expected.clear();
        }
        self.expected.extend(terminals.into_iter().cloned());
    }
}

impl<'a> Parser<'a> {
    // ========================================================================
    // Cursor
    // ========================================================================

    /// Canonical terminal of the current token, or `None` at end of input.
    fn peek(&self) -> Option<&Terminal> {
        self.lookahead.get(self.pos)
    }

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            pos: self.pos,
            nodes: self.builder.nodes.len(),
            commits: self.builder.commits.len(),
        }
    }

    /// Restore the cursor and drop every node created since `cp`.
    fn rollback(&mut self, cp: Checkpoint) {
        self.pos = cp.pos;
        self.builder.truncate(cp.nodes, cp.commits);
    }

    // ========================================================================
    // Failure reporting
    // ========================================================================

    fn expect_at_cursor<'t>(&mut self, terminals: impl IntoIterator<Item = &'t Terminal>) {
        self.furthest.record(self.pos, terminals);
    }

    fn expected_at(&self, pos: usize) -> Vec<String> {
        if self.furthest.pos != pos {
            return Vec::new();
        }
        self.furthest.expected.iter().map(ToString::to_string).collect()
    }

    /// Error for a start symbol that could not be derived.
    fn failure_error(&self) -> SyntaxError {
        let pos = self.furthest.pos;
        let token = self.tokens.get(pos).cloned();
        let kind = if token.is_some() {
            SyntaxErrorKind::UnexpectedToken
        } else {
            SyntaxErrorKind::UnexpectedEnd
        };
        SyntaxError::new(kind, pos, token, self.expected_at(pos))
    }

    /// Error for tokens left after a complete derivation, reported at the first unconsumed token.
    ///
    /// A longer derivation that failed further on is mentioned in the help text only.
    fn trailing_input_error(&self) -> SyntaxError {
        let err = SyntaxError::new(
            SyntaxErrorKind::TrailingInput,
            self.pos,
            self.tokens.get(self.pos).cloned(),
            self.expected_at(self.pos),
        );
        if self.furthest.pos <= self.pos {
            return err;
        }
        let site = match self.tokens.get(self.furthest.pos) {
            Some(token) => format!("at position {} (`{}`)", self.furthest.pos, token.lexeme),
            None => format!("at end of input (position {})", self.furthest.pos),
        };
        let mut help = format!("a derivation continuing here failed {site}");
        let expected = self.expected_at(self.furthest.pos);
        if !expected.is_empty() {
            let list: Vec<String> = expected.iter().map(|e| format!("`{e}`")).collect();
            help.push_str(&format!("; expected {}", list.join(", ")));
        }
        err.with_help(help)
    }

    fn nesting_error(&self) -> SyntaxError {
        SyntaxError::new(
            SyntaxErrorKind::NestingTooDeep,
            self.pos,
            self.tokens.get(self.pos).cloned(),
            Vec::new(),
        )
    }
}
