// Speculative node arena.
//
// Nodes are pushed as the engine explores; an inner node is pushed before its children, so the arena
// index (plus one) is a pre-order id. A checkpoint records the arena and commit-log lengths, and rolling
// back truncates both, which drops every node of an abandoned alternative and keeps ids dense.
//
// Children lists are not maintained while parsing. They are rebuilt from parent links in `finish`, once
// every node left in the arena is known to be committed.

/// Arena lengths plus cursor position at the start of an alternative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Checkpoint {
    pos: usize,
    nodes: usize,
    commits: usize,
}

#[derive(Debug, Default)]
struct TreeBuilder {
    nodes: Vec<Node>,
    /// Ids in commit order: leaves when matched, inner nodes once all their children succeeded.
    commits: Vec<NodeId>,
}

impl TreeBuilder {
    fn next_id(&self) -> NodeId {
        NodeId(self.nodes.len() as u32 + 1)
    }

    fn push(&mut self, symbol: &str, parent: Option<NodeId>, kind: NodeKind) -> NodeId {
        let id = self.next_id();
        self.nodes.push(Node {
            id,
            parent,
            symbol: symbol.to_string(),
            kind,
            children: Vec::new(),
        });
        id
    }

    /// Push an inner node whose children are about to be attempted.
    fn open(&mut self, symbol: &str, parent: Option<NodeId>) -> NodeId {
        self.push(symbol, parent, NodeKind::Inner)
    }

    /// Mark an opened inner node as complete.
    fn commit(&mut self, id: NodeId) {
        self.commits.push(id);
    }

    /// Push and commit a leaf for a matched token.
    fn leaf(&mut self, lexeme: &str, parent: Option<NodeId>) -> NodeId {
        let id = self.push(lexeme, parent, NodeKind::Leaf);
        self.commits.push(id);
        id
    }

    fn truncate(&mut self, nodes: usize, commits: usize) {
        self.nodes.truncate(nodes);
        self.commits.truncate(commits);
    }

    /// Assemble the tree rooted at `root`.
    fn finish(mut self, root: NodeId) -> SyntaxTree {
        // Arena order is pre-order, so siblings are appended left to right.
        for i in 0..self.nodes.len() {
            if let Some(parent) = self.nodes[i].parent {
                let child = self.nodes[i].id;
                self.nodes[(parent.0 - 1) as usize].children.push(child);
            }
        }

        let (mut inner, mut leaves) = (Vec::new(), Vec::new());
        for &id in &self.commits {
            if id == root {
                continue;
            }
            match self.nodes[(id.0 - 1) as usize].kind {
                NodeKind::Inner => inner.push(id),
                NodeKind::Leaf => leaves.push(id),
            }
        }

        SyntaxTree::from_parts(root, self.nodes, inner, leaves)
    }
}
