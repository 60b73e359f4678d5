//! Syntax tree produced by the parser.
//!
//! Nodes live in an id-keyed map; the tree additionally keeps two ordered collections, one for inner
//! nodes and one for leaves, in the order the parser committed them. The root is held separately and is
//! not a member of the inner collection.
//!
//! ## Invariants
//! - Every id is unique.
//! - Every non-root node appears in exactly one children list, and its `parent` names that list's owner.
//! - Every child id resolves to a node of the tree.
//! - Leaves have no children.
//!
//! [`SyntaxTree::check_integrity`] verifies all of these. [`SyntaxTree::remove_node`] preserves them.

mod document;
mod xml;

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use document::{InnerEntry, LeafEntry, RootEntry, TreeDocument};

/// Identifier of a node, unique within one tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// A nonterminal derivation step. An inner node without children is an epsilon derivation.
    Inner,
    /// A matched token.
    Leaf,
}

/// One tree node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: NodeId,
    pub parent: Option<NodeId>,
    /// Nonterminal name for inner nodes, the matched lexeme for leaves.
    pub symbol: String,
    pub kind: NodeKind,
    pub children: Vec<NodeId>,
}

impl Node {
    pub fn is_leaf(&self) -> bool {
        self.kind == NodeKind::Leaf
    }

    pub fn is_inner(&self) -> bool {
        self.kind == NodeKind::Inner
    }
}

/// Id-free structural form of a subtree. Two trees with equal shapes are isomorphic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    pub symbol: String,
    pub kind: NodeKind,
    pub children: Vec<Shape>,
}

/// A structural invariant that does not hold.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntegrityError {
    #[error("root {0} has a parent")]
    RootHasParent(NodeId),
    #[error("node {parent} lists unknown child {child}")]
    DanglingChild { parent: NodeId, child: NodeId },
    #[error("node {child} is listed as a child {count} times")]
    SharedChild { child: NodeId, count: usize },
    #[error("node {0} is not reachable from the root")]
    Orphan(NodeId),
    #[error("node {0} is reached again while walking down from the root")]
    Cycle(NodeId),
    #[error("node {node} records parent {recorded:?}, but is listed under {actual:?}")]
    ParentMismatch {
        node: NodeId,
        recorded: Option<NodeId>,
        actual: Option<NodeId>,
    },
    #[error("leaf {0} has children")]
    LeafWithChildren(NodeId),
    #[error("node {0} is missing from, or duplicated in, the inner/leaf collections")]
    CollectionMismatch(NodeId),
}

/// Failure of a tree edit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("no node with id {0}")]
    UnknownNode(NodeId),
    #[error("the root node cannot be removed")]
    RootRemoval,
}

/// An identified syntax tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxTree {
    root: NodeId,
    nodes: BTreeMap<NodeId, Node>,
    inner: Vec<NodeId>,
    leaves: Vec<NodeId>,
}

impl SyntaxTree {
    /// Assemble a tree from parser output. The parser guarantees the invariants.
    pub(crate) fn from_parts(root: NodeId, nodes: Vec<Node>, inner: Vec<NodeId>, leaves: Vec<NodeId>) -> Self {
        Self {
            root,
            nodes: nodes.into_iter().map(|n| (n.id, n)).collect(),
            inner,
            leaves,
        }
    }

    pub fn root(&self) -> &Node {
        &self.nodes[&self.root]
    }

    pub fn root_id(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Inner nodes in commit order, root excluded.
    pub fn inner_nodes(&self) -> impl Iterator<Item = &Node> {
        self.inner.iter().filter_map(|id| self.nodes.get(id))
    }

    /// Leaf nodes in commit order, which is also left-to-right input order.
    pub fn leaf_nodes(&self) -> impl Iterator<Item = &Node> {
        self.leaves.iter().filter_map(|id| self.nodes.get(id))
    }

    /// Total number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Ordered child ids of `id`; empty for leaves and unknown ids.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(&id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(&id).and_then(|n| n.parent)
    }

    /// All proper descendants of `id`, in pre-order.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    /// Leaf lexemes below `id`, left to right.
    pub fn frontier(&self, id: NodeId) -> Vec<&str> {
        std::iter::once(id)
            .chain(self.descendants(id))
            .filter_map(|n| self.nodes.get(&n))
            .filter(|n| n.is_leaf())
            .map(|n| n.symbol.as_str())
            .collect()
    }

    /// Id-free structure of the whole tree.
    pub fn shape(&self) -> Shape {
        self.shape_of(self.root)
    }

    fn shape_of(&self, id: NodeId) -> Shape {
        let node = &self.nodes[&id];
        Shape {
            symbol: node.symbol.clone(),
            kind: node.kind,
            children: node.children.iter().map(|&c| self.shape_of(c)).collect(),
        }
    }

    /// Verify every structural invariant.
    pub fn check_integrity(&self) -> Result<(), IntegrityError> {
        let root = self.root();
        if root.parent.is_some() {
            return Err(IntegrityError::RootHasParent(self.root));
        }

        let mut listed_under: HashMap<NodeId, (NodeId, usize)> = HashMap::new();
        for node in self.nodes.values() {
            if node.is_leaf() && !node.children.is_empty() {
                return Err(IntegrityError::LeafWithChildren(node.id));
            }
            for &child in &node.children {
                if !self.nodes.contains_key(&child) {
                    return Err(IntegrityError::DanglingChild {
                        parent: node.id,
                        child,
                    });
                }
                listed_under.entry(child).or_insert((node.id, 0)).1 += 1;
            }
        }

        for node in self.nodes.values() {
            if node.id == self.root {
                continue;
            }
            let Some(&(owner, count)) = listed_under.get(&node.id) else {
                return Err(IntegrityError::Orphan(node.id));
            };
            if count > 1 {
                return Err(IntegrityError::SharedChild { child: node.id, count });
            }
            if node.parent != Some(owner) {
                return Err(IntegrityError::ParentMismatch {
                    node: node.id,
                    recorded: node.parent,
                    actual: Some(owner),
                });
            }
        }

        // Each non-root node has exactly one owner by now, but a loop of owners can still be detached
        // from the root, or pass back through it.
        let mut reached = HashSet::with_capacity(self.nodes.len());
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            if !reached.insert(id) {
                return Err(IntegrityError::Cycle(id));
            }
            stack.extend(self.children(id).iter().copied());
        }
        if let Some(unreached) = self.nodes.keys().find(|id| !reached.contains(id)) {
            return Err(IntegrityError::Orphan(*unreached));
        }

        let mut seen = HashSet::with_capacity(self.nodes.len());
        seen.insert(self.root);
        let collections = self
            .inner
            .iter()
            .map(|id| (id, NodeKind::Inner))
            .chain(self.leaves.iter().map(|id| (id, NodeKind::Leaf)));
        for (&id, kind) in collections {
            let matches_kind = self.nodes.get(&id).is_some_and(|n| n.kind == kind);
            if !matches_kind || !seen.insert(id) {
                return Err(IntegrityError::CollectionMismatch(id));
            }
        }
        if let Some(missing) = self.nodes.keys().find(|id| !seen.contains(id)) {
            return Err(IntegrityError::CollectionMismatch(*missing));
        }

        Ok(())
    }

    /// Remove `id` and its whole subtree.
    ///
    /// The node is detached from its parent's children list and every removed node leaves whichever
    /// collection held it. Returns the removed ids in pre-order, `id` first.
    ///
    /// ## Errors
    /// - [`TreeError::RootRemoval`] for the root.
    /// - [`TreeError::UnknownNode`] if `id` is not in the tree.
    pub fn remove_node(&mut self, id: NodeId) -> Result<Vec<NodeId>, TreeError> {
        if id == self.root {
            return Err(TreeError::RootRemoval);
        }
        let parent = match self.nodes.get(&id) {
            Some(node) => node.parent,
            None => return Err(TreeError::UnknownNode(id)),
        };

        if let Some(parent) = parent.and_then(|p| self.nodes.get_mut(&p)) {
            parent.children.retain(|&c| c != id);
        }

        let mut removed = vec![id];
        removed.extend(self.descendants(id));
        let gone: HashSet<NodeId> = removed.iter().copied().collect();

        for r in &removed {
            self.nodes.remove(r);
        }
        self.inner.retain(|n| !gone.contains(n));
        self.leaves.retain(|n| !gone.contains(n));

        tracing::debug!(node = %id, removed = removed.len(), "removed subtree");
        Ok(removed)
    }
}
