//! Structural document form of a tree: `ROOT`, `INNERNODES` and `LEAFNODES`.
//!
//! Parent pointers of inner nodes are not stored; they are implied by the children lists and rebuilt by
//! [`SyntaxTree::from_document`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{IntegrityError, Node, NodeId, NodeKind, SyntaxTree};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeDocument {
    #[serde(rename = "ROOT")]
    pub root: RootEntry,
    #[serde(rename = "INNERNODES")]
    pub inner_nodes: Vec<InnerEntry>,
    #[serde(rename = "LEAFNODES")]
    pub leaf_nodes: Vec<LeafEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootEntry {
    pub id: NodeId,
    pub symbol: String,
    pub children: Vec<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InnerEntry {
    pub id: NodeId,
    pub symbol: String,
    pub children: Vec<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeafEntry {
    pub id: NodeId,
    pub parent: Option<NodeId>,
    pub terminal: String,
}

impl SyntaxTree {
    pub fn to_document(&self) -> TreeDocument {
        let root = self.root();
        TreeDocument {
            root: RootEntry {
                id: root.id,
                symbol: root.symbol.clone(),
                children: root.children.clone(),
            },
            inner_nodes: self
                .inner_nodes()
                .map(|n| InnerEntry {
                    id: n.id,
                    symbol: n.symbol.clone(),
                    children: n.children.clone(),
                })
                .collect(),
            leaf_nodes: self
                .leaf_nodes()
                .map(|n| LeafEntry {
                    id: n.id,
                    parent: n.parent,
                    terminal: n.symbol.clone(),
                })
                .collect(),
        }
    }

    /// Pretty-printed JSON form of [`SyntaxTree::to_document`].
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.to_document())
    }

    /// Rebuild a tree from its document, deriving every parent pointer from the children lists.
    ///
    /// ## Errors
    /// Any [`IntegrityError`] the rebuilt tree exhibits, e.g. a child id with no entry.
    pub fn from_document(doc: &TreeDocument) -> Result<Self, IntegrityError> {
        let mut parents: HashMap<NodeId, NodeId> = HashMap::new();
        let owners = std::iter::once((doc.root.id, &doc.root.children))
            .chain(doc.inner_nodes.iter().map(|n| (n.id, &n.children)));
        for (owner, children) in owners {
            for &child in children {
                parents.insert(child, owner);
            }
        }

        let mut nodes = Vec::with_capacity(1 + doc.inner_nodes.len() + doc.leaf_nodes.len());
        nodes.push(Node {
            id: doc.root.id,
            parent: None,
            symbol: doc.root.symbol.clone(),
            kind: NodeKind::Inner,
            children: doc.root.children.clone(),
        });
        nodes.extend(doc.inner_nodes.iter().map(|n| Node {
            id: n.id,
            parent: parents.get(&n.id).copied(),
            symbol: n.symbol.clone(),
            kind: NodeKind::Inner,
            children: n.children.clone(),
        }));
        nodes.extend(doc.leaf_nodes.iter().map(|n| Node {
            id: n.id,
            parent: parents.get(&n.id).copied(),
            symbol: n.terminal.clone(),
            kind: NodeKind::Leaf,
            children: Vec::new(),
        }));

        let inner = doc.inner_nodes.iter().map(|n| n.id).collect();
        let leaves = doc.leaf_nodes.iter().map(|n| n.id).collect();
        let tree = SyntaxTree::from_parts(doc.root.id, nodes, inner, leaves);
        tree.check_integrity()?;
        Ok(tree)
    }
}
