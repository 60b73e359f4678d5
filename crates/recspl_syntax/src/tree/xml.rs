//! `<SYNTREE>` writer.

use super::{NodeId, SyntaxTree};
use crate::xml::XmlWriter;

impl SyntaxTree {
    /// Render the tree as a `<SYNTREE>` document: root, then inner nodes, then leaves, each section in
    /// collection order.
    pub fn to_xml(&self) -> String {
        let mut w = XmlWriter::new();
        w.open("SYNTREE");

        let root = self.root();
        w.open("ROOT");
        w.element("UNID", root.id);
        w.element("SYMB", &root.symbol);
        write_children(&mut w, &root.children);
        w.close("ROOT");

        w.open("INNERNODES");
        for node in self.inner_nodes() {
            w.open("IN");
            w.element("UNID", node.id);
            w.element("SYMB", &node.symbol);
            write_children(&mut w, &node.children);
            w.close("IN");
        }
        w.close("INNERNODES");

        w.open("LEAFNODES");
        for node in self.leaf_nodes() {
            w.open("LEAF");
            if let Some(parent) = node.parent {
                w.element("PARENT", parent);
            }
            w.element("UNID", node.id);
            w.element("TERMINAL", &node.symbol);
            w.close("LEAF");
        }
        w.close("LEAFNODES");

        w.close("SYNTREE");
        w.finish()
    }
}

fn write_children(w: &mut XmlWriter, children: &[NodeId]) {
    w.open("CHILDREN");
    for child in children {
        w.element("ID", child);
    }
    w.close("CHILDREN");
}

#[cfg(test)]
mod tests {
    use crate::tree::{InnerEntry, LeafEntry, NodeId, RootEntry, SyntaxTree, TreeDocument};

    #[test]
    fn test_layout_and_escaping() {
        let doc = TreeDocument {
            root: RootEntry {
                id: NodeId(1),
                symbol: "S".into(),
                children: vec![NodeId(2), NodeId(3)],
            },
            inner_nodes: vec![InnerEntry {
                id: NodeId(3),
                symbol: "E".into(),
                children: vec![],
            }],
            leaf_nodes: vec![LeafEntry {
                id: NodeId(2),
                parent: Some(NodeId(1)),
                terminal: "<".into(),
            }],
        };
        let xml = SyntaxTree::from_document(&doc).unwrap().to_xml();
        let expected = "<SYNTREE>\n\
            \t<ROOT>\n\t\t<UNID>1</UNID>\n\t\t<SYMB>S</SYMB>\n\t\t<CHILDREN>\n\t\t\t<ID>2</ID>\n\t\t\t<ID>3</ID>\n\t\t</CHILDREN>\n\t</ROOT>\n\
            \t<INNERNODES>\n\t\t<IN>\n\t\t\t<UNID>3</UNID>\n\t\t\t<SYMB>E</SYMB>\n\t\t\t<CHILDREN>\n\t\t\t</CHILDREN>\n\t\t</IN>\n\t</INNERNODES>\n\
            \t<LEAFNODES>\n\t\t<LEAF>\n\t\t\t<PARENT>1</PARENT>\n\t\t\t<UNID>2</UNID>\n\t\t\t<TERMINAL>&lt;</TERMINAL>\n\t\t</LEAF>\n\t</LEAFNODES>\n\
            </SYNTREE>\n";
        assert_eq!(xml, expected);
    }
}
