use std::fmt::{Debug, Display, Formatter, Result};

use crate::tree::indexing::{IndexType, NodeIndex};
use crate::tree::SuffixTree;

/// One line per node in pre-order, indented by tree level, e.g.
///
/// ```text
/// [Root id=7] --> [id=7]
///   [Leaf id=6, suffix=6, edge='$']
///   [Internal id=10, edge='a'] --> [id=7]
/// ```
pub struct Outline<'a, Ix> {
    tree: &'a SuffixTree<Ix>,
}

impl<'a, Ix> Outline<'a, Ix> {
    pub fn new(tree: &'a SuffixTree<Ix>) -> Self {
        Self { tree }
    }
}

impl<'a, Ix: IndexType> Display for Outline<'a, Ix> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let tree = self.tree;
        let mut stack: Vec<(NodeIndex<Ix>, usize)> = vec![(tree.get_root(), 0)];
        while let Some((idx, level)) = stack.pop() {
            let node = tree.get_node(idx);
            write!(f, "{}", "  ".repeat(level))?;
            let edge = String::from_utf8_lossy(tree.edge_label(idx));
            if tree.is_root(idx) {
                write!(f, "[Root id={}]", node.get_id())?;
            } else if tree.is_leaf(idx) {
                write!(f, "[Leaf id={}, suffix={}, edge='{}']", node.get_id(), node.get_id(), edge)?;
            } else {
                write!(f, "[Internal id={}, edge='{}']", node.get_id(), edge)?;
            }
            if let Some(link) = node.get_suffix_link() {
                write!(f, " --> [id={}]", tree.get_node(link).get_id())?;
            }
            writeln!(f)?;
            for child in tree.children(idx).rev() {
                stack.push((child, level + 1));
            }
        }
        Ok(())
    }
}

/// Graphviz rendering. Suffix links are drawn dashed.
pub struct Dot<'a, Ix> {
    tree: &'a SuffixTree<Ix>,
}

impl<'a, Ix> Dot<'a, Ix> {
    pub fn new(tree: &'a SuffixTree<Ix>) -> Self {
        Self { tree }
    }
}

fn escape(label: &[u8]) -> String {
    String::from_utf8_lossy(label)
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
}

impl<'a, Ix: IndexType> Debug for Dot<'a, Ix> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let tree = self.tree;
        writeln!(f, "digraph {{")?;
        for (idx, node) in tree.nodes() {
            let shape = if tree.is_leaf(idx) { "box" } else { "circle" };
            writeln!(f, "  {} [shape={}]", node.get_id(), shape)?;
        }
        for (idx, node) in tree.nodes() {
            for child in tree.children(idx) {
                writeln!(
                    f,
                    "  {} -> {} [label=\"{}\"]",
                    node.get_id(),
                    tree.get_node(child).get_id(),
                    escape(tree.edge_label(child))
                )?;
            }
            if let Some(link) = node.get_suffix_link() {
                if !tree.is_root(idx) {
                    writeln!(
                        f,
                        "  {} -> {} [style=dashed]",
                        node.get_id(),
                        tree.get_node(link).get_id()
                    )?;
                }
            }
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::Alphabet;
    use crate::tree::Strategy;

    #[test]
    fn test_outline() {
        let tree: SuffixTree =
            SuffixTree::build(b"aa$", &Alphabet::new(b"a"), Strategy::Linear).unwrap();
        let outline = format!("{}", Outline::new(&tree));
        // Root is 3; splitting "aa$" after "a" creates node 4.
        let expected = "[Root id=3] --> [id=3]\n\
                        \x20 [Leaf id=2, suffix=2, edge='$']\n\
                        \x20 [Internal id=4, edge='a'] --> [id=3]\n\
                        \x20   [Leaf id=1, suffix=1, edge='$']\n\
                        \x20   [Leaf id=0, suffix=0, edge='a$']\n";
        assert_eq!(outline, expected);
    }

    #[test]
    fn test_dot() {
        let tree: SuffixTree =
            SuffixTree::build(b"ab$", &Alphabet::new(b"ab"), Strategy::Naive).unwrap();
        let dot = format!("{:?}", Dot::new(&tree));
        assert!(dot.starts_with("digraph {\n"));
        assert!(dot.contains("  3 [shape=circle]\n"));
        assert!(dot.contains("  3 -> 0 [label=\"ab$\"]\n"));
        assert!(dot.contains("  3 -> 2 [label=\"$\"]\n"));
        assert!(!dot.contains("dashed"));
        assert!(dot.ends_with('}'));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape(b"a\"b\\"), "a\\\"b\\\\");
    }
}
