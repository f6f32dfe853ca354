// Structural checks on a finished tree.

use crate::error::{Result, TreeError};
use crate::tree::indexing::{IndexType, NodeIndex};
use crate::tree::SuffixTree;

fn violation<T>(msg: String) -> Result<T> {
    Err(TreeError::Invariant(msg))
}

/// Check the tree's structural invariants and report the first one that is broken.
///
/// Walks the tree from the root, so nodes that were allocated but never attached are
/// reported as well.
pub fn verify<Ix: IndexType>(tree: &SuffixTree<Ix>) -> Result<()> {
    let n = tree.len();
    let root = tree.get_root();
    let root_node = tree.get_node(root);
    if root_node.get_id() != n || root_node.get_depth() != 0 || root_node.get_parent().is_some() {
        return violation(format!("root {:?} is malformed", root_node));
    }
    if root_node.get_suffix_link() != Some(root) {
        return violation("root does not link to itself".to_string());
    }

    let mut seen_ids = vec![false; tree.node_count()];
    let mut leaves = 0;
    let mut visited = 0;
    let mut stack: Vec<NodeIndex<Ix>> = vec![root];
    while let Some(idx) = stack.pop() {
        visited += 1;
        let node = tree.get_node(idx);
        let id = node.get_id();
        if id >= seen_ids.len() || seen_ids[id] {
            return violation(format!("node id {} is out of range or repeated", id));
        }
        seen_ids[id] = true;

        if idx != root {
            check_edge(tree, idx)?;
        }
        if tree.is_leaf(idx) {
            leaves += 1;
            let span = node.get_span();
            if node.n_children() != 0 || span.end != n || node.get_depth() != n - id {
                return violation(format!("leaf {} does not spell suffix {}", id, id));
            }
        } else if idx != root && node.n_children() < 2 {
            return violation(format!(
                "internal node {} has {} children",
                id,
                node.n_children()
            ));
        }
        if let Some(link) = node.get_suffix_link() {
            if idx != root && tree.path_label(link) != &tree.path_label(idx)[1..] {
                return violation(format!(
                    "suffix link of node {} points to node {}",
                    id,
                    tree.get_node(link).get_id()
                ));
            }
        }
        for child in tree.children(idx) {
            if tree.get_node(child).get_parent() != Some(idx) {
                return violation(format!(
                    "node {} is a child of {} but points to another parent",
                    tree.get_node(child).get_id(),
                    id
                ));
            }
            stack.push(child);
        }
    }

    if leaves != n {
        return violation(format!("{} leaves for a text of length {}", leaves, n));
    }
    if visited != tree.node_count() {
        return violation(format!(
            "{} of {} nodes are reachable from the root",
            visited,
            tree.node_count()
        ));
    }
    Ok(())
}

fn check_edge<Ix: IndexType>(tree: &SuffixTree<Ix>, idx: NodeIndex<Ix>) -> Result<()> {
    let node = tree.get_node(idx);
    let id = node.get_id();
    let span = node.get_span();
    if span.is_empty() || span.end > tree.len() {
        return violation(format!("node {} has edge {:?}", id, span));
    }
    let parent = match node.get_parent() {
        Some(parent) => parent,
        None => return violation(format!("node {} has no parent", id)),
    };
    let parent_node = tree.get_node(parent);
    if parent_node.get_depth() + span.len() != node.get_depth() {
        return violation(format!("node {} has depth {}", id, node.get_depth()));
    }
    let first = tree.get_text()[span.start];
    if tree.get_child(parent, first) != Some(idx) {
        return violation(format!(
            "node {} is not filed under its first symbol in node {}",
            id,
            parent_node.get_id()
        ));
    }
    Ok(())
}

/// Every node as `(path label, depth, is leaf)`, sorted.
///
/// Two trees over the same text are isomorphic exactly when their signatures are equal,
/// whatever order their nodes were created in.
pub fn path_signature<Ix: IndexType>(tree: &SuffixTree<Ix>) -> Vec<(Vec<u8>, usize, bool)> {
    let mut signature: Vec<_> = tree
        .nodes()
        .map(|(idx, node)| {
            (
                tree.path_label(idx).to_vec(),
                node.get_depth(),
                tree.is_leaf(idx),
            )
        })
        .collect();
    signature.sort();
    signature
}
