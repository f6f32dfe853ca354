// Node listings used by the printers, the BWT and the repeat finder.

use crate::analysis::stack::DepthFirst;
use crate::tree::indexing::{IndexType, NodeIndex};
use crate::tree::SuffixTree;

/// Ids of the children of `idx`, left to right.
pub fn children_ids<Ix: IndexType>(tree: &SuffixTree<Ix>, idx: NodeIndex<Ix>) -> Vec<usize> {
    tree.children(idx)
        .map(|child| tree.get_node(child).get_id())
        .collect()
}

/// Every node in DFS pre-order.
pub fn pre_order<Ix: IndexType>(tree: &SuffixTree<Ix>) -> Vec<NodeIndex<Ix>> {
    let mut order = Vec::with_capacity(tree.node_count());
    DepthFirst::new().pre_order(tree, tree.get_root(), |idx| order.push(idx));
    order
}

/// String depth of every node in DFS pre-order.
pub fn string_depths<Ix: IndexType>(tree: &SuffixTree<Ix>) -> Vec<usize> {
    pre_order(tree)
        .into_iter()
        .map(|idx| tree.get_node(idx).get_depth())
        .collect()
}

/// Suffix ids of all leaves below `idx`, in lexicographic order of the suffixes.
pub fn leaves_below<Ix: IndexType>(tree: &SuffixTree<Ix>, idx: NodeIndex<Ix>) -> Vec<usize> {
    let mut leaves = Vec::new();
    DepthFirst::new().pre_order(tree, idx, |v| {
        if tree.is_leaf(v) {
            leaves.push(tree.get_node(v).get_id());
        }
    });
    leaves
}
