use serde::{Deserialize, Serialize};

use crate::analysis::enumerate::leaves_below;
use crate::analysis::stack::DepthFirst;
use crate::tree::indexing::{IndexType, NodeIndex};
use crate::tree::SuffixTree;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repeat {
    pub length: usize,
    /// Every start position of the repeat, ascending.
    pub positions: Vec<usize>,
}

/// The longest substring occurring at least twice.
///
/// This is the deepest internal node other than the root; on ties the first one closed in
/// post-order wins. A text with no repeated symbol gives length 0 and no positions.
pub fn longest_repeat<Ix: IndexType>(tree: &SuffixTree<Ix>) -> Repeat {
    let mut deepest: Option<NodeIndex<Ix>> = None;
    let mut best_depth = 0;
    DepthFirst::new().post_order(tree, tree.get_root(), |idx| {
        if tree.is_leaf(idx) || tree.is_root(idx) {
            return;
        }
        let node = tree.get_node(idx);
        if node.n_children() >= 2 && node.get_depth() > best_depth {
            best_depth = node.get_depth();
            deepest = Some(idx);
        }
    });

    match deepest {
        Some(idx) => {
            let mut positions = leaves_below(tree, idx);
            positions.sort_unstable();
            Repeat {
                length: best_depth,
                positions,
            }
        }
        None => Repeat::default(),
    }
}
