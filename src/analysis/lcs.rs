// Longest common substring of two strings from their generalized suffix tree.
//
// Leaves below `len1` are suffixes of s1, leaves in `len1..len1 + len2` are suffixes of s2,
// and the final leaf is the bare sentinel. Colors are OR-ed together bottom-up; a node that
// sees both colors spells a string occurring in both inputs, up to the s1/s2 boundary.

use serde::{Deserialize, Serialize};

use crate::analysis::stack::DepthFirst;
use crate::error::{Result, TreeError};
use crate::tree::indexing::IndexType;
use crate::tree::SuffixTree;

const FROM_S1: u8 = 0b01;
const FROM_S2: u8 = 0b10;
const NONE: usize = usize::MAX;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommonSubstring {
    pub length: usize,
    pub pos_in_s1: Option<usize>,
    pub pos_in_s2: Option<usize>,
}

impl CommonSubstring {
    /// The substring itself, read out of `s1`.
    pub fn slice<'a>(&self, s1: &'a [u8]) -> &'a [u8] {
        match self.pos_in_s1 {
            Some(pos) => &s1[pos..pos + self.length],
            None => &[],
        }
    }
}

/// Find the longest string occurring in both `s1` and `s2`, given the tree of
/// `s1 + s2 + sentinel`.
///
/// Ties go to the first candidate closed in a post-order walk that visits children in
/// alphabet order.
pub fn longest_common_substring<Ix: IndexType>(
    tree: &SuffixTree<Ix>,
    len1: usize,
    len2: usize,
) -> Result<CommonSubstring> {
    let n = tree.len();
    if len1 + len2 + 1 != n {
        return Err(TreeError::LengthMismatch { len1, len2, n });
    }

    let slots = tree.node_count();
    let mut color = vec![0u8; slots];
    // Smallest s1 suffix below each node, and any s2 suffix below it.
    let mut min_s1 = vec![NONE; slots];
    let mut rep_s2 = vec![NONE; slots];
    let mut best = CommonSubstring::default();

    DepthFirst::new().post_order(tree, tree.get_root(), |idx| {
        let slot = idx.index();
        if tree.is_leaf(idx) {
            let id = tree.get_node(idx).get_id();
            if id < len1 {
                color[slot] = FROM_S1;
                min_s1[slot] = id;
            } else if id < len1 + len2 {
                color[slot] = FROM_S2;
                rep_s2[slot] = id - len1;
            }
            return;
        }

        for child in tree.children(idx) {
            let c = child.index();
            color[slot] |= color[c];
            min_s1[slot] = min_s1[slot].min(min_s1[c]);
            if rep_s2[slot] == NONE {
                rep_s2[slot] = rep_s2[c];
            }
        }
        if color[slot] != FROM_S1 | FROM_S2 || tree.is_root(idx) {
            return;
        }

        // The s1 occurrence must not run past the end of s1.
        let depth = tree.get_node(idx).get_depth();
        let length = depth.min(len1 - min_s1[slot]);
        if length > best.length {
            best = CommonSubstring {
                length,
                pos_in_s1: Some(min_s1[slot]),
                pos_in_s2: Some(rep_s2[slot]),
            };
        }
    });

    tracing::debug!(len1, len2, length = best.length, "longest common substring");
    Ok(best)
}
