// Burrows-Wheeler transform read straight off the tree.
//
// A pre-order walk with children in alphabet order meets the leaves in suffix-array order,
// and because the text ends in a unique smallest sentinel, sorting suffixes and sorting
// rotations agree.

use crate::alphabet::Alphabet;
use crate::analysis::stack::DepthFirst;
use crate::error::{Result, Symbol, TreeError};
use crate::tree::indexing::IndexType;
use crate::tree::SuffixTree;

/// Suffix ids in lexicographic order of their suffixes.
pub fn suffix_array<Ix: IndexType>(tree: &SuffixTree<Ix>) -> Vec<usize> {
    let mut order = Vec::with_capacity(tree.len());
    DepthFirst::new().pre_order(tree, tree.get_root(), |idx| {
        if tree.is_leaf(idx) {
            order.push(tree.get_node(idx).get_id());
        }
    });
    order
}

pub fn bwt<Ix: IndexType>(tree: &SuffixTree<Ix>) -> Vec<u8> {
    let text = tree.get_text();
    let n = text.len();
    suffix_array(tree)
        .into_iter()
        .map(|s| if s == 0 { text[n - 1] } else { text[s - 1] })
        .collect()
}

/// Undo [`bwt`] by LF-mapping, starting from the row of the sentinel suffix.
pub fn inverse_bwt(bwt: &[u8], alphabet: &Alphabet) -> Result<Vec<u8>> {
    let n = bwt.len();
    if n == 0 {
        return Err(TreeError::EmptyText);
    }
    alphabet.validate(bwt)?;
    let sentinels = bwt.iter().filter(|&&s| s == alphabet.sentinel()).count();
    if sentinels != 1 {
        return Err(TreeError::MalformedBwt { sentinels });
    }

    let rank = |s: u8| alphabet.index_of(s).unwrap_or_default();
    // first[c]: row of the first rotation starting with symbol c.
    let mut first = vec![0usize; alphabet.len() + 1];
    for &s in bwt {
        first[rank(s) + 1] += 1;
    }
    for c in 1..first.len() {
        first[c] += first[c - 1];
    }
    let mut seen = vec![0usize; alphabet.len()];
    let lf: Vec<usize> = bwt
        .iter()
        .map(|&s| {
            let c = rank(s);
            seen[c] += 1;
            first[c] + seen[c] - 1
        })
        .collect();

    let mut text = vec![alphabet.sentinel(); n];
    let mut row = 0;
    for k in (0..n - 1).rev() {
        text[k] = bwt[row];
        row = lf[row];
    }
    // A string that is not a valid BWT walks onto the sentinel too early.
    match text[..n - 1].iter().position(|&s| s == alphabet.sentinel()) {
        Some(position) => Err(TreeError::SentinelInText {
            symbol: Symbol(alphabet.sentinel()),
            position,
        }),
        None => Ok(text),
    }
}
