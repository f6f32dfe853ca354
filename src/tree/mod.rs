pub mod builder;
pub mod display;
pub mod indexing;
mod inserter;
pub mod node;
pub mod span;
pub mod store;
pub mod verify;

pub use self::builder::{Strategy, TreeBuilder};
pub use self::indexing::{DefaultIx, IndexType, NodeIndex};
pub use self::node::Node;
pub use self::span::Span;

use crate::alphabet::Alphabet;
use crate::error::Result;
use crate::tree::store::NodeStore;

/// A suffix tree over a sentinel-terminated text.
///
/// Leaf `i` spells the suffix starting at `i`. A generalized tree over two strings is just
/// the tree of their concatenation with one sentinel at the end; see [`SuffixTree::build_pair`].
pub struct SuffixTree<Ix = DefaultIx> {
    text: Vec<u8>,
    alphabet: Alphabet,
    store: NodeStore<Ix>,
    root: NodeIndex<Ix>,
}

impl<Ix> SuffixTree<Ix>
where
    Ix: IndexType,
{
    pub fn build(text: &[u8], alphabet: &Alphabet, strategy: Strategy) -> Result<Self> {
        TreeBuilder::new(text, alphabet, strategy)?.finish()
    }

    /// Build the tree of `s1 + s2 + sentinel`.
    pub fn build_pair(
        s1: &[u8],
        s2: &[u8],
        alphabet: &Alphabet,
        strategy: Strategy,
    ) -> Result<Self> {
        let text = alphabet.concat(&[s1, s2])?;
        Self::build(&text, alphabet, strategy)
    }

    pub(crate) fn from_parts(
        text: Vec<u8>,
        alphabet: Alphabet,
        store: NodeStore<Ix>,
        root: NodeIndex<Ix>,
    ) -> Self {
        Self {
            text,
            alphabet,
            store,
            root,
        }
    }

    pub fn get_root(&self) -> NodeIndex<Ix> {
        self.root
    }

    pub fn get_text(&self) -> &[u8] {
        &self.text
    }

    pub fn get_alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Length of the text, sentinel included. Also the number of leaves.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    // A built tree always has at least the sentinel leaf.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.store.len()
    }

    /// Internal nodes, the root included.
    pub fn internal_count(&self) -> usize {
        self.store.len() - self.text.len()
    }

    pub fn get_node(&self, idx: NodeIndex<Ix>) -> &Node<Ix> {
        self.store.get(idx)
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeIndex<Ix>, &Node<Ix>)> {
        self.store.iter()
    }

    pub fn is_leaf(&self, idx: NodeIndex<Ix>) -> bool {
        self.get_node(idx).get_id() < self.text.len()
    }

    pub fn is_root(&self, idx: NodeIndex<Ix>) -> bool {
        idx == self.root
    }

    /// Children of `idx` from left to right.
    pub fn children(&self, idx: NodeIndex<Ix>) -> impl DoubleEndedIterator<Item = NodeIndex<Ix>> + '_ {
        self.get_node(idx).children()
    }

    pub fn get_child(&self, idx: NodeIndex<Ix>, symbol: u8) -> Option<NodeIndex<Ix>> {
        let branch = self.alphabet.index_of(symbol)?;
        self.get_node(idx).get_child(branch)
    }

    pub fn edge_label(&self, idx: NodeIndex<Ix>) -> &[u8] {
        self.get_node(idx).get_span().slice(&self.text)
    }

    /// The string spelled from the root down to `idx`.
    pub fn path_label(&self, idx: NodeIndex<Ix>) -> &[u8] {
        // Edge spans always point into an occurrence of the full path.
        let node = self.get_node(idx);
        let end = node.get_span().end;
        &self.text[end - node.get_depth()..end]
    }
}
