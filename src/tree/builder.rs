// Construction engine.
//
// Suffixes are inserted one at a time, longest first. The naive strategy descends from the
// root for every suffix. The linear strategy starts each insertion from the suffix link of
// the node the previous leaf was hung under, creating that link by node hopping when it
// does not exist yet. After the i-th insertion at most one internal node (the parent of
// leaf i) is missing its suffix link.
//
// The builder can be driven step by step so that callers can report progress.

use serde::{Deserialize, Serialize};

use crate::alphabet::Alphabet;
use crate::error::{Result, Symbol, TreeError};
use crate::tree::indexing::{DefaultIx, IndexType, NodeIndex};
use crate::tree::store::NodeStore;
use crate::tree::SuffixTree;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Descend from the root for every suffix. Quadratic in the worst case.
    Naive,
    /// Suffix links and node hopping. Linear for a fixed alphabet.
    #[default]
    Linear,
}

pub struct TreeBuilder<Ix = DefaultIx> {
    pub(crate) text: Vec<u8>,
    // Branch index of every text position.
    pub(crate) ranks: Vec<u8>,
    pub(crate) alphabet: Alphabet,
    pub(crate) store: NodeStore<Ix>,
    pub(crate) root: NodeIndex<Ix>,
    strategy: Strategy,
    next_suffix: usize,
    // Parent of the most recently inserted leaf.
    last_parent: Option<NodeIndex<Ix>>,
}

impl<Ix> TreeBuilder<Ix>
where
    Ix: IndexType,
{
    /// Check `text` against `alphabet` and set up an empty tree.
    ///
    /// All input errors are raised here, before the root is allocated.
    pub fn new(text: &[u8], alphabet: &Alphabet, strategy: Strategy) -> Result<Self> {
        let ranks = Self::rank_text(text, alphabet)?;
        let mut store = NodeStore::with_capacity(text.len(), alphabet.len())?;
        let root = store.add_root()?;
        tracing::debug!(n = text.len(), sigma = alphabet.len(), ?strategy, "starting build");
        Ok(Self {
            text: text.to_vec(),
            ranks,
            alphabet: alphabet.clone(),
            store,
            root,
            strategy,
            next_suffix: 0,
            last_parent: None,
        })
    }

    fn rank_text(text: &[u8], alphabet: &Alphabet) -> Result<Vec<u8>> {
        let last = match text.last() {
            Some(&last) => last,
            None => return Err(TreeError::EmptyText),
        };
        alphabet.validate(text)?;
        if let Some(position) = text[..text.len() - 1].iter().position(|&s| s == last) {
            return Err(TreeError::UnterminatedText {
                symbol: Symbol(last),
                position,
            });
        }
        // validate() has already accepted every symbol.
        Ok(text
            .iter()
            .map(|&s| alphabet.index_of(s).unwrap_or_default() as u8)
            .collect())
    }

    #[inline]
    pub(crate) fn branch(&self, pos: usize) -> usize {
        self.ranks[pos] as usize
    }

    /// Number of suffixes the finished tree will hold.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn n_inserted(&self) -> usize {
        self.next_suffix
    }

    pub fn is_done(&self) -> bool {
        self.next_suffix == self.text.len()
    }

    /// Insert the next suffix. Returns `false` once every suffix is in the tree.
    pub fn step(&mut self) -> Result<bool> {
        if self.is_done() {
            return Ok(false);
        }
        let suffix = self.next_suffix;
        let parent = match (self.strategy, self.last_parent) {
            (Strategy::Linear, Some(u)) => self.insert_linked(u, suffix)?,
            _ => self.find_path(self.root, suffix, suffix)?,
        };
        self.last_parent = Some(parent);
        self.next_suffix += 1;
        Ok(true)
    }

    // Insert `suffix` given the parent `u` of leaf `suffix - 1`.
    fn insert_linked(&mut self, u: NodeIndex<Ix>, suffix: usize) -> Result<NodeIndex<Ix>> {
        let node = self.store.get(u);
        let v = match node.get_suffix_link() {
            Some(v) => v,
            None => {
                let beta = node.get_span();
                let parent = match node.get_parent() {
                    Some(parent) => parent,
                    // Only the root lacks a parent, and the root links to itself.
                    None => {
                        return Err(TreeError::UnsetSuffixLink {
                            node: node.get_id(),
                            suffix,
                        })
                    }
                };
                let v = if parent == self.root {
                    tracing::trace!(suffix, "hopping from the root");
                    self.node_hops(self.root, beta.skip(1), suffix)?
                } else {
                    let parent_node = self.store.get(parent);
                    let start = parent_node.get_suffix_link().ok_or(TreeError::UnsetSuffixLink {
                        node: parent_node.get_id(),
                        suffix,
                    })?;
                    tracing::trace!(suffix, "hopping from the parent's suffix link");
                    self.node_hops(start, beta, suffix)?
                };
                self.store.set_suffix_link(u, v);
                v
            }
        };
        let depth = self.store.get(v).get_depth();
        self.find_path(v, suffix, suffix + depth)
    }

    /// Insert every remaining suffix and hand over the finished tree.
    pub fn finish(mut self) -> Result<SuffixTree<Ix>> {
        while self.step()? {}
        tracing::debug!(
            n = self.text.len(),
            nodes = self.store.len(),
            strategy = ?self.strategy,
            "finished build"
        );
        Ok(SuffixTree::from_parts(
            self.text,
            self.alphabet,
            self.store,
            self.root,
        ))
    }
}
