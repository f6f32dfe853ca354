// Arena owning every node of a suffix tree.
//
// Node ids follow the tree's numbering (leaves 0..n by suffix, internal nodes n.. in
// creation order) and are independent of arena slots. The id counter for internal nodes
// lives here, so separate builds never share state.

use crate::error::{Result, TreeError};
use crate::tree::indexing::{DefaultIx, IndexType, NodeIndex};
use crate::tree::node::Node;
use crate::tree::span::Span;

pub struct NodeStore<Ix = DefaultIx> {
    nodes: Vec<Node<Ix>>,
    alphabet_size: usize,
    n_leaves: usize,
    next_internal_id: usize,
}

impl<Ix> NodeStore<Ix>
where
    Ix: IndexType,
{
    /// Reserve room for the worst case of `2n` nodes up front.
    pub fn with_capacity(n_leaves: usize, alphabet_size: usize) -> Result<Self> {
        let mut nodes = Vec::new();
        let requested = 2 * n_leaves;
        nodes
            .try_reserve_exact(requested)
            .map_err(|_| TreeError::Allocation { requested })?;
        Ok(Self {
            nodes,
            alphabet_size,
            n_leaves,
            next_internal_id: n_leaves,
        })
    }

    pub fn add_root(&mut self) -> Result<NodeIndex<Ix>> {
        let id = self.take_internal_id();
        let root = Node::new_branch(id, Span::empty(), 0, None, self.alphabet_size);
        let idx = self.push(root)?;
        self.nodes[idx.index()].suffix_link = Some(idx);
        Ok(idx)
    }

    /// Attach leaf `suffix` below `parent` with the given edge label.
    pub fn add_leaf(
        &mut self,
        parent: NodeIndex<Ix>,
        span: Span,
        suffix: usize,
    ) -> Result<NodeIndex<Ix>> {
        let depth = self.get(parent).depth + span.len();
        self.push(Node::new_leaf(suffix, span, depth, parent))
    }

    /// New internal node below `parent`. The caller wires up the children.
    pub fn add_internal(&mut self, parent: NodeIndex<Ix>, span: Span) -> Result<NodeIndex<Ix>> {
        let id = self.take_internal_id();
        let depth = self.get(parent).depth + span.len();
        let node = Node::new_branch(id, span, depth, Some(parent), self.alphabet_size);
        self.push(node)
    }

    fn take_internal_id(&mut self) -> usize {
        let id = self.next_internal_id;
        self.next_internal_id += 1;
        id
    }

    fn push(&mut self, node: Node<Ix>) -> Result<NodeIndex<Ix>> {
        let nodes = self.nodes.len();
        let idx = NodeIndex::checked_new(nodes).ok_or(TreeError::Capacity { nodes })?;
        self.nodes
            .try_reserve(1)
            .map_err(|_| TreeError::Allocation { requested: 1 })?;
        self.nodes.push(node);
        Ok(idx)
    }

    #[inline]
    pub fn get(&self, idx: NodeIndex<Ix>) -> &Node<Ix> {
        &self.nodes[idx.index()]
    }

    #[inline]
    pub fn get_mut(&mut self, idx: NodeIndex<Ix>) -> &mut Node<Ix> {
        &mut self.nodes[idx.index()]
    }

    #[inline]
    pub fn child(&self, idx: NodeIndex<Ix>, branch: usize) -> Option<NodeIndex<Ix>> {
        self.get(idx).get_child(branch)
    }

    pub fn set_child(&mut self, idx: NodeIndex<Ix>, branch: usize, child: NodeIndex<Ix>) {
        self.get_mut(idx).children[branch] = Some(child);
    }

    pub fn set_suffix_link(&mut self, idx: NodeIndex<Ix>, link: NodeIndex<Ix>) {
        let node = self.get_mut(idx);
        debug_assert!(node.suffix_link.is_none() || node.suffix_link == Some(link));
        node.suffix_link = Some(link);
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn n_leaves(&self) -> usize {
        self.n_leaves
    }

    pub fn alphabet_size(&self) -> usize {
        self.alphabet_size
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeIndex<Ix>, &Node<Ix>)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(slot, node)| (NodeIndex::new(slot), node))
    }
}
