use crate::tree::indexing::{DefaultIx, IndexType, NodeIndex};
use crate::tree::span::Span;

/// A root, internal or leaf node.
///
/// `span` labels the edge coming in from `parent`. Leaves are created with an empty
/// children table since nothing is ever inserted below a leaf; internal nodes (and the
/// root) get one slot per alphabet symbol.
#[derive(Clone, Debug)]
pub struct Node<Ix = DefaultIx> {
    pub(crate) id: usize,
    pub(crate) span: Span,
    pub(crate) depth: usize,
    pub(crate) parent: Option<NodeIndex<Ix>>,
    pub(crate) suffix_link: Option<NodeIndex<Ix>>,
    pub(crate) children: Box<[Option<NodeIndex<Ix>>]>,
}

impl<Ix> Node<Ix>
where
    Ix: IndexType,
{
    pub fn new_branch(
        id: usize,
        span: Span,
        depth: usize,
        parent: Option<NodeIndex<Ix>>,
        alphabet_size: usize,
    ) -> Self {
        Self {
            id,
            span,
            depth,
            parent,
            suffix_link: None,
            children: vec![None; alphabet_size].into_boxed_slice(),
        }
    }

    pub fn new_leaf(id: usize, span: Span, depth: usize, parent: NodeIndex<Ix>) -> Self {
        Self {
            id,
            span,
            depth,
            parent: Some(parent),
            suffix_link: None,
            children: Box::new([]),
        }
    }

    pub fn get_id(&self) -> usize {
        self.id
    }

    pub fn get_span(&self) -> Span {
        self.span
    }

    pub fn get_depth(&self) -> usize {
        self.depth
    }

    pub fn get_parent(&self) -> Option<NodeIndex<Ix>> {
        self.parent
    }

    pub fn get_suffix_link(&self) -> Option<NodeIndex<Ix>> {
        self.suffix_link
    }

    #[inline]
    pub fn get_child(&self, branch: usize) -> Option<NodeIndex<Ix>> {
        self.children.get(branch).copied().flatten()
    }

    /// Children in branch order, i.e. lexicographic order of their edge labels.
    pub fn children(&self) -> impl DoubleEndedIterator<Item = NodeIndex<Ix>> + '_ {
        self.children.iter().filter_map(|child| *child)
    }

    pub fn n_children(&self) -> usize {
        self.children.iter().filter(|child| child.is_some()).count()
    }

    pub fn edge_len(&self) -> usize {
        self.span.len()
    }
}
