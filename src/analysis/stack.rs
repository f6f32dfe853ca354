use crate::tree::indexing::{IndexType, NodeIndex};
use crate::tree::SuffixTree;

/// A node on the stack, that should either be opened or closed.
#[derive(Clone, Copy, Debug)]
struct StackOp<Ix> {
    state: NodeIndex<Ix>,
    open: bool,
}

impl<Ix> StackOp<Ix> {
    fn open(state: NodeIndex<Ix>) -> Self {
        Self { state, open: true }
    }

    fn close(state: NodeIndex<Ix>) -> Self {
        Self { state, open: false }
    }
}

/// Explicit-stack DFS over a suffix tree. Children are visited in alphabet order, so
/// recursion depth never depends on the text.
///
/// The stack is empty again after every traversal, so one `DepthFirst` can be reused
/// without reallocating.
pub struct DepthFirst<Ix> {
    stack: Vec<StackOp<Ix>>,
}

impl<Ix> Default for DepthFirst<Ix> {
    fn default() -> Self {
        Self { stack: Vec::new() }
    }
}

impl<Ix> DepthFirst<Ix>
where
    Ix: IndexType,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Call `on_open` on every node below `start` (inclusive) before any of its children.
    pub fn pre_order<F>(&mut self, tree: &SuffixTree<Ix>, start: NodeIndex<Ix>, mut on_open: F)
    where
        F: FnMut(NodeIndex<Ix>),
    {
        self.stack.push(StackOp::open(start));
        while let Some(op) = self.stack.pop() {
            on_open(op.state);
            // Reversed, so that the leftmost child is popped first.
            for child in tree.children(op.state).rev() {
                self.stack.push(StackOp::open(child));
            }
        }
    }

    /// Call `on_close` on every node below `start` (inclusive) after all of its children.
    pub fn post_order<F>(&mut self, tree: &SuffixTree<Ix>, start: NodeIndex<Ix>, mut on_close: F)
    where
        F: FnMut(NodeIndex<Ix>),
    {
        self.stack.push(StackOp::open(start));
        while let Some(op) = self.stack.pop() {
            if op.open {
                self.stack.push(StackOp::close(op.state));
                for child in tree.children(op.state).rev() {
                    self.stack.push(StackOp::open(child));
                }
            } else {
                on_close(op.state);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::Alphabet;
    use crate::tree::Strategy;

    fn ids(tree: &SuffixTree, order: &[NodeIndex]) -> Vec<usize> {
        order.iter().map(|&idx| tree.get_node(idx).get_id()).collect()
    }

    #[test]
    fn test_orders() {
        let tree: SuffixTree =
            SuffixTree::build(b"aa$", &Alphabet::new(b"a"), Strategy::Linear).unwrap();

        let mut opened = Vec::new();
        DepthFirst::new().pre_order(&tree, tree.get_root(), |idx| opened.push(idx));
        assert_eq!(ids(&tree, &opened), vec![3, 2, 4, 1, 0]);

        let mut closed = Vec::new();
        DepthFirst::new().post_order(&tree, tree.get_root(), |idx| closed.push(idx));
        assert_eq!(ids(&tree, &closed), vec![2, 1, 0, 4, 3]);
    }

    #[test]
    fn test_subtree_and_reuse() {
        let tree: SuffixTree =
            SuffixTree::build(b"aa$", &Alphabet::new(b"a"), Strategy::Linear).unwrap();
        let a = tree.get_child(tree.get_root(), b'a').unwrap();

        let mut dfs = DepthFirst::new();
        let mut closed = Vec::new();
        dfs.post_order(&tree, a, |idx| closed.push(idx));
        assert_eq!(ids(&tree, &closed), vec![1, 0, 4]);
        assert!(dfs.stack.is_empty());

        // A second walk over the same stack sees the whole tree again.
        let mut opened = Vec::new();
        dfs.pre_order(&tree, tree.get_root(), |idx| opened.push(idx));
        assert_eq!(ids(&tree, &opened), vec![3, 2, 4, 1, 0]);
    }
}
