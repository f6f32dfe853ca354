// Path insertion, edge splitting and node hopping.
//
// All three work on spans into the text. `find_path` compares symbols one at a time;
// `node_hops` only ever looks at the first symbol and the length of each edge, which is
// what keeps the linear strategy linear.

use crate::error::{Result, Symbol, TreeError};
use crate::tree::builder::TreeBuilder;
use crate::tree::indexing::{IndexType, NodeIndex};
use crate::tree::span::Span;

impl<Ix> TreeBuilder<Ix>
where
    Ix: IndexType,
{
    /// Insert suffix `suffix` below `v`, resuming the comparison at text position `pos`.
    ///
    /// The caller guarantees that the path to `v` spells `text[suffix..pos]`.
    /// Returns the parent of the new leaf, which is the new internal node if an edge had
    /// to be split.
    pub(crate) fn find_path(
        &mut self,
        mut v: NodeIndex<Ix>,
        suffix: usize,
        mut pos: usize,
    ) -> Result<NodeIndex<Ix>> {
        let n = self.text.len();
        debug_assert_eq!(self.store.get(v).get_depth(), pos - suffix);
        loop {
            if pos >= n {
                return Err(TreeError::SuffixAbsorbed { suffix });
            }
            let branch = self.branch(pos);
            let child = match self.store.child(v, branch) {
                Some(child) => child,
                None => {
                    let leaf = self.store.add_leaf(v, Span::new(pos, n), suffix)?;
                    self.store.set_child(v, branch, leaf);
                    return Ok(v);
                }
            };

            let span = self.store.get(child).get_span();
            let matched = self.match_len(span, pos);
            if matched == span.len() {
                v = child;
                pos += matched;
                continue;
            }

            let w = self.split_edge(v, child, matched, suffix)?;
            let rest = pos + matched;
            let leaf = self.store.add_leaf(w, Span::new(rest, n), suffix)?;
            self.store.set_child(w, self.branch(rest), leaf);
            return Ok(w);
        }
    }

    /// Walk down from `from` along the symbols of `beta`, jumping whole edges.
    ///
    /// The path `beta` must exist below `from`. If it ends inside an edge, that edge is
    /// split so that the returned node sits at depth `depth(from) + |beta|` exactly.
    pub(crate) fn node_hops(
        &mut self,
        from: NodeIndex<Ix>,
        beta: Span,
        suffix: usize,
    ) -> Result<NodeIndex<Ix>> {
        let mut v = from;
        let mut pos = beta.start;
        let mut remaining = beta.len();
        while remaining > 0 {
            let child = match self.store.child(v, self.branch(pos)) {
                Some(child) => child,
                None => {
                    return Err(TreeError::MissingChild {
                        node: self.store.get(v).get_id(),
                        suffix,
                        symbol: Symbol(self.text[pos]),
                    })
                }
            };
            let edge_len = self.store.get(child).edge_len();
            if edge_len > remaining {
                return self.split_edge(v, child, remaining, suffix);
            }
            v = child;
            pos += edge_len;
            remaining -= edge_len;
        }
        Ok(v)
    }

    /// Cut the edge `parent -> child` after `offset` symbols and return the new node.
    /// Suffix links are left for the caller.
    pub(crate) fn split_edge(
        &mut self,
        parent: NodeIndex<Ix>,
        child: NodeIndex<Ix>,
        offset: usize,
        suffix: usize,
    ) -> Result<NodeIndex<Ix>> {
        let span = self.store.get(child).get_span();
        if offset == 0 || offset >= span.len() {
            return Err(TreeError::ZeroLengthEdge {
                node: self.store.get(parent).get_id(),
                suffix,
            });
        }
        let (head, tail) = span.split_at(offset);
        let w = self.store.add_internal(parent, head)?;

        let node = self.store.get_mut(child);
        node.span = tail;
        node.parent = Some(w);
        self.store.set_child(w, self.branch(tail.start), child);
        self.store.set_child(parent, self.branch(head.start), w);
        Ok(w)
    }

    // Number of leading symbols shared by the edge label and the text at `pos`.
    fn match_len(&self, span: Span, pos: usize) -> usize {
        let edge = span.slice(&self.ranks);
        let rest = &self.ranks[pos..];
        edge.iter().zip(rest).take_while(|(a, b)| a == b).count()
    }
}

#[cfg(test)]
mod tests {
    use crate::alphabet::Alphabet;
    use crate::error::TreeError;
    use crate::tree::builder::TreeBuilder;
    use crate::tree::span::Span;

    fn builder(text: &[u8]) -> TreeBuilder {
        TreeBuilder::new(text, &Alphabet::new(text), Default::default()).unwrap()
    }

    fn path(b: &TreeBuilder, v: crate::tree::indexing::NodeIndex) -> Vec<u8> {
        let node = b.store.get(v);
        let end = node.get_span().end;
        b.text[end - node.get_depth()..end].to_vec()
    }

    #[test]
    fn test_find_path_attaches_leaf() {
        let mut b = builder(b"ab$");
        let root = b.root;
        let parent = b.find_path(root, 0, 0).unwrap();
        assert_eq!(parent, root);
        let leaf = b.store.child(root, b.branch(0)).unwrap();
        assert_eq!(b.store.get(leaf).get_id(), 0);
        assert_eq!(b.store.get(leaf).get_span(), Span::new(0, 3));
        assert_eq!(b.store.get(leaf).get_depth(), 3);
    }

    #[test]
    fn test_find_path_splits_on_mismatch() {
        // Suffixes 0 ("aab$") then 1 ("ab$") share only "a".
        let mut b = builder(b"aab$");
        let root = b.root;
        b.find_path(root, 0, 0).unwrap();
        let w = b.find_path(root, 1, 1).unwrap();
        assert_ne!(w, root);
        assert_eq!(path(&b, w), b"a".to_vec());
        assert_eq!(b.store.get(w).get_depth(), 1);
        assert_eq!(b.store.get(w).n_children(), 2);
        assert_eq!(b.store.get(w).get_id(), 5);

        let old = b.store.child(w, b.branch(1)).unwrap();
        let new = b.store.child(w, b.branch(2)).unwrap();
        assert_eq!(b.store.get(old).get_id(), 0);
        assert_eq!(b.store.get(old).get_span(), Span::new(1, 4));
        assert_eq!(b.store.get(new).get_id(), 1);
        assert_eq!(b.store.get(new).get_span(), Span::new(2, 4));
        assert_eq!(b.store.get(new).get_depth(), 3);
    }

    #[test]
    fn test_node_hops_lands_inside_edge() {
        let mut b = builder(b"abcab$");
        let root = b.root;
        b.find_path(root, 0, 0).unwrap();
        // Hop "ab" from the root: only one edge "abcab$" exists, so it must be split.
        let v = b.node_hops(root, Span::new(3, 5), 1).unwrap();
        assert_eq!(b.store.get(v).get_depth(), 2);
        assert_eq!(path(&b, v), b"ab".to_vec());
        assert_eq!(b.store.get(v).n_children(), 1);
    }

    #[test]
    fn test_node_hops_lands_on_node() {
        let mut b = builder(b"abab$");
        let root = b.root;
        b.find_path(root, 0, 0).unwrap();
        let w = b.find_path(root, 2, 2).unwrap();
        assert_eq!(path(&b, w), b"ab".to_vec());
        let v = b.node_hops(root, Span::new(0, 2), 3).unwrap();
        assert_eq!(v, w);
        let empty = b.node_hops(root, Span::new(1, 1), 3).unwrap();
        assert_eq!(empty, root);
    }

    #[test]
    fn test_node_hops_missing_child() {
        let mut b = builder(b"ab$");
        let root = b.root;
        b.find_path(root, 0, 0).unwrap();
        match b.node_hops(root, Span::new(1, 2), 1) {
            Err(err @ TreeError::MissingChild { .. }) => assert!(err.is_internal()),
            other => panic!("unexpected result: {:?}", other.map(|v| v.index())),
        }
    }

    #[test]
    fn test_split_edge_rejects_empty_edges() {
        let mut b = builder(b"ab$");
        let root = b.root;
        b.find_path(root, 0, 0).unwrap();
        let leaf = b.store.child(root, b.branch(0)).unwrap();
        assert!(matches!(
            b.split_edge(root, leaf, 0, 1),
            Err(TreeError::ZeroLengthEdge { .. })
        ));
        assert!(matches!(
            b.split_edge(root, leaf, 3, 1),
            Err(TreeError::ZeroLengthEdge { .. })
        ));
    }
}
