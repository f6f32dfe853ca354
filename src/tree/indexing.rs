// Arena indices for suffix tree nodes.
// Parent and suffix-link relations are stored as these indices, never as references.

use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

// A tree over n symbols holds at most 2n nodes, so u32 covers texts up to ~2Gi.
pub type DefaultIx = u32;

/// Trait for the unsigned integer type used for node indices.
///
/// # Safety
///
/// Implementations must round-trip every value in `0..=max_value().index()` through
/// `new` and `index` unchanged.
pub unsafe trait IndexType: Copy + Default + Hash + Ord + fmt::Debug + Send + Sync + 'static {
    fn new(x: usize) -> Self;
    fn index(&self) -> usize;
    fn max_value() -> Self;
}

unsafe impl IndexType for usize {
    #[inline(always)]
    fn new(x: usize) -> Self {
        x
    }
    #[inline(always)]
    fn index(&self) -> Self {
        *self
    }
    #[inline(always)]
    fn max_value() -> Self {
        usize::MAX
    }
}

unsafe impl IndexType for u32 {
    #[inline(always)]
    fn new(x: usize) -> Self {
        x as u32
    }
    #[inline(always)]
    fn index(&self) -> usize {
        *self as usize
    }
    #[inline(always)]
    fn max_value() -> Self {
        u32::MAX
    }
}

unsafe impl IndexType for u16 {
    #[inline(always)]
    fn new(x: usize) -> Self {
        x as u16
    }
    #[inline(always)]
    fn index(&self) -> usize {
        *self as usize
    }
    #[inline(always)]
    fn max_value() -> Self {
        u16::MAX
    }
}

/// Slot of a node in the tree's arena. Not the same thing as the node's id.
#[derive(Copy, Clone, Default, PartialEq, PartialOrd, Eq, Ord, Hash, Serialize, Deserialize)]
pub struct NodeIndex<Ix = DefaultIx>(Ix);

impl<Ix: IndexType> NodeIndex<Ix> {
    #[inline]
    pub fn new(x: usize) -> Self {
        NodeIndex(IndexType::new(x))
    }

    /// `None` if `x` does not fit in `Ix`. The maximum value is never handed out.
    #[inline]
    pub fn checked_new(x: usize) -> Option<Self> {
        if x < Ix::max_value().index() {
            Some(Self::new(x))
        } else {
            None
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0.index()
    }
}

impl<Ix: IndexType> From<Ix> for NodeIndex<Ix> {
    fn from(ix: Ix) -> Self {
        NodeIndex(ix)
    }
}

impl<Ix: fmt::Debug> fmt::Debug for NodeIndex<Ix> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "NodeIndex({:?})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_new() {
        assert_eq!(NodeIndex::<u16>::checked_new(7).map(|ix| ix.index()), Some(7));
        assert!(NodeIndex::<u16>::checked_new(65534).is_some());
        assert!(NodeIndex::<u16>::checked_new(65535).is_none());
        assert!(NodeIndex::<u16>::checked_new(1 << 20).is_none());
    }

    #[test]
    fn test_debug() {
        let ix: NodeIndex = NodeIndex::new(42);
        assert_eq!(format!("{:?}", ix), "NodeIndex(42)");
    }
}
