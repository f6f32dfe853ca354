// Edge labels are spans into the text rather than copies of it.
// Spans are 0-indexed with exclusive ends, so an edge of length 1 at position 4 is (4, 5).

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Default, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Split into `[start, start + offset)` and `[start + offset, end)`.
    pub fn split_at(&self, offset: usize) -> (Span, Span) {
        let mid = self.start + offset;
        (Span::new(self.start, mid), Span::new(mid, self.end))
    }

    /// Drop the first `k` symbols.
    pub fn skip(&self, k: usize) -> Span {
        Span::new(self.start + k, self.end)
    }

    pub fn slice<'a>(&self, text: &'a [u8]) -> &'a [u8] {
        &text[self.start..self.end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_at() {
        let span = Span::new(2, 7);
        let (head, tail) = span.split_at(3);
        assert_eq!(head, Span::new(2, 5));
        assert_eq!(tail, Span::new(5, 7));
        assert_eq!(head.len() + tail.len(), span.len());
    }

    #[test]
    fn test_slice_and_skip() {
        let text = b"banana$";
        let span = Span::new(1, 4);
        assert_eq!(span.slice(text), b"ana");
        assert_eq!(span.skip(1).slice(text), b"na");
        assert!(Span::empty().is_empty());
    }
}
