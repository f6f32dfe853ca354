//! Error taxonomy for suffix tree construction and queries.
//!
//! Errors fall into three families:
//! - input errors, reported before any node is allocated;
//! - internal-consistency errors, which mean construction broke one of the tree's
//!   invariants and the tree can no longer be trusted;
//! - resource errors raised while growing the node store.

use std::fmt;

/// A text symbol rendered for diagnostics (printable ASCII as-is, anything else as hex).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbol(pub u8);

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_ascii_graphic() {
            write!(f, "'{}'", self.0 as char)
        } else {
            write!(f, "0x{:02x}", self.0)
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    // Input errors.
    #[error("symbol {symbol} at position {position} is not in the alphabet")]
    AlphabetViolation { symbol: Symbol, position: usize },
    #[error("cannot build a suffix tree over an empty text")]
    EmptyText,
    #[error("text is not terminated: final symbol {symbol} also occurs at position {position}")]
    UnterminatedText { symbol: Symbol, position: usize },
    #[error("sentinel {symbol} occurs inside the input at position {position}")]
    SentinelInText { symbol: Symbol, position: usize },
    #[error("string lengths {len1} + {len2} + sentinel do not match a tree over {n} symbols")]
    LengthMismatch { len1: usize, len2: usize, n: usize },
    #[error("a BWT must contain the sentinel exactly once, found it {sentinels} times")]
    MalformedBwt { sentinels: usize },

    // Internal-consistency errors.
    #[error("node {node} has no child for symbol {symbol} while hopping for suffix {suffix}")]
    MissingChild {
        node: usize,
        suffix: usize,
        symbol: Symbol,
    },
    #[error("suffix link of node {node} is unset while inserting suffix {suffix}")]
    UnsetSuffixLink { node: usize, suffix: usize },
    #[error("splitting below node {node} for suffix {suffix} would create an empty edge")]
    ZeroLengthEdge { node: usize, suffix: usize },
    #[error("suffix {suffix} was absorbed into an existing path without reaching a leaf")]
    SuffixAbsorbed { suffix: usize },
    #[error("tree invariant violated: {0}")]
    Invariant(String),

    // Resource errors.
    #[error("could not allocate room for {requested} more nodes")]
    Allocation { requested: usize },
    #[error("node store is full: {nodes} nodes exceed the index type")]
    Capacity { nodes: usize },
}

impl TreeError {
    /// Bad input from the caller; recoverable.
    pub fn is_input(&self) -> bool {
        matches!(
            self,
            TreeError::AlphabetViolation { .. }
                | TreeError::EmptyText
                | TreeError::UnterminatedText { .. }
                | TreeError::SentinelInText { .. }
                | TreeError::LengthMismatch { .. }
                | TreeError::MalformedBwt { .. }
        )
    }

    /// A bug in construction. The tree must be discarded.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            TreeError::MissingChild { .. }
                | TreeError::UnsetSuffixLink { .. }
                | TreeError::ZeroLengthEdge { .. }
                | TreeError::SuffixAbsorbed { .. }
                | TreeError::Invariant(_)
        )
    }

    pub fn is_resource(&self) -> bool {
        matches!(
            self,
            TreeError::Allocation { .. } | TreeError::Capacity { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, TreeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        let input = TreeError::AlphabetViolation {
            symbol: Symbol(b'x'),
            position: 3,
        };
        assert!(input.is_input());
        assert!(!input.is_internal());

        let internal = TreeError::UnsetSuffixLink { node: 9, suffix: 4 };
        assert!(internal.is_internal());
        assert!(!internal.is_input());

        let resource = TreeError::Allocation { requested: 10 };
        assert!(resource.is_resource());
        assert!(!resource.is_internal());
    }

    #[test]
    fn test_symbol_display() {
        assert_eq!(format!("{}", Symbol(b'a')), "'a'");
        assert_eq!(format!("{}", Symbol(b'\n')), "0x0a");
        let err = TreeError::AlphabetViolation {
            symbol: Symbol(b'N'),
            position: 7,
        };
        assert_eq!(
            err.to_string(),
            "symbol 'N' at position 7 is not in the alphabet"
        );
    }
}
