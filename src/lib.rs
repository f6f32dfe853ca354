pub mod alphabet;
pub mod analysis;
pub mod build_stats;
pub mod compare;
pub mod data_reader;
pub mod error;
pub mod tree;

pub use crate::alphabet::Alphabet;
pub use crate::analysis::{bwt, longest_common_substring, longest_repeat};
pub use crate::error::{Result, TreeError};
pub use crate::tree::{Strategy, SuffixTree};
