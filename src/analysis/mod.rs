pub mod bwt;
pub mod enumerate;
pub mod lcs;
pub mod repeat;
pub mod stack;

pub use self::bwt::{bwt, inverse_bwt, suffix_array};
pub use self::lcs::{longest_common_substring, CommonSubstring};
pub use self::repeat::{longest_repeat, Repeat};
