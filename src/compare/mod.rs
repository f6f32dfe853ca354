pub mod align;
pub mod similarity;

pub use self::align::{AffineAligner, AlignMode, Aligner, Alignment, AlignmentReport, PairwiseAligner, Scoring};
pub use self::similarity::{pair_similarity, Metric, SimilarityCell, SimilarityMatrix};
