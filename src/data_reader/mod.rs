pub mod config_reader;
pub mod fasta_reader;

pub use self::config_reader::{alphabet_from_bytes, parse_scoring, read_alphabet, read_scoring};
pub use self::fasta_reader::{read_fasta, read_single_sequence, FastaReader, Sequence};
