use anyhow::{bail, Context, Result};
use bio::io::fasta;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// A named sequence of raw symbols, without any sentinel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sequence {
    pub name: String,
    pub symbols: Vec<u8>,
}

impl From<&fasta::Record> for Sequence {
    fn from(record: &fasta::Record) -> Self {
        Self {
            name: record.id().to_string(),
            // Sequence lines are only trimmed at the end.
            symbols: record
                .seq()
                .iter()
                .copied()
                .filter(|symbol| !symbol.is_ascii_whitespace())
                .collect(),
        }
    }
}

/// Streams records out of a FASTA file.
///
/// A record starts at a `>` header; its name is the first word of the header. Sequence
/// lines are concatenated with whitespace dropped.
pub struct FastaReader<R: Read> {
    records: fasta::Records<BufReader<R>>,
}

impl<R: Read> FastaReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            records: fasta::Reader::new(reader).records(),
        }
    }
}

impl FastaReader<File> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
        Ok(Self::new(file))
    }
}

impl<R: Read> Iterator for FastaReader<R> {
    type Item = Result<Sequence>;

    fn next(&mut self) -> Option<Result<Sequence>> {
        let record = self.records.next()?;
        Some(
            record
                .map(|record| Sequence::from(&record))
                .context("reading FASTA record"),
        )
    }
}

/// Every record in the file at `path`.
pub fn read_fasta<P: AsRef<Path>>(path: P) -> Result<Vec<Sequence>> {
    FastaReader::open(path)?.collect()
}

/// The first record in the file at `path`, named after the file stem.
pub fn read_single_sequence<P: AsRef<Path>>(path: P) -> Result<Sequence> {
    let path = path.as_ref();
    let mut reader = FastaReader::open(path)?;
    let mut sequence = match reader.next() {
        Some(sequence) => sequence.with_context(|| format!("reading {}", path.display()))?,
        None => bail!("{} contains no sequence", path.display()),
    };
    if reader.next().is_some() {
        tracing::warn!(path = %path.display(), "ignoring records after the first");
    }
    if let Some(stem) = path.file_stem() {
        sequence.name = stem.to_string_lossy().into_owned();
    }
    Ok(sequence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;

    #[test]
    fn test_records() {
        let data = ">chr1 some description\nACGT\n  ACG \n\n>chr2\r\nTTTT\r\n";
        let records: Vec<Sequence> = FastaReader::new(Cursor::new(data))
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "chr1");
        assert_eq!(records[0].symbols, b"ACGTACG".to_vec());
        assert_eq!(records[1].name, "chr2");
        assert_eq!(records[1].symbols, b"TTTT".to_vec());
    }

    #[test]
    fn test_empty_record() {
        let records: Vec<Sequence> = FastaReader::new(Cursor::new(">a\n>b\nAC"))
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(records[0].symbols, Vec::<u8>::new());
        assert_eq!(records[1].symbols, b"AC".to_vec());
    }

    #[test]
    fn test_data_before_header() {
        let mut reader = FastaReader::new(Cursor::new("ACGT\n>a\nAC\n"));
        let err = reader.next().unwrap().unwrap_err();
        assert!(err.to_string().contains("reading FASTA record"));
    }

    #[test]
    fn test_from_record() {
        let record = fasta::Record::with_attrs("chrM", Some("mitochondrion"), b"GAT TACA");
        let sequence = Sequence::from(&record);
        assert_eq!(sequence.name, "chrM");
        assert_eq!(sequence.symbols, b"GATTACA".to_vec());
    }

    #[test]
    fn test_single_sequence_named_after_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Covid_Wuhan.fasta");
        let mut file = File::create(&path).unwrap();
        write!(file, ">NC_045512.2 Severe acute respiratory syndrome\nATTAAAGG\nTTTATACC\n").unwrap();
        let sequence = read_single_sequence(&path).unwrap();
        assert_eq!(sequence.name, "Covid_Wuhan");
        assert_eq!(sequence.symbols, b"ATTAAAGGTTTATACC".to_vec());
    }

    #[test]
    fn test_read_fasta() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, ">x\nAC\n>y\nGT\n").unwrap();
        let records = read_fasta(file.path()).unwrap();
        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["x", "y"]);
    }

    #[test]
    fn test_missing_file() {
        assert!(read_fasta("/nonexistent/genome.fasta").is_err());
    }
}
