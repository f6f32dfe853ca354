// Whole-genome similarity anchored on the longest common substring.
//
// For a pair of strings the longest common substring is found with a generalized suffix
// tree. The stretches before it (reversed, so the alignment grows outwards from the
// anchor) and after it are aligned separately, and the matches on both sides are added to
// the anchor's length.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use kdam::{tqdm, BarExt};
use serde::{Deserialize, Serialize};

use crate::alphabet::Alphabet;
use crate::analysis::lcs::longest_common_substring;
use crate::compare::align::Aligner;
use crate::data_reader::Sequence;
use crate::tree::{Strategy, SuffixTree};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimilarityCell {
    pub alignment_score: usize,
    pub lcs_length: usize,
}

/// Which field of the matrix to write out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Metric {
    AlignmentScore,
    LcsLength,
}

impl Metric {
    fn get(&self, cell: &SimilarityCell) -> usize {
        match self {
            Metric::AlignmentScore => cell.alignment_score,
            Metric::LcsLength => cell.lcs_length,
        }
    }
}

pub fn pair_similarity<A: Aligner + ?Sized>(
    s1: &[u8],
    s2: &[u8],
    alphabet: &Alphabet,
    strategy: Strategy,
    aligner: &A,
) -> crate::error::Result<SimilarityCell> {
    let tree: SuffixTree = SuffixTree::build_pair(s1, s2, alphabet, strategy)?;
    let lcs = longest_common_substring(&tree, s1.len(), s2.len())?;
    drop(tree);
    let (x1, x2) = match (lcs.pos_in_s1, lcs.pos_in_s2) {
        (Some(x1), Some(x2)) => (x1, x2),
        _ => return Ok(SimilarityCell::default()),
    };
    let b = lcs.length;

    let prefix1: Vec<u8> = s1[..x1].iter().rev().copied().collect();
    let prefix2: Vec<u8> = s2[..x2].iter().rev().copied().collect();
    let a = aligner.align(&prefix1, &prefix2).matches;
    let c = aligner.align(&s1[x1 + b..], &s2[x2 + b..]).matches;
    tracing::debug!(x1, x2, a, b, c, "pair similarity");

    Ok(SimilarityCell {
        alignment_score: a + b + c,
        lcs_length: b,
    })
}

pub struct SimilarityMatrix {
    names: Vec<String>,
    cells: Vec<Vec<SimilarityCell>>,
}

impl SimilarityMatrix {
    /// Compare every pair of sequences. The matrix is symmetric and each sequence is
    /// fully similar to itself.
    pub fn compute<A: Aligner + ?Sized>(
        sequences: &[Sequence],
        alphabet: &Alphabet,
        strategy: Strategy,
        aligner: &A,
    ) -> Result<Self> {
        let count = sequences.len();
        let mut cells = vec![vec![SimilarityCell::default(); count]; count];
        let mut pbar = tqdm!(total = count * count.saturating_sub(1) / 2);
        for i in 0..count {
            let len = sequences[i].symbols.len();
            cells[i][i] = SimilarityCell {
                alignment_score: len,
                lcs_length: len,
            };
            for j in (i + 1)..count {
                let (s1, s2) = (&sequences[i], &sequences[j]);
                let cell = pair_similarity(&s1.symbols, &s2.symbols, alphabet, strategy, aligner)
                    .with_context(|| format!("comparing {} with {}", s1.name, s2.name))?;
                tracing::debug!(
                    first = %s1.name,
                    second = %s2.name,
                    score = cell.alignment_score,
                    lcs = cell.lcs_length,
                    "compared"
                );
                cells[i][j] = cell;
                cells[j][i] = cell;
                let _ = pbar.update(1);
            }
        }
        Ok(Self {
            names: sequences.iter().map(|seq| seq.name.clone()).collect(),
            cells,
        })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn get(&self, i: usize, j: usize) -> SimilarityCell {
        self.cells[i][j]
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// `Genomes,<name>,...` header, then one row per sequence.
    pub fn write_csv<W: Write>(&self, writer: &mut W, metric: Metric) -> Result<()> {
        write!(writer, "Genomes")?;
        for name in &self.names {
            write!(writer, ",{}", name)?;
        }
        writeln!(writer)?;
        for (name, row) in self.names.iter().zip(&self.cells) {
            write!(writer, "{}", name)?;
            for cell in row {
                write!(writer, ",{}", metric.get(cell))?;
            }
            writeln!(writer)?;
        }
        Ok(())
    }

    pub fn save_csv<P: AsRef<Path>>(&self, path: P, metric: Metric) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        self.write_csv(&mut writer, metric)?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::align::AffineAligner;
    use tempfile::tempdir;

    fn seq(name: &str, symbols: &[u8]) -> Sequence {
        Sequence {
            name: name.to_string(),
            symbols: symbols.to_vec(),
        }
    }

    #[test]
    fn test_pair_similarity() {
        let alphabet = Alphabet::dna();
        let aligner = AffineAligner::default();
        // "GATTACATT" is shared; the flanks before it differ in one symbol.
        let cell = pair_similarity(
            b"ACGGATTACATT",
            b"ACCGATTACATT",
            &alphabet,
            Strategy::Linear,
            &aligner,
        )
        .unwrap();
        assert_eq!(cell.lcs_length, 9);
        assert!(cell.alignment_score >= cell.lcs_length);
    }

    #[test]
    fn test_pair_similarity_flanks() {
        let alphabet = Alphabet::dna();
        let aligner = AffineAligner::default();
        // The anchor is "GGGGGG". Each flank aligns "AT" against "CT" outwards from it,
        // which keeps one match.
        let cell = pair_similarity(
            b"TAGGGGGGAT",
            b"TCGGGGGGCT",
            &alphabet,
            Strategy::Naive,
            &aligner,
        )
        .unwrap();
        assert_eq!(cell.lcs_length, 6);
        assert_eq!(cell.alignment_score, 8);
    }

    #[test]
    fn test_suffix_gap_costs_gap_open() {
        // The anchor is twenty Gs at the start of both. The tails then align with one
        // opened gap and 18 matches.
        let alphabet = Alphabet::dna();
        let aligner = AffineAligner::default();
        let mut s1 = b"G".repeat(20);
        s1.extend_from_slice(b"TACGTACGTACGTTGGCCAA");
        let mut s2 = b"G".repeat(20);
        s2.extend_from_slice(b"CACGTACGTACGTGGCCAA");
        let cell = pair_similarity(&s1, &s2, &alphabet, Strategy::Linear, &aligner).unwrap();
        assert_eq!(cell.lcs_length, 20);
        assert_eq!(cell.alignment_score, 38);
    }

    #[test]
    fn test_nothing_in_common() {
        let alphabet = Alphabet::dna();
        let aligner = AffineAligner::default();
        let cell = pair_similarity(b"AAAA", b"CCCC", &alphabet, Strategy::Linear, &aligner).unwrap();
        assert_eq!(cell, SimilarityCell::default());
    }

    #[test]
    fn test_matrix_csv() {
        let alphabet = Alphabet::dna();
        let aligner = AffineAligner::default();
        let sequences = vec![seq("x", b"ACGT"), seq("y", b"ACGA"), seq("z", b"TTTT")];
        let matrix = SimilarityMatrix::compute(&sequences, &alphabet, Strategy::Linear, &aligner).unwrap();
        assert_eq!(matrix.len(), 3);
        assert_eq!(matrix.get(0, 0), SimilarityCell { alignment_score: 4, lcs_length: 4 });
        assert_eq!(matrix.get(0, 1), matrix.get(1, 0));
        assert_eq!(matrix.get(0, 1).lcs_length, 3);
        assert_eq!(matrix.get(1, 2).lcs_length, 0);

        let tmp_dir = tempdir().unwrap();
        let path = tmp_dir.path().join("lcs.csv");
        matrix.save_csv(&path, Metric::LcsLength).unwrap();
        let csv = std::fs::read_to_string(&path).unwrap();
        let lcs_xz = matrix.get(0, 2).lcs_length;
        assert_eq!(
            csv,
            format!("Genomes,x,y,z\nx,4,3,{lcs_xz}\ny,3,4,0\nz,{lcs_xz},0,4\n")
        );
    }
}
