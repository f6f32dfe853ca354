// Command-line front end: build suffix trees over FASTA inputs and run the analyses on them.

mod build_tree;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use rusty_gst::analysis::{bwt, inverse_bwt, longest_common_substring, longest_repeat};
use rusty_gst::compare::{
    AffineAligner, AlignMode, Metric, PairwiseAligner, Scoring, SimilarityMatrix,
};
use rusty_gst::data_reader::{
    alphabet_from_bytes, read_alphabet, read_fasta, read_scoring, read_single_sequence,
};
use rusty_gst::tree::display::{Dot, Outline};
use rusty_gst::{Alphabet, Strategy};

use build_tree::build_tree;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// How to build the suffix tree.
    #[arg(long, value_enum, default_value_t = Strategy::Linear, global = true)]
    strategy: Strategy,
    /// Alphabet file. Defaults to the letters and digits found in the inputs.
    #[arg(long, global = true)]
    alphabet: Option<String>,
    /// Append build stats to this JSONL file.
    #[arg(long, global = true)]
    stats_path: Option<String>,
    /// Print results as JSON.
    #[arg(long, default_value_t = false, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the suffix tree of a sequence.
    Tree {
        fasta: String,
        #[arg(long, default_value_t = false)]
        dot: bool,
    },
    /// Longest substring occurring at least twice.
    Repeat { fasta: String },
    /// Burrows-Wheeler transform of a sequence.
    Bwt {
        fasta: String,
        /// Invert the transform and compare it with the input.
        #[arg(long, default_value_t = false)]
        check: bool,
    },
    /// Longest common substring of two sequences.
    Lcs { fasta1: String, fasta2: String },
    /// Align the first two records of a FASTA file.
    Align {
        fasta: String,
        #[arg(long, value_enum, default_value_t = AlignMode::Global)]
        mode: AlignMode,
        #[arg(long)]
        scoring: Option<String>,
    },
    /// Pairwise similarity and LCS matrices over a set of genomes.
    Compare {
        #[arg(long)]
        similarity_out: String,
        #[arg(long)]
        lcs_out: String,
        #[arg(long)]
        scoring: Option<String>,
        #[arg(required = true)]
        fastas: Vec<String>,
    },
}

fn get_scoring(path: Option<&String>) -> Result<Scoring> {
    match path {
        Some(path) => read_scoring(path),
        None => Ok(Scoring::default()),
    }
}

fn get_alphabet(args: &Args, inputs: &[&[u8]]) -> Result<Alphabet> {
    match args.alphabet {
        Some(ref path) => read_alphabet(path),
        None => Ok(alphabet_from_bytes(&inputs.concat())),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match args.command {
        Command::Tree { ref fasta, dot } => {
            let sequence = read_single_sequence(fasta)?;
            let alphabet = get_alphabet(&args, &[sequence.symbols.as_slice()])?;
            let text = alphabet.terminate(&sequence.symbols)?;
            let tree = build_tree(&args, &text, &alphabet)?;
            if dot {
                println!("{:?}", Dot::new(&tree));
            } else {
                println!(
                    "Suffix Tree for: '{}' (length={})",
                    String::from_utf8_lossy(&text),
                    text.len()
                );
                println!("Alphabet: '{}'", String::from_utf8_lossy(alphabet.symbols()));
                print!("{}", Outline::new(&tree));
            }
        }
        Command::Repeat { ref fasta } => {
            let sequence = read_single_sequence(fasta)?;
            let alphabet = get_alphabet(&args, &[sequence.symbols.as_slice()])?;
            let text = alphabet.terminate(&sequence.symbols)?;
            let tree = build_tree(&args, &text, &alphabet)?;
            let repeat = longest_repeat(&tree);
            if args.json {
                println!("{}", serde_json::to_string(&repeat)?);
            } else {
                println!("Longest repeat in {}", sequence.name);
                println!("  length: {}", repeat.length);
                println!("  positions: {:?}", repeat.positions);
                if let Some(&pos) = repeat.positions.first() {
                    let substring = &text[pos..pos + repeat.length];
                    println!("  substring: {}", String::from_utf8_lossy(substring));
                }
            }
        }
        Command::Bwt { ref fasta, check } => {
            let sequence = read_single_sequence(fasta)?;
            let alphabet = get_alphabet(&args, &[sequence.symbols.as_slice()])?;
            let text = alphabet.terminate(&sequence.symbols)?;
            let tree = build_tree(&args, &text, &alphabet)?;
            let transformed = bwt(&tree);
            if args.json {
                println!("{}", serde_json::to_string(&String::from_utf8_lossy(&transformed))?);
            } else {
                println!("{}", String::from_utf8_lossy(&transformed));
            }
            if check {
                if inverse_bwt(&transformed, &alphabet)? != text {
                    bail!("BWT of {} does not invert to the input", sequence.name);
                }
                eprintln!("BWT round trip OK");
            }
        }
        Command::Lcs {
            ref fasta1,
            ref fasta2,
        } => {
            let s1 = read_single_sequence(fasta1)?;
            let s2 = read_single_sequence(fasta2)?;
            let alphabet = get_alphabet(&args, &[s1.symbols.as_slice(), s2.symbols.as_slice()])?;
            let text = alphabet.concat(&[s1.symbols.as_slice(), s2.symbols.as_slice()])?;
            let tree = build_tree(&args, &text, &alphabet)?;
            let lcs = longest_common_substring(&tree, s1.symbols.len(), s2.symbols.len())?;
            if args.json {
                println!("{}", serde_json::to_string(&lcs)?);
            } else {
                println!("Longest common substring of {} and {}", s1.name, s2.name);
                println!("  length: {}", lcs.length);
                println!("  position in {}: {:?}", s1.name, lcs.pos_in_s1);
                println!("  position in {}: {:?}", s2.name, lcs.pos_in_s2);
                println!("  substring: {}", String::from_utf8_lossy(lcs.slice(&s1.symbols)));
            }
        }
        Command::Align {
            ref fasta,
            mode,
            ref scoring,
        } => {
            let sequences = read_fasta(fasta)?;
            if sequences.len() < 2 {
                bail!("{} holds {} sequences, expected two", fasta, sequences.len());
            }
            if sequences.len() > 2 {
                tracing::warn!(path = %fasta, "aligning the first two records only");
            }
            let (first, second) = (&sequences[0], &sequences[1]);
            let scoring = get_scoring(scoring.as_ref())?;
            let aligner = PairwiseAligner::new(scoring, mode);
            let report = aligner.report(&first.symbols, &second.symbols);
            if args.json {
                println!("{}", serde_json::to_string(&report)?);
            } else {
                let kind = match mode {
                    AlignMode::Global => "Global",
                    AlignMode::Local => "Local",
                };
                println!("Aligned {}: {}", first.name, report.aligned_a);
                println!("Aligned {}: {}", second.name, report.aligned_b);
                println!();
                println!("{} Optimal Score: {}", kind, report.score);
                println!("Matches: {}", report.matches);
                println!("Mismatches: {}", report.mismatches);
                println!("Gap opens: {}", report.gap_opens);
                println!("Gap extensions: {}", report.gap_extensions);
            }
        }
        Command::Compare {
            ref similarity_out,
            ref lcs_out,
            ref scoring,
            ref fastas,
        } => {
            let sequences = fastas
                .iter()
                .map(read_single_sequence)
                .collect::<Result<Vec<_>>>()?;
            for sequence in &sequences {
                tracing::info!(name = %sequence.name, len = sequence.symbols.len(), "read sequence");
            }
            let inputs: Vec<&[u8]> = sequences.iter().map(|s| s.symbols.as_slice()).collect();
            let alphabet = get_alphabet(&args, &inputs)?;
            let scoring = get_scoring(scoring.as_ref())?;
            println!("Comparing {} genomes...", sequences.len());
            let aligner = AffineAligner::new(scoring);
            let matrix = SimilarityMatrix::compute(&sequences, &alphabet, args.strategy, &aligner)?;
            eprintln!();
            matrix.save_csv(similarity_out, Metric::AlignmentScore)?;
            matrix.save_csv(lcs_out, Metric::LcsLength)?;
            println!(
                "Successfully wrote similarity matrix to '{}' and LCS matrix to '{}'",
                similarity_out, lcs_out
            );
        }
    }
    Ok(())
}
