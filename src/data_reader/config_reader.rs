// Alphabet and scoring files.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::alphabet::Alphabet;
use crate::compare::align::Scoring;

/// Alphabet made of every ASCII letter or digit in `bytes`, plus the `$` sentinel.
/// Everything else (separators, newlines) is ignored.
pub fn alphabet_from_bytes(bytes: &[u8]) -> Alphabet {
    let symbols: Vec<u8> = bytes
        .iter()
        .copied()
        .filter(u8::is_ascii_alphanumeric)
        .collect();
    Alphabet::new(&symbols)
}

pub fn read_alphabet<P: AsRef<Path>>(path: P) -> Result<Alphabet> {
    let path = path.as_ref();
    let bytes = fs::read(path).with_context(|| format!("reading alphabet {}", path.display()))?;
    Ok(alphabet_from_bytes(&bytes))
}

/// Parse whitespace-separated `key value` pairs. Known keys are `match`, `mismatch`, `h`
/// (gap opening) and `g` (gap extension); others are skipped and missing keys keep their
/// defaults.
pub fn parse_scoring(config: &str) -> Result<Scoring> {
    let mut scoring = Scoring::default();
    let mut tokens = config.split_whitespace();
    while let Some(key) = tokens.next() {
        let value = match tokens.next() {
            Some(value) => value,
            None => anyhow::bail!("scoring key {} has no value", key),
        };
        let slot = match key {
            "match" => &mut scoring.match_score,
            "mismatch" => &mut scoring.mismatch,
            "h" => &mut scoring.gap_open,
            "g" => &mut scoring.gap_extend,
            _ => {
                tracing::debug!(key, "ignoring unknown scoring key");
                continue;
            }
        };
        *slot = value
            .parse()
            .with_context(|| format!("bad value {:?} for scoring key {}", value, key))?;
    }
    Ok(scoring)
}

pub fn read_scoring<P: AsRef<Path>>(path: P) -> Result<Scoring> {
    let path = path.as_ref();
    let config =
        fs::read_to_string(path).with_context(|| format!("reading scoring {}", path.display()))?;
    parse_scoring(&config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_alphabet_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "A C G T").unwrap();
        writeln!(file, "a, c, A").unwrap();
        let alphabet = read_alphabet(file.path()).unwrap();
        assert_eq!(alphabet.symbols(), b"$ACGTac");
    }

    #[test]
    fn test_alphabet_ignores_sentinel() {
        let alphabet = alphabet_from_bytes(b"banana$\n");
        assert_eq!(alphabet.symbols(), b"$abn");
    }

    #[test]
    fn test_scoring() {
        let scoring = parse_scoring("match 2\nmismatch -3\nh -4\ng -2\n").unwrap();
        assert_eq!(
            scoring,
            Scoring {
                match_score: 2,
                mismatch: -3,
                gap_open: -4,
                gap_extend: -2,
            }
        );
    }

    #[test]
    fn test_scoring_defaults_and_unknown_keys() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "mismatch -1 foo 3").unwrap();
        let scoring = read_scoring(file.path()).unwrap();
        assert_eq!(scoring.mismatch, -1);
        assert_eq!(scoring.match_score, 1);
        assert_eq!(scoring.gap_open, -5);
        assert_eq!(scoring.gap_extend, -1);
    }

    #[test]
    fn test_scoring_errors() {
        assert!(parse_scoring("match").is_err());
        assert!(parse_scoring("match one").is_err());
    }
}
