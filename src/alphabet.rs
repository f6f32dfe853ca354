// Maps text symbols onto dense branch indices in [0, |alphabet|).
//
// The sentinel always gets branch index 0 so that it sorts before every other symbol.
// The remaining symbols follow in ascending byte order, which makes the children table of
// each node (and therefore every DFS over the tree) lexicographic.

use crate::error::{Result, Symbol, TreeError};

pub const DEFAULT_SENTINEL: u8 = b'$';

#[derive(Clone, Debug)]
pub struct Alphabet {
    symbol_to_index: [Option<u8>; 256],
    index_to_symbol: Vec<u8>,
    sentinel: u8,
}

impl Alphabet {
    /// Alphabet over `symbols` plus the default `$` sentinel. Duplicates are ignored.
    pub fn new(symbols: &[u8]) -> Self {
        Self::with_sentinel(DEFAULT_SENTINEL, symbols)
    }

    pub fn with_sentinel(sentinel: u8, symbols: &[u8]) -> Self {
        let mut seen = [false; 256];
        for &symbol in symbols {
            seen[symbol as usize] = true;
        }
        seen[sentinel as usize] = false;

        let mut index_to_symbol = Vec::with_capacity(symbols.len() + 1);
        index_to_symbol.push(sentinel);
        for (byte, _) in seen.iter().enumerate().filter(|(_, present)| **present) {
            index_to_symbol.push(byte as u8);
        }

        let mut symbol_to_index = [None; 256];
        for (index, &symbol) in index_to_symbol.iter().enumerate() {
            // At most 256 distinct bytes, so every index fits in a u8.
            symbol_to_index[symbol as usize] = Some(index as u8);
        }
        Self {
            symbol_to_index,
            index_to_symbol,
            sentinel,
        }
    }

    pub fn dna() -> Self {
        Self::new(b"ACGT")
    }

    /// Branch index of `symbol`, or `None` if it was never declared.
    #[inline]
    pub fn index_of(&self, symbol: u8) -> Option<usize> {
        self.symbol_to_index[symbol as usize].map(|index| index as usize)
    }

    #[inline]
    pub fn symbol(&self, index: usize) -> u8 {
        self.index_to_symbol[index]
    }

    pub fn symbols(&self) -> &[u8] {
        &self.index_to_symbol
    }

    pub fn sentinel(&self) -> u8 {
        self.sentinel
    }

    pub fn contains(&self, symbol: u8) -> bool {
        self.index_of(symbol).is_some()
    }

    /// Number of symbols including the sentinel.
    pub fn len(&self) -> usize {
        self.index_to_symbol.len()
    }

    // An alphabet always holds at least its sentinel.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Fails on the first symbol of `text` that was not declared.
    pub fn validate(&self, text: &[u8]) -> Result<()> {
        match text.iter().position(|&symbol| !self.contains(symbol)) {
            Some(position) => Err(TreeError::AlphabetViolation {
                symbol: Symbol(text[position]),
                position,
            }),
            None => Ok(()),
        }
    }

    /// Append the sentinel to `text`.
    pub fn terminate(&self, text: &[u8]) -> Result<Vec<u8>> {
        self.concat(&[text])
    }

    /// Concatenate `texts` and append a single sentinel at the very end.
    pub fn concat(&self, texts: &[&[u8]]) -> Result<Vec<u8>> {
        let total: usize = texts.iter().map(|text| text.len()).sum();
        let mut joined = Vec::with_capacity(total + 1);
        for text in texts {
            if let Some(position) = text.iter().position(|&symbol| symbol == self.sentinel) {
                return Err(TreeError::SentinelInText {
                    symbol: Symbol(self.sentinel),
                    position: joined.len() + position,
                });
            }
            joined.extend_from_slice(text);
        }
        joined.push(self.sentinel);
        Ok(joined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_sorts_first() {
        let alphabet = Alphabet::new(b"tgca");
        assert_eq!(alphabet.symbols(), b"$acgt");
        assert_eq!(alphabet.index_of(b'$'), Some(0));
        assert_eq!(alphabet.index_of(b'a'), Some(1));
        assert_eq!(alphabet.index_of(b't'), Some(4));
        assert_eq!(alphabet.symbol(3), b'g');
        assert_eq!(alphabet.len(), 5);
    }

    #[test]
    fn test_duplicates_and_unknown() {
        let alphabet = Alphabet::new(b"banana");
        assert_eq!(alphabet.symbols(), b"$abn");
        assert_eq!(alphabet.index_of(b'x'), None);
        assert!(!alphabet.contains(b'B'));
    }

    #[test]
    fn test_custom_sentinel() {
        let alphabet = Alphabet::with_sentinel(b'#', b"ab#");
        assert_eq!(alphabet.symbols(), b"#ab");
        assert_eq!(alphabet.sentinel(), b'#');
        assert!(!alphabet.contains(b'$'));
    }

    #[test]
    fn test_validate() {
        let alphabet = Alphabet::dna();
        assert!(alphabet.validate(b"GATTACA$").is_ok());
        match alphabet.validate(b"GATNACA$") {
            Err(TreeError::AlphabetViolation { symbol, position }) => {
                assert_eq!(symbol, Symbol(b'N'));
                assert_eq!(position, 3);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_concat() {
        let alphabet = Alphabet::new(b"ab");
        assert_eq!(alphabet.terminate(b"abba").unwrap(), b"abba$".to_vec());
        assert_eq!(alphabet.concat(&[&b"ab"[..], &b"ba"[..]]).unwrap(), b"abba$".to_vec());
        match alphabet.concat(&[&b"ab"[..], &b"b$a"[..]]) {
            Err(TreeError::SentinelInText { position, .. }) => assert_eq!(position, 3),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
