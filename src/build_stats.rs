// Stats for logging after building a suffix tree.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::prelude::*;
use std::path::Path;

use crate::tree::indexing::IndexType;
use crate::tree::{Strategy, SuffixTree};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BuildStats {
    pub strategy: Strategy,
    pub n_symbols: usize,
    pub alphabet_size: usize,
    pub n_nodes: usize,
    pub n_internal: usize,
    pub n_leaves: usize,
    pub max_internal_depth: usize,
    pub mean_internal_depth: f64,
    pub elapsed_time: f32,
}

impl BuildStats {
    pub fn from_tree<Ix: IndexType>(
        tree: &SuffixTree<Ix>,
        strategy: Strategy,
        elapsed_time: f32,
    ) -> Self {
        // Internal nodes other than the root.
        let depths: Vec<usize> = tree
            .nodes()
            .filter(|(idx, _)| !tree.is_leaf(*idx) && !tree.is_root(*idx))
            .map(|(_, node)| node.get_depth())
            .collect();
        let mean_internal_depth = if depths.is_empty() {
            0.
        } else {
            depths.iter().sum::<usize>() as f64 / depths.len() as f64
        };
        Self {
            strategy,
            n_symbols: tree.len(),
            alphabet_size: tree.get_alphabet().len(),
            n_nodes: tree.node_count(),
            n_internal: tree.internal_count(),
            n_leaves: tree.len(),
            max_internal_depth: depths.into_iter().max().unwrap_or(0),
            mean_internal_depth,
            elapsed_time,
        }
    }

    pub fn get_nodes_per_symbol(&self) -> f64 {
        (self.n_nodes as f64) / (self.n_symbols as f64)
    }

    pub fn append_to_jsonl<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let blob = serde_json::to_string(self)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("opening {}", path.display()))?;

        Ok(writeln!(file, "{}", blob)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::Alphabet;
    use tempfile::tempdir;

    #[test]
    fn test_banana_stats() {
        let tree: SuffixTree =
            SuffixTree::build(b"banana$", &Alphabet::new(b"abn"), Strategy::Linear).unwrap();
        let stats = BuildStats::from_tree(&tree, Strategy::Linear, 0.5);
        assert_eq!(stats.n_nodes, 11);
        assert_eq!(stats.n_internal, 4);
        assert_eq!(stats.n_leaves, 7);
        assert_eq!(stats.alphabet_size, 4);
        // a, ana, na
        assert_eq!(stats.max_internal_depth, 3);
        assert_eq!(stats.mean_internal_depth, 2.);
        assert_eq!(stats.get_nodes_per_symbol(), 11. / 7.);
    }

    #[test]
    fn test_append_to_jsonl() {
        let tree: SuffixTree =
            SuffixTree::build(b"ab$", &Alphabet::new(b"ab"), Strategy::Naive).unwrap();
        let stats = BuildStats::from_tree(&tree, Strategy::Naive, 0.);

        let tmp_dir = tempdir().unwrap();
        let path = tmp_dir.path().join("stats.jsonl");
        stats.append_to_jsonl(&path).unwrap();
        stats.append_to_jsonl(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("\"strategy\":\"naive\""));
        let parsed: BuildStats = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(parsed, stats);
        assert_eq!(parsed.mean_internal_depth, 0.);
    }
}
