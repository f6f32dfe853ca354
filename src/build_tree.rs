// Driver to build a suffix tree with progress reporting and stats.

use anyhow::Result;
use std::time::Instant;

use kdam::{tqdm, BarExt};

use rusty_gst::build_stats::BuildStats;
use rusty_gst::tree::{Strategy, SuffixTree, TreeBuilder};
use rusty_gst::Alphabet;

use super::Args;

pub fn build_tree(args: &Args, text: &[u8], alphabet: &Alphabet) -> Result<SuffixTree> {
    let strategy: Strategy = args.strategy;
    if !args.json {
        println!("Building suffix tree ({:?})...", strategy);
        println!("  # symbols: {}", text.len());
        println!("  alphabet: {}", String::from_utf8_lossy(alphabet.symbols()));
    }

    let start = Instant::now();
    let mut builder: TreeBuilder = TreeBuilder::new(text, alphabet, strategy)?;
    let mut pbar = tqdm!(total = builder.len());
    while builder.step()? {
        let _ = pbar.update(1);
    }
    eprintln!();
    let tree = builder.finish()?;

    let stats = BuildStats::from_tree(&tree, strategy, start.elapsed().as_secs_f32());
    if let Some(ref stats_path) = args.stats_path {
        stats.append_to_jsonl(stats_path)?;
    }
    if args.json {
        return Ok(tree);
    }
    println!();
    println!("==========");
    println!("Completed!");
    println!("==========");
    println!("  # nodes: {}", stats.n_nodes);
    println!("  # internal: {}", stats.n_internal);
    println!("  # leaves: {}", stats.n_leaves);
    println!("  nodes/symbol: {:.2}", stats.get_nodes_per_symbol());
    println!("  max internal depth: {}", stats.max_internal_depth);
    println!("  mean internal depth: {:.2}", stats.mean_internal_depth);
    println!("  time: {:.3}s", stats.elapsed_time);
    println!();
    Ok(tree)
}
