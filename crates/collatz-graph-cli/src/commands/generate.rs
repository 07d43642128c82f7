//! Generate command implementation.
//!
//! Runs the trajectories through the layout core and writes the positioned
//! graph as JSON.

use std::path::PathBuf;

use anyhow::{Context, Result};
use collatz_graph_core::{collatz_range, generate, PositionedGraph};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::config::Config;

/// What to produce once the graph is laid out.
#[derive(Debug, Default)]
pub struct GenerateOptions {
    /// Explicit start values; the configured range is used when empty.
    pub starts: Vec<u64>,
    /// Write JSON here instead of stdout.
    pub output: Option<PathBuf>,
    /// Print statistics instead of JSON.
    pub summary: bool,
}

pub fn execute(config: &Config, options: &GenerateOptions) -> Result<()> {
    let starts = config.starts(&options.starts)?;
    let sequences = collatz_range(starts.iter().copied(), config.max_steps)
        .context("Failed to compute trajectories")?;

    let seed = match config.graph.seed {
        Some(seed) => seed,
        None => StdRng::from_os_rng().random(),
    };
    info!(seed, starts = starts.len(), layout = %config.graph.layout, "Generating graph");
    let mut rng = StdRng::seed_from_u64(seed);

    let graph = generate(&sequences, &config.graph, &mut rng).context("Failed to lay out graph")?;

    if options.summary {
        print_summary(&graph, seed);
        return Ok(());
    }

    let json = graph.to_json_pretty()?;
    match &options.output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write graph to {}", path.display()))?;
            println!("💾 Saved {} nodes to {}", graph.nodes.len(), path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn print_summary(graph: &PositionedGraph, seed: u64) {
    let stats = &graph.stats;
    println!("📊 Collatz Graph");
    println!("{:─<50}", "");
    println!("Layout:      {}", graph.layout);
    println!("Seed:        {seed}");
    println!("Nodes:       {}", stats.node_count);
    println!("Edges:       {}", stats.edge_count);
    println!("Max depth:   {}", stats.max_depth);
    println!("Z range:     {}..={}", stats.z_range.0, stats.z_range.1);
    println!(
        "Canvas:      {:.0} x {:.0}",
        graph.canvas.width, graph.canvas.height
    );
    println!(
        "Overlaps:    {} resolved, {} tolerated, {} allowed",
        stats.layout.resolved, stats.layout.tolerated, stats.layout.allowed
    );

    println!();
    println!("Depth histogram:");
    let widest = stats.depth_histogram.values().copied().max().unwrap_or(1);
    for (depth, count) in &stats.depth_histogram {
        let bar = "█".repeat((count * 40).div_ceil(widest));
        println!("  {depth:>4} {count:>5} {bar}");
    }

    println!();
    println!("Shapes:");
    for (kind, count) in &stats.shapes {
        println!("  {:<11} {count}", kind.as_str());
    }
}
