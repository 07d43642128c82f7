//! Sequence command implementation.
//!
//! Prints one 3x+1 trajectory.

use anyhow::{Context, Result};
use collatz_graph_core::collatz_sequence;

/// Print the trajectory from `start` down to 1, then its step count.
pub fn execute(start: u64, max_steps: usize) -> Result<()> {
    let sequence = collatz_sequence(start, max_steps)
        .with_context(|| format!("Failed to compute the trajectory of {start}"))?;
    let line: Vec<String> = sequence.iter().map(u64::to_string).collect();
    println!("{}", line.join(" "));
    println!("{} steps", sequence.len() - 1);
    Ok(())
}
