//! 3x+1 trajectories and input validation for the tree builder.

use std::collections::HashSet;

use tracing::debug;

use crate::error::{GraphError, GraphResult};

/// Default cap on iterations before a trajectory is abandoned.
pub const DEFAULT_MAX_STEPS: usize = 10_000;

/// Iterate the Collatz map from `start` until it reaches 1.
///
/// The returned sequence starts with `start` and ends with `1`.
pub fn collatz_sequence(start: u64, max_steps: usize) -> GraphResult<Vec<u64>> {
    if start == 0 {
        return Err(GraphError::InvalidSequence {
            index: 0,
            message: "start value must be positive".into(),
        });
    }

    let mut sequence = vec![start];
    let mut n = start;
    while n != 1 {
        if sequence.len() > max_steps {
            return Err(GraphError::StepLimitExceeded {
                start,
                limit: max_steps,
            });
        }
        n = if n % 2 == 0 {
            n / 2
        } else {
            n.checked_mul(3)
                .and_then(|v| v.checked_add(1))
                .ok_or(GraphError::SequenceOverflow { start, at: n })?
        };
        sequence.push(n);
    }
    Ok(sequence)
}

/// Trajectories for every start value, in the given order.
pub fn collatz_range<I>(starts: I, max_steps: usize) -> GraphResult<Vec<Vec<u64>>>
where
    I: IntoIterator<Item = u64>,
{
    let sequences = starts
        .into_iter()
        .map(|start| collatz_sequence(start, max_steps))
        .collect::<GraphResult<Vec<_>>>()?;
    debug!(count = sequences.len(), "Generated sequences");
    Ok(sequences)
}

/// Check the input contract: at least one sequence; each non-empty,
/// positive, and ending at 1.
pub fn validate_sequences(sequences: &[Vec<u64>]) -> GraphResult<()> {
    if sequences.is_empty() {
        return Err(GraphError::NoSequences);
    }
    for (index, sequence) in sequences.iter().enumerate() {
        let Some(&last) = sequence.last() else {
            return Err(GraphError::EmptySequence { index });
        };
        if sequence.contains(&0) {
            return Err(GraphError::InvalidSequence {
                index,
                message: "values must be positive".into(),
            });
        }
        if last != 1 {
            return Err(GraphError::InvalidSequence {
                index,
                message: format!("must end at 1, ends at {last}"),
            });
        }
        let mut seen = HashSet::with_capacity(sequence.len());
        if let Some(repeated) = sequence.iter().find(|v| !seen.insert(**v)) {
            return Err(GraphError::InvalidSequence {
                index,
                message: format!("value {repeated} repeats (sequences must not cycle)"),
            });
        }
    }
    Ok(())
}
