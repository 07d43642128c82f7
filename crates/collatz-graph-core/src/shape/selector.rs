//! Weighted random selection over a fixed set of items.

use rand::Rng;

use crate::error::{GraphError, GraphResult};

/// Draws items with probability proportional to their weight.
///
/// Selection walks a cumulative-weight table: a uniform integer in
/// `[1, total]` picks the first item whose cumulative weight reaches it.
#[derive(Debug, Clone)]
pub struct WeightedSelector<T> {
    items: Vec<T>,
    cumulative: Vec<u64>,
}

impl<T> WeightedSelector<T> {
    /// Build a selector. Fails if there are no items or every weight is zero.
    pub fn new<I>(pairs: I) -> GraphResult<Self>
    where
        I: IntoIterator<Item = (T, u32)>,
    {
        let mut items = Vec::new();
        let mut cumulative = Vec::new();
        let mut running = 0u64;
        for (item, weight) in pairs {
            running += u64::from(weight);
            items.push(item);
            cumulative.push(running);
        }
        if items.is_empty() {
            return Err(GraphError::InvalidWeights {
                message: "no items to select from".into(),
            });
        }
        if running == 0 {
            return Err(GraphError::InvalidWeights {
                message: "total weight is zero".into(),
            });
        }
        Ok(Self { items, cumulative })
    }

    pub fn total_weight(&self) -> u64 {
        self.cumulative.last().copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Draw one item.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> &T {
        let draw = rng.random_range(1..=self.total_weight());
        self.select(draw)
    }

    /// Item for a given draw in `[1, total]`.
    fn select(&self, draw: u64) -> &T {
        let index = self.cumulative.partition_point(|&c| c < draw);
        &self.items[index.min(self.items.len() - 1)]
    }
}
