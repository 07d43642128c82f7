//! Radial-layers layout: depth level `d` sits on a ring of radius
//! `base_radius + d * layer_spacing`, nodes evenly spaced with jitter.

use std::cmp::Ordering;
use std::f64::consts::TAU;

use rand::Rng;

use super::{LayoutReport, Placement};
use crate::config::LayoutConfig;
use crate::error::GraphResult;
use crate::geometry::Point;
use crate::tree::{NodeId, SequenceTree};

/// A slot on a ring before it is mapped to screen space.
#[derive(Debug, Clone, Copy)]
pub(super) struct RingSlot {
    pub depth: u32,
    pub radius: f64,
    pub angle: f64,
    /// Angular distance to the neighbouring slot.
    pub step: f64,
}

impl RingSlot {
    pub fn flat(&self) -> Point {
        Point::polar(Point::ORIGIN, self.radius, self.angle)
    }

    /// Slot, nudged forward and back along the ring by one node
    /// diameter, then pushed half a diameter outward.
    pub fn probes(&self, min_distance: f64) -> [RingSlot; 4] {
        let nudge = (min_distance / self.radius.max(min_distance)).min(self.step / 2.0);
        [
            *self,
            RingSlot {
                angle: self.angle + nudge,
                ..*self
            },
            RingSlot {
                angle: self.angle - nudge,
                ..*self
            },
            RingSlot {
                radius: self.radius + min_distance / 2.0,
                ..*self
            },
        ]
    }
}

pub(super) fn place<R: Rng + ?Sized>(
    tree: &mut SequenceTree,
    config: &LayoutConfig,
    rng: &mut R,
) -> GraphResult<LayoutReport> {
    let mut placement = Placement::new(config, 0.0)?;
    place_rings(tree, config, &mut placement, rng, RingSlot::flat);
    Ok(placement.finish())
}

/// Walk the tree level by level, mapping each ring slot through `project`.
///
/// Within a level, nodes are ordered by their parent's angle so subtrees
/// stay in the same sector; the ring starts at the first parent's angle so
/// single-node levels line up radially.
pub(super) fn place_rings<R, F>(
    tree: &mut SequenceTree,
    config: &LayoutConfig,
    placement: &mut Placement,
    rng: &mut R,
    project: F,
) where
    R: Rng + ?Sized,
    F: Fn(&RingSlot) -> Point,
{
    let root = tree.root();
    let center = RingSlot {
        depth: 0,
        radius: 0.0,
        angle: 0.0,
        step: TAU,
    };
    placement.commit(tree, root, project(&center));

    let mut angles = vec![0.0f64; tree.len()];
    for (depth, level) in tree.levels().into_iter().enumerate().skip(1) {
        let mut level: Vec<NodeId> = level;
        let parent_angle = |id: &NodeId| tree.get(*id).parent.map_or(0.0, |p| angles[p.0]);
        level.sort_by(|a, b| {
            parent_angle(a)
                .partial_cmp(&parent_angle(b))
                .unwrap_or(Ordering::Equal)
                .then_with(|| tree.get(*a).value.cmp(&tree.get(*b).value))
        });

        let count = level.len().max(1) as f64;
        let step = TAU / count;
        let start = level.first().map_or(0.0, parent_angle);
        let radius = config.base_radius + depth as f64 * config.layer_spacing;

        for (i, id) in level.into_iter().enumerate() {
            let jitter = if config.jitter > 0.0 {
                rng.random_range(-1.0..=1.0) * config.jitter * step
            } else {
                0.0
            };
            let slot = RingSlot {
                depth: depth as u32,
                radius,
                angle: start + i as f64 * step + jitter,
                step,
            };
            let slots = slot.probes(config.min_distance());
            let probes = slots.map(|s| project(&s));
            let chosen = placement.resolve(&probes, config.min_distance(), rng);
            let index = probes.iter().position(|p| *p == chosen).unwrap_or(0);
            angles[id.0] = slots[index].angle;
            placement.commit(tree, id, chosen);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::{collatz_range, DEFAULT_MAX_STEPS};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_chain_lies_on_one_ray() {
        let seqs = vec![vec![16, 8, 4, 2, 1]];
        let mut tree = SequenceTree::build(&seqs).unwrap();
        let config = LayoutConfig {
            jitter: 0.0,
            ..LayoutConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(0);
        place(&mut tree, &config, &mut rng).unwrap();
        for (value, depth) in [(2u64, 1.0), (4, 2.0), (16, 4.0)] {
            let p = tree.get(tree.find(value).unwrap()).position().unwrap();
            let expected = config.base_radius + depth * config.layer_spacing;
            assert!((p.x - expected).abs() < 1e-9, "{value}: {p:?}");
            assert!(p.y.abs() < 1e-9);
        }
    }

    #[test]
    fn test_nodes_sit_on_their_ring() {
        let seqs = collatz_range(1..=12, DEFAULT_MAX_STEPS).unwrap();
        let mut tree = SequenceTree::build(&seqs).unwrap();
        let config = LayoutConfig::default();
        let mut rng = StdRng::seed_from_u64(4);
        let report = place(&mut tree, &config, &mut rng).unwrap();
        assert_eq!(report.resolved + report.tolerated, 0);
        for (_, node) in tree.iter() {
            if node.depth == 0 {
                continue;
            }
            let r = node.position().unwrap().length();
            let expected = config.base_radius + node.depth as f64 * config.layer_spacing;
            assert!((r - expected).abs() < 1e-9, "{}: {r}", node.value);
        }
    }
}
