//! Standard layout: each child one row below its parent.

use rand::Rng;

use super::Placement;
use crate::config::LayoutConfig;
use crate::error::GraphResult;
use crate::geometry::{rotate_clockwise, rotate_counter_clockwise, Point};
use crate::layout::LayoutReport;
use crate::tree::SequenceTree;

pub(super) fn place<R: Rng + ?Sized>(
    tree: &mut SequenceTree,
    config: &LayoutConfig,
    rng: &mut R,
) -> GraphResult<LayoutReport> {
    let mut placement = Placement::new(config, 0.0)?;
    let order = tree.preorder();
    let root = tree.root();
    placement.commit(tree, root, Point::ORIGIN);

    for id in order.into_iter().skip(1) {
        let Some(parent_pos) = parent_position(tree, id) else {
            continue;
        };
        let candidate = candidate(config, tree.get(id).value, parent_pos);
        let probes = probe_row(candidate, config.spacer_x);
        let chosen = placement.resolve(&probes, config.min_distance(), rng);
        placement.commit(tree, id, chosen);
    }

    Ok(placement.finish())
}

pub(super) fn parent_position(tree: &SequenceTree, id: crate::tree::NodeId) -> Option<Point> {
    let parent = tree.get(id).parent?;
    tree.get(parent).position()
}

/// One spacer below the parent, then rotated about the origin.
///
/// Even values turn clockwise and odd values counter-clockwise; the
/// direction flips when the candidate lies left of the origin.
pub(super) fn candidate(config: &LayoutConfig, value: u64, parent: Point) -> Point {
    let below = Point::new(parent.x, parent.y - config.spacer_y);
    if config.rotation_angle == 0.0 {
        return below;
    }
    let angle = config.rotation_angle.to_radians();
    let even = value % 2 == 0;
    let negative = below.x < 0.0;
    if even ^ negative {
        rotate_clockwise(below, angle)
    } else {
        rotate_counter_clockwise(below, angle)
    }
}

/// Candidate, one spacer right, one spacer left.
pub(super) fn probe_row(candidate: Point, spacer: f64) -> [Point; 3] {
    [
        candidate,
        candidate.offset(spacer, 0.0),
        candidate.offset(-spacer, 0.0),
    ]
}
