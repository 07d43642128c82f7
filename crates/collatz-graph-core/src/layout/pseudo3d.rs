//! Pseudo-3D layout: the standard tree, bent by perspective wherever a
//! branch changes Z.
//!
//! Nodes shrink with normalized Z. Z only drives the perspective; overlap
//! is checked on the projected 2D position against the widest radius in
//! the tree, and a blocked first probe may still be accepted with
//! `overlap_probability`.

use rand::Rng;

use super::standard::{candidate, parent_position, probe_row};
use super::{LayoutReport, Placement};
use crate::config::LayoutConfig;
use crate::error::GraphResult;
use crate::geometry::Point;
use crate::projection::PerspectiveProjector;
use crate::tree::{normalize_z, SequenceTree};

pub(super) fn place<R: Rng + ?Sized>(
    tree: &mut SequenceTree,
    config: &LayoutConfig,
    rng: &mut R,
) -> GraphResult<LayoutReport> {
    let projector = PerspectiveProjector::new(config.viewer_distance)?;
    let mut placement = Placement::new(config, config.overlap_probability)?;
    let (z_min, z_max) = tree.z_range();
    let radius_at = |z: i32| config.node_radius * projector.radius_scale(normalize_z(z, z_min, z_max));
    // Nearest Z is drawn largest.
    let widest = radius_at(z_min);

    let order = tree.preorder();
    let root = tree.root();
    tree.get_mut(root).radius = radius_at(tree.get(root).z);
    placement.commit(tree, root, Point::ORIGIN);

    for id in order.into_iter().skip(1) {
        let Some(parent_pos) = parent_position(tree, id) else {
            continue;
        };
        let node = tree.get(id);
        let z = node.z;
        let parent_z = node.parent.map_or(z, |p| tree.get(p).z);
        let radius = radius_at(z);

        let mut at = candidate(config, node.value, parent_pos);
        if z != parent_z {
            let nz = normalize_z(z, z_min, z_max);
            at = projector
                .project(at, nz, tree.side(id), config.perspective_offset, rng)
                .position;
        }

        let probes = probe_row(at, config.spacer_x);
        let chosen = placement.resolve(&probes, radius + widest, rng);
        tree.get_mut(id).radius = radius;
        placement.commit(tree, id, chosen);
    }

    Ok(placement.finish())
}
