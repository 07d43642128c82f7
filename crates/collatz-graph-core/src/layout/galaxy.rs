//! Galaxy layout: radial rings warped by a per-depth 3D tilt.
//!
//! Each ring is rotated about X then Y by `tilt + depth * tilt_step` and
//! projected orthographically. Overlap is checked on the projected point,
//! so rings that cross on screen push their nodes apart.

use rand::Rng;

use super::radial::{place_rings, RingSlot};
use super::{LayoutReport, Placement};
use crate::config::LayoutConfig;
use crate::error::GraphResult;
use crate::geometry::{tilt_project, Point, Point3};
use crate::tree::SequenceTree;

pub(super) fn place<R: Rng + ?Sized>(
    tree: &mut SequenceTree,
    config: &LayoutConfig,
    rng: &mut R,
) -> GraphResult<LayoutReport> {
    let mut placement = Placement::new(config, 0.0)?;
    place_rings(tree, config, &mut placement, rng, |slot| project(config, slot));

    // Connections curve around the galactic core.
    let core = project(config, &RingSlot {
        depth: 0,
        radius: 0.0,
        angle: 0.0,
        step: 0.0,
    });
    for node in tree.nodes_mut() {
        node.spiral_center = Some(core);
    }

    Ok(placement.finish())
}

fn project(config: &LayoutConfig, slot: &RingSlot) -> Point {
    let (tilt_x, tilt_y) = tilt_for_depth(config, slot.depth);
    tilt_project(Point3::flat(slot.flat()), tilt_x, tilt_y)
}

/// Tilt angles in radians for a ring.
fn tilt_for_depth(config: &LayoutConfig, depth: u32) -> (f64, f64) {
    let extra = depth as f64 * config.tilt_step;
    (
        (config.tilt_x + extra).to_radians(),
        (config.tilt_y + extra).to_radians(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::tilt;
    use crate::sequence::{collatz_range, DEFAULT_MAX_STEPS};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_projection_matches_tilt() {
        let config = LayoutConfig::default();
        let slot = RingSlot {
            depth: 3,
            radius: 100.0,
            angle: 1.0,
            step: 0.5,
        };
        let projected = project(&config, &slot);
        let (tx, ty) = tilt_for_depth(&config, 3);
        let rotated = tilt(Point3::flat(slot.flat()), tx, ty);
        assert_eq!(projected, Point::new(rotated.x, rotated.y));
    }

    #[test]
    fn test_untilted_galaxy_matches_radial_rings() {
        let config = LayoutConfig {
            tilt_x: 0.0,
            tilt_y: 0.0,
            tilt_step: 0.0,
            jitter: 0.0,
            ..LayoutConfig::default()
        };
        let seqs = collatz_range(1..=6, DEFAULT_MAX_STEPS).unwrap();
        let mut tree = SequenceTree::build(&seqs).unwrap();
        let mut rng = StdRng::seed_from_u64(2);
        place(&mut tree, &config, &mut rng).unwrap();
        for (_, node) in tree.iter() {
            let r = node.position().unwrap().length();
            let expected = if node.depth == 0 {
                0.0
            } else {
                config.base_radius + node.depth as f64 * config.layer_spacing
            };
            assert!((r - expected).abs() < 1e-9, "{}: {r}", node.value);
            assert_eq!(node.spiral_center, Some(Point::ORIGIN));
        }
    }

    #[test]
    fn test_tilt_flattens_rings() {
        let config = LayoutConfig {
            tilt_x: 80.0,
            tilt_y: 0.0,
            tilt_step: 0.0,
            jitter: 0.0,
            ..LayoutConfig::default()
        };
        let seqs = collatz_range(1..=20, DEFAULT_MAX_STEPS).unwrap();
        let mut tree = SequenceTree::build(&seqs).unwrap();
        let mut rng = StdRng::seed_from_u64(8);
        place(&mut tree, &config, &mut rng).unwrap();
        let (mut width, mut height) = (0.0f64, 0.0f64);
        for (_, node) in tree.iter() {
            let p = node.position().unwrap();
            width = width.max(p.x.abs());
            height = height.max(p.y.abs());
        }
        assert!(height < width * 0.5, "width {width} height {height}");
    }
}
