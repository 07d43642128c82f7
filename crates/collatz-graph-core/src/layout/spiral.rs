//! Spiral layout: logarithmic arms that fork on second children.
//!
//! A node continues its parent's arm by turning `spiral_angle` further
//! around the arm's centre and growing the radius by `spiral_growth`.
//! The second child of a two-way branch starts a fresh arm whose centre
//! sits just outside the parent, pushed away from the parent's own centre.

use rand::Rng;

use super::{LayoutReport, Placement};
use crate::config::LayoutConfig;
use crate::error::{GraphError, GraphResult};
use crate::geometry::Point;
use crate::tree::{BranchSide, SequenceTree};

/// Polar state of one node on its arm.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Arm {
    center: Point,
    angle: f64,
    radius: f64,
}

impl Arm {
    fn point(&self) -> Point {
        Point::polar(self.center, self.radius, self.angle)
    }

    fn next(&self, step: f64, growth: f64) -> Arm {
        Arm {
            angle: self.angle + step,
            radius: self.radius * growth,
            ..*self
        }
    }

    /// Fresh arm for a second child of the node at `parent`.
    fn fork(&self, parent: Point, offset: f64, radius: f64) -> Arm {
        let mut outward = (parent - self.center).normalized();
        if outward.length() == 0.0 {
            outward = Point::polar(Point::ORIGIN, 1.0, self.angle);
        }
        Arm {
            center: parent + outward.scale(self.radius * offset),
            angle: outward.angle(),
            radius,
        }
    }

    /// Arm point, half a step either way along the arm, then one
    /// diameter further out.
    fn probes(&self, step: f64, min_distance: f64) -> [Arm; 4] {
        [
            *self,
            Arm {
                angle: self.angle + step / 2.0,
                ..*self
            },
            Arm {
                angle: self.angle - step / 2.0,
                ..*self
            },
            Arm {
                radius: self.radius + min_distance,
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
    let step = config.spiral_angle.to_radians();
    let growth = config.spiral_growth;
    let min_distance = config.min_distance();
    check_reach(tree, config)?;

    let order = tree.preorder();
    let root = tree.root();
    let mut arms: Vec<Option<Arm>> = vec![None; tree.len()];
    arms[root.0] = Some(Arm {
        center: Point::ORIGIN,
        angle: 0.0,
        radius: config.spacer_y / growth,
    });
    placement.commit(tree, root, Point::ORIGIN);
    tree.get_mut(root).spiral_center = Some(Point::ORIGIN);

    for id in order.into_iter().skip(1) {
        let Some(parent) = tree.get(id).parent else {
            continue;
        };
        let (Some(parent_arm), Some(parent_pos)) = (arms[parent.0], tree.get(parent).position())
        else {
            continue;
        };

        let arm = match tree.side(id) {
            Some(BranchSide::Second) => {
                parent_arm.fork(parent_pos, config.branch_offset, config.spacer_y)
            }
            _ => parent_arm.next(step, growth),
        };
        let slots = arm.probes(step, min_distance);
        let probes = slots.map(|a| a.point());
        let chosen = placement.resolve(&probes, min_distance, rng);
        let index = probes.iter().position(|p| *p == chosen).unwrap_or(0);

        arms[id.0] = Some(slots[index]);
        placement.commit(tree, id, chosen);
        tree.get_mut(id).spiral_center = Some(slots[index].center);
    }

    Ok(placement.finish())
}

/// Arm radius is `growth^depth` along a first-child chain; reject trees
/// deep enough to push coordinates past `f64`.
fn check_reach(tree: &SequenceTree, config: &LayoutConfig) -> GraphResult<()> {
    let depth = tree.max_depth();
    let exponent = i32::try_from(depth).unwrap_or(i32::MAX);
    let reach = config.spacer_y
        * config.spiral_growth.powi(exponent)
        * (1.0 + config.branch_offset)
        * (f64::from(depth) + 1.0);
    if reach.is_finite() {
        Ok(())
    } else {
        Err(GraphError::InvalidConfig {
            field: "spiral_growth",
            message: format!(
                "{} over {depth} levels does not fit in f64",
                config.spiral_growth
            ),
        })
    }
}
