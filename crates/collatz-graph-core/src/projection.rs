//! Perspective projection for the pseudo-3D layout.

use std::f64::consts::FRAC_PI_4;

use rand::Rng;

use crate::error::{GraphError, GraphResult};
use crate::geometry::{rotate_counter_clockwise, Point};
use crate::tree::BranchSide;

/// Projected position plus the scale applied to it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub position: Point,
    pub scale: f64,
}

/// Maps normalized Z and a viewer distance onto screen scale.
#[derive(Debug, Clone, Copy)]
pub struct PerspectiveProjector {
    viewer_distance: f64,
}

impl PerspectiveProjector {
    pub fn new(viewer_distance: f64) -> GraphResult<Self> {
        if !(viewer_distance.is_finite() && viewer_distance > 0.0) {
            return Err(GraphError::InvalidViewerDistance {
                value: viewer_distance,
            });
        }
        Ok(Self { viewer_distance })
    }

    pub fn viewer_distance(&self) -> f64 {
        self.viewer_distance
    }

    /// `1 / (1 + z / d)`; 1 at the front, shrinking with depth.
    pub fn scale(&self, normalized_z: f64) -> f64 {
        1.0 / (1.0 + normalized_z.clamp(0.0, 1.0) / self.viewer_distance)
    }

    /// Radius multiplier `1 / (exp(z / d) * 1.1)`.
    ///
    /// Written as `exp(-z / d) / 1.1` so that tiny viewer distances
    /// underflow to zero instead of overflowing to infinity.
    pub fn radius_scale(&self, normalized_z: f64) -> f64 {
        (-normalized_z.clamp(0.0, 1.0) / self.viewer_distance).exp() / 1.1
    }

    /// Scale `point` toward the origin and, for branch children, push it
    /// `offset` units down (first child) or up (second child), rotated
    /// counter-clockwise by a random angle in `[0°, 45°]`.
    pub fn project<R: Rng + ?Sized>(
        &self,
        point: Point,
        normalized_z: f64,
        side: Option<BranchSide>,
        offset: f64,
        rng: &mut R,
    ) -> Projection {
        let scale = self.scale(normalized_z);
        let mut position = point.scale(scale);
        if let Some(side) = side {
            let direction = match side {
                BranchSide::First => Point::new(0.0, offset),
                BranchSide::Second => Point::new(0.0, -offset),
            };
            let angle = rng.random_range(0.0..=FRAC_PI_4);
            position = position + rotate_counter_clockwise(direction, angle);
        }
        Projection { position, scale }
    }
}
