//! Procedural node shapes with weighted random type selection.

mod geometry;
mod selector;

use std::f64::consts::TAU;
use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::error::{GraphError, GraphResult};
use crate::geometry::Point;
use crate::light::Halo;

pub use geometry::{Geometry, PolygonVariant, STAR_POINTS};
pub use selector::WeightedSelector;

/// Largest skew magnitude drawn for a shape.
pub const MAX_SKEW: f64 = 0.66;

/// Weight of four-sided polygons against every other side count.
const QUAD_WEIGHT: u32 = 6;

/// Top-level shape type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Ellipse,
    Circle,
    Polygon,
    Arc,
    Donut,
    Semicircle,
    Pill,
    Star,
    Seashell,
    Plus,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 10] = [
        ShapeKind::Ellipse,
        ShapeKind::Circle,
        ShapeKind::Polygon,
        ShapeKind::Arc,
        ShapeKind::Donut,
        ShapeKind::Semicircle,
        ShapeKind::Pill,
        ShapeKind::Star,
        ShapeKind::Seashell,
        ShapeKind::Plus,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Ellipse => "ellipse",
            ShapeKind::Circle => "circle",
            ShapeKind::Polygon => "polygon",
            ShapeKind::Arc => "arc",
            ShapeKind::Donut => "donut",
            ShapeKind::Semicircle => "semicircle",
            ShapeKind::Pill => "pill",
            ShapeKind::Star => "star",
            ShapeKind::Seashell => "seashell",
            ShapeKind::Plus => "plus",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShapeKind {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == wanted)
            .ok_or_else(|| GraphError::UnknownShape { name: s.to_string() })
    }
}

/// Relative weight of one shape type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeWeight {
    pub kind: ShapeKind,
    pub weight: u32,
}

impl ShapeWeight {
    pub fn new(kind: ShapeKind, weight: u32) -> Self {
        Self { kind, weight }
    }
}

pub fn default_shape_weights() -> Vec<ShapeWeight> {
    [
        (ShapeKind::Circle, 4),
        (ShapeKind::Ellipse, 2),
        (ShapeKind::Polygon, 6),
        (ShapeKind::Arc, 1),
        (ShapeKind::Donut, 1),
        (ShapeKind::Semicircle, 1),
        (ShapeKind::Pill, 1),
        (ShapeKind::Star, 2),
        (ShapeKind::Seashell, 1),
        (ShapeKind::Plus, 1),
    ]
    .into_iter()
    .map(|(kind, weight)| ShapeWeight::new(kind, weight))
    .collect()
}

/// Geometry and styling for one node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub kind: ShapeKind,
    pub geometry: Geometry,
    pub center: Point,
    pub radius: f64,
    /// Rotation drawn for this instance, radians.
    pub rotation: f64,
    pub color: Rgba,
    pub border_color: Rgba,
    pub halo: Option<Halo>,
    skew: Option<f64>,
}

impl Shape {
    /// Skew factor, if one has been applied.
    pub fn skew(&self) -> Option<f64> {
        self.skew
    }

    /// Shear the outline once. Returns false, leaving the shape untouched,
    /// if a skew was already applied.
    pub fn apply_skew(&mut self, factor: f64) -> bool {
        if self.skew.is_some() {
            return false;
        }
        let factor = factor.clamp(-MAX_SKEW, MAX_SKEW);
        self.geometry.skew(self.center, factor);
        self.skew = Some(factor);
        true
    }
}

/// Draws a shape type, then builds its geometry.
#[derive(Debug, Clone)]
pub struct ShapeFactory {
    kinds: WeightedSelector<ShapeKind>,
    sides: WeightedSelector<u32>,
    quadrilaterals: WeightedSelector<PolygonVariant>,
}

impl ShapeFactory {
    pub fn new(weights: &[ShapeWeight]) -> GraphResult<Self> {
        let kinds = WeightedSelector::new(weights.iter().map(|w| (w.kind, w.weight)))?;
        let sides = WeightedSelector::new(
            (3..=8).map(|n| (n, if n == 4 { QUAD_WEIGHT } else { 1 })),
        )?;
        let quadrilaterals =
            WeightedSelector::new(PolygonVariant::QUADRILATERALS.into_iter().map(|v| (v, 1)))?;
        Ok(Self {
            kinds,
            sides,
            quadrilaterals,
        })
    }

    /// Pick a polygon variant: side count first, then one of the six
    /// quadrilaterals when it comes up four.
    pub fn pick_polygon<R: Rng + ?Sized>(&self, rng: &mut R) -> PolygonVariant {
        let sides = *self.sides.pick(rng);
        if sides == 4 {
            *self.quadrilaterals.pick(rng)
        } else {
            PolygonVariant::regular(sides).unwrap_or(PolygonVariant::Square)
        }
    }

    /// Build a shape centred on `center`. Rotation is uniform in `[0, 2π)`.
    pub fn create<R: Rng + ?Sized>(
        &self,
        center: Point,
        radius: f64,
        color: Rgba,
        skew: bool,
        rng: &mut R,
    ) -> Shape {
        let kind = *self.kinds.pick(rng);
        let rotation = rng.random_range(0.0..TAU);
        let geometry = match kind {
            ShapeKind::Ellipse => geometry::ellipse(center, radius, rotation),
            ShapeKind::Circle => geometry::circle(center, radius, rotation),
            ShapeKind::Polygon => {
                let variant = self.pick_polygon(rng);
                geometry::polygon(variant, center, radius, rotation)
            }
            ShapeKind::Arc => geometry::arc(center, radius, rotation),
            ShapeKind::Donut => geometry::donut(center, radius, rotation),
            ShapeKind::Semicircle => geometry::semicircle(center, radius, rotation),
            ShapeKind::Pill => geometry::pill(center, radius, rotation),
            ShapeKind::Star => geometry::star(center, radius, rotation),
            ShapeKind::Seashell => geometry::seashell(center, radius, rotation),
            ShapeKind::Plus => geometry::plus(center, radius, rotation),
        };

        let mut shape = Shape {
            kind,
            geometry,
            center,
            radius,
            rotation,
            color,
            border_color: color.darken(0.4),
            halo: None,
            skew: None,
        };
        if skew {
            shape.apply_skew(rng.random_range(-MAX_SKEW..=MAX_SKEW));
        }
        shape
    }
}
