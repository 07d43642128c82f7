//! Geometry generators. Each is a pure function of centre, radius and rotation.

use std::f64::consts::{PI, TAU};

use serde::{Deserialize, Serialize};

use crate::geometry::{rotate_counter_clockwise, Point, Rect};

/// Polygon sub-variants; four-sided shapes come in six flavours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolygonVariant {
    Triangle,
    Square,
    Rectangle,
    Rhombus,
    Parallelogram,
    Trapezoid,
    Kite,
    Pentagon,
    Hexagon,
    Heptagon,
    Octagon,
}

impl PolygonVariant {
    pub const QUADRILATERALS: [PolygonVariant; 6] = [
        PolygonVariant::Square,
        PolygonVariant::Rectangle,
        PolygonVariant::Rhombus,
        PolygonVariant::Parallelogram,
        PolygonVariant::Trapezoid,
        PolygonVariant::Kite,
    ];

    pub fn sides(&self) -> usize {
        match self {
            PolygonVariant::Triangle => 3,
            PolygonVariant::Square
            | PolygonVariant::Rectangle
            | PolygonVariant::Rhombus
            | PolygonVariant::Parallelogram
            | PolygonVariant::Trapezoid
            | PolygonVariant::Kite => 4,
            PolygonVariant::Pentagon => 5,
            PolygonVariant::Hexagon => 6,
            PolygonVariant::Heptagon => 7,
            PolygonVariant::Octagon => 8,
        }
    }

    /// Regular polygon for a side count; 4 maps to a square.
    pub fn regular(sides: u32) -> Option<Self> {
        Some(match sides {
            3 => PolygonVariant::Triangle,
            4 => PolygonVariant::Square,
            5 => PolygonVariant::Pentagon,
            6 => PolygonVariant::Hexagon,
            7 => PolygonVariant::Heptagon,
            8 => PolygonVariant::Octagon,
            _ => return None,
        })
    }
}

/// Shape outline, either as bounding primitives or as an explicit vertex list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Geometry {
    Ellipse {
        bounds: Rect,
        rotation: f64,
    },
    Arc {
        bounds: Rect,
        start_angle: f64,
        sweep_angle: f64,
        thickness: f64,
    },
    Donut {
        outer: Rect,
        inner: Rect,
    },
    Semicircle {
        bounds: Rect,
        start_angle: f64,
    },
    Pill {
        bounds: Rect,
        corner_radius: f64,
        rotation: f64,
    },
    Polygon {
        variant: PolygonVariant,
        vertices: Vec<Point>,
    },
    Star {
        points: u32,
        vertices: Vec<Point>,
    },
    Seashell {
        vertices: Vec<Point>,
    },
    Plus {
        vertices: Vec<Point>,
    },
}

impl Geometry {
    /// Vertex list for the vertex-based variants.
    pub fn vertices(&self) -> Option<&[Point]> {
        match self {
            Geometry::Polygon { vertices, .. }
            | Geometry::Star { vertices, .. }
            | Geometry::Seashell { vertices }
            | Geometry::Plus { vertices } => Some(vertices.as_slice()),
            _ => None,
        }
    }

    /// Shear and squash around `center` to suggest depth.
    ///
    /// Vertex outlines are sheared horizontally by `factor` and flattened
    /// vertically; bounding boxes are stretched horizontally by `1 + factor`.
    pub(crate) fn skew(&mut self, center: Point, factor: f64) {
        let squash = 1.0 - 0.3 * factor.abs();
        let shear = |p: &mut Point| {
            let dy = p.y - center.y;
            p.x += factor * dy;
            p.y = center.y + dy * squash;
        };
        let stretch = |r: &mut Rect| {
            *r = Rect::centered(r.center(), r.width * (1.0 + factor), r.height * squash);
        };
        match self {
            Geometry::Polygon { vertices, .. }
            | Geometry::Star { vertices, .. }
            | Geometry::Seashell { vertices }
            | Geometry::Plus { vertices } => vertices.iter_mut().for_each(shear),
            Geometry::Ellipse { bounds, .. }
            | Geometry::Arc { bounds, .. }
            | Geometry::Semicircle { bounds, .. }
            | Geometry::Pill { bounds, .. } => stretch(bounds),
            Geometry::Donut { outer, inner } => {
                stretch(outer);
                stretch(inner);
            }
        }
    }
}

/// Local offsets rotated by `rotation` and moved to `center`.
fn place(center: Point, rotation: f64, local: &[(f64, f64)]) -> Vec<Point> {
    local
        .iter()
        .map(|&(x, y)| rotate_counter_clockwise(Point::new(x, y), rotation) + center)
        .collect()
}

pub fn ellipse(center: Point, radius: f64, rotation: f64) -> Geometry {
    Geometry::Ellipse {
        bounds: Rect::centered(center, radius * 2.0, radius * 1.2),
        rotation,
    }
}

pub fn circle(center: Point, radius: f64, _rotation: f64) -> Geometry {
    Geometry::Ellipse {
        bounds: Rect::centered(center, radius * 2.0, radius * 2.0),
        rotation: 0.0,
    }
}

pub fn arc(center: Point, radius: f64, rotation: f64) -> Geometry {
    Geometry::Arc {
        bounds: Rect::centered(center, radius * 2.0, radius * 2.0),
        start_angle: rotation,
        sweep_angle: 1.5 * PI,
        thickness: radius * 0.3,
    }
}

pub fn donut(center: Point, radius: f64, _rotation: f64) -> Geometry {
    Geometry::Donut {
        outer: Rect::centered(center, radius * 2.0, radius * 2.0),
        inner: Rect::centered(center, radius, radius),
    }
}

pub fn semicircle(center: Point, radius: f64, rotation: f64) -> Geometry {
    Geometry::Semicircle {
        bounds: Rect::centered(center, radius * 2.0, radius * 2.0),
        start_angle: rotation,
    }
}

pub fn pill(center: Point, radius: f64, rotation: f64) -> Geometry {
    Geometry::Pill {
        bounds: Rect::centered(center, radius * 2.0, radius),
        corner_radius: radius / 2.0,
        rotation,
    }
}

/// Polygon outline for any variant.
pub fn polygon(variant: PolygonVariant, center: Point, r: f64, rotation: f64) -> Geometry {
    let vertices = match variant {
        PolygonVariant::Square => regular_vertices(4, center, r, rotation + PI / 4.0),
        PolygonVariant::Rectangle => place(
            center,
            rotation,
            &[
                (-0.9 * r, -0.55 * r),
                (0.9 * r, -0.55 * r),
                (0.9 * r, 0.55 * r),
                (-0.9 * r, 0.55 * r),
            ],
        ),
        PolygonVariant::Rhombus => place(
            center,
            rotation,
            &[(0.0, -r), (0.6 * r, 0.0), (0.0, r), (-0.6 * r, 0.0)],
        ),
        PolygonVariant::Parallelogram => place(
            center,
            rotation,
            &[
                (-0.4 * r, -0.5 * r),
                (r, -0.5 * r),
                (0.4 * r, 0.5 * r),
                (-r, 0.5 * r),
            ],
        ),
        PolygonVariant::Trapezoid => place(
            center,
            rotation,
            &[
                (-0.45 * r, -0.6 * r),
                (0.45 * r, -0.6 * r),
                (0.9 * r, 0.6 * r),
                (-0.9 * r, 0.6 * r),
            ],
        ),
        PolygonVariant::Kite => place(
            center,
            rotation,
            &[(0.0, -r), (0.6 * r, -0.2 * r), (0.0, r), (-0.6 * r, -0.2 * r)],
        ),
        regular => regular_vertices(regular.sides(), center, r, rotation),
    };
    Geometry::Polygon { variant, vertices }
}

fn regular_vertices(sides: usize, center: Point, r: f64, rotation: f64) -> Vec<Point> {
    (0..sides)
        .map(|i| Point::polar(center, r, rotation + TAU * i as f64 / sides as f64))
        .collect()
}

pub const STAR_POINTS: u32 = 5;

pub fn star(center: Point, radius: f64, rotation: f64) -> Geometry {
    let inner = radius * 0.45;
    let steps = STAR_POINTS as usize * 2;
    let vertices = (0..steps)
        .map(|i| {
            let r = if i % 2 == 0 { radius } else { inner };
            Point::polar(center, r, rotation + TAU * i as f64 / steps as f64)
        })
        .collect();
    Geometry::Star {
        points: STAR_POINTS,
        vertices,
    }
}

const SEASHELL_SEGMENTS: usize = 48;
const SEASHELL_TURNS: f64 = 2.0;

/// Logarithmic spiral opening outward until it reaches `radius`.
pub fn seashell(center: Point, radius: f64, rotation: f64) -> Geometry {
    let sweep = TAU * SEASHELL_TURNS;
    // r(theta) = radius * e^(b (theta - sweep)), starting at 5% of radius.
    let b = (20.0f64).ln() / sweep;
    let vertices = (0..=SEASHELL_SEGMENTS)
        .map(|i| {
            let theta = sweep * i as f64 / SEASHELL_SEGMENTS as f64;
            let r = radius * (b * (theta - sweep)).exp();
            Point::polar(center, r, rotation + theta)
        })
        .collect();
    Geometry::Seashell { vertices }
}

pub fn plus(center: Point, radius: f64, rotation: f64) -> Geometry {
    let a = radius * 0.3;
    let r = radius;
    let vertices = place(
        center,
        rotation,
        &[
            (-a, -r),
            (a, -r),
            (a, -a),
            (r, -a),
            (r, a),
            (a, a),
            (a, r),
            (-a, r),
            (-a, a),
            (-r, a),
            (-r, -a),
            (-a, -a),
        ],
    );
    Geometry::Plus { vertices }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn max_extent(vertices: &[Point], center: Point) -> f64 {
        vertices
            .iter()
            .map(|v| v.distance(center))
            .fold(0.0, f64::max)
    }

    #[test]
    fn test_regular_polygons_on_circle() {
        let c = Point::new(50.0, 50.0);
        for sides in 3..=8 {
            let variant = PolygonVariant::regular(sides).unwrap();
            let g = polygon(variant, c, 10.0, 0.3);
            let vertices = g.vertices().unwrap();
            assert_eq!(vertices.len(), variant.sides());
            for v in vertices {
                assert!((v.distance(c) - 10.0).abs() < 1e-9);
            }
        }
        assert_eq!(PolygonVariant::regular(9), None);
    }

    #[test]
    fn test_quadrilaterals_have_four_vertices_within_radius() {
        let c = Point::new(0.0, 0.0);
        for variant in PolygonVariant::QUADRILATERALS {
            let g = polygon(variant, c, 10.0, 1.1);
            let vertices = g.vertices().unwrap();
            assert_eq!(vertices.len(), 4, "{variant:?}");
            assert!(max_extent(vertices, c) <= 10.0 * 1.2, "{variant:?}");
        }
    }

    #[test]
    fn test_star_alternates_radii() {
        let c = Point::new(0.0, 0.0);
        let g = star(c, 10.0, 0.0);
        let vertices = g.vertices().unwrap();
        assert_eq!(vertices.len(), 10);
        assert!((vertices[0].distance(c) - 10.0).abs() < 1e-9);
        assert!((vertices[1].distance(c) - 4.5).abs() < 1e-9);
    }

    #[test]
    fn test_seashell_grows_outward() {
        let c = Point::new(0.0, 0.0);
        let g = seashell(c, 10.0, 0.0);
        let vertices = g.vertices().unwrap();
        assert_eq!(vertices.len(), SEASHELL_SEGMENTS + 1);
        let first = vertices[0].distance(c);
        let last = vertices[SEASHELL_SEGMENTS].distance(c);
        assert!((first - 0.5).abs() < 1e-9);
        assert!((last - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_plus_is_symmetric() {
        let c = Point::new(3.0, 4.0);
        let g = plus(c, 10.0, 0.0);
        let vertices = g.vertices().unwrap();
        assert_eq!(vertices.len(), 12);
        let sum = vertices.iter().fold(Point::ORIGIN, |acc, v| acc + (*v - c));
        assert!(sum.length() < 1e-9);
    }

    #[test]
    fn test_bounds_are_centered() {
        let c = Point::new(7.0, -2.0);
        for g in [ellipse(c, 5.0, 0.4), circle(c, 5.0, 0.0), pill(c, 5.0, 1.0)] {
            let bounds = match g {
                Geometry::Ellipse { bounds, .. } | Geometry::Pill { bounds, .. } => bounds,
                other => panic!("unexpected {other:?}"),
            };
            assert!(bounds.center().distance(c) < 1e-9);
        }
    }

    #[test]
    fn test_skew_shears_vertices_and_stretches_bounds() {
        let c = Point::new(0.0, 0.0);
        let mut g = polygon(PolygonVariant::Square, c, 10.0, 0.0);
        let before = g.vertices().unwrap().to_vec();
        g.skew(c, 0.5);
        let after = g.vertices().unwrap();
        for (b, a) in before.iter().zip(after) {
            assert!((a.x - (b.x + 0.5 * b.y)).abs() < 1e-9);
        }

        let mut e = circle(c, 10.0, 0.0);
        e.skew(c, 0.5);
        match e {
            Geometry::Ellipse { bounds, .. } => {
                assert!((bounds.width - 30.0).abs() < 1e-9);
                assert!(bounds.center().distance(c) < 1e-9);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
