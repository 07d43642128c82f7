//! Planar and 3D points, rotations and the tilted orthographic projection.

use serde::{Deserialize, Serialize};

/// A 2D position in layout space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point at `radius` from `center` in direction `angle` (radians).
    pub fn polar(center: Point, radius: f64, angle: f64) -> Self {
        Self::new(
            center.x + radius * angle.cos(),
            center.y + radius * angle.sin(),
        )
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn scale(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    /// Unit vector in the same direction, or the zero vector for a zero-length input.
    pub fn normalized(self) -> Self {
        let len = self.length();
        if len <= f64::EPSILON {
            Self::ORIGIN
        } else {
            Self::new(self.x / len, self.y / len)
        }
    }

    /// Angle of the vector from the origin, radians.
    pub fn angle(self) -> f64 {
        self.y.atan2(self.x)
    }
}

impl std::ops::Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A 3D position, used by the tilted (galaxy) and pseudo-3D layouts.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn flat(p: Point) -> Self {
        Self::new(p.x, p.y, 0.0)
    }

    pub fn distance(self, other: Point3) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

/// Axis-aligned rectangle, used as the bounding box of round shapes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Rectangle of the given size centred on `center`.
    pub fn centered(center: Point, width: f64, height: f64) -> Self {
        Self {
            x: center.x - width / 2.0,
            y: center.y - height / 2.0,
            width,
            height,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Rotate `point` clockwise around the origin by `angle` radians.
pub fn rotate_clockwise(point: Point, angle: f64) -> Point {
    rotate_counter_clockwise(point, -angle)
}

/// Rotate `point` counter-clockwise around the origin by `angle` radians.
pub fn rotate_counter_clockwise(point: Point, angle: f64) -> Point {
    let (sin, cos) = angle.sin_cos();
    Point::new(point.x * cos - point.y * sin, point.x * sin + point.y * cos)
}

/// Rotate `point` counter-clockwise around `center`.
pub fn rotate_about(point: Point, center: Point, angle: f64) -> Point {
    rotate_counter_clockwise(point - center, angle) + center
}

/// Rotate around the X axis by `tilt_x`, then around the Y axis by `tilt_y`.
pub fn tilt(point: Point3, tilt_x: f64, tilt_y: f64) -> Point3 {
    let (sx, cx) = tilt_x.sin_cos();
    let y1 = point.y * cx - point.z * sx;
    let z1 = point.y * sx + point.z * cx;

    let (sy, cy) = tilt_y.sin_cos();
    let x2 = point.x * cy + z1 * sy;
    let z2 = -point.x * sy + z1 * cy;

    Point3::new(x2, y1, z2)
}

/// Orthographic projection after tilting: the rotated Z is discarded.
pub fn tilt_project(point: Point3, tilt_x: f64, tilt_y: f64) -> Point {
    let p = tilt(point, tilt_x, tilt_y);
    Point::new(p.x, p.y)
}
