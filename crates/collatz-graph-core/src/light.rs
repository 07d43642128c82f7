//! Simulated point light: distance-attenuated color blending and halos.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::error::GraphError;
use crate::geometry::Point;
use crate::layout::CanvasSize;

/// Share of the light color mixed in at the far edge of its range.
pub const LIGHT_INTENSITY: f64 = 0.4;

/// Where the light sits on the canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightPosition {
    None,
    #[default]
    TopLeft,
    TopCenter,
    TopRight,
    CenterLeft,
    Center,
    CenterRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl LightPosition {
    pub const ALL: [LightPosition; 10] = [
        LightPosition::None,
        LightPosition::TopLeft,
        LightPosition::TopCenter,
        LightPosition::TopRight,
        LightPosition::CenterLeft,
        LightPosition::Center,
        LightPosition::CenterRight,
        LightPosition::BottomLeft,
        LightPosition::BottomCenter,
        LightPosition::BottomRight,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LightPosition::None => "none",
            LightPosition::TopLeft => "top_left",
            LightPosition::TopCenter => "top_center",
            LightPosition::TopRight => "top_right",
            LightPosition::CenterLeft => "center_left",
            LightPosition::Center => "center",
            LightPosition::CenterRight => "center_right",
            LightPosition::BottomLeft => "bottom_left",
            LightPosition::BottomCenter => "bottom_center",
            LightPosition::BottomRight => "bottom_right",
        }
    }

    /// Fractional canvas anchor, or `None` when lighting is disabled.
    fn anchor(&self) -> Option<(f64, f64)> {
        let (fx, fy) = match self {
            LightPosition::None => return None,
            LightPosition::TopLeft => (0.0, 0.0),
            LightPosition::TopCenter => (0.5, 0.0),
            LightPosition::TopRight => (1.0, 0.0),
            LightPosition::CenterLeft => (0.0, 0.5),
            LightPosition::Center => (0.5, 0.5),
            LightPosition::CenterRight => (1.0, 0.5),
            LightPosition::BottomLeft => (0.0, 1.0),
            LightPosition::BottomCenter => (0.5, 1.0),
            LightPosition::BottomRight => (1.0, 1.0),
        };
        Some((fx, fy))
    }
}

impl fmt::Display for LightPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LightPosition {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == wanted)
            .ok_or_else(|| GraphError::UnknownLightPosition { name: s.to_string() })
    }
}

/// Glow drawn behind a node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Halo {
    pub radius: f64,
    pub color: Rgba,
    /// Shift toward the light, in layout units.
    pub offset: Point,
}

/// Result of lighting one node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LitColor {
    pub color: Rgba,
    pub opacity: f64,
    pub halo: Halo,
}

/// The single light for one generation run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightSource {
    pub position: Point,
    pub radius: f64,
    pub color: Rgba,
    pub max_distance: f64,
}

impl LightSource {
    /// Place the light on a canvas; `None` for [`LightPosition::None`] or an empty canvas.
    pub fn from_canvas(position: LightPosition, canvas: CanvasSize, color: Rgba) -> Option<Self> {
        let (fx, fy) = position.anchor()?;
        let max_distance = canvas.width.hypot(canvas.height);
        if max_distance <= 0.0 {
            return None;
        }
        Some(Self {
            position: Point::new(canvas.width * fx, canvas.height * fy),
            radius: canvas.width.min(canvas.height) * 0.05,
            color,
            max_distance,
        })
    }

    /// Unit vector from `point` toward the light; zero when they coincide.
    pub fn direction_to(&self, point: Point) -> Point {
        (self.position - point).normalized()
    }

    /// Blend a node's base color with the light and compute its halo.
    pub fn blend(&self, base: Rgba, node_pos: Point, node_radius: f64) -> LitColor {
        let distance = node_pos.distance(self.position);

        let (color, opacity) = if distance < self.max_distance {
            let opacity = (distance / self.max_distance).clamp(0.0, 1.0);
            let blend = opacity * LIGHT_INTENSITY;
            (base.lerp(self.color, blend), opacity)
        } else {
            (base, 1.0)
        };

        let intensity = (1.0 - distance / self.max_distance).max(0.0);
        let halo = Halo {
            radius: node_radius * 2.0,
            color: self.color.scale_alpha(intensity),
            offset: self.direction_to(node_pos).scale(node_radius * 0.25),
        };

        LitColor {
            color: color.scale_alpha(opacity),
            opacity,
            halo,
        }
    }
}
