//! Layout parameters consumed at the start of a layout pass.
//!
//! All fields have serde defaults, so a settings file only needs to name
//! the values it changes.

use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::error::{GraphError, GraphResult};
use crate::layout::LayoutKind;
use crate::light::LightPosition;
use crate::shape::{default_shape_weights, ShapeWeight};

/// Largest accepted per-node radius multiplier along a spiral arm.
pub const MAX_SPIRAL_GROWTH: f64 = 2.0;

/// Read-only configuration for one graph generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Which placement strategy to run.
    pub layout: LayoutKind,
    /// Radius of a node before any depth scaling.
    pub node_radius: f64,
    /// Horizontal step used for overlap probing and canvas margins.
    pub spacer_x: f64,
    /// Distance between a parent and its child in tree layouts.
    pub spacer_y: f64,
    /// Parity-dependent rotation applied to each candidate (degrees, 0 disables).
    pub rotation_angle: f64,
    /// Radius of the first ring in radial layouts.
    pub base_radius: f64,
    /// Extra radius per depth level in radial layouts.
    pub layer_spacing: f64,
    /// Angular jitter as a fraction of the per-node angular step.
    pub jitter: f64,
    /// Angle advanced per node along a spiral arm (degrees).
    pub spiral_angle: f64,
    /// Radius multiplier per node along a spiral arm.
    pub spiral_growth: f64,
    /// Offset of a fresh spiral, as a multiple of the current arm radius.
    pub branch_offset: f64,
    /// Galaxy tilt around the X axis (degrees).
    pub tilt_x: f64,
    /// Galaxy tilt around the Y axis (degrees).
    pub tilt_y: f64,
    /// Additional tilt per depth level (degrees).
    pub tilt_step: f64,
    /// Perspective viewer distance; must be positive.
    pub viewer_distance: f64,
    /// Sibling separation applied by the perspective projector.
    pub perspective_offset: f64,
    /// Probability of accepting an overlapping candidate as-is (pseudo-3D).
    pub overlap_probability: f64,
    pub light_position: LightPosition,
    pub light_color: Rgba,
    pub background_color: Rgba,
    /// Base node colors, drawn uniformly.
    pub palette: Vec<Rgba>,
    /// Base alpha for node fills, 0..=1.
    pub node_alpha: f64,
    pub shape_weights: Vec<ShapeWeight>,
    /// Apply a random skew to every shape.
    pub skew: bool,
    /// Seed for the random generator; `None` means seeded from the OS.
    pub seed: Option<u64>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            layout: LayoutKind::Standard,
            node_radius: 10.0,
            spacer_x: 30.0,
            spacer_y: 30.0,
            rotation_angle: 0.0,
            base_radius: 60.0,
            layer_spacing: 30.0,
            jitter: 0.1,
            spiral_angle: 25.0,
            spiral_growth: 1.05,
            branch_offset: 0.5,
            tilt_x: 60.0,
            tilt_y: 15.0,
            tilt_step: 0.5,
            viewer_distance: 2.0,
            perspective_offset: 10.0,
            overlap_probability: 0.25,
            light_position: LightPosition::TopLeft,
            light_color: Rgba::rgb(255, 244, 214),
            background_color: Rgba::rgb(12, 12, 20),
            palette: default_palette(),
            node_alpha: 0.9,
            shape_weights: default_shape_weights(),
            skew: false,
            seed: None,
        }
    }
}

fn default_palette() -> Vec<Rgba> {
    vec![
        Rgba::rgb(0x26, 0x46, 0x53),
        Rgba::rgb(0x2a, 0x9d, 0x8f),
        Rgba::rgb(0xe9, 0xc4, 0x6a),
        Rgba::rgb(0xf4, 0xa2, 0x61),
        Rgba::rgb(0xe7, 0x6f, 0x51),
    ]
}

impl LayoutConfig {
    /// Config for a given strategy with every other field at its default.
    pub fn for_layout(layout: LayoutKind) -> Self {
        Self {
            layout,
            ..Self::default()
        }
    }

    /// Minimum separation between node centres before depth scaling.
    pub fn min_distance(&self) -> f64 {
        self.node_radius * 2.0
    }

    /// Check every parameter; fails on the first out-of-range field.
    pub fn validate(&self) -> GraphResult<()> {
        positive("node_radius", self.node_radius)?;
        positive("spacer_x", self.spacer_x)?;
        positive("spacer_y", self.spacer_y)?;
        non_negative("base_radius", self.base_radius)?;
        positive("layer_spacing", self.layer_spacing)?;
        non_negative("jitter", self.jitter)?;
        positive("spiral_growth", self.spiral_growth)?;
        if self.spiral_growth > MAX_SPIRAL_GROWTH {
            return Err(invalid(
                "spiral_growth",
                format!("must be <= {MAX_SPIRAL_GROWTH}, got {}", self.spiral_growth),
            ));
        }
        non_negative("branch_offset", self.branch_offset)?;
        non_negative("perspective_offset", self.perspective_offset)?;
        for (field, v) in [
            ("rotation_angle", self.rotation_angle),
            ("spiral_angle", self.spiral_angle),
            ("tilt_x", self.tilt_x),
            ("tilt_y", self.tilt_y),
            ("tilt_step", self.tilt_step),
        ] {
            if !v.is_finite() {
                return Err(invalid(field, format!("must be finite, got {v}")));
            }
        }
        if !(self.viewer_distance.is_finite() && self.viewer_distance > 0.0) {
            return Err(GraphError::InvalidViewerDistance {
                value: self.viewer_distance,
            });
        }
        unit_interval("overlap_probability", self.overlap_probability)?;
        unit_interval("node_alpha", self.node_alpha)?;
        if self.palette.is_empty() {
            return Err(invalid("palette", "must contain at least one color".into()));
        }
        if self.shape_weights.iter().all(|w| w.weight == 0) {
            return Err(GraphError::InvalidWeights {
                message: "shape_weights must give at least one shape a positive weight".into(),
            });
        }
        Ok(())
    }
}

fn invalid(field: &'static str, message: String) -> GraphError {
    GraphError::InvalidConfig { field, message }
}

fn positive(field: &'static str, v: f64) -> GraphResult<()> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("must be > 0, got {v}")))
    }
}

fn non_negative(field: &'static str, v: f64) -> GraphResult<()> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("must be >= 0, got {v}")))
    }
}

fn unit_interval(field: &'static str, v: f64) -> GraphResult<()> {
    if (0.0..=1.0).contains(&v) {
        Ok(())
    } else {
        Err(invalid(field, format!("must be within [0, 1], got {v}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        LayoutConfig::default().validate().unwrap();
    }

    #[test]
    fn test_rejects_zero_viewer_distance() {
        let config = LayoutConfig {
            viewer_distance: 0.0,
            ..LayoutConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(GraphError::InvalidViewerDistance { .. })
        ));
    }

    #[test]
    fn test_rejects_bad_probability_and_radius() {
        let config = LayoutConfig {
            overlap_probability: 1.5,
            ..LayoutConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(GraphError::InvalidConfig { field: "overlap_probability", .. })
        ));
        let config = LayoutConfig {
            node_radius: -1.0,
            ..LayoutConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(GraphError::InvalidConfig { field: "node_radius", .. })
        ));
    }

    #[test]
    fn test_rejects_runaway_spiral_growth() {
        let config = LayoutConfig {
            spiral_growth: 50.0,
            ..LayoutConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(GraphError::InvalidConfig { field: "spiral_growth", .. })
        ));
        let config = LayoutConfig {
            spiral_growth: MAX_SPIRAL_GROWTH,
            ..LayoutConfig::default()
        };
        config.validate().unwrap();
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: LayoutConfig =
            serde_json::from_str(r##"{"layout": "spiral", "node_radius": 4.0, "light_color": "#ffffff"}"##)
                .unwrap();
        assert_eq!(config.layout, LayoutKind::Spiral);
        assert_eq!(config.node_radius, 4.0);
        assert_eq!(config.light_color, Rgba::WHITE);
        assert_eq!(config.spacer_y, LayoutConfig::default().spacer_y);
    }

    #[test]
    fn test_unknown_layout_in_json_fails() {
        let result = serde_json::from_str::<LayoutConfig>(r#"{"layout": "hexagonal"}"#);
        assert!(result.is_err());
    }
}
