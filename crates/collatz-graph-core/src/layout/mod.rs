//! Layout strategies: assign every tree node a collision-checked position.
//!
//! All strategies share the same contract and machinery:
//!
//! ```text
//!   candidate ──▶ probes ──▶ SpatialGrid::overlaps ──▶ commit (place + insert)
//!       ▲                         │ all probes blocked
//!       │                         ▼
//!   strategy-specific      accept last probe (bounded, always terminates)
//! ```
//!
//! Only the candidate/probe generation differs per [`LayoutKind`]. Once every
//! node is placed, the whole layout is shifted so all coordinates are
//! non-negative.

mod galaxy;
mod pseudo3d;
mod radial;
mod spiral;
mod standard;

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::LayoutConfig;
use crate::error::{GraphError, GraphResult};
use crate::geometry::{Point, Point3};
use crate::grid::{GridDims, SpatialGrid};
use crate::tree::{NodeId, SequenceTree};

/// The closed set of placement strategies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutKind {
    /// Parent-above-child tree, optionally rotated by value parity.
    #[default]
    Standard,
    /// One ring per depth level.
    RadialLayers,
    /// Logarithmic spiral arms that fork on second children.
    Spiral,
    /// Radial rings tilted in 3D and projected back to the plane.
    Galaxy,
    /// Standard tree with perspective scaling across Z changes.
    Pseudo3d,
}

impl LayoutKind {
    pub const ALL: [LayoutKind; 5] = [
        LayoutKind::Standard,
        LayoutKind::RadialLayers,
        LayoutKind::Spiral,
        LayoutKind::Galaxy,
        LayoutKind::Pseudo3d,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutKind::Standard => "standard",
            LayoutKind::RadialLayers => "radial_layers",
            LayoutKind::Spiral => "spiral",
            LayoutKind::Galaxy => "galaxy",
            LayoutKind::Pseudo3d => "pseudo3d",
        }
    }
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayoutKind {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        match wanted.as_str() {
            "radial" => return Ok(LayoutKind::RadialLayers),
            "pseudo_3d" | "3d" => return Ok(LayoutKind::Pseudo3d),
            _ => {}
        }
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == wanted)
            .ok_or_else(|| GraphError::UnknownLayout { name: s.to_string() })
    }
}

/// Rendering surface size derived from the laid-out graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

/// Overlap bookkeeping for one layout pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutReport {
    /// Nodes placed, root included.
    pub placed: usize,
    /// First candidate was free.
    pub clear: usize,
    /// A later probe was free.
    pub resolved: usize,
    /// Kept while overlapping a placed node: every probe was blocked, or
    /// the pick collides with a node the probe scan does not reach.
    pub tolerated: usize,
    /// Overlap accepted by the overlap-allowance roll.
    pub allowed: usize,
}

/// Grid, overlap policy and counters shared by every strategy.
///
/// Overlap is always judged on the 2D position handed to the renderer,
/// whatever space a strategy computes candidates in.
pub(crate) struct Placement {
    grid: SpatialGrid,
    allow_probability: f64,
    report: LayoutReport,
}

impl Placement {
    pub fn new(config: &LayoutConfig, allow_probability: f64) -> GraphResult<Self> {
        Ok(Self {
            grid: SpatialGrid::new(config.min_distance(), GridDims::Two)?,
            allow_probability,
            report: LayoutReport::default(),
        })
    }

    /// Pick among `probes` (non-empty, tried in order).
    ///
    /// The first probe wins if it is free or if the overlap-allowance roll
    /// accepts it; otherwise the first free later probe wins; if none is
    /// free the last probe is kept. A pick that still touches a placed node
    /// in a diagonal cell is counted as tolerated.
    pub fn resolve<R: Rng + ?Sized>(
        &mut self,
        probes: &[Point],
        min_distance: f64,
        rng: &mut R,
    ) -> Point {
        let first = probes[0];
        if !self.grid.overlaps_2d(first, min_distance) {
            return self.settle(first, min_distance, Settled::Clear);
        }
        if self.allow_probability > 0.0 && rng.random_bool(self.allow_probability) {
            self.report.allowed += 1;
            return first;
        }
        if let Some(free) = probes[1..]
            .iter()
            .find(|p| !self.grid.overlaps_2d(**p, min_distance))
        {
            return self.settle(*free, min_distance, Settled::Resolved);
        }
        let last = probes[probes.len() - 1];
        self.settle(last, min_distance, Settled::Blocked)
    }

    fn settle(&mut self, at: Point, min_distance: f64, outcome: Settled) -> Point {
        let missed = matches!(outcome, Settled::Clear | Settled::Resolved)
            && self.grid.touches(Point3::flat(at), min_distance);
        let outcome = if missed { Settled::Blocked } else { outcome };
        match outcome {
            Settled::Clear => self.report.clear += 1,
            Settled::Resolved => self.report.resolved += 1,
            Settled::Blocked => {
                self.report.tolerated += 1;
                debug!(x = at.x, y = at.y, "Keeping overlapping position");
            }
        }
        at
    }

    /// Place a node and record it in the grid.
    pub fn commit(&mut self, tree: &mut SequenceTree, id: NodeId, at: Point) {
        if tree.get_mut(id).place(at) {
            self.grid.insert_2d(at);
            self.report.placed += 1;
        }
    }

    pub fn finish(self) -> LayoutReport {
        debug!(
            cells = self.grid.cell_count(),
            entries = self.grid.len(),
            "Layout grid filled"
        );
        self.report
    }
}

#[derive(Debug, Clone, Copy)]
enum Settled {
    Clear,
    Resolved,
    Blocked,
}

/// Position every node of `tree` using the configured strategy.
///
/// Assigns Z, runs the strategy, then shifts the layout into positive
/// coordinates. The tree must not have been laid out before.
pub fn position_all<R: Rng + ?Sized>(
    tree: &mut SequenceTree,
    config: &LayoutConfig,
    rng: &mut R,
) -> GraphResult<LayoutReport> {
    config.validate()?;
    if tree.iter().any(|(_, n)| n.is_positioned()) {
        return Err(GraphError::InvariantViolation {
            message: "tree has already been laid out".into(),
        });
    }

    tree.assign_z();
    for node in tree.nodes_mut() {
        node.radius = config.node_radius;
    }

    let report = match config.layout {
        LayoutKind::Standard => standard::place(tree, config, rng)?,
        LayoutKind::RadialLayers => radial::place(tree, config, rng)?,
        LayoutKind::Spiral => spiral::place(tree, config, rng)?,
        LayoutKind::Galaxy => galaxy::place(tree, config, rng)?,
        LayoutKind::Pseudo3d => pseudo3d::place(tree, config, rng)?,
    };

    if let Some((_, node)) = tree.iter().find(|(_, n)| !n.is_positioned()) {
        return Err(GraphError::InvariantViolation {
            message: format!("node {} was not positioned", node.value),
        });
    }

    translate_to_positive(tree, config);

    info!(
        layout = %config.layout,
        nodes = report.placed,
        resolved = report.resolved,
        tolerated = report.tolerated,
        allowed = report.allowed,
        "Positioned graph"
    );
    Ok(report)
}

/// Shift every node by `-min + spacer + radius` per axis.
pub fn translate_to_positive(tree: &mut SequenceTree, config: &LayoutConfig) {
    let positions: Vec<Point> = tree.iter().filter_map(|(_, n)| n.position()).collect();
    if positions.is_empty() {
        return;
    }
    let min_x = positions.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
    let min_y = positions.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
    let dx = -min_x + config.spacer_x + config.node_radius;
    let dy = -min_y + config.spacer_y + config.node_radius;
    for node in tree.nodes_mut() {
        node.translate(dx, dy);
    }
}

/// `(max x + spacer x + max radius, max y + spacer y + max radius)`.
pub fn canvas_size(tree: &SequenceTree, config: &LayoutConfig) -> CanvasSize {
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    let mut max_radius = 0.0f64;
    for (_, node) in tree.iter() {
        if let Some(p) = node.position() {
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
            max_radius = max_radius.max(node.radius);
        }
    }
    if !max_x.is_finite() {
        return CanvasSize::default();
    }
    CanvasSize {
        width: max_x + config.spacer_x + max_radius,
        height: max_y + config.spacer_y + max_radius,
    }
}
