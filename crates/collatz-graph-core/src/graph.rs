//! End-to-end pipeline: sequences in, positioned and styled graph out.

use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::color::Rgba;
use crate::config::LayoutConfig;
use crate::error::GraphResult;
use crate::geometry::Point;
use crate::layout::{canvas_size, position_all, CanvasSize, LayoutKind, LayoutReport};
use crate::light::LightSource;
use crate::shape::{Shape, ShapeFactory, ShapeKind};
use crate::tree::{normalize_z, SequenceTree};

/// One node as handed to a renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderNode {
    pub value: u64,
    pub depth: u32,
    pub z: i32,
    /// Z mapped onto `[0, 1]` across the whole graph.
    pub normalized_z: f64,
    pub position: Point,
    pub radius: f64,
    pub shape: Option<Shape>,
    pub spiral_center: Option<Point>,
    /// Value of the parent node; `None` only for the root.
    pub parent: Option<u64>,
}

/// A parent to child connection, by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub parent: u64,
    pub child: u64,
}

/// Summary numbers for a generated graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    pub max_depth: u32,
    pub z_range: (i32, i32),
    /// Number of nodes at each depth.
    pub depth_histogram: BTreeMap<u32, usize>,
    pub layout: LayoutReport,
    pub shapes: BTreeMap<ShapeKind, usize>,
}

/// Output of [`generate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedGraph {
    pub layout: LayoutKind,
    pub canvas: CanvasSize,
    pub background: Rgba,
    pub light: Option<LightSource>,
    pub nodes: Vec<RenderNode>,
    pub edges: Vec<Edge>,
    pub stats: GraphStats,
}

impl PositionedGraph {
    pub fn node(&self, value: u64) -> Option<&RenderNode> {
        self.nodes.iter().find(|n| n.value == value)
    }

    pub fn to_json_pretty(&self) -> GraphResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Build, lay out and style a graph from a list of sequences.
///
/// Every node gets a palette color at `node_alpha`, a shape drawn from
/// `shape_weights`, and, when a light is configured, a blended color and
/// halo. The same `rng` state and input always give the same result.
pub fn generate<R: Rng + ?Sized>(
    sequences: &[Vec<u64>],
    config: &LayoutConfig,
    rng: &mut R,
) -> GraphResult<PositionedGraph> {
    config.validate()?;
    let mut tree = SequenceTree::build(sequences)?;
    tree.check_invariants()?;

    let report = position_all(&mut tree, config, rng)?;
    let canvas = canvas_size(&tree, config);
    let light = LightSource::from_canvas(config.light_position, canvas, config.light_color);
    if let Some(light) = &light {
        debug!(
            x = light.position.x,
            y = light.position.y,
            radius = light.radius,
            "Light placed"
        );
    }

    style_nodes(&mut tree, config, light.as_ref(), rng)?;

    let graph = collect(&tree, config, canvas, light, report);
    info!(
        nodes = graph.stats.node_count,
        width = canvas.width,
        height = canvas.height,
        "Generated graph"
    );
    Ok(graph)
}

fn style_nodes<R: Rng + ?Sized>(
    tree: &mut SequenceTree,
    config: &LayoutConfig,
    light: Option<&LightSource>,
    rng: &mut R,
) -> GraphResult<()> {
    let factory = ShapeFactory::new(&config.shape_weights)?;
    let alpha = (config.node_alpha * 255.0).round() as u8;

    for node in tree.nodes_mut() {
        let Some(position) = node.position() else {
            continue;
        };
        let base = config.palette[rng.random_range(0..config.palette.len())].with_alpha(alpha);
        let mut shape = factory.create(position, node.radius, base, config.skew, rng);
        if let Some(light) = light {
            let lit = light.blend(base, position, node.radius);
            shape.color = lit.color;
            shape.border_color = lit.color.darken(0.4);
            shape.halo = Some(lit.halo);
        }
        node.shape = Some(shape);
    }
    Ok(())
}

fn collect(
    tree: &SequenceTree,
    config: &LayoutConfig,
    canvas: CanvasSize,
    light: Option<LightSource>,
    report: LayoutReport,
) -> PositionedGraph {
    let (z_min, z_max) = tree.z_range();
    let mut nodes = Vec::with_capacity(tree.len());
    let mut edges = Vec::with_capacity(tree.len().saturating_sub(1));
    let mut stats = GraphStats {
        node_count: tree.len(),
        max_depth: tree.max_depth(),
        z_range: (z_min, z_max),
        layout: report,
        ..GraphStats::default()
    };

    for id in tree.breadth_first() {
        let node = tree.get(id);
        let parent = node.parent.map(|p| tree.get(p).value);
        if let Some(parent) = parent {
            edges.push(Edge {
                parent,
                child: node.value,
            });
        }
        *stats.depth_histogram.entry(node.depth).or_default() += 1;
        if let Some(shape) = &node.shape {
            *stats.shapes.entry(shape.kind).or_default() += 1;
        }
        nodes.push(RenderNode {
            value: node.value,
            depth: node.depth,
            z: node.z,
            normalized_z: normalize_z(node.z, z_min, z_max),
            position: node.position().unwrap_or(Point::ORIGIN),
            radius: node.radius,
            shape: node.shape.clone(),
            spiral_center: node.spiral_center,
            parent,
        });
    }
    stats.edge_count = edges.len();

    PositionedGraph {
        layout: config.layout,
        canvas,
        background: config.background_color,
        light,
        nodes,
        edges,
        stats,
    }
}
