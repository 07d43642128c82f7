//! Layout core for Collatz generative art.
//!
//! Turns a set of 3x+1 trajectories into a single tree rooted at 1, places
//! every node without collisions under one of several layout strategies,
//! and styles each node with a procedural shape and a simulated light.
//!
//! ```text
//!   sequences ──▶ SequenceTree ──▶ assign_z ──▶ position_all ──▶ shapes ──▶ light
//!                  (merge)          (sides)     (grid + probes)  (weighted)  (blend)
//! ```
//!
//! The usual entry point is [`generate`]:
//!
//! ```no_run
//! use collatz_graph_core::{collatz_range, generate, LayoutConfig, LayoutKind, DEFAULT_MAX_STEPS};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let sequences = collatz_range(1..=50, DEFAULT_MAX_STEPS)?;
//! let config = LayoutConfig::for_layout(LayoutKind::Spiral);
//! let mut rng = StdRng::seed_from_u64(7);
//! let graph = generate(&sequences, &config, &mut rng)?;
//! println!("{}", graph.to_json_pretty()?);
//! # Ok::<(), collatz_graph_core::GraphError>(())
//! ```

pub mod color;
pub mod config;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod grid;
pub mod layout;
pub mod light;
pub mod projection;
pub mod sequence;
pub mod shape;
pub mod tree;

pub use color::Rgba;
pub use config::LayoutConfig;
pub use error::{GraphError, GraphResult};
pub use geometry::{Point, Point3, Rect};
pub use graph::{generate, Edge, GraphStats, PositionedGraph, RenderNode};
pub use grid::{GridDims, SpatialGrid};
pub use layout::{canvas_size, position_all, translate_to_positive, CanvasSize, LayoutKind, LayoutReport};
pub use light::{Halo, LightPosition, LightSource, LitColor};
pub use projection::{PerspectiveProjector, Projection};
pub use sequence::{collatz_range, collatz_sequence, validate_sequences, DEFAULT_MAX_STEPS};
pub use shape::{Geometry, PolygonVariant, Shape, ShapeFactory, ShapeKind, ShapeWeight, WeightedSelector};
pub use tree::{BranchSide, Node, NodeId, SequenceTree};
