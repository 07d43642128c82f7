//! Uniform-bucket spatial hash for "is anything too close" queries.
//!
//! The cell size equals the minimum separation, so a conflicting neighbour
//! can only live in the candidate's own cell or an adjacent one. Only the
//! axis-adjacent cells are scanned (4 in 2D, 18 face and edge cells in 3D),
//! which keeps each query O(1) at the cost of missing some diagonal
//! conflicts near cell corners. [`SpatialGrid::touches`] scans the full
//! neighbourhood for callers that need an exact answer.

use std::collections::HashMap;

use crate::error::{GraphError, GraphResult};
use crate::geometry::{Point, Point3};

/// Number of axes the grid hashes on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridDims {
    Two,
    Three,
}

/// Integer cell coordinates; Z is always 0 in 2D grids.
pub type Cell = [i64; 3];

const OFFSETS_2D: [Cell; 5] = [[0, 0, 0], [1, 0, 0], [-1, 0, 0], [0, 1, 0], [0, -1, 0]];

/// Centre, 6 faces, 12 edges.
const OFFSETS_3D: [Cell; 19] = [
    [0, 0, 0],
    [1, 0, 0],
    [-1, 0, 0],
    [0, 1, 0],
    [0, -1, 0],
    [0, 0, 1],
    [0, 0, -1],
    [1, 1, 0],
    [1, -1, 0],
    [-1, 1, 0],
    [-1, -1, 0],
    [1, 0, 1],
    [1, 0, -1],
    [-1, 0, 1],
    [-1, 0, -1],
    [0, 1, 1],
    [0, 1, -1],
    [0, -1, 1],
    [0, -1, -1],
];

/// Append-only spatial hash of placed node centres.
#[derive(Debug, Clone)]
pub struct SpatialGrid {
    cell_size: f64,
    dims: GridDims,
    cells: HashMap<Cell, Vec<Point3>>,
    len: usize,
}

impl SpatialGrid {
    /// Create an empty grid. `cell_size` should equal the minimum allowed separation.
    pub fn new(cell_size: f64, dims: GridDims) -> GraphResult<Self> {
        if !(cell_size.is_finite() && cell_size > 0.0) {
            return Err(GraphError::InvalidCellSize { value: cell_size });
        }
        Ok(Self {
            cell_size,
            dims,
            cells: HashMap::new(),
            len: 0,
        })
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    pub fn dims(&self) -> GridDims {
        self.dims
    }

    /// Cell containing `p`. The Z axis is ignored for 2D grids.
    pub fn cell_of(&self, p: Point3) -> Cell {
        let axis = |v: f64| (v / self.cell_size).floor() as i64;
        match self.dims {
            GridDims::Two => [axis(p.x), axis(p.y), 0],
            GridDims::Three => [axis(p.x), axis(p.y), axis(p.z)],
        }
    }

    fn flatten(&self, p: Point3) -> Point3 {
        match self.dims {
            GridDims::Two => Point3::new(p.x, p.y, 0.0),
            GridDims::Three => p,
        }
    }

    /// Whether any stored position in the scanned cells lies strictly
    /// within `min_distance` of `candidate`.
    pub fn overlaps(&self, candidate: Point3, min_distance: f64) -> bool {
        let candidate = self.flatten(candidate);
        let [cx, cy, cz] = self.cell_of(candidate);
        let offsets: &[Cell] = match self.dims {
            GridDims::Two => &OFFSETS_2D,
            GridDims::Three => &OFFSETS_3D,
        };
        offsets.iter().any(|[dx, dy, dz]| {
            self.cells
                .get(&[cx + dx, cy + dy, cz + dz])
                .is_some_and(|bucket| {
                    bucket
                        .iter()
                        .any(|stored| stored.distance(candidate) < min_distance)
                })
        })
    }

    /// Like [`Self::overlaps`], but scans every adjacent cell (8 in 2D, 26
    /// in 3D). Exact whenever `min_distance <= cell_size`.
    pub fn touches(&self, candidate: Point3, min_distance: f64) -> bool {
        let candidate = self.flatten(candidate);
        let [cx, cy, cz] = self.cell_of(candidate);
        let depth = match self.dims {
            GridDims::Two => 0..=0,
            GridDims::Three => -1..=1,
        };
        (-1..=1).any(|dx| {
            (-1..=1).any(|dy| {
                depth.clone().any(|dz| {
                    self.cells
                        .get(&[cx + dx, cy + dy, cz + dz])
                        .is_some_and(|bucket| {
                            bucket
                                .iter()
                                .any(|stored| stored.distance(candidate) < min_distance)
                        })
                })
            })
        })
    }

    /// 2D convenience wrapper for [`Self::overlaps`].
    pub fn overlaps_2d(&self, candidate: Point, min_distance: f64) -> bool {
        self.overlaps(Point3::flat(candidate), min_distance)
    }

    /// Record a placed position.
    pub fn insert(&mut self, p: Point3) {
        let p = self.flatten(p);
        let cell = self.cell_of(p);
        self.cells.entry(cell).or_default().push(p);
        self.len += 1;
    }

    pub fn insert_2d(&mut self, p: Point) {
        self.insert(Point3::flat(p));
    }

    /// Number of stored positions.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of non-empty cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }
}
