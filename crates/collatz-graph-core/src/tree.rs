//! Sequence tree: merges trajectories into one tree rooted at 1.
//!
//! Nodes live in a flat arena. `children` holds owned indices and `parent`
//! is a non-owning back-reference, so the structure has no reference cycles.
//!
//! ```text
//!   [8, 4, 2, 1]          1            depth 0
//!   [5, 16, 8, 4, 2, 1]   └─ 2         depth 1
//!   [3, 10, 5, 16, ...]      └─ 4      depth 2
//!                               └─ 8   depth 3
//!                                  └─ 16 ...
//! ```

use std::collections::{HashMap, VecDeque};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{GraphError, GraphResult};
use crate::geometry::Point;
use crate::sequence::validate_sequences;
use crate::shape::Shape;

/// Index of a node within a [`SequenceTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub usize);

/// Which side of a two-way branch a node sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchSide {
    /// The flagged child: Z decreases.
    First,
    /// Its sibling: Z increases.
    Second,
}

/// One distinct integer value and its place in the tree.
#[derive(Debug, Clone)]
pub struct Node {
    /// The integer this node represents. Unique within the tree.
    pub value: u64,
    /// Minimum distance from the root across all sequences reaching this node.
    pub depth: u32,
    /// Branch-side depth for pseudo-3D layouts.
    pub z: i32,
    /// Whether this is the flagged child of its parent.
    pub is_first_child: bool,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// Render radius; layouts may scale it by depth.
    pub radius: f64,
    pub shape: Option<Shape>,
    /// Curvature anchor for connection rendering (spiral and galaxy layouts).
    pub spiral_center: Option<Point>,
    position: Option<Point>,
}

impl Node {
    fn new(value: u64, depth: u32) -> Self {
        Self {
            value,
            depth,
            z: 0,
            is_first_child: false,
            parent: None,
            children: Vec::new(),
            radius: 0.0,
            shape: None,
            spiral_center: None,
            position: None,
        }
    }

    /// Position, if the node has been placed.
    pub fn position(&self) -> Option<Point> {
        self.position
    }

    pub fn is_positioned(&self) -> bool {
        self.position.is_some()
    }

    /// Place the node. Placement happens once; later calls are ignored and return false.
    pub fn place(&mut self, position: Point) -> bool {
        if self.position.is_some() {
            return false;
        }
        self.position = Some(position);
        true
    }

    /// Shift an already placed node. No-op for unplaced nodes.
    pub(crate) fn translate(&mut self, dx: f64, dy: f64) {
        if let Some(p) = self.position.as_mut() {
            *p = p.offset(dx, dy);
        }
        if let Some(c) = self.spiral_center.as_mut() {
            *c = c.offset(dx, dy);
        }
    }
}

/// Tree of all distinct values across a set of sequences.
#[derive(Debug, Clone)]
pub struct SequenceTree {
    nodes: Vec<Node>,
    index: HashMap<u64, NodeId>,
    root: NodeId,
}

impl SequenceTree {
    /// Merge sequences into a single tree keyed by value.
    ///
    /// Each sequence is walked front to back; every element becomes the
    /// parent of the element before it. Shared suffixes collapse onto the
    /// same nodes.
    pub fn build(sequences: &[Vec<u64>]) -> GraphResult<Self> {
        validate_sequences(sequences)?;

        let mut tree = Self {
            nodes: Vec::new(),
            index: HashMap::new(),
            root: NodeId(0),
        };

        for sequence in sequences {
            let len = sequence.len();
            let mut previous: Option<NodeId> = None;
            for (i, &value) in sequence.iter().enumerate() {
                let current = tree.upsert(value, (len - i - 1) as u32);
                if let Some(child) = previous {
                    tree.link(child, current);
                }
                previous = Some(current);
            }
        }

        tree.root = tree.find(1).ok_or_else(|| GraphError::InvariantViolation {
            message: "no root node with value 1".into(),
        })?;

        debug!(
            sequences = sequences.len(),
            nodes = tree.nodes.len(),
            max_depth = tree.max_depth(),
            "Built sequence tree"
        );
        Ok(tree)
    }

    fn upsert(&mut self, value: u64, depth: u32) -> NodeId {
        if let Some(&id) = self.index.get(&value) {
            let node = &mut self.nodes[id.0];
            node.depth = node.depth.min(depth);
            return id;
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(value, depth));
        self.index.insert(value, id);
        id
    }

    fn link(&mut self, child: NodeId, parent: NodeId) {
        if let Some(existing) = self.nodes[child.0].parent {
            if existing != parent {
                debug!(
                    child = self.nodes[child.0].value,
                    kept = self.nodes[existing.0].value,
                    ignored = self.nodes[parent.0].value,
                    "Ignoring second parent link"
                );
            }
            return;
        }
        if self.nodes[parent.0].children.contains(&child) {
            return;
        }

        self.nodes[child.0].parent = Some(parent);
        let children = &mut self.nodes[parent.0].children;
        children.push(child);
        match children.len() {
            1 => self.nodes[child.0].is_first_child = true,
            2 => {
                let first = children[0];
                self.nodes[first.0].is_first_child = false;
                self.nodes[child.0].is_first_child = true;
            }
            _ => {}
        }
    }

    /// The node for value 1.
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// Look up a node by its value.
    pub fn find(&self, value: u64) -> Option<NodeId> {
        self.index.get(&value).copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    pub(crate) fn nodes_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.nodes.iter_mut()
    }

    pub fn max_depth(&self) -> u32 {
        self.nodes.iter().map(|n| n.depth).max().unwrap_or(0)
    }

    /// Depth-first pre-order from the root, children in insertion order.
    pub fn preorder(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.nodes[id.0].children.iter().rev());
        }
        order
    }

    /// Breadth-first order from the root.
    pub fn breadth_first(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut queue = VecDeque::from([self.root]);
        while let Some(id) = queue.pop_front() {
            order.push(id);
            queue.extend(self.nodes[id.0].children.iter().copied());
        }
        order
    }

    /// Nodes grouped by depth, each level in breadth-first order.
    pub fn levels(&self) -> Vec<Vec<NodeId>> {
        let mut levels = vec![Vec::new(); self.max_depth() as usize + 1];
        for id in self.breadth_first() {
            levels[self.nodes[id.0].depth as usize].push(id);
        }
        levels
    }

    /// Branch side of a node, if its parent has two or more children and
    /// the node is one of the first two.
    pub fn side(&self, id: NodeId) -> Option<BranchSide> {
        let node = &self.nodes[id.0];
        let parent = &self.nodes[node.parent?.0];
        if parent.children.len() < 2 || !parent.children[..2].contains(&id) {
            return None;
        }
        Some(if node.is_first_child {
            BranchSide::First
        } else {
            BranchSide::Second
        })
    }

    /// Top-down Z assignment: root is 0; the flagged child of a two-way
    /// branch gets `parent - 1`, its sibling `parent + 1`, and any other
    /// child inherits the parent's Z.
    pub fn assign_z(&mut self) {
        let root = self.root;
        self.nodes[root.0].z = 0;
        for id in self.breadth_first() {
            let parent_z = self.nodes[id.0].z;
            let children = self.nodes[id.0].children.clone();
            for child in children {
                let z = match self.side(child) {
                    Some(BranchSide::First) => parent_z - 1,
                    Some(BranchSide::Second) => parent_z + 1,
                    None => parent_z,
                };
                self.nodes[child.0].z = z;
            }
        }
    }

    /// Minimum and maximum Z across the tree.
    pub fn z_range(&self) -> (i32, i32) {
        let min = self.nodes.iter().map(|n| n.z).min().unwrap_or(0);
        let max = self.nodes.iter().map(|n| n.z).max().unwrap_or(0);
        (min, max)
    }

    /// Z mapped onto `[0, 1]`; 0.5 when every node shares one Z.
    pub fn normalized_z(&self, id: NodeId) -> f64 {
        let (min, max) = self.z_range();
        normalize_z(self.nodes[id.0].z, min, max)
    }

    /// Verify the tree shape. A failure here is a bug in the builder.
    pub fn check_invariants(&self) -> GraphResult<()> {
        let violation = |message: String| Err(GraphError::InvariantViolation { message });

        if self.index.len() != self.nodes.len() {
            return violation(format!(
                "{} nodes but {} distinct values",
                self.nodes.len(),
                self.index.len()
            ));
        }
        let root = &self.nodes[self.root.0];
        if root.value != 1 || root.parent.is_some() {
            return violation("root must be value 1 without a parent".into());
        }
        for (id, node) in self.iter() {
            if id == self.root {
                continue;
            }
            let Some(parent) = node.parent else {
                return violation(format!("node {} has no parent", node.value));
            };
            if !self.nodes[parent.0].children.contains(&id) {
                return violation(format!(
                    "node {} missing from children of {}",
                    node.value, self.nodes[parent.0].value
                ));
            }
            let flagged = self.nodes[parent.0]
                .children
                .iter()
                .filter(|c| self.nodes[c.0].is_first_child)
                .count();
            if flagged > 1 {
                return violation(format!(
                    "node {} has {flagged} first children",
                    self.nodes[parent.0].value
                ));
            }
        }
        let reachable = self.breadth_first().len();
        if reachable != self.nodes.len() {
            return violation(format!(
                "{reachable} of {} nodes reachable from root",
                self.nodes.len()
            ));
        }
        Ok(())
    }
}

/// `(z - min) / (max - min)`, with the degenerate range mapped to 0.5.
pub fn normalize_z(z: i32, min: i32, max: i32) -> f64 {
    if max == min {
        0.5
    } else {
        (z - min) as f64 / (max - min) as f64
    }
}
