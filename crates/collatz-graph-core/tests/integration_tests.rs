//! Integration tests for collatz-graph-core, driving the public pipeline end to end.

use collatz_graph_core::{
    collatz_range, generate, position_all, GraphError, LayoutConfig, LayoutKind, LightPosition,
    Point, PositionedGraph, SequenceTree, ShapeKind, ShapeWeight, DEFAULT_MAX_STEPS,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

// ============================================================================
// Fixtures
// ============================================================================

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// `[[1], [2, 1], [4, 2, 1], ...]`: powers of two, each extending the last.
fn power_chain(len: u32) -> Vec<Vec<u64>> {
    (0..len)
        .map(|top| (0..=top).rev().map(|e| 1u64 << e).collect())
        .collect()
}

fn range(limit: u64) -> Vec<Vec<u64>> {
    collatz_range(1..=limit, DEFAULT_MAX_STEPS).unwrap()
}

fn run(sequences: &[Vec<u64>], config: &LayoutConfig, seed: u64) -> PositionedGraph {
    init_tracing();
    let mut rng = StdRng::seed_from_u64(seed);
    generate(sequences, config, &mut rng).unwrap()
}

fn min_pair_distance(graph: &PositionedGraph) -> f64 {
    let mut min = f64::INFINITY;
    for (i, a) in graph.nodes.iter().enumerate() {
        for b in &graph.nodes[i + 1..] {
            min = min.min(a.position.distance(b.position));
        }
    }
    min
}

/// Greedy set of node-disjoint overlapping pairs. Every overlapping pair
/// has at least one tolerated endpoint, so this is a lower bound on the
/// tolerated count.
fn disjoint_overlaps(graph: &PositionedGraph) -> usize {
    let mut used = vec![false; graph.nodes.len()];
    let mut count = 0;
    for (i, a) in graph.nodes.iter().enumerate() {
        for (j, b) in graph.nodes.iter().enumerate().skip(i + 1) {
            if used[i] || used[j] {
                continue;
            }
            if a.position.distance(b.position) + 1e-9 < a.radius + b.radius {
                used[i] = true;
                used[j] = true;
                count += 1;
            }
        }
    }
    count
}

// ============================================================================
// Tree merge
// ============================================================================

#[test]
fn test_tree_has_one_node_per_distinct_value() {
    let sequences = range(30);
    let tree = SequenceTree::build(&sequences).unwrap();
    let mut distinct: Vec<u64> = sequences.iter().flatten().copied().collect();
    distinct.sort_unstable();
    distinct.dedup();
    assert_eq!(tree.len(), distinct.len());
    tree.check_invariants().unwrap();

    // Depth is the shortest distance to 1 over every sequence that contains the value.
    for value in distinct {
        let shortest = sequences
            .iter()
            .filter_map(|s| s.iter().position(|&v| v == value).map(|i| s.len() - i - 1))
            .min()
            .unwrap();
        let node = tree.get(tree.find(value).unwrap());
        assert_eq!(node.depth as usize, shortest, "value {value}");
    }
}

#[test]
fn test_z_follows_branch_sides() {
    let mut tree = SequenceTree::build(&range(40)).unwrap();
    tree.assign_z();
    assert_eq!(tree.get(tree.root()).z, 0);
    for (_, node) in tree.iter() {
        let Some(parent) = node.parent else {
            continue;
        };
        let parent = tree.get(parent);
        let position = parent.children.iter().position(|c| tree.get(*c).value == node.value);
        let expected = match (parent.children.len(), position) {
            (n, Some(i)) if n >= 2 && i < 2 => {
                if node.is_first_child {
                    parent.z - 1
                } else {
                    parent.z + 1
                }
            }
            _ => parent.z,
        };
        assert_eq!(node.z, expected, "value {}", node.value);
    }
}

#[test]
fn test_bad_input_is_rejected() {
    let config = LayoutConfig::default();
    let mut rng = StdRng::seed_from_u64(0);
    assert!(matches!(
        generate(&[], &config, &mut rng),
        Err(GraphError::NoSequences)
    ));
    assert!(matches!(
        generate(&[vec![4, 2]], &config, &mut rng),
        Err(GraphError::InvalidSequence { .. })
    ));
    assert!(matches!(
        generate(&[vec![1], vec![]], &config, &mut rng),
        Err(GraphError::EmptySequence { index: 1 })
    ));
}

// ============================================================================
// Layout
// ============================================================================

#[test]
fn test_power_chain_is_one_vertical_line() {
    let config = LayoutConfig::default();
    let graph = run(&power_chain(5), &config, 0);
    assert_eq!(graph.nodes.len(), 5);
    assert_eq!(graph.stats.layout.resolved, 0);
    assert_eq!(graph.stats.layout.tolerated, 0);

    let x = config.spacer_x + config.node_radius;
    let top = config.spacer_y + config.node_radius;
    for node in &graph.nodes {
        assert_eq!(node.position.x, x);
        // The deepest node ends up at the top after translation.
        let expected_y = top + (4 - node.depth) as f64 * config.spacer_y;
        assert!((node.position.y - expected_y).abs() < 1e-9, "{}", node.value);
    }
}

#[test]
fn test_sparse_layouts_keep_min_distance() {
    let standard = LayoutConfig::default();
    let graph = run(&range(15), &standard, 3);
    assert!(min_pair_distance(&graph) >= standard.min_distance());

    let radial = LayoutConfig::for_layout(LayoutKind::RadialLayers);
    let graph = run(&range(12), &radial, 3);
    assert!(min_pair_distance(&graph) >= radial.min_distance());
}

#[test]
fn test_projected_layouts_report_screen_overlaps() {
    let galaxy = LayoutConfig::for_layout(LayoutKind::Galaxy);
    let pseudo3d = LayoutConfig {
        overlap_probability: 0.0,
        ..LayoutConfig::for_layout(LayoutKind::Pseudo3d)
    };
    for config in [galaxy, pseudo3d] {
        for limit in [30, 100] {
            let graph = run(&range(limit), &config, 1);
            let report = graph.stats.layout;
            assert_eq!(report.allowed, 0);
            assert!(
                disjoint_overlaps(&graph) <= report.tolerated,
                "{} 1..={limit}: {report:?}",
                config.layout
            );
        }
    }
}

#[test]
fn test_every_layout_lands_in_positive_space() {
    for kind in LayoutKind::ALL {
        let config = LayoutConfig::for_layout(kind);
        let graph = run(&range(35), &config, 12);
        for node in &graph.nodes {
            let p = node.position;
            assert!(p.x >= 0.0 && p.y >= 0.0, "{kind}: {} at {p:?}", node.value);
            assert!(p.x + node.radius <= graph.canvas.width, "{kind}");
            assert!(p.y + node.radius <= graph.canvas.height, "{kind}");
        }
        let centered = matches!(kind, LayoutKind::Spiral | LayoutKind::Galaxy);
        assert_eq!(
            graph.nodes.iter().all(|n| n.spiral_center.is_some()),
            centered,
            "{kind}"
        );
    }
}

#[test]
fn test_layout_is_refused_twice() {
    let mut tree = SequenceTree::build(&range(4)).unwrap();
    let config = LayoutConfig::default();
    let mut rng = StdRng::seed_from_u64(0);
    position_all(&mut tree, &config, &mut rng).unwrap();
    assert!(matches!(
        position_all(&mut tree, &config, &mut rng),
        Err(GraphError::InvariantViolation { .. })
    ));
}

// ============================================================================
// Styling and output
// ============================================================================

#[test]
fn test_same_seed_same_graph() {
    for kind in LayoutKind::ALL {
        let config = LayoutConfig {
            skew: true,
            ..LayoutConfig::for_layout(kind)
        };
        let a = run(&range(25), &config, 99).to_json_pretty().unwrap();
        let b = run(&range(25), &config, 99).to_json_pretty().unwrap();
        assert_eq!(a, b, "{kind}");
    }
}

#[test]
fn test_shape_weights_restrict_kinds() {
    let config = LayoutConfig {
        shape_weights: vec![
            ShapeWeight::new(ShapeKind::Star, 1),
            ShapeWeight::new(ShapeKind::Donut, 0),
            ShapeWeight::new(ShapeKind::Plus, 2),
        ],
        ..LayoutConfig::default()
    };
    let graph = run(&range(20), &config, 5);
    assert!(graph
        .stats
        .shapes
        .keys()
        .all(|k| matches!(k, ShapeKind::Star | ShapeKind::Plus)));
}

#[test]
fn test_light_dims_far_nodes_less() {
    let config = LayoutConfig {
        light_position: LightPosition::TopLeft,
        ..LayoutConfig::default()
    };
    let graph = run(&range(20), &config, 8);
    let light = graph.light.unwrap();
    assert_eq!(light.position, Point::ORIGIN);

    let nearest = graph
        .nodes
        .iter()
        .min_by(|a, b| {
            a.position
                .distance(light.position)
                .total_cmp(&b.position.distance(light.position))
        })
        .unwrap();
    let farthest = graph
        .nodes
        .iter()
        .max_by(|a, b| {
            a.position
                .distance(light.position)
                .total_cmp(&b.position.distance(light.position))
        })
        .unwrap();
    let halo = |n: &collatz_graph_core::RenderNode| n.shape.as_ref().unwrap().halo.unwrap();
    assert!(halo(nearest).color.a >= halo(farthest).color.a);
}

#[test]
fn test_graph_serializes_to_json() {
    let config = LayoutConfig::for_layout(LayoutKind::Galaxy);
    let graph = run(&range(10), &config, 1);
    let json = graph.to_json_pretty().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["layout"], "galaxy");
    assert_eq!(value["nodes"].as_array().unwrap().len(), graph.nodes.len());
    assert_eq!(value["stats"]["edge_count"], graph.edges.len());

    let back: PositionedGraph = serde_json::from_str(&json).unwrap();
    assert_eq!(back.nodes.len(), graph.nodes.len());
    assert_eq!(back.stats, graph.stats);
}
