use nexus_graph::{build, layout, FilterSet, GraphNode, LayoutConfig, TreeLayout};
use nexus_test_utils::arb_snapshot;
use proptest::prelude::*;

const EPSILON: f64 = 1e-6;

/// Nodes per depth, in left-to-right (pre-order) order
fn levels(positioned: &TreeLayout<'_>) -> Vec<Vec<usize>> {
    let mut levels: Vec<Vec<usize>> = Vec::new();
    for (i, node) in positioned.nodes.iter().enumerate() {
        if levels.len() <= node.depth {
            levels.resize(node.depth + 1, Vec::new());
        }
        levels[node.depth].push(i);
    }
    levels
}

fn arb_shape() -> impl Strategy<Value = GraphNode<'static>> {
    let leaf = Just(GraphNode::root("leaf"));
    leaf.prop_recursive(5, 64, 6, |inner| {
        proptest::collection::vec(inner, 0..6).prop_map(|children| {
            let mut node = GraphNode::root("inner");
            node.children = children;
            node
        })
    })
}

fn check_layout(tree: &GraphNode<'_>, config: &LayoutConfig) -> Result<(), TestCaseError> {
    let positioned = layout(tree, config);
    prop_assert_eq!(positioned.len(), tree.descendants().count());
    prop_assert!(positioned.root().x.abs() < EPSILON);
    prop_assert!(positioned.root().y.abs() < EPSILON);

    let min_gap = config.node_size * config.sibling_separation.min(config.cousin_separation);
    for level in levels(&positioned) {
        for pair in level.windows(2) {
            let (a, b) = (&positioned.nodes[pair[0]], &positioned.nodes[pair[1]]);
            prop_assert!(
                b.x - a.x >= min_gap - EPSILON,
                "nodes {} and {} overlap: {} vs {}", pair[0], pair[1], a.x, b.x
            );
        }
    }

    for (i, node) in positioned.nodes.iter().enumerate() {
        #[allow(clippy::cast_precision_loss)]
        let expected_y = node.depth as f64 * config.level_gap;
        prop_assert!((node.y - expected_y).abs() < EPSILON);

        let children: Vec<f64> = positioned.children_of(i).map(|c| c.x).collect();
        if !children.is_empty() {
            #[allow(clippy::cast_precision_loss)]
            let mean = children.iter().sum::<f64>() / children.len() as f64;
            prop_assert!((node.x - mean).abs() < EPSILON, "node {} not centered", i);
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn prop_layout_never_overlaps(tree in arb_shape()) {
        check_layout(&tree, &LayoutConfig::default())?;
    }

    #[test]
    fn prop_layout_respects_custom_spacing(
        tree in arb_shape(),
        node_size in 10.0..200.0f64,
        sibling in 1.0..2.0f64,
        extra in 0.0..1.0f64,
    ) {
        let config = LayoutConfig::new()
            .with_node_size(node_size)
            .with_level_gap(100.0)
            .with_separation(sibling, sibling + extra);
        check_layout(&tree, &config)?;
    }

    #[test]
    fn prop_layout_of_built_tree(snapshot in arb_snapshot()) {
        let tree = build(&snapshot, &FilterSet::all());
        check_layout(&tree, &LayoutConfig::default())?;
    }

    #[test]
    fn prop_layout_is_deterministic(tree in arb_shape()) {
        let config = LayoutConfig::default();
        let first: Vec<(f64, f64)> = layout(&tree, &config).nodes.iter().map(|n| (n.x, n.y)).collect();
        let second: Vec<(f64, f64)> = layout(&tree, &config).nodes.iter().map(|n| (n.x, n.y)).collect();
        prop_assert_eq!(first, second);
    }
}

#[test]
fn test_deep_chain_does_not_recurse() {
    let mut tree = GraphNode::root("leaf");
    for _ in 0..10_000 {
        let mut parent = GraphNode::root("inner");
        parent.children.push(tree);
        tree = parent;
    }
    let positioned = layout(&tree, &LayoutConfig::default());
    assert_eq!(positioned.len(), 10_001);
    assert!(positioned.nodes.iter().all(|n| n.x.abs() < EPSILON));
    drop(positioned);
    // GraphNode drops recursively; unwind the chain by hand.
    let mut next = tree.children.pop();
    while let Some(mut node) = next {
        next = node.children.pop();
    }
}
