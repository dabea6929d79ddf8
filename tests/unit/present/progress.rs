use super::*;
use crate::engine::{trace::generate_steps, tree::build_tree};

fn id(path: &[i32]) -> NodeId {
    NodeId::from_path(path)
}

#[test]
fn progress_without_tree_is_zeroed() {
    let empty = BTreeSet::new();
    let p = calculate_progress(None, &empty, &empty, &[], 0, None);
    assert_eq!(p.total_nodes, 0);
    assert_eq!(p.percentage, 0.0);
    assert_eq!(p.expected_permutations, 1);
    assert_eq!(p.max_depth, 0);
}

#[test]
fn progress_counts_and_percentage() {
    let tree = build_tree(&[1, 2, 3]);
    let visited: BTreeSet<NodeId> = [id(&[1]), id(&[1, 2]), id(&[1, 2, 3]), id(&[1, 3])]
        .into_iter()
        .collect();
    let completed: BTreeSet<NodeId> = [id(&[1, 2, 3])].into_iter().collect();
    let results = vec![vec![1, 2, 3]];
    let p = calculate_progress(Some(&tree), &visited, &completed, &results, 3, Some(&id(&[1, 3])));
    assert_eq!(p.total_nodes, 16);
    assert_eq!(p.visited_count, 4);
    assert_eq!(p.completed_count, 1);
    assert_eq!(p.expected_permutations, 6);
    assert_eq!(p.found_permutations, 1);
    assert_eq!(p.current_depth, 2);
    assert_eq!(p.max_depth, 3);
    assert_eq!(p.percentage, 25.0);
}

#[test]
fn unknown_current_node_has_depth_zero() {
    let tree = build_tree(&[1, 2]);
    let empty = BTreeSet::new();
    let p = calculate_progress(Some(&tree), &empty, &empty, &[], 2, Some(&id(&[9])));
    assert_eq!(p.current_depth, 0);
}

#[test]
fn full_trace_visits_every_non_root_node() {
    let steps = generate_steps(&[1, 2, 3]);
    let tree = build_tree(&[1, 2, 3]);
    let state = PresentationState::replay(&steps, Some(steps.len() - 1));
    let p = ProgressInfo::from_state(Some(&tree), &state, 3);
    assert_eq!(p.visited_count, 15);
    assert_eq!(p.found_permutations, 6);
    assert!((p.percentage - 15.0 / 16.0 * 100.0).abs() < 1e-9);
}

#[test]
fn highlight_path_is_root_first() {
    let tree = build_tree(&[1, 2, 3]);
    assert_eq!(
        highlight_path(Some(&tree), Some(&id(&[2, 3]))),
        vec![NodeId::root(), id(&[2]), id(&[2, 3])]
    );
    assert_eq!(highlight_path(Some(&tree), Some(&NodeId::root())), vec![NodeId::root()]);
    assert!(highlight_path(Some(&tree), None).is_empty());
    assert!(highlight_path(None, Some(&id(&[1]))).is_empty());
    assert!(highlight_path(Some(&tree), Some(&id(&[7]))).is_empty());
}

#[test]
fn result_path_reaches_the_matching_leaf() {
    let tree = build_tree(&[1, 2, 3]);
    assert_eq!(
        result_path(Some(&tree), &[3, 1, 2]),
        vec![NodeId::root(), id(&[3]), id(&[3, 1]), id(&[3, 1, 2])]
    );
    // interior paths are not results
    assert!(result_path(Some(&tree), &[3, 1]).is_empty());
}

#[test]
fn dimmed_excludes_path_and_visited() {
    let tree = build_tree(&[1, 2]);
    let visited: BTreeSet<NodeId> = [id(&[1])].into_iter().collect();
    let dimmed = dimmed_nodes(Some(&tree), Some(&id(&[1, 2])), &visited);
    let expected: BTreeSet<NodeId> = [id(&[2]), id(&[2, 1])].into_iter().collect();
    assert_eq!(dimmed, expected);
}

#[test]
fn dimmed_without_current_covers_all_unvisited() {
    let tree = build_tree(&[1, 2]);
    let dimmed = dimmed_nodes(Some(&tree), None, &BTreeSet::new());
    assert_eq!(dimmed.len(), tree.node_count());
    assert!(dimmed_nodes(None, None, &BTreeSet::new()).is_empty());
}

#[test]
fn leaf_detection() {
    let tree = build_tree(&[1, 2]);
    assert!(is_leaf(Some(&tree), &id(&[2, 1])));
    assert!(!is_leaf(Some(&tree), &id(&[2])));
    assert!(!is_leaf(Some(&tree), &id(&[5])));
    assert!(!is_leaf(None, &id(&[2, 1])));
}

#[test]
fn mini_map_layout_and_states() {
    let tree = build_tree(&[1, 2, 3]);
    let visited: BTreeSet<NodeId> = [id(&[1])].into_iter().collect();
    let map = mini_map(Some(&tree), Some(&id(&[1, 3])), &visited);
    assert_eq!(map.len(), 16);

    let root = &map[0];
    assert_eq!(root.id, NodeId::root());
    assert_eq!((root.x, root.y), (0.0, 0.0));
    assert_eq!(root.state, MiniMapState::Unvisited);

    let find = |p: &[i32]| map.iter().find(|n| n.id == id(p)).unwrap();
    assert_eq!(find(&[1]).state, MiniMapState::Visited);
    assert_eq!(find(&[1, 3]).state, MiniMapState::Current);
    assert_eq!(find(&[3]).x, 100.0);
    assert_eq!(find(&[2]).x, 50.0);
    assert!((find(&[2]).y - 100.0 / 3.0).abs() < 1e-9);
    // single child at the last level sits at x = 0
    assert_eq!(find(&[1, 3, 2]).x, 0.0);
    assert_eq!(find(&[1, 3, 2]).y, 100.0);

    // pre-order: root, [1], [1,2], [1,2,3], [1,3], ...
    let order: Vec<&str> = map.iter().take(5).map(|n| n.id.as_str()).collect();
    assert_eq!(order, vec!["node-root", "node-1", "node-1-2", "node-1-2-3", "node-1-3"]);
}

#[test]
fn mini_map_without_tree_is_empty() {
    assert!(mini_map(None, None, &BTreeSet::new()).is_empty());
}
