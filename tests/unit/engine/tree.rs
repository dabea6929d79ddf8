use super::*;

fn paths_of_leaves(tree: &DecisionTree) -> Vec<Vec<i32>> {
    tree.leaves().map(|n| n.path.clone()).collect()
}

#[test]
fn root_shape() {
    let tree = build_tree(&[1, 2, 3]);
    assert_eq!(tree.root().id, NodeId::root());
    assert_eq!(tree.root().value, None);
    assert_eq!(tree.root().depth, 0);
    assert!(tree.root().path.is_empty());
    let values: Vec<_> = tree.root().children.iter().map(|c| c.value).collect();
    assert_eq!(values, vec![Some(1), Some(2), Some(3)]);
}

#[test]
fn node_at_depth_d_has_n_minus_d_children() {
    let nums = [4, -2, 7, 0];
    let tree = build_tree(&nums);
    for node in tree.iter() {
        assert_eq!(node.children.len(), nums.len() - node.depth, "{}", node.id);
        assert_eq!(node.path.len(), node.depth);
        assert_eq!(node.id, NodeId::from_path(&node.path));
    }
}

#[test]
fn leaves_are_all_permutations_in_lexicographic_candidate_order() {
    let tree = build_tree(&[1, 2, 3]);
    assert_eq!(
        paths_of_leaves(&tree),
        vec![
            vec![1, 2, 3],
            vec![1, 3, 2],
            vec![2, 1, 3],
            vec![2, 3, 1],
            vec![3, 1, 2],
            vec![3, 2, 1],
        ]
    );
}

#[test]
fn cached_counts_match_a_walk() {
    let tree = build_tree(&[1, 2, 3]);
    assert_eq!(tree.node_count(), 16);
    assert_eq!(tree.node_count(), tree.iter().count());
    assert_eq!(tree.max_depth(), 3);

    let big = build_tree(&[1, 2, 3, 4, 5, 6]);
    assert_eq!(big.leaves().count(), 720);
    assert_eq!(big.node_count(), 1957);
}

#[test]
fn single_value_tree() {
    let tree = build_tree(&[5]);
    assert_eq!(tree.node_count(), 2);
    assert_eq!(tree.root().children[0].id.as_str(), "node-5");
    assert!(tree.root().children[0].is_leaf());
}

#[test]
fn find_by_id() {
    let tree = build_tree(&[1, 2, 3]);
    let node = tree.find(&NodeId::from_path(&[3, 1])).unwrap();
    assert_eq!(node.depth, 2);
    assert_eq!(node.value, Some(1));
    assert!(tree.find(&NodeId::from_path(&[9])).is_none());
}

#[test]
fn building_twice_is_identical() {
    assert_eq!(build_tree(&[2, 0, 1]), build_tree(&[2, 0, 1]));
}
