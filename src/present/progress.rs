//! Derived metrics over a decision tree and a point-in-time view state.
//!
//! Everything here is pure: inputs are borrowed and never mutated. A missing tree
//! (nothing submitted yet) yields zeroed metrics and empty collections.

use std::collections::BTreeSet;

use crate::{
    engine::tree::{DecisionTree, TreeNode},
    foundation::core::{NodeId, factorial},
    present::reducer::PresentationState,
};

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ProgressInfo {
    pub total_nodes: usize,
    pub visited_count: usize,
    pub completed_count: usize,
    pub expected_permutations: u64,
    pub found_permutations: usize,
    pub current_depth: usize,
    pub max_depth: usize,
    pub percentage: f64, // 0..=100
}

pub fn calculate_progress(
    tree: Option<&DecisionTree>,
    visited: &BTreeSet<NodeId>,
    completed: &BTreeSet<NodeId>,
    results: &[Vec<i32>],
    input_len: usize,
    current: Option<&NodeId>,
) -> ProgressInfo {
    let total_nodes = tree.map_or(0, DecisionTree::node_count);
    let current_depth = match (tree, current) {
        (Some(tree), Some(id)) => tree.find(id).map_or(0, |n| n.depth),
        _ => 0,
    };
    let percentage = if total_nodes > 0 {
        visited.len() as f64 / total_nodes as f64 * 100.0
    } else {
        0.0
    };

    ProgressInfo {
        total_nodes,
        visited_count: visited.len(),
        completed_count: completed.len(),
        expected_permutations: factorial(input_len),
        found_permutations: results.len(),
        current_depth,
        max_depth: tree.map_or(0, DecisionTree::max_depth),
        percentage,
    }
}

impl ProgressInfo {
    pub fn from_state(
        tree: Option<&DecisionTree>,
        state: &PresentationState,
        input_len: usize,
    ) -> Self {
        calculate_progress(
            tree,
            &state.visited,
            &state.completed,
            &state.results,
            input_len,
            state.current_node.as_ref(),
        )
    }
}

/// Root-first ids from the root down to `current`.
pub fn highlight_path(tree: Option<&DecisionTree>, current: Option<&NodeId>) -> Vec<NodeId> {
    let (Some(tree), Some(target)) = (tree, current) else {
        return Vec::new();
    };
    let mut path = Vec::new();
    if find_path(tree.root(), &mut path, &|n| &n.id == target) {
        path
    } else {
        Vec::new()
    }
}

/// Root-first ids down to the leaf whose path equals `result`.
pub fn result_path(tree: Option<&DecisionTree>, result: &[i32]) -> Vec<NodeId> {
    let Some(tree) = tree else {
        return Vec::new();
    };
    let mut path = Vec::new();
    if find_path(tree.root(), &mut path, &|n| n.is_leaf() && n.path == result) {
        path
    } else {
        Vec::new()
    }
}

fn find_path(node: &TreeNode, path: &mut Vec<NodeId>, hit: &dyn Fn(&TreeNode) -> bool) -> bool {
    path.push(node.id.clone());
    if hit(node) {
        return true;
    }
    for child in &node.children {
        if find_path(child, path, hit) {
            return true;
        }
    }
    path.pop();
    false
}

/// Nodes that are neither on the highlighted path nor visited yet.
///
/// With no current node the highlighted path is empty, so every unvisited node is
/// dimmed (before the first step that is the whole tree). No tree dims nothing.
pub fn dimmed_nodes(
    tree: Option<&DecisionTree>,
    current: Option<&NodeId>,
    visited: &BTreeSet<NodeId>,
) -> BTreeSet<NodeId> {
    let Some(t) = tree else {
        return BTreeSet::new();
    };
    let on_path: BTreeSet<NodeId> = highlight_path(tree, current).into_iter().collect();
    t.iter()
        .filter(|n| !on_path.contains(&n.id) && !visited.contains(&n.id))
        .map(|n| n.id.clone())
        .collect()
}

pub fn is_leaf(tree: Option<&DecisionTree>, id: &NodeId) -> bool {
    tree.and_then(|t| t.find(id)).is_some_and(TreeNode::is_leaf)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MiniMapState {
    Current,
    Visited,
    Unvisited,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct MiniMapNode {
    pub id: NodeId,
    pub x: f64, // 0..=100, sibling order
    pub y: f64, // 0..=100, depth
    pub state: MiniMapState,
}

/// Normalized overview layout in pre-order.
pub fn mini_map(
    tree: Option<&DecisionTree>,
    current: Option<&NodeId>,
    visited: &BTreeSet<NodeId>,
) -> Vec<MiniMapNode> {
    let Some(tree) = tree else {
        return Vec::new();
    };
    let depth_span = tree.max_depth().max(1) as f64;
    let mut out = Vec::with_capacity(tree.node_count());
    let mut stack: Vec<(&TreeNode, usize, usize)> = vec![(tree.root(), 0, 1)];

    while let Some((node, index, siblings)) = stack.pop() {
        let state = if current == Some(&node.id) {
            MiniMapState::Current
        } else if visited.contains(&node.id) {
            MiniMapState::Visited
        } else {
            MiniMapState::Unvisited
        };
        out.push(MiniMapNode {
            id: node.id.clone(),
            x: index as f64 / siblings.saturating_sub(1).max(1) as f64 * 100.0,
            y: node.depth as f64 / depth_span * 100.0,
            state,
        });
        let n = node.children.len();
        stack.extend(node.children.iter().enumerate().rev().map(|(i, c)| (c, i, n)));
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/present/progress.rs"]
mod tests;
