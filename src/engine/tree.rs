use crate::foundation::core::NodeId;

/// One node of the decision tree.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TreeNode {
    pub id: NodeId,
    pub value: Option<i32>, // None only at the root
    pub children: Vec<TreeNode>,
    pub depth: usize,
    pub path: Vec<i32>, // root-to-node values
}

impl TreeNode {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Size of the subtree rooted here, this node included.
    pub fn subtree_size(&self) -> usize {
        1 + self.children.iter().map(TreeNode::subtree_size).sum::<usize>()
    }

    fn max_depth(&self) -> usize {
        self.children
            .iter()
            .map(TreeNode::max_depth)
            .max()
            .unwrap_or(self.depth)
    }
}

/// Every partial and complete selection state for one input.
///
/// Immutable once built. The total node count and maximum depth are computed here so
/// per-frame progress queries never walk the whole tree for them.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct DecisionTree {
    root: TreeNode,
    node_count: usize,
    max_depth: usize,
}

impl DecisionTree {
    fn from_root(root: TreeNode) -> Self {
        let node_count = root.subtree_size();
        let max_depth = root.max_depth();
        Self {
            root,
            node_count,
            max_depth,
        }
    }

    pub fn root(&self) -> &TreeNode {
        &self.root
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Depth-first lookup by id.
    pub fn find(&self, id: &NodeId) -> Option<&TreeNode> {
        self.iter().find(|n| &n.id == id)
    }

    /// Pre-order traversal, children in candidate order.
    pub fn iter(&self) -> PreOrder<'_> {
        PreOrder {
            stack: vec![&self.root],
        }
    }

    pub fn leaves(&self) -> impl Iterator<Item = &TreeNode> {
        self.iter().filter(|n| n.is_leaf())
    }
}

/// Pre-order iterator over a [`DecisionTree`].
pub struct PreOrder<'a> {
    stack: Vec<&'a TreeNode>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a TreeNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// Build the full decision tree for `nums`.
///
/// `nums` must hold 1..=6 distinct values; callers normally go through
/// [`crate::InputSequence`]. Candidates are tracked by input position, so children
/// always appear in input order.
pub fn build_tree(nums: &[i32]) -> DecisionTree {
    let mut root = TreeNode {
        id: NodeId::root(),
        value: None,
        children: Vec::new(),
        depth: 0,
        path: Vec::new(),
    };
    let candidates: Vec<usize> = (0..nums.len()).collect();
    grow(nums, &mut root, &candidates);
    DecisionTree::from_root(root)
}

fn grow(nums: &[i32], parent: &mut TreeNode, candidates: &[usize]) {
    parent.children.reserve_exact(candidates.len());
    for (i, &pos) in candidates.iter().enumerate() {
        let value = nums[pos];
        let mut path = Vec::with_capacity(parent.path.len() + 1);
        path.extend_from_slice(&parent.path);
        path.push(value);

        let mut child = TreeNode {
            id: NodeId::from_path(&path),
            value: Some(value),
            children: Vec::new(),
            depth: parent.depth + 1,
            path,
        };

        if candidates.len() > 1 {
            let remaining: Vec<usize> = candidates
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .map(|(_, &p)| p)
                .collect();
            grow(nums, &mut child, &remaining);
        }
        parent.children.push(child);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/tree.rs"]
mod tests;
