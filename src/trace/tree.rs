//! Synthetic balanced binary tree giving DFS/BFS a structure to traverse.
//!
//! Built fresh for each tree-search run by recursive midpoint selection over
//! index ranges of the input array, then discarded. Nodes live in an arena
//! with child links expressed as arena ids, so the tree is a single owned
//! allocation with no reference cycles.

use serde::{Deserialize, Serialize};

/// Arena id of a tree node.
pub type NodeId = usize;

/// One node of a [`SyntheticTree`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    /// Value taken from the source array.
    pub value: u32,
    /// Position of `value` in the source array.
    pub array_index: usize,
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
}

/// Balanced binary tree over a flat array.
///
/// The midpoint of each index range becomes the subtree root, so the tree
/// depth is `ceil(log2(n + 1))` for any input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntheticTree {
    nodes: Vec<TreeNode>,
    root: Option<NodeId>,
}

impl SyntheticTree {
    /// Build the tree for an array. An empty array yields an empty tree.
    pub fn from_array(array: &[u32]) -> Self {
        let mut nodes = Vec::with_capacity(array.len());
        let root = if array.is_empty() {
            None
        } else {
            Some(build_range(array, 0, array.len() - 1, &mut nodes))
        };
        Self { nodes, root }
    }

    /// Arena id of the root node, if the tree is non-empty.
    #[inline]
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Node for an arena id.
    #[inline]
    pub fn node(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id]
    }

    /// Number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Build the subtree over the inclusive index range `[start, end]`,
/// returning its arena id.
fn build_range(array: &[u32], start: usize, end: usize, nodes: &mut Vec<TreeNode>) -> NodeId {
    let mid = (start + end) / 2;

    let id = nodes.len();
    nodes.push(TreeNode {
        value: array[mid],
        array_index: mid,
        left: None,
        right: None,
    });

    if mid > start {
        let left = build_range(array, start, mid - 1, nodes);
        nodes[id].left = Some(left);
    }
    if mid < end {
        let right = build_range(array, mid + 1, end, nodes);
        nodes[id].right = Some(right);
    }

    id
}
