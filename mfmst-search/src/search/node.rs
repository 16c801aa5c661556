//! Search node representation.

use mfmst_core::NodeId;

use super::Attachment;

/// A partial tree in the branch-and-bound search.
///
/// Each node owns its state, so backtracking is just dropping the node.
#[derive(Debug, Clone)]
pub struct SearchNode {
    /// Unique node identifier.
    pub id: u64,

    /// Depth in the search tree (0 for root).
    pub depth: usize,

    /// Graph nodes already in the partial tree.
    pub visited: Vec<bool>,

    /// Number of `true` entries in `visited`.
    pub visited_count: usize,

    /// Graph nodes still to expand; the last one is expanded next.
    pub frontier: Vec<NodeId>,

    /// Edge ids of the partial tree, in attachment order.
    pub edges: Vec<usize>,

    /// Σ weight over `edges`.
    pub weight: u64,

    /// Σ mirror weight over `edges`.
    pub mirror_weight: u64,
}

impl SearchNode {
    /// Root: only `root` visited, nothing attached.
    pub fn root(num_nodes: usize, root: NodeId) -> Self {
        let mut visited = vec![false; num_nodes];
        visited[root] = true;
        Self {
            id: 0,
            depth: 0,
            visited,
            visited_count: 1,
            frontier: vec![root],
            edges: Vec::new(),
            weight: 0,
            mirror_weight: 0,
        }
    }

    /// Child created by attaching `attachment` to the node just popped
    /// from this node's frontier.
    pub fn child(&self, id: u64, attachment: &Attachment) -> Self {
        let mut child = Self {
            id,
            depth: self.depth + 1,
            visited: self.visited.clone(),
            visited_count: self.visited_count + attachment.children.len(),
            frontier: self.frontier.clone(),
            edges: self.edges.clone(),
            weight: attachment.weight,
            mirror_weight: attachment.mirror_weight,
        };

        for &(node, edge_id) in &attachment.children {
            child.visited[node] = true;
            child.frontier.push(node);
            child.edges.push(edge_id);
        }

        child
    }

    /// Whether every graph node is in the partial tree.
    pub fn is_complete(&self) -> bool {
        self.visited_count == self.visited.len()
    }
}
