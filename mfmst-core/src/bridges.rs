//! Bridge detection and forced-edge feasibility.
//!
//! A bridge lies on no cycle, so every spanning tree of a connected graph
//! contains every bridge. Their summed weights are a floor for any tree.

use crate::error::Infeasibility;
use crate::graph::{Graph, NodeId};

/// The bridges of a graph with their weight totals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BridgeSet {
    /// Bridge edge ids, ascending.
    ids: Vec<usize>,
    weight: u64,
    mirror_weight: u64,
}

impl BridgeSet {
    /// Bridge ids, ascending.
    pub fn ids(&self) -> &[usize] {
        &self.ids
    }

    /// Whether edge `id` is a bridge.
    pub fn contains(&self, id: usize) -> bool {
        self.ids.binary_search(&id).is_ok()
    }

    /// Number of bridges.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// True if the graph is 2-edge-connected.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Σ weight over bridges.
    pub fn weight(&self) -> u64 {
        self.weight
    }

    /// Σ mirror weight over bridges.
    pub fn mirror_weight(&self) -> u64 {
        self.mirror_weight
    }

    /// Fail if the forced edges alone already exceed `bound`.
    pub fn check_bound(&self, bound: u64) -> Result<(), Infeasibility> {
        if self.weight > bound || self.mirror_weight > bound {
            return Err(Infeasibility::BridgeBoundTooLow {
                bound,
                weight: self.weight,
                mirror_weight: self.mirror_weight,
            });
        }
        Ok(())
    }
}

/// DFS frame: node, id of the tree edge that reached it, next neighbor slot.
struct Frame {
    node: NodeId,
    parent_edge: Option<usize>,
    next: usize,
}

/// Find all bridges with an iterative discovery/low-link DFS.
///
/// # Complexity
/// O(V + E).
pub fn find_bridges(graph: &Graph) -> BridgeSet {
    let n = graph.num_nodes();
    let adj: Vec<Vec<(NodeId, usize)>> = (0..n)
        .map(|u| graph.neighbors(u).map(|(v, e)| (v, e.id)).collect())
        .collect();

    // discovery == 0 means unvisited
    let mut discovery = vec![0usize; n];
    let mut low = vec![0usize; n];
    let mut time = 0;
    let mut ids = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();

    for root in 0..n {
        if discovery[root] != 0 {
            continue;
        }
        time += 1;
        discovery[root] = time;
        low[root] = time;
        stack.push(Frame {
            node: root,
            parent_edge: None,
            next: 0,
        });

        while let Some(frame) = stack.last_mut() {
            let u = frame.node;

            if frame.next < adj[u].len() {
                let (v, edge_id) = adj[u][frame.next];
                frame.next += 1;

                if frame.parent_edge == Some(edge_id) {
                    continue;
                }
                if discovery[v] == 0 {
                    time += 1;
                    discovery[v] = time;
                    low[v] = time;
                    stack.push(Frame {
                        node: v,
                        parent_edge: Some(edge_id),
                        next: 0,
                    });
                } else {
                    low[u] = low[u].min(discovery[v]);
                }
                continue;
            }

            let parent_edge = frame.parent_edge;
            stack.pop();

            if let (Some(parent), Some(edge_id)) = (stack.last(), parent_edge) {
                let p = parent.node;
                low[p] = low[p].min(low[u]);
                if low[u] > discovery[p] {
                    ids.push(edge_id);
                }
            }
        }
    }

    ids.sort_unstable();
    let (weight, mirror_weight) = ids
        .iter()
        .filter_map(|&id| graph.edge_by_id(id))
        .fold((0u64, 0u64), |(w, m), e| (w + e.weight, m + e.mirror_weight));

    BridgeSet {
        ids,
        weight,
        mirror_weight,
    }
}

/// Find bridges and check them against `bound`.
pub fn analyze_bridges(graph: &Graph, bound: u64) -> Result<BridgeSet, Infeasibility> {
    let bridges = find_bridges(graph);
    bridges.check_bound(bound)?;
    Ok(bridges)
}
