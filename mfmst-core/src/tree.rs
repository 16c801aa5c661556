//! Spanning tree values drawn from a [`Graph`].

use crate::graph::{Edge, Graph, WeightKind};
use crate::union_find::DisjointSet;

/// Bottleneck of a pair of weight sums.
#[inline]
pub fn bottleneck(weight: u64, mirror_weight: u64) -> u64 {
    weight.max(mirror_weight)
}

/// A set of edges claimed to span a graph, with cached weight sums.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanningTree {
    /// Edges sorted by ascending id.
    edges: Vec<Edge>,
    weight: u64,
    mirror_weight: u64,
}

impl SpanningTree {
    /// Wrap a set of edges. Order does not matter.
    pub fn from_edges(mut edges: Vec<Edge>) -> Self {
        edges.sort_by_key(|e| e.id);
        let weight = edges.iter().map(|e| e.weight).sum();
        let mirror_weight = edges.iter().map(|e| e.mirror_weight).sum();
        Self {
            edges,
            weight,
            mirror_weight,
        }
    }

    /// Collect edges of `graph` by id. Ids not present are skipped.
    pub fn from_ids(graph: &Graph, ids: &[usize]) -> Self {
        Self::from_edges(ids.iter().filter_map(|&id| graph.edge_by_id(id).copied()).collect())
    }

    /// Edges, ascending id.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Edge ids, ascending.
    pub fn edge_ids(&self) -> Vec<usize> {
        self.edges.iter().map(|e| e.id).collect()
    }

    /// Number of edges.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// True for the single-node tree.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Whether the tree uses edge `id`.
    pub fn contains(&self, id: usize) -> bool {
        self.edges.binary_search_by_key(&id, |e| e.id).is_ok()
    }

    /// Sum of primary weights.
    pub fn weight(&self) -> u64 {
        self.weight
    }

    /// Sum of mirror weights.
    pub fn mirror_weight(&self) -> u64 {
        self.mirror_weight
    }

    /// Sum under a chosen weight function.
    pub fn total(&self, kind: WeightKind) -> u64 {
        match kind {
            WeightKind::Primary => self.weight,
            WeightKind::Mirror => self.mirror_weight,
        }
    }

    /// `max(Σ weight, Σ mirror_weight)`.
    pub fn bottleneck(&self) -> u64 {
        bottleneck(self.weight, self.mirror_weight)
    }

    /// Check the spanning tree property against `graph`: exactly `n - 1`
    /// edges, all belonging to the graph, with no cycle.
    pub fn is_spanning_tree_of(&self, graph: &Graph) -> bool {
        let n = graph.num_nodes();
        if self.edges.len() + 1 != n.max(1) {
            return false;
        }

        let mut ds = DisjointSet::new(n);
        for e in &self.edges {
            if graph.edge_by_id(e.id) != Some(e) {
                return false;
            }
            if !ds.union(e.u, e.v) {
                return false;
            }
        }

        ds.num_sets() <= 1
    }
}
