//! Two-weight undirected graph model.
//!
//! A [`Graph`] is built once and then only read. Edge removal produces a new
//! graph value that shares node numbering and edge ids with the original.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::error::{GraphError, GraphResult};

/// Dense node index in canonical (first appearance) order.
pub type NodeId = usize;

/// Which weight function to read from an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightKind {
    /// The `weight` attribute.
    Primary,
    /// The `mirror_weight` attribute.
    Mirror,
}

/// An undirected edge with both weight attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    /// First endpoint.
    pub u: NodeId,
    /// Second endpoint.
    pub v: NodeId,
    /// Primary weight.
    pub weight: u64,
    /// Mirror weight.
    pub mirror_weight: u64,
    /// Load-order sequence index, unique within a graph.
    pub id: usize,
}

impl Edge {
    /// Weight under the given function.
    #[inline]
    pub fn weight_of(&self, kind: WeightKind) -> u64 {
        match kind {
            WeightKind::Primary => self.weight,
            WeightKind::Mirror => self.mirror_weight,
        }
    }

    /// Endpoint opposite `node`.
    #[inline]
    pub fn other(&self, node: NodeId) -> NodeId {
        if self.u == node {
            self.v
        } else {
            self.u
        }
    }

    /// Endpoints with the smaller index first.
    pub fn key(&self) -> (NodeId, NodeId) {
        (self.u.min(self.v), self.u.max(self.v))
    }
}

/// Immutable simple graph with two weights per edge.
#[derive(Debug, Clone)]
pub struct Graph {
    /// Node labels, indexed by [`NodeId`].
    labels: Vec<String>,
    /// Label lookup.
    index: HashMap<String, NodeId>,
    /// Edges sorted by ascending id.
    edges: Vec<Edge>,
    /// Positions into `edges` incident to each node, ascending id.
    adjacency: Vec<Vec<usize>>,
}

impl Graph {
    /// Build a graph from `(u, v, weight)` triples in load order.
    ///
    /// Edge `i` gets `id = i` and the mirror weight of edge `E - 1 - i`.
    /// The number of distinct labels must equal `node_count`.
    pub fn from_weighted_edges<S: AsRef<str>>(
        node_count: usize,
        edges: &[(S, S, u64)],
    ) -> GraphResult<Self> {
        let numbered: Vec<(usize, &str, &str, u64)> = edges
            .iter()
            .map(|(u, v, w)| (0, u.as_ref(), v.as_ref(), *w))
            .collect();
        Self::from_numbered_edges(node_count, &numbered)
    }

    /// Same as [`Graph::from_weighted_edges`] but each triple carries the
    /// line it was read from, for error reporting.
    pub(crate) fn from_numbered_edges(
        node_count: usize,
        edges: &[(usize, &str, &str, u64)],
    ) -> GraphResult<Self> {
        let count = edges.len();
        let mut builder = GraphBuilder::new();

        // No edge line names the lone node
        if count == 0 && node_count == 1 {
            builder.add_node("1");
        }

        for (i, &(line, u, v, weight)) in edges.iter().enumerate() {
            let mirror_weight = edges[count - 1 - i].3;
            builder.insert_edge(line, u, v, weight, mirror_weight)?;
        }

        if builder.num_nodes() != node_count {
            return Err(GraphError::NodeCountMismatch {
                declared: node_count,
                found: builder.num_nodes(),
            });
        }

        Ok(builder.build())
    }

    /// Number of nodes.
    pub fn num_nodes(&self) -> usize {
        self.labels.len()
    }

    /// Number of edges.
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Label of a node.
    pub fn label(&self, node: NodeId) -> &str {
        &self.labels[node]
    }

    /// All labels in canonical order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Node with the given label.
    pub fn node(&self, label: &str) -> Option<NodeId> {
        self.index.get(label).copied()
    }

    /// All edges, ascending id.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Edge with the given id, if it is present in this graph.
    pub fn edge_by_id(&self, id: usize) -> Option<&Edge> {
        self.edges
            .binary_search_by_key(&id, |e| e.id)
            .ok()
            .map(|pos| &self.edges[pos])
    }

    /// Edge between two labelled nodes, if any.
    pub fn edge_between(&self, a: &str, b: &str) -> Option<&Edge> {
        let (a, b) = (self.node(a)?, self.node(b)?);
        self.incident(a).find(|e| e.other(a) == b)
    }

    /// Edges touching `node`, ascending id.
    pub fn incident(&self, node: NodeId) -> impl Iterator<Item = &Edge> + '_ {
        self.adjacency[node].iter().map(move |&pos| &self.edges[pos])
    }

    /// `(neighbor, edge)` pairs of `node`, ascending edge id.
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = (NodeId, &Edge)> + '_ {
        self.incident(node).map(move |e| (e.other(node), e))
    }

    /// Number of incident edges.
    pub fn degree(&self, node: NodeId) -> usize {
        self.adjacency[node].len()
    }

    /// Sum of one weight function over a set of edge ids.
    pub fn weight_sum(&self, ids: &[usize], kind: WeightKind) -> u64 {
        ids.iter()
            .filter_map(|&id| self.edge_by_id(id))
            .map(|e| e.weight_of(kind))
            .sum()
    }

    /// Number of connected components (0 for the empty graph).
    pub fn component_count(&self) -> usize {
        let n = self.num_nodes();
        let mut seen = vec![false; n];
        let mut components = 0;
        let mut queue = VecDeque::new();

        for start in 0..n {
            if seen[start] {
                continue;
            }
            components += 1;
            seen[start] = true;
            queue.push_back(start);

            while let Some(u) = queue.pop_front() {
                for (v, _) in self.neighbors(u) {
                    if !seen[v] {
                        seen[v] = true;
                        queue.push_back(v);
                    }
                }
            }
        }

        components
    }

    /// Whether every node reaches every other node.
    pub fn is_connected(&self) -> bool {
        self.component_count() <= 1
    }

    /// New graph keeping only edges for which `keep` returns true.
    ///
    /// Nodes, labels and edge ids are unchanged.
    pub fn retain_edges<F>(&self, mut keep: F) -> Graph
    where
        F: FnMut(&Edge) -> bool,
    {
        let edges: Vec<Edge> = self.edges.iter().copied().filter(|e| keep(e)).collect();
        Self::assemble(self.labels.clone(), self.index.clone(), edges)
    }

    /// New graph with the given edge ids removed.
    pub fn without_edges(&self, ids: &[usize]) -> Graph {
        let removed: HashSet<usize> = ids.iter().copied().collect();
        self.retain_edges(|e| !removed.contains(&e.id))
    }

    /// New graph with every edge touching `node` removed.
    pub fn isolate(&self, node: NodeId) -> Graph {
        self.retain_edges(|e| e.u != node && e.v != node)
    }

    fn assemble(labels: Vec<String>, index: HashMap<String, NodeId>, edges: Vec<Edge>) -> Graph {
        let mut adjacency = vec![Vec::new(); labels.len()];
        for (pos, e) in edges.iter().enumerate() {
            adjacency[e.u].push(pos);
            adjacency[e.v].push(pos);
        }

        Graph {
            labels,
            index,
            edges,
            adjacency,
        }
    }
}

/// Incremental graph construction with explicit mirror weights.
///
/// Edge ids are assigned in insertion order.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    labels: Vec<String>,
    index: HashMap<String, NodeId>,
    edges: Vec<Edge>,
    pairs: HashSet<(NodeId, NodeId)>,
    /// Running totals; every subset sum of a built graph fits in `u64`.
    weight_total: u64,
    mirror_total: u64,
}

impl GraphBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes added so far.
    pub fn num_nodes(&self) -> usize {
        self.labels.len()
    }

    /// Add a node (no-op if the label exists) and return its id.
    pub fn add_node(&mut self, label: &str) -> NodeId {
        if let Some(&id) = self.index.get(label) {
            return id;
        }
        let id = self.labels.len();
        self.labels.push(label.to_string());
        self.index.insert(label.to_string(), id);
        id
    }

    /// Add an edge with both weights; returns its id.
    pub fn add_edge(
        &mut self,
        u: &str,
        v: &str,
        weight: u64,
        mirror_weight: u64,
    ) -> GraphResult<usize> {
        self.insert_edge(0, u, v, weight, mirror_weight)
    }

    pub(crate) fn insert_edge(
        &mut self,
        line: usize,
        u: &str,
        v: &str,
        weight: u64,
        mirror_weight: u64,
    ) -> GraphResult<usize> {
        if u == v {
            return Err(GraphError::SelfLoop { line });
        }
        let (weight_total, mirror_total) = match (
            self.weight_total.checked_add(weight),
            self.mirror_total.checked_add(mirror_weight),
        ) {
            (Some(w), Some(m)) => (w, m),
            _ => return Err(GraphError::WeightOverflow { line }),
        };

        let u = self.add_node(u);
        let v = self.add_node(v);

        if !self.pairs.insert((u.min(v), u.max(v))) {
            return Err(GraphError::DuplicateEdge { line });
        }

        self.weight_total = weight_total;
        self.mirror_total = mirror_total;

        let id = self.edges.len();
        self.edges.push(Edge {
            u,
            v,
            weight,
            mirror_weight,
            id,
        });
        Ok(id)
    }

    /// Finish construction.
    pub fn build(self) -> Graph {
        Graph::assemble(self.labels, self.index, self.edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Graph {
        Graph::from_weighted_edges(4, &[("a", "b", 1), ("b", "c", 2), ("c", "d", 3), ("d", "a", 4)])
            .unwrap()
    }

    #[test]
    fn test_mirror_weights_reverse_load_order() {
        let g = square();
        let mirrors: Vec<u64> = g.edges().iter().map(|e| e.mirror_weight).collect();
        assert_eq!(mirrors, vec![4, 3, 2, 1]);

        let ids: Vec<usize> = g.edges().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_odd_edge_count_middle_edge_mirrors_itself() {
        let g = Graph::from_weighted_edges(3, &[("1", "2", 7), ("2", "3", 8), ("1", "3", 9)])
            .unwrap();
        assert_eq!(g.edge_by_id(1).unwrap().mirror_weight, 8);
        assert_eq!(g.edge_by_id(0).unwrap().mirror_weight, 9);
    }

    #[test]
    fn test_node_count_mismatch() {
        let err = Graph::from_weighted_edges(5, &[("a", "b", 1)]).unwrap_err();
        assert!(matches!(err, GraphError::NodeCountMismatch { declared: 5, found: 2 }));
    }

    #[test]
    fn test_rejects_self_loop_and_duplicate() {
        let mut b = GraphBuilder::new();
        assert!(matches!(b.add_edge("x", "x", 1, 1), Err(GraphError::SelfLoop { .. })));
        b.add_edge("x", "y", 1, 1).unwrap();
        assert!(matches!(b.add_edge("y", "x", 2, 2), Err(GraphError::DuplicateEdge { .. })));
    }

    #[test]
    fn test_rejects_weight_totals_beyond_u64() {
        let heavy = i64::MAX as u64;
        let mut b = GraphBuilder::new();
        b.add_edge("a", "b", heavy, 1).unwrap();
        b.add_edge("b", "c", heavy, 1).unwrap();
        assert!(matches!(
            b.add_edge("c", "d", heavy, 1),
            Err(GraphError::WeightOverflow { line: 0 })
        ));

        let mut b = GraphBuilder::new();
        b.add_edge("a", "b", 1, u64::MAX).unwrap();
        assert!(matches!(
            b.add_edge("b", "c", 0, 1),
            Err(GraphError::WeightOverflow { .. })
        ));
        // Rejected edge leaves no trace
        assert_eq!(b.num_nodes(), 2);
    }

    #[test]
    fn test_single_node_without_edges() {
        let g = Graph::from_weighted_edges::<&str>(1, &[]).unwrap();
        assert_eq!(g.num_nodes(), 1);
        assert_eq!(g.num_edges(), 0);
        assert!(g.is_connected());

        let err = Graph::from_weighted_edges::<&str>(2, &[]).unwrap_err();
        assert!(matches!(err, GraphError::NodeCountMismatch { declared: 2, found: 0 }));
    }

    #[test]
    fn test_adjacency_and_lookup() {
        let g = square();
        let a = g.node("a").unwrap();
        let neighbors: Vec<&str> = g.neighbors(a).map(|(v, _)| g.label(v)).collect();
        assert_eq!(neighbors, vec!["b", "d"]);
        assert_eq!(g.degree(a), 2);
        assert_eq!(g.edge_between("c", "b").unwrap().id, 1);
        assert!(g.edge_between("a", "c").is_none());
    }

    #[test]
    fn test_removal_produces_new_view() {
        let g = square();
        let h = g.without_edges(&[1, 3]);

        assert_eq!(g.num_edges(), 4);
        assert_eq!(h.num_edges(), 2);
        assert_eq!(h.num_nodes(), 4);
        assert!(h.edge_by_id(1).is_none());
        assert_eq!(h.edge_by_id(2).unwrap().weight, 3);
        assert!(!h.is_connected());
        assert_eq!(h.component_count(), 2);
    }

    #[test]
    fn test_isolate_disconnects() {
        let g = square();
        assert!(g.is_connected());
        let h = g.isolate(g.node("c").unwrap());
        assert_eq!(h.num_edges(), 2);
        assert!(!h.is_connected());
    }

    #[test]
    fn test_weight_sum() {
        let g = square();
        assert_eq!(g.weight_sum(&[0, 2], WeightKind::Primary), 4);
        assert_eq!(g.weight_sum(&[0, 2], WeightKind::Mirror), 6);
    }
}
