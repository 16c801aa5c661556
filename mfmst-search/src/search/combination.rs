//! Tree test for candidate edge subsets.
//!
//! Bridges are forced, so a candidate is `bridges ∪ picks` where `picks` is
//! a `(N - 1 - |bridges|)`-subset of the remaining edges.

use mfmst_core::{find_bridges, DisjointSet, Edge, Graph, SpanningTree};

use crate::model::IncumbentTracker;

/// Shared state for subset-based strategies.
pub struct SubsetEvaluator<'g> {
    graph: &'g Graph,

    /// Bridge edges, always included.
    forced: Vec<Edge>,

    /// Non-bridge edges, ascending id.
    pool: Vec<Edge>,

    /// Union-find with the bridges already merged.
    base: DisjointSet,

    forced_weight: u64,
    forced_mirror: u64,

    /// Edges to pick from `pool`; None if the graph has too few.
    picks: Option<usize>,
}

impl<'g> SubsetEvaluator<'g> {
    /// Split `graph` into forced and optional edges.
    pub fn new(graph: &'g Graph) -> Self {
        let bridges = find_bridges(graph);
        let (forced, pool): (Vec<Edge>, Vec<Edge>) =
            graph.edges().iter().copied().partition(|e| bridges.contains(e.id));

        let mut base = DisjointSet::new(graph.num_nodes());
        for e in &forced {
            base.union(e.u, e.v);
        }

        let needed = graph.num_nodes().saturating_sub(1);
        let picks = needed
            .checked_sub(forced.len())
            .filter(|&k| k <= pool.len());

        Self {
            graph,
            forced_weight: bridges.weight(),
            forced_mirror: bridges.mirror_weight(),
            forced,
            pool,
            base,
            picks,
        }
    }

    /// Number of optional edges.
    pub fn pool_len(&self) -> usize {
        self.pool.len()
    }

    /// Subset size to choose, or None if no subset can span.
    pub fn picks(&self) -> Option<usize> {
        self.picks
    }

    /// Graph under test.
    pub fn graph(&self) -> &'g Graph {
        self.graph
    }

    /// Weight sums of `bridges ∪ pool[indices]`.
    pub fn sums(&self, indices: &[usize]) -> (u64, u64) {
        indices.iter().fold(
            (self.forced_weight, self.forced_mirror),
            |(w, m), &i| (w + self.pool[i].weight, m + self.pool[i].mirror_weight),
        )
    }

    /// Test `bridges ∪ pool[indices]`.
    ///
    /// Returns `Ok(tree)` for an admissible spanning tree, `Err(true)` if the
    /// sums were rejected by the incumbent, `Err(false)` if the edges contain
    /// a cycle.
    pub fn evaluate(
        &self,
        indices: &[usize],
        incumbent: &IncumbentTracker,
    ) -> Result<SpanningTree, bool> {
        let (w, m) = self.sums(indices);
        if !incumbent.admits(w, m) {
            return Err(true);
        }

        // n - 1 edges without a cycle span the graph
        let mut ds = self.base.clone();
        for &i in indices {
            let e = &self.pool[i];
            if !ds.union(e.u, e.v) {
                return Err(false);
            }
        }

        let mut edges = self.forced.clone();
        edges.extend(indices.iter().map(|&i| self.pool[i]));
        Ok(SpanningTree::from_edges(edges))
    }
}
