//! Bottleneck bounds from the two single-weight minimum spanning trees.
//!
//! Let `T_w` minimize Σ weight and `T_m` minimize Σ mirror weight. Every
//! spanning tree has Σ weight ≥ Σ weight(T_w) and Σ mirror ≥ Σ mirror(T_m),
//! so `max(Σ weight(T_w), Σ mirror(T_m))` is a lower bound on the optimum,
//! and the better of the two trees is an upper bound. When an MST is no worse
//! on its other weight than on its own, it is optimal outright.

use crate::error::Infeasibility;
use crate::graph::{Graph, WeightKind};
use crate::mst::minimum_spanning_tree;
use crate::tree::SpanningTree;

/// Which single-weight MST produced a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MstSource {
    /// MST under primary weight.
    Primary,
    /// MST under mirror weight.
    Mirror,
}

/// Bounds that bracket the optimum without proving it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bounds {
    /// Best bottleneck proven achievable (B).
    pub upper: u64,
    /// Bottleneck no tree can beat (B_min).
    pub lower: u64,
    /// Tree achieving `upper`.
    pub incumbent: SpanningTree,
    /// Which MST `incumbent` is.
    pub source: MstSource,
}

/// Outcome of bound estimation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundEstimate {
    /// An MST is provably optimal; no search needed.
    Optimal {
        /// The optimal tree.
        tree: SpanningTree,
        /// Its bottleneck, equal to the optimum.
        bottleneck: u64,
        /// Which MST it is.
        source: MstSource,
    },

    /// Search is needed between these bounds.
    Bounded(Bounds),
}

impl BoundEstimate {
    /// Proven lower bound.
    pub fn lower(&self) -> u64 {
        match self {
            BoundEstimate::Optimal { bottleneck, .. } => *bottleneck,
            BoundEstimate::Bounded(b) => b.lower,
        }
    }

    /// Achievable upper bound.
    pub fn upper(&self) -> u64 {
        match self {
            BoundEstimate::Optimal { bottleneck, .. } => *bottleneck,
            BoundEstimate::Bounded(b) => b.upper,
        }
    }

    /// Tree achieving [`BoundEstimate::upper`].
    pub fn tree(&self) -> &SpanningTree {
        match self {
            BoundEstimate::Optimal { tree, .. } => tree,
            BoundEstimate::Bounded(b) => &b.incumbent,
        }
    }
}

/// Compute `(B, B_min)` from the two MSTs, or an optimal tree directly.
///
/// Fails with [`Infeasibility::Disconnected`] if the graph has no spanning tree.
pub fn estimate_bounds(graph: &Graph) -> Result<BoundEstimate, Infeasibility> {
    let tw = minimum_spanning_tree(graph, WeightKind::Primary).ok_or(Infeasibility::Disconnected)?;
    let (w1, m1) = (tw.weight(), tw.mirror_weight());

    if m1 <= w1 {
        return Ok(BoundEstimate::Optimal {
            tree: tw,
            bottleneck: w1,
            source: MstSource::Primary,
        });
    }

    let tm = minimum_spanning_tree(graph, WeightKind::Mirror).ok_or(Infeasibility::Disconnected)?;
    let (w2, m2) = (tm.weight(), tm.mirror_weight());

    if w2 <= m2 {
        return Ok(BoundEstimate::Optimal {
            tree: tm,
            bottleneck: m2,
            source: MstSource::Mirror,
        });
    }

    // Here m1 > w1 and w2 > m2, so B(T_w) = m1 and B(T_m) = w2.
    let lower = w1.max(m2);
    let bounds = if w2 < m1 {
        Bounds {
            upper: w2,
            lower,
            incumbent: tm,
            source: MstSource::Mirror,
        }
    } else {
        Bounds {
            upper: m1,
            lower,
            incumbent: tw,
            source: MstSource::Primary,
        }
    };

    Ok(BoundEstimate::Bounded(bounds))
}

/// Sum of the `N - 1` largest primary weights.
///
/// A coarse decision bound: no spanning tree has a larger primary sum.
pub fn heaviest_edges_bound(graph: &Graph) -> u64 {
    let mut weights: Vec<u64> = graph.edges().iter().map(|e| e.weight).collect();
    weights.sort_unstable_by(|a, b| b.cmp(a));
    weights
        .iter()
        .take(graph.num_nodes().saturating_sub(1))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;

    fn triangle() -> Graph {
        let mut b = GraphBuilder::new();
        b.add_edge("1", "2", 1, 5).unwrap();
        b.add_edge("2", "3", 5, 1).unwrap();
        b.add_edge("1", "3", 3, 3).unwrap();
        b.build()
    }

    #[test]
    fn test_triangle_bounds() {
        let est = estimate_bounds(&triangle()).unwrap();
        match est {
            BoundEstimate::Bounded(b) => {
                // T_w = {12, 13}: (4, 8); T_m = {23, 13}: (8, 4)
                assert_eq!(b.upper, 8);
                assert_eq!(b.lower, 4);
                assert_eq!(b.source, MstSource::Primary);
                assert_eq!(b.incumbent.edge_ids(), vec![0, 2]);
            }
            other => panic!("expected bounds, got {:?}", other),
        }
    }

    #[test]
    fn test_primary_mst_short_circuit() {
        let mut b = GraphBuilder::new();
        b.add_edge("a", "b", 2, 1).unwrap();
        b.add_edge("b", "c", 3, 3).unwrap();
        b.add_edge("a", "c", 9, 0).unwrap();
        let g = b.build();

        match estimate_bounds(&g).unwrap() {
            BoundEstimate::Optimal { tree, bottleneck, source } => {
                assert_eq!(source, MstSource::Primary);
                assert_eq!(bottleneck, 5);
                assert_eq!(tree.edge_ids(), vec![0, 1]);
            }
            other => panic!("expected optimal, got {:?}", other),
        }
    }

    #[test]
    fn test_mirror_mst_short_circuit() {
        // T_w = {ab, bc}: (2, 20) -> not optimal
        // T_m = {ab, ac}: (6, 10) -> w2 <= m2, optimal with 10
        let mut b = GraphBuilder::new();
        b.add_edge("a", "b", 1, 5).unwrap();
        b.add_edge("b", "c", 1, 15).unwrap();
        b.add_edge("a", "c", 5, 5).unwrap();
        let g = b.build();

        match estimate_bounds(&g).unwrap() {
            BoundEstimate::Optimal { tree, bottleneck, source } => {
                assert_eq!(source, MstSource::Mirror);
                assert_eq!(bottleneck, 10);
                assert_eq!(tree.edge_ids(), vec![0, 2]);
            }
            other => panic!("expected optimal, got {:?}", other),
        }
    }

    #[test]
    fn test_idempotent() {
        let g = triangle();
        assert_eq!(estimate_bounds(&g).unwrap(), estimate_bounds(&g).unwrap());
    }

    #[test]
    fn test_disconnected() {
        let g = triangle().isolate(0);
        assert_eq!(estimate_bounds(&g), Err(Infeasibility::Disconnected));
    }

    #[test]
    fn test_heaviest_edges_bound() {
        // n - 1 = 2 largest weights: 5 + 3
        assert_eq!(heaviest_edges_bound(&triangle()), 8);
    }
}
