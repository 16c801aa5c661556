//! Minimum spanning tree via Kruskal's algorithm.

use crate::graph::{Graph, WeightKind};
use crate::tree::SpanningTree;
use crate::union_find::DisjointSet;

/// Minimum spanning tree under one weight function.
///
/// Edges are taken in ascending `(weight, id)` order, so ties resolve to the
/// lower edge id and the result is deterministic. Returns `None` if the graph
/// is disconnected.
///
/// # Complexity
/// O(E log E) for sorting + O(E α(V)) for union-find.
pub fn minimum_spanning_tree(graph: &Graph, kind: WeightKind) -> Option<SpanningTree> {
    let n = graph.num_nodes();
    let target = n.saturating_sub(1);

    let mut order: Vec<_> = graph.edges().iter().collect();
    order.sort_by_key(|e| (e.weight_of(kind), e.id));

    let mut ds = DisjointSet::new(n);
    let mut chosen = Vec::with_capacity(target);

    for e in order {
        if chosen.len() == target {
            break;
        }
        if ds.union(e.u, e.v) {
            chosen.push(*e);
        }
    }

    if chosen.len() == target {
        Some(SpanningTree::from_edges(chosen))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;

    #[test]
    fn test_mst_both_weights() {
        // Triangle: 1-2 (1/5), 2-3 (5/1), 1-3 (3/3)
        let mut b = GraphBuilder::new();
        b.add_edge("1", "2", 1, 5).unwrap();
        b.add_edge("2", "3", 5, 1).unwrap();
        b.add_edge("1", "3", 3, 3).unwrap();
        let g = b.build();

        let tw = minimum_spanning_tree(&g, WeightKind::Primary).unwrap();
        assert_eq!(tw.edge_ids(), vec![0, 2]);
        assert_eq!((tw.weight(), tw.mirror_weight()), (4, 8));

        let tm = minimum_spanning_tree(&g, WeightKind::Mirror).unwrap();
        assert_eq!(tm.edge_ids(), vec![1, 2]);
        assert_eq!((tm.weight(), tm.mirror_weight()), (8, 4));
    }

    #[test]
    fn test_ties_broken_by_id() {
        let mut b = GraphBuilder::new();
        b.add_edge("a", "b", 2, 0).unwrap();
        b.add_edge("b", "c", 2, 0).unwrap();
        b.add_edge("a", "c", 2, 0).unwrap();
        let g = b.build();

        let t = minimum_spanning_tree(&g, WeightKind::Primary).unwrap();
        assert_eq!(t.edge_ids(), vec![0, 1]);
    }

    #[test]
    fn test_disconnected_has_no_mst() {
        let mut b = GraphBuilder::new();
        b.add_edge("a", "b", 1, 1).unwrap();
        b.add_edge("c", "d", 1, 1).unwrap();
        assert!(minimum_spanning_tree(&b.build(), WeightKind::Primary).is_none());
    }
}
