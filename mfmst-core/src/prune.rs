//! Removal of edges too heavy for any tree within the bound.

use std::fmt;

use crate::error::Infeasibility;
use crate::graph::{Edge, Graph};

/// Which weights an edge is tested on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PruningMode {
    /// Drop edges whose primary weight exceeds the bound.
    #[default]
    PrimaryOnly,

    /// Also drop edges whose mirror weight exceeds the bound.
    Symmetric,
}

/// Why an edge was removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PruneReason {
    /// Primary weight above the bound.
    WeightExceedsBound,
    /// Mirror weight above the bound (symmetric mode only).
    MirrorWeightExceedsBound,
}

impl fmt::Display for PruneReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PruneReason::WeightExceedsBound => write!(f, "weight exceeds bound"),
            PruneReason::MirrorWeightExceedsBound => write!(f, "mirror weight exceeds bound"),
        }
    }
}

/// A removed edge and the reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrunedEdge {
    /// The edge as it was in the input graph.
    pub edge: Edge,
    /// Why it was removed.
    pub reason: PruneReason,
}

/// Filtered graph plus the removal log.
#[derive(Debug, Clone)]
pub struct PruneOutcome {
    /// Graph without the removed edges.
    pub graph: Graph,
    /// Removed edges, ascending id.
    pub removed: Vec<PrunedEdge>,
}

fn prune_reason(edge: &Edge, bound: u64, mode: PruningMode) -> Option<PruneReason> {
    if edge.weight > bound {
        return Some(PruneReason::WeightExceedsBound);
    }
    if mode == PruningMode::Symmetric && edge.mirror_weight > bound {
        return Some(PruneReason::MirrorWeightExceedsBound);
    }
    None
}

/// Remove edges that cannot appear in a tree with bottleneck ≤ `bound`,
/// then re-check connectivity.
///
/// The input graph is left untouched; the result is a new view.
pub fn prune_edges(
    graph: &Graph,
    bound: u64,
    mode: PruningMode,
) -> Result<PruneOutcome, Infeasibility> {
    let removed: Vec<PrunedEdge> = graph
        .edges()
        .iter()
        .filter_map(|e| {
            prune_reason(e, bound, mode).map(|reason| PrunedEdge { edge: *e, reason })
        })
        .collect();

    for p in &removed {
        log::debug!(
            "Edge ({},{}) removed: {}",
            graph.label(p.edge.u),
            graph.label(p.edge.v),
            p.reason
        );
    }

    let ids: Vec<usize> = removed.iter().map(|p| p.edge.id).collect();
    let pruned = graph.without_edges(&ids);

    if !pruned.is_connected() {
        return Err(Infeasibility::DisconnectedAfterPruning);
    }

    Ok(PruneOutcome {
        graph: pruned,
        removed,
    })
}
