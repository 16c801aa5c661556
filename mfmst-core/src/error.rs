//! Error types for graph construction and feasibility analysis.

use thiserror::Error;

/// Errors raised while building a graph from external input.
///
/// Every variant is fatal: the input cannot be turned into a graph.
#[derive(Error, Debug)]
pub enum GraphError {
    /// Input ended before the node/edge count header.
    #[error("Missing header: expected {0}")]
    MissingHeader(&'static str),

    /// A header line is not a non-negative integer.
    #[error("Invalid header on line {line}: {value:?}")]
    InvalidHeader {
        /// 1-based line number.
        line: usize,
        /// Offending text.
        value: String,
    },

    /// Declared edge count differs from the number of edge lines.
    #[error("Edge count mismatch: header declares {declared}, found {found} edge lines")]
    EdgeCountMismatch {
        /// Edge count from the header.
        declared: usize,
        /// Edge lines actually supplied.
        found: usize,
    },

    /// Declared node count differs from the distinct endpoints supplied.
    #[error("Node count mismatch: header declares {declared}, edges reference {found} nodes")]
    NodeCountMismatch {
        /// Node count from the header.
        declared: usize,
        /// Distinct node labels in the edge lines.
        found: usize,
    },

    /// An edge line is not `<u> <v> <weight>`.
    #[error("Invalid edge on line {line}: {reason}")]
    InvalidEdgeLine {
        /// 1-based line number.
        line: usize,
        /// What is wrong with it.
        reason: String,
    },

    /// Edge weight below zero.
    #[error("Negative weight on line {line}")]
    NegativeWeight {
        /// 1-based line number (0 when built programmatically).
        line: usize,
    },

    /// Edge joins a node to itself.
    #[error("Self-loop on line {line}")]
    SelfLoop {
        /// 1-based line number (0 when built programmatically).
        line: usize,
    },

    /// Second edge between the same pair of nodes.
    #[error("Duplicate edge on line {line}")]
    DuplicateEdge {
        /// 1-based line number (0 when built programmatically).
        line: usize,
    },

    /// Weight totals over all edges do not fit in 64 bits.
    #[error("Weight overflow on line {line}: edge weights sum past {max}", max = u64::MAX)]
    WeightOverflow {
        /// 1-based line number (0 when built programmatically).
        line: usize,
    },

    /// Reading the input failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for graph construction.
pub type GraphResult<T> = Result<T, GraphError>;

/// Why no spanning tree can meet the current bound.
///
/// Terminal for a single optimization call but never fatal to the process.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Infeasibility {
    /// The input graph is not connected.
    #[error("disconnected")]
    Disconnected,

    /// Forced (bridge) edges alone exceed the bound.
    #[error("bound-too-low-bridges (bound {bound}, bridge weight {weight}, bridge mirror weight {mirror_weight})")]
    BridgeBoundTooLow {
        /// Bound that was checked.
        bound: u64,
        /// Primary weight summed over all bridges.
        weight: u64,
        /// Mirror weight summed over all bridges.
        mirror_weight: u64,
    },

    /// Removing over-weight edges disconnected the graph.
    #[error("disconnected-after-pruning")]
    DisconnectedAfterPruning,

    /// Search finished without reaching a complete spanning tree within the bound.
    #[error("no-spanning-tree-found")]
    NoSpanningTreeFound,
}

impl Infeasibility {
    /// Stable machine-readable reason code.
    pub fn reason(&self) -> &'static str {
        match self {
            Infeasibility::Disconnected => "disconnected",
            Infeasibility::BridgeBoundTooLow { .. } => "bound-too-low-bridges",
            Infeasibility::DisconnectedAfterPruning => "disconnected-after-pruning",
            Infeasibility::NoSpanningTreeFound => "no-spanning-tree-found",
        }
    }
}
