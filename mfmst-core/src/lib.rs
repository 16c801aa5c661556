//! Foundation for min-max two-weight spanning tree optimization.
//!
//! Every edge of an undirected simple graph carries a primary `weight` and a
//! `mirror_weight`. The objective for a spanning tree `T` is the bottleneck
//!
//! ```text
//! B(T) = max(Σ_{e∈T} weight(e), Σ_{e∈T} mirror_weight(e))
//! ```
//!
//! This crate provides everything short of the search itself:
//!
//! - **Graph model**: immutable [`Graph`] with fixed-shape [`Edge`] records and
//!   filtered views for edge removal
//! - **Loader**: the `.uwg` text format with reversed-order mirror pairing
//! - **Bounds**: `(B, B_min)` from the two single-weight MSTs, with early exit
//!   when an MST is provably optimal
//! - **Bridges**: forced edges and their feasibility against a bound
//! - **Pruning**: removal of edges too heavy for any tree within the bound
//!
//! # Example
//!
//! ```
//! use mfmst_core::{estimate_bounds, BoundEstimate, GraphBuilder};
//!
//! let mut b = GraphBuilder::new();
//! b.add_edge("1", "2", 1, 5).unwrap();
//! b.add_edge("2", "3", 5, 1).unwrap();
//! b.add_edge("1", "3", 3, 3).unwrap();
//! let graph = b.build();
//!
//! let est = estimate_bounds(&graph).unwrap();
//! assert_eq!((est.lower(), est.upper()), (4, 8));
//! assert!(matches!(est, BoundEstimate::Bounded(_)));
//! ```

#![warn(missing_docs)]

pub mod bounds;
pub mod bridges;
pub mod error;
pub mod graph;
pub mod loader;
pub mod mst;
pub mod prune;
pub mod tree;
pub mod union_find;

pub use bounds::{estimate_bounds, heaviest_edges_bound, BoundEstimate, Bounds, MstSource};
pub use bridges::{analyze_bridges, find_bridges, BridgeSet};
pub use error::{GraphError, GraphResult, Infeasibility};
pub use graph::{Edge, Graph, GraphBuilder, NodeId, WeightKind};
pub use loader::{load_uwg, parse_uwg};
pub use mst::minimum_spanning_tree;
pub use prune::{prune_edges, PruneOutcome, PruneReason, PrunedEdge, PruningMode};
pub use tree::{bottleneck, SpanningTree};
pub use union_find::DisjointSet;
