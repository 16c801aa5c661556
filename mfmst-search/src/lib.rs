//! Search layer for min-max two-weight spanning trees.
//!
//! Builds on `mfmst-core` to run the full pipeline: MST bounds, bridge check,
//! edge pruning, then one of several search strategies.
//!
//! # Strategies
//!
//! - **Branch-and-bound** (default): depth-first tree growth from node 0,
//!   pruning partial trees whose sums cannot beat the incumbent
//! - **Exhaustive**: every subset of non-bridge edges of the right size,
//!   tested for the tree property with union-find
//! - **Random sampling**: seeded anytime heuristic over the same subsets
//!
//! # Example
//!
//! ```
//! use mfmst_core::GraphBuilder;
//! use mfmst_search::{solve_mfmst, MfmstSettings, SolveStatus};
//!
//! let mut b = GraphBuilder::new();
//! b.add_edge("1", "2", 1, 5).unwrap();
//! b.add_edge("2", "3", 5, 1).unwrap();
//! b.add_edge("1", "3", 3, 3).unwrap();
//! let graph = b.build();
//!
//! let solution = solve_mfmst(&graph, &MfmstSettings::default()).unwrap();
//! assert_eq!(solution.status, SolveStatus::Optimal);
//! assert_eq!(solution.bottleneck, Some(6));
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod model;
pub mod search;
pub mod settings;
pub mod solver;

pub use error::{MfmstError, MfmstResult};
pub use model::{IncumbentTracker, MfmstSolution, SearchStats, SolveStatus};
pub use search::{build_engine, SearchEngine, SearchOutcome, Termination};
pub use settings::{AttachmentOrder, InitialBound, MfmstSettings, PruningMode, SearchStrategy};
pub use solver::solve_mfmst;
