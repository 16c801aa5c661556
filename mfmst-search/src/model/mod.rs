//! Solution and incumbent types.

mod solution;

pub use solution::{IncumbentTracker, MfmstSolution, SearchStats, SolveStatus};
