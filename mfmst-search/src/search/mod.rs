//! Search strategies over spanning trees.
//!
//! All strategies share one contract: given the pruned graph, a proven lower
//! bound and an incumbent tracker, return the best tree they can find and
//! why they stopped.

mod attach;
mod combination;
mod exhaustive;
mod node;
mod sampling;
mod tree;

pub use attach::{enumerate_attachments, Attachment};
pub use combination::SubsetEvaluator;
pub use exhaustive::ExhaustiveSearch;
pub use node::SearchNode;
pub use sampling::RandomSampler;
pub use tree::BranchAndBound;

use mfmst_core::{Graph, SpanningTree};

use crate::model::{IncumbentTracker, SearchStats};
use crate::settings::{MfmstSettings, SearchStrategy};

/// Why a search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Search space fully explored.
    Exhausted,

    /// Incumbent reached the lower bound.
    LowerBoundReached,

    /// Node limit hit.
    NodeLimit,

    /// Time limit hit.
    TimeLimit,

    /// Iteration budget spent.
    IterationLimit,
}

impl Termination {
    /// Whether the incumbent (if any) is proven optimal.
    pub fn is_proof(&self) -> bool {
        matches!(self, Termination::Exhausted | Termination::LowerBoundReached)
    }
}

/// Result of a search run.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Best tree known at termination (seeded or found).
    pub best: Option<SpanningTree>,

    /// Why the search stopped.
    pub termination: Termination,

    /// Counters.
    pub stats: SearchStats,
}

/// A tree search strategy.
pub trait SearchEngine {
    /// Short name for logging.
    fn name(&self) -> &'static str;

    /// Run to termination.
    fn search(&mut self) -> SearchOutcome;
}

/// Build the engine selected by `settings.strategy`.
pub fn build_engine<'g>(
    graph: &'g Graph,
    lower_bound: u64,
    incumbent: IncumbentTracker,
    settings: &MfmstSettings,
) -> Box<dyn SearchEngine + 'g> {
    match settings.strategy {
        SearchStrategy::BranchAndBound => Box::new(BranchAndBound::new(
            graph,
            lower_bound,
            incumbent,
            settings.clone(),
        )),
        SearchStrategy::Exhaustive => Box::new(ExhaustiveSearch::new(
            graph,
            lower_bound,
            incumbent,
            settings.clone(),
        )),
        SearchStrategy::RandomSampling { iterations, seed } => Box::new(RandomSampler::new(
            graph,
            lower_bound,
            incumbent,
            iterations,
            seed,
            settings.clone(),
        )),
    }
}
