//! Configuration settings for the spanning tree solver.

pub use mfmst_core::PruningMode;

use crate::error::{MfmstError, MfmstResult};

/// How candidate trees are explored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchStrategy {
    /// Depth-first tree growth with bound pruning.
    #[default]
    BranchAndBound,

    /// Every (N-1-|bridges|)-subset of non-bridge edges, in id order.
    ///
    /// Capped by `max_iterations`.
    Exhaustive,

    /// Uniformly sampled subsets of non-bridge edges.
    ///
    /// Anytime heuristic: only proves optimality if it hits the lower bound.
    RandomSampling {
        /// Number of subsets to draw.
        iterations: u64,

        /// RNG seed, for reproducible runs.
        seed: u64,
    },
}

/// Order in which a popped node attaches its chosen neighbors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttachmentOrder {
    /// One arrangement per subset, ascending edge id.
    #[default]
    Canonical,

    /// Every ordering of every subset.
    ///
    /// Reaches the same trees as `Canonical` along more paths.
    Permuted,
}

/// Where the search bound B comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InitialBound {
    /// Best bottleneck of the two single-weight MSTs.
    #[default]
    MstPair,

    /// Sum of the N-1 largest primary weights.
    HeaviestEdges,

    /// Caller-chosen bound (decision mode).
    Fixed(u64),
}

/// Solver settings.
#[derive(Debug, Clone)]
pub struct MfmstSettings {
    // === Search strategy ===
    /// Exploration policy.
    pub strategy: SearchStrategy,

    /// Arrangement enumeration for branch-and-bound.
    pub attachment_order: AttachmentOrder,

    /// Edge pruning rule.
    pub pruning: PruningMode,

    /// Source of the initial bound.
    pub initial_bound: InitialBound,

    // === Termination criteria ===
    /// Maximum branch-and-bound nodes to explore (None = unlimited).
    pub max_nodes: Option<u64>,

    /// Maximum subsets the exhaustive strategy tests.
    pub max_iterations: u64,

    /// Time limit in milliseconds (None = unlimited).
    pub time_limit_ms: Option<u64>,

    // === Output ===
    /// Print progress information.
    pub verbose: bool,

    /// Log frequency (print every N nodes).
    pub log_freq: u64,
}

impl Default for MfmstSettings {
    fn default() -> Self {
        Self {
            // Search
            strategy: SearchStrategy::default(),
            attachment_order: AttachmentOrder::default(),
            pruning: PruningMode::default(),
            initial_bound: InitialBound::default(),

            // Termination
            max_nodes: None,
            max_iterations: 10_000_000,
            time_limit_ms: None,

            // Output
            verbose: false,
            log_freq: 10_000,
        }
    }
}

impl MfmstSettings {
    /// Create settings with verbose output enabled.
    pub fn verbose() -> Self {
        Self {
            verbose: true,
            log_freq: 1000,
            ..Self::default()
        }
    }

    /// Set the search strategy.
    pub fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the pruning mode.
    pub fn with_pruning(mut self, pruning: PruningMode) -> Self {
        self.pruning = pruning;
        self
    }

    /// Set the initial bound source.
    pub fn with_initial_bound(mut self, initial_bound: InitialBound) -> Self {
        self.initial_bound = initial_bound;
        self
    }

    /// Set the attachment order.
    pub fn with_attachment_order(mut self, order: AttachmentOrder) -> Self {
        self.attachment_order = order;
        self
    }

    /// Set time limit in seconds.
    pub fn with_time_limit(mut self, seconds: f64) -> Self {
        self.time_limit_ms = Some((seconds * 1000.0) as u64);
        self
    }

    /// Set maximum nodes.
    pub fn with_max_nodes(mut self, nodes: u64) -> Self {
        self.max_nodes = Some(nodes);
        self
    }

    /// Reject inconsistent settings.
    pub fn validate(&self) -> MfmstResult<()> {
        if let SearchStrategy::RandomSampling { iterations: 0, .. } = self.strategy {
            return Err(MfmstError::InvalidSettings(
                "random sampling needs at least one iteration".to_string(),
            ));
        }
        if self.max_iterations == 0 {
            return Err(MfmstError::InvalidSettings(
                "max_iterations must be positive".to_string(),
            ));
        }
        if self.max_nodes == Some(0) {
            return Err(MfmstError::InvalidSettings(
                "max_nodes must be positive".to_string(),
            ));
        }
        if self.log_freq == 0 {
            return Err(MfmstError::InvalidSettings(
                "log_freq must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
