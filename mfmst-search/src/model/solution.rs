//! Solution types.

use mfmst_core::{Infeasibility, PrunedEdge, SpanningTree};

/// Status of the solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    /// Optimal tree found and proven.
    Optimal,

    /// Node limit reached, best tree returned.
    NodeLimit,

    /// Time limit reached, best tree returned.
    TimeLimit,

    /// Iteration budget spent, best tree returned.
    IterationLimit,

    /// No tree can meet the bound.
    Infeasible(Infeasibility),
}

impl SolveStatus {
    /// Returns true if a spanning tree was found.
    pub fn has_solution(&self) -> bool {
        matches!(
            self,
            SolveStatus::Optimal
                | SolveStatus::NodeLimit
                | SolveStatus::TimeLimit
                | SolveStatus::IterationLimit
        )
    }

    /// Returns true if optimality was proven.
    pub fn is_optimal(&self) -> bool {
        matches!(self, SolveStatus::Optimal)
    }

    /// Infeasibility reason, if any.
    pub fn infeasibility(&self) -> Option<Infeasibility> {
        match self {
            SolveStatus::Infeasible(reason) => Some(*reason),
            _ => None,
        }
    }
}

/// Search counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Branch-and-bound nodes expanded, or subsets tested.
    pub nodes_explored: u64,

    /// Branches or subsets discarded by the bound.
    pub nodes_pruned: u64,

    /// Times the incumbent improved during search.
    pub incumbent_updates: u64,

    /// Wall time in milliseconds.
    pub elapsed_ms: u64,
}

/// Complete solve result with diagnostics.
#[derive(Debug, Clone)]
pub struct MfmstSolution {
    /// Solve status.
    pub status: SolveStatus,

    /// Best tree found.
    pub tree: Option<SpanningTree>,

    /// Bottleneck of `tree` (B*).
    pub bottleneck: Option<u64>,

    /// Bound the search started from (B₀).
    pub upper_bound: Option<u64>,

    /// Proven lower bound (B_min).
    pub lower_bound: Option<u64>,

    /// Forced edge ids.
    pub bridges: Vec<usize>,

    /// Edges removed before search, with reasons.
    pub pruned_edges: Vec<PrunedEdge>,

    /// True when an MST was optimal and no search ran.
    pub short_circuit: bool,

    /// Search counters.
    pub stats: SearchStats,
}

impl MfmstSolution {
    /// Solution with no tree.
    pub fn infeasible(reason: Infeasibility) -> Self {
        Self {
            status: SolveStatus::Infeasible(reason),
            tree: None,
            bottleneck: None,
            upper_bound: None,
            lower_bound: None,
            bridges: Vec::new(),
            pruned_edges: Vec::new(),
            short_circuit: false,
            stats: SearchStats::default(),
        }
    }

    /// Solution with a proven-optimal tree.
    pub fn optimal(tree: SpanningTree) -> Self {
        let value = tree.bottleneck();
        Self {
            status: SolveStatus::Optimal,
            bottleneck: Some(value),
            tree: Some(tree),
            upper_bound: Some(value),
            lower_bound: Some(value),
            bridges: Vec::new(),
            pruned_edges: Vec::new(),
            short_circuit: false,
            stats: SearchStats::default(),
        }
    }

    /// Whether a tree was found.
    pub fn is_feasible(&self) -> bool {
        self.tree.is_some()
    }

    /// Whether the tree is proven optimal.
    pub fn is_optimal(&self) -> bool {
        self.status.is_optimal()
    }

    /// Infeasibility reason, if any.
    pub fn infeasibility(&self) -> Option<Infeasibility> {
        self.status.infeasibility()
    }
}

/// Tracks the best known spanning tree (incumbent).
///
/// Before the first tree is known, trees are admitted up to a fixed bound.
/// Afterwards only strict improvements are admitted.
#[derive(Debug, Clone)]
pub struct IncumbentTracker {
    /// Current best tree (if any).
    pub tree: Option<SpanningTree>,

    /// Admission bound while no tree is known.
    pub bound: u64,

    /// Number of times the incumbent was improved.
    pub update_count: u64,
}

impl IncumbentTracker {
    /// Empty tracker admitting trees with bottleneck ≤ `bound`.
    pub fn new(bound: u64) -> Self {
        Self {
            tree: None,
            bound,
            update_count: 0,
        }
    }

    /// Tracker starting from a known tree.
    pub fn seeded(tree: SpanningTree) -> Self {
        Self {
            bound: tree.bottleneck(),
            tree: Some(tree),
            update_count: 0,
        }
    }

    /// Check if we have an incumbent.
    pub fn has_incumbent(&self) -> bool {
        self.tree.is_some()
    }

    /// Bottleneck of the incumbent.
    pub fn value(&self) -> Option<u64> {
        self.tree.as_ref().map(SpanningTree::bottleneck)
    }

    /// Whether partial sums can still lead to an admissible tree.
    ///
    /// Weights are non-negative, so sums only grow along a branch.
    #[inline]
    pub fn admits(&self, weight: u64, mirror_weight: u64) -> bool {
        match self.value() {
            Some(best) => weight < best && mirror_weight < best,
            None => weight <= self.bound && mirror_weight <= self.bound,
        }
    }

    /// Try to update the incumbent with a complete tree.
    ///
    /// Returns true if the incumbent was replaced.
    pub fn update(&mut self, tree: SpanningTree) -> bool {
        if !self.admits(tree.weight(), tree.mirror_weight()) {
            return false;
        }
        self.bound = tree.bottleneck();
        self.tree = Some(tree);
        self.update_count += 1;
        true
    }

    /// Whether the incumbent has reached `lower` and is therefore optimal.
    pub fn reached(&self, lower: u64) -> bool {
        self.value().is_some_and(|v| v <= lower)
    }
}
