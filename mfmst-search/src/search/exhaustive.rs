//! Exhaustive enumeration of candidate edge subsets.

use std::time::Instant;

use mfmst_core::Graph;

use super::{SearchEngine, SearchOutcome, SubsetEvaluator, Termination};
use crate::model::{IncumbentTracker, SearchStats};
use crate::settings::MfmstSettings;

/// Tests every `k`-subset of non-bridge edges in lexicographic id order.
///
/// Correct but combinatorial; useful as a baseline for the other strategies.
pub struct ExhaustiveSearch<'g> {
    evaluator: SubsetEvaluator<'g>,

    /// Incumbent tree tracker.
    pub incumbent: IncumbentTracker,

    lower_bound: u64,
    settings: MfmstSettings,
}

impl<'g> ExhaustiveSearch<'g> {
    /// Create a new exhaustive search over `graph`.
    pub fn new(
        graph: &'g Graph,
        lower_bound: u64,
        incumbent: IncumbentTracker,
        settings: MfmstSettings,
    ) -> Self {
        Self {
            evaluator: SubsetEvaluator::new(graph),
            incumbent,
            lower_bound,
            settings,
        }
    }
}

/// Advance `c` to the next `k`-combination of `0..n`. Returns false after the last.
fn next_combination(c: &mut [usize], n: usize) -> bool {
    let k = c.len();
    let mut i = k;
    while i > 0 {
        i -= 1;
        if c[i] < n - k + i {
            c[i] += 1;
            for j in i + 1..k {
                c[j] = c[j - 1] + 1;
            }
            return true;
        }
    }
    false
}

impl SearchEngine for ExhaustiveSearch<'_> {
    fn name(&self) -> &'static str {
        "exhaustive"
    }

    fn search(&mut self) -> SearchOutcome {
        let start = Instant::now();
        let mut stats = SearchStats::default();
        let initial_updates = self.incumbent.update_count;

        let termination = match self.evaluator.picks() {
            _ if self.incumbent.reached(self.lower_bound) => Termination::LowerBoundReached,
            None => Termination::Exhausted,
            Some(k) => {
                let n = self.evaluator.pool_len();
                let mut combo: Vec<usize> = (0..k).collect();

                loop {
                    if stats.nodes_explored >= self.settings.max_iterations {
                        break Termination::IterationLimit;
                    }
                    if self
                        .settings
                        .time_limit_ms
                        .is_some_and(|limit| start.elapsed().as_millis() as u64 >= limit)
                    {
                        break Termination::TimeLimit;
                    }
                    stats.nodes_explored += 1;

                    match self.evaluator.evaluate(&combo, &self.incumbent) {
                        Ok(tree) => {
                            let value = tree.bottleneck();
                            if self.incumbent.update(tree) && self.settings.verbose {
                                log::info!(
                                    "New incumbent: bottleneck={} after {} subsets",
                                    value,
                                    stats.nodes_explored
                                );
                            }
                            if self.incumbent.reached(self.lower_bound) {
                                break Termination::LowerBoundReached;
                            }
                        }
                        Err(true) => stats.nodes_pruned += 1,
                        Err(false) => {}
                    }

                    if !next_combination(&mut combo, n) {
                        break Termination::Exhausted;
                    }
                }
            }
        };

        stats.incumbent_updates = self.incumbent.update_count - initial_updates;
        stats.elapsed_ms = start.elapsed().as_millis() as u64;

        log::debug!(
            "Exhaustive search tested {} subsets ({} rejected by bound)",
            stats.nodes_explored,
            stats.nodes_pruned
        );

        SearchOutcome {
            best: self.incumbent.tree.clone(),
            termination,
            stats,
        }
    }
}
