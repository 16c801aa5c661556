//! Random subset sampling.

use std::time::Instant;

use mfmst_core::Graph;
use rand::seq::index;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::{SearchEngine, SearchOutcome, SubsetEvaluator, Termination};
use crate::model::{IncumbentTracker, SearchStats};
use crate::settings::MfmstSettings;

/// Draws uniform `k`-subsets of non-bridge edges and keeps the best tree.
///
/// Runs are reproducible for a fixed seed. The result is only proven optimal
/// when the incumbent reaches the lower bound.
pub struct RandomSampler<'g> {
    evaluator: SubsetEvaluator<'g>,

    /// Incumbent tree tracker.
    pub incumbent: IncumbentTracker,

    lower_bound: u64,
    iterations: u64,
    rng: ChaCha8Rng,
    settings: MfmstSettings,
}

impl<'g> RandomSampler<'g> {
    /// Create a sampler drawing `iterations` subsets from a `seed`ed stream.
    pub fn new(
        graph: &'g Graph,
        lower_bound: u64,
        incumbent: IncumbentTracker,
        iterations: u64,
        seed: u64,
        settings: MfmstSettings,
    ) -> Self {
        Self {
            evaluator: SubsetEvaluator::new(graph),
            incumbent,
            lower_bound,
            iterations,
            rng: ChaCha8Rng::seed_from_u64(seed),
            settings,
        }
    }

    fn draw(&mut self, k: usize) -> Vec<usize> {
        if k == 0 {
            return Vec::new();
        }
        let mut picks = index::sample(&mut self.rng, self.evaluator.pool_len(), k).into_vec();
        picks.sort_unstable();
        picks
    }
}

impl SearchEngine for RandomSampler<'_> {
    fn name(&self) -> &'static str {
        "random-sampling"
    }

    fn search(&mut self) -> SearchOutcome {
        let start = Instant::now();
        let mut stats = SearchStats::default();
        let initial_updates = self.incumbent.update_count;

        let termination = match self.evaluator.picks() {
            _ if self.incumbent.reached(self.lower_bound) => Termination::LowerBoundReached,
            None => Termination::Exhausted,
            Some(k) => loop {
                if stats.nodes_explored >= self.iterations {
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

                let picks = self.draw(k);
                match self.evaluator.evaluate(&picks, &self.incumbent) {
                    Ok(tree) => {
                        let value = tree.bottleneck();
                        if self.incumbent.update(tree) && self.settings.verbose {
                            log::info!(
                                "New incumbent: bottleneck={} at draw {}",
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

                if self.settings.verbose && stats.nodes_explored % self.settings.log_freq == 0 {
                    log::info!(
                        "Draws: {} | Incumbent: {}",
                        stats.nodes_explored,
                        self.incumbent
                            .value()
                            .map_or_else(|| "-".to_string(), |v| v.to_string()),
                    );
                }
            },
        };

        stats.incumbent_updates = self.incumbent.update_count - initial_updates;
        stats.elapsed_ms = start.elapsed().as_millis() as u64;

        SearchOutcome {
            best: self.incumbent.tree.clone(),
            termination,
            stats,
        }
    }
}
