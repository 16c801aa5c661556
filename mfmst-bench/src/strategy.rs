//! Search options shared by the `solve` and `compare` commands.

use clap::{Args, ValueEnum};
use mfmst_search::{AttachmentOrder, InitialBound, MfmstSettings, PruningMode, SearchStrategy};

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrategyChoice {
    /// Depth-first branch-and-bound
    Bnb,
    /// Every subset of non-bridge edges
    Exhaustive,
    /// Seeded random subsets
    Random,
}

impl StrategyChoice {
    pub fn all() -> [StrategyChoice; 3] {
        [
            StrategyChoice::Bnb,
            StrategyChoice::Exhaustive,
            StrategyChoice::Random,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            StrategyChoice::Bnb => "bnb",
            StrategyChoice::Exhaustive => "exhaustive",
            StrategyChoice::Random => "random",
        }
    }

    pub fn to_strategy(self, iterations: u64, seed: u64) -> SearchStrategy {
        match self {
            StrategyChoice::Bnb => SearchStrategy::BranchAndBound,
            StrategyChoice::Exhaustive => SearchStrategy::Exhaustive,
            StrategyChoice::Random => SearchStrategy::RandomSampling { iterations, seed },
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// Search strategy
    #[arg(long, value_enum, default_value_t = StrategyChoice::Bnb)]
    pub strategy: StrategyChoice,

    /// Draws for the random strategy
    #[arg(long, default_value_t = 10_000)]
    pub iterations: u64,

    /// Seed for the random strategy
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Also prune edges whose mirror weight exceeds the bound
    #[arg(long)]
    pub symmetric: bool,

    /// Enumerate every attachment order in branch-and-bound
    #[arg(long)]
    pub permuted: bool,

    /// Search for trees with bottleneck at most B
    #[arg(long, value_name = "B", conflicts_with = "heaviest")]
    pub bound: Option<u64>,

    /// Start from the sum of the N-1 heaviest weights
    #[arg(long)]
    pub heaviest: bool,

    /// Branch-and-bound node limit
    #[arg(long)]
    pub max_nodes: Option<u64>,

    /// Subset limit for the exhaustive strategy
    #[arg(long)]
    pub max_iterations: Option<u64>,

    /// Time limit in seconds
    #[arg(long, value_name = "SECS")]
    pub time_limit: Option<f64>,
}

impl SearchArgs {
    /// Solver settings for `strategy`.
    pub fn settings(&self, strategy: StrategyChoice, verbose: bool) -> MfmstSettings {
        let mut settings = if verbose {
            MfmstSettings::verbose()
        } else {
            MfmstSettings::default()
        };

        settings.strategy = strategy.to_strategy(self.iterations, self.seed);
        if self.symmetric {
            settings.pruning = PruningMode::Symmetric;
        }
        if self.permuted {
            settings.attachment_order = AttachmentOrder::Permuted;
        }
        settings.initial_bound = match (self.bound, self.heaviest) {
            (Some(b), _) => InitialBound::Fixed(b),
            (None, true) => InitialBound::HeaviestEdges,
            (None, false) => InitialBound::MstPair,
        };
        settings.max_nodes = self.max_nodes;
        if let Some(max) = self.max_iterations {
            settings.max_iterations = max;
        }
        if let Some(secs) = self.time_limit {
            settings = settings.with_time_limit(secs);
        }

        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        search: SearchArgs,
    }

    #[test]
    fn test_defaults() {
        let cli = TestCli::parse_from(["test"]);
        let s = cli.search.settings(cli.search.strategy, false);
        assert_eq!(s.strategy, SearchStrategy::BranchAndBound);
        assert_eq!(s.initial_bound, InitialBound::MstPair);
        assert_eq!(s.pruning, PruningMode::PrimaryOnly);
        assert!(!s.verbose);
    }

    #[test]
    fn test_flags_map_to_settings() {
        let cli = TestCli::parse_from([
            "test",
            "--strategy",
            "random",
            "--iterations",
            "500",
            "--seed",
            "9",
            "--symmetric",
            "--bound",
            "12",
            "--time-limit",
            "2",
        ]);
        let s = cli.search.settings(cli.search.strategy, true);
        assert_eq!(
            s.strategy,
            SearchStrategy::RandomSampling {
                iterations: 500,
                seed: 9
            }
        );
        assert_eq!(s.pruning, PruningMode::Symmetric);
        assert_eq!(s.initial_bound, InitialBound::Fixed(12));
        assert_eq!(s.time_limit_ms, Some(2000));
        assert!(s.verbose);
    }

    #[test]
    fn test_bound_conflicts_with_heaviest() {
        assert!(TestCli::try_parse_from(["test", "--bound", "3", "--heaviest"]).is_err());
    }
}
