//! Strategy comparison on random instances.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use mfmst_core::Graph;
use mfmst_search::solve_mfmst;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::generate::{random_edges, InstanceSpec};
use crate::report::{save_json, status_label};
use crate::strategy::{SearchArgs, StrategyChoice};

#[derive(Args, Debug, Clone)]
pub struct CompareArgs {
    /// Number of random instances
    #[arg(long, default_value_t = 10)]
    pub instances: usize,

    /// Nodes per instance
    #[arg(short, long, default_value_t = 8)]
    pub nodes: usize,

    /// Probability of each extra (non-tree) edge
    #[arg(short, long, default_value_t = 0.4)]
    pub density: f64,

    /// Largest edge weight
    #[arg(long, default_value_t = 20)]
    pub max_weight: u64,

    /// Seed of the first instance; instance i uses seed + i
    #[arg(long = "instance-seed", default_value_t = 1)]
    pub instance_seed: u64,

    #[command(flatten)]
    pub search: SearchArgs,

    /// Write all rows as JSON
    #[arg(long, value_name = "PATH")]
    pub json: Option<PathBuf>,
}

/// One (instance, strategy) run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub instance: usize,
    pub strategy: String,
    pub status: String,
    pub bottleneck: Option<u64>,
    pub nodes_explored: u64,
    pub elapsed_ms: f64,
}

/// All rows plus agreement counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonSummary {
    pub rows: Vec<ComparisonRow>,
    /// Instances where every proven-optimal strategy agreed
    pub agreed: usize,
    pub disagreed: usize,
    /// Instances where the random strategy matched the optimum
    pub random_hits: usize,
}

fn compare_instance(
    index: usize,
    graph: &Graph,
    args: &CompareArgs,
    verbose: bool,
) -> Result<Vec<ComparisonRow>> {
    let mut rows = Vec::new();
    for choice in StrategyChoice::all() {
        let settings = args.search.settings(choice, verbose);
        let start = Instant::now();
        let solution = solve_mfmst(graph, &settings)
            .with_context(|| format!("instance {} with {}", index, choice.name()))?;
        let elapsed = start.elapsed();

        rows.push(ComparisonRow {
            instance: index,
            strategy: choice.name().to_string(),
            status: status_label(&solution.status).to_string(),
            bottleneck: solution.bottleneck,
            nodes_explored: solution.stats.nodes_explored,
            elapsed_ms: elapsed.as_secs_f64() * 1000.0,
        });
    }
    Ok(rows)
}

/// Tally agreement between strategies, one instance at a time.
fn summarize(rows: Vec<ComparisonRow>) -> ComparisonSummary {
    let mut agreed = 0;
    let mut disagreed = 0;
    let mut random_hits = 0;

    let mut instances: Vec<usize> = rows.iter().map(|r| r.instance).collect();
    instances.dedup();

    for instance in instances {
        let group: Vec<&ComparisonRow> = rows.iter().filter(|r| r.instance == instance).collect();
        let proven: Vec<Option<u64>> = group
            .iter()
            .filter(|r| r.status == "optimal" && r.strategy != StrategyChoice::Random.name())
            .map(|r| r.bottleneck)
            .collect();

        if proven.windows(2).all(|w| w[0] == w[1]) {
            agreed += 1;
        } else {
            disagreed += 1;
            log::warn!("Instance {}: strategies disagree: {:?}", instance, proven);
        }

        let optimum = proven.first().copied().flatten();
        let random = group
            .iter()
            .find(|r| r.strategy == StrategyChoice::Random.name())
            .and_then(|r| r.bottleneck);
        if optimum.is_some() && random == optimum {
            random_hits += 1;
        }
    }

    ComparisonSummary {
        rows,
        agreed,
        disagreed,
        random_hits,
    }
}

pub fn run(args: &CompareArgs, verbose: bool) -> Result<()> {
    anyhow::ensure!(args.nodes >= 2, "need at least 2 nodes, got {}", args.nodes);
    anyhow::ensure!(
        (0.0..=1.0).contains(&args.density),
        "density must be in [0, 1], got {}",
        args.density
    );

    let spec = InstanceSpec {
        nodes: args.nodes,
        density: args.density,
        max_weight: args.max_weight,
    };

    println!(
        "{:>8} {:>12} {:>16} {:>10} {:>12} {:>10}",
        "instance", "strategy", "status", "B*", "nodes", "time(ms)"
    );
    println!("{}", "-".repeat(73));

    let mut rows = Vec::new();
    for i in 0..args.instances {
        let mut rng = ChaCha8Rng::seed_from_u64(args.instance_seed + i as u64);
        let edges = random_edges(&mut rng, &spec);
        let graph = Graph::from_weighted_edges(spec.nodes, &edges)
            .with_context(|| format!("Failed to build instance {}", i))?;

        for row in compare_instance(i, &graph, args, verbose)? {
            println!(
                "{:>8} {:>12} {:>16} {:>10} {:>12} {:>10.3}",
                row.instance,
                row.strategy,
                row.status,
                row.bottleneck
                    .map_or_else(|| "-".to_string(), |v| v.to_string()),
                row.nodes_explored,
                row.elapsed_ms
            );
            rows.push(row);
        }
    }

    let summary = summarize(rows);
    println!();
    println!(
        "Agreement: {}/{} instances, random strategy matched optimum on {}",
        summary.agreed,
        summary.agreed + summary.disagreed,
        summary.random_hits
    );

    if let Some(path) = &args.json {
        save_json(&summary, path)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        compare: CompareArgs,
    }

    fn row(instance: usize, strategy: StrategyChoice, status: &str, b: Option<u64>) -> ComparisonRow {
        ComparisonRow {
            instance,
            strategy: strategy.name().to_string(),
            status: status.to_string(),
            bottleneck: b,
            nodes_explored: 0,
            elapsed_ms: 0.0,
        }
    }

    #[test]
    fn test_summarize_counts() {
        let rows = vec![
            row(0, StrategyChoice::Bnb, "optimal", Some(6)),
            row(0, StrategyChoice::Exhaustive, "optimal", Some(6)),
            row(0, StrategyChoice::Random, "iteration-limit", Some(6)),
            row(1, StrategyChoice::Bnb, "optimal", Some(9)),
            row(1, StrategyChoice::Exhaustive, "optimal", Some(10)),
            row(1, StrategyChoice::Random, "iteration-limit", Some(12)),
        ];
        let s = summarize(rows);
        assert_eq!((s.agreed, s.disagreed, s.random_hits), (1, 1, 1));
    }

    #[test]
    fn test_compare_instance_runs_every_strategy() {
        let spec = InstanceSpec {
            nodes: 6,
            density: 0.5,
            max_weight: 10,
        };
        let edges = random_edges(&mut ChaCha8Rng::seed_from_u64(3), &spec);
        let graph = Graph::from_weighted_edges(spec.nodes, &edges).unwrap();

        let cli = TestCli::parse_from(["test", "--iterations", "200"]);

        let rows = compare_instance(0, &graph, &cli.compare, false).unwrap();
        assert_eq!(rows.len(), 3);
        let summary = summarize(rows);
        assert_eq!(summary.disagreed, 0);
    }
}
