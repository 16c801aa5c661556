//! End-to-end solve: bounds, bridges, pruning, search.

use std::time::Instant;

use mfmst_core::{
    analyze_bridges, estimate_bounds, find_bridges, heaviest_edges_bound, prune_edges,
    BoundEstimate, Graph, Infeasibility,
};

use crate::error::MfmstResult;
use crate::model::{IncumbentTracker, MfmstSolution, SolveStatus};
use crate::search::{build_engine, Termination};
use crate::settings::{InitialBound, MfmstSettings};

/// Find a spanning tree of `graph` minimizing `max(Σ weight, Σ mirror_weight)`.
///
/// Infeasibility is reported through [`SolveStatus::Infeasible`] with its
/// reason; only inconsistent settings produce an `Err`.
///
/// # Pipeline
///
/// 1. Bound estimation from the two single-weight MSTs (may return at once)
/// 2. Bridge check against the search bound
/// 3. Pruning of edges too heavy for the bound, connectivity and bridge re-check
/// 4. Search with the selected strategy
pub fn solve_mfmst(graph: &Graph, settings: &MfmstSettings) -> MfmstResult<MfmstSolution> {
    settings.validate()?;
    let start = Instant::now();

    let finish = |mut solution: MfmstSolution| -> MfmstResult<MfmstSolution> {
        solution.stats.elapsed_ms = start.elapsed().as_millis() as u64;
        Ok(solution)
    };

    if settings.verbose {
        log::info!(
            "Solving: {} nodes, {} edges, strategy {:?}",
            graph.num_nodes(),
            graph.num_edges(),
            settings.strategy
        );
    }

    // Stage 1: bounds
    let estimate = match estimate_bounds(graph) {
        Ok(estimate) => estimate,
        Err(reason) => return finish(MfmstSolution::infeasible(reason)),
    };
    let lower = estimate.lower();

    let bound = match settings.initial_bound {
        InitialBound::MstPair => estimate.upper(),
        InitialBound::HeaviestEdges => heaviest_edges_bound(graph),
        InitialBound::Fixed(b) => b,
    };

    if let BoundEstimate::Optimal {
        tree,
        bottleneck,
        source,
    } = &estimate
    {
        if *bottleneck <= bound {
            if settings.verbose {
                log::info!("{:?} MST is optimal: bottleneck={}", source, bottleneck);
            }
            let mut solution = MfmstSolution::optimal(tree.clone());
            solution.short_circuit = true;
            solution.bridges = find_bridges(graph).ids().to_vec();
            return finish(solution);
        }
    }

    if settings.verbose {
        log::info!(
            "Bounds: search bound {} (MST pair upper {}), lower {}",
            bound,
            estimate.upper(),
            lower
        );
    }

    let infeasible = |reason: Infeasibility| {
        let mut solution = MfmstSolution::infeasible(reason);
        solution.upper_bound = Some(bound);
        solution.lower_bound = Some(lower);
        solution
    };

    // Stage 2: forced edges
    let bridges = match analyze_bridges(graph, bound) {
        Ok(bridges) => bridges,
        Err(reason) => return finish(infeasible(reason)),
    };

    if settings.verbose {
        log::info!(
            "Bridges: {} forced edges, sums ({}, {})",
            bridges.len(),
            bridges.weight(),
            bridges.mirror_weight()
        );
    }

    // Stage 3: pruning
    let pruned = match prune_edges(graph, bound, settings.pruning) {
        Ok(pruned) => pruned,
        Err(reason) => {
            let mut solution = infeasible(reason);
            solution.bridges = bridges.ids().to_vec();
            return finish(solution);
        }
    };

    if settings.verbose {
        log::info!(
            "Pruning ({:?}): removed {} of {} edges",
            settings.pruning,
            pruned.removed.len(),
            graph.num_edges()
        );
    }

    // Pruning can turn cycle edges into bridges
    let bridges = match analyze_bridges(&pruned.graph, bound) {
        Ok(forced) => {
            if settings.verbose && forced.len() > bridges.len() {
                log::info!(
                    "Bridges after pruning: {} forced edges, sums ({}, {})",
                    forced.len(),
                    forced.weight(),
                    forced.mirror_weight()
                );
            }
            forced
        }
        Err(reason) => {
            let mut solution = infeasible(reason);
            solution.bridges = find_bridges(&pruned.graph).ids().to_vec();
            solution.pruned_edges = pruned.removed.clone();
            return finish(solution);
        }
    };

    let mut solution = infeasible(Infeasibility::NoSpanningTreeFound);
    solution.bridges = bridges.ids().to_vec();
    solution.pruned_edges = pruned.removed.clone();

    // No tree beats the lower bound
    if bound < lower {
        return finish(solution);
    }

    // The MST incumbent is only usable when it meets the bound
    let incumbent = if estimate.upper() <= bound {
        IncumbentTracker::seeded(estimate.tree().clone())
    } else {
        IncumbentTracker::new(bound)
    };

    if incumbent.reached(lower) {
        if settings.verbose {
            log::info!("MST incumbent meets the lower bound {}", lower);
        }
        solution.status = SolveStatus::Optimal;
        solution.bottleneck = incumbent.value();
        solution.tree = incumbent.tree;
        return finish(solution);
    }

    // Stage 4: search
    let mut engine = build_engine(&pruned.graph, lower, incumbent, settings);
    log::debug!("Running {} search", engine.name());
    let outcome = engine.search();

    solution.stats = outcome.stats;
    solution.status = match (&outcome.best, outcome.termination) {
        (None, _) => SolveStatus::Infeasible(Infeasibility::NoSpanningTreeFound),
        (Some(_), Termination::Exhausted | Termination::LowerBoundReached) => SolveStatus::Optimal,
        (Some(_), Termination::NodeLimit) => SolveStatus::NodeLimit,
        (Some(_), Termination::TimeLimit) => SolveStatus::TimeLimit,
        (Some(_), Termination::IterationLimit) => SolveStatus::IterationLimit,
    };
    solution.bottleneck = outcome.best.as_ref().map(|t| t.bottleneck());
    solution.tree = outcome.best;

    if settings.verbose {
        log::info!(
            "Search finished ({:?}): status {:?}, bottleneck {}, {} nodes, {} pruned",
            outcome.termination,
            solution.status,
            solution
                .bottleneck
                .map_or_else(|| "-".to_string(), |v| v.to_string()),
            solution.stats.nodes_explored,
            solution.stats.nodes_pruned
        );
    }

    finish(solution)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SearchStrategy;
    use mfmst_core::{GraphBuilder, PruneReason, PruningMode};

    fn triangle() -> Graph {
        let mut b = GraphBuilder::new();
        b.add_edge("1", "2", 1, 5).unwrap();
        b.add_edge("2", "3", 5, 1).unwrap();
        b.add_edge("1", "3", 3, 3).unwrap();
        b.build()
    }

    #[test]
    fn test_triangle_all_strategies() {
        let g = triangle();
        for strategy in [
            SearchStrategy::BranchAndBound,
            SearchStrategy::Exhaustive,
            SearchStrategy::RandomSampling {
                iterations: 100,
                seed: 3,
            },
        ] {
            let settings = MfmstSettings::default().with_strategy(strategy);
            let sol = solve_mfmst(&g, &settings).unwrap();
            assert_eq!(sol.bottleneck, Some(6), "{:?}", strategy);
            assert_eq!(sol.tree.as_ref().unwrap().edge_ids(), vec![0, 1]);
            assert_eq!(sol.upper_bound, Some(8));
            assert_eq!(sol.lower_bound, Some(4));
            assert!(!sol.short_circuit);
        }
    }

    #[test]
    fn test_random_sampling_without_proof_reports_iteration_limit() {
        let g = triangle();
        let settings = MfmstSettings::default().with_strategy(SearchStrategy::RandomSampling {
            iterations: 100,
            seed: 3,
        });
        let sol = solve_mfmst(&g, &settings).unwrap();
        // 6 > lower bound 4, so sampling cannot prove it
        assert_eq!(sol.status, SolveStatus::IterationLimit);
        assert!(sol.is_feasible());
        assert!(!sol.is_optimal());
    }

    #[test]
    fn test_fixed_bound_below_lower_bound() {
        let g = triangle();
        let settings = MfmstSettings::default().with_initial_bound(InitialBound::Fixed(3));
        let sol = solve_mfmst(&g, &settings).unwrap();
        // 2-3 is pruned and the remaining path is forced with sums (4, 8)
        assert_eq!(
            sol.infeasibility(),
            Some(Infeasibility::BridgeBoundTooLow {
                bound: 3,
                weight: 4,
                mirror_weight: 8,
            })
        );
        assert_eq!(sol.bridges, vec![0, 2]);
        assert_eq!(sol.pruned_edges.len(), 1);
        assert_eq!(sol.stats.nodes_explored, 0);
    }

    #[test]
    fn test_lower_bound_exceeds_fixed_bound() {
        // Every tree has sums (3, 6); nothing is pruned and the cycle has no bridges
        let mut b = GraphBuilder::new();
        for (u, v) in [("a", "b"), ("b", "c"), ("c", "d"), ("d", "a")] {
            b.add_edge(u, v, 1, 2).unwrap();
        }
        let g = b.build();

        let settings = MfmstSettings::default().with_initial_bound(InitialBound::Fixed(2));
        let sol = solve_mfmst(&g, &settings).unwrap();
        assert_eq!(sol.infeasibility(), Some(Infeasibility::NoSpanningTreeFound));
        assert!(sol.pruned_edges.is_empty());
        assert!(sol.bridges.is_empty());
        assert_eq!(sol.stats.nodes_explored, 0);
    }

    #[test]
    fn test_fixed_bound_between_bounds() {
        let g = triangle();
        let settings = MfmstSettings::default().with_initial_bound(InitialBound::Fixed(7));
        let sol = solve_mfmst(&g, &settings).unwrap();
        // 2-3 (weight 5) survives, the MST incumbent (8) does not meet 7
        assert_eq!(sol.status, SolveStatus::Optimal);
        assert_eq!(sol.bottleneck, Some(6));
        assert_eq!(sol.upper_bound, Some(7));
    }

    #[test]
    fn test_fixed_bound_short_circuit() {
        // Primary MST {a-b, b-c} has sums (4, 2)
        let mut b = GraphBuilder::new();
        b.add_edge("a", "b", 2, 1).unwrap();
        b.add_edge("b", "c", 2, 1).unwrap();
        b.add_edge("a", "c", 9, 9).unwrap();
        let g = b.build();

        let sol = solve_mfmst(&g, &MfmstSettings::default()).unwrap();
        assert!(sol.short_circuit);
        assert_eq!(sol.bottleneck, Some(4));

        let tight = MfmstSettings::default().with_initial_bound(InitialBound::Fixed(3));
        let sol = solve_mfmst(&g, &tight).unwrap();
        assert!(!sol.short_circuit);
        assert!(!sol.is_feasible());
    }

    #[test]
    fn test_symmetric_pruning_reports_mirror_reason() {
        let mut b = GraphBuilder::new();
        b.add_edge("a", "b", 1, 5).unwrap();
        b.add_edge("b", "c", 5, 1).unwrap();
        b.add_edge("a", "c", 3, 3).unwrap();
        b.add_edge("c", "d", 0, 9).unwrap();
        b.add_edge("a", "d", 1, 1).unwrap();
        let g = b.build();

        let settings = MfmstSettings::default()
            .with_initial_bound(InitialBound::Fixed(8))
            .with_pruning(PruningMode::Symmetric);
        let sol = solve_mfmst(&g, &settings).unwrap();

        let removed: Vec<_> = sol.pruned_edges.iter().map(|p| (p.edge.id, p.reason)).collect();
        assert_eq!(removed, vec![(3, PruneReason::MirrorWeightExceedsBound)]);
        assert!(sol.is_feasible());
        assert!(!sol.tree.unwrap().contains(3));
    }

    #[test]
    fn test_invalid_settings_is_error() {
        let g = triangle();
        let mut settings = MfmstSettings::default();
        settings.max_iterations = 0;
        assert!(solve_mfmst(&g, &settings).is_err());
    }
}
