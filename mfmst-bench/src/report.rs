//! Human-readable and JSON solution reports.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use mfmst_core::{Edge, Graph};
use mfmst_search::{MfmstSolution, SolveStatus};
use serde::{Deserialize, Serialize};

/// One edge with its endpoints' labels.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EdgeReport {
    pub id: usize,
    pub u: String,
    pub v: String,
    pub weight: u64,
    pub mirror_weight: u64,
}

impl EdgeReport {
    fn new(graph: &Graph, edge: &Edge) -> Self {
        Self {
            id: edge.id,
            u: graph.label(edge.u).to_string(),
            v: graph.label(edge.v).to_string(),
            weight: edge.weight,
            mirror_weight: edge.mirror_weight,
        }
    }
}

/// An edge dropped before search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PrunedEdgeReport {
    #[serde(flatten)]
    pub edge: EdgeReport,
    pub reason: String,
}

/// Full result of one solve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveReport {
    pub instance: String,
    pub strategy: String,
    pub nodes: usize,
    pub edges: usize,
    pub status: String,
    pub feasible: bool,
    pub optimal: bool,
    /// Infeasibility reason code
    pub reason: Option<String>,
    pub bottleneck: Option<u64>,
    pub weight: Option<u64>,
    pub mirror_weight: Option<u64>,
    pub upper_bound: Option<u64>,
    pub lower_bound: Option<u64>,
    pub short_circuit: bool,
    pub tree: Vec<EdgeReport>,
    pub bridges: Vec<EdgeReport>,
    pub pruned: Vec<PrunedEdgeReport>,
    pub nodes_explored: u64,
    pub nodes_pruned: u64,
    pub incumbent_updates: u64,
    pub elapsed_ms: u64,
}

pub fn status_label(status: &SolveStatus) -> &'static str {
    match status {
        SolveStatus::Optimal => "optimal",
        SolveStatus::NodeLimit => "node-limit",
        SolveStatus::TimeLimit => "time-limit",
        SolveStatus::IterationLimit => "iteration-limit",
        SolveStatus::Infeasible(_) => "infeasible",
    }
}

impl SolveReport {
    pub fn new(instance: &str, strategy: &str, graph: &Graph, solution: &MfmstSolution) -> Self {
        let tree = solution
            .tree
            .as_ref()
            .map(|t| t.edges().iter().map(|e| EdgeReport::new(graph, e)).collect())
            .unwrap_or_default();

        let bridges = solution
            .bridges
            .iter()
            .filter_map(|&id| graph.edge_by_id(id))
            .map(|e| EdgeReport::new(graph, e))
            .collect();

        let pruned = solution
            .pruned_edges
            .iter()
            .map(|p| PrunedEdgeReport {
                edge: EdgeReport::new(graph, &p.edge),
                reason: p.reason.to_string(),
            })
            .collect();

        Self {
            instance: instance.to_string(),
            strategy: strategy.to_string(),
            nodes: graph.num_nodes(),
            edges: graph.num_edges(),
            status: status_label(&solution.status).to_string(),
            feasible: solution.is_feasible(),
            optimal: solution.is_optimal(),
            reason: solution.infeasibility().map(|r| r.reason().to_string()),
            bottleneck: solution.bottleneck,
            weight: solution.tree.as_ref().map(|t| t.weight()),
            mirror_weight: solution.tree.as_ref().map(|t| t.mirror_weight()),
            upper_bound: solution.upper_bound,
            lower_bound: solution.lower_bound,
            short_circuit: solution.short_circuit,
            tree,
            bridges,
            pruned,
            nodes_explored: solution.stats.nodes_explored,
            nodes_pruned: solution.stats.nodes_pruned,
            incumbent_updates: solution.stats.incumbent_updates,
            elapsed_ms: solution.stats.elapsed_ms,
        }
    }

    /// Print to stdout.
    pub fn print(&self) {
        println!("\n{}", "=".repeat(60));
        println!("{}", self.instance);
        println!("{}", "=".repeat(60));
        println!("Nodes:            {}", self.nodes);
        println!("Edges:            {}", self.edges);
        println!("Strategy:         {}", self.strategy);

        for p in &self.pruned {
            println!("Edge ({},{}) removed: {}", p.edge.u, p.edge.v, p.reason);
        }
        println!();

        println!("Status:           {}", self.status);
        if let Some(reason) = &self.reason {
            println!("Reason:           {}", reason);
            println!("No solution was possible with the chosen bound");
        }
        if let (Some(lower), Some(upper)) = (self.lower_bound, self.upper_bound) {
            println!("Bounds:           [{}, {}]", lower, upper);
        }
        if self.short_circuit {
            println!("Search:           skipped (MST optimal)");
        } else {
            println!("Nodes explored:   {}", self.nodes_explored);
            println!("Nodes pruned:     {}", self.nodes_pruned);
        }
        println!("Solve time:       {} ms", self.elapsed_ms);

        if let (Some(b), Some(w), Some(m)) = (self.bottleneck, self.weight, self.mirror_weight) {
            println!("Bottleneck:       {} (weight {}, mirror {})", b, w, m);
            println!("Tree:");
            for e in &self.tree {
                let forced = if self.bridges.iter().any(|b| b.id == e.id) {
                    " [bridge]"
                } else {
                    ""
                };
                println!(
                    "  ({},{})  w={}  mw={}{}",
                    e.u, e.v, e.weight, e.mirror_weight, forced
                );
            }
        }
    }
}

/// Save any serializable report as pretty JSON.
pub fn save_json<T: Serialize, P: AsRef<Path>>(value: &T, path: P) -> Result<()> {
    let file = File::create(path.as_ref())
        .with_context(|| format!("Failed to create file {}", path.as_ref().display()))?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, value)
        .with_context(|| format!("Failed to write JSON to {}", path.as_ref().display()))?;
    Ok(())
}
