//! Branch-and-bound tree controller.

use std::time::Instant;

use mfmst_core::{Edge, Graph, NodeId, SpanningTree};

use super::{enumerate_attachments, SearchEngine, SearchNode, SearchOutcome, Termination};
use crate::model::{IncumbentTracker, SearchStats};
use crate::settings::MfmstSettings;

/// Depth-first branch-and-bound over partial trees grown from node 0.
///
/// Each expansion pops a node from the partial tree's frontier and branches
/// on which of its unvisited neighbors to attach. Branches whose weight sums
/// already rule out beating the incumbent are discarded.
pub struct BranchAndBound<'g> {
    /// Graph being searched (already pruned).
    graph: &'g Graph,

    /// Open nodes, explored last-in first-out.
    open: Vec<SearchNode>,

    /// Incumbent tree tracker.
    pub incumbent: IncumbentTracker,

    /// Proven lower bound; reaching it ends the search.
    lower_bound: u64,

    /// Next node ID to assign.
    next_node_id: u64,

    /// Total nodes explored.
    nodes_explored: u64,

    /// Branches pruned.
    nodes_pruned: u64,

    /// Start time.
    start_time: Option<Instant>,

    /// Settings.
    settings: MfmstSettings,
}

impl<'g> BranchAndBound<'g> {
    /// Create a new B&B controller.
    pub fn new(
        graph: &'g Graph,
        lower_bound: u64,
        incumbent: IncumbentTracker,
        settings: MfmstSettings,
    ) -> Self {
        Self {
            graph,
            open: Vec::new(),
            incumbent,
            lower_bound,
            next_node_id: 1, // 0 reserved for root
            nodes_explored: 0,
            nodes_pruned: 0,
            start_time: None,
            settings,
        }
    }

    /// Initialize with the root node.
    pub fn initialize(&mut self) {
        self.start_time = Some(Instant::now());
        self.open.clear();

        let n = self.graph.num_nodes();
        if n <= 1 {
            self.offer(Vec::new());
            return;
        }

        self.open.push(SearchNode::root(n, 0));
    }

    /// Expand one node: pick the next frontier node with unvisited
    /// neighbors and push one child per admissible attachment.
    fn expand(&mut self, mut node: SearchNode) {
        self.nodes_explored += 1;

        // Incumbent may have improved since this node was queued
        if !self.incumbent.admits(node.weight, node.mirror_weight) {
            self.nodes_pruned += 1;
            return;
        }

        let graph = self.graph;
        let current = loop {
            match node.frontier.pop() {
                Some(u) if graph.neighbors(u).any(|(v, _)| !node.visited[v]) => break u,
                Some(_) => continue,
                None => {
                    // Frontier exhausted with nodes still unreached
                    self.nodes_pruned += 1;
                    return;
                }
            }
        };

        let candidates: Vec<(NodeId, &Edge)> = graph
            .neighbors(current)
            .filter(|(v, _)| !node.visited[*v])
            .collect();

        // A leaf here strands the unvisited nodes if nothing else is left to expand
        let allow_leaf = !node.frontier.is_empty();

        let (attachments, pruned) = enumerate_attachments(
            &candidates,
            node.weight,
            node.mirror_weight,
            &self.incumbent,
            self.settings.attachment_order,
            allow_leaf,
        );
        self.nodes_pruned += pruned;

        log::trace!(
            "Node {} (depth {}): expanding {} with {} attachments, {} pruned",
            node.id,
            node.depth,
            graph.label(current),
            attachments.len(),
            pruned
        );

        let mut children = Vec::with_capacity(attachments.len());
        for att in &attachments {
            let child = node.child(self.next_node_id, att);
            self.next_node_id += 1;

            if child.is_complete() {
                debug_assert_eq!(child.edges.len() + 1, graph.num_nodes());
                self.offer(child.edges);
                if self.incumbent.reached(self.lower_bound) {
                    return;
                }
            } else {
                children.push(child);
            }
        }

        // First attachment is explored first
        self.open.extend(children.into_iter().rev());
    }

    /// Offer a complete tree (edge ids) to the incumbent.
    fn offer(&mut self, edge_ids: Vec<usize>) -> bool {
        let tree = SpanningTree::from_ids(self.graph, &edge_ids);
        let value = tree.bottleneck();
        let improved = self.incumbent.update(tree);

        if improved {
            // Drop open nodes dominated by the new incumbent
            let before = self.open.len();
            let incumbent = &self.incumbent;
            self.open
                .retain(|n| incumbent.admits(n.weight, n.mirror_weight));
            self.nodes_pruned += (before - self.open.len()) as u64;

            if self.settings.verbose {
                log::info!(
                    "New incumbent: bottleneck={} (lower bound {}), pruned {} nodes",
                    value,
                    self.lower_bound,
                    before - self.open.len()
                );
            }
        }

        improved
    }

    /// Get elapsed time in milliseconds.
    pub fn elapsed_ms(&self) -> u64 {
        self.start_time
            .map(|t| t.elapsed().as_millis() as u64)
            .unwrap_or(0)
    }

    /// Check if time limit is exceeded.
    pub fn time_limit_exceeded(&self) -> bool {
        if let Some(limit) = self.settings.time_limit_ms {
            self.elapsed_ms() >= limit
        } else {
            false
        }
    }

    /// Check termination conditions.
    ///
    /// Returns Some(reason) if we should terminate, None otherwise.
    pub fn check_termination(&self) -> Option<Termination> {
        // Optimality proven by the lower bound
        if self.incumbent.reached(self.lower_bound) {
            return Some(Termination::LowerBoundReached);
        }

        // Queue empty
        if self.open.is_empty() {
            return Some(Termination::Exhausted);
        }

        // Node limit
        if let Some(max) = self.settings.max_nodes {
            if self.nodes_explored >= max {
                return Some(Termination::NodeLimit);
            }
        }

        // Time limit
        if self.time_limit_exceeded() {
            return Some(Termination::TimeLimit);
        }

        None
    }

    /// Log progress (if verbose).
    pub fn log_progress(&self) {
        if !self.settings.verbose {
            return;
        }

        if self.nodes_explored % self.settings.log_freq != 0 {
            return;
        }

        log::info!(
            "Nodes: {} ({} open) | Lower: {} | Incumbent: {} | Pruned: {} | Time: {:.1}s",
            self.nodes_explored,
            self.open.len(),
            self.lower_bound,
            self.incumbent
                .value()
                .map_or_else(|| "-".to_string(), |v| v.to_string()),
            self.nodes_pruned,
            self.elapsed_ms() as f64 / 1000.0,
        );
    }

    /// Get statistics for display.
    pub fn stats(&self) -> SearchStats {
        SearchStats {
            nodes_explored: self.nodes_explored,
            nodes_pruned: self.nodes_pruned,
            incumbent_updates: self.incumbent.update_count,
            elapsed_ms: self.elapsed_ms(),
        }
    }
}

impl SearchEngine for BranchAndBound<'_> {
    fn name(&self) -> &'static str {
        "branch-and-bound"
    }

    fn search(&mut self) -> SearchOutcome {
        self.initialize();

        let termination = loop {
            if let Some(reason) = self.check_termination() {
                break reason;
            }
            if let Some(node) = self.open.pop() {
                self.expand(node);
                self.log_progress();
            }
        };

        SearchOutcome {
            best: self.incumbent.tree.clone(),
            termination,
            stats: self.stats(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mfmst_core::GraphBuilder;

    fn triangle() -> Graph {
        let mut b = GraphBuilder::new();
        b.add_edge("1", "2", 1, 5).unwrap();
        b.add_edge("2", "3", 5, 1).unwrap();
        b.add_edge("1", "3", 3, 3).unwrap();
        b.build()
    }

    #[test]
    fn test_finds_triangle_optimum_from_seed() {
        let g = triangle();
        let seed = SpanningTree::from_ids(&g, &[0, 2]); // bottleneck 8
        let mut bb = BranchAndBound::new(
            &g,
            4,
            IncumbentTracker::seeded(seed),
            MfmstSettings::default(),
        );

        let out = bb.search();
        let best = out.best.unwrap();
        assert_eq!(best.edge_ids(), vec![0, 1]);
        assert_eq!(best.bottleneck(), 6);
        assert_eq!(out.termination, Termination::Exhausted);
        assert_eq!(out.stats.incumbent_updates, 1);
    }

    #[test]
    fn test_decision_bound_without_seed() {
        let g = triangle();
        let mut bb = BranchAndBound::new(&g, 4, IncumbentTracker::new(8), MfmstSettings::default());
        let out = bb.search();
        assert_eq!(out.best.unwrap().bottleneck(), 6);

        let mut bb = BranchAndBound::new(&g, 4, IncumbentTracker::new(5), MfmstSettings::default());
        let out = bb.search();
        assert!(out.best.is_none());
        assert_eq!(out.termination, Termination::Exhausted);
    }

    #[test]
    fn test_stops_at_lower_bound() {
        let g = triangle();
        let mut bb = BranchAndBound::new(&g, 6, IncumbentTracker::new(100), MfmstSettings::default());
        let out = bb.search();
        assert_eq!(out.best.unwrap().bottleneck(), 6);
        assert_eq!(out.termination, Termination::LowerBoundReached);
    }

    #[test]
    fn test_leaf_choice_reaches_crossed_tree() {
        // r has children A and B; A's children A1, A2; B's children B1, B2.
        // Cross edges A1-B2 and B1-A2 are free on the primary weight but
        // expensive on the mirror weight, so the optimum needs both A and B
        // subtrees built while their leaves have unvisited neighbors.
        let mut b = GraphBuilder::new();
        b.add_edge("r", "A", 1, 1).unwrap();
        b.add_edge("r", "B", 1, 1).unwrap();
        b.add_edge("A", "A1", 1, 1).unwrap();
        b.add_edge("A", "A2", 1, 1).unwrap();
        b.add_edge("B", "B1", 1, 1).unwrap();
        b.add_edge("B", "B2", 1, 1).unwrap();
        b.add_edge("A1", "B2", 0, 50).unwrap();
        b.add_edge("B1", "A2", 0, 50).unwrap();
        let g = b.build();

        let mut bb = BranchAndBound::new(&g, 6, IncumbentTracker::new(1000), MfmstSettings::default());
        let out = bb.search();
        let best = out.best.unwrap();
        assert_eq!(best.bottleneck(), 6);
        assert_eq!(best.edge_ids(), vec![0, 1, 2, 3, 4, 5]);
        assert!(best.is_spanning_tree_of(&g));
    }

    #[test]
    fn test_node_limit() {
        let g = triangle();
        let settings = MfmstSettings::default().with_max_nodes(1);
        let mut bb = BranchAndBound::new(&g, 0, IncumbentTracker::new(100), settings);
        let out = bb.search();
        assert_eq!(out.termination, Termination::NodeLimit);
        assert_eq!(out.stats.nodes_explored, 1);
        // Root expansion already completes the {12, 13} tree
        assert!(out.best.is_some());
    }

    #[test]
    fn test_single_node_graph() {
        let mut b = GraphBuilder::new();
        b.add_node("solo");
        let g = b.build();
        let mut bb = BranchAndBound::new(&g, 0, IncumbentTracker::new(0), MfmstSettings::default());
        let out = bb.search();
        assert_eq!(out.best.unwrap().len(), 0);
        assert_eq!(out.termination, Termination::LowerBoundReached);
    }
}
