//! Enumeration of neighbor attachments at a popped node.
//!
//! When the search pops a node it decides which of its unvisited neighbors
//! become its children in the tree. Every subset is a separate branch; the
//! empty subset makes the node a leaf.

use mfmst_core::{Edge, NodeId};

use crate::model::IncumbentTracker;
use crate::settings::AttachmentOrder;

/// One branching choice: the neighbors to attach and the resulting sums.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// `(neighbor, edge id)` in push order; the last is expanded first.
    pub children: Vec<(NodeId, usize)>,

    /// Σ weight of the partial tree after attaching.
    pub weight: u64,

    /// Σ mirror weight of the partial tree after attaching.
    pub mirror_weight: u64,
}

/// All admissible attachments of `candidates` onto a partial tree with sums
/// `(weight, mirror_weight)`.
///
/// Subsets are produced largest-first in edge-id order, with the leaf choice
/// last. A subset is dropped as soon as an included edge takes the sums past
/// what the incumbent admits. Returns the attachments and the number of
/// branches discarded by the bound.
pub fn enumerate_attachments(
    candidates: &[(NodeId, &Edge)],
    weight: u64,
    mirror_weight: u64,
    incumbent: &IncumbentTracker,
    order: AttachmentOrder,
    allow_leaf: bool,
) -> (Vec<Attachment>, u64) {
    let mut subsets = Vec::new();
    let mut chosen = Vec::with_capacity(candidates.len());
    let mut pruned = 0;

    collect_subsets(
        candidates,
        0,
        weight,
        mirror_weight,
        incumbent,
        &mut chosen,
        &mut subsets,
        &mut pruned,
    );

    let mut attachments = Vec::with_capacity(subsets.len());
    for subset in subsets {
        if subset.children.is_empty() {
            if allow_leaf {
                attachments.push(subset);
            }
            continue;
        }
        match order {
            AttachmentOrder::Canonical => attachments.push(subset),
            AttachmentOrder::Permuted => {
                for children in permutations(&subset.children) {
                    attachments.push(Attachment {
                        children,
                        weight: subset.weight,
                        mirror_weight: subset.mirror_weight,
                    });
                }
            }
        }
    }

    (attachments, pruned)
}

#[allow(clippy::too_many_arguments)]
fn collect_subsets(
    candidates: &[(NodeId, &Edge)],
    idx: usize,
    weight: u64,
    mirror_weight: u64,
    incumbent: &IncumbentTracker,
    chosen: &mut Vec<(NodeId, usize)>,
    out: &mut Vec<Attachment>,
    pruned: &mut u64,
) {
    if idx == candidates.len() {
        out.push(Attachment {
            children: chosen.clone(),
            weight,
            mirror_weight,
        });
        return;
    }

    let (node, edge) = candidates[idx];
    let w = weight + edge.weight;
    let m = mirror_weight + edge.mirror_weight;

    // Include first, so larger subsets come out first
    if incumbent.admits(w, m) {
        chosen.push((node, edge.id));
        collect_subsets(candidates, idx + 1, w, m, incumbent, chosen, out, pruned);
        chosen.pop();
    } else {
        *pruned += 1;
    }

    collect_subsets(candidates, idx + 1, weight, mirror_weight, incumbent, chosen, out, pruned);
}

/// Every ordering of `items`, lexicographic by position.
fn permutations<T: Copy>(items: &[T]) -> Vec<Vec<T>> {
    if items.len() <= 1 {
        return vec![items.to_vec()];
    }

    let mut result = Vec::new();
    for i in 0..items.len() {
        let mut rest = items.to_vec();
        let head = rest.remove(i);
        for mut tail in permutations(&rest) {
            tail.insert(0, head);
            result.push(tail);
        }
    }
    result
}
