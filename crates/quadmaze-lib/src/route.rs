use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::paths::PathIndex;

/// Cheapest sequence of spot keys between two spots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub distance: f64,
    pub nodes: Vec<String>,
}

impl Route {
    pub fn hop_count(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }
}

/// Run Dijkstra's algorithm over the path index.
///
/// Stale queue entries are discarded when popped instead of being updated in
/// place, so a node may be queued several times but is finalised once.
/// Returns `None` when `destination` cannot be reached from `origin`.
pub fn find_shortest_path(paths: &PathIndex, origin: &str, destination: &str) -> Option<Route> {
    let mut visited: HashSet<&str> = HashSet::new();
    let mut parents: HashMap<&str, Option<&str>> = HashMap::new();
    let mut queue = BinaryHeap::new();

    queue.push(QueueEntry::new(origin, None, 0.0));

    while let Some(entry) = queue.pop() {
        if !visited.insert(entry.node) {
            continue;
        }
        parents.insert(entry.node, entry.parent);

        if entry.node == destination {
            return Some(Route {
                distance: entry.cost.0,
                nodes: reconstruct_path(&parents, destination),
            });
        }

        for (next, distance) in paths.neighbours(entry.node) {
            if visited.contains(next) {
                continue;
            }
            queue.push(QueueEntry::new(next, Some(entry.node), entry.cost.0 + distance));
        }
    }

    None
}

fn reconstruct_path(parents: &HashMap<&str, Option<&str>>, goal: &str) -> Vec<String> {
    let mut path = Vec::new();
    let mut current = Some(goal);
    while let Some(node) = current {
        path.push(node.to_string());
        current = parents.get(node).copied().flatten();
    }
    path.reverse();
    path
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct QueueEntry<'a> {
    node: &'a str,
    parent: Option<&'a str>,
    cost: FloatOrd,
}

impl<'a> QueueEntry<'a> {
    fn new(node: &'a str, parent: Option<&'a str>, cost: f64) -> Self {
        Self {
            node,
            parent,
            cost: FloatOrd(cost),
        }
    }
}

impl Ord for QueueEntry<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(self.node))
    }
}

impl PartialOrd for QueueEntry<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
