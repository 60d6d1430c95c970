use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::coordinate::Coordinate;
use crate::spot::SpotRegistry;

/// Requested connection between two spots, as supplied by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathRequest {
    pub origin: Coordinate,
    pub destination: Coordinate,
}

impl PathRequest {
    pub fn new(origin: Coordinate, destination: Coordinate) -> Self {
        Self {
            origin,
            destination,
        }
    }
}

/// Undirected edge as reported by [`PathIndex::edges`].
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub origin: String,
    pub destination: String,
    pub distance: f64,
}

/// Symmetric weighted adjacency between spot keys.
///
/// Every edge is stored twice, once per direction, with the Euclidean distance
/// computed when the edge is first added. Rows are ordered by key so neighbour
/// listings are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PathIndex {
    adjacency: BTreeMap<String, BTreeMap<String, f64>>,
}

impl PathIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Connect two registered spots.
    ///
    /// Returns `false` without touching the index when either end is not a
    /// spot in `spots`. Adding an edge that already exists keeps the original
    /// weight and returns `true`.
    pub fn add_edge(
        &mut self,
        spots: &SpotRegistry,
        origin: Coordinate,
        destination: Coordinate,
    ) -> bool {
        let origin_key = origin.key();
        let destination_key = destination.key();
        if !(spots.contains(&origin_key) && spots.contains(&destination_key)) {
            return false;
        }

        if self.contains_edge(&origin_key, &destination_key) {
            return true;
        }

        let distance = origin.distance_to(&destination);
        debug!(origin = %origin_key, destination = %destination_key, distance, "adding path");
        self.adjacency
            .entry(origin_key.clone())
            .or_default()
            .insert(destination_key.clone(), distance);
        self.adjacency
            .entry(destination_key)
            .or_default()
            .insert(origin_key, distance);
        true
    }

    /// Remove an edge and its reverse; absent edges are ignored.
    pub fn remove_edge(&mut self, origin: &str, destination: &str) {
        if let Some(row) = self.adjacency.get_mut(origin) {
            row.remove(destination);
        }
        if let Some(row) = self.adjacency.get_mut(destination) {
            row.remove(origin);
        }
        self.prune(origin);
        self.prune(destination);
    }

    /// Remove a node and every edge touching it, in both directions.
    pub fn remove_node(&mut self, key: &str) {
        let Some(row) = self.adjacency.remove(key) else {
            return;
        };
        for neighbour in row.keys() {
            if let Some(reverse) = self.adjacency.get_mut(neighbour) {
                reverse.remove(key);
            }
            self.prune(neighbour);
        }
        debug!(spot = %key, removed = row.len(), "removed paths touching spot");
    }

    /// Live adjacency row for `key`; unknown keys have no neighbours.
    pub fn neighbours(&self, key: &str) -> impl Iterator<Item = (&str, f64)> {
        self.adjacency
            .get(key)
            .into_iter()
            .flat_map(|row| row.iter().map(|(k, distance)| (k.as_str(), *distance)))
    }

    /// Keys adjacent to `key`, in key order.
    pub fn neighbour_keys(&self, key: &str) -> Vec<String> {
        self.neighbours(key).map(|(k, _)| k.to_string()).collect()
    }

    pub fn weight(&self, origin: &str, destination: &str) -> Option<f64> {
        self.adjacency.get(origin)?.get(destination).copied()
    }

    pub fn contains_edge(&self, origin: &str, destination: &str) -> bool {
        self.weight(origin, destination).is_some()
    }

    /// Every undirected edge once, with `origin < destination`.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.adjacency.iter().flat_map(|(origin, row)| {
            row.iter()
                .filter(move |(destination, _)| origin < *destination)
                .map(move |(destination, distance)| Edge {
                    origin: origin.clone(),
                    destination: destination.clone(),
                    distance: *distance,
                })
        })
    }

    pub fn edge_count(&self) -> usize {
        self.edges().count()
    }

    /// Whether any row mentions `key`, either as a node or as a neighbour.
    pub fn references(&self, key: &str) -> bool {
        self.adjacency
            .iter()
            .any(|(node, row)| node == key || row.contains_key(key))
    }

    fn prune(&mut self, key: &str) {
        if self.adjacency.get(key).is_some_and(BTreeMap::is_empty) {
            self.adjacency.remove(key);
        }
    }
}
