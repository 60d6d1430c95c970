use serde::{Deserialize, Serialize};

use crate::coordinate::Coordinate;
use crate::quadrant::{build_quadrants, center_of, classify, Quadrant};

/// Reserved spot name marking where a game starts.
pub const ENTRANCE_SPOT: &str = "entrance";
/// Reserved spot name marking where a game ends.
pub const EXIT_SPOT: &str = "exit";

/// A named point of interest inside a maze.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spot {
    pub name: String,
    pub coordinate: Coordinate,
    #[serde(default)]
    pub reward: u64,
}

impl Spot {
    pub fn new(name: impl Into<String>, coordinate: Coordinate, reward: u64) -> Self {
        Self {
            name: name.into(),
            coordinate,
            reward,
        }
    }

    pub fn key(&self) -> String {
        self.coordinate.key()
    }

    pub fn is_entrance(&self) -> bool {
        self.name == ENTRANCE_SPOT
    }

    pub fn is_exit(&self) -> bool {
        self.name == EXIT_SPOT
    }
}

/// Spots held per quadrant around a movable centre.
///
/// Each spot lives in exactly one quadrant, chosen by [`classify`] from its
/// coordinate and the current centre.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpotRegistry {
    quadrants: [Quadrant; 4],
}

impl SpotRegistry {
    pub fn new(center: Coordinate) -> Self {
        Self {
            quadrants: build_quadrants(center),
        }
    }

    pub fn center(&self) -> Coordinate {
        center_of(&self.quadrants)
    }

    pub fn quadrants(&self) -> &[Quadrant; 4] {
        &self.quadrants
    }

    /// Place a spot in its quadrant, replacing any spot at the same coordinate.
    pub fn insert(&mut self, spot: Spot) -> Option<Spot> {
        let index = classify(spot.coordinate, self.center()).index();
        self.quadrants[index].spots.insert(spot.key(), spot)
    }

    /// Look up a spot by its coordinate key.
    pub fn find(&self, key: &str) -> Option<&Spot> {
        self.quadrants
            .iter()
            .find_map(|quadrant| quadrant.spots.get(key))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    /// Remove the spot stored under `key`; absent keys are ignored.
    pub fn remove(&mut self, key: &str) -> Option<Spot> {
        self.quadrants
            .iter_mut()
            .find_map(|quadrant| quadrant.spots.remove(key))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Spot> {
        self.quadrants
            .iter()
            .flat_map(|quadrant| quadrant.spots.values())
    }

    pub fn len(&self) -> usize {
        self.quadrants.iter().map(|quadrant| quadrant.spots.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rebuild the quadrants around `center` and move every spot into its new region.
    pub fn repartition(&mut self, center: Coordinate) {
        let previous = std::mem::replace(&mut self.quadrants, build_quadrants(center));
        for quadrant in previous {
            for (_, spot) in quadrant.spots {
                self.insert(spot);
            }
        }
    }
}

impl Default for SpotRegistry {
    fn default() -> Self {
        Self::new(Coordinate::default())
    }
}
