use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A point in the cartesian plane.
///
/// Serialized as a two element array `[x, y]`. The canonical [`key`](Self::key)
/// `"(x,y)"` identifies the point inside a maze graph; two coordinates are the
/// same node if and only if their keys match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[i64; 2]", into = "[i64; 2]")]
pub struct Coordinate {
    pub x: i64,
    pub y: i64,
}

impl Coordinate {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Canonical graph-node identifier for this point.
    pub fn key(&self) -> String {
        format!("({},{})", self.x, self.y)
    }

    /// Calculate the Euclidean distance to another coordinate.
    pub fn distance_to(&self, other: &Self) -> f64 {
        let dx = self.x as f64 - other.x as f64;
        let dy = self.y as f64 - other.y as f64;
        (dx * dx + dy * dy).sqrt()
    }
}

impl From<[i64; 2]> for Coordinate {
    fn from([x, y]: [i64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Coordinate> for [i64; 2] {
    fn from(coordinate: Coordinate) -> Self {
        [coordinate.x, coordinate.y]
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// Parses `x,y` or the key form `(x,y)`; surrounding whitespace is ignored.
impl FromStr for Coordinate {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidCoordinate {
            input: input.to_string(),
        };

        let trimmed = input.trim();
        let inner = trimmed
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .unwrap_or(trimmed);

        let (x, y) = inner.split_once(',').ok_or_else(invalid)?;
        let x = x.trim().parse::<i64>().map_err(|_| invalid())?;
        let y = y.trim().parse::<i64>().map_err(|_| invalid())?;
        Ok(Self { x, y })
    }
}
