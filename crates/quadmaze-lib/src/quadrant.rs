use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::coordinate::Coordinate;
use crate::spot::Spot;

/// Sentinel used for the unbounded side of a quadrant.
pub const INFINITE: i64 = i64::MAX;

/// Names of the four regions of the plane around the maze centre.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuadrantId {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl QuadrantId {
    pub const ALL: [QuadrantId; 4] = [
        QuadrantId::TopLeft,
        QuadrantId::TopRight,
        QuadrantId::BottomLeft,
        QuadrantId::BottomRight,
    ];

    /// Position of the quadrant inside a maze's quadrant array.
    pub fn index(self) -> usize {
        match self {
            QuadrantId::TopLeft => 0,
            QuadrantId::TopRight => 1,
            QuadrantId::BottomLeft => 2,
            QuadrantId::BottomRight => 3,
        }
    }
}

/// Closed interval `[min, max]` along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[i64; 2]", into = "[i64; 2]")]
pub struct Bound {
    pub min: i64,
    pub max: i64,
}

impl Bound {
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }
}

impl From<[i64; 2]> for Bound {
    fn from([min, max]: [i64; 2]) -> Self {
        Self { min, max }
    }
}

impl From<Bound> for [i64; 2] {
    fn from(bound: Bound) -> Self {
        [bound.min, bound.max]
    }
}

/// A region of the plane limited by two lines; holds the spots that fall inside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quadrant {
    pub id: QuadrantId,
    pub limit_x: Bound,
    pub limit_y: Bound,
    #[serde(default)]
    pub spots: BTreeMap<String, Spot>,
}

impl Quadrant {
    fn empty(id: QuadrantId, limit_x: Bound, limit_y: Bound) -> Self {
        Self {
            id,
            limit_x,
            limit_y,
            spots: BTreeMap::new(),
        }
    }
}

/// Build four fresh, empty quadrants around `center`.
pub fn build_quadrants(center: Coordinate) -> [Quadrant; 4] {
    let Coordinate { x, y } = center;
    [
        Quadrant::empty(
            QuadrantId::TopLeft,
            Bound::new(-INFINITE, x),
            Bound::new(y, INFINITE),
        ),
        Quadrant::empty(
            QuadrantId::TopRight,
            Bound::new(x, INFINITE),
            Bound::new(y, INFINITE),
        ),
        Quadrant::empty(
            QuadrantId::BottomLeft,
            Bound::new(-INFINITE, x),
            Bound::new(-INFINITE, y),
        ),
        Quadrant::empty(
            QuadrantId::BottomRight,
            Bound::new(x, INFINITE),
            Bound::new(-INFINITE, y),
        ),
    ]
}

/// Classify `point` relative to `center`.
///
/// Points on the vertical axis belong to the left quadrants and points on the
/// horizontal axis belong to the top quadrants.
pub fn classify(point: Coordinate, center: Coordinate) -> QuadrantId {
    let is_left = point.x <= center.x;
    let is_top = point.y >= center.y;

    match (is_top, is_left) {
        (true, true) => QuadrantId::TopLeft,
        (true, false) => QuadrantId::TopRight,
        (false, true) => QuadrantId::BottomLeft,
        (false, false) => QuadrantId::BottomRight,
    }
}

/// Recover the centre from a quadrant array, using the top-left quadrant as reference.
pub fn center_of(quadrants: &[Quadrant; 4]) -> Coordinate {
    let reference = &quadrants[QuadrantId::TopLeft.index()];
    Coordinate::new(reference.limit_x.max, reference.limit_y.min)
}
