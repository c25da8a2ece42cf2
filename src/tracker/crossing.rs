//! Boundary geometry and the directional crossing rule.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::tracker::track::TrackId;

/// Image axis the boundary is measured along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Vertical line, objects move horizontally across it.
    #[default]
    X,
    /// Horizontal line, objects move vertically across it.
    Y,
}

impl Axis {
    #[inline]
    pub fn coord(self, p: &Point2<f32>) -> f32 {
        match self {
            Axis::X => p.x,
            Axis::Y => p.y,
        }
    }
}

/// Direction of travel along the axis that counts as an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Increasing,
    Decreasing,
}

/// A fixed counting line: one scalar position along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Boundary {
    pub axis: Axis,
    pub position: f32,
    #[serde(default)]
    pub entry_direction: Direction,
}

impl Default for Boundary {
    fn default() -> Self {
        Self {
            axis: Axis::X,
            position: 320.0,
            entry_direction: Direction::Increasing,
        }
    }
}

impl Boundary {
    pub fn new(axis: Axis, position: f32) -> Self {
        Self {
            axis,
            position,
            entry_direction: Direction::Increasing,
        }
    }

    pub fn with_entry_direction(mut self, direction: Direction) -> Self {
        self.entry_direction = direction;
        self
    }

    /// Signed coordinate along the entry direction, so that the rules below
    /// can always be written for the increasing case.
    #[inline]
    fn oriented(&self, p: &Point2<f32>) -> (f32, f32) {
        let v = self.axis.coord(p);
        match self.entry_direction {
            Direction::Increasing => (v, self.position),
            Direction::Decreasing => (-v, -self.position),
        }
    }

    /// Whether a point lies on the interior side (at or past the line in the
    /// entry direction).
    pub fn is_interior(&self, p: &Point2<f32>) -> bool {
        let (v, b) = self.oriented(p);
        v >= b
    }
}

/// Which way a track went over the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrossingDirection {
    Entry,
    Exit,
}

/// A one-time directional signal for a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossingEvent {
    pub track_id: TrackId,
    pub direction: CrossingDirection,
    /// Frame counter value of the update that fired the event.
    pub frame: u64,
}

/// Decide whether moving from `prev` to `next` crosses `boundary`.
///
/// Entry needs `prev < b && next >= b`, exit needs `prev > b && next <= b`
/// (mirrored for a decreasing entry direction). Only the axis coordinate is
/// compared. The strict/non-strict split keeps an object resting exactly on
/// the line from firing twice.
pub fn detect_crossing(
    boundary: &Boundary,
    prev: &Point2<f32>,
    next: &Point2<f32>,
) -> Option<CrossingDirection> {
    let (p, b) = boundary.oriented(prev);
    let (n, _) = boundary.oriented(next);

    if p < b && n >= b {
        Some(CrossingDirection::Entry)
    } else if p > b && n <= b {
        Some(CrossingDirection::Exit)
    } else {
        None
    }
}
