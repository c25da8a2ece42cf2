//! Single tracked object.

use std::fmt;

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::tracker::rect::Rect;

/// Track identity. Allocated once, never reused within a counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(pub u64);

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Decorative per-object payload. Carried from the detection that spawned a
/// track and never consulted by matching or counting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackAttributes {
    pub external_id: Option<String>,
    pub age: Option<u8>,
    pub gender: Option<String>,
}

/// Persistent object hypothesis spanning multiple frames.
#[derive(Debug, Clone)]
pub struct Track {
    /// Unique track identifier
    pub id: TrackId,
    /// Last known center, derived from `bbox`
    pub center: Point2<f32>,
    /// Last associated bounding box (TLWH)
    pub bbox: Rect,
    /// Frame counter value at the last successful association
    pub last_seen_frame: u64,
    /// Frame the track was spawned in
    pub start_frame: u64,
    /// Set once a crossing event fired (or the track spawned inside); never reset
    pub has_crossed: bool,
    pub attributes: Option<TrackAttributes>,
}

impl Track {
    pub fn new(id: TrackId, bbox: Rect, frame: u64) -> Self {
        Self {
            id,
            center: bbox.center(),
            bbox,
            last_seen_frame: frame,
            start_frame: frame,
            has_crossed: false,
            attributes: None,
        }
    }

    pub fn with_attributes(mut self, attributes: Option<TrackAttributes>) -> Self {
        self.attributes = attributes;
        self
    }

    /// Move the track onto a newly associated box. Returns the previous center.
    pub fn update(&mut self, bbox: Rect, frame: u64) -> Point2<f32> {
        let prev = self.center;
        self.bbox = bbox;
        self.center = bbox.center();
        self.last_seen_frame = frame;
        prev
    }

    /// Number of frames since the last association.
    #[inline]
    pub fn frames_since_seen(&self, frame: u64) -> u64 {
        frame.saturating_sub(self.last_seen_frame)
    }

    pub fn mark_crossed(&mut self) {
        self.has_crossed = true;
    }
}
