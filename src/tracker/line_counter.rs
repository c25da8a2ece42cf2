//! Per-frame tracking and line-crossing counter.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

use crate::error::{ConfigError, Result};
use crate::tracker::crossing::{Boundary, CrossingEvent, detect_crossing};
use crate::tracker::events::EventSink;
use crate::tracker::lifecycle::{IdAllocator, prune_stale};
use crate::tracker::matching::{Detection, MatchStrategy, Matcher};
use crate::tracker::store::TrackStore;
use crate::tracker::track::{Track, TrackId};

/// Configuration for the LineCounter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CounterConfig {
    pub boundary: Boundary,
    /// Gate radius as a fraction of frame width; the squared radius is
    /// compared against squared center distances.
    pub gate_fraction: f32,
    /// Tracks unseen for more than this many frames are dropped.
    pub max_stale_frames: u32,
    /// Tracks that first appear on the interior side start out as crossed.
    pub suppress_interior_spawns: bool,
    pub matching: MatchStrategy,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            boundary: Boundary::default(),
            gate_fraction: 0.2,
            max_stale_frames: 15,
            suppress_interior_spawns: true,
            matching: MatchStrategy::Greedy,
        }
    }
}

impl CounterConfig {
    pub fn with_boundary(mut self, boundary: Boundary) -> Self {
        self.boundary = boundary;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.boundary.position.is_finite() {
            return Err(ConfigError::NonFiniteBoundary(self.boundary.position));
        }
        if !(self.gate_fraction.is_finite() && self.gate_fraction > 0.0) {
            return Err(ConfigError::InvalidGateFraction(self.gate_fraction));
        }
        if self.max_stale_frames == 0 {
            return Err(ConfigError::ZeroStaleness);
        }
        Ok(())
    }

    /// Squared gating distance for a frame of the given width.
    #[inline]
    pub fn gate_sq(&self, frame_width: f32) -> f32 {
        let radius = self.gate_fraction * frame_width;
        radius * radius
    }
}

/// Associates detections into tracks and counts boundary crossings.
///
/// One instance per detection stream. `update` must be called once per
/// frame, in order; all track state lives inside the counter.
pub struct LineCounter {
    store: TrackStore,
    ids: IdAllocator,
    frame_id: u64,
    config: CounterConfig,
    matcher: Box<dyn Matcher>,
}

impl LineCounter {
    pub fn new(config: CounterConfig) -> Result<Self> {
        config.validate()?;
        let matcher = config.matching.matcher();
        Ok(Self {
            store: TrackStore::new(),
            ids: IdAllocator::new(),
            frame_id: 0,
            config,
            matcher,
        })
    }

    /// Replace the association strategy.
    pub fn with_matcher(mut self, matcher: Box<dyn Matcher>) -> Self {
        self.matcher = matcher;
        self
    }

    /// Process one frame of detections and return the crossing events it
    /// produced, in detection input order.
    pub fn update(&mut self, detections: Vec<Detection>, frame_width: f32) -> Vec<CrossingEvent> {
        self.frame_id += 1;
        let frame = self.frame_id;

        // Step 1: Drop anything that would poison the distance math
        let detections = self.admit(detections, frame_width);

        // Step 2: Associate against the tracks as they stood after the last frame
        let (track_ids, track_centers) = self.store.snapshot();
        let det_centers: Vec<_> = detections.iter().map(Detection::center).collect();
        let gate_sq = self.config.gate_sq(frame_width);
        let assignment = self.matcher.assign(&track_centers, &det_centers, gate_sq);

        let mut owner: Vec<Option<TrackId>> = vec![None; detections.len()];
        for (itrack, idet) in assignment.matches {
            debug_assert!(owner[idet].is_none(), "detection matched twice");
            owner[idet] = Some(track_ids[itrack]);
        }

        // Step 3: Update matched tracks, evaluate crossings, spawn orphans
        let mut events = Vec::new();
        for (det, owner) in detections.into_iter().zip(owner) {
            match owner {
                Some(id) => {
                    if let Some(event) = self.advance(id, det, frame) {
                        events.push(event);
                    }
                }
                None => self.spawn(det, frame),
            }
        }

        // Step 4: Prune
        prune_stale(&mut self.store, frame, self.config.max_stale_frames);

        events
    }

    /// Same as [`update`](Self::update), then delivers the events to `sink`.
    pub fn update_with_sink<S: EventSink + ?Sized>(
        &mut self,
        detections: Vec<Detection>,
        frame_width: f32,
        sink: &mut S,
    ) -> Vec<CrossingEvent> {
        let events = self.update(detections, frame_width);
        for event in &events {
            sink.emit(event);
        }
        events
    }

    fn admit(&self, detections: Vec<Detection>, frame_width: f32) -> Vec<Detection> {
        if !(frame_width.is_finite() && frame_width > 0.0) {
            warn!(
                frame = self.frame_id,
                frame_width,
                dropped = detections.len(),
                "invalid frame width, ignoring detections"
            );
            return Vec::new();
        }
        detections
            .into_iter()
            .filter(|det| match det.bbox.validate() {
                Ok(()) => true,
                Err(reason) => {
                    trace!(frame = self.frame_id, %reason, "dropped malformed detection");
                    false
                }
            })
            .collect()
    }

    fn advance(&mut self, id: TrackId, det: Detection, frame: u64) -> Option<CrossingEvent> {
        let track = self.store.get_mut(id)?;
        let prev = track.update(det.bbox, frame);
        if track.has_crossed {
            return None;
        }

        let direction = detect_crossing(&self.config.boundary, &prev, &track.center)?;
        track.mark_crossed();
        info!(
            track = %id,
            ?direction,
            frame,
            from = self.config.boundary.axis.coord(&prev),
            to = self.config.boundary.axis.coord(&track.center),
            "boundary crossed"
        );
        Some(CrossingEvent {
            track_id: id,
            direction,
            frame,
        })
    }

    fn spawn(&mut self, det: Detection, frame: u64) {
        let id = self.ids.next_id();
        let mut track = Track::new(id, det.bbox, frame).with_attributes(det.attributes);
        if self.config.suppress_interior_spawns && self.config.boundary.is_interior(&track.center) {
            track.mark_crossed();
        }
        debug!(
            track = %id,
            frame,
            x = track.center.x,
            y = track.center.y,
            crossed = track.has_crossed,
            "spawned track"
        );
        self.store.insert(track);
    }

    /// Live tracks in ascending id order.
    pub fn tracks(&self) -> impl Iterator<Item = &Track> {
        self.store.iter()
    }

    pub fn track(&self, id: TrackId) -> Option<&Track> {
        self.store.get(id)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Number of frames processed so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_id
    }

    pub fn boundary(&self) -> &Boundary {
        &self.config.boundary
    }

    pub fn config(&self) -> &CounterConfig {
        &self.config
    }

    /// Forget all tracks and restart the frame counter. Track ids keep
    /// increasing from where they were.
    pub fn reset(&mut self) {
        self.store.clear();
        self.frame_id = 0;
    }
}
