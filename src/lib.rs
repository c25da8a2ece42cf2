//! Count directional crossings of a virtual line by objects seen in a video
//! stream.
//!
//! Feed one frame of detection boxes at a time into a [`LineCounter`]; it
//! associates them into persistent tracks, fires at most one
//! [`CrossingEvent`] per track, and forgets tracks that go stale.

pub mod error;
pub mod integration;
pub mod tracker;

pub use error::{ConfigError, InvalidDetection};
pub use integration::{CountingPipeline, DetectionBuilder, DetectionSource, IntoDetections};
pub use tracker::{
    Axis, Boundary, Callbacks, CounterConfig, CrossingDirection, CrossingEvent, CrossingTally,
    Detection, Direction, EventSink, LineCounter, MatchStrategy, Matcher, Rect, Track,
    TrackAttributes, TrackId,
};
