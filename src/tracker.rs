mod crossing;
mod events;
mod lifecycle;
mod line_counter;
mod matching;
mod rect;
mod store;
mod track;

pub use crossing::{Axis, Boundary, CrossingDirection, CrossingEvent, Direction, detect_crossing};
pub use events::{Callbacks, CrossingTally, EventSink};
pub use lifecycle::{IdAllocator, prune_stale};
pub use line_counter::{CounterConfig, LineCounter};
pub use matching::{
    AssignmentResult, Detection, GreedyMatcher, MatchStrategy, Matcher, OptimalMatcher,
    linear_assignment,
};
pub use rect::{Rect, center_distance_sq, distance_sq};
pub use store::TrackStore;
pub use track::{Track, TrackAttributes, TrackId};
