//! Identity allocation and stale-track pruning.

use tracing::debug;

use crate::tracker::store::TrackStore;
use crate::tracker::track::{Track, TrackId};

/// Hands out strictly increasing track ids. Owned by one counter, so
/// independent counters (one per camera) never interfere.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    last: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the next unique track ID. The first id is 1.
    pub fn next_id(&mut self) -> TrackId {
        self.last += 1;
        TrackId(self.last)
    }

    /// Last id handed out, or 0 if none yet.
    pub fn last(&self) -> u64 {
        self.last
    }
}

/// Remove tracks whose `frame - last_seen_frame` exceeds `max_stale_frames`.
pub fn prune_stale(store: &mut TrackStore, frame: u64, max_stale_frames: u32) -> Vec<Track> {
    let removed =
        store.remove_where(|t| t.frames_since_seen(frame) > u64::from(max_stale_frames));
    for track in &removed {
        debug!(
            track = %track.id,
            last_seen = track.last_seen_frame,
            frame,
            "pruned stale track"
        );
    }
    removed
}
