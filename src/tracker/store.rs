//! Arena of live tracks, addressed by identity.

use std::collections::BTreeMap;

use nalgebra::Point2;

use crate::tracker::track::{Track, TrackId};

/// Owns every live [`Track`]. Iteration order is ascending id, which is also
/// creation order, so association sees tracks in a stable order each frame.
#[derive(Debug, Clone, Default)]
pub struct TrackStore {
    tracks: BTreeMap<TrackId, Track>,
}

impl TrackStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, track: Track) {
        self.tracks.insert(track.id, track);
    }

    pub fn get(&self, id: TrackId) -> Option<&Track> {
        self.tracks.get(&id)
    }

    pub fn get_mut(&mut self, id: TrackId) -> Option<&mut Track> {
        self.tracks.get_mut(&id)
    }

    pub fn contains(&self, id: TrackId) -> bool {
        self.tracks.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.tracks.values()
    }

    /// Ids and centers of all tracks, in store order. This is the snapshot
    /// the matcher works on for one frame.
    pub fn snapshot(&self) -> (Vec<TrackId>, Vec<Point2<f32>>) {
        self.tracks.values().map(|t| (t.id, t.center)).unzip()
    }

    /// Drop every track matching `remove` and hand them back.
    pub fn remove_where(&mut self, mut remove: impl FnMut(&Track) -> bool) -> Vec<Track> {
        let ids: Vec<TrackId> = self
            .tracks
            .values()
            .filter(|t| remove(t))
            .map(|t| t.id)
            .collect();
        ids.into_iter()
            .filter_map(|id| self.tracks.remove(&id))
            .collect()
    }

    pub fn clear(&mut self) {
        self.tracks.clear();
    }
}
