//! Consumers of crossing events.

use std::sync::mpsc::Sender;

use tracing::debug;

use crate::tracker::crossing::{CrossingDirection, CrossingEvent};

/// Receives crossing events after each frame is committed.
pub trait EventSink {
    fn emit(&mut self, event: &CrossingEvent);
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn emit(&mut self, event: &CrossingEvent) {
        (**self).emit(event);
    }
}

impl EventSink for Vec<CrossingEvent> {
    fn emit(&mut self, event: &CrossingEvent) {
        self.push(*event);
    }
}

impl EventSink for Sender<CrossingEvent> {
    fn emit(&mut self, event: &CrossingEvent) {
        if self.send(*event).is_err() {
            debug!(track = %event.track_id, "event receiver dropped");
        }
    }
}

/// Plain `on_entry()` / `on_exit()` callbacks, no payload.
pub struct Callbacks<E, X> {
    on_entry: E,
    on_exit: X,
}

impl<E: FnMut(), X: FnMut()> Callbacks<E, X> {
    pub fn new(on_entry: E, on_exit: X) -> Self {
        Self { on_entry, on_exit }
    }
}

impl<E: FnMut(), X: FnMut()> EventSink for Callbacks<E, X> {
    fn emit(&mut self, event: &CrossingEvent) {
        match event.direction {
            CrossingDirection::Entry => (self.on_entry)(),
            CrossingDirection::Exit => (self.on_exit)(),
        }
    }
}

/// Running entry/exit counts for one counting line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct CrossingTally {
    pub entries: u64,
    pub exits: u64,
}

impl CrossingTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current occupancy. Goes negative if more exits than entries were seen.
    pub fn inside(&self) -> i64 {
        self.entries as i64 - self.exits as i64
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl EventSink for CrossingTally {
    fn emit(&mut self, event: &CrossingEvent) {
        match event.direction {
            CrossingDirection::Entry => self.entries += 1,
            CrossingDirection::Exit => self.exits += 1,
        }
    }
}
