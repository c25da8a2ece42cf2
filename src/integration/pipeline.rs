//! CountingPipeline for combining detection with tracking and counting.

use std::fmt::Display;

use tracing::warn;

use crate::error::Result;
use crate::tracker::{CounterConfig, CrossingEvent, EventSink, LineCounter};

use super::DetectionSource;

/// Bundles a detection backend, a [`LineCounter`] and an event sink.
///
/// A failing detector never stops the pipeline: the frame is processed with
/// no detections, so existing tracks age out normally and nothing is counted.
pub struct CountingPipeline<D: DetectionSource, S: EventSink> {
    detector: D,
    counter: LineCounter,
    sink: S,
    failed_frames: u64,
}

impl<D, S> CountingPipeline<D, S>
where
    D: DetectionSource,
    D::Error: Display,
    S: EventSink,
{
    /// Create a new counting pipeline with the given detector, counter config and sink.
    pub fn new(detector: D, config: CounterConfig, sink: S) -> Result<Self> {
        Ok(Self {
            detector,
            counter: LineCounter::new(config)?,
            sink,
            failed_frames: 0,
        })
    }

    /// Build around an already configured counter (e.g. one with a custom matcher).
    pub fn with_counter(detector: D, counter: LineCounter, sink: S) -> Self {
        Self {
            detector,
            counter,
            sink,
            failed_frames: 0,
        }
    }

    /// Process a single frame and return the crossing events it produced.
    ///
    /// # Arguments
    /// * `input` - Raw image bytes
    /// * `width` - Image width in pixels, also used to scale the gate
    /// * `height` - Image height in pixels
    pub fn process_frame(&mut self, input: &[u8], width: u32, height: u32) -> Vec<CrossingEvent> {
        let detections = match self.detector.detect(input, width, height) {
            Ok(detections) => detections,
            Err(err) => {
                self.failed_frames += 1;
                warn!(
                    frame = self.counter.frame_count() + 1,
                    failed_frames = self.failed_frames,
                    error = %err,
                    "detector failed, processing frame without detections"
                );
                Vec::new()
            }
        };
        self.counter
            .update_with_sink(detections, width as f32, &mut self.sink)
    }

    /// Number of frames for which the detector returned an error.
    pub fn failed_frames(&self) -> u64 {
        self.failed_frames
    }

    pub fn detector(&self) -> &D {
        &self.detector
    }

    pub fn detector_mut(&mut self) -> &mut D {
        &mut self.detector
    }

    pub fn counter(&self) -> &LineCounter {
        &self.counter
    }

    pub fn counter_mut(&mut self) -> &mut LineCounter {
        &mut self.counter
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Tear the pipeline apart, e.g. to read final tallies.
    pub fn into_parts(self) -> (D, LineCounter, S) {
        (self.detector, self.counter, self.sink)
    }
}
