//! Trait for object detection backends feeding the counter.

use crate::tracker::{Detection, Rect};

/// Trait for object detection backends.
///
/// Implement this trait to connect any detection model (or a simulator) to
/// the counter. The counter does not care where boxes come from.
///
/// # Example
///
/// ```ignore
/// use crosscount_rs::{DetectionSource, Detection};
///
/// struct MyDetector {
///     // Your model here
/// }
///
/// impl DetectionSource for MyDetector {
///     type Error = std::io::Error;
///
///     fn detect(&mut self, input: &[u8], width: u32, height: u32) -> Result<Vec<Detection>, Self::Error> {
///         // Run inference and return detections
///         Ok(vec![])
///     }
/// }
/// ```
pub trait DetectionSource {
    /// Error type for detection failures.
    type Error;

    /// Run inference on raw image data and return detections.
    ///
    /// # Arguments
    /// * `input` - Raw image bytes (format depends on implementation)
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    fn detect(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Vec<Detection>, Self::Error>;
}

/// Helper trait for converting model-specific outputs to `Detection`.
pub trait IntoDetections {
    /// Convert the output into a vector of detections.
    fn into_detections(self) -> Vec<Detection>;
}

impl IntoDetections for Vec<Detection> {
    fn into_detections(self) -> Vec<Detection> {
        self
    }
}

impl IntoDetections for Vec<Rect> {
    fn into_detections(self) -> Vec<Detection> {
        self.into_iter().map(Detection::from_rect).collect()
    }
}

/// Raw `[originX, originY, width, height]` boxes.
impl IntoDetections for Vec<[f32; 4]> {
    fn into_detections(self) -> Vec<Detection> {
        self.into_iter()
            .map(|[x, y, w, h]| Detection::new(x, y, w, h))
            .collect()
    }
}
