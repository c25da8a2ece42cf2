//! Integration module for connecting detection backends and event consumers
//! with the line counter.

mod builder;
mod detector;
mod pipeline;

pub use builder::DetectionBuilder;
pub use detector::{DetectionSource, IntoDetections};
pub use pipeline::CountingPipeline;
