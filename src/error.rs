//! Error types for the crossing counter.

use thiserror::Error;

/// Result type alias used by fallible constructors in this crate.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Rejected counter configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("boundary position must be finite, got {0}")]
    NonFiniteBoundary(f32),

    #[error("gate fraction must be finite and positive, got {0}")]
    InvalidGateFraction(f32),

    #[error("max_stale_frames must be at least 1")]
    ZeroStaleness,
}

/// Reason a detection box is refused before association.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum InvalidDetection {
    #[error("non-finite box coordinate")]
    NonFinite,

    #[error("negative origin ({x}, {y})")]
    NegativeOrigin { x: f32, y: f32 },

    #[error("negative size {width}x{height}")]
    NegativeSize { width: f32, height: f32 },
}
