use nalgebra::Point2;
use ndarray::Array2;

use crate::error::InvalidDetection;

/// Axis-aligned bounding box with format conversion utilities.
///
/// Stored as TLWH (top-left x, top-left y, width, height), which is the
/// `originX, originY, width, height` layout detectors hand over per frame.
/// TLBR and XYWH inputs are converted on construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rect {
    /// Top-left x coordinate
    pub x: f32,
    /// Top-left y coordinate
    pub y: f32,
    /// Width of the bounding box
    pub width: f32,
    /// Height of the bounding box
    pub height: f32,
}

impl Rect {
    /// Create a new Rect from top-left coordinates and dimensions (TLWH format).
    #[inline]
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a Rect from TLBR format (top-left x, top-left y, bottom-right x, bottom-right y).
    #[inline]
    pub fn from_tlbr(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            x: x1,
            y: y1,
            width: x2 - x1,
            height: y2 - y1,
        }
    }

    /// Create a Rect from its center point and dimensions.
    #[inline]
    pub fn from_xywh(cx: f32, cy: f32, width: f32, height: f32) -> Self {
        Self {
            x: cx - width / 2.0,
            y: cy - height / 2.0,
            width,
            height,
        }
    }

    /// Convert to TLBR format: (x1, y1, x2, y2).
    #[inline]
    pub fn to_tlbr(&self) -> [f32; 4] {
        [self.x, self.y, self.x + self.width, self.y + self.height]
    }

    /// Convert to TLWH format: (x, y, width, height).
    #[inline]
    pub fn to_tlwh(&self) -> [f32; 4] {
        [self.x, self.y, self.width, self.height]
    }

    /// Get the center point of the bounding box.
    #[inline]
    pub fn center(&self) -> Point2<f32> {
        Point2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Get the area of the bounding box.
    #[inline]
    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// Check that the box can safely enter distance math.
    ///
    /// Every coordinate must be finite, and neither the origin nor the size
    /// may be negative.
    pub fn validate(&self) -> Result<(), InvalidDetection> {
        if !(self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite())
        {
            return Err(InvalidDetection::NonFinite);
        }
        if self.x < 0.0 || self.y < 0.0 {
            return Err(InvalidDetection::NegativeOrigin {
                x: self.x,
                y: self.y,
            });
        }
        if self.width < 0.0 || self.height < 0.0 {
            return Err(InvalidDetection::NegativeSize {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

/// Squared Euclidean distance between two centers.
#[inline]
pub fn distance_sq(a: &Point2<f32>, b: &Point2<f32>) -> f32 {
    nalgebra::distance_squared(a, b)
}

/// Calculate the squared center distance matrix between two sets of points.
///
/// Returns a matrix of shape (M, N) where M is the length of `points_a`
/// and N is the length of `points_b`.
pub fn center_distance_sq(points_a: &[Point2<f32>], points_b: &[Point2<f32>]) -> Array2<f32> {
    let mut dists = Array2::zeros((points_a.len(), points_b.len()));
    for (i, a) in points_a.iter().enumerate() {
        for (j, b) in points_b.iter().enumerate() {
            dists[[i, j]] = distance_sq(a, b);
        }
    }
    dists
}
