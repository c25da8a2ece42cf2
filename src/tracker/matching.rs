//! Detection-to-track association.

use nalgebra::Point2;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::tracker::rect::{Rect, center_distance_sq};
use crate::tracker::track::TrackAttributes;

/// Detection input for the tracker. Has no identity until associated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Bounding box in TLWH format (originX, originY, width, height)
    pub bbox: Rect,
    /// Optional payload copied onto a track spawned from this detection
    #[serde(default)]
    pub attributes: Option<TrackAttributes>,
}

impl Detection {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            bbox: Rect::new(x, y, width, height),
            attributes: None,
        }
    }

    pub fn from_rect(bbox: Rect) -> Self {
        Self {
            bbox,
            attributes: None,
        }
    }

    #[inline]
    pub fn center(&self) -> Point2<f32> {
        self.bbox.center()
    }
}

/// Outcome of one association pass. Indices refer to the slices handed to
/// [`Matcher::assign`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssignmentResult {
    /// `(track index, detection index)` pairs, ordered by detection index.
    pub matches: Vec<(usize, usize)>,
    pub unmatched_tracks: Vec<usize>,
    /// Orphan detections, in input order. Each becomes a new track.
    pub unmatched_detections: Vec<usize>,
}

/// Strategy for pairing track centers with detection centers.
///
/// Implementations must respect the gate (a pair is only admissible when its
/// squared center distance is strictly below `gate_sq`) and must never give
/// one track to two detections.
pub trait Matcher: Send {
    fn assign(
        &self,
        tracks: &[Point2<f32>],
        detections: &[Point2<f32>],
        gate_sq: f32,
    ) -> AssignmentResult;
}

/// Built-in matcher selection, serializable as part of the counter config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStrategy {
    /// Nearest center first-come in detection order.
    #[default]
    Greedy,
    /// Minimum total squared distance (Jonker-Volgenant).
    Optimal,
}

impl MatchStrategy {
    pub fn matcher(self) -> Box<dyn Matcher> {
        match self {
            MatchStrategy::Greedy => Box::new(GreedyMatcher),
            MatchStrategy::Optimal => Box::new(OptimalMatcher),
        }
    }
}

/// Greedy nearest-center association.
///
/// Detections are visited in input order; each takes the closest still-free
/// track inside the gate. Ties go to the lower track index.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyMatcher;

impl Matcher for GreedyMatcher {
    fn assign(
        &self,
        tracks: &[Point2<f32>],
        detections: &[Point2<f32>],
        gate_sq: f32,
    ) -> AssignmentResult {
        let dists = center_distance_sq(tracks, detections);
        let mut taken = vec![false; tracks.len()];
        let mut matches = Vec::new();
        let mut unmatched_detections = Vec::new();

        for idet in 0..detections.len() {
            let mut best: Option<(usize, f32)> = None;
            for itrack in 0..tracks.len() {
                if taken[itrack] {
                    continue;
                }
                let d = dists[[itrack, idet]];
                if d < gate_sq && best.is_none_or(|(_, bd)| d < bd) {
                    best = Some((itrack, d));
                }
            }
            match best {
                Some((itrack, _)) => {
                    taken[itrack] = true;
                    matches.push((itrack, idet));
                }
                None => unmatched_detections.push(idet),
            }
        }

        let unmatched_tracks = unmatched_indices(&taken);
        AssignmentResult {
            matches,
            unmatched_tracks,
            unmatched_detections,
        }
    }
}

/// Globally optimal association under the same gate, solved with LAPJV.
#[derive(Debug, Clone, Copy, Default)]
pub struct OptimalMatcher;

impl Matcher for OptimalMatcher {
    fn assign(
        &self,
        tracks: &[Point2<f32>],
        detections: &[Point2<f32>],
        gate_sq: f32,
    ) -> AssignmentResult {
        let dists = center_distance_sq(tracks, detections);
        // Normalise so admissible pairs cost [0, 1) whatever the frame size.
        let cost = dists.mapv(|d| if d < gate_sq { d / gate_sq } else { GATED_COST });
        let mut result = linear_assignment(&cost, 1.0);
        result.matches.sort_by_key(|&(_, idet)| idet);
        result.unmatched_tracks.sort_unstable();
        result
    }
}

const GATED_COST: f32 = 1e3;

/// Solve the rectangular assignment problem, keeping only pairs with
/// `cost < thresh`.
pub fn linear_assignment(cost_matrix: &Array2<f32>, thresh: f32) -> AssignmentResult {
    let (num_rows, num_cols) = cost_matrix.dim();

    if num_rows == 0 {
        return AssignmentResult {
            matches: vec![],
            unmatched_tracks: vec![],
            unmatched_detections: (0..num_cols).collect(),
        };
    }

    if num_cols == 0 {
        return AssignmentResult {
            matches: vec![],
            unmatched_tracks: (0..num_rows).collect(),
            unmatched_detections: vec![],
        };
    }

    let size = num_rows.max(num_cols);
    let mut padded = Array2::<f64>::from_elem((size, size), 1e6);

    for i in 0..num_rows {
        for j in 0..num_cols {
            padded[[i, j]] = cost_matrix[[i, j]] as f64;
        }
    }

    let mut matches = vec![];
    let mut track_taken = vec![false; num_rows];
    let mut det_taken = vec![false; num_cols];

    match lapjv::lapjv(&padded) {
        Ok((row_to_col, _)) => {
            for (row_idx, &col_idx) in row_to_col.iter().enumerate().take(num_rows) {
                if col_idx < num_cols && cost_matrix[[row_idx, col_idx]] < thresh {
                    matches.push((row_idx, col_idx));
                    track_taken[row_idx] = true;
                    det_taken[col_idx] = true;
                }
            }
        }
        Err(_) => {
            tracing::warn!(rows = num_rows, cols = num_cols, "lapjv failed, leaving frame unmatched");
        }
    }

    AssignmentResult {
        matches,
        unmatched_tracks: unmatched_indices(&track_taken),
        unmatched_detections: unmatched_indices(&det_taken),
    }
}

fn unmatched_indices(taken: &[bool]) -> Vec<usize> {
    taken
        .iter()
        .enumerate()
        .filter_map(|(i, &t)| if t { None } else { Some(i) })
        .collect()
}
