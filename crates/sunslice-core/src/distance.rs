use serde::Serialize;

use crate::coords::{PixelCoord, WorldCoord};
use crate::frame::Frame;

/// Cumulative distance along a slice, arcsec, one entry per curve index.
///
/// Starts at 0 and never decreases.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DistanceAxis {
    values: Vec<f64>,
}

impl DistanceAxis {
    /// Accumulate separations between consecutive world coordinates.
    pub fn from_world(points: &[WorldCoord]) -> Self {
        let mut values = Vec::with_capacity(points.len());
        let mut total = 0.0;
        for (i, point) in points.iter().enumerate() {
            if i > 0 {
                total += point.separation(&points[i - 1]);
            }
            values.push(total);
        }
        Self { values }
    }

    /// Map `curve` back to world coordinates through `frame`'s projection and
    /// accumulate separations.
    pub fn from_pixel_curve(curve: &[PixelCoord], frame: &Frame) -> Self {
        let world: Vec<WorldCoord> = curve
            .iter()
            .map(|px| frame.pixel_to_world(px.to_position()))
            .collect();
        Self::from_world(&world)
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Total length of the slice, arcsec.
    pub fn total(&self) -> f64 {
        self.values.last().copied().unwrap_or(0.0)
    }

    /// Drop `n` entries from each end. Values are not re-based to zero, so a
    /// trimmed axis keeps reporting positions along the original path.
    pub fn trimmed(&self, n: usize) -> Self {
        if 2 * n >= self.values.len() {
            return Self { values: Vec::new() };
        }
        Self {
            values: self.values[n..self.values.len() - n].to_vec(),
        }
    }
}
