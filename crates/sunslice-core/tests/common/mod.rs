#![allow(dead_code)]

use std::sync::Arc;

use ndarray::Array2;

use sunslice_core::coords::Observer;
use sunslice_core::frame::{Frame, ImageSequence};
use sunslice_core::path::SlicePath;
use sunslice_core::projection::{LinearProjection, Projection};

/// Projection where pixel (x, y) sits at world (x, y) arcsec.
pub fn unit_projection() -> LinearProjection {
    LinearProjection::default()
}

/// Raster whose value at (row, col) is `row * 100 + col + offset`.
pub fn ramp_raster(h: usize, w: usize, offset: f32) -> Array2<f32> {
    Array2::from_shape_fn((h, w), |(row, col)| (row * 100 + col) as f32 + offset)
}

pub fn make_frame(data: Array2<f32>, timestamp_us: u64, projection: LinearProjection) -> Frame {
    let projection: Arc<dyn Projection> = Arc::new(projection);
    Frame::new(data, timestamp_us, projection)
}

/// `n` ramp frames one second apart; frame `i` is offset by `1000 * i`.
pub fn ramp_sequence(n: usize, h: usize, w: usize) -> ImageSequence {
    let frames = (0..n)
        .map(|i| {
            make_frame(
                ramp_raster(h, w, 1000.0 * i as f32),
                i as u64 * 1_000_000,
                unit_projection(),
            )
        })
        .collect();
    ImageSequence::new(frames).expect("uniform shapes")
}

/// Ramp frames whose pointing drifts by `(dx, dy)` pixels per frame.
pub fn drifting_sequence(n: usize, h: usize, w: usize, dx: f64, dy: f64) -> ImageSequence {
    let frames = (0..n)
        .map(|i| {
            let projection = unit_projection().shifted(dx * i as f64, dy * i as f64);
            make_frame(ramp_raster(h, w, 0.0), i as u64 * 1_000_000, projection)
        })
        .collect();
    ImageSequence::new(frames).expect("uniform shapes")
}

/// Path through `[tx, ty]` arcsec points, default observer.
pub fn path(points: &[[f64; 2]]) -> SlicePath {
    SlicePath::from_arcsec(points, Observer::default()).expect("non-empty path")
}
