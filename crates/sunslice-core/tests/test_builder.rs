mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use sunslice_core::builder::{build_curves, RowOutcome, SliceWarning};
use sunslice_core::coords::{Observer, PixelCoord, PixelCurve, PixelPosition, WorldCoord};
use sunslice_core::error::{Result, SliceError};
use sunslice_core::frame::{Frame, ImageSequence};
use sunslice_core::path::SlicePath;
use sunslice_core::pipeline::{ProgressReporter, SliceStage};
use sunslice_core::projection::Projection;
use sunslice_core::sample::{LineAlgorithm, PathSampler, SamplingStrategy};
use sunslice_core::slice::TimeDistanceSlice;

use common::{drifting_sequence, path, ramp_raster, ramp_sequence};

/// Samples row 0, columns `0..len(frame)`, with a per-frame length.
struct RowSampler {
    lengths: fn(usize) -> usize,
}

impl PathSampler for RowSampler {
    fn sample(&self, frame: &Frame, _path: &SlicePath) -> Result<PixelCurve> {
        let len = (self.lengths)(frame.metadata.frame_index);
        Ok((0..len as i64).map(|col| PixelCoord::new(0, col)).collect())
    }

    fn name(&self) -> String {
        "row sampler".into()
    }
}

/// Projection that maps everything to NaN.
#[derive(Debug)]
struct BrokenProjection;

impl Projection for BrokenProjection {
    fn world_to_pixel(&self, _coord: &WorldCoord, _observer: &Observer) -> PixelPosition {
        PixelPosition::new(f64::NAN, f64::NAN)
    }

    fn pixel_to_world(&self, _position: PixelPosition) -> WorldCoord {
        WorldCoord::new(f64::NAN, f64::NAN)
    }
}

#[derive(Default)]
struct CountingReporter {
    stages: AtomicUsize,
    advances: AtomicUsize,
    max_done: AtomicUsize,
}

impl ProgressReporter for CountingReporter {
    fn begin_stage(&self, stage: SliceStage, total_items: Option<usize>) {
        if stage == SliceStage::Sampling {
            assert_eq!(total_items, Some(10));
        }
        self.stages.fetch_add(1, Ordering::Relaxed);
    }

    fn advance(&self, items_done: usize) {
        self.advances.fetch_add(1, Ordering::Relaxed);
        self.max_done.fetch_max(items_done, Ordering::Relaxed);
    }
}

// ---------------------------------------------------------------------------
// Exact-point sampling
// ---------------------------------------------------------------------------

#[test]
fn test_exact_point_curve_len_matches_anchors() {
    let seq = ramp_sequence(6, 32, 32);
    let p = path(&[[1.0, 1.0], [5.0, 4.0], [9.0, 4.0], [20.0, 30.0]]);
    let slice = TimeDistanceSlice::compute(&seq, &p, &SamplingStrategy::ExactPoint).unwrap();

    assert_eq!(slice.intensity().dim(), (6, 4));
    assert!(slice.curves().iter().all(|c| c.len() == 4));
    assert!(slice.warnings().is_empty());

    let d = slice.distance().values();
    assert_eq!(d.len(), 4);
    assert_eq!(d[0], 0.0);
    assert!(d.windows(2).all(|w| w[1] >= w[0]));
    assert!((d[1] - 5.0).abs() < 1e-5);
    assert!((d[2] - 9.0).abs() < 1e-5);
}

#[test]
fn test_intensity_read_in_row_col_order() {
    let seq = ramp_sequence(3, 16, 16);
    // tx is the column, ty the row.
    let p = path(&[[7.0, 2.0], [3.0, 11.0]]);
    let slice = TimeDistanceSlice::compute(&seq, &p, &SamplingStrategy::ExactPoint).unwrap();
    let m = slice.intensity();
    assert_eq!(m[[0, 0]], 207.0);
    assert_eq!(m[[0, 1]], 1103.0);
    assert_eq!(m[[2, 0]], 2207.0);
    assert_eq!(slice.times(), &[0, 1_000_000, 2_000_000]);
}

// ---------------------------------------------------------------------------
// Length reconciliation
// ---------------------------------------------------------------------------

#[test]
fn test_longer_curve_is_truncated_with_warning() {
    let seq = ramp_sequence(8, 4, 16);
    let sampler = RowSampler {
        lengths: |i| if i == 5 { 8 } else { 5 },
    };
    let slice = TimeDistanceSlice::compute(&seq, &path(&[[0.0, 0.0]]), &sampler).unwrap();

    assert_eq!(slice.curve_len(), 5);
    assert_eq!(slice.curves()[5].len(), 5);
    assert_eq!(
        slice.outcomes()[5],
        RowOutcome {
            written: 5,
            truncated: true
        }
    );
    assert_eq!(
        slice.warnings(),
        &[SliceWarning::CurveTruncated {
            frame_index: 5,
            canonical_len: 5,
            sampled_len: 8,
        }]
    );
    let row: Vec<f64> = slice.intensity().row(5).to_vec();
    assert_eq!(row, vec![5000.0, 5001.0, 5002.0, 5003.0, 5004.0]);
}

#[test]
fn test_shorter_curve_leaves_nan_with_warning() {
    let seq = ramp_sequence(3, 4, 16);
    let sampler = RowSampler {
        lengths: |i| if i == 2 { 3 } else { 6 },
    };
    let slice = TimeDistanceSlice::compute(&seq, &path(&[[0.0, 0.0]]), &sampler).unwrap();

    let row = slice.intensity().row(2);
    assert_eq!(row[0], 2000.0);
    assert_eq!(row[2], 2002.0);
    assert!(row[3].is_nan() && row[4].is_nan() && row[5].is_nan());
    assert_eq!(
        slice.outcomes()[2],
        RowOutcome {
            written: 3,
            truncated: false
        }
    );
    assert!(matches!(
        slice.warnings(),
        [SliceWarning::CurveShortened {
            frame_index: 2,
            canonical_len: 6,
            sampled_len: 3
        }]
    ));
    // Other rows are complete.
    assert!(slice.intensity().row(1).iter().all(|v| v.is_finite()));
}

#[test]
fn test_empty_first_curve_is_an_error() {
    let seq = ramp_sequence(2, 4, 4);
    let sampler = RowSampler { lengths: |_| 0 };
    assert!(matches!(
        TimeDistanceSlice::compute(&seq, &path(&[[0.0, 0.0]]), &sampler),
        Err(SliceError::EmptyCurve { frame_index: 0 })
    ));
}

#[test]
fn test_pixel_outside_raster_is_fatal() {
    // Drifts 3 px right per frame; by frame 3 the right anchor leaves the raster.
    let seq = drifting_sequence(6, 10, 10, 3.0, 0.0);
    let p = path(&[[0.0, 5.0], [2.0, 5.0]]);
    let strategy = SamplingStrategy::LineRasterized(LineAlgorithm::Bresenham);
    match TimeDistanceSlice::compute(&seq, &p, &strategy) {
        Err(SliceError::PixelOutOfBounds {
            frame_index, col, ..
        }) => {
            assert_eq!(frame_index, 3);
            assert_eq!(col, 11);
        }
        other => panic!("expected out-of-bounds, got {other:?}"),
    }
}

#[test]
fn test_far_off_anchor_is_out_of_bounds_for_lines() {
    let seq = ramp_sequence(2, 16, 16);
    for algo in [LineAlgorithm::Bresenham, LineAlgorithm::Dda] {
        for far in [1e9, -1e9, 9.0e18] {
            let p = path(&[[1.0, 1.0], [far, 1.0]]);
            let result = TimeDistanceSlice::compute(&seq, &p, &SamplingStrategy::LineRasterized(algo));
            assert!(
                matches!(
                    result,
                    Err(SliceError::PixelOutOfBounds {
                        frame_index: 0,
                        row: 1,
                        ..
                    })
                ),
                "{algo} to {far}: {result:?}"
            );
        }
    }
}

#[test]
fn test_unrepresentable_anchor_is_an_error() {
    let seq = ramp_sequence(2, 16, 16);
    let p = path(&[[1.0, 1.0], [1e19, 1.0]]);
    for strategy in [
        SamplingStrategy::ExactPoint,
        SamplingStrategy::LineRasterized(LineAlgorithm::Bresenham),
    ] {
        assert!(matches!(
            TimeDistanceSlice::compute(&seq, &p, &strategy),
            Err(SliceError::UnprojectableAnchor {
                frame_index: 0,
                anchor_index: 1,
                ..
            })
        ));
    }
}

#[test]
fn test_non_finite_projection_is_an_error() {
    let frame = Frame::new(ramp_raster(8, 8, 0.0), 0, Arc::new(BrokenProjection));
    let seq = ImageSequence::new(vec![frame]).unwrap();
    let p = path(&[[3.0, 4.0]]);
    match TimeDistanceSlice::compute(&seq, &p, &SamplingStrategy::ExactPoint) {
        Err(SliceError::UnprojectableAnchor {
            frame_index,
            anchor_index,
            x,
            y,
        }) => {
            assert_eq!((frame_index, anchor_index), (0, 0));
            assert!(x.is_nan() && y.is_nan());
        }
        other => panic!("expected unprojectable anchor, got {other:?}"),
    }
}

#[test]
fn test_excess_pixels_outside_raster_are_ignored() {
    // Only the first `canonical_len` pixels are read, so a curve whose
    // discarded tail leaves the raster still succeeds.
    let seq = ramp_sequence(2, 4, 4);
    let sampler = RowSampler {
        lengths: |i| if i == 0 { 4 } else { 9 },
    };
    let slice = TimeDistanceSlice::compute(&seq, &path(&[[0.0, 0.0]]), &sampler).unwrap();
    assert_eq!(slice.warnings().len(), 1);
}

// ---------------------------------------------------------------------------
// Determinism and parallelism
// ---------------------------------------------------------------------------

#[test]
fn test_recompute_is_bit_identical() {
    let seq = drifting_sequence(12, 40, 40, 0.37, -0.21);
    let p = path(&[[5.0, 30.0], [18.0, 22.0], [30.0, 25.0]]);
    let strategy = SamplingStrategy::LineRasterized(LineAlgorithm::Dda);

    let a = TimeDistanceSlice::compute(&seq, &p, &strategy).unwrap();
    let b = TimeDistanceSlice::compute(&seq, &p, &strategy).unwrap();

    let bits = |s: &TimeDistanceSlice| s.intensity().iter().map(|v| v.to_bits()).collect::<Vec<_>>();
    assert_eq!(bits(&a), bits(&b));
    assert_eq!(a.distance(), b.distance());
    assert_eq!(a.curves(), b.curves());
}

#[test]
fn test_parallel_rows_match_per_frame_sampling() {
    // 10 frames takes the parallel path; compare against sampling each frame alone.
    let seq = drifting_sequence(10, 40, 40, 0.5, 0.25);
    let p = path(&[[4.0, 4.0], [30.0, 17.0]]);
    let strategy = SamplingStrategy::LineRasterized(LineAlgorithm::Bresenham);
    let slice = TimeDistanceSlice::compute(&seq, &p, &strategy).unwrap();

    for (i, frame) in seq.iter().enumerate() {
        let mut curve = strategy.sample(frame, &p).unwrap();
        curve.truncate(slice.curve_len());
        assert_eq!(slice.curves()[i], curve, "frame {i}");
        for (j, px) in curve.iter().enumerate() {
            assert_eq!(slice.intensity()[[i, j]], frame.value_at(*px).unwrap() as f64);
        }
    }
}

#[test]
fn test_progress_reported_for_every_frame() {
    let seq = ramp_sequence(10, 8, 8);
    let reporter = CountingReporter::default();
    let build = build_curves(
        &seq,
        &path(&[[0.0, 0.0], [7.0, 7.0]]),
        &SamplingStrategy::LineRasterized(LineAlgorithm::Bresenham),
        &reporter,
    )
    .unwrap();
    assert_eq!(build.canonical_len(), 8);
    assert_eq!(reporter.stages.load(Ordering::Relaxed), 1);
    assert_eq!(reporter.advances.load(Ordering::Relaxed), 10);
    assert_eq!(reporter.max_done.load(Ordering::Relaxed), 10);
}
