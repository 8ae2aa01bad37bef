use std::sync::atomic::{AtomicUsize, Ordering};

use ndarray::Array2;
use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::consts::PARALLEL_FRAME_THRESHOLD;
use crate::coords::PixelCurve;
use crate::error::{Result, SliceError};
use crate::frame::{Frame, ImageSequence};
use crate::path::SlicePath;
use crate::pipeline::{ProgressReporter, SliceStage};
use crate::sample::PathSampler;

/// A recoverable mismatch between a frame's curve and the canonical length.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum SliceWarning {
    /// The frame sampled more pixels than the canonical length; the excess
    /// was dropped.
    CurveTruncated {
        frame_index: usize,
        canonical_len: usize,
        sampled_len: usize,
    },
    /// The frame sampled fewer pixels than the canonical length; the trailing
    /// cells of its row are NaN.
    CurveShortened {
        frame_index: usize,
        canonical_len: usize,
        sampled_len: usize,
    },
}

impl std::fmt::Display for SliceWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CurveTruncated {
                frame_index,
                canonical_len,
                sampled_len,
            } => write!(
                f,
                "frame {frame_index}: curve has {sampled_len} pixels, kept the first {canonical_len}"
            ),
            Self::CurveShortened {
                frame_index,
                canonical_len,
                sampled_len,
            } => write!(
                f,
                "frame {frame_index}: curve has {sampled_len} of {canonical_len} pixels, remaining cells are NaN"
            ),
        }
    }
}

/// How much of one frame's curve made it into the intensity matrix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct RowOutcome {
    /// Cells filled from the frame's raster. The rest of the row is NaN.
    pub written: usize,
    /// The frame's curve was longer than the row and was cut.
    pub truncated: bool,
}

/// Intensity matrix and per-frame curves for a whole sequence.
#[derive(Clone, Debug)]
pub struct CurveBuild {
    /// Shape `(frames, canonical_len)`.
    pub intensity: Array2<f64>,
    /// Per-frame pixel curves, cut to at most `canonical_len`.
    pub curves: Vec<PixelCurve>,
    pub outcomes: Vec<RowOutcome>,
    /// Warnings in frame order.
    pub warnings: Vec<SliceWarning>,
}

impl CurveBuild {
    pub fn canonical_len(&self) -> usize {
        self.intensity.ncols()
    }
}

struct FrameRow {
    values: Vec<f64>,
    curve: PixelCurve,
    outcome: RowOutcome,
}

/// Read `frame` along `curve`, filling exactly `canonical_len` cells.
fn extract_row(frame: &Frame, mut curve: PixelCurve, canonical_len: usize) -> Result<FrameRow> {
    let truncated = curve.len() > canonical_len;
    curve.truncate(canonical_len);

    let mut values = Vec::with_capacity(canonical_len);
    for &pixel in &curve {
        values.push(frame.value_at(pixel)? as f64);
    }
    let written = values.len();
    values.resize(canonical_len, f64::NAN);

    Ok(FrameRow {
        values,
        curve,
        outcome: RowOutcome { written, truncated },
    })
}

fn outcome_warning(frame_index: usize, sampled_len: usize, canonical_len: usize) -> Option<SliceWarning> {
    match sampled_len.cmp(&canonical_len) {
        std::cmp::Ordering::Greater => Some(SliceWarning::CurveTruncated {
            frame_index,
            canonical_len,
            sampled_len,
        }),
        std::cmp::Ordering::Less => Some(SliceWarning::CurveShortened {
            frame_index,
            canonical_len,
            sampled_len,
        }),
        std::cmp::Ordering::Equal => None,
    }
}

/// Sample every frame of `sequence` along `path` and assemble the
/// `(frames, canonical_len)` intensity matrix.
///
/// The canonical length is the first frame's curve length. Longer curves
/// are cut and shorter ones leave NaN cells; both produce a warning. A pixel
/// outside a frame's raster aborts the build.
pub fn build_curves(
    sequence: &ImageSequence,
    path: &SlicePath,
    sampler: &dyn PathSampler,
    reporter: &dyn ProgressReporter,
) -> Result<CurveBuild> {
    if path.len() < sampler.min_anchors() {
        return Err(SliceError::InsufficientAnchors {
            strategy: sampler.name(),
            required: sampler.min_anchors(),
            found: path.len(),
        });
    }

    let frames = sequence.frames();
    let total = frames.len();
    reporter.begin_stage(SliceStage::Sampling, Some(total));

    let first_curve = sampler.sample(&frames[0], path)?;
    let canonical_len = first_curve.len();
    if canonical_len == 0 {
        return Err(SliceError::EmptyCurve { frame_index: 0 });
    }
    debug!(canonical_len, sampler = %sampler.name(), "Canonical curve length fixed by frame 0");

    let counter = AtomicUsize::new(0);
    let process = |frame: &Frame, curve: PixelCurve| -> Result<(usize, FrameRow)> {
        let sampled_len = curve.len();
        let row = extract_row(frame, curve, canonical_len)?;
        let done = counter.fetch_add(1, Ordering::Relaxed) + 1;
        reporter.advance(done);
        Ok((sampled_len, row))
    };

    let mut rows: Vec<(usize, FrameRow)> = Vec::with_capacity(total);
    rows.push(process(&frames[0], first_curve)?);

    let rest = &frames[1..];
    if rest.len() >= PARALLEL_FRAME_THRESHOLD {
        let results: Vec<Result<(usize, FrameRow)>> = rest
            .par_iter()
            .map(|frame| process(frame, sampler.sample(frame, path)?))
            .collect();
        for result in results {
            rows.push(result?);
        }
    } else {
        for frame in rest {
            rows.push(process(frame, sampler.sample(frame, path)?)?);
        }
    }

    let mut intensity = Array2::<f64>::from_elem((total, canonical_len), f64::NAN);
    let mut curves = Vec::with_capacity(total);
    let mut outcomes = Vec::with_capacity(total);
    let mut warnings = Vec::new();

    for (frame_index, (sampled_len, row)) in rows.into_iter().enumerate() {
        for (cell, value) in intensity.row_mut(frame_index).iter_mut().zip(&row.values) {
            *cell = *value;
        }
        if let Some(warning) = outcome_warning(frame_index, sampled_len, canonical_len) {
            warnings.push(warning);
        }
        curves.push(row.curve);
        outcomes.push(row.outcome);
    }

    reporter.finish_stage();

    Ok(CurveBuild {
        intensity,
        curves,
        outcomes,
        warnings,
    })
}
