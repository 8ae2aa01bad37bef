use std::sync::Arc;

use tracing::{debug, info};

use crate::error::Result;
use crate::frame::{Frame, ImageSequence};
use crate::io::image_io::load_raster;
use crate::path::SlicePath;
use crate::projection::Projection;
use crate::sample::{SampleFn, SamplingStrategy};
use crate::slice::TimeDistanceSlice;

use super::config::SliceConfig;
use super::types::{NoOpReporter, ProgressReporter, SliceOutput, SliceStage};

/// Read every configured frame from disk into a validated sequence.
pub fn load_sequence(config: &SliceConfig, reporter: &dyn ProgressReporter) -> Result<ImageSequence> {
    config.validate()?;
    reporter.begin_stage(SliceStage::Loading, Some(config.frames.len()));

    let shared: Arc<dyn Projection> = Arc::new(config.projection.clone());
    let mut frames = Vec::with_capacity(config.frames.len());
    for (i, source) in config.frames.iter().enumerate() {
        let data = load_raster(&source.path)?;
        let projection: Arc<dyn Projection> = match source.projection {
            Some(ref own) => Arc::new(own.clone()),
            None => Arc::clone(&shared),
        };
        debug!(path = %source.path.display(), shape = ?data.dim(), "Loaded frame");
        frames.push(
            Frame::new(data, source.timestamp_us, projection).with_colormap(config.colormap.clone()),
        );
        reporter.advance(i + 1);
    }

    reporter.finish_stage();
    ImageSequence::new(frames)
}

/// Run a configured slice with a thread-safe progress reporter.
///
/// `custom` is only consulted when the config asks for custom sampling.
pub fn run_slice_reported(
    config: &SliceConfig,
    custom: Option<SampleFn>,
    reporter: Arc<dyn ProgressReporter>,
) -> Result<SliceOutput> {
    // Resolve the strategy before any frame is read.
    let strategy = SamplingStrategy::from_method(&config.sampling, custom)?;
    let path = SlicePath::from_arcsec(&config.path.anchors, config.path.observer.clone())?;

    let sequence = load_sequence(config, reporter.as_ref())?;
    let (h, w) = sequence.shape();
    info!(
        frames = sequence.len(),
        height = h,
        width = w,
        method = %config.sampling,
        "Sequence loaded"
    );

    let slice = TimeDistanceSlice::compute_reported(&sequence, &path, &strategy, reporter.as_ref())?;

    let smoothed = match config.smoothing {
        Some(ref window) => {
            reporter.begin_stage(SliceStage::Smoothing, None);
            let smoothed = slice.smoothed(window)?;
            reporter.finish_stage();
            info!(window = %window, "Smoothing applied");
            Some(smoothed)
        }
        None => None,
    };

    Ok(SliceOutput { slice, smoothed })
}

/// Run a configured slice without progress reporting.
pub fn run_slice(config: &SliceConfig, custom: Option<SampleFn>) -> Result<SliceOutput> {
    run_slice_reported(config, custom, Arc::new(NoOpReporter))
}
