use crate::process::Smoothed;
use crate::slice::TimeDistanceSlice;

/// Slice computation stage, used for progress reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SliceStage {
    Loading,
    Sampling,
    DistanceAxis,
    Smoothing,
}

impl std::fmt::Display for SliceStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Loading => write!(f, "Loading frames"),
            Self::Sampling => write!(f, "Sampling curves"),
            Self::DistanceAxis => write!(f, "Building distance axis"),
            Self::Smoothing => write!(f, "Smoothing"),
        }
    }
}

/// Result of a configured slice run.
#[derive(Clone, Debug)]
pub struct SliceOutput {
    pub slice: TimeDistanceSlice,
    /// Present when the config asked for smoothing.
    pub smoothed: Option<Smoothed>,
}

/// Thread-safe progress reporting for slice computations.
///
/// All methods have default no-op implementations. During sampling,
/// `advance` may be called from several worker threads; `items_done` is a
/// running count, not a frame index, and calls can arrive out of order.
pub trait ProgressReporter: Send + Sync {
    /// A new stage has started. `total_items` is the number of work items
    /// in this stage (e.g., frame count), if known.
    fn begin_stage(&self, _stage: SliceStage, _total_items: Option<usize>) {}

    /// Work items completed so far within the current stage.
    fn advance(&self, _items_done: usize) {}

    /// The current stage is finished.
    fn finish_stage(&self) {}
}

/// No-op progress reporter, used when no reporter is supplied.
pub(crate) struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}
