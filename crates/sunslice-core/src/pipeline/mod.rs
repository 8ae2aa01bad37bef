pub mod config;
mod orchestrator;
mod types;

pub use orchestrator::{load_sequence, run_slice, run_slice_reported};
pub(crate) use types::NoOpReporter;
pub use types::{ProgressReporter, SliceOutput, SliceStage};
