pub mod raster;
mod strategy;

pub use raster::{bresenham_line, dda_line, LineAlgorithm};
pub use strategy::{
    project_anchors, DistanceReference, PathSampler, SampleFn, SamplingStrategy,
};
