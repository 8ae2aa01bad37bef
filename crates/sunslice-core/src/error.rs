use thiserror::Error;

#[derive(Error, Debug)]
pub enum SliceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Empty frame sequence")]
    EmptySequence,

    #[error(
        "Frame {index} has raster shape {found_height}x{found_width}, expected {expected_height}x{expected_width}"
    )]
    ShapeMismatch {
        index: usize,
        expected_height: usize,
        expected_width: usize,
        found_height: usize,
        found_width: usize,
    },

    #[error("Path needs at least {required} anchor(s) for {strategy}, got {found}")]
    InsufficientAnchors {
        strategy: String,
        required: usize,
        found: usize,
    },

    #[error("Custom sampling requested but no sampling function was supplied")]
    MissingCustomSampler,

    #[error("Invalid smoothing window: {0}")]
    InvalidWindow(String),

    #[error("Not supported: {0}")]
    Unsupported(String),

    #[error("Frame {frame_index}: pixel (row {row}, col {col}) lies outside the {height}x{width} raster")]
    PixelOutOfBounds {
        frame_index: usize,
        row: i64,
        col: i64,
        height: usize,
        width: usize,
    },

    #[error("Frame {frame_index}: anchor {anchor_index} projects to ({x}, {y}), not a pixel")]
    UnprojectableAnchor {
        frame_index: usize,
        anchor_index: usize,
        x: f64,
        y: f64,
    },

    #[error("Sampling frame {frame_index} produced an empty curve")]
    EmptyCurve { frame_index: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, SliceError>;
