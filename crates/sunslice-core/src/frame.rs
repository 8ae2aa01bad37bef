use std::sync::Arc;

use ndarray::Array2;

use crate::coords::{Observer, PixelCoord, PixelPosition, WorldCoord};
use crate::error::{Result, SliceError};
use crate::projection::Projection;

/// A single scalar image with its timestamp and projection.
#[derive(Clone, Debug)]
pub struct Frame {
    /// Pixel data, row-major, shape = (height, width)
    pub data: Array2<f32>,
    pub metadata: FrameMetadata,
    projection: Arc<dyn Projection>,
}

impl Frame {
    pub fn new(data: Array2<f32>, timestamp_us: u64, projection: Arc<dyn Projection>) -> Self {
        Self {
            data,
            metadata: FrameMetadata {
                timestamp_us,
                ..Default::default()
            },
            projection,
        }
    }

    pub fn with_colormap(mut self, colormap: impl Into<String>) -> Self {
        self.metadata.colormap = Some(colormap.into());
        self
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }

    pub fn timestamp_us(&self) -> u64 {
        self.metadata.timestamp_us
    }

    pub fn projection(&self) -> &dyn Projection {
        self.projection.as_ref()
    }

    pub fn world_to_pixel(&self, coord: &WorldCoord, observer: &Observer) -> PixelPosition {
        self.projection.world_to_pixel(coord, observer)
    }

    pub fn pixel_to_world(&self, position: PixelPosition) -> WorldCoord {
        self.projection.pixel_to_world(position)
    }

    /// Array index of `pixel`, or `PixelOutOfBounds` when it lies outside the raster.
    pub fn index_of(&self, pixel: PixelCoord) -> Result<(usize, usize)> {
        let (h, w) = self.data.dim();
        pixel
            .checked_index(h, w)
            .ok_or(SliceError::PixelOutOfBounds {
                frame_index: self.metadata.frame_index,
                row: pixel.row,
                col: pixel.col,
                height: h,
                width: w,
            })
    }

    /// Intensity at an integer pixel. Coordinates outside the raster are an error.
    pub fn value_at(&self, pixel: PixelCoord) -> Result<f32> {
        let (row, col) = self.index_of(pixel)?;
        Ok(self.data[[row, col]])
    }
}

#[derive(Clone, Debug, Default)]
pub struct FrameMetadata {
    /// Position in the owning sequence. Set by [`ImageSequence::new`].
    pub frame_index: usize,
    /// Observation time, microseconds since an arbitrary epoch.
    pub timestamp_us: u64,
    pub colormap: Option<String>,
}

/// Time-ordered frames sharing one raster shape.
#[derive(Clone, Debug)]
pub struct ImageSequence {
    frames: Vec<Frame>,
}

impl ImageSequence {
    /// Build a sequence, numbering frames in order.
    ///
    /// Fails if `frames` is empty or any raster differs in shape from the first.
    pub fn new(mut frames: Vec<Frame>) -> Result<Self> {
        let Some(first) = frames.first() else {
            return Err(SliceError::EmptySequence);
        };
        let (expected_height, expected_width) = first.data.dim();

        for (index, frame) in frames.iter_mut().enumerate() {
            let (found_height, found_width) = frame.data.dim();
            if (found_height, found_width) != (expected_height, expected_width) {
                return Err(SliceError::ShapeMismatch {
                    index,
                    expected_height,
                    expected_width,
                    found_height,
                    found_width,
                });
            }
            frame.metadata.frame_index = index;
        }

        Ok(Self { frames })
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Frame> {
        self.frames.iter()
    }

    /// Shared raster shape `(height, width)`.
    pub fn shape(&self) -> (usize, usize) {
        self.frames[0].data.dim()
    }

    pub fn timestamps(&self) -> Vec<u64> {
        self.frames.iter().map(|f| f.metadata.timestamp_us).collect()
    }

    /// Colormap of the first frame.
    pub fn colormap(&self) -> Option<&str> {
        self.frames[0].metadata.colormap.as_deref()
    }
}

impl<'a> IntoIterator for &'a ImageSequence {
    type Item = &'a Frame;
    type IntoIter = std::slice::Iter<'a, Frame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}
