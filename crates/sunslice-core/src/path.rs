use crate::coords::{Observer, WorldCoord};
use crate::error::{Result, SliceError};

/// Ordered world-coordinate anchors defining a cut through the scene.
#[derive(Clone, Debug, PartialEq)]
pub struct SlicePath {
    anchors: Vec<WorldCoord>,
    observer: Observer,
}

impl SlicePath {
    /// A path needs at least one anchor. Strategies that join anchors with
    /// lines check for a second one when the slice is built.
    pub fn new(anchors: Vec<WorldCoord>, observer: Observer) -> Result<Self> {
        if anchors.is_empty() {
            return Err(SliceError::InsufficientAnchors {
                strategy: "any path".into(),
                required: 1,
                found: 0,
            });
        }
        Ok(Self { anchors, observer })
    }

    /// Path from `[tx, ty]` arcsec pairs.
    pub fn from_arcsec(points: &[[f64; 2]], observer: Observer) -> Result<Self> {
        Self::new(
            points.iter().map(|&[tx, ty]| WorldCoord::new(tx, ty)).collect(),
            observer,
        )
    }

    pub fn anchors(&self) -> &[WorldCoord] {
        &self.anchors
    }

    pub fn observer(&self) -> &Observer {
        &self.observer
    }

    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    /// Sum of anchor-to-anchor separations, arcsec.
    pub fn length_arcsec(&self) -> f64 {
        self.anchors
            .windows(2)
            .map(|pair| pair[1].separation(&pair[0]))
            .sum()
    }
}
