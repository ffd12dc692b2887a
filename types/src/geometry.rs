//! Terminal viewport dimensions.

use std::num::NonZeroU16;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("viewport must be non-empty, got {width}x{height}")]
pub struct GeometryError {
    pub width: u16,
    pub height: u16,
}

/// Current terminal size. Both dimensions are always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    width: NonZeroU16,
    height: NonZeroU16,
}

impl Geometry {
    pub fn new(width: u16, height: u16) -> Result<Self, GeometryError> {
        match (NonZeroU16::new(width), NonZeroU16::new(height)) {
            (Some(width), Some(height)) => Ok(Self { width, height }),
            _ => Err(GeometryError { width, height }),
        }
    }

    #[must_use]
    pub const fn width(self) -> u16 {
        self.width.get()
    }

    #[must_use]
    pub const fn height(self) -> u16 {
        self.height.get()
    }
}
