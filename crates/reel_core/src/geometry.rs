//! Viewport geometry

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// A width/height pair in logical pixels
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Create a size, rejecting negative or non-finite dimensions
    pub fn try_new(width: f32, height: f32) -> Result<Self> {
        check_dimension("width", width)?;
        check_dimension("height", height)?;
        Ok(Self { width, height })
    }

    /// Whether both dimensions are non-zero (layout has resolved)
    pub fn is_laid_out(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

fn check_dimension(name: &'static str, value: f32) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(CoreError::InvalidDimension { name, value });
    }
    Ok(())
}

/// Everything a section can read from the viewport on demand
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewportMetrics {
    /// Viewport width in logical pixels
    pub width: f32,
    /// Viewport height in logical pixels
    pub height: f32,
    /// Document scroll offset (distance from the top of the document)
    pub scroll_offset: f32,
}

impl ViewportMetrics {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}
