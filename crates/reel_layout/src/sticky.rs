//! Sticky staging region
//!
//! A story section is a tall scroll track with a viewport-sized stage
//! stuck to the top of the viewport. While the track scrolls underneath,
//! the stage stays put; the distance it stays put for is what progress is
//! measured against.
//!
//! ```text
//!  document_top ─┬──────────────┐  ← scroll offset here: pin starts
//!                │    stage     │
//!                │  (1 × vh)    │
//!                ├──────────────┤
//!                │              │
//!                │  track runs  │  track_height × vh in total
//!                │  underneath  │
//!                │              │
//!                └──────────────┘  ← stage bottom meets track bottom: pin ends
//! ```

use reel_core::Size;
use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};

/// Resolved scroll bounds of one track
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackBounds {
    /// Scroll offset at which the stage pins
    pub track_start: f32,
    /// Scroll distance the stage stays pinned for
    pub track_length: f32,
}

impl TrackBounds {
    /// Scroll offset at which the stage unpins
    pub fn track_end(&self) -> f32 {
        self.track_start + self.track_length
    }
}

/// A fixed-height track with a pinned viewport-sized stage
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StickyStage {
    /// Track height in multiples of the viewport height
    track_height: f32,
    /// Document offset of the top of the track
    document_top: f32,
}

impl StickyStage {
    /// A track exactly one viewport tall; it never pins
    pub const FLAT: StickyStage = StickyStage {
        track_height: 1.0,
        document_top: 0.0,
    };

    /// Track of `track_height` viewport heights, at the top of the document
    pub fn new(track_height: f32) -> Result<Self> {
        if !track_height.is_finite() || track_height <= 0.0 {
            return Err(LayoutError::InvalidTrackHeight(track_height));
        }
        Ok(Self {
            track_height,
            document_top: 0.0,
        })
    }

    /// Place the track at a document offset
    pub fn at(mut self, document_top: f32) -> Self {
        self.document_top = if document_top.is_finite() {
            document_top.max(0.0)
        } else {
            0.0
        };
        self
    }

    pub fn track_height(&self) -> f32 {
        self.track_height
    }

    pub fn document_top(&self) -> f32 {
        self.document_top
    }

    /// Full track height in pixels for a viewport
    pub fn track_pixels(&self, viewport: Size) -> f32 {
        self.track_height * viewport.height
    }

    /// Pin bounds for a viewport
    ///
    /// `None` when the viewport has not been laid out or the track is no
    /// taller than the stage; either way there is no distance to map.
    pub fn bounds(&self, viewport: Size) -> Option<TrackBounds> {
        if !viewport.is_laid_out() {
            return None;
        }
        let track_length = self.track_pixels(viewport) - viewport.height;
        if !track_length.is_finite() || track_length <= 0.0 {
            return None;
        }
        Some(TrackBounds {
            track_start: self.document_top,
            track_length,
        })
    }

    /// Top edge of the stage in viewport coordinates
    ///
    /// Positive while the track is still below the fold, 0 while pinned, and
    /// negative once the track has scrolled past.
    pub fn stage_top(&self, scroll_offset: f32, viewport: Size) -> f32 {
        let start = self.document_top;
        let end = start + (self.track_pixels(viewport) - viewport.height).max(0.0);
        if scroll_offset < start {
            start - scroll_offset
        } else if scroll_offset > end {
            end - scroll_offset
        } else {
            0.0
        }
    }

    pub fn is_pinned(&self, scroll_offset: f32, viewport: Size) -> bool {
        self.bounds(viewport)
            .is_some_and(|b| scroll_offset >= b.track_start && scroll_offset <= b.track_end())
    }
}
