//! Progress mapper
//!
//! Converts a document scroll offset into the normalized progress of one
//! sticky track. Bounds are cached and only recomputed when the viewport
//! size changes; scroll handling is a clamp and a divide.

use reel_core::Size;
use serde::Serialize;

use crate::sticky::{StickyStage, TrackBounds};

/// Scroll position of one track
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressState {
    pub track_start: f32,
    pub track_length: f32,
    pub current_offset: f32,
}

impl ProgressState {
    /// `clamp((current_offset - track_start) / track_length, 0, 1)`
    ///
    /// A non-positive length or a NaN offset reads as 0.
    pub fn progress(&self) -> f32 {
        if self.track_length.is_nan() || self.track_length <= 0.0 {
            return 0.0;
        }
        let raw = (self.current_offset - self.track_start) / self.track_length;
        if raw.is_nan() {
            0.0
        } else {
            raw.clamp(0.0, 1.0)
        }
    }
}

/// Maps scroll offsets to progress for one sticky stage
#[derive(Clone, Debug)]
pub struct ProgressMapper {
    stage: StickyStage,
    viewport: Size,
    bounds: Option<TrackBounds>,
}

impl ProgressMapper {
    pub fn new(stage: StickyStage, viewport: Size) -> Self {
        let bounds = stage.bounds(viewport);
        if bounds.is_none() {
            tracing::debug!(?viewport, "track geometry unavailable, progress pinned at 0");
        }
        Self {
            stage,
            viewport,
            bounds,
        }
    }

    pub fn stage(&self) -> &StickyStage {
        &self.stage
    }

    /// Cached bounds, `None` while geometry is unavailable
    pub fn bounds(&self) -> Option<TrackBounds> {
        self.bounds
    }

    /// Recompute bounds for a new viewport size
    ///
    /// Returns `true` when the size changed and bounds were recomputed.
    pub fn on_resize(&mut self, viewport: Size) -> bool {
        if viewport == self.viewport {
            return false;
        }
        self.viewport = viewport;
        self.bounds = self.stage.bounds(viewport);
        tracing::trace!(?viewport, bounds = ?self.bounds, "track bounds recomputed");
        true
    }

    /// Move the track to a new document offset
    pub fn relocate(&mut self, document_top: f32) {
        self.stage = self.stage.at(document_top);
        self.bounds = self.stage.bounds(self.viewport);
    }

    pub fn state(&self, offset: f32) -> Option<ProgressState> {
        self.bounds.map(|b| ProgressState {
            track_start: b.track_start,
            track_length: b.track_length,
            current_offset: offset,
        })
    }

    /// Progress in `[0, 1]`; 0 while geometry is unavailable
    pub fn progress(&self, offset: f32) -> f32 {
        self.state(offset).map_or(0.0, |s| s.progress())
    }
}
