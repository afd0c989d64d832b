//! Reel Layout
//!
//! Scroll geometry for story sections: which breakpoint a viewport width
//! falls in, where each block sits in the document, how far a sticky track
//! scrolls while its stage stays pinned, and how that maps to progress.
//!
//! # Example
//!
//! ```rust
//! use reel_core::Size;
//! use reel_layout::{ProgressMapper, StickyStage};
//!
//! // A 300vh track starting 800px down the page
//! let stage = StickyStage::new(3.0).unwrap().at(800.0);
//! let mut mapper = ProgressMapper::new(stage, Size::new(1280.0, 800.0));
//!
//! assert_eq!(mapper.progress(800.0), 0.0);
//! assert_eq!(mapper.progress(1600.0), 0.5);
//! assert_eq!(mapper.progress(99_999.0), 1.0);
//!
//! // Geometry is recomputed on resize only
//! assert!(mapper.on_resize(Size::new(600.0, 400.0)));
//! assert_eq!(mapper.progress(1200.0), 0.5);
//! ```

pub mod breakpoint;
pub mod document;
pub mod error;
pub mod progress;
pub mod sticky;

pub use breakpoint::{Breakpoint, CoverageReport};
pub use document::{DocumentLayout, Length, Offset};
pub use error::{LayoutError, Result};
pub use progress::{ProgressMapper, ProgressState};
pub use sticky::{StickyStage, TrackBounds};
