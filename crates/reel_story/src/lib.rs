//! Reel Story Sections
//!
//! The scroll-synchronized "scrollytelling" engine. A [`StorySection`] is a
//! sticky track plus one animation program per breakpoint; mounting it
//! against a [`Viewport`](reel_core::Viewport) subscribes to scroll and
//! resize, maps scroll to progress, keeps exactly one variant active, and
//! writes sampled snapshots to the section's visual targets.
//!
//! # Features
//!
//! - **Variant Selection**: breakpoint-scoped programs with reset-on-switch
//! - **Playback**: immediate or lagged (scrubbed) sampling of the active timeline
//! - **Story Pages**: sections stacked in a document, addressed by slot handles
//! - **Showcases**: the application, brand and web feature sections
//! - **Menu**: open/closed disclosure with staggered reveal and scroll suspension
//! - **Splash**: once-per-session intro sequence driven by cancellable timers
//!
//! # Example
//!
//! ```rust
//! use reel_core::Viewport;
//! use reel_layout::Offset;
//! use reel_story::{showcase, MountedSection};
//!
//! let viewport = Viewport::new(1280.0, 800.0);
//! let section = MountedSection::mount(&showcase::application(), Offset::px(0.0), &viewport);
//! assert_eq!(section.active_variant().as_deref(), Some("desktop"));
//!
//! // Half way down the 300vh track
//! viewport.scroll_to(800.0);
//! assert_eq!(section.progress(), 0.5);
//!
//! section.unmount();
//! assert_eq!(viewport.listener_count(), 0);
//! ```

pub mod driver;
pub mod error;
pub mod menu;
pub mod page;
pub mod section;
pub mod showcase;
pub mod splash;
pub mod targets;
pub mod variant;

pub use driver::{PlaybackDriver, Scrub};
pub use error::{Result, StoryError};
pub use menu::{
    BodyScroll, Disclosure, MenuController, MenuEvent, MenuLayout, MenuVisuals, Route, ScrollLock,
    ScrollSuspension, ROUTES,
};
pub use page::{SectionId, StoryPage};
pub use section::{MountedSection, SectionReport, StorySection};
pub use splash::{Splash, SplashStage, SplashVisuals};
pub use targets::VisualTargets;
pub use variant::{
    BreakpointVariant, NoVariantReason, VariantChange, VariantSelector, VariantStatus,
};
