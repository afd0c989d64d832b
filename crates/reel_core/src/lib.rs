//! Reel Core Runtime
//!
//! Foundational primitives shared by the Reel animation crates:
//!
//! - **Geometry**: viewport sizes and scroll metrics
//! - **Viewport Signal**: the passive source of scroll/resize notifications,
//!   with explicit subscription handles stored in a slot arena
//! - **Session Flags**: process-wide key-value flags with explicit
//!   init/teardown (e.g. "has seen splash")
//!
//! # Example
//!
//! ```rust
//! use reel_core::{Viewport, ViewportEvent};
//!
//! let viewport = Viewport::new(1280.0, 800.0);
//!
//! let sub = viewport.subscribe(|event, metrics| {
//!     if let ViewportEvent::Scrolled { offset } = event {
//!         assert_eq!(metrics.scroll_offset, *offset);
//!     }
//! });
//!
//! viewport.scroll_to(400.0);
//! sub.cancel();
//! assert_eq!(viewport.listener_count(), 0);
//! ```

pub mod error;
pub mod geometry;
pub mod store;
pub mod viewport;

pub use error::{CoreError, Result};
pub use geometry::{Size, ViewportMetrics};
pub use store::{FlagStore, MemoryFlagStore, SessionFlags, HAS_SEEN_SPLASH};
pub use viewport::{ListenerId, Subscription, Viewport, ViewportEvent};
