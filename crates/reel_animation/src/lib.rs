//! Reel Animation System
//!
//! Declarative timelines sampled by a normalized progress value, and the
//! time-driven primitives that share the same interpolation.
//!
//! # Features
//!
//! - **Easing**: GSAP-style power/back curves and CSS cubic-beziers, parsed from names
//! - **Property Snapshots**: scale, rotation, translation and opacity of one visual target
//! - **Timelines**: ordered and parallel steps positioned against a shared cursor
//! - **Sampling**: pure `progress -> snapshot map` evaluation with clamping
//! - **Transitions**: the same interpolation driven by elapsed wall-clock time
//! - **Timers**: cancellable delayed callbacks held in a slot arena

pub mod easing;
pub mod error;
pub mod property;
pub mod scheduler;
pub mod timeline;
pub mod transition;
pub mod values;

pub use easing::Easing;
pub use error::{AnimationError, Result};
pub use property::{Property, PropertySnapshot, Props, TargetId, TargetStates};
pub use scheduler::{ScheduledTimer, SchedulerHandle, TimerId, TimerScheduler};
pub use timeline::{
    sample, Position, ResolvedTimeline, Sample, Step, StepOverlap, TimelineBuilder,
    TimelineProgram,
};
pub use transition::Transition;
pub use values::Interpolate;
