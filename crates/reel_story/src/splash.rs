//! Splash sequence
//!
//! The intro overlay shown once per session. Three timers move it through
//! its stages; reaching [`SplashStage::Hidden`] records the session flag so
//! later mounts skip straight to hidden. Unmounting early cancels whatever
//! timers are still pending.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use reel_animation::{
    Easing, Property, PropertySnapshot, ScheduledTimer, SchedulerHandle, Transition,
};
use reel_core::{SessionFlags, HAS_SEEN_SPLASH};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum SplashStage {
    /// Logo tilted and slightly small
    Initial,
    /// Logo straightening
    Rotate,
    /// Overlay sliding up out of view
    Slide,
    /// Gone
    Hidden,
}

/// Rendered splash state
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SplashVisuals {
    pub overlay: PropertySnapshot,
    pub logo: PropertySnapshot,
}

struct SplashState {
    stage: SplashStage,
    /// Scheduler time each stage was entered
    rotate_at: Option<Duration>,
    slide_at: Option<Duration>,
}

/// A mounted splash overlay
pub struct Splash {
    state: Rc<RefCell<SplashState>>,
    timers: Vec<ScheduledTimer>,
}

impl Splash {
    pub const ROTATE_AFTER: Duration = Duration::from_millis(500);
    pub const SLIDE_AFTER: Duration = Duration::from_millis(2000);
    pub const HIDE_AFTER: Duration = Duration::from_millis(2800);

    const LOGO: Transition = Transition {
        duration: Duration::from_millis(1000),
        delay: Duration::ZERO,
        easing: Easing::EASE_IN_OUT,
    };
    const OVERLAY: Transition = Transition {
        duration: Duration::from_millis(700),
        delay: Duration::ZERO,
        easing: Easing::EASE_IN_OUT,
    };

    /// Mount the splash, scheduling its stages unless this session has
    /// already seen it
    pub fn mount(scheduler: &SchedulerHandle, flags: &SessionFlags) -> Self {
        if flags.is_set(HAS_SEEN_SPLASH) {
            tracing::debug!("splash already seen this session");
            return Self {
                state: Rc::new(RefCell::new(SplashState {
                    stage: SplashStage::Hidden,
                    rotate_at: None,
                    slide_at: None,
                })),
                timers: Vec::new(),
            };
        }

        let state = Rc::new(RefCell::new(SplashState {
            stage: SplashStage::Initial,
            rotate_at: None,
            slide_at: None,
        }));

        let rotate = {
            let state = Rc::clone(&state);
            scheduler.schedule_guarded(Self::ROTATE_AFTER, move |at| {
                let mut state = state.borrow_mut();
                state.stage = SplashStage::Rotate;
                state.rotate_at = Some(at);
            })
        };
        let slide = {
            let state = Rc::clone(&state);
            scheduler.schedule_guarded(Self::SLIDE_AFTER, move |at| {
                let mut state = state.borrow_mut();
                state.stage = SplashStage::Slide;
                state.slide_at = Some(at);
            })
        };
        let hide = {
            let state = Rc::clone(&state);
            let flags = flags.clone();
            scheduler.schedule_guarded(Self::HIDE_AFTER, move |_| {
                state.borrow_mut().stage = SplashStage::Hidden;
                flags.set(HAS_SEEN_SPLASH);
                tracing::debug!("splash finished");
            })
        };

        Self {
            state,
            timers: vec![rotate, slide, hide],
        }
    }

    pub fn stage(&self) -> SplashStage {
        self.state.borrow().stage
    }

    pub fn is_visible(&self) -> bool {
        self.stage() != SplashStage::Hidden
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.iter().filter(|t| t.is_pending()).count()
    }

    /// Visuals at scheduler time `now`; `None` once hidden
    pub fn visuals(&self, now: Duration) -> Option<SplashVisuals> {
        let state = self.state.borrow();
        if state.stage == SplashStage::Hidden {
            return None;
        }

        let tilted = PropertySnapshot::NEUTRAL
            .with(Property::Rotation, -45.0)
            .with(Property::Scale, 0.9);
        let logo = match state.rotate_at {
            Some(at) => Self::LOGO.interpolate(
                &tilted,
                &PropertySnapshot::NEUTRAL,
                now.saturating_sub(at),
            ),
            None => tilted,
        };

        let raised = PropertySnapshot::NEUTRAL.with(Property::YPercent, -100.0);
        let overlay = match state.slide_at {
            Some(at) => Self::OVERLAY.interpolate(
                &PropertySnapshot::NEUTRAL,
                &raised,
                now.saturating_sub(at),
            ),
            None => PropertySnapshot::NEUTRAL,
        };

        Some(SplashVisuals { overlay, logo })
    }

    /// Remove the splash, cancelling pending stage timers
    pub fn unmount(self) {
        let pending = self.pending_timers();
        if pending > 0 {
            tracing::debug!(pending, "splash unmounted early");
        }
    }
}
