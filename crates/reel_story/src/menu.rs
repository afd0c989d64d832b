//! Menu disclosure controller
//!
//! A two-state machine for the navigation menu. The trigger toggles it;
//! the overlay, a link, or a route change close it. Visuals are a pure
//! function of the state, the time it last changed, and the layout. Every
//! element transitions from wherever it was at that moment, so toggling
//! mid-transition reverses smoothly.
//!
//! While the menu is open the page body must not scroll. The controller
//! holds a [`ScrollSuspension`] guard for exactly as long as it is open, so
//! closing and unmounting both release it.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use reel_animation::{Easing, Property, PropertySnapshot, Transition};
use reel_layout::Breakpoint;
use serde::Serialize;

// ============================================================================
// Routes
// ============================================================================

/// A navigation entry
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Route {
    pub href: &'static str,
    pub label: &'static str,
}

/// Navigation entries, in menu order
pub const ROUTES: [Route; 5] = [
    Route { href: "/", label: "Home" },
    Route { href: "/offering", label: "Offering" },
    Route { href: "/showcase", label: "Showcase" },
    Route { href: "/testimonials", label: "Testimonials" },
    Route { href: "/contact", label: "Contact" },
];

fn normalize(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    }
}

/// The route matching `path` exactly
pub fn active_route(path: &str) -> Option<&'static Route> {
    let path = normalize(path);
    ROUTES.iter().find(|r| r.href == path)
}

// ============================================================================
// Body scroll suspension
// ============================================================================

/// Host hook that actually stops and restores page scrolling
pub trait ScrollLock {
    fn set_suspended(&self, suspended: bool);
}

/// Reference-counted page scroll suspension
///
/// The host is told to suspend when the first guard is taken and to
/// restore when the last one is released.
#[derive(Clone, Default)]
pub struct BodyScroll {
    count: Rc<Cell<usize>>,
    host: Option<Rc<dyn ScrollLock>>,
}

impl BodyScroll {
    /// Suspension with no host hook (state only)
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_host(host: impl ScrollLock + 'static) -> Self {
        Self {
            count: Rc::default(),
            host: Some(Rc::new(host)),
        }
    }

    pub fn suspend(&self) -> ScrollSuspension {
        let count = self.count.get() + 1;
        self.count.set(count);
        if count == 1 {
            tracing::trace!("page scroll suspended");
            if let Some(host) = &self.host {
                host.set_suspended(true);
            }
        }
        ScrollSuspension {
            scroll: self.clone(),
        }
    }

    pub fn is_suspended(&self) -> bool {
        self.count.get() > 0
    }

    pub fn suspension_count(&self) -> usize {
        self.count.get()
    }

    fn release(&self) {
        let count = self.count.get().saturating_sub(1);
        self.count.set(count);
        if count == 0 {
            tracing::trace!("page scroll restored");
            if let Some(host) = &self.host {
                host.set_suspended(false);
            }
        }
    }
}

/// Keeps page scroll suspended until dropped
#[must_use = "dropping a ScrollSuspension restores page scrolling"]
pub struct ScrollSuspension {
    scroll: BodyScroll,
}

impl Drop for ScrollSuspension {
    fn drop(&mut self) {
        self.scroll.release();
    }
}

// ============================================================================
// Disclosure state
// ============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum Disclosure {
    #[default]
    Closed,
    Open,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MenuEvent {
    /// The hamburger trigger was activated
    Trigger,
    /// A click landed outside the menu (the overlay)
    Dismiss,
    /// A link was followed
    Navigate(String),
}

/// How the links are presented
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum MenuLayout {
    /// A row of links sliding in beside the trigger (640px and up)
    Inline,
    /// A floating panel near the bottom of the screen
    Popup,
}

impl MenuLayout {
    const INLINE: Breakpoint = Breakpoint::MinWidth(640.0);

    pub fn for_width(width: f32) -> Self {
        if Self::INLINE.matches(width) {
            MenuLayout::Inline
        } else {
            MenuLayout::Popup
        }
    }

    /// Panel motion
    fn panel_transition(self) -> Transition {
        match self {
            MenuLayout::Inline => Transition::from_millis(400, Easing::EASE_IN_OUT),
            MenuLayout::Popup => Transition::from_millis(400, Easing::EASE_OUT),
        }
    }

    /// Delay between consecutive links when opening
    fn stagger(self) -> Duration {
        match self {
            MenuLayout::Inline => Duration::from_millis(50),
            MenuLayout::Popup => Duration::from_millis(80),
        }
    }

    /// Motion of link `index`
    ///
    /// Inline links fade on their own short timing; popup links share the
    /// panel's and drop their entrance at once when closing.
    fn link_transition(self, index: usize, opening: bool) -> Transition {
        let base = match self {
            MenuLayout::Inline => Transition::from_millis(200, LINK_EASE),
            MenuLayout::Popup if opening => self.panel_transition(),
            MenuLayout::Popup => return Transition::new(Duration::ZERO, Easing::Linear),
        };
        if opening {
            base.with_delay(self.stagger() * index as u32)
        } else {
            base
        }
    }

    /// Vertical travel of the outer hamburger bars
    fn bar_offset(self) -> f32 {
        match self {
            MenuLayout::Inline => 8.0,
            MenuLayout::Popup => 7.0,
        }
    }
}

/// The default curve of CSS utility transitions
const LINK_EASE: Easing = Easing::CubicBezier(0.4, 0.0, 0.2, 1.0);

/// The overlay fades in when opening and is removed outright on close
const OVERLAY_FADE_IN: Transition = Transition {
    duration: Duration::from_millis(300),
    delay: Duration::ZERO,
    easing: Easing::EASE,
};

const BAR_TRANSITION: Transition = Transition {
    duration: Duration::from_millis(300),
    delay: Duration::ZERO,
    easing: Easing::EASE,
};

// ============================================================================
// Visuals
// ============================================================================

/// Everything the menu renders, as snapshots
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MenuVisuals {
    pub panel: PropertySnapshot,
    pub links: Vec<PropertySnapshot>,
    /// Top, middle and bottom hamburger bars
    pub bars: [PropertySnapshot; 3],
    pub overlay: PropertySnapshot,
}

impl MenuVisuals {
    /// Resting visuals for a state and layout
    fn rest(state: Disclosure, layout: MenuLayout) -> Self {
        let open = state == Disclosure::Open;
        let hidden = |snapshot: PropertySnapshot| match layout {
            MenuLayout::Inline => snapshot.with(Property::XPercent, 100.0),
            MenuLayout::Popup => snapshot.with(Property::Y, 32.0),
        };
        let panel = if open {
            PropertySnapshot::NEUTRAL
        } else {
            hidden(PropertySnapshot::NEUTRAL.with(Property::AutoAlpha, 0.0))
        };
        let link = if open {
            PropertySnapshot::NEUTRAL
        } else {
            PropertySnapshot::NEUTRAL
                .with(Property::AutoAlpha, 0.0)
                .with(Property::XPercent, 100.0)
        };
        let offset = layout.bar_offset();
        let bars = if open {
            [
                PropertySnapshot::NEUTRAL
                    .with(Property::Rotation, 45.0)
                    .with(Property::Y, offset),
                PropertySnapshot::NEUTRAL.with(Property::Opacity, 0.0),
                PropertySnapshot::NEUTRAL
                    .with(Property::Rotation, -45.0)
                    .with(Property::Y, -offset),
            ]
        } else {
            [PropertySnapshot::NEUTRAL; 3]
        };
        let overlay =
            PropertySnapshot::NEUTRAL.with(Property::AutoAlpha, if open { 1.0 } else { 0.0 });

        Self {
            panel,
            links: vec![link; ROUTES.len()],
            bars,
            overlay,
        }
    }
}

// ============================================================================
// Controller
// ============================================================================

/// The navigation menu's disclosure state machine
pub struct MenuController {
    state: Disclosure,
    layout: MenuLayout,
    route: String,
    /// When the state last changed
    changed_at: Duration,
    /// Visuals at the moment of the last change
    from: MenuVisuals,
    body: BodyScroll,
    suspension: Option<ScrollSuspension>,
}

impl MenuController {
    /// A closed menu on `route`, laid out for `width`
    pub fn new(body: BodyScroll, route: impl Into<String>, width: f32) -> Self {
        let layout = MenuLayout::for_width(width);
        Self {
            state: Disclosure::Closed,
            layout,
            route: route.into(),
            changed_at: Duration::ZERO,
            from: MenuVisuals::rest(Disclosure::Closed, layout),
            body,
            suspension: None,
        }
    }

    pub fn state(&self) -> Disclosure {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == Disclosure::Open
    }

    pub fn layout(&self) -> MenuLayout {
        self.layout
    }

    pub fn route(&self) -> &str {
        &self.route
    }

    pub fn active_route(&self) -> Option<&'static Route> {
        active_route(&self.route)
    }

    /// Feed an event at time `now`; returns whether the state changed
    pub fn handle(&mut self, event: MenuEvent, now: Duration) -> bool {
        let next = match (&event, self.state) {
            (MenuEvent::Trigger, Disclosure::Closed) => Disclosure::Open,
            (MenuEvent::Trigger, Disclosure::Open) => Disclosure::Closed,
            (MenuEvent::Dismiss, _) => Disclosure::Closed,
            (MenuEvent::Navigate(route), _) => {
                self.route = normalize(route).to_string();
                Disclosure::Closed
            }
        };
        if next == self.state {
            return false;
        }

        tracing::debug!(?event, from = ?self.state, to = ?next, "menu state changed");
        self.from = self.visuals(now);
        self.changed_at = now;
        self.state = next;
        self.suspension = match next {
            Disclosure::Open => Some(self.body.suspend()),
            Disclosure::Closed => None,
        };
        true
    }

    /// Re-evaluate the layout for a new viewport width
    ///
    /// Switching layout snaps to the resting visuals of the new layout.
    pub fn resize(&mut self, width: f32, now: Duration) {
        let layout = MenuLayout::for_width(width);
        if layout == self.layout {
            return;
        }
        self.layout = layout;
        self.from = MenuVisuals::rest(self.state, layout);
        self.changed_at = now;
    }

    /// Visuals at time `now`
    pub fn visuals(&self, now: Duration) -> MenuVisuals {
        let elapsed = now.saturating_sub(self.changed_at);
        let to = MenuVisuals::rest(self.state, self.layout);
        let panel = self.layout.panel_transition();
        let opening = self.state == Disclosure::Open;

        let links = self
            .from
            .links
            .iter()
            .zip(&to.links)
            .enumerate()
            .map(|(index, (from, to))| {
                self.layout
                    .link_transition(index, opening)
                    .interpolate(from, to, elapsed)
            })
            .collect();
        let overlay = if opening {
            OVERLAY_FADE_IN.interpolate(&self.from.overlay, &to.overlay, elapsed)
        } else {
            to.overlay
        };

        MenuVisuals {
            panel: panel.interpolate(&self.from.panel, &to.panel, elapsed),
            links,
            bars: [0usize, 1, 2]
                .map(|i| BAR_TRANSITION.interpolate(&self.from.bars[i], &to.bars[i], elapsed)),
            overlay,
        }
    }

    /// Whether every element has reached its resting value
    pub fn is_settled(&self, now: Duration) -> bool {
        let elapsed = now.saturating_sub(self.changed_at);
        let opening = self.state == Disclosure::Open;
        let last_link = self.layout.link_transition(ROUTES.len() - 1, opening);
        let longest = [
            self.layout.panel_transition().total(),
            last_link.total(),
            BAR_TRANSITION.total(),
            OVERLAY_FADE_IN.total(),
        ]
        .into_iter()
        .max()
        .unwrap_or_default();
        elapsed >= longest
    }

    /// Tear the menu down, restoring page scroll if it was open
    pub fn unmount(mut self) {
        if self.suspension.take().is_some() {
            tracing::debug!("menu unmounted while open");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reel_animation::Interpolate;
    use std::cell::RefCell;

    fn ms(ms: u64) -> Duration {
        Duration::from_millis(ms)
    }

    #[derive(Clone, Default)]
    struct RecordingLock(Rc<RefCell<Vec<bool>>>);

    impl ScrollLock for RecordingLock {
        fn set_suspended(&self, suspended: bool) {
            self.0.borrow_mut().push(suspended);
        }
    }

    #[test]
    fn test_trigger_opens_and_suspends_scroll() {
        let body = BodyScroll::new();
        let mut menu = MenuController::new(body.clone(), "/", 1280.0);

        assert!(menu.handle(MenuEvent::Trigger, ms(0)));
        assert_eq!(menu.state(), Disclosure::Open);
        assert!(body.is_suspended());

        assert!(menu.handle(MenuEvent::Trigger, ms(500)));
        assert_eq!(menu.state(), Disclosure::Closed);
        assert!(!body.is_suspended());
    }

    #[test]
    fn test_unmount_while_open_restores_scroll() {
        let lock = RecordingLock::default();
        let body = BodyScroll::with_host(lock.clone());
        let mut menu = MenuController::new(body.clone(), "/", 1280.0);
        menu.handle(MenuEvent::Trigger, ms(0));

        menu.unmount();
        assert!(!body.is_suspended());
        assert_eq!(*lock.0.borrow(), vec![true, false]);
    }

    #[test]
    fn test_drop_while_open_restores_scroll() {
        let body = BodyScroll::new();
        {
            let mut menu = MenuController::new(body.clone(), "/", 375.0);
            menu.handle(MenuEvent::Trigger, ms(0));
            assert_eq!(body.suspension_count(), 1);
        }
        assert!(!body.is_suspended());
    }

    #[test]
    fn test_dismiss_and_navigate_close() {
        let body = BodyScroll::new();
        let mut menu = MenuController::new(body.clone(), "/", 1280.0);

        assert!(!menu.handle(MenuEvent::Dismiss, ms(0)));
        menu.handle(MenuEvent::Trigger, ms(0));
        assert!(menu.handle(MenuEvent::Dismiss, ms(100)));
        assert!(!body.is_suspended());

        menu.handle(MenuEvent::Trigger, ms(200));
        assert!(menu.handle(MenuEvent::Navigate("/contact/".into()), ms(300)));
        assert_eq!(menu.state(), Disclosure::Closed);
        assert_eq!(menu.active_route().map(|r| r.label), Some("Contact"));
        assert!(!body.is_suspended());
    }

    #[test]
    fn test_suspension_is_reference_counted() {
        let body = BodyScroll::new();
        let a = body.suspend();
        let b = body.suspend();
        drop(a);
        assert!(body.is_suspended());
        drop(b);
        assert!(!body.is_suspended());
    }

    #[test]
    fn test_inline_reveal_staggers_links() {
        let mut menu = MenuController::new(BodyScroll::new(), "/", 1280.0);
        assert_eq!(menu.layout(), MenuLayout::Inline);

        let closed = menu.visuals(ms(0));
        assert_eq!(closed.panel.x_percent, 100.0);
        assert!(!closed.panel.visible);

        menu.handle(MenuEvent::Trigger, ms(1000));
        let early = menu.visuals(ms(1100));
        // Link 0 is 100ms in, link 2 only started at 1100
        assert!(early.links[0].opacity > 0.0);
        assert_eq!(early.links[2].opacity, 0.0);
        assert_eq!(early.links[4].x_percent, 100.0);

        // The last link starts at 200ms and takes 200ms, as long as the panel
        let done = menu.visuals(ms(1000 + 400));
        assert_eq!(done.panel, PropertySnapshot::NEUTRAL);
        assert!(done.links.iter().all(|l| *l == PropertySnapshot::NEUTRAL));
        assert_eq!(done.bars[0].rotation, 45.0);
        assert_eq!(done.bars[0].y, 8.0);
        assert_eq!(done.bars[1].opacity, 0.0);
        assert!(menu.is_settled(ms(1400)));
        assert!(!menu.is_settled(ms(1399)));
    }

    #[test]
    fn test_inline_links_close_together_on_their_own_timing() {
        let mut menu = MenuController::new(BodyScroll::new(), "/", 1280.0);
        menu.handle(MenuEvent::Trigger, ms(0));
        menu.handle(MenuEvent::Trigger, ms(1000));

        let closing = menu.visuals(ms(1100));
        // No stagger on close, so every link is at the same point
        assert!(closing.links.iter().all(|l| *l == closing.links[0]));
        assert!(closing.links[0].opacity > 0.0 && closing.links[0].opacity < 1.0);

        let closed = menu.visuals(ms(1200));
        assert!(closed.links.iter().all(|l| l.opacity == 0.0 && !l.visible));
        // The panel is still on its 400ms slide
        assert!(closed.panel.opacity > 0.0);
    }

    #[test]
    fn test_overlay_fades_in_and_disappears_on_close() {
        let mut menu = MenuController::new(BodyScroll::new(), "/", 375.0);
        menu.handle(MenuEvent::Trigger, ms(0));
        let opening = menu.visuals(ms(150)).overlay;
        assert!(opening.opacity > 0.0 && opening.opacity < 1.0);
        assert_eq!(menu.visuals(ms(300)).overlay.opacity, 1.0);

        menu.handle(MenuEvent::Dismiss, ms(500));
        let gone = menu.visuals(ms(500)).overlay;
        assert_eq!(gone.opacity, 0.0);
        assert!(!gone.visible);
    }

    #[test]
    fn test_popup_uses_vertical_motion() {
        let mut menu = MenuController::new(BodyScroll::new(), "/", 375.0);
        assert_eq!(menu.layout(), MenuLayout::Popup);
        assert_eq!(menu.visuals(ms(0)).panel.y, 32.0);

        menu.handle(MenuEvent::Trigger, ms(0));
        let open = menu.visuals(ms(800));
        assert_eq!(open.panel, PropertySnapshot::NEUTRAL);
        assert_eq!(open.bars[2].y, -7.0);

        // Closing drops the links back at once
        menu.handle(MenuEvent::Trigger, ms(1000));
        let closing = menu.visuals(ms(1000));
        assert_eq!(closing.links[0].opacity, 0.0);
        assert!(closing.panel.opacity > 0.0);
    }

    #[test]
    fn test_reversal_mid_transition_is_continuous() {
        let mut menu = MenuController::new(BodyScroll::new(), "/", 1280.0);
        menu.handle(MenuEvent::Trigger, ms(0));
        let before = menu.visuals(ms(200));
        menu.handle(MenuEvent::Trigger, ms(200));
        let after = menu.visuals(ms(200));
        assert!(before.panel.approx_eq(&after.panel, 1e-6));
        assert!(before.links[0].approx_eq(&after.links[0], 1e-6));
    }

    #[test]
    fn test_route_matching() {
        assert_eq!(active_route("/").map(|r| r.label), Some("Home"));
        assert_eq!(active_route("/showcase?tab=web").map(|r| r.label), Some("Showcase"));
        assert_eq!(active_route(""), active_route("/"));
        assert_eq!(active_route("/blog"), None);
    }
}
