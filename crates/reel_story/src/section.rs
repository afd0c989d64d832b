//! Story sections
//!
//! [`StorySection`] is the declarative part: a track height and one
//! [`BreakpointVariant`] per breakpoint. [`MountedSection`] is a section
//! attached to a viewport. Mounting subscribes to the viewport; within one
//! notification the order is always bounds, then variant, then sample:
//!
//! - **resize**: recompute track bounds, re-resolve the variant. On a
//!   switch the targets are reset to neutral and the new variant's initial
//!   state is applied before anything else can sample, and the new driver
//!   picks up from the next scroll or tick.
//! - **scroll**: map the offset to progress and sample the active driver.
//!
//! Unmounting (explicitly or by drop) cancels the subscription.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use indexmap::IndexSet;
use reel_animation::{PropertySnapshot, StepOverlap, TargetId};
use reel_core::{Subscription, Viewport, ViewportEvent, ViewportMetrics};
use reel_layout::{CoverageReport, Offset, ProgressMapper, StickyStage, TrackBounds};

use crate::driver::{PlaybackDriver, Scrub};
use crate::error::{Result, StoryError};
use crate::targets::VisualTargets;
use crate::variant::{BreakpointVariant, VariantChange, VariantSelector, VariantStatus};

/// A scroll-driven section: a sticky track and its breakpoint variants
#[derive(Clone, Debug, PartialEq)]
pub struct StorySection {
    pub name: String,
    /// Track height in viewport heights
    pub track_height: f32,
    pub variants: Vec<BreakpointVariant>,
    pub scrub: Scrub,
}

impl StorySection {
    pub fn new(name: impl Into<String>, track_height: f32) -> Self {
        Self {
            name: name.into(),
            track_height,
            variants: Vec::new(),
            scrub: Scrub::Immediate,
        }
    }

    pub fn variant(mut self, variant: BreakpointVariant) -> Self {
        self.variants.push(variant);
        self
    }

    pub fn scrub(mut self, scrub: Scrub) -> Self {
        self.scrub = scrub;
        self
    }

    /// Every target any variant touches, in first-seen order
    pub fn targets(&self) -> IndexSet<TargetId> {
        self.variants
            .iter()
            .flat_map(|v| v.targets())
            .cloned()
            .collect()
    }

    /// Validate structure and report soft problems
    ///
    /// Structural problems (no variants, a bad track height) are errors.
    /// Breakpoint gaps and overlapping steps still run, so they come back
    /// as a report instead.
    pub fn check(&self) -> Result<SectionReport> {
        if self.variants.is_empty() {
            return Err(StoryError::NoVariants(self.name.clone()));
        }
        StickyStage::new(self.track_height)?;

        let coverage = VariantSelector::new(self.variants.clone()).coverage();
        let overlaps = self
            .variants
            .iter()
            .map(|v| (v.name.clone(), v.program.lint()))
            .filter(|(_, lint)| !lint.is_empty())
            .collect();

        Ok(SectionReport { coverage, overlaps })
    }
}

/// Soft problems found by [`StorySection::check`]
#[derive(Clone, Debug, PartialEq)]
pub struct SectionReport {
    pub coverage: CoverageReport,
    /// Variant name with its colliding steps
    pub overlaps: Vec<(String, Vec<StepOverlap>)>,
}

impl SectionReport {
    pub fn is_clean(&self) -> bool {
        self.coverage.is_ok() && self.overlaps.is_empty()
    }
}

struct SectionRuntime {
    name: String,
    top: Offset,
    scrub: Scrub,
    selector: VariantSelector,
    mapper: ProgressMapper,
    driver: Option<PlaybackDriver>,
    targets: VisualTargets,
    progress: f32,
}

impl SectionRuntime {
    fn on_resize(&mut self, metrics: ViewportMetrics) {
        let size = metrics.size();
        self.mapper.on_resize(size);
        self.mapper.relocate(self.top.resolve(size.height));
        self.progress = self.mapper.progress(metrics.scroll_offset);

        match self.selector.resolve(metrics.width) {
            VariantChange::Unchanged => self.render(),
            VariantChange::Switched { from, to } => {
                tracing::debug!(section = %self.name, ?from, to, "variant switched");
                self.activate(to);
            }
            VariantChange::Deactivated { from } => {
                tracing::debug!(section = %self.name, ?from, "variant deactivated");
                self.driver = None;
                self.targets.reset();
            }
        }
    }

    fn on_scroll(&mut self, offset: f32) {
        self.progress = self.mapper.progress(offset);
        self.render();
    }

    fn tick(&mut self, dt: Duration) {
        if let Some(sample) = self.driver.as_mut().and_then(|d| d.tick(dt)) {
            self.targets.apply_sample(&sample);
        }
    }

    fn render(&mut self) {
        if let Some(sample) = self.driver.as_mut().and_then(|d| d.seek(self.progress)) {
            self.targets.apply_sample(&sample);
        }
    }

    /// Reset, apply the variant's initial state, and start a fresh driver
    ///
    /// Nothing is sampled here: the targets sit exactly at the initial
    /// state until the next scroll or tick.
    fn activate(&mut self, index: usize) {
        self.driver = None;
        self.targets.reset();

        let Some(variant) = self.selector.variants().get(index) else {
            return;
        };
        self.targets.apply_states(&variant.initial);

        let timeline = variant.program.resolve(&variant.initial);
        let mut driver = PlaybackDriver::new(timeline, self.scrub);
        driver.set_target(self.progress);
        self.driver = Some(driver);
    }
}

/// A story section attached to a viewport
///
/// Dropping it unsubscribes from the viewport and releases its targets.
pub struct MountedSection {
    runtime: Rc<RefCell<SectionRuntime>>,
    subscription: Option<Subscription>,
}

impl MountedSection {
    /// Attach `section` with its track top at `top`
    ///
    /// The variant for the current width is activated and the current
    /// progress rendered straight away.
    pub fn mount(section: &StorySection, top: Offset, viewport: &Viewport) -> Self {
        let metrics = viewport.metrics();
        let stage = StickyStage::new(section.track_height)
            .unwrap_or_else(|err| {
                tracing::warn!(section = %section.name, %err, "using a one-viewport track");
                StickyStage::FLAT
            })
            .at(top.resolve(metrics.height));

        let runtime = Rc::new(RefCell::new(SectionRuntime {
            name: section.name.clone(),
            top,
            scrub: section.scrub,
            selector: VariantSelector::new(section.variants.clone()),
            mapper: ProgressMapper::new(stage, metrics.size()),
            driver: None,
            targets: VisualTargets::new(section.targets()),
            progress: 0.0,
        }));

        {
            let mut rt = runtime.borrow_mut();
            rt.on_resize(metrics);
            rt.render();
        }

        let weak: Weak<RefCell<SectionRuntime>> = Rc::downgrade(&runtime);
        let subscription = viewport.subscribe(move |event, metrics| {
            let Some(runtime) = weak.upgrade() else {
                return;
            };
            let Ok(mut runtime) = runtime.try_borrow_mut() else {
                tracing::warn!("section busy, dropping viewport event");
                return;
            };
            match *event {
                ViewportEvent::Scrolled { offset } => runtime.on_scroll(offset),
                ViewportEvent::Resized { .. } => runtime.on_resize(metrics),
            }
        });

        tracing::debug!(
            section = %section.name,
            status = %runtime.borrow().selector.status(),
            "section mounted"
        );

        Self {
            runtime,
            subscription: Some(subscription),
        }
    }

    pub fn name(&self) -> String {
        self.runtime.borrow().name.clone()
    }

    /// Current normalized progress
    pub fn progress(&self) -> f32 {
        self.runtime.borrow().progress
    }

    /// Scroll range of the sticky track, `None` while geometry is unavailable
    pub fn bounds(&self) -> Option<TrackBounds> {
        self.runtime.borrow().mapper.bounds()
    }

    /// Playhead of the active driver
    pub fn playhead(&self) -> Option<f32> {
        self.runtime.borrow().driver.as_ref().map(|d| d.playhead())
    }

    pub fn status(&self) -> VariantStatus {
        self.runtime.borrow().selector.status().clone()
    }

    /// Name of the active variant
    pub fn active_variant(&self) -> Option<String> {
        self.runtime
            .borrow()
            .selector
            .active()
            .map(|v| v.name.clone())
    }

    pub fn snapshot(&self, target: &TargetId) -> Option<PropertySnapshot> {
        self.runtime.borrow().targets.get(target).copied()
    }

    /// Copy of every target snapshot
    pub fn targets(&self) -> VisualTargets {
        self.runtime.borrow().targets.clone()
    }

    /// Initial state of the active variant for `target`
    pub fn initial_state(&self, target: &TargetId) -> Option<PropertySnapshot> {
        let runtime = self.runtime.borrow();
        let variant = runtime.selector.active()?;
        Some(variant.initial.snapshot(target))
    }

    /// Advance scrub smoothing by one frame
    pub fn tick(&self, dt: Duration) {
        self.runtime.borrow_mut().tick(dt);
    }

    /// Whether the viewport subscription is still live
    pub fn is_mounted(&self) -> bool {
        self.subscription.as_ref().is_some_and(|s| s.is_active())
    }

    pub fn unmount(mut self) {
        self.detach();
    }

    fn detach(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.cancel();
            let mut runtime = self.runtime.borrow_mut();
            runtime.driver = None;
            runtime.targets.clear();
            tracing::debug!(section = %runtime.name, "section unmounted");
        }
    }
}

impl Drop for MountedSection {
    fn drop(&mut self) {
        self.detach();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::showcase;
    use reel_animation::{Easing, Interpolate, Property, Props, TargetStates, TimelineProgram};

    fn id(name: &str) -> TargetId {
        name.into()
    }

    fn three_step_section() -> StorySection {
        let program = TimelineProgram::builder()
            .to("box", 1.0, Easing::Linear, Props::new().with(Property::X, 100.0))
            .to("box", 2.0, Easing::Linear, Props::new().with(Property::Y, 50.0))
            .to_at(
                "dot",
                2.0,
                Easing::Linear,
                Props::new().with(Property::Opacity, 0.0),
                reel_animation::Position::At(0.5),
            )
            .build();
        StorySection::new("demo", 3.0).variant(BreakpointVariant::new(
            "any",
            "*".parse().unwrap(),
            TargetStates::new(),
            program,
        ))
    }

    #[test]
    fn test_track_start_renders_initial_state() {
        let viewport = Viewport::new(1280.0, 800.0);
        let section = MountedSection::mount(&showcase::application(), Offset::px(800.0), &viewport);
        viewport.scroll_to(800.0);

        assert_eq!(section.progress(), 0.0);
        for target in ["phone", "text", "logo", "screen_label", "screen_logo"] {
            let rendered = section.snapshot(&id(target)).unwrap();
            let initial = section.initial_state(&id(target)).unwrap();
            assert!(rendered.approx_eq(&initial, 1e-6), "{target}: {rendered:?} vs {initial:?}");
        }
    }

    #[test]
    fn test_half_track_matches_hand_computed_steps() {
        let viewport = Viewport::new(1280.0, 800.0);
        let section = MountedSection::mount(&three_step_section(), Offset::px(800.0), &viewport);

        // 300vh track: length 1600 from 800, half way is 1600
        viewport.scroll_to(1600.0);
        assert_eq!(section.progress(), 0.5);

        let body = section.snapshot(&id("box")).unwrap();
        assert_eq!(body.x, 100.0);
        assert!((body.y - 12.5).abs() < 1e-4);
        assert!((section.snapshot(&id("dot")).unwrap().opacity - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_breakpoint_crossing_mid_scroll_resets_to_new_initial_state() {
        let viewport = Viewport::new(1024.0, 800.0);
        let application = showcase::application().scrub(Scrub::Immediate);
        let section = MountedSection::mount(&application, Offset::px(0.0), &viewport);
        assert_eq!(section.active_variant().as_deref(), Some("desktop"));

        // 300vh at 800 high: 1600px of travel, 70% in
        viewport.scroll_to(1120.0);
        assert!((section.progress() - 0.7).abs() < 1e-6);
        let phone_desktop = section.snapshot(&id("phone")).unwrap();
        assert!(phone_desktop.x_percent < 0.0);

        viewport.resize(600.0, 800.0);
        assert_eq!(section.active_variant().as_deref(), Some("mobile"));

        let mobile = showcase::application().variants[1].initial.clone();
        for (target, rendered) in section.targets().iter() {
            assert_eq!(*rendered, mobile.snapshot(target), "{target} leaked state");
        }

        // Later sampling follows the mobile program only
        viewport.scroll_to(1600.0);
        let phone = section.snapshot(&id("phone")).unwrap();
        assert_eq!(phone.x_percent, 0.0);
        assert_eq!(phone.y_percent, -35.0);
        assert_eq!(phone.scale, 0.6);
        // Desktop-only targets stay neutral
        assert_eq!(section.snapshot(&id("logo")), Some(PropertySnapshot::NEUTRAL));
    }

    #[test]
    fn test_breakpoint_crossing_while_smoothing_resets_then_follows_mobile() {
        let viewport = Viewport::new(1024.0, 800.0);
        let application = showcase::application();
        assert_eq!(application.scrub, Scrub::Smooth(1.0));
        let section = MountedSection::mount(&application, Offset::ZERO, &viewport);

        let frame = Duration::from_millis(16);
        let settle = |section: &MountedSection| {
            for _ in 0..2000 {
                section.tick(frame);
            }
        };

        viewport.scroll_to(1120.0);
        settle(&section);
        assert_eq!(section.playhead(), Some(section.progress()));
        assert!(section.snapshot(&id("phone")).unwrap().x_percent < 0.0);

        viewport.resize(600.0, 800.0);
        assert_eq!(section.active_variant().as_deref(), Some("mobile"));
        let mobile = &application.variants[1];
        for (target, rendered) in section.targets().iter() {
            assert_eq!(*rendered, mobile.initial.snapshot(target), "{target} leaked state");
        }

        // The fresh playhead trails from 0 towards the current progress
        section.tick(Duration::from_millis(100));
        let playhead = section.playhead().unwrap();
        assert!(playhead > 0.0 && playhead < section.progress());
        let phone = section.snapshot(&id("phone")).unwrap();
        assert_eq!(phone.x_percent, 0.0);
        assert!(phone.rotation_x < 10.0);
        assert_eq!(section.snapshot(&id("logo")), Some(PropertySnapshot::NEUTRAL));

        settle(&section);
        assert_eq!(section.playhead(), Some(section.progress()));
        let expected = mobile.program.resolve(&mobile.initial).sample(section.progress());
        for (target, rendered) in section.targets().iter() {
            match expected.get(target) {
                Some(sampled) => assert_eq!(rendered, sampled, "{target}"),
                None => assert_eq!(*rendered, PropertySnapshot::NEUTRAL, "{target}"),
            }
        }
    }

    #[test]
    fn test_gap_width_leaves_targets_neutral() {
        let mut section = three_step_section();
        section.variants[0].breakpoint = ">=768".parse().unwrap();

        let viewport = Viewport::new(500.0, 800.0);
        let mounted = MountedSection::mount(&section, Offset::ZERO, &viewport);
        assert!(matches!(mounted.status(), VariantStatus::NoActiveVariant { .. }));

        viewport.scroll_to(1200.0);
        assert_eq!(mounted.snapshot(&id("box")), Some(PropertySnapshot::NEUTRAL));
        assert_eq!(mounted.playhead(), None);
    }

    #[test]
    fn test_unavailable_geometry_keeps_targets_at_rest() {
        let viewport = Viewport::new(1280.0, 0.0);
        let section = MountedSection::mount(&three_step_section(), Offset::ZERO, &viewport);
        viewport.scroll_to(5000.0);
        assert_eq!(section.progress(), 0.0);
        assert_eq!(section.snapshot(&id("box")).unwrap().x, 0.0);
    }

    #[test]
    fn test_document_offset_tracks_viewport_height() {
        let viewport = Viewport::new(1280.0, 800.0);
        // Below a 100vh hero
        let section = MountedSection::mount(&three_step_section(), Offset::vh(1.0), &viewport);
        viewport.scroll_to(800.0);
        assert_eq!(section.progress(), 0.0);

        viewport.resize(1280.0, 400.0);
        // Track now starts at 400 and runs 800px
        assert_eq!(section.progress(), 0.5);
        assert_eq!(
            section.bounds(),
            Some(TrackBounds {
                track_start: 400.0,
                track_length: 800.0
            })
        );
    }

    #[test]
    fn test_smooth_scrub_catches_up_on_tick() {
        let viewport = Viewport::new(1280.0, 800.0);
        let section = MountedSection::mount(
            &three_step_section().scrub(Scrub::Smooth(1.0)),
            Offset::ZERO,
            &viewport,
        );
        viewport.scroll_to(1600.0);
        assert_eq!(section.progress(), 1.0);
        assert_eq!(section.playhead(), Some(0.0));

        for _ in 0..2000 {
            section.tick(Duration::from_millis(16));
        }
        assert_eq!(section.playhead(), Some(1.0));
        assert_eq!(section.snapshot(&id("box")).unwrap().y, 50.0);
    }

    #[test]
    fn test_unmount_releases_listener() {
        let viewport = Viewport::new(1280.0, 800.0);
        let section = MountedSection::mount(&three_step_section(), Offset::ZERO, &viewport);
        assert_eq!(viewport.listener_count(), 1);
        assert!(section.is_mounted());

        section.unmount();
        assert_eq!(viewport.listener_count(), 0);
        viewport.scroll_to(100.0);
    }

    #[test]
    fn test_drop_releases_listener() {
        let viewport = Viewport::new(1280.0, 800.0);
        {
            let _a = MountedSection::mount(&three_step_section(), Offset::ZERO, &viewport);
            let _b = MountedSection::mount(&showcase::brand(), Offset::ZERO, &viewport);
            assert_eq!(viewport.listener_count(), 2);
        }
        assert_eq!(viewport.listener_count(), 0);
    }

    #[test]
    fn test_check_reports_gaps_and_collisions() {
        assert!(showcase::application().check().unwrap().is_clean());
        assert_eq!(
            StorySection::new("empty", 2.0).check(),
            Err(StoryError::NoVariants("empty".into()))
        );

        let mut section = three_step_section();
        section.variants[0].breakpoint = "(min-width: 768px)".parse().unwrap();
        let report = section.check().unwrap();
        assert!(!report.coverage.is_exhaustive());
    }
}
