//! Timeline model
//!
//! A [`TimelineProgram`] is an ordered list of [`Step`]s. Each step moves
//! some properties of one target to end values over a duration, starting at
//! a [`Position`] relative to the steps declared before it. Durations are in
//! abstract timeline units; only their ratios matter once a program is
//! sampled by progress.
//!
//! Sampling happens on a [`ResolvedTimeline`]: the program with absolute
//! start times and per-property start values worked out against a set of
//! initial target states. Resolution happens once per variant activation;
//! sampling is then a pure function of progress.
//!
//! # Example
//!
//! ```rust
//! use reel_animation::{Easing, Position, Property, Props, TargetStates, TimelineProgram};
//!
//! let program = TimelineProgram::builder()
//!     .to("phone", 1.0, Easing::POWER2_OUT, Props::new().with(Property::RotationX, 0.0))
//!     .to("label", 0.5, Easing::POWER2_IN, Props::new().with(Property::AutoAlpha, 0.0))
//!     .to_at(
//!         "logo",
//!         0.5,
//!         Easing::POWER2_OUT,
//!         Props::new().with(Property::Scale, 1.5),
//!         Position::WithPrevious,
//!     )
//!     .build();
//!
//! let initial = TargetStates::new()
//!     .with("phone", Props::new().with(Property::RotationX, 20.0));
//!
//! let timeline = program.resolve(&initial);
//! assert_eq!(timeline.duration(), 1.5);
//!
//! let start = timeline.sample(0.0);
//! assert_eq!(start.get(&"phone".into()).map(|s| s.rotation_x), Some(20.0));
//!
//! let end = timeline.sample(1.0);
//! assert_eq!(end.get(&"logo".into()).map(|s| s.scale), Some(1.5));
//! ```

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::easing::Easing;
use crate::error::{AnimationError, Result};
use crate::property::{Property, PropertySnapshot, Props, TargetId, TargetStates};
use crate::values::Interpolate;

// ============================================================================
// Positions
// ============================================================================

/// Where a step starts, relative to the steps declared before it
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Position {
    /// At the current end of the timeline (the latest end of any step so far)
    #[default]
    After,
    /// At the start of the previously declared step (`"<"`)
    WithPrevious,
    /// At the end of the previously declared step (`">"`)
    AfterPrevious,
    /// Relative to the current end of the timeline (`"+=d"` / `"-=d"`)
    Offset(f32),
    /// At an absolute cursor position (`"t"`)
    At(f32),
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Position::After => Ok(()),
            Position::WithPrevious => f.write_str("<"),
            Position::AfterPrevious => f.write_str(">"),
            Position::Offset(d) if d < 0.0 => write!(f, "-={}", -d),
            Position::Offset(d) => write!(f, "+={d}"),
            Position::At(t) => write!(f, "{t}"),
        }
    }
}

impl FromStr for Position {
    type Err = AnimationError;

    fn from_str(raw: &str) -> Result<Self> {
        let s = raw.trim();
        let invalid = || AnimationError::InvalidPosition(raw.to_string());
        let number = |v: &str| {
            v.trim()
                .parse::<f32>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(invalid)
        };

        match s {
            "" => Ok(Position::After),
            "<" => Ok(Position::WithPrevious),
            ">" => Ok(Position::AfterPrevious),
            _ => {
                if let Some(rest) = s.strip_prefix("+=") {
                    Ok(Position::Offset(number(rest)?))
                } else if let Some(rest) = s.strip_prefix("-=") {
                    Ok(Position::Offset(-number(rest)?))
                } else {
                    let at = number(s)?;
                    if at < 0.0 {
                        return Err(invalid());
                    }
                    Ok(Position::At(at))
                }
            }
        }
    }
}

impl TryFrom<String> for Position {
    type Error = AnimationError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Position> for String {
    fn from(position: Position) -> Self {
        position.to_string()
    }
}

// ============================================================================
// Steps and programs
// ============================================================================

/// One declarative animation step
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub target: TargetId,
    /// End values for each animated property
    pub props: Props,
    pub duration: f32,
    #[serde(default)]
    pub ease: Easing,
    #[serde(default)]
    pub position: Position,
}

impl Step {
    pub fn new(target: impl Into<TargetId>, duration: f32, ease: Easing, props: Props) -> Self {
        Self {
            target: target.into(),
            props,
            duration,
            ease,
            position: Position::After,
        }
    }

    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }
}

/// Two steps that write different end values to the same property of the
/// same target over overlapping spans
#[derive(Clone, Debug, PartialEq)]
pub struct StepOverlap {
    pub target: TargetId,
    pub property: Property,
    /// Declaration index of the earlier step
    pub first: usize,
    /// Declaration index of the later step (wins the collision)
    pub second: usize,
}

impl fmt::Display for StepOverlap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "steps {} and {} both animate {}.{} over overlapping spans",
            self.first, self.second, self.target, self.property
        )
    }
}

/// An ordered list of steps
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimelineProgram {
    steps: Vec<Step>,
}

impl TimelineProgram {
    pub fn builder() -> TimelineBuilder {
        TimelineBuilder::default()
    }

    /// Build from already-declared steps, rejecting invalid durations
    pub fn from_steps(steps: Vec<Step>) -> Result<Self> {
        if let Some(step) = steps
            .iter()
            .find(|s| !s.duration.is_finite() || s.duration < 0.0)
        {
            return Err(AnimationError::InvalidDuration(step.duration));
        }
        Ok(Self { steps })
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Absolute `(start, end)` of every step, in declaration order
    pub fn spans(&self) -> Vec<(f32, f32)> {
        let mut spans = Vec::with_capacity(self.steps.len());
        let mut timeline_end = 0.0f32;
        let mut previous: Option<(f32, f32)> = None;

        for step in &self.steps {
            let start = match step.position {
                Position::After => timeline_end,
                Position::WithPrevious => previous.map(|(s, _)| s).unwrap_or(0.0),
                Position::AfterPrevious => previous.map(|(_, e)| e).unwrap_or(0.0),
                Position::Offset(d) => timeline_end + d,
                Position::At(t) => t,
            };
            let start = if start.is_finite() { start.max(0.0) } else { timeline_end };
            let end = start + step.duration;

            timeline_end = timeline_end.max(end);
            previous = Some((start, end));
            spans.push((start, end));
        }

        spans
    }

    /// Total length in timeline units
    pub fn duration(&self) -> f32 {
        self.spans().iter().fold(0.0, |acc, &(_, end)| acc.max(end))
    }

    /// Report same-property collisions between overlapping steps
    ///
    /// Such programs still sample (the later step wins), but the result
    /// usually isn't what the author meant.
    pub fn lint(&self) -> Vec<StepOverlap> {
        let spans = self.spans();
        let mut overlaps = Vec::new();

        for (i, a) in self.steps.iter().enumerate() {
            for (j, b) in self.steps.iter().enumerate().skip(i + 1) {
                if a.target != b.target {
                    continue;
                }
                let (a_start, a_end) = spans[i];
                let (b_start, b_end) = spans[j];
                if !(a_start < b_end && b_start < a_end) {
                    continue;
                }
                for (property, a_value) in a.props.iter() {
                    let collides = b
                        .props
                        .iter()
                        .any(|(p, v)| p.channel() == property.channel() && v != a_value);
                    if collides {
                        overlaps.push(StepOverlap {
                            target: a.target.clone(),
                            property,
                            first: i,
                            second: j,
                        });
                    }
                }
            }
        }

        overlaps
    }

    /// Fix start times and start values against `initial`
    pub fn resolve(&self, initial: &TargetStates) -> ResolvedTimeline {
        let spans = self.spans();

        let mut order: Vec<usize> = (0..self.steps.len()).collect();
        order.sort_by(|&a, &b| spans[a].0.total_cmp(&spans[b].0).then(a.cmp(&b)));

        let mut rest = initial.clone();
        for step in &self.steps {
            if !rest.contains(&step.target) {
                rest.insert(step.target.clone(), PropertySnapshot::NEUTRAL);
            }
        }

        // Walk chronologically so each track starts where the previous
        // writer of that property left it
        let mut cursor: IndexMap<TargetId, PropertySnapshot> = rest.clone().into_map();
        let mut steps = Vec::with_capacity(order.len());

        for index in order {
            let step = &self.steps[index];
            let (start, end) = spans[index];
            let Some(snapshot) = cursor.get_mut(&step.target) else {
                continue;
            };

            let tracks = step
                .props
                .iter()
                .map(|(property, to)| {
                    let from = snapshot.get(property);
                    snapshot.set(property, to);
                    Track { property, from, to }
                })
                .collect();

            steps.push(ResolvedStep {
                index,
                target: step.target.clone(),
                start,
                end,
                duration: step.duration,
                easing: step.ease,
                tracks,
            });
        }

        let duration = spans.iter().fold(0.0f32, |acc, &(_, end)| acc.max(end));

        ResolvedTimeline {
            steps,
            duration,
            initial: rest,
        }
    }
}

/// Fluent builder for [`TimelineProgram`]
#[derive(Default)]
pub struct TimelineBuilder {
    steps: Vec<Step>,
}

impl TimelineBuilder {
    /// Append a step after everything declared so far
    pub fn to(
        self,
        target: impl Into<TargetId>,
        duration: f32,
        ease: Easing,
        props: Props,
    ) -> Self {
        self.to_at(target, duration, ease, props, Position::After)
    }

    /// Append a step at an explicit position
    pub fn to_at(
        mut self,
        target: impl Into<TargetId>,
        duration: f32,
        ease: Easing,
        props: Props,
        position: Position,
    ) -> Self {
        let duration = if duration.is_finite() && duration >= 0.0 {
            duration
        } else {
            tracing::warn!(duration, "invalid step duration, using 0");
            0.0
        };
        self.steps
            .push(Step::new(target, duration, ease, props).at(position));
        self
    }

    pub fn build(self) -> TimelineProgram {
        TimelineProgram { steps: self.steps }
    }
}

// ============================================================================
// Resolved timelines and sampling
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq)]
struct Track {
    property: Property,
    from: f32,
    to: f32,
}

/// A step with absolute timing and fixed start values
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedStep {
    /// Declaration index in the source program
    pub index: usize,
    pub target: TargetId,
    pub start: f32,
    pub end: f32,
    pub duration: f32,
    pub easing: Easing,
    tracks: SmallVec<[Track; 4]>,
}

impl ResolvedStep {
    /// Linear progress of this step at timeline time `time`, in `[0, 1]`
    ///
    /// `at_end` marks the final sample of the timeline so zero-length steps
    /// placed at the very end still complete.
    pub fn local_progress(&self, time: f32, at_end: bool) -> f32 {
        if self.duration <= 0.0 {
            return if time > self.start || at_end { 1.0 } else { 0.0 };
        }
        if time >= self.end {
            return 1.0;
        }
        ((time - self.start) / self.duration).clamp(0.0, 1.0)
    }

    /// `(property, from, to)` for every animated property
    pub fn tracks(&self) -> impl Iterator<Item = (Property, f32, f32)> + '_ {
        self.tracks.iter().map(|t| (t.property, t.from, t.to))
    }
}

/// Interpolated snapshot of every target at one progress value
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Sample {
    targets: IndexMap<TargetId, PropertySnapshot>,
}

impl Sample {
    pub fn get(&self, target: &TargetId) -> Option<&PropertySnapshot> {
        self.targets.get(target)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TargetId, &PropertySnapshot)> {
        self.targets.iter()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// A program bound to initial states, ready for sampling
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedTimeline {
    /// Chronological: by start time, then declaration order
    steps: Vec<ResolvedStep>,
    duration: f32,
    initial: TargetStates,
}

impl ResolvedTimeline {
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Rest state of every target (declared initial state or neutral)
    pub fn initial(&self) -> &TargetStates {
        &self.initial
    }

    pub fn steps(&self) -> &[ResolvedStep] {
        &self.steps
    }

    /// Look up a step by its declaration index
    pub fn step(&self, index: usize) -> Option<&ResolvedStep> {
        self.steps.iter().find(|s| s.index == index)
    }

    /// Linear local progress of a declared step at a global progress value
    pub fn local_progress(&self, index: usize, progress: f32) -> Option<f32> {
        let progress = clamp_progress(progress);
        self.step(index)
            .map(|step| step.local_progress(progress * self.duration, progress >= 1.0))
    }

    /// Snapshot of every target at `progress`
    ///
    /// Progress is clamped to `[0, 1]` (NaN reads as 0), so results never
    /// extrapolate past declared end values. Steps that have not started
    /// don't write; colliding writes resolve in chronological order, and
    /// concurrent steps resolve in declaration order (last declared wins).
    pub fn sample(&self, progress: f32) -> Sample {
        let progress = clamp_progress(progress);
        let time = progress * self.duration;
        let at_end = progress >= 1.0;

        let mut targets = self.initial.clone().into_map();

        for step in &self.steps {
            if time < step.start {
                break;
            }
            let factor = step.easing.apply(step.local_progress(time, at_end));
            if let Some(snapshot) = targets.get_mut(&step.target) {
                for track in &step.tracks {
                    snapshot.set(track.property, track.from.lerp(&track.to, factor));
                }
            }
        }

        Sample { targets }
    }
}

/// Sample a resolved timeline at `progress` (see [`ResolvedTimeline::sample`])
pub fn sample(timeline: &ResolvedTimeline, progress: f32) -> Sample {
    timeline.sample(progress)
}

fn clamp_progress(progress: f32) -> f32 {
    if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    fn props(entries: &[(Property, f32)]) -> Props {
        entries.iter().copied().collect()
    }

    /// A: box.x 0->100 over [0,1]; B: box.y 0->50 over [1,3]; C: dot fades over [0.5,2.5]
    fn three_step() -> ResolvedTimeline {
        TimelineProgram::builder()
            .to("box", 1.0, Easing::Linear, props(&[(Property::X, 100.0)]))
            .to("box", 2.0, Easing::Linear, props(&[(Property::Y, 50.0)]))
            .to_at(
                "dot",
                2.0,
                Easing::Linear,
                props(&[(Property::Opacity, 0.0)]),
                Position::At(0.5),
            )
            .build()
            .resolve(&TargetStates::new())
    }

    #[test]
    fn test_gsap_style_positions() {
        // Shape of the application showcase desktop program
        let program = TimelineProgram::builder()
            .to("phone", 1.0, Easing::POWER2_OUT, props(&[(Property::RotationX, 0.0)]))
            .to("label", 0.5, Easing::POWER2_IN, props(&[(Property::Y, -50.0)]))
            .to_at(
                "logo",
                0.5,
                Easing::POWER2_OUT,
                props(&[(Property::Scale, 1.5)]),
                Position::WithPrevious,
            )
            .to("phone", 1.0, Easing::POWER2_IN_OUT, props(&[(Property::Scale, 0.8)]))
            .to_at(
                "text",
                0.5,
                Easing::POWER2_OUT,
                props(&[(Property::AutoAlpha, 1.0)]),
                Position::Offset(-0.5),
            )
            .to_at(
                "mark",
                0.7,
                Easing::back_out(1.7),
                props(&[(Property::Rotation, -45.0)]),
                Position::WithPrevious,
            )
            .build();

        let spans = program.spans();
        assert_eq!(spans[0], (0.0, 1.0));
        assert_eq!(spans[1], (1.0, 1.5));
        assert_eq!(spans[2], (1.0, 1.5));
        assert_eq!(spans[3], (1.5, 2.5));
        assert_eq!(spans[4], (2.0, 2.5));
        assert!(approx(spans[5].0, 2.0) && approx(spans[5].1, 2.7));
        assert!(approx(program.duration(), 2.7));
    }

    #[test]
    fn test_after_previous_and_negative_offsets_clamp() {
        let program = TimelineProgram::builder()
            .to("a", 2.0, Easing::Linear, props(&[(Property::X, 1.0)]))
            .to_at("b", 1.0, Easing::Linear, props(&[(Property::X, 1.0)]), Position::At(0.0))
            .to_at("c", 1.0, Easing::Linear, props(&[(Property::X, 1.0)]), Position::AfterPrevious)
            .to_at("d", 1.0, Easing::Linear, props(&[(Property::X, 1.0)]), Position::Offset(-10.0))
            .build();

        let spans = program.spans();
        assert_eq!(spans[2], (1.0, 2.0));
        assert_eq!(spans[3], (0.0, 1.0));
    }

    #[test]
    fn test_midpoint_local_progress_matches_hand_computed() {
        let timeline = three_step();
        assert_eq!(timeline.duration(), 3.0);

        // progress 0.5 -> time 1.5
        assert_eq!(timeline.local_progress(0, 0.5), Some(1.0));
        assert!(approx(timeline.local_progress(1, 0.5).unwrap(), 0.25));
        assert!(approx(timeline.local_progress(2, 0.5).unwrap(), 0.5));

        let sample = timeline.sample(0.5);
        let body = sample.get(&"box".into()).unwrap();
        assert_eq!(body.x, 100.0);
        assert!(approx(body.y, 12.5));
        assert!(approx(sample.get(&"dot".into()).unwrap().opacity, 0.5));
    }

    #[test]
    fn test_progress_zero_is_initial_state() {
        let initial = TargetStates::new().with("box", props(&[(Property::Scale, 1.3)]));
        let timeline = TimelineProgram::builder()
            .to("box", 1.0, Easing::POWER2_OUT, props(&[(Property::Scale, 0.8)]))
            .build()
            .resolve(&initial);

        let sample = timeline.sample(0.0);
        assert_eq!(sample.get(&"box".into()), initial.get(&"box".into()));
    }

    #[test]
    fn test_out_of_range_progress_clamps() {
        let timeline = three_step();
        assert_eq!(timeline.sample(-0.5), timeline.sample(0.0));
        assert_eq!(timeline.sample(1.7), timeline.sample(1.0));
        assert_eq!(timeline.sample(f32::NAN), timeline.sample(0.0));
        assert_eq!(timeline.sample(f32::INFINITY), timeline.sample(1.0));
    }

    #[test]
    fn test_end_values_are_exact() {
        let initial = TargetStates::new().with("phone", props(&[(Property::Scale, 1.3)]));
        let timeline = TimelineProgram::builder()
            .to("phone", 0.7, Easing::POWER2_IN_OUT, props(&[(Property::Scale, 0.8)]))
            .to("phone", 1.1, Easing::back_out(1.7), props(&[(Property::XPercent, -35.0)]))
            .build()
            .resolve(&initial);

        let end = timeline.sample(1.0);
        let phone = end.get(&"phone".into()).unwrap();
        assert_eq!(phone.scale, 0.8);
        assert_eq!(phone.x_percent, -35.0);
    }

    #[test]
    fn test_sampling_is_idempotent() {
        let timeline = three_step();
        for i in 0..=20 {
            let p = i as f32 / 20.0;
            assert_eq!(sample(&timeline, p), sample(&timeline, p));
        }
    }

    #[test]
    fn test_local_progress_is_monotonic() {
        let timeline = three_step();
        for step in 0..3 {
            let mut last = 0.0;
            for i in 0..=100 {
                let local = timeline.local_progress(step, i as f32 / 100.0).unwrap();
                assert!(local >= last, "step {step} regressed at {i}");
                last = local;
            }
        }
    }

    #[test]
    fn test_pending_step_does_not_override_earlier_writer() {
        let timeline = TimelineProgram::builder()
            .to("box", 1.0, Easing::Linear, props(&[(Property::X, 100.0)]))
            .to("box", 1.0, Easing::Linear, props(&[(Property::X, 200.0)]))
            .build()
            .resolve(&TargetStates::new());

        // time 0.5: only the first step has started
        assert!(approx(timeline.sample(0.25).get(&"box".into()).unwrap().x, 50.0));
        // time 1.5: second step halfway from 100 to 200
        assert!(approx(timeline.sample(0.75).get(&"box".into()).unwrap().x, 150.0));
    }

    #[test]
    fn test_concurrent_collision_last_declared_wins() {
        let program = TimelineProgram::builder()
            .to("box", 1.0, Easing::Linear, props(&[(Property::X, 100.0)]))
            .to_at(
                "box",
                1.0,
                Easing::Linear,
                props(&[(Property::X, -100.0)]),
                Position::WithPrevious,
            )
            .build();

        assert_eq!(program.lint().len(), 1);
        let timeline = program.resolve(&TargetStates::new());
        assert_eq!(timeline.sample(1.0).get(&"box".into()).unwrap().x, -100.0);
    }

    #[test]
    fn test_parallel_steps_merge_disjoint_properties() {
        let program = TimelineProgram::builder()
            .to("page", 1.0, Easing::Linear, props(&[(Property::Rotation, -15.0)]))
            .to_at(
                "page",
                1.0,
                Easing::Linear,
                props(&[(Property::Scale, 0.7)]),
                Position::WithPrevious,
            )
            .build();

        assert!(program.lint().is_empty());
        let end = program.resolve(&TargetStates::new()).sample(1.0);
        let page = end.get(&"page".into()).unwrap();
        assert_eq!(page.rotation, -15.0);
        assert_eq!(page.scale, 0.7);
    }

    #[test]
    fn test_auto_alpha_reveal() {
        let initial = TargetStates::new().with(
            "text",
            props(&[(Property::AutoAlpha, 0.0), (Property::Y, 50.0)]),
        );
        let timeline = TimelineProgram::builder()
            .to(
                "text",
                1.0,
                Easing::Linear,
                props(&[(Property::AutoAlpha, 1.0), (Property::Y, 0.0)]),
            )
            .build()
            .resolve(&initial);

        assert!(!timeline.sample(0.0).get(&"text".into()).unwrap().visible);
        let mid = timeline.sample(0.5);
        let text = mid.get(&"text".into()).unwrap();
        assert!(text.visible);
        assert!(approx(text.y, 25.0));
    }

    #[test]
    fn test_empty_program_samples_initial_states() {
        let initial = TargetStates::new().with("a", props(&[(Property::Scale, 2.0)]));
        let timeline = TimelineProgram::default().resolve(&initial);
        assert_eq!(timeline.duration(), 0.0);
        assert_eq!(timeline.sample(0.5).get(&"a".into()).unwrap().scale, 2.0);
    }

    #[test]
    fn test_zero_duration_step() {
        let timeline = TimelineProgram::builder()
            .to("a", 0.0, Easing::Linear, props(&[(Property::X, 10.0)]))
            .to("b", 1.0, Easing::Linear, props(&[(Property::X, 10.0)]))
            .build()
            .resolve(&TargetStates::new());

        assert_eq!(timeline.sample(0.0).get(&"a".into()).unwrap().x, 0.0);
        assert_eq!(timeline.sample(0.1).get(&"a".into()).unwrap().x, 10.0);
    }

    #[test]
    fn test_from_steps_rejects_bad_durations() {
        let bad = Step::new("a", -1.0, Easing::Linear, Props::new());
        assert_eq!(
            TimelineProgram::from_steps(vec![bad]),
            Err(AnimationError::InvalidDuration(-1.0))
        );
    }

    #[test]
    fn test_position_parsing() {
        assert_eq!("".parse::<Position>(), Ok(Position::After));
        assert_eq!("<".parse::<Position>(), Ok(Position::WithPrevious));
        assert_eq!(">".parse::<Position>(), Ok(Position::AfterPrevious));
        assert_eq!("-=0.5".parse::<Position>(), Ok(Position::Offset(-0.5)));
        assert_eq!("+=0.25".parse::<Position>(), Ok(Position::Offset(0.25)));
        assert_eq!("1.5".parse::<Position>(), Ok(Position::At(1.5)));
        assert!("-1".parse::<Position>().is_err());
        assert!("soon".parse::<Position>().is_err());

        for position in [Position::Offset(-0.3), Position::At(2.0), Position::WithPrevious] {
            assert_eq!(position.to_string().parse::<Position>(), Ok(position));
        }
    }
}
