//! Playback driver
//!
//! Drives one resolved timeline from scroll progress. With
//! [`Scrub::Immediate`] every progress change is sampled straight away.
//! With [`Scrub::Smooth`] the playhead trails the scroll position and
//! catches up on each frame tick, which is what a scrubbed scroll trigger
//! with a lag looks like.

use std::time::Duration;

use reel_animation::{ResolvedTimeline, Sample};

/// Playhead distance below which smoothing snaps to the target
const SNAP_EPSILON: f32 = 1.0e-4;

/// How the playhead follows progress
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Scrub {
    /// The playhead jumps to every new progress value
    #[default]
    Immediate,
    /// The playhead approaches progress with this time constant, in seconds
    Smooth(f32),
}

impl Scrub {
    /// `Smooth` with a usable lag, anything else is immediate
    fn lag(&self) -> Option<f32> {
        match *self {
            Scrub::Smooth(lag) if lag.is_finite() && lag > 0.0 => Some(lag),
            _ => None,
        }
    }
}

/// Samples the active variant's timeline as progress changes
#[derive(Clone, Debug)]
pub struct PlaybackDriver {
    timeline: ResolvedTimeline,
    scrub: Scrub,
    /// Progress the playhead is heading for
    target: f32,
    /// Progress last sampled
    playhead: f32,
}

impl PlaybackDriver {
    /// A driver with its playhead at 0
    pub fn new(timeline: ResolvedTimeline, scrub: Scrub) -> Self {
        Self {
            timeline,
            scrub,
            target: 0.0,
            playhead: 0.0,
        }
    }

    pub fn timeline(&self) -> &ResolvedTimeline {
        &self.timeline
    }

    pub fn scrub(&self) -> Scrub {
        self.scrub
    }

    pub fn playhead(&self) -> f32 {
        self.playhead
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    /// Whether the playhead has caught up with the target
    pub fn is_settled(&self) -> bool {
        self.playhead == self.target
    }

    /// Record a new target without sampling
    pub fn set_target(&mut self, progress: f32) {
        self.target = clamp_progress(progress);
    }

    /// Follow a new progress value
    ///
    /// Returns the sample to render when the playhead moved. Smoothed
    /// drivers only move on [`tick`](Self::tick).
    pub fn seek(&mut self, progress: f32) -> Option<Sample> {
        self.set_target(progress);
        match self.scrub.lag() {
            None => Some(self.move_playhead(self.target)),
            Some(_) => None,
        }
    }

    /// Advance smoothing by one frame
    ///
    /// Returns the sample to render when the playhead moved.
    pub fn tick(&mut self, dt: Duration) -> Option<Sample> {
        if self.is_settled() {
            return None;
        }
        let Some(lag) = self.scrub.lag() else {
            return Some(self.move_playhead(self.target));
        };

        let blend = 1.0 - (-dt.as_secs_f32() / lag).exp();
        let mut next = self.playhead + (self.target - self.playhead) * blend;
        if (self.target - next).abs() < SNAP_EPSILON {
            next = self.target;
        }
        Some(self.move_playhead(next))
    }

    /// Sample at the current playhead
    pub fn sample(&self) -> Sample {
        self.timeline.sample(self.playhead)
    }

    fn move_playhead(&mut self, progress: f32) -> Sample {
        self.playhead = clamp_progress(progress);
        self.timeline.sample(self.playhead)
    }
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
    use reel_animation::{Easing, Property, Props, TargetStates, TimelineProgram};

    fn timeline() -> ResolvedTimeline {
        TimelineProgram::builder()
            .to("box", 1.0, Easing::Linear, Props::new().with(Property::X, 100.0))
            .build()
            .resolve(&TargetStates::new())
    }

    fn x(sample: &Sample) -> f32 {
        sample.get(&"box".into()).unwrap().x
    }

    #[test]
    fn test_immediate_samples_on_seek() {
        let mut driver = PlaybackDriver::new(timeline(), Scrub::Immediate);
        let sample = driver.seek(0.25).unwrap();
        assert_eq!(x(&sample), 25.0);
        assert_eq!(driver.playhead(), 0.25);
        assert!(driver.tick(Duration::from_millis(16)).is_none());
    }

    #[test]
    fn test_seek_clamps_again() {
        let mut driver = PlaybackDriver::new(timeline(), Scrub::Immediate);
        assert_eq!(x(&driver.seek(3.0).unwrap()), 100.0);
        assert_eq!(x(&driver.seek(-1.0).unwrap()), 0.0);
        assert_eq!(x(&driver.seek(f32::NAN).unwrap()), 0.0);
    }

    #[test]
    fn test_smooth_trails_then_settles() {
        let mut driver = PlaybackDriver::new(timeline(), Scrub::Smooth(1.0));
        assert!(driver.seek(1.0).is_none());
        assert_eq!(driver.playhead(), 0.0);

        let first = driver.tick(Duration::from_millis(100)).unwrap();
        let expected = 1.0 - (-0.1_f32).exp();
        assert!((driver.playhead() - expected).abs() < 1e-6);
        assert!(x(&first) > 0.0 && x(&first) < 100.0);

        let mut last = driver.playhead();
        for _ in 0..1000 {
            if driver.tick(Duration::from_millis(16)).is_none() {
                break;
            }
            assert!(driver.playhead() >= last);
            last = driver.playhead();
        }
        assert!(driver.is_settled());
        assert_eq!(x(&driver.sample()), 100.0);
    }

    #[test]
    fn test_smoothing_is_frame_rate_independent() {
        let mut coarse = PlaybackDriver::new(timeline(), Scrub::Smooth(0.5));
        let mut fine = PlaybackDriver::new(timeline(), Scrub::Smooth(0.5));
        coarse.seek(1.0);
        fine.seek(1.0);

        coarse.tick(Duration::from_millis(200));
        for _ in 0..4 {
            fine.tick(Duration::from_millis(50));
        }
        assert!((coarse.playhead() - fine.playhead()).abs() < 1e-4);
    }

    #[test]
    fn test_bad_lag_behaves_as_immediate() {
        let mut driver = PlaybackDriver::new(timeline(), Scrub::Smooth(0.0));
        assert!(driver.seek(0.5).is_some());
    }
}
