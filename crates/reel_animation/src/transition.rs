//! Time-driven transitions
//!
//! A [`Transition`] maps elapsed wall-clock time to an eased factor, for
//! effects that play on their own instead of following scroll (the menu
//! panel, the splash overlay).

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::easing::Easing;
use crate::values::Interpolate;

/// Duration, delay and easing of one time-driven change
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    #[serde(with = "millis")]
    pub duration: Duration,
    #[serde(with = "millis", default)]
    pub delay: Duration,
    #[serde(default)]
    pub easing: Easing,
}

impl Transition {
    pub fn new(duration: Duration, easing: Easing) -> Self {
        Self {
            duration,
            delay: Duration::ZERO,
            easing,
        }
    }

    pub fn from_millis(duration_ms: u64, easing: Easing) -> Self {
        Self::new(Duration::from_millis(duration_ms), easing)
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Time until the transition settles
    pub fn total(&self) -> Duration {
        self.delay + self.duration
    }

    /// Linear progress in `[0, 1]` after `elapsed`
    pub fn progress(&self, elapsed: Duration) -> f32 {
        let Some(active) = elapsed.checked_sub(self.delay) else {
            return 0.0;
        };
        if self.duration.is_zero() {
            return 1.0;
        }
        (active.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    /// Eased progress after `elapsed`
    pub fn factor(&self, elapsed: Duration) -> f32 {
        self.easing.apply(self.progress(elapsed))
    }

    pub fn is_complete(&self, elapsed: Duration) -> bool {
        elapsed >= self.total()
    }

    /// Value between `from` and `to` after `elapsed`
    pub fn interpolate<T: Interpolate>(&self, from: &T, to: &T, elapsed: Duration) -> T {
        from.lerp(to, self.factor(elapsed))
    }
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(ms: u64) -> Duration {
        Duration::from_millis(ms)
    }

    #[test]
    fn test_progress_with_delay() {
        let t = Transition::from_millis(400, Easing::Linear).with_delay(ms(50));
        assert_eq!(t.progress(ms(0)), 0.0);
        assert_eq!(t.progress(ms(50)), 0.0);
        assert!((t.progress(ms(250)) - 0.5).abs() < 1e-6);
        assert_eq!(t.progress(ms(450)), 1.0);
        assert_eq!(t.progress(ms(10_000)), 1.0);
        assert!(t.is_complete(ms(450)));
        assert!(!t.is_complete(ms(449)));
    }

    #[test]
    fn test_zero_duration_jumps_after_delay() {
        let t = Transition::from_millis(0, Easing::EASE_OUT).with_delay(ms(100));
        assert_eq!(t.factor(ms(99)), 0.0);
        assert_eq!(t.factor(ms(100)), 1.0);
    }

    #[test]
    fn test_interpolate_lands_on_target() {
        let t = Transition::from_millis(300, Easing::EASE_IN_OUT);
        assert_eq!(t.interpolate(&0.0_f32, &45.0, ms(0)), 0.0);
        assert_eq!(t.interpolate(&0.0_f32, &45.0, ms(300)), 45.0);
        let mid = t.interpolate(&0.0_f32, &45.0, ms(150));
        assert!(mid > 0.0 && mid < 45.0);
    }
}
