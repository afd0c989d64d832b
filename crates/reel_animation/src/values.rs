//! Animatable value types
//!
//! The single interpolation primitive shared by scroll-driven timelines and
//! time-driven transitions.

use crate::property::PropertySnapshot;

/// Trait for values that can be linearly interpolated
pub trait Interpolate: Clone {
    /// Interpolate between self and other by factor t
    ///
    /// `t == 0.0` returns `self` and `t == 1.0` returns `other` exactly.
    /// Factors outside `[0, 1]` extrapolate (overshooting easings rely on it).
    fn lerp(&self, other: &Self, t: f32) -> Self;

    /// Check if two values are approximately equal
    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool;
}

// ============================================================================
// f32 Implementation
// ============================================================================

impl Interpolate for f32 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        if t == 0.0 {
            *self
        } else if t == 1.0 {
            *other
        } else {
            self + (other - self) * t
        }
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self - other).abs() < epsilon
    }
}

// ============================================================================
// PropertySnapshot Implementation
// ============================================================================

impl Interpolate for PropertySnapshot {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        PropertySnapshot {
            scale: self.scale.lerp(&other.scale, t),
            rotation: self.rotation.lerp(&other.rotation, t),
            rotation_x: self.rotation_x.lerp(&other.rotation_x, t),
            rotation_y: self.rotation_y.lerp(&other.rotation_y, t),
            x: self.x.lerp(&other.x, t),
            y: self.y.lerp(&other.y, t),
            x_percent: self.x_percent.lerp(&other.x_percent, t),
            y_percent: self.y_percent.lerp(&other.y_percent, t),
            opacity: self.opacity.lerp(&other.opacity, t),
            // Visible for the whole transition if either end is visible
            visible: if t == 0.0 {
                self.visible
            } else if t == 1.0 {
                other.visible
            } else {
                self.visible || other.visible
            },
        }
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.visible == other.visible
            && self.scale.approx_eq(&other.scale, epsilon)
            && self.rotation.approx_eq(&other.rotation, epsilon)
            && self.rotation_x.approx_eq(&other.rotation_x, epsilon)
            && self.rotation_y.approx_eq(&other.rotation_y, epsilon)
            && self.x.approx_eq(&other.x, epsilon)
            && self.y.approx_eq(&other.y, epsilon)
            && self.x_percent.approx_eq(&other.x_percent, epsilon)
            && self.y_percent.approx_eq(&other.y_percent, epsilon)
            && self.opacity.approx_eq(&other.opacity, epsilon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::Property;

    #[test]
    fn test_float_interpolation() {
        assert!((0.0_f32.lerp(&1.0, 0.5) - 0.5).abs() < 1e-6);
        assert!((10.0_f32.lerp(&20.0, 0.25) - 12.5).abs() < 1e-6);
    }

    #[test]
    fn test_endpoints_are_exact() {
        // 1.3 + (0.8 - 1.3) * 1.0 is not guaranteed to round back to 0.8
        assert_eq!(1.3_f32.lerp(&0.8, 1.0), 0.8);
        assert_eq!(1.3_f32.lerp(&0.8, 0.0), 1.3);
    }

    #[test]
    fn test_overshoot_extrapolates() {
        assert!(0.0_f32.lerp(&10.0, 1.1) > 10.0);
    }

    #[test]
    fn test_snapshot_interpolation() {
        let from = PropertySnapshot::NEUTRAL.with(Property::AutoAlpha, 0.0);
        let to = PropertySnapshot::NEUTRAL
            .with(Property::X, 100.0)
            .with(Property::Scale, 2.0);

        let mid = from.lerp(&to, 0.5);
        assert!((mid.x - 50.0).abs() < 1e-6);
        assert!((mid.scale - 1.5).abs() < 1e-6);
        assert!((mid.opacity - 0.5).abs() < 1e-6);
        assert!(mid.visible);

        assert_eq!(from.lerp(&to, 0.0), from);
        assert_eq!(from.lerp(&to, 1.0), to);
        assert!(from.lerp(&to, 0.999_999).approx_eq(&to, 1e-3));
    }
}
