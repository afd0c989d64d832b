//! Easing curves
//!
//! Every curve maps `0.0 -> 0.0` and `1.0 -> 1.0` exactly. Inputs are
//! clamped to `[0, 1]` first; `back` curves may overshoot in between.
//!
//! Curves are parsed from the names used by timeline descriptions:
//!
//! | Name                         | Curve                        |
//! |------------------------------|------------------------------|
//! | `linear`, `none`, `power0`   | identity                     |
//! | `power1..4[.in/.out/.inOut]` | polynomial of degree N+1     |
//! | `quad`, `cubic`, `quart`, `quint` | aliases for power1..4   |
//! | `back[.in/.out/.inOut][(s)]` | overshooting, default s=1.70158 |
//! | `ease`, `ease-in`, `ease-out`, `ease-in-out` | CSS cubic-beziers |
//! | `cubic-bezier(x1,y1,x2,y2)`  | custom CSS bezier            |
//!
//! A power or back name without a direction means `.out`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AnimationError;

/// Default overshoot for `back` curves
pub const DEFAULT_OVERSHOOT: f32 = 1.70158;

/// An easing curve
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Easing {
    Linear,
    /// `t^(n+1)`
    PowerIn(u8),
    /// `1 - (1-t)^(n+1)`
    PowerOut(u8),
    /// Symmetric combination of `PowerIn`/`PowerOut`
    PowerInOut(u8),
    /// Pulls back before moving forward
    BackIn(f32),
    /// Overshoots the end before settling
    BackOut(f32),
    BackInOut(f32),
    /// CSS `cubic-bezier(x1, y1, x2, y2)`
    CubicBezier(f32, f32, f32, f32),
}

impl Default for Easing {
    /// Timeline steps ease out gently unless told otherwise
    fn default() -> Self {
        Easing::PowerOut(1)
    }
}

impl Easing {
    pub const POWER1_OUT: Easing = Easing::PowerOut(1);
    pub const POWER2_IN: Easing = Easing::PowerIn(2);
    pub const POWER2_OUT: Easing = Easing::PowerOut(2);
    pub const POWER2_IN_OUT: Easing = Easing::PowerInOut(2);
    pub const EASE: Easing = Easing::CubicBezier(0.25, 0.1, 0.25, 1.0);
    pub const EASE_IN: Easing = Easing::CubicBezier(0.42, 0.0, 1.0, 1.0);
    pub const EASE_OUT: Easing = Easing::CubicBezier(0.0, 0.0, 0.58, 1.0);
    pub const EASE_IN_OUT: Easing = Easing::CubicBezier(0.42, 0.0, 0.58, 1.0);

    /// `back.out(overshoot)`
    pub fn back_out(overshoot: f32) -> Self {
        Easing::BackOut(overshoot)
    }

    /// Apply the curve to a linear progress value
    pub fn apply(&self, t: f32) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        if t == 0.0 || t == 1.0 {
            return t;
        }

        match *self {
            Easing::Linear => t,
            Easing::PowerIn(n) => t.powi(n as i32 + 1),
            Easing::PowerOut(n) => 1.0 - (1.0 - t).powi(n as i32 + 1),
            Easing::PowerInOut(n) => {
                let exp = n as i32 + 1;
                if t < 0.5 {
                    (2.0 * t).powi(exp) / 2.0
                } else {
                    1.0 - (2.0 * (1.0 - t)).powi(exp) / 2.0
                }
            }
            Easing::BackIn(s) => t * t * ((s + 1.0) * t - s),
            Easing::BackOut(s) => {
                let p = t - 1.0;
                p * p * ((s + 1.0) * p + s) + 1.0
            }
            Easing::BackInOut(s) => {
                let s = s * 1.525;
                let p = t * 2.0;
                if p < 1.0 {
                    0.5 * (p * p * ((s + 1.0) * p - s))
                } else {
                    let p = p - 2.0;
                    0.5 * (p * p * ((s + 1.0) * p + s) + 2.0)
                }
            }
            Easing::CubicBezier(x1, y1, x2, y2) => cubic_bezier(x1, y1, x2, y2, t),
        }
    }
}

fn bezier_component(a: f32, b: f32, t: f32) -> f32 {
    // B(t) for control points (0, a, b, 1)
    let u = 1.0 - t;
    3.0 * u * u * t * a + 3.0 * u * t * t * b + t * t * t
}

fn bezier_slope(a: f32, b: f32, t: f32) -> f32 {
    let u = 1.0 - t;
    3.0 * u * u * a + 6.0 * u * t * (b - a) + 3.0 * t * t * (1.0 - b)
}

fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, x: f32) -> f32 {
    // Solve B_x(t) = x, Newton first then bisection
    let mut t = x;
    for _ in 0..8 {
        let err = bezier_component(x1, x2, t) - x;
        if err.abs() < 1e-6 {
            return bezier_component(y1, y2, t);
        }
        let slope = bezier_slope(x1, x2, t);
        if slope.abs() < 1e-6 {
            break;
        }
        t -= err / slope;
    }

    let (mut lo, mut hi) = (0.0f32, 1.0f32);
    t = x;
    for _ in 0..32 {
        let value = bezier_component(x1, x2, t);
        if (value - x).abs() < 1e-6 {
            break;
        }
        if value < x {
            lo = t;
        } else {
            hi = t;
        }
        t = (lo + hi) / 2.0;
    }
    bezier_component(y1, y2, t)
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Easing::Linear => write!(f, "linear"),
            Easing::PowerIn(n) => write!(f, "power{n}.in"),
            Easing::PowerOut(n) => write!(f, "power{n}.out"),
            Easing::PowerInOut(n) => write!(f, "power{n}.inOut"),
            Easing::BackIn(s) => write!(f, "back.in({s})"),
            Easing::BackOut(s) => write!(f, "back.out({s})"),
            Easing::BackInOut(s) => write!(f, "back.inOut({s})"),
            Easing::CubicBezier(a, b, c, d) => write!(f, "cubic-bezier({a},{b},{c},{d})"),
        }
    }
}

fn parse_args(raw: &str, args: &str) -> Result<Vec<f32>, AnimationError> {
    args.split(',')
        .map(|a| a.trim().parse::<f32>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| AnimationError::InvalidEasingParameter(raw.to_string()))
}

impl FromStr for Easing {
    type Err = AnimationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let name = raw.trim().to_ascii_lowercase();

        // Split off a parenthesized argument list
        let (head, args) = match name.find('(') {
            Some(open) => {
                let close = name
                    .rfind(')')
                    .filter(|&c| c > open)
                    .ok_or_else(|| AnimationError::InvalidEasingParameter(raw.to_string()))?;
                (&name[..open], Some(parse_args(raw, &name[open + 1..close])?))
            }
            None => (name.as_str(), None),
        };

        match head {
            "linear" | "none" => return Ok(Easing::Linear),
            "ease" => return Ok(Easing::EASE),
            "ease-in" => return Ok(Easing::EASE_IN),
            "ease-out" => return Ok(Easing::EASE_OUT),
            "ease-in-out" => return Ok(Easing::EASE_IN_OUT),
            "cubic-bezier" => {
                return match args.as_deref() {
                    Some(&[a, b, c, d]) if (0.0..=1.0).contains(&a) && (0.0..=1.0).contains(&c) => {
                        Ok(Easing::CubicBezier(a, b, c, d))
                    }
                    _ => Err(AnimationError::InvalidEasingParameter(raw.to_string())),
                };
            }
            _ => {}
        }

        let (family, direction) = match head.split_once('.') {
            Some((family, direction)) => (family, direction),
            None => (head, "out"),
        };

        let power = match family {
            "power0" => return Ok(Easing::Linear),
            "power1" | "quad" => Some(1),
            "power2" | "cubic" => Some(2),
            "power3" | "quart" => Some(3),
            "power4" | "quint" | "strong" => Some(4),
            "back" => None,
            _ => return Err(AnimationError::UnknownEasing(raw.to_string())),
        };

        match power {
            Some(n) => {
                if args.is_some() {
                    return Err(AnimationError::InvalidEasingParameter(raw.to_string()));
                }
                match direction {
                    "in" => Ok(Easing::PowerIn(n)),
                    "out" => Ok(Easing::PowerOut(n)),
                    "inout" => Ok(Easing::PowerInOut(n)),
                    _ => Err(AnimationError::UnknownEasing(raw.to_string())),
                }
            }
            None => {
                let overshoot = match args.as_deref() {
                    None | Some(&[]) => DEFAULT_OVERSHOOT,
                    Some(&[s]) if s.is_finite() => s,
                    _ => return Err(AnimationError::InvalidEasingParameter(raw.to_string())),
                };
                match direction {
                    "in" => Ok(Easing::BackIn(overshoot)),
                    "out" => Ok(Easing::BackOut(overshoot)),
                    "inout" => Ok(Easing::BackInOut(overshoot)),
                    _ => Err(AnimationError::UnknownEasing(raw.to_string())),
                }
            }
        }
    }
}

impl TryFrom<String> for Easing {
    type Error = AnimationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Easing> for String {
    fn from(easing: Easing) -> Self {
        easing.to_string()
    }
}
