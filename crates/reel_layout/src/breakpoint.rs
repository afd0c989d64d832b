//! Viewport width predicates
//!
//! Breakpoints are written either in a compact comparison form
//! (`">=768"`, `"<768"`, `"<=767"`, `"640..1024"`, `"*"`) or as the media
//! queries they replace (`"(min-width: 768px)"`, `"(max-width: 767px)"`).
//!
//! A set of breakpoints that selects between variants has to be
//! exhaustive and mutually exclusive. [`Breakpoint::coverage`] checks both.
//! Note that `(max-width: 767px)` and `(min-width: 768px)` leave fractional
//! widths such as 767.5 uncovered; prefer `"<768"` for the lower range.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};

/// A test on the viewport width in logical pixels
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Breakpoint {
    /// Every width
    Any,
    /// `width >= min`
    MinWidth(f32),
    /// `width <= max`
    MaxWidth(f32),
    /// `width < limit`
    Below(f32),
    /// `min <= width < below`
    Range { min: f32, below: f32 },
}

impl Breakpoint {
    pub fn matches(&self, width: f32) -> bool {
        if width.is_nan() {
            return false;
        }
        match *self {
            Breakpoint::Any => true,
            Breakpoint::MinWidth(min) => width >= min,
            Breakpoint::MaxWidth(max) => width <= max,
            Breakpoint::Below(limit) => width < limit,
            Breakpoint::Range { min, below } => width >= min && width < below,
        }
    }

    fn edges(&self) -> impl Iterator<Item = f32> {
        let (a, b) = match *self {
            Breakpoint::Any => (None, None),
            Breakpoint::MinWidth(v) | Breakpoint::MaxWidth(v) | Breakpoint::Below(v) => {
                (Some(v), None)
            }
            Breakpoint::Range { min, below } => (Some(min), Some(below)),
        };
        a.into_iter().chain(b)
    }

    /// Check that `breakpoints` select exactly one entry for every width
    ///
    /// Every predicate is constant between consecutive edges, so probing the
    /// edges, the midpoints between them, and one width past either end is
    /// enough to find every gap and overlap.
    pub fn coverage(breakpoints: &[Breakpoint]) -> CoverageReport {
        let mut edges: Vec<f32> = breakpoints
            .iter()
            .flat_map(|b| b.edges())
            .filter(|e| e.is_finite() && *e >= 0.0)
            .collect();
        edges.sort_by(f32::total_cmp);
        edges.dedup();

        let mut probes = vec![0.0];
        for (i, &edge) in edges.iter().enumerate() {
            probes.push(edge);
            match edges.get(i + 1) {
                Some(&next) => probes.push((edge + next) / 2.0),
                None => probes.push(edge + 1.0),
            }
        }
        if let Some(&first) = edges.first() {
            if first > 0.0 {
                probes.push(first / 2.0);
            }
        }
        probes.sort_by(f32::total_cmp);
        probes.dedup();

        let mut report = CoverageReport::default();
        for width in probes {
            let matching: Vec<usize> = breakpoints
                .iter()
                .enumerate()
                .filter(|(_, b)| b.matches(width))
                .map(|(i, _)| i)
                .collect();
            match matching.as_slice() {
                [] => report.gaps.push(width),
                [_] => {}
                many => report.overlaps.push((width, many.to_vec())),
            }
        }
        report
    }
}

/// Result of [`Breakpoint::coverage`]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CoverageReport {
    /// Sample widths no breakpoint matches
    pub gaps: Vec<f32>,
    /// Sample widths with the indices of every breakpoint that matches
    pub overlaps: Vec<(f32, Vec<usize>)>,
}

impl CoverageReport {
    pub fn is_exhaustive(&self) -> bool {
        self.gaps.is_empty()
    }

    pub fn is_exclusive(&self) -> bool {
        self.overlaps.is_empty()
    }

    pub fn is_ok(&self) -> bool {
        self.is_exhaustive() && self.is_exclusive()
    }
}

impl fmt::Display for CoverageReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_ok() {
            return f.write_str("exhaustive and exclusive");
        }
        let mut parts = Vec::new();
        if !self.gaps.is_empty() {
            let widths: Vec<String> = self.gaps.iter().map(|w| format!("{w}px")).collect();
            parts.push(format!("no variant at {}", widths.join(", ")));
        }
        for (width, indices) in &self.overlaps {
            parts.push(format!("variants {indices:?} all match {width}px"));
        }
        f.write_str(&parts.join("; "))
    }
}

impl fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Breakpoint::Any => f.write_str("*"),
            Breakpoint::MinWidth(v) => write!(f, ">={v}"),
            Breakpoint::MaxWidth(v) => write!(f, "<={v}"),
            Breakpoint::Below(v) => write!(f, "<{v}"),
            Breakpoint::Range { min, below } => write!(f, "{min}..{below}"),
        }
    }
}

impl FromStr for Breakpoint {
    type Err = LayoutError;

    fn from_str(raw: &str) -> Result<Self> {
        let invalid = || LayoutError::InvalidBreakpoint(raw.to_string());
        let width = |v: &str| {
            v.trim()
                .trim_end_matches("px")
                .trim()
                .parse::<f32>()
                .ok()
                .filter(|v| v.is_finite() && *v >= 0.0)
                .ok_or_else(invalid)
        };

        let s = raw.trim();
        if s == "*" || s.eq_ignore_ascii_case("all") {
            return Ok(Breakpoint::Any);
        }

        // Media query form
        if let Some(inner) = s.strip_prefix('(').and_then(|s| s.strip_suffix(')')) {
            let (feature, value) = inner.split_once(':').ok_or_else(invalid)?;
            return match feature.trim() {
                "min-width" => Ok(Breakpoint::MinWidth(width(value)?)),
                "max-width" => Ok(Breakpoint::MaxWidth(width(value)?)),
                _ => Err(invalid()),
            };
        }

        if let Some(v) = s.strip_prefix(">=") {
            Ok(Breakpoint::MinWidth(width(v)?))
        } else if let Some(v) = s.strip_prefix("<=") {
            Ok(Breakpoint::MaxWidth(width(v)?))
        } else if let Some(v) = s.strip_prefix('<') {
            Ok(Breakpoint::Below(width(v)?))
        } else if let Some((min, below)) = s.split_once("..") {
            let (min, below) = (width(min)?, width(below)?);
            if below <= min {
                return Err(invalid());
            }
            Ok(Breakpoint::Range { min, below })
        } else {
            Err(invalid())
        }
    }
}

impl TryFrom<String> for Breakpoint {
    type Error = LayoutError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Breakpoint> for String {
    fn from(breakpoint: Breakpoint) -> Self {
        breakpoint.to_string()
    }
}
