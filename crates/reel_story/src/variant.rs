//! Breakpoint variants and selection
//!
//! A section carries one program per breakpoint. The selector re-evaluates
//! the predicates on every resize and reports when the authoritative
//! variant changes; the section does the actual reset and reactivation.
//!
//! When no predicate matches, or more than one does, nothing is active:
//! targets stay neutral and [`VariantStatus::NoActiveVariant`] says why.

use std::fmt;

use reel_animation::{TargetId, TargetStates, TimelineProgram};
use reel_layout::{Breakpoint, CoverageReport};

/// One breakpoint-scoped animation program
#[derive(Clone, Debug, PartialEq)]
pub struct BreakpointVariant {
    pub name: String,
    pub breakpoint: Breakpoint,
    pub program: TimelineProgram,
    /// Snapshots applied when the variant becomes active
    pub initial: TargetStates,
}

impl BreakpointVariant {
    pub fn new(
        name: impl Into<String>,
        breakpoint: Breakpoint,
        initial: TargetStates,
        program: TimelineProgram,
    ) -> Self {
        Self {
            name: name.into(),
            breakpoint,
            program,
            initial,
        }
    }

    pub fn matches(&self, width: f32) -> bool {
        self.breakpoint.matches(width)
    }

    /// Every target the variant sets or animates
    pub fn targets(&self) -> impl Iterator<Item = &TargetId> {
        self.initial
            .targets()
            .chain(self.program.steps().iter().map(|s| &s.target))
    }
}

/// Why no variant is active
#[derive(Clone, Debug, PartialEq)]
pub enum NoVariantReason {
    /// No predicate matches the width
    Gap,
    /// Several predicates match the width (their indices)
    Ambiguous(Vec<usize>),
}

/// Diagnostic state of a selector
#[derive(Clone, Debug, PartialEq)]
pub enum VariantStatus {
    /// Never resolved
    Unresolved,
    /// The variant at this index is authoritative
    Active(usize),
    /// Nothing is animating at this width
    NoActiveVariant { width: f32, reason: NoVariantReason },
}

impl fmt::Display for VariantStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariantStatus::Unresolved => f.write_str("unresolved"),
            VariantStatus::Active(index) => write!(f, "variant {index} active"),
            VariantStatus::NoActiveVariant {
                width,
                reason: NoVariantReason::Gap,
            } => write!(f, "no active variant: nothing matches {width}px"),
            VariantStatus::NoActiveVariant {
                width,
                reason: NoVariantReason::Ambiguous(indices),
            } => write!(f, "no active variant: {indices:?} all match {width}px"),
        }
    }
}

/// Outcome of [`VariantSelector::resolve`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VariantChange {
    /// The same variant (or the same absence) stays in effect
    Unchanged,
    /// A variant became active, replacing `from` if there was one
    Switched { from: Option<usize>, to: usize },
    /// The active variant stopped matching and nothing replaced it
    Deactivated { from: Option<usize> },
}

/// Keeps at most one variant of a section active
#[derive(Clone, Debug)]
pub struct VariantSelector {
    variants: Vec<BreakpointVariant>,
    status: VariantStatus,
}

impl VariantSelector {
    pub fn new(variants: Vec<BreakpointVariant>) -> Self {
        Self {
            variants,
            status: VariantStatus::Unresolved,
        }
    }

    pub fn variants(&self) -> &[BreakpointVariant] {
        &self.variants
    }

    pub fn status(&self) -> &VariantStatus {
        &self.status
    }

    pub fn active_index(&self) -> Option<usize> {
        match self.status {
            VariantStatus::Active(index) => Some(index),
            _ => None,
        }
    }

    pub fn active(&self) -> Option<&BreakpointVariant> {
        self.active_index().and_then(|i| self.variants.get(i))
    }

    /// Check the predicates for gaps and overlaps
    pub fn coverage(&self) -> CoverageReport {
        let breakpoints: Vec<Breakpoint> = self.variants.iter().map(|v| v.breakpoint).collect();
        Breakpoint::coverage(&breakpoints)
    }

    /// Re-evaluate the predicates for a viewport width
    pub fn resolve(&mut self, width: f32) -> VariantChange {
        let matching: Vec<usize> = self
            .variants
            .iter()
            .enumerate()
            .filter(|(_, v)| v.matches(width))
            .map(|(i, _)| i)
            .collect();

        let previous = self.active_index();
        let next = match matching.as_slice() {
            [index] => VariantStatus::Active(*index),
            [] => VariantStatus::NoActiveVariant {
                width,
                reason: NoVariantReason::Gap,
            },
            many => VariantStatus::NoActiveVariant {
                width,
                reason: NoVariantReason::Ambiguous(many.to_vec()),
            },
        };

        let change = match (&next, previous) {
            (VariantStatus::Active(to), Some(from)) if *to == from => VariantChange::Unchanged,
            (VariantStatus::Active(to), from) => VariantChange::Switched { from, to: *to },
            (_, Some(from)) => VariantChange::Deactivated { from: Some(from) },
            (_, None) if self.status == VariantStatus::Unresolved => {
                VariantChange::Deactivated { from: None }
            }
            (_, None) => VariantChange::Unchanged,
        };

        if let VariantStatus::NoActiveVariant { .. } = next {
            if change != VariantChange::Unchanged {
                tracing::warn!(width, status = %next, "breakpoint variants do not resolve");
            }
        }

        self.status = next;
        change
    }
}
