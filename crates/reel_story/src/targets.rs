//! Visual targets owned by one section
//!
//! Each section owns the snapshots of its targets outright. Only the
//! section's active driver writes them, and they are dropped with the
//! section.

use indexmap::IndexMap;
use reel_animation::{PropertySnapshot, Sample, TargetId, TargetStates};
use serde::Serialize;

/// The current rendered snapshot of every target in a section
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct VisualTargets {
    snapshots: IndexMap<TargetId, PropertySnapshot>,
}

impl VisualTargets {
    /// Neutral snapshots for `ids`
    pub fn new(ids: impl IntoIterator<Item = TargetId>) -> Self {
        Self {
            snapshots: ids
                .into_iter()
                .map(|id| (id, PropertySnapshot::NEUTRAL))
                .collect(),
        }
    }

    pub fn get(&self, id: &TargetId) -> Option<&PropertySnapshot> {
        self.snapshots.get(id)
    }

    /// Put every target back to neutral
    pub fn reset(&mut self) {
        for snapshot in self.snapshots.values_mut() {
            *snapshot = PropertySnapshot::NEUTRAL;
        }
    }

    /// Overwrite the targets named in `states`
    pub fn apply_states(&mut self, states: &TargetStates) {
        for (id, snapshot) in states.iter() {
            self.snapshots.insert(id.clone(), *snapshot);
        }
    }

    /// Overwrite the targets named in `sample`
    pub fn apply_sample(&mut self, sample: &Sample) {
        for (id, snapshot) in sample.iter() {
            self.snapshots.insert(id.clone(), *snapshot);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TargetId, &PropertySnapshot)> {
        self.snapshots.iter()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reel_animation::{Property, Props};

    #[test]
    fn test_reset_then_apply_states() {
        let mut targets = VisualTargets::new(["phone".into(), "text".into()]);
        let states = TargetStates::new().with("phone", Props::new().with(Property::Scale, 1.3));

        targets.apply_states(&states);
        assert_eq!(targets.get(&"phone".into()).unwrap().scale, 1.3);

        targets.reset();
        assert_eq!(targets.len(), 2);
        assert!(targets.iter().all(|(_, s)| *s == PropertySnapshot::NEUTRAL));
    }
}
