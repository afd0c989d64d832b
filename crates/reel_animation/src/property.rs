//! Animatable properties and target snapshots
//!
//! A visual target is reduced to a [`PropertySnapshot`]: the handful of
//! transform and opacity values a renderer needs to place it. Timelines
//! write individual [`Property`] values into snapshots.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::AnimationError;

/// Name of a visual target inside one section
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetId(String);

impl TargetId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TargetId {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for TargetId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single animatable property
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Property {
    #[serde(rename = "scale")]
    Scale,
    /// Rotation around the z axis, degrees
    #[serde(rename = "rotation")]
    Rotation,
    /// Tilt around the x axis, degrees
    #[serde(rename = "rotationX")]
    RotationX,
    #[serde(rename = "rotationY")]
    RotationY,
    /// Horizontal translation, pixels
    #[serde(rename = "x")]
    X,
    /// Vertical translation, pixels
    #[serde(rename = "y")]
    Y,
    /// Horizontal translation, percent of the target's own width
    #[serde(rename = "xPercent")]
    XPercent,
    /// Vertical translation, percent of the target's own height
    #[serde(rename = "yPercent")]
    YPercent,
    #[serde(rename = "opacity")]
    Opacity,
    /// Opacity that also hides the target when it reaches 0
    #[serde(rename = "autoAlpha")]
    AutoAlpha,
}

impl Property {
    pub const ALL: [Property; 10] = [
        Property::Scale,
        Property::Rotation,
        Property::RotationX,
        Property::RotationY,
        Property::X,
        Property::Y,
        Property::XPercent,
        Property::YPercent,
        Property::Opacity,
        Property::AutoAlpha,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Property::Scale => "scale",
            Property::Rotation => "rotation",
            Property::RotationX => "rotationX",
            Property::RotationY => "rotationY",
            Property::X => "x",
            Property::Y => "y",
            Property::XPercent => "xPercent",
            Property::YPercent => "yPercent",
            Property::Opacity => "opacity",
            Property::AutoAlpha => "autoAlpha",
        }
    }

    /// Properties that land in the same snapshot field
    pub fn channel(&self) -> Property {
        match self {
            Property::AutoAlpha => Property::Opacity,
            other => *other,
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Property {
    type Err = AnimationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Property::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| AnimationError::UnknownProperty(s.to_string()))
    }
}

/// The rendered state of one visual target
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySnapshot {
    pub scale: f32,
    pub rotation: f32,
    pub rotation_x: f32,
    pub rotation_y: f32,
    pub x: f32,
    pub y: f32,
    pub x_percent: f32,
    pub y_percent: f32,
    pub opacity: f32,
    /// `false` once an `autoAlpha` write reaches 0
    pub visible: bool,
}

impl PropertySnapshot {
    /// Untransformed, fully opaque, visible
    pub const NEUTRAL: PropertySnapshot = PropertySnapshot {
        scale: 1.0,
        rotation: 0.0,
        rotation_x: 0.0,
        rotation_y: 0.0,
        x: 0.0,
        y: 0.0,
        x_percent: 0.0,
        y_percent: 0.0,
        opacity: 1.0,
        visible: true,
    };

    pub fn get(&self, property: Property) -> f32 {
        match property {
            Property::Scale => self.scale,
            Property::Rotation => self.rotation,
            Property::RotationX => self.rotation_x,
            Property::RotationY => self.rotation_y,
            Property::X => self.x,
            Property::Y => self.y,
            Property::XPercent => self.x_percent,
            Property::YPercent => self.y_percent,
            Property::Opacity | Property::AutoAlpha => self.opacity,
        }
    }

    pub fn set(&mut self, property: Property, value: f32) {
        match property {
            Property::Scale => self.scale = value,
            Property::Rotation => self.rotation = value,
            Property::RotationX => self.rotation_x = value,
            Property::RotationY => self.rotation_y = value,
            Property::X => self.x = value,
            Property::Y => self.y = value,
            Property::XPercent => self.x_percent = value,
            Property::YPercent => self.y_percent = value,
            Property::Opacity => self.opacity = value,
            Property::AutoAlpha => {
                self.opacity = value;
                self.visible = value > 0.0;
            }
        }
    }

    /// Neutral snapshot with `props` applied on top
    pub fn from_props(props: &Props) -> Self {
        let mut snapshot = Self::NEUTRAL;
        snapshot.apply(props);
        snapshot
    }

    pub fn apply(&mut self, props: &Props) {
        for (property, value) in props.iter() {
            self.set(property, value);
        }
    }

    /// Builder-style `set`
    pub fn with(mut self, property: Property, value: f32) -> Self {
        self.set(property, value);
        self
    }
}

impl Default for PropertySnapshot {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// A small property -> value map; setting a property twice replaces it
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Props {
    entries: SmallVec<[(Property, f32); 4]>,
}

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, property: Property, value: f32) -> Self {
        self.insert(property, value);
        self
    }

    pub fn insert(&mut self, property: Property, value: f32) {
        match self.entries.iter_mut().find(|(p, _)| *p == property) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((property, value)),
        }
    }

    pub fn get(&self, property: Property) -> Option<f32> {
        self.entries
            .iter()
            .find(|(p, _)| *p == property)
            .map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Property, f32)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(Property, f32)> for Props {
    fn from_iter<I: IntoIterator<Item = (Property, f32)>>(iter: I) -> Self {
        let mut props = Props::new();
        for (property, value) in iter {
            props.insert(property, value);
        }
        props
    }
}

impl Serialize for Props {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (property, value) in &self.entries {
            map.serialize_entry(property, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Props {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = IndexMap::<Property, f32>::deserialize(deserializer)?;
        Ok(map.into_iter().collect())
    }
}

/// Per-target starting snapshots (what a variant applies on activation)
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetStates {
    states: IndexMap<TargetId, PropertySnapshot>,
}

impl TargetStates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style: neutral snapshot with `props` applied
    pub fn with(mut self, target: impl Into<TargetId>, props: Props) -> Self {
        self.set(target.into(), &props);
        self
    }

    /// Apply `props` on top of the target's current state (neutral if new)
    pub fn set(&mut self, target: TargetId, props: &Props) {
        self.states
            .entry(target)
            .or_insert(PropertySnapshot::NEUTRAL)
            .apply(props);
    }

    pub fn insert(&mut self, target: TargetId, snapshot: PropertySnapshot) {
        self.states.insert(target, snapshot);
    }

    pub fn get(&self, target: &TargetId) -> Option<&PropertySnapshot> {
        self.states.get(target)
    }

    /// Snapshot for `target`, neutral when it has no declared state
    pub fn snapshot(&self, target: &TargetId) -> PropertySnapshot {
        self.states
            .get(target)
            .copied()
            .unwrap_or(PropertySnapshot::NEUTRAL)
    }

    pub fn contains(&self, target: &TargetId) -> bool {
        self.states.contains_key(target)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TargetId, &PropertySnapshot)> {
        self.states.iter()
    }

    pub fn targets(&self) -> impl Iterator<Item = &TargetId> {
        self.states.keys()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn into_map(self) -> IndexMap<TargetId, PropertySnapshot> {
        self.states
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_alpha_controls_visibility() {
        let mut snapshot = PropertySnapshot::NEUTRAL;
        snapshot.set(Property::AutoAlpha, 0.0);
        assert_eq!(snapshot.opacity, 0.0);
        assert!(!snapshot.visible);

        snapshot.set(Property::AutoAlpha, 0.2);
        assert!(snapshot.visible);

        // Plain opacity leaves visibility alone
        snapshot.set(Property::AutoAlpha, 0.0);
        snapshot.set(Property::Opacity, 1.0);
        assert!(!snapshot.visible);
    }

    #[test]
    fn test_props_insert_replaces() {
        let props = Props::new()
            .with(Property::Scale, 1.3)
            .with(Property::Scale, 0.8)
            .with(Property::Y, 50.0);
        assert_eq!(props.len(), 2);
        assert_eq!(props.get(Property::Scale), Some(0.8));
    }

    #[test]
    fn test_property_names_parse() {
        assert_eq!("rotationX".parse::<Property>(), Ok(Property::RotationX));
        assert_eq!("autoalpha".parse::<Property>(), Ok(Property::AutoAlpha));
        assert!("skew".parse::<Property>().is_err());
        for property in Property::ALL {
            assert_eq!(property.name().parse::<Property>(), Ok(property));
        }
    }

    #[test]
    fn test_target_states_layer_on_neutral() {
        let states = TargetStates::new()
            .with("phone", Props::new().with(Property::Scale, 1.3))
            .with("text", Props::new().with(Property::AutoAlpha, 0.0));

        let phone = states.snapshot(&"phone".into());
        assert_eq!(phone.scale, 1.3);
        assert_eq!(phone.opacity, 1.0);

        let text = states.snapshot(&"text".into());
        assert!(!text.visible);

        assert_eq!(states.snapshot(&"missing".into()), PropertySnapshot::NEUTRAL);
    }
}
