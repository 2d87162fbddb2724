//! Boundary between the timeline and the application that owns the animated targets.

use std::collections::BTreeMap;

use crate::animation::value::{PropertyValue, Snapshot};
use crate::foundation::core::TargetId;
use crate::foundation::error::{TimelineError, TimelineResult};

/// Capability the host application provides for each animatable target.
///
/// The timeline reads a target's live properties when a keyframe is captured and pushes
/// interpolated snapshots back during playback and scrubbing.
pub trait TargetHost {
    /// Current properties of `target`.
    fn read_properties(&self, target: &TargetId) -> TimelineResult<Snapshot>;
    /// Apply an interpolated snapshot to `target`.
    fn apply_properties(&mut self, target: &TargetId, props: &Snapshot) -> TimelineResult<()>;
}

/// Where a snapshot key lands on an SVG/DOM-like target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PropertyBinding<'a> {
    /// Inline style property.
    Style(&'a str),
    /// Element attribute.
    Attribute(&'a str),
}

impl<'a> PropertyBinding<'a> {
    /// Binding for a snapshot key: `opacity` is a style property, `fontSize` maps to the
    /// `font-size` attribute, every other key is an attribute of the same name.
    pub fn for_key(key: &'a str) -> Self {
        match key {
            "opacity" => Self::Style("opacity"),
            "fontSize" => Self::Attribute("font-size"),
            _ => Self::Attribute(key),
        }
    }
}

/// One write a host performs while applying a snapshot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PropertyWrite<'a> {
    /// Snapshot key.
    pub key: &'a str,
    /// Where the value lands on the target.
    pub binding: PropertyBinding<'a>,
    /// Value to write.
    pub value: &'a PropertyValue,
}

/// Writes a host should perform for `props`, in key order.
///
/// Blank opaque values (null, empty text) are skipped except for style bindings, which are always
/// written so a cleared style resets.
pub fn property_writes(props: &Snapshot) -> impl Iterator<Item = PropertyWrite<'_>> {
    props.iter().filter_map(|(key, value)| {
        let binding = PropertyBinding::for_key(key);
        if matches!(binding, PropertyBinding::Attribute(_)) && value.is_blank() {
            return None;
        }
        Some(PropertyWrite {
            key,
            binding,
            value,
        })
    })
}

/// Host keeping targets as plain snapshots; records every applied frame.
///
/// Intended for tests, headless sampling and debugging.
#[derive(Debug, Default)]
pub struct InMemoryHost {
    targets: BTreeMap<TargetId, Snapshot>,
    applied: Vec<(TargetId, Snapshot)>,
}

impl InMemoryHost {
    /// Create an empty host.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a target with its current properties.
    pub fn insert(&mut self, target: impl Into<TargetId>, props: Snapshot) {
        self.targets.insert(target.into(), props);
    }

    /// Live properties of `target`.
    pub fn properties(&self, target: &TargetId) -> Option<&Snapshot> {
        self.targets.get(target)
    }

    /// Every `apply_properties` call received, in order.
    pub fn applied(&self) -> &[(TargetId, Snapshot)] {
        &self.applied
    }

    /// Forget recorded applications.
    pub fn clear_applied(&mut self) {
        self.applied.clear();
    }
}

impl TargetHost for InMemoryHost {
    fn read_properties(&self, target: &TargetId) -> TimelineResult<Snapshot> {
        self.targets
            .get(target)
            .cloned()
            .ok_or_else(|| TimelineError::TargetNotFound(target.clone()))
    }

    fn apply_properties(&mut self, target: &TargetId, props: &Snapshot) -> TimelineResult<()> {
        let live = self
            .targets
            .get_mut(target)
            .ok_or_else(|| TimelineError::TargetNotFound(target.clone()))?;
        let merged: Snapshot = live
            .iter()
            .map(|(key, value)| (key, value.clone()))
            .chain(property_writes(props).map(|w| (w.key, w.value.clone())))
            .collect();
        *live = merged;
        self.applied.push((target.clone(), props.clone()));
        Ok(())
    }
}
