use std::fmt;
use std::sync::Arc;

/// Opaque identity of a host-owned animatable target.
///
/// The timeline only references targets; creating, rendering and destroying them is up to the host.
/// Cloning is cheap (shared string storage).
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct TargetId(Arc<str>);

impl TargetId {
    /// Create an id from any host-side key.
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(Arc::from(id.as_ref()))
    }

    /// Host-side key this id was created from.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TargetId({:?})", &*self.0)
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TargetId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for TargetId {
    fn from(value: String) -> Self {
        Self(Arc::from(value))
    }
}

/// Clamp `t` into `[0, max]`. `max` is expected to be positive.
///
/// `-0.0` comes out as `+0.0` so it neither sorts ahead of `0.0` nor serializes as `-0.0`.
pub(crate) fn clamp_time(t: f64, max: f64) -> f64 {
    t.clamp(0.0, max) + 0.0
}

/// Lower-bound a keyframe time at `0`, normalizing `-0.0`.
pub(crate) fn non_negative_time(t: f64) -> f64 {
    t.max(0.0) + 0.0
}
