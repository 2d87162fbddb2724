//! Baseplate timeline: keyframe animation for host-owned targets.
//!
//! A [`Timeline`] holds one [`Track`] of [`Keyframe`]s per target. Keyframes capture a
//! [`Snapshot`] of a target's properties and the [`Ease`] used to arrive at them. The host
//! application owns the targets and exposes them through [`TargetHost`]:
//!
//! - Author keyframes (`add_keyframe`, `capture_keyframe`, `move_keyframe`, `delete_keyframe`)
//! - Scrub with [`Timeline::seek_to`] or drive playback with [`Timeline::tick`]
//! - Persist with [`Timeline::serialize`] / [`Timeline::deserialize`]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod foundation;

/// Easing curves and property interpolation.
pub mod animation;
/// Target host boundary.
pub mod host;
/// Timeline model, tracks, transport and persistence.
pub mod timeline;

pub use crate::foundation::core::TargetId;
pub use crate::foundation::error::{TimelineError, TimelineResult};

pub use crate::animation::bezier::CubicBezier;
pub use crate::animation::ease::{Ease, EaseCategory};
pub use crate::animation::interp::{Lerp, interpolate};
pub use crate::animation::value::{PropertyValue, Snapshot};
pub use crate::host::{InMemoryHost, PropertyBinding, PropertyWrite, TargetHost, property_writes};
pub use crate::timeline::model::{Timeline, TimelineOpts};
pub use crate::timeline::serial::{SerializedKeyframe, SerializedTimeline};
pub use crate::timeline::track::{Keyframe, Segment, Track};
pub use crate::timeline::transport::{FrameReport, PlaybackState};
pub use crate::timeline::view::{RulerTick, TimelineView};
