//! Keyframe tracks, the timeline model and its playback transport.

/// Timeline model and authoring operations.
pub mod model;
/// Plain-data persistence form.
pub mod serial;
/// Per-target keyframe tracks.
pub mod track;
/// Playback: play, stop, seek and frame ticks.
pub mod transport;
/// Ruler geometry.
pub mod view;
