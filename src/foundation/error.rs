use crate::foundation::core::TargetId;

/// Convenience result type used across the crate.
pub type TimelineResult<T> = Result<T, TimelineError>;

/// Error kinds surfaced by authoring, serialization and host calls.
///
/// Playback itself never fails: host errors raised while applying a frame are logged and the
/// remaining targets are still updated.
#[derive(thiserror::Error, Debug)]
pub enum TimelineError {
    /// Invalid input value (non-finite time, non-positive duration, ...).
    #[error("validation error: {0}")]
    Validation(String),

    /// Authoring call referenced a target without a track.
    #[error("target not found: {0}")]
    TargetNotFound(TargetId),

    /// Authoring call referenced a keyframe index past the end of a track.
    #[error("keyframe {index} not found on target {target} (track has {len})")]
    KeyframeNotFound {
        /// Target whose track was addressed.
        target: TargetId,
        /// Requested keyframe index.
        index: usize,
        /// Number of keyframes on the track.
        len: usize,
    },

    /// Failure reported by the host while reading or applying properties.
    #[error("host error: {0}")]
    Host(String),

    /// Failure while encoding or decoding a serialized timeline.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Any other error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TimelineError {
    /// Build a [`TimelineError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`TimelineError::Host`].
    pub fn host(msg: impl Into<String>) -> Self {
        Self::Host(msg.into())
    }

    /// Build a [`TimelineError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for TimelineError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}
