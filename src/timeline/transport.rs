//! Playback transport: play/stop/seek and the host-driven frame tick.
//!
//! The host calls [`Timeline::tick`] from whatever scheduler it owns (UI frame callback, game
//! loop, test harness) with the wall-clock time elapsed since the previous call. Nothing here
//! spawns threads or timers; once [`Timeline::stop`] returns, later ticks are no-ops.

use crate::foundation::core::clamp_time;
use crate::host::TargetHost;
use crate::timeline::model::Timeline;

/// Transport state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    /// Not advancing; seeks still update targets.
    #[default]
    Stopped,
    /// Advancing on every tick, looping over the duration.
    Playing,
}

#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Transport {
    state: PlaybackState,
    /// Playhead position when playback started.
    offset: f64,
    /// Time accumulated since playback started.
    elapsed: f64,
}

/// Outcome of pushing one frame to the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Targets that accepted their interpolated snapshot.
    pub applied: usize,
    /// Targets whose host call failed (logged, then skipped).
    pub failed: usize,
}

impl Timeline {
    /// Current transport state.
    pub fn playback_state(&self) -> PlaybackState {
        self.transport.state
    }

    /// `true` while playing.
    pub fn is_playing(&self) -> bool {
        self.transport.state == PlaybackState::Playing
    }

    /// Start playback from the current playhead. No-op if already playing.
    pub fn play(&mut self) {
        if self.is_playing() {
            return;
        }
        self.transport = Transport {
            state: PlaybackState::Playing,
            offset: self.current_time,
            elapsed: 0.0,
        };
        tracing::debug!(offset = self.current_time, "playback started");
    }

    /// Stop playback, leaving the playhead where it is.
    pub fn stop(&mut self) {
        if !self.is_playing() {
            return;
        }
        self.transport.state = PlaybackState::Stopped;
        tracing::debug!(at = self.current_time, "playback stopped");
    }

    /// Stop playback and rewind to `0`, applying the first frame.
    pub fn stop_and_rewind(&mut self, host: &mut impl TargetHost) -> FrameReport {
        self.stop();
        self.seek_to(0.0, host)
    }

    /// Move the playhead to `time` (clamped to `[0, duration]`) and apply every animated track.
    ///
    /// Works in any state, so scrubbing while stopped still updates the targets. While playing,
    /// the next tick continues from the running clock, not from the seek position.
    #[tracing::instrument(level = "trace", skip(self, host))]
    pub fn seek_to(&mut self, time: f64, host: &mut impl TargetHost) -> FrameReport {
        let time = if time.is_nan() { 0.0 } else { time };
        self.current_time = clamp_time(time, self.duration);
        self.apply_current(host)
    }

    /// Advance playback by `delta` seconds and apply the resulting frame.
    ///
    /// Returns `None` when stopped. Past the end, time wraps modulo the duration; playback always
    /// loops. Negative or non-finite deltas are treated as zero.
    pub fn tick(&mut self, delta: f64, host: &mut impl TargetHost) -> Option<FrameReport> {
        if !self.is_playing() {
            return None;
        }
        if delta.is_finite() && delta > 0.0 {
            self.transport.elapsed += delta;
        }

        let mut time = self.transport.offset + self.transport.elapsed;
        if time > self.duration {
            time %= self.duration;
        }
        tracing::trace!(time, "tick");
        Some(self.seek_to(time, host))
    }

    fn apply_current(&self, host: &mut impl TargetHost) -> FrameReport {
        let mut report = FrameReport::default();
        for (target, track) in &self.tracks {
            let Some(props) = track.sample(self.current_time) else {
                continue;
            };
            match host.apply_properties(target, &props) {
                Ok(()) => report.applied += 1,
                Err(err) => {
                    report.failed += 1;
                    tracing::warn!(%target, error = %err, "failed to apply keyframe properties");
                }
            }
        }
        report
    }
}
