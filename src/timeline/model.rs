use std::collections::BTreeMap;

use crate::animation::ease::Ease;
use crate::animation::value::Snapshot;
use crate::foundation::core::{TargetId, clamp_time, non_negative_time};
use crate::foundation::error::{TimelineError, TimelineResult};
use crate::host::TargetHost;
use crate::timeline::track::{Keyframe, Track};
use crate::timeline::transport::Transport;
use crate::timeline::view::TimelineView;

/// Options used to construct a [`Timeline`].
#[derive(Clone, Debug)]
pub struct TimelineOpts {
    /// Loop length in seconds; must be finite and `> 0`.
    pub duration: f64,
    /// Easing assigned to keyframes created without an explicit one.
    pub default_easing: Ease,
    /// Horizontal ruler scale used by [`Timeline::view`].
    pub pixels_per_second: f64,
}

impl Default for TimelineOpts {
    fn default() -> Self {
        Self {
            duration: 2.0,
            default_easing: Ease::InOutCubic,
            pixels_per_second: 100.0,
        }
    }
}

/// Keyframe tracks for a set of host-owned targets, plus the playback cursor.
///
/// The timeline owns every track and keyframe; targets are referenced by [`TargetId`] only.
/// Transport operations (`play`, `stop`, `seek_to`, `tick`) live in
/// [`crate::timeline::transport`].
#[derive(Clone, Debug)]
pub struct Timeline {
    pub(crate) duration: f64,
    pub(crate) current_time: f64,
    pub(crate) default_easing: Ease,
    pub(crate) view: TimelineView,
    pub(crate) tracks: BTreeMap<TargetId, Track>,
    pub(crate) transport: Transport,
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Timeline {
    /// Empty timeline with [`TimelineOpts::default`].
    pub fn new() -> Self {
        let opts = TimelineOpts::default();
        Self {
            duration: opts.duration,
            current_time: 0.0,
            default_easing: opts.default_easing,
            view: TimelineView::new(opts.pixels_per_second),
            tracks: BTreeMap::new(),
            transport: Transport::default(),
        }
    }

    /// Empty timeline with custom options.
    pub fn with_opts(opts: TimelineOpts) -> TimelineResult<Self> {
        validate_duration(opts.duration)?;
        if !(opts.pixels_per_second.is_finite() && opts.pixels_per_second > 0.0) {
            return Err(TimelineError::validation(
                "pixels_per_second must be finite and > 0",
            ));
        }
        Ok(Self {
            duration: opts.duration,
            default_easing: opts.default_easing,
            view: TimelineView::new(opts.pixels_per_second),
            ..Self::new()
        })
    }

    /// Loop length in seconds.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Change the loop length. The playhead is re-clamped; keyframes past the new end are kept.
    pub fn set_duration(&mut self, duration: f64) -> TimelineResult<()> {
        validate_duration(duration)?;
        self.duration = duration;
        self.current_time = clamp_time(self.current_time, duration);
        tracing::debug!(duration, "timeline duration changed");
        Ok(())
    }

    /// Playhead position in seconds.
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// Easing given to keyframes created without one.
    pub fn default_easing(&self) -> Ease {
        self.default_easing
    }

    /// Change the easing given to keyframes created without one.
    pub fn set_default_easing(&mut self, easing: Ease) {
        self.default_easing = easing;
    }

    /// Ruler mapping between pixels and seconds.
    pub fn view(&self) -> TimelineView {
        self.view
    }

    /// Track of `target`, if it has keyframes.
    pub fn track(&self, target: &TargetId) -> Option<&Track> {
        self.tracks.get(target)
    }

    /// All tracks, ordered by target id.
    pub fn tracks(&self) -> impl Iterator<Item = (&TargetId, &Track)> {
        self.tracks.iter()
    }

    /// Number of targets with at least one keyframe.
    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    /// Remove every track. Duration and playhead are unchanged.
    pub fn clear(&mut self) {
        self.tracks.clear();
    }

    /// Add a keyframe at `time` holding `properties`.
    ///
    /// `easing: None` uses the timeline's default easing. Negative times are clamped to `0`;
    /// non-finite times are rejected.
    pub fn add_keyframe(
        &mut self,
        target: impl Into<TargetId>,
        time: f64,
        properties: Snapshot,
        easing: Option<Ease>,
    ) -> TimelineResult<()> {
        let time = non_negative_time(validate_time(time)?);
        let target = target.into();
        let easing = easing.unwrap_or(self.default_easing);
        tracing::debug!(%target, time, easing = easing.name(), "add keyframe");
        self.tracks
            .entry(target)
            .or_default()
            .insert(Keyframe::new(time, properties, easing));
        Ok(())
    }

    /// Add a keyframe holding `target`'s live properties as reported by `host`.
    pub fn capture_keyframe(
        &mut self,
        host: &impl TargetHost,
        target: impl Into<TargetId>,
        time: f64,
        easing: Option<Ease>,
    ) -> TimelineResult<()> {
        let target = target.into();
        let properties = host.read_properties(&target)?;
        self.add_keyframe(target, time, properties, easing)
    }

    /// Capture a keyframe at a ruler pixel offset (clamped into the timeline).
    pub fn add_keyframe_at_offset(
        &mut self,
        host: &impl TargetHost,
        target: impl Into<TargetId>,
        offset_px: f64,
        easing: Option<Ease>,
    ) -> TimelineResult<()> {
        let time = self.view.time_at_offset(offset_px, self.duration);
        self.capture_keyframe(host, target, time, easing)
    }

    /// Move keyframe `index` of `target` to `new_time`, clamped to `[0, duration]`.
    ///
    /// The track is re-sorted, so the keyframe's index may change.
    pub fn move_keyframe(
        &mut self,
        target: &TargetId,
        index: usize,
        new_time: f64,
    ) -> TimelineResult<()> {
        let time = clamp_time(validate_time(new_time)?, self.duration);
        let track = self.track_mut(target)?;
        let len = track.len();
        if !track.set_time(index, time) {
            return Err(keyframe_not_found(target, index, len));
        }
        tracing::debug!(%target, index, time, "move keyframe");
        Ok(())
    }

    /// Delete keyframe `index` of `target`. A track left empty is removed.
    pub fn delete_keyframe(&mut self, target: &TargetId, index: usize) -> TimelineResult<Keyframe> {
        let track = self.track_mut(target)?;
        let len = track.len();
        let removed = track
            .remove(index)
            .ok_or_else(|| keyframe_not_found(target, index, len))?;
        if track.is_empty() {
            self.tracks.remove(target);
            tracing::debug!(%target, "track emptied and dropped");
        }
        Ok(removed)
    }

    /// Replace the easing of keyframe `index` of `target`. Time and properties are untouched.
    pub fn set_easing(
        &mut self,
        target: &TargetId,
        index: usize,
        easing: Ease,
    ) -> TimelineResult<()> {
        let track = self.track_mut(target)?;
        let len = track.len();
        if !track.set_easing(index, easing) {
            return Err(keyframe_not_found(target, index, len));
        }
        Ok(())
    }

    /// Interpolated properties of every animated target at `time`, without touching any host.
    ///
    /// Targets whose track has fewer than two keyframes are omitted.
    pub fn sample_at(&self, time: f64) -> Vec<(TargetId, Snapshot)> {
        let time = clamp_time(time, self.duration);
        self.tracks
            .iter()
            .filter_map(|(id, track)| track.sample(time).map(|s| (id.clone(), s)))
            .collect()
    }

    fn track_mut(&mut self, target: &TargetId) -> TimelineResult<&mut Track> {
        self.tracks
            .get_mut(target)
            .ok_or_else(|| TimelineError::TargetNotFound(target.clone()))
    }
}

fn keyframe_not_found(target: &TargetId, index: usize, len: usize) -> TimelineError {
    TimelineError::KeyframeNotFound {
        target: target.clone(),
        index,
        len,
    }
}

fn validate_time(time: f64) -> TimelineResult<f64> {
    if !time.is_finite() {
        return Err(TimelineError::validation("keyframe time must be finite"));
    }
    Ok(time)
}

pub(crate) fn validate_duration(duration: f64) -> TimelineResult<()> {
    if !(duration.is_finite() && duration > 0.0) {
        return Err(TimelineError::validation(
            "timeline duration must be finite and > 0",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::InMemoryHost;

    fn x(v: f64) -> Snapshot {
        Snapshot::new().with("x", v)
    }

    fn times(tl: &Timeline, id: &TargetId) -> Vec<f64> {
        tl.track(id)
            .unwrap()
            .keyframes()
            .iter()
            .map(|k| k.time)
            .collect()
    }

    #[test]
    fn defaults_match_editor() {
        let tl = Timeline::new();
        assert_eq!(tl.duration(), 2.0);
        assert_eq!(tl.current_time(), 0.0);
        assert_eq!(tl.default_easing(), Ease::InOutCubic);
        assert_eq!(tl.track_count(), 0);
    }

    #[test]
    fn opts_are_validated() {
        let bad = TimelineOpts {
            duration: 0.0,
            ..TimelineOpts::default()
        };
        assert!(Timeline::with_opts(bad).is_err());
        let bad = TimelineOpts {
            pixels_per_second: f64::INFINITY,
            ..TimelineOpts::default()
        };
        assert!(Timeline::with_opts(bad).is_err());

        let tl = Timeline::with_opts(TimelineOpts {
            duration: 5.0,
            default_easing: Ease::Linear,
            pixels_per_second: 50.0,
        }).unwrap();
        assert_eq!(tl.duration(), 5.0);
        assert_eq!(tl.view().pixels_per_second(), 50.0);
    }

    #[test]
    fn add_uses_default_easing_when_none() {
        let mut tl = Timeline::new();
        let id = TargetId::new("a");
        tl.add_keyframe(id.clone(), 0.0, x(0.0), None).unwrap();
        tl.set_default_easing(Ease::OutBounce);
        tl.add_keyframe(id.clone(), 1.0, x(1.0), None).unwrap();
        tl.add_keyframe(id.clone(), 2.0, x(2.0), Some(Ease::Linear)).unwrap();

        let eases: Vec<Ease> = tl
            .track(&id)
            .unwrap()
            .keyframes()
            .iter()
            .map(|k| k.easing)
            .collect();
        assert_eq!(eases, [Ease::InOutCubic, Ease::OutBounce, Ease::Linear]);
    }

    #[test]
    fn add_rejects_non_finite_and_clamps_negative() {
        let mut tl = Timeline::new();
        for t in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                tl.add_keyframe("a", t, x(0.0), None),
                Err(TimelineError::Validation(_))
            ));
        }
        assert_eq!(tl.track_count(), 0);
        tl.add_keyframe("a", -3.0, x(0.0), None).unwrap();
        assert_eq!(times(&tl, &TargetId::new("a")), [0.0]);
    }

    #[test]
    fn negative_zero_sorts_as_zero() {
        let mut tl = Timeline::new();
        let id = TargetId::new("a");
        tl.add_keyframe(id.clone(), 0.0, x(1.0), None).unwrap();
        tl.add_keyframe(id.clone(), 1.0, x(2.0), None).unwrap();
        tl.move_keyframe(&id, 1, -0.0).unwrap();
        tl.add_keyframe(id.clone(), -0.0, x(3.0), None).unwrap();

        let track = tl.track(&id).unwrap();
        assert!(track.keyframes().iter().all(|k| k.time.is_sign_positive()));
        let xs: Vec<f64> = track
            .keyframes()
            .iter()
            .map(|k| k.properties.number("x").unwrap())
            .collect();
        assert_eq!(xs, [1.0, 2.0, 3.0]);
    }

    #[test]
    fn ordering_survives_adds_and_moves() {
        let mut tl = Timeline::new();
        let id = TargetId::new("a");
        for t in [1.5, 0.2, 1.9, 0.7] {
            tl.add_keyframe(id.clone(), t, x(t), None).unwrap();
        }
        tl.move_keyframe(&id, 0, 1.95).unwrap();
        tl.move_keyframe(&id, 3, 0.0).unwrap();
        tl.move_keyframe(&id, 1, 40.0).unwrap();
        let ts = times(&tl, &id);
        assert!(ts.windows(2).all(|w| w[0] <= w[1]), "{ts:?}");
        assert_eq!(*ts.last().unwrap(), 2.0);
    }

    #[test]
    fn move_clamps_into_duration() {
        let mut tl = Timeline::new();
        let id = TargetId::new("a");
        tl.add_keyframe(id.clone(), 1.0, x(0.0), None).unwrap();
        tl.move_keyframe(&id, 0, -1.0).unwrap();
        assert_eq!(times(&tl, &id), [0.0]);
        tl.move_keyframe(&id, 0, 99.0).unwrap();
        assert_eq!(times(&tl, &id), [2.0]);
    }

    #[test]
    fn missing_target_and_index_are_reported() {
        let mut tl = Timeline::new();
        let id = TargetId::new("a");
        assert!(matches!(
            tl.move_keyframe(&id, 0, 1.0),
            Err(TimelineError::TargetNotFound(_))
        ));
        tl.add_keyframe(id.clone(), 1.0, x(0.0), None).unwrap();
        assert!(matches!(
            tl.set_easing(&id, 3, Ease::Linear),
            Err(TimelineError::KeyframeNotFound { index: 3, len: 1, .. })
        ));
        assert!(tl.delete_keyframe(&id, 1).is_err());
    }

    #[test]
    fn deleting_last_keyframe_drops_track() {
        let mut tl = Timeline::new();
        let id = TargetId::new("a");
        tl.add_keyframe(id.clone(), 0.0, x(0.0), None).unwrap();
        tl.add_keyframe(id.clone(), 1.0, x(1.0), None).unwrap();

        let removed = tl.delete_keyframe(&id, 1).unwrap();
        assert_eq!(removed.time, 1.0);
        assert!(tl.track(&id).is_some());

        tl.delete_keyframe(&id, 0).unwrap();
        assert!(tl.track(&id).is_none());
        assert_eq!(tl.track_count(), 0);
    }

    #[test]
    fn set_easing_only_touches_easing() {
        let mut tl = Timeline::new();
        let id = TargetId::new("a");
        tl.add_keyframe(id.clone(), 0.5, x(7.0), None).unwrap();
        tl.set_easing(&id, 0, Ease::bezier(0.1, 0.2, 0.3, 0.4)).unwrap();
        let k = &tl.track(&id).unwrap().keyframes()[0];
        assert_eq!(k.time, 0.5);
        assert_eq!(k.properties, x(7.0));
        assert_eq!(k.easing, Ease::bezier(0.1, 0.2, 0.3, 0.4));
    }

    #[test]
    fn capture_reads_host_state() {
        let mut host = InMemoryHost::new();
        host.insert("rect", Snapshot::new().with("x", 12.0).with("fill", "red"));
        let mut tl = Timeline::new();
        tl.capture_keyframe(&host, "rect", 0.25, Some(Ease::Linear)).unwrap();
        let k = &tl.track(&TargetId::new("rect")).unwrap().keyframes()[0];
        assert_eq!(k.properties.number("x"), Some(12.0));

        assert!(matches!(
            tl.capture_keyframe(&host, "nope", 0.0, None),
            Err(TimelineError::TargetNotFound(_))
        ));
    }

    #[test]
    fn capture_at_ruler_offset() {
        let mut host = InMemoryHost::new();
        host.insert("rect", x(1.0));
        let mut tl = Timeline::new();
        tl.add_keyframe_at_offset(&host, "rect", 150.0, None).unwrap();
        tl.add_keyframe_at_offset(&host, "rect", 900.0, None).unwrap();
        assert_eq!(times(&tl, &TargetId::new("rect")), [1.5, 2.0]);
    }

    #[test]
    fn set_duration_reclamps_playhead() {
        let mut tl = Timeline::new();
        tl.current_time = 1.8;
        tl.set_duration(1.0).unwrap();
        assert_eq!(tl.current_time(), 1.0);
        assert!(tl.set_duration(-2.0).is_err());
        assert!(tl.set_duration(f64::NAN).is_err());
        assert_eq!(tl.duration(), 1.0);
    }

    #[test]
    fn sample_at_skips_short_tracks() {
        let mut tl = Timeline::new();
        tl.add_keyframe("solo", 0.0, x(5.0), None).unwrap();
        tl.add_keyframe("pair", 0.0, x(0.0), Some(Ease::Linear)).unwrap();
        tl.add_keyframe("pair", 2.0, x(10.0), Some(Ease::Linear)).unwrap();
        let out = tl.sample_at(1.0);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].0.as_str(), "pair");
        assert_eq!(out[0].1.number("x"), Some(5.0));
    }
}
