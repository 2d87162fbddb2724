use crate::animation::ease::Ease;
use crate::animation::interp::interpolate;
use crate::animation::value::Snapshot;

/// A timestamped, eased snapshot of one target's properties.
#[derive(Clone, Debug, PartialEq)]
pub struct Keyframe {
    /// Position on the timeline, in seconds.
    pub time: f64,
    /// Properties captured when the keyframe was created.
    pub properties: Snapshot,
    /// Easing of the segment that arrives at this keyframe.
    pub easing: Ease,
}

impl Keyframe {
    /// Build a keyframe.
    pub fn new(time: f64, properties: Snapshot, easing: Ease) -> Self {
        Self {
            time,
            properties,
            easing,
        }
    }
}

/// Bracketing keyframe pair for a point in time.
#[derive(Clone, Copy, Debug)]
pub struct Segment<'a> {
    /// Keyframe at or before the sampled time (or the first keyframe).
    pub from: &'a Keyframe,
    /// Keyframe at or after the sampled time (or the last keyframe).
    pub to: &'a Keyframe,
    /// Linear progress through the segment; may fall outside `[0, 1]` before the first or after
    /// the last keyframe.
    pub progress: f64,
}

impl Segment<'_> {
    /// Progress shaped by the arrival keyframe's easing.
    pub fn eased_progress(&self) -> f64 {
        self.to.easing.apply(self.progress)
    }

    /// Interpolated properties for this segment.
    pub fn sample(&self) -> Snapshot {
        interpolate(&self.from.properties, &self.to.properties, self.eased_progress())
    }
}

/// Keyframes of a single target, kept sorted by time.
///
/// Sorting is stable: keyframes sharing a time keep their relative order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Track {
    keys: Vec<Keyframe>,
}

impl Track {
    /// Empty track.
    pub fn new() -> Self {
        Self::default()
    }

    /// Track from keyframes in any order.
    pub fn from_keyframes(keys: Vec<Keyframe>) -> Self {
        let mut track = Self { keys };
        track.sort();
        track
    }

    /// Keyframes in time order.
    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keys
    }

    /// Keyframe at `index`.
    pub fn get(&self, index: usize) -> Option<&Keyframe> {
        self.keys.get(index)
    }

    /// Number of keyframes.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// `true` when the track holds no keyframes.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// `true` when the track has enough keyframes to animate (two or more).
    pub fn is_animated(&self) -> bool {
        self.keys.len() >= 2
    }

    /// Time covered between the first and last keyframe, if the track animates.
    pub fn span(&self) -> Option<(f64, f64)> {
        if !self.is_animated() {
            return None;
        }
        let first = self.keys.first()?;
        let last = self.keys.last()?;
        Some((first.time, last.time))
    }

    pub(crate) fn insert(&mut self, key: Keyframe) {
        self.keys.push(key);
        self.sort();
    }

    /// Returns `false` if `index` is out of range.
    pub(crate) fn set_time(&mut self, index: usize, time: f64) -> bool {
        let Some(key) = self.keys.get_mut(index) else {
            return false;
        };
        key.time = time;
        self.sort();
        true
    }

    /// Returns `false` if `index` is out of range.
    pub(crate) fn set_easing(&mut self, index: usize, easing: Ease) -> bool {
        let Some(key) = self.keys.get_mut(index) else {
            return false;
        };
        key.easing = easing;
        true
    }

    pub(crate) fn remove(&mut self, index: usize) -> Option<Keyframe> {
        (index < self.keys.len()).then(|| self.keys.remove(index))
    }

    fn sort(&mut self) {
        self.keys.sort_by(|a, b| a.time.total_cmp(&b.time));
    }

    /// Locate the keyframe pair bracketing `time`.
    ///
    /// Returns `None` for tracks that do not animate. Outside every keyframe interval the pair is
    /// the first and last keyframe, so sampling holds the end values instead of extrapolating.
    pub fn segment_at(&self, time: f64) -> Option<Segment<'_>> {
        if !self.is_animated() {
            return None;
        }
        let n = self.keys.len();
        let idx = self.keys.partition_point(|k| k.time < time);
        let (a, b) = match idx {
            0 if self.keys[0].time == time => (0, 1),
            i if i == 0 || i == n => (0, n - 1),
            i => (i - 1, i),
        };
        let from = &self.keys[a];
        let to = &self.keys[b];

        let span = to.time - from.time;
        let progress = if span > 0.0 {
            (time - from.time) / span
        } else {
            0.0
        };
        Some(Segment { from, to, progress })
    }

    /// Interpolated properties at `time`, or `None` if the track does not animate.
    pub fn sample(&self, time: f64) -> Option<Snapshot> {
        self.segment_at(time).map(|seg| seg.sample())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kf(time: f64, x: f64, easing: Ease) -> Keyframe {
        Keyframe::new(time, Snapshot::new().with("x", x), easing)
    }

    #[test]
    fn insert_keeps_time_order() {
        let mut t = Track::new();
        t.insert(kf(2.0, 2.0, Ease::Linear));
        t.insert(kf(0.5, 0.5, Ease::Linear));
        t.insert(kf(1.0, 1.0, Ease::Linear));
        let times: Vec<f64> = t.keyframes().iter().map(|k| k.time).collect();
        assert_eq!(times, [0.5, 1.0, 2.0]);
    }

    #[test]
    fn ties_keep_insertion_order() {
        let mut t = Track::new();
        t.insert(kf(1.0, 10.0, Ease::Linear));
        t.insert(kf(1.0, 20.0, Ease::Linear));
        assert_eq!(t.keyframes()[0].properties.number("x"), Some(10.0));
        assert_eq!(t.keyframes()[1].properties.number("x"), Some(20.0));
    }

    #[test]
    fn set_time_resorts() {
        let mut t = Track::from_keyframes(vec![
            kf(0.0, 0.0, Ease::Linear),
            kf(1.0, 1.0, Ease::Linear),
        ]);
        assert!(t.set_time(0, 1.5));
        assert_eq!(t.keyframes()[1].properties.number("x"), Some(0.0));
        assert!(!t.set_time(5, 0.0));
    }

    #[test]
    fn single_keyframe_does_not_animate() {
        let t = Track::from_keyframes(vec![kf(0.0, 1.0, Ease::Linear)]);
        assert!(!t.is_animated());
        assert!(t.sample(0.0).is_none());
        assert!(t.span().is_none());
    }

    #[test]
    fn linear_midpoint() {
        let t = Track::from_keyframes(vec![
            kf(0.0, 0.0, Ease::Linear),
            kf(2.0, 100.0, Ease::Linear),
        ]);
        assert_eq!(t.sample(1.0).unwrap().number("x"), Some(50.0));
    }

    #[test]
    fn arrival_keyframe_easing_governs_segment() {
        let t = Track::from_keyframes(vec![
            kf(0.0, 0.0, Ease::OutQuad),
            kf(2.0, 100.0, Ease::InQuad),
        ]);
        let seg = t.segment_at(1.0).unwrap();
        assert_eq!(seg.progress, 0.5);
        assert_eq!(seg.eased_progress(), 0.25);
        assert_eq!(seg.sample().number("x"), Some(25.0));
    }

    #[test]
    fn picks_inner_segment() {
        let t = Track::from_keyframes(vec![
            kf(0.0, 0.0, Ease::Linear),
            kf(1.0, 10.0, Ease::Linear),
            kf(3.0, 30.0, Ease::Linear),
        ]);
        let seg = t.segment_at(2.0).unwrap();
        assert_eq!(seg.from.time, 1.0);
        assert_eq!(seg.to.time, 3.0);
        assert_eq!(t.sample(2.0).unwrap().number("x"), Some(20.0));
        assert_eq!(t.sample(1.0).unwrap().number("x"), Some(10.0));
    }

    #[test]
    fn outside_intervals_holds_end_values() {
        let t = Track::from_keyframes(vec![
            kf(0.5, 5.0, Ease::Linear),
            kf(1.0, 10.0, Ease::Linear),
            kf(1.5, 15.0, Ease::Linear),
        ]);
        let before = t.segment_at(0.0).unwrap();
        assert_eq!(before.from.time, 0.5);
        assert_eq!(before.to.time, 1.5);
        assert_eq!(t.sample(0.0).unwrap().number("x"), Some(5.0));
        assert_eq!(t.sample(2.0).unwrap().number("x"), Some(15.0));
    }

    #[test]
    fn coincident_keyframes_have_zero_progress() {
        let t = Track::from_keyframes(vec![
            kf(1.0, 1.0, Ease::Linear),
            kf(1.0, 9.0, Ease::Linear),
        ]);
        let seg = t.segment_at(1.0).unwrap();
        assert_eq!(seg.progress, 0.0);
        assert_eq!(t.sample(1.0).unwrap().number("x"), Some(1.0));
        assert_eq!(t.segment_at(3.0).unwrap().progress, 0.0);
    }

    #[test]
    fn remove_and_span() {
        let mut t = Track::from_keyframes(vec![
            kf(0.25, 0.0, Ease::Linear),
            kf(1.75, 1.0, Ease::Linear),
            kf(1.0, 2.0, Ease::Linear),
        ]);
        assert_eq!(t.span(), Some((0.25, 1.75)));
        assert!(t.remove(7).is_none());
        assert_eq!(t.remove(0).unwrap().time, 0.25);
        assert_eq!(t.span(), Some((1.0, 1.75)));
    }
}
