//! Plain-data form of a [`Timeline`] handed to an external persistence layer.
//!
//! JSON shape:
//!
//! ```json
//! { "duration": 2,
//!   "keyframes": { "rect-1": [ { "time": 0, "properties": { "x": 0 },
//!                                "easing": "easeInOutCubic", "bezier": null } ] } }
//! ```

use std::collections::BTreeMap;

use crate::animation::bezier::CubicBezier;
use crate::animation::ease::Ease;
use crate::animation::value::Snapshot;
use crate::foundation::core::{TargetId, clamp_time, non_negative_time};
use crate::foundation::error::TimelineResult;
use crate::timeline::model::{Timeline, TimelineOpts};
use crate::timeline::track::{Keyframe, Track};

/// Serialized timeline: duration plus keyframes grouped by target id.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SerializedTimeline {
    /// Loop length in seconds. Missing or non-positive values load as the default (2 s).
    #[serde(default = "default_duration")]
    pub duration: f64,
    /// Keyframes per target, in time order.
    #[serde(default)]
    pub keyframes: BTreeMap<TargetId, Vec<SerializedKeyframe>>,
}

/// One serialized keyframe.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SerializedKeyframe {
    /// Time in seconds. Non-finite or negative values load as `0`.
    pub time: f64,
    /// Captured properties.
    #[serde(default)]
    pub properties: Snapshot,
    /// Easing name; missing or unknown names load as `linear`.
    #[serde(default)]
    pub easing: Option<String>,
    /// Control points when `easing` is `"custom"`.
    #[serde(default)]
    pub bezier: Option<CubicBezier>,
}

fn default_duration() -> f64 {
    TimelineOpts::default().duration
}

impl From<&Keyframe> for SerializedKeyframe {
    fn from(key: &Keyframe) -> Self {
        Self {
            time: key.time,
            properties: key.properties.clone(),
            easing: Some(key.easing.name().to_owned()),
            bezier: key.easing.control_points(),
        }
    }
}

impl From<SerializedKeyframe> for Keyframe {
    fn from(key: SerializedKeyframe) -> Self {
        let easing = match key.easing.as_deref() {
            Some("custom") => Ease::Custom(key.bezier),
            Some(name) => Ease::from_name_or_default(name),
            None => Ease::Linear,
        };
        let time = if key.time.is_finite() {
            non_negative_time(key.time)
        } else {
            0.0
        };
        Keyframe::new(time, key.properties, easing)
    }
}

impl Timeline {
    /// Snapshot the duration and every track as plain data.
    pub fn serialize(&self) -> SerializedTimeline {
        SerializedTimeline {
            duration: self.duration,
            keyframes: self
                .tracks
                .iter()
                .map(|(id, track)| {
                    let keys = track.keyframes().iter().map(SerializedKeyframe::from);
                    (id.clone(), keys.collect())
                })
                .collect(),
        }
    }

    /// Build a timeline from serialized data with default options for everything not stored.
    pub fn deserialize(data: SerializedTimeline) -> Self {
        let mut timeline = Self::new();
        timeline.load(data);
        timeline
    }

    /// Replace duration and tracks with `data`, keeping options and transport state.
    ///
    /// Keyframes are re-sorted and targets without keyframes are skipped.
    #[tracing::instrument(skip_all, fields(targets = data.keyframes.len()))]
    pub fn load(&mut self, data: SerializedTimeline) {
        self.duration = if data.duration.is_finite() && data.duration > 0.0 {
            data.duration
        } else {
            tracing::warn!(duration = data.duration, "invalid duration, using default");
            default_duration()
        };
        self.current_time = clamp_time(self.current_time, self.duration);
        self.tracks = data
            .keyframes
            .into_iter()
            .filter(|(_, keys)| !keys.is_empty())
            .map(|(id, keys)| {
                let keys = keys.into_iter().map(Keyframe::from).collect();
                (id, Track::from_keyframes(keys))
            })
            .collect();
        tracing::debug!(duration = self.duration, "timeline loaded");
    }

    /// Encode [`Timeline::serialize`] as JSON.
    pub fn to_json(&self) -> TimelineResult<String> {
        Ok(serde_json::to_string(&self.serialize())?)
    }

    /// Decode a JSON timeline.
    pub fn from_json(json: &str) -> TimelineResult<Self> {
        let data: SerializedTimeline = serde_json::from_str(json)?;
        Ok(Self::deserialize(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::error::TimelineError;

    fn sample_timeline() -> Timeline {
        let mut tl = Timeline::new();
        tl.set_duration(3.0).unwrap();
        let props = |x: f64| Snapshot::new().with("x", x).with("fill", "#0af");
        tl.add_keyframe("b", 1.0, props(1.0), Some(Ease::OutBack)).unwrap();
        tl.add_keyframe("a", 0.0, props(0.0), Some(Ease::Linear)).unwrap();
        let curve = Ease::bezier(0.3, 0.0, 0.2, 1.0);
        tl.add_keyframe("a", 2.5, props(5.0), Some(curve)).unwrap();
        tl.add_keyframe("a", 1.0, props(2.0), Some(Ease::Custom(None))).unwrap();
        tl
    }

    #[test]
    fn round_trip_preserves_tracks() {
        let tl = sample_timeline();
        let back = Timeline::deserialize(tl.serialize());
        assert_eq!(back.duration(), 3.0);
        assert_eq!(back.track_count(), 2);
        for (id, track) in tl.tracks() {
            assert_eq!(back.track(id), Some(track));
        }
    }

    #[test]
    fn json_round_trip() {
        let tl = sample_timeline();
        let json = tl.to_json().unwrap();
        let back = Timeline::from_json(&json).unwrap();
        assert_eq!(back.serialize(), tl.serialize());
    }

    #[test]
    fn json_shape() {
        let mut tl = Timeline::new();
        let props = Snapshot::new().with("x", 1.0);
        tl.add_keyframe("r", 0.5, props, Some(Ease::InQuad)).unwrap();
        let value = serde_json::to_value(tl.serialize()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "duration": 2.0,
                "keyframes": {
                    "r": [{ "time": 0.5, "properties": { "x": 1.0 }, "easing": "easeInQuad", "bezier": null }]
                }
            })
        );
    }

    #[test]
    fn lenient_load() {
        let json = r#"{
            "duration": 0,
            "keyframes": {
                "empty": [],
                "r": [
                    { "time": 1.5, "properties": { "x": 2 }, "easing": "mystery" },
                    { "time": 0.5, "properties": { "x": 1 } },
                    { "time": -1, "easing": "custom", "bezier": { "x1": 0.1, "y1": 0.2, "x2": 0.3, "y2": 0.4 } }
                ]
            }
        }"#;
        let tl = Timeline::from_json(json).unwrap();
        assert_eq!(tl.duration(), 2.0);
        assert_eq!(tl.track_count(), 1);

        let keys = tl.track(&TargetId::new("r")).unwrap().keyframes();
        let times: Vec<f64> = keys.iter().map(|k| k.time).collect();
        assert_eq!(times, [0.0, 0.5, 1.5]);
        assert_eq!(keys[0].easing, Ease::bezier(0.1, 0.2, 0.3, 0.4));
        assert!(keys[0].properties.is_empty());
        assert_eq!(keys[1].easing, Ease::Linear);
        assert_eq!(keys[2].easing, Ease::Linear);
    }

    #[test]
    fn edge_times_survive_json_round_trip() {
        let mut tl = Timeline::new();
        let id = TargetId::new("r");
        for t in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
            assert!(tl.add_keyframe(id.clone(), t, Snapshot::new(), None).is_err());
        }
        tl.add_keyframe(id.clone(), -0.0, Snapshot::new().with("x", 0.0), None).unwrap();
        tl.add_keyframe(id.clone(), 0.125, Snapshot::new().with("x", 1.0), None).unwrap();
        tl.add_keyframe(id.clone(), 1e9, Snapshot::new().with("x", 2.0), None).unwrap();
        tl.move_keyframe(&id, 1, -0.0).unwrap();

        let json = tl.to_json().unwrap();
        assert!(!json.contains("\"time\":null"), "{json}");
        assert!(!json.contains("-0.0"), "{json}");
        let back = Timeline::from_json(&json).unwrap();
        assert_eq!(back.serialize(), tl.serialize());
    }

    #[test]
    fn non_finite_loaded_times_become_zero() {
        let data = SerializedTimeline {
            duration: 2.0,
            keyframes: BTreeMap::from([(
                TargetId::new("r"),
                vec![
                    SerializedKeyframe {
                        time: f64::INFINITY,
                        properties: Snapshot::new().with("x", 1.0),
                        easing: None,
                        bezier: None,
                    },
                    SerializedKeyframe {
                        time: -0.0,
                        properties: Snapshot::new().with("x", 2.0),
                        easing: None,
                        bezier: None,
                    },
                ],
            )]),
        };
        let tl = Timeline::deserialize(data);
        let keys = tl.track(&TargetId::new("r")).unwrap().keyframes();
        assert!(keys.iter().all(|k| k.time == 0.0 && k.time.is_sign_positive()));
        assert!(Timeline::from_json(&tl.to_json().unwrap()).is_ok());
    }

    #[test]
    fn missing_fields_use_defaults() {
        let tl = Timeline::from_json("{}").unwrap();
        assert_eq!(tl.duration(), 2.0);
        assert_eq!(tl.track_count(), 0);
    }

    #[test]
    fn malformed_json_is_a_serde_error() {
        assert!(matches!(
            Timeline::from_json("{\"duration\": \"long\"}"),
            Err(TimelineError::Serde(_))
        ));
    }

    #[test]
    fn load_keeps_options_and_clamps_playhead() {
        let mut tl = Timeline::new();
        tl.set_default_easing(Ease::Spring);
        tl.set_duration(10.0).unwrap();
        tl.current_time = 8.0;
        tl.load(SerializedTimeline {
            duration: 4.0,
            keyframes: BTreeMap::new(),
        });
        assert_eq!(tl.default_easing(), Ease::Spring);
        assert_eq!(tl.current_time(), 4.0);
    }
}
