/// Ruler tick spacing in seconds.
const TICK_STEP: f64 = 0.5;

/// Horizontal mapping between ruler pixels and timeline seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimelineView {
    pixels_per_second: f64,
}

/// One tick on the time ruler.
#[derive(Clone, Debug, PartialEq)]
pub struct RulerTick {
    /// Tick position in seconds.
    pub time: f64,
    /// Tick position in pixels.
    pub offset_px: f64,
    /// Whole-second ticks are major and carry a label such as `"1s"`.
    pub label: Option<String>,
}

impl TimelineView {
    pub(crate) fn new(pixels_per_second: f64) -> Self {
        Self { pixels_per_second }
    }

    /// Ruler scale.
    pub fn pixels_per_second(&self) -> f64 {
        self.pixels_per_second
    }

    /// Time under a pixel offset, clamped to `[0, duration]`.
    pub fn time_at_offset(&self, offset_px: f64, duration: f64) -> f64 {
        let t = offset_px / self.pixels_per_second;
        if t.is_nan() { 0.0 } else { t.clamp(0.0, duration) }
    }

    /// Pixel offset of `time`.
    pub fn offset_at_time(&self, time: f64) -> f64 {
        time * self.pixels_per_second
    }

    /// Total ruler width for `duration`.
    pub fn width(&self, duration: f64) -> f64 {
        self.offset_at_time(duration)
    }

    /// Ticks every half second from `0` through `duration`, produced lazily.
    pub fn ruler_ticks(&self, duration: f64) -> impl Iterator<Item = RulerTick> + use<> {
        let count = if duration.is_finite() && duration >= 0.0 {
            // Saturates for huge durations; callers take only the visible range.
            Some((duration / TICK_STEP + 1e-9).floor() as usize)
        } else {
            None
        };
        let view = *self;
        count.into_iter().flat_map(move |count| {
            (0..=count).map(move |i| {
                let time = i as f64 * TICK_STEP;
                RulerTick {
                    time,
                    offset_px: view.offset_at_time(time),
                    label: (i % 2 == 0).then(|| format!("{time}s")),
                }
            })
        })
    }
}
