use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use crate::animation::bezier::CubicBezier;
use crate::foundation::error::TimelineError;

const BACK_C1: f64 = 1.70158;
const BACK_C2: f64 = BACK_C1 * 1.525;
const BACK_C3: f64 = BACK_C1 + 1.0;
const ELASTIC_C4: f64 = (2.0 * PI) / 3.0;
const ELASTIC_C5: f64 = (2.0 * PI) / 4.5;
const BOUNCE_N1: f64 = 7.5625;
const BOUNCE_D1: f64 = 2.75;

/// Easing functions used to map normalized animation progress.
///
/// Elastic, back, bounce and spring curves overshoot `[0, 1]` between the endpoints.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Ease {
    /// Linear interpolation.
    #[default]
    Linear,
    /// Quadratic ease-in.
    InQuad,
    /// Quadratic ease-out.
    OutQuad,
    /// Quadratic ease-in/out.
    InOutQuad,
    /// Cubic ease-in.
    InCubic,
    /// Cubic ease-out.
    OutCubic,
    /// Cubic ease-in/out.
    InOutCubic,
    /// Quartic ease-in.
    InQuart,
    /// Quartic ease-out.
    OutQuart,
    /// Quartic ease-in/out.
    InOutQuart,
    /// Quintic ease-in.
    InQuint,
    /// Quintic ease-out.
    OutQuint,
    /// Quintic ease-in/out.
    InOutQuint,
    /// Sinusoidal ease-in.
    InSine,
    /// Sinusoidal ease-out.
    OutSine,
    /// Sinusoidal ease-in/out.
    InOutSine,
    /// Exponential ease-in.
    InExpo,
    /// Exponential ease-out.
    OutExpo,
    /// Exponential ease-in/out.
    InOutExpo,
    /// Circular ease-in.
    InCirc,
    /// Circular ease-out.
    OutCirc,
    /// Circular ease-in/out.
    InOutCirc,
    /// Elastic ease-in.
    InElastic,
    /// Elastic ease-out.
    OutElastic,
    /// Elastic ease-in/out.
    InOutElastic,
    /// Back (anticipation) ease-in.
    InBack,
    /// Back (overshoot) ease-out.
    OutBack,
    /// Back ease-in/out.
    InOutBack,
    /// Bounce ease-in.
    InBounce,
    /// Bounce ease-out.
    OutBounce,
    /// Bounce ease-in/out.
    InOutBounce,
    /// Damped spring settling on the target.
    Spring,
    /// User-authored cubic Bézier. Without control points it behaves like [`Ease::Linear`].
    Custom(Option<CubicBezier>),
}

/// Family grouping used by easing pickers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EaseCategory {
    /// `linear`.
    Linear,
    /// Power 2.
    Quadratic,
    /// Power 3.
    Cubic,
    /// Power 4.
    Quartic,
    /// Power 5.
    Quintic,
    /// Sine.
    Sine,
    /// Exponential.
    Exponential,
    /// Circular.
    Circular,
    /// Elastic.
    Elastic,
    /// Back.
    Back,
    /// Bounce.
    Bounce,
    /// `spring`.
    Special,
    /// `custom`.
    Custom,
}

impl EaseCategory {
    /// Swatch colour (`#rrggbb`) used for keyframe markers of this family.
    pub fn color(self) -> &'static str {
        match self {
            Self::Linear => "#6b7280",
            Self::Quadratic => "#3b82f6",
            Self::Cubic => "#8b5cf6",
            Self::Quartic => "#a855f7",
            Self::Quintic => "#d946ef",
            Self::Sine => "#06b6d4",
            Self::Exponential => "#f97316",
            Self::Circular => "#14b8a6",
            Self::Elastic => "#f43f5e",
            Self::Back => "#84cc16",
            Self::Bounce => "#eab308",
            Self::Special => "#ec4899",
            Self::Custom => "#6366f1",
        }
    }
}

impl Ease {
    /// Every named curve, in picker order. Excludes [`Ease::Custom`].
    pub const NAMED: [Ease; 32] = [
        Self::Linear,
        Self::InQuad,
        Self::OutQuad,
        Self::InOutQuad,
        Self::InCubic,
        Self::OutCubic,
        Self::InOutCubic,
        Self::InQuart,
        Self::OutQuart,
        Self::InOutQuart,
        Self::InQuint,
        Self::OutQuint,
        Self::InOutQuint,
        Self::InSine,
        Self::OutSine,
        Self::InOutSine,
        Self::InExpo,
        Self::OutExpo,
        Self::InOutExpo,
        Self::InCirc,
        Self::OutCirc,
        Self::InOutCirc,
        Self::InElastic,
        Self::OutElastic,
        Self::InOutElastic,
        Self::InBack,
        Self::OutBack,
        Self::InOutBack,
        Self::InBounce,
        Self::OutBounce,
        Self::InOutBounce,
        Self::Spring,
    ];

    /// Custom Bézier easing from its two interior control points.
    pub fn bezier(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self::Custom(Some(CubicBezier::new(x1, y1, x2, y2)))
    }

    /// Apply this easing function to normalized progress `t`.
    ///
    /// `t` is clamped to `[0, 1]`; the endpoints map to exactly `0` and `1` for every curve.
    pub fn apply(self, t: f64) -> f64 {
        if t.is_nan() || t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        match self {
            Self::Linear => t,
            Self::InQuad => ease_in_pow(t, 2),
            Self::OutQuad => ease_out_pow(t, 2),
            Self::InOutQuad => ease_in_out_pow(t, 2),
            Self::InCubic => ease_in_pow(t, 3),
            Self::OutCubic => ease_out_pow(t, 3),
            Self::InOutCubic => ease_in_out_pow(t, 3),
            Self::InQuart => ease_in_pow(t, 4),
            Self::OutQuart => ease_out_pow(t, 4),
            Self::InOutQuart => ease_in_out_pow(t, 4),
            Self::InQuint => ease_in_pow(t, 5),
            Self::OutQuint => ease_out_pow(t, 5),
            Self::InOutQuint => ease_in_out_pow(t, 5),
            Self::InSine => 1.0 - (t * PI / 2.0).cos(),
            Self::OutSine => (t * PI / 2.0).sin(),
            Self::InOutSine => -((PI * t).cos() - 1.0) / 2.0,
            Self::InExpo => 2f64.powf(10.0 * t - 10.0),
            Self::OutExpo => 1.0 - 2f64.powf(-10.0 * t),
            Self::InOutExpo => {
                if t < 0.5 {
                    2f64.powf(20.0 * t - 10.0) / 2.0
                } else {
                    (2.0 - 2f64.powf(-20.0 * t + 10.0)) / 2.0
                }
            }
            Self::InCirc => 1.0 - (1.0 - t * t).sqrt(),
            Self::OutCirc => (1.0 - (t - 1.0).powi(2)).sqrt(),
            Self::InOutCirc => {
                if t < 0.5 {
                    (1.0 - (1.0 - (2.0 * t).powi(2)).sqrt()) / 2.0
                } else {
                    ((1.0 - (-2.0 * t + 2.0).powi(2)).sqrt() + 1.0) / 2.0
                }
            }
            Self::InElastic => {
                -(2f64.powf(10.0 * t - 10.0)) * ((t * 10.0 - 10.75) * ELASTIC_C4).sin()
            }
            Self::OutElastic | Self::Spring => out_elastic(t),
            Self::InOutElastic => {
                if t < 0.5 {
                    -(2f64.powf(20.0 * t - 10.0) * ((20.0 * t - 11.125) * ELASTIC_C5).sin()) / 2.0
                } else {
                    (2f64.powf(-20.0 * t + 10.0) * ((20.0 * t - 11.125) * ELASTIC_C5).sin()) / 2.0
                        + 1.0
                }
            }
            Self::InBack => BACK_C3 * t * t * t - BACK_C1 * t * t,
            Self::OutBack => {
                1.0 + BACK_C3 * (t - 1.0).powi(3) + BACK_C1 * (t - 1.0).powi(2)
            }
            Self::InOutBack => {
                if t < 0.5 {
                    ((2.0 * t).powi(2) * ((BACK_C2 + 1.0) * 2.0 * t - BACK_C2)) / 2.0
                } else {
                    ((2.0 * t - 2.0).powi(2) * ((BACK_C2 + 1.0) * (t * 2.0 - 2.0) + BACK_C2)
                        + 2.0)
                        / 2.0
                }
            }
            Self::InBounce => 1.0 - out_bounce(1.0 - t),
            Self::OutBounce => out_bounce(t),
            Self::InOutBounce => {
                if t < 0.5 {
                    (1.0 - out_bounce(1.0 - 2.0 * t)) / 2.0
                } else {
                    (1.0 + out_bounce(2.0 * t - 1.0)) / 2.0
                }
            }
            Self::Custom(Some(curve)) => curve.evaluate(t),
            Self::Custom(None) => t,
        }
    }

    /// Stable identifier used in serialized timelines (`"easeInOutCubic"`, `"custom"`, ...).
    pub fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::InQuad => "easeInQuad",
            Self::OutQuad => "easeOutQuad",
            Self::InOutQuad => "easeInOutQuad",
            Self::InCubic => "easeInCubic",
            Self::OutCubic => "easeOutCubic",
            Self::InOutCubic => "easeInOutCubic",
            Self::InQuart => "easeInQuart",
            Self::OutQuart => "easeOutQuart",
            Self::InOutQuart => "easeInOutQuart",
            Self::InQuint => "easeInQuint",
            Self::OutQuint => "easeOutQuint",
            Self::InOutQuint => "easeInOutQuint",
            Self::InSine => "easeInSine",
            Self::OutSine => "easeOutSine",
            Self::InOutSine => "easeInOutSine",
            Self::InExpo => "easeInExpo",
            Self::OutExpo => "easeOutExpo",
            Self::InOutExpo => "easeInOutExpo",
            Self::InCirc => "easeInCirc",
            Self::OutCirc => "easeOutCirc",
            Self::InOutCirc => "easeInOutCirc",
            Self::InElastic => "easeInElastic",
            Self::OutElastic => "easeOutElastic",
            Self::InOutElastic => "easeInOutElastic",
            Self::InBack => "easeInBack",
            Self::OutBack => "easeOutBack",
            Self::InOutBack => "easeInOutBack",
            Self::InBounce => "easeInBounce",
            Self::OutBounce => "easeOutBounce",
            Self::InOutBounce => "easeInOutBounce",
            Self::Spring => "spring",
            Self::Custom(_) => "custom",
        }
    }

    /// Resolve a serialized name. `"custom"` resolves to a custom curve without control points.
    pub fn from_name(name: &str) -> Option<Self> {
        if name == "custom" {
            return Some(Self::Custom(None));
        }
        Self::NAMED.into_iter().find(|e| e.name() == name)
    }

    /// Like [`Ease::from_name`], falling back to [`Ease::Linear`] for unknown names.
    pub fn from_name_or_default(name: &str) -> Self {
        Self::from_name(name).unwrap_or_else(|| {
            tracing::warn!(easing = name, "unknown easing, falling back to linear");
            Self::Linear
        })
    }

    /// Human-readable label for pickers.
    pub fn label(self) -> &'static str {
        match self {
            Self::Linear => "Linear",
            Self::InQuad => "Ease In (Quad)",
            Self::OutQuad => "Ease Out (Quad)",
            Self::InOutQuad => "Ease In-Out (Quad)",
            Self::InCubic => "Ease In (Cubic)",
            Self::OutCubic => "Ease Out (Cubic)",
            Self::InOutCubic => "Ease In-Out (Cubic)",
            Self::InQuart => "Ease In (Quart)",
            Self::OutQuart => "Ease Out (Quart)",
            Self::InOutQuart => "Ease In-Out (Quart)",
            Self::InQuint => "Ease In (Quint)",
            Self::OutQuint => "Ease Out (Quint)",
            Self::InOutQuint => "Ease In-Out (Quint)",
            Self::InSine => "Ease In (Sine)",
            Self::OutSine => "Ease Out (Sine)",
            Self::InOutSine => "Ease In-Out (Sine)",
            Self::InExpo => "Ease In (Expo)",
            Self::OutExpo => "Ease Out (Expo)",
            Self::InOutExpo => "Ease In-Out (Expo)",
            Self::InCirc => "Ease In (Circ)",
            Self::OutCirc => "Ease Out (Circ)",
            Self::InOutCirc => "Ease In-Out (Circ)",
            Self::InElastic => "Ease In (Elastic)",
            Self::OutElastic => "Ease Out (Elastic)",
            Self::InOutElastic => "Ease In-Out (Elastic)",
            Self::InBack => "Ease In (Back)",
            Self::OutBack => "Ease Out (Back)",
            Self::InOutBack => "Ease In-Out (Back)",
            Self::InBounce => "Ease In (Bounce)",
            Self::OutBounce => "Ease Out (Bounce)",
            Self::InOutBounce => "Ease In-Out (Bounce)",
            Self::Spring => "Spring",
            Self::Custom(_) => "Custom Bezier",
        }
    }

    /// Picker category of this curve.
    pub fn category(self) -> EaseCategory {
        match self {
            Self::Linear => EaseCategory::Linear,
            Self::InQuad | Self::OutQuad | Self::InOutQuad => EaseCategory::Quadratic,
            Self::InCubic | Self::OutCubic | Self::InOutCubic => EaseCategory::Cubic,
            Self::InQuart | Self::OutQuart | Self::InOutQuart => EaseCategory::Quartic,
            Self::InQuint | Self::OutQuint | Self::InOutQuint => EaseCategory::Quintic,
            Self::InSine | Self::OutSine | Self::InOutSine => EaseCategory::Sine,
            Self::InExpo | Self::OutExpo | Self::InOutExpo => EaseCategory::Exponential,
            Self::InCirc | Self::OutCirc | Self::InOutCirc => EaseCategory::Circular,
            Self::InElastic | Self::OutElastic | Self::InOutElastic => EaseCategory::Elastic,
            Self::InBack | Self::OutBack | Self::InOutBack => EaseCategory::Back,
            Self::InBounce | Self::OutBounce | Self::InOutBounce => EaseCategory::Bounce,
            Self::Spring => EaseCategory::Special,
            Self::Custom(_) => EaseCategory::Custom,
        }
    }

    /// Picker swatch colour (`#rrggbb`), shared by every curve of a category.
    pub fn color(self) -> &'static str {
        self.category().color()
    }

    /// Control points of a custom curve, if any.
    pub fn control_points(self) -> Option<CubicBezier> {
        match self {
            Self::Custom(curve) => curve,
            _ => None,
        }
    }

    /// `true` for curves that leave `[0, 1]` between the endpoints.
    pub fn overshoots(self) -> bool {
        matches!(
            self.category(),
            EaseCategory::Elastic
                | EaseCategory::Back
                | EaseCategory::Bounce
                | EaseCategory::Special
        )
    }
}

impl fmt::Display for Ease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Ease {
    type Err = TimelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| TimelineError::validation(format!("unknown easing `{s}`")))
    }
}

/// Evaluate `ease` at `t`; shorthand for [`Ease::apply`].
pub fn evaluate(ease: Ease, t: f64) -> f64 {
    ease.apply(t)
}

fn ease_in_pow(t: f64, n: i32) -> f64 {
    t.powi(n)
}

fn ease_out_pow(t: f64, n: i32) -> f64 {
    1.0 - (1.0 - t).powi(n)
}

// 2^(n-1) t^n on the first half, mirrored on the second; both halves meet at 0.5.
fn ease_in_out_pow(t: f64, n: i32) -> f64 {
    if t < 0.5 {
        2f64.powi(n - 1) * t.powi(n)
    } else {
        1.0 - (-2.0 * t + 2.0).powi(n) / 2.0
    }
}

fn out_elastic(t: f64) -> f64 {
    2f64.powf(-10.0 * t) * ((t * 10.0 - 0.75) * ELASTIC_C4).sin() + 1.0
}

fn out_bounce(t: f64) -> f64 {
    if t < 1.0 / BOUNCE_D1 {
        BOUNCE_N1 * t * t
    } else if t < 2.0 / BOUNCE_D1 {
        let t = t - 1.5 / BOUNCE_D1;
        BOUNCE_N1 * t * t + 0.75
    } else if t < 2.5 / BOUNCE_D1 {
        let t = t - 2.25 / BOUNCE_D1;
        BOUNCE_N1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / BOUNCE_D1;
        BOUNCE_N1 * t * t + 0.984375
    }
}
