/// Newton-Raphson iteration cap.
const MAX_ITERATIONS: usize = 8;
/// Convergence threshold on `|x(u) - t|`, also used as the flat-slope cutoff.
const EPSILON: f64 = 1e-6;

/// CSS-style timing curve with endpoints fixed at `(0, 0)` and `(1, 1)`.
///
/// Timing curves are authored as `x, y` control points but consumers need `y` as a function of
/// `x` (time progress), so [`CubicBezier::evaluate`] first solves for the curve parameter whose
/// x-component equals the input.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CubicBezier {
    /// First control point x, expected in `[0, 1]`.
    pub x1: f64,
    /// First control point y (may leave `[0, 1]` for overshoot).
    pub y1: f64,
    /// Second control point x, expected in `[0, 1]`.
    pub x2: f64,
    /// Second control point y (may leave `[0, 1]` for overshoot).
    pub y2: f64,
}

impl CubicBezier {
    /// Build a curve from its two interior control points.
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Eased progress for time progress `t`.
    pub fn evaluate(&self, t: f64) -> f64 {
        let u = self.solve_for_parameter(t);
        sample(u, self.y1, self.y2)
    }

    /// Curve parameter `u` with `x(u) ~= x`.
    ///
    /// Stops after [`MAX_ITERATIONS`] steps or when the slope goes flat; either way the best
    /// estimate so far is returned.
    pub fn solve_for_parameter(&self, x: f64) -> f64 {
        let mut u = x;
        for _ in 0..MAX_ITERATIONS {
            let err = sample(u, self.x1, self.x2) - x;
            if err.abs() < EPSILON {
                break;
            }
            let d = slope(u, self.x1, self.x2);
            if d.abs() < EPSILON {
                break;
            }
            u = (u - err / d).clamp(0.0, 1.0);
        }
        u
    }
}

/// One component of the curve: `3(1-u)^2 u p1 + 3(1-u) u^2 p2 + u^3`.
#[inline]
fn sample(u: f64, p1: f64, p2: f64) -> f64 {
    let mu = 1.0 - u;
    3.0 * mu * mu * u * p1 + 3.0 * mu * u * u * p2 + u * u * u
}

/// Derivative of [`sample`] with respect to `u`.
#[inline]
fn slope(u: f64, p1: f64, p2: f64) -> f64 {
    let mu = 1.0 - u;
    3.0 * mu * mu * p1 + 6.0 * mu * u * (p2 - p1) + 3.0 * u * u * (1.0 - p2)
}
