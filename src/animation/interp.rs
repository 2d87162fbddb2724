use crate::animation::value::{PropertyValue, Snapshot};

/// Interpolation contract for animation value types.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` with normalized factor `t`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for PropertyValue {
    /// Numbers blend; any other pairing holds `a` below the midpoint and switches to `b` at it.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        match (a, b) {
            (Self::Number(a), Self::Number(b)) => Self::Number(f64::lerp(a, b, t)),
            _ if t < 0.5 => a.clone(),
            _ => b.clone(),
        }
    }
}

/// Blend two snapshots at eased progress `p`.
///
/// The interpolation domain is the key set of `from`: keys that only exist in `to` are never
/// emitted. A `from` key missing in `to` steps like an opaque value, holding `from` below the
/// midpoint and then dropping out of the result (there is nothing to switch to).
pub fn interpolate(from: &Snapshot, to: &Snapshot, p: f64) -> Snapshot {
    from.iter()
        .filter_map(|(key, a)| match to.get(key) {
            Some(b) => Some((key, PropertyValue::lerp(a, b, p))),
            None if p < 0.5 => Some((key, a.clone())),
            None => None,
        })
        .collect()
}
