//! Easing curves and property interpolation.

/// Cubic Bézier timing curves.
pub mod bezier;
/// Named easing functions.
pub mod ease;
/// Snapshot interpolation.
pub mod interp;
/// Property values and snapshots.
pub mod value;
