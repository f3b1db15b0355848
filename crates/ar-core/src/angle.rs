//! Compass-angle helpers.
//!
//! All angles are degrees, compass convention: 0 = North, clockwise positive.

/// Normalize any finite angle into `[0, 360)`.
///
/// Non-finite input returns `0.0`.
#[inline]
pub fn normalize_deg(deg: f64) -> f64 {
    if !deg.is_finite() {
        return 0.0;
    }
    let r = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs.
    if r >= 360.0 { 0.0 } else { r }
}

/// Wrap an angle difference into `(-180, 180]`.
#[inline]
pub fn wrap_180(deg: f64) -> f64 {
    let r = normalize_deg(deg);
    if r > 180.0 { r - 360.0 } else { r }
}

/// Shortest unsigned angle between two headings, in `[0, 180]`.
#[inline]
pub fn angular_distance(a: f64, b: f64) -> f64 {
    let diff = (normalize_deg(a) - normalize_deg(b)).abs();
    if diff > 180.0 { 360.0 - diff } else { diff }
}
