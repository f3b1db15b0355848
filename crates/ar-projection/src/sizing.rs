//! Marker sizing and elevation.

use ar_core::GeoPoint;

/// Marker size in pixels with logarithmic distance falloff.
///
/// ```text
/// factor = 1 - min(0.8, log10(d / 10) / 3)
/// size   = max(min_px, base_px * max(0.2, factor))
/// ```
///
/// A marker at 10 m is `base_px`; beyond ~2.5 km it bottoms out at a fifth
/// of that (or `min_px`).  Distances below 1 m are treated as 1 m.
pub fn size_for_distance(distance_m: f64, base_px: f64, min_px: f64) -> f64 {
    let d = if distance_m.is_finite() { distance_m.max(1.0) } else { f64::MAX };
    let factor = 1.0 - ((d / 10.0).log10() / 3.0).min(0.8);
    (base_px * factor.max(0.2)).max(min_px)
}

/// Elevation angle from `observer` to `target` in degrees, positive above
/// the horizon.  `None` unless both altitudes are known.
///
/// Informational only; it never affects visibility.
pub fn vertical_angle_deg(observer: GeoPoint, target: GeoPoint, horizontal_m: f64) -> Option<f64> {
    let (a, b) = (observer.alt?, target.alt?);
    if !(a.is_finite() && b.is_finite() && horizontal_m.is_finite()) {
        return None;
    }
    Some((b - a).atan2(horizontal_m.max(0.0)).to_degrees())
}
