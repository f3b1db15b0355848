//! Geographic coordinate type and spherical geodesy.
//!
//! `GeoPoint` uses `f64` latitude/longitude.  Marker placement is sensitive
//! to bearing error at short range (a 1 m error at 20 m is ~3°), so the extra
//! precision over `f32` is worth the memory for POI sets of this size.
//!
//! # Invalid input
//!
//! No function here panics or returns `Result` for bad numbers.  NaN or
//! infinite coordinates degrade to sentinels that downstream filters drop
//! naturally: distance → `f64::INFINITY`, bearing → `0.0`.

use std::fmt;

use crate::angle::{normalize_deg, wrap_180};

/// Mean Earth radius, metres.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Above this separation the equirectangular approximation is within 0.5 %
/// of haversine.  Used only by [`GeoPoint::display_distance_m`].
pub const FAST_PATH_THRESHOLD_M: f64 = 10_000.0;

/// Metres per degree of latitude on the mean sphere.
const METRES_PER_DEG: f64 = EARTH_RADIUS_M * std::f64::consts::PI / 180.0;

/// Safety factor applied to degree boxes so that the cheap pre-filter never
/// rejects a point that haversine would accept.
const BOX_INFLATION: f64 = 1.1;

/// A WGS-84 geographic coordinate with optional altitude.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
    /// Metres above mean sea level, when known.
    pub alt: Option<f64>,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon, alt: None }
    }

    #[inline]
    pub fn with_altitude(lat: f64, lon: f64, alt: f64) -> Self {
        Self { lat, lon, alt: Some(alt) }
    }

    /// `true` when latitude and longitude are finite and inside their
    /// geographic ranges.  Altitude is not checked.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }

    #[inline]
    fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }

    /// Haversine great-circle distance in metres.
    ///
    /// Returns `f64::INFINITY` if either point has a non-finite coordinate.
    pub fn distance_m(self, other: GeoPoint) -> f64 {
        if !self.is_finite() || !other.is_finite() {
            return f64::INFINITY;
        }

        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);
        let a = a.clamp(0.0, 1.0);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_M * c
    }

    /// Initial great-circle bearing from `self` to `other`, degrees in
    /// `[0, 360)`.
    ///
    /// Returns `0.0` if either point has a non-finite coordinate.  The bearing
    /// between identical points is also `0.0`.
    pub fn bearing_deg(self, other: GeoPoint) -> f64 {
        if !self.is_finite() || !other.is_finite() {
            return 0.0;
        }

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let y = d_lon.sin() * lat2.cos();
        let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();

        normalize_deg(y.atan2(x).to_degrees())
    }

    /// Equirectangular (planar) distance approximation in metres.
    ///
    /// Cheap, and close to haversine at city scale.  Never used for
    /// inclusion or ranking decisions.
    pub fn approx_distance_m(self, other: GeoPoint) -> f64 {
        if !self.is_finite() || !other.is_finite() {
            return f64::INFINITY;
        }
        let mean_lat = ((self.lat + other.lat) * 0.5).to_radians();
        let x = wrap_180(other.lon - self.lon).to_radians() * mean_lat.cos();
        let y = (other.lat - self.lat).to_radians();
        EARTH_RADIUS_M * (x * x + y * y).sqrt()
    }

    /// Distance for display labels: the planar approximation when it is
    /// beyond [`FAST_PATH_THRESHOLD_M`], haversine otherwise.
    pub fn display_distance_m(self, other: GeoPoint) -> f64 {
        let approx = self.approx_distance_m(other);
        if approx > FAST_PATH_THRESHOLD_M {
            approx
        } else {
            self.distance_m(other)
        }
    }

    /// Conservative lat/lon box around `self` covering every point within
    /// `radius_m` metres.
    ///
    /// Longitude is widened by the cosine of the most poleward latitude the
    /// box reaches.  A box touching a pole covers all longitudes.
    pub fn degree_box(self, radius_m: f64) -> DegreeBox {
        let half_lat = (radius_m.max(0.0) / METRES_PER_DEG) * BOX_INFLATION;
        let edge_lat = self.lat.abs() + half_lat;

        let half_lon = if !edge_lat.is_finite() || edge_lat >= 90.0 {
            180.0
        } else {
            (half_lat / edge_lat.to_radians().cos()).min(180.0)
        };

        DegreeBox { center: self, half_lat, half_lon }
    }

    /// Approximate bounding-box check, much cheaper than `distance_m` for
    /// quick rejection before the exact test.
    #[inline]
    pub fn within_box(self, bbox: &DegreeBox) -> bool {
        bbox.contains(self)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.alt {
            Some(alt) => write!(f, "({:.6}, {:.6}, {:.1} m)", self.lat, self.lon, alt),
            None      => write!(f, "({:.6}, {:.6})", self.lat, self.lon),
        }
    }
}

// ── DegreeBox ─────────────────────────────────────────────────────────────────

/// Half-extents in degrees around a centre point.  Produced by
/// [`GeoPoint::degree_box`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DegreeBox {
    pub center:   GeoPoint,
    pub half_lat: f64,
    pub half_lon: f64,
}

impl DegreeBox {
    /// `true` if `p` falls inside the box.  Longitude differences are taken
    /// across the antimeridian, so a box centred at 179.9° contains -179.9°.
    pub fn contains(&self, p: GeoPoint) -> bool {
        if !p.is_finite() {
            return false;
        }
        (p.lat - self.center.lat).abs() <= self.half_lat
            && (self.half_lon >= 180.0 || wrap_180(p.lon - self.center.lon).abs() <= self.half_lon)
    }

    /// `(min_lon, max_lon)` ranges covered by the box, split in two when the
    /// box crosses the antimeridian.  Used to build R-tree envelopes.
    pub fn lon_ranges(&self) -> Vec<(f64, f64)> {
        if self.half_lon >= 180.0 {
            return vec![(-180.0, 180.0)];
        }
        let lo = self.center.lon - self.half_lon;
        let hi = self.center.lon + self.half_lon;
        if lo < -180.0 {
            vec![(lo + 360.0, 180.0), (-180.0, hi)]
        } else if hi > 180.0 {
            vec![(lo, 180.0), (-180.0, hi - 360.0)]
        } else {
            vec![(lo, hi)]
        }
    }

    /// `(min_lat, max_lat)` clamped to the valid range.
    pub fn lat_range(&self) -> (f64, f64) {
        (
            (self.center.lat - self.half_lat).max(-90.0),
            (self.center.lat + self.half_lat).min(90.0),
        )
    }
}
