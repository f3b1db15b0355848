//! Observer state: where the user is and which way the device faces.

use crate::angle::normalize_deg;
use crate::GeoPoint;

/// One sample from the geolocation collaborator.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PositionFix {
    pub latitude:    f64,
    pub longitude:   f64,
    /// Horizontal accuracy radius reported by the platform, metres.
    pub accuracy_m:  f64,
    pub altitude:    Option<f64>,
}

impl PositionFix {
    pub fn new(latitude: f64, longitude: f64, accuracy_m: f64) -> Self {
        Self { latitude, longitude, accuracy_m, altitude: None }
    }

    pub fn point(&self) -> GeoPoint {
        GeoPoint { lat: self.latitude, lon: self.longitude, alt: self.altitude }
    }
}

/// Snapshot of the observer consumed by one computation cycle.
///
/// The core never mutates a snapshot; callers build a fresh one whenever
/// position or heading changes.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObservedState {
    pub position:            GeoPoint,
    pub position_accuracy_m: f64,
    /// Degrees in `[0, 360)`.
    pub heading_deg:         f64,
    pub heading_calibrated:  bool,
}

impl ObservedState {
    /// Build a snapshot; a finite `heading_deg` is normalized into `[0, 360)`.
    pub fn new(position: GeoPoint, heading_deg: f64) -> Self {
        Self {
            position,
            position_accuracy_m: 0.0,
            heading_deg: normalize_heading(heading_deg),
            heading_calibrated: false,
        }
    }

    pub fn from_fix(fix: &PositionFix, heading_deg: f64, heading_calibrated: bool) -> Self {
        Self {
            position:            fix.point(),
            position_accuracy_m: fix.accuracy_m,
            heading_deg:         normalize_heading(heading_deg),
            heading_calibrated,
        }
    }

    pub fn with_accuracy(mut self, accuracy_m: f64) -> Self {
        self.position_accuracy_m = accuracy_m;
        self
    }

    pub fn calibrated(mut self, calibrated: bool) -> Self {
        self.heading_calibrated = calibrated;
        self
    }

    /// `true` if the snapshot has a valid position and a finite heading.
    /// Selection on an unusable snapshot yields no markers.
    pub fn is_usable(&self) -> bool {
        self.position.is_valid() && self.heading_deg.is_finite()
    }
}

/// Non-finite headings stay NaN so [`ObservedState::is_usable`] rejects them
/// instead of silently facing North.
fn normalize_heading(deg: f64) -> f64 {
    if deg.is_finite() { normalize_deg(deg) } else { f64::NAN }
}
