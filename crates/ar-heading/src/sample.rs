//! Raw orientation samples and their conversion to compass convention.

use ar_core::normalize_deg;

/// One event from the device-orientation collaborator.
///
/// Platforms report either Euler angles (`alpha` about the z axis, counter-
/// clockwise from North; `beta` front-back pitch; `gamma` left-right roll) or
/// a native compass heading that is already clockwise from North.  Any field
/// may be missing.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrientationSample {
    pub alpha:           Option<f64>,
    pub beta:            Option<f64>,
    pub gamma:           Option<f64>,
    pub compass_heading: Option<f64>,
}

impl OrientationSample {
    /// Euler-angle sample with only `alpha` present.
    pub fn from_alpha(alpha: f64) -> Self {
        Self { alpha: Some(alpha), ..Self::default() }
    }

    /// Sample carrying a platform-native compass heading.
    pub fn from_compass(heading_deg: f64) -> Self {
        Self { compass_heading: Some(heading_deg), ..Self::default() }
    }

    pub fn with_tilt(mut self, beta: f64, gamma: f64) -> Self {
        self.beta = Some(beta);
        self.gamma = Some(gamma);
        self
    }

    /// Compass heading in `[0, 360)`, 0 = North, clockwise.
    ///
    /// A native compass heading wins over `alpha`.  Returns `None` when
    /// neither is present and finite; the caller must keep its previous
    /// value.
    pub fn heading_deg(&self) -> Option<f64> {
        if let Some(h) = self.compass_heading.filter(|h| h.is_finite()) {
            return Some(normalize_deg(h));
        }
        self.alpha
            .filter(|a| a.is_finite())
            .map(|a| normalize_deg(360.0 - a))
    }

    /// Device pitch away from lying flat, folded into `[0, 90]`.
    ///
    /// `0` is flat (screen up or down), `90` is fully upright.
    pub fn tilt_deg(&self) -> Option<f64> {
        let beta = self.beta.filter(|b| b.is_finite())?;
        let mut t = normalize_deg(beta);
        if t > 180.0 {
            t = 360.0 - t;
        }
        if t > 90.0 {
            t = 180.0 - t;
        }
        Some(t)
    }
}
