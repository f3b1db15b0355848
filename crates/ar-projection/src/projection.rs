//! Field-of-view projection.
//!
//! ```text
//! relative = wrap_180(bearing - heading)          (-180, 180]
//! raw      = 0.5 + relative / fov                 0.5 = screen centre
//! x        = edge(raw)                            [margin, 1 - margin]
//! ```
//!
//! # Edge handling
//!
//! `EdgeMode::Hard` clamps.  `EdgeMode::Soft` (default) is the identity in
//! the interior and compresses exponentially inside a `knee`-wide band at
//! each edge, approaching but never reaching the margin.  The curve has
//! slope 1 where it leaves the identity, so markers slide smoothly toward
//! the edge instead of stopping abruptly.

use ar_core::{PositionedMarker, ScreenMarker, ViewConfig, wrap_180};

use crate::size_for_distance;

/// How raw positions outside the safe band are brought back in.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EdgeMode {
    Hard,
    #[default]
    Soft,
}

/// Signed angle from the view centre to `bearing_deg`, in `(-180, 180]`.
/// Positive is to the right.
#[inline]
pub fn relative_bearing(bearing_deg: f64, heading_deg: f64) -> f64 {
    wrap_180(bearing_deg - heading_deg)
}

/// Project with the default [`Projector`] (soft edges, 5 % margin).
///
/// Output is always in `[0, 1]`; non-finite input maps to the centre.
pub fn project(bearing_deg: f64, heading_deg: f64, fov_deg: f64) -> f64 {
    Projector::default().project(bearing_deg, heading_deg, fov_deg)
}

/// Projection and sizing parameters.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Projector {
    /// Fraction of screen width kept clear at each edge.
    pub margin:         f64,
    pub edge_mode:      EdgeMode,
    /// Width of the soft-compression band inside each margin.
    pub knee:           f64,
    pub base_marker_px: f64,
    pub min_marker_px:  f64,
}

impl Default for Projector {
    fn default() -> Self {
        Self {
            margin:         0.05,
            edge_mode:      EdgeMode::Soft,
            knee:           0.1,
            base_marker_px: 64.0,
            min_marker_px:  24.0,
        }
    }
}

impl From<&ViewConfig> for Projector {
    fn from(cfg: &ViewConfig) -> Self {
        Self {
            margin:         cfg.edge_margin,
            base_marker_px: cfg.base_marker_px,
            min_marker_px:  cfg.min_marker_px,
            ..Self::default()
        }
    }
}

impl Projector {
    pub fn hard(mut self) -> Self {
        self.edge_mode = EdgeMode::Hard;
        self
    }

    /// Normalized horizontal position of `bearing_deg` for a camera facing
    /// `heading_deg` with a horizontal field of view of `fov_deg`.
    pub fn project(&self, bearing_deg: f64, heading_deg: f64, fov_deg: f64) -> f64 {
        if !bearing_deg.is_finite() || !heading_deg.is_finite() {
            return 0.5;
        }
        let raw = 0.5 + relative_bearing(bearing_deg, heading_deg) / fov_deg;
        if raw.is_nan() {
            return 0.5;
        }
        self.edge(raw)
    }

    /// Pixel size for a marker `distance_m` away.
    #[inline]
    pub fn size_px(&self, distance_m: f64) -> f64 {
        size_for_distance(distance_m, self.base_marker_px, self.min_marker_px)
    }

    /// Place one marker for a camera facing `heading_deg`.  Vertical offset
    /// and grouping are left for the overlap resolver.
    pub fn place(&self, marker: PositionedMarker, heading_deg: f64, fov_deg: f64) -> ScreenMarker {
        let x = self.project(marker.bearing_deg, heading_deg, fov_deg);
        let size = self.size_px(marker.distance_m);
        ScreenMarker::new(marker, x, size)
    }

    /// [`place`](Self::place) every marker, preserving order.
    pub fn place_all(
        &self,
        markers:     Vec<PositionedMarker>,
        heading_deg: f64,
        fov_deg:     f64,
    ) -> Vec<ScreenMarker> {
        markers
            .into_iter()
            .map(|m| self.place(m, heading_deg, fov_deg))
            .collect()
    }

    fn edge(&self, raw: f64) -> f64 {
        let lo = self.margin.clamp(0.0, 0.45);
        let hi = 1.0 - lo;
        match self.edge_mode {
            EdgeMode::Hard => raw.clamp(lo, hi),
            EdgeMode::Soft => {
                let knee = self.knee.clamp(f64::EPSILON, (hi - lo) * 0.5);
                let inner_lo = lo + knee;
                let inner_hi = hi - knee;
                if raw > inner_hi {
                    inner_hi + knee * (1.0 - (-(raw - inner_hi) / knee).exp())
                } else if raw < inner_lo {
                    inner_lo - knee * (1.0 - (-(inner_lo - raw) / knee).exp())
                } else {
                    raw
                }
            }
        }
    }
}
