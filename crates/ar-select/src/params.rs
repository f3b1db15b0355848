//! Selection parameters.

use ar_core::ViewConfig;

/// Inputs to [`select`](crate::select) other than the POIs and observer.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectParams {
    /// POIs farther than this (haversine) are never selected.
    pub max_distance_m:  f64,
    /// Horizontal field of view, degrees.
    pub fov_deg:         f64,
    /// Result cap.
    pub max_count:       usize,
    /// Extra half-angle granted to a POI at zero distance.  Shrinks linearly
    /// to nothing at `max_distance_m`, so near markers do not flicker at the
    /// screen edge.
    pub edge_margin_deg: f64,
    /// Weight of proximity in the priority score; centrality gets the rest.
    pub distance_weight: f64,
}

impl Default for SelectParams {
    fn default() -> Self {
        Self::from(&ViewConfig::default())
    }
}

impl From<&ViewConfig> for SelectParams {
    fn from(cfg: &ViewConfig) -> Self {
        Self {
            max_distance_m:  cfg.max_distance_m,
            fov_deg:         cfg.fov_deg,
            max_count:       cfg.max_visible,
            edge_margin_deg: 20.0,
            distance_weight: 0.7,
        }
    }
}

impl SelectParams {
    pub fn with_max_count(mut self, max_count: usize) -> Self {
        self.max_count = max_count;
        self
    }

    pub fn with_max_distance(mut self, max_distance_m: f64) -> Self {
        self.max_distance_m = max_distance_m;
        self
    }

    pub fn with_fov(mut self, fov_deg: f64) -> Self {
        self.fov_deg = fov_deg;
        self
    }

    /// Parameters under which nothing can ever be selected.
    pub(crate) fn is_degenerate(&self) -> bool {
        self.max_count == 0
            || !self.max_distance_m.is_finite()
            || self.max_distance_m <= 0.0
            || !self.fov_deg.is_finite()
            || self.fov_deg <= 0.0
    }

    /// Half of the inclusion window for a POI `distance_m` away.
    #[inline]
    pub(crate) fn half_window_deg(&self, distance_m: f64) -> f64 {
        let closeness = (1.0 - distance_m / self.max_distance_m).clamp(0.0, 1.0);
        self.fov_deg * 0.5 + self.edge_margin_deg.max(0.0) * closeness
    }

    /// `w · proximity + (1 − w) · centrality`, each term in `[0, 1]`.
    #[inline]
    pub(crate) fn priority(&self, distance_m: f64, relative_deg: f64) -> f64 {
        let w = self.distance_weight.clamp(0.0, 1.0);
        let proximity = (1.0 - distance_m / self.max_distance_m).clamp(0.0, 1.0);
        let centrality = (1.0 - relative_deg.abs() / (self.fov_deg * 0.5)).clamp(0.0, 1.0);
        w * proximity + (1.0 - w) * centrality
    }
}
