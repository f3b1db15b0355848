//! Layout parameters.

use ar_core::ViewConfig;

#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutParams {
    /// Markers within this normalized horizontal distance of a group's
    /// anchor join that group.  Also the horizontal extent used for
    /// cross-group collision tests.
    pub group_threshold:    f64,
    /// Half-height of the in-group distribution band as a fraction of the
    /// viewport height.
    pub band_fraction:      f64,
    pub viewport_height_px: f64,
    /// Minimum clear space between two stacked markers.
    pub label_gap_px:       f64,
    /// Zig-zag attempts before an overlap is accepted.
    pub max_attempts:       u32,
    /// Merge same-category markers in the same distance bucket instead of
    /// spreading them.
    pub collapse:           bool,
    pub distance_bucket_m:  f64,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self::from(&ViewConfig::default())
    }
}

impl From<&ViewConfig> for LayoutParams {
    fn from(cfg: &ViewConfig) -> Self {
        Self {
            group_threshold:    0.15,
            band_fraction:      0.2,
            viewport_height_px: cfg.viewport_height_px,
            label_gap_px:       8.0,
            max_attempts:       6,
            collapse:           false,
            distance_bucket_m:  50.0,
        }
    }
}

impl LayoutParams {
    pub fn collapsing(mut self) -> Self {
        self.collapse = true;
        self
    }

    /// Half-height of the distribution band in pixels.
    #[inline]
    pub fn band_px(&self) -> f64 {
        (self.band_fraction * self.viewport_height_px).max(0.0)
    }
}
