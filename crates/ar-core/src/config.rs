//! View configuration shared by every stage of the pipeline.
//!
//! `ViewConfig` is a flat bag of the recognized options.  Each component
//! derives its own parameter struct from it (`StabilizerConfig`,
//! `SelectParams`, `LayoutParams`, …) so the application only has one thing
//! to load, typically from a JSON file with the `serde` feature enabled.

use crate::{CoreError, CoreResult};

/// Target device class.  Selects sensible defaults for range, field of view
/// and marker count.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FormFactor {
    #[default]
    Phone,
    Tablet,
    Desktop,
}

/// Top-level configuration for the AR positioning core.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ViewConfig {
    // ── Selection ─────────────────────────────────────────────────────────
    /// POIs farther than this are never shown.  Default: 500 m.
    pub max_distance_m: f64,

    /// Horizontal camera field of view, degrees.  Observed range 50–80°.
    pub fov_deg: f64,

    /// Upper bound on markers returned per cycle (8–15 depending on device).
    pub max_visible: usize,

    // ── Heading stabilizer ────────────────────────────────────────────────
    /// Rolling heading history length (5–8 typical; 3..=16 accepted).
    pub smoothing_window: usize,

    /// Weighted (recent-heavy) circular mean instead of a simple one.
    pub weighted_smoothing: bool,

    /// Samples this far from the last accepted one are discarded once the
    /// compass is calibrated.  Default: 40°.
    pub outlier_threshold_deg: f64,

    /// The last three smoothed headings must agree within this to declare
    /// calibration.  Default: 10°.
    pub stability_threshold_deg: f64,

    /// Enable tilt discounting and tilt lock.
    pub tilt_compensation: bool,

    /// Tilt above which raw headings are progressively discounted.
    pub tilt_discount_deg: f64,

    /// Tilt above which the heading is frozen and reported as locked.
    pub tilt_lock_deg: f64,

    /// With no orientation event for this long, switch to a simulated
    /// heading.  Default: 3000 ms.
    pub sensor_timeout_ms: u64,

    // ── Presentation geometry ─────────────────────────────────────────────
    /// Marker size at 10 m, pixels.
    pub base_marker_px: f64,

    /// Smallest marker size, pixels.
    pub min_marker_px: f64,

    /// Fraction of screen width kept clear at each edge.
    pub edge_margin: f64,

    /// Viewport height used by the overlap resolver, pixels.
    pub viewport_height_px: f64,

    // ── Caching ───────────────────────────────────────────────────────────
    /// Capacity of the distance/bearing cache.  0 disables it.
    pub cache_capacity: usize,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self::for_form_factor(FormFactor::Phone)
    }
}

impl ViewConfig {
    pub fn phone() -> Self { Self::for_form_factor(FormFactor::Phone) }
    pub fn tablet() -> Self { Self::for_form_factor(FormFactor::Tablet) }
    pub fn desktop() -> Self { Self::for_form_factor(FormFactor::Desktop) }

    /// Defaults for a device class.  Only range, field of view, marker count
    /// and viewport height differ between presets.
    pub fn for_form_factor(form: FormFactor) -> Self {
        let (max_distance_m, fov_deg, max_visible, viewport_height_px) = match form {
            FormFactor::Phone   => (500.0, 60.0, 10, 800.0),
            FormFactor::Tablet  => (800.0, 70.0, 12, 1024.0),
            FormFactor::Desktop => (1_000.0, 80.0, 15, 1080.0),
        };
        Self {
            max_distance_m,
            fov_deg,
            max_visible,
            smoothing_window:        5,
            weighted_smoothing:      true,
            outlier_threshold_deg:   40.0,
            stability_threshold_deg: 10.0,
            tilt_compensation:       true,
            tilt_discount_deg:       45.0,
            tilt_lock_deg:           85.0,
            sensor_timeout_ms:       3_000,
            base_marker_px:          64.0,
            min_marker_px:           24.0,
            edge_margin:             0.05,
            viewport_height_px,
            cache_capacity:          256,
        }
    }

    /// Check every option for a usable value.
    pub fn validate(&self) -> CoreResult<()> {
        fn bad(msg: String) -> CoreResult<()> {
            Err(CoreError::Config(msg))
        }

        if !(self.max_distance_m.is_finite() && self.max_distance_m > 0.0) {
            return bad(format!("max_distance_m must be > 0, got {}", self.max_distance_m));
        }
        if !(self.fov_deg > 0.0 && self.fov_deg <= 180.0) {
            return bad(format!("fov_deg must be in (0, 180], got {}", self.fov_deg));
        }
        if self.max_visible == 0 {
            return bad("max_visible must be at least 1".into());
        }
        if !(3..=16).contains(&self.smoothing_window) {
            return bad(format!("smoothing_window must be in 3..=16, got {}", self.smoothing_window));
        }
        if !(self.outlier_threshold_deg > 0.0 && self.outlier_threshold_deg <= 180.0) {
            return bad(format!(
                "outlier_threshold_deg must be in (0, 180], got {}",
                self.outlier_threshold_deg
            ));
        }
        if !(self.stability_threshold_deg > 0.0 && self.stability_threshold_deg <= 180.0) {
            return bad(format!(
                "stability_threshold_deg must be in (0, 180], got {}",
                self.stability_threshold_deg
            ));
        }
        if !(self.tilt_discount_deg >= 0.0
            && self.tilt_discount_deg < self.tilt_lock_deg
            && self.tilt_lock_deg <= 90.0)
        {
            return bad(format!(
                "tilt thresholds must satisfy 0 <= discount < lock <= 90, got {} / {}",
                self.tilt_discount_deg, self.tilt_lock_deg
            ));
        }
        if !(self.min_marker_px > 0.0 && self.base_marker_px >= self.min_marker_px) {
            return bad(format!(
                "marker sizes must satisfy 0 < min <= base, got {} / {}",
                self.min_marker_px, self.base_marker_px
            ));
        }
        if !(0.0..0.25).contains(&self.edge_margin) {
            return bad(format!("edge_margin must be in [0, 0.25), got {}", self.edge_margin));
        }
        if !(self.viewport_height_px.is_finite() && self.viewport_height_px > 0.0) {
            return bad(format!(
                "viewport_height_px must be > 0, got {}",
                self.viewport_height_px
            ));
        }
        Ok(())
    }
}
