//! Heading stabilizer: outlier rejection, circular smoothing, calibration.
//!
//! # Algorithm
//!
//! ```text
//! sample ─► tilt gate ─► outlier gate ─► history (FIFO, `window` entries)
//!                                              │
//!                         circular mean ◄──────┘
//!                              │
//!                              ├─► output (normalized to [0, 360))
//!                              └─► last 3 outputs agree? ─► calibrated
//! ```
//!
//! Averaging raw degrees breaks at North (the mean of 358° and 2° is 180°),
//! so every history entry is first realigned into the ±180° neighbourhood of
//! the newest sample and only then averaged.

use std::collections::VecDeque;

use ar_core::{CoreError, CoreResult, ViewConfig, angular_distance, normalize_deg, wrap_180};
use tracing::{debug, info};

/// Number of recent smoothed outputs that must agree for calibration.
const STABILITY_SPAN: usize = 3;

// ── Configuration ─────────────────────────────────────────────────────────────

/// How the history is averaged.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Smoothing {
    /// Every entry counts equally.
    Mean,
    /// Linearly increasing weights toward the newest entry.  For a window of
    /// five the weights are `[0.1, 0.15, 0.2, 0.25, 0.3]`.
    #[default]
    Weighted,
}

/// Tilt thresholds, degrees from flat.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TiltConfig {
    /// Above this, raw headings are blended toward the last output.
    pub discount_deg: f64,
    /// At or above this, output is frozen and reported as locked.
    pub lock_deg: f64,
}

impl Default for TiltConfig {
    fn default() -> Self {
        Self { discount_deg: 45.0, lock_deg: 85.0 }
    }
}

impl TiltConfig {
    /// Weight given to a new sample at `tilt_deg`: 1 below the discount
    /// threshold, falling linearly to 0 at the lock threshold.
    pub fn weight(&self, tilt_deg: f64) -> f64 {
        if tilt_deg <= self.discount_deg {
            1.0
        } else {
            ((self.lock_deg - tilt_deg) / (self.lock_deg - self.discount_deg)).clamp(0.0, 1.0)
        }
    }
}

/// Strategy parameters for [`HeadingStabilizer`].
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StabilizerConfig {
    /// History length.  Default: 5.
    pub window: usize,
    pub smoothing: Smoothing,
    /// Default: 40°.
    pub outlier_threshold_deg: f64,
    /// Readings required before calibration and outlier rejection engage.
    /// Default: 5.
    pub warmup_readings: u64,
    /// Default: 10°.
    pub stability_threshold_deg: f64,
    /// After this many consecutive rejections the next far sample re-seeds
    /// the history instead of being dropped, so a genuine turn is followed.
    pub max_consecutive_rejections: u32,
    /// `None` disables tilt discounting and locking.
    pub tilt: Option<TiltConfig>,
}

impl Default for StabilizerConfig {
    fn default() -> Self {
        Self {
            window:                     5,
            smoothing:                  Smoothing::Weighted,
            outlier_threshold_deg:      40.0,
            warmup_readings:            5,
            stability_threshold_deg:    10.0,
            max_consecutive_rejections: 3,
            tilt:                       Some(TiltConfig::default()),
        }
    }
}

impl From<&ViewConfig> for StabilizerConfig {
    fn from(cfg: &ViewConfig) -> Self {
        Self {
            window:                  cfg.smoothing_window,
            smoothing:               if cfg.weighted_smoothing { Smoothing::Weighted } else { Smoothing::Mean },
            outlier_threshold_deg:   cfg.outlier_threshold_deg,
            stability_threshold_deg: cfg.stability_threshold_deg,
            tilt: cfg.tilt_compensation.then_some(TiltConfig {
                discount_deg: cfg.tilt_discount_deg,
                lock_deg:     cfg.tilt_lock_deg,
            }),
            ..Self::default()
        }
    }
}

impl StabilizerConfig {
    pub fn validate(&self) -> CoreResult<()> {
        if self.window < 3 {
            return Err(CoreError::Config(format!("window must be >= 3, got {}", self.window)));
        }
        if !(self.outlier_threshold_deg > 0.0 && self.outlier_threshold_deg <= 180.0) {
            return Err(CoreError::Config(format!(
                "outlier_threshold_deg must be in (0, 180], got {}",
                self.outlier_threshold_deg
            )));
        }
        if !(self.stability_threshold_deg > 0.0) {
            return Err(CoreError::Config(format!(
                "stability_threshold_deg must be > 0, got {}",
                self.stability_threshold_deg
            )));
        }
        if let Some(t) = self.tilt {
            if !(t.discount_deg >= 0.0 && t.discount_deg < t.lock_deg) {
                return Err(CoreError::Config(format!(
                    "tilt discount ({}) must be below lock ({})",
                    t.discount_deg, t.lock_deg
                )));
            }
        }
        Ok(())
    }
}

// ── Output ────────────────────────────────────────────────────────────────────

/// Confidence state reported alongside the heading.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HeadingStatus {
    /// Sensor present; output not yet stable.
    Uncalibrated,
    /// Sensor present; output stable enough to trust.
    Calibrated,
    /// Device tilted past the lock threshold; output frozen.
    Locked,
    /// No sensor; synthetic heading.
    Simulated,
}

impl HeadingStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            HeadingStatus::Uncalibrated => "uncalibrated",
            HeadingStatus::Calibrated   => "calibrated",
            HeadingStatus::Locked       => "locked",
            HeadingStatus::Simulated    => "simulated",
        }
    }
}

impl std::fmt::Display for HeadingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stabilized heading plus its status, for the compass widget and for
/// building an `ObservedState`.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeadingEstimate {
    /// Degrees in `[0, 360)`.
    pub heading_deg: f64,
    /// One-way calibration flag.  Stays `true` while locked.
    pub calibrated:  bool,
    pub status:      HeadingStatus,
}

impl HeadingEstimate {
    #[inline]
    pub fn is_locked(&self) -> bool {
        self.status == HeadingStatus::Locked
    }

    #[inline]
    pub fn is_simulated(&self) -> bool {
        self.status == HeadingStatus::Simulated
    }
}

// ── HeadingStabilizer ─────────────────────────────────────────────────────────

/// Rolling-window compass smoother.
///
/// This is the only stateful component of the positioning core.  It is not
/// `Sync`-shared internally; confine an instance to one owner or wrap it in a
/// mutex.
pub struct HeadingStabilizer {
    config:                 StabilizerConfig,
    history:                VecDeque<f64>,
    recent:                 VecDeque<f64>,
    output:                 Option<f64>,
    readings_seen:          u64,
    accepted:               u64,
    rejected:               u64,
    consecutive_rejections: u32,
    calibrated:             bool,
    locked:                 bool,
}

impl Default for HeadingStabilizer {
    fn default() -> Self {
        Self::new(StabilizerConfig::default())
    }
}

impl HeadingStabilizer {
    pub fn new(config: StabilizerConfig) -> Self {
        let window = config.window.max(1);
        Self {
            config,
            history:                VecDeque::with_capacity(window + 1),
            recent:                 VecDeque::with_capacity(STABILITY_SPAN + 1),
            output:                 None,
            readings_seen:          0,
            accepted:               0,
            rejected:               0,
            consecutive_rejections: 0,
            calibrated:             false,
            locked:                 false,
        }
    }

    pub fn config(&self) -> &StabilizerConfig { &self.config }
    pub fn readings_seen(&self) -> u64 { self.readings_seen }
    pub fn accepted(&self) -> u64 { self.accepted }
    pub fn rejected(&self) -> u64 { self.rejected }
    pub fn is_calibrated(&self) -> bool { self.calibrated }
    pub fn is_locked(&self) -> bool { self.locked }

    /// Current estimate, or `None` before the first accepted reading.
    pub fn estimate(&self) -> Option<HeadingEstimate> {
        let heading_deg = self.output?;
        let status = if self.locked {
            HeadingStatus::Locked
        } else if self.calibrated {
            HeadingStatus::Calibrated
        } else {
            HeadingStatus::Uncalibrated
        };
        Some(HeadingEstimate { heading_deg, calibrated: self.calibrated, status })
    }

    /// Feed one raw compass heading (degrees, clockwise from North) with an
    /// optional device tilt.
    ///
    /// Returns the updated estimate.  Returns `None`, changing nothing,
    /// when `raw_deg` is not finite, or when the device is locked before any
    /// heading was ever accepted.
    pub fn update(&mut self, raw_deg: f64, tilt_deg: Option<f64>) -> Option<HeadingEstimate> {
        if !raw_deg.is_finite() {
            return None;
        }
        let mut sample = normalize_deg(raw_deg);

        // ── Tilt gate ─────────────────────────────────────────────────────
        if let (Some(tilt_cfg), Some(tilt)) = (self.config.tilt, tilt_deg.filter(|t| t.is_finite())) {
            if tilt >= tilt_cfg.lock_deg {
                if !self.locked {
                    debug!(tilt, "heading locked: device near vertical");
                }
                self.locked = true;
                return self.estimate();
            }
            if self.locked {
                debug!(tilt, "heading unlocked");
            }
            self.locked = false;

            let weight = tilt_cfg.weight(tilt);
            if weight < 1.0 {
                if let Some(last) = self.output {
                    sample = normalize_deg(last + weight * wrap_180(sample - last));
                }
            }
        }

        self.readings_seen += 1;

        // ── Outlier gate ──────────────────────────────────────────────────
        if let Some(&last) = self.history.back() {
            let diff = angular_distance(sample, last);
            if self.calibrated
                && self.readings_seen > self.config.warmup_readings
                && diff > self.config.outlier_threshold_deg
            {
                self.consecutive_rejections += 1;
                if self.consecutive_rejections <= self.config.max_consecutive_rejections {
                    self.rejected += 1;
                    debug!(sample, last, diff, "heading outlier rejected");
                    return self.estimate();
                }
                debug!(
                    sample,
                    rejections = self.consecutive_rejections,
                    "heading history re-seeded after sustained jump"
                );
                self.history.clear();
                self.recent.clear();
            }
        }
        self.consecutive_rejections = 0;

        // ── Accept ────────────────────────────────────────────────────────
        self.history.push_back(sample);
        while self.history.len() > self.config.window {
            self.history.pop_front();
        }
        self.accepted += 1;

        let smoothed = self.smooth(sample);
        self.output = Some(smoothed);

        self.recent.push_back(smoothed);
        while self.recent.len() > STABILITY_SPAN {
            self.recent.pop_front();
        }
        if !self.calibrated && self.accepted >= self.config.warmup_readings && self.is_stable() {
            self.calibrated = true;
            info!(heading = smoothed, readings = self.readings_seen, "compass calibrated");
        }

        self.estimate()
    }

    /// Forget all history and calibration.
    pub fn reset(&mut self) {
        *self = Self::new(self.config.clone());
    }

    /// Circular mean of the history, realigned around `newest`.
    fn smooth(&self, newest: f64) -> f64 {
        let n = self.history.len();
        if n <= 2 {
            return newest;
        }

        let adjusted = self
            .history
            .iter()
            .map(|&h| newest + ((h - newest + 180.0).rem_euclid(360.0) - 180.0));

        let mean = match self.config.smoothing {
            Smoothing::Mean => adjusted.sum::<f64>() / n as f64,
            Smoothing::Weighted => {
                // Right-aligned slice of the full-window weight ramp 2, 3, 4, …
                let offset = self.config.window.max(n) - n;
                let (sum, total) = adjusted
                    .enumerate()
                    .map(|(i, a)| (a, (offset + i + 2) as f64))
                    .fold((0.0, 0.0), |(s, t), (a, w)| (s + a * w, t + w));
                sum / total
            }
        };
        normalize_deg(mean)
    }

    fn is_stable(&self) -> bool {
        if self.recent.len() < STABILITY_SPAN {
            return false;
        }
        self.recent.iter().all(|&a| {
            self.recent
                .iter()
                .all(|&b| angular_distance(a, b) < self.config.stability_threshold_deg)
        })
    }
}
