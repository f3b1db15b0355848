//! `CompassTracker` — the heading source the application talks to.
//!
//! It owns a [`HeadingStabilizer`], a [`SensorWatchdog`] and, while the
//! sensor is absent, a [`SimulatedHeading`].  Callers forward every
//! orientation event to [`on_sample`](CompassTracker::on_sample) and call
//! [`on_tick`](CompassTracker::on_tick) periodically (e.g. every 100 ms) so
//! that silence can be detected.

use ar_core::ViewConfig;
use tracing::{info, warn};

use crate::{
    HeadingEstimate, HeadingStabilizer, HeadingStatus, OrientationSample, SensorWatchdog,
    SimulatedHeading, StabilizerConfig,
};

pub struct CompassTracker {
    stabilizer:  HeadingStabilizer,
    watchdog:    SensorWatchdog,
    simulated:   Option<SimulatedHeading>,
    unavailable: bool,
}

impl CompassTracker {
    /// Create a tracker subscribed at `subscribed_at_ms`.
    pub fn new(config: StabilizerConfig, sensor_timeout_ms: u64, subscribed_at_ms: u64) -> Self {
        Self {
            stabilizer:  HeadingStabilizer::new(config),
            watchdog:    SensorWatchdog::new(subscribed_at_ms, sensor_timeout_ms),
            simulated:   None,
            unavailable: false,
        }
    }

    pub fn from_view_config(cfg: &ViewConfig, subscribed_at_ms: u64) -> Self {
        Self::new(StabilizerConfig::from(cfg), cfg.sensor_timeout_ms, subscribed_at_ms)
    }

    pub fn stabilizer(&self) -> &HeadingStabilizer {
        &self.stabilizer
    }

    pub fn is_simulated(&self) -> bool {
        self.simulated.is_some()
    }

    /// Current estimate: the simulated heading while in fallback, otherwise
    /// the stabilizer's output.
    pub fn estimate(&self) -> Option<HeadingEstimate> {
        match &self.simulated {
            Some(sim) => Some(simulated_estimate(sim.heading_deg())),
            None      => self.stabilizer.estimate(),
        }
    }

    /// Handle one orientation event.
    ///
    /// Events without a usable heading (e.g. `alpha == null`) are ignored
    /// entirely: they neither update the heading nor count as sensor
    /// activity.  A real event ends fallback mode.
    pub fn on_sample(&mut self, now_ms: u64, sample: &OrientationSample) -> Option<HeadingEstimate> {
        let heading = sample.heading_deg()?;

        self.watchdog.record_event(now_ms);
        self.unavailable = false;
        if self.simulated.take().is_some() {
            info!("orientation sensor resumed; leaving simulated heading");
        }

        self.stabilizer.update(heading, sample.tilt_deg())
    }

    /// Periodic check.  Enters fallback when the sensor has been silent for
    /// the timeout (or was reported unavailable) and returns the advanced
    /// simulated heading; returns `None` while the real sensor is healthy.
    pub fn on_tick(&mut self, now_ms: u64) -> Option<HeadingEstimate> {
        if self.simulated.is_none() && (self.unavailable || self.watchdog.is_silent(now_ms)) {
            self.enter_fallback(now_ms);
        }
        let sim = self.simulated.as_mut()?;
        Some(simulated_estimate(sim.advance_to(now_ms)))
    }

    /// The platform denied or lacks the orientation sensor: switch to the
    /// simulated heading immediately.
    pub fn mark_unavailable(&mut self, now_ms: u64) {
        self.unavailable = true;
        if self.simulated.is_none() {
            self.enter_fallback(now_ms);
        }
    }

    fn enter_fallback(&mut self, now_ms: u64) {
        let start = self.stabilizer.estimate().map_or(0.0, |e| e.heading_deg);
        warn!(
            timeout_ms = self.watchdog.timeout_ms(),
            events_seen = self.watchdog.events_seen(),
            unavailable = self.unavailable,
            "no orientation events; using simulated heading"
        );
        let mut sim = SimulatedHeading::new(start);
        sim.advance_to(now_ms);
        self.simulated = Some(sim);
    }
}

fn simulated_estimate(heading_deg: f64) -> HeadingEstimate {
    HeadingEstimate { heading_deg, calibrated: false, status: HeadingStatus::Simulated }
}
