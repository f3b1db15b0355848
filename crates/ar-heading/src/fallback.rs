//! Sensor-absence detection and the synthetic heading used in its place.
//!
//! All timing is driven by caller-supplied millisecond timestamps rather than
//! a wall clock, so fallback behaviour is deterministic under test.

use ar_core::normalize_deg;

/// Detects an orientation sensor that never started or went silent.
#[derive(Clone, Debug)]
pub struct SensorWatchdog {
    timeout_ms:    u64,
    /// Subscription time until the first event, then the latest event time.
    last_event_ms: u64,
    events_seen:   u64,
}

impl SensorWatchdog {
    /// Start watching at `subscribed_at_ms`.
    pub fn new(subscribed_at_ms: u64, timeout_ms: u64) -> Self {
        Self { timeout_ms, last_event_ms: subscribed_at_ms, events_seen: 0 }
    }

    pub fn record_event(&mut self, now_ms: u64) {
        self.last_event_ms = self.last_event_ms.max(now_ms);
        self.events_seen += 1;
    }

    /// `true` once `timeout_ms` has passed with no event.
    pub fn is_silent(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.last_event_ms) >= self.timeout_ms
    }

    pub fn events_seen(&self) -> u64 {
        self.events_seen
    }

    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }
}

/// Slowly rotating heading that keeps the pipeline exercisable without a
/// compass.  Advances `step_deg` every `period_ms` of caller time.
#[derive(Clone, Debug)]
pub struct SimulatedHeading {
    heading_deg: f64,
    step_deg:    f64,
    period_ms:   u64,
    last_ms:     Option<u64>,
}

impl SimulatedHeading {
    /// Default rate: +0.5° every 100 ms.
    pub fn new(start_deg: f64) -> Self {
        Self::with_rate(start_deg, 0.5, 100)
    }

    pub fn with_rate(start_deg: f64, step_deg: f64, period_ms: u64) -> Self {
        Self {
            heading_deg: normalize_deg(start_deg),
            step_deg,
            period_ms: period_ms.max(1),
            last_ms: None,
        }
    }

    pub fn heading_deg(&self) -> f64 {
        self.heading_deg
    }

    /// Advance to `now_ms` and return the heading.  The first call only
    /// anchors the clock.  Partial periods carry over to the next call.
    pub fn advance_to(&mut self, now_ms: u64) -> f64 {
        match self.last_ms {
            None => self.last_ms = Some(now_ms),
            Some(last) if now_ms > last => {
                let periods = (now_ms - last) / self.period_ms;
                if periods > 0 {
                    self.heading_deg = normalize_deg(self.heading_deg + periods as f64 * self.step_deg);
                    self.last_ms = Some(last + periods * self.period_ms);
                }
            }
            Some(_) => {}
        }
        self.heading_deg
    }
}
