//! Caller-side rate limiting.
//!
//! The core is cheap enough to run at sensor rate, so none of this is
//! required.  It exists for integrations that want to keep frame churn down:
//!
//! | Guard            | Default | Effect                                         |
//! |------------------|---------|------------------------------------------------|
//! | `UpdateThrottle` | 50 ms   | position fixes closer together are discarded   |
//! | `RecomputeGate`  | 1000 ms | visible set follows position at most once/s    |
//! |                  | 100 ms  | orientation-driven recomputes are coalesced    |
//!
//! A request that arrives inside its interval is not lost; it stays pending
//! and [`RecomputeGate::poll_position`] / [`RecomputeGate::poll_orientation`]
//! report it once the interval has elapsed.

pub const FIX_MIN_INTERVAL_MS: u64 = 50;
pub const POSITION_RECOMPUTE_MS: u64 = 1_000;
pub const ORIENTATION_RECOMPUTE_MS: u64 = 100;

/// Drops updates arriving less than `min_interval_ms` after the last
/// accepted one.
#[derive(Clone, Debug)]
pub struct UpdateThrottle {
    min_interval_ms: u64,
    last:            Option<u64>,
}

impl Default for UpdateThrottle {
    fn default() -> Self {
        Self::new(FIX_MIN_INTERVAL_MS)
    }
}

impl UpdateThrottle {
    pub fn new(min_interval_ms: u64) -> Self {
        Self { min_interval_ms, last: None }
    }

    /// `true` if an update at `now_ms` should be processed.
    pub fn accept(&mut self, now_ms: u64) -> bool {
        if self.last.is_some_and(|last| now_ms.saturating_sub(last) < self.min_interval_ms) {
            return false;
        }
        self.last = Some(now_ms);
        true
    }
}

#[derive(Clone, Debug)]
struct Interval {
    min_ms:  u64,
    last:    Option<u64>,
    pending: bool,
}

impl Interval {
    fn new(min_ms: u64) -> Self {
        Self { min_ms, last: None, pending: false }
    }

    fn due(&self, now_ms: u64) -> bool {
        self.last.is_none_or(|last| now_ms.saturating_sub(last) >= self.min_ms)
    }

    fn request(&mut self, now_ms: u64) -> bool {
        if self.due(now_ms) {
            self.fire(now_ms);
            true
        } else {
            self.pending = true;
            false
        }
    }

    fn poll(&mut self, now_ms: u64) -> bool {
        if self.pending && self.due(now_ms) {
            self.fire(now_ms);
            true
        } else {
            false
        }
    }

    fn fire(&mut self, now_ms: u64) {
        self.last = Some(now_ms);
        self.pending = false;
    }
}

/// Decides when position and orientation changes should trigger a
/// recompute.
#[derive(Clone, Debug)]
pub struct RecomputeGate {
    position:    Interval,
    orientation: Interval,
}

impl Default for RecomputeGate {
    fn default() -> Self {
        Self::new(POSITION_RECOMPUTE_MS, ORIENTATION_RECOMPUTE_MS)
    }
}

impl RecomputeGate {
    pub fn new(position_interval_ms: u64, orientation_interval_ms: u64) -> Self {
        Self {
            position:    Interval::new(position_interval_ms),
            orientation: Interval::new(orientation_interval_ms),
        }
    }

    /// The position changed.  `true` means recompute now; otherwise the
    /// change is held until [`poll_position`](Self::poll_position) fires.
    pub fn on_position(&mut self, now_ms: u64) -> bool {
        self.position.request(now_ms)
    }

    /// The heading changed.  Same contract as [`on_position`](Self::on_position).
    pub fn on_orientation(&mut self, now_ms: u64) -> bool {
        self.orientation.request(now_ms)
    }

    /// `true` once a held position change is due.
    pub fn poll_position(&mut self, now_ms: u64) -> bool {
        self.position.poll(now_ms)
    }

    /// `true` once a held orientation change is due.
    pub fn poll_orientation(&mut self, now_ms: u64) -> bool {
        self.orientation.poll(now_ms)
    }

    pub fn has_pending(&self) -> bool {
        self.position.pending || self.orientation.pending
    }
}
