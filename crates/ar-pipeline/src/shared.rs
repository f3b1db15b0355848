//! `SharedCompass` — one tracker fed from several callers.
//!
//! The heading stabilizer is the only stateful piece of the core.  When the
//! orientation callback and the render loop live on different threads they
//! share it through this handle; every call takes the lock for its whole
//! duration, so history updates never interleave.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use ar_core::ViewConfig;
use ar_heading::{CompassTracker, HeadingEstimate, OrientationSample};

#[derive(Clone)]
pub struct SharedCompass {
    inner: Arc<Mutex<CompassTracker>>,
}

impl SharedCompass {
    pub fn new(tracker: CompassTracker) -> Self {
        Self { inner: Arc::new(Mutex::new(tracker)) }
    }

    pub fn from_view_config(cfg: &ViewConfig, subscribed_at_ms: u64) -> Self {
        Self::new(CompassTracker::from_view_config(cfg, subscribed_at_ms))
    }

    pub fn on_sample(&self, now_ms: u64, sample: &OrientationSample) -> Option<HeadingEstimate> {
        self.lock().on_sample(now_ms, sample)
    }

    pub fn on_tick(&self, now_ms: u64) -> Option<HeadingEstimate> {
        self.lock().on_tick(now_ms)
    }

    pub fn mark_unavailable(&self, now_ms: u64) {
        self.lock().mark_unavailable(now_ms);
    }

    pub fn estimate(&self) -> Option<HeadingEstimate> {
        self.lock().estimate()
    }

    /// Run `f` with exclusive access to the tracker.
    pub fn with<T>(&self, f: impl FnOnce(&mut CompassTracker) -> T) -> T {
        f(&mut self.lock())
    }

    // Poison is ignored: a panicked update leaves at most one stale history
    // entry.
    fn lock(&self) -> MutexGuard<'_, CompassTracker> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
