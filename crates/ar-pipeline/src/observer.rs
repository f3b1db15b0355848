//! View observer trait for progress reporting.

use crate::{Frame, FrameStatus};

/// Callbacks invoked by [`ArView`](crate::ArView) as events are processed.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — status logger
///
/// ```rust,ignore
/// struct StatusLogger;
///
/// impl FrameObserver for StatusLogger {
///     fn on_status_change(&mut self, from: FrameStatus, to: FrameStatus) {
///         println!("{from} -> {to}");
///     }
/// }
/// ```
pub trait FrameObserver {
    /// Called after every recomputed frame.
    fn on_frame(&mut self, _frame: &Frame) {}

    /// Called when a recompute changes the frame status.
    fn on_status_change(&mut self, _from: FrameStatus, _to: FrameStatus) {}

    /// Called when a position fix arrives too soon after the previous one
    /// and is discarded.
    fn on_fix_discarded(&mut self, _now_ms: u64) {}
}

/// A [`FrameObserver`] that does nothing.
pub struct NoopObserver;

impl FrameObserver for NoopObserver {}
