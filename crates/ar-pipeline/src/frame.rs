//! One rendered frame's worth of output.

use std::fmt;

use ar_core::ScreenMarker;
use ar_heading::HeadingEstimate;

/// Why a frame has (or lacks) markers.  Every variant other than `Ready` is
/// an expected steady state the renderer should show a message for, not an
/// error.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum FrameStatus {
    /// No position fix yet.
    #[default]
    WaitingForPosition,
    /// Position known, but neither the sensor nor the fallback has produced
    /// a heading.
    WaitingForHeading,
    /// Everything known; no POI is in range and in view.
    NoNearbyPoints,
    Ready,
}

impl FrameStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            FrameStatus::WaitingForPosition => "waiting-for-position",
            FrameStatus::WaitingForHeading  => "waiting-for-heading",
            FrameStatus::NoNearbyPoints     => "no-nearby-points",
            FrameStatus::Ready              => "ready",
        }
    }
}

impl fmt::Display for FrameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Markers back-to-front plus the heading they were placed with.
#[derive(Clone, Debug, Default)]
pub struct Frame {
    pub markers:        Vec<ScreenMarker>,
    /// Heading estimate for the compass widget; carries calibration, lock
    /// and simulation status.
    pub heading:        Option<HeadingEstimate>,
    pub status:         FrameStatus,
    pub computed_at_ms: u64,
}

impl Frame {
    /// `true` when there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}
