//! `ar-heading` — turns raw orientation-sensor readings into a stable
//! compass heading.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                  |
//! |----------------|-----------------------------------------------------------|
//! | [`sample`]     | `OrientationSample` and sensor-convention conversion      |
//! | [`stabilizer`] | `HeadingStabilizer`, `StabilizerConfig`, `HeadingEstimate` |
//! | [`fallback`]   | `SensorWatchdog`, `SimulatedHeading`                      |
//! | [`compass`]    | `CompassTracker` (stabilizer + watchdog + fallback)       |
//!
//! # Degraded modes
//!
//! ```text
//! sensor silent ≥ timeout ──► Simulated  (synthetic +0.5° / 100 ms)
//! tilt ≥ lock threshold   ──► Locked     (output frozen, calibration kept)
//! otherwise               ──► Uncalibrated → Calibrated (one-way)
//! ```
//!
//! Simulation is a sensor-absence condition and wins over tilt lock; the
//! first real sample ends it and is processed normally.

pub mod compass;
pub mod fallback;
pub mod sample;
pub mod stabilizer;


pub use compass::CompassTracker;
pub use fallback::{SensorWatchdog, SimulatedHeading};
pub use sample::OrientationSample;
pub use stabilizer::{
    HeadingEstimate, HeadingStabilizer, HeadingStatus, Smoothing, StabilizerConfig, TiltConfig,
};
