//! `ar-pipeline` — wires the positioning core into one event-driven view.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`view`]     | `ArView`, `ArViewBuilder`                                 |
//! | [`frame`]    | `Frame`, `FrameStatus`                                    |
//! | [`throttle`] | `UpdateThrottle`, `RecomputeGate`                         |
//! | [`observer`] | `FrameObserver` trait, `NoopObserver`                     |
//! | [`shared`]   | `SharedCompass` — a tracker behind a mutex                |
//! | [`error`]    | `PipelineError`, `PipelineResult<T>`                      |
//!
//! # Event flow
//!
//! ```text
//! position fix ──► 50 ms throttle ──► ≤ 1/s gate ──┐
//!                                                  ├──► select ─► project ─► layout ─► Frame
//! orientation ───► CompassTracker ──► 100 ms gate ─┘
//! tick ──────────► fallback heading / pending gates
//! ```
//!
//! Every method takes the caller's clock in milliseconds; nothing here
//! reads the system time.

pub mod error;
pub mod frame;
pub mod observer;
pub mod shared;
pub mod throttle;
pub mod view;

#[cfg(test)]
mod tests;

pub use error::{PipelineError, PipelineResult};
pub use frame::{Frame, FrameStatus};
pub use observer::{FrameObserver, NoopObserver};
pub use shared::SharedCompass;
pub use throttle::{RecomputeGate, UpdateThrottle};
pub use view::{ArView, ArViewBuilder};
