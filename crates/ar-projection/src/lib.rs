//! `ar-projection` — maps bearings into normalized screen space.
//!
//! # Crate layout
//!
//! | Module         | Contents                                               |
//! |----------------|--------------------------------------------------------|
//! | [`projection`] | `project`, `Projector`, `EdgeMode`, `relative_bearing` |
//! | [`sizing`]     | `size_for_distance`, `vertical_angle_deg`              |
//!
//! Everything here is a pure function of its inputs: identical inputs always
//! produce identical output, with no clock or hidden state involved.

pub mod projection;
pub mod sizing;


pub use projection::{EdgeMode, Projector, project, relative_bearing};
pub use sizing::{size_for_distance, vertical_angle_deg};
