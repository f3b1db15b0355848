//! `ar-select` — decides which POIs are worth drawing for one observer
//! snapshot, and in what order.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`params`]   | `SelectParams` (distance, FOV, cap, weights)              |
//! | [`select`]   | `select` free function, inclusion test, ranking           |
//! | [`index`]    | `PoiIndex` — R-tree over POI locations                    |
//! | [`selector`] | `Selector` — owned POI set + index + optional `GeoCache`  |
//!
//! # Pipeline
//!
//! ```text
//! POIs ─► malformed? ─► degree box ─► haversine ≤ max ─► widened FOV ─► priority ─► sort + cap
//! ```
//!
//! The degree box only saves work.  Haversine distance decides inclusion.
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                     |
//! |------------|------------------------------------------------------------|
//! | `parallel` | `select` evaluates POIs on the Rayon pool.                 |
//! | `serde`    | Derives `Serialize`/`Deserialize` on `SelectParams`.       |

pub mod index;
pub mod params;
pub mod select;
pub mod selector;

#[cfg(test)]
mod tests;

pub use index::PoiIndex;
pub use params::SelectParams;
pub use select::{rank, select};
pub use selector::Selector;
