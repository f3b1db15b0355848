//! `ar-core` — foundational types for the AR points-of-interest positioning core.
//!
//! This crate is a dependency of every other `ar-*` crate.  It intentionally
//! has no `ar-*` dependencies and minimal external ones (only `thiserror`,
//! plus optional `serde` and `rustc-hash`).
//!
//! # What lives here
//!
//! | Module       | Contents                                                 |
//! |--------------|----------------------------------------------------------|
//! | [`angle`]    | `normalize_deg`, `wrap_180`, `angular_distance`          |
//! | [`geo`]      | `GeoPoint`, haversine distance, initial bearing, boxes   |
//! | [`cache`]    | `GeoCache` (bounded LRU for distance/bearing pairs)      |
//! | [`poi`]      | `PoiId`, `Category`, `CategoryStyle`, `PointOfInterest`  |
//! | [`state`]    | `PositionFix`, `ObservedState`                           |
//! | [`marker`]   | `PositionedMarker`, `ScreenMarker`                       |
//! | [`config`]   | `ViewConfig`, `FormFactor`                               |
//! | [`error`]    | `CoreError`, `CoreResult`                                |
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                    |
//! |-----------|-----------------------------------------------------------|
//! | `serde`   | Adds `Serialize`/`Deserialize` to all public types.       |
//! | `fx-hash` | `GeoCache` hashes with FxHash instead of SipHash.         |

pub mod angle;
pub mod cache;
pub mod config;
pub mod error;
pub mod geo;
pub mod marker;
pub mod poi;
pub mod state;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use angle::{angular_distance, normalize_deg, wrap_180};
pub use cache::{CacheStats, GeoCache, GeoMeasure};
pub use config::{FormFactor, ViewConfig};
pub use error::{CoreError, CoreResult};
pub use geo::{EARTH_RADIUS_M, FAST_PATH_THRESHOLD_M, DegreeBox, GeoPoint};
pub use marker::{PositionedMarker, ScreenMarker};
pub use poi::{Category, CategoryStyle, PoiId, PointOfInterest};
pub use state::{ObservedState, PositionFix};
