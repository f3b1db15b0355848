//! `ar-feed` — loads point-of-interest collections.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                   |
//! |-------------|------------------------------------------------------------|
//! | [`geojson`] | `parse_geojson`, `load_geojson`, `load_geojson_reader`     |
//! | [`csv`]     | `load_pois_csv`, `load_pois_reader`                        |
//! | [`report`]  | `FeedReport`, `SkippedRecord`, `SkipReason`                |
//! | [`error`]   | `FeedError`, `FeedResult<T>`                               |
//!
//! # Failure policy
//!
//! A document that cannot be read or is not JSON/CSV at all is an `Err`.
//! A single bad record (short coordinate tuple, non-numeric or
//! out-of-range coordinates, no name, duplicate id) is skipped, logged at
//! `warn`, and listed in [`FeedReport::skipped`]; the rest still load.

pub mod csv;
pub mod error;
pub mod geojson;
pub mod report;


use std::path::Path;

pub use crate::csv::{load_pois_csv, load_pois_reader};
pub use error::{FeedError, FeedResult};
pub use geojson::{load_geojson, load_geojson_reader, parse_geojson};
pub use report::{FeedReport, SkipReason, SkippedRecord};

/// Load a feed, choosing the format from the file extension: `.csv` is CSV,
/// anything else is treated as GeoJSON.
pub fn load_pois(path: &Path) -> FeedResult<FeedReport> {
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
    if is_csv { load_pois_csv(path) } else { load_geojson(path) }
}
