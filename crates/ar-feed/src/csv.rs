//! CSV POI feeds.
//!
//! # CSV format
//!
//! One row per POI.  Only `latitude`, `longitude` and `name` are required;
//! other columns may be empty or absent.
//!
//! ```csv
//! id,name,category,latitude,longitude,altitude,description
//! eiffel,Eiffel Tower,landmark,48.8584,2.2945,35,Wrought-iron lattice tower
//! ,Café de Flore,cafe,48.8540,2.3325,,
//! ```
//!
//! A row whose fields cannot be decoded (e.g. `latitude` is not a number)
//! is skipped; an I/O failure while reading aborts the load.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::report::{Collector, RawPoi};
use crate::{FeedReport, FeedResult, SkipReason};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct PoiRecord {
    id:          Option<String>,
    name:        Option<String>,
    category:    Option<String>,
    latitude:    Option<f64>,
    longitude:   Option<f64>,
    altitude:    Option<f64>,
    description: Option<String>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load POIs from a CSV file.
pub fn load_pois_csv(path: &Path) -> FeedResult<FeedReport> {
    let file = File::open(path)?;
    load_pois_reader(file)
}

/// Like [`load_pois_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or loading from network
/// streams.
pub fn load_pois_reader<R: Read>(reader: R) -> FeedResult<FeedReport> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut collector = Collector::default();
    for (index, result) in csv_reader.deserialize::<PoiRecord>().enumerate() {
        let record = match result {
            Ok(row) => to_raw(row),
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => Err(SkipReason::Malformed(e.to_string())),
        };
        collector.push(index, record);
    }
    Ok(collector.finish())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn to_raw(row: PoiRecord) -> Result<RawPoi, SkipReason> {
    let present = usize::from(row.longitude.is_some()) + usize::from(row.latitude.is_some());
    let (Some(lat), Some(lon)) = (row.latitude, row.longitude) else {
        return Err(SkipReason::ShortCoordinates(present));
    };
    Ok(RawPoi {
        id: row.id,
        name: row.name,
        category: row.category,
        lat,
        lon,
        alt: row.altitude,
        description: row.description,
    })
}
