//! Load results and per-record skip reasons.

use std::collections::HashSet;

use ar_core::{Category, GeoPoint, PoiId, PointOfInterest};
use thiserror::Error;
use tracing::warn;

/// Why a single record was left out of a feed.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum SkipReason {
    #[error("coordinate tuple has {0} element(s), need at least 2")]
    ShortCoordinates(usize),

    #[error("coordinate is not a number")]
    NonNumericCoordinate,

    #[error("coordinates ({lat}, {lon}) out of range")]
    OutOfRange { lat: f64, lon: f64 },

    #[error("geometry is {0:?}, expected Point")]
    NotAPoint(String),

    #[error("record has no name")]
    MissingName,

    #[error("duplicate id {0}")]
    DuplicateId(PoiId),

    #[error("malformed record: {0}")]
    Malformed(String),
}

/// One record that was skipped, by its position in the source document
/// (feature index for GeoJSON, data row index for CSV; both 0-based).
#[derive(Clone, Debug, PartialEq)]
pub struct SkippedRecord {
    pub index:  usize,
    pub reason: SkipReason,
}

/// Every POI that loaded, in document order, plus what was skipped.
#[derive(Clone, Debug, Default)]
pub struct FeedReport {
    pub pois:    Vec<PointOfInterest>,
    pub skipped: Vec<SkippedRecord>,
}

impl FeedReport {
    pub fn len(&self) -> usize {
        self.pois.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pois.is_empty()
    }

    /// `true` if no record was skipped.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }

    pub fn into_pois(self) -> Vec<PointOfInterest> {
        self.pois
    }
}

/// Format-independent fields of one record, before validation.
pub(crate) struct RawPoi {
    pub id:          Option<String>,
    pub name:        Option<String>,
    pub category:    Option<String>,
    pub lat:         f64,
    pub lon:         f64,
    pub alt:         Option<f64>,
    pub description: Option<String>,
}

/// Validates records and accumulates a [`FeedReport`], enforcing id
/// uniqueness across the document.
#[derive(Default)]
pub(crate) struct Collector {
    report: FeedReport,
    seen:   HashSet<PoiId>,
}

impl Collector {
    pub fn push(&mut self, index: usize, record: Result<RawPoi, SkipReason>) {
        match record.and_then(|raw| self.build(index, raw)) {
            Ok(poi) => {
                self.seen.insert(poi.id.clone());
                self.report.pois.push(poi);
            }
            Err(reason) => {
                warn!(index, %reason, "skipping feed record");
                self.report.skipped.push(SkippedRecord { index, reason });
            }
        }
    }

    pub fn finish(self) -> FeedReport {
        self.report
    }

    fn build(&self, index: usize, raw: RawPoi) -> Result<PointOfInterest, SkipReason> {
        let location = match raw.alt {
            Some(alt) => GeoPoint::with_altitude(raw.lat, raw.lon, alt),
            None      => GeoPoint::new(raw.lat, raw.lon),
        };
        if !location.is_valid() {
            return Err(SkipReason::OutOfRange { lat: raw.lat, lon: raw.lon });
        }

        let name = non_empty(raw.name).ok_or(SkipReason::MissingName)?;
        let id = non_empty(raw.id).map_or_else(|| PoiId(format!("poi-{index}")), PoiId);
        if self.seen.contains(&id) {
            return Err(SkipReason::DuplicateId(id));
        }

        let category = raw.category.as_deref().map_or(Category::Unknown, Category::from_key);
        let mut poi = PointOfInterest::new(id, name, category, location);
        if let Some(d) = non_empty(raw.description) {
            poi = poi.with_description(d);
        }
        Ok(poi)
    }
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.map(|s| s.trim().to_owned()).filter(|s| !s.is_empty())
}
