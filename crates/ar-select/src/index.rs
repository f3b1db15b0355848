//! R-tree over POI locations.
//!
//! Entries are `[lat, lon]` points in plain degree space.  The index answers
//! one question: which POIs fall inside a [`DegreeBox`]?  A box that crosses
//! the antimeridian is queried as two envelopes.  Exact distance checks stay
//! with the selector.

use ar_core::{DegreeBox, PointOfInterest};
use rstar::{AABB, RTree, RTreeObject};

/// A POI position and its index in the owning slice.
#[derive(Clone, Debug)]
struct PoiEntry {
    point: [f64; 2], // [lat, lon]
    slot:  usize,
}

impl RTreeObject for PoiEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

/// Spatial index over a POI slice.  POIs with malformed locations are left
/// out; they can never be selected anyway.
pub struct PoiIndex {
    tree:    RTree<PoiEntry>,
    skipped: usize,
}

impl PoiIndex {
    /// Bulk-load an index over `pois`.  Slots returned by queries are
    /// positions in this slice.
    pub fn new(pois: &[PointOfInterest]) -> Self {
        let entries: Vec<PoiEntry> = pois
            .iter()
            .enumerate()
            .filter(|(_, p)| p.has_valid_location())
            .map(|(slot, p)| PoiEntry { point: [p.location.lat, p.location.lon], slot })
            .collect();
        let skipped = pois.len() - entries.len();
        Self { tree: RTree::bulk_load(entries), skipped }
    }

    /// Number of indexed POIs.
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// POIs left out because their location was malformed.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Slots of every indexed POI inside `bbox`, ascending.
    pub fn candidates(&self, bbox: &DegreeBox) -> Vec<usize> {
        let (lat_lo, lat_hi) = bbox.lat_range();
        if lat_lo.is_nan() || lat_hi.is_nan() || lat_lo > lat_hi {
            return Vec::new();
        }

        let mut slots: Vec<usize> = bbox
            .lon_ranges()
            .into_iter()
            .flat_map(|(lon_lo, lon_hi)| {
                let env = AABB::from_corners([lat_lo, lon_lo], [lat_hi, lon_hi]);
                self.tree.locate_in_envelope(&env).map(|e| e.slot).collect::<Vec<_>>()
            })
            .collect();

        slots.sort_unstable();
        slots.dedup();
        slots
    }
}
