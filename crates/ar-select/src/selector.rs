//! `Selector` — a POI set that is queried many times.
//!
//! [`select`](crate::select) scans the whole slice on every call.  A
//! `Selector` owns the POIs, keeps a [`PoiIndex`] over them and, optionally,
//! a [`GeoCache`] so a stationary observer does not recompute haversine for
//! the same pairs every frame.  Results match the free function for the same
//! inputs, up to the cache's 1e-6° key quantization.

use ar_core::{CacheStats, GeoCache, GeoMeasure, ObservedState, PointOfInterest, PositionedMarker};
use tracing::debug;

use crate::select::evaluate;
use crate::{PoiIndex, SelectParams, rank};

pub struct Selector {
    pois:   Vec<PointOfInterest>,
    index:  PoiIndex,
    cache:  Option<GeoCache>,
    params: SelectParams,
}

impl Selector {
    pub fn new(pois: Vec<PointOfInterest>, params: SelectParams) -> Self {
        let index = PoiIndex::new(&pois);
        if index.skipped() > 0 {
            debug!(skipped = index.skipped(), "POIs with malformed locations left out of the index");
        }
        Self { pois, index, cache: None, params }
    }

    /// Memoize distance/bearing pairs in an LRU of `capacity` entries.
    pub fn with_cache(mut self, capacity: usize) -> Self {
        self.cache = Some(GeoCache::new(capacity));
        self
    }

    pub fn params(&self) -> &SelectParams {
        &self.params
    }

    pub fn set_params(&mut self, params: SelectParams) {
        self.params = params;
    }

    pub fn pois(&self) -> &[PointOfInterest] {
        &self.pois
    }

    pub fn len(&self) -> usize {
        self.pois.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pois.is_empty()
    }

    /// Swap in a new POI set.  The index is rebuilt and the cache cleared.
    pub fn replace_pois(&mut self, pois: Vec<PointOfInterest>) {
        self.index = PoiIndex::new(&pois);
        self.pois = pois;
        if let Some(cache) = self.cache.as_mut() {
            cache.clear();
        }
    }

    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.cache.as_ref().map(GeoCache::stats)
    }

    /// Visible POIs for `observer`, ranked and capped.  Same contract as
    /// [`select`](crate::select).
    pub fn select(&mut self, observer: Option<&ObservedState>) -> Vec<PositionedMarker> {
        let Some(observer) = observer.filter(|o| o.is_usable()) else {
            return Vec::new();
        };
        let params = self.params;
        if self.index.is_empty() || params.is_degenerate() {
            return Vec::new();
        }

        let bbox = observer.position.degree_box(params.max_distance_m);
        let candidates = self.index.candidates(&bbox);

        let mut markers = Vec::with_capacity(candidates.len());
        for slot in candidates {
            let poi = &self.pois[slot];
            if !bbox.contains(poi.location) {
                continue;
            }
            let measure = match self.cache.as_mut() {
                Some(cache) => cache.measure(observer.position, poi.location),
                None        => GeoMeasure::between(observer.position, poi.location),
            };
            if let Some(m) = evaluate(poi, observer, measure, &params) {
                markers.push(m);
            }
        }

        rank(markers, params.max_count)
    }
}
