//! Bounded least-recently-used cache for distance/bearing pairs.
//!
//! The cache is an ordinary value owned by the caller (typically a
//! `Selector`).  Nothing in the workspace holds a process-wide cache, so
//! eviction policy and lifetime are explicit and testable.
//!
//! # Keying
//!
//! Both endpoints are quantized to 1e-6° (≈ 0.11 m at the equator).  Points
//! that differ by less than that share an entry, which is well under GPS
//! accuracy.
//!
//! # Eviction
//!
//! Each entry carries a monotonically increasing use stamp.  When the cache
//! is full the entry with the smallest stamp is evicted; that scan is
//! O(capacity), which is cheaper than maintaining a linked list for the
//! capacities used here (hundreds of entries).

use crate::GeoPoint;

#[cfg(not(feature = "fx-hash"))]
type Map<K, V> = std::collections::HashMap<K, V>;
#[cfg(feature = "fx-hash")]
type Map<K, V> = rustc_hash::FxHashMap<K, V>;

const QUANTUM: f64 = 1e6;

type Key = (i64, i64, i64, i64);

/// A distance/bearing pair computed from the same two points.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoMeasure {
    pub distance_m:  f64,
    pub bearing_deg: f64,
}

impl GeoMeasure {
    /// Compute distance and bearing together, uncached.
    #[inline]
    pub fn between(from: GeoPoint, to: GeoPoint) -> Self {
        Self {
            distance_m:  from.distance_m(to),
            bearing_deg: from.bearing_deg(to),
        }
    }
}

/// Hit/miss counters since construction or the last [`GeoCache::clear`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits:      u64,
    pub misses:    u64,
    pub evictions: u64,
}

struct Entry {
    value:     GeoMeasure,
    last_used: u64,
}

/// Fixed-capacity LRU cache of [`GeoMeasure`]s.
pub struct GeoCache {
    capacity: usize,
    entries:  Map<Key, Entry>,
    clock:    u64,
    stats:    CacheStats,
}

impl GeoCache {
    /// Create a cache holding at most `capacity` entries.  A capacity of 0
    /// disables caching (every lookup computes).
    pub fn new(capacity: usize) -> Self {
        let mut entries = Map::default();
        entries.reserve(capacity);
        Self { capacity, entries, clock: 0, stats: CacheStats::default() }
    }

    pub fn capacity(&self) -> usize { self.capacity }
    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
    pub fn stats(&self) -> CacheStats { self.stats }

    /// Return the cached measure for `from → to`, computing and inserting it
    /// on a miss.
    ///
    /// Points with non-finite coordinates bypass the cache entirely.
    pub fn measure(&mut self, from: GeoPoint, to: GeoPoint) -> GeoMeasure {
        let Some(key) = quantize(from, to) else {
            return GeoMeasure::between(from, to);
        };
        if self.capacity == 0 {
            self.stats.misses += 1;
            return GeoMeasure::between(from, to);
        }

        self.clock += 1;
        if let Some(entry) = self.entries.get_mut(&key) {
            entry.last_used = self.clock;
            self.stats.hits += 1;
            return entry.value;
        }

        self.stats.misses += 1;
        let value = GeoMeasure::between(from, to);
        if self.entries.len() >= self.capacity {
            self.evict_oldest();
        }
        self.entries.insert(key, Entry { value, last_used: self.clock });
        value
    }

    /// Drop every entry and reset the statistics.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.stats = CacheStats::default();
    }

    fn evict_oldest(&mut self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, e)| e.last_used)
            .map(|(k, _)| *k);
        if let Some(k) = oldest {
            self.entries.remove(&k);
            self.stats.evictions += 1;
        }
    }
}

fn quantize(from: GeoPoint, to: GeoPoint) -> Option<Key> {
    let q = |v: f64| -> Option<i64> {
        v.is_finite().then(|| (v * QUANTUM).round() as i64)
    };
    Some((q(from.lat)?, q(from.lon)?, q(to.lat)?, q(to.lon)?))
}
