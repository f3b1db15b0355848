//! Per-cycle derived marker values.
//!
//! Both types are recomputed from scratch every cycle and fully replaced on
//! the next one; nothing holds on to them as authoritative state.

use std::collections::BTreeSet;

use crate::{PoiId, PointOfInterest};

/// A POI measured against one [`ObservedState`](crate::ObservedState)
/// snapshot.
///
/// `distance_m` and `bearing_deg` always come from the same snapshot and the
/// same POI location; they are never mixed across cycles.  The exception is
/// a `Selector` running with a `GeoCache`: observer positions within 1e-6°
/// of a cached one reuse its pair, so for a POI a metre or two away the
/// bearing may be off by a few degrees.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PositionedMarker {
    pub poi:                PointOfInterest,
    /// Haversine distance, metres, `>= 0`.
    pub distance_m:         f64,
    /// Initial bearing from the observer, degrees in `[0, 360)`.
    pub bearing_deg:        f64,
    /// Elevation angle to the POI when both altitudes are known.
    pub vertical_angle_deg: Option<f64>,
    /// Render priority in `[0, 1]`; higher is more relevant.
    pub priority:           f64,
}

impl PositionedMarker {
    #[inline]
    pub fn id(&self) -> &PoiId {
        &self.poi.id
    }
}

/// A marker placed on screen for one render frame.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScreenMarker {
    pub marker:              PositionedMarker,
    /// Normalized horizontal position, `0.0` = left edge, `1.0` = right edge.
    pub horizontal_position: f64,
    /// Marker size in pixels, always `> 0`.
    pub size_px:             f64,
    /// Vertical displacement from the horizon line in pixels; negative is up.
    pub vertical_offset_px:  f64,
    /// Count badge when several markers were collapsed into this one.
    pub group_count:         Option<u32>,
    /// Ids of every POI represented by this marker (including its own) when
    /// collapsed.
    pub grouped_ids:         Option<BTreeSet<PoiId>>,
    /// Draw order; larger values are drawn in front.  Nearer markers always
    /// have a larger `z_index` than farther ones.
    pub z_index:             u32,
}

impl ScreenMarker {
    /// A marker at `horizontal_position` with no vertical offset or grouping.
    pub fn new(marker: PositionedMarker, horizontal_position: f64, size_px: f64) -> Self {
        Self {
            marker,
            horizontal_position,
            size_px,
            vertical_offset_px: 0.0,
            group_count: None,
            grouped_ids: None,
            z_index: 0,
        }
    }

    #[inline]
    pub fn id(&self) -> &PoiId {
        self.marker.id()
    }

    #[inline]
    pub fn distance_m(&self) -> f64 {
        self.marker.distance_m
    }
}
