//! The visibility selector.
//!
//! [`select`] is a pure function: the same POIs, observer and parameters
//! always produce the same list.  A missing or unusable observer, an empty
//! POI set, or nothing in range all yield an empty list; none of them is an
//! error.

use std::cmp::Ordering;

use ar_core::{DegreeBox, GeoMeasure, ObservedState, PointOfInterest, PositionedMarker, wrap_180};
use ar_projection::vertical_angle_deg;
use tracing::debug;

use crate::SelectParams;

/// Select and rank the POIs visible from `observer`.
///
/// Returns at most `params.max_count` markers, highest priority first.
/// Ties are broken by distance (nearer first) and then by id.
pub fn select(
    pois:     &[PointOfInterest],
    observer: Option<&ObservedState>,
    params:   &SelectParams,
) -> Vec<PositionedMarker> {
    let Some(observer) = observer.filter(|o| o.is_usable()) else {
        return Vec::new();
    };
    if pois.is_empty() || params.is_degenerate() {
        return Vec::new();
    }

    let bbox = observer.position.degree_box(params.max_distance_m);

    #[cfg(not(feature = "parallel"))]
    let markers: Vec<PositionedMarker> = pois
        .iter()
        .enumerate()
        .filter_map(|(i, poi)| consider(i, poi, observer, &bbox, params))
        .collect();

    #[cfg(feature = "parallel")]
    let markers: Vec<PositionedMarker> = {
        use rayon::prelude::*;

        // Indexed collect keeps input order, so ranking ties resolve the
        // same way as the sequential path.
        pois.par_iter()
            .enumerate()
            .filter_map(|(i, poi)| consider(i, poi, observer, &bbox, params))
            .collect()
    };

    rank(markers, params.max_count)
}

/// Sort by descending priority (nearer first on ties, then id) and keep the
/// first `max_count`.
pub fn rank(mut markers: Vec<PositionedMarker>, max_count: usize) -> Vec<PositionedMarker> {
    markers.sort_by(compare);
    markers.truncate(max_count);
    markers
}

fn compare(a: &PositionedMarker, b: &PositionedMarker) -> Ordering {
    b.priority
        .total_cmp(&a.priority)
        .then_with(|| a.distance_m.total_cmp(&b.distance_m))
        .then_with(|| a.poi.id.cmp(&b.poi.id))
}

/// Malformed-geometry and degree-box checks, then the exact evaluation.
fn consider(
    index:    usize,
    poi:      &PointOfInterest,
    observer: &ObservedState,
    bbox:     &DegreeBox,
    params:   &SelectParams,
) -> Option<PositionedMarker> {
    if !poi.has_valid_location() {
        debug!(index, id = %poi.id, "skipping POI with malformed location");
        return None;
    }
    if !bbox.contains(poi.location) {
        return None;
    }
    let measure = GeoMeasure::between(observer.position, poi.location);
    evaluate(poi, observer, measure, params)
}

/// Haversine range check, widened FOV test and priority for one POI whose
/// `measure` from the observer is already known.
pub(crate) fn evaluate(
    poi:      &PointOfInterest,
    observer: &ObservedState,
    measure:  GeoMeasure,
    params:   &SelectParams,
) -> Option<PositionedMarker> {
    let distance_m = measure.distance_m;
    if !distance_m.is_finite() || distance_m > params.max_distance_m {
        return None;
    }

    let relative = wrap_180(measure.bearing_deg - observer.heading_deg);
    if relative.abs() > params.half_window_deg(distance_m) {
        return None;
    }

    Some(PositionedMarker {
        poi:                poi.clone(),
        distance_m,
        bearing_deg:        measure.bearing_deg,
        vertical_angle_deg: vertical_angle_deg(observer.position, poi.location, distance_m),
        priority:           params.priority(distance_m, relative),
    })
}
