//! Cross-group collision search and paint order.
//!
//! # Zig-zag search
//!
//! A marker whose slot collides with a marker already placed by an earlier
//! group tries offsets around its slot, alternating above and below with
//! growing magnitude:
//!
//! ```text
//! attempt   1    2    3    4    5    6
//! offset   -s   +s   -2s  +2s  -3s  +3s      s = size + label gap
//! ```
//!
//! If every attempt collides the original slot is kept and the overlap is
//! accepted.
//!
//! # Paint order
//!
//! `z_index` ranks markers by distance, farthest `0`.  The returned list is
//! sorted by `z_index` ascending, so drawing it in list order paints nearer
//! markers over farther ones.

use ar_core::ScreenMarker;
use tracing::debug;

use crate::LayoutParams;
use crate::group::{collapse, distribute, group_by_anchor};

/// Resolve overlaps among markers in relevance order (most relevant first).
///
/// Returns the markers back-to-front with `vertical_offset_px`, `z_index`
/// and, in collapse mode, `group_count`/`grouped_ids` filled in.
pub fn resolve_overlaps(markers: Vec<ScreenMarker>, params: &LayoutParams) -> Vec<ScreenMarker> {
    if markers.is_empty() {
        return markers;
    }

    let mut placed: Vec<(usize, ScreenMarker)> = Vec::with_capacity(markers.len());
    for (g, members) in group_by_anchor(markers, params.group_threshold).into_iter().enumerate() {
        let mut members = if params.collapse {
            collapse(members, params.distance_bucket_m)
        } else {
            members
        };
        distribute(&mut members, params.band_px());

        for mut m in members {
            settle(&mut m, g, &placed, params);
            placed.push((g, m));
        }
    }

    paint_order(placed.into_iter().map(|(_, m)| m).collect())
}

/// Move `m` off its slot if it collides with a marker from another group.
fn settle(m: &mut ScreenMarker, group: usize, placed: &[(usize, ScreenMarker)], params: &LayoutParams) {
    let base = m.vertical_offset_px;
    if is_free(m, base, group, placed, params) {
        return;
    }

    let step = m.size_px + params.label_gap_px;
    for attempt in 1..=params.max_attempts {
        let magnitude = f64::from(attempt.div_ceil(2)) * step;
        let candidate = if attempt % 2 == 1 { base - magnitude } else { base + magnitude };
        if is_free(m, candidate, group, placed, params) {
            m.vertical_offset_px = candidate;
            return;
        }
    }

    debug!(
        id = %m.id(),
        attempts = params.max_attempts,
        "no free slot; accepting marker overlap"
    );
}

fn is_free(
    m:      &ScreenMarker,
    offset: f64,
    group:  usize,
    placed: &[(usize, ScreenMarker)],
    params: &LayoutParams,
) -> bool {
    placed
        .iter()
        .filter(|(g, _)| *g != group)
        .all(|(_, other)| !collides(m, offset, other, params))
}

fn collides(m: &ScreenMarker, offset: f64, other: &ScreenMarker, params: &LayoutParams) -> bool {
    let dx = (m.horizontal_position - other.horizontal_position).abs();
    let dy = (offset - other.vertical_offset_px).abs();
    let clearance = (m.size_px + other.size_px) * 0.5 + params.label_gap_px;
    dx < params.group_threshold && dy < clearance
}

/// Assign `z_index` by distance (nearer is larger) and sort back-to-front.
fn paint_order(mut markers: Vec<ScreenMarker>) -> Vec<ScreenMarker> {
    markers.sort_by(|a, b| {
        b.distance_m()
            .total_cmp(&a.distance_m())
            .then_with(|| b.id().cmp(a.id()))
    });
    for (z, m) in markers.iter_mut().enumerate() {
        m.z_index = z as u32;
    }
    markers
}
