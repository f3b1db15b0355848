//! In-group passes: anchor grouping, collapse, vertical distribution.

use std::collections::BTreeSet;

use ar_core::{Category, PoiId, ScreenMarker};

/// Split `markers` into groups.  Each marker joins the group whose anchor
/// (first member) is horizontally closest, provided it is within
/// `threshold`; otherwise it anchors a new group.  Order is preserved both
/// across and within groups.
pub fn group_by_anchor(markers: Vec<ScreenMarker>, threshold: f64) -> Vec<Vec<ScreenMarker>> {
    let mut groups: Vec<Vec<ScreenMarker>> = Vec::new();
    for m in markers {
        let x = m.horizontal_position;
        let nearest = groups
            .iter()
            .enumerate()
            .map(|(i, g)| (i, (g[0].horizontal_position - x).abs()))
            .filter(|&(_, dx)| dx <= threshold)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i);
        match nearest {
            Some(i) => groups[i].push(m),
            None    => groups.push(vec![m]),
        }
    }
    groups
}

/// Merge members sharing a category and distance bucket into the nearest of
/// them.  The survivor keeps its own placement and gains a count badge plus
/// the ids it stands for.  It takes the list position of the bucket's first
/// member.
pub fn collapse(members: Vec<ScreenMarker>, bucket_m: f64) -> Vec<ScreenMarker> {
    let mut out: Vec<ScreenMarker> = Vec::with_capacity(members.len());
    let mut keys: Vec<(Category, i64)> = Vec::with_capacity(members.len());

    for m in members {
        let key = (m.marker.poi.category, bucket(m.distance_m(), bucket_m));
        match keys.iter().position(|k| *k == key) {
            Some(i) => absorb(&mut out[i], m),
            None    => {
                keys.push(key);
                out.push(m);
            }
        }
    }
    out
}

/// Spread members evenly across `[-band_px, +band_px]` by list index, first
/// member on top.  A lone member sits on the horizon.
pub fn distribute(members: &mut [ScreenMarker], band_px: f64) {
    let n = members.len();
    if n <= 1 {
        if let Some(m) = members.first_mut() {
            m.vertical_offset_px = 0.0;
        }
        return;
    }
    let step = 2.0 * band_px / (n - 1) as f64;
    for (i, m) in members.iter_mut().enumerate() {
        m.vertical_offset_px = -band_px + step * i as f64;
    }
}

fn bucket(distance_m: f64, bucket_m: f64) -> i64 {
    if bucket_m > 0.0 && bucket_m.is_finite() && distance_m.is_finite() {
        (distance_m / bucket_m).floor() as i64
    } else {
        0
    }
}

fn ids_of(m: &ScreenMarker) -> BTreeSet<PoiId> {
    m.grouped_ids
        .clone()
        .unwrap_or_else(|| BTreeSet::from([m.id().clone()]))
}

fn absorb(rep: &mut ScreenMarker, other: ScreenMarker) {
    let count = rep.group_count.unwrap_or(1) + other.group_count.unwrap_or(1);
    let mut ids = ids_of(rep);
    ids.extend(ids_of(&other));

    let other_nearer = other
        .distance_m()
        .total_cmp(&rep.distance_m())
        .then_with(|| other.id().cmp(rep.id()))
        .is_lt();
    if other_nearer {
        *rep = other;
    }
    rep.group_count = Some(count);
    rep.grouped_ids = Some(ids);
}
