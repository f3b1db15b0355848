//! Unit tests for ar-select.

#[cfg(test)]
mod helpers {
    use ar_core::{Category, EARTH_RADIUS_M, GeoPoint, ObservedState, PointOfInterest};

    use crate::SelectParams;

    /// Point reached from `start` travelling `distance_m` along `bearing_deg`.
    pub fn destination(start: GeoPoint, bearing_deg: f64, distance_m: f64) -> GeoPoint {
        let d = distance_m / EARTH_RADIUS_M;
        let b = bearing_deg.to_radians();
        let lat1 = start.lat.to_radians();
        let lon1 = start.lon.to_radians();

        let lat2 = (lat1.sin() * d.cos() + lat1.cos() * d.sin() * b.cos()).asin();
        let lon2 = lon1
            + (b.sin() * d.sin() * lat1.cos()).atan2(d.cos() - lat1.sin() * lat2.sin());

        let lon = (lon2.to_degrees() + 540.0) % 360.0 - 180.0;
        GeoPoint::new(lat2.to_degrees(), lon)
    }

    pub fn poi_at(id: &str, from: GeoPoint, bearing_deg: f64, distance_m: f64) -> PointOfInterest {
        PointOfInterest::new(id, id, Category::Landmark, destination(from, bearing_deg, distance_m))
    }

    pub fn origin() -> ObservedState {
        ObservedState::new(GeoPoint::new(0.0, 0.0), 0.0).calibrated(true)
    }

    /// 500 m, 60° FOV, cap 10.
    pub fn phone_params() -> SelectParams {
        SelectParams::default()
    }

    pub fn ids(markers: &[ar_core::PositionedMarker]) -> Vec<&str> {
        markers.iter().map(|m| m.id().as_str()).collect()
    }
}

#[cfg(test)]
mod select {
    use ar_core::{Category, GeoPoint, ObservedState, PointOfInterest};

    use super::helpers::{ids, origin, phone_params, poi_at};
    use crate::{SelectParams, select};

    #[test]
    fn end_to_end_example() {
        let o = origin();
        let pois = vec![
            poi_at("A", o.position, 0.0, 100.0),
            poi_at("B", o.position, 180.0, 50.0),
            poi_at("C", o.position, 10.0, 600.0),
        ];
        let out = select(&pois, Some(&o), &phone_params());
        assert_eq!(ids(&out), vec!["A"]);
        assert!((out[0].distance_m - 100.0).abs() < 0.01);
        assert!(out[0].bearing_deg < 0.01 || out[0].bearing_deg > 359.99);
    }

    #[test]
    fn nearer_ranks_first_at_equal_bearing() {
        let o = origin();
        let pois = vec![
            poi_at("far", o.position, 5.0, 400.0),
            poi_at("near", o.position, 5.0, 50.0),
        ];
        let out = select(&pois, Some(&o), &phone_params());
        assert_eq!(ids(&out), vec!["near", "far"]);
        assert!(out[0].priority > out[1].priority);
    }

    #[test]
    fn cap_keeps_highest_priority() {
        let o = origin();
        let pois: Vec<PointOfInterest> = (0..20)
            .map(|i| {
                let side = if i % 2 == 0 { 10.0 } else { -10.0 };
                let bearing = side + i as f64 * 0.5;
                poi_at(&format!("p{i:02}"), o.position, bearing, 50.0 + 20.0 * i as f64)
            })
            .collect();

        let all = select(&pois, Some(&o), &phone_params().with_max_count(100));
        assert_eq!(all.len(), 20);

        let capped = select(&pois, Some(&o), &phone_params().with_max_count(8));
        assert_eq!(capped.len(), 8);
        assert_eq!(ids(&capped), ids(&all[..8]));
    }

    #[test]
    fn output_sorted_and_priorities_bounded() {
        let o = ObservedState::new(GeoPoint::new(51.5, -0.12), 270.0);
        let pois: Vec<PointOfInterest> = (0..40)
            .map(|i| poi_at(&format!("p{i}"), o.position, 230.0 + 2.0 * i as f64, 10.0 * (i + 1) as f64))
            .collect();
        let out = select(&pois, Some(&o), &phone_params().with_max_count(40));
        assert!(!out.is_empty());
        for w in out.windows(2) {
            assert!(w[0].priority >= w[1].priority);
        }
        for m in &out {
            assert!((0.0..=1.0).contains(&m.priority));
            assert!(m.distance_m <= 500.0);
        }
    }

    #[test]
    fn idempotent() {
        let o = origin();
        let pois: Vec<PointOfInterest> = (0..30)
            .map(|i| poi_at(&format!("p{i}"), o.position, (i * 13) as f64, 30.0 * i as f64))
            .collect();
        let a = select(&pois, Some(&o), &phone_params());
        let b = select(&pois, Some(&o), &phone_params());
        assert_eq!(a, b);
    }

    #[test]
    fn malformed_poi_does_not_disturb_ranking() {
        let o = origin();
        let good = vec![
            poi_at("a", o.position, 0.0, 100.0),
            poi_at("b", o.position, 10.0, 200.0),
            poi_at("c", o.position, -5.0, 300.0),
        ];
        let mut with_bad = good.clone();
        with_bad.insert(
            1,
            PointOfInterest::new("bad", "bad", Category::Unknown, GeoPoint::new(f64::NAN, 0.0)),
        );
        with_bad.push(PointOfInterest::new("worse", "w", Category::Unknown, GeoPoint::new(95.0, 0.0)));

        let clean = select(&good, Some(&o), &phone_params());
        let dirty = select(&with_bad, Some(&o), &phone_params());
        assert_eq!(clean, dirty);
    }

    #[test]
    fn missing_or_unusable_observer_is_empty() {
        let o = origin();
        let pois = vec![poi_at("a", o.position, 0.0, 100.0)];
        assert!(select(&pois, None, &phone_params()).is_empty());

        let no_heading = ObservedState::new(o.position, f64::NAN);
        assert!(select(&pois, Some(&no_heading), &phone_params()).is_empty());

        let no_position = ObservedState::new(GeoPoint::new(f64::NAN, 0.0), 0.0);
        assert!(select(&pois, Some(&no_position), &phone_params()).is_empty());
    }

    #[test]
    fn empty_inputs_are_empty() {
        let o = origin();
        assert!(select(&[], Some(&o), &phone_params()).is_empty());

        let far = vec![poi_at("x", o.position, 0.0, 5_000.0)];
        assert!(select(&far, Some(&o), &phone_params()).is_empty());

        let pois = vec![poi_at("a", o.position, 0.0, 100.0)];
        assert!(select(&pois, Some(&o), &phone_params().with_max_count(0)).is_empty());
        assert!(select(&pois, Some(&o), &phone_params().with_fov(0.0)).is_empty());
    }

    #[test]
    fn near_markers_get_a_wider_window() {
        let o = origin();
        // Half FOV is 30°.  At 10 m the window is ~49.6°, at 450 m only 32°.
        let near = vec![poi_at("near", o.position, 40.0, 10.0)];
        let far = vec![poi_at("far", o.position, 40.0, 450.0)];
        assert_eq!(select(&near, Some(&o), &phone_params()).len(), 1);
        assert!(select(&far, Some(&o), &phone_params()).is_empty());
    }

    #[test]
    fn view_wraps_through_north() {
        let o = ObservedState::new(GeoPoint::new(0.0, 0.0), 350.0);
        let pois = vec![poi_at("east-of-north", o.position, 15.0, 100.0)];
        assert_eq!(select(&pois, Some(&o), &phone_params()).len(), 1);
    }

    #[test]
    fn boundary_distance_is_inclusive_of_haversine_not_box() {
        // A POI just inside max distance at 60° latitude, diagonal to the box.
        let o = ObservedState::new(GeoPoint::new(60.0, 10.0), 45.0);
        let pois = vec![poi_at("edge", o.position, 45.0, 499.0)];
        assert_eq!(select(&pois, Some(&o), &phone_params()).len(), 1);
    }

    #[test]
    fn vertical_angle_only_with_altitudes() {
        let o = ObservedState::new(GeoPoint::with_altitude(0.0, 0.0, 10.0), 0.0);
        let mut high = poi_at("high", o.position, 0.0, 100.0);
        high.location.alt = Some(110.0);
        let flat = poi_at("flat", o.position, 1.0, 100.0);

        let out = select(&[high, flat], Some(&o), &phone_params());
        let by_id = |id: &str| out.iter().find(|m| m.id().as_str() == id).unwrap();
        let angle = by_id("high").vertical_angle_deg.unwrap();
        assert!((angle - 45.0).abs() < 0.1, "got {angle}");
        assert!(by_id("flat").vertical_angle_deg.is_none());
    }

    #[test]
    fn params_follow_view_config() {
        let p = SelectParams::from(&ar_core::ViewConfig::desktop());
        assert_eq!(p.max_distance_m, 1_000.0);
        assert_eq!(p.fov_deg, 80.0);
        assert_eq!(p.max_count, 15);
        assert_eq!(p.distance_weight, 0.7);
    }
}

#[cfg(test)]
mod index {
    use ar_core::{Category, GeoPoint, PointOfInterest};

    use super::helpers::destination;
    use crate::PoiIndex;

    #[test]
    fn finds_points_in_box_and_skips_malformed() {
        let c = GeoPoint::new(48.85, 2.35);
        let pois = vec![
            PointOfInterest::new("in", "in", Category::Park, destination(c, 30.0, 200.0)),
            PointOfInterest::new("out", "out", Category::Park, destination(c, 30.0, 5_000.0)),
            PointOfInterest::new("bad", "bad", Category::Park, GeoPoint::new(f64::NAN, 2.35)),
        ];
        let index = PoiIndex::new(&pois);
        assert_eq!(index.len(), 2);
        assert_eq!(index.skipped(), 1);
        assert_eq!(index.candidates(&c.degree_box(500.0)), vec![0]);
    }

    #[test]
    fn antimeridian_box_queries_both_sides() {
        let c = GeoPoint::new(0.0, 179.9995);
        let pois = vec![
            PointOfInterest::new("west", "w", Category::Park, destination(c, 270.0, 100.0)),
            PointOfInterest::new("east", "e", Category::Park, destination(c, 90.0, 100.0)),
        ];
        assert!(pois[1].location.lon < 0.0);
        let index = PoiIndex::new(&pois);
        assert_eq!(index.candidates(&c.degree_box(500.0)), vec![0, 1]);
    }

    #[test]
    fn polar_box_covers_all_longitudes() {
        let c = GeoPoint::new(89.999, 0.0);
        let pois = vec![PointOfInterest::new("p", "p", Category::Park, GeoPoint::new(89.9995, 170.0))];
        let index = PoiIndex::new(&pois);
        assert_eq!(index.candidates(&c.degree_box(500.0)), vec![0]);
    }
}

#[cfg(test)]
mod selector {
    use ar_core::{Category, GeoPoint, ObservedState, PointOfInterest, angular_distance};
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use super::helpers::{destination, ids, phone_params, poi_at};
    use crate::{Selector, select};

    fn city(rng: &mut SmallRng, centre: GeoPoint, n: usize) -> Vec<PointOfInterest> {
        (0..n)
            .map(|i| {
                let loc = destination(centre, rng.gen_range(0.0..360.0), rng.gen_range(0.0..1_500.0));
                PointOfInterest::new(format!("poi-{i}"), format!("POI {i}"), Category::Shop, loc)
            })
            .collect()
    }

    #[test]
    fn matches_linear_scan() {
        let mut rng = SmallRng::seed_from_u64(11);
        let centre = GeoPoint::new(48.8566, 2.3522);
        let pois = city(&mut rng, centre, 500);
        let params = phone_params().with_max_count(25);
        let mut selector = Selector::new(pois.clone(), params);

        for _ in 0..50 {
            let pos = destination(centre, rng.gen_range(0.0..360.0), rng.gen_range(0.0..800.0));
            let o = ObservedState::new(pos, rng.gen_range(0.0..360.0));
            assert_eq!(selector.select(Some(&o)), select(&pois, Some(&o), &params));
        }
    }

    #[test]
    fn antimeridian_matches_linear_scan() {
        let o = ObservedState::new(GeoPoint::new(0.0, 179.9995), 90.0);
        let pois = vec![poi_at("east", o.position, 90.0, 100.0), poi_at("west", o.position, 270.0, 100.0)];
        let mut selector = Selector::new(pois.clone(), phone_params());
        let out = selector.select(Some(&o));
        assert_eq!(ids(&out), vec!["east"]);
        assert_eq!(out, select(&pois, Some(&o), &phone_params()));
    }

    #[test]
    fn cache_shares_bearing_within_key_quantum() {
        let here = GeoPoint::new(0.0, 0.0);
        let nudged = GeoPoint::new(0.0, 4e-7); // ~4.5 cm east, same cache key
        let pois = vec![poi_at("near", here, 0.0, 1.5)];

        let mut cached = Selector::new(pois.clone(), phone_params()).with_cache(16);
        let first = cached.select(Some(&ObservedState::new(here, 0.0)));
        let second = cached.select(Some(&ObservedState::new(nudged, 0.0)));
        assert_eq!(cached.cache_stats().unwrap().hits, 1);
        assert_eq!(second[0].bearing_deg, first[0].bearing_deg);

        // Without the cache the few centimetres show up in the bearing.
        let exact = select(&pois, Some(&ObservedState::new(nudged, 0.0)), &phone_params());
        assert!(angular_distance(exact[0].bearing_deg, first[0].bearing_deg) > 1.0);
    }

    #[test]
    fn cache_hits_for_a_stationary_observer() {
        let mut rng = SmallRng::seed_from_u64(3);
        let centre = GeoPoint::new(40.7128, -74.006);
        let pois = city(&mut rng, centre, 100);
        let mut selector = Selector::new(pois, phone_params()).with_cache(256);
        let o = ObservedState::new(centre, 120.0);

        let first = selector.select(Some(&o));
        let misses = selector.cache_stats().unwrap().misses;
        assert!(misses > 0);

        let second = selector.select(Some(&o));
        assert_eq!(first, second);
        let stats = selector.cache_stats().unwrap();
        assert_eq!(stats.misses, misses);
        assert_eq!(stats.hits, misses);
    }

    #[test]
    fn replace_pois_rebuilds_and_clears() {
        let o = ObservedState::new(GeoPoint::new(0.0, 0.0), 0.0);
        let mut selector =
            Selector::new(vec![poi_at("old", o.position, 0.0, 100.0)], phone_params()).with_cache(16);
        assert_eq!(ids(&selector.select(Some(&o))), vec!["old"]);

        selector.replace_pois(vec![poi_at("new", o.position, 0.0, 50.0)]);
        assert_eq!(selector.cache_stats().unwrap().misses, 0);
        assert_eq!(ids(&selector.select(Some(&o))), vec!["new"]);
    }

    #[test]
    fn no_observer_no_markers() {
        let o = ObservedState::new(GeoPoint::new(0.0, 0.0), 0.0);
        let mut selector = Selector::new(vec![poi_at("a", o.position, 0.0, 100.0)], phone_params());
        assert!(selector.select(None).is_empty());
    }
}
