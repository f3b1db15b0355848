//! Unit tests for ar-pipeline.

#[cfg(test)]
mod helpers {
    use std::cell::RefCell;
    use std::rc::Rc;

    use ar_core::{Category, EARTH_RADIUS_M, GeoPoint, PointOfInterest};

    use crate::{Frame, FrameObserver, FrameStatus};

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

    pub fn poi_at(id: &str, bearing_deg: f64, distance_m: f64, category: Category) -> PointOfInterest {
        let loc = destination(GeoPoint::new(0.0, 0.0), bearing_deg, distance_m);
        PointOfInterest::new(id, id, category, loc)
    }

    /// A in view at 100 m, B behind at 50 m, C out of range at 600 m.
    pub fn abc() -> Vec<PointOfInterest> {
        vec![
            poi_at("A", 0.0, 100.0, Category::Landmark),
            poi_at("B", 180.0, 50.0, Category::Cafe),
            poi_at("C", 10.0, 600.0, Category::Museum),
        ]
    }

    pub fn ids(frame: &Frame) -> Vec<&str> {
        frame.markers.iter().map(|m| m.id().as_str()).collect()
    }

    #[derive(Default)]
    pub struct Counts {
        pub frames:      usize,
        pub discarded:   usize,
        pub transitions: Vec<(FrameStatus, FrameStatus)>,
    }

    pub struct Recorder(pub Rc<RefCell<Counts>>);

    impl FrameObserver for Recorder {
        fn on_frame(&mut self, _frame: &Frame) {
            self.0.borrow_mut().frames += 1;
        }

        fn on_status_change(&mut self, from: FrameStatus, to: FrameStatus) {
            self.0.borrow_mut().transitions.push((from, to));
        }

        fn on_fix_discarded(&mut self, _now_ms: u64) {
            self.0.borrow_mut().discarded += 1;
        }
    }
}

#[cfg(test)]
mod throttle {
    use crate::{RecomputeGate, UpdateThrottle};

    #[test]
    fn discards_updates_closer_than_interval() {
        let mut t = UpdateThrottle::default();
        assert!(t.accept(0));
        assert!(!t.accept(30));
        assert!(t.accept(50));
        assert!(!t.accept(99));
        assert!(t.accept(100));
    }

    #[test]
    fn position_at_most_once_per_second() {
        let mut g = RecomputeGate::default();
        assert!(g.on_position(0));
        assert!(!g.on_position(400));
        assert!(g.has_pending());
        assert!(!g.poll_position(999));
        assert!(g.poll_position(1_000));
        assert!(!g.poll_position(5_000));
        assert!(!g.has_pending());
    }

    #[test]
    fn orientation_coalesced() {
        let mut g = RecomputeGate::default();
        assert!(g.on_orientation(0));
        assert!(!g.on_orientation(50));
        assert!(!g.on_orientation(80));
        assert!(!g.poll_orientation(99));
        assert!(g.poll_orientation(100));
        assert!(g.on_orientation(250));
    }

    #[test]
    fn nothing_pending_nothing_fires() {
        let mut g = RecomputeGate::default();
        assert!(!g.poll_position(10_000));
        assert!(!g.poll_orientation(10_000));
    }
}

#[cfg(test)]
mod view {
    use std::cell::RefCell;
    use std::rc::Rc;

    use ar_core::{Category, PositionFix, ViewConfig};
    use ar_heading::{HeadingStatus, OrientationSample};

    use super::helpers::{Counts, Recorder, abc, ids, poi_at};
    use crate::{ArViewBuilder, FrameStatus, PipelineError};

    fn origin_fix() -> PositionFix {
        PositionFix::new(0.0, 0.0, 5.0)
    }

    #[test]
    fn rejects_invalid_config() {
        let cfg = ViewConfig { fov_deg: 0.0, ..ViewConfig::phone() };
        assert!(matches!(ArViewBuilder::new(cfg).build(), Err(PipelineError::Config(_))));

        let cfg = ViewConfig { smoothing_window: 1, ..ViewConfig::phone() };
        assert!(matches!(ArViewBuilder::new(cfg).build(), Err(PipelineError::Config(_))));
    }

    #[test]
    fn end_to_end_frame() {
        let mut view = ArViewBuilder::new(ViewConfig::phone()).pois(abc()).build().unwrap();
        assert_eq!(view.frame().status, FrameStatus::WaitingForPosition);

        assert!(view.on_orientation(0, &OrientationSample::from_compass(0.0)));
        assert_eq!(view.frame().status, FrameStatus::WaitingForPosition);

        assert!(view.on_position(0, origin_fix()));
        let frame = view.frame();
        assert_eq!(frame.status, FrameStatus::Ready);
        assert_eq!(ids(frame), vec!["A"]);
        assert_eq!(frame.heading.unwrap().heading_deg, 0.0);
        assert!((frame.markers[0].horizontal_position - 0.5).abs() < 1e-3);
        assert_eq!(frame.computed_at_ms, 0);
    }

    #[test]
    fn waiting_for_heading() {
        let mut view = ArViewBuilder::new(ViewConfig::phone()).pois(abc()).build().unwrap();
        view.on_position(0, origin_fix());
        assert_eq!(view.frame().status, FrameStatus::WaitingForHeading);
        assert!(view.frame().is_empty());
        assert!(view.observed_state().is_none());
    }

    #[test]
    fn nothing_nearby_is_a_status_not_an_error() {
        let far = vec![poi_at("far", 0.0, 5_000.0, Category::Park)];
        let mut view = ArViewBuilder::new(ViewConfig::phone()).pois(far).build().unwrap();
        view.on_orientation(0, &OrientationSample::from_compass(0.0));
        view.on_position(0, origin_fix());
        assert_eq!(view.frame().status, FrameStatus::NoNearbyPoints);
        assert!(view.frame().is_empty());
    }

    #[test]
    fn close_fixes_are_discarded() {
        let counts = Rc::new(RefCell::new(Counts::default()));
        let mut view = ArViewBuilder::new(ViewConfig::phone())
            .pois(abc())
            .observer(Recorder(counts.clone()))
            .build()
            .unwrap();

        assert!(view.on_position(0, origin_fix()));
        assert!(!view.on_position(20, origin_fix()));
        assert_eq!(counts.borrow().discarded, 1);
        assert_eq!(counts.borrow().frames, 1);
        assert_eq!(
            counts.borrow().transitions,
            vec![(FrameStatus::WaitingForPosition, FrameStatus::WaitingForHeading)]
        );
    }

    #[test]
    fn position_changes_applied_at_most_once_per_second() {
        let mut view = ArViewBuilder::new(ViewConfig::phone()).pois(abc()).build().unwrap();
        view.on_orientation(0, &OrientationSample::from_compass(0.0));
        view.on_position(0, origin_fix());
        assert_eq!(ids(view.frame()), vec!["A"]);

        // Ten kilometres north: nothing in range, but not applied yet.
        assert!(!view.on_position(500, PositionFix::new(0.09, 0.0, 5.0)));
        assert_eq!(ids(view.frame()), vec!["A"]);
        assert!(!view.tick(900));

        assert!(view.tick(1_000));
        assert_eq!(view.frame().status, FrameStatus::NoNearbyPoints);
    }

    #[test]
    fn silent_sensor_falls_back_to_simulated_heading() {
        let mut view = ArViewBuilder::new(ViewConfig::phone()).pois(abc()).build().unwrap();
        view.on_position(0, origin_fix());
        assert!(!view.tick(2_900));
        assert_eq!(view.frame().status, FrameStatus::WaitingForHeading);

        assert!(view.tick(3_000));
        let heading = view.frame().heading.unwrap();
        assert_eq!(heading.status, HeadingStatus::Simulated);
        assert_eq!(heading.heading_deg, 0.0);
        assert_eq!(ids(view.frame()), vec!["A"]);

        assert!(view.tick(3_100));
        assert!((view.frame().heading.unwrap().heading_deg - 0.5).abs() < 1e-9);

        // A real sample ends the simulation.
        view.on_orientation(3_200, &OrientationSample::from_compass(10.0));
        assert!(!view.compass().is_simulated());
    }

    #[test]
    fn raising_the_phone_locks_the_heading() {
        let mut view = ArViewBuilder::new(ViewConfig::phone()).pois(abc()).build().unwrap();
        view.on_position(0, origin_fix());
        view.on_orientation(0, &OrientationSample::from_compass(0.0).with_tilt(25.0, 0.0));
        assert_eq!(ids(view.frame()), vec!["A"]);

        // Upright for camera AR: past the 85° lock, so the reading is ignored.
        assert!(view.on_orientation(200, &OrientationSample::from_compass(90.0).with_tilt(88.0, 0.0)));
        let heading = view.frame().heading.unwrap();
        assert_eq!(heading.status, HeadingStatus::Locked);
        assert_eq!(heading.heading_deg, 0.0);
        assert_eq!(ids(view.frame()), vec!["A"]);

        // Lowering it again releases the lock.
        view.on_orientation(400, &OrientationSample::from_compass(0.0).with_tilt(25.0, 0.0));
        assert_ne!(view.frame().heading.unwrap().status, HeadingStatus::Locked);
    }

    #[test]
    fn unavailable_sensor_simulates_immediately() {
        let mut view = ArViewBuilder::new(ViewConfig::phone()).pois(abc()).build().unwrap();
        view.on_position(0, origin_fix());
        view.mark_sensor_unavailable(10);
        assert_eq!(view.frame().heading.unwrap().status, HeadingStatus::Simulated);
        assert_eq!(view.frame().status, FrameStatus::Ready);
    }

    #[test]
    fn collapse_groups_merges_cluster() {
        let pois = vec![
            poi_at("c1", 0.0, 120.0, Category::Cafe),
            poi_at("c2", 0.5, 125.0, Category::Cafe),
        ];
        let mut view = ArViewBuilder::new(ViewConfig::phone())
            .pois(pois)
            .collapse_groups()
            .build()
            .unwrap();
        view.on_orientation(0, &OrientationSample::from_compass(0.0));
        view.on_position(0, origin_fix());

        let frame = view.frame();
        assert_eq!(frame.markers.len(), 1);
        assert_eq!(frame.markers[0].group_count, Some(2));
        assert_eq!(frame.markers[0].id().as_str(), "c1");
    }

    #[test]
    fn replace_pois_recomputes() {
        let mut view = ArViewBuilder::new(ViewConfig::phone()).pois(abc()).build().unwrap();
        view.on_orientation(0, &OrientationSample::from_compass(0.0));
        view.on_position(0, origin_fix());
        view.replace_pois(10, vec![poi_at("Z", 5.0, 30.0, Category::Shop)]);
        assert_eq!(ids(view.frame()), vec!["Z"]);
    }

    #[test]
    fn loads_feed_at_build_time() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pois.geojson");
        std::fs::write(
            &path,
            r#"{"type":"FeatureCollection","features":[
                {"type":"Feature","id":"north","geometry":{"type":"Point","coordinates":[0.0,0.0009]},
                 "properties":{"name":"North","category":"viewpoint"}},
                {"type":"Feature","geometry":{"type":"Point","coordinates":[0.0]},
                 "properties":{"name":"Broken"}}]}"#,
        )
        .unwrap();

        let mut view = ArViewBuilder::new(ViewConfig::phone()).feed(&path).build().unwrap();
        assert_eq!(view.selector().len(), 1);
        view.on_orientation(0, &OrientationSample::from_compass(0.0));
        view.on_position(0, origin_fix());
        assert_eq!(ids(view.frame()), vec!["north"]);
    }

    #[test]
    fn missing_feed_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = ArViewBuilder::new(ViewConfig::phone())
            .feed(dir.path().join("absent.geojson"))
            .build();
        assert!(matches!(result, Err(PipelineError::Feed(_))));
    }
}

#[cfg(test)]
mod shared {
    use std::thread;

    use ar_core::ViewConfig;
    use ar_heading::OrientationSample;

    use crate::SharedCompass;

    #[test]
    fn many_writers_one_history() {
        let compass = SharedCompass::from_view_config(&ViewConfig::phone(), 0);
        let handles: Vec<_> = (0..4u64)
            .map(|t| {
                let c = compass.clone();
                thread::spawn(move || {
                    for i in 0..10u64 {
                        c.on_sample(t * 1_000 + i * 10, &OrientationSample::from_compass(90.0));
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let estimate = compass.estimate().unwrap();
        assert!((estimate.heading_deg - 90.0).abs() < 1e-9);
        assert!(estimate.calibrated);
        assert_eq!(compass.with(|t| t.stabilizer().accepted()), 40);
    }
}
