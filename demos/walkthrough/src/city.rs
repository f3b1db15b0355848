//! Synthetic POIs around central Paris.
//!
//! A handful of real landmarks plus seeded random shops, cafés and stops
//! scattered within ~1.2 km, so every run of the walkthrough sees the same
//! city.

use ar_core::{Category, EARTH_RADIUS_M, GeoPoint, PointOfInterest};
use rand::Rng;
use rand::rngs::SmallRng;

/// Place de la Concorde.
pub const START: GeoPoint = GeoPoint { lat: 48.8656, lon: 2.3212, alt: None };

const LANDMARKS: [(&str, &str, Category, f64, f64); 6] = [
    ("obelisk",   "Luxor Obelisk",      Category::Landmark,  48.86556, 2.32125),
    ("orangerie", "Musée de l'Orangerie", Category::Museum,  48.86378, 2.32266),
    ("tuileries", "Jardin des Tuileries", Category::Park,    48.86340, 2.32749),
    ("madeleine", "La Madeleine",       Category::Landmark,  48.87005, 2.32449),
    ("orsay",     "Musée d'Orsay",      Category::Museum,    48.85998, 2.32656),
    ("concorde",  "Concorde (M1/M8/M12)", Category::Transit, 48.86560, 2.32290),
];

const FILLER: [(Category, &str); 5] = [
    (Category::Cafe,       "Café"),
    (Category::Restaurant, "Bistro"),
    (Category::Shop,       "Boutique"),
    (Category::Hotel,      "Hôtel"),
    (Category::Viewpoint,  "Belvédère"),
];

/// Point reached from `start` travelling `distance_m` along `bearing_deg`
/// on the mean sphere.
pub fn destination(start: GeoPoint, bearing_deg: f64, distance_m: f64) -> GeoPoint {
    let d = distance_m / EARTH_RADIUS_M;
    let b = bearing_deg.to_radians();
    let lat1 = start.lat.to_radians();
    let lon1 = start.lon.to_radians();

    let lat2 = (lat1.sin() * d.cos() + lat1.cos() * d.sin() * b.cos()).asin();
    let lon2 = lon1 + (b.sin() * d.sin() * lat1.cos()).atan2(d.cos() - lat1.sin() * lat2.sin());

    GeoPoint::new(lat2.to_degrees(), (lon2.to_degrees() + 540.0) % 360.0 - 180.0)
}

/// Landmarks followed by `filler` random POIs.
pub fn synthetic_pois(rng: &mut SmallRng, filler: usize) -> Vec<PointOfInterest> {
    let mut pois: Vec<PointOfInterest> = LANDMARKS
        .iter()
        .map(|&(id, name, category, lat, lon)| {
            PointOfInterest::new(id, name, category, GeoPoint::new(lat, lon))
        })
        .collect();

    for i in 0..filler {
        let (category, label) = FILLER[rng.gen_range(0..FILLER.len())];
        let loc = destination(START, rng.gen_range(0.0..360.0), rng.gen_range(30.0..1_200.0));
        pois.push(
            PointOfInterest::new(format!("{}-{i}", category.as_str()), format!("{label} {i}"), category, loc)
                .with_description(format!("synthetic {category}")),
        );
    }
    pois
}
