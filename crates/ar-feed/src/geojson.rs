//! GeoJSON POI feeds.
//!
//! # Accepted shape
//!
//! ```json
//! { "type": "FeatureCollection",
//!   "features": [
//!     { "type": "Feature", "id": "eiffel",
//!       "geometry":   { "type": "Point", "coordinates": [2.2945, 48.8584, 35.0] },
//!       "properties": { "name": "Eiffel Tower", "category": "landmark",
//!                       "description": "Wrought-iron lattice tower" } } ] }
//! ```
//!
//! A bare JSON array of features is accepted too.  Coordinates are
//! `[lng, lat, alt?]`.  The id comes from the feature's `id`, then
//! `properties.id`, and is otherwise generated as `poi-<index>`.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde_json::{Map, Value};

use crate::report::{Collector, RawPoi};
use crate::{FeedError, FeedReport, FeedResult, SkipReason};

/// Parse a GeoJSON document held in memory.
pub fn parse_geojson(text: &str) -> FeedResult<FeedReport> {
    let doc: Value = serde_json::from_str(text)?;
    from_value(doc)
}

/// Load a GeoJSON file.
pub fn load_geojson(path: &Path) -> FeedResult<FeedReport> {
    let file = File::open(path)?;
    load_geojson_reader(BufReader::new(file))
}

/// Like [`load_geojson`] but accepts any `Read` source.
pub fn load_geojson_reader<R: Read>(reader: R) -> FeedResult<FeedReport> {
    let doc: Value = serde_json::from_reader(reader)?;
    from_value(doc)
}

fn from_value(doc: Value) -> FeedResult<FeedReport> {
    let features = match doc {
        Value::Array(features) => features,
        Value::Object(mut obj) => match obj.remove("features") {
            Some(Value::Array(features)) => features,
            _ => {
                return Err(FeedError::Format(
                    "expected a FeatureCollection with a \"features\" array".into(),
                ));
            }
        },
        _ => return Err(FeedError::Format("expected a JSON object or array".into())),
    };

    let mut collector = Collector::default();
    for (index, feature) in features.iter().enumerate() {
        collector.push(index, read_feature(feature));
    }
    Ok(collector.finish())
}

fn read_feature(feature: &Value) -> Result<RawPoi, SkipReason> {
    let feature = feature
        .as_object()
        .ok_or_else(|| SkipReason::Malformed("feature is not an object".into()))?;
    let geometry = feature
        .get("geometry")
        .and_then(Value::as_object)
        .ok_or_else(|| SkipReason::Malformed("missing geometry".into()))?;

    match geometry.get("type").and_then(Value::as_str) {
        Some("Point") => {}
        Some(other)   => return Err(SkipReason::NotAPoint(other.to_owned())),
        None          => return Err(SkipReason::Malformed("geometry has no type".into())),
    }

    let coords = geometry
        .get("coordinates")
        .and_then(Value::as_array)
        .ok_or_else(|| SkipReason::Malformed("missing coordinates".into()))?;
    if coords.len() < 2 {
        return Err(SkipReason::ShortCoordinates(coords.len()));
    }
    let number = |v: &Value| v.as_f64().ok_or(SkipReason::NonNumericCoordinate);
    let lon = number(&coords[0])?;
    let lat = number(&coords[1])?;
    let alt = coords.get(2).map(number).transpose()?;

    let empty = Map::new();
    let props = feature.get("properties").and_then(Value::as_object).unwrap_or(&empty);

    Ok(RawPoi {
        id: feature.get("id").or_else(|| props.get("id")).and_then(id_string),
        name: string(props, "name"),
        category: string(props, "category"),
        lat,
        lon,
        alt,
        description: string(props, "description"),
    })
}

fn string(props: &Map<String, Value>, key: &str) -> Option<String> {
    props.get(key).and_then(Value::as_str).map(str::to_owned)
}

/// GeoJSON allows string or numeric feature ids.
fn id_string(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
