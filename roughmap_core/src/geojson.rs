//! GeoJSON output-boundary adapter.
//!
//! Builds the renderer-facing FeatureCollection values. Strictly one-way:
//! colors are formatted into `rgb(...)` strings here and nothing in the
//! core ever parses them back. Coordinates follow the GeoJSON
//! longitude-first convention.

use serde_json::{json, Value};

use crate::markers::Marker;
use crate::pipeline::ColoredSegment;

/// Colored route sub-segments as a LineString FeatureCollection.
pub fn route_feature_collection(segments: &[ColoredSegment]) -> Value {
    let features: Vec<Value> = segments
        .iter()
        .map(|seg| {
            json!({
                "type": "Feature",
                "geometry": {
                    "type": "LineString",
                    "coordinates": [
                        [seg.start.lng, seg.start.lat],
                        [seg.end.lng, seg.end.lat],
                    ],
                },
                "properties": {
                    "color": seg.color.to_string(),
                },
            })
        })
        .collect();

    json!({
        "type": "FeatureCollection",
        "features": features,
    })
}

/// Point markers as a Point FeatureCollection, motion metadata included.
pub fn marker_feature_collection(markers: &[Marker]) -> Value {
    let features: Vec<Value> = markers
        .iter()
        .map(|marker| {
            json!({
                "type": "Feature",
                "geometry": {
                    "type": "Point",
                    "coordinates": [marker.position.lng, marker.position.lat],
                },
                "properties": {
                    "color": marker.color.to_string(),
                    "roughness": marker.roughness,
                    "speed": marker.speed_kmh,
                    "heading": marker.heading_deg,
                },
            })
        })
        .collect();

    json!({
        "type": "FeatureCollection",
        "features": features,
    })
}
