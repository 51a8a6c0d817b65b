//! Geodesic distance primitives.
//!
//! Two operations back the whole overlay pipeline:
//! - Great-circle distance via the haversine formula
//! - Point-to-segment perpendicular distance on a locally flattened plane

use serde::{Deserialize, Serialize};

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A WGS84 coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Midpoint on the flattened plane. Adequate at sub-segment scales.
    pub fn midpoint(self, other: LatLng) -> LatLng {
        LatLng::new((self.lat + other.lat) / 2.0, (self.lng + other.lng) / 2.0)
    }
}

/// Great-circle distance in meters between two coordinates.
///
/// Symmetric; returns 0 for identical coordinates.
pub fn haversine_distance(a: LatLng, b: LatLng) -> f64 {
    let phi1 = a.lat.to_radians();
    let phi2 = b.lat.to_radians();
    let d_phi = (b.lat - a.lat).to_radians();
    let d_lambda = (b.lng - a.lng).to_radians();

    let h = (d_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_M * c
}

/// Perpendicular distance in meters from `point` to the segment
/// `seg_start`..`seg_end`.
///
/// Computed on an equirectangular plane with longitude scaled by the
/// cosine of the mean segment latitude, which avoids full spherical
/// trigonometry in the colorizer's inner loop.
///
/// Returns `None` when the segment is degenerate (start == end) or when
/// the foot of the perpendicular falls outside the segment (projection
/// parameter t outside [0, 1]). Callers treat `None` as "no influence":
/// a sample whose closest approach is past an endpoint must not bleed
/// onto a neighboring sub-segment here. Gap filling handles that.
pub fn perpendicular_distance(
    point: LatLng,
    seg_start: LatLng,
    seg_end: LatLng,
) -> Option<f64> {
    let lat1 = seg_start.lat.to_radians();
    let lng1 = seg_start.lng.to_radians();
    let lat2 = seg_end.lat.to_radians();
    let lng2 = seg_end.lng.to_radians();
    let lat3 = point.lat.to_radians();
    let lng3 = point.lng.to_radians();

    let cos_lat = ((lat1 + lat2) / 2.0).cos();

    let x2 = (lng2 - lng1) * cos_lat;
    let y2 = lat2 - lat1;
    let x3 = (lng3 - lng1) * cos_lat;
    let y3 = lat3 - lat1;

    let len_sq = x2 * x2 + y2 * y2;
    if len_sq == 0.0 {
        // Start and end are identical
        return None;
    }

    let t = (x3 * x2 + y3 * y2) / len_sq;
    if !(0.0..=1.0).contains(&t) {
        // Foot of the perpendicular misses the segment
        return None;
    }

    let dx = x3 - t * x2;
    let dy = y3 - t * y2;

    Some((dx * dx + dy * dy).sqrt() * EARTH_RADIUS_M)
}
