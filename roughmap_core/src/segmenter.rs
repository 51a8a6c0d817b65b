//! Adaptive route segmentation (level of detail).
//!
//! Splits a route polyline into sub-segments sized for the current view:
//! fine chunks near the camera at high zoom for a smooth gradient, coarse
//! chunks when zoomed out or far away so the total sub-segment count stays
//! bounded.

use crate::color::Rgb;
use crate::geo::{self, LatLng};
use serde::{Deserialize, Serialize};

/// Finest sub-segment length, used when no zoom or distance floor applies.
pub const BASE_CHUNK_M: f64 = 5.0;

/// Camera state of the external map view, snapshotted per recomputation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewContext {
    pub zoom: f64,
    pub camera: LatLng,
}

impl ViewContext {
    pub const fn new(zoom: f64, camera: LatLng) -> Self {
        Self { zoom, camera }
    }
}

/// One piece of a route polyline, the unit of color assignment.
///
/// Created uncolored by the segmenter; the colorizer assigns a color or
/// leaves it unset, and the gap filler finalizes the rest. Lives for one
/// recomputation pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubSegment {
    pub start: LatLng,
    pub end: LatLng,

    /// Chunk size the segmenter used for this piece; the colorizer widens
    /// its search radius for coarser chunks.
    pub chunk_m: f64,

    pub color: Option<Rgb>,
}

/// Sub-segment length floor for the given zoom and camera distance.
///
/// The zoom and distance policies yield independent floors and the
/// coarsest one wins (max, not sum).
pub fn chunk_size_m(zoom: f64, camera_distance_m: f64) -> f64 {
    let mut chunk = BASE_CHUNK_M;

    if zoom < 10.0 {
        chunk = chunk.max(500.0);
    } else if zoom < 12.0 {
        chunk = chunk.max(200.0);
    } else if zoom < 14.0 {
        chunk = chunk.max(50.0);
    }

    if camera_distance_m > 50_000.0 {
        chunk = chunk.max(500.0);
    } else if camera_distance_m > 10_000.0 {
        chunk = chunk.max(100.0);
    } else if camera_distance_m > 3_000.0 {
        chunk = chunk.max(25.0);
    }

    chunk
}

/// Splits a route polyline into adaptively sized linear sub-segments.
///
/// Coordinates are interpolated linearly by split ratio; at chunk scales
/// the deviation from great-circle subdivision is negligible. An empty or
/// single-point route yields no sub-segments. A degenerate leg (repeated
/// coordinate) yields a single zero-length sub-segment.
pub fn segment_route(route: &[LatLng], view: &ViewContext) -> Vec<SubSegment> {
    let mut segments = Vec::new();

    for pair in route.windows(2) {
        let (start, end) = (pair[0], pair[1]);

        let length_m = geo::haversine_distance(start, end);
        let camera_distance_m = geo::haversine_distance(start, view.camera);
        let chunk_m = chunk_size_m(view.zoom, camera_distance_m);

        let splits = ((length_m / chunk_m).ceil() as usize).max(1);

        for k in 0..splits {
            let ratio_start = k as f64 / splits as f64;
            let ratio_end = (k + 1) as f64 / splits as f64;

            segments.push(SubSegment {
                start: lerp(start, end, ratio_start),
                end: lerp(start, end, ratio_end),
                chunk_m,
                color: None,
            });
        }
    }

    segments
}

fn lerp(a: LatLng, b: LatLng, t: f64) -> LatLng {
    LatLng::new(a.lat + (b.lat - a.lat) * t, a.lng + (b.lng - a.lng) * t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // ~1000 m of longitude at the equator, held a hair under so the
    // split count does not ceil past 200 on floating-point noise
    const LNG_1000M_DEG: f64 =
        1000.0 * (1.0 - 1e-9) / (geo::EARTH_RADIUS_M * std::f64::consts::PI / 180.0);

    #[test]
    fn test_chunk_size_zoom_floors() {
        assert_eq!(chunk_size_m(9.0, 0.0), 500.0);
        assert_eq!(chunk_size_m(11.0, 0.0), 200.0);
        assert_eq!(chunk_size_m(13.0, 0.0), 50.0);
        assert_eq!(chunk_size_m(14.0, 0.0), BASE_CHUNK_M);
    }

    #[test]
    fn test_chunk_size_distance_floors() {
        assert_eq!(chunk_size_m(15.0, 60_000.0), 500.0);
        assert_eq!(chunk_size_m(15.0, 20_000.0), 100.0);
        assert_eq!(chunk_size_m(15.0, 5_000.0), 25.0);
        assert_eq!(chunk_size_m(15.0, 1_000.0), BASE_CHUNK_M);
    }

    #[test]
    fn test_chunk_size_coarsest_floor_wins() {
        // Zoom floor 50 vs distance floor 500: the coarser one applies
        assert_eq!(chunk_size_m(13.0, 60_000.0), 500.0);
        // Zoom floor 500 vs distance floor 25
        assert_eq!(chunk_size_m(9.0, 5_000.0), 500.0);
    }

    #[test]
    fn test_thousand_meters_at_high_zoom_gives_200_chunks() {
        let route = [
            LatLng::new(0.0, 0.0),
            LatLng::new(0.0, LNG_1000M_DEG),
        ];
        let view = ViewContext::new(15.0, route[0]);

        let segments = segment_route(&route, &view);
        assert_eq!(segments.len(), 200);

        let total: f64 = segments
            .iter()
            .map(|s| geo::haversine_distance(s.start, s.end))
            .sum();
        assert_relative_eq!(total, 1000.0, max_relative = 1e-6);

        // Equal-length pieces joined end to end
        for pair in segments.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        let first = geo::haversine_distance(segments[0].start, segments[0].end);
        assert_relative_eq!(first, 5.0, max_relative = 1e-6);
    }

    #[test]
    fn test_empty_and_single_point_routes_yield_nothing() {
        let view = ViewContext::new(15.0, LatLng::new(0.0, 0.0));
        assert!(segment_route(&[], &view).is_empty());
        assert!(segment_route(&[LatLng::new(1.0, 1.0)], &view).is_empty());
    }

    #[test]
    fn test_degenerate_leg_yields_single_subsegment() {
        let p = LatLng::new(10.0, 10.0);
        let view = ViewContext::new(15.0, p);

        let segments = segment_route(&[p, p], &view);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].start, segments[0].end);
        assert_eq!(segments[0].color, None);
    }

    #[test]
    fn test_short_leg_never_splits() {
        let route = [LatLng::new(0.0, 0.0), LatLng::new(0.0, LNG_1000M_DEG / 1000.0)];
        let view = ViewContext::new(15.0, route[0]);

        // 1 m leg with a 5 m chunk stays whole
        let segments = segment_route(&route, &view);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].start, route[0]);
        assert_eq!(segments[0].end, route[1]);
    }

    #[test]
    fn test_chunks_carry_their_chunk_size() {
        let route = [
            LatLng::new(0.0, 0.0),
            LatLng::new(0.0, LNG_1000M_DEG),
        ];
        let view = ViewContext::new(11.0, route[0]);

        let segments = segment_route(&route, &view);
        // Zoom floor 200 m over 1000 m -> 5 chunks
        assert_eq!(segments.len(), 5);
        assert!(segments.iter().all(|s| s.chunk_m == 200.0));
    }
}
