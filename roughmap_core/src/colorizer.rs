//! Spatial weighting of roughness samples onto route sub-segments.

use crate::color;
use crate::config::TuningConfig;
use crate::geo::{self, LatLng};
use crate::sample::RoughnessSample;
use crate::segmenter::SubSegment;

/// Bounding-box prefilter half-width in degrees (~20 m).
const PREFILTER_DEG: f64 = 0.0002;

/// Minimum perpendicular search radius in meters.
const MIN_SEARCH_RADIUS_M: f64 = 10.0;

/// A sample with its speed/sensitivity adjustment already applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdjustedSample {
    pub position: LatLng,
    pub roughness: f64,
}

/// Applies the configured adjustment to every sample.
///
/// Done once per recomputation pass so the colorizer's inner loop does
/// not repeat the speed math per sub-segment.
pub fn adjust_samples(samples: &[RoughnessSample], config: &TuningConfig) -> Vec<AdjustedSample> {
    samples
        .iter()
        .map(|sample| AdjustedSample {
            position: sample.position,
            roughness: sample.adjusted_roughness(config),
        })
        .collect()
}

/// Colors each sub-segment from the samples near it; sub-segments with no
/// qualifying sample keep `color: None` for the gap filler.
///
/// Candidates pass a cheap bounding-box test around the sub-segment
/// midpoint before the exact perpendicular check against a radius that
/// widens with the chunk size. Influence decays as 1/(distance + 1), so
/// the weighting never divides by zero and closer samples dominate.
pub fn colorize(segments: &mut [SubSegment], samples: &[AdjustedSample]) {
    for seg in segments.iter_mut() {
        let mid = seg.start.midpoint(seg.end);
        let radius_m = MIN_SEARCH_RADIUS_M.max(seg.chunk_m / 2.0);

        let mut weighted_sum = 0.0;
        let mut total_weight = 0.0;

        for sample in samples {
            if (sample.position.lat - mid.lat).abs() > PREFILTER_DEG
                || (sample.position.lng - mid.lng).abs() > PREFILTER_DEG
            {
                continue;
            }

            let Some(dist_m) = geo::perpendicular_distance(sample.position, seg.start, seg.end)
            else {
                continue;
            };
            if dist_m > radius_m {
                continue;
            }

            let weight = 1.0 / (dist_m + 1.0);
            weighted_sum += sample.roughness * weight;
            total_weight += weight;
        }

        if total_weight > 0.0 {
            seg.color = Some(color::color_for_roughness(weighted_sum / total_weight));
        }
    }
}
