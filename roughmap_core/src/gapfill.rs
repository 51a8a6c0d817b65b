//! Neighbor interpolation for sub-segments the colorizer left unset.

use crate::color::{Rgb, GAP_FALLBACK};
use crate::segmenter::SubSegment;

/// Furthest neighbor, in sub-segment steps, allowed to donate a color.
pub const MAX_GAP_FILL: usize = 20;

/// Fills every unset sub-segment from its nearest originally-computed
/// neighbors. Interpolated colors never seed further interpolation: all
/// scans read the color assignments as the colorizer left them, so a long
/// run cannot flood itself.
///
/// - both neighbors in range: per-channel linear interpolation of red and
///   green by relative position in the gap, blue 0
/// - one neighbor in range: that color, verbatim
/// - neither: the steady-blue fallback
///
/// Scans stop after `MAX_GAP_FILL` steps, bounding the pass at
/// list length × `MAX_GAP_FILL`. Once this pass assigns a color it is
/// final for the recomputation.
pub fn fill_gaps(segments: &mut [SubSegment]) {
    let originals: Vec<Option<Rgb>> = segments.iter().map(|s| s.color).collect();

    for (i, seg) in segments.iter_mut().enumerate() {
        if seg.color.is_some() {
            continue;
        }

        let prev = nearest_colored(&originals, i, -1);
        let next = nearest_colored(&originals, i, 1);

        seg.color = Some(match (prev, next) {
            (Some((gap_prev, prev_color)), Some((gap_next, next_color))) => {
                let ratio = gap_prev as f64 / (gap_prev + gap_next) as f64;
                lerp_gradient(prev_color, next_color, ratio)
            }
            (Some((_, color)), None) | (None, Some((_, color))) => color,
            (None, None) => GAP_FALLBACK,
        });
    }
}

/// Nearest originally-colored entry within `MAX_GAP_FILL` steps in the
/// given direction, paired with the step count to reach it.
fn nearest_colored(originals: &[Option<Rgb>], from: usize, dir: isize) -> Option<(usize, Rgb)> {
    for gap in 1..=MAX_GAP_FILL {
        let idx = from as isize + dir * gap as isize;
        if idx < 0 || idx as usize >= originals.len() {
            return None;
        }
        if let Some(color) = originals[idx as usize] {
            return Some((gap, color));
        }
    }
    None
}

/// Channel-wise interpolation along the roughness gradient. Gradient
/// colors carry blue 0, so only red and green move.
fn lerp_gradient(a: Rgb, b: Rgb, ratio: f64) -> Rgb {
    let r = (a.r as f64 + (b.r as f64 - a.r as f64) * ratio).round() as u8;
    let g = (a.g as f64 + (b.g as f64 - a.g as f64) * ratio).round() as u8;
    Rgb::new(r, g, 0)
}
