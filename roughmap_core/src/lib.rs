//! Roughmap Core - Road-Quality Overlay Computation
//!
//! Turns a stream of geolocated road-roughness samples and an external
//! route polyline into a color-graded overlay adapted to the current view:
//! 1. **Scoring**: accelerometer noise -> periodic roughness score
//! 2. **Level of detail**: route polyline -> adaptively sized sub-segments
//! 3. **Coloring**: spatial sample weighting, gap interpolation, gradient mapping
//!
//! Everything here is pure computation over immutable snapshots; sensor
//! feeds, map rendering, routing and persistence are external
//! collaborators.

pub mod color;
pub mod colorizer;
pub mod config;
pub mod gapfill;
pub mod geo;
pub mod geojson;
pub mod markers;
pub mod pipeline;
pub mod sample;
pub mod scorer;
pub mod segmenter;

// Re-export key types for convenience
pub use color::{color_for_roughness, marker_color, Rgb};
pub use config::{ConfigError, TuningConfig};
pub use geo::{haversine_distance, perpendicular_distance, LatLng};
pub use markers::{markers, Marker};
pub use pipeline::{compute_route_overlay, ColoredSegment, OverlayCache, Snapshot};
pub use sample::RoughnessSample;
pub use scorer::{AccelSample, RoughnessScorer};
pub use segmenter::{segment_route, SubSegment, ViewContext};
