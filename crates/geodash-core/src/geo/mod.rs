// crates/geodash-core/src/geo/mod.rs

//! Geography Store: loads a GeoJSON boundary file and normalises it into
//! administrative features tagged by level.

mod feature;
mod loader;
#[doc(hidden)]
pub mod raw;

pub use feature::{BBox, FeatureCollection, GeoFeature, GeoStats, Geometry, GeometryKind};
