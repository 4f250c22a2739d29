// crates/geodash-core/src/view/mod.rs

//! Map View: which features are drawn and how, plus pointer handling.
//!
//! The rendering engine itself is external and reached through
//! [`MapSurface`]; [`CommandBuffer`] records the calls for hosts (and
//! tests) that replay them later.

mod frame;
mod map;
mod surface;

pub use frame::{FeatureRole, FeatureStyle, MapFrame, RenderedFeature};
pub use map::{MapCallbacks, MapEvent, MapView};
pub use surface::{CommandBuffer, MapSurface, SurfaceCommand, Tooltip};
