// crates/geodash-core/src/geo/raw.rs

//! Raw GeoJSON structures as they come from the boundary file.
//!
//! Only the fields the normaliser needs are typed; coordinates and
//! properties stay as `serde_json` values.

use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
pub struct FeatureCollectionRaw {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub features: Vec<FeatureRaw>,
}

#[derive(Debug, Deserialize)]
pub struct FeatureRaw {
    /// Feature-level id; may be a string or a number.
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub geometry: Option<GeometryRaw>,
    #[serde(default)]
    pub properties: Option<Map<String, Value>>,
}

#[derive(Debug, Deserialize)]
pub struct GeometryRaw {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub coordinates: Value,
}
