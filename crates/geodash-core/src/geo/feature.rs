// crates/geodash-core/src/geo/feature.rs
use super::raw::{FeatureCollectionRaw, FeatureRaw};
use crate::catalog::Level;
use crate::error::{DashError, Result};
use crate::text::{equals_folded, fold_key, NameMatch};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, warn};

/// Property names carrying a state name, most specific first.
const STATE_KEYS: &[&str] = &["state", "st_nm", "stname", "state_name"];
/// Property names carrying a district name.
const DISTRICT_KEYS: &[&str] = &["district", "dtname", "dist_name", "district_name"];
/// Property names carrying a sub-district name.
const SUB_DISTRICT_KEYS: &[&str] = &["sub_district", "subdistrict", "sdtname", "tehsil", "taluk"];

/// Areal geometry kinds. Anything else is not an administrative region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GeometryKind {
    Polygon,
    MultiPolygon,
}

impl GeometryKind {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "Polygon" => Some(GeometryKind::Polygon),
            "MultiPolygon" => Some(GeometryKind::MultiPolygon),
            _ => None,
        }
    }
}

/// Polygon geometry, opaque to the aggregation core.
#[derive(Debug, Clone, Serialize)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub kind: GeometryKind,
    pub coordinates: Value,
}

/// Axis-aligned lon/lat extent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BBox {
    fn point(lon: f64, lat: f64) -> Self {
        BBox {
            min_lon: lon,
            min_lat: lat,
            max_lon: lon,
            max_lat: lat,
        }
    }

    pub fn union(self, other: BBox) -> BBox {
        BBox {
            min_lon: self.min_lon.min(other.min_lon),
            min_lat: self.min_lat.min(other.min_lat),
            max_lon: self.max_lon.max(other.max_lon),
            max_lat: self.max_lat.max(other.max_lat),
        }
    }
}

/// One administrative unit. Immutable once loaded.
#[derive(Debug, Clone, Serialize)]
pub struct GeoFeature {
    pub id: Option<String>,
    pub name: String,
    pub level: Option<Level>,
    /// Parent state name (districts and sub-districts).
    pub state: Option<String>,
    /// Parent district name (sub-districts).
    pub district: Option<String>,
    pub geometry: Geometry,
    pub bbox: Option<BBox>,
    #[serde(skip)]
    pub properties: Map<String, Value>,
}

impl GeoFeature {
    /// Features without an id or a level never appear in level-filtered views.
    pub fn is_addressable(&self) -> bool {
        self.id.is_some() && self.level.is_some()
    }

    pub fn id_str(&self) -> &str {
        self.id.as_deref().unwrap_or("")
    }

    pub fn is_level(&self, level: Level) -> bool {
        self.is_addressable() && self.level == Some(level)
    }

    /// The state this feature lies in: its own name for a state feature,
    /// the parent reference otherwise.
    pub fn state_name(&self) -> Option<&str> {
        match self.level {
            Some(Level::State) => Some(self.name.as_str()),
            _ => self.state.as_deref(),
        }
    }

    pub fn in_state(&self, state: &str) -> bool {
        self.state_name().is_some_and(|s| equals_folded(s, state))
    }

    /// True if `self` is a direct child of `parent` in the admin hierarchy.
    pub fn is_child_of(&self, parent: &GeoFeature) -> bool {
        if !self.is_addressable() || self.level != parent.level.and_then(Level::child) {
            return false;
        }
        match parent.level {
            Some(Level::State) => self.in_state(&parent.name),
            Some(Level::District) => {
                let district_match = self
                    .district
                    .as_deref()
                    .is_some_and(|d| equals_folded(d, &parent.name));
                // Same-named districts exist in different states.
                let state_match = match (self.state.as_deref(), parent.state.as_deref()) {
                    (Some(a), Some(b)) => equals_folded(a, b),
                    _ => true,
                };
                district_match && state_match
            }
            _ => false,
        }
    }
}

impl NameMatch for GeoFeature {
    fn name_str(&self) -> &str {
        &self.name
    }
}

/// Load-time counters, comparable to a database `stats()`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GeoStats {
    pub states: usize,
    pub districts: usize,
    pub sub_districts: usize,
    /// Kept but excluded from level-filtered views: no resolvable level.
    pub unleveled: usize,
    /// Kept but excluded from level-filtered views: no identifier.
    pub unidentified: usize,
    /// Dropped at load: point/line geometry or none at all.
    pub dropped_non_areal: usize,
}

/// The normalised geography: areal features only, in file order.
#[derive(Debug, Clone, Default)]
pub struct FeatureCollection {
    features: Vec<GeoFeature>,
    index: HashMap<String, usize>,
    stats: GeoStats,
}

impl FeatureCollection {
    /// **Standard Converter:** Raw -> normalised collection.
    pub fn from_raw(raw: FeatureCollectionRaw) -> Result<Self> {
        if raw.kind != "FeatureCollection" {
            return Err(DashError::InvalidData(format!(
                "expected a FeatureCollection, got {:?}",
                raw.kind
            )));
        }

        let mut stats = GeoStats::default();
        let mut features = Vec::with_capacity(raw.features.len());
        for (i, f) in raw.features.into_iter().enumerate() {
            match normalize(f) {
                Some(feature) => features.push(feature),
                None => {
                    debug!(index = i, "dropping non-areal feature");
                    stats.dropped_non_areal += 1;
                }
            }
        }
        Ok(Self::from_features(features, stats))
    }

    /// Builds a collection from already-normalised features.
    pub fn from_features(features: Vec<GeoFeature>, mut stats: GeoStats) -> Self {
        let mut index = HashMap::with_capacity(features.len());
        stats.states = 0;
        stats.districts = 0;
        stats.sub_districts = 0;
        stats.unleveled = 0;
        stats.unidentified = 0;

        for (i, f) in features.iter().enumerate() {
            match f.level {
                Some(Level::State) => stats.states += 1,
                Some(Level::District) => stats.districts += 1,
                Some(Level::SubDistrict) => stats.sub_districts += 1,
                None => stats.unleveled += 1,
            }
            match &f.id {
                Some(id) => {
                    if index.contains_key(id) {
                        warn!(id = %id, "duplicate feature id, keeping the first");
                    } else {
                        index.insert(id.clone(), i);
                    }
                }
                None => stats.unidentified += 1,
            }
        }

        info!(
            states = stats.states,
            districts = stats.districts,
            sub_districts = stats.sub_districts,
            dropped = stats.dropped_non_areal,
            "geography loaded"
        );

        FeatureCollection {
            features,
            index,
            stats,
        }
    }

    pub fn features(&self) -> &[GeoFeature] {
        &self.features
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn stats(&self) -> GeoStats {
        self.stats
    }

    /// Addressable features of one level, in file order.
    pub fn at_level(&self, level: Level) -> impl Iterator<Item = &GeoFeature> + '_ {
        self.features.iter().filter(move |f| f.is_level(level))
    }

    pub fn states(&self) -> impl Iterator<Item = &GeoFeature> + '_ {
        self.at_level(Level::State)
    }

    pub fn find(&self, id: &str) -> Option<&GeoFeature> {
        self.index.get(id).map(|&i| &self.features[i])
    }

    /// First addressable feature of `level` with the given (folded) name.
    pub fn find_named(&self, level: Level, name: &str) -> Option<&GeoFeature> {
        self.at_level(level).find(|f| f.is_named(name))
    }

    /// Direct children of `parent` (state -> districts, district -> sub-districts).
    pub fn children_of<'a>(
        &'a self,
        parent: &'a GeoFeature,
    ) -> impl Iterator<Item = &'a GeoFeature> + 'a {
        self.features.iter().filter(move |f| f.is_child_of(parent))
    }

    /// Every `parent_level` feature with its direct children, skipping
    /// parents without children. A child claimed by one parent is not
    /// offered to a later, same-named one.
    pub fn child_groups(&self, parent_level: Level) -> Vec<(&GeoFeature, Vec<&GeoFeature>)> {
        let Some(child_level) = parent_level.child() else {
            return Vec::new();
        };

        let mut by_parent_name: HashMap<String, Vec<&GeoFeature>> = HashMap::new();
        for child in self.at_level(child_level) {
            let parent_ref = match parent_level {
                Level::State => child.state.as_deref(),
                _ => child.district.as_deref(),
            };
            if let Some(name) = parent_ref {
                by_parent_name.entry(fold_key(name)).or_default().push(child);
            }
        }

        let mut claimed: HashSet<&str> = HashSet::new();
        let mut groups = Vec::new();
        for parent in self.at_level(parent_level) {
            let Some(candidates) = by_parent_name.get(&fold_key(&parent.name)) else {
                continue;
            };
            let children: Vec<&GeoFeature> = candidates
                .iter()
                .copied()
                .filter(|c| c.is_child_of(parent) && claimed.insert(c.id_str()))
                .collect();
            if !children.is_empty() {
                groups.push((parent, children));
            }
        }
        groups
    }

    /// Addressable features of `level` lying in the named state.
    pub fn in_state<'a>(
        &'a self,
        level: Level,
        state: &'a str,
    ) -> impl Iterator<Item = &'a GeoFeature> + 'a {
        self.at_level(level).filter(move |f| f.in_state(state))
    }

    pub fn districts_of_state<'a>(
        &'a self,
        state: &'a str,
    ) -> impl Iterator<Item = &'a GeoFeature> + 'a {
        self.in_state(Level::District, state)
    }

    /// Combined extent of the given features.
    pub fn bbox_of<'a>(features: impl IntoIterator<Item = &'a GeoFeature>) -> Option<BBox> {
        features
            .into_iter()
            .filter_map(|f| f.bbox)
            .reduce(BBox::union)
    }
}

// -----------------------------------------------------------------------------
// NORMALISATION
// -----------------------------------------------------------------------------

fn normalize(raw: FeatureRaw) -> Option<GeoFeature> {
    let geometry = raw.geometry?;
    let kind = GeometryKind::parse(&geometry.kind)?;
    let properties = raw.properties.unwrap_or_default();

    let level = resolve_level(&properties);
    let id = prop_string(&properties, &["id"]).or_else(|| raw.id.as_ref().and_then(value_string));

    let name = prop_string(&properties, &["name"])
        .or_else(|| level.and_then(|l| prop_string(&properties, name_keys(l))))
        .or_else(|| id.clone())
        .unwrap_or_else(|| "Unknown".to_string());

    let state = match level {
        Some(Level::State) => None,
        _ => prop_string(&properties, STATE_KEYS),
    };
    let district = match level {
        Some(Level::SubDistrict) => prop_string(&properties, DISTRICT_KEYS),
        _ => None,
    };

    if level.is_none() {
        debug!(name = %name, "feature has no resolvable level");
    }

    let bbox = coordinates_bbox(&geometry.coordinates);
    Some(GeoFeature {
        id,
        name,
        level,
        state,
        district,
        geometry: Geometry {
            kind,
            coordinates: geometry.coordinates,
        },
        bbox,
        properties,
    })
}

fn name_keys(level: Level) -> &'static [&'static str] {
    match level {
        Level::State => STATE_KEYS,
        Level::District => DISTRICT_KEYS,
        Level::SubDistrict => SUB_DISTRICT_KEYS,
    }
}

/// Trust an explicit `level` property; otherwise tag from the most specific
/// admin-name property present.
fn resolve_level(props: &Map<String, Value>) -> Option<Level> {
    if let Some(raw) = prop_string(props, &["level"]) {
        match raw.parse::<Level>() {
            Ok(level) => return Some(level),
            Err(_) => warn!(level = %raw, "unrecognised level property"),
        }
    }
    if prop(props, SUB_DISTRICT_KEYS).is_some() {
        Some(Level::SubDistrict)
    } else if prop(props, DISTRICT_KEYS).is_some() {
        Some(Level::District)
    } else if prop(props, STATE_KEYS).is_some() {
        Some(Level::State)
    } else {
        None
    }
}

fn prop<'a>(props: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|k| {
        props
            .iter()
            .find(|(name, v)| name.eq_ignore_ascii_case(k) && !v.is_null())
            .map(|(_, v)| v)
    })
}

fn prop_string(props: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    prop(props, keys).and_then(value_string)
}

fn value_string(v: &Value) -> Option<String> {
    match v {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn coordinates_bbox(coords: &Value) -> Option<BBox> {
    let Value::Array(items) = coords else {
        return None;
    };
    if let [Value::Number(lon), Value::Number(lat), ..] = items.as_slice() {
        return match (lon.as_f64(), lat.as_f64()) {
            (Some(lon), Some(lat)) if lon.is_finite() && lat.is_finite() => {
                Some(BBox::point(lon, lat))
            }
            _ => None,
        };
    }
    items.iter().filter_map(coordinates_bbox).reduce(BBox::union)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn collection(value: Value) -> Result<FeatureCollection> {
        FeatureCollection::from_raw(serde_json::from_value(value)?)
    }

    fn square(x: f64, y: f64) -> Value {
        json!({
            "type": "Polygon",
            "coordinates": [[[x, y], [x + 1.0, y], [x + 1.0, y + 1.0], [x, y + 1.0], [x, y]]]
        })
    }

    #[test]
    fn drops_points_and_keeps_polygons() {
        let fc = collection(json!({
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "geometry": square(0.0, 0.0), "properties": {"id": "S1", "name": "Kerala", "level": "state"}},
                {"type": "Feature", "geometry": {"type": "Point", "coordinates": [1.0, 2.0]}, "properties": {"id": "P", "level": "state"}},
                {"type": "Feature", "geometry": null, "properties": {"id": "N"}}
            ]
        }))
        .unwrap();
        assert_eq!(fc.len(), 1);
        assert_eq!(fc.stats().dropped_non_areal, 2);
        assert_eq!(fc.stats().states, 1);
        assert!(fc.find("P").is_none());
    }

    #[test]
    fn tags_level_from_admin_properties() {
        let fc = collection(json!({
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "id": 7, "geometry": square(0.0, 0.0), "properties": {"ST_NM": "Goa", "DTNAME": "North Goa"}},
                {"type": "Feature", "geometry": square(1.0, 0.0), "properties": {"id": "X", "sdtname": "Bardez", "dtname": "North Goa", "st_nm": "Goa"}}
            ]
        }))
        .unwrap();
        let d = fc.find("7").unwrap();
        assert_eq!(d.level, Some(Level::District));
        assert_eq!(d.name, "North Goa");
        assert_eq!(d.state.as_deref(), Some("Goa"));
        let s = fc.find("X").unwrap();
        assert_eq!(s.level, Some(Level::SubDistrict));
        assert_eq!(s.district.as_deref(), Some("North Goa"));
        assert!(s.is_child_of(d));
    }

    #[test]
    fn features_without_level_or_id_are_not_addressable() {
        let fc = collection(json!({
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "geometry": square(0.0, 0.0), "properties": {"id": "A", "name": "Somewhere"}},
                {"type": "Feature", "geometry": square(0.0, 0.0), "properties": {"name": "Nameless", "level": "state"}}
            ]
        }))
        .unwrap();
        assert_eq!(fc.len(), 2);
        assert_eq!(fc.at_level(Level::State).count(), 0);
        assert_eq!(fc.stats().unleveled, 1);
        assert_eq!(fc.stats().unidentified, 1);
    }

    #[test]
    fn rejects_non_collections() {
        let err = collection(json!({"type": "Feature", "features": []})).unwrap_err();
        assert!(matches!(err, DashError::InvalidData(_)));
    }

    #[test]
    fn bbox_covers_multipolygons() {
        let fc = collection(json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "geometry": {"type": "MultiPolygon", "coordinates": [
                    [[[70.0, 10.0], [71.0, 10.0], [71.0, 11.0], [70.0, 10.0]]],
                    [[[90.0, 20.0], [92.0, 20.0], [92.0, 25.0], [90.0, 20.0]]]
                ]},
                "properties": {"id": "S", "name": "Split", "level": "state"}
            }]
        }))
        .unwrap();
        let bbox = fc.find("S").unwrap().bbox.unwrap();
        assert_eq!(bbox.min_lon, 70.0);
        assert_eq!(bbox.max_lat, 25.0);
    }

    #[test]
    fn same_named_districts_in_different_states() {
        let fc = collection(json!({
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "geometry": square(0.0, 0.0), "properties": {"id": "D1", "name": "Aurangabad", "level": "district", "state": "Bihar"}},
                {"type": "Feature", "geometry": square(0.0, 0.0), "properties": {"id": "D2", "name": "Aurangabad", "level": "district", "state": "Maharashtra"}},
                {"type": "Feature", "geometry": square(0.0, 0.0), "properties": {"id": "T1", "name": "Daudnagar", "level": "sub-district", "district": "Aurangabad", "state": "Bihar"}}
            ]
        }))
        .unwrap();
        let d1 = fc.find("D1").unwrap();
        let d2 = fc.find("D2").unwrap();
        assert_eq!(fc.children_of(d1).count(), 1);
        assert_eq!(fc.children_of(d2).count(), 0);
    }
}
