// crates/geodash-core/src/view/frame.rs
use crate::catalog::Level;
use crate::engine::{brackets, Aggregator};
use crate::geo::{BBox, FeatureCollection, GeoFeature, Geometry};
use crate::state::ViewState;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FeatureRole {
    /// Interactive, filled by value.
    Active,
    /// Context border of a coarser level.
    Outline,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureStyle {
    pub fill: &'static str,
    pub fill_opacity: f64,
    pub stroke: &'static str,
    pub stroke_width: f64,
}

impl FeatureStyle {
    fn active(fill: &'static str) -> Self {
        FeatureStyle {
            fill,
            fill_opacity: 0.8,
            stroke: "#ffffff",
            stroke_width: 0.5,
        }
    }

    fn outline(level: Level) -> Self {
        FeatureStyle {
            fill: "transparent",
            fill_opacity: 0.0,
            stroke: "#4a4a4a",
            stroke_width: if level == Level::State { 1.5 } else { 0.8 },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedFeature {
    pub id: String,
    pub name: String,
    pub level: Level,
    pub role: FeatureRole,
    pub style: FeatureStyle,
    /// Colour value; outlines carry none.
    pub value: Option<f64>,
    pub geometry: Geometry,
}

/// The feature set drawn for one view state.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapFrame {
    pub resolution: Level,
    pub features: Vec<RenderedFeature>,
    /// Extent of the active features.
    pub bounds: Option<BBox>,
}

impl MapFrame {
    /// Active features of the current resolution, then outlines of every
    /// coarser level, all limited to the focus state when drilled down.
    pub fn build(
        collection: &FeatureCollection,
        view: &ViewState,
        aggregator: &Aggregator<'_>,
    ) -> MapFrame {
        let focus = view.focus.as_deref();
        let indicator = aggregator.indicator();
        let active: Vec<&GeoFeature> = scoped(collection, view.resolution, focus).collect();
        let bounds = FeatureCollection::bbox_of(active.iter().copied());

        let mut features: Vec<RenderedFeature> = active
            .into_iter()
            .map(|f| {
                let value = aggregator.color_for(f);
                render(
                    f,
                    FeatureRole::Active,
                    FeatureStyle::active(brackets::color_for(indicator, value)),
                    Some(value),
                )
            })
            .collect();

        let mut outline_level = view.resolution.parent();
        while let Some(level) = outline_level {
            features.extend(
                scoped(collection, level, focus)
                    .map(|f| render(f, FeatureRole::Outline, FeatureStyle::outline(level), None)),
            );
            outline_level = level.parent();
        }

        MapFrame {
            resolution: view.resolution,
            features,
            bounds,
        }
    }

    pub fn active(&self) -> impl Iterator<Item = &RenderedFeature> + '_ {
        self.features
            .iter()
            .filter(|f| f.role == FeatureRole::Active)
    }

    pub fn outlines(&self) -> impl Iterator<Item = &RenderedFeature> + '_ {
        self.features
            .iter()
            .filter(|f| f.role == FeatureRole::Outline)
    }
}

fn scoped<'a>(
    collection: &'a FeatureCollection,
    level: Level,
    focus: Option<&'a str>,
) -> impl Iterator<Item = &'a GeoFeature> + 'a {
    collection
        .at_level(level)
        .filter(move |f| focus.map_or(true, |s| f.in_state(s)))
}

fn render(
    f: &GeoFeature,
    role: FeatureRole,
    style: FeatureStyle,
    value: Option<f64>,
) -> RenderedFeature {
    RenderedFeature {
        id: f.id_str().to_string(),
        name: f.name.clone(),
        level: f.level.unwrap_or(Level::State),
        role,
        style,
        value,
        geometry: f.geometry.clone(),
    }
}
